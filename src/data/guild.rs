use sea_orm::{
    ActiveValue, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter, QueryOrder,
    SqlErr,
};
use serenity::async_trait;

use crate::{data::GuildStore, model::guild::GuildRecord};

pub struct GuildRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> GuildRepository<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Finds a guild by its Discord guild ID
    ///
    /// # Arguments
    /// - `guild_id`: Discord's identifier for the guild
    ///
    /// # Returns
    /// - `Ok(Some(GuildRecord))`: Guild found in database
    /// - `Ok(None)`: Guild not persisted
    /// - `Err(DbErr)`: Database error during query
    pub async fn find_by_guild_id(&self, guild_id: &str) -> Result<Option<GuildRecord>, DbErr> {
        let guild = entity::prelude::Guild::find()
            .filter(entity::guild::Column::GuildId.eq(guild_id))
            .one(self.db)
            .await?;

        Ok(guild.map(GuildRecord::from_entity))
    }
}

#[async_trait]
impl GuildStore for GuildRepository<'_> {
    async fn list(&self) -> Result<Vec<GuildRecord>, DbErr> {
        let guilds = entity::prelude::Guild::find()
            .order_by_asc(entity::guild::Column::Id)
            .all(self.db)
            .await?;

        Ok(guilds.into_iter().map(GuildRecord::from_entity).collect())
    }

    async fn contains(&self, guild_id: &str) -> Result<bool, DbErr> {
        Ok(self.find_by_guild_id(guild_id).await?.is_some())
    }

    async fn insert(&self, guild_id: &str, name: &str) -> Result<bool, DbErr> {
        if self.contains(guild_id).await? {
            return Ok(false);
        }

        let result = entity::prelude::Guild::insert(entity::guild::ActiveModel {
            guild_id: ActiveValue::Set(guild_id.to_string()),
            name: ActiveValue::Set(name.to_string()),
            ..Default::default()
        })
        .exec(self.db)
        .await;

        match result {
            Ok(_) => Ok(true),
            // A concurrent insert for the same guild won the race
            Err(err) if matches!(err.sql_err(), Some(SqlErr::UniqueConstraintViolation(_))) => {
                Ok(false)
            }
            Err(err) => Err(err),
        }
    }

    async fn remove(&self, guild_id: &str) -> Result<bool, DbErr> {
        let result = entity::prelude::Guild::delete_many()
            .filter(entity::guild::Column::GuildId.eq(guild_id))
            .exec(self.db)
            .await?;

        Ok(result.rows_affected > 0)
    }
}
