//! Guild factory for creating test guild entities.
//!
//! This module provides factory methods for creating guild entities with
//! sensible defaults, reducing boilerplate in tests. The factory supports
//! customization through a builder pattern.

use crate::factory::helpers::next_id;
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};

/// Factory for creating test guilds with customizable fields.
///
/// # Example
///
/// ```rust,ignore
/// use test_utils::factory::guild::GuildFactory;
///
/// let guild = GuildFactory::new(&db)
///     .guild_id("987654321")
///     .name("CustomGuild")
///     .build()
///     .await?;
/// ```
pub struct GuildFactory<'a> {
    db: &'a DatabaseConnection,
    guild_id: String,
    name: String,
}

impl<'a> GuildFactory<'a> {
    /// Creates a new GuildFactory with default values.
    ///
    /// Defaults:
    /// - guild_id: `"{id}"` where id is auto-incremented
    /// - name: `"Guild {id}"`
    ///
    /// # Arguments
    /// - `db` - Database connection for inserting the entity
    pub fn new(db: &'a DatabaseConnection) -> Self {
        let id = next_id();
        Self {
            db,
            guild_id: id.to_string(),
            name: format!("Guild {}", id),
        }
    }

    /// Sets the guild ID.
    pub fn guild_id(mut self, guild_id: impl Into<String>) -> Self {
        self.guild_id = guild_id.into();
        self
    }

    /// Sets the guild name.
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Builds and inserts the guild entity into the database.
    ///
    /// # Returns
    /// - `Ok(entity::guild::Model)` - Created guild entity
    /// - `Err(DbErr)` - Database error during insert
    pub async fn build(self) -> Result<entity::guild::Model, DbErr> {
        entity::guild::ActiveModel {
            guild_id: ActiveValue::Set(self.guild_id),
            name: ActiveValue::Set(self.name),
            ..Default::default()
        }
        .insert(self.db)
        .await
    }
}

/// Creates a guild with default values.
///
/// Shorthand for `GuildFactory::new(db).build().await`.
pub async fn create_guild(db: &DatabaseConnection) -> Result<entity::guild::Model, DbErr> {
    GuildFactory::new(db).build().await
}

/// Creates one guild per provided guild ID, named `"Guild {guild_id}"`.
///
/// # Arguments
/// - `db` - Database connection
/// - `guild_ids` - Discord guild IDs to persist, in insertion order
///
/// # Returns
/// - `Ok(Vec<entity::guild::Model>)` - Created guild entities
/// - `Err(DbErr)` - Database error during insert
pub async fn create_guilds(
    db: &DatabaseConnection,
    guild_ids: &[&str],
) -> Result<Vec<entity::guild::Model>, DbErr> {
    let mut guilds = Vec::with_capacity(guild_ids.len());

    for guild_id in guild_ids {
        let guild = GuildFactory::new(db)
            .guild_id(*guild_id)
            .name(format!("Guild {}", guild_id))
            .build()
            .await?;
        guilds.push(guild);
    }

    Ok(guilds)
}
