//! Database repository layer.
//!
//! Repositories use SeaORM entity models internally and return domain models so
//! the service layer never depends on entities. The `GuildStore` trait is the
//! seam the reconciliation and publish services work against.

pub mod guild;

#[cfg(test)]
mod test;

use sea_orm::DbErr;
use serenity::async_trait;

use crate::model::guild::GuildRecord;

pub use guild::GuildRepository;

/// Persistence of the known guild list.
///
/// Every call is a round trip to the store and may fail. Calls for different
/// guild IDs may run concurrently; no ordering between them is guaranteed.
#[async_trait]
pub trait GuildStore: Send + Sync {
    /// Returns every persisted guild.
    async fn list(&self) -> Result<Vec<GuildRecord>, DbErr>;

    /// Whether a record exists for the guild ID.
    async fn contains(&self, guild_id: &str) -> Result<bool, DbErr>;

    /// Persists the guild, returning whether a new record was created.
    ///
    /// Inserting a guild ID that already exists is a no-op returning `false`.
    async fn insert(&self, guild_id: &str, name: &str) -> Result<bool, DbErr>;

    /// Deletes the guild, returning whether a record existed.
    async fn remove(&self, guild_id: &str) -> Result<bool, DbErr>;
}
