use futures::future::join_all;

use crate::{
    data::GuildStore,
    model::{guild::GuildRecord, reconcile::ReconciliationDecision},
};

/// Keeps the persisted guild list in step with live guild membership.
///
/// Store failures never escape: they are logged and the affected guild is
/// treated as not newly persisted, so no republish is triggered for it.
pub struct ReconciliationEngine<'a> {
    store: &'a dyn GuildStore,
}

impl<'a> ReconciliationEngine<'a> {
    pub fn new(store: &'a dyn GuildStore) -> Self {
        Self { store }
    }

    /// Persists live guilds missing from the store after the bot logs in.
    ///
    /// Missing guilds are inserted concurrently. A republish is needed when at
    /// least one of them was newly created; the caller schedules exactly one
    /// cycle for the whole batch.
    pub async fn reconcile_startup(&self, live: &[GuildRecord]) -> ReconciliationDecision {
        let persisted = match self.store.list().await {
            Ok(persisted) => persisted,
            Err(e) => {
                tracing::warn!(
                    "Failed to read persisted guild list, treating it as empty: {}",
                    e
                );
                Vec::new()
            }
        };

        let missing_guilds = ReconciliationDecision::missing(live, &persisted);
        if missing_guilds.is_empty() {
            tracing::info!("All {} guilds are already persisted", live.len());
            return ReconciliationDecision::default();
        }

        let outcomes = join_all(missing_guilds.iter().map(|guild| async move {
            (guild, self.store.insert(&guild.guild_id, &guild.name).await)
        }))
        .await;

        let mut should_republish = false;
        for (guild, outcome) in outcomes {
            match outcome {
                Ok(true) => {
                    tracing::info!(
                        "Added guild {} ({}) that was joined while offline",
                        guild.name,
                        guild.guild_id
                    );
                    should_republish = true;
                }
                Ok(false) => {
                    tracing::debug!("Guild {} was persisted concurrently", guild.guild_id);
                }
                Err(e) => {
                    tracing::error!(
                        "Error inserting guild {} ({}) into database during login check: {}",
                        guild.name,
                        guild.guild_id,
                        e
                    );
                }
            }
        }

        ReconciliationDecision {
            missing_guilds,
            should_republish,
        }
    }

    /// Persists a newly joined guild.
    ///
    /// Returns whether a republish cycle should be scheduled, i.e. whether a new
    /// record was created.
    pub async fn guild_joined(&self, guild: &GuildRecord) -> bool {
        match self.store.insert(&guild.guild_id, &guild.name).await {
            Ok(true) => {
                tracing::info!("Added guild {} ({}) to database", guild.name, guild.guild_id);
                true
            }
            Ok(false) => {
                tracing::info!(
                    "Guild {} ({}) is already in the database",
                    guild.name,
                    guild.guild_id
                );
                false
            }
            Err(e) => {
                tracing::error!(
                    "Error inserting guild {} ({}) into database: {}",
                    guild.name,
                    guild.guild_id,
                    e
                );
                false
            }
        }
    }

    /// Removes a guild the bot left. Leaving never triggers a republish.
    ///
    /// Returns whether a record was removed.
    pub async fn guild_left(&self, guild_id: &str) -> bool {
        match self.store.remove(guild_id).await {
            Ok(true) => {
                tracing::info!("Removed guild {} from database", guild_id);
                true
            }
            Ok(false) => {
                tracing::debug!("Guild {} was not in the database", guild_id);
                false
            }
            Err(e) => {
                tracing::error!("Error removing guild {} from database: {}", guild_id, e);
                false
            }
        }
    }
}
