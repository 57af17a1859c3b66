use std::sync::Arc;

use sea_orm::DbErr;
use serenity::all::{Command as ApplicationCommand, CreateCommand, GuildId, Http};
use serenity::async_trait;

use crate::{
    command::{CommandRegistry, CommandScope},
    data::GuildStore,
    error::publish::PublishError,
    model::publish::{GuildPublishFailure, RepublishReport},
};

/// The remote command registration API.
///
/// Each call fully replaces the command set for its scope; resubmitting the
/// same batch is idempotent.
#[async_trait]
pub trait CommandPublisher: Send + Sync {
    async fn publish_global(&self, definitions: Vec<CreateCommand>) -> Result<(), PublishError>;

    async fn publish_to_guild(
        &self,
        guild_id: &str,
        definitions: Vec<CreateCommand>,
    ) -> Result<(), PublishError>;
}

/// Publishes through Discord's HTTP API.
///
/// The HTTP client must know the application ID before publishing.
pub struct DiscordPublisher {
    http: Arc<Http>,
}

impl DiscordPublisher {
    pub fn new(http: Arc<Http>) -> Self {
        Self { http }
    }
}

#[async_trait]
impl CommandPublisher for DiscordPublisher {
    async fn publish_global(&self, definitions: Vec<CreateCommand>) -> Result<(), PublishError> {
        ApplicationCommand::set_global_commands(&self.http, definitions).await?;
        Ok(())
    }

    async fn publish_to_guild(
        &self,
        guild_id: &str,
        definitions: Vec<CreateCommand>,
    ) -> Result<(), PublishError> {
        let guild_id = parse_guild_id(guild_id)?;
        guild_id.set_commands(&self.http, definitions).await?;
        Ok(())
    }
}

fn parse_guild_id(guild_id: &str) -> Result<GuildId, PublishError> {
    guild_id
        .parse::<u64>()
        .ok()
        .filter(|id| *id != 0)
        .map(GuildId::new)
        .ok_or_else(|| PublishError::InvalidGuildId(guild_id.to_string()))
}

/// Runs one republish cycle: the global batch once, then the guild batch to
/// every persisted guild, one guild at a time.
pub struct RepublishService<'a> {
    store: &'a dyn GuildStore,
    publisher: &'a dyn CommandPublisher,
    registry: &'a CommandRegistry,
}

impl<'a> RepublishService<'a> {
    pub fn new(
        store: &'a dyn GuildStore,
        publisher: &'a dyn CommandPublisher,
        registry: &'a CommandRegistry,
    ) -> Self {
        Self {
            store,
            publisher,
            registry,
        }
    }

    /// Publishes global then guild-scoped command definitions.
    ///
    /// A rejected batch, global or for a single guild, is logged and recorded in
    /// the report; the remaining guilds are still attempted.
    ///
    /// # Returns
    /// - `Ok(RepublishReport)` - Every batch was attempted
    /// - `Err(DbErr)` - The guild list could not be read; no guild batch was attempted
    pub async fn run(&self) -> Result<RepublishReport, DbErr> {
        tracing::info!("Started reloading application commands");

        let mut report = RepublishReport::default();

        match self
            .publisher
            .publish_global(self.registry.definitions(CommandScope::Global))
            .await
        {
            Ok(()) => tracing::info!("Registered global commands"),
            Err(e) => {
                tracing::error!("Failed to register global commands: {}", e);
                report.global_error = Some(e);
            }
        }

        let guilds = self.store.list().await?;

        for guild in guilds {
            match self
                .publisher
                .publish_to_guild(
                    &guild.guild_id,
                    self.registry.definitions(CommandScope::Guild),
                )
                .await
            {
                Ok(()) => {
                    tracing::info!(
                        "Registered commands for guild {} ({})",
                        guild.name,
                        guild.guild_id
                    );
                    report.published_guilds.push(guild.guild_id);
                }
                Err(error) => {
                    // Continue with the other guilds even if one fails
                    tracing::error!(
                        "Failed to register commands for guild {} ({}): {}",
                        guild.name,
                        guild.guild_id,
                        error
                    );
                    report.failed_guilds.push(GuildPublishFailure {
                        guild_id: guild.guild_id,
                        name: guild.name,
                        error,
                    });
                }
            }
        }

        if report.is_success() {
            tracing::info!(
                "Successfully reloaded application commands for {} guilds",
                report.attempted_guilds()
            );
        } else {
            tracing::warn!(
                "Reloaded application commands with failures: global {}, {} of {} guilds failed",
                if report.global_error.is_some() { "failed" } else { "ok" },
                report.failed_guilds.len(),
                report.attempted_guilds()
            );
        }

        Ok(report)
    }
}
