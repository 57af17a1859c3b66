use std::sync::Arc;

use sea_orm::DatabaseConnection;
use serenity::all::{Context, EventHandler, Guild, Interaction, Reaction, Ready, UnavailableGuild};
use serenity::async_trait;

use crate::service::{cycle::RepublishCycle, dispatch::InteractionDispatcher};

pub mod guild;
pub mod interaction;
pub mod reaction;
pub mod ready;

/// Discord bot event handler
pub struct Handler {
    pub db: DatabaseConnection,
    pub dispatcher: Arc<InteractionDispatcher>,
    pub cycle: Arc<RepublishCycle>,
}

impl Handler {
    pub fn new(
        db: DatabaseConnection,
        dispatcher: Arc<InteractionDispatcher>,
        cycle: Arc<RepublishCycle>,
    ) -> Self {
        Self {
            db,
            dispatcher,
            cycle,
        }
    }
}

#[async_trait]
impl EventHandler for Handler {
    /// Called when the bot is ready and connected to Discord
    async fn ready(&self, ctx: Context, ready: Ready) {
        ready::handle_ready(&self.db, &self.cycle, ctx, ready).await;
    }

    /// Called when a guild becomes available or the bot joins a new guild
    async fn guild_create(&self, ctx: Context, guild: Guild, is_new: Option<bool>) {
        guild::handle_guild_create(&self.db, &self.cycle, ctx, guild, is_new).await;
    }

    /// Called when the bot leaves a guild or a guild becomes unavailable
    async fn guild_delete(&self, ctx: Context, incomplete: UnavailableGuild, full: Option<Guild>) {
        guild::handle_guild_delete(&self.db, ctx, incomplete, full).await;
    }

    /// Called for slash commands, context menu commands and button presses
    async fn interaction_create(&self, ctx: Context, interaction: Interaction) {
        interaction::handle_interaction_create(&self.dispatcher, ctx, interaction).await;
    }

    /// Called when a reaction is added to a message
    async fn reaction_add(&self, ctx: Context, reaction: Reaction) {
        reaction::handle_reaction_add(&self.dispatcher, ctx, reaction).await;
    }
}
