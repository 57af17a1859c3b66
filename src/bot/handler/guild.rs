//! Guild membership event handlers.
//!
//! `guild_create` fires for every guild on connect and again when a guild
//! recovers from an outage; only real joins (`is_new` not `Some(false)`) are
//! considered, and the idempotent insert keeps repeated events from scheduling
//! more than one cycle. `guild_delete` fires both when the bot leaves and when a
//! guild goes unavailable; only the former removes the record.

use std::sync::Arc;

use sea_orm::DatabaseConnection;
use serenity::all::{Context, Guild, UnavailableGuild};

use crate::{
    data::GuildRepository,
    model::guild::GuildRecord,
    service::{
        cycle::RepublishCycle, publish::DiscordPublisher, reconcile::ReconciliationEngine,
    },
};

/// Handles the guild_create event.
///
/// Persists a newly joined guild and schedules a republish cycle when a new
/// record was created.
pub async fn handle_guild_create(
    db: &DatabaseConnection,
    cycle: &RepublishCycle,
    ctx: Context,
    guild: Guild,
    is_new: Option<bool>,
) {
    if is_new == Some(false) {
        return;
    }

    tracing::info!("Joined guild: {} ({})", guild.name, guild.id);

    let record = GuildRecord::from(&guild);
    let store = GuildRepository::new(db);

    if ReconciliationEngine::new(&store).guild_joined(&record).await {
        cycle.schedule(Arc::new(DiscordPublisher::new(ctx.http.clone())));
    }
}

/// Handles the guild_delete event.
///
/// Removes the guild's record when the bot left it. Commands are not
/// republished; Discord drops guild commands together with the membership.
pub async fn handle_guild_delete(
    db: &DatabaseConnection,
    _ctx: Context,
    incomplete: UnavailableGuild,
    full: Option<Guild>,
) {
    if incomplete.unavailable {
        tracing::warn!("Guild {} became unavailable", incomplete.id);
        return;
    }

    let name = full
        .as_ref()
        .map(|guild| guild.name.as_str())
        .unwrap_or("unknown");
    tracing::info!("Left guild: {} ({})", name, incomplete.id);

    let store = GuildRepository::new(db);
    ReconciliationEngine::new(&store)
        .guild_left(&incomplete.id.get().to_string())
        .await;
}
