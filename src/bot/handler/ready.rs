//! Ready event handler.
//!
//! The ready event fires after the gateway handshake on every connection. The
//! handler sets the bot's presence, then checks for guilds joined while the bot
//! was offline: those never produced a join event, so they are persisted here
//! and one republish cycle is scheduled for all of them.

use std::sync::Arc;

use sea_orm::DatabaseConnection;
use serenity::all::{ActivityData, Context, GuildId, GuildPagination, Http, Ready};

use crate::{
    data::GuildRepository,
    model::guild::GuildRecord,
    service::{
        cycle::RepublishCycle, publish::DiscordPublisher, reconcile::ReconciliationEngine,
    },
};

/// Maximum number of guilds Discord returns per page.
static GUILDS_PER_REQUEST: u64 = 200;

/// Handles the ready event when the bot connects to Discord.
///
/// # Arguments
/// - `db` - Database connection for the guild store
/// - `cycle` - Republish cycle scheduler
/// - `ctx` - Discord context for presence and HTTP access
/// - `ready` - Ready event data containing bot user and application information
pub async fn handle_ready(
    db: &DatabaseConnection,
    cycle: &RepublishCycle,
    ctx: Context,
    ready: Ready,
) {
    tracing::info!("Logged in as {}!", ready.user.tag());

    ctx.set_activity(Some(ActivityData::watching("out for bookmarks")));
    ctx.http.set_application_id(ready.application.id);

    let live = match fetch_live_guilds(&ctx.http).await {
        Ok(live) => live,
        Err(e) => {
            tracing::error!("Failed to fetch guild list after login: {}", e);
            return;
        }
    };

    let store = GuildRepository::new(db);
    let decision = ReconciliationEngine::new(&store)
        .reconcile_startup(&live)
        .await;

    if decision.should_republish {
        cycle.schedule(Arc::new(DiscordPublisher::new(ctx.http.clone())));
    }
}

/// Fetches every guild the bot is a member of, page by page.
async fn fetch_live_guilds(http: &Http) -> Result<Vec<GuildRecord>, serenity::Error> {
    let mut guilds = Vec::new();
    let mut after: Option<GuildId> = None;

    loop {
        let page = http
            .get_guilds(after.map(GuildPagination::After), Some(GUILDS_PER_REQUEST))
            .await?;

        let page_len = page.len() as u64;
        after = page.last().map(|guild| guild.id);
        guilds.extend(page.iter().map(GuildRecord::from));

        if page_len < GUILDS_PER_REQUEST {
            break;
        }
    }

    tracing::debug!("Bot is a member of {} guilds", guilds.len());

    Ok(guilds)
}
