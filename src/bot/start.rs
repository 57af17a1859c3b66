use std::sync::Arc;

use sea_orm::DatabaseConnection;
use serenity::all::{Client, GatewayIntents};

use crate::{
    bot::{handler::Handler, signal},
    config::Config,
    error::AppError,
    service::{cycle::RepublishCycle, dispatch::InteractionDispatcher},
};

/// Builds the Discord client without connecting it.
///
/// # Arguments
/// - `config` - Application configuration with the bot token and optional application ID
/// - `db` - Database connection for the guild store
/// - `dispatcher` - Routes interactions and reactions to command handlers
/// - `cycle` - Runs republish cycles scheduled by guild events
///
/// # Returns
/// - `Ok(Client)` - Client ready to be started
/// - `Err(AppError::DiscordErr)` - Client could not be built
pub async fn init_bot(
    config: &Config,
    db: DatabaseConnection,
    dispatcher: Arc<InteractionDispatcher>,
    cycle: Arc<RepublishCycle>,
) -> Result<Client, AppError> {
    let intents = GatewayIntents::GUILDS
        | GatewayIntents::GUILD_MESSAGES
        | GatewayIntents::GUILD_MESSAGE_REACTIONS
        | GatewayIntents::DIRECT_MESSAGES;

    let handler = Handler::new(db, dispatcher, cycle);

    let mut builder = Client::builder(&config.discord_bot_token, intents).event_handler(handler);
    if let Some(application_id) = config.discord_client_id {
        builder = builder.application_id(application_id);
    }

    Ok(builder.await?)
}

/// Runs the bot until the gateway shuts down.
///
/// SIGINT, SIGTERM and the supervisor's restart signal all shut every shard
/// down, which makes this return.
pub async fn start_bot(mut client: Client) -> Result<(), AppError> {
    let shard_manager = client.shard_manager.clone();

    tokio::spawn(async move {
        let signal = signal::shutdown_signal().await;
        tracing::info!("Shutting down Discord client after {}", signal);
        shard_manager.shutdown_all().await;
    });

    tracing::info!("Starting Discord bot...");

    client.start().await?;

    Ok(())
}
