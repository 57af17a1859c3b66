use std::sync::Arc;

use botmark::{
    bot,
    command::{self, bookmark::BookmarkCommand, CommandRegistry},
    config::Config,
    error::AppError,
    model::interaction::ReactionTriggers,
    service::{
        cycle::RepublishCycle,
        dispatch::{DiscordNotifier, InteractionDispatcher},
        restart::RestartBridge,
        supervisor::Pm2Supervisor,
    },
    startup,
};

#[tokio::main]
async fn main() -> Result<(), AppError> {
    dotenvy::dotenv().ok();
    startup::init_tracing();

    let config = Config::from_env()?;

    let db = startup::connect_to_database(&config).await?;

    let registry = Arc::new(CommandRegistry::from_commands(command::all())?);
    tracing::info!(
        "Loaded {} commands: {}",
        registry.len(),
        registry.names().join(", ")
    );

    let triggers = ReactionTriggers::parse(config.bookmark_reactions.as_slice())?;
    if triggers.is_empty() {
        tracing::warn!("No bookmark reactions configured, reaction bookmarks are disabled");
    }

    let supervisor = Arc::new(Pm2Supervisor::new(config.pm2_bin.clone()));
    let restart = Arc::new(RestartBridge::new(
        supervisor,
        config.process_name.clone(),
        config.supervisor_grace,
    ));
    let cycle = Arc::new(RepublishCycle::new(db.clone(), registry.clone(), restart));

    let dispatcher = Arc::new(InteractionDispatcher::new(
        registry,
        Arc::new(BookmarkCommand),
        triggers,
        Arc::new(DiscordNotifier),
    ));

    let client = bot::start::init_bot(&config, db, dispatcher, cycle).await?;
    bot::start::start_bot(client).await?;

    tracing::info!("Discord client stopped");

    Ok(())
}
