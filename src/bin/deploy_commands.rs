//! One-shot command deployment.
//!
//! Publishes the global and guild-scoped commands to every persisted guild,
//! then asks the process supervisor to restart the bot if it is running so it
//! picks up the new command set.
//!
//! Exits with 2 when the supervisor cannot be reached and 1 on any other
//! startup failure. Rejected command batches are logged but do not change the
//! exit code.

use std::{process::ExitCode, sync::Arc};

use serenity::all::Http;

use botmark::{
    command::{self, CommandRegistry},
    config::Config,
    data::GuildRepository,
    error::AppError,
    service::{
        publish::{DiscordPublisher, RepublishService},
        restart::RestartBridge,
        supervisor::Pm2Supervisor,
    },
    startup,
};

const SUPERVISOR_UNREACHABLE: u8 = 2;

#[tokio::main]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();
    startup::init_tracing();

    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(AppError::SupervisorErr(e)) if e.is_connection_failure() => {
            tracing::error!("{}", e);
            ExitCode::from(SUPERVISOR_UNREACHABLE)
        }
        Err(e) => {
            tracing::error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run() -> Result<(), AppError> {
    let config = Config::from_env()?;

    let db = startup::connect_to_database(&config).await?;
    let registry = CommandRegistry::from_commands(command::all())?;

    let http = Arc::new(Http::new(&config.discord_bot_token));
    startup::resolve_application_id(&http, config.discord_client_id).await?;

    let store = GuildRepository::new(&db);
    let publisher = DiscordPublisher::new(http);

    if let Err(e) = RepublishService::new(&store, &publisher, &registry)
        .run()
        .await
    {
        tracing::error!("Something went wrong when reloading application commands: {}", e);
    }

    let supervisor = Arc::new(Pm2Supervisor::new(config.pm2_bin.clone()));
    let restart = RestartBridge::new(
        supervisor,
        config.process_name.clone(),
        config.supervisor_grace,
    );
    restart.restart_managed().await?;

    Ok(())
}
