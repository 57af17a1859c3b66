use serenity::all::{ApplicationId, Http};

use crate::{config::Config, error::AppError};

/// Log filter used when `RUST_LOG` is not set.
const DEFAULT_LOG_FILTER: &str = "botmark=info";

/// Installs the global tracing subscriber.
///
/// The filter comes from `RUST_LOG`, falling back to info-level logs for this
/// crate only. Call once per process, before anything logs.
pub fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(DEFAULT_LOG_FILTER)),
        )
        .init();
}

/// Connects to the database and runs pending migrations.
///
/// Establishes a connection pool using the connection string from configuration,
/// then runs all pending SeaORM migrations so the guild table exists before the
/// store is used.
///
/// # Arguments
/// - `config` - Application configuration containing the database URL
///
/// # Returns
/// - `Ok(DatabaseConnection)` - Connected database with migrations applied
/// - `Err(AppError::DbErr)` - Failed to connect to database or run migrations
pub async fn connect_to_database(config: &Config) -> Result<sea_orm::DatabaseConnection, AppError> {
    use migration::{Migrator, MigratorTrait};
    use sea_orm::{ConnectOptions, Database};

    let mut opt = ConnectOptions::new(&config.database_url);
    opt.sqlx_logging(false);

    let db = Database::connect(opt).await?;

    Migrator::up(&db, None).await?;

    Ok(db)
}

/// Makes the application ID known to the HTTP client.
///
/// Command registration routes are keyed by application ID. The configured ID
/// is used when present; otherwise it is looked up with the bot token.
pub async fn resolve_application_id(
    http: &Http,
    configured: Option<ApplicationId>,
) -> Result<ApplicationId, AppError> {
    let application_id = match configured {
        Some(id) => id,
        None => {
            let info = http.get_current_application_info().await?;
            tracing::debug!("Resolved application ID {} from the API", info.id);
            info.id
        }
    };

    http.set_application_id(application_id);

    Ok(application_id)
}
