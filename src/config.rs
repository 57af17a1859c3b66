use std::time::Duration;

use serenity::all::ApplicationId;

use crate::error::{config::ConfigError, AppError};

const DEFAULT_PROCESS_NAME: &str = "botmark";
const DEFAULT_PM2_BIN: &str = "pm2";
/// Percent-encoded :bookmark: and :bookmark_tabs: as the gateway reports them.
const DEFAULT_BOOKMARK_REACTIONS: &str = "%F0%9F%94%96,%F0%9F%93%91";
const DEFAULT_SUPERVISOR_GRACE_MS: u64 = 1000;

pub struct Config {
    pub database_url: String,

    pub discord_bot_token: String,
    /// Application ID used for command registration. Resolved from the API when unset.
    pub discord_client_id: Option<ApplicationId>,

    /// Name of the bot's entry in the process supervisor.
    pub process_name: String,
    pub pm2_bin: String,
    /// Delay before disconnecting from the supervisor after a restart request.
    pub supervisor_grace: Duration,

    /// Raw reaction trigger identifiers, decoded into a `ReactionTriggers` at startup.
    pub bookmark_reactions: Vec<String>,
}

impl Config {
    pub fn from_env() -> Result<Self, AppError> {
        Ok(Self {
            database_url: required("DATABASE_URL")?,
            discord_bot_token: required("DISCORD_BOT_TOKEN")?,
            discord_client_id: optional("DISCORD_CLIENT_ID")
                .map(|raw| parse_id("DISCORD_CLIENT_ID", &raw).map(ApplicationId::new))
                .transpose()?,
            process_name: optional("PROCESS_NAME")
                .unwrap_or_else(|| DEFAULT_PROCESS_NAME.to_string()),
            pm2_bin: optional("PM2_BIN").unwrap_or_else(|| DEFAULT_PM2_BIN.to_string()),
            supervisor_grace: Duration::from_millis(
                optional("SUPERVISOR_GRACE_MS")
                    .map(|raw| parse_u64("SUPERVISOR_GRACE_MS", &raw))
                    .transpose()?
                    .unwrap_or(DEFAULT_SUPERVISOR_GRACE_MS),
            ),
            bookmark_reactions: split_list(
                &optional("BOOKMARK_REACTIONS")
                    .unwrap_or_else(|| DEFAULT_BOOKMARK_REACTIONS.to_string()),
            ),
        })
    }
}

fn required(name: &str) -> Result<String, ConfigError> {
    std::env::var(name).map_err(|_| ConfigError::MissingEnvVar(name.to_string()))
}

fn optional(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|value| !value.trim().is_empty())
}

fn parse_u64(name: &str, raw: &str) -> Result<u64, ConfigError> {
    raw.trim()
        .parse::<u64>()
        .map_err(|e| ConfigError::InvalidEnvVar {
            name: name.to_string(),
            reason: e.to_string(),
        })
}

/// Snowflake IDs are never zero.
fn parse_id(name: &str, raw: &str) -> Result<u64, ConfigError> {
    match parse_u64(name, raw)? {
        0 => Err(ConfigError::InvalidEnvVar {
            name: name.to_string(),
            reason: "ID must not be zero".to_string(),
        }),
        id => Ok(id),
    }
}

fn split_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .map(str::to_string)
        .collect()
}
