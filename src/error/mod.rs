//! Error types for the bot.
//!
//! Each failure class the bot distinguishes has its own enum:
//!
//! - `ConfigError` - environment configuration problems at startup
//! - `PublishError` - the command registration API rejected a batch
//! - `SupervisorError` - the process supervisor could not be reached or driven
//! - `CommandError` - a command handler failed while executing
//! - `DispatchError` - an interaction could not be served (no handler, handler failure)
//! - `RegistryError` - the command list could not be turned into a registry
//!
//! Store and gateway transport failures surface as `sea_orm::DbErr` and
//! `serenity::Error`. `AppError` aggregates everything for the binaries.

pub mod command;
pub mod config;
pub mod publish;
pub mod supervisor;

use thiserror::Error;

use crate::error::{
    command::RegistryError, config::ConfigError, publish::PublishError,
    supervisor::SupervisorError,
};

/// Top-level application error type.
///
/// Aggregates all possible error types that can occur during startup and in
/// the one-shot deploy path. Event callbacks never return it; they log and
/// carry on instead.
#[derive(Error, Debug)]
pub enum AppError {
    /// Configuration error during startup or environment variable loading.
    #[error(transparent)]
    ConfigErr(#[from] ConfigError),

    /// Database operation error from SeaORM.
    #[error(transparent)]
    DbErr(#[from] sea_orm::DbErr),

    /// Discord API error from Serenity.
    ///
    /// Boxed due to large size.
    #[error(transparent)]
    DiscordErr(#[from] Box<serenity::Error>),

    /// Command registration rejected by the API.
    #[error(transparent)]
    PublishErr(#[from] PublishError),

    /// Process supervisor unreachable or misbehaving.
    #[error(transparent)]
    SupervisorErr(#[from] SupervisorError),

    /// Command list could not be registered.
    #[error(transparent)]
    RegistryErr(#[from] RegistryError),
}

/// Manual conversion from serenity::Error to AppError.
///
/// Boxes the error to reduce the size of the AppError enum, as serenity::Error
/// is very large and would make all AppError variants larger if not boxed.
impl From<serenity::Error> for AppError {
    fn from(err: serenity::Error) -> Self {
        AppError::DiscordErr(Box::new(err))
    }
}
