//! Bookmark bot for Discord.
//!
//! The bot lets members bookmark messages into their DMs, either through a
//! message context command or by reacting with a bookmark emoji. Beyond the
//! commands themselves, the crate keeps the set of guild-scoped application
//! commands synchronized with the guilds the bot belongs to.
//!
//! # Architecture
//!
//! - **Data Layer** (`data/`) - Guild persistence through SeaORM (`GuildStore`)
//! - **Model Layer** (`model/`) - Domain types for guilds, interactions and reports
//! - **Command Layer** (`command/`) - Command descriptors, handlers and the registry
//! - **Service Layer** (`service/`) - Reconciliation, publishing, restart and dispatch
//! - **Bot** (`bot/`) - Serenity client setup, signal handling and event handlers
//! - **Error Layer** (`error/`) - Error types for every failure class
//!
//! # Reconciliation Flow
//!
//! 1. Platform events (ready, guild join/leave) reach `bot::handler`
//! 2. `ReconciliationEngine` diffs live membership against the `GuildStore`
//! 3. When a guild was added, `RepublishCycle` publishes global then guild commands
//! 4. `RestartBridge` asks the process supervisor to restart the bot
//! 5. The fresh process rebuilds the `CommandRegistry` and serves interactions

pub mod bot;
pub mod command;
pub mod config;
pub mod data;
pub mod error;
pub mod model;
pub mod service;
pub mod startup;

#[cfg(test)]
pub(crate) mod test_support;
