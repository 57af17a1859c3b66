//! Discord gateway client.
//!
//! The bot runs as a single long-lived process under the process supervisor.
//! Event handlers convert gateway payloads into domain events and hand them to
//! the reconciliation and dispatch services. A republish cycle ends with the
//! supervisor signalling the process, which shuts the gateway down cleanly so a
//! fresh process can take over.
//!
//! # Gateway Intents
//!
//! - `GUILDS` - Guild create and delete events
//! - `GUILD_MESSAGES` - Resolving messages to bookmark
//! - `GUILD_MESSAGE_REACTIONS` - Bookmark reactions
//! - `DIRECT_MESSAGES` - Sending bookmarks and deleting them again

pub mod handler;
pub mod signal;
pub mod start;
