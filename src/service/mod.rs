//! Business logic between the bot's event handlers and its collaborators.
//!
//! - `reconcile` - diff live guild membership against the store
//! - `publish` - push command definitions to the registration API
//! - `cycle` - coalesced republish-then-restart cycles inside the bot
//! - `supervisor` - the external process supervisor and its pm2 adapter
//! - `restart` - restart requests through the supervisor
//! - `dispatch` - route interactions and reactions to command handlers

pub mod cycle;
pub mod dispatch;
pub mod publish;
pub mod reconcile;
pub mod restart;
pub mod supervisor;
