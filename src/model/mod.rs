//! Domain models shared between the bot's layers.
//!
//! These types keep the service layer independent from SeaORM entities and from
//! the raw Serenity gateway payloads: repositories convert entities at their
//! boundary and event handlers convert gateway events before dispatching.

pub mod guild;
pub mod interaction;
pub mod publish;
pub mod reconcile;
pub mod supervisor;
