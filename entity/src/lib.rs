//! SeaORM entity models for the bot's relational store.

pub mod guild;
pub mod prelude;
