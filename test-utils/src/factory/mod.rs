//! Factory methods for creating test data.
//!
//! This module provides factory methods for creating test entities with sensible defaults,
//! reducing boilerplate in tests.
//!
//! # Overview
//!
//! Each entity has its own factory module with both a `Factory` struct for customization
//! and a `create_*` convenience function for quick default creation.
//!
//! # Basic Usage
//!
//! ```rust,ignore
//! use test_utils::factory;
//!
//! #[tokio::test]
//! async fn test_example() -> Result<(), sea_orm::DbErr> {
//!     let db = /* ... */;
//!
//!     // Create with defaults
//!     let guild = factory::guild::create_guild(&db).await?;
//!
//!     // Create several at once
//!     let guilds = factory::create_guilds(&db, &["1", "2"]).await?;
//!
//!     Ok(())
//! }
//! ```
//!
//! # Customization
//!
//! ```rust,ignore
//! let guild = factory::guild::GuildFactory::new(&db)
//!     .guild_id("987654321")
//!     .name("CustomGuild")
//!     .build()
//!     .await?;
//! ```

pub mod guild;
pub mod helpers;

// Re-export commonly used factory functions for concise usage
pub use guild::{create_guild, create_guilds};
