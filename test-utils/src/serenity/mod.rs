//! Test factories for creating Serenity API objects.
//!
//! These factories create valid Serenity objects by deserializing JSON,
//! simulating what Discord's API would return.
//!
//! # Usage
//!
//! ```rust,ignore
//! use test_utils::serenity::{create_test_user, create_test_guild_info};
//!
//! let user = create_test_user(123456789, "someone", false);
//! let guild = create_test_guild_info(987654321, "Test Guild");
//! ```
//!
//! # Available Factories
//!
//! - `user::create_test_user` - Create Serenity User objects
//! - `guild::create_test_guild_info` - Create Serenity GuildInfo objects
//! - `reaction::create_test_reaction` - Create Serenity Reaction objects

pub mod guild;
pub mod reaction;
pub mod user;

// Re-export commonly used functions for convenience
pub use guild::create_test_guild_info;
pub use reaction::create_test_reaction;
pub use user::create_test_user;
