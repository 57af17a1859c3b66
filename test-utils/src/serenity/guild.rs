//! Test factory for creating Serenity GuildInfo objects.
//!
//! `GuildInfo` is the partial guild returned by `GET /users/@me/guilds`, which
//! is what startup reconciliation reads as the bot's live membership.

use serenity::all::GuildInfo;

/// Creates a test Serenity GuildInfo.
///
/// # Arguments
/// - `guild_id` - Discord guild ID (snowflake)
/// - `name` - Guild name
///
/// # Returns
/// - `GuildInfo` - A valid Serenity GuildInfo struct for testing
///
/// # Panics
/// - If the JSON cannot be deserialized into a GuildInfo (indicates invalid test data)
pub fn create_test_guild_info(guild_id: u64, name: &str) -> GuildInfo {
    serde_json::from_value(serde_json::json!({
        "id": guild_id.to_string(),
        "name": name,
        "icon": null,
        "owner": false,
        "permissions": "0",
        "features": [],
    }))
    .expect("Failed to create test guild info - invalid JSON structure")
}
