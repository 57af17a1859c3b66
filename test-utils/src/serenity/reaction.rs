//! Test factory for creating Serenity Reaction objects.

use serenity::all::Reaction;

/// Creates a test Serenity Reaction with a unicode emoji.
///
/// # Arguments
/// - `emoji` - Unicode emoji the user reacted with
/// - `guild_id` - Guild of the reacted message, `None` for a DM
///
/// # Panics
/// - If the JSON cannot be deserialized into a Reaction (indicates invalid test data)
pub fn create_test_reaction(emoji: &str, guild_id: Option<u64>) -> Reaction {
    serde_json::from_value(serde_json::json!({
        "user_id": "100",
        "channel_id": "200",
        "message_id": "300",
        "guild_id": guild_id.map(|id| id.to_string()),
        "emoji": { "id": null, "name": emoji },
        "burst": false,
        "type": 0,
    }))
    .expect("Failed to create test reaction - invalid JSON structure")
}
