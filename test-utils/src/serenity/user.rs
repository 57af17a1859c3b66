//! Test factory for creating Serenity User objects.

use serenity::all::User;

/// Creates a test Serenity User with customizable fields.
///
/// # Arguments
/// - `user_id` - Discord user ID (snowflake)
/// - `name` - Username
/// - `bot` - Whether the account is a bot account
///
/// # Returns
/// - `User` - A valid Serenity User struct for testing
///
/// # Panics
/// - If the JSON cannot be deserialized into a User (indicates invalid test data)
pub fn create_test_user(user_id: u64, name: &str, bot: bool) -> User {
    serde_json::from_value(serde_json::json!({
        "id": user_id.to_string(),
        "username": name,
        "global_name": null,
        "avatar": null,
        "bot": bot,
    }))
    .expect("Failed to create test user - invalid JSON structure")
}
