//! Guild entity fixtures.

/// Creates an in-memory guild entity model with the given ID and name.
pub fn entity_with(guild_id: &str, name: &str) -> entity::guild::Model {
    entity::guild::Model {
        id: 1,
        guild_id: guild_id.to_string(),
        name: name.to_string(),
    }
}
