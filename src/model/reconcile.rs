use std::collections::HashSet;

use crate::model::guild::GuildRecord;

/// Result of comparing live guild membership against the persisted guild list.
///
/// Derived on every check and never stored.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReconciliationDecision {
    /// Live guilds absent from the persisted list, in live order.
    pub missing_guilds: Vec<GuildRecord>,
    /// Whether a republish-and-restart cycle must be scheduled.
    pub should_republish: bool,
}

impl ReconciliationDecision {
    /// Returns the live guilds whose IDs are not persisted.
    ///
    /// Duplicate live entries for the same guild ID are collapsed to the first.
    pub fn missing(live: &[GuildRecord], persisted: &[GuildRecord]) -> Vec<GuildRecord> {
        let known: HashSet<&str> = persisted.iter().map(|g| g.guild_id.as_str()).collect();
        let mut seen = HashSet::new();

        live.iter()
            .filter(|guild| !known.contains(guild.guild_id.as_str()))
            .filter(|guild| seen.insert(guild.guild_id.as_str()))
            .cloned()
            .collect()
    }
}
