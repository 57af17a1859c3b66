use crate::error::publish::PublishError;

/// A guild that did not accept the guild-scoped command batch.
#[derive(Debug)]
pub struct GuildPublishFailure {
    pub guild_id: String,
    pub name: String,
    pub error: PublishError,
}

/// Outcome of one republish cycle.
///
/// Individual guild failures are recorded here rather than aborting the cycle.
#[derive(Debug, Default)]
pub struct RepublishReport {
    /// Error from the global batch, if it was rejected.
    pub global_error: Option<PublishError>,
    /// Guild IDs that accepted the guild-scoped batch, in publish order.
    pub published_guilds: Vec<String>,
    pub failed_guilds: Vec<GuildPublishFailure>,
}

impl RepublishReport {
    /// Whether every batch in the cycle was accepted.
    pub fn is_success(&self) -> bool {
        self.global_error.is_none() && self.failed_guilds.is_empty()
    }

    /// Number of guilds the cycle attempted.
    pub fn attempted_guilds(&self) -> usize {
        self.published_guilds.len() + self.failed_guilds.len()
    }
}
