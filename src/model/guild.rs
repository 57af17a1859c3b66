use serenity::all::{Guild, GuildInfo};

/// A guild the bot is (or was observed to be) a member of.
///
/// The guild ID is kept as an opaque string, matching how it is stored.
/// At most one record exists per guild ID.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct GuildRecord {
    /// Discord guild ID.
    pub guild_id: String,
    /// Guild display name at the time it was observed.
    pub name: String,
}

impl GuildRecord {
    pub fn new(guild_id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            guild_id: guild_id.into(),
            name: name.into(),
        }
    }

    /// Converts an entity model to a domain record at the repository boundary.
    pub fn from_entity(entity: entity::guild::Model) -> Self {
        Self {
            guild_id: entity.guild_id,
            name: entity.name,
        }
    }
}

impl From<&GuildInfo> for GuildRecord {
    fn from(info: &GuildInfo) -> Self {
        Self::new(info.id.get().to_string(), info.name.clone())
    }
}

impl From<&Guild> for GuildRecord {
    fn from(guild: &Guild) -> Self {
        Self::new(guild.id.get().to_string(), guild.name.clone())
    }
}
