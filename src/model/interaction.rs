//! Interaction and reaction events as the dispatcher sees them.
//!
//! Gateway payloads are converted into these types by the event handlers so that
//! routing only depends on the fields it needs. Each event still carries the IDs
//! and token a handler needs to answer through the HTTP API.

use std::collections::HashSet;

use percent_encoding::percent_decode_str;
use serenity::all::{
    ChannelId, CommandType, ComponentInteractionDataKind, GuildId, Interaction, InteractionId,
    MessageId, User, UserId,
};

use crate::error::config::ConfigError;

/// The user who triggered an interaction or reaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Actor {
    pub user_id: UserId,
    /// Display tag used in log lines.
    pub tag: String,
    pub bot: bool,
}

impl From<&User> for Actor {
    fn from(user: &User) -> Self {
        Self {
            user_id: user.id,
            tag: user.tag(),
            bot: user.bot,
        }
    }
}

/// What is needed to answer an interaction through the HTTP API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InteractionHandle {
    pub id: InteractionId,
    pub token: String,
}

/// Location of a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MessageRef {
    pub channel_id: ChannelId,
    pub message_id: MessageId,
}

/// A structured user-invoked event delivered by the platform.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InteractionEvent {
    SlashCommand {
        command_name: String,
        actor: Actor,
        guild_id: Option<GuildId>,
        handle: InteractionHandle,
    },
    MessageContextCommand {
        command_name: String,
        actor: Actor,
        guild_id: Option<GuildId>,
        handle: InteractionHandle,
        target: MessageRef,
    },
    ButtonPress {
        custom_id: String,
        actor: Actor,
        handle: InteractionHandle,
        /// Message the button is attached to.
        message: MessageRef,
    },
}

impl InteractionEvent {
    /// Converts a gateway interaction into a routable event.
    ///
    /// Returns `None` for interaction kinds the bot does not serve (autocomplete,
    /// modals, select menus, user context commands).
    pub fn from_interaction(interaction: &Interaction) -> Option<Self> {
        match interaction {
            Interaction::Command(command) => {
                let actor = Actor::from(&command.user);
                let handle = InteractionHandle {
                    id: command.id,
                    token: command.token.clone(),
                };

                match command.data.kind {
                    CommandType::ChatInput => Some(Self::SlashCommand {
                        command_name: command.data.name.clone(),
                        actor,
                        guild_id: command.guild_id,
                        handle,
                    }),
                    CommandType::Message => {
                        let target_id = command.data.target_id?;
                        Some(Self::MessageContextCommand {
                            command_name: command.data.name.clone(),
                            actor,
                            guild_id: command.guild_id,
                            handle,
                            target: MessageRef {
                                channel_id: command.channel_id,
                                message_id: MessageId::new(target_id.get()),
                            },
                        })
                    }
                    _ => None,
                }
            }
            Interaction::Component(component) => match component.data.kind {
                ComponentInteractionDataKind::Button => Some(Self::ButtonPress {
                    custom_id: component.data.custom_id.clone(),
                    actor: Actor::from(&component.user),
                    handle: InteractionHandle {
                        id: component.id,
                        token: component.token.clone(),
                    },
                    message: MessageRef {
                        channel_id: component.channel_id,
                        message_id: component.message.id,
                    },
                }),
                _ => None,
            },
            _ => None,
        }
    }

    pub fn actor(&self) -> &Actor {
        match self {
            Self::SlashCommand { actor, .. }
            | Self::MessageContextCommand { actor, .. }
            | Self::ButtonPress { actor, .. } => actor,
        }
    }

    pub fn handle(&self) -> &InteractionHandle {
        match self {
            Self::SlashCommand { handle, .. }
            | Self::MessageContextCommand { handle, .. }
            | Self::ButtonPress { handle, .. } => handle,
        }
    }

    pub fn guild_id(&self) -> Option<GuildId> {
        match self {
            Self::SlashCommand { guild_id, .. } | Self::MessageContextCommand { guild_id, .. } => {
                *guild_id
            }
            Self::ButtonPress { .. } => None,
        }
    }
}

/// A reaction added to a message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReactionEvent {
    /// Emoji identifier: the raw unicode for standard emoji, `name:id` for custom ones.
    pub emoji: String,
    pub actor: Actor,
    pub guild_id: Option<GuildId>,
    /// The reacted message, `None` when it could not be resolved (partial).
    pub message: Option<MessageRef>,
}

/// Emoji identifiers that turn a reaction into a bookmark.
///
/// Identifiers are configured as raw emoji or in the percent-encoded form the
/// gateway uses in URLs, and are decoded once at startup.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReactionTriggers {
    identifiers: HashSet<String>,
}

impl ReactionTriggers {
    pub fn parse<S: AsRef<str>>(raw: &[S]) -> Result<Self, ConfigError> {
        let identifiers = raw
            .iter()
            .map(|entry| decode_identifier(entry.as_ref()))
            .collect::<Result<HashSet<_>, _>>()?;

        Ok(Self { identifiers })
    }

    /// Whether the identifier, raw or percent-encoded, is a configured trigger.
    pub fn matches(&self, identifier: &str) -> bool {
        if self.identifiers.contains(identifier) {
            return true;
        }

        decode_identifier(identifier)
            .map(|decoded| self.identifiers.contains(&decoded))
            .unwrap_or(false)
    }

    pub fn len(&self) -> usize {
        self.identifiers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.identifiers.is_empty()
    }
}

fn decode_identifier(raw: &str) -> Result<String, ConfigError> {
    percent_decode_str(raw.trim())
        .decode_utf8()
        .map(|decoded| decoded.into_owned())
        .map_err(|e| ConfigError::InvalidEnvVar {
            name: "BOOKMARK_REACTIONS".to_string(),
            reason: format!("'{}' is not a valid emoji identifier: {}", raw, e),
        })
}
