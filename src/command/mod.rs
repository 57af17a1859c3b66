//! Application commands served by the bot.
//!
//! Every command is a static descriptor implementing [`Command`]: a unique name,
//! the scope it is published to, its registration payload and its handler. The
//! full set is listed once in [`all`] and turned into a [`CommandRegistry`] at
//! process start; nothing is discovered at runtime.

pub mod bookmark;
pub mod delete_message;
pub mod help;
pub mod registry;

use std::sync::Arc;

use serenity::all::{
    CreateCommand, CreateInteractionResponse, CreateInteractionResponseMessage, GuildId, Http,
};
use serenity::async_trait;

use crate::{
    error::command::CommandError,
    model::interaction::{Actor, InteractionEvent, InteractionHandle, ReactionEvent},
};

pub use registry::CommandRegistry;

/// Where a command definition is published.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandScope {
    /// Published once for the whole application.
    Global,
    /// Published to every known guild individually.
    Guild,
}

/// What triggered a command.
#[derive(Debug, Clone)]
pub enum Invocation {
    Interaction(InteractionEvent),
    Reaction(ReactionEvent),
}

impl Invocation {
    pub fn actor(&self) -> &Actor {
        match self {
            Invocation::Interaction(event) => event.actor(),
            Invocation::Reaction(event) => &event.actor,
        }
    }

    /// Guild the invocation happened in, `None` in DMs.
    pub fn guild_id(&self) -> Option<GuildId> {
        match self {
            Invocation::Interaction(event) => event.guild_id(),
            Invocation::Reaction(event) => event.guild_id,
        }
    }

    /// The interaction to answer, if the invocation came from one.
    pub fn handle(&self) -> Option<&InteractionHandle> {
        match self {
            Invocation::Interaction(event) => Some(event.handle()),
            Invocation::Reaction(_) => None,
        }
    }
}

/// Everything a handler gets to work with.
pub struct CommandContext {
    pub http: Arc<Http>,
    pub invocation: Invocation,
}

/// A registered application command.
#[async_trait]
pub trait Command: Send + Sync {
    /// Unique command name, as published and as sent back in interactions.
    fn name(&self) -> &'static str;

    fn scope(&self) -> CommandScope {
        CommandScope::Guild
    }

    /// Registration payload submitted to the command API.
    fn definition(&self) -> CreateCommand;

    async fn execute(&self, ctx: &CommandContext) -> Result<(), CommandError>;
}

/// A built-in action bound to a reserved component custom ID.
///
/// These bypass the registry; they are never published as commands.
#[async_trait]
pub trait ComponentAction: Send + Sync {
    fn custom_id(&self) -> &'static str;

    async fn run(&self, ctx: &CommandContext) -> Result<(), CommandError>;
}

/// The bot's command list.
pub fn all() -> Vec<Arc<dyn Command>> {
    vec![
        Arc::new(bookmark::BookmarkCommand),
        Arc::new(help::HelpCommand),
    ]
}

/// Answers an interaction with a message only the invoking user can see.
pub async fn respond_ephemeral(
    http: &Http,
    handle: &InteractionHandle,
    content: impl Into<String>,
) -> Result<(), serenity::Error> {
    let response = CreateInteractionResponse::Message(
        CreateInteractionResponseMessage::new()
            .content(content)
            .ephemeral(true),
    );

    http.create_interaction_response(handle.id, &handle.token, &response, Vec::new())
        .await
}
