//! Bookmark command.
//!
//! Copies a message into the invoking user's DMs as an embed with a link back
//! to the original and a button to delete the bookmark again. Invoked from the
//! message context menu or by reacting with a configured bookmark emoji.

use serenity::all::{
    CommandType, CreateActionRow, CreateButton, CreateCommand, CreateEmbed, CreateEmbedAuthor,
    CreateEmbedFooter, CreateMessage, Message,
};
use serenity::async_trait;

use crate::{
    command::{delete_message, respond_ephemeral, Command, CommandContext, Invocation},
    error::command::CommandError,
    model::interaction::{InteractionEvent, MessageRef, ReactionEvent},
};

pub const NAME: &str = "bookmark";

/// Embed descriptions are capped at 4096 characters by Discord.
const DESCRIPTION_LIMIT: usize = 4096;
const EMBED_COLOUR: u32 = 0xDD2E44;

pub struct BookmarkCommand;

#[async_trait]
impl Command for BookmarkCommand {
    fn name(&self) -> &'static str {
        NAME
    }

    fn definition(&self) -> CreateCommand {
        // Context menu commands carry no description
        CreateCommand::new(NAME).kind(CommandType::Message)
    }

    async fn execute(&self, ctx: &CommandContext) -> Result<(), CommandError> {
        let target = target_message(&ctx.invocation).ok_or(CommandError::UnsupportedInvocation {
            command: NAME,
            reason: "no target message",
        })?;

        let message = target
            .channel_id
            .message(&ctx.http, target.message_id)
            .await?;

        let bookmark = CreateMessage::new()
            .embed(bookmark_embed(&message))
            .components(vec![CreateActionRow::Buttons(vec![delete_button()])]);

        let dm = ctx
            .invocation
            .actor()
            .user_id
            .create_dm_channel(&ctx.http)
            .await?;
        dm.id.send_message(&ctx.http, bookmark).await?;

        tracing::debug!(
            "Bookmarked message {} for {}",
            target.message_id,
            ctx.invocation.actor().tag
        );

        if let Some(handle) = ctx.invocation.handle() {
            respond_ephemeral(&ctx.http, handle, "Bookmark sent to your DMs!").await?;
        }

        Ok(())
    }
}

fn target_message(invocation: &Invocation) -> Option<MessageRef> {
    match invocation {
        Invocation::Interaction(InteractionEvent::MessageContextCommand { target, .. }) => {
            Some(*target)
        }
        Invocation::Reaction(ReactionEvent { message, .. }) => *message,
        Invocation::Interaction(_) => None,
    }
}

fn bookmark_embed(message: &Message) -> CreateEmbed {
    let mut embed = CreateEmbed::new()
        .colour(EMBED_COLOUR)
        .author(CreateEmbedAuthor::new(message.author.tag()).icon_url(message.author.face()))
        .description(truncate(&message.content, DESCRIPTION_LIMIT))
        .field("Original message", format!("[Jump to message]({})", message.link()), false)
        .footer(CreateEmbedFooter::new("Bookmarked with botmark"))
        .timestamp(message.timestamp);

    if let Some(image) = message.attachments.iter().find(|a| {
        a.content_type
            .as_deref()
            .is_some_and(|kind| kind.starts_with("image/"))
    }) {
        embed = embed.image(image.url.clone());
    }

    embed
}

fn delete_button() -> CreateButton {
    CreateButton::new(delete_message::CUSTOM_ID)
        .label("Delete bookmark")
        .style(serenity::all::ButtonStyle::Danger)
}

/// Truncates to at most `limit` characters, marking the cut with an ellipsis.
fn truncate(content: &str, limit: usize) -> String {
    if content.chars().count() <= limit {
        return content.to_string();
    }

    let mut truncated: String = content.chars().take(limit.saturating_sub(1)).collect();
    truncated.push('…');
    truncated
}
