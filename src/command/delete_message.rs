//! Built-in "delete bookmark" button.
//!
//! Bookmark DMs carry a button with the reserved custom ID below. Pressing it
//! deletes the DM it is attached to.

use serenity::all::CreateInteractionResponse;
use serenity::async_trait;

use crate::{
    command::{CommandContext, ComponentAction, Invocation},
    error::command::CommandError,
    model::interaction::InteractionEvent,
};

pub const CUSTOM_ID: &str = "deleteMsg";

pub struct DeleteMessageAction;

#[async_trait]
impl ComponentAction for DeleteMessageAction {
    fn custom_id(&self) -> &'static str {
        CUSTOM_ID
    }

    async fn run(&self, ctx: &CommandContext) -> Result<(), CommandError> {
        let Invocation::Interaction(InteractionEvent::ButtonPress {
            message, handle, ..
        }) = &ctx.invocation
        else {
            return Err(CommandError::UnsupportedInvocation {
                command: CUSTOM_ID,
                reason: "only button presses can delete a bookmark",
            });
        };

        ctx.http
            .create_interaction_response(
                handle.id,
                &handle.token,
                &CreateInteractionResponse::Acknowledge,
                Vec::new(),
            )
            .await?;

        message
            .channel_id
            .delete_message(&ctx.http, message.message_id)
            .await?;

        Ok(())
    }
}
