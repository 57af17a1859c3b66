use serenity::all::{Context, Reaction};

use crate::{
    model::interaction::{Actor, MessageRef, ReactionEvent},
    service::dispatch::InteractionDispatcher,
};

/// Handles the reaction_add event.
///
/// Reactions with a bookmark emoji in a guild are resolved into a full event
/// (reacting user and message) and handed to the dispatcher. Everything else
/// is dropped before any API call.
pub async fn handle_reaction_add(dispatcher: &InteractionDispatcher, ctx: Context, reaction: Reaction) {
    if !needs_resolving(dispatcher, &reaction) {
        return;
    }

    let user = match reaction.user(&ctx).await {
        Ok(user) => user,
        Err(e) => {
            tracing::error!("Something went wrong when fetching the reacting user: {}", e);
            return;
        }
    };

    let message = match reaction.message(&ctx).await {
        Ok(message) => MessageRef {
            channel_id: message.channel_id,
            message_id: message.id,
        },
        Err(e) => {
            tracing::error!("Something went wrong when fetching the reacted message: {}", e);
            return;
        }
    };

    let event = ReactionEvent {
        emoji: reaction.emoji.as_data(),
        actor: Actor::from(&user),
        guild_id: reaction.guild_id,
        message: Some(message),
    };

    dispatcher.dispatch_reaction(ctx.http.clone(), event).await;
}

/// Whether the reaction could trigger a bookmark and is worth fetching the
/// user and message for.
fn needs_resolving(dispatcher: &InteractionDispatcher, reaction: &Reaction) -> bool {
    reaction.guild_id.is_some() && dispatcher.is_trigger(&reaction.emoji.as_data())
}
