use serenity::all::{Context, Interaction};

use crate::{
    model::interaction::InteractionEvent,
    service::dispatch::{DispatchOutcome, InteractionDispatcher},
};

/// Handles the interaction_create event.
///
/// Converts the interaction into a routable event and dispatches it. Failures
/// have already been logged and reported to the user by the dispatcher.
pub async fn handle_interaction_create(
    dispatcher: &InteractionDispatcher,
    ctx: Context,
    interaction: Interaction,
) {
    let Some(event) = InteractionEvent::from_interaction(&interaction) else {
        tracing::trace!("Ignoring unsupported interaction {:?}", interaction.kind());
        return;
    };

    if let DispatchOutcome::Completed = dispatcher.dispatch(ctx.http.clone(), event).await {
        tracing::debug!("Handled interaction {}", interaction.id());
    }
}
