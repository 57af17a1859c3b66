//! Routing of interactions and bookmark reactions.
//!
//! Every event is handled on its own task by the gateway client, so a failing
//! or slow handler never holds up another interaction.

use std::{future::Future, sync::Arc};

use serenity::all::{CreateMessage, Http};
use serenity::async_trait;

use crate::{
    command::{
        delete_message::DeleteMessageAction, respond_ephemeral, Command, CommandContext,
        CommandRegistry, ComponentAction, Invocation,
    },
    error::command::{CommandError, DispatchError},
    model::interaction::{InteractionEvent, ReactionEvent, ReactionTriggers},
};

pub const INTERACTION_FAILURE_MESSAGE: &str =
    "```fix\nThere was an error while executing this command!\nPlease try again later.\n```";

pub const REACTION_FAILURE_MESSAGE: &str = "```diff\n- There was an error while executing bookmark command from emoji reaction!\n- Please try again later.\n```";

/// Tells a user that their command failed.
#[async_trait]
pub trait FailureNotifier: Send + Sync {
    async fn notify_failure(&self, ctx: &CommandContext) -> Result<(), serenity::Error>;
}

/// Answers interactions with an ephemeral notice and reactions with a DM.
pub struct DiscordNotifier;

#[async_trait]
impl FailureNotifier for DiscordNotifier {
    async fn notify_failure(&self, ctx: &CommandContext) -> Result<(), serenity::Error> {
        match &ctx.invocation {
            Invocation::Interaction(event) => {
                respond_ephemeral(&ctx.http, event.handle(), INTERACTION_FAILURE_MESSAGE).await
            }
            Invocation::Reaction(event) => {
                let dm = event.actor.user_id.create_dm_channel(&ctx.http).await?;
                dm.id
                    .send_message(
                        &ctx.http,
                        CreateMessage::new().content(REACTION_FAILURE_MESSAGE),
                    )
                    .await?;
                Ok(())
            }
        }
    }
}

/// How an event was handled.
#[derive(Debug)]
pub enum DispatchOutcome {
    Completed,
    Failed(DispatchError),
    /// The event is not something the bot serves.
    Ignored,
}

/// Routes interactions to command handlers and bookmark reactions to the
/// bookmark handler.
pub struct InteractionDispatcher {
    registry: Arc<CommandRegistry>,
    bookmark: Arc<dyn Command>,
    triggers: ReactionTriggers,
    actions: Vec<Arc<dyn ComponentAction>>,
    notifier: Arc<dyn FailureNotifier>,
}

impl InteractionDispatcher {
    /// Creates a dispatcher serving the built-in delete-bookmark button.
    pub fn new(
        registry: Arc<CommandRegistry>,
        bookmark: Arc<dyn Command>,
        triggers: ReactionTriggers,
        notifier: Arc<dyn FailureNotifier>,
    ) -> Self {
        Self {
            registry,
            bookmark,
            triggers,
            actions: vec![Arc::new(DeleteMessageAction)],
            notifier,
        }
    }

    /// Binds a component action, replacing any action with the same custom ID.
    pub fn with_action(mut self, action: Arc<dyn ComponentAction>) -> Self {
        self.actions.retain(|a| a.custom_id() != action.custom_id());
        self.actions.push(action);
        self
    }

    /// Whether a reaction with this emoji identifier can trigger a bookmark.
    pub fn is_trigger(&self, emoji: &str) -> bool {
        self.triggers.matches(emoji)
    }

    /// Routes an interaction.
    ///
    /// A command with no registered handler is logged once and answered with
    /// nothing. A failing handler is logged and the user gets one failure notice.
    pub async fn dispatch(&self, http: Arc<Http>, event: InteractionEvent) -> DispatchOutcome {
        match &event {
            InteractionEvent::SlashCommand { command_name, .. }
            | InteractionEvent::MessageContextCommand { command_name, .. } => {
                let name = command_name.clone();
                let Some(command) = self.registry.get(&name).cloned() else {
                    tracing::error!("No command handler registered for '{}'", name);
                    return DispatchOutcome::Failed(DispatchError::NoHandler(name));
                };

                let ctx = CommandContext {
                    http,
                    invocation: Invocation::Interaction(event),
                };
                self.run_guarded(&name, &ctx, command.execute(&ctx)).await
            }
            InteractionEvent::ButtonPress { custom_id, .. } => {
                let Some(action) = self
                    .actions
                    .iter()
                    .find(|a| a.custom_id() == custom_id)
                    .cloned()
                else {
                    tracing::debug!("Ignoring button press with custom ID '{}'", custom_id);
                    return DispatchOutcome::Ignored;
                };

                let ctx = CommandContext {
                    http,
                    invocation: Invocation::Interaction(event),
                };
                self.run_guarded(action.custom_id(), &ctx, action.run(&ctx))
                    .await
            }
        }
    }

    /// Runs the bookmark command for a qualifying reaction.
    ///
    /// Reactions by bots, outside guilds, on unresolved messages or with an
    /// emoji that is not a trigger are ignored. The registry is not consulted.
    pub async fn dispatch_reaction(&self, http: Arc<Http>, event: ReactionEvent) -> DispatchOutcome {
        if event.actor.bot
            || event.guild_id.is_none()
            || event.message.is_none()
            || !self.triggers.matches(&event.emoji)
        {
            return DispatchOutcome::Ignored;
        }

        let ctx = CommandContext {
            http,
            invocation: Invocation::Reaction(event),
        };
        self.run_guarded(self.bookmark.name(), &ctx, self.bookmark.execute(&ctx))
            .await
    }

    async fn run_guarded(
        &self,
        name: &str,
        ctx: &CommandContext,
        handler: impl Future<Output = Result<(), CommandError>>,
    ) -> DispatchOutcome {
        let Err(source) = handler.await else {
            return DispatchOutcome::Completed;
        };

        let actor = ctx.invocation.actor();
        tracing::error!(
            "Error executing '{}' requested by {} ({}) in guild {:?}: {}",
            name,
            actor.tag,
            actor.user_id,
            ctx.invocation.guild_id(),
            source
        );

        if let Err(e) = self.notifier.notify_failure(ctx).await {
            tracing::error!("Failed to notify {} that '{}' failed: {}", actor.tag, name, e);
        }

        DispatchOutcome::Failed(DispatchError::Handler {
            command: name.to_string(),
            source,
        })
    }
}

#[cfg(test)]
mod tests {
    use serenity::all::{ChannelId, GuildId, InteractionId, MessageId, UserId};
    use tracing_test::traced_test;

    use super::*;
    use crate::{
        model::interaction::{Actor, InteractionHandle, MessageRef},
        test_support::{FakeAction, FakeCommand, RecordingNotifier},
    };

    fn http() -> Arc<Http> {
        Arc::new(Http::new(""))
    }

    fn actor(bot: bool) -> Actor {
        Actor {
            user_id: UserId::new(42),
            tag: "reader".to_string(),
            bot,
        }
    }

    fn handle() -> InteractionHandle {
        InteractionHandle {
            id: InteractionId::new(7),
            token: "token".to_string(),
        }
    }

    fn slash(name: &str) -> InteractionEvent {
        InteractionEvent::SlashCommand {
            command_name: name.to_string(),
            actor: actor(false),
            guild_id: Some(GuildId::new(1)),
            handle: handle(),
        }
    }

    fn button(custom_id: &str) -> InteractionEvent {
        InteractionEvent::ButtonPress {
            custom_id: custom_id.to_string(),
            actor: actor(false),
            handle: handle(),
            message: message(),
        }
    }

    fn message() -> MessageRef {
        MessageRef {
            channel_id: ChannelId::new(2),
            message_id: MessageId::new(3),
        }
    }

    fn reaction(emoji: &str) -> ReactionEvent {
        ReactionEvent {
            emoji: emoji.to_string(),
            actor: actor(false),
            guild_id: Some(GuildId::new(1)),
            message: Some(message()),
        }
    }

    struct Setup {
        dispatcher: InteractionDispatcher,
        help: Arc<FakeCommand>,
        bookmark: Arc<FakeCommand>,
        notifier: Arc<RecordingNotifier>,
    }

    fn setup(help: FakeCommand, notifier: RecordingNotifier) -> Setup {
        let help = Arc::new(help);
        let bookmark = Arc::new(FakeCommand::new("bookmark"));
        let notifier = Arc::new(notifier);
        let registry = CommandRegistry::builder()
            .command(help.clone())
            .build()
            .unwrap();

        let dispatcher = InteractionDispatcher::new(
            Arc::new(registry),
            bookmark.clone(),
            ReactionTriggers::parse(&["%F0%9F%94%96"]).unwrap(),
            notifier.clone(),
        );

        Setup {
            dispatcher,
            help,
            bookmark,
            notifier,
        }
    }

    #[tokio::test]
    async fn routes_to_registered_handler() {
        let s = setup(FakeCommand::new("help"), RecordingNotifier::default());

        let outcome = s.dispatcher.dispatch(http(), slash("help")).await;

        assert!(matches!(outcome, DispatchOutcome::Completed));
        assert_eq!(s.help.calls(), 1);
        assert_eq!(s.notifier.attempts(), 0);
    }

    #[tokio::test]
    async fn routes_by_name_only_to_the_named_handler() {
        let bookmark = Arc::new(FakeCommand::new("bookmark"));
        let help = Arc::new(FakeCommand::new("help"));
        let registry = CommandRegistry::builder()
            .command(bookmark.clone())
            .command(help.clone())
            .build()
            .unwrap();
        let dispatcher = InteractionDispatcher::new(
            Arc::new(registry),
            Arc::new(FakeCommand::new("bookmark")),
            ReactionTriggers::default(),
            Arc::new(RecordingNotifier::default()),
        );

        let outcome = dispatcher.dispatch(http(), slash("bookmark")).await;

        assert!(matches!(outcome, DispatchOutcome::Completed));
        assert_eq!(bookmark.calls(), 1);
        assert_eq!(help.calls(), 0);
    }

    #[traced_test]
    #[tokio::test]
    async fn unknown_command_logs_once_without_reply() {
        let s = setup(FakeCommand::new("help"), RecordingNotifier::default());

        let outcome = s.dispatcher.dispatch(http(), slash("ghost")).await;

        assert!(matches!(
            outcome,
            DispatchOutcome::Failed(DispatchError::NoHandler(name)) if name == "ghost"
        ));
        assert_eq!(s.notifier.attempts(), 0);
        logs_assert(|lines: &[&str]| {
            match lines
                .iter()
                .filter(|line| line.contains("No command handler registered for 'ghost'"))
                .count()
            {
                1 => Ok(()),
                n => Err(format!("expected one log entry, found {}", n)),
            }
        });
    }

    #[tokio::test]
    async fn handler_failure_notifies_once() {
        let s = setup(FakeCommand::failing("help"), RecordingNotifier::default());

        let outcome = s.dispatcher.dispatch(http(), slash("help")).await;

        assert!(matches!(
            outcome,
            DispatchOutcome::Failed(DispatchError::Handler { ref command, .. }) if command == "help"
        ));
        assert_eq!(s.notifier.attempts(), 1);
    }

    #[traced_test]
    #[tokio::test]
    async fn notifier_failure_is_logged_not_retried() {
        let s = setup(FakeCommand::failing("help"), RecordingNotifier::failing());

        let outcome = s.dispatcher.dispatch(http(), slash("help")).await;

        assert!(matches!(outcome, DispatchOutcome::Failed(_)));
        assert_eq!(s.notifier.attempts(), 1);
        assert!(logs_contain("Failed to notify reader"));
    }

    #[tokio::test]
    async fn failure_of_one_interaction_does_not_affect_the_next() {
        let s = setup(FakeCommand::new("help"), RecordingNotifier::default());

        let (first, second) = tokio::join!(
            s.dispatcher.dispatch(http(), slash("ghost")),
            s.dispatcher.dispatch(http(), slash("help")),
        );

        assert!(matches!(first, DispatchOutcome::Failed(_)));
        assert!(matches!(second, DispatchOutcome::Completed));
    }

    #[tokio::test]
    async fn reserved_button_runs_its_action() {
        let action = Arc::new(FakeAction::new("deleteMsg"));
        let s = setup(FakeCommand::new("help"), RecordingNotifier::default());
        let dispatcher = s.dispatcher.with_action(action.clone());

        let outcome = dispatcher.dispatch(http(), button("deleteMsg")).await;

        assert!(matches!(outcome, DispatchOutcome::Completed));
        assert_eq!(action.calls(), 1);
    }

    #[tokio::test]
    async fn unreserved_button_is_ignored() {
        let s = setup(FakeCommand::new("help"), RecordingNotifier::default());

        let outcome = s.dispatcher.dispatch(http(), button("somethingElse")).await;

        assert!(matches!(outcome, DispatchOutcome::Ignored));
        assert_eq!(s.notifier.attempts(), 0);
    }

    #[tokio::test]
    async fn trigger_reaction_runs_bookmark_directly() {
        let s = setup(FakeCommand::new("help"), RecordingNotifier::default());

        let outcome = s.dispatcher.dispatch_reaction(http(), reaction("🔖")).await;

        assert!(matches!(outcome, DispatchOutcome::Completed));
        assert_eq!(s.bookmark.calls(), 1);
    }

    #[tokio::test]
    async fn non_qualifying_reactions_are_ignored() {
        let s = setup(FakeCommand::new("help"), RecordingNotifier::default());

        let from_bot = ReactionEvent {
            actor: actor(true),
            ..reaction("🔖")
        };
        let outside_guild = ReactionEvent {
            guild_id: None,
            ..reaction("🔖")
        };
        let partial = ReactionEvent {
            message: None,
            ..reaction("🔖")
        };

        for event in [from_bot, outside_guild, partial, reaction("👍")] {
            let outcome = s.dispatcher.dispatch_reaction(http(), event).await;
            assert!(matches!(outcome, DispatchOutcome::Ignored));
        }
        assert_eq!(s.bookmark.calls(), 0);
    }

    #[tokio::test]
    async fn failed_reaction_bookmark_notifies_once() {
        let s = setup(FakeCommand::new("help"), RecordingNotifier::default());
        let bookmark = Arc::new(FakeCommand::failing("bookmark"));
        let dispatcher = InteractionDispatcher::new(
            Arc::new(CommandRegistry::default()),
            bookmark.clone(),
            ReactionTriggers::parse(&["🔖"]).unwrap(),
            s.notifier.clone(),
        );

        let outcome = dispatcher.dispatch_reaction(http(), reaction("🔖")).await;

        assert!(matches!(outcome, DispatchOutcome::Failed(_)));
        assert_eq!(bookmark.calls(), 1);
        assert_eq!(s.notifier.attempts(), 1);
    }
}
