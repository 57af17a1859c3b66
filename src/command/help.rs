use serenity::all::CreateCommand;
use serenity::async_trait;

use crate::{
    command::{respond_ephemeral, Command, CommandContext},
    error::command::CommandError,
};

pub const NAME: &str = "help";

const HELP_TEXT: &str = "**Bookmarking messages**\n\
    • Right click a message → *Apps* → **bookmark**\n\
    • Or react to it with :bookmark: or :bookmark_tabs:\n\n\
    The bookmark is sent to your DMs. Use the *Delete bookmark* button to remove it.";

pub struct HelpCommand;

#[async_trait]
impl Command for HelpCommand {
    fn name(&self) -> &'static str {
        NAME
    }

    fn definition(&self) -> CreateCommand {
        CreateCommand::new(NAME).description("How to bookmark messages")
    }

    async fn execute(&self, ctx: &CommandContext) -> Result<(), CommandError> {
        let handle = ctx
            .invocation
            .handle()
            .ok_or(CommandError::UnsupportedInvocation {
                command: NAME,
                reason: "help is only available as a slash command",
            })?;

        respond_ephemeral(&ctx.http, handle, HELP_TEXT).await?;

        Ok(())
    }
}
