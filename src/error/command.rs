use thiserror::Error;

/// Failure raised by a command handler while executing.
#[derive(Error, Debug)]
pub enum CommandError {
    /// Discord API call made by the handler failed.
    ///
    /// Boxed due to the size of serenity::Error.
    #[error(transparent)]
    Discord(#[from] Box<serenity::Error>),

    /// The invocation did not carry what the command needs (e.g. no target message).
    #[error("Command '{command}' cannot handle this invocation: {reason}")]
    UnsupportedInvocation {
        command: &'static str,
        reason: &'static str,
    },
}

impl From<serenity::Error> for CommandError {
    fn from(err: serenity::Error) -> Self {
        CommandError::Discord(Box::new(err))
    }
}

/// Reason an interaction ended in the `Failed` state.
#[derive(Error, Debug)]
pub enum DispatchError {
    /// No handler registered for the requested command name.
    ///
    /// Indicates a mismatch between the published command set and the running
    /// registry; only logged, never reported to the invoking user.
    #[error("No command handler registered for '{0}'")]
    NoHandler(String),

    /// The handler ran and failed.
    #[error("Command '{command}' failed: {source}")]
    Handler {
        command: String,
        #[source]
        source: CommandError,
    },
}

/// The command list could not be assembled into a registry.
#[derive(Error, Debug)]
pub enum RegistryError {
    /// Two commands share a name; the registry requires unique names.
    #[error("Duplicate command name in registration list: {0}")]
    DuplicateCommand(String),
}
