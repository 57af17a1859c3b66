use thiserror::Error;

/// Failures talking to the external process supervisor.
#[derive(Error, Debug)]
pub enum SupervisorError {
    /// The supervisor daemon could not be reached.
    #[error("Failed to connect to process supervisor: {0}")]
    Connect(String),

    /// The managed process list could not be fetched or understood.
    #[error("Failed to list supervised processes: {0}")]
    List(String),

    /// The restart signal could not be delivered.
    #[error("Failed to restart process '{name}': {reason}")]
    Restart { name: String, reason: String },

    /// Spawning the supervisor CLI failed.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Supervisor output was not valid JSON.
    #[error(transparent)]
    Parse(#[from] serde_json::Error),
}

impl SupervisorError {
    /// Whether the failure means the supervisor could not be used at all.
    ///
    /// The one-shot deploy path exits with a non-zero code on these.
    pub fn is_connection_failure(&self) -> bool {
        matches!(
            self,
            SupervisorError::Connect(_) | SupervisorError::List(_) | SupervisorError::Io(_)
        )
    }
}
