/// A process entry as reported by the process supervisor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManagedProcess {
    pub name: String,
    pub pid: Option<u32>,
    /// Whether the supervisor reports the process as currently running.
    pub running: bool,
}

/// What happened to a restart request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RestartOutcome {
    /// The restart signal was sent.
    Requested,
    /// The target process is known but not running, so nothing was sent.
    NotRunning,
    /// The supervisor does not manage a process with the configured name.
    NotFound,
}
