use std::fmt;

/// Why the process is shutting down.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShutdownSignal {
    /// SIGINT (Ctrl+C)
    Interrupt,
    /// SIGTERM
    Terminate,
    /// SIGUSR1, sent by the process supervisor to restart the bot
    Restart,
}

impl fmt::Display for ShutdownSignal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShutdownSignal::Interrupt => write!(f, "SIGINT"),
            ShutdownSignal::Terminate => write!(f, "SIGTERM"),
            ShutdownSignal::Restart => write!(f, "SIGUSR1"),
        }
    }
}

/// Resolves once the process receives a signal asking it to stop.
///
/// A handler that cannot be installed is logged and never fires; the other
/// signals still work.
pub async fn shutdown_signal() -> ShutdownSignal {
    let ctrl_c = async {
        if let Err(error) = tokio::signal::ctrl_c().await {
            tracing::warn!("Failed to install Ctrl+C handler: {}", error);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = unix_signal(tokio::signal::unix::SignalKind::terminate(), "SIGTERM");
    #[cfg(unix)]
    let restart = unix_signal(tokio::signal::unix::SignalKind::user_defined1(), "SIGUSR1");

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();
    #[cfg(not(unix))]
    let restart = std::future::pending::<()>();

    let signal = tokio::select! {
        _ = ctrl_c => ShutdownSignal::Interrupt,
        _ = terminate => ShutdownSignal::Terminate,
        _ = restart => ShutdownSignal::Restart,
    };

    tracing::info!("Received {}", signal);
    signal
}

#[cfg(unix)]
async fn unix_signal(kind: tokio::signal::unix::SignalKind, name: &str) {
    match tokio::signal::unix::signal(kind) {
        Ok(mut signal) => {
            signal.recv().await;
        }
        Err(error) => {
            tracing::warn!("Failed to install {} handler: {}", name, error);
            std::future::pending::<()>().await;
        }
    }
}
