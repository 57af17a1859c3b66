use std::{sync::Arc, time::Duration};

use crate::{
    error::supervisor::SupervisorError, model::supervisor::RestartOutcome,
    service::supervisor::ProcessSupervisor,
};

/// Asks the process supervisor to restart the bot process.
///
/// After the request the bridge waits `grace` before disconnecting so the
/// supervisor has time to act on it. Once connected, the bridge always
/// disconnects, whatever the outcome of the request.
pub struct RestartBridge {
    supervisor: Arc<dyn ProcessSupervisor>,
    process_name: String,
    grace: Duration,
}

impl RestartBridge {
    pub fn new(
        supervisor: Arc<dyn ProcessSupervisor>,
        process_name: impl Into<String>,
        grace: Duration,
    ) -> Self {
        Self {
            supervisor,
            process_name: process_name.into(),
            grace,
        }
    }

    pub fn process_name(&self) -> &str {
        &self.process_name
    }

    /// Restarts the calling process itself.
    ///
    /// Used by the running bot after a republish cycle; it is managed by the
    /// supervisor by construction, so no existence check is made.
    pub async fn restart_self(&self) -> Result<RestartOutcome, SupervisorError> {
        tracing::info!("Rebooting '{}' process...", self.process_name);

        self.supervisor.connect().await?;
        let result = self
            .supervisor
            .restart(&self.process_name)
            .await
            .map(|()| RestartOutcome::Requested);
        self.release().await;

        result
    }

    /// Restarts the managed bot process if it is running.
    ///
    /// Used by the one-shot deploy tool, which may run while the bot is stopped.
    pub async fn restart_managed(&self) -> Result<RestartOutcome, SupervisorError> {
        tracing::info!(
            "Attempting to connect to supervisor to restart '{}'",
            self.process_name
        );

        self.supervisor.connect().await?;
        let result = self.restart_if_running().await;
        self.release().await;

        result
    }

    async fn restart_if_running(&self) -> Result<RestartOutcome, SupervisorError> {
        let processes = self.supervisor.list().await?;

        match processes.iter().find(|p| p.name == self.process_name) {
            Some(process) if process.running => {
                match process.pid {
                    Some(pid) => {
                        tracing::info!("Now restarting '{}' process (pid {})", self.process_name, pid)
                    }
                    None => tracing::info!("Now restarting '{}' process", self.process_name),
                }
                self.supervisor.restart(&self.process_name).await?;
                Ok(RestartOutcome::Requested)
            }
            Some(_) => {
                tracing::info!(
                    "'{}' process is currently not online, no need to restart it",
                    self.process_name
                );
                Ok(RestartOutcome::NotRunning)
            }
            None => {
                tracing::warn!(
                    "Supervisor manages no process named '{}'",
                    self.process_name
                );
                Ok(RestartOutcome::NotFound)
            }
        }
    }

    async fn release(&self) {
        tokio::time::sleep(self.grace).await;
        self.supervisor.disconnect().await;
        tracing::info!("Disconnected from supervisor");
    }
}
