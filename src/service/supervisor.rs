//! The external process supervisor.
//!
//! The bot runs under pm2. Restarting it after a republish is a request to pm2,
//! which delivers SIGUSR1 to the process; the process then shuts down and pm2
//! brings up a fresh one that rebuilds its command registry.

use std::process::Output;

use serde::Deserialize;
use serenity::async_trait;
use tokio::process::Command;

use crate::{error::supervisor::SupervisorError, model::supervisor::ManagedProcess};

/// Signal pm2 forwards to the bot to make it exit for a restart.
pub const RESTART_SIGNAL: &str = "SIGUSR1";

/// A process supervisor that can list and restart the processes it manages.
///
/// Callers pair every successful `connect` with a `disconnect`.
#[async_trait]
pub trait ProcessSupervisor: Send + Sync {
    async fn connect(&self) -> Result<(), SupervisorError>;

    async fn list(&self) -> Result<Vec<ManagedProcess>, SupervisorError>;

    async fn restart(&self, name: &str) -> Result<(), SupervisorError>;

    async fn disconnect(&self);
}

/// Drives pm2 through its command line client.
pub struct Pm2Supervisor {
    bin: String,
}

impl Pm2Supervisor {
    pub fn new(bin: impl Into<String>) -> Self {
        Self { bin: bin.into() }
    }

    async fn run(&self, args: &[&str]) -> Result<Output, SupervisorError> {
        tracing::debug!("Running {} {}", self.bin, args.join(" "));

        Ok(Command::new(&self.bin).args(args).output().await?)
    }
}

#[async_trait]
impl ProcessSupervisor for Pm2Supervisor {
    async fn connect(&self) -> Result<(), SupervisorError> {
        let output = self.run(&["ping"]).await?;
        if !output.status.success() {
            return Err(SupervisorError::Connect(stderr(&output)));
        }

        tracing::info!("Connected to pm2");
        Ok(())
    }

    async fn list(&self) -> Result<Vec<ManagedProcess>, SupervisorError> {
        let output = self.run(&["jlist"]).await?;
        if !output.status.success() {
            return Err(SupervisorError::List(stderr(&output)));
        }

        parse_process_list(&String::from_utf8_lossy(&output.stdout))
    }

    async fn restart(&self, name: &str) -> Result<(), SupervisorError> {
        let output = self.run(&["sendSignal", RESTART_SIGNAL, name]).await?;
        if !output.status.success() {
            return Err(SupervisorError::Restart {
                name: name.to_string(),
                reason: stderr(&output),
            });
        }

        Ok(())
    }

    async fn disconnect(&self) {
        // Every CLI call is its own connection; there is nothing held open.
        tracing::debug!("Released pm2");
    }
}

fn stderr(output: &Output) -> String {
    let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
    if stderr.is_empty() {
        format!("pm2 exited with {}", output.status)
    } else {
        stderr
    }
}

#[derive(Deserialize)]
struct Pm2Process {
    name: String,
    #[serde(default)]
    pid: Option<u32>,
    pm2_env: Pm2Env,
}

#[derive(Deserialize)]
struct Pm2Env {
    status: String,
}

/// Parses `pm2 jlist` output.
///
/// pm2 may print warnings before the JSON array, so parsing starts at the first `[`.
fn parse_process_list(stdout: &str) -> Result<Vec<ManagedProcess>, SupervisorError> {
    let start = stdout
        .find('[')
        .ok_or_else(|| SupervisorError::List("pm2 printed no process list".to_string()))?;

    let processes: Vec<Pm2Process> = serde_json::from_str(&stdout[start..])?;

    Ok(processes
        .into_iter()
        .map(|process| ManagedProcess {
            name: process.name,
            // pm2 reports pid 0 for stopped processes
            pid: process.pid.filter(|pid| *pid != 0),
            running: process.pm2_env.status == "online",
        })
        .collect())
}
