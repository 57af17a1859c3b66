use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use sea_orm::DatabaseConnection;
use tokio::task::JoinHandle;

use crate::{
    command::CommandRegistry,
    data::GuildRepository,
    model::supervisor::RestartOutcome,
    service::{
        publish::{CommandPublisher, RepublishService},
        restart::RestartBridge,
    },
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CycleState {
    Idle,
    /// Spawned but has not read the guild list yet.
    Queued,
    /// Reading the guild list, publishing or restarting. `rerun` is set when a
    /// request arrived meanwhile and the guild list must be published again.
    Running { rerun: bool },
}

struct CycleInner {
    db: DatabaseConnection,
    registry: Arc<CommandRegistry>,
    restart: Arc<RestartBridge>,
    state: Mutex<CycleState>,
}

/// Runs republish-then-restart cycles for the running bot.
///
/// At most one cycle task exists at a time. A request made while a cycle is
/// queued is dropped, since the queued cycle has not read the guild list yet.
/// A request made while a cycle is running marks it for a rerun: the cycle
/// publishes again before it requests the restart, and runs once more if the
/// request arrived during the restart itself.
#[derive(Clone)]
pub struct RepublishCycle {
    inner: Arc<CycleInner>,
}

impl RepublishCycle {
    pub fn new(
        db: DatabaseConnection,
        registry: Arc<CommandRegistry>,
        restart: Arc<RestartBridge>,
    ) -> Self {
        Self {
            inner: Arc::new(CycleInner {
                db,
                registry,
                restart,
                state: Mutex::new(CycleState::Idle),
            }),
        }
    }

    /// Whether a cycle is queued or running.
    pub fn is_pending(&self) -> bool {
        *self.inner.state() != CycleState::Idle
    }

    /// Spawns a cycle, or folds the request into the existing one.
    ///
    /// # Returns
    /// - `Some(JoinHandle)` - A new cycle was spawned
    /// - `None` - The queued or running cycle covers this request
    pub fn schedule(&self, publisher: Arc<dyn CommandPublisher>) -> Option<JoinHandle<()>> {
        {
            let mut state = self.inner.state();
            match *state {
                CycleState::Idle => *state = CycleState::Queued,
                CycleState::Queued => {
                    tracing::info!("Command republish already queued, not scheduling another");
                    return None;
                }
                CycleState::Running { .. } => {
                    tracing::info!("Command republish in progress, publishing again before restart");
                    *state = CycleState::Running { rerun: true };
                    return None;
                }
            }
        }

        let inner = self.inner.clone();
        Some(tokio::spawn(async move {
            inner.drive(publisher.as_ref()).await;
        }))
    }
}

impl CycleInner {
    fn state(&self) -> MutexGuard<'_, CycleState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Clears a pending rerun, returning whether one was pending.
    fn take_rerun(&self) -> bool {
        let mut state = self.state();
        match *state {
            CycleState::Running { rerun: true } => {
                *state = CycleState::Running { rerun: false };
                true
            }
            _ => false,
        }
    }

    /// Goes idle unless a rerun is pending, returning whether one was.
    fn finish_or_rerun(&self) -> bool {
        if self.take_rerun() {
            return true;
        }

        *self.state() = CycleState::Idle;
        false
    }

    async fn drive(&self, publisher: &dyn CommandPublisher) {
        *self.state() = CycleState::Running { rerun: false };

        loop {
            loop {
                if !self.republish(publisher).await {
                    if self.finish_or_rerun() {
                        continue;
                    }
                    return;
                }

                if !self.take_rerun() {
                    break;
                }
                tracing::info!("Guild list changed during republish, publishing again");
            }

            self.request_restart().await;

            if !self.finish_or_rerun() {
                return;
            }
            tracing::info!("Guild list changed during restart request, publishing again");
        }
    }

    /// Returns whether the guild list could be read and every batch attempted.
    async fn republish(&self, publisher: &dyn CommandPublisher) -> bool {
        let store = GuildRepository::new(&self.db);

        match RepublishService::new(&store, publisher, &self.registry)
            .run()
            .await
        {
            Ok(_) => true,
            Err(e) => {
                tracing::error!("Failed to read guild list for command republish: {}", e);
                false
            }
        }
    }

    async fn request_restart(&self) {
        match self.restart.restart_self().await {
            Ok(RestartOutcome::Requested) => {}
            Ok(outcome) => {
                tracing::warn!(
                    "Restart of '{}' was not performed: {:?}",
                    self.restart.process_name(),
                    outcome
                );
            }
            Err(e) => {
                tracing::error!(
                    "Failed to restart '{}' after republishing commands: {}",
                    self.restart.process_name(),
                    e
                );
            }
        }
    }
}
