//! In-memory fakes for the service layer's collaborators.

use std::{
    collections::HashSet,
    sync::{
        atomic::{AtomicBool, AtomicUsize, Ordering},
        Arc, Mutex,
    },
};

use sea_orm::DbErr;
use serenity::all::CreateCommand;
use serenity::async_trait;
use tokio::sync::Notify;

use crate::{
    command::{Command, CommandContext, CommandScope, ComponentAction},
    data::GuildStore,
    error::{command::CommandError, publish::PublishError, supervisor::SupervisorError},
    model::{guild::GuildRecord, supervisor::ManagedProcess},
    service::{dispatch::FailureNotifier, publish::CommandPublisher, supervisor::ProcessSupervisor},
};

/// A command that counts its executions and optionally fails.
pub struct FakeCommand {
    name: &'static str,
    scope: CommandScope,
    fail: bool,
    calls: AtomicUsize,
}

impl FakeCommand {
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            scope: CommandScope::Guild,
            fail: false,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn failing(name: &'static str) -> Self {
        Self {
            fail: true,
            ..Self::new(name)
        }
    }

    pub fn global(name: &'static str) -> Self {
        Self {
            scope: CommandScope::Global,
            ..Self::new(name)
        }
    }

    pub fn arc(name: &'static str) -> Arc<dyn Command> {
        Self::new(name).into_arc()
    }

    pub fn into_arc(self) -> Arc<dyn Command> {
        Arc::new(self)
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Command for FakeCommand {
    fn name(&self) -> &'static str {
        self.name
    }

    fn scope(&self) -> CommandScope {
        self.scope
    }

    fn definition(&self) -> CreateCommand {
        CreateCommand::new(self.name).description("Test command")
    }

    async fn execute(&self, _ctx: &CommandContext) -> Result<(), CommandError> {
        self.calls.fetch_add(1, Ordering::SeqCst);

        if self.fail {
            return Err(CommandError::UnsupportedInvocation {
                command: self.name,
                reason: "configured to fail",
            });
        }

        Ok(())
    }
}

/// A component action that counts its runs.
pub struct FakeAction {
    custom_id: &'static str,
    calls: AtomicUsize,
}

impl FakeAction {
    pub fn new(custom_id: &'static str) -> Self {
        Self {
            custom_id,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ComponentAction for FakeAction {
    fn custom_id(&self) -> &'static str {
        self.custom_id
    }

    async fn run(&self, _ctx: &CommandContext) -> Result<(), CommandError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

/// Guild store backed by a vector, with injectable failures.
#[derive(Default)]
pub struct InMemoryGuildStore {
    guilds: Mutex<Vec<GuildRecord>>,
    inserted: Mutex<Vec<String>>,
    failing_inserts: HashSet<String>,
    fail_list: bool,
}

impl InMemoryGuildStore {
    pub fn with_guilds(guilds: Vec<GuildRecord>) -> Self {
        Self {
            guilds: Mutex::new(guilds),
            ..Default::default()
        }
    }

    pub fn failing_list() -> Self {
        Self {
            fail_list: true,
            ..Default::default()
        }
    }

    pub fn failing_insert_for(mut self, guild_ids: &[&str]) -> Self {
        self.failing_inserts = guild_ids.iter().map(|id| id.to_string()).collect();
        self
    }

    /// Guild IDs that were newly created through `insert`, in call order.
    pub fn inserted(&self) -> Vec<String> {
        self.inserted.lock().unwrap().clone()
    }

    pub fn snapshot(&self) -> Vec<GuildRecord> {
        self.guilds.lock().unwrap().clone()
    }
}

fn store_failure(what: &str) -> DbErr {
    DbErr::Custom(format!("in-memory store failure: {}", what))
}

#[async_trait]
impl GuildStore for InMemoryGuildStore {
    async fn list(&self) -> Result<Vec<GuildRecord>, DbErr> {
        if self.fail_list {
            return Err(store_failure("list"));
        }

        Ok(self.snapshot())
    }

    async fn contains(&self, guild_id: &str) -> Result<bool, DbErr> {
        Ok(self
            .guilds
            .lock()
            .unwrap()
            .iter()
            .any(|g| g.guild_id == guild_id))
    }

    async fn insert(&self, guild_id: &str, name: &str) -> Result<bool, DbErr> {
        if self.failing_inserts.contains(guild_id) {
            return Err(store_failure(guild_id));
        }

        let mut guilds = self.guilds.lock().unwrap();
        if guilds.iter().any(|g| g.guild_id == guild_id) {
            return Ok(false);
        }

        guilds.push(GuildRecord::new(guild_id, name));
        self.inserted.lock().unwrap().push(guild_id.to_string());
        Ok(true)
    }

    async fn remove(&self, guild_id: &str) -> Result<bool, DbErr> {
        let mut guilds = self.guilds.lock().unwrap();
        let before = guilds.len();
        guilds.retain(|g| g.guild_id != guild_id);
        Ok(guilds.len() != before)
    }
}

/// Ordered log of publish and restart requests shared between fakes.
#[derive(Clone, Default)]
pub struct Timeline(Arc<Mutex<Vec<String>>>);

impl Timeline {
    fn push(&self, event: String) {
        self.0.lock().unwrap().push(event);
    }

    pub fn events(&self) -> Vec<String> {
        self.0.lock().unwrap().clone()
    }
}

/// A publish request with the number of definitions it carried.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PublishCall {
    Global(usize),
    Guild(String, usize),
}

/// Publisher that records every request and rejects configured ones.
#[derive(Default)]
pub struct RecordingPublisher {
    calls: Mutex<Vec<PublishCall>>,
    failing_guilds: HashSet<String>,
    fail_global: bool,
    timeline: Option<Timeline>,
}

impl RecordingPublisher {
    pub fn failing_guilds(guild_ids: &[&str]) -> Self {
        Self {
            failing_guilds: guild_ids.iter().map(|id| id.to_string()).collect(),
            ..Default::default()
        }
    }

    pub fn failing_global() -> Self {
        Self {
            fail_global: true,
            ..Default::default()
        }
    }

    pub fn with_timeline(mut self, timeline: &Timeline) -> Self {
        self.timeline = Some(timeline.clone());
        self
    }

    pub fn calls(&self) -> Vec<PublishCall> {
        self.calls.lock().unwrap().clone()
    }

    pub fn global_calls(&self) -> usize {
        self.calls()
            .iter()
            .filter(|call| matches!(call, PublishCall::Global(_)))
            .count()
    }
}

#[async_trait]
impl CommandPublisher for RecordingPublisher {
    async fn publish_global(&self, definitions: Vec<CreateCommand>) -> Result<(), PublishError> {
        self.calls
            .lock()
            .unwrap()
            .push(PublishCall::Global(definitions.len()));
        if let Some(timeline) = &self.timeline {
            timeline.push("publish:global".to_string());
        }

        if self.fail_global {
            return Err(PublishError::InvalidGuildId("global".to_string()));
        }

        Ok(())
    }

    async fn publish_to_guild(
        &self,
        guild_id: &str,
        definitions: Vec<CreateCommand>,
    ) -> Result<(), PublishError> {
        self.calls
            .lock()
            .unwrap()
            .push(PublishCall::Guild(guild_id.to_string(), definitions.len()));
        if let Some(timeline) = &self.timeline {
            timeline.push(format!("publish:{}", guild_id));
        }

        if self.failing_guilds.contains(guild_id) {
            return Err(PublishError::InvalidGuildId(guild_id.to_string()));
        }

        Ok(())
    }
}

/// Publisher that holds the first publish to one guild until released.
pub struct GatedPublisher {
    gate: String,
    inner: RecordingPublisher,
    gated: AtomicBool,
    blocked: Notify,
    released: Notify,
}

impl GatedPublisher {
    pub fn new(gate: &str, inner: RecordingPublisher) -> Self {
        Self {
            gate: gate.to_string(),
            inner,
            gated: AtomicBool::new(false),
            blocked: Notify::new(),
            released: Notify::new(),
        }
    }

    /// Resolves once a publish is held at the gate.
    pub async fn wait_until_blocked(&self) {
        self.blocked.notified().await;
    }

    pub fn release(&self) {
        self.released.notify_one();
    }
}

#[async_trait]
impl CommandPublisher for GatedPublisher {
    async fn publish_global(&self, definitions: Vec<CreateCommand>) -> Result<(), PublishError> {
        self.inner.publish_global(definitions).await
    }

    async fn publish_to_guild(
        &self,
        guild_id: &str,
        definitions: Vec<CreateCommand>,
    ) -> Result<(), PublishError> {
        if guild_id == self.gate && !self.gated.swap(true, Ordering::SeqCst) {
            self.blocked.notify_one();
            self.released.notified().await;
        }

        self.inner.publish_to_guild(guild_id, definitions).await
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SupervisorCall {
    Connect,
    List,
    Restart(String),
    Disconnect,
}

/// Supervisor that records calls against a fixed process list.
#[derive(Default)]
pub struct FakeSupervisor {
    processes: Vec<ManagedProcess>,
    unreachable: bool,
    fail_list: bool,
    calls: Mutex<Vec<SupervisorCall>>,
    timeline: Option<Timeline>,
}

impl FakeSupervisor {
    pub fn with_process(name: &str, running: bool) -> Self {
        Self {
            processes: vec![ManagedProcess {
                name: name.to_string(),
                pid: running.then_some(4242),
                running,
            }],
            ..Default::default()
        }
    }

    pub fn unreachable() -> Self {
        Self {
            unreachable: true,
            ..Default::default()
        }
    }

    pub fn failing_list() -> Self {
        Self {
            fail_list: true,
            ..Default::default()
        }
    }

    pub fn with_timeline(mut self, timeline: &Timeline) -> Self {
        self.timeline = Some(timeline.clone());
        self
    }

    pub fn calls(&self) -> Vec<SupervisorCall> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: SupervisorCall) {
        self.calls.lock().unwrap().push(call);
    }
}

#[async_trait]
impl ProcessSupervisor for FakeSupervisor {
    async fn connect(&self) -> Result<(), SupervisorError> {
        self.record(SupervisorCall::Connect);

        if self.unreachable {
            return Err(SupervisorError::Connect("daemon not running".to_string()));
        }

        Ok(())
    }

    async fn list(&self) -> Result<Vec<ManagedProcess>, SupervisorError> {
        self.record(SupervisorCall::List);

        if self.fail_list {
            return Err(SupervisorError::List("garbled output".to_string()));
        }

        Ok(self.processes.clone())
    }

    async fn restart(&self, name: &str) -> Result<(), SupervisorError> {
        self.record(SupervisorCall::Restart(name.to_string()));
        if let Some(timeline) = &self.timeline {
            timeline.push(format!("restart:{}", name));
        }
        Ok(())
    }

    async fn disconnect(&self) {
        self.record(SupervisorCall::Disconnect);
    }
}

/// Notifier that counts attempts and optionally fails them.
#[derive(Default)]
pub struct RecordingNotifier {
    attempts: AtomicUsize,
    fail: bool,
}

impl RecordingNotifier {
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Default::default()
        }
    }

    pub fn attempts(&self) -> usize {
        self.attempts.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl FailureNotifier for RecordingNotifier {
    async fn notify_failure(&self, _ctx: &CommandContext) -> Result<(), serenity::Error> {
        self.attempts.fetch_add(1, Ordering::SeqCst);

        if self.fail {
            return Err(serenity::Error::Other("notice rejected"));
        }

        Ok(())
    }
}
