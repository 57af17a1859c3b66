use std::{collections::HashMap, sync::Arc};

use serenity::all::CreateCommand;

use crate::{
    command::{Command, CommandScope},
    error::command::RegistryError,
};

/// Mapping from command name to handler.
///
/// Built once per process from the static command list and read-only afterwards.
/// Its key set is exactly the set of names in that list.
#[derive(Clone, Default)]
pub struct CommandRegistry {
    commands: HashMap<&'static str, Arc<dyn Command>>,
}

impl CommandRegistry {
    pub fn builder() -> CommandRegistryBuilder {
        CommandRegistryBuilder::default()
    }

    /// Builds a registry from a command list.
    pub fn from_commands(
        commands: impl IntoIterator<Item = Arc<dyn Command>>,
    ) -> Result<Self, RegistryError> {
        commands
            .into_iter()
            .fold(Self::builder(), CommandRegistryBuilder::command)
            .build()
    }

    pub fn get(&self, name: &str) -> Option<&Arc<dyn Command>> {
        self.commands.get(name)
    }

    /// Registered names, sorted.
    pub fn names(&self) -> Vec<&'static str> {
        let mut names: Vec<&'static str> = self.commands.keys().copied().collect();
        names.sort_unstable();
        names
    }

    /// Registration payloads for every command in the given scope, sorted by name.
    pub fn definitions(&self, scope: CommandScope) -> Vec<CreateCommand> {
        self.names()
            .into_iter()
            .filter_map(|name| self.commands.get(name))
            .filter(|command| command.scope() == scope)
            .map(|command| command.definition())
            .collect()
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }
}

/// Collects commands before validating them into a [`CommandRegistry`].
#[derive(Default)]
pub struct CommandRegistryBuilder {
    commands: Vec<Arc<dyn Command>>,
}

impl CommandRegistryBuilder {
    pub fn command(mut self, command: Arc<dyn Command>) -> Self {
        self.commands.push(command);
        self
    }

    /// Validates the collected commands.
    ///
    /// # Returns
    /// - `Ok(CommandRegistry)` - Every name was unique
    /// - `Err(RegistryError::DuplicateCommand)` - Two commands share a name
    pub fn build(self) -> Result<CommandRegistry, RegistryError> {
        let mut commands = HashMap::with_capacity(self.commands.len());

        for command in self.commands {
            let name = command.name();
            if commands.insert(name, command).is_some() {
                return Err(RegistryError::DuplicateCommand(name.to_string()));
            }
        }

        Ok(CommandRegistry { commands })
    }
}
