//! Command registry.
//!
//! Built once at startup and read-only afterwards, so lookups need no
//! locking.

use super::context::Context;
use super::traits::Command;
use crate::error::RegistryError;
use std::collections::HashMap;
use tracing::debug;

/// Registry of commands, keyed by name.
pub struct Registry {
    commands: HashMap<&'static str, Box<dyn Command>>,
}

impl Registry {
    /// Build a registry, failing on the first duplicate name.
    pub fn build(commands: Vec<Box<dyn Command>>) -> Result<Self, RegistryError> {
        let mut map: HashMap<&'static str, Box<dyn Command>> =
            HashMap::with_capacity(commands.len());

        for command in commands {
            let name = command.name();
            if map.contains_key(name) {
                return Err(RegistryError::Duplicate(name.to_string()));
            }
            map.insert(name, command);
        }

        Ok(Self { commands: map })
    }

    /// Look up a command by its exact name.
    pub fn lookup(&self, name: &str) -> Option<&dyn Command> {
        self.commands.get(name).map(|c| c.as_ref())
    }

    /// Registered command names, sorted.
    pub fn names(&self) -> Vec<&'static str> {
        let mut names: Vec<_> = self.commands.keys().copied().collect();
        names.sort_unstable();
        names
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Run every command's setup with a context scoped to its name.
    pub fn setup(&self, ctx: &Context) {
        for name in self.names() {
            let scoped = ctx.with_command(name);
            let _enter = scoped.span().enter();
            debug!(command = name, "Registering command");
            if let Some(command) = self.commands.get(name) {
                command.setup(&scoped);
            }
        }
    }
}
