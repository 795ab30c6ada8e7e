use std::sync::Arc;

use indexmap::IndexMap;
use parking_lot::Mutex;
use serde::Serialize;
use tracing::debug;

/// A command that menu and tool items bind to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Command {
    pub id: String,
    pub name: String,
}

/// Commands known to the application, deduplicated by id.
///
/// Shared between merge sessions through `Arc`; every mutation happens
/// under one lock so two passes can never both create the same id.
#[derive(Debug, Default)]
pub struct CommandRegistry {
    commands: Mutex<IndexMap<String, Arc<Command>>>,
}

impl CommandRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers an authored command. An existing entry with the same id
    /// wins and is returned.
    pub fn define(&self, id: impl Into<String>, name: impl Into<String>) -> Arc<Command> {
        let id = id.into();
        let mut commands = self.commands.lock();
        commands
            .entry(id.clone())
            .or_insert_with(|| Arc::new(Command { id, name: name.into() }))
            .clone()
    }

    pub fn get(&self, id: &str) -> Option<Arc<Command>> {
        self.commands.lock().get(id).cloned()
    }

    /// Returns the command for `id`, creating a placeholder named after the
    /// id the first time it is referenced.
    pub fn resolve_or_synthesize(&self, id: &str) -> Arc<Command> {
        let mut commands = self.commands.lock();
        if let Some(existing) = commands.get(id) {
            return existing.clone();
        }

        debug!(command = id, "synthesizing placeholder command");
        let command = Arc::new(Command {
            id: id.to_string(),
            name: id.to_string(),
        });
        commands.insert(id.to_string(), command.clone());
        command
    }

    pub fn ids(&self) -> Vec<String> {
        self.commands.lock().keys().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.commands.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
