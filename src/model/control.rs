use std::sync::Arc;

use indexmap::IndexMap;
use parking_lot::Mutex;
use tracing::debug;

use crate::descriptor::ContributionDescriptor;

/// Maps a tool control id to the descriptor that declared it.
/// The renderer consults this when it instantiates the control.
#[derive(Debug, Default)]
pub struct ControlRegistry {
    entries: Mutex<IndexMap<String, Arc<ContributionDescriptor>>>,
}

impl ControlRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Associates `id` with `descriptor`. Re-registering an id replaces the
    /// descriptor in place, keeping its original slot.
    pub fn register(&self, id: &str, descriptor: Arc<ContributionDescriptor>) {
        debug!(control = id, "registering control contribution");
        self.entries.lock().insert(id.to_string(), descriptor);
    }

    pub fn get(&self, id: &str) -> Option<Arc<ContributionDescriptor>> {
        self.entries.lock().get(id).cloned()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.entries.lock().contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
