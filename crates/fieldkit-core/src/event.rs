//! Change notification.
//!
//! Observers are registered per class (inherited by subclasses) or per
//! instance, keyed by event name. Bulk writes emit `DID_CHANGE` at most once.

use crate::model::Model;
use std::{
    collections::BTreeMap,
    fmt::{self, Debug},
    sync::Arc,
};

/// Emitted once after any top-level write that changed at least one field.
pub const DID_CHANGE: &str = "didChange";

/// Observer callback; receives the instance that emitted.
pub type Listener = Arc<dyn Fn(&Model) + Send + Sync>;

///
/// Listeners
///

#[derive(Clone, Default)]
pub struct Listeners {
    by_event: BTreeMap<String, Vec<Listener>>,
}

impl Listeners {
    pub fn add(&mut self, event: impl Into<String>, listener: Listener) {
        self.by_event.entry(event.into()).or_default().push(listener);
    }

    #[must_use]
    pub fn get(&self, event: &str) -> &[Listener] {
        self.by_event.get(event).map_or(&[], Vec::as_slice)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.by_event.values().all(Vec::is_empty)
    }

    pub(crate) fn notify(&self, event: &str, model: &Model) {
        for listener in self.get(event) {
            listener(model);
        }
    }
}

impl Debug for Listeners {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map()
            .entries(self.by_event.iter().map(|(k, v)| (k, v.len())))
            .finish()
    }
}
