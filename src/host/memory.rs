//! In-memory session history.
//!
//! Behaves like a browser history stack: pushing discards forward entries,
//! and `back`/`forward` move the cursor and notify navigation listeners with
//! the destination entry's stored value. Useful off-browser and in tests.

use super::environment::{HostEnvironment, NavigationListener};
use parking_lot::Mutex;
use serde_json::Value;
use std::sync::Arc;

/// A single history entry.
#[derive(Clone, Debug, PartialEq)]
pub struct HistoryEntry {
    pub url: String,
    pub record: Option<Value>,
}

#[derive(Debug)]
struct Stack {
    entries: Vec<HistoryEntry>,
    index: usize,
}

/// In-memory [`HostEnvironment`].
pub struct MemoryHistory {
    stack: Mutex<Stack>,
    listeners: Mutex<Vec<Arc<dyn Fn(Option<Value>) + Send + Sync>>>,
}

impl MemoryHistory {
    /// Start with a single entry at `url` carrying no stored value.
    pub fn new(url: impl Into<String>) -> Self {
        Self::with_record(url, None)
    }

    /// Start with a single entry at `url` carrying `record`.
    pub fn with_record(url: impl Into<String>, record: Option<Value>) -> Self {
        Self {
            stack: Mutex::new(Stack {
                entries: vec![HistoryEntry {
                    url: url.into(),
                    record,
                }],
                index: 0,
            }),
            listeners: Mutex::new(Vec::new()),
        }
    }

    pub fn entries(&self) -> Vec<HistoryEntry> {
        self.stack.lock().entries.clone()
    }

    pub fn index(&self) -> usize {
        self.stack.lock().index
    }

    pub fn current(&self) -> HistoryEntry {
        let stack = self.stack.lock();
        stack.entries[stack.index].clone()
    }

    /// Move one entry back. Returns false at the first entry.
    pub fn back(&self) -> bool {
        self.go(-1)
    }

    /// Move one entry forward. Returns false at the last entry.
    pub fn forward(&self) -> bool {
        self.go(1)
    }

    /// Move `delta` entries and notify listeners. Out-of-range moves are ignored.
    pub fn go(&self, delta: isize) -> bool {
        let record = {
            let mut stack = self.stack.lock();
            let Some(target) = stack.index.checked_add_signed(delta) else {
                return false;
            };
            if delta == 0 || target >= stack.entries.len() {
                return false;
            }
            stack.index = target;
            stack.entries[target].record.clone()
        };

        let listeners = self.listeners.lock().clone();
        for listener in listeners {
            listener(record.clone());
        }
        true
    }
}

impl HostEnvironment for MemoryHistory {
    fn location(&self) -> String {
        self.current().url
    }

    fn current_record(&self) -> Option<Value> {
        self.current().record
    }

    fn push_record(&self, record: Value, url: &str) {
        let mut stack = self.stack.lock();
        let keep = stack.index + 1;
        stack.entries.truncate(keep);
        stack.entries.push(HistoryEntry {
            url: url.to_string(),
            record: Some(record),
        });
        stack.index = keep;
    }

    fn replace_record(&self, record: Value, url: &str) {
        let mut stack = self.stack.lock();
        let index = stack.index;
        stack.entries[index] = HistoryEntry {
            url: url.to_string(),
            record: Some(record),
        };
    }

    fn on_navigate(&self, listener: NavigationListener) {
        self.listeners.lock().push(Arc::from(listener));
    }
}
