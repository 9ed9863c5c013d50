//! Typed router notifications and their listener registry.

use crate::core::{RouterError, State, StateList};
use crate::effects::TransitionHandle;
use parking_lot::Mutex;
use std::fmt;
use std::sync::Arc;
use uuid::Uuid;

/// Notification emitted by the router. Dispatched synchronously.
#[derive(Clone, Debug)]
pub enum RouterEvent<S: State> {
    /// A transition settled successfully and history is up to date.
    TransitionComplete { state_list: StateList<S>, url: String },

    /// A transition failed; current state and history were left untouched.
    TransitionFailed {
        state_list: StateList<S>,
        error: RouterError,
    },

    /// The host reported back/forward navigation to a router-owned entry.
    HistoryNavigation {
        state_list: StateList<S>,
        url: String,
        outcome: TransitionHandle,
    },

    /// A transition started by host navigation failed.
    HistoryNavigationFailed {
        state_list: StateList<S>,
        error: RouterError,
    },

    /// The initial state implied by the rendered page is being adopted.
    Upgrade {
        state_list: StateList<S>,
        url: String,
        outcome: TransitionHandle,
    },
}

impl<S: State> RouterEvent<S> {
    pub fn state_list(&self) -> &StateList<S> {
        match self {
            Self::TransitionComplete { state_list, .. }
            | Self::TransitionFailed { state_list, .. }
            | Self::HistoryNavigation { state_list, .. }
            | Self::HistoryNavigationFailed { state_list, .. }
            | Self::Upgrade { state_list, .. } => state_list,
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Self::TransitionComplete { .. } => "transition-complete",
            Self::TransitionFailed { .. } => "transition-failed",
            Self::HistoryNavigation { .. } => "history-navigation",
            Self::HistoryNavigationFailed { .. } => "history-navigation-failed",
            Self::Upgrade { .. } => "upgrade",
        }
    }
}

/// Identifies a registered listener for later removal.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ListenerId(Uuid);

impl fmt::Display for ListenerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

type Listener<S> = Arc<dyn Fn(&RouterEvent<S>) + Send + Sync>;

pub(crate) struct Listeners<S: State> {
    entries: Mutex<Vec<(ListenerId, Listener<S>)>>,
}

impl<S: State> Listeners<S> {
    pub(crate) fn new() -> Self {
        Self {
            entries: Mutex::new(Vec::new()),
        }
    }

    pub(crate) fn add<F>(&self, listener: F) -> ListenerId
    where
        F: Fn(&RouterEvent<S>) + Send + Sync + 'static,
    {
        let id = ListenerId(Uuid::new_v4());
        self.entries.lock().push((id, Arc::new(listener)));
        id
    }

    pub(crate) fn remove(&self, id: ListenerId) -> bool {
        let mut entries = self.entries.lock();
        let before = entries.len();
        entries.retain(|(existing, _)| *existing != id);
        entries.len() != before
    }

    /// Deliver events in order to a snapshot of the registered listeners.
    /// Listeners may register, unregister or call back into the router.
    pub(crate) fn emit(&self, events: Vec<RouterEvent<S>>) {
        if events.is_empty() {
            return;
        }
        let snapshot: Vec<Listener<S>> = self
            .entries
            .lock()
            .iter()
            .map(|(_, listener)| Arc::clone(listener))
            .collect();

        for event in &events {
            tracing::trace!(kind = event.kind(), states = ?event.state_list(), "router event");
            for listener in &snapshot {
                listener(event);
            }
        }
    }
}
