//! History synchronization: initial-state recovery and back/forward handling.

use super::{Router, RouterEvent};
use crate::core::{HistoryRecord, RouterError, State};
use crate::effects::{TransitionHandle, TransitionRequest};
use serde_json::Value;
use std::sync::atomic::Ordering;
use std::sync::Arc;

impl<S: State> Router<S> {
    /// Record describing the page as first loaded, captured at most once.
    ///
    /// Prefers the router-owned value already stored against the current
    /// entry; otherwise derives a record from the current location.
    pub fn capture_initial(&self) -> HistoryRecord {
        if let Some(record) = self.initial_record() {
            return record;
        }
        // Host reads happen before taking the lock; the first capture wins.
        let shared = &self.shared;
        let candidate = shared
            .host
            .current_record()
            .and_then(|value| shared.records.from_value(&value))
            .unwrap_or_else(|| shared.records.to_record(&shared.host.location()));
        shared
            .machine
            .lock()
            .capture_initial_with(|| candidate)
            .clone()
    }

    /// The captured initial record, if any.
    pub fn initial_record(&self) -> Option<HistoryRecord> {
        self.shared.machine.lock().initial_record().cloned()
    }

    /// Adopt the state implied by the page the host already rendered.
    ///
    /// The front controller is told this is an upgrade, and history is left
    /// alone since the host already shows the right URL. Fails synchronously
    /// if the initial URL does not decode.
    pub fn upgrade_initial_state(&self) -> Result<TransitionHandle, RouterError> {
        let record = self.capture_initial();
        let state_list = self.shared.codec.from_url(&record.url)?;

        let (handle, step) = self
            .shared
            .machine
            .lock()
            .submit(TransitionRequest::upgrade(state_list.clone(), record.url.clone()));

        self.shared.listeners.emit(vec![RouterEvent::Upgrade {
            state_list,
            url: record.url,
            outcome: handle.clone(),
        }]);
        if let Some(step) = step {
            self.spawn_driver(step);
        }
        Ok(handle)
    }

    /// React to back/forward navigation onto an entry holding `value`.
    ///
    /// `None` means the destination entry has no stored value, which happens
    /// when navigating back past the first entry the router created; the
    /// captured initial record stands in for it. Entries the router did not
    /// write are ignored without any notification.
    pub fn handle_navigation(&self, value: Option<Value>) {
        let shared = &self.shared;
        let record = match value {
            Some(value) => shared.records.from_value(&value),
            None => shared.machine.lock().initial_record().cloned(),
        };
        let Some(record) = record else {
            tracing::trace!("ignoring navigation to an entry the router did not create");
            return;
        };

        let state_list = match shared.codec.from_url(&record.url) {
            Ok(state_list) => state_list,
            Err(error) => {
                tracing::warn!(url = %record.url, %error, "ignoring navigation to undecodable URL");
                return;
            }
        };

        let (handle, step) = shared
            .machine
            .lock()
            .submit(TransitionRequest::history(state_list.clone(), record.url.clone()));

        shared.listeners.emit(vec![RouterEvent::HistoryNavigation {
            state_list,
            url: record.url,
            outcome: handle,
        }]);
        if let Some(step) = step {
            self.spawn_driver(step);
        }
    }

    /// Subscribe to host back/forward notifications. Idempotent.
    ///
    /// Captures the initial record first unless one was already captured,
    /// e.g. by [`Router::upgrade_initial_state`].
    pub fn listen(&self) {
        if self.shared.listening.swap(true, Ordering::SeqCst) {
            return;
        }
        self.capture_initial();

        let weak = Arc::downgrade(&self.shared);
        self.shared.host.on_navigate(Box::new(move |value| {
            if let Some(shared) = weak.upgrade() {
                Router { shared }.handle_navigation(value);
            }
        }));
    }
}
