//! The transition coordinator.
//!
//! [`Router`] accepts requests to change application state, serializes them
//! against the front controller, coalesces requests that arrive while a
//! transition is running, and keeps the host history stack in step with the
//! last successfully entered [`StateList`].
//!
//! # Example
//!
//! ```rust
//! use async_trait::async_trait;
//! use navstate::core::{ControllerError, StateList};
//! use navstate::host::{FrontController, MemoryHistory, SegmentCodec};
//! use navstate::Router;
//! use std::sync::Arc;
//!
//! struct Render;
//!
//! #[async_trait]
//! impl FrontController<String> for Render {
//!     async fn enter(&self, _: &StateList<String>, _: bool) -> Result<(), ControllerError> {
//!         Ok(())
//!     }
//! }
//!
//! # tokio::runtime::Runtime::new().unwrap().block_on(async {
//! let history = Arc::new(MemoryHistory::new("/"));
//! let router = Router::builder()
//!     .host(Arc::clone(&history))
//!     .codec(SegmentCodec::new())
//!     .controller(Arc::new(Render))
//!     .build()
//!     .unwrap();
//!
//! let foo = StateList::single("foo".to_string());
//! router.enter_states(foo.clone(), true).unwrap().await.unwrap();
//!
//! assert_eq!(router.current_state_list(), Some(foo));
//! assert_eq!(history.current().url, "/foo");
//! # });
//! ```

mod events;
mod history;

pub use events::{ListenerId, RouterEvent};

use crate::builder::RouterBuilder;
use crate::core::{RecordCodec, RouterError, State, StateList};
use crate::effects::{
    Abandoned, HistoryWrite, PendingTransition, Settled, Step, TransitionHandle,
    TransitionMachine, TransitionRequest,
};
use crate::host::{FrontController, HostEnvironment, Spawn, StateCodec};
use events::Listeners;
use futures::FutureExt;
use parking_lot::Mutex;
use std::fmt;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

/// State shared between router handles and running drivers.
pub(crate) struct Shared<S: State> {
    host: Arc<dyn HostEnvironment>,
    codec: Arc<dyn StateCodec<S>>,
    controller: Arc<dyn FrontController<S>>,
    spawner: Arc<dyn Spawn>,
    records: RecordCodec,
    machine: Mutex<TransitionMachine<S>>,
    listeners: Listeners<S>,
    listening: AtomicBool,
}

/// Cheaply cloneable handle to a transition coordinator.
pub struct Router<S: State> {
    shared: Arc<Shared<S>>,
}

impl<S: State> Clone for Router<S> {
    fn clone(&self) -> Self {
        Self {
            shared: Arc::clone(&self.shared),
        }
    }
}

impl<S: State> Router<S> {
    pub fn builder() -> RouterBuilder<S> {
        RouterBuilder::new()
    }

    pub(crate) fn from_parts(
        host: Arc<dyn HostEnvironment>,
        codec: Arc<dyn StateCodec<S>>,
        controller: Arc<dyn FrontController<S>>,
        spawner: Arc<dyn Spawn>,
        records: RecordCodec,
    ) -> Self {
        Self {
            shared: Arc::new(Shared {
                host,
                codec,
                controller,
                spawner,
                records,
                machine: Mutex::new(TransitionMachine::new()),
                listeners: Listeners::new(),
                listening: AtomicBool::new(false),
            }),
        }
    }

    /// Enter `state_list` now.
    ///
    /// Fails immediately with [`RouterError::TransitionPending`] if another
    /// transition is running. On success the history stack gets a new entry
    /// when `push` is true, or the current entry is replaced otherwise.
    pub fn enter_states(
        &self,
        state_list: StateList<S>,
        push: bool,
    ) -> Result<TransitionHandle, RouterError> {
        let (handle, step) = self
            .shared
            .machine
            .lock()
            .begin(TransitionRequest::api(state_list, push))?;
        self.spawn_driver(step);
        Ok(handle)
    }

    /// Enter `state_list` now if idle, otherwise once the running transition
    /// settles.
    ///
    /// Only one request waits at a time. A later call replaces an earlier
    /// waiting request, and every caller that waited on that slot observes
    /// the outcome of the request that finally runs.
    pub fn queue_enter_states(&self, state_list: StateList<S>, push: bool) -> TransitionHandle {
        self.submit(TransitionRequest::api(state_list, push))
    }

    /// Record `state_list` as current without running the front controller.
    ///
    /// While idle this replaces the current history entry immediately. While
    /// a transition is running, the list is applied when that transition
    /// succeeds, in place of the list it entered.
    pub fn replace_state_list(&self, state_list: StateList<S>) -> Result<(), RouterError> {
        let shared = &self.shared;
        let write = shared
            .machine
            .lock()
            .replace_state_list(state_list, |state_list| Ok(shared.codec.to_url(state_list)?))?;
        if let Some(write) = write {
            shared.apply(write);
        }
        Ok(())
    }

    /// True while a transition is running.
    pub fn is_pending(&self) -> bool {
        self.shared.machine.lock().is_running()
    }

    /// Last list the front controller successfully entered.
    pub fn current_state_list(&self) -> Option<StateList<S>> {
        self.shared.machine.lock().current().cloned()
    }

    pub fn pending_transition(&self) -> Option<PendingTransition<S>> {
        self.shared.machine.lock().pending()
    }

    /// Register a listener for router notifications.
    pub fn subscribe<F>(&self, listener: F) -> ListenerId
    where
        F: Fn(&RouterEvent<S>) + Send + Sync + 'static,
    {
        self.shared.listeners.add(listener)
    }

    pub fn unsubscribe(&self, id: ListenerId) -> bool {
        self.shared.listeners.remove(id)
    }

    fn submit(&self, request: TransitionRequest<S>) -> TransitionHandle {
        let (handle, step) = self.shared.machine.lock().submit(request);
        if let Some(step) = step {
            self.spawn_driver(step);
        }
        handle
    }

    fn spawn_driver(&self, step: Step<S>) {
        let watch = DriverWatch::new(Arc::clone(&self.shared), step.ticket);
        self.shared.spawner.spawn(Shared::drive(watch, step).boxed());
    }
}

impl<S: State> fmt::Debug for Router<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Router")
            .field("tag", &self.shared.records.tag())
            .field("pending", &self.is_pending())
            .finish_non_exhaustive()
    }
}

impl<S: State> Shared<S> {
    /// Run transitions until the queue is empty.
    async fn drive(mut watch: DriverWatch<S>, mut step: Step<S>) {
        let shared = Arc::clone(&watch.shared);
        loop {
            let entered = shared
                .controller
                .enter(&step.state_list, step.is_upgrade)
                .await;

            let settled = shared
                .machine
                .lock()
                .settle(entered, |state_list| Ok(shared.codec.to_url(state_list)?));
            let Some(Settled {
                write,
                events,
                settlement,
                verdict,
                next,
            }) = settled
            else {
                watch.ticket = None;
                return;
            };
            watch.ticket = next.as_ref().map(|queued| queued.ticket);

            if let Some(write) = write {
                shared.apply(write);
            }
            shared.listeners.emit(events);
            settlement.resolve(verdict);

            match next {
                Some(queued) => step = queued,
                None => return,
            }
        }
    }

    fn apply(&self, write: HistoryWrite) {
        let value = self.records.to_value(&write.record);
        if write.push {
            self.host.push_record(value, &write.record.url);
        } else {
            self.host.replace_record(value, &write.record.url);
        }
    }
}

/// Fails the run it watches if the driver holding it is dropped first.
///
/// Created before the driver is spawned, so a spawner that discards the task
/// unpolled, a runtime shutting down, or a panicking front controller all
/// settle the outcome with [`RouterError::Interrupted`] and leave the router
/// idle.
struct DriverWatch<S: State> {
    shared: Arc<Shared<S>>,
    ticket: Option<u64>,
}

impl<S: State> DriverWatch<S> {
    fn new(shared: Arc<Shared<S>>, ticket: u64) -> Self {
        Self {
            shared,
            ticket: Some(ticket),
        }
    }
}

impl<S: State> Drop for DriverWatch<S> {
    fn drop(&mut self) {
        let Some(ticket) = self.ticket.take() else {
            return;
        };
        let abandoned = self.shared.machine.lock().abandon(ticket);
        let Some(Abandoned {
            events,
            settlements,
        }) = abandoned
        else {
            return;
        };

        // Listeners may be what is panicking.
        if std::thread::panicking() {
            tracing::error!(ticket, "transition driver panicked");
        } else {
            self.shared.listeners.emit(events);
        }
        for settlement in settlements {
            settlement.resolve(Err(RouterError::Interrupted));
        }
    }
}
