//! Shared fakes for router integration tests.

#![allow(dead_code)]

use async_trait::async_trait;
use futures::channel::oneshot;
use futures::future::BoxFuture;
use navstate::core::{ControllerError, StateList};
use navstate::host::{
    FrontController, HistoryEntry, HostEnvironment, MemoryHistory, NavigationListener,
    SegmentCodec, Spawn, TokioSpawner,
};
use navstate::{Router, RouterEvent};
use parking_lot::Mutex;
use serde_json::Value;
use std::collections::VecDeque;
use std::sync::Arc;

/// Ordered log shared by the fakes, for checking happens-before relations.
#[derive(Clone, Default)]
pub struct Journal {
    lines: Arc<Mutex<Vec<String>>>,
}

impl Journal {
    pub fn log(&self, line: impl Into<String>) {
        self.lines.lock().push(line.into());
    }

    pub fn lines(&self) -> Vec<String> {
        self.lines.lock().clone()
    }

    pub fn clear(&self) {
        self.lines.lock().clear();
    }
}

/// Front controller whose operations settle only when the test says so.
pub struct GatedController {
    calls: Mutex<Vec<(Vec<String>, bool)>>,
    gates: Mutex<VecDeque<oneshot::Sender<Result<(), ControllerError>>>>,
    panic_on: Mutex<Option<String>>,
    journal: Journal,
}

impl GatedController {
    pub fn new(journal: Journal) -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            gates: Mutex::new(VecDeque::new()),
            panic_on: Mutex::new(None),
            journal,
        }
    }

    /// Every `enter` call so far, as (names, is_upgrade).
    pub fn calls(&self) -> Vec<(Vec<String>, bool)> {
        self.calls.lock().clone()
    }

    pub fn entered(&self) -> Vec<String> {
        self.calls
            .lock()
            .iter()
            .map(|(names, _)| names.join("/"))
            .collect()
    }

    /// Settle the oldest open operation. Returns false if none is open.
    pub fn resolve(&self, result: Result<(), ControllerError>) -> bool {
        match self.gates.lock().pop_front() {
            Some(gate) => gate.send(result).is_ok(),
            None => false,
        }
    }

    pub fn succeed(&self) -> bool {
        self.resolve(Ok(()))
    }

    pub fn fail(&self, message: &str) -> bool {
        self.resolve(Err(ControllerError::new(message)))
    }

    pub fn open(&self) -> usize {
        self.gates.lock().len()
    }

    /// Make `enter` panic for the list whose names join to `label`.
    pub fn panic_on(&self, label: &str) {
        *self.panic_on.lock() = Some(label.to_string());
    }
}

#[async_trait]
impl FrontController<String> for GatedController {
    async fn enter(&self, states: &StateList<String>, is_upgrade: bool) -> Result<(), ControllerError> {
        let names: Vec<String> = states.iter().cloned().collect();
        let label = names.join("/");
        self.journal.log(format!("enter {label}"));
        if self.panic_on.lock().as_deref() == Some(label.as_str()) {
            panic!("front controller blew up entering {label}");
        }
        self.calls.lock().push((names, is_upgrade));

        let (gate, wait) = oneshot::channel();
        self.gates.lock().push_back(gate);
        let result = wait
            .await
            .unwrap_or_else(|_| Err(ControllerError::new("gate dropped")));
        self.journal.log(format!("settled {label}"));
        result
    }
}

/// Spawner that discards every driver without running it.
pub struct DiscardingSpawner;

impl Spawn for DiscardingSpawner {
    fn spawn(&self, task: BoxFuture<'static, ()>) {
        drop(task);
    }
}

/// Host that journals history writes and delegates to a [`MemoryHistory`].
///
/// Once given a router via [`JournalHost::observe`], every write also reads
/// the router's current list back, as a host reacting to its own writes would.
pub struct JournalHost {
    pub history: Arc<MemoryHistory>,
    journal: Journal,
    observer: Mutex<Option<Router<String>>>,
}

impl JournalHost {
    pub fn observe(&self, router: Router<String>) {
        *self.observer.lock() = Some(router);
    }

    fn report_current(&self) {
        let router = self.observer.lock().clone();
        if let Some(router) = router {
            let current = router
                .current_state_list()
                .map(|states| states.leaf().clone())
                .unwrap_or_default();
            self.journal.log(format!("host sees {current}"));
        }
    }
}

impl HostEnvironment for JournalHost {
    fn location(&self) -> String {
        self.history.location()
    }

    fn current_record(&self) -> Option<Value> {
        self.history.current_record()
    }

    fn push_record(&self, record: Value, url: &str) {
        self.journal.log(format!("push {url}"));
        self.history.push_record(record, url);
        self.report_current();
    }

    fn replace_record(&self, record: Value, url: &str) {
        self.journal.log(format!("replace {url}"));
        self.history.replace_record(record, url);
        self.report_current();
    }

    fn on_navigate(&self, listener: NavigationListener) {
        self.history.on_navigate(listener);
    }
}

pub struct Harness {
    pub router: Router<String>,
    pub history: Arc<MemoryHistory>,
    pub host: Arc<JournalHost>,
    pub controller: Arc<GatedController>,
    pub journal: Journal,
    pub events: Arc<Mutex<Vec<RouterEvent<String>>>>,
}

impl Harness {
    pub fn new(url: &str) -> Self {
        Self::with_record(url, None)
    }

    pub fn with_record(url: &str, record: Option<Value>) -> Self {
        Self::assemble(url, record, TokioSpawner)
    }

    pub fn with_spawner<T: Spawn + 'static>(url: &str, spawner: T) -> Self {
        Self::assemble(url, None, spawner)
    }

    fn assemble<T: Spawn + 'static>(url: &str, record: Option<Value>, spawner: T) -> Self {
        let journal = Journal::default();
        let history = Arc::new(MemoryHistory::with_record(url, record));
        let controller = Arc::new(GatedController::new(journal.clone()));
        let host = Arc::new(JournalHost {
            history: Arc::clone(&history),
            journal: journal.clone(),
            observer: Mutex::new(None),
        });

        let router = Router::builder()
            .host(Arc::clone(&host))
            .codec(SegmentCodec::new())
            .controller(Arc::clone(&controller))
            .spawner(spawner)
            .build()
            .expect("harness router builds");

        let events = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&events);
        let event_journal = journal.clone();
        router.subscribe(move |event: &RouterEvent<String>| {
            event_journal.log(format!("event {}", event.kind()));
            sink.lock().push(event.clone());
        });

        Self {
            router,
            history,
            host,
            controller,
            journal,
            events,
        }
    }

    pub fn events(&self) -> Vec<RouterEvent<String>> {
        self.events.lock().clone()
    }

    pub fn event_kinds(&self) -> Vec<&'static str> {
        self.events.lock().iter().map(RouterEvent::kind).collect()
    }

    pub fn urls(&self) -> Vec<String> {
        self.history
            .entries()
            .into_iter()
            .map(|entry: HistoryEntry| entry.url)
            .collect()
    }

    pub fn current(&self) -> Option<Vec<String>> {
        self.router
            .current_state_list()
            .map(|states| states.iter().cloned().collect())
    }
}

pub fn list(names: &[&str]) -> StateList<String> {
    StateList::new(names.iter().map(|name| name.to_string()).collect()).expect("non-empty list")
}

/// Let spawned transition drivers run until they block.
pub async fn flush() {
    for _ in 0..16 {
        tokio::task::yield_now().await;
    }
}
