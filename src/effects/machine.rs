//! Transition state machine: Idle <-> Running, plus the queue slot.
//!
//! Every method here is synchronous and touches no host. The only suspension
//! point of a transition (the front controller) happens between
//! [`TransitionMachine::begin`] and [`TransitionMachine::settle`], driven by
//! the router. History writes are returned as [`HistoryWrite`] values for the
//! router to apply once the lock is released.

use super::queue::QueueSlot;
use super::transition::{
    outcome_channel, Origin, PendingTransition, Settlement, TransitionHandle, TransitionRequest,
    TransitionResult,
};
use crate::core::{ControllerError, HistoryRecord, RouterError, State, StateList};
use crate::router::RouterEvent;
use chrono::{DateTime, Utc};

/// Work the driver must hand to the front controller next.
#[derive(Clone, Debug, PartialEq)]
pub struct Step<S: State> {
    pub state_list: StateList<S>,
    pub is_upgrade: bool,
    /// Identifies the run this step belongs to; see [`TransitionMachine::abandon`].
    pub ticket: u64,
}

/// A history entry to push, or to write over the current entry.
#[derive(Clone, Debug, PartialEq)]
pub struct HistoryWrite {
    pub record: HistoryRecord,
    pub push: bool,
}

/// Everything produced by settling a transition. The caller applies `write`,
/// dispatches `events` and then resolves `settlement`, outside of any lock.
#[derive(Debug)]
pub struct Settled<S: State> {
    pub write: Option<HistoryWrite>,
    pub events: Vec<RouterEvent<S>>,
    pub settlement: Settlement,
    pub verdict: TransitionResult,
    pub next: Option<Step<S>>,
}

/// A run whose driver went away before settling it.
#[derive(Debug)]
pub struct Abandoned<S: State> {
    pub events: Vec<RouterEvent<S>>,
    /// The running transition's settlement, then the queued one's, if any.
    pub settlements: Vec<Settlement>,
}

#[derive(Debug)]
struct Running<S: State> {
    request: TransitionRequest<S>,
    settlement: Settlement,
    replacement: Option<StateList<S>>,
    started_at: DateTime<Utc>,
    ticket: u64,
}

#[derive(Debug)]
enum Phase<S: State> {
    Idle,
    Running(Running<S>),
}

/// Router bookkeeping guarded by a single lock.
#[derive(Debug)]
pub struct TransitionMachine<S: State> {
    current: Option<StateList<S>>,
    phase: Phase<S>,
    queue: QueueSlot<S>,
    initial_record: Option<HistoryRecord>,
    tickets: u64,
}

impl<S: State> Default for TransitionMachine<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: State> TransitionMachine<S> {
    pub fn new() -> Self {
        Self {
            current: None,
            phase: Phase::Idle,
            queue: QueueSlot::new(),
            initial_record: None,
            tickets: 0,
        }
    }

    /// Last successfully entered list (pure).
    pub fn current(&self) -> Option<&StateList<S>> {
        self.current.as_ref()
    }

    pub fn is_running(&self) -> bool {
        matches!(self.phase, Phase::Running(_))
    }

    pub fn pending(&self) -> Option<PendingTransition<S>> {
        match &self.phase {
            Phase::Idle => None,
            Phase::Running(running) => Some(PendingTransition {
                state_list: running.request.state_list.clone(),
                origin: running.request.origin.clone(),
                started_at: running.started_at,
            }),
        }
    }

    pub fn queue(&self) -> &QueueSlot<S> {
        &self.queue
    }

    pub fn initial_record(&self) -> Option<&HistoryRecord> {
        self.initial_record.as_ref()
    }

    /// Capture the initial record once. Later calls keep the first capture.
    pub fn capture_initial_with<F>(&mut self, capture: F) -> &HistoryRecord
    where
        F: FnOnce() -> HistoryRecord,
    {
        self.initial_record.get_or_insert_with(capture)
    }

    /// Start `request` now, failing if a transition is already running.
    pub fn begin(
        &mut self,
        request: TransitionRequest<S>,
    ) -> Result<(TransitionHandle, Step<S>), RouterError> {
        if self.is_running() {
            return Err(RouterError::TransitionPending);
        }
        let (settlement, handle) = outcome_channel();
        Ok((handle, self.start(request, settlement)))
    }

    /// Start `request` now if idle, otherwise coalesce it into the queue slot.
    pub fn submit(&mut self, request: TransitionRequest<S>) -> (TransitionHandle, Option<Step<S>>) {
        if self.is_running() {
            tracing::debug!(
                states = ?request.state_list,
                origin = request.origin.label(),
                "transition queued"
            );
            return (self.queue.enqueue(request), None);
        }
        let (settlement, handle) = outcome_channel();
        let step = self.start(request, settlement);
        (handle, Some(step))
    }

    /// Replace the current list.
    ///
    /// While running, the list is applied when the running transition
    /// succeeds instead and nothing is written now. While idle, the list is
    /// encoded with `encode` and becomes current; the returned write replaces
    /// the current history entry.
    pub fn replace_state_list<F>(
        &mut self,
        state_list: StateList<S>,
        encode: F,
    ) -> Result<Option<HistoryWrite>, RouterError>
    where
        F: FnOnce(&StateList<S>) -> Result<String, RouterError>,
    {
        if let Phase::Running(running) = &mut self.phase {
            running.replacement = Some(state_list);
            return Ok(None);
        }
        let url = encode(&state_list)?;
        self.current = Some(state_list);
        Ok(Some(HistoryWrite {
            record: HistoryRecord::new(url),
            push: false,
        }))
    }

    /// Settle the running transition with the controller's result and start
    /// the queued request, if any, before returning.
    ///
    /// `encode` derives the URL for the entered list. It is only called when
    /// the controller succeeded and the URL is not already known from the
    /// request's origin. Returns `None` when no transition was running.
    pub fn settle<F>(&mut self, entered: Result<(), ControllerError>, encode: F) -> Option<Settled<S>>
    where
        F: FnOnce(&StateList<S>) -> Result<String, RouterError>,
    {
        let Phase::Running(running) = std::mem::replace(&mut self.phase, Phase::Idle) else {
            return None;
        };
        let Running {
            request,
            settlement,
            replacement,
            ..
        } = running;

        let mut events = Vec::new();
        let mut write = None;
        let verdict = match entered {
            Ok(()) => {
                let replaced = replacement.is_some();
                let state_list = replacement.unwrap_or_else(|| request.state_list.clone());
                match plan_commit(&state_list, &request, replaced, encode) {
                    Ok((url, planned)) => {
                        tracing::debug!(states = ?state_list, %url, "transition complete");
                        self.current = Some(state_list.clone());
                        write = planned;
                        events.push(RouterEvent::TransitionComplete { state_list, url });
                        Ok(())
                    }
                    Err(error) => Err(error),
                }
            }
            Err(error) => Err(RouterError::Controller(error)),
        };

        if let Err(error) = &verdict {
            tracing::warn!(
                states = ?request.state_list,
                origin = request.origin.label(),
                %error,
                "transition failed"
            );
            events.extend(failure_events(&request, error));
        }

        let next = self
            .queue
            .drain()
            .map(|(request, settlement)| self.start(request, settlement));

        Some(Settled {
            write,
            events,
            settlement,
            verdict,
            next,
        })
    }

    /// Fail the run identified by `ticket` because its driver is gone.
    ///
    /// The machine returns to Idle and the queued request, if any, is
    /// discarded along with it: no driver remains to run it. Does nothing
    /// when `ticket` is not the running transition.
    pub fn abandon(&mut self, ticket: u64) -> Option<Abandoned<S>> {
        match &self.phase {
            Phase::Running(running) if running.ticket == ticket => {}
            _ => return None,
        }
        let Phase::Running(running) = std::mem::replace(&mut self.phase, Phase::Idle) else {
            return None;
        };

        let error = RouterError::Interrupted;
        tracing::warn!(
            states = ?running.request.state_list,
            origin = running.request.origin.label(),
            ticket,
            "transition driver dropped before settling"
        );
        let events = failure_events(&running.request, &error);
        let mut settlements = vec![running.settlement];
        if let Some((queued, settlement)) = self.queue.drain() {
            tracing::debug!(states = ?queued.state_list, "queued transition discarded");
            settlements.push(settlement);
        }

        Some(Abandoned {
            events,
            settlements,
        })
    }

    fn start(&mut self, request: TransitionRequest<S>, settlement: Settlement) -> Step<S> {
        self.tickets += 1;
        let ticket = self.tickets;
        tracing::debug!(
            states = ?request.state_list,
            origin = request.origin.label(),
            push = request.push,
            ticket,
            "transition started"
        );
        let step = Step {
            state_list: request.state_list.clone(),
            is_upgrade: matches!(request.origin, Origin::Upgrade { .. }),
            ticket,
        };
        self.phase = Phase::Running(Running {
            request,
            settlement,
            replacement: None,
            started_at: Utc::now(),
            ticket,
        });
        step
    }
}

/// Final URL of a successful transition, plus the history write it needs.
///
/// A pinned URL (history navigation, upgrade) is already shown by the host,
/// unless a replacement changed the list, in which case the replacement's URL
/// is written over the current entry.
fn plan_commit<S, F>(
    state_list: &StateList<S>,
    request: &TransitionRequest<S>,
    replaced: bool,
    encode: F,
) -> Result<(String, Option<HistoryWrite>), RouterError>
where
    S: State,
    F: FnOnce(&StateList<S>) -> Result<String, RouterError>,
{
    if !replaced {
        if let Some(url) = request.origin.pinned_url() {
            return Ok((url.to_string(), None));
        }
    }
    let url = encode(state_list)?;
    let write = HistoryWrite {
        record: HistoryRecord::new(url.clone()),
        push: request.push,
    };
    Ok((url, Some(write)))
}

fn failure_events<S: State>(request: &TransitionRequest<S>, error: &RouterError) -> Vec<RouterEvent<S>> {
    let mut events = vec![RouterEvent::TransitionFailed {
        state_list: request.state_list.clone(),
        error: error.clone(),
    }];
    if request.origin.is_history() {
        events.push(RouterEvent::HistoryNavigationFailed {
            state_list: request.state_list.clone(),
            error: error.clone(),
        });
    }
    events
}
