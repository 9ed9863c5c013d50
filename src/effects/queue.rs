//! Single-slot transition queue.
//!
//! Holds at most one request that has not started yet. A newer request
//! replaces the stored one wholesale; the replaced request never runs, and
//! its callers are rebound to the outcome of whichever request is stored
//! when the slot is drained.

use super::transition::{outcome_channel, Settlement, TransitionHandle, TransitionRequest};
use crate::core::State;

/// Pending request plus the settlement shared by every coalesced caller.
#[derive(Debug)]
pub enum QueueSlot<S: State> {
    Empty,
    Occupied {
        request: TransitionRequest<S>,
        settlement: Settlement,
        handle: TransitionHandle,
        callers: usize,
    },
}

impl<S: State> Default for QueueSlot<S> {
    fn default() -> Self {
        Self::Empty
    }
}

impl<S: State> QueueSlot<S> {
    pub fn new() -> Self {
        Self::Empty
    }

    /// Store `request`, returning the handle every caller of this slot shares.
    pub fn enqueue(&mut self, request: TransitionRequest<S>) -> TransitionHandle {
        let (next, shared) = match std::mem::take(self) {
            Self::Empty => {
                let (settlement, handle) = outcome_channel();
                let shared = handle.clone();
                let slot = Self::Occupied {
                    request,
                    settlement,
                    handle,
                    callers: 1,
                };
                (slot, shared)
            }
            Self::Occupied {
                request: discarded,
                settlement,
                handle,
                callers,
            } => {
                tracing::debug!(
                    discarded = ?discarded.state_list,
                    states = ?request.state_list,
                    callers = callers + 1,
                    "coalesced queued transition"
                );
                let shared = handle.clone();
                let slot = Self::Occupied {
                    request,
                    settlement,
                    handle,
                    callers: callers + 1,
                };
                (slot, shared)
            }
        };

        *self = next;
        shared
    }

    /// Remove and return the stored request, leaving the slot empty.
    pub fn drain(&mut self) -> Option<(TransitionRequest<S>, Settlement)> {
        match std::mem::take(self) {
            Self::Empty => None,
            Self::Occupied {
                request, settlement, ..
            } => Some((request, settlement)),
        }
    }

    pub fn is_occupied(&self) -> bool {
        matches!(self, Self::Occupied { .. })
    }

    /// The request that will run next, if any.
    pub fn queued(&self) -> Option<&TransitionRequest<S>> {
        match self {
            Self::Empty => None,
            Self::Occupied { request, .. } => Some(request),
        }
    }

    /// Number of callers bound to the stored request.
    pub fn callers(&self) -> usize {
        match self {
            Self::Empty => 0,
            Self::Occupied { callers, .. } => *callers,
        }
    }
}
