//! The imperative shell around transitions.
//!
//! This module holds the pieces that carry a transition from request to
//! settlement:
//!
//! - **Requests and outcomes**: what was asked for, by whom, and the shared
//!   future every waiting caller observes
//! - **Queue slot**: at most one not-yet-started request, last write wins
//! - **Transition machine**: the Idle/Running state machine that decides
//!   whether a request runs now, waits, or is rejected
//!
//! Nothing here suspends. The router's driver loop awaits the front
//! controller between `begin` and `settle`.

mod machine;
mod queue;
mod transition;

pub use machine::{Abandoned, HistoryWrite, Settled, Step, TransitionMachine};
pub use queue::QueueSlot;
pub use transition::{
    outcome_channel, Origin, PendingTransition, Settlement, TransitionHandle, TransitionRequest,
    TransitionResult,
};
