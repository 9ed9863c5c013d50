//! Navstate: serialized state transitions synchronized with session history
//!
//! Navstate keeps an application's semantic "current state" in step with the
//! browser's history stack. Transitions are serialized against an
//! asynchronous front controller, and requests that arrive while one is
//! running collapse into a single waiting slot instead of racing.
//!
//! # Core Concepts
//!
//! - **StateList**: an ordered, non-empty list of application state identifiers
//! - **Router**: the coordinator; at most one transition runs at a time
//! - **Queue slot**: one waiting request, last write wins, all waiters share its outcome
//! - **History records**: router-owned entries enveloped so foreign entries are ignored
//! - **Collaborators**: host environment, state/URL codec, front controller
//!
//! # Guarantees
//!
//! - History is written only after the front controller succeeds, and before
//!   the transition's outcome resolves.
//! - A failed transition never changes the current state or history.
//! - A queued transition starts only after the running one fully settled.
//! - If a transition's driver is dropped or its front controller panics, the
//!   outcome resolves to [`RouterError::Interrupted`] and the router goes
//!   back to idle.
//!
//! A front controller that never settles leaves the router running forever;
//! there are no timeouts. [`Router::pending_transition`] exposes how long
//! the current transition has been in flight.

pub mod builder;
pub mod core;
pub mod effects;
pub mod host;
pub mod router;

// Re-export commonly used types
pub use builder::{BuildError, RouterBuilder, RouterConfig};
pub use core::{ControllerError, RouterError, State, StateList};
pub use effects::TransitionHandle;
pub use router::{Router, RouterEvent};
