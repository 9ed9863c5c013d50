//! Collaborator capabilities consumed by the router.
//!
//! The router only needs an abstract surface from the outside world:
//! - [`HostEnvironment`]: location, history stack mutation, navigation events
//! - [`StateCodec`]: state list <-> URL conversion
//! - [`FrontController`]: the asynchronous work of entering a state list
//! - [`Spawn`]: somewhere to run transition drivers
//!
//! [`MemoryHistory`] and [`SegmentCodec`] are ready-made implementations.

mod codec;
mod controller;
mod environment;
mod memory;
mod spawn;

pub use codec::{SegmentCodec, StateCodec};
pub use controller::FrontController;
pub use environment::{HostEnvironment, NavigationListener};
pub use memory::{HistoryEntry, MemoryHistory};
pub use spawn::{Spawn, TokioSpawner};
