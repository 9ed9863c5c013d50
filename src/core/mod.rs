//! Core router types and pure logic.
//!
//! This module contains everything that never suspends or touches the host:
//! - State identifiers via the `State` trait and ordered `StateList`s
//! - The history record envelope (`RecordCodec`)
//! - Error types shared across the crate
//!
//! All logic in this module is pure, following the "pure core, imperative
//! shell" split used throughout the crate.

mod error;
mod record;
mod state;

pub use error::{CodecError, ControllerError, RouterError};
pub use record::{HistoryRecord, RecordCodec, DEFAULT_RECORD_TAG};
pub use state::{State, StateList};
