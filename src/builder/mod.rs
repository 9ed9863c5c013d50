//! Builder API for constructing routers.
//!
//! The router needs three collaborators (host, codec, front controller) and
//! optionally a spawner and configuration. The builder checks them once at
//! construction and reports every missing capability together.

pub mod config;
pub mod error;
pub mod macros;
pub mod router;

pub use config::RouterConfig;
pub use error::{BuildError, Capability};
pub use router::RouterBuilder;
