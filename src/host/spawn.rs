//! Task spawning capability used to drive transitions.

use futures::future::BoxFuture;

/// Runs a transition driver to completion in the background.
///
/// A task dropped before it completes fails its transition with
/// [`RouterError::Interrupted`](crate::core::RouterError::Interrupted).
pub trait Spawn: Send + Sync {
    fn spawn(&self, task: BoxFuture<'static, ()>);
}

/// Spawns onto the ambient tokio runtime.
///
/// Must be used from within a runtime context.
#[derive(Clone, Copy, Debug, Default)]
pub struct TokioSpawner;

impl Spawn for TokioSpawner {
    fn spawn(&self, task: BoxFuture<'static, ()>) {
        tokio::spawn(task);
    }
}
