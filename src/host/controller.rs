//! Front controller capability: performs the work of "being in" a state list.

use crate::core::{ControllerError, State, StateList};
use async_trait::async_trait;

/// Application-level state entry.
///
/// `enter` is the single suspension point of a transition. The router does
/// not inspect the controller beyond its success or failure, and never
/// cancels an operation once started.
#[async_trait]
pub trait FrontController<S: State>: Send + Sync {
    /// Enter `states`. `is_upgrade` is true when adopting state implied by
    /// content the host already rendered, with no prior state to leave.
    async fn enter(&self, states: &StateList<S>, is_upgrade: bool) -> Result<(), ControllerError>;
}
