//! Transition requests and their shared outcomes.

use crate::core::{RouterError, State, StateList};
use chrono::{DateTime, Utc};
use futures::channel::oneshot;
use futures::future::{BoxFuture, Shared};
use futures::FutureExt;
use std::fmt;
use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};
use std::time::Duration;

/// Result delivered to every caller bound to a transition.
pub type TransitionResult = Result<(), RouterError>;

/// Where a transition request came from.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Origin {
    /// Application code through the public API.
    Api,

    /// Host back/forward navigation. The URL is already in the address bar.
    History { url: String },

    /// Adoption of the state implied by content the host already rendered.
    Upgrade { url: String },
}

impl Origin {
    /// URL the host already shows, if the router must not derive or write one.
    pub fn pinned_url(&self) -> Option<&str> {
        match self {
            Self::Api => None,
            Self::History { url } | Self::Upgrade { url } => Some(url),
        }
    }

    pub fn is_upgrade(&self) -> bool {
        matches!(self, Self::Upgrade { .. })
    }

    pub fn is_history(&self) -> bool {
        matches!(self, Self::History { .. })
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Api => "api",
            Self::History { .. } => "history",
            Self::Upgrade { .. } => "upgrade",
        }
    }
}

/// A request to enter a state list.
#[derive(Clone, Debug, PartialEq)]
pub struct TransitionRequest<S: State> {
    pub state_list: StateList<S>,
    pub origin: Origin,
    /// Push a new history entry on success instead of replacing the current one.
    pub push: bool,
}

impl<S: State> TransitionRequest<S> {
    pub fn api(state_list: StateList<S>, push: bool) -> Self {
        Self {
            state_list,
            origin: Origin::Api,
            push,
        }
    }

    pub fn history(state_list: StateList<S>, url: impl Into<String>) -> Self {
        Self {
            state_list,
            origin: Origin::History { url: url.into() },
            push: false,
        }
    }

    pub fn upgrade(state_list: StateList<S>, url: impl Into<String>) -> Self {
        Self {
            state_list,
            origin: Origin::Upgrade { url: url.into() },
            push: false,
        }
    }
}

/// Cloneable future resolving to the outcome of one executed transition.
///
/// Every caller coalesced into the same queued transition holds a clone of
/// the same handle.
#[derive(Clone)]
pub struct TransitionHandle {
    inner: Shared<BoxFuture<'static, TransitionResult>>,
}

impl fmt::Debug for TransitionHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TransitionHandle").finish_non_exhaustive()
    }
}

impl Future for TransitionHandle {
    type Output = TransitionResult;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        self.inner.poll_unpin(cx)
    }
}

/// Sending half of a [`TransitionHandle`]. Resolving consumes it.
pub struct Settlement {
    sender: oneshot::Sender<TransitionResult>,
}

impl Settlement {
    pub fn resolve(self, result: TransitionResult) {
        // Nobody listening is fine.
        let _ = self.sender.send(result);
    }
}

impl fmt::Debug for Settlement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Settlement")
            .field("canceled", &self.sender.is_canceled())
            .finish()
    }
}

/// Create a linked settlement and handle. Dropping the settlement unresolved
/// resolves the handle with [`RouterError::Interrupted`].
pub fn outcome_channel() -> (Settlement, TransitionHandle) {
    let (sender, receiver) = oneshot::channel();
    let inner = receiver
        .map(|received| received.unwrap_or(Err(RouterError::Interrupted)))
        .boxed()
        .shared();
    (Settlement { sender }, TransitionHandle { inner })
}

/// Snapshot of the transition currently in flight.
#[derive(Clone, Debug, PartialEq)]
pub struct PendingTransition<S: State> {
    pub state_list: StateList<S>,
    pub origin: Origin,
    pub started_at: DateTime<Utc>,
}

impl<S: State> PendingTransition<S> {
    /// Time since the front controller was invoked.
    pub fn elapsed(&self) -> Duration {
        Utc::now()
            .signed_duration_since(self.started_at)
            .to_std()
            .unwrap_or(Duration::ZERO)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::ControllerError;
    use futures::executor::block_on;

    #[test]
    fn pinned_url_only_for_host_origins() {
        assert_eq!(Origin::Api.pinned_url(), None);
        assert_eq!(
            Origin::History {
                url: "/a".to_string()
            }
            .pinned_url(),
            Some("/a")
        );
        assert!(Origin::Upgrade {
            url: "/".to_string()
        }
        .is_upgrade());
    }

    #[test]
    fn every_clone_observes_the_outcome() {
        let (settlement, handle) = outcome_channel();
        let other = handle.clone();
        let err = RouterError::from(ControllerError::new("boom"));
        settlement.resolve(Err(err.clone()));

        assert_eq!(block_on(handle), Err(err.clone()));
        assert_eq!(block_on(other), Err(err));
    }

    #[test]
    fn dropped_settlement_interrupts_handle() {
        let (settlement, handle) = outcome_channel();
        drop(settlement);
        assert_eq!(block_on(handle), Err(RouterError::Interrupted));
    }

    #[test]
    fn resolving_without_listeners_is_harmless() {
        let (settlement, handle) = outcome_channel();
        drop(handle);
        settlement.resolve(Ok(()));
    }

    #[test]
    fn elapsed_is_never_negative() {
        let pending = PendingTransition {
            state_list: StateList::single("a".to_string()),
            origin: Origin::Api,
            started_at: Utc::now() + chrono::Duration::seconds(5),
        };
        assert_eq!(pending.elapsed(), Duration::ZERO);
    }
}
