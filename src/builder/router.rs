//! Builder for constructing routers.

use crate::builder::config::RouterConfig;
use crate::builder::error::{BuildError, Capability};
use crate::core::{RecordCodec, State};
use crate::host::{FrontController, HostEnvironment, Spawn, StateCodec, TokioSpawner};
use crate::router::Router;
use std::sync::Arc;
use stillwater::validation::Validation;
use stillwater::NonEmptyVec;

/// Builder for constructing routers with a fluent API.
pub struct RouterBuilder<S: State> {
    host: Option<Arc<dyn HostEnvironment>>,
    codec: Option<Arc<dyn StateCodec<S>>>,
    controller: Option<Arc<dyn FrontController<S>>>,
    spawner: Arc<dyn Spawn>,
    config: RouterConfig,
}

impl<S: State> RouterBuilder<S> {
    /// Create a new builder spawning onto tokio with default configuration.
    pub fn new() -> Self {
        Self {
            host: None,
            codec: None,
            controller: None,
            spawner: Arc::new(TokioSpawner),
            config: RouterConfig::default(),
        }
    }

    /// Set the host environment (required).
    pub fn host<H: HostEnvironment + 'static>(mut self, host: Arc<H>) -> Self {
        self.host = Some(host);
        self
    }

    /// Set the state/URL codec (required).
    pub fn codec<C: StateCodec<S> + 'static>(mut self, codec: C) -> Self {
        self.codec = Some(Arc::new(codec));
        self
    }

    /// Set the front controller (required).
    pub fn controller<F: FrontController<S> + 'static>(mut self, controller: Arc<F>) -> Self {
        self.controller = Some(controller);
        self
    }

    /// Replace the default tokio spawner.
    pub fn spawner<T: Spawn + 'static>(mut self, spawner: T) -> Self {
        self.spawner = Arc::new(spawner);
        self
    }

    pub fn config(mut self, config: RouterConfig) -> Self {
        self.config = config;
        self
    }

    /// Set the envelope tag of router-owned history entries.
    pub fn record_tag(mut self, tag: impl Into<String>) -> Self {
        self.config.record_tag = tag.into();
        self
    }

    /// Build the router.
    /// Reports every missing capability at once rather than the first.
    pub fn build(self) -> Result<Router<S>, BuildError> {
        let checks: Vec<Validation<(), NonEmptyVec<Capability>>> = vec![
            require(self.host.is_some(), Capability::Host),
            require(self.codec.is_some(), Capability::Codec),
            require(self.controller.is_some(), Capability::Controller),
        ];
        let missing: Vec<Capability> = match Validation::all_vec(checks) {
            Validation::Success(_) => Vec::new(),
            Validation::Failure(missing) => missing.iter().copied().collect(),
        };

        let (Some(host), Some(codec), Some(controller)) = (self.host, self.codec, self.controller)
        else {
            return Err(BuildError::MissingCapabilities(missing));
        };

        if self.config.record_tag.is_empty() {
            return Err(BuildError::EmptyRecordTag);
        }

        Ok(Router::from_parts(
            host,
            codec,
            controller,
            self.spawner,
            RecordCodec::new(self.config.record_tag),
        ))
    }
}

impl<S: State> Default for RouterBuilder<S> {
    fn default() -> Self {
        Self::new()
    }
}

fn require(present: bool, capability: Capability) -> Validation<(), NonEmptyVec<Capability>> {
    if present {
        Validation::success(())
    } else {
        Validation::fail(capability)
    }
}
