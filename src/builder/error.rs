//! Build errors for the router builder.

use std::fmt;
use thiserror::Error;

/// A collaborator the router cannot run without.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Capability {
    Host,
    Codec,
    Controller,
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Host => "host environment (call .host())",
            Self::Codec => "state codec (call .codec())",
            Self::Controller => "front controller (call .controller())",
        };
        f.write_str(name)
    }
}

/// Errors that can occur when building a router.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BuildError {
    #[error("Router is missing required capabilities: {}", list(.0))]
    MissingCapabilities(Vec<Capability>),

    #[error("History record tag must not be empty")]
    EmptyRecordTag,
}

fn list(capabilities: &[Capability]) -> String {
    capabilities
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}
