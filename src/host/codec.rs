//! State/URL codec capability and a path-segment implementation.

use crate::core::{CodecError, State, StateList};
use std::marker::PhantomData;

/// Converts between state lists and URLs.
pub trait StateCodec<S: State>: Send + Sync {
    /// Encode a list. Failure is reported as a failure of the transition.
    fn to_url(&self, states: &StateList<S>) -> Result<String, CodecError>;

    /// Decode a URL (path plus optional query).
    fn from_url(&self, url: &str) -> Result<StateList<S>, CodecError>;
}

/// Maps `[a, b]` to `/a/b` through [`State::name`] and [`State::from_name`].
///
/// Query strings and fragments are ignored when decoding.
///
/// # Example
///
/// ```rust
/// use navstate::core::StateList;
/// use navstate::host::{SegmentCodec, StateCodec};
///
/// let codec = SegmentCodec::<String>::new();
/// let list = StateList::new(vec!["mail".to_string(), "inbox".to_string()]).unwrap();
///
/// assert_eq!(codec.to_url(&list).unwrap(), "/mail/inbox");
/// assert_eq!(codec.from_url("/mail/inbox?page=2").unwrap(), list);
/// ```
pub struct SegmentCodec<S: State> {
    _phantom: PhantomData<fn() -> S>,
}

impl<S: State> SegmentCodec<S> {
    pub fn new() -> Self {
        Self {
            _phantom: PhantomData,
        }
    }
}

impl<S: State> Default for SegmentCodec<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: State> StateCodec<S> for SegmentCodec<S> {
    fn to_url(&self, states: &StateList<S>) -> Result<String, CodecError> {
        let mut url = String::new();
        for state in states {
            let name = state.name();
            if name.is_empty() || name.contains(['/', '?', '#']) {
                return Err(CodecError::Unencodable(format!(
                    "state name '{name}' is not a valid path segment"
                )));
            }
            url.push('/');
            url.push_str(name);
        }
        Ok(url)
    }

    fn from_url(&self, url: &str) -> Result<StateList<S>, CodecError> {
        let path = url.split(['?', '#']).next().unwrap_or_default();
        let undecodable = |reason: String| CodecError::Undecodable {
            url: url.to_string(),
            reason,
        };

        let states = path
            .split('/')
            .filter(|segment| !segment.is_empty())
            .map(|segment| {
                S::from_name(segment).ok_or_else(|| undecodable(format!("unknown segment '{segment}'")))
            })
            .collect::<Result<Vec<_>, _>>()?;

        StateList::new(states).map_err(|_| undecodable("path has no segments".to_string()))
    }
}
