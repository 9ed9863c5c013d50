//! Application state identifiers and ordered state lists.
//!
//! A [`StateList`] describes "where" the application is. The router never
//! inspects the identifiers it holds beyond handing them to the codec and the
//! front controller.

use super::error::RouterError;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::fmt::Debug;

/// Trait for application state identifiers.
///
/// All methods are pure. Identifiers are immutable tokens; equality is
/// whatever the application defines through `PartialEq`.
///
/// # Example
///
/// ```rust
/// use navstate::core::State;
/// use serde::{Deserialize, Serialize};
///
/// #[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
/// enum Page {
///     Inbox,
///     Settings,
/// }
///
/// impl State for Page {
///     fn name(&self) -> &str {
///         match self {
///             Self::Inbox => "inbox",
///             Self::Settings => "settings",
///         }
///     }
///
///     fn from_name(name: &str) -> Option<Self> {
///         match name {
///             "inbox" => Some(Self::Inbox),
///             "settings" => Some(Self::Settings),
///             _ => None,
///         }
///     }
/// }
///
/// assert_eq!(Page::from_name("inbox"), Some(Page::Inbox));
/// ```
pub trait State:
    Clone + PartialEq + Debug + Serialize + DeserializeOwned + Send + Sync + 'static
{
    /// Get the identifier's name for display, logging and path encoding.
    fn name(&self) -> &str;

    /// Parse an identifier back from its name.
    ///
    /// Default implementation recognizes nothing.
    fn from_name(name: &str) -> Option<Self>
    where
        Self: Sized,
    {
        let _ = name;
        None
    }
}

impl State for String {
    fn name(&self) -> &str {
        self
    }

    fn from_name(name: &str) -> Option<Self> {
        Some(name.to_string())
    }
}

/// Ordered, non-empty sequence of state identifiers.
///
/// Immutable once built; transitions clone it rather than mutate it.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(bound = "", try_from = "Vec<S>", into = "Vec<S>")]
pub struct StateList<S: State> {
    states: Vec<S>,
}

impl<S: State> StateList<S> {
    /// Build a list, rejecting an empty sequence.
    pub fn new(states: Vec<S>) -> Result<Self, RouterError> {
        if states.is_empty() {
            return Err(RouterError::EmptyStateList);
        }
        Ok(Self { states })
    }

    /// Build a list holding exactly one identifier.
    pub fn single(state: S) -> Self {
        Self {
            states: vec![state],
        }
    }

    pub fn as_slice(&self) -> &[S] {
        &self.states
    }

    pub fn iter(&self) -> std::slice::Iter<'_, S> {
        self.states.iter()
    }

    /// Always at least one.
    pub fn len(&self) -> usize {
        self.states.len()
    }

    pub fn is_empty(&self) -> bool {
        false
    }

    /// The innermost (last) identifier.
    pub fn leaf(&self) -> &S {
        &self.states[self.states.len() - 1]
    }

    /// Names of every identifier, in order.
    pub fn names(&self) -> Vec<&str> {
        self.states.iter().map(State::name).collect()
    }
}

impl<S: State> TryFrom<Vec<S>> for StateList<S> {
    type Error = RouterError;

    fn try_from(states: Vec<S>) -> Result<Self, Self::Error> {
        Self::new(states)
    }
}

impl<S: State> From<StateList<S>> for Vec<S> {
    fn from(list: StateList<S>) -> Self {
        list.states
    }
}

impl<'a, S: State> IntoIterator for &'a StateList<S> {
    type Item = &'a S;
    type IntoIter = std::slice::Iter<'a, S>;

    fn into_iter(self) -> Self::IntoIter {
        self.states.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
    enum TestState {
        Home,
        Detail,
    }

    impl State for TestState {
        fn name(&self) -> &str {
            match self {
                Self::Home => "home",
                Self::Detail => "detail",
            }
        }
    }

    #[test]
    fn empty_list_is_rejected() {
        let result = StateList::<TestState>::new(Vec::new());
        assert_eq!(result, Err(RouterError::EmptyStateList));
    }

    #[test]
    fn list_preserves_order() {
        let list = StateList::new(vec![TestState::Home, TestState::Detail]).unwrap();
        assert_eq!(list.len(), 2);
        assert_eq!(list.names(), vec!["home", "detail"]);
        assert_eq!(list.leaf(), &TestState::Detail);
    }

    #[test]
    fn default_from_name_recognizes_nothing() {
        assert_eq!(TestState::from_name("home"), None);
    }

    #[test]
    fn string_states_round_trip_names() {
        let state = "inbox".to_string();
        assert_eq!(state.name(), "inbox");
        assert_eq!(String::from_name("inbox"), Some(state));
    }

    #[test]
    fn list_serializes_as_plain_sequence() {
        let list = StateList::new(vec![TestState::Home, TestState::Detail]).unwrap();
        let json = serde_json::to_string(&list).unwrap();
        assert_eq!(json, r#"["Home","Detail"]"#);

        let back: StateList<TestState> = serde_json::from_str(&json).unwrap();
        assert_eq!(back, list);
    }

    #[test]
    fn deserializing_empty_sequence_fails() {
        let result: Result<StateList<TestState>, _> = serde_json::from_str("[]");
        assert!(result.is_err());
    }
}
