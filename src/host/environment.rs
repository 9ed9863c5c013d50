//! Host capability surface: location, history stack, navigation events.

use serde_json::Value;

/// Callback invoked when the user navigates via back/forward.
///
/// Receives the value stored against the destination entry, if any.
pub type NavigationListener = Box<dyn Fn(Option<Value>) + Send + Sync>;

/// The browsing environment the router keeps in sync.
///
/// The router never calls these methods while holding its own lock, so an
/// implementation may call back into the router from any of them.
pub trait HostEnvironment: Send + Sync {
    /// Current location as path plus query string.
    fn location(&self) -> String;

    /// Value stored against the current history entry.
    fn current_record(&self) -> Option<Value>;

    /// Append a new entry and make it current.
    fn push_record(&self, record: Value, url: &str);

    /// Overwrite the current entry in place.
    fn replace_record(&self, record: Value, url: &str);

    /// Register a back/forward navigation listener.
    fn on_navigate(&self, listener: NavigationListener);
}
