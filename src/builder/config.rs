//! Router configuration.

use crate::core::DEFAULT_RECORD_TAG;
use serde::{Deserialize, Serialize};

/// Tunables that do not involve collaborators.
///
/// Deserializes with defaults for missing fields, so configuration can be
/// embedded in a larger application config.
///
/// # Example
///
/// ```rust
/// use navstate::builder::RouterConfig;
///
/// let config: RouterConfig = serde_json::from_str(r#"{ "record_tag": "shop" }"#).unwrap();
/// assert_eq!(config.record_tag, "shop");
///
/// let defaults: RouterConfig = serde_json::from_str("{}").unwrap();
/// assert_eq!(defaults, RouterConfig::default());
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RouterConfig {
    /// Envelope key marking history entries written by the router.
    pub record_tag: String,
}

impl Default for RouterConfig {
    fn default() -> Self {
        Self {
            record_tag: DEFAULT_RECORD_TAG.to_string(),
        }
    }
}
