//! Store configuration.

use super::error::ConfigError;
use crate::core::{Reducer, SessionReducer};
use serde::{Deserialize, Serialize};

/// Default number of phase transitions kept in a store's history
pub const DEFAULT_HISTORY_LIMIT: usize = 256;

/// Default number of events kept in a store's event log
pub const DEFAULT_EVENT_LOG_LIMIT: usize = 1024;

/// Settings for a [`super::SessionStore`].
///
/// Every field has a default, so a partial document is enough:
///
/// ```rust
/// use session_state::store::StoreConfig;
///
/// let config = StoreConfig::from_json(r#"{ "record_history": false }"#).unwrap();
/// assert_eq!(config.slice_id, "user");
/// assert!(!config.record_history);
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// Identifier the slice is registered under in the host store
    pub slice_id: String,

    /// Whether dispatched events are recorded in the phase history
    pub record_history: bool,

    /// Maximum retained phase transitions; `None` keeps everything
    pub history_limit: Option<usize>,

    /// Maximum retained events; `None` keeps everything
    pub event_log_limit: Option<usize>,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            slice_id: SessionReducer::<serde_json::Value>::ID.to_string(),
            record_history: true,
            history_limit: Some(DEFAULT_HISTORY_LIMIT),
            event_log_limit: Some(DEFAULT_EVENT_LOG_LIMIT),
        }
    }
}

impl StoreConfig {
    /// Parse and validate a JSON configuration document.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self =
            serde_json::from_str(json).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.slice_id.trim().is_empty() {
            return Err(ConfigError::EmptySliceId);
        }
        if self.history_limit == Some(0) {
            return Err(ConfigError::ZeroLimit {
                field: "history_limit",
            });
        }
        if self.event_log_limit == Some(0) {
            return Err(ConfigError::ZeroLimit {
                field: "event_log_limit",
            });
        }
        Ok(())
    }
}
