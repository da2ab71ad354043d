//! Session checkpoints for diagnostics and deterministic replay.
//!
//! A checkpoint captures a store's current state together with the events
//! and phase history that produced it. Checkpoints are plain values: the
//! caller decides where, if anywhere, they go.

use crate::core::{replay, Profile, SessionEvent, SessionHistory, SessionState};
use crate::store::{SessionStore, StoreConfig};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub mod error;

pub use error::CheckpointError;

/// Version identifier for checkpoint format
pub const CHECKPOINT_VERSION: u32 = 1;

/// Serializable snapshot of a session store.
///
/// # Example
///
/// ```rust
/// use session_state::checkpoint::Checkpoint;
/// use session_state::core::SessionEvent;
/// use session_state::store::SessionStore;
/// use serde_json::json;
///
/// let mut store = SessionStore::new();
/// store.dispatch(&SessionEvent::RequestProfile);
/// store.dispatch(&SessionEvent::RequestProfileSucceeded(json!({"id": "u1"})));
///
/// let checkpoint = Checkpoint::capture(&store);
/// let json = checkpoint.to_json().unwrap();
/// let restored = Checkpoint::from_json(&json).unwrap();
/// assert_eq!(restored.current_state, store.snapshot());
/// ```
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(bound = "")]
pub struct Checkpoint<U: Profile = serde_json::Value> {
    /// Checkpoint format version
    pub version: u32,

    /// Unique checkpoint identifier
    pub id: String,

    /// When checkpoint was created
    pub timestamp: DateTime<Utc>,

    /// Slice the checkpoint was taken from
    pub slice_id: String,

    /// Session state at capture time
    pub current_state: SessionState<U>,

    /// Retained session events, oldest first
    pub events: Vec<SessionEvent<U>>,

    /// Whether older events were dropped before capture
    pub events_truncated: bool,

    /// Phase history at capture time
    pub history: SessionHistory,
}

impl<U: Profile> Checkpoint<U> {
    /// Capture the current contents of a store.
    pub fn capture(store: &SessionStore<U>) -> Self {
        Self {
            version: CHECKPOINT_VERSION,
            id: Uuid::new_v4().to_string(),
            timestamp: Utc::now(),
            slice_id: store.slice_id().to_string(),
            current_state: store.snapshot(),
            events: store.events().cloned().collect(),
            events_truncated: store.events_truncated(),
            history: store.history().clone(),
        }
    }

    /// Check the version and, when the event log is complete, that it
    /// replays to the recorded state.
    pub fn validate(&self) -> Result<(), CheckpointError> {
        if self.version != CHECKPOINT_VERSION {
            return Err(CheckpointError::UnsupportedVersion {
                found: self.version,
                supported: CHECKPOINT_VERSION,
            });
        }

        if !self.events_truncated {
            let replayed = replay(SessionState::new(), &self.events);
            if replayed != self.current_state {
                return Err(CheckpointError::ValidationFailed {
                    slice_id: self.slice_id.clone(),
                    reason: format!(
                        "event log replays to {}, checkpoint records {}",
                        replayed.phase().as_str(),
                        self.current_state.phase().as_str()
                    ),
                });
            }
        }

        Ok(())
    }

    pub fn to_json(&self) -> Result<String, CheckpointError> {
        serde_json::to_string_pretty(self)
            .map_err(|e| CheckpointError::SerializationFailed(e.to_string()))
    }

    /// Parse and validate a JSON checkpoint.
    pub fn from_json(json: &str) -> Result<Self, CheckpointError> {
        let checkpoint: Self = serde_json::from_str(json)
            .map_err(|e| CheckpointError::DeserializationFailed(e.to_string()))?;
        checkpoint.validate()?;
        Ok(checkpoint)
    }

    /// Encode as a compact binary envelope.
    ///
    /// Session state and events travel as an embedded JSON document so
    /// profiles that need a self-describing format (such as
    /// `serde_json::Value`) still decode.
    pub fn to_binary(&self) -> Result<Vec<u8>, CheckpointError> {
        let body = serde_json::to_string(&SessionBody {
            current_state: &self.current_state,
            events: &self.events,
        })
        .map_err(|e| CheckpointError::SerializationFailed(e.to_string()))?;

        let envelope = BinaryEnvelope {
            version: self.version,
            id: self.id.clone(),
            timestamp: self.timestamp,
            slice_id: self.slice_id.clone(),
            events_truncated: self.events_truncated,
            history: self.history.clone(),
            body,
        };
        bincode::serialize(&envelope)
            .map_err(|e| CheckpointError::SerializationFailed(e.to_string()))
    }

    /// Decode and validate a binary checkpoint.
    pub fn from_binary(bytes: &[u8]) -> Result<Self, CheckpointError> {
        let envelope: BinaryEnvelope = bincode::deserialize(bytes)
            .map_err(|e| CheckpointError::DeserializationFailed(e.to_string()))?;
        let body: OwnedSessionBody<U> = serde_json::from_str(&envelope.body)
            .map_err(|e| CheckpointError::DeserializationFailed(e.to_string()))?;

        let checkpoint = Self {
            version: envelope.version,
            id: envelope.id,
            timestamp: envelope.timestamp,
            slice_id: envelope.slice_id,
            current_state: body.current_state,
            events: body.events,
            events_truncated: envelope.events_truncated,
            history: envelope.history,
        };
        checkpoint.validate()?;
        Ok(checkpoint)
    }
}

/// Binary layout: fixed fields encoded by bincode, profile-bearing fields
/// as JSON.
#[derive(Serialize, Deserialize)]
struct BinaryEnvelope {
    version: u32,
    id: String,
    timestamp: DateTime<Utc>,
    slice_id: String,
    events_truncated: bool,
    history: SessionHistory,
    body: String,
}

#[derive(Serialize)]
#[serde(bound = "")]
struct SessionBody<'a, U: Profile> {
    current_state: &'a SessionState<U>,
    events: &'a [SessionEvent<U>],
}

#[derive(Deserialize)]
#[serde(bound = "")]
struct OwnedSessionBody<U: Profile> {
    current_state: SessionState<U>,
    events: Vec<SessionEvent<U>>,
}

impl<U: Profile> SessionStore<U> {
    /// Rebuild a store at a checkpointed state.
    ///
    /// The configuration must name the same slice the checkpoint was taken
    /// from.
    pub fn restore(checkpoint: Checkpoint<U>, config: StoreConfig) -> Result<Self, CheckpointError> {
        config.validate()?;
        checkpoint.validate()?;

        if checkpoint.slice_id != config.slice_id {
            return Err(CheckpointError::ValidationFailed {
                reason: format!("store is configured for slice '{}'", config.slice_id),
                slice_id: checkpoint.slice_id,
            });
        }

        Ok(Self::from_parts(
            config,
            checkpoint.current_state,
            &checkpoint.history,
            checkpoint.events,
            checkpoint.events_truncated,
        ))
    }
}
