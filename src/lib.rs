//! Session State: a pure reducer for client-side user session status
//!
//! Built on the "pure core, imperative shell" philosophy. The core answers
//! two questions for the rest of the UI: is the user's profile currently
//! being fetched, and what is the last known profile, if any. It does so
//! with a single total function from (state, event) to state.
//!
//! # Core Concepts
//!
//! - **SessionState**: `fetching` flag plus an optional opaque profile
//! - **SessionEvent**: closed set of events raised by the auth service
//! - **reduce**: pure state-transition function
//! - **SessionStore**: owned dispatch loop that holds the canonical state
//! - **Effects**: auth service calls expressed as Stillwater effects
//! - **Checkpoints**: serializable snapshots for replay and diagnostics
//!
//! # Example
//!
//! ```rust
//! use session_state::core::{reduce, SessionEvent, SessionState};
//! use serde_json::json;
//!
//! let state: SessionState = SessionState::default();
//! let state = reduce(state, &SessionEvent::RequestProfile);
//! let state = reduce(state, &SessionEvent::RequestProfileSucceeded(json!({"id": "u1"})));
//!
//! // Logout is only final once confirmed; the profile stays until then.
//! let state = reduce(state, &SessionEvent::LogoutRequested);
//! assert!(state.user().is_some());
//!
//! let state = reduce(state, &SessionEvent::LogoutSucceeded);
//! assert!(state.user().is_none());
//! ```

pub mod checkpoint;
pub mod core;
pub mod effects;
pub mod store;

// Re-export commonly used types
pub use checkpoint::{Checkpoint, CheckpointError};
pub use self::core::{reduce, EventKind, SessionAction, SessionEvent, SessionPhase, SessionState};
pub use effects::{AuthError, AuthService};
pub use store::{DispatchOutcome, SessionStore, StoreConfig};
