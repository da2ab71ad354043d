//! Core session types and logic.
//!
//! This module contains the pure functional core:
//! - Session state values and their derived phases
//! - The closed set of session events
//! - The reducer and replay helpers
//! - Immutable phase history
//!
//! Nothing in this module performs I/O or logs.

mod event;
mod history;
mod reducer;
mod state;

pub use event::{EventKind, SessionAction, SessionEvent};
pub use history::{PhaseTransition, SessionHistory};
pub use reducer::{reduce, replay, replay_all, Reducer, SessionReducer};
pub use state::{Profile, SessionPhase, SessionState, State};
