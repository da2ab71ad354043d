//! Session state values and the logical phases derived from them.
//!
//! `SessionState` is the only value the reducer produces. `SessionPhase`
//! is a read-only view used for history tracking and diagnostics.

use serde::{Deserialize, Serialize};
use std::fmt::Debug;

/// Trait for values that describe a position in a state machine.
///
/// All methods are pure - no side effects.
///
/// # Example
///
/// ```rust
/// use session_state::core::{SessionPhase, State};
///
/// assert_eq!(SessionPhase::FetchingProfile.name(), "FetchingProfile");
/// assert!(!SessionPhase::Authenticated.is_final());
/// ```
pub trait State:
    Clone + PartialEq + Debug + Serialize + for<'de> Deserialize<'de> + Send + Sync
{
    /// Get the state's name for display/logging.
    fn name(&self) -> &str;

    /// Check if this is a final (terminal) state.
    ///
    /// Default implementation returns `false`.
    fn is_final(&self) -> bool {
        false
    }

    /// Check if this is an error state.
    ///
    /// Default implementation returns `false`.
    fn is_error(&self) -> bool {
        false
    }
}

/// Opaque user profile payload supplied by the auth service.
///
/// The session core asserts nothing about its structure beyond
/// "present or absent". Any serializable, comparable value qualifies.
pub trait Profile:
    Clone + PartialEq + Debug + Serialize + for<'de> Deserialize<'de> + Send + Sync + 'static
{
}

impl<T> Profile for T where
    T: Clone + PartialEq + Debug + Serialize + for<'de> Deserialize<'de> + Send + Sync + 'static
{
}

/// Client-visible session status for the signed-in user.
///
/// Values are immutable once produced: every transition builds a new
/// value through [`crate::core::reduce`].
///
/// # Example
///
/// ```rust
/// use session_state::core::SessionState;
///
/// let state: SessionState = SessionState::default();
/// assert!(!state.is_fetching());
/// assert!(state.user().is_none());
/// ```
#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
#[serde(bound = "")]
pub struct SessionState<U: Profile = serde_json::Value> {
    /// True while a user-profile fetch is in flight
    pub fetching: bool,
    /// Last successfully fetched profile, if any
    pub user: Option<U>,
}

impl<U: Profile> Default for SessionState<U> {
    fn default() -> Self {
        Self::new()
    }
}

impl<U: Profile> SessionState<U> {
    /// The state a store starts from: not fetching, no user.
    pub fn new() -> Self {
        Self {
            fetching: false,
            user: None,
        }
    }

    /// Build a state with an authenticated user and no fetch in flight.
    pub fn authenticated(user: U) -> Self {
        Self {
            fetching: false,
            user: Some(user),
        }
    }

    pub fn is_fetching(&self) -> bool {
        self.fetching
    }

    pub fn user(&self) -> Option<&U> {
        self.user.as_ref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.user.is_some()
    }

    /// Derive the logical phase of this state.
    ///
    /// A fetch in flight always reads as `FetchingProfile`, even when a
    /// stale profile is still present.
    pub fn phase(&self) -> SessionPhase {
        match (self.fetching, &self.user) {
            (true, _) => SessionPhase::FetchingProfile,
            (false, Some(_)) => SessionPhase::Authenticated,
            (false, None) => SessionPhase::NoSession,
        }
    }
}

impl<U: Profile> State for SessionState<U> {
    fn name(&self) -> &str {
        self.phase().as_str()
    }
}

/// Logical phases of the session machine.
///
/// There is no terminal phase: the machine runs for the lifetime of the
/// hosting session.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub enum SessionPhase {
    NoSession,
    FetchingProfile,
    Authenticated,
}

impl SessionPhase {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::NoSession => "NoSession",
            Self::FetchingProfile => "FetchingProfile",
            Self::Authenticated => "Authenticated",
        }
    }
}

impl State for SessionPhase {
    fn name(&self) -> &str {
        self.as_str()
    }
}
