//! Events the session reducer understands.

use super::state::Profile;
use serde::{Deserialize, Serialize};

/// A discrete notification raised by the auth service.
///
/// Only `RequestProfileSucceeded` carries a payload.
///
/// # Example
///
/// ```rust
/// use session_state::core::{EventKind, SessionEvent};
/// use serde_json::json;
///
/// let event = SessionEvent::RequestProfileSucceeded(json!({"id": "u1"}));
/// assert_eq!(event.kind(), EventKind::RequestProfileSucceeded);
/// assert_eq!(event.kind().name(), "GET_USER_ME_SUCCESS");
/// ```
#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
#[serde(bound = "")]
pub enum SessionEvent<U: Profile = serde_json::Value> {
    /// A profile fetch has started
    RequestProfile,
    /// The profile fetch finished with a profile
    RequestProfileSucceeded(U),
    /// The profile fetch failed; the cause stays with the auth service
    RequestProfileFailed,
    /// A logout request has been sent
    LogoutRequested,
    /// The logout request was confirmed
    LogoutSucceeded,
}

impl<U: Profile> SessionEvent<U> {
    pub fn kind(&self) -> EventKind {
        match self {
            Self::RequestProfile => EventKind::RequestProfile,
            Self::RequestProfileSucceeded(_) => EventKind::RequestProfileSucceeded,
            Self::RequestProfileFailed => EventKind::RequestProfileFailed,
            Self::LogoutRequested => EventKind::LogoutRequested,
            Self::LogoutSucceeded => EventKind::LogoutSucceeded,
        }
    }
}

/// Payload-free tag of a [`SessionEvent`].
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub enum EventKind {
    RequestProfile,
    RequestProfileSucceeded,
    RequestProfileFailed,
    LogoutRequested,
    LogoutSucceeded,
}

impl EventKind {
    /// Stable action name as it appears in the host's action log.
    pub const fn name(self) -> &'static str {
        match self {
            Self::RequestProfile => "GET_USER_ME",
            Self::RequestProfileSucceeded => "GET_USER_ME_SUCCESS",
            Self::RequestProfileFailed => "GET_USER_ME_FAILURE",
            Self::LogoutRequested => "LOGOUT",
            Self::LogoutSucceeded => "LOGOUT_SUCCESS",
        }
    }
}

impl std::fmt::Display for EventKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// A host action that may carry a session event.
///
/// The dispatch loop routes every action through every slice; actions
/// that carry nothing for this slice return `None` and leave the session
/// untouched.
///
/// # Example
///
/// ```rust
/// use session_state::core::{SessionAction, SessionEvent};
///
/// enum AppAction {
///     Session(SessionEvent),
///     ToggleSidebar,
/// }
///
/// impl SessionAction for AppAction {
///     fn session_event(&self) -> Option<&SessionEvent> {
///         match self {
///             Self::Session(event) => Some(event),
///             Self::ToggleSidebar => None,
///         }
///     }
/// }
///
/// assert!(AppAction::ToggleSidebar.session_event().is_none());
/// ```
pub trait SessionAction<U: Profile = serde_json::Value> {
    fn session_event(&self) -> Option<&SessionEvent<U>>;
}

impl<U: Profile> SessionAction<U> for SessionEvent<U> {
    fn session_event(&self) -> Option<&SessionEvent<U>> {
        Some(self)
    }
}
