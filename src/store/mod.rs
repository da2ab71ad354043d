//! Owned session store: the host-side dispatch loop for the session slice.
//!
//! The store holds the canonical state behind an `Arc`, serializes events
//! through `&mut self`, and keeps an event log plus phase history for
//! diagnostics and replay. It is the only place a new state is assigned.

mod config;
mod error;

pub use config::{StoreConfig, DEFAULT_EVENT_LOG_LIMIT, DEFAULT_HISTORY_LIMIT};
pub use error::ConfigError;

use crate::core::{
    reduce, PhaseTransition, Profile, SessionAction, SessionEvent, SessionHistory, SessionState,
};
use chrono::Utc;
use std::collections::VecDeque;
use std::sync::Arc;
use tracing::{debug, trace, warn};

/// What a single dispatch did to the stored state.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DispatchOutcome {
    /// A session event produced a different state
    Changed,
    /// A session event produced an equal state; the stored `Arc` is kept
    Unchanged,
    /// The action carried no session event
    Ignored,
}

impl DispatchOutcome {
    pub fn is_changed(self) -> bool {
        matches!(self, Self::Changed)
    }
}

/// Session slice store.
///
/// # Example
///
/// ```rust
/// use session_state::core::SessionEvent;
/// use session_state::store::{DispatchOutcome, SessionStore};
/// use serde_json::json;
///
/// let mut store = SessionStore::new();
/// assert_eq!(store.dispatch(&SessionEvent::RequestProfile), DispatchOutcome::Changed);
/// assert!(store.state().is_fetching());
///
/// store.dispatch(&SessionEvent::RequestProfileSucceeded(json!({"id": "u1"})));
/// assert_eq!(store.state().user(), Some(&json!({"id": "u1"})));
/// ```
#[derive(Debug)]
pub struct SessionStore<U: Profile = serde_json::Value> {
    config: StoreConfig,
    state: Arc<SessionState<U>>,
    history: SessionHistory,
    events: VecDeque<SessionEvent<U>>,
    events_truncated: bool,
}

impl SessionStore<serde_json::Value> {
    /// Create a store with the default configuration and an opaque JSON
    /// profile payload.
    pub fn new() -> Self {
        Self::from_config(StoreConfig::default())
    }
}

impl<U: Profile> Default for SessionStore<U> {
    /// A store with the default configuration for any profile type.
    fn default() -> Self {
        Self::from_config(StoreConfig::default())
    }
}

impl<U: Profile> SessionStore<U> {
    /// Create a store from a validated configuration.
    pub fn with_config(config: StoreConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::from_config(config))
    }

    fn from_config(config: StoreConfig) -> Self {
        let history = empty_history(&config);
        Self {
            config,
            state: Arc::new(SessionState::new()),
            history,
            events: VecDeque::new(),
            events_truncated: false,
        }
    }

    /// Rebuild a store around previously captured parts.
    ///
    /// The captured history and event log are re-applied under `config`, so
    /// its limits and `record_history` setting hold for the rebuilt store.
    pub(crate) fn from_parts(
        config: StoreConfig,
        state: SessionState<U>,
        history: &SessionHistory,
        events: Vec<SessionEvent<U>>,
        events_truncated: bool,
    ) -> Self {
        let mut store = Self::from_config(config);
        store.state = Arc::new(state);

        if store.config.record_history {
            store.history = history
                .transitions()
                .iter()
                .fold(store.history, |acc, transition| acc.record(transition.clone()));
        }

        store.events = events.into();
        store.events_truncated = events_truncated;
        store.trim_events();
        store
    }

    /// Run one action through the reducer.
    ///
    /// Actions without a session event leave everything untouched,
    /// including the stored `Arc`, the log and the history.
    pub fn dispatch<E>(&mut self, action: &E) -> DispatchOutcome
    where
        E: SessionAction<U> + ?Sized,
    {
        let Some(event) = action.session_event() else {
            trace!(slice = %self.config.slice_id, "action carries no session event");
            return DispatchOutcome::Ignored;
        };

        let from = self.state.phase();
        let next = reduce(SessionState::clone(&self.state), event);
        let to = next.phase();
        let changed = next != *self.state;

        if self.config.record_history {
            self.history = self.history.record(PhaseTransition {
                from,
                to,
                event: event.kind(),
                timestamp: Utc::now(),
            });
        }
        self.log_event(event.clone());

        debug!(
            slice = %self.config.slice_id,
            event = %event.kind(),
            from = from.as_str(),
            to = to.as_str(),
            changed,
            "dispatched session event"
        );

        if changed {
            self.state = Arc::new(next);
            DispatchOutcome::Changed
        } else {
            DispatchOutcome::Unchanged
        }
    }

    fn log_event(&mut self, event: SessionEvent<U>) {
        self.events.push_back(event);
        self.trim_events();
    }

    fn trim_events(&mut self) {
        let Some(limit) = self.config.event_log_limit else {
            return;
        };
        if self.events.len() > limit {
            if !self.events_truncated {
                warn!(
                    slice = %self.config.slice_id,
                    limit,
                    "event log limit reached; oldest events are being dropped"
                );
            }
            let excess = self.events.len() - limit;
            self.events.drain(..excess);
            self.events_truncated = true;
        }
    }

    /// Go back to the default state and forget the log and history.
    pub fn reset(&mut self) {
        debug!(slice = %self.config.slice_id, "resetting session store");
        self.state = Arc::new(SessionState::new());
        self.history = empty_history(&self.config);
        self.events.clear();
        self.events_truncated = false;
    }

    /// Current state. Compare with `Arc::ptr_eq` to detect changes cheaply.
    pub fn state(&self) -> &Arc<SessionState<U>> {
        &self.state
    }

    /// Owned copy of the current state.
    pub fn snapshot(&self) -> SessionState<U> {
        SessionState::clone(&self.state)
    }

    pub fn is_fetching(&self) -> bool {
        self.state.is_fetching()
    }

    pub fn user(&self) -> Option<&U> {
        self.state.user()
    }

    pub fn history(&self) -> &SessionHistory {
        &self.history
    }

    /// Retained session events, oldest first.
    pub fn events(&self) -> impl Iterator<Item = &SessionEvent<U>> {
        self.events.iter()
    }

    /// True once the event log limit has dropped at least one event.
    pub fn events_truncated(&self) -> bool {
        self.events_truncated
    }

    pub fn slice_id(&self) -> &str {
        &self.config.slice_id
    }

    pub fn config(&self) -> &StoreConfig {
        &self.config
    }
}

fn empty_history(config: &StoreConfig) -> SessionHistory {
    match config.history_limit {
        Some(limit) => SessionHistory::with_limit(limit),
        None => SessionHistory::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{EventKind, SessionPhase};
    use serde_json::json;

    enum AppAction {
        Session(SessionEvent),
        OpenMenu,
    }

    impl SessionAction for AppAction {
        fn session_event(&self) -> Option<&SessionEvent> {
            match self {
                Self::Session(event) => Some(event),
                Self::OpenMenu => None,
            }
        }
    }

    #[test]
    fn new_store_starts_without_session() {
        let store = SessionStore::new();
        assert!(!store.is_fetching());
        assert!(store.user().is_none());
        assert_eq!(store.slice_id(), "user");
        assert!(store.history().is_empty());
        assert_eq!(store.events().count(), 0);
    }

    #[test]
    fn fetch_flow_updates_state() {
        let mut store = SessionStore::new();

        assert_eq!(
            store.dispatch(&SessionEvent::RequestProfile),
            DispatchOutcome::Changed
        );
        assert!(store.is_fetching());

        assert_eq!(
            store.dispatch(&SessionEvent::RequestProfileSucceeded(json!({"id": "u1"}))),
            DispatchOutcome::Changed
        );
        assert_eq!(store.user(), Some(&json!({"id": "u1"})));
        assert_eq!(store.state().phase(), SessionPhase::Authenticated);
    }

    #[test]
    fn ignored_action_keeps_same_arc() {
        let mut store = SessionStore::new();
        store.dispatch(&SessionEvent::RequestProfile);
        let before = Arc::clone(store.state());

        let outcome = store.dispatch(&AppAction::OpenMenu);

        assert_eq!(outcome, DispatchOutcome::Ignored);
        assert!(Arc::ptr_eq(&before, store.state()));
        assert_eq!(store.events().count(), 1);
        assert_eq!(store.history().len(), 1);
    }

    #[test]
    fn host_actions_are_routed() {
        let mut store = SessionStore::new();
        let outcome = store.dispatch(&AppAction::Session(SessionEvent::RequestProfile));
        assert!(outcome.is_changed());
        assert!(store.is_fetching());
    }

    #[test]
    fn logout_requested_while_authenticated_is_unchanged() {
        let mut store = SessionStore::new();
        store.dispatch(&SessionEvent::RequestProfileSucceeded(json!({"id": "u1"})));
        let before = Arc::clone(store.state());

        let outcome = store.dispatch(&SessionEvent::LogoutRequested);

        assert_eq!(outcome, DispatchOutcome::Unchanged);
        assert!(Arc::ptr_eq(&before, store.state()));
        assert_eq!(store.user(), Some(&json!({"id": "u1"})));

        let last = store.history().last().unwrap();
        assert_eq!(last.event, EventKind::LogoutRequested);
        assert!(!last.changed_phase());
    }

    #[test]
    fn logout_succeeded_clears_user() {
        let mut store = SessionStore::new();
        store.dispatch(&SessionEvent::RequestProfileSucceeded(json!({"id": "u1"})));
        store.dispatch(&SessionEvent::LogoutSucceeded);
        assert!(store.user().is_none());
        assert_eq!(
            store.dispatch(&SessionEvent::LogoutSucceeded),
            DispatchOutcome::Unchanged
        );
    }

    #[test]
    fn history_can_be_disabled() {
        let config = StoreConfig {
            record_history: false,
            ..StoreConfig::default()
        };
        let mut store: SessionStore = SessionStore::with_config(config).unwrap();
        store.dispatch(&SessionEvent::RequestProfile);
        assert!(store.history().is_empty());
        assert_eq!(store.events().count(), 1);
    }

    #[test]
    fn event_log_is_capped() {
        let config = StoreConfig {
            event_log_limit: Some(2),
            ..StoreConfig::default()
        };
        let mut store: SessionStore = SessionStore::with_config(config).unwrap();
        store.dispatch(&SessionEvent::RequestProfile);
        assert!(!store.events_truncated());
        store.dispatch(&SessionEvent::RequestProfileFailed);
        store.dispatch(&SessionEvent::RequestProfile);

        let kinds: Vec<EventKind> = store.events().map(SessionEvent::kind).collect();
        assert_eq!(
            kinds,
            vec![EventKind::RequestProfileFailed, EventKind::RequestProfile]
        );
        assert!(store.events_truncated());
    }

    #[test]
    fn history_is_capped_by_config() {
        let config = StoreConfig {
            history_limit: Some(1),
            ..StoreConfig::default()
        };
        let mut store: SessionStore = SessionStore::with_config(config).unwrap();
        store.dispatch(&SessionEvent::RequestProfile);
        store.dispatch(&SessionEvent::RequestProfileFailed);
        assert_eq!(store.history().len(), 1);
        assert_eq!(store.history().dropped(), 1);
    }

    #[test]
    fn default_store_for_typed_profile() {
        let store: SessionStore<String> = SessionStore::default();
        assert_eq!(store.config(), &StoreConfig::default());
        assert_eq!(store.snapshot(), SessionState::new());
    }

    #[test]
    fn invalid_config_is_rejected() {
        let config = StoreConfig {
            slice_id: String::new(),
            ..StoreConfig::default()
        };
        let result: Result<SessionStore, _> = SessionStore::with_config(config);
        assert_eq!(result.unwrap_err(), ConfigError::EmptySliceId);
    }

    #[test]
    fn reset_returns_to_default() {
        let mut store = SessionStore::new();
        store.dispatch(&SessionEvent::RequestProfileSucceeded(json!({"id": "u1"})));
        store.reset();

        assert_eq!(store.snapshot(), SessionState::new());
        assert!(store.history().is_empty());
        assert_eq!(store.events().count(), 0);
    }

    #[test]
    fn store_works_with_typed_profiles() {
        #[derive(Clone, PartialEq, Debug, serde::Serialize, serde::Deserialize)]
        struct Account {
            id: String,
        }

        let mut store: SessionStore<Account> = SessionStore::default();
        store.dispatch(&SessionEvent::RequestProfileSucceeded(Account {
            id: "u1".to_string(),
        }));
        assert_eq!(store.user().map(|a| a.id.as_str()), Some("u1"));
    }
}
