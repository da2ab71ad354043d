//! Session phase history tracking.
//!
//! Provides immutable tracking of phase transitions over time. Recording
//! returns a new history and leaves the old one untouched.

use super::event::EventKind;
use super::state::SessionPhase;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Record of a single dispatched session event.
///
/// `from` and `to` may be equal: `LogoutRequested` from `Authenticated`
/// is recorded even though the phase does not move.
///
/// # Example
///
/// ```rust
/// use session_state::core::{EventKind, PhaseTransition, SessionPhase};
/// use chrono::Utc;
///
/// let transition = PhaseTransition {
///     from: SessionPhase::NoSession,
///     to: SessionPhase::FetchingProfile,
///     event: EventKind::RequestProfile,
///     timestamp: Utc::now(),
/// };
/// assert!(transition.changed_phase());
/// ```
#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
pub struct PhaseTransition {
    /// The phase before the event
    pub from: SessionPhase,
    /// The phase after the event
    pub to: SessionPhase,
    /// The event that was reduced
    pub event: EventKind,
    /// When the event was dispatched
    pub timestamp: DateTime<Utc>,
}

impl PhaseTransition {
    pub fn changed_phase(&self) -> bool {
        self.from != self.to
    }
}

/// Ordered history of phase transitions.
///
/// History is immutable - `record` returns a new history with the
/// transition added. An optional limit keeps only the most recent
/// transitions.
///
/// # Example
///
/// ```rust
/// use session_state::core::{EventKind, PhaseTransition, SessionHistory, SessionPhase};
/// use chrono::Utc;
///
/// let history = SessionHistory::new();
/// let history = history.record(PhaseTransition {
///     from: SessionPhase::NoSession,
///     to: SessionPhase::FetchingProfile,
///     event: EventKind::RequestProfile,
///     timestamp: Utc::now(),
/// });
/// let history = history.record(PhaseTransition {
///     from: SessionPhase::FetchingProfile,
///     to: SessionPhase::Authenticated,
///     event: EventKind::RequestProfileSucceeded,
///     timestamp: Utc::now(),
/// });
///
/// assert_eq!(
///     history.get_path(),
///     vec![
///         SessionPhase::NoSession,
///         SessionPhase::FetchingProfile,
///         SessionPhase::Authenticated,
///     ]
/// );
/// ```
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct SessionHistory {
    transitions: Vec<PhaseTransition>,
    limit: Option<usize>,
    dropped: usize,
}

impl SessionHistory {
    /// Create a new, unbounded history.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a history that keeps at most `limit` transitions.
    pub fn with_limit(limit: usize) -> Self {
        Self {
            limit: Some(limit),
            ..Self::default()
        }
    }

    /// Record a transition, returning a new history.
    ///
    /// When the limit is exceeded the oldest transitions are dropped.
    pub fn record(&self, transition: PhaseTransition) -> Self {
        let mut transitions = self.transitions.clone();
        transitions.push(transition);

        let mut dropped = self.dropped;
        if let Some(limit) = self.limit {
            let excess = transitions.len().saturating_sub(limit);
            transitions.drain(..excess);
            dropped += excess;
        }

        Self {
            transitions,
            limit: self.limit,
            dropped,
        }
    }

    /// Get the path of phases traversed.
    ///
    /// Returns the `from` phase of the first retained transition, then the
    /// `to` phase of each transition.
    pub fn get_path(&self) -> Vec<SessionPhase> {
        let mut path = Vec::with_capacity(self.transitions.len() + 1);
        if let Some(first) = self.transitions.first() {
            path.push(first.from);
        }
        path.extend(self.transitions.iter().map(|t| t.to));
        path
    }

    /// Duration between the first and last retained transition.
    ///
    /// Returns `None` if there are no transitions.
    pub fn duration(&self) -> Option<Duration> {
        let (first, last) = (self.transitions.first()?, self.transitions.last()?);
        last.timestamp
            .signed_duration_since(first.timestamp)
            .to_std()
            .ok()
    }

    pub fn transitions(&self) -> &[PhaseTransition] {
        &self.transitions
    }

    pub fn last(&self) -> Option<&PhaseTransition> {
        self.transitions.last()
    }

    pub fn len(&self) -> usize {
        self.transitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transitions.is_empty()
    }

    pub fn limit(&self) -> Option<usize> {
        self.limit
    }

    /// Number of transitions dropped because of the limit.
    pub fn dropped(&self) -> usize {
        self.dropped
    }
}
