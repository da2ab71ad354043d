//! The session state-transition function.
//!
//! `reduce` is total and pure: it never fails, never blocks and never
//! mutates its input. Unrecognised actions hand the input state straight
//! back.

use super::event::{SessionAction, SessionEvent};
use super::state::{Profile, SessionState, State};
use std::marker::PhantomData;

/// Compute the next session state from the current one and an action.
///
/// | Event                      | fetching | user      |
/// |----------------------------|----------|-----------|
/// | `RequestProfile`           | true     | absent    |
/// | `RequestProfileSucceeded`  | false    | payload   |
/// | `RequestProfileFailed`     | false    | absent    |
/// | `LogoutRequested`          | false    | unchanged |
/// | `LogoutSucceeded`          | false    | absent    |
/// | anything else              | unchanged| unchanged |
///
/// The table is applied regardless of the current phase. `LogoutRequested`
/// keeps the profile until `LogoutSucceeded` arrives.
///
/// # Example
///
/// ```rust
/// use session_state::core::{reduce, SessionEvent, SessionState};
/// use serde_json::json;
///
/// let state: SessionState = SessionState::default();
/// let state = reduce(state, &SessionEvent::RequestProfile);
/// assert!(state.is_fetching());
///
/// let state = reduce(state, &SessionEvent::RequestProfileSucceeded(json!({"id": "u1"})));
/// assert!(!state.is_fetching());
/// assert_eq!(state.user(), Some(&json!({"id": "u1"})));
/// ```
pub fn reduce<U, E>(state: SessionState<U>, action: &E) -> SessionState<U>
where
    U: Profile,
    E: SessionAction<U> + ?Sized,
{
    let Some(event) = action.session_event() else {
        return state;
    };

    match event {
        SessionEvent::RequestProfile => SessionState {
            fetching: true,
            user: None,
        },
        SessionEvent::RequestProfileSucceeded(profile) => SessionState {
            fetching: false,
            user: Some(profile.clone()),
        },
        SessionEvent::RequestProfileFailed => SessionState {
            fetching: false,
            user: None,
        },
        SessionEvent::LogoutRequested => SessionState {
            fetching: false,
            ..state
        },
        SessionEvent::LogoutSucceeded => SessionState {
            fetching: false,
            user: None,
        },
    }
}

/// Fold a historical event sequence into the state it produces.
pub fn replay<'a, U, E, I>(initial: SessionState<U>, events: I) -> SessionState<U>
where
    U: Profile,
    E: SessionAction<U> + 'a,
    I: IntoIterator<Item = &'a E>,
{
    events.into_iter().fold(initial, |state, event| reduce(state, event))
}

/// Replay an event sequence, keeping every intermediate state.
///
/// The first element is `initial`; each following element is the state
/// after the corresponding event.
pub fn replay_all<'a, U, E, I>(initial: SessionState<U>, events: I) -> Vec<SessionState<U>>
where
    U: Profile,
    E: SessionAction<U> + 'a,
    I: IntoIterator<Item = &'a E>,
{
    let mut current = initial.clone();
    let mut states = vec![initial];
    for event in events {
        current = reduce(current, event);
        states.push(current.clone());
    }
    states
}

/// A state slice the host dispatch loop can register.
///
/// The loop keeps slices apart by `ID` and asks for `initial` when it has
/// no prior state for the slice.
pub trait Reducer {
    type State: State;
    type Event;

    /// Stable identifier of the slice this reducer owns.
    const ID: &'static str;

    fn initial() -> Self::State;

    fn reduce(state: Self::State, event: &Self::Event) -> Self::State;
}

/// The session slice, registered as `"user"`.
pub struct SessionReducer<U: Profile = serde_json::Value>(PhantomData<U>);

impl<U: Profile> Reducer for SessionReducer<U> {
    type State = SessionState<U>;
    type Event = SessionEvent<U>;

    const ID: &'static str = "user";

    fn initial() -> Self::State {
        SessionState::new()
    }

    fn reduce(state: Self::State, event: &Self::Event) -> Self::State {
        reduce(state, event)
    }
}
