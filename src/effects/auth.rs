//! Profile fetch and logout effects.

use super::error::AuthError;
use crate::core::{Profile, SessionEvent};
use crate::store::{DispatchOutcome, SessionStore};
use stillwater::effect::BoxedEffect;
use stillwater::prelude::*;
use tracing::{debug, warn};

/// The auth service the shell calls into.
///
/// Implementations own the network I/O and the shape of the profile.
pub trait AuthService: Clone + Send + Sync + 'static {
    type Profile: Profile;

    fn fetch_profile(&self) -> Result<Self::Profile, AuthError>;

    fn logout(&self) -> Result<(), AuthError>;
}

/// Fetch the current user's profile.
///
/// The effect never fails: a service error is absorbed here and becomes
/// `RequestProfileFailed`.
pub fn fetch_profile<Env>() -> BoxedEffect<SessionEvent<Env::Profile>, AuthError, Env>
where
    Env: AuthService,
{
    from_fn(|env: &Env| match env.fetch_profile() {
        Ok(profile) => Ok::<_, AuthError>(SessionEvent::RequestProfileSucceeded(profile)),
        Err(error) => {
            warn!(%error, "profile fetch failed");
            Ok(SessionEvent::RequestProfileFailed)
        }
    })
    .boxed()
}

/// Ask the service to end the session.
///
/// Succeeds with `LogoutSucceeded`; a service error fails the effect and
/// raises no event.
pub fn logout<Env>() -> BoxedEffect<SessionEvent<Env::Profile>, AuthError, Env>
where
    Env: AuthService,
{
    from_fn(|env: &Env| env.logout().map(|()| SessionEvent::LogoutSucceeded)).boxed()
}

impl<U: Profile> SessionStore<U> {
    /// Raise `RequestProfile`, run the fetch, and raise its outcome.
    ///
    /// Returns the outcome of the final dispatch.
    pub async fn run_profile_fetch<Env>(&mut self, env: &Env) -> DispatchOutcome
    where
        Env: AuthService<Profile = U>,
    {
        self.dispatch(&SessionEvent::RequestProfile);

        let event = match fetch_profile::<Env>().run(env).await {
            Ok(event) => event,
            Err(error) => {
                warn!(%error, "profile fetch effect failed");
                SessionEvent::RequestProfileFailed
            }
        };
        self.dispatch(&event)
    }

    /// Raise `LogoutRequested`, run the logout, and raise `LogoutSucceeded`
    /// when the service confirms it.
    ///
    /// On failure the profile stays in place, as `LogoutRequested` left it.
    pub async fn run_logout<Env>(&mut self, env: &Env) -> Result<DispatchOutcome, AuthError>
    where
        Env: AuthService<Profile = U>,
    {
        self.dispatch(&SessionEvent::LogoutRequested);

        match logout::<Env>().run(env).await {
            Ok(event) => Ok(self.dispatch(&event)),
            Err(error) => {
                debug!(%error, "logout was not confirmed");
                Err(error)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{EventKind, SessionPhase};
    use serde_json::{json, Value};

    #[derive(Clone)]
    struct FakeAuth {
        profile: Result<Value, AuthError>,
        logout: Result<(), AuthError>,
    }

    impl FakeAuth {
        fn signed_in() -> Self {
            Self {
                profile: Ok(json!({"id": "u1"})),
                logout: Ok(()),
            }
        }

        fn offline() -> Self {
            Self {
                profile: Err(AuthError::Network("connection refused".to_string())),
                logout: Err(AuthError::Network("connection refused".to_string())),
            }
        }
    }

    impl AuthService for FakeAuth {
        type Profile = Value;

        fn fetch_profile(&self) -> Result<Value, AuthError> {
            self.profile.clone()
        }

        fn logout(&self) -> Result<(), AuthError> {
            self.logout.clone()
        }
    }

    #[tokio::test]
    async fn fetch_profile_yields_success_event() {
        let event = fetch_profile::<FakeAuth>()
            .run(&FakeAuth::signed_in())
            .await
            .unwrap();
        assert_eq!(event, SessionEvent::RequestProfileSucceeded(json!({"id": "u1"})));
    }

    #[tokio::test]
    async fn fetch_profile_absorbs_service_errors() {
        let event = fetch_profile::<FakeAuth>()
            .run(&FakeAuth::offline())
            .await
            .unwrap();
        assert_eq!(event, SessionEvent::RequestProfileFailed);
    }

    #[tokio::test]
    async fn logout_effect_fails_with_service_error() {
        let result = logout::<FakeAuth>().run(&FakeAuth::offline()).await;
        assert!(matches!(result, Err(AuthError::Network(_))));
    }

    #[tokio::test]
    async fn store_fetch_authenticates() {
        let mut store = SessionStore::new();
        let outcome = store.run_profile_fetch(&FakeAuth::signed_in()).await;

        assert_eq!(outcome, DispatchOutcome::Changed);
        assert_eq!(store.user(), Some(&json!({"id": "u1"})));
        assert_eq!(
            store.history().get_path(),
            vec![
                SessionPhase::NoSession,
                SessionPhase::FetchingProfile,
                SessionPhase::Authenticated,
            ]
        );
    }

    #[tokio::test]
    async fn store_fetch_failure_leaves_no_session() {
        let mut store = SessionStore::new();
        store.run_profile_fetch(&FakeAuth::offline()).await;

        assert!(!store.is_fetching());
        assert!(store.user().is_none());
        assert_eq!(
            store.history().last().map(|t| t.event),
            Some(EventKind::RequestProfileFailed)
        );
    }

    #[tokio::test]
    async fn store_logout_clears_user() {
        let auth = FakeAuth::signed_in();
        let mut store = SessionStore::new();
        store.run_profile_fetch(&auth).await;

        let outcome = store.run_logout(&auth).await.unwrap();

        assert_eq!(outcome, DispatchOutcome::Changed);
        assert!(store.user().is_none());
    }

    #[tokio::test]
    async fn failed_logout_keeps_user() {
        let mut store = SessionStore::new();
        store.run_profile_fetch(&FakeAuth::signed_in()).await;

        let result = store.run_logout(&FakeAuth::offline()).await;

        assert!(result.is_err());
        assert_eq!(store.user(), Some(&json!({"id": "u1"})));
        assert_eq!(
            store.events().last().map(SessionEvent::kind),
            Some(EventKind::LogoutRequested)
        );
    }
}
