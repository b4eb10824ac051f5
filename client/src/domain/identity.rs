//! Sign-in/sign-out coordination between the identity provider and the store.
//!
//! Keep provider calls outside the [`SessionStore`] so the store stays free
//! of I/O: the flow runs the provider, and only a definitive outcome is
//! relayed to the store as a transition.

use std::sync::Arc;

use super::ports::{IdentityError, IdentityProvider, ProviderSelector};
use super::session::SessionStore;

/// Bridges the external identity provider into the session store.
///
/// ## Invariants
/// - The store transitions only after the provider resolves: a failed
///   sign-in leaves the current session untouched, and a failed sign-out
///   keeps the session so the caller can retry.
#[derive(Clone)]
pub struct AuthFlow {
    provider: Arc<dyn IdentityProvider>,
    sessions: Arc<SessionStore>,
}

impl AuthFlow {
    /// Couple a provider adapter with the session store it feeds.
    #[must_use]
    pub fn new(provider: Arc<dyn IdentityProvider>, sessions: Arc<SessionStore>) -> Self {
        Self { provider, sessions }
    }

    /// Run the provider's sign-in flow and publish the resulting session.
    ///
    /// # Errors
    ///
    /// Returns [`IdentityError`] from the provider; the store is not
    /// transitioned in that case.
    pub async fn sign_in(&self, selector: ProviderSelector) -> Result<(), IdentityError> {
        let session = self.provider.sign_in(selector).await?;
        self.sessions.transition(Some(session));
        Ok(())
    }

    /// Revoke the session with the provider and clear the store.
    ///
    /// # Errors
    ///
    /// Returns [`IdentityError`] when the provider cannot confirm the
    /// revocation; the session is kept so the caller may retry.
    pub async fn sign_out(&self) -> Result<(), IdentityError> {
        self.provider.sign_out().await?;
        self.sessions.transition(None);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for provider-to-store transitions.

    use std::sync::Arc;

    use async_trait::async_trait;
    use rstest::rstest;

    use super::*;
    use crate::domain::session::Session;

    struct ScriptedProvider {
        sign_in_result: Result<Session, IdentityError>,
        sign_out_result: Result<(), IdentityError>,
    }

    #[async_trait]
    impl IdentityProvider for ScriptedProvider {
        async fn sign_in(&self, _selector: ProviderSelector) -> Result<Session, IdentityError> {
            self.sign_in_result.clone()
        }

        async fn sign_out(&self) -> Result<(), IdentityError> {
            self.sign_out_result.clone()
        }
    }

    fn flow(provider: ScriptedProvider) -> (AuthFlow, Arc<SessionStore>) {
        let sessions = Arc::new(SessionStore::new());
        let flow = AuthFlow::new(Arc::new(provider), Arc::clone(&sessions));
        (flow, sessions)
    }

    fn fixture_session() -> Session {
        Session::try_from_parts("tok-1", "user-1", None).expect("valid session parts")
    }

    #[rstest]
    #[tokio::test]
    async fn successful_sign_in_publishes_the_session() {
        let (flow, sessions) = flow(ScriptedProvider {
            sign_in_result: Ok(fixture_session()),
            sign_out_result: Ok(()),
        });

        flow.sign_in(ProviderSelector::GitHub)
            .await
            .expect("sign-in succeeds");
        let snapshot = sessions.current().expect("session published");
        assert_eq!(snapshot.user_id(), "user-1");
    }

    #[rstest]
    #[tokio::test]
    async fn failed_sign_in_leaves_the_store_untouched() {
        let (flow, sessions) = flow(ScriptedProvider {
            sign_in_result: Err(IdentityError::rejected("consent denied")),
            sign_out_result: Ok(()),
        });

        let err = flow
            .sign_in(ProviderSelector::Google)
            .await
            .expect_err("sign-in fails");
        assert_eq!(err, IdentityError::rejected("consent denied"));
        assert!(sessions.current().is_none());
    }

    #[rstest]
    #[tokio::test]
    async fn sign_out_clears_only_after_the_provider_confirms() {
        let (flow, sessions) = flow(ScriptedProvider {
            sign_in_result: Ok(fixture_session()),
            sign_out_result: Err(IdentityError::unavailable("network down")),
        });

        flow.sign_in(ProviderSelector::GitHub)
            .await
            .expect("sign-in succeeds");
        let err = flow.sign_out().await.expect_err("sign-out fails");
        assert_eq!(err, IdentityError::unavailable("network down"));
        assert!(sessions.current().is_some(), "session kept for retry");
    }

    #[rstest]
    #[tokio::test]
    async fn confirmed_sign_out_clears_the_store() {
        let (flow, sessions) = flow(ScriptedProvider {
            sign_in_result: Ok(fixture_session()),
            sign_out_result: Ok(()),
        });

        flow.sign_in(ProviderSelector::GitHub)
            .await
            .expect("sign-in succeeds");
        flow.sign_out().await.expect("sign-out succeeds");
        assert!(sessions.current().is_none());
    }
}
