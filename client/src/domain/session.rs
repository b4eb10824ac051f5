//! Authentication session state and its single owned store.
//!
//! The session is the only mutable shared state in the access layer. It is
//! held by [`SessionStore`], mutated solely through sign-in/sign-out events
//! relayed from the external identity provider, and read as an immutable
//! snapshot by the resource client and the navigation guard.

use std::sync::{Mutex, MutexGuard};

use chrono::{DateTime, Utc};
use thiserror::Error;
use zeroize::Zeroizing;

/// Validation errors returned by [`Session::try_from_parts`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionValidationError {
    /// Access token was empty.
    #[error("access token must not be empty")]
    EmptyAccessToken,
    /// User identifier was missing or blank once trimmed.
    #[error("user id must not be empty")]
    EmptyUserId,
}

/// Authenticated identity plus its bearer token.
///
/// ## Invariants
/// - A session is either fully populated or wholly absent; no partial state
///   is observable. Construction goes through [`Session::try_from_parts`].
/// - `user_id` is trimmed and non-empty. The token is kept verbatim (no
///   trimming) to avoid surprising credential comparisons.
///
/// # Examples
/// ```
/// use client::domain::Session;
///
/// let session = Session::try_from_parts("tok-123", "user-1", None).unwrap();
/// assert_eq!(session.user_id(), "user-1");
/// assert_eq!(session.access_token(), "tok-123");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    access_token: Zeroizing<String>,
    user_id: String,
    expires_at: Option<DateTime<Utc>>,
}

impl Session {
    /// Construct a session from the identity provider's raw values.
    ///
    /// # Errors
    ///
    /// Returns [`SessionValidationError`] when the token is empty or the user
    /// id is blank once trimmed.
    pub fn try_from_parts(
        access_token: &str,
        user_id: &str,
        expires_at: Option<DateTime<Utc>>,
    ) -> Result<Self, SessionValidationError> {
        if access_token.is_empty() {
            return Err(SessionValidationError::EmptyAccessToken);
        }

        let normalized = user_id.trim();
        if normalized.is_empty() {
            return Err(SessionValidationError::EmptyUserId);
        }

        Ok(Self {
            access_token: Zeroizing::new(access_token.to_owned()),
            user_id: normalized.to_owned(),
            expires_at,
        })
    }

    /// Bearer token presented to the backend API.
    #[must_use]
    pub fn access_token(&self) -> &str {
        self.access_token.as_str()
    }

    /// Identifier of the authenticated user.
    #[must_use]
    pub fn user_id(&self) -> &str {
        self.user_id.as_str()
    }

    /// Expiry instant reported by the identity provider, when known.
    #[must_use]
    pub const fn expires_at(&self) -> Option<DateTime<Utc>> {
        self.expires_at
    }
}

type Listener = std::sync::Arc<dyn Fn(Option<&Session>) + Send + Sync>;

/// Single source of truth for "am I authenticated, and with what token".
///
/// ## Invariants
/// - Listener delivery for one transition completes before the next
///   transition is processed.
/// - Listeners are invoked in registration order; callers must not rely on
///   that order.
/// - The store performs no I/O; it only relays transitions it is handed.
///
/// # Examples
/// ```
/// use client::domain::SessionStore;
///
/// let store = SessionStore::new();
/// assert!(store.current().is_none());
/// ```
#[derive(Default)]
pub struct SessionStore {
    session: Mutex<Option<Session>>,
    listeners: Mutex<Vec<Listener>>,
    // Serialises state change plus listener delivery per transition.
    transitions: Mutex<()>,
}

fn lock_or_recover<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    match mutex.lock() {
        Ok(guard) => guard,
        Err(poisoned) => poisoned.into_inner(),
    }
}

impl SessionStore {
    /// Create an empty store; unauthenticated is a state, not an error.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Synchronous snapshot of the current session.
    #[must_use]
    pub fn current(&self) -> Option<Session> {
        lock_or_recover(&self.session).clone()
    }

    /// Register a callback invoked on every session transition.
    ///
    /// The callback receives the post-transition snapshot: `Some` after a
    /// sign-in or token refresh, `None` after a sign-out.
    pub fn on_change(&self, listener: impl Fn(Option<&Session>) + Send + Sync + 'static) {
        lock_or_recover(&self.listeners).push(std::sync::Arc::new(listener));
    }

    /// Replace the session and notify every listener before returning.
    ///
    /// Session mutation is attributed to a single external authority (the
    /// identity provider, via [`crate::domain::AuthFlow`]); concurrent
    /// transitions are not expected, but delivery is serialised regardless.
    pub(crate) fn transition(&self, next: Option<Session>) {
        let serialised = lock_or_recover(&self.transitions);
        {
            let mut current = lock_or_recover(&self.session);
            *current = next.clone();
        }
        let listeners = lock_or_recover(&self.listeners).clone();
        for listener in &listeners {
            listener(next.as_ref());
        }
        drop(serialised);
    }
}
