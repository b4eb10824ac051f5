//! Authentication-gated navigation decisions.
//!
//! The guard intercepts every navigation intent and decides, from a fresh
//! session snapshot, whether the destination is reachable. It never evicts a
//! rendered screen; a session change is reflected on the next intent.

use std::sync::Arc;

use super::session::SessionStore;

/// Client-side destinations the shell can navigate to.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Destination {
    /// Provider sign-in screen; the only destination reachable signed out.
    SignIn,
    /// Tabbed home shell, the default authenticated destination.
    Home,
    /// Help-request creation screen.
    NewHelpRequest,
    /// Help-request detail screen for a server-minted identifier.
    HelpRequestDetail {
        /// Identifier of the help request being viewed.
        id: String,
    },
    /// Question creation screen.
    NewQuestion,
    /// Content creation screen.
    NewContent,
    /// Project creation screen.
    NewProject,
    /// Event creation screen.
    NewEvent,
}

impl Destination {
    /// Route path rendered by the navigation shell.
    ///
    /// # Examples
    /// ```
    /// use client::domain::navigation::Destination;
    ///
    /// assert_eq!(Destination::SignIn.path(), "/signin");
    /// let detail = Destination::HelpRequestDetail { id: "abc123".into() };
    /// assert_eq!(detail.path(), "/rfh/abc123");
    /// ```
    #[must_use]
    pub fn path(&self) -> String {
        match self {
            Self::SignIn => "/signin".to_owned(),
            Self::Home => "/".to_owned(),
            Self::NewHelpRequest => "/rfh/new".to_owned(),
            Self::HelpRequestDetail { id } => format!("/rfh/{id}"),
            Self::NewQuestion => "/qa/new".to_owned(),
            Self::NewContent => "/content/new".to_owned(),
            Self::NewProject => "/projects/new".to_owned(),
            Self::NewEvent => "/events/new".to_owned(),
        }
    }

    /// Whether this destination is the sign-in screen.
    #[must_use]
    pub const fn is_sign_in(&self) -> bool {
        matches!(self, Self::SignIn)
    }

    /// Destination used when redirecting an authenticated user away from
    /// the sign-in screen.
    #[must_use]
    pub const fn default_authenticated() -> Self {
        Self::Home
    }
}

/// Outcome of gating one navigation intent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavigationDecision {
    /// The intent proceeds to its original destination unchanged.
    Allow,
    /// The intent is cancelled and replaced with the contained destination.
    Redirect(Destination),
}

/// Pure decision rule over (authentication state, destination).
///
/// Unauthenticated intents anywhere but sign-in redirect to sign-in;
/// authenticated intents to sign-in redirect to the default destination;
/// everything else is allowed unchanged.
#[must_use]
pub fn decide(authenticated: bool, destination: &Destination) -> NavigationDecision {
    if !authenticated && !destination.is_sign_in() {
        return NavigationDecision::Redirect(Destination::SignIn);
    }
    if authenticated && destination.is_sign_in() {
        return NavigationDecision::Redirect(Destination::default_authenticated());
    }
    NavigationDecision::Allow
}

/// Per-navigation gate consulting the session store.
///
/// The store is consulted afresh for every intent; nothing is cached, so a
/// sign-out mid-screen is honoured on the very next navigation attempt.
#[derive(Clone)]
pub struct NavigationGuard {
    sessions: Arc<SessionStore>,
}

impl NavigationGuard {
    /// Build a guard over the shared session store.
    #[must_use]
    pub fn new(sessions: Arc<SessionStore>) -> Self {
        Self { sessions }
    }

    /// Gate one navigation intent against the current session snapshot.
    #[must_use]
    pub fn resolve(&self, destination: &Destination) -> NavigationDecision {
        decide(self.sessions.current().is_some(), destination)
    }
}
