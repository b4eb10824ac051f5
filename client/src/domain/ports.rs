//! Domain ports defining the edges of the access layer.
//!
//! Ports describe how the domain expects to interact with external
//! collaborators. The only driven collaborator with behaviour of its own is
//! the identity provider; it owns session issuance and revocation, and the
//! access layer merely consumes the session object it hands back.

use async_trait::async_trait;
use thiserror::Error;

use super::session::Session;

/// Identity providers supported by the sign-in screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProviderSelector {
    /// OAuth sign-in via GitHub.
    GitHub,
    /// OAuth sign-in via Google.
    Google,
}

/// Errors surfaced by identity provider adapters.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IdentityError {
    /// The provider could not be reached or failed mid-flow.
    #[error("identity provider unavailable: {message}")]
    Unavailable {
        /// Adapter-supplied description of the outage.
        message: String,
    },
    /// The provider refused the sign-in or sign-out attempt.
    #[error("identity provider rejected the request: {message}")]
    Rejected {
        /// Adapter-supplied description of the refusal.
        message: String,
    },
}

impl IdentityError {
    /// Helper for provider outages.
    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::Unavailable {
            message: message.into(),
        }
    }

    /// Helper for refused attempts.
    pub fn rejected(message: impl Into<String>) -> Self {
        Self::Rejected {
            message: message.into(),
        }
    }
}

/// Port for the external identity provider.
///
/// Implementations wrap whichever vendor SDK performs the OAuth dance. The
/// access layer never inspects provider internals; it only consumes the
/// [`Session`] returned on success.
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// Run the interactive sign-in flow for the selected provider.
    ///
    /// # Errors
    ///
    /// Returns [`IdentityError`] when the provider is unreachable or refuses
    /// the attempt.
    async fn sign_in(&self, selector: ProviderSelector) -> Result<Session, IdentityError>;

    /// Revoke the current session with the provider.
    ///
    /// # Errors
    ///
    /// Returns [`IdentityError`] when revocation cannot be confirmed.
    async fn sign_out(&self) -> Result<(), IdentityError>;
}
