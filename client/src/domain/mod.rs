//! Domain primitives and state logic for the access layer.
//!
//! Purpose: hold the authentication session, the navigation decision rules,
//! the opaque resource records, and the failure taxonomy. Everything here is
//! transport agnostic; the outbound adapters translate these types to and
//! from the wire.
//!
//! Public surface:
//! - `Session` / `SessionStore` — authenticated identity and its single
//!   owned store with change notification.
//! - `AuthFlow` — bridges the external identity provider into the store.
//! - `NavigationGuard` — per-navigation allow/redirect decisions.
//! - `ResourceRecord` / `MatchResult` — opaque server records and the
//!   helper-ranking pairs.
//! - `ApiError` / `ApiErrorKind` / `ApiResult` — normalised failure taxonomy.

pub mod error;
pub mod identity;
pub mod navigation;
pub mod ports;
pub mod record;
pub mod session;

pub use self::error::{ApiError, ApiErrorKind, ApiResult};
pub use self::identity::AuthFlow;
pub use self::navigation::{Destination, NavigationDecision, NavigationGuard};
pub use self::ports::{IdentityError, IdentityProvider, ProviderSelector};
pub use self::record::{MatchResult, ResourceRecord};
pub use self::session::{Session, SessionStore, SessionValidationError};
