//! Session-gated access layer for the BenefiSocial backend API.
//!
//! The crate couples an authentication-state-driven navigation guard with a
//! resource client that turns logical operations ("list help requests tagged
//! mentoring", "enrol in an event") into authenticated network calls and
//! typed results. Rendering, form handling, and the server side of every
//! endpoint are external collaborators reached through the interfaces in
//! [`domain`] and [`outbound`].

pub mod domain;
pub mod outbound;

pub use domain::{ApiError, ApiErrorKind, ApiResult};
pub use outbound::api::ResourceClient;
