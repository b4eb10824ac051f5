//! Failure taxonomy for resource operations.
//!
//! Every transport or server fault is normalised into an [`ApiError`] at the
//! resource-client boundary. Callers either inspect the rich form
//! ([`ApiResult`]) or collapse it to the derived optional/boolean view via
//! [`Result::ok`] / [`Result::is_ok`] when the distinction does not matter.

use std::fmt;

use thiserror::Error;

/// Stable category describing why a resource operation failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum ApiErrorKind {
    /// Request was sent without a valid token, or the server rejected it.
    Unauthorized,
    /// The requested identifier does not exist server-side.
    NotFound,
    /// The server refused a create or update due to malformed input.
    ValidationRejected,
    /// Server-side fault, transport failure, or malformed required JSON.
    ServerError,
}

impl ApiErrorKind {
    /// Stable snake_case label used in log fields and error messages.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Unauthorized => "unauthorized",
            Self::NotFound => "not_found",
            Self::ValidationRejected => "validation_rejected",
            Self::ServerError => "server_error",
        }
    }
}

impl fmt::Display for ApiErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Normalised failure returned by resource operations.
///
/// ## Invariants
/// - Only produced after the transport has definitively resolved; the client
///   never reports a failure speculatively.
///
/// # Examples
/// ```
/// use client::domain::{ApiError, ApiErrorKind};
///
/// let err = ApiError::not_found("help request missing-id does not exist");
/// assert_eq!(err.kind(), ApiErrorKind::NotFound);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{kind}: {detail}")]
pub struct ApiError {
    kind: ApiErrorKind,
    detail: String,
}

impl ApiError {
    /// Construct an error from an explicit kind and detail message.
    #[must_use]
    pub fn new(kind: ApiErrorKind, detail: impl Into<String>) -> Self {
        Self {
            kind,
            detail: detail.into(),
        }
    }

    /// Classify an HTTP status code into the failure taxonomy.
    ///
    /// 401/403-class responses map to [`ApiErrorKind::Unauthorized`], 404 to
    /// [`ApiErrorKind::NotFound`], remaining 4xx to
    /// [`ApiErrorKind::ValidationRejected`], and everything else (5xx and
    /// out-of-range codes) to [`ApiErrorKind::ServerError`].
    #[must_use]
    pub fn from_status(status: u16, detail: impl Into<String>) -> Self {
        let kind = match status {
            401 | 403 => ApiErrorKind::Unauthorized,
            404 => ApiErrorKind::NotFound,
            400..=499 => ApiErrorKind::ValidationRejected,
            _ => ApiErrorKind::ServerError,
        };
        Self::new(kind, detail)
    }

    /// Helper for [`ApiErrorKind::Unauthorized`] failures.
    #[must_use]
    pub fn unauthorized(detail: impl Into<String>) -> Self {
        Self::new(ApiErrorKind::Unauthorized, detail)
    }

    /// Helper for [`ApiErrorKind::NotFound`] failures.
    #[must_use]
    pub fn not_found(detail: impl Into<String>) -> Self {
        Self::new(ApiErrorKind::NotFound, detail)
    }

    /// Helper for [`ApiErrorKind::ValidationRejected`] failures.
    #[must_use]
    pub fn validation_rejected(detail: impl Into<String>) -> Self {
        Self::new(ApiErrorKind::ValidationRejected, detail)
    }

    /// Helper for [`ApiErrorKind::ServerError`] failures.
    #[must_use]
    pub fn server_error(detail: impl Into<String>) -> Self {
        Self::new(ApiErrorKind::ServerError, detail)
    }

    /// Stable machine-readable failure category.
    #[must_use]
    pub const fn kind(&self) -> ApiErrorKind {
        self.kind
    }

    /// Human-readable detail describing the failure.
    #[must_use]
    pub fn detail(&self) -> &str {
        self.detail.as_str()
    }
}

/// Convenient result alias for resource operations.
///
/// # Examples
/// ```
/// use client::domain::{ApiError, ApiResult};
///
/// fn fetch() -> ApiResult<String> {
///     Err(ApiError::not_found("nothing here"))
/// }
///
/// assert!(fetch().ok().is_none());
/// ```
pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    //! Regression coverage for status classification and error formatting.

    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(401, ApiErrorKind::Unauthorized)]
    #[case(403, ApiErrorKind::Unauthorized)]
    #[case(404, ApiErrorKind::NotFound)]
    #[case(400, ApiErrorKind::ValidationRejected)]
    #[case(409, ApiErrorKind::ValidationRejected)]
    #[case(422, ApiErrorKind::ValidationRejected)]
    #[case(500, ApiErrorKind::ServerError)]
    #[case(502, ApiErrorKind::ServerError)]
    #[case(599, ApiErrorKind::ServerError)]
    fn statuses_map_to_expected_kinds(#[case] status: u16, #[case] expected: ApiErrorKind) {
        let error = ApiError::from_status(status, "status mapping");
        assert_eq!(error.kind(), expected);
    }

    #[rstest]
    fn display_includes_kind_and_detail() {
        let error = ApiError::server_error("connection refused");
        assert_eq!(error.to_string(), "server_error: connection refused");
    }

    #[rstest]
    fn helpers_preserve_detail() {
        let error = ApiError::validation_rejected("title required");
        assert_eq!(error.detail(), "title required");
        assert_eq!(error.kind().as_str(), "validation_rejected");
    }
}
