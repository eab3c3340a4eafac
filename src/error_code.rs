//! 服务错误分类：按 HTTP 状态码对非 2xx 响应进行粗粒度归类。
//!
//! Service error classification.
//!
//! A [`ServiceError`](crate::error::ServiceError) carries the raw status code; this module
//! maps that status onto a small set of kinds so callers can write their own retry or
//! escalation policy without re-deriving the table. The core itself never retries.
//!
//! | Kind | Statuses | Retryable hint |
//! |------|----------|----------------|
//! | `BadRequest` | 400, 422 | no |
//! | `Unauthorized` | 401 | no |
//! | `Forbidden` | 403 | no |
//! | `NotFound` | 404 | no |
//! | `Conflict` | 409 | yes |
//! | `PayloadTooLarge` | 413 | no |
//! | `RateLimited` | 429 | yes |
//! | `ServerError` | 500, 502 | yes |
//! | `ServiceUnavailable` | 503 | yes |
//! | `Timeout` | 408, 504 | yes |
//! | `Other` | anything else | no |
//!
//! ## Example
//!
//! ```rust
//! use ai_service_rust::error_code::ServiceErrorKind;
//!
//! let kind = ServiceErrorKind::from_http_status(429);
//! assert_eq!(kind.name(), "rate_limited");
//! assert!(kind.retryable());
//! assert_eq!(kind.category(), "client");
//! ```

use std::fmt;

/// Coarse classification of a non-2xx service response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ServiceErrorKind {
    /// Malformed request or invalid parameters
    BadRequest,
    /// Missing, invalid, or expired credentials
    Unauthorized,
    /// Valid credentials but insufficient permissions
    Forbidden,
    /// Requested resource (model, workspace, ...) does not exist
    NotFound,
    /// State conflict (e.g., concurrent modification)
    Conflict,
    /// Payload exceeds the service limit
    PayloadTooLarge,
    /// Request rate limit exceeded
    RateLimited,
    /// Internal error on the service side
    ServerError,
    /// Service temporarily unavailable
    ServiceUnavailable,
    /// Request or gateway timed out
    Timeout,
    /// Status could not be classified
    Other,
}

impl ServiceErrorKind {
    /// Maps an HTTP status code to its kind.
    ///
    /// Statuses without a dedicated mapping return `ServiceErrorKind::Other`.
    pub fn from_http_status(status: u16) -> Self {
        match status {
            400 | 422 => Self::BadRequest,
            401 => Self::Unauthorized,
            403 => Self::Forbidden,
            404 => Self::NotFound,
            408 | 504 => Self::Timeout,
            409 => Self::Conflict,
            413 => Self::PayloadTooLarge,
            429 => Self::RateLimited,
            500 | 502 => Self::ServerError,
            503 => Self::ServiceUnavailable,
            _ => Self::Other,
        }
    }

    /// Returns the snake_case name (e.g., `"not_found"`).
    #[inline]
    pub fn name(&self) -> &'static str {
        match self {
            Self::BadRequest => "bad_request",
            Self::Unauthorized => "unauthorized",
            Self::Forbidden => "forbidden",
            Self::NotFound => "not_found",
            Self::Conflict => "conflict",
            Self::PayloadTooLarge => "payload_too_large",
            Self::RateLimited => "rate_limited",
            Self::ServerError => "server_error",
            Self::ServiceUnavailable => "service_unavailable",
            Self::Timeout => "timeout",
            Self::Other => "other",
        }
    }

    /// Whether a caller could reasonably try the same request again later.
    #[inline]
    pub fn retryable(&self) -> bool {
        matches!(
            self,
            Self::Conflict
                | Self::RateLimited
                | Self::ServerError
                | Self::ServiceUnavailable
                | Self::Timeout
        )
    }

    /// Returns the category: `"client"`, `"server"`, or `"unknown"`.
    #[inline]
    pub fn category(&self) -> &'static str {
        match self {
            Self::BadRequest
            | Self::Unauthorized
            | Self::Forbidden
            | Self::NotFound
            | Self::Conflict
            | Self::PayloadTooLarge
            | Self::RateLimited => "client",
            Self::ServerError | Self::ServiceUnavailable | Self::Timeout => "server",
            Self::Other => "unknown",
        }
    }
}

impl fmt::Display for ServiceErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_common_statuses() {
        assert_eq!(ServiceErrorKind::from_http_status(400), ServiceErrorKind::BadRequest);
        assert_eq!(ServiceErrorKind::from_http_status(401), ServiceErrorKind::Unauthorized);
        assert_eq!(ServiceErrorKind::from_http_status(404), ServiceErrorKind::NotFound);
        assert_eq!(ServiceErrorKind::from_http_status(429), ServiceErrorKind::RateLimited);
        assert_eq!(ServiceErrorKind::from_http_status(503), ServiceErrorKind::ServiceUnavailable);
        assert_eq!(ServiceErrorKind::from_http_status(504), ServiceErrorKind::Timeout);
        assert_eq!(ServiceErrorKind::from_http_status(418), ServiceErrorKind::Other);
    }

    #[test]
    fn retryable_hint_only_for_transient_kinds() {
        for status in [409u16, 429, 500, 502, 503, 504, 408] {
            assert!(
                ServiceErrorKind::from_http_status(status).retryable(),
                "status {} should be retryable",
                status
            );
        }
        for status in [400u16, 401, 403, 404, 413, 418] {
            assert!(
                !ServiceErrorKind::from_http_status(status).retryable(),
                "status {} should not be retryable",
                status
            );
        }
    }

    #[test]
    fn display_uses_name() {
        assert_eq!(ServiceErrorKind::Forbidden.to_string(), "forbidden");
        assert_eq!(ServiceErrorKind::Other.category(), "unknown");
    }
}
