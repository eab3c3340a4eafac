use crate::error_code::ServiceErrorKind;
use reqwest::header::HeaderMap;
use thiserror::Error;

/// Structured error context for better error handling and debugging.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorContext {
    /// Field path or configuration key that caused the error (e.g., "credentials.password", "path_parameters[1]")
    pub field_path: Option<String>,
    /// Additional context about the error (e.g., expected shape, offending value)
    pub details: Option<String>,
    /// Source of the error (e.g., "credential_store", "request_builder")
    pub source: Option<String>,
}

impl ErrorContext {
    pub fn new() -> Self {
        Self {
            field_path: None,
            details: None,
            source: None,
        }
    }

    pub fn with_field_path(mut self, path: impl Into<String>) -> Self {
        self.field_path = Some(path.into());
        self
    }

    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }
}

impl Default for ErrorContext {
    fn default() -> Self {
        Self::new()
    }
}

/// A non-2xx answer from a service endpoint.
///
/// `code` and `message` come from the JSON error body when it has recognizable
/// fields; otherwise `message` is the raw body text.
#[derive(Debug, Clone)]
pub struct ServiceError {
    pub status: u16,
    pub code: Option<String>,
    pub message: String,
    pub body: String,
    pub headers: HeaderMap,
}

impl ServiceError {
    /// Coarse classification of the status code, for callers deciding on their own retry policy.
    pub fn kind(&self) -> ServiceErrorKind {
        ServiceErrorKind::from_http_status(self.status)
    }
}

impl std::fmt::Display for ServiceError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.code {
            Some(code) => write!(f, "HTTP {} (code {}): {}", self.status, code, self.message),
            None => write!(f, "HTTP {}: {}", self.status, self.message),
        }
    }
}

impl std::error::Error for ServiceError {}

/// Unified error type for the service core.
///
/// Every failure surfaces to the calling binding through this type; nothing is
/// swallowed or retried inside the core.
#[derive(Debug, Error)]
pub enum Error {
    #[error("Configuration error: {message}{}", format_context(.context))]
    Configuration {
        message: String,
        context: ErrorContext,
    },

    #[error("Authentication error: {message}")]
    Authentication {
        message: String,
        /// HTTP status returned by the token endpoint, when it answered at all.
        status: Option<u16>,
    },

    #[error("Invalid path: {message}{}", format_context(.context))]
    InvalidPath {
        message: String,
        context: ErrorContext,
    },

    #[error("Body encoding error: {message}{}", format_context(.context))]
    Encoding {
        message: String,
        context: ErrorContext,
    },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Network transport error: {0}")]
    Transport(#[from] crate::transport::TransportError),

    #[error("Service error: {0}")]
    Service(ServiceError),

    #[error("Decoding error (HTTP {status}): {message}")]
    Decoding { message: String, status: u16 },
}

// Helper function to format error context for display
fn format_context(ctx: &ErrorContext) -> String {
    let mut parts = Vec::new();
    if let Some(ref field) = ctx.field_path {
        parts.push(format!("field: {}", field));
    }
    if let Some(ref details) = ctx.details {
        parts.push(format!("details: {}", details));
    }
    if let Some(ref source) = ctx.source {
        parts.push(format!("source: {}", source));
    }
    if parts.is_empty() {
        String::new()
    } else {
        format!(" ({})", parts.join(", "))
    }
}

impl Error {
    pub fn configuration(msg: impl Into<String>) -> Self {
        Self::configuration_with_context(msg, ErrorContext::new())
    }

    /// Create a new configuration error with structured context
    pub fn configuration_with_context(msg: impl Into<String>, context: ErrorContext) -> Self {
        Error::Configuration {
            message: msg.into(),
            context,
        }
    }

    pub fn authentication(msg: impl Into<String>, status: Option<u16>) -> Self {
        Error::Authentication {
            message: msg.into(),
            status,
        }
    }

    /// Create a new invalid-path error with structured context
    pub fn invalid_path_with_context(msg: impl Into<String>, context: ErrorContext) -> Self {
        Error::InvalidPath {
            message: msg.into(),
            context,
        }
    }

    /// Create a new body-encoding error with structured context
    pub fn encoding_with_context(msg: impl Into<String>, context: ErrorContext) -> Self {
        Error::Encoding {
            message: msg.into(),
            context,
        }
    }

    pub fn decoding(msg: impl Into<String>, status: u16) -> Self {
        Error::Decoding {
            message: msg.into(),
            status,
        }
    }

    /// Extract error context if available
    pub fn context(&self) -> Option<&ErrorContext> {
        match self {
            Error::Configuration { context, .. }
            | Error::InvalidPath { context, .. }
            | Error::Encoding { context, .. } => Some(context),
            _ => None,
        }
    }

    /// The service error carried by a non-2xx response, if this is one.
    pub fn as_service_error(&self) -> Option<&ServiceError> {
        match self {
            Error::Service(e) => Some(e),
            _ => None,
        }
    }

    /// HTTP status associated with this error, when one exists.
    pub fn status(&self) -> Option<u16> {
        match self {
            Error::Service(e) => Some(e.status),
            Error::Decoding { status, .. } => Some(*status),
            Error::Authentication { status, .. } => *status,
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn configuration_error_displays_context() {
        let err = Error::configuration_with_context(
            "password is required",
            ErrorContext::new()
                .with_field_path("credentials.password")
                .with_source("credential_store"),
        );
        assert_eq!(
            err.to_string(),
            "Configuration error: password is required (field: credentials.password, source: credential_store)"
        );
        assert_eq!(
            err.context().and_then(|c| c.field_path.as_deref()),
            Some("credentials.password")
        );
    }

    #[test]
    fn service_error_display_includes_code_when_present() {
        let err = ServiceError {
            status: 404,
            code: Some("404".to_string()),
            message: "Model not found".to_string(),
            body: String::new(),
            headers: HeaderMap::new(),
        };
        assert_eq!(err.to_string(), "HTTP 404 (code 404): Model not found");
        assert_eq!(err.kind(), ServiceErrorKind::NotFound);

        let wrapped = Error::Service(err);
        assert_eq!(wrapped.status(), Some(404));
        assert!(wrapped.as_service_error().is_some());
    }
}
