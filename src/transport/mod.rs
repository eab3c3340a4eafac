//! Pluggable HTTP transport.
//!
//! The service core never talks to the network directly: it hands a finalized
//! [`HttpRequest`](crate::request::HttpRequest) to a [`Transport`] and gets back a plain
//! [`HttpResponse`]. [`HttpTransport`] is the reqwest-backed default; tests and embedders
//! can supply their own implementation.
//!
//! A transport makes exactly one attempt per call. Timeouts are configured on the
//! transport itself and surface as [`TransportError::Timeout`].

mod http;
#[cfg(test)]
pub(crate) mod scripted;

pub use http::{HttpTransport, HttpTransportBuilder};

use crate::request::HttpRequest;
use async_trait::async_trait;
use bytes::Bytes;
use reqwest::header::HeaderMap;

/// Executes one HTTP exchange.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn send(&self, request: &HttpRequest) -> std::result::Result<HttpResponse, TransportError>;
}

/// A fully-read HTTP response.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: u16,
    pub headers: HeaderMap,
    pub body: Bytes,
}

impl HttpResponse {
    pub fn new(status: u16, headers: HeaderMap, body: impl Into<Bytes>) -> Self {
        Self {
            status,
            headers,
            body: body.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Body as UTF-8 text, replacing invalid sequences.
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }
}

#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("Request timed out: {0}")]
    Timeout(String),

    #[error("Connection failed: {0}")]
    Connect(String),

    #[error("HTTP error: {0}")]
    Http(#[source] reqwest::Error),

    #[error("Transport error: {0}")]
    Other(String),
}

impl TransportError {
    pub fn is_timeout(&self) -> bool {
        matches!(self, TransportError::Timeout(_))
    }
}

impl From<reqwest::Error> for TransportError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            TransportError::Timeout(e.to_string())
        } else if e.is_connect() {
            TransportError::Connect(e.to_string())
        } else {
            TransportError::Http(e)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn success_range_is_2xx_only() {
        assert!(HttpResponse::new(200, HeaderMap::new(), "").is_success());
        assert!(HttpResponse::new(204, HeaderMap::new(), "").is_success());
        assert!(!HttpResponse::new(199, HeaderMap::new(), "").is_success());
        assert!(!HttpResponse::new(301, HeaderMap::new(), "").is_success());
        assert!(!HttpResponse::new(404, HeaderMap::new(), "").is_success());
    }

    #[test]
    fn only_timeout_variant_reports_timeout() {
        assert!(TransportError::Timeout("30s elapsed".into()).is_timeout());
        assert!(!TransportError::Connect("refused".into()).is_timeout());
        assert!(!TransportError::Other("boom".into()).is_timeout());
    }
}
