use super::{HttpResponse, Transport, TransportError};
use crate::request::{FormPart, HttpRequest, RequestBody};
use crate::{Error, Result};
use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::Proxy;
use std::env;
use std::time::Duration;
use tracing::debug;

const DEFAULT_TIMEOUT_SECS: u64 = 60;

/// reqwest-backed [`Transport`].
///
/// One instance owns a connection pool and is meant to be shared (behind an `Arc`)
/// by every client of a process.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
}

impl HttpTransport {
    /// Transport with defaults, honoring the environment overrides described on
    /// [`HttpTransportBuilder`].
    pub fn new() -> Result<Self> {
        HttpTransportBuilder::new().build()
    }

    pub fn builder() -> HttpTransportBuilder {
        HttpTransportBuilder::new()
    }

    /// Wrap an already configured reqwest client.
    pub fn from_client(client: reqwest::Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn send(&self, request: &HttpRequest) -> std::result::Result<HttpResponse, TransportError> {
        let mut req = self
            .client
            .request(request.method().clone(), request.url().clone())
            .headers(request.headers().clone());

        match request.body() {
            RequestBody::None => {}
            RequestBody::Json(data) | RequestBody::Raw { data, .. } => {
                req = req.body(data.clone());
            }
            RequestBody::FormData(parts) => {
                req = req.multipart(multipart_form(parts)?);
            }
        }

        let resp = req.send().await?;
        let status = resp.status().as_u16();
        let headers = resp.headers().clone();
        let body = resp.bytes().await?;
        debug!(http_status = status, bytes = body.len(), "response body read");

        Ok(HttpResponse {
            status,
            headers,
            body,
        })
    }
}

/// Encode form parts in order; reqwest picks the boundary and sets `Content-Type`.
fn multipart_form(parts: &[FormPart]) -> std::result::Result<Form, reqwest::Error> {
    let mut form = Form::new();
    for part in parts {
        let mut encoded = Part::bytes(part.data.to_vec()).mime_str(&part.content_type)?;
        if let Some(filename) = &part.filename {
            encoded = encoded.file_name(filename.clone());
        }
        form = form.part(part.field_name.clone(), encoded);
    }
    Ok(form)
}

/// Builder for [`HttpTransport`].
///
/// Minimal production-friendly defaults, overridable from the environment:
/// - `AI_SERVICE_HTTP_TIMEOUT_SECS` (default 60)
/// - `AI_SERVICE_HTTP_POOL_MAX_IDLE_PER_HOST` (default 32)
/// - `AI_SERVICE_PROXY_URL` (unset by default)
///
/// Explicit builder values win over the environment.
pub struct HttpTransportBuilder {
    timeout: Option<Duration>,
    pool_max_idle_per_host: Option<usize>,
    proxy_url: Option<String>,
    user_agent: String,
}

impl HttpTransportBuilder {
    pub fn new() -> Self {
        Self {
            timeout: None,
            pool_max_idle_per_host: None,
            proxy_url: None,
            user_agent: format!("ai-service-rust/{}", env!("CARGO_PKG_VERSION")),
        }
    }

    /// Whole-exchange timeout; on expiry the call fails with [`TransportError::Timeout`].
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn pool_max_idle_per_host(mut self, n: usize) -> Self {
        self.pool_max_idle_per_host = Some(n);
        self
    }

    pub fn proxy(mut self, url: impl Into<String>) -> Self {
        self.proxy_url = Some(url.into());
        self
    }

    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    pub fn build(self) -> Result<HttpTransport> {
        let timeout = self.timeout.unwrap_or_else(|| {
            Duration::from_secs(
                env::var("AI_SERVICE_HTTP_TIMEOUT_SECS")
                    .ok()
                    .and_then(|s| s.parse::<u64>().ok())
                    .unwrap_or(DEFAULT_TIMEOUT_SECS),
            )
        });
        let pool_max_idle = self.pool_max_idle_per_host.unwrap_or_else(|| {
            env::var("AI_SERVICE_HTTP_POOL_MAX_IDLE_PER_HOST")
                .ok()
                .and_then(|s| s.parse::<usize>().ok())
                .unwrap_or(32)
        });

        let mut builder = reqwest::Client::builder()
            .timeout(timeout)
            .pool_max_idle_per_host(pool_max_idle)
            .pool_idle_timeout(Some(Duration::from_secs(90)))
            .user_agent(self.user_agent);

        let proxy_url = self
            .proxy_url
            .or_else(|| env::var("AI_SERVICE_PROXY_URL").ok());
        if let Some(proxy_url) = proxy_url {
            let proxy = Proxy::all(&proxy_url).map_err(|e| {
                Error::configuration(format!("Invalid proxy URL '{}': {}", proxy_url, e))
            })?;
            builder = builder.proxy(proxy);
        }

        let client = builder
            .build()
            .map_err(|e| Error::Transport(TransportError::Other(e.to_string())))?;

        Ok(HttpTransport { client })
    }
}

impl Default for HttpTransportBuilder {
    fn default() -> Self {
        Self::new()
    }
}
