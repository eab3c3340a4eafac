use crate::auth::{AuthMode, TokenManager};
use crate::client::error_classification::service_error_from_response;
use crate::client::response::DetailedResponse;
use crate::config::ServiceConfig;
use crate::request::{HttpRequest, Method, RequestBuilder};
use crate::transport::{HttpResponse, Transport};
use crate::{Error, Result};
use bytes::Bytes;
use reqwest::header::AUTHORIZATION;
use serde::de::DeserializeOwned;
use std::sync::Arc;
use tracing::debug;

/// Executes finalized requests for one service instance.
///
/// Holds no per-call state: clones share the configuration, the transport and the
/// token cache, and any number of calls may run concurrently.
#[derive(Clone)]
pub struct ServiceClient {
    pub(crate) config: Arc<ServiceConfig>,
    pub(crate) tokens: Arc<TokenManager>,
    pub(crate) transport: Arc<dyn Transport>,
}

impl ServiceClient {
    pub fn new(config: ServiceConfig, transport: Arc<dyn Transport>) -> Self {
        let tokens = TokenManager::new(config.credentials().clone(), transport.clone());
        Self {
            config: Arc::new(config),
            tokens: Arc::new(tokens),
            transport,
        }
    }

    /// Start a [`ServiceClientBuilder`](crate::client::ServiceClientBuilder) for `service_name`.
    pub fn builder(service_name: impl Into<String>) -> crate::client::ServiceClientBuilder {
        crate::client::ServiceClientBuilder::new(service_name)
    }

    pub fn config(&self) -> &ServiceConfig {
        &self.config
    }

    pub fn auth_mode(&self) -> AuthMode {
        self.config.credentials().auth_mode()
    }

    pub fn token_manager(&self) -> &TokenManager {
        &self.tokens
    }

    /// A builder whose URL is `base_url` joined with the given segments and parameters.
    pub fn request_builder<S, P>(
        &self,
        method: Method,
        path_segments: &[S],
        path_parameters: &[P],
    ) -> Result<RequestBuilder>
    where
        S: AsRef<str>,
        P: AsRef<str>,
    {
        let mut builder = RequestBuilder::new(method);
        builder.construct_url(self.config.base_url(), path_segments, path_parameters)?;
        Ok(builder)
    }

    /// Replace the caller-managed bearer token (preset-token clients only).
    pub async fn set_access_token(&self, token: impl Into<String>) -> Result<()> {
        self.tokens.set_access_token(token).await
    }

    /// Send `request` and decode a 2xx JSON body into `T`.
    ///
    /// An empty 2xx body decodes as JSON `null`, so `()` and `Option<_>` targets accept it.
    /// Non-2xx answers become [`Error::Service`]; a body that does not match `T`
    /// becomes [`Error::Decoding`].
    pub async fn request<T>(&self, request: HttpRequest) -> Result<DetailedResponse<T>>
    where
        T: DeserializeOwned,
    {
        let response = self.execute(request).await?;
        let result = decode_body::<T>(response.status, &response.body)?;
        Ok(DetailedResponse::new(response.status, response.headers, result))
    }

    /// Send `request` and return the undecoded 2xx body.
    pub async fn request_bytes(&self, request: HttpRequest) -> Result<DetailedResponse<Bytes>> {
        let response = self.execute(request).await?;
        Ok(DetailedResponse::new(
            response.status,
            response.headers,
            response.body,
        ))
    }

    async fn execute(&self, request: HttpRequest) -> Result<HttpResponse> {
        let auth = self.tokens.auth_header().await?;
        let request = request
            .with_header(AUTHORIZATION, auth)
            .with_default_query("version", self.config.version());

        debug!(
            service = self.config.service_name(),
            method = %request.method(),
            path = request.url().path(),
            "Dispatching request"
        );
        let response = self.transport.send(&request).await?;
        debug!(
            service = self.config.service_name(),
            http_status = response.status,
            bytes = response.body.len(),
            "Received response"
        );

        if response.is_success() {
            return Ok(response);
        }
        let err = service_error_from_response(response);
        debug!(
            service = self.config.service_name(),
            http_status = err.status,
            code = err.code.as_deref().unwrap_or(""),
            "Service returned an error"
        );
        Err(Error::Service(err))
    }
}

impl std::fmt::Debug for ServiceClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceClient")
            .field("service", &self.config.service_name())
            .field("base_url", &self.config.base_url())
            .field("auth_mode", &self.auth_mode())
            .finish()
    }
}

fn decode_body<T: DeserializeOwned>(status: u16, body: &[u8]) -> Result<T> {
    let is_empty = body.iter().all(u8::is_ascii_whitespace);
    let source: &[u8] = if is_empty { b"null" } else { body };
    serde_json::from_slice(source).map_err(|e| {
        Error::decoding(
            format!(
                "response body does not match {}: {}",
                std::any::type_name::<T>(),
                e
            ),
            status,
        )
    })
}
