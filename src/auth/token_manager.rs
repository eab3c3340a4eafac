use super::credentials::{CredentialStore, Credentials, IamCredentials};
use super::types::{AccessToken, IamTokenResponse};
use crate::request::{Method, RequestBuilder};
use crate::transport::Transport;
use crate::{Error, ErrorContext, Result};
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use chrono::{Duration, Utc};
use reqwest::header::HeaderValue;
use std::sync::Arc;
use tokio::sync::{Mutex, RwLock};

/// Tokens expiring within this window are treated as already expired.
const DEFAULT_REFRESH_MARGIN_SECS: i64 = 60;

const IAM_GRANT_TYPE: &str = "urn:ibm:params:oauth:grant-type:apikey";
const IAM_RESPONSE_TYPE: &str = "cloud_iam";
// The token endpoint expects this fixed client identity ("bx:bx").
const IAM_CLIENT_AUTHORIZATION: &str = "Basic Yng6Yng=";
const NO_SEGMENTS: [&str; 0] = [];

/// Produces the `Authorization` header for every outgoing request.
///
/// Basic and preset-token modes never touch the network. In IAM mode the cached
/// token and its expiry live behind one async mutex that stays locked for the whole
/// exchange, so concurrent callers needing a refresh wait for a single exchange and
/// reuse its result. A failed exchange leaves the cache as it was.
pub struct TokenManager {
    store: CredentialStore,
    transport: Arc<dyn Transport>,
    cache: Mutex<Option<AccessToken>>,
    preset: RwLock<Option<String>>,
    refresh_margin: Duration,
}

impl TokenManager {
    pub fn new(store: CredentialStore, transport: Arc<dyn Transport>) -> Self {
        let preset = match store.credentials() {
            Credentials::AccessToken(token) => Some(token.clone()),
            _ => None,
        };
        Self {
            store,
            transport,
            cache: Mutex::new(None),
            preset: RwLock::new(preset),
            refresh_margin: Duration::seconds(DEFAULT_REFRESH_MARGIN_SECS),
        }
    }

    /// Override the safety margin before expiry at which a token is refreshed.
    pub fn with_refresh_margin(mut self, margin: Duration) -> Self {
        self.refresh_margin = margin;
        self
    }

    pub fn store(&self) -> &CredentialStore {
        &self.store
    }

    /// `Authorization` header value for the active mode, marked sensitive.
    pub async fn auth_header(&self) -> Result<HeaderValue> {
        let mut value = match self.store.credentials() {
            Credentials::Basic { username, password } => {
                let encoded = STANDARD.encode(format!("{}:{}", username, password));
                header_value(format!("Basic {}", encoded))?
            }
            Credentials::AccessToken(_) => {
                let preset = self.preset.read().await;
                let token = preset.as_deref().ok_or_else(|| {
                    Error::configuration("Preset access token is missing")
                })?;
                header_value(format!("Bearer {}", token))?
            }
            Credentials::Iam(iam) => {
                let token = self.iam_token(iam).await?;
                header_value(format!("Bearer {}", token))?
            }
        };
        value.set_sensitive(true);
        Ok(value)
    }

    /// Replace the caller-managed token. Only valid in preset-token mode.
    pub async fn set_access_token(&self, token: impl Into<String>) -> Result<()> {
        if !matches!(self.store.credentials(), Credentials::AccessToken(_)) {
            return Err(Error::configuration_with_context(
                "Access token can only be replaced on a client created with a preset access token",
                ErrorContext::new()
                    .with_field_path("credentials.access_token")
                    .with_source("token_manager"),
            ));
        }
        let token = token.into();
        if token.trim().is_empty() {
            return Err(Error::configuration_with_context(
                "value must not be empty",
                ErrorContext::new()
                    .with_field_path("credentials.access_token")
                    .with_source("token_manager"),
            ));
        }
        *self.preset.write().await = Some(token);
        Ok(())
    }

    /// Currently cached IAM token, if any. Never triggers an exchange.
    pub async fn cached_token(&self) -> Option<AccessToken> {
        self.cache.lock().await.clone()
    }

    async fn iam_token(&self, iam: &IamCredentials) -> Result<String> {
        let mut cache = self.cache.lock().await;
        if let Some(token) = cache.as_ref() {
            if !token.needs_refresh(Utc::now(), self.refresh_margin) {
                return Ok(token.token().to_string());
            }
            tracing::debug!(expires_at = %token.expires_at(), "IAM token expiring, refreshing");
        }

        let fresh = self.request_token(iam).await?;
        tracing::info!(expires_at = %fresh.expires_at(), "Obtained IAM access token");
        let token = fresh.token().to_string();
        *cache = Some(fresh);
        Ok(token)
    }

    async fn request_token(&self, iam: &IamCredentials) -> Result<AccessToken> {
        let form = url::form_urlencoded::Serializer::new(String::new())
            .append_pair("grant_type", IAM_GRANT_TYPE)
            .append_pair("apikey", &iam.api_key)
            .append_pair("response_type", IAM_RESPONSE_TYPE)
            .finish();

        let mut builder = RequestBuilder::new(Method::POST);
        builder
            .construct_url(&iam.token_url, &NO_SEGMENTS, &NO_SEGMENTS)?
            .add_header("Authorization", IAM_CLIENT_AUTHORIZATION)
            .set_raw_body("application/x-www-form-urlencoded", form)?;
        let request = builder.build()?;

        let response = self.transport.send(&request).await?;
        if !response.is_success() {
            tracing::warn!(status = response.status, "IAM token exchange rejected");
            return Err(Error::authentication(
                format!("IAM token request failed with HTTP {}", response.status),
                Some(response.status),
            ));
        }

        let parsed: IamTokenResponse = serde_json::from_slice(&response.body).map_err(|e| {
            Error::authentication(
                format!("Malformed IAM token response: {}", e),
                Some(response.status),
            )
        })?;
        if parsed.access_token.trim().is_empty() {
            return Err(Error::authentication(
                "IAM token response carried an empty access_token",
                Some(response.status),
            ));
        }
        let expires_at = parsed.expires_at(Utc::now()).ok_or_else(|| {
            Error::authentication(
                "IAM token response carried no usable expiry",
                Some(response.status),
            )
        })?;

        Ok(AccessToken::new(parsed.access_token, expires_at))
    }
}

impl std::fmt::Debug for TokenManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenManager")
            .field("mode", &self.store.auth_mode())
            .field("refresh_margin", &self.refresh_margin)
            .finish_non_exhaustive()
    }
}

fn header_value(value: String) -> Result<HeaderValue> {
    HeaderValue::from_str(&value).map_err(|_| {
        Error::authentication("Credential is not a valid HTTP header value", None)
    })
}
