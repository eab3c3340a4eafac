use crate::auth::{CredentialInputs, CredentialStore, Credentials};
use crate::client::core::ServiceClient;
use crate::config::{env_prefix, url_from_env, ServiceConfig};
use crate::transport::{HttpTransport, Transport};
use crate::{Error, ErrorContext, Result};
use std::sync::Arc;
use std::time::Duration;

/// Builder for [`ServiceClient`].
///
/// Everything is validated once, in [`build`](Self::build). Explicitly set values win
/// over environment values picked up by [`from_env`](Self::from_env).
pub struct ServiceClientBuilder {
    service_name: String,
    default_url: Option<String>,
    url: Option<String>,
    version: Option<String>,
    inputs: CredentialInputs,
    credentials: Option<Credentials>,
    transport: Option<Arc<dyn Transport>>,
    timeout: Option<Duration>,
    read_env: bool,
}

impl ServiceClientBuilder {
    pub fn new(service_name: impl Into<String>) -> Self {
        Self {
            service_name: service_name.into(),
            default_url: None,
            url: None,
            version: None,
            inputs: CredentialInputs::default(),
            credentials: None,
            transport: None,
            timeout: None,
            read_env: false,
        }
    }

    /// Well-known endpoint used when neither [`url`](Self::url) nor the environment supplies one.
    pub fn default_url(mut self, url: impl Into<String>) -> Self {
        self.default_url = Some(url.into());
        self
    }

    pub fn url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }

    /// API version date, sent as the `version` query parameter. Required.
    pub fn version(mut self, version: impl Into<String>) -> Self {
        self.version = Some(version.into());
        self
    }

    pub fn username(mut self, username: impl Into<String>) -> Self {
        self.inputs.username = Some(username.into());
        self
    }

    pub fn password(mut self, password: impl Into<String>) -> Self {
        self.inputs.password = Some(password.into());
        self
    }

    pub fn iam_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.inputs.iam_api_key = Some(api_key.into());
        self
    }

    pub fn iam_url(mut self, url: impl Into<String>) -> Self {
        self.inputs.iam_url = Some(url.into());
        self
    }

    /// Caller-managed bearer token; the client never refreshes it.
    pub fn access_token(mut self, token: impl Into<String>) -> Self {
        self.inputs.access_token = Some(token.into());
        self
    }

    /// Already validated credentials; take precedence over individual credential setters.
    pub fn credentials(mut self, credentials: Credentials) -> Self {
        self.credentials = Some(credentials);
        self
    }

    /// Custom transport. When set, [`timeout`](Self::timeout) is ignored.
    pub fn transport(mut self, transport: Arc<dyn Transport>) -> Self {
        self.transport = Some(transport);
        self
    }

    /// Request timeout of the default reqwest transport.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Fill unset URL and credentials from `<SERVICE>_*` environment variables.
    pub fn from_env(mut self) -> Self {
        self.read_env = true;
        self
    }

    pub fn build(self) -> Result<ServiceClient> {
        let version = self.version.ok_or_else(|| {
            Error::configuration_with_context(
                "version is required",
                ErrorContext::new()
                    .with_field_path("version")
                    .with_source("service_client_builder"),
            )
        })?;

        let env_url = if self.read_env {
            url_from_env(&self.service_name)
        } else {
            None
        };
        let base_url = self
            .url
            .or(env_url)
            .or(self.default_url)
            .ok_or_else(|| {
                Error::configuration_with_context(
                    "No service URL configured",
                    ErrorContext::new()
                        .with_field_path("base_url")
                        .with_source("service_client_builder"),
                )
            })?;

        let credentials = match self.credentials {
            Some(credentials) => CredentialStore::new(credentials)?,
            None => {
                let inputs = if self.read_env {
                    self.inputs
                        .or(CredentialInputs::from_env(&env_prefix(&self.service_name)))
                } else {
                    self.inputs
                };
                CredentialStore::from_inputs(&inputs)?
            }
        };

        let config = ServiceConfig::new(self.service_name, &base_url, version, credentials)?;

        let transport: Arc<dyn Transport> = match self.transport {
            Some(transport) => transport,
            None => {
                let mut builder = HttpTransport::builder();
                if let Some(timeout) = self.timeout {
                    builder = builder.timeout(timeout);
                }
                Arc::new(builder.build()?)
            }
        };

        tracing::debug!(
            service = config.service_name(),
            base_url = config.base_url(),
            auth_mode = ?config.credentials().auth_mode(),
            "Built service client"
        );
        Ok(ServiceClient::new(config, transport))
    }
}
