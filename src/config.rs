//! 服务配置：基础 URL、API 版本与凭据，支持从环境变量加载。
//!
//! Service configuration.
//!
//! A [`ServiceConfig`] is assembled once (usually by
//! [`ServiceClientBuilder`](crate::client::ServiceClientBuilder)) and never changes
//! afterwards. Environment variables are named after the service, e.g. for
//! `language_translator`:
//!
//! - `LANGUAGE_TRANSLATOR_URL`
//! - `LANGUAGE_TRANSLATOR_USERNAME` / `LANGUAGE_TRANSLATOR_PASSWORD`
//! - `LANGUAGE_TRANSLATOR_APIKEY` / `LANGUAGE_TRANSLATOR_IAM_URL`
//! - `LANGUAGE_TRANSLATOR_ACCESS_TOKEN`

use crate::auth::{CredentialInputs, CredentialStore};
use crate::{Error, ErrorContext, Result};
use url::Url;

#[derive(Debug, Clone)]
pub struct ServiceConfig {
    service_name: String,
    base_url: String,
    version: String,
    credentials: CredentialStore,
}

impl ServiceConfig {
    /// Validate and assemble a configuration.
    ///
    /// `base_url` must be an absolute http(s) URL; trailing slashes are dropped.
    /// `version` is the API version date sent as the `version` query parameter.
    pub fn new(
        service_name: impl Into<String>,
        base_url: &str,
        version: impl Into<String>,
        credentials: CredentialStore,
    ) -> Result<Self> {
        let service_name = service_name.into();
        if service_name.trim().is_empty() {
            return Err(Error::configuration_with_context(
                "service name must not be empty",
                ErrorContext::new()
                    .with_field_path("service_name")
                    .with_source("service_config"),
            ));
        }
        let version = version.into();
        if version.trim().is_empty() {
            return Err(Error::configuration_with_context(
                "version must not be empty",
                ErrorContext::new()
                    .with_field_path("version")
                    .with_source("service_config"),
            ));
        }

        Ok(Self {
            base_url: normalize_base_url(base_url)?,
            service_name,
            version,
            credentials,
        })
    }

    /// Build from `<SERVICE>_*` environment variables, using `default_url` when no
    /// URL variable is set.
    pub fn from_env(
        service_name: &str,
        default_url: Option<&str>,
        version: impl Into<String>,
    ) -> Result<Self> {
        let prefix = env_prefix(service_name);
        let credentials = CredentialStore::from_inputs(&CredentialInputs::from_env(&prefix))?;
        let base_url = url_from_env(service_name)
            .or_else(|| default_url.map(str::to_string))
            .ok_or_else(|| {
                Error::configuration_with_context(
                    format!("{}_URL is not set and the service has no default URL", prefix),
                    ErrorContext::new()
                        .with_field_path("base_url")
                        .with_source("service_config"),
                )
            })?;
        Self::new(service_name, &base_url, version, credentials)
    }

    pub fn service_name(&self) -> &str {
        &self.service_name
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    pub fn credentials(&self) -> &CredentialStore {
        &self.credentials
    }
}

/// `language_translator` -> `LANGUAGE_TRANSLATOR`; `speech-to-text` -> `SPEECH_TO_TEXT`.
pub fn env_prefix(service_name: &str) -> String {
    service_name
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() {
                c.to_ascii_uppercase()
            } else {
                '_'
            }
        })
        .collect()
}

/// Value of `<SERVICE>_URL`, if set and non-empty.
pub fn url_from_env(service_name: &str) -> Option<String> {
    std::env::var(format!("{}_URL", env_prefix(service_name)))
        .ok()
        .filter(|v| !v.trim().is_empty())
}

pub(crate) fn normalize_base_url(raw: &str) -> Result<String> {
    let invalid = |message: String| {
        Error::configuration_with_context(
            message,
            ErrorContext::new()
                .with_field_path("base_url")
                .with_details(raw.to_string())
                .with_source("service_config"),
        )
    };

    let trimmed = raw.trim().trim_end_matches('/');
    let wrapped = |c: char| c == '{' || c == '}' || c == '"';
    if trimmed.starts_with(wrapped) || trimmed.ends_with(wrapped) {
        return Err(invalid(
            "base URL must not start or end with curly brackets or quotes".to_string(),
        ));
    }
    let parsed = Url::parse(trimmed).map_err(|e| invalid(format!("Invalid base URL: {}", e)))?;
    if parsed.scheme() != "http" && parsed.scheme() != "https" {
        return Err(invalid(format!(
            "Unsupported base URL scheme '{}'",
            parsed.scheme()
        )));
    }
    Ok(trimmed.to_string())
}
