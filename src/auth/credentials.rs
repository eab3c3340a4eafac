// Credential inputs, validation and the immutable credential store

use super::DEFAULT_IAM_URL;
use crate::{Error, ErrorContext, Result};
use std::env;

/// Which authentication mode a client runs in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthMode {
    Basic,
    Iam,
    AccessToken,
}

/// IAM API key plus the token endpoint it is exchanged at.
#[derive(Clone, PartialEq, Eq)]
pub struct IamCredentials {
    pub api_key: String,
    pub token_url: String,
}

impl std::fmt::Debug for IamCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IamCredentials")
            .field("api_key", &"<redacted>")
            .field("token_url", &self.token_url)
            .finish()
    }
}

/// Exactly one authentication mode.
#[derive(Clone, PartialEq, Eq)]
pub enum Credentials {
    Basic { username: String, password: String },
    Iam(IamCredentials),
    /// Caller-managed bearer token; never refreshed by the client.
    AccessToken(String),
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Credentials::Basic { username, .. } => f
                .debug_struct("Basic")
                .field("username", username)
                .field("password", &"<redacted>")
                .finish(),
            Credentials::Iam(iam) => f.debug_tuple("Iam").field(iam).finish(),
            Credentials::AccessToken(_) => f.debug_tuple("AccessToken").field(&"<redacted>").finish(),
        }
    }
}

impl Credentials {
    pub fn basic(username: impl Into<String>, password: impl Into<String>) -> Result<Self> {
        let creds = Credentials::Basic {
            username: username.into(),
            password: password.into(),
        };
        validate(&creds)?;
        Ok(creds)
    }

    /// IAM API key credentials; `token_url` defaults to [`DEFAULT_IAM_URL`].
    pub fn iam(api_key: impl Into<String>, token_url: Option<String>) -> Result<Self> {
        let creds = Credentials::Iam(IamCredentials {
            api_key: api_key.into(),
            token_url: token_url.unwrap_or_else(|| DEFAULT_IAM_URL.to_string()),
        });
        validate(&creds)?;
        Ok(creds)
    }

    pub fn access_token(token: impl Into<String>) -> Result<Self> {
        let creds = Credentials::AccessToken(token.into());
        validate(&creds)?;
        Ok(creds)
    }

    /// Pick the single mode described by loosely specified inputs.
    ///
    /// A preset access token selects [`AuthMode::AccessToken`] (an API key next to it
    /// is ignored); otherwise an API key selects IAM; otherwise username and password
    /// are both required. Basic credentials mixed with IAM inputs are rejected.
    pub fn from_inputs(inputs: &CredentialInputs) -> Result<Self> {
        let has_basic = inputs.username.is_some() || inputs.password.is_some();
        let has_iam = inputs.iam_api_key.is_some() || inputs.access_token.is_some();

        if has_basic && has_iam {
            return Err(Error::configuration_with_context(
                "Specify either username/password or IAM credentials, not both",
                ErrorContext::new()
                    .with_field_path("credentials")
                    .with_source("credential_store"),
            ));
        }

        if let Some(token) = &inputs.access_token {
            return Credentials::access_token(token.clone());
        }
        if let Some(api_key) = &inputs.iam_api_key {
            return Credentials::iam(api_key.clone(), inputs.iam_url.clone());
        }

        match (&inputs.username, &inputs.password) {
            (Some(username), Some(password)) => {
                Credentials::basic(username.clone(), password.clone())
            }
            (Some(_), None) => Err(missing("credentials.password", "password is required with username")),
            (None, Some(_)) => Err(missing("credentials.username", "username is required with password")),
            (None, None) => Err(missing(
                "credentials",
                "No credentials supplied: provide username/password, an IAM API key, or an access token",
            )),
        }
    }

    pub fn mode(&self) -> AuthMode {
        match self {
            Credentials::Basic { .. } => AuthMode::Basic,
            Credentials::Iam(_) => AuthMode::Iam,
            Credentials::AccessToken(_) => AuthMode::AccessToken,
        }
    }
}

fn missing(field: &str, message: &str) -> Error {
    Error::configuration_with_context(
        message,
        ErrorContext::new()
            .with_field_path(field)
            .with_source("credential_store"),
    )
}

fn validate(creds: &Credentials) -> Result<()> {
    match creds {
        Credentials::Basic { username, password } => {
            check_value("credentials.username", username)?;
            check_value("credentials.password", password)
        }
        Credentials::Iam(iam) => {
            check_value("credentials.iam_api_key", &iam.api_key)?;
            url::Url::parse(&iam.token_url).map_err(|e| {
                Error::configuration_with_context(
                    format!("Invalid IAM token URL: {}", e),
                    ErrorContext::new()
                        .with_field_path("credentials.iam_url")
                        .with_source("credential_store"),
                )
            })?;
            Ok(())
        }
        Credentials::AccessToken(token) => check_value("credentials.access_token", token),
    }
}

// Values pasted straight out of a JSON credentials file keep their braces or quotes.
fn check_value(field: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(missing(field, "value must not be empty"));
    }
    let wrapped = |c: char| c == '{' || c == '}' || c == '"';
    if value.starts_with(wrapped) || value.ends_with(wrapped) {
        return Err(missing(
            field,
            "value must not start or end with curly brackets or quotes",
        ));
    }
    Ok(())
}

/// Loosely specified credential inputs, as collected from builders or the environment.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct CredentialInputs {
    pub username: Option<String>,
    pub password: Option<String>,
    pub iam_api_key: Option<String>,
    pub iam_url: Option<String>,
    pub access_token: Option<String>,
}

impl std::fmt::Debug for CredentialInputs {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let redact = |v: &Option<String>| v.as_ref().map(|_| "<redacted>");
        f.debug_struct("CredentialInputs")
            .field("username", &self.username)
            .field("password", &redact(&self.password))
            .field("iam_api_key", &redact(&self.iam_api_key))
            .field("iam_url", &self.iam_url)
            .field("access_token", &redact(&self.access_token))
            .finish()
    }
}

impl CredentialInputs {
    /// Read `<PREFIX>_USERNAME`, `_PASSWORD`, `_APIKEY`, `_IAM_URL` and `_ACCESS_TOKEN`.
    ///
    /// Empty variables count as unset.
    pub fn from_env(prefix: &str) -> Self {
        let var = |suffix: &str| {
            env::var(format!("{}_{}", prefix, suffix))
                .ok()
                .filter(|v| !v.trim().is_empty())
        };
        Self {
            username: var("USERNAME"),
            password: var("PASSWORD"),
            iam_api_key: var("APIKEY"),
            iam_url: var("IAM_URL"),
            access_token: var("ACCESS_TOKEN"),
        }
    }

    /// Values set on `self` win; gaps are filled from `fallback`.
    ///
    /// Fallback credentials are only used when `self` names no mode at all, so an
    /// explicit username never pairs with an API key from the environment. An
    /// explicit IAM token URL is kept either way.
    pub fn or(self, fallback: CredentialInputs) -> Self {
        if self.is_empty() {
            return Self {
                iam_url: self.iam_url.or(fallback.iam_url),
                ..fallback
            };
        }
        Self {
            iam_url: self.iam_url.or(fallback.iam_url),
            ..self
        }
    }

    /// True when no credential mode is named. `iam_url` alone names none.
    pub fn is_empty(&self) -> bool {
        self.username.is_none()
            && self.password.is_none()
            && self.iam_api_key.is_none()
            && self.access_token.is_none()
    }
}

/// Validated, immutable credentials for one service instance.
#[derive(Debug, Clone)]
pub struct CredentialStore {
    credentials: Credentials,
}

impl CredentialStore {
    /// Fails with [`Error::Configuration`] when the active mode is not fully specified.
    pub fn new(credentials: Credentials) -> Result<Self> {
        validate(&credentials)?;
        Ok(Self { credentials })
    }

    pub fn from_inputs(inputs: &CredentialInputs) -> Result<Self> {
        Self::new(Credentials::from_inputs(inputs)?)
    }

    pub fn auth_mode(&self) -> AuthMode {
        self.credentials.mode()
    }

    pub fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    pub fn username(&self) -> Option<&str> {
        match &self.credentials {
            Credentials::Basic { username, .. } => Some(username),
            _ => None,
        }
    }

    pub fn iam_api_key(&self) -> Option<&str> {
        match &self.credentials {
            Credentials::Iam(iam) => Some(&iam.api_key),
            _ => None,
        }
    }

    pub fn token_url(&self) -> Option<&str> {
        match &self.credentials {
            Credentials::Iam(iam) => Some(&iam.token_url),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn inputs() -> CredentialInputs {
        CredentialInputs::default()
    }

    #[test]
    fn basic_requires_both_fields() {
        let store = CredentialStore::from_inputs(&CredentialInputs {
            username: Some("user".into()),
            password: Some("pass".into()),
            ..inputs()
        })
        .unwrap();
        assert_eq!(store.auth_mode(), AuthMode::Basic);
        assert_eq!(store.username(), Some("user"));

        let err = CredentialStore::from_inputs(&CredentialInputs {
            username: Some("user".into()),
            ..inputs()
        })
        .unwrap_err();
        assert_eq!(
            err.context().and_then(|c| c.field_path.as_deref()),
            Some("credentials.password")
        );

        assert!(Credentials::basic("user", "").is_err());
        assert!(Credentials::basic("  ", "pass").is_err());
    }

    #[test]
    fn nothing_supplied_is_configuration_error() {
        let err = CredentialStore::from_inputs(&inputs()).unwrap_err();
        assert!(matches!(err, Error::Configuration { .. }));
    }

    #[test]
    fn iam_defaults_token_url() {
        let store = CredentialStore::from_inputs(&CredentialInputs {
            iam_api_key: Some("key".into()),
            ..inputs()
        })
        .unwrap();
        assert_eq!(store.auth_mode(), AuthMode::Iam);
        assert_eq!(store.token_url(), Some(DEFAULT_IAM_URL));
        assert_eq!(store.iam_api_key(), Some("key"));
    }

    #[test]
    fn preset_token_wins_over_api_key() {
        let store = CredentialStore::from_inputs(&CredentialInputs {
            iam_api_key: Some("key".into()),
            access_token: Some("token".into()),
            ..inputs()
        })
        .unwrap();
        assert_eq!(store.auth_mode(), AuthMode::AccessToken);
        assert!(store.iam_api_key().is_none());
    }

    #[test]
    fn mixing_basic_and_iam_is_rejected() {
        let err = CredentialStore::from_inputs(&CredentialInputs {
            username: Some("user".into()),
            password: Some("pass".into()),
            iam_api_key: Some("key".into()),
            ..inputs()
        })
        .unwrap_err();
        assert!(matches!(err, Error::Configuration { .. }));
    }

    #[test]
    fn store_revalidates_hand_built_variants() {
        let err = CredentialStore::new(Credentials::Iam(IamCredentials {
            api_key: String::new(),
            token_url: DEFAULT_IAM_URL.to_string(),
        }))
        .unwrap_err();
        assert!(matches!(err, Error::Configuration { .. }));

        let err = CredentialStore::new(Credentials::Iam(IamCredentials {
            api_key: "key".into(),
            token_url: "not a url".into(),
        }))
        .unwrap_err();
        assert_eq!(
            err.context().and_then(|c| c.field_path.as_deref()),
            Some("credentials.iam_url")
        );
    }

    #[test]
    fn rejects_values_wrapped_in_braces_or_quotes() {
        assert!(Credentials::iam("{key}", None).is_err());
        assert!(Credentials::basic("\"user\"", "pass").is_err());
        assert!(Credentials::access_token("token\"").is_err());
    }

    #[test]
    fn debug_output_redacts_secrets() {
        let creds = Credentials::basic("user", "hunter2").unwrap();
        let out = format!("{:?}", creds);
        assert!(out.contains("user"));
        assert!(!out.contains("hunter2"));

        let creds = Credentials::iam("abc-secret", None).unwrap();
        assert!(!format!("{:?}", creds).contains("abc-secret"));

        let inputs = CredentialInputs {
            access_token: Some("tok-secret".into()),
            ..inputs()
        };
        assert!(!format!("{:?}", inputs).contains("tok-secret"));
    }

    #[test]
    fn explicit_inputs_win_over_fallback() {
        let explicit = CredentialInputs {
            username: Some("user".into()),
            password: Some("pass".into()),
            ..inputs()
        };
        let env = CredentialInputs {
            iam_api_key: Some("env-key".into()),
            iam_url: Some("https://iam.example.com/token".into()),
            ..inputs()
        };
        let merged = explicit.clone().or(env.clone());
        assert_eq!(merged.username.as_deref(), Some("user"));
        assert!(merged.iam_api_key.is_none());
        assert_eq!(Credentials::from_inputs(&merged).unwrap().mode(), AuthMode::Basic);

        let merged = inputs().or(env.clone());
        assert_eq!(merged.iam_api_key.as_deref(), Some("env-key"));
        assert_eq!(merged.iam_url.as_deref(), Some("https://iam.example.com/token"));

        let url_only = CredentialInputs {
            iam_url: Some("https://explicit.example.com/token".into()),
            ..inputs()
        };
        let merged = url_only.or(env);
        assert_eq!(merged.iam_api_key.as_deref(), Some("env-key"));
        assert_eq!(
            merged.iam_url.as_deref(),
            Some("https://explicit.example.com/token")
        );
        let store = CredentialStore::from_inputs(&merged).unwrap();
        assert_eq!(store.token_url(), Some("https://explicit.example.com/token"));
    }
}
