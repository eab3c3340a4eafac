// IAM wire types and the cached token value

use chrono::{DateTime, Duration, TimeZone, Utc};
use serde::Deserialize;

/// IAM token endpoint response.
///
/// `expiration` is an absolute unix timestamp (seconds); `expires_in` is relative.
#[derive(Deserialize)]
pub(crate) struct IamTokenResponse {
    pub access_token: String,
    pub expires_in: Option<i64>,
    pub expiration: Option<i64>,
}

impl IamTokenResponse {
    /// Absolute expiry, preferring the server's own timestamp.
    ///
    /// `None` when neither field is present or the value is out of range.
    pub fn expires_at(&self, now: DateTime<Utc>) -> Option<DateTime<Utc>> {
        if let Some(exp) = self.expiration {
            return Utc.timestamp_opt(exp, 0).single();
        }
        let secs = self.expires_in?;
        now.checked_add_signed(Duration::try_seconds(secs)?)
    }
}

/// An access token together with its absolute expiry.
///
/// Stored and replaced as one value so the token and its expiry always match.
#[derive(Clone)]
pub struct AccessToken {
    token: String,
    expires_at: DateTime<Utc>,
}

impl AccessToken {
    pub fn new(token: impl Into<String>, expires_at: DateTime<Utc>) -> Self {
        Self {
            token: token.into(),
            expires_at,
        }
    }

    pub fn token(&self) -> &str {
        &self.token
    }

    pub fn expires_at(&self) -> DateTime<Utc> {
        self.expires_at
    }

    /// True when the token expires within `margin` of `now` (or already has).
    pub fn needs_refresh(&self, now: DateTime<Utc>, margin: Duration) -> bool {
        match self.expires_at.checked_sub_signed(margin) {
            Some(refresh_at) => refresh_at <= now,
            None => true,
        }
    }
}

impl std::fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AccessToken")
            .field("token", &"<redacted>")
            .field("expires_at", &self.expires_at)
            .finish()
    }
}
