//! 认证模块：凭据校验与 IAM 令牌的获取、缓存和刷新。
//!
//! Authentication.
//!
//! - [`CredentialStore`] validates that exactly one authentication mode is fully
//!   specified and exposes read-only accessors.
//! - [`TokenManager`] turns the active mode into an `Authorization` header value,
//!   exchanging and caching IAM bearer tokens when needed.
//!
//! Secrets never appear in `Debug` output or logs.

mod credentials;
mod token_manager;
mod types;

pub use credentials::{AuthMode, CredentialInputs, CredentialStore, Credentials, IamCredentials};
pub use token_manager::TokenManager;
pub use types::AccessToken;

/// Default IAM token endpoint.
pub const DEFAULT_IAM_URL: &str = "https://iam.bluemix.net/identity/token";
