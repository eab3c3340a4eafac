//! # ai-service-rust
//!
//! 云端 AI 服务的 Rust 客户端核心：凭据管理、IAM 令牌交换与刷新、请求构建以及带类型解码的服务调用。
//!
//! Client core for cloud AI services: credential handling, IAM bearer-token exchange
//! and refresh, request assembly, and authenticated execution with typed decoding.
//!
//! ## Overview
//!
//! A service binding (such as [`services::language_translator_v3`]) is a thin layer
//! that turns per-operation options into an [`HttpRequest`](request::HttpRequest) and
//! hands it to a [`ServiceClient`]. The client attaches authentication, sends the
//! request through a pluggable [`Transport`](transport::Transport) and decodes the
//! JSON answer into the operation's model type.
//!
//! Three authentication modes are supported, exactly one per client:
//!
//! - **Basic**: username and password, sent as `Authorization: Basic ...`
//! - **IAM**: an API key exchanged for a bearer token, cached and refreshed shortly
//!   before expiry; concurrent callers share one exchange
//! - **Access token**: a caller-managed bearer token, never refreshed
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use ai_service_rust::request::Method;
//! use ai_service_rust::ServiceClient;
//! use serde_json::Value;
//!
//! #[tokio::main]
//! async fn main() -> ai_service_rust::Result<()> {
//!     let client = ServiceClient::builder("language_translator")
//!         .url("https://gateway.watsonplatform.net/language-translator/api")
//!         .version("2018-05-01")
//!         .iam_api_key("your-api-key")
//!         .build()?;
//!
//!     let request = client
//!         .request_builder(Method::GET, &["v3/models"], &["en-es"])?
//!         .build()?;
//!     let response = client.request::<Value>(request).await?;
//!     println!("{} {}", response.status_code, response.result);
//!     Ok(())
//! }
//! ```
//!
//! ## Module Organization
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`auth`] | Credential validation and IAM token management |
//! | [`request`] | URL templating, headers, query and body assembly |
//! | [`transport`] | Pluggable HTTP transport (reqwest by default) |
//! | [`client`] | Service client, builder and detailed responses |
//! | [`config`] | Service configuration and environment loading |
//! | [`error`] | Error taxonomy |
//! | [`services`] | Service bindings |

pub mod auth;
pub mod client;
pub mod config;
pub mod error;
pub mod error_code;
pub mod request;
#[cfg(feature = "language_translator_v3")]
pub mod services;
pub mod transport;

// Re-export main types for convenience
pub use auth::{AuthMode, CredentialStore, Credentials, TokenManager};
pub use client::{DetailedResponse, ServiceClient, ServiceClientBuilder};
pub use config::ServiceConfig;
pub use error::{Error, ErrorContext, ServiceError};
pub use error_code::ServiceErrorKind;
pub use request::{HttpRequest, RequestBuilder};
pub use transport::{HttpTransport, Transport, TransportError};

/// Result type alias for the library
pub type Result<T> = std::result::Result<T, Error>;
