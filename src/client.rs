//! Service client: authenticated execution of finalized requests and typed decoding.
//!
//! Service bindings build an [`HttpRequest`](crate::request::HttpRequest) with
//! [`ServiceClient::request_builder`] and hand it to [`ServiceClient::request`].

pub mod builder;
pub mod core;
mod error_classification;
pub mod response;

pub use builder::ServiceClientBuilder;
pub use core::ServiceClient;
pub use response::DetailedResponse;
