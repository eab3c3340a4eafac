//! Request assembly.
//!
//! [`RequestBuilder`] is pure data assembly with no I/O: path templating, header and
//! query collection, and exactly one body variant. [`RequestBuilder::build`] finalizes
//! into an immutable [`HttpRequest`] that a [`Transport`](crate::transport::Transport)
//! can execute.

mod body;
mod builder;
mod path;

pub use body::{FormPart, RequestBody};
pub use builder::RequestBuilder;
pub use path::construct_url;

pub use reqwest::Method;

use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use url::Url;

/// A finalized HTTP request, ready for transport.
#[derive(Debug, Clone)]
pub struct HttpRequest {
    method: Method,
    url: Url,
    headers: HeaderMap,
    body: RequestBody,
}

impl HttpRequest {
    pub(crate) fn new(method: Method, url: Url, headers: HeaderMap, body: RequestBody) -> Self {
        Self {
            method,
            url,
            headers,
            body,
        }
    }

    pub fn method(&self) -> &Method {
        &self.method
    }

    pub fn url(&self) -> &Url {
        &self.url
    }

    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// JSON and raw bodies are already encoded; form data is encoded by the transport.
    pub fn body(&self) -> &RequestBody {
        &self.body
    }

    /// All values of a query parameter, in order.
    pub fn query_values(&self, key: &str) -> Vec<String> {
        self.url
            .query_pairs()
            .filter(|(k, _)| k == key)
            .map(|(_, v)| v.into_owned())
            .collect()
    }

    pub fn has_query(&self, key: &str) -> bool {
        self.url.query_pairs().any(|(k, _)| k == key)
    }

    /// Copy of this request with `name` set (replacing any previous value).
    pub(crate) fn with_header(mut self, name: HeaderName, value: HeaderValue) -> Self {
        self.headers.insert(name, value);
        self
    }

    /// Copy of this request with `key=value` appended, unless `key` is already present.
    pub(crate) fn with_default_query(mut self, key: &str, value: &str) -> Self {
        if !self.has_query(key) {
            self.url.query_pairs_mut().append_pair(key, value);
        }
        self
    }
}
