use super::body::{FormPart, RequestBody};
use super::path::construct_url;
use super::{HttpRequest, Method};
use crate::{Error, ErrorContext, Result};
use bytes::Bytes;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, ACCEPT, AUTHORIZATION, CONTENT_TYPE};
use serde::Serialize;
use url::Url;

const JSON_CONTENT_TYPE: &str = "application/json";

/// Incremental assembly of an [`HttpRequest`].
///
/// Headers set here are overwritten by later calls with the same (case-insensitive)
/// name; query parameters accumulate so repeated keys such as `text=` survive.
/// Caller-supplied overrides (see [`RequestBuilder::header_overrides`]) win over
/// everything the builder sets, except `Content-Type` on form-data requests: the
/// transport sets it together with the multipart boundary.
#[derive(Debug, Clone)]
pub struct RequestBuilder {
    method: Method,
    url: Option<Url>,
    headers: Vec<(String, String)>,
    overrides: Vec<(String, String)>,
    query: Vec<(String, String)>,
    body: RequestBody,
}

impl RequestBuilder {
    pub fn new(method: Method) -> Self {
        Self {
            method,
            url: None,
            headers: Vec::new(),
            overrides: Vec::new(),
            query: Vec::new(),
            body: RequestBody::None,
        }
    }

    /// Set the target URL from a base URL, segments and positional parameters.
    ///
    /// See [`construct_url`] for the templating rules.
    pub fn construct_url<S, P>(
        &mut self,
        base_url: &str,
        path_segments: &[S],
        path_parameters: &[P],
    ) -> Result<&mut Self>
    where
        S: AsRef<str>,
        P: AsRef<str>,
    {
        self.url = Some(construct_url(base_url, path_segments, path_parameters)?);
        Ok(self)
    }

    pub fn add_header(&mut self, name: impl Into<String>, value: impl Into<String>) -> &mut Self {
        set_entry(&mut self.headers, name.into(), value.into());
        self
    }

    /// Caller-supplied headers; applied last at [`build`](Self::build).
    pub fn header_overrides<I, K, V>(&mut self, headers: I) -> &mut Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        for (name, value) in headers {
            set_entry(&mut self.overrides, name.into(), value.into());
        }
        self
    }

    /// Append one query parameter. Repeated keys are preserved in order.
    pub fn add_query(&mut self, key: impl Into<String>, value: impl Into<String>) -> &mut Self {
        self.query.push((key.into(), value.into()));
        self
    }

    /// Append one entry per value under the same key.
    pub fn add_query_values<I, V>(&mut self, key: &str, values: I) -> &mut Self
    where
        I: IntoIterator<Item = V>,
        V: Into<String>,
    {
        for value in values {
            self.query.push((key.to_string(), value.into()));
        }
        self
    }

    /// Serialize `value` as a compact JSON body.
    ///
    /// Replaces a previous JSON or raw body; fails with [`Error::Encoding`] once form
    /// parts have been added.
    pub fn set_json_body<T>(&mut self, value: &T) -> Result<&mut Self>
    where
        T: Serialize + ?Sized,
    {
        self.ensure_no_form_parts("json")?;
        let encoded = serde_json::to_vec(value)?;
        self.body = RequestBody::Json(Bytes::from(encoded));
        Ok(self)
    }

    /// Append one multipart part. Parts accumulate, including repeated field names.
    ///
    /// Fails with [`Error::Encoding`] if a JSON or raw body is already set, or if the
    /// part's content type is not a valid header value.
    pub fn add_form_part(&mut self, part: FormPart) -> Result<&mut Self> {
        if HeaderValue::from_str(&part.content_type).is_err() {
            return Err(Error::encoding_with_context(
                "Invalid form-data part content type",
                ErrorContext::new()
                    .with_field_path(format!("form_data.{}.content_type", part.field_name))
                    .with_source("request_builder"),
            ));
        }
        if self.body.is_none() {
            self.body = RequestBody::FormData(Vec::new());
        }
        match &mut self.body {
            RequestBody::FormData(parts) => parts.push(part),
            other => {
                return Err(Error::encoding_with_context(
                    format!("Cannot add a form-data part to a request with a {} body", other.kind()),
                    ErrorContext::new()
                        .with_field_path(format!("form_data.{}", part.field_name))
                        .with_source("request_builder"),
                ));
            }
        }
        Ok(self)
    }

    pub fn set_form_data_part(
        &mut self,
        field_name: impl Into<String>,
        filename: Option<String>,
        content_type: impl Into<String>,
        data: impl Into<Bytes>,
    ) -> Result<&mut Self> {
        self.add_form_part(FormPart::new(field_name, filename, content_type, data))
    }

    /// Attach a raw body such as `text/plain` input.
    ///
    /// Replaces a previous JSON or raw body; fails with [`Error::Encoding`] once form
    /// parts have been added.
    pub fn set_raw_body(
        &mut self,
        content_type: impl Into<String>,
        data: impl Into<Bytes>,
    ) -> Result<&mut Self> {
        self.ensure_no_form_parts("raw")?;
        self.body = RequestBody::Raw {
            content_type: content_type.into(),
            data: data.into(),
        };
        Ok(self)
    }

    pub fn body(&self) -> &RequestBody {
        &self.body
    }

    pub fn method(&self) -> &Method {
        &self.method
    }

    fn ensure_no_form_parts(&self, kind: &str) -> Result<()> {
        if matches!(self.body, RequestBody::FormData(_)) {
            return Err(Error::encoding_with_context(
                format!("Cannot set a {} body after form-data parts were added", kind),
                ErrorContext::new()
                    .with_field_path("body")
                    .with_source("request_builder"),
            ));
        }
        Ok(())
    }

    /// Finalize into an immutable request.
    ///
    /// Fails with [`Error::InvalidPath`] if no URL was constructed and with
    /// [`Error::Encoding`] if a header name or value is not valid HTTP.
    pub fn build(self) -> Result<HttpRequest> {
        let mut url = self.url.ok_or_else(|| {
            Error::invalid_path_with_context(
                "No URL was constructed for this request",
                ErrorContext::new().with_source("request_builder"),
            )
        })?;

        if !self.query.is_empty() {
            url.query_pairs_mut().extend_pairs(self.query.iter());
        }

        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static(JSON_CONTENT_TYPE));
        for (name, value) in &self.headers {
            insert_header(&mut headers, name, value)?;
        }

        match &self.body {
            RequestBody::Json(_) if !headers.contains_key(CONTENT_TYPE) => {
                headers.insert(CONTENT_TYPE, HeaderValue::from_static(JSON_CONTENT_TYPE));
            }
            RequestBody::Raw { content_type, .. } => {
                insert_header(&mut headers, CONTENT_TYPE.as_str(), content_type)?;
            }
            _ => {}
        }

        for (name, value) in &self.overrides {
            insert_header(&mut headers, name, value)?;
        }
        if matches!(self.body, RequestBody::FormData(_)) {
            headers.remove(CONTENT_TYPE);
        }

        Ok(HttpRequest::new(self.method, url, headers, self.body))
    }
}

fn set_entry(entries: &mut Vec<(String, String)>, name: String, value: String) {
    match entries.iter_mut().find(|(k, _)| k.eq_ignore_ascii_case(&name)) {
        Some(entry) => entry.1 = value,
        None => entries.push((name, value)),
    }
}

fn insert_header(headers: &mut HeaderMap, name: &str, value: &str) -> Result<()> {
    let header_name = HeaderName::from_bytes(name.as_bytes()).map_err(|e| {
        Error::encoding_with_context(
            format!("Invalid header name: {}", e),
            ErrorContext::new()
                .with_field_path(format!("headers.{}", name))
                .with_source("request_builder"),
        )
    })?;
    let mut header_value = HeaderValue::from_str(value).map_err(|e| {
        Error::encoding_with_context(
            format!("Invalid header value: {}", e),
            ErrorContext::new()
                .with_field_path(format!("headers.{}", name))
                .with_source("request_builder"),
        )
    })?;
    if header_name == AUTHORIZATION {
        header_value.set_sensitive(true);
    }
    headers.insert(header_name, header_value);
    Ok(())
}
