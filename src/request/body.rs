use bytes::Bytes;

/// One part of a `multipart/form-data` body.
///
/// Parts stay structured until the transport sends them; [`HttpTransport`] encodes
/// them with `reqwest::multipart`.
///
/// [`HttpTransport`]: crate::transport::HttpTransport
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormPart {
    pub field_name: String,
    pub filename: Option<String>,
    pub content_type: String,
    pub data: Bytes,
}

impl FormPart {
    pub fn new(
        field_name: impl Into<String>,
        filename: Option<String>,
        content_type: impl Into<String>,
        data: impl Into<Bytes>,
    ) -> Self {
        Self {
            field_name: field_name.into(),
            filename,
            content_type: content_type.into(),
            data: data.into(),
        }
    }
}

/// The single body variant a request carries.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum RequestBody {
    #[default]
    None,
    /// Compact JSON document.
    Json(Bytes),
    /// Ordered multipart parts; repeated field names are kept.
    FormData(Vec<FormPart>),
    Raw { content_type: String, data: Bytes },
}

impl RequestBody {
    pub fn is_none(&self) -> bool {
        matches!(self, RequestBody::None)
    }

    /// Encoded bytes of a JSON or raw body. `None` for no body and for form data.
    pub fn as_bytes(&self) -> Option<&Bytes> {
        match self {
            RequestBody::Json(data) | RequestBody::Raw { data, .. } => Some(data),
            RequestBody::None | RequestBody::FormData(_) => None,
        }
    }

    pub fn form_parts(&self) -> Option<&[FormPart]> {
        match self {
            RequestBody::FormData(parts) => Some(parts),
            _ => None,
        }
    }

    pub(crate) fn kind(&self) -> &'static str {
        match self {
            RequestBody::None => "none",
            RequestBody::Json(_) => "json",
            RequestBody::FormData(_) => "form-data",
            RequestBody::Raw { .. } => "raw",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_json_and_raw_expose_bytes() {
        assert!(RequestBody::None.as_bytes().is_none());
        assert_eq!(
            RequestBody::Json(Bytes::from_static(b"{}")).as_bytes().unwrap().as_ref(),
            b"{}"
        );
        let raw = RequestBody::Raw {
            content_type: "text/plain".into(),
            data: Bytes::from_static(b"hello"),
        };
        assert_eq!(raw.as_bytes().unwrap().as_ref(), b"hello");

        let form = RequestBody::FormData(vec![FormPart::new(
            "forced_glossary",
            None,
            "application/octet-stream",
            "x",
        )]);
        assert!(form.as_bytes().is_none());
        assert_eq!(form.form_parts().map(|p| p.len()), Some(1));
        assert_eq!(form.kind(), "form-data");
    }
}
