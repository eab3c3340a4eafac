use crate::{Error, ErrorContext, Result};
use url::Url;

/// Join a base URL, path segments and positional path parameters.
///
/// Parameter `i` is placed right after segment `i`, so `["v3/models"]` with
/// `["my-model"]` gives `<base>/v3/models/my-model`. Segments may contain `/` and are
/// taken literally; each parameter is percent-encoded as a single path segment
/// (a `/` inside a parameter becomes `%2F`).
///
/// Fails with [`Error::InvalidPath`] if there are more parameters than segments, a
/// parameter is empty or a dot-segment (`.` or `..`), or the result is not a valid
/// hierarchical URL.
pub fn construct_url<S, P>(base_url: &str, path_segments: &[S], path_parameters: &[P]) -> Result<Url>
where
    S: AsRef<str>,
    P: AsRef<str>,
{
    if path_parameters.len() > path_segments.len() {
        return Err(Error::invalid_path_with_context(
            format!(
                "{} path parameters supplied for {} path segments",
                path_parameters.len(),
                path_segments.len()
            ),
            ErrorContext::new()
                .with_field_path("path_parameters")
                .with_source("request_builder"),
        ));
    }

    let mut url = Url::parse(base_url.trim_end_matches('/')).map_err(|e| {
        Error::invalid_path_with_context(
            format!("Invalid base URL: {}", e),
            ErrorContext::new()
                .with_details(base_url.to_string())
                .with_source("request_builder"),
        )
    })?;

    {
        let mut segments = url.path_segments_mut().map_err(|_| {
            Error::invalid_path_with_context(
                "Base URL cannot carry a path",
                ErrorContext::new()
                    .with_details(base_url.to_string())
                    .with_source("request_builder"),
            )
        })?;
        segments.pop_if_empty();

        for (i, segment) in path_segments.iter().enumerate() {
            for piece in segment.as_ref().split('/').filter(|p| !p.is_empty()) {
                segments.push(piece);
            }
            if let Some(param) = path_parameters.get(i) {
                let param = param.as_ref();
                if param.is_empty() {
                    return Err(Error::invalid_path_with_context(
                        "Path parameter must not be empty",
                        ErrorContext::new()
                            .with_field_path(format!("path_parameters[{}]", i))
                            .with_source("request_builder"),
                    ));
                }
                // URL normalization would resolve these against the preceding segment.
                if is_dot_segment(param) {
                    return Err(Error::invalid_path_with_context(
                        format!("Path parameter '{}' is a dot-segment", param),
                        ErrorContext::new()
                            .with_field_path(format!("path_parameters[{}]", i))
                            .with_source("request_builder"),
                    ));
                }
                segments.push(param);
            }
        }
    }

    Ok(url)
}

fn is_dot_segment(param: &str) -> bool {
    let lowered = param.to_ascii_lowercase();
    matches!(
        lowered.as_str(),
        "." | ".." | "%2e" | "%2e%2e" | ".%2e" | "%2e."
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    const BASE: &str = "https://gateway.example.com/language-translator/api";
    const NONE: [&str; 0] = [];

    #[test]
    fn joins_segments_with_single_slash() {
        let url = construct_url(&format!("{}/", BASE), &["v3/translate"], &NONE).unwrap();
        assert_eq!(
            url.as_str(),
            "https://gateway.example.com/language-translator/api/v3/translate"
        );
    }

    #[test]
    fn parameter_follows_its_segment() {
        let url = construct_url(BASE, &["v3/models"], &["en-es"]).unwrap();
        assert_eq!(url.path(), "/language-translator/api/v3/models/en-es");

        let url = construct_url(BASE, &["a", "b"], &["p1"]).unwrap();
        assert_eq!(url.path(), "/language-translator/api/a/p1/b");

        let url = construct_url(BASE, &["v1/workspaces", "intents"], &["ws-1", "greeting"])
            .unwrap();
        assert_eq!(
            url.path(),
            "/language-translator/api/v1/workspaces/ws-1/intents/greeting"
        );
    }

    #[test]
    fn parameters_are_percent_encoded() {
        let url = construct_url(BASE, &["v3/models"], &["my model/v2?x#y"]).unwrap();
        assert_eq!(
            url.path(),
            "/language-translator/api/v3/models/my%20model%2Fv2%3Fx%23y"
        );
        assert!(url.query().is_none());
    }

    #[test]
    fn too_many_parameters_is_invalid_path() {
        let err = construct_url(BASE, &["v3/models"], &["a", "b"]).unwrap_err();
        assert!(matches!(err, Error::InvalidPath { .. }));
    }

    #[test]
    fn empty_parameter_is_invalid_path() {
        let err = construct_url(BASE, &["v3/models"], &[""]).unwrap_err();
        assert!(matches!(err, Error::InvalidPath { .. }));
    }

    #[test]
    fn dot_segment_parameter_is_invalid_path() {
        for param in [".", "..", "%2E", "%2e%2E", ".%2e"] {
            let err = construct_url(BASE, &["v3/models"], &[param]).unwrap_err();
            assert!(matches!(err, Error::InvalidPath { .. }), "{param}");
        }

        let url = construct_url(BASE, &["v3/models"], &["..."]).unwrap();
        assert_eq!(url.path(), "/language-translator/api/v3/models/...");
        let url = construct_url(BASE, &["v3/models"], &["en.v2"]).unwrap();
        assert_eq!(url.path(), "/language-translator/api/v3/models/en.v2");
    }

    #[test]
    fn unparseable_base_is_invalid_path() {
        let err = construct_url("not a url", &["v3"], &NONE).unwrap_err();
        assert!(matches!(err, Error::InvalidPath { .. }));

        let err = construct_url("mailto:someone@example.com", &["v3"], &NONE).unwrap_err();
        assert!(matches!(err, Error::InvalidPath { .. }));
    }
}
