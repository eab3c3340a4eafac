use reqwest::header::HeaderMap;

/// A decoded 2xx response together with its HTTP metadata.
#[derive(Debug, Clone)]
pub struct DetailedResponse<T> {
    pub status_code: u16,
    pub headers: HeaderMap,
    pub result: T,
}

impl<T> DetailedResponse<T> {
    pub fn new(status_code: u16, headers: HeaderMap, result: T) -> Self {
        Self {
            status_code,
            headers,
            result,
        }
    }

    pub fn status_code(&self) -> u16 {
        self.status_code
    }

    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    pub fn result(&self) -> &T {
        &self.result
    }

    /// Drop the metadata and keep the decoded value.
    pub fn into_result(self) -> T {
        self.result
    }

    pub fn map<U, F>(self, f: F) -> DetailedResponse<U>
    where
        F: FnOnce(T) -> U,
    {
        DetailedResponse {
            status_code: self.status_code,
            headers: self.headers,
            result: f(self.result),
        }
    }

    /// First value of a response header as text.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }
}
