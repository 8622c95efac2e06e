use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiErrorKind {
    /// The request never produced a response (connect, DNS, timeout, body read).
    Network,
    /// The API answered with a non-success status.
    Http(u16),
    /// The response body did not match the expected JSON shape.
    Decode,
}

#[derive(Debug, Clone)]
pub struct ApiError {
    pub kind: ApiErrorKind,
    pub endpoint: &'static str,
    pub detail: String,
}

impl ApiError {
    pub fn network(endpoint: &'static str, detail: impl Into<String>) -> Self {
        Self {
            kind: ApiErrorKind::Network,
            endpoint,
            detail: detail.into(),
        }
    }

    pub fn http(endpoint: &'static str, status: u16, detail: impl Into<String>) -> Self {
        Self {
            kind: ApiErrorKind::Http(status),
            endpoint,
            detail: detail.into(),
        }
    }

    pub fn decode(endpoint: &'static str, detail: impl Into<String>) -> Self {
        Self {
            kind: ApiErrorKind::Decode,
            endpoint,
            detail: detail.into(),
        }
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            ApiErrorKind::Network => {
                write!(f, "ESG API network error ({}): {}", self.endpoint, self.detail)
            }
            ApiErrorKind::Http(status) => write!(
                f,
                "ESG API HTTP {status} ({}): {}",
                self.endpoint, self.detail
            ),
            ApiErrorKind::Decode => write!(
                f,
                "ESG API response decode failed ({}): {}",
                self.endpoint, self.detail
            ),
        }
    }
}

impl std::error::Error for ApiError {}
