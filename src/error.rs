use thiserror::Error;

/// A DirectAdmin call that did not produce usable API data.
///
/// Every variant is the same failure from the caller's point of view;
/// the variant only records why, for logs and diagnostics. Panel-level
/// errors (`error=1&text=...`) are not failures here and decode as an
/// ordinary dictionary.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Connection refused, DNS failure, timeout, or broken body
    #[error("Network error: {message}")]
    Transport {
        /// Human-readable error message
        message: String,
    },

    /// Non-2xx status from the panel
    #[error("DirectAdmin returned status {status}")]
    Status {
        /// HTTP status code
        status: u16,
    },

    /// The panel served an HTML page (login form or error page)
    #[error("DirectAdmin returned an HTML page instead of API data")]
    HtmlPage,

    #[error("Failed to parse JSON response: {message}")]
    InvalidJson { message: String },

    /// Username or password cannot be carried in an HTTP header
    #[error("Invalid header value: {message}")]
    InvalidHeader { message: String },

    #[error("Failed to build HTTP client: {message}")]
    ClientBuild { message: String },
}

impl ApiError {
    /// The exchange failed at the HTTP layer (no response, or a non-2xx status).
    pub fn is_transport_error(&self) -> bool {
        matches!(self, ApiError::Transport { .. } | ApiError::Status { .. })
    }

    /// Usually bad credentials or a missing permission.
    pub fn is_html_page(&self) -> bool {
        matches!(self, ApiError::HtmlPage)
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(e: reqwest::Error) -> Self {
        match e.status() {
            Some(status) => ApiError::Status {
                status: status.as_u16(),
            },
            None => ApiError::Transport {
                message: e.to_string(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_predicates() {
        assert!(ApiError::Status { status: 500 }.is_transport_error());
        assert!(ApiError::Transport { message: "refused".into() }.is_transport_error());
        assert!(!ApiError::HtmlPage.is_transport_error());
        assert!(ApiError::HtmlPage.is_html_page());
    }

    #[test]
    fn test_display() {
        let err = ApiError::Status { status: 401 };
        assert_eq!(err.to_string(), "DirectAdmin returned status 401");
    }
}
