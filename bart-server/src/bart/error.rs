//! API client error types.

/// Errors that can occur when talking to the backend.
///
/// All variants mean "this fetch failed"; the polling layer does not
/// distinguish between them. There is no retry.
#[derive(Debug, thiserror::Error)]
pub enum BartError {
    /// HTTP request failed (transport error, timeout, DNS)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Backend returned a non-2xx status
    #[error("API error {status}: {message}")]
    Api { status: u16, message: String },

    /// Backend answered 2xx but the response envelope reported an error
    #[error("backend error: {message}")]
    Backend { message: String },

    /// Failed to parse response JSON
    #[error("JSON parse error: {message}")]
    Json {
        message: String,
        /// Truncated response body, for diagnostics.
        body: Option<String>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = BartError::Api {
            status: 500,
            message: "Internal Server Error".into(),
        };
        assert_eq!(err.to_string(), "API error 500: Internal Server Error");

        let err = BartError::Backend {
            message: "no rows".into(),
        };
        assert_eq!(err.to_string(), "backend error: no rows");

        let err = BartError::Json {
            message: "expected value".into(),
            body: Some("<html>".into()),
        };
        assert!(err.to_string().contains("JSON parse error"));
    }
}
