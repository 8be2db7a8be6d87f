use reqwest::StatusCode;
use thiserror::Error;

/// Ways a single fetch can fail. Each one ends the cycle it occurred in.
#[derive(Debug, Error)]
pub enum FetchError {
    /// The provider answered with something other than 200 OK.
    #[error("unexpected HTTP status {status}: {body}")]
    Status { status: StatusCode, body: String },

    /// The request could not be sent or the body could not be read.
    #[error("request failed: {0}")]
    Transport(reqwest::Error),

    /// The body did not match the expected schema.
    #[error("failed to decode weather response: {0}")]
    Decode(#[from] serde_json::Error),
}

impl From<reqwest::Error> for FetchError {
    fn from(err: reqwest::Error) -> Self {
        // The URL carries the api key as a query parameter.
        FetchError::Transport(err.without_url())
    }
}

pub(crate) fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    match body.char_indices().nth(MAX) {
        Some((idx, _)) => format!("{}...", &body[..idx]),
        None => body.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_body_is_kept() {
        assert_eq!(truncate_body("Invalid API key"), "Invalid API key");
    }

    #[test]
    fn long_body_is_truncated_on_char_boundary() {
        let body = "é".repeat(300);
        let truncated = truncate_body(&body);

        assert_eq!(truncated.chars().count(), 203);
        assert!(truncated.ends_with("..."));
    }

    #[test]
    fn status_error_mentions_code() {
        let err = FetchError::Status {
            status: StatusCode::UNAUTHORIZED,
            body: String::new(),
        };

        assert!(err.to_string().contains("401"));
    }
}
