use thiserror::Error;

/// Failure of a remote-store call.
///
/// Timeouts, connection failures and server errors are indistinguishable to
/// the caller: all of them collapse to `Unavailable`. The carried string is
/// diagnostic only and feeds the log, not control flow.
#[derive(Error, Debug)]
pub enum RemoteError {
    #[error("remote store unavailable: {0}")]
    Unavailable(String),
}

/// Maximum length for error response bodies in error messages
const MAX_ERROR_BODY_LENGTH: usize = 500;

impl RemoteError {
    /// Truncate a response body to avoid logging excessive data
    fn truncate_body(body: &str) -> String {
        if body.len() <= MAX_ERROR_BODY_LENGTH {
            body.to_string()
        } else {
            format!(
                "{}... (truncated, {} total bytes)",
                &body[..MAX_ERROR_BODY_LENGTH],
                body.len()
            )
        }
    }

    pub fn from_status(status: reqwest::StatusCode, body: &str) -> Self {
        RemoteError::Unavailable(format!("status {}: {}", status, Self::truncate_body(body)))
    }
}

impl From<reqwest::Error> for RemoteError {
    fn from(err: reqwest::Error) -> Self {
        RemoteError::Unavailable(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_long_bodies_are_truncated() {
        let body = "x".repeat(2000);
        let err = RemoteError::from_status(reqwest::StatusCode::INTERNAL_SERVER_ERROR, &body);
        let RemoteError::Unavailable(message) = err;
        assert!(message.len() < 700);
        assert!(message.contains("truncated"));
    }
}
