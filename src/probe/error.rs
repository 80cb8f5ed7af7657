use reqwest::StatusCode;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ProbeError {
    #[error("unexpected status: expected {expected}, got {actual}{}", format_body(.body))]
    UnexpectedStatus {
        expected: StatusCode,
        actual: StatusCode,
        body: String,
    },

    #[error("assertion failed: {0}")]
    Assertion(String),

    #[error("invalid response: {0}")]
    InvalidResponse(String),

    #[error("service unreachable: {0}")]
    ServiceUnreachable(String),

    #[error("request timed out: {0}")]
    Timeout(String),

    #[error("request failed: {0}")]
    Request(String),

    #[error("datastore unreachable: {0}")]
    DatastoreUnreachable(String),

    #[error("missing fixture: {0} was not captured by an earlier probe")]
    MissingFixture(&'static str),

    #[error("probe panicked: {0}")]
    Panicked(String),
}

fn format_body(body: &str) -> String {
    if body.is_empty() {
        String::new()
    } else {
        format!(" ({})", body)
    }
}

impl From<reqwest::Error> for ProbeError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            ProbeError::Timeout(err.to_string())
        } else if err.is_connect() {
            ProbeError::ServiceUnreachable(err.to_string())
        } else if err.is_decode() {
            ProbeError::InvalidResponse(err.to_string())
        } else {
            ProbeError::Request(err.to_string())
        }
    }
}

impl ProbeError {
    /// True when the failure came from not reaching a dependency at all.
    pub fn is_connectivity(&self) -> bool {
        matches!(
            self,
            ProbeError::ServiceUnreachable(_)
                | ProbeError::DatastoreUnreachable(_)
                | ProbeError::Timeout(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unexpected_status_message() {
        let err = ProbeError::UnexpectedStatus {
            expected: StatusCode::CREATED,
            actual: StatusCode::BAD_REQUEST,
            body: String::new(),
        };
        assert_eq!(
            err.to_string(),
            "unexpected status: expected 201 Created, got 400 Bad Request"
        );

        let err = ProbeError::UnexpectedStatus {
            expected: StatusCode::OK,
            actual: StatusCode::INTERNAL_SERVER_ERROR,
            body: "boom".to_string(),
        };
        assert!(err.to_string().ends_with("(boom)"));
    }

    #[test]
    fn test_connectivity_classification() {
        assert!(ProbeError::ServiceUnreachable("refused".into()).is_connectivity());
        assert!(ProbeError::DatastoreUnreachable("timeout".into()).is_connectivity());
        assert!(!ProbeError::Assertion("empty".into()).is_connectivity());
        assert!(!ProbeError::MissingFixture("poll id").is_connectivity());
    }
}
