use shared::domain::QueryMode;
use thiserror::Error;

pub const MISSING_USER_ID: &str = "missing user id";

#[derive(Debug, Clone, Error)]
pub enum TransportError {
    #[error("request failed: {0}")]
    Network(String),
    #[error("service returned {status}{}", detail_suffix(.detail))]
    Status { status: u16, detail: Option<String> },
    #[error("malformed response body: {0}")]
    Decode(String),
}

impl TransportError {
    /// Message shown to the operator: the service `detail` verbatim when present.
    pub fn user_message(&self, mode: QueryMode) -> String {
        match self {
            TransportError::Status {
                detail: Some(detail),
                ..
            } => detail.clone(),
            _ => generic_failure(mode).to_string(),
        }
    }
}

impl From<reqwest::Error> for TransportError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            TransportError::Decode(err.to_string())
        } else {
            TransportError::Network(err.to_string())
        }
    }
}

#[derive(Debug, Clone, Error)]
pub enum SessionError {
    #[error("{0}")]
    Validation(String),
    #[error(transparent)]
    Transport(#[from] TransportError),
}

impl SessionError {
    pub fn missing_user_id() -> Self {
        SessionError::Validation(MISSING_USER_ID.to_string())
    }
}

fn detail_suffix(detail: &Option<String>) -> String {
    detail
        .as_deref()
        .map(|d| format!(": {d}"))
        .unwrap_or_default()
}

pub fn generic_failure(mode: QueryMode) -> &'static str {
    match mode {
        QueryMode::Recommendations => "Failed to fetch recommendations",
        QueryMode::Activities => "Failed to fetch activities",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_detail_is_surfaced_verbatim() {
        let err = TransportError::Status {
            status: 404,
            detail: Some("No activity found".to_string()),
        };
        assert_eq!(err.user_message(QueryMode::Recommendations), "No activity found");
        assert_eq!(err.to_string(), "service returned 404: No activity found");
    }

    #[test]
    fn falls_back_to_generic_message_per_mode() {
        let err = TransportError::Status {
            status: 502,
            detail: None,
        };
        assert_eq!(
            err.user_message(QueryMode::Recommendations),
            "Failed to fetch recommendations"
        );
        assert_eq!(
            TransportError::Network("connection refused".to_string())
                .user_message(QueryMode::Activities),
            "Failed to fetch activities"
        );
        assert_eq!(
            TransportError::Decode("eof".to_string()).user_message(QueryMode::Activities),
            "Failed to fetch activities"
        );
    }

    #[test]
    fn validation_error_names_the_missing_field() {
        assert_eq!(SessionError::missing_user_id().to_string(), "missing user id");
    }
}
