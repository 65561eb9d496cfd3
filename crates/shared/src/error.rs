use serde::{Deserialize, Serialize};

/// Body the agent service attaches to non-2xx responses.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ErrorBody {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

impl ErrorBody {
    pub fn new(detail: impl Into<String>) -> Self {
        Self {
            detail: Some(detail.into()),
        }
    }

    /// Extracts `detail` from a raw body, if it is a JSON object with a string detail.
    pub fn detail_from_bytes(bytes: &[u8]) -> Option<String> {
        serde_json::from_slice::<ErrorBody>(bytes)
            .ok()
            .and_then(|body| body.detail)
            .filter(|detail| !detail.trim().is_empty())
    }
}
