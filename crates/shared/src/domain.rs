use std::fmt;

use serde::{Deserialize, Serialize};

/// Users the agent service ships seed activity for.
pub const SAMPLE_USER_IDS: [&str; 3] = [
    "sales_rep_001",
    "customer_success_001",
    "product_manager_001",
];

/// A user identifier that is known to be non-empty after trimming.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(String);

impl UserId {
    pub fn parse(raw: &str) -> Option<Self> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(Self(trimmed.to_string()))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QueryMode {
    #[default]
    Recommendations,
    Activities,
}

impl QueryMode {
    pub const ALL: [QueryMode; 2] = [QueryMode::Recommendations, QueryMode::Activities];

    pub fn label(self) -> &'static str {
        match self {
            QueryMode::Recommendations => "Recommendations",
            QueryMode::Activities => "Activity Log",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    High,
    Medium,
    Low,
    Unknown,
}

impl Priority {
    /// Case-insensitive and total: anything unrecognised is `Unknown`.
    pub fn classify(raw: &str) -> Self {
        let normalized = raw.trim();
        if normalized.eq_ignore_ascii_case("high") {
            Priority::High
        } else if normalized.eq_ignore_ascii_case("medium") {
            Priority::Medium
        } else if normalized.eq_ignore_ascii_case("low") {
            Priority::Low
        } else {
            Priority::Unknown
        }
    }
}
