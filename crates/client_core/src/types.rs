//! Settled results as held by the session, converted from the wire DTOs.

use chrono::{DateTime, Utc};
use shared::{
    domain::{Priority, QueryMode, UserId},
    protocol::{ActivityListResponse, ActivityPayload, RecommendResponse, RecommendationPayload},
};

use crate::error::TransportError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Recommendation {
    pub action: String,
    pub priority: Priority,
    /// Priority exactly as the service sent it, used for the badge text.
    pub priority_label: String,
    pub reason: String,
}

/// Items are kept in server rank order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecommendationResult {
    pub user_id: String,
    pub analysis_timestamp: DateTime<Utc>,
    pub items: Vec<Recommendation>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Activity {
    pub id: String,
    pub action: String,
    pub timestamp: DateTime<Utc>,
    pub context: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActivityResult {
    pub user_id: String,
    pub count: u64,
    pub items: Vec<Activity>,
}

/// Either settled payload, tagged by the mode it belongs to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryPayload {
    Recommendations(RecommendationResult),
    Activities(ActivityResult),
}

impl QueryPayload {
    pub fn mode(&self) -> QueryMode {
        match self {
            QueryPayload::Recommendations(_) => QueryMode::Recommendations,
            QueryPayload::Activities(_) => QueryMode::Activities,
        }
    }
}

impl TryFrom<RecommendResponse> for RecommendationResult {
    type Error = TransportError;

    fn try_from(value: RecommendResponse) -> Result<Self, Self::Error> {
        let items = value
            .recommendations
            .into_iter()
            .enumerate()
            .map(|(index, payload)| recommendation_from_payload(index, payload))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self {
            user_id: value.user_id,
            analysis_timestamp: value.analysis_timestamp,
            items,
        })
    }
}

fn recommendation_from_payload(
    index: usize,
    payload: RecommendationPayload,
) -> Result<Recommendation, TransportError> {
    let action = payload
        .action
        .map(|action| action.trim().to_string())
        .filter(|action| !action.is_empty())
        .ok_or_else(|| {
            TransportError::Decode(format!("recommendation #{} has no action", index + 1))
        })?;
    let priority_label = payload.priority.unwrap_or_default();
    Ok(Recommendation {
        action,
        priority: Priority::classify(&priority_label),
        priority_label,
        reason: payload.reason.unwrap_or_default(),
    })
}

impl ActivityResult {
    /// The activity endpoint does not echo the user id, so the issue-time id is attached.
    pub fn from_response(user_id: &UserId, response: ActivityListResponse) -> Self {
        let items: Vec<Activity> = response
            .activities
            .into_iter()
            .map(|ActivityPayload { id, action, timestamp, context }| Activity {
                id,
                action,
                timestamp,
                context,
            })
            .collect();
        Self {
            user_id: user_id.to_string(),
            count: response.count.unwrap_or(items.len() as u64),
            items,
        }
    }
}
