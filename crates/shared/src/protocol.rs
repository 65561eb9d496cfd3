use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{de, Deserialize, Deserializer, Serialize};

use crate::domain::UserId;

/// Recommendation count requested from `/api/recommend`.
pub const RECOMMENDATION_LIMIT: u32 = 10;
/// Activity count requested from `/api/activity/{user_id}`.
pub const ACTIVITY_LIMIT: u32 = 20;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecommendRequest {
    pub user_id: UserId,
    pub limit: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecommendResponse {
    pub user_id: String,
    #[serde(deserialize_with = "deserialize_timestamp")]
    pub analysis_timestamp: DateTime<Utc>,
    #[serde(default)]
    pub recommendations: Vec<RecommendationPayload>,
}

/// One entry as generated by the model; the service does not validate fields.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RecommendationPayload {
    #[serde(default)]
    pub action: Option<String>,
    #[serde(default)]
    pub priority: Option<String>,
    #[serde(default)]
    pub reason: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActivityListQuery {
    pub limit: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActivityListResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub count: Option<u64>,
    #[serde(default)]
    pub activities: Vec<ActivityPayload>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActivityPayload {
    #[serde(deserialize_with = "deserialize_activity_key")]
    pub id: String,
    pub action: String,
    #[serde(deserialize_with = "deserialize_timestamp")]
    pub timestamp: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub context: Option<String>,
}

/// Parses an ISO-8601 instant. Values without an offset are taken as UTC,
/// which is how the service serialises `datetime.utcnow()`.
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
        return Some(parsed.with_timezone(&Utc));
    }
    ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"]
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(raw, format).ok())
        .map(|naive| naive.and_utc())
}

fn deserialize_timestamp<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse_timestamp(&raw)
        .ok_or_else(|| de::Error::custom(format!("invalid ISO-8601 timestamp: {raw:?}")))
}

#[derive(Deserialize)]
#[serde(untagged)]
enum ActivityKey {
    Text(String),
    Number(i64),
}

fn deserialize_activity_key<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match ActivityKey::deserialize(deserializer)? {
        ActivityKey::Text(text) => text,
        ActivityKey::Number(number) => number.to_string(),
    })
}
