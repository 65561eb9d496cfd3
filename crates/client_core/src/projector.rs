//! Pure projections from settled results to a renderable model.
//!
//! Projection never fails: empty result lists become an explicit empty state
//! and unrecognised priorities fall into [`Severity::Unknown`].

use std::fmt::Display;

use chrono::{DateTime, Local, TimeZone, Utc};
use shared::domain::{Priority, QueryMode};

use crate::types::{ActivityResult, RecommendationResult};

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Severity {
    High,
    Medium,
    Low,
    Unknown,
}

impl Severity {
    pub fn classify(raw_priority: &str) -> Self {
        Priority::classify(raw_priority).into()
    }

    pub fn class_name(self) -> &'static str {
        match self {
            Severity::High => "high",
            Severity::Medium => "medium",
            Severity::Low => "low",
            Severity::Unknown => "unknown",
        }
    }
}

impl From<Priority> for Severity {
    fn from(value: Priority) -> Self {
        match value {
            Priority::High => Severity::High,
            Priority::Medium => Severity::Medium,
            Priority::Low => Severity::Low,
            Priority::Unknown => Severity::Unknown,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecommendationRow {
    /// 1-based position in server rank order.
    pub ordinal: usize,
    pub action: String,
    pub priority_label: String,
    pub severity: Severity,
    pub reason: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActivityRow {
    pub key: String,
    pub action: String,
    pub timestamp: String,
    /// `None` when the activity has no (or only blank) context.
    pub context: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DisplayRow {
    Recommendation(RecommendationRow),
    Activity(ActivityRow),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmptyState {
    pub title: String,
    pub hint: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayModel {
    pub mode: QueryMode,
    pub title: String,
    pub summary: String,
    pub rows: Vec<DisplayRow>,
    pub footer: Option<String>,
    pub empty_state: Option<EmptyState>,
}

impl DisplayModel {
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

pub fn format_timestamp<Tz>(timestamp: &DateTime<Utc>, tz: &Tz) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    timestamp
        .with_timezone(tz)
        .format(TIMESTAMP_FORMAT)
        .to_string()
}

pub fn project_recommendations(result: &RecommendationResult) -> DisplayModel {
    project_recommendations_in(result, &Local)
}

pub fn project_recommendations_in<Tz>(result: &RecommendationResult, tz: &Tz) -> DisplayModel
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    let rows: Vec<DisplayRow> = result
        .items
        .iter()
        .enumerate()
        .map(|(index, item)| {
            DisplayRow::Recommendation(RecommendationRow {
                ordinal: index + 1,
                action: item.action.clone(),
                priority_label: priority_badge(&item.priority_label, item.priority),
                severity: item.priority.into(),
                reason: item.reason.clone(),
            })
        })
        .collect();

    let empty_state = rows.is_empty().then(|| EmptyState {
        title: "No recommendations".to_string(),
        hint: "The agent returned no recommendations for this user.".to_string(),
    });

    DisplayModel {
        mode: QueryMode::Recommendations,
        title: "AI-Generated Recommendations".to_string(),
        summary: format!("for {}", result.user_id),
        rows,
        footer: Some(format!(
            "Analysis completed at {}",
            format_timestamp(&result.analysis_timestamp, tz)
        )),
        empty_state,
    }
}

pub fn project_activities(result: &ActivityResult) -> DisplayModel {
    project_activities_in(result, &Local)
}

pub fn project_activities_in<Tz>(result: &ActivityResult, tz: &Tz) -> DisplayModel
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    let rows: Vec<DisplayRow> = result
        .items
        .iter()
        .map(|activity| {
            DisplayRow::Activity(ActivityRow {
                key: activity.id.clone(),
                action: activity.action.clone(),
                timestamp: format_timestamp(&activity.timestamp, tz),
                context: activity
                    .context
                    .as_deref()
                    .map(str::trim)
                    .filter(|context| !context.is_empty())
                    .map(str::to_string),
            })
        })
        .collect();

    let empty_state = rows.is_empty().then(|| EmptyState {
        title: "No activity yet".to_string(),
        hint: format!("No activities were logged for {}.", result.user_id),
    });

    DisplayModel {
        mode: QueryMode::Activities,
        title: "Recent Activity Log".to_string(),
        summary: format!("{} activities found", result.count),
        rows,
        footer: None,
        empty_state,
    }
}

/// Badge text: the server's own wording, or the classified name when it sent nothing.
fn priority_badge(raw: &str, priority: Priority) -> String {
    let raw = raw.trim();
    if !raw.is_empty() {
        return raw.to_string();
    }
    match priority {
        Priority::High => "High",
        Priority::Medium => "Medium",
        Priority::Low => "Low",
        Priority::Unknown => "Unknown",
    }
    .to_string()
}

#[cfg(test)]
#[path = "tests/projector_tests.rs"]
mod tests;
