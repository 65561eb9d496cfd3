//! The request session: one mutable view-state record and the intents that
//! mutate it.
//!
//! A request is split into [`Session::begin`], which validates input and
//! hands out a [`RequestTicket`], and [`Session::settle`], which applies the
//! outcome. Every ticket carries a sequence number; only the most recently
//! issued ticket of a mode may change what is displayed, so a slow earlier
//! response can never overwrite a faster later one.

use std::fmt::Display;

use chrono::{Local, TimeZone};
use shared::domain::{QueryMode, UserId};
use tracing::{debug, info, warn};

use crate::{
    error::{SessionError, TransportError, MISSING_USER_ID},
    projector::{project_activities_in, project_recommendations_in, DisplayModel},
    transport::AgentApi,
    types::{ActivityResult, QueryPayload, RecommendationResult},
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestTicket {
    seq: u64,
    mode: QueryMode,
    user_id: UserId,
}

impl RequestTicket {
    pub fn seq(&self) -> u64 {
        self.seq
    }

    pub fn mode(&self) -> QueryMode {
        self.mode
    }

    /// The id as it was when the request was issued.
    pub fn user_id(&self) -> &UserId {
        &self.user_id
    }

    /// Performs the single outbound call this ticket stands for.
    pub async fn execute(&self, api: &dyn AgentApi) -> Result<QueryPayload, TransportError> {
        match self.mode {
            QueryMode::Recommendations => api
                .fetch_recommendations(&self.user_id)
                .await
                .map(QueryPayload::Recommendations),
            QueryMode::Activities => api
                .fetch_activities(&self.user_id)
                .await
                .map(QueryPayload::Activities),
        }
    }
}

/// A finished call, ready to hand back to the session that issued it.
#[derive(Debug, Clone)]
pub struct Settlement {
    pub ticket: RequestTicket,
    pub outcome: Result<QueryPayload, TransportError>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettleOutcome {
    Applied,
    /// A newer request for the same mode was issued, or the user id changed.
    Stale,
}

#[derive(Debug, Default, Clone, Copy)]
struct Lane {
    latest_seq: u64,
    in_flight: bool,
}

#[derive(Debug, Default)]
pub struct Session {
    user_id: String,
    mode: QueryMode,
    error: Option<String>,
    recommendation_result: Option<RecommendationResult>,
    activity_result: Option<ActivityResult>,
    next_seq: u64,
    recommendations_lane: Lane,
    activities_lane: Lane,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_user_id(user_id: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            ..Self::default()
        }
    }

    pub fn user_id(&self) -> &str {
        &self.user_id
    }

    pub fn mode(&self) -> QueryMode {
        self.mode
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn recommendation_result(&self) -> Option<&RecommendationResult> {
        self.recommendation_result.as_ref()
    }

    pub fn activity_result(&self) -> Option<&ActivityResult> {
        self.activity_result.as_ref()
    }

    pub fn is_loading(&self) -> bool {
        self.recommendations_lane.in_flight || self.activities_lane.in_flight
    }

    pub fn is_loading_for(&self, mode: QueryMode) -> bool {
        self.lane(mode).in_flight
    }

    /// Switches the displayed mode. Results, errors and in-flight calls are kept.
    pub fn select_mode(&mut self, mode: QueryMode) {
        self.mode = mode;
    }

    /// Records an edit of the user id input. Changing the effective id
    /// discards every response still in flight.
    pub fn set_user_id(&mut self, raw: impl Into<String>) {
        let raw = raw.into();
        if raw.trim() != self.user_id.trim() && self.is_loading() {
            debug!(
                from = %self.user_id.trim(),
                to = %raw.trim(),
                "user id changed while loading; pending responses will be discarded"
            );
            self.recommendations_lane.in_flight = false;
            self.activities_lane.in_flight = false;
        }
        self.user_id = raw;
    }

    pub fn begin_recommendations(&mut self, raw_user_id: &str) -> Result<RequestTicket, SessionError> {
        self.begin(QueryMode::Recommendations, raw_user_id)
    }

    pub fn begin_activities(&mut self, raw_user_id: &str) -> Result<RequestTicket, SessionError> {
        self.begin(QueryMode::Activities, raw_user_id)
    }

    /// Validates the id and marks `mode` as loading. The returned ticket
    /// supersedes any earlier ticket of the same mode.
    pub fn begin(&mut self, mode: QueryMode, raw_user_id: &str) -> Result<RequestTicket, SessionError> {
        let Some(user_id) = UserId::parse(raw_user_id) else {
            self.error = Some(MISSING_USER_ID.to_string());
            return Err(SessionError::missing_user_id());
        };

        if self.user_id.trim() != user_id.as_str() {
            self.user_id = user_id.to_string();
        }

        self.next_seq += 1;
        let seq = self.next_seq;
        let lane = self.lane_mut(mode);
        lane.latest_seq = seq;
        lane.in_flight = true;
        self.error = None;

        info!(seq, ?mode, user_id = %user_id, "issuing request");
        Ok(RequestTicket { seq, mode, user_id })
    }

    /// Applies a finished call if its ticket is still the latest for its mode.
    pub fn settle(
        &mut self,
        ticket: RequestTicket,
        outcome: Result<QueryPayload, TransportError>,
    ) -> SettleOutcome {
        let lane = self.lane(ticket.mode);
        if !lane.in_flight || lane.latest_seq != ticket.seq {
            debug!(
                seq = ticket.seq,
                latest = lane.latest_seq,
                mode = ?ticket.mode,
                "discarding stale response"
            );
            return SettleOutcome::Stale;
        }
        self.lane_mut(ticket.mode).in_flight = false;

        let outcome = outcome.and_then(|payload| {
            if payload.mode() == ticket.mode {
                Ok(payload)
            } else {
                Err(TransportError::Decode(format!(
                    "expected {:?} payload, got {:?}",
                    ticket.mode,
                    payload.mode()
                )))
            }
        });

        match outcome {
            Ok(QueryPayload::Recommendations(result)) => {
                info!(seq = ticket.seq, items = result.items.len(), "recommendations settled");
                self.recommendation_result = Some(result);
                self.error = None;
            }
            Ok(QueryPayload::Activities(result)) => {
                info!(seq = ticket.seq, items = result.items.len(), "activities settled");
                self.activity_result = Some(result);
                self.error = None;
            }
            Err(err) => {
                warn!(seq = ticket.seq, mode = ?ticket.mode, "request failed: {err}");
                self.error = Some(err.user_message(ticket.mode));
                match ticket.mode {
                    QueryMode::Recommendations => self.recommendation_result = None,
                    QueryMode::Activities => self.activity_result = None,
                }
            }
        }
        SettleOutcome::Applied
    }

    pub fn settle_with(&mut self, settlement: Settlement) -> SettleOutcome {
        self.settle(settlement.ticket, settlement.outcome)
    }

    pub async fn request_recommendations(
        &mut self,
        api: &dyn AgentApi,
        raw_user_id: &str,
    ) -> Result<(), SessionError> {
        self.request(api, QueryMode::Recommendations, raw_user_id)
            .await
    }

    pub async fn request_activities(
        &mut self,
        api: &dyn AgentApi,
        raw_user_id: &str,
    ) -> Result<(), SessionError> {
        self.request(api, QueryMode::Activities, raw_user_id).await
    }

    /// Begin, await the call, settle. For callers that issue one request at a time.
    pub async fn request(
        &mut self,
        api: &dyn AgentApi,
        mode: QueryMode,
        raw_user_id: &str,
    ) -> Result<(), SessionError> {
        let ticket = self.begin(mode, raw_user_id)?;
        let outcome = ticket.execute(api).await;
        let failure = outcome.as_ref().err().cloned();
        self.settle(ticket, outcome);
        match failure {
            Some(err) => Err(SessionError::Transport(err)),
            None => Ok(()),
        }
    }

    /// Projection of the active mode's result, `None` until one has loaded.
    pub fn active_display(&self) -> Option<DisplayModel> {
        self.active_display_in(&Local)
    }

    pub fn active_display_in<Tz>(&self, tz: &Tz) -> Option<DisplayModel>
    where
        Tz: TimeZone,
        Tz::Offset: Display,
    {
        match self.mode {
            QueryMode::Recommendations => self
                .recommendation_result
                .as_ref()
                .map(|result| project_recommendations_in(result, tz)),
            QueryMode::Activities => self
                .activity_result
                .as_ref()
                .map(|result| project_activities_in(result, tz)),
        }
    }

    /// Nothing loaded, loading or failed for the active mode.
    pub fn is_idle(&self) -> bool {
        self.error.is_none()
            && !self.is_loading_for(self.mode)
            && match self.mode {
                QueryMode::Recommendations => self.recommendation_result.is_none(),
                QueryMode::Activities => self.activity_result.is_none(),
            }
    }

    fn lane(&self, mode: QueryMode) -> Lane {
        match mode {
            QueryMode::Recommendations => self.recommendations_lane,
            QueryMode::Activities => self.activities_lane,
        }
    }

    fn lane_mut(&mut self, mode: QueryMode) -> &mut Lane {
        match mode {
            QueryMode::Recommendations => &mut self.recommendations_lane,
            QueryMode::Activities => &mut self.activities_lane,
        }
    }
}

#[cfg(test)]
#[path = "tests/session_tests.rs"]
mod tests;
