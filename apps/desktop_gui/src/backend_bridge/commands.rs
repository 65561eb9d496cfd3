//! Backend commands queued from UI to backend worker.

use client_core::RequestTicket;
use shared::domain::QueryMode;

pub enum BackendCommand {
    FetchRecommendations { ticket: RequestTicket },
    FetchActivities { ticket: RequestTicket },
}

impl BackendCommand {
    pub fn for_ticket(ticket: RequestTicket) -> Self {
        match ticket.mode() {
            QueryMode::Recommendations => BackendCommand::FetchRecommendations { ticket },
            QueryMode::Activities => BackendCommand::FetchActivities { ticket },
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            BackendCommand::FetchRecommendations { .. } => "fetch_recommendations",
            BackendCommand::FetchActivities { .. } => "fetch_activities",
        }
    }

    pub fn into_ticket(self) -> RequestTicket {
        match self {
            BackendCommand::FetchRecommendations { ticket }
            | BackendCommand::FetchActivities { ticket } => ticket,
        }
    }
}
