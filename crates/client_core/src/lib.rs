//! Client side of the recommendation agent: configuration, HTTP transport,
//! the request session and the projection of results for display.

pub mod config;
pub mod error;
pub mod projector;
pub mod session;
pub mod transport;
pub mod types;

pub use config::{load_config, normalize_base_url, ClientConfig, ConfigError};
pub use error::{SessionError, TransportError};
pub use projector::{
    project_activities, project_recommendations, ActivityRow, DisplayModel, DisplayRow,
    EmptyState, RecommendationRow, Severity,
};
pub use session::{RequestTicket, Session, SettleOutcome, Settlement};
pub use transport::{AgentApi, HttpAgentClient};
pub use types::{Activity, ActivityResult, QueryPayload, Recommendation, RecommendationResult};

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
