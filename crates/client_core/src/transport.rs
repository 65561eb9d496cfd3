use async_trait::async_trait;
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use shared::{
    domain::UserId,
    error::ErrorBody,
    protocol::{ActivityListQuery, ActivityListResponse, RecommendRequest, RecommendResponse},
};
use tracing::{info, warn};

use crate::{
    config::ClientConfig,
    error::TransportError,
    types::{ActivityResult, RecommendationResult},
};

/// The two read endpoints of the agent service.
#[async_trait]
pub trait AgentApi: Send + Sync {
    async fn fetch_recommendations(
        &self,
        user_id: &UserId,
    ) -> Result<RecommendationResult, TransportError>;
    async fn fetch_activities(&self, user_id: &UserId) -> Result<ActivityResult, TransportError>;
}

pub struct HttpAgentClient {
    http: Client,
    config: ClientConfig,
}

impl HttpAgentClient {
    pub fn new(config: ClientConfig) -> Result<Self, TransportError> {
        let http = Client::builder()
            .timeout(config.request_timeout)
            .build()
            .map_err(|err| TransportError::Network(format!("failed to build http client: {err}")))?;
        Ok(Self { http, config })
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }
}

#[async_trait]
impl AgentApi for HttpAgentClient {
    async fn fetch_recommendations(
        &self,
        user_id: &UserId,
    ) -> Result<RecommendationResult, TransportError> {
        let url = self.config.endpoint(&["api", "recommend"]);
        info!(user_id = %user_id, %url, "requesting recommendations");
        let response = self
            .http
            .post(url)
            .json(&RecommendRequest {
                user_id: user_id.clone(),
                limit: self.config.recommendation_limit,
            })
            .send()
            .await?;
        let body: RecommendResponse = decode_json(response).await?;
        RecommendationResult::try_from(body)
    }

    async fn fetch_activities(&self, user_id: &UserId) -> Result<ActivityResult, TransportError> {
        let url = self.config.endpoint(&["api", "activity", user_id.as_str()]);
        info!(user_id = %user_id, %url, "requesting activities");
        let response = self
            .http
            .get(url)
            .query(&ActivityListQuery {
                limit: self.config.activity_limit,
            })
            .send()
            .await?;
        let body: ActivityListResponse = decode_json(response).await?;
        Ok(ActivityResult::from_response(user_id, body))
    }
}

async fn decode_json<T: DeserializeOwned>(response: Response) -> Result<T, TransportError> {
    let status = response.status();
    let bytes = response.bytes().await?;
    if !status.is_success() {
        let detail = ErrorBody::detail_from_bytes(&bytes);
        warn!(status = status.as_u16(), ?detail, "agent service returned an error status");
        return Err(TransportError::Status {
            status: status.as_u16(),
            detail,
        });
    }
    serde_json::from_slice(&bytes).map_err(|err| TransportError::Decode(err.to_string()))
}
