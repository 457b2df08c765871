use std::time::Duration;

use serde::Deserialize;

use feed_core::{ContentItem, FeedQuery, FeedbackAction, UploadDraft};

use crate::error::ApiError;

/// Transport settings for the backend client.
#[derive(Debug, Clone)]
pub struct ClientSettings {
    pub base_url: String,
    pub connect_timeout: Duration,
    pub request_timeout: Duration,
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:8000".to_string(),
            connect_timeout: Duration::from_secs(10),
            request_timeout: Duration::from_secs(30),
        }
    }
}

/// The backend contract the feed consumes. Kept behind a trait so tests and
/// tools can substitute transports.
#[async_trait::async_trait]
pub trait FeedApi: Send + Sync {
    /// Retrieve one ranked page of content. Never retries; a failure is the
    /// caller's signal to keep showing what it already has.
    async fn fetch_content(&self, query: &FeedQuery) -> Result<Vec<ContentItem>, ApiError>;
    /// Idempotent provisioning of the default source set.
    async fn setup_default_sources(&self) -> Result<(), ApiError>;
    /// Record one feedback action against a content item.
    async fn send_feedback(&self, content_id: &str, action: FeedbackAction)
        -> Result<(), ApiError>;
    /// Submit manually authored content for server-side analysis.
    async fn submit_manual(&self, draft: &UploadDraft) -> Result<(), ApiError>;
}

#[derive(Debug, Clone)]
pub struct ApiClient {
    settings: ClientSettings,
    client: reqwest::Client,
}

impl ApiClient {
    pub fn new(settings: ClientSettings) -> Result<Self, ApiError> {
        let client = reqwest::Client::builder()
            .connect_timeout(settings.connect_timeout)
            .timeout(settings.request_timeout)
            .build()
            .map_err(|err| ApiError::Network(err.to_string()))?;
        Ok(Self { settings, client })
    }

    fn endpoint(&self, path: &str) -> String {
        format!(
            "{}/api/{}",
            self.settings.base_url.trim_end_matches('/'),
            path
        )
    }

    /// Maps a non-success response to the backend's `detail` message when the
    /// body carries one, otherwise to a plain status error.
    async fn check_rejection(response: reqwest::Response) -> Result<reqwest::Response, ApiError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let detail = response
            .json::<ErrorBody>()
            .await
            .ok()
            .map(|body| body.detail);
        match detail {
            Some(detail) if !detail.is_empty() => Err(ApiError::Rejected { detail }),
            _ => Err(ApiError::HttpStatus(status.as_u16())),
        }
    }
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    detail: String,
}

#[async_trait::async_trait]
impl FeedApi for ApiClient {
    async fn fetch_content(&self, query: &FeedQuery) -> Result<Vec<ContentItem>, ApiError> {
        let response = self
            .client
            .get(self.endpoint("content"))
            .query(&[
                ("limit", query.limit.to_string()),
                ("min_score", query.min_score.to_string()),
                ("serendipity", query.serendipity.to_string()),
                ("diversity", query.diversity.to_string()),
            ])
            .send()
            .await
            .map_err(ApiError::from_reqwest)?;
        let response = Self::check_rejection(response).await?;
        response
            .json::<Vec<ContentItem>>()
            .await
            .map_err(ApiError::from_reqwest)
    }

    async fn setup_default_sources(&self) -> Result<(), ApiError> {
        let response = self
            .client
            .post(self.endpoint("setup/default-sources"))
            .send()
            .await
            .map_err(ApiError::from_reqwest)?;
        Self::check_rejection(response).await.map(|_| ())
    }

    async fn send_feedback(
        &self,
        content_id: &str,
        action: FeedbackAction,
    ) -> Result<(), ApiError> {
        let body = serde_json::json!({
            "content_id": content_id,
            "action": action.as_str(),
        });
        let response = self
            .client
            .post(self.endpoint("feedback"))
            .json(&body)
            .send()
            .await
            .map_err(ApiError::from_reqwest)?;
        Self::check_rejection(response).await.map(|_| ())
    }

    async fn submit_manual(&self, draft: &UploadDraft) -> Result<(), ApiError> {
        let response = self
            .client
            .post(self.endpoint("content/manual"))
            .json(draft)
            .send()
            .await
            .map_err(ApiError::from_reqwest)?;
        // The created item in the success payload is ignored beyond status.
        Self::check_rejection(response).await.map(|_| ())
    }
}
