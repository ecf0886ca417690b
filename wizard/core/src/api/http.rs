//! HTTP Studio Backend
//!
//! `StudioApi` over the studio REST endpoints:
//! - `POST /api/projects` - create a project
//! - `POST /api/generate` - start a generation
//! - `GET /api/voices` - voice catalog
//! - `GET /api/health` - liveness
//!
//! No request timeout is configured; the transport default applies.

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use url::Url;

use super::traits::{
    CreateProjectRequest, GenerationStarted, ProjectCreated, StartGenerationRequest, StudioApi,
    SubmissionError,
};
use crate::voice::Voice;

const PROJECTS_PATH: &str = "/api/projects";
const GENERATE_PATH: &str = "/api/generate";
const VOICES_PATH: &str = "/api/voices";
const HEALTH_PATH: &str = "/api/health";

/// Studio backend client
#[derive(Clone)]
pub struct HttpStudioApi {
    /// Base URL without trailing slash
    base_url: String,
    /// HTTP client
    http_client: reqwest::Client,
}

impl HttpStudioApi {
    /// Create a client for the backend at `base_url`
    #[must_use]
    pub fn new(base_url: &Url) -> Self {
        Self {
            base_url: base_url.as_str().trim_end_matches('/').to_string(),
            http_client: reqwest::Client::new(),
        }
    }

    /// Get the base URL
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Check status, then decode the JSON body
    async fn decode<T: DeserializeOwned>(
        endpoint: &'static str,
        response: reqwest::Response,
    ) -> Result<T, SubmissionError> {
        let status = response.status();
        if !status.is_success() {
            return Err(SubmissionError::Status {
                endpoint,
                status: status.as_u16(),
            });
        }

        response.json::<T>().await.map_err(|e| {
            if e.is_decode() {
                SubmissionError::Decode(e.to_string())
            } else {
                SubmissionError::Transport(e)
            }
        })
    }
}

#[async_trait]
impl StudioApi for HttpStudioApi {
    fn name(&self) -> &str {
        "studio-http"
    }

    async fn health_check(&self) -> bool {
        match self.http_client.get(self.endpoint(HEALTH_PATH)).send().await {
            Ok(response) => response.status().is_success(),
            Err(e) => {
                tracing::debug!(error = %e, "Health check failed");
                false
            }
        }
    }

    async fn create_project(
        &self,
        request: &CreateProjectRequest,
    ) -> Result<ProjectCreated, SubmissionError> {
        let response = self
            .http_client
            .post(self.endpoint(PROJECTS_PATH))
            .json(request)
            .send()
            .await?;

        Self::decode(PROJECTS_PATH, response).await
    }

    async fn start_generation(
        &self,
        request: &StartGenerationRequest,
    ) -> Result<GenerationStarted, SubmissionError> {
        let response = self
            .http_client
            .post(self.endpoint(GENERATE_PATH))
            .json(request)
            .send()
            .await?;

        Self::decode(GENERATE_PATH, response).await
    }

    async fn list_voices(&self) -> Result<Vec<Voice>, SubmissionError> {
        let response = self
            .http_client
            .get(self.endpoint(VOICES_PATH))
            .send()
            .await?;

        Self::decode(VOICES_PATH, response).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_strips_trailing_slash() {
        let api = HttpStudioApi::new(&Url::parse("http://localhost:8001/").unwrap());
        assert_eq!(api.base_url(), "http://localhost:8001");
        assert_eq!(
            api.endpoint(PROJECTS_PATH),
            "http://localhost:8001/api/projects"
        );
    }

    #[test]
    fn test_endpoint_keeps_base_path() {
        let api = HttpStudioApi::new(&Url::parse("https://studio.example.com/v1").unwrap());
        assert_eq!(
            api.endpoint(VOICES_PATH),
            "https://studio.example.com/v1/api/voices"
        );
    }
}
