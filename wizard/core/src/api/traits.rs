//! Studio API Traits
//!
//! Trait definition and wire types for the studio backend. This abstraction
//! lets the Wizard run against the real HTTP backend or an in-memory double
//! without changing any state-machine logic.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::draft::{AspectRatio, ProjectDraft};
use crate::job::{GenerationId, ProjectId};
use crate::voice::{Voice, VoiceId};

/// Errors from the submission endpoints
///
/// The cause is logged; users only ever see a generic message.
#[derive(Debug, Error)]
pub enum SubmissionError {
    /// Server answered with a non-success status
    #[error("{endpoint} returned HTTP {status}")]
    Status {
        /// Endpoint path that failed
        endpoint: &'static str,
        /// HTTP status code
        status: u16,
    },

    /// Network or protocol failure before a status was received
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// Success status but the body was not what we expected
    #[error("unexpected response body: {0}")]
    Decode(String),
}

/// Body of `POST /api/projects`
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CreateProjectRequest {
    /// Trimmed script
    pub script: String,
    /// Selected aspect ratio
    pub aspect_ratio: AspectRatio,
    /// Selected voice
    pub voice_id: VoiceId,
    /// Display name of the selected voice
    pub voice_name: String,
}

impl CreateProjectRequest {
    /// Build the request from the current draft
    pub fn from_draft(draft: &ProjectDraft, voice_name: impl Into<String>) -> Self {
        Self {
            script: draft.trimmed_script().to_string(),
            aspect_ratio: draft.aspect_ratio,
            voice_id: draft.voice_id.clone(),
            voice_name: voice_name.into(),
        }
    }
}

/// Response of `POST /api/projects`
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ProjectCreated {
    /// New project identifier
    pub project_id: ProjectId,
    /// Server-side project status (informational)
    #[serde(default)]
    pub status: Option<String>,
    /// Creation time, when the server reports it
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

/// Body of `POST /api/generate`
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StartGenerationRequest {
    /// Project created in the previous step
    pub project_id: ProjectId,
    /// Trimmed script
    pub script: String,
    /// Selected aspect ratio
    pub aspect_ratio: AspectRatio,
    /// Selected voice
    pub voice_id: VoiceId,
}

impl StartGenerationRequest {
    /// Build the request for an existing project from the current draft
    #[must_use]
    pub fn from_draft(project_id: ProjectId, draft: &ProjectDraft) -> Self {
        Self {
            project_id,
            script: draft.trimmed_script().to_string(),
            aspect_ratio: draft.aspect_ratio,
            voice_id: draft.voice_id.clone(),
        }
    }
}

/// Response of `POST /api/generate`
///
/// The server also reports an initial `progress` and `message`. They are
/// ignored: a fresh job always starts at 0 with the client's own message.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GenerationStarted {
    /// Correlation key for the push channel
    pub generation_id: GenerationId,
    /// Initial status label
    #[serde(default)]
    pub status: String,
}

/// Studio backend
///
/// Implement this trait to point the Wizard at a different backend.
/// Every call is fire-once: implementations must not retry.
#[async_trait]
pub trait StudioApi: Send + Sync {
    /// Backend name for logs
    fn name(&self) -> &str;

    /// Check if the backend is reachable
    async fn health_check(&self) -> bool;

    /// Create a project from the submitted script and settings
    async fn create_project(
        &self,
        request: &CreateProjectRequest,
    ) -> Result<ProjectCreated, SubmissionError>;

    /// Start generating a video for an existing project
    async fn start_generation(
        &self,
        request: &StartGenerationRequest,
    ) -> Result<GenerationStarted, SubmissionError>;

    /// Fetch the voice catalog
    async fn list_voices(&self) -> Result<Vec<Voice>, SubmissionError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_request_wire_shape() {
        let draft = ProjectDraft {
            script: "  Hello world \n".to_string(),
            aspect_ratio: AspectRatio::Portrait,
            voice_id: VoiceId::new("v1"),
        };
        let request = CreateProjectRequest::from_draft(&draft, "Rachel");
        let json = serde_json::to_value(&request).unwrap();

        assert_eq!(
            json,
            serde_json::json!({
                "script": "Hello world",
                "aspect_ratio": "9:16",
                "voice_id": "v1",
                "voice_name": "Rachel",
            })
        );
    }

    #[test]
    fn test_generation_request_wire_shape() {
        let draft = ProjectDraft {
            script: "Hello".to_string(),
            aspect_ratio: AspectRatio::Landscape,
            voice_id: VoiceId::new("v2"),
        };
        let request = StartGenerationRequest::from_draft(ProjectId::new("p1"), &draft);
        let json = serde_json::to_value(&request).unwrap();

        assert_eq!(json["project_id"], "p1");
        assert_eq!(json["aspect_ratio"], "16:9");
        assert_eq!(json["voice_id"], "v2");
    }

    #[test]
    fn test_project_created_accepts_server_fields() {
        let body = r#"{"project_id":"abc","status":"created","created_at":"2024-05-01T10:00:00Z"}"#;
        let created: ProjectCreated = serde_json::from_str(body).unwrap();
        assert_eq!(created.project_id, ProjectId::new("abc"));
        assert!(created.created_at.is_some());

        let minimal: ProjectCreated = serde_json::from_str(r#"{"project_id":"x"}"#).unwrap();
        assert!(minimal.status.is_none());
    }

    #[test]
    fn test_generation_started_defaults() {
        let started: GenerationStarted =
            serde_json::from_str(r#"{"generation_id":"g1","status":"queued","progress":35.0,"message":"Queued behind 2 jobs"}"#)
                .unwrap();
        assert_eq!(started.generation_id, GenerationId::new("g1"));
        assert_eq!(started.status, "queued");

        let bare: GenerationStarted = serde_json::from_str(r#"{"generation_id":"g2"}"#).unwrap();
        assert!(bare.status.is_empty());
    }

    #[test]
    fn test_submission_error_display() {
        let err = SubmissionError::Status {
            endpoint: "/api/projects",
            status: 503,
        };
        assert!(err.to_string().contains("503"));
        assert!(err.to_string().contains("/api/projects"));
    }
}
