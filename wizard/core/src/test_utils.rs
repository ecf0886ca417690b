//! Test Doubles
//!
//! In-memory `StudioApi` and `ChannelConnector` implementations for driving
//! the Wizard without a network. Both are cheap to clone and share their
//! state, so a test keeps one handle for assertions and gives the other to
//! the Wizard.

use std::collections::VecDeque;
use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::Mutex;

use crate::api::{
    CreateProjectRequest, GenerationStarted, ProjectCreated, StartGenerationRequest, StudioApi,
    SubmissionError,
};
use crate::channel::{ChannelConnector, ChannelFrame, LiveChannel, ProgressEvent};
use crate::job::{GenerationId, ProjectId};
use crate::voice::Voice;

#[derive(Default)]
struct ApiInner {
    healthy: bool,
    voices: Vec<Voice>,
    voices_failure: Option<u16>,
    project_id: Option<String>,
    create_failure: Option<u16>,
    generation_id: Option<String>,
    generation_status: String,
    start_failure: Option<u16>,
    create_requests: Vec<CreateProjectRequest>,
    generation_requests: Vec<StartGenerationRequest>,
    voice_requests: usize,
}

/// Scriptable studio backend
#[derive(Clone)]
pub struct MockStudioApi {
    inner: Arc<Mutex<ApiInner>>,
}

impl Default for MockStudioApi {
    fn default() -> Self {
        Self::new()
    }
}

impl MockStudioApi {
    /// Healthy backend with no voices that accepts every submission
    #[must_use]
    pub fn new() -> Self {
        let inner = ApiInner {
            healthy: true,
            generation_status: "queued".to_string(),
            ..Default::default()
        };
        Self {
            inner: Arc::new(Mutex::new(inner)),
        }
    }

    /// Serve this voice list
    #[must_use]
    pub fn with_voices(self, voices: Vec<Voice>) -> Self {
        self.inner.lock().voices = voices;
        self
    }

    /// Answer the voice request with HTTP 500
    #[must_use]
    pub fn failing_voices(self) -> Self {
        self.inner.lock().voices_failure = Some(500);
        self
    }

    /// Return this project ID from create-project
    #[must_use]
    pub fn with_project(self, project_id: impl Into<String>) -> Self {
        self.inner.lock().project_id = Some(project_id.into());
        self
    }

    /// Return this generation ID from start-generation
    #[must_use]
    pub fn with_generation(self, generation_id: impl Into<String>) -> Self {
        self.inner.lock().generation_id = Some(generation_id.into());
        self
    }

    /// Make create-project fail (or succeed again with `false`)
    pub fn set_create_fails(&self, fails: bool) {
        self.inner.lock().create_failure = fails.then_some(500);
    }

    /// Make start-generation fail (or succeed again with `false`)
    pub fn set_start_fails(&self, fails: bool) {
        self.inner.lock().start_failure = fails.then_some(500);
    }

    /// Change the health check answer
    pub fn set_healthy(&self, healthy: bool) {
        self.inner.lock().healthy = healthy;
    }

    /// Create-project requests received so far
    #[must_use]
    pub fn create_requests(&self) -> Vec<CreateProjectRequest> {
        self.inner.lock().create_requests.clone()
    }

    /// Start-generation requests received so far
    #[must_use]
    pub fn generation_requests(&self) -> Vec<StartGenerationRequest> {
        self.inner.lock().generation_requests.clone()
    }

    /// Number of voice catalog requests
    #[must_use]
    pub fn voice_requests(&self) -> usize {
        self.inner.lock().voice_requests
    }
}

#[async_trait]
impl StudioApi for MockStudioApi {
    fn name(&self) -> &str {
        "mock"
    }

    async fn health_check(&self) -> bool {
        self.inner.lock().healthy
    }

    async fn create_project(
        &self,
        request: &CreateProjectRequest,
    ) -> Result<ProjectCreated, SubmissionError> {
        let mut inner = self.inner.lock();
        inner.create_requests.push(request.clone());

        if let Some(status) = inner.create_failure {
            return Err(SubmissionError::Status {
                endpoint: "/api/projects",
                status,
            });
        }

        let project_id = inner
            .project_id
            .clone()
            .unwrap_or_else(|| format!("project-{}", inner.create_requests.len()));

        Ok(ProjectCreated {
            project_id: ProjectId::new(project_id),
            status: Some("created".to_string()),
            created_at: None,
        })
    }

    async fn start_generation(
        &self,
        request: &StartGenerationRequest,
    ) -> Result<GenerationStarted, SubmissionError> {
        let mut inner = self.inner.lock();
        inner.generation_requests.push(request.clone());

        if let Some(status) = inner.start_failure {
            return Err(SubmissionError::Status {
                endpoint: "/api/generate",
                status,
            });
        }

        let generation_id = inner
            .generation_id
            .clone()
            .unwrap_or_else(|| format!("generation-{}", inner.generation_requests.len()));

        Ok(GenerationStarted {
            generation_id: GenerationId::new(generation_id),
            status: inner.generation_status.clone(),
        })
    }

    async fn list_voices(&self) -> Result<Vec<Voice>, SubmissionError> {
        let mut inner = self.inner.lock();
        inner.voice_requests += 1;

        match inner.voices_failure {
            Some(status) => Err(SubmissionError::Status {
                endpoint: "/api/voices",
                status,
            }),
            None => Ok(inner.voices.clone()),
        }
    }
}

#[derive(Default)]
struct ConnectorInner {
    opened: Vec<GenerationId>,
    closed: usize,
    queues: Vec<Arc<Mutex<VecDeque<ChannelFrame>>>>,
}

/// Connector that counts opens and closes
///
/// Frames pushed through the connector land on the most recently opened
/// channel.
#[derive(Clone, Default)]
pub struct MockConnector {
    inner: Arc<Mutex<ConnectorInner>>,
}

impl MockConnector {
    /// Create a connector with no channels
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Channels opened so far
    #[must_use]
    pub fn opened_count(&self) -> usize {
        self.inner.lock().opened.len()
    }

    /// Channels closed so far
    #[must_use]
    pub fn closed_count(&self) -> usize {
        self.inner.lock().closed
    }

    /// Channels opened and not yet closed
    #[must_use]
    pub fn live_count(&self) -> usize {
        let inner = self.inner.lock();
        inner.opened.len() - inner.closed
    }

    /// Generation IDs in open order
    #[must_use]
    pub fn opened_ids(&self) -> Vec<GenerationId> {
        self.inner.lock().opened.clone()
    }

    /// Deliver a frame on the latest channel
    pub fn push(&self, frame: ChannelFrame) {
        let queue = self.inner.lock().queues.last().cloned();
        if let Some(queue) = queue {
            queue.lock().push_back(frame);
        }
    }

    /// Deliver an event on the latest channel
    pub fn push_event(&self, event: ProgressEvent) {
        self.push(ChannelFrame::Event(event));
    }

    /// Simulate the server closing the latest channel
    pub fn drop_connection(&self) {
        self.push(ChannelFrame::Closed);
    }
}

impl ChannelConnector for MockConnector {
    fn open(&self, generation_id: &GenerationId) -> Box<dyn LiveChannel> {
        let queue = Arc::new(Mutex::new(VecDeque::new()));
        {
            let mut inner = self.inner.lock();
            inner.opened.push(generation_id.clone());
            inner.queues.push(Arc::clone(&queue));
        }

        Box::new(MockChannel {
            generation_id: generation_id.clone(),
            queue,
            connector: Arc::clone(&self.inner),
            open: true,
        })
    }
}

/// Channel handed out by [`MockConnector`]
pub struct MockChannel {
    generation_id: GenerationId,
    queue: Arc<Mutex<VecDeque<ChannelFrame>>>,
    connector: Arc<Mutex<ConnectorInner>>,
    open: bool,
}

impl LiveChannel for MockChannel {
    fn generation_id(&self) -> &GenerationId {
        &self.generation_id
    }

    fn try_recv(&mut self) -> Option<ChannelFrame> {
        if !self.open {
            return None;
        }
        self.queue.lock().pop_front()
    }

    fn close(&mut self) {
        if self.open {
            self.open = false;
            self.connector.lock().closed += 1;
        }
    }

    fn is_open(&self) -> bool {
        self.open
    }
}

impl Drop for MockChannel {
    fn drop(&mut self) {
        self.close();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mock_channel_counts_first_close_only() {
        let connector = MockConnector::new();
        let mut channel = connector.open(&GenerationId::new("g"));

        channel.close();
        channel.close();
        drop(channel);

        assert_eq!(connector.opened_count(), 1);
        assert_eq!(connector.closed_count(), 1);
    }

    #[test]
    fn test_push_goes_to_latest_channel() {
        let connector = MockConnector::new();
        let mut first = connector.open(&GenerationId::new("a"));
        let mut second = connector.open(&GenerationId::new("b"));

        connector.drop_connection();

        assert!(first.try_recv().is_none());
        assert_eq!(second.try_recv(), Some(ChannelFrame::Closed));
    }

    #[tokio::test]
    async fn test_mock_api_records_requests() {
        let api = MockStudioApi::new().with_project("p-1");
        let request = CreateProjectRequest {
            script: "Hi".to_string(),
            aspect_ratio: Default::default(),
            voice_id: Default::default(),
            voice_name: "Default".to_string(),
        };

        let created = api.create_project(&request).await.unwrap();
        assert_eq!(created.project_id.as_str(), "p-1");

        api.set_create_fails(true);
        assert!(api.create_project(&request).await.is_err());
        assert_eq!(api.create_requests().len(), 2);
    }
}
