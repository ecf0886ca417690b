//! HttpStudioApi against a mock studio server

use serde_json::json;
use tokio_test::{assert_err, assert_ok};
use url::Url;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use wizard_core::{
    AspectRatio, CreateProjectRequest, GenerationId, HttpStudioApi, ProjectDraft, ProjectId,
    StartGenerationRequest, StudioApi, SubmissionError, VoiceId,
};

fn api_for(server: &MockServer) -> HttpStudioApi {
    HttpStudioApi::new(&Url::parse(&server.uri()).unwrap())
}

fn draft() -> ProjectDraft {
    ProjectDraft {
        script: "  Once upon a time.  ".to_string(),
        aspect_ratio: AspectRatio::Portrait,
        voice_id: VoiceId::new("v1"),
    }
}

#[tokio::test]
async fn create_project_posts_draft_and_decodes_id() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/projects"))
        .and(body_json(json!({
            "script": "Once upon a time.",
            "aspect_ratio": "9:16",
            "voice_id": "v1",
            "voice_name": "Rachel",
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "project_id": "proj-42",
            "status": "created",
            "created_at": "2024-05-01T10:00:00Z",
        })))
        .expect(1)
        .mount(&server)
        .await;

    let api = api_for(&server);
    let request = CreateProjectRequest::from_draft(&draft(), "Rachel");
    let created = assert_ok!(api.create_project(&request).await);

    assert_eq!(created.project_id, ProjectId::new("proj-42"));
    assert_eq!(created.status.as_deref(), Some("created"));
    assert!(created.created_at.is_some());
}

#[tokio::test]
async fn create_project_server_error_is_status_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/projects"))
        .respond_with(ResponseTemplate::new(500).set_body_string("internal"))
        .expect(1)
        .mount(&server)
        .await;

    let api = api_for(&server);
    let request = CreateProjectRequest::from_draft(&draft(), "Rachel");
    let err = assert_err!(api.create_project(&request).await);

    assert!(matches!(
        err,
        SubmissionError::Status {
            endpoint: "/api/projects",
            status: 500
        }
    ));
}

#[tokio::test]
async fn start_generation_decodes_initial_status() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/generate"))
        .and(body_json(json!({
            "project_id": "proj-42",
            "script": "Once upon a time.",
            "aspect_ratio": "9:16",
            "voice_id": "v1",
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "generation_id": "gen-7",
            "project_id": "proj-42",
            "status": "queued",
            "progress": 0.0,
            "message": "Generation started",
        })))
        .mount(&server)
        .await;

    let api = api_for(&server);
    let request = StartGenerationRequest::from_draft(ProjectId::new("proj-42"), &draft());
    let started = assert_ok!(api.start_generation(&request).await);

    assert_eq!(started.generation_id, GenerationId::new("gen-7"));
    assert_eq!(started.status, "queued");
}

#[tokio::test]
async fn unexpected_body_is_decode_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/generate"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "id": "nope" })))
        .mount(&server)
        .await;

    let api = api_for(&server);
    let request = StartGenerationRequest::from_draft(ProjectId::new("p"), &draft());
    let err = assert_err!(api.start_generation(&request).await);

    assert!(matches!(err, SubmissionError::Decode(_)));
}

#[tokio::test]
async fn list_voices_maps_name_field() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/voices"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "voice_id": "21m00Tcm4TlvDq8ikWAM", "name": "Rachel", "preview_url": null },
            { "voice_id": "pNInz6obpgDQGcFmaJgB", "name": "Adam" },
        ])))
        .mount(&server)
        .await;

    let voices = assert_ok!(api_for(&server).list_voices().await);

    assert_eq!(voices.len(), 2);
    assert_eq!(voices[0].display_name, "Rachel");
    assert_eq!(voices[1].voice_id.as_str(), "pNInz6obpgDQGcFmaJgB");
}

#[tokio::test]
async fn health_check_reflects_status() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/health"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "status": "healthy" })))
        .mount(&server)
        .await;

    assert!(api_for(&server).health_check().await);

    let unreachable = HttpStudioApi::new(&Url::parse("http://127.0.0.1:9").unwrap());
    assert!(!unreachable.health_check().await);
}

#[tokio::test]
async fn unreachable_backend_is_transport_error() {
    let api = HttpStudioApi::new(&Url::parse("http://127.0.0.1:9").unwrap());
    let err = assert_err!(api.list_voices().await);
    assert!(matches!(err, SubmissionError::Transport(_)));
}
