//! Generation Job Types
//!
//! Identifiers and the client-side view of a server-side generation run.
//! The Wizard owns the `Job`; push events overwrite it, the UI only reads it.
//!
//! # Design Philosophy
//!
//! The server speaks a looser status vocabulary than the client cares about
//! (`processing`, `queued`, ...). Everything is folded into [`JobStatus`] at
//! the edge so the state machine only ever matches on five variants.

use serde::{Deserialize, Serialize};

/// Server-side project identifier (returned by the create-project call)
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProjectId(pub String);

impl ProjectId {
    /// Create a project ID from a string
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Get the string value
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ProjectId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Server-side generation identifier
///
/// This is the sole correlation key for the live progress channel.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GenerationId(pub String);

impl GenerationId {
    /// Create a generation ID from a string
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Get the string value
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for GenerationId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Status of a generation job
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JobStatus {
    /// No job, or the server sent no status
    #[default]
    Idle,
    /// Accepted, waiting for a worker
    Queued,
    /// Being synthesized
    Running,
    /// Finished, artifact available
    Completed,
    /// Server gave up on the job
    Failed,
}

impl JobStatus {
    /// Map a wire status label onto the client enum
    ///
    /// Labels match exactly. Empty means "no status" and maps to `Idle`.
    /// Any other non-empty label is treated as `Running`: the job exists
    /// and has not terminated.
    #[must_use]
    pub fn from_wire(s: &str) -> Self {
        match s {
            "" => Self::Idle,
            "queued" => Self::Queued,
            "running" | "processing" => Self::Running,
            "completed" => Self::Completed,
            "failed" => Self::Failed,
            other => {
                tracing::debug!(status = %other, "Unrecognized job status, treating as running");
                Self::Running
            }
        }
    }

    /// Human-readable label
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            Self::Idle => "Idle",
            Self::Queued => "Queued",
            Self::Running => "Running",
            Self::Completed => "Completed",
            Self::Failed => "Failed",
        }
    }

    /// Whether the job has finished (successfully or not)
    #[must_use]
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Completed | Self::Failed)
    }
}

/// Client-side view of a generation run
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Job {
    /// Set once by the create-project call
    pub project_id: Option<ProjectId>,
    /// Set once by the start-generation call
    pub generation_id: Option<GenerationId>,
    /// Last reported status
    pub status: JobStatus,
    /// Last reported progress, 0-100
    pub progress: f32,
    /// Last reported progress message
    pub message: String,
    /// Location of the finished video
    pub result_url: Option<String>,
}

impl Job {
    /// Overwrite status, progress and message from a push event
    ///
    /// Wholesale replacement: the last event wins, nothing is merged.
    pub fn overwrite(&mut self, status: JobStatus, progress: f32, message: String) {
        self.status = status;
        self.progress = clamp_progress(progress);
        self.message = message;
    }

    /// Progress as a whole percentage (for display)
    #[must_use]
    pub fn percent(&self) -> u16 {
        self.progress.round() as u16
    }
}

/// Clamp a reported progress value into 0-100
#[must_use]
pub fn clamp_progress(progress: f32) -> f32 {
    if progress.is_finite() {
        progress.clamp(0.0, 100.0)
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_from_wire() {
        assert_eq!(JobStatus::from_wire(""), JobStatus::Idle);
        assert_eq!(JobStatus::from_wire("queued"), JobStatus::Queued);
        assert_eq!(JobStatus::from_wire("processing"), JobStatus::Running);
        assert_eq!(JobStatus::from_wire("running"), JobStatus::Running);
        assert_eq!(JobStatus::from_wire("completed"), JobStatus::Completed);
        assert_eq!(JobStatus::from_wire("failed"), JobStatus::Failed);
        assert_eq!(JobStatus::from_wire("uploading"), JobStatus::Running);
    }

    #[test]
    fn test_status_lookalikes_are_not_terminal() {
        for label in ["done", "complete", "Completed", "error", "FAILED", " failed"] {
            assert_eq!(JobStatus::from_wire(label), JobStatus::Running, "{label}");
        }
        assert_eq!(JobStatus::from_wire("idle"), JobStatus::Running);
        assert_eq!(JobStatus::from_wire("pending"), JobStatus::Running);
    }

    #[test]
    fn test_terminal_statuses() {
        assert!(JobStatus::Completed.is_terminal());
        assert!(JobStatus::Failed.is_terminal());
        assert!(!JobStatus::Running.is_terminal());
        assert!(!JobStatus::Idle.is_terminal());
    }

    #[test]
    fn test_overwrite_replaces_everything() {
        let mut job = Job {
            status: JobStatus::Running,
            progress: 40.0,
            message: "Generating video clips...".to_string(),
            ..Default::default()
        };

        job.overwrite(JobStatus::Idle, 0.0, String::new());

        assert_eq!(job.status, JobStatus::Idle);
        assert_eq!(job.progress, 0.0);
        assert!(job.message.is_empty());
    }

    #[test]
    fn test_progress_is_clamped() {
        assert_eq!(clamp_progress(150.0), 100.0);
        assert_eq!(clamp_progress(-3.0), 0.0);
        assert_eq!(clamp_progress(f32::NAN), 0.0);
        assert_eq!(clamp_progress(42.5), 42.5);
    }

    #[test]
    fn test_ids_display() {
        assert_eq!(GenerationId::new("gen-1").to_string(), "gen-1");
        assert_eq!(ProjectId::new("proj-1").as_str(), "proj-1");
    }
}
