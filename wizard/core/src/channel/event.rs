//! Progress Event Decoding
//!
//! Inbound push frames are JSON objects with optional `progress`, `message`,
//! `status` and `video_url` fields. Absent fields read as zero/empty rather
//! than "unchanged": every event replaces the job's status wholesale.

use serde::{Deserialize, Serialize};

use super::traits::ChannelError;
use crate::job::{clamp_progress, JobStatus};

/// A status event for one generation
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ProgressEvent {
    /// Percent complete
    #[serde(default)]
    pub progress: Option<f32>,
    /// Human-readable stage description
    #[serde(default)]
    pub message: Option<String>,
    /// Wire status label
    #[serde(default)]
    pub status: Option<String>,
    /// Final artifact location (completion only)
    #[serde(default)]
    pub video_url: Option<String>,
}

impl ProgressEvent {
    /// Decode a text frame
    pub fn decode(text: &str) -> Result<Self, ChannelError> {
        serde_json::from_str(text).map_err(|e| ChannelError::Decode(e.to_string()))
    }

    /// Progress with absent mapped to 0, clamped to 0-100
    #[must_use]
    pub fn progress(&self) -> f32 {
        clamp_progress(self.progress.unwrap_or(0.0))
    }

    /// Message with absent mapped to empty
    #[must_use]
    pub fn message(&self) -> &str {
        self.message.as_deref().unwrap_or("")
    }

    /// Status with absent mapped to `Idle`
    #[must_use]
    pub fn status(&self) -> JobStatus {
        JobStatus::from_wire(self.status.as_deref().unwrap_or(""))
    }

    /// Result URL, if present and non-empty
    #[must_use]
    pub fn video_url(&self) -> Option<&str> {
        self.video_url.as_deref().filter(|url| !url.trim().is_empty())
    }
}
