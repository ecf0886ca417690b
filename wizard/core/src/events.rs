//! Wizard Events
//!
//! User intents fed to [`crate::wizard::Wizard::handle_event`]. The
//! presentation layer translates key presses (or clicks) into these; it never
//! touches wizard state directly.

use serde::{Deserialize, Serialize};

use crate::draft::AspectRatio;
use crate::voice::VoiceId;

/// Actions a user can take in the wizard
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum WizardEvent {
    /// Replace the script text
    EditScript {
        /// Full new script text
        script: String,
    },
    /// Choose an aspect ratio
    SelectAspectRatio {
        /// Chosen ratio
        aspect_ratio: AspectRatio,
    },
    /// Choose a narration voice
    SelectVoice {
        /// Chosen voice
        voice_id: VoiceId,
    },
    /// Submit the script (Script -> Settings)
    SubmitScript,
    /// Return to the script editor (Settings -> Script)
    BackToScript,
    /// Start generating (Settings -> Generating)
    StartGeneration,
    /// Clear the error banner
    DismissError,
    /// Reset the whole run (any stage -> Script)
    StartOver,
}

impl WizardEvent {
    /// Short action name for logs and error messages
    #[must_use]
    pub fn action(&self) -> &'static str {
        match self {
            Self::EditScript { .. } => "edit script",
            Self::SelectAspectRatio { .. } => "select aspect ratio",
            Self::SelectVoice { .. } => "select voice",
            Self::SubmitScript => "submit script",
            Self::BackToScript => "back to script",
            Self::StartGeneration => "start generation",
            Self::DismissError => "dismiss error",
            Self::StartOver => "start over",
        }
    }

    /// Whether this event edits the draft
    #[must_use]
    pub fn edits_draft(&self) -> bool {
        matches!(
            self,
            Self::EditScript { .. } | Self::SelectAspectRatio { .. } | Self::SelectVoice { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_serialization() {
        let event = WizardEvent::SelectAspectRatio {
            aspect_ratio: AspectRatio::Portrait,
        };
        let json = serde_json::to_string(&event).unwrap();
        assert!(json.contains("select_aspect_ratio"));
        assert!(json.contains("9:16"));

        let parsed: WizardEvent = serde_json::from_str(r#"{"type":"start_over"}"#).unwrap();
        assert_eq!(parsed, WizardEvent::StartOver);
    }

    #[test]
    fn test_draft_edits() {
        assert!(WizardEvent::EditScript {
            script: String::new()
        }
        .edits_draft());
        assert!(!WizardEvent::SubmitScript.edits_draft());
        assert_eq!(WizardEvent::StartGeneration.action(), "start generation");
    }
}
