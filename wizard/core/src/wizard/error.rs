//! Wizard guard errors

use thiserror::Error;

use super::state::{WizardStage, MSG_EMPTY_SCRIPT, MSG_NO_PROJECT};
use crate::voice::VoiceId;

/// Rejected wizard events
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum WizardError {
    /// Script is blank after trimming
    #[error("script is empty")]
    EmptyScript,

    /// Generation requested before a project exists
    #[error("no project has been created")]
    MissingProject,

    /// A submission is already running
    #[error("a submission is already in flight")]
    SubmissionInFlight,

    /// Draft edits are not accepted in this stage (or while submitting)
    #[error("draft cannot be edited during {0}")]
    DraftFrozen(WizardStage),

    /// Event does not apply to the current stage
    #[error("cannot {action} during {stage}")]
    InvalidTransition {
        /// Rejected action
        action: &'static str,
        /// Stage at the time
        stage: WizardStage,
    },

    /// Voice is not in the loaded catalog
    #[error("unknown voice '{0}'")]
    UnknownVoice(VoiceId),
}

impl WizardError {
    /// Banner text for validation failures; other rejections are silent
    #[must_use]
    pub fn banner(&self) -> Option<&'static str> {
        match self {
            Self::EmptyScript => Some(MSG_EMPTY_SCRIPT),
            Self::MissingProject => Some(MSG_NO_PROJECT),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_validation_errors_show_banner() {
        assert_eq!(WizardError::EmptyScript.banner(), Some("Please enter a script"));
        assert_eq!(
            WizardError::MissingProject.banner(),
            Some("No project found. Please start over.")
        );
        assert_eq!(WizardError::SubmissionInFlight.banner(), None);
        assert_eq!(
            WizardError::InvalidTransition {
                action: "submit script",
                stage: WizardStage::Generating
            }
            .to_string(),
            "cannot submit script during Generating"
        );
    }
}
