//! Wizard state: everything the presentation layer reads

use crate::draft::ProjectDraft;
use crate::job::Job;
use crate::voice::VoiceCatalog;

/// Banner shown when the script is blank
pub const MSG_EMPTY_SCRIPT: &str = "Please enter a script";
/// Banner shown when create-project fails
pub const MSG_CREATE_FAILED: &str = "Failed to create project. Please try again.";
/// Banner shown when generation is requested without a project
pub const MSG_NO_PROJECT: &str = "No project found. Please start over.";
/// Banner shown when start-generation fails
pub const MSG_START_FAILED: &str = "Failed to start generation. Please try again.";
/// Banner shown when the server reports failure without a message
pub const MSG_GENERATION_FAILED: &str = "Generation failed";
/// Progress message while start-generation is in flight
pub const MSG_STARTING: &str = "Starting generation...";

/// Wizard stage
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum WizardStage {
    /// Write the script
    #[default]
    Script,
    /// Choose aspect ratio and voice
    Settings,
    /// Watch the job run
    Generating,
    /// Finished video
    Result,
}

impl WizardStage {
    /// All stages in flow order
    pub const ALL: [WizardStage; 4] = [
        WizardStage::Script,
        WizardStage::Settings,
        WizardStage::Generating,
        WizardStage::Result,
    ];

    /// Step label for the progress header
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            Self::Script => "Script",
            Self::Settings => "Settings",
            Self::Generating => "Generating",
            Self::Result => "Result",
        }
    }

    /// 1-based step number
    #[must_use]
    pub fn step(&self) -> usize {
        match self {
            Self::Script => 1,
            Self::Settings => 2,
            Self::Generating => 3,
            Self::Result => 4,
        }
    }
}

impl std::fmt::Display for WizardStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Complete wizard state
#[derive(Clone, Debug, Default, PartialEq)]
pub struct WizardState {
    /// Active stage
    pub stage: WizardStage,
    /// User input
    pub draft: ProjectDraft,
    /// Loaded voices (empty until the catalog request finishes)
    pub voices: VoiceCatalog,
    /// Whether the catalog request has finished
    pub voices_loaded: bool,
    /// Server-side job
    pub job: Job,
    /// Whether a generation is being followed
    pub is_generating: bool,
    /// Whether a create-project or start-generation call is in flight
    pub submitting: bool,
    /// Dismissible error banner
    pub error: Option<String>,
}

impl WizardState {
    /// Whether the draft accepts edits
    #[must_use]
    pub fn draft_editable(&self) -> bool {
        !self.submitting && matches!(self.stage, WizardStage::Script | WizardStage::Settings)
    }

    /// Display name of the selected voice
    #[must_use]
    pub fn voice_name(&self) -> &str {
        self.voices.display_name(&self.draft.voice_id)
    }

    /// Fresh state for a new run, keeping the loaded catalog
    pub(crate) fn reset(&mut self) {
        let voices = std::mem::take(&mut self.voices);
        let voices_loaded = self.voices_loaded;

        *self = Self {
            voices,
            voices_loaded,
            ..Self::default()
        };

        if let Some(voice) = self.voices.default_voice() {
            self.draft.voice_id = voice.voice_id.clone();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::draft::AspectRatio;
    use crate::voice::{Voice, VoiceCatalog};

    #[test]
    fn test_stage_order() {
        let steps: Vec<usize> = WizardStage::ALL.iter().map(WizardStage::step).collect();
        assert_eq!(steps, vec![1, 2, 3, 4]);
        assert_eq!(WizardStage::default(), WizardStage::Script);
        assert_eq!(WizardStage::Generating.to_string(), "Generating");
    }

    #[test]
    fn test_reset_keeps_catalog() {
        let mut state = WizardState {
            stage: WizardStage::Result,
            voices: VoiceCatalog::new(vec![Voice::new("a", "A"), Voice::new("b", "B")]),
            voices_loaded: true,
            is_generating: true,
            error: Some("boom".to_string()),
            ..Default::default()
        };
        state.draft.script = "Hello".to_string();
        state.draft.aspect_ratio = AspectRatio::Portrait;
        state.draft.voice_id = crate::voice::VoiceId::new("b");

        state.reset();

        assert_eq!(state.stage, WizardStage::Script);
        assert!(state.draft.script.is_empty());
        assert_eq!(state.draft.aspect_ratio, AspectRatio::Landscape);
        assert_eq!(state.draft.voice_id.as_str(), "a");
        assert_eq!(state.voices.voices().len(), 2);
        assert!(state.voices_loaded);
        assert!(!state.is_generating);
        assert!(state.error.is_none());
    }

    #[test]
    fn test_draft_frozen_while_submitting() {
        let mut state = WizardState::default();
        assert!(state.draft_editable());
        state.submitting = true;
        assert!(!state.draft_editable());
        state.submitting = false;
        state.stage = WizardStage::Generating;
        assert!(!state.draft_editable());
    }
}
