//! Project Draft
//!
//! The user's in-progress input: script text plus video settings.
//! The Wizard decides when the draft may change; this module only holds it.

use serde::{Deserialize, Serialize};

use crate::voice::VoiceId;

/// Average narration pace used for duration estimates
const WORDS_PER_MINUTE: usize = 150;

/// Output video aspect ratio
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AspectRatio {
    /// 16:9 landscape
    #[default]
    #[serde(rename = "16:9")]
    Landscape,
    /// 9:16 portrait
    #[serde(rename = "9:16")]
    Portrait,
}

impl AspectRatio {
    /// All selectable ratios, in display order
    pub const ALL: [AspectRatio; 2] = [AspectRatio::Landscape, AspectRatio::Portrait];

    /// Wire representation
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Landscape => "16:9",
            Self::Portrait => "9:16",
        }
    }

    /// Human-readable label
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            Self::Landscape => "16:9 Landscape",
            Self::Portrait => "9:16 Portrait",
        }
    }

    /// The other ratio
    #[must_use]
    pub fn toggled(self) -> Self {
        match self {
            Self::Landscape => Self::Portrait,
            Self::Portrait => Self::Landscape,
        }
    }
}

impl std::fmt::Display for AspectRatio {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Script and settings collected before submission
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ProjectDraft {
    /// Raw script text as typed
    pub script: String,
    /// Selected aspect ratio
    pub aspect_ratio: AspectRatio,
    /// Selected voice (empty until the catalog has loaded)
    pub voice_id: VoiceId,
}

impl ProjectDraft {
    /// Script with surrounding whitespace removed (what gets submitted)
    #[must_use]
    pub fn trimmed_script(&self) -> &str {
        self.script.trim()
    }

    /// Whether the script passes the presence check
    #[must_use]
    pub fn has_script(&self) -> bool {
        !self.trimmed_script().is_empty()
    }

    /// Counts shown under the script editor
    #[must_use]
    pub fn stats(&self) -> ScriptStats {
        ScriptStats::of(&self.script)
    }

    /// Short excerpt for the settings summary
    #[must_use]
    pub fn preview(&self, max_chars: usize) -> String {
        let script = self.trimmed_script();
        if script.chars().count() <= max_chars {
            script.to_string()
        } else {
            let head: String = script.chars().take(max_chars).collect();
            format!("{head}...")
        }
    }
}

/// Script statistics
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ScriptStats {
    /// Character count (raw, including whitespace)
    pub characters: usize,
    /// Whitespace-separated word count
    pub words: usize,
    /// Estimated narration length in whole minutes, rounded up
    pub estimated_minutes: usize,
}

impl ScriptStats {
    /// Compute statistics for a script
    #[must_use]
    pub fn of(script: &str) -> Self {
        let words = script.split_whitespace().count();
        Self {
            characters: script.chars().count(),
            words,
            estimated_minutes: words.div_ceil(WORDS_PER_MINUTE),
        }
    }
}
