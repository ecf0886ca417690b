//! Voice Catalog
//!
//! Narration voices offered by the backend. The catalog is loaded once when
//! the wizard starts and never changes afterwards.
//!
//! If the load fails, or the backend has no voices, the catalog holds exactly
//! one synthetic voice so that a selection always exists.

use serde::{Deserialize, Serialize};

use crate::api::SubmissionError;

/// Reserved identifier of the synthetic fallback voice
pub const FALLBACK_VOICE_ID: &str = "default";

/// Display name of the synthetic fallback voice
pub const FALLBACK_VOICE_NAME: &str = "Default Voice";

/// Voice identifier
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VoiceId(pub String);

impl VoiceId {
    /// Create a voice ID from a string
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Get the string value
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether no voice has been selected yet
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl std::fmt::Display for VoiceId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A selectable narration voice
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Voice {
    /// Unique identifier
    pub voice_id: VoiceId,
    /// Name shown to the user
    #[serde(rename = "name")]
    pub display_name: String,
}

impl Voice {
    /// Create a voice
    pub fn new(voice_id: impl Into<String>, display_name: impl Into<String>) -> Self {
        Self {
            voice_id: VoiceId::new(voice_id),
            display_name: display_name.into(),
        }
    }

    /// The synthetic voice used when the real catalog is unavailable
    #[must_use]
    pub fn fallback() -> Self {
        Self::new(FALLBACK_VOICE_ID, FALLBACK_VOICE_NAME)
    }
}

/// Loaded set of voices
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct VoiceCatalog {
    voices: Vec<Voice>,
    is_fallback: bool,
}

impl VoiceCatalog {
    /// Build a catalog from a list of voices
    ///
    /// An empty list yields the fallback catalog.
    #[must_use]
    pub fn new(voices: Vec<Voice>) -> Self {
        if voices.is_empty() {
            Self::fallback()
        } else {
            Self {
                voices,
                is_fallback: false,
            }
        }
    }

    /// Catalog holding only the synthetic fallback voice
    #[must_use]
    pub fn fallback() -> Self {
        Self {
            voices: vec![Voice::fallback()],
            is_fallback: true,
        }
    }

    /// Build a catalog from the outcome of a catalog request
    #[must_use]
    pub fn from_result(result: Result<Vec<Voice>, SubmissionError>) -> Self {
        match result {
            Ok(voices) if !voices.is_empty() => {
                tracing::debug!(count = voices.len(), "Loaded voice catalog");
                Self::new(voices)
            }
            Ok(_) => {
                tracing::warn!("Voice catalog is empty, using fallback voice");
                Self::fallback()
            }
            Err(e) => {
                tracing::warn!(error = %e, "Failed to load voices, using fallback voice");
                Self::fallback()
            }
        }
    }

    /// All voices, in backend order
    #[must_use]
    pub fn voices(&self) -> &[Voice] {
        &self.voices
    }

    /// Whether nothing has been loaded yet
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.voices.is_empty()
    }

    /// Whether this is the synthetic fallback catalog
    #[must_use]
    pub fn is_fallback(&self) -> bool {
        self.is_fallback
    }

    /// Voice selected by default (the first entry)
    #[must_use]
    pub fn default_voice(&self) -> Option<&Voice> {
        self.voices.first()
    }

    /// Look up a voice by ID
    #[must_use]
    pub fn get(&self, voice_id: &VoiceId) -> Option<&Voice> {
        self.voices.iter().find(|v| &v.voice_id == voice_id)
    }

    /// Whether a voice ID is selectable
    #[must_use]
    pub fn contains(&self, voice_id: &VoiceId) -> bool {
        self.get(voice_id).is_some()
    }

    /// Display name for a voice ID, or "Default" when unknown
    #[must_use]
    pub fn display_name(&self, voice_id: &VoiceId) -> &str {
        self.get(voice_id)
            .map_or("Default", |v| v.display_name.as_str())
    }

    /// Position of a voice in the list
    #[must_use]
    pub fn position(&self, voice_id: &VoiceId) -> Option<usize> {
        self.voices.iter().position(|v| &v.voice_id == voice_id)
    }

    /// Voice next to `voice_id`, wrapping around (`forward` = down the list)
    #[must_use]
    pub fn cycle(&self, voice_id: &VoiceId, forward: bool) -> Option<&Voice> {
        let len = self.voices.len();
        if len == 0 {
            return None;
        }
        let idx = match self.position(voice_id) {
            Some(i) if forward => (i + 1) % len,
            Some(i) => (i + len - 1) % len,
            None => 0,
        };
        self.voices.get(idx)
    }
}
