//! Key Bindings
//!
//! Translates key presses into wizard events. Pure: looks at the key and the
//! current wizard state, never mutates anything.
//!
//! | Stage      | Key              | Action                   |
//! |------------|------------------|--------------------------|
//! | any        | Ctrl+C / Ctrl+Q  | quit                     |
//! | any        | Ctrl+N           | start over               |
//! | any        | Esc (banner up)  | dismiss error            |
//! | Script     | text / Enter     | edit script              |
//! | Script     | Tab / Ctrl+S     | submit script            |
//! | Settings   | Left / Right     | aspect ratio             |
//! | Settings   | Up / Down        | voice                    |
//! | Settings   | Enter            | generate                 |
//! | Settings   | Esc / Backspace  | back to script           |
//! | Generating | Enter (failed)   | start over               |
//! | Result     | Enter            | start over               |

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use wizard_core::{AspectRatio, WizardEvent, WizardStage, WizardState};

/// What a key press asks for
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum KeyAction {
    /// Feed an event to the wizard
    Wizard(WizardEvent),
    /// Leave the application
    Quit,
    /// Nothing bound
    Ignore,
}

/// Map a key press to an action
#[must_use]
pub fn map_key(key: KeyEvent, state: &WizardState) -> KeyAction {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

    match key.code {
        KeyCode::Char('c' | 'q') if ctrl => return KeyAction::Quit,
        KeyCode::Char('n') if ctrl => return KeyAction::Wizard(WizardEvent::StartOver),
        KeyCode::Esc if state.error.is_some() => {
            return KeyAction::Wizard(WizardEvent::DismissError)
        }
        _ => {}
    }

    match state.stage {
        WizardStage::Script => script_key(key, ctrl, state),
        WizardStage::Settings => settings_key(key, state),
        WizardStage::Generating => match key.code {
            KeyCode::Enter if !state.is_generating => KeyAction::Wizard(WizardEvent::StartOver),
            _ => KeyAction::Ignore,
        },
        WizardStage::Result => match key.code {
            KeyCode::Enter => KeyAction::Wizard(WizardEvent::StartOver),
            _ => KeyAction::Ignore,
        },
    }
}

fn script_key(key: KeyEvent, ctrl: bool, state: &WizardState) -> KeyAction {
    let script = &state.draft.script;

    let edited = match key.code {
        KeyCode::Tab => return KeyAction::Wizard(WizardEvent::SubmitScript),
        KeyCode::Char('s') if ctrl => return KeyAction::Wizard(WizardEvent::SubmitScript),
        KeyCode::Char(_) if ctrl => return KeyAction::Ignore,
        KeyCode::Char(c) => format!("{script}{c}"),
        KeyCode::Enter => format!("{script}\n"),
        KeyCode::Backspace => {
            let mut s = script.clone();
            if s.pop().is_none() {
                return KeyAction::Ignore;
            }
            s
        }
        _ => return KeyAction::Ignore,
    };

    KeyAction::Wizard(WizardEvent::EditScript { script: edited })
}

fn settings_key(key: KeyEvent, state: &WizardState) -> KeyAction {
    let event = match key.code {
        KeyCode::Left => WizardEvent::SelectAspectRatio {
            aspect_ratio: AspectRatio::Landscape,
        },
        KeyCode::Right => WizardEvent::SelectAspectRatio {
            aspect_ratio: AspectRatio::Portrait,
        },
        KeyCode::Up | KeyCode::Down => {
            let forward = key.code == KeyCode::Down;
            match state.voices.cycle(&state.draft.voice_id, forward) {
                Some(voice) => WizardEvent::SelectVoice {
                    voice_id: voice.voice_id.clone(),
                },
                None => return KeyAction::Ignore,
            }
        }
        KeyCode::Enter => WizardEvent::StartGeneration,
        KeyCode::Esc | KeyCode::Backspace => WizardEvent::BackToScript,
        _ => return KeyAction::Ignore,
    };

    KeyAction::Wizard(event)
}
