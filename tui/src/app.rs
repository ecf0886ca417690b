//! Main Application
//!
//! The App is a thin display client over the headless [`Wizard`]:
//! 1. Converts key presses to `WizardEvent`s via the keymap
//! 2. Drains finished backend calls and progress events each frame
//! 3. Renders the wizard state
//!
//! All state lives in the wizard. The App only owns the loop.

use std::time::Duration;

use crossterm::event::{Event, EventStream, KeyEvent, KeyEventKind};
use futures::StreamExt;
use ratatui::backend::Backend;
use ratatui::Terminal;
use tokio::time::MissedTickBehavior;

use wizard_core::{ChannelConnector, StudioApi, Wizard, WizardState};

use crate::keymap::{map_key, KeyAction};
use crate::view;

/// Frame period (~30 FPS is plenty for a form and a progress bar)
const FRAME_PERIOD: Duration = Duration::from_millis(33);

/// Quick goodbye messages
const QUICK_GOODBYES: &[&str] = &[
    "That's a wrap!",
    "Cut! Print it.",
    "See you at the premiere!",
    "Roll credits.",
    "Fade to black.",
    "Until the sequel!",
    "Go make something cool!",
];

/// Main application state
pub struct App<A: StudioApi + 'static, C: ChannelConnector> {
    /// Is the app still running?
    running: bool,
    /// Goodbye message to show on exit
    goodbye_message: Option<String>,
    /// The headless wizard
    wizard: Wizard<A, C>,
}

impl<A: StudioApi + 'static, C: ChannelConnector> App<A, C> {
    /// Wrap a wizard. Call [`Wizard::start`] first if voices should load.
    pub fn new(wizard: Wizard<A, C>) -> Self {
        Self {
            running: true,
            goodbye_message: None,
            wizard,
        }
    }

    /// Current wizard state
    pub fn state(&self) -> &WizardState {
        self.wizard.state()
    }

    /// Still running?
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Run until the user quits
    pub async fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> anyhow::Result<()> {
        let mut event_stream = EventStream::new();
        let mut frames = tokio::time::interval(FRAME_PERIOD);
        frames.set_missed_tick_behavior(MissedTickBehavior::Skip);

        // Render initial frame immediately so the user sees the UI
        self.render(terminal)?;

        while self.running {
            tokio::select! {
                biased;

                maybe_event = event_stream.next() => {
                    match maybe_event {
                        // Only handle Press events (not Release or Repeat)
                        Some(Ok(Event::Key(key))) if key.kind == KeyEventKind::Press => {
                            self.handle_key(key);
                        }
                        Some(Ok(_)) => {}
                        Some(Err(e)) => {
                            tracing::warn!("Terminal event error: {}", e);
                        }
                        None => {
                            tracing::info!("Terminal event stream ended");
                            self.running = false;
                        }
                    }
                }

                _ = frames.tick() => {}
            }

            self.wizard.poll();
            self.render(terminal)?;
        }

        Ok(())
    }

    /// Handle one key press
    pub fn handle_key(&mut self, key: KeyEvent) {
        match map_key(key, self.wizard.state()) {
            KeyAction::Quit => {
                self.generate_goodbye();
                self.running = false;
            }
            KeyAction::Wizard(event) => {
                if let Err(e) = self.wizard.handle_event(event) {
                    tracing::debug!("Key ignored: {}", e);
                }
            }
            KeyAction::Ignore => {}
        }
    }

    fn render<B: Backend>(&self, terminal: &mut Terminal<B>) -> anyhow::Result<()> {
        terminal.draw(|frame| view::render(frame, self.wizard.state()))?;
        Ok(())
    }

    /// Generate a quick goodbye message
    fn generate_goodbye(&mut self) {
        let idx = rand::random::<usize>() % QUICK_GOODBYES.len();
        self.goodbye_message = Some(QUICK_GOODBYES[idx].to_string());
    }

    /// Get the goodbye message for display after the TUI closes
    pub fn goodbye(&self) -> Option<&str> {
        self.goodbye_message.as_deref()
    }
}
