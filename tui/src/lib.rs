//! scriptreel TUI - terminal front end for the script-to-video wizard
//!
//! A thin display client: every decision lives in `wizard_core::Wizard`.
//!
//! # Architecture
//!
//! - **App**: async loop over terminal events and a frame tick
//! - **Keymap**: key press to `WizardEvent`, per stage
//! - **View**: pure render of `WizardState`
//! - **Theme**: palette and styles

pub mod app;
pub mod keymap;
pub mod theme;
pub mod view;

pub use app::App;
