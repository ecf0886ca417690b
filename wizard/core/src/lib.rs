//! Wizard Core - Headless Script-to-Video Wizard for scriptreel
//!
//! This crate drives a long-running, server-side video generation from the
//! client side: it collects a script and settings, submits them, follows the
//! job over a push channel and exposes the finished video. It has no UI
//! dependencies and can drive a TUI, a web front-end or run headless in tests.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                        UI Surfaces                            │
//! │        ┌─────────┐          ┌──────────────────────┐          │
//! │        │   TUI   │          │  Headless / Tests    │          │
//! │        │(ratatui)│          │                      │          │
//! │        └────┬────┘          └──────────┬───────────┘          │
//! │             └──────────────┬───────────┘                      │
//! │                 WizardEvent (up) / &WizardState (read)        │
//! └────────────────────────────┼─────────────────────────────────┘
//!                              │
//! ┌────────────────────────────┼─────────────────────────────────┐
//! │                      WIZARD CORE                              │
//! │  ┌─────────────────────────┴──────────────────────────────┐  │
//! │  │                        Wizard                           │  │
//! │  │  ┌──────────┐  ┌──────────┐  ┌──────────┐  ┌─────────┐ │  │
//! │  │  │  Draft   │  │  Voice   │  │   Job    │  │ Progress│ │  │
//! │  │  │          │  │ Catalog  │  │          │  │Subscriber│ │  │
//! │  │  └──────────┘  └──────────┘  └──────────┘  └────┬────┘ │  │
//! │  └─────────────────────────┬───────────────────────┼──────┘  │
//! │                  StudioApi (HTTP)        LiveChannel (WS)     │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Key Types
//!
//! - [`Wizard`]: the state machine; owns everything below
//! - [`WizardEvent`]: user intents fed to the Wizard
//! - [`WizardState`]: what a surface renders
//! - [`StudioApi`]: backend seam (project, generation, voices)
//! - [`ProgressSubscriber`]: the single push connection
//!
//! # Quick Start
//!
//! ```ignore
//! use wizard_core::{
//!     config, HttpStudioApi, WebSocketConnector, Wizard, WizardEvent,
//! };
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = config::load_config()?;
//!     let api = HttpStudioApi::new(&config.backend_url);
//!     let connector = WebSocketConnector::new(config.backend_url.clone());
//!     let mut wizard = Wizard::new(api, connector, config.reconnect);
//!
//!     wizard.start();
//!     wizard.handle_event(WizardEvent::EditScript { script: "Hello".into() })?;
//!     wizard.handle_event(WizardEvent::SubmitScript)?;
//!
//!     loop {
//!         // Fold in network results and push events, then render
//!         wizard.poll();
//!     }
//! }
//! ```
//!
//! # Module Overview
//!
//! - [`api`]: studio backend trait and HTTP client
//! - [`channel`]: push channel traits, event decoding, WebSocket connector
//! - [`config`]: TOML + environment configuration
//! - [`draft`]: script and settings
//! - [`events`]: wizard events
//! - [`job`]: generation job and identifiers
//! - [`subscriber`]: single-connection progress subscriber
//! - [`test_utils`]: in-memory backend and connector
//! - [`voice`]: voice catalog
//! - [`wizard`]: the Wizard
//!
//! # No TUI Dependencies
//!
//! This crate has **zero** dependencies on ratatui, crossterm, or any other
//! UI framework.

#![deny(missing_docs)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod api;
pub mod channel;
pub mod config;
pub mod draft;
pub mod events;
pub mod job;
pub mod subscriber;
pub mod test_utils;
pub mod voice;
pub mod wizard;

// Re-exports for convenience
pub use api::{
    CreateProjectRequest, GenerationStarted, HttpStudioApi, ProjectCreated,
    StartGenerationRequest, StudioApi, SubmissionError,
};
pub use channel::{
    push_channel_url, ChannelConnector, ChannelError, ChannelFrame, LiveChannel, ProgressEvent,
};
#[cfg(feature = "websocket")]
pub use channel::{WebSocketChannel, WebSocketConnector};
pub use draft::{AspectRatio, ProjectDraft, ScriptStats};
pub use events::WizardEvent;
pub use job::{GenerationId, Job, JobStatus, ProjectId};
pub use subscriber::{ProgressSubscriber, ReconnectPolicy};
pub use voice::{Voice, VoiceCatalog, VoiceId, FALLBACK_VOICE_ID, FALLBACK_VOICE_NAME};
pub use wizard::{Wizard, WizardError, WizardStage, WizardState};

// Config exports
pub use config::{
    default_config_path, load_config, load_config_from_path, load_config_with_overrides,
    ConfigError, ConfigOverrides, ConfigSource, StudioConfig, StudioToml,
};
