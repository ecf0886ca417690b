//! Studio Backend Integration
//!
//! Job submission and catalog lookup behind a common trait.
//!
//! # Usage
//!
//! ```ignore
//! use wizard_core::api::{HttpStudioApi, StudioApi};
//!
//! let api = HttpStudioApi::new(&config.backend_url);
//! let voices = api.list_voices().await?;
//! ```

mod http;
mod traits;

pub use http::HttpStudioApi;
pub use traits::{
    CreateProjectRequest, GenerationStarted, ProjectCreated, StartGenerationRequest, StudioApi,
    SubmissionError,
};
