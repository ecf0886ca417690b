//! Channel Traits
//!
//! Two traits define the push side of the wizard:
//! - `ChannelConnector`: opens a live channel for one generation
//! - `LiveChannel`: one open connection, drained without blocking
//!
//! Opening is synchronous from the caller's point of view: implementations
//! connect in the background and report the outcome as frames.

use thiserror::Error;

use super::event::ProgressEvent;
use crate::job::GenerationId;

/// Errors reported by a live channel
///
/// These are logged by the subscriber and never change job state.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ChannelError {
    /// Could not derive the channel URL
    #[error("Invalid channel URL: {0}")]
    InvalidUrl(String),
    /// Connection could not be established
    #[error("Connection failed: {0}")]
    ConnectFailed(String),
    /// Transport failed after connecting
    #[error("Transport error: {0}")]
    Transport(String),
    /// Inbound frame was not a valid progress event
    #[error("Malformed progress event: {0}")]
    Decode(String),
}

/// Something that arrived on a live channel
#[derive(Clone, Debug, PartialEq)]
pub enum ChannelFrame {
    /// A decoded status event
    Event(ProgressEvent),
    /// A transport or decode error (the channel may still be open)
    Error(ChannelError),
    /// The remote end went away; no more frames will follow
    Closed,
}

/// One open push connection
pub trait LiveChannel: Send {
    /// Generation this channel is keyed by
    fn generation_id(&self) -> &GenerationId;

    /// Next frame, if one has arrived (non-blocking)
    fn try_recv(&mut self) -> Option<ChannelFrame>;

    /// Close the connection
    ///
    /// Idempotent and infallible: closing an already closed channel is a no-op.
    fn close(&mut self);

    /// Whether `close` has not been called yet
    fn is_open(&self) -> bool;
}

/// Factory for live channels
pub trait ChannelConnector: Send + Sync {
    /// Open a channel for `generation_id`
    fn open(&self, generation_id: &GenerationId) -> Box<dyn LiveChannel>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_channel_error_display() {
        let err = ChannelError::ConnectFailed("refused".to_string());
        assert!(err.to_string().contains("refused"));

        let err = ChannelError::Decode("expected value".to_string());
        assert!(err.to_string().starts_with("Malformed progress event"));
    }
}
