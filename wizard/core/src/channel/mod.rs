//! Live Progress Channel
//!
//! Push-based status delivery for a running generation. A channel is keyed by
//! a `GenerationId` and carries JSON status events until the job finishes or
//! the owner closes it.
//!
//! # Design Philosophy
//!
//! The channel layer knows nothing about wizard stages. It connects, decodes
//! and forwards; the subscriber decides when a channel should exist and the
//! wizard decides what an event means.
//!
//! # Transports
//!
//! - **WebSocket** (`websocket` feature, default): `ws(s)://<base>/api/ws/<id>`
//! - Test doubles live in [`crate::test_utils`]

mod endpoint;
mod event;
mod traits;
#[cfg(feature = "websocket")]
mod websocket;

pub use endpoint::push_channel_url;
pub use event::ProgressEvent;
pub use traits::{ChannelConnector, ChannelError, ChannelFrame, LiveChannel};
#[cfg(feature = "websocket")]
pub use websocket::{WebSocketChannel, WebSocketConnector};
