//! WebSocket Push Channel
//!
//! `ChannelConnector` over tokio-tungstenite. Each `open` spawns a reader
//! task that connects, decodes text frames into `ProgressEvent`s and forwards
//! them over an unbounded channel, so the owner never awaits on the socket.
//!
//! # Lifecycle
//!
//! - `open` returns immediately; connect failures arrive as `Error` + `Closed`
//! - `close` signals the reader task, which sends a close frame and exits
//! - the handle stops yielding frames as soon as `close` returns
//!
//! Requires a running tokio runtime when `open` is called.

use futures::StreamExt;
use tokio::sync::{mpsc, oneshot};
use tokio_tungstenite::tungstenite::Message;
use url::Url;

use super::endpoint::push_channel_url;
use super::event::ProgressEvent;
use super::traits::{ChannelConnector, ChannelError, ChannelFrame, LiveChannel};
use crate::job::GenerationId;

/// Opens WebSocket push channels against a studio backend
#[derive(Clone, Debug)]
pub struct WebSocketConnector {
    base_url: Url,
}

impl WebSocketConnector {
    /// Create a connector for the backend at `base_url` (http or https)
    #[must_use]
    pub fn new(base_url: Url) -> Self {
        Self { base_url }
    }

    /// Get the backend base URL
    #[must_use]
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }
}

impl ChannelConnector for WebSocketConnector {
    fn open(&self, generation_id: &GenerationId) -> Box<dyn LiveChannel> {
        let (frame_tx, frame_rx) = mpsc::unbounded_channel();
        let (shutdown_tx, shutdown_rx) = oneshot::channel();

        match push_channel_url(&self.base_url, generation_id) {
            Ok(url) => {
                tracing::debug!(url = %url, "Opening push channel");
                tokio::spawn(run_channel(url, frame_tx, shutdown_rx));
            }
            Err(e) => {
                let _ = frame_tx.send(ChannelFrame::Error(e));
                let _ = frame_tx.send(ChannelFrame::Closed);
            }
        }

        Box::new(WebSocketChannel {
            generation_id: generation_id.clone(),
            frame_rx: Some(frame_rx),
            shutdown_tx: Some(shutdown_tx),
        })
    }
}

/// Handle to one WebSocket reader task
pub struct WebSocketChannel {
    generation_id: GenerationId,
    frame_rx: Option<mpsc::UnboundedReceiver<ChannelFrame>>,
    shutdown_tx: Option<oneshot::Sender<()>>,
}

impl LiveChannel for WebSocketChannel {
    fn generation_id(&self) -> &GenerationId {
        &self.generation_id
    }

    fn try_recv(&mut self) -> Option<ChannelFrame> {
        self.frame_rx.as_mut()?.try_recv().ok()
    }

    fn close(&mut self) {
        if let Some(shutdown) = self.shutdown_tx.take() {
            // Reader may already be gone
            let _ = shutdown.send(());
            tracing::debug!(generation_id = %self.generation_id, "Push channel closed");
        }
        self.frame_rx = None;
    }

    fn is_open(&self) -> bool {
        self.shutdown_tx.is_some()
    }
}

impl Drop for WebSocketChannel {
    fn drop(&mut self) {
        self.close();
    }
}

/// Reader task: socket -> frame_tx, until the socket ends or shutdown fires
async fn run_channel(
    url: Url,
    frame_tx: mpsc::UnboundedSender<ChannelFrame>,
    mut shutdown_rx: oneshot::Receiver<()>,
) {
    let connect = tokio_tungstenite::connect_async(url.as_str());

    let mut socket = tokio::select! {
        _ = &mut shutdown_rx => return,
        result = connect => match result {
            Ok((socket, _response)) => socket,
            Err(e) => {
                let error = ChannelError::ConnectFailed(e.to_string());
                let _ = frame_tx.send(ChannelFrame::Error(error));
                let _ = frame_tx.send(ChannelFrame::Closed);
                return;
            }
        },
    };

    tracing::info!(url = %url, "Push channel connected");

    loop {
        tokio::select! {
            _ = &mut shutdown_rx => {
                let _ = socket.close(None).await;
                return;
            }
            message = socket.next() => match message {
                Some(Ok(Message::Text(text))) => {
                    let frame = match ProgressEvent::decode(&text) {
                        Ok(event) => ChannelFrame::Event(event),
                        Err(e) => ChannelFrame::Error(e),
                    };
                    if frame_tx.send(frame).is_err() {
                        // Handle dropped
                        let _ = socket.close(None).await;
                        return;
                    }
                }
                Some(Ok(Message::Close(_))) | None => break,
                Some(Ok(_)) => {}
                Some(Err(e)) => {
                    let error = ChannelError::Transport(e.to_string());
                    let _ = frame_tx.send(ChannelFrame::Error(error));
                    break;
                }
            },
        }
    }

    tracing::debug!(url = %url, "Push channel ended by server");
    let _ = frame_tx.send(ChannelFrame::Closed);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_unsupported_scheme_reports_error_then_closed() {
        let connector = WebSocketConnector::new(Url::parse("ftp://example.com").unwrap());
        let mut channel = connector.open(&GenerationId::new("g"));

        assert!(matches!(
            channel.try_recv(),
            Some(ChannelFrame::Error(ChannelError::InvalidUrl(_)))
        ));
        assert_eq!(channel.try_recv(), Some(ChannelFrame::Closed));
    }

    #[tokio::test]
    async fn test_close_is_idempotent() {
        let connector = WebSocketConnector::new(Url::parse("http://127.0.0.1:9").unwrap());
        let mut channel = connector.open(&GenerationId::new("g"));

        assert!(channel.is_open());
        channel.close();
        assert!(!channel.is_open());
        channel.close();
        assert!(!channel.is_open());
        assert!(channel.try_recv().is_none());
    }
}
