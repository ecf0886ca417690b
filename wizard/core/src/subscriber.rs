//! Live Progress Subscriber
//!
//! Owns the single push connection of a wizard run. The Wizard tells it
//! which generation to follow (`arm`) or that nothing should be followed
//! (`disarm`); the subscriber turns that into channel opens and closes and
//! hands decoded events back on `poll`.
//!
//! # Invariants
//!
//! - At most one channel exists at any time
//! - Arming with a new generation closes the previous channel before opening
//! - `disarm` is idempotent and never fails
//! - Dropping the subscriber closes its channel
//!
//! # Reconnects
//!
//! A channel the server closes is not reopened unless a bounded
//! [`ReconnectPolicy`] is configured. Backoff is checked against the time
//! passed to [`ProgressSubscriber::poll_at`]; nothing here sleeps.

use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};

use crate::channel::{ChannelConnector, ChannelFrame, LiveChannel, ProgressEvent};
use crate::job::GenerationId;

/// What to do when the server closes an armed channel
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum ReconnectPolicy {
    /// Leave the channel closed
    #[default]
    Never,
    /// Reopen with exponential backoff, up to `max_attempts` times in a row
    Bounded {
        /// Consecutive reopen attempts before giving up
        max_attempts: u32,
        /// Delay before the first reopen
        initial_backoff_ms: u64,
        /// Upper bound on the delay
        max_backoff_ms: u64,
    },
}

impl ReconnectPolicy {
    /// Delay before reopen attempt number `attempt` (0-based), or `None` to give up
    #[must_use]
    pub fn backoff(&self, attempt: u32) -> Option<Duration> {
        match *self {
            Self::Never => None,
            Self::Bounded {
                max_attempts,
                initial_backoff_ms,
                max_backoff_ms,
            } => {
                if attempt >= max_attempts {
                    return None;
                }
                let factor = 1u64.checked_shl(attempt).unwrap_or(u64::MAX);
                let delay = initial_backoff_ms.saturating_mul(factor).min(max_backoff_ms);
                Some(Duration::from_millis(delay))
            }
        }
    }
}

/// Single-connection push subscriber
pub struct ProgressSubscriber<C: ChannelConnector> {
    connector: C,
    policy: ReconnectPolicy,
    /// Generation currently followed
    armed: Option<GenerationId>,
    /// Open channel for `armed`, if any
    channel: Option<Box<dyn LiveChannel>>,
    /// Consecutive reopen attempts since the last received event
    attempts: u32,
    /// When to reopen a channel the server closed
    retry_at: Option<Instant>,
}

impl<C: ChannelConnector> ProgressSubscriber<C> {
    /// Create an unarmed subscriber
    pub fn new(connector: C, policy: ReconnectPolicy) -> Self {
        Self {
            connector,
            policy,
            armed: None,
            channel: None,
            attempts: 0,
            retry_at: None,
        }
    }

    /// Follow `generation_id`
    ///
    /// No-op if already armed for the same generation. Otherwise any current
    /// channel is closed before the new one is opened.
    pub fn arm(&mut self, generation_id: &GenerationId) {
        if self.armed.as_ref() == Some(generation_id) {
            return;
        }

        self.disarm();

        tracing::debug!(generation_id = %generation_id, "Arming progress subscriber");
        self.channel = Some(self.connector.open(generation_id));
        self.armed = Some(generation_id.clone());
    }

    /// Stop following and close the channel
    pub fn disarm(&mut self) {
        if let Some(mut channel) = self.channel.take() {
            channel.close();
        }
        if let Some(generation_id) = self.armed.take() {
            tracing::debug!(generation_id = %generation_id, "Disarmed progress subscriber");
        }
        self.attempts = 0;
        self.retry_at = None;
    }

    /// Generation currently followed
    #[must_use]
    pub fn armed_for(&self) -> Option<&GenerationId> {
        self.armed.as_ref()
    }

    /// Whether a channel is currently open
    #[must_use]
    pub fn is_connected(&self) -> bool {
        self.channel.as_ref().is_some_and(|c| c.is_open())
    }

    /// Reconnect policy in effect
    #[must_use]
    pub fn policy(&self) -> ReconnectPolicy {
        self.policy
    }

    /// Drain pending events (non-blocking)
    pub fn poll(&mut self) -> Vec<ProgressEvent> {
        self.poll_at(Instant::now())
    }

    /// Drain pending events, treating `now` as the current time for reconnects
    pub fn poll_at(&mut self, now: Instant) -> Vec<ProgressEvent> {
        self.reopen_if_due(now);

        let mut events = Vec::new();
        let mut closed = false;

        if let Some(channel) = self.channel.as_mut() {
            while let Some(frame) = channel.try_recv() {
                match frame {
                    ChannelFrame::Event(event) => {
                        self.attempts = 0;
                        events.push(event);
                    }
                    ChannelFrame::Error(e) => {
                        tracing::warn!(
                            generation_id = %channel.generation_id(),
                            error = %e,
                            "Progress channel error"
                        );
                    }
                    ChannelFrame::Closed => {
                        closed = true;
                        break;
                    }
                }
            }
        }

        if closed {
            if let Some(mut channel) = self.channel.take() {
                channel.close();
            }
            self.schedule_reopen(now);
        }

        events
    }

    fn schedule_reopen(&mut self, now: Instant) {
        let retry = self
            .policy
            .backoff(self.attempts)
            .and_then(|delay| Some((delay, now.checked_add(delay)?)));

        match retry {
            Some((delay, retry_at)) => {
                self.attempts += 1;
                self.retry_at = Some(retry_at);
                tracing::info!(
                    attempt = self.attempts,
                    delay = ?delay,
                    "Progress channel closed, reconnect scheduled"
                );
            }
            None => {
                self.retry_at = None;
                tracing::info!("Progress channel closed");
            }
        }
    }

    fn reopen_if_due(&mut self, now: Instant) {
        let due = self.retry_at.is_some_and(|at| now >= at);
        if !due || self.channel.is_some() {
            return;
        }
        self.retry_at = None;

        if let Some(generation_id) = self.armed.as_ref() {
            tracing::debug!(generation_id = %generation_id, attempt = self.attempts, "Reopening progress channel");
            self.channel = Some(self.connector.open(generation_id));
        }
    }
}

impl<C: ChannelConnector> Drop for ProgressSubscriber<C> {
    fn drop(&mut self) {
        self.disarm();
    }
}
