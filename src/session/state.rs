//! Session state: lifecycle states, per-session data and the cancel token.

use crate::document::Patcher;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Lifecycle of the stream writer.
///
/// ```text
/// Idle ──start──▶ Streaming ──stop──▶ Finalizing ──▶ Idle
///                     │
///                     └──abort/cancel──▶ Aborted ──▶ Idle
/// ```
///
/// `Finalizing` and `Aborted` are transient: they are only observable from
/// inside the transition that passes through them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SessionState {
    /// No session.
    #[default]
    Idle,
    /// Accepting chunks and rendering on frames.
    Streaming,
    /// Writing the final, non-provisional render.
    Finalizing,
    /// Cancelled; content stays as of the last successful render.
    Aborted,
}

/// Cooperative cancellation flag shared with the host.
///
/// Cancelling does not interrupt anything: the writer inspects the flag at
/// the top of every frame and aborts the session there.
#[derive(Debug, Clone, Default)]
pub struct CancelToken {
    cancelled: Arc<AtomicBool>,
}

impl CancelToken {
    /// Create a fresh, uncancelled token.
    pub fn new() -> Self {
        Self::default()
    }

    /// Request cancellation.
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::Relaxed);
    }

    /// Whether cancellation has been requested.
    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Relaxed)
    }
}

/// Data owned by one streaming session.
#[derive(Debug)]
pub struct StreamSession {
    /// Concatenation of every chunk received so far.
    pub(crate) buffer: String,
    /// Owner of the document range; holds the anchor and last render.
    pub(crate) patcher: Patcher,
    /// Buffer length at the last tick that reached the document.
    pub(crate) settled_len: Option<usize>,
    /// Cancellation flag handed to the host.
    pub(crate) token: CancelToken,
}

impl StreamSession {
    /// Start a session anchored at `anchor`.
    pub fn new(anchor: usize) -> Self {
        Self {
            buffer: String::new(),
            patcher: Patcher::new(anchor),
            settled_len: None,
            token: CancelToken::new(),
        }
    }

    /// The fixed anchor position.
    pub const fn anchor(&self) -> usize {
        self.patcher.anchor()
    }

    /// The accumulated buffer.
    pub fn buffer(&self) -> &str {
        &self.buffer
    }

    /// The last text written to the document.
    pub fn last_rendered(&self) -> &str {
        self.patcher.last_rendered()
    }

    /// Append a chunk.
    pub(crate) fn push(&mut self, chunk: &str) {
        self.buffer.push_str(chunk);
    }

    /// Whether nothing arrived since the last tick that reached the document.
    pub(crate) fn is_settled(&self) -> bool {
        self.settled_len == Some(self.buffer.len())
    }
}
