//! Message types for driving a stream writer from other threads.

use crate::session::CancelToken;
use crossbeam_channel::{bounded, Sender};

/// Commands accepted by a [`StreamDriver`](super::StreamDriver).
///
/// Commands are applied strictly in send order, so chunks reach the buffer
/// in the order they were produced.
#[derive(Debug)]
pub enum StreamCommand {
    /// Start a session.
    Start {
        /// Delete the document's selection before anchoring.
        replace_selection: bool,
        /// Where to send the session's cancel token.
        reply: Option<Sender<CancelToken>>,
    },

    /// A chunk of streamed markup.
    Chunk(String),

    /// Finish the session with a final render.
    Stop,

    /// Cancel the session without a final render.
    Abort,

    /// Finish any active session and exit the driver loop.
    Shutdown,
}

/// Cloneable sending side of a driver.
///
/// Sends after the driver has exited are silently dropped.
#[derive(Debug, Clone)]
pub struct StreamHandle {
    pub(crate) tx: Sender<StreamCommand>,
}

impl StreamHandle {
    /// Start a session and wait for its cancel token.
    ///
    /// Returns `None` if the driver is gone.
    pub fn start(&self, replace_selection: bool) -> Option<CancelToken> {
        let (reply_tx, reply_rx) = bounded(1);
        self.tx
            .send(StreamCommand::Start {
                replace_selection,
                reply: Some(reply_tx),
            })
            .ok()?;
        reply_rx.recv().ok()
    }

    /// Send a chunk.
    pub fn write(&self, chunk: impl Into<String>) {
        let _ = self.tx.send(StreamCommand::Chunk(chunk.into()));
    }

    /// Finish the session.
    pub fn stop(&self) {
        let _ = self.tx.send(StreamCommand::Stop);
    }

    /// Cancel the session.
    pub fn abort(&self) {
        let _ = self.tx.send(StreamCommand::Abort);
    }

    /// Ask the driver to exit.
    pub fn shutdown(&self) {
        let _ = self.tx.send(StreamCommand::Shutdown);
    }
}
