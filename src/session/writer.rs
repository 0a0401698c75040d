//! Stream Writer: the host-facing entry point.
//!
//! The writer owns the session lifecycle and the render pipeline:
//!
//! ```text
//! write_chunk ──▶ buffer
//!                   │  on_frame (throttled)
//!                   ▼
//!             scan ─▶ preview ─▶ patch ─▶ Document
//! ```
//!
//! Everything runs on the caller's thread. A frame either renders to
//! completion or is skipped; nothing here blocks.

use super::state::{CancelToken, SessionState, StreamSession};
use super::throttle::Throttle;
use crate::document::{Document, PatchOutcome};
use crate::markup::{renderable_text, scan, BlockKinds};
use crossbeam_channel::{unbounded, Receiver, Sender};
use std::time::{Duration, Instant};

/// What the final render of a session writes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FinalFlush {
    /// Only the blocks that completed; a trailing fragment is dropped.
    #[default]
    CompleteBlocksOnly,
    /// The full accumulated buffer, as received. For hosts that re-parse
    /// inserted markup.
    Verbatim,
}

/// Configuration for the stream writer.
#[derive(Debug, Clone)]
pub struct WriterConfig {
    /// Minimum time between render ticks.
    pub min_render_interval: Duration,
    /// Kinds whose incomplete trailing fragment may be previewed.
    pub previewable: BlockKinds,
    /// What the final render writes.
    pub final_flush: FinalFlush,
    /// Scroll the end of the session range into view after each render.
    pub follow_output: bool,
}

impl Default for WriterConfig {
    fn default() -> Self {
        Self {
            min_render_interval: Duration::from_millis(50),
            previewable: BlockKinds::SIMPLE,
            final_flush: FinalFlush::CompleteBlocksOnly,
            follow_output: true,
        }
    }
}

/// Counters for debugging/profiling.
#[derive(Debug, Clone, Default)]
pub struct WriterStats {
    /// Sessions started.
    pub sessions: u64,
    /// Frames seen while streaming.
    pub frames: u64,
    /// Frames skipped by the throttle.
    pub throttled: u64,
    /// Ticks that wrote to the document.
    pub renders: u64,
    /// Ticks that found nothing new to write.
    pub unchanged: u64,
    /// Writes the document rejected.
    pub conflicts: u64,
    /// Duration of the last render tick in microseconds.
    pub last_render_us: u64,
}

/// Lifecycle notifications for subscribers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEvent {
    /// A session started.
    Started {
        /// Where the session's content begins.
        anchor: usize,
    },
    /// A render tick updated the document.
    Rendered {
        /// Extent of the session's content after the write.
        extent: usize,
    },
    /// The session ended.
    Finished {
        /// Whether it ended by cancellation (no final render).
        aborted: bool,
    },
}

/// Result of a frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameOutcome {
    /// No session is streaming.
    Idle,
    /// Too soon after the previous tick.
    Throttled,
    /// The cancel token was set; the session was aborted.
    Cancelled,
    /// Nothing new to show.
    Unchanged,
    /// The document was updated.
    Rendered {
        /// Extent of the session's content after the write.
        extent: usize,
    },
    /// The document rejected the write; retried next tick.
    Conflict,
}

/// Streams markup chunks into a [`Document`].
pub struct StreamWriter<D: Document> {
    /// The write target.
    document: D,
    /// Configuration.
    config: WriterConfig,
    /// Lifecycle state.
    state: SessionState,
    /// Active session data.
    session: Option<StreamSession>,
    /// Frame gate; present only while streaming.
    throttle: Option<Throttle>,
    /// Counters.
    stats: WriterStats,
    /// Event subscribers.
    listeners: Vec<Sender<SessionEvent>>,
}

impl<D: Document> StreamWriter<D> {
    /// Create a writer with default configuration.
    pub fn new(document: D) -> Self {
        Self::with_config(document, WriterConfig::default())
    }

    /// Create a writer with custom configuration.
    pub fn with_config(document: D, config: WriterConfig) -> Self {
        Self {
            document,
            config,
            state: SessionState::Idle,
            session: None,
            throttle: None,
            stats: WriterStats::default(),
            listeners: Vec::new(),
        }
    }

    /// The target document.
    pub const fn document(&self) -> &D {
        &self.document
    }

    /// The configuration.
    pub const fn config(&self) -> &WriterConfig {
        &self.config
    }

    /// The lifecycle state.
    pub const fn state(&self) -> SessionState {
        self.state
    }

    /// Render counters.
    pub const fn stats(&self) -> &WriterStats {
        &self.stats
    }

    /// The active session, if any.
    pub const fn session(&self) -> Option<&StreamSession> {
        self.session.as_ref()
    }

    /// Whether a session is streaming.
    pub fn is_streaming(&self) -> bool {
        self.state == SessionState::Streaming
    }

    /// Receive lifecycle events.
    pub fn subscribe(&mut self) -> Receiver<SessionEvent> {
        let (tx, rx) = unbounded();
        self.listeners.push(tx);
        rx
    }

    /// Start a session at the document's cursor.
    ///
    /// With `replace_selection` the current selection is deleted first. The
    /// document is made non-editable until the session ends. Calling this
    /// while a session is already streaming changes nothing and returns that
    /// session's token.
    pub fn start_session(&mut self, replace_selection: bool) -> CancelToken {
        if let Some(session) = self.session.as_ref() {
            log::debug!("start_session ignored: a session is already streaming");
            return session.token.clone();
        }

        self.document.focus();
        if replace_selection {
            if let Err(err) = self.document.delete_selection() {
                log::debug!("could not delete selection before streaming: {err}");
            }
        }
        let anchor = self.document.cursor_position();
        self.document.set_editable(false);

        let session = StreamSession::new(anchor);
        let token = session.token.clone();
        self.session = Some(session);
        self.throttle = Some(Throttle::new(self.config.min_render_interval));
        self.state = SessionState::Streaming;
        self.stats.sessions += 1;

        log::debug!("stream session started at {anchor}");
        self.emit(&SessionEvent::Started { anchor });
        token
    }

    /// Append a chunk to the active session. Ignored when not streaming.
    pub fn write_chunk(&mut self, chunk: &str) {
        match self.session.as_mut() {
            Some(session) if self.state == SessionState::Streaming => session.push(chunk),
            _ => log::debug!("write_chunk ignored: no active session"),
        }
    }

    /// A frame wake-up at `now`; renders if the throttle allows.
    pub fn on_frame(&mut self, now: Instant) -> FrameOutcome {
        if self.state != SessionState::Streaming {
            return FrameOutcome::Idle;
        }
        if self.cancel_requested() {
            self.abort_session();
            return FrameOutcome::Cancelled;
        }
        self.stats.frames += 1;

        let Some(throttle) = self.throttle.as_mut() else {
            return FrameOutcome::Idle;
        };
        if !throttle.ready(now) {
            self.stats.throttled += 1;
            log::trace!("frame throttled");
            return FrameOutcome::Throttled;
        }

        self.render_tick()
    }

    /// Run the render pipeline immediately, bypassing the throttle.
    pub fn render_now(&mut self) -> FrameOutcome {
        if self.state != SessionState::Streaming {
            return FrameOutcome::Idle;
        }
        if self.cancel_requested() {
            self.abort_session();
            return FrameOutcome::Cancelled;
        }
        self.render_tick()
    }

    /// Finish the session: write the final render and restore editing.
    pub fn stop_session(&mut self) {
        if self.state != SessionState::Streaming {
            log::debug!("stop_session ignored: no active session");
            return;
        }
        self.state = SessionState::Finalizing;
        self.throttle = None;

        if let Some(mut session) = self.session.take() {
            let text = match self.config.final_flush {
                FinalFlush::Verbatim => session.buffer.as_str(),
                FinalFlush::CompleteBlocksOnly => scan(&session.buffer).complete,
            };
            match session.patcher.apply(&mut self.document, text) {
                Ok(outcome) => log::debug!("final stream render: {outcome:?}"),
                Err(err) => {
                    self.stats.conflicts += 1;
                    log::warn!("final stream render failed: {err}");
                }
            }
        }

        self.finish(false);
    }

    /// Cancel the session without a final render.
    ///
    /// The document keeps whatever the last successful tick wrote.
    pub fn abort_session(&mut self) {
        if self.state != SessionState::Streaming {
            log::debug!("abort_session ignored: no active session");
            return;
        }
        self.state = SessionState::Aborted;
        if let Some(session) = self.session.as_ref() {
            session.token.cancel();
        }
        self.finish(true);
    }

    fn cancel_requested(&self) -> bool {
        self.session
            .as_ref()
            .is_some_and(|session| session.token.is_cancelled())
    }

    fn render_tick(&mut self) -> FrameOutcome {
        let Some(session) = self.session.as_mut() else {
            return FrameOutcome::Idle;
        };
        if session.is_settled() {
            self.stats.unchanged += 1;
            return FrameOutcome::Unchanged;
        }

        let start = Instant::now();
        let text = renderable_text(&session.buffer, self.config.previewable);
        let extent = match session.patcher.apply(&mut self.document, &text) {
            Ok(PatchOutcome::Unchanged) => {
                session.settled_len = Some(session.buffer.len());
                self.stats.unchanged += 1;
                return FrameOutcome::Unchanged;
            }
            Ok(PatchOutcome::Inserted { extent } | PatchOutcome::Replaced { extent }) => extent,
            Err(err) => {
                self.stats.conflicts += 1;
                log::debug!("stream render skipped: {err}");
                return FrameOutcome::Conflict;
            }
        };

        session.settled_len = Some(session.buffer.len());
        if self.config.follow_output {
            self.document.scroll_into_view(session.anchor() + extent);
        }

        self.stats.renders += 1;
        self.stats.last_render_us = u64::try_from(start.elapsed().as_micros()).unwrap_or(u64::MAX);
        self.emit(&SessionEvent::Rendered { extent });
        FrameOutcome::Rendered { extent }
    }

    fn finish(&mut self, aborted: bool) {
        self.throttle = None;
        self.session = None;
        self.document.set_editable(true);
        self.state = SessionState::Idle;
        log::debug!("stream session finished (aborted: {aborted})");
        self.emit(&SessionEvent::Finished { aborted });
    }

    fn emit(&mut self, event: &SessionEvent) {
        self.listeners.retain(|tx| tx.send(event.clone()).is_ok());
    }
}

impl<D: Document> Drop for StreamWriter<D> {
    fn drop(&mut self) {
        if self.session.take().is_some() {
            self.document.set_editable(true);
        }
    }
}
