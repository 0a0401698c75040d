//! Driver: cooperative loop that owns a stream writer.
//!
//! The driver runs on one thread and multiplexes two inputs:
//! - commands (start, chunks, stop, abort) from any number of [`StreamHandle`]s
//! - frames from a [`FrameClock`], which exists only while a session streams
//!
//! Each input is handled to completion before the next is taken, so a render
//! tick always sees the buffer between two whole chunks.

use super::messages::{StreamCommand, StreamHandle};
use super::ticker::{Frame, FrameClock};
use crate::document::Document;
use crate::session::StreamWriter;
use crossbeam_channel::{bounded, never, select, Receiver};
use std::time::Duration;

/// Configuration for the driver.
#[derive(Debug, Clone)]
pub struct DriverConfig {
    /// Interval between frame wake-ups.
    pub frame_interval: Duration,
    /// Command queue capacity; senders block when it is full.
    pub channel_capacity: usize,
}

impl Default for DriverConfig {
    fn default() -> Self {
        Self {
            frame_interval: Duration::from_millis(16),
            channel_capacity: 256,
        }
    }
}

/// Owns a [`StreamWriter`] and feeds it commands and frames.
pub struct StreamDriver<D: Document> {
    /// The writer being driven.
    writer: StreamWriter<D>,
    /// Configuration.
    config: DriverConfig,
    /// Incoming commands.
    command_rx: Receiver<StreamCommand>,
    /// Frame source while streaming.
    clock: Option<FrameClock>,
}

impl<D: Document> StreamDriver<D> {
    /// Create a driver with default configuration.
    pub fn new(writer: StreamWriter<D>) -> (Self, StreamHandle) {
        Self::with_config(writer, DriverConfig::default())
    }

    /// Create a driver with custom configuration.
    pub fn with_config(writer: StreamWriter<D>, config: DriverConfig) -> (Self, StreamHandle) {
        let (tx, command_rx) = bounded(config.channel_capacity);
        let driver = Self {
            writer,
            config,
            command_rx,
            clock: None,
        };
        (driver, StreamHandle { tx })
    }

    /// The driven writer.
    pub const fn writer(&self) -> &StreamWriter<D> {
        &self.writer
    }

    /// Run until shutdown or until every handle is dropped.
    ///
    /// An active session is finalized before returning. Returns the writer so
    /// the caller can inspect the document afterwards.
    pub fn run(mut self) -> StreamWriter<D> {
        let commands = self.command_rx.clone();
        loop {
            let frames = self
                .clock
                .as_ref()
                .map_or_else(never, |clock| clock.receiver().clone());

            select! {
                recv(commands) -> command => {
                    let keep_running = command.is_ok_and(|command| self.handle_command(command));
                    if !keep_running {
                        break;
                    }
                }
                recv(frames) -> frame => match frame {
                    Ok(frame) => self.handle_frame(frame),
                    Err(_) => self.stop_clock(),
                },
            }
        }

        self.writer.stop_session();
        self.stop_clock();
        self.writer
    }

    fn handle_command(&mut self, command: StreamCommand) -> bool {
        match command {
            StreamCommand::Start {
                replace_selection,
                reply,
            } => {
                let token = self.writer.start_session(replace_selection);
                self.start_clock();
                if let Some(reply) = reply {
                    let _ = reply.send(token);
                }
            }
            StreamCommand::Chunk(chunk) => self.writer.write_chunk(&chunk),
            StreamCommand::Stop => {
                self.writer.stop_session();
                self.stop_clock();
            }
            StreamCommand::Abort => {
                self.writer.abort_session();
                self.stop_clock();
            }
            StreamCommand::Shutdown => return false,
        }
        true
    }

    fn handle_frame(&mut self, frame: Frame) {
        let outcome = self.writer.on_frame(frame.at);
        log::trace!("frame {}: {outcome:?}", frame.index);
        if !self.writer.is_streaming() {
            self.stop_clock();
        }
    }

    fn start_clock(&mut self) {
        if self.clock.is_some() || !self.writer.is_streaming() {
            return;
        }
        match FrameClock::spawn(self.config.frame_interval) {
            Ok(clock) => self.clock = Some(clock),
            Err(err) => log::warn!("frame clock unavailable, previews paused until stop: {err}"),
        }
    }

    fn stop_clock(&mut self) {
        if let Some(clock) = self.clock.take() {
            clock.join();
        }
    }
}
