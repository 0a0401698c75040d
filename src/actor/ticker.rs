//! Frame Clock: dedicated thread producing "next frame" wake-ups.
//!
//! The clock only measures time. It carries no session state and never
//! touches the document; all rendering happens on the thread that receives
//! its frames. Dropping or joining the clock cancels pending wake-ups.

use crossbeam_channel::{bounded, Receiver, Sender};
use std::io;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

/// A frame wake-up.
#[derive(Debug, Clone, Copy)]
pub struct Frame {
    /// Frame number (monotonically increasing).
    pub index: u64,
    /// When the frame fired.
    pub at: Instant,
}

/// Thread that emits a [`Frame`] every `interval`.
pub struct FrameClock {
    /// Handle to the clock thread.
    handle: Option<JoinHandle<()>>,
    /// Flag to signal shutdown.
    shutdown: Arc<AtomicBool>,
    /// Receiver for frames.
    frame_rx: Receiver<Frame>,
}

impl FrameClock {
    /// Spawn a clock firing every `interval` (e.g. 16ms for ~60 frames/s).
    pub fn spawn(interval: Duration) -> io::Result<Self> {
        let shutdown = Arc::new(AtomicBool::new(false));
        let shutdown_clone = shutdown.clone();

        // Small buffer: a slow receiver skips frames instead of queueing them
        let (frame_tx, frame_rx) = bounded(1);

        let handle = thread::Builder::new()
            .name("flywheel-frame-clock".to_string())
            .spawn(move || {
                Self::run_loop(&frame_tx, &shutdown_clone, interval);
            })?;

        Ok(Self {
            handle: Some(handle),
            shutdown,
            frame_rx,
        })
    }

    /// Get a reference to the frame receiver.
    #[inline]
    pub const fn receiver(&self) -> &Receiver<Frame> {
        &self.frame_rx
    }

    /// Signal the clock to stop.
    pub fn shutdown(&self) {
        self.shutdown.store(true, Ordering::Relaxed);
    }

    /// Stop the clock and wait for its thread to finish.
    pub fn join(mut self) {
        self.shutdown();
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }

    fn run_loop(frame_tx: &Sender<Frame>, shutdown: &Arc<AtomicBool>, interval: Duration) {
        let mut index = 0u64;
        let mut next = Instant::now() + interval;

        loop {
            if shutdown.load(Ordering::Relaxed) {
                break;
            }

            let now = Instant::now();
            if now >= next {
                // Receiver still busy with the previous frame: drop this one
                let _ = frame_tx.try_send(Frame { index, at: now });

                index += 1;
                next += interval;
                if next < now {
                    next = now + interval;
                }
            } else {
                thread::sleep((next - now).min(Duration::from_millis(1)));
            }
        }
    }
}

impl Drop for FrameClock {
    fn drop(&mut self) {
        self.shutdown();
    }
}
