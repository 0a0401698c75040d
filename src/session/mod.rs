//! Session module: lifecycle, throttling and the host-facing writer.
//!
//! A [`StreamWriter`] owns at most one [`StreamSession`] at a time. While it
//! streams, the session exclusively owns a range of the target document that
//! starts at a fixed anchor; the document is kept non-editable for the
//! duration so nothing else races the writer inside that range.

mod state;
mod throttle;
mod writer;

pub use state::{CancelToken, SessionState, StreamSession};
pub use throttle::Throttle;
pub use writer::{FinalFlush, FrameOutcome, SessionEvent, StreamWriter, WriterConfig, WriterStats};
