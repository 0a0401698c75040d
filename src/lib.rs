//! # Flywheel Markup
//!
//! Incremental streaming renderer for token-streamed markup.
//!
//! An LLM producing HTML token by token splits tags and attributes at
//! arbitrary points. Flywheel Markup accumulates those chunks and keeps a live
//! document showing only well-formed content while the stream is running.
//!
//! ## Core Concepts
//!
//! - **Block scanning**: the buffer is split into complete top-level blocks
//!   plus a trailing fragment, losslessly
//! - **Safe previews**: a trailing paragraph or heading is shown auto-closed;
//!   lists, quotes, code and tables wait until they complete
//! - **Range patching**: the session owns one document range from a fixed
//!   anchor and replaces it whole when the renderable text changes
//! - **Throttled frames**: render rate is decoupled from chunk arrival rate
//! - **Final flush**: stopping writes only the blocks that completed, so a
//!   stream cut mid-tag never leaves half-written markup behind
//!
//! ## Example
//!
//! ```rust
//! use flywheel_markup::{MemoryDocument, StreamWriter};
//!
//! let mut writer = StreamWriter::new(MemoryDocument::new());
//! writer.start_session(false);
//! writer.write_chunk("<p>Hel");
//! writer.render_now();
//! assert_eq!(writer.document().text(), "<p>Hel</p>");
//!
//! writer.write_chunk("lo</p>");
//! writer.stop_session();
//! assert_eq!(writer.document().text(), "<p>Hello</p>");
//! ```

#![warn(missing_docs)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

pub mod actor;
pub mod document;
pub mod error;
pub mod markup;
pub mod session;

// Re-exports for convenience
pub use actor::{DriverConfig, Frame, FrameClock, StreamCommand, StreamDriver, StreamHandle};
pub use document::{Document, MemoryDocument, PatchOutcome, Patcher};
pub use error::DocumentError;
pub use markup::{preview, renderable_text, scan, Block, BlockKind, BlockKinds, ParseResult};
pub use session::{
    CancelToken, FinalFlush, FrameOutcome, SessionEvent, SessionState, StreamSession, StreamWriter,
    WriterConfig, WriterStats,
};
