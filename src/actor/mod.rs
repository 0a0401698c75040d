//! Actor Model: thread plumbing around the stream writer.
//!
//! - **Frame Clock**: a timing thread that only emits "next frame" wake-ups
//! - **Driver**: the single thread that owns the writer and the document
//! - **Handles**: cloneable senders for chunks and lifecycle commands
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────┐   StreamCommand    ┌──────────────┐
//! │ Token source │ ─────────────────▶ │              │
//! └──────────────┘                    │    Driver    │ ──▶ Document
//! ┌──────────────┐       Frame        │              │
//! │ Frame Clock  │ ─────────────────▶ │              │
//! └──────────────┘                    └──────────────┘
//! ```

mod driver;
mod messages;
mod ticker;

pub use driver::{DriverConfig, StreamDriver};
pub use messages::{StreamCommand, StreamHandle};
pub use ticker::{Frame, FrameClock};
