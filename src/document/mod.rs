//! Document module: the write target for streamed markup.
//!
//! - [`Document`]: trait implemented by the host's editor
//! - [`Patcher`]: replace-or-insert reconciliation of the session-owned range
//! - [`MemoryDocument`]: a plain-string implementation

mod memory;
mod patch;
mod traits;

pub use memory::MemoryDocument;
pub use patch::{PatchOutcome, Patcher};
pub use traits::Document;
