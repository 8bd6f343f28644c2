//! Line-oriented I/O:
//! - `LineScanner`: buffered line reader over a seekable byte stream, tracking the
//!   exact byte offsets bounding each line and supporting re-seeks to previously
//!   observed positions via [`Segment`] handles.
//! - `bom`: byte-order-mark detection for the text encodings the engine recognizes.
//! - `LineAppender`: append-mode text destination with explicit `seal()` semantics.

pub mod appender;
pub mod bom;
pub mod line_scanner;

pub use appender::LineAppender;
pub use line_scanner::{LineScanner, Segment};
