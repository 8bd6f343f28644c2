//! # Recset: segment-indexed record file access
//!
//! Recset treats a delimited text file as a sequence of addressable records.
//! It supports forward streaming, random re-seeking to any previously visited
//! record via a lightweight positional handle (a *segment*), and in-memory
//! secondary indexes that map arbitrary derived keys to sets of such handles
//! for fast point lookups without re-scanning the file.
//!
//! ## Module Organization
//!
//! This crate is a convenient entry point re-exporting the component crates:
//!
//! * [`common`] - Error and result types shared across components
//! * [`io`] - Line scanning with byte-exact offsets, byte-order-mark
//!   detection, append-mode destinations
//! * [`index`] - Generic secondary-index tables and catalogs
//! * [`dataset`] - The composed record dataset: header handling, record
//!   parsing, typed decoding, indexing and indexed re-access
//!
//! The most commonly used types are re-exported at the crate root.
//!
//! ## Example
//!
//! ```no_run
//! use recset::RecordDataset;
//!
//! # fn main() -> recset::common::Result<()> {
//! let mut dataset = RecordDataset::open("records.csv", ',')?;
//! let keys = dataset.build_index("by_code", |r| {
//!     r.get("Code").unwrap_or_default().to_string()
//! })?;
//! for key in &keys {
//!     for record in dataset.lookup("by_code", key)? {
//!         println!("{:?}", record?);
//!     }
//! }
//! # Ok(())
//! # }
//! ```

pub use recset_common as common;
pub use recset_dataset as dataset;
pub use recset_index as index;
pub use recset_io as io;

pub use recset_common::Result;
pub use recset_dataset::{Header, RawRecord, RecordDataset, RecordParser};
pub use recset_index::{IndexCatalog, IndexTable};
pub use recset_io::{LineAppender, LineScanner, Segment};
