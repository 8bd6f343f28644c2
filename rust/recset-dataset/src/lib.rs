//! Record-oriented access to delimited text files.
//!
//! A [`RecordDataset`](dataset::RecordDataset) composes line scanning, record
//! parsing, header handling and secondary indexing into one lazily-evaluated
//! interface: stream the file forward, build named indexes mapping derived
//! keys to record positions, and re-seek straight to any indexed record
//! without re-scanning the file.

pub mod codec;
pub mod dataset;
pub mod header;
pub mod parser;
pub mod record;

pub use dataset::RecordDataset;
pub use header::Header;
pub use parser::RecordParser;
pub use record::RawRecord;

#[cfg(test)]
mod tests;
