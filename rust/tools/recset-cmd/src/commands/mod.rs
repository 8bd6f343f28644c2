//! Command implementations for recset-cmd

use anyhow::{Context, Result};
use recset::RecordDataset;

pub mod export;
pub mod head;
pub mod inspect;

/// Opens a dataset over `file_path`, validating the path first.
pub fn open_dataset(file_path: &str, delimiter: char, header_span: u64) -> Result<RecordDataset> {
    crate::utils::validate_file_exists(file_path)?;
    RecordDataset::open_with_header_span(file_path, delimiter, header_span)
        .with_context(|| format!("Failed to open record file: {file_path}"))
}
