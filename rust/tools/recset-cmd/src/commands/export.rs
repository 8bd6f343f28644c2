//! Export command implementation

use std::collections::BTreeMap;

use anyhow::{Context, Result};

pub fn run(
    delimiter: char,
    header_span: u64,
    column: String,
    key: String,
    file_path: String,
    target_path: String,
) -> Result<()> {
    let mut dataset = super::open_dataset(&file_path, delimiter, header_span)?;
    anyhow::ensure!(
        dataset.header().columns().contains(&column),
        "Column '{column}' is not part of the header"
    );

    let index_name = format!("by_{column}");
    let keys = dataset
        .build_index(&index_name, |r| r.get(&column).unwrap_or_default().to_string())
        .with_context(|| format!("Failed to index column '{column}'"))?;
    anyhow::ensure!(
        keys.contains(&key),
        "No records match {column}={key} (distinct values: {})",
        keys.len()
    );

    let appended = dataset
        .append_matching::<BTreeMap<String, String>>(&target_path, &index_name, &key)
        .with_context(|| format!("Failed to append to: {target_path}"))?;

    println!("Appended {appended} record(s) matching {column}={key} to {target_path}");
    dataset.close();
    Ok(())
}
