//! Inspect command implementation

use anyhow::Result;

use crate::utils::format_size;

pub fn run(delimiter: char, header_span: u64, file_path: String) -> Result<()> {
    let mut dataset = super::open_dataset(&file_path, delimiter, header_span)?;

    let file_size = std::fs::metadata(&file_path)?.len();
    let record_count = dataset.size()?;

    println!("File: {file_path}");
    println!("Size: {}", format_size(file_size));
    println!("Header span: {header_span} line(s)");
    println!("Records: {record_count}");
    println!("Columns ({}):", dataset.header().len());
    for column in dataset.header().columns() {
        println!("  {column}");
    }

    dataset.close();
    Ok(())
}
