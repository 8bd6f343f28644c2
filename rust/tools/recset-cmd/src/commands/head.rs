//! Head command implementation

use anyhow::Result;

pub fn run(delimiter: char, header_span: u64, count: u64, file_path: String) -> Result<()> {
    let mut dataset = super::open_dataset(&file_path, delimiter, header_span)?;

    println!("{}", dataset.header_line());
    let records = dataset.next_records(count)?;
    if records.is_empty() {
        println!("No records found.");
    } else {
        for record in &records {
            println!("{}", dataset.header().render_row(record));
        }
    }

    dataset.close();
    Ok(())
}
