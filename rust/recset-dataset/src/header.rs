use recset_common::{Result, error::Error};

use crate::record::RawRecord;

/// The ordered column names of a dataset, assembled from one or more leading
/// physical lines.
///
/// When a logical header spans several physical lines, values from line *k*
/// are appended position-wise to the values of line *k-1* for the same column
/// index. The delimiter-joined combined names are retained as the flattened
/// header line for export reuse.
#[derive(Debug, Clone)]
pub struct Header {
    columns: Vec<String>,
    line: String,
    delimiter: char,
}

impl Header {
    /// Assembles a header from the parsed field values of each physical
    /// header line.
    pub fn from_lines(lines: &[Vec<String>], delimiter: char) -> Header {
        let mut columns: Vec<String> = Vec::new();
        for fields in lines {
            for (position, value) in fields.iter().enumerate() {
                if position < columns.len() {
                    columns[position].push_str(value);
                } else {
                    columns.push(value.clone());
                }
            }
        }
        let line = columns.join(&delimiter.to_string());
        Header {
            columns,
            line,
            delimiter,
        }
    }

    /// Returns the combined column names in order.
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Returns the number of columns.
    pub fn len(&self) -> usize {
        self.columns.len()
    }

    /// Returns `true` if the header has no columns.
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Returns the delimiter-joined flattened header text.
    pub fn line(&self) -> &str {
        &self.line
    }

    /// Returns the field delimiter the header was assembled with.
    pub fn delimiter(&self) -> char {
        self.delimiter
    }

    /// Zips the header's column names with a row's field values into a
    /// [`RawRecord`].
    ///
    /// Fails with a shape error when the field count differs from the column
    /// count; rows are never silently truncated or padded. `line_number` only
    /// feeds the error message.
    pub fn zip_record(&self, values: Vec<String>, line_number: u64) -> Result<RawRecord> {
        if values.len() != self.columns.len() {
            return Err(Error::shape_mismatch(
                line_number,
                self.columns.len(),
                values.len(),
            ));
        }
        let mut record = RawRecord::with_capacity(self.columns.len());
        for (name, value) in self.columns.iter().zip(values) {
            record.insert(name.clone(), value);
        }
        Ok(record)
    }

    /// Renders a record back to a flat delimited line honoring the header's
    /// column order. Columns absent from the record render as empty strings.
    pub fn render_row(&self, record: &RawRecord) -> String {
        let values: Vec<&str> = self
            .columns
            .iter()
            .map(|name| record.get(name).unwrap_or(""))
            .collect();
        values.join(&self.delimiter.to_string())
    }
}
