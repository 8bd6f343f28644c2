//! Delimited-file fixtures for testing.

use std::io::{Seek, SeekFrom, Write};

use tempfile::NamedTempFile;

/// UTF-8 byte-order mark, for fixtures that exercise mark skipping.
pub const UTF8_BOM: &[u8] = &[0xEF, 0xBB, 0xBF];

/// Declarative builder for a delimited temp file.
///
/// Lines are accumulated in order; `build` writes them to a
/// [`NamedTempFile`], optionally prefixed by a byte-order mark and optionally
/// using CRLF terminators, and returns the file positioned at its start.
///
/// # Examples
///
/// ```
/// use recset_testkit::data_gen::DelimitedFile;
///
/// let file = DelimitedFile::new(',')
///     .row(&["Code", "Name"])
///     .row(&["100", "Alice"])
///     .build()
///     .unwrap();
/// assert!(file.path().exists());
/// ```
pub struct DelimitedFile {
    delimiter: char,
    bom: Option<Vec<u8>>,
    crlf: bool,
    lines: Vec<String>,
}

impl DelimitedFile {
    /// Creates a builder for a file with the given field delimiter.
    pub fn new(delimiter: char) -> DelimitedFile {
        DelimitedFile {
            delimiter,
            bom: None,
            crlf: false,
            lines: Vec::new(),
        }
    }

    /// Prefixes the file with the given byte-order mark.
    pub fn with_bom(mut self, bom: &[u8]) -> DelimitedFile {
        self.bom = Some(bom.to_vec());
        self
    }

    /// Terminates lines with `\r\n` instead of `\n`.
    pub fn with_crlf(mut self) -> DelimitedFile {
        self.crlf = true;
        self
    }

    /// Appends one row, joining `values` with the delimiter.
    pub fn row(mut self, values: &[&str]) -> DelimitedFile {
        self.lines.push(values.join(&self.delimiter.to_string()));
        self
    }

    /// Appends one raw line verbatim (no joining, no quoting).
    pub fn raw_line(mut self, line: &str) -> DelimitedFile {
        self.lines.push(line.to_string());
        self
    }

    /// Writes the file and returns it positioned at the start.
    pub fn build(self) -> anyhow::Result<NamedTempFile> {
        let mut file = NamedTempFile::new()?;
        if let Some(bom) = &self.bom {
            file.write_all(bom)?;
        }
        let terminator = if self.crlf { "\r\n" } else { "\n" };
        for line in &self.lines {
            file.write_all(line.as_bytes())?;
            file.write_all(terminator.as_bytes())?;
        }
        file.flush()?;
        file.seek(SeekFrom::Start(0))?;
        Ok(file)
    }
}

const CODES: &[&str] = &["A100", "B200", "C300", "D400", "E500"];

const WORDS: &[&str] = &[
    "crate", "pallet", "carton", "drum", "spool", "bundle", "sack", "tray",
];

/// Generates a specified number of "inventory" entries for testing.
///
/// The entries are delimited records with a fixed four-column header
/// (`Id,Code,Quantity,Description`): sequential record ids, codes drawn from
/// a small pool (so secondary indexes over the `Code` column have repeated
/// keys), random quantities, and short random descriptions.
///
/// Returns a [`NamedTempFile`] containing the entries, positioned at the
/// start of the file.
pub fn generate_inventory_file(count: usize) -> anyhow::Result<NamedTempFile> {
    assert_ne!(count, 0);
    let mut builder = DelimitedFile::new(',').row(&["Id", "Code", "Quantity", "Description"]);
    for id in 0..count {
        let code = CODES[fastrand::usize(..CODES.len())];
        let quantity = fastrand::u32(1..1000).to_string();
        let description = format!(
            "{} {}",
            WORDS[fastrand::usize(..WORDS.len())],
            WORDS[fastrand::usize(..WORDS.len())]
        );
        builder = builder.row(&[&id.to_string(), code, &quantity, &description]);
    }
    builder.build()
}
