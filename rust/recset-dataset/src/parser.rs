use recset_common::Result;

/// Splits one raw line into an ordered sequence of field values.
///
/// The split happens on the configured delimiter, except where a delimiter
/// occurrence falls inside a double-quoted run. After splitting, each field is
/// trimmed of surrounding whitespace, and a field wrapped in a matching pair
/// of double quotes has that outer pair stripped. Interior quote characters
/// are preserved; doubled-quote escapes are not interpreted.
#[derive(Debug, Clone, Copy)]
pub struct RecordParser {
    delimiter: char,
}

impl RecordParser {
    /// Creates a parser for the given field delimiter.
    pub fn new(delimiter: char) -> Result<RecordParser> {
        recset_common::verify_arg!(delimiter, delimiter != '"');
        recset_common::verify_arg!(delimiter, delimiter != '\n' && delimiter != '\r');
        Ok(RecordParser { delimiter })
    }

    /// Returns the field delimiter.
    pub fn delimiter(&self) -> char {
        self.delimiter
    }

    /// Splits `line` into field values.
    pub fn parse(&self, line: &str) -> Vec<String> {
        let mut fields = Vec::new();
        let mut field = String::new();
        let mut in_quotes = false;

        for ch in line.chars() {
            if ch == '"' {
                in_quotes = !in_quotes;
                field.push(ch);
            } else if ch == self.delimiter && !in_quotes {
                fields.push(std::mem::take(&mut field));
            } else {
                field.push(ch);
            }
        }
        fields.push(field);

        fields.iter().map(|f| normalize_field(f)).collect()
    }
}

/// Trims surrounding whitespace and strips one matching outer quote pair.
fn normalize_field(raw: &str) -> String {
    let trimmed = raw.trim();
    if trimmed.len() >= 2 && trimmed.starts_with('"') && trimmed.ends_with('"') {
        trimmed[1..trimmed.len() - 1].to_string()
    } else {
        trimmed.to_string()
    }
}
