/// One file row as an ordered mapping from header name to field value, prior
/// to structured decoding.
///
/// Entry order follows the header's column order. Inserting a value under an
/// existing name replaces the value in place (last write wins), keeping the
/// name's original position.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawRecord {
    fields: Vec<(String, String)>,
}

impl RawRecord {
    /// Creates an empty record.
    pub fn new() -> RawRecord {
        RawRecord { fields: Vec::new() }
    }

    /// Creates an empty record with capacity for `capacity` fields.
    pub fn with_capacity(capacity: usize) -> RawRecord {
        RawRecord {
            fields: Vec::with_capacity(capacity),
        }
    }

    /// Returns the number of named fields.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Returns `true` if the record has no fields.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Returns the value of the field named `name`.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    /// Sets the field `name` to `value`, replacing the current value in place
    /// if the name is already present.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        match self.fields.iter_mut().find(|(n, _)| *n == name) {
            Some((_, v)) => *v = value.into(),
            None => self.fields.push((name, value.into())),
        }
    }

    /// Returns the `(name, value)` pairs in entry order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields.iter().map(|(n, v)| (n.as_str(), v.as_str()))
    }

    /// Returns the field names in entry order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|(n, _)| n.as_str())
    }
}

impl FromIterator<(String, String)> for RawRecord {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> RawRecord {
        let mut record = RawRecord::new();
        for (name, value) in iter {
            record.insert(name, value);
        }
        record
    }
}
