use std::{
    fs::File,
    hash::Hash,
    marker::PhantomData,
    path::{Path, PathBuf},
};

use serde::{Serialize, de::DeserializeOwned};

use recset_common::{Result, error::Error, try_or_ret_some_err};
use recset_index::{IndexCatalog, IndexTable};
use recset_io::{LineAppender, LineScanner, Segment, bom};

use crate::{codec, header::Header, parser::RecordParser, record::RawRecord};

/// Record-oriented access to one delimited text file.
///
/// A dataset owns exactly one open file (driven through a [`LineScanner`])
/// and one catalog of named secondary indexes for its lifetime. There is a
/// single scan cursor per dataset: every lazy sequence produced by
/// [`lookup`](RecordDataset::lookup), [`typed_stream`](RecordDataset::typed_stream)
/// or [`group_by`](RecordDataset::group_by) borrows the dataset mutably, so
/// only one can be in flight at a time.
///
/// [`close`](RecordDataset::close) releases the file and the indexes; it is
/// idempotent, and dropping an unclosed dataset releases them as well.
#[derive(Debug)]
pub struct RecordDataset {
    path: PathBuf,
    header_span: u64,
    scanner: Option<LineScanner<File>>,
    parser: RecordParser,
    header: Header,
    catalog: IndexCatalog<String, Segment>,
    size: Option<u64>,
}

impl RecordDataset {
    /// Opens the file at `path` with a single-line header.
    pub fn open(path: impl AsRef<Path>, delimiter: char) -> Result<RecordDataset> {
        Self::open_with_header_span(path, delimiter, 1)
    }

    /// Opens the file at `path`, treating its first `header_line_span`
    /// physical lines as one logical header.
    ///
    /// A byte-order mark, if present, is measured and skipped before the
    /// header is parsed. Fails with a not-found error for a missing path and
    /// with a malformed-header error when the file has fewer lines than the
    /// header span.
    pub fn open_with_header_span(
        path: impl AsRef<Path>,
        delimiter: char,
        header_line_span: u64,
    ) -> Result<RecordDataset> {
        let path = path.as_ref();
        recset_common::verify_arg!(header_line_span, header_line_span >= 1);
        let parser = RecordParser::new(delimiter)?;

        let origin = bom::measure(path).map_err(|e| Self::open_error(path, e))?;
        let file = File::open(path).map_err(|e| Self::open_error(path, e))?;
        let mut scanner = LineScanner::new(file, origin)?;

        let mut lines = Vec::with_capacity(header_line_span as usize);
        for _ in 0..header_line_span {
            match scanner.read_line()? {
                Some(line) => lines.push(parser.parse(&line)),
                None => {
                    return Err(Error::malformed_header(format!(
                        "header spans {header_line_span} lines, file has {}",
                        lines.len()
                    )));
                }
            }
        }
        let header = Header::from_lines(&lines, delimiter);
        log::debug!(
            "opened dataset '{}': {} columns, header span {header_line_span}, origin {origin}",
            path.display(),
            header.len()
        );

        Ok(RecordDataset {
            path: path.to_path_buf(),
            header_span: header_line_span,
            scanner: Some(scanner),
            parser,
            header,
            catalog: IndexCatalog::new(),
            size: None,
        })
    }

    /// Returns the path of the underlying file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Returns the combined logical header.
    pub fn header(&self) -> &Header {
        &self.header
    }

    /// Returns the delimiter-joined flattened header text.
    pub fn header_line(&self) -> &str {
        self.header.line()
    }

    /// Returns the number of physical lines forming the header.
    pub fn header_span(&self) -> u64 {
        self.header_span
    }

    /// Returns the field delimiter.
    pub fn delimiter(&self) -> char {
        self.parser.delimiter()
    }

    /// Returns a value copy of the scanner's current position.
    pub fn current_segment(&self) -> Result<Segment> {
        Ok(self.scanner_ref()?.current_segment())
    }

    /// Repositions the scan just past the header block, so the next read
    /// returns the first data record.
    pub fn reset(&mut self) -> Result<()> {
        let span = self.header_span;
        if !self.scanner_mut()?.go_to_line(span)? {
            return Err(Error::malformed_header(format!(
                "header spans {span} lines, file is shorter"
            )));
        }
        Ok(())
    }

    /// Reads up to `limit` further records from the current position, or all
    /// remaining records when `limit` is zero.
    ///
    /// A row whose field count differs from the header's column count aborts
    /// the scan with a shape error.
    pub fn next_records(&mut self, limit: u64) -> Result<Vec<RawRecord>> {
        let mut records = Vec::new();
        while limit == 0 || (records.len() as u64) < limit {
            match self.read_one_record()? {
                Some(record) => records.push(record),
                None => break,
            }
        }
        Ok(records)
    }

    /// Builds (or rebuilds) the named secondary index by scanning every
    /// record and recording its position under `key_fn(record)`.
    ///
    /// Any existing index under `name` is fully discarded first. Returns the
    /// distinct keys in order of first appearance in the file.
    pub fn build_index<F>(&mut self, name: &str, mut key_fn: F) -> Result<Vec<String>>
    where
        F: FnMut(&RawRecord) -> String,
    {
        self.catalog.remove(name);
        self.reset()?;

        let mut table = IndexTable::new();
        let mut records = 0u64;
        loop {
            let anchor = self.scanner_ref()?.current_segment();
            let Some(record) = self.read_one_record()? else {
                break;
            };
            table.append(key_fn(&record), anchor);
            records += 1;
        }

        let keys: Vec<String> = table.keys().cloned().collect();
        log::debug!(
            "built index '{name}' over '{}': {} keys, {records} records",
            self.path.display(),
            keys.len()
        );
        self.catalog.insert(name, table);
        Ok(keys)
    }

    /// Returns the distinct keys of a previously built index, in first-
    /// appearance order.
    pub fn keys(&self, name: &str) -> Result<Vec<String>> {
        let table = self
            .catalog
            .get(name)
            .ok_or_else(|| Error::unknown_index(name))?;
        Ok(table.keys().cloned().collect())
    }

    /// Returns a lazy sequence of the records indexed under `key` in the
    /// named index, in file scan order.
    ///
    /// Production is single-pass: each step seeks the shared cursor to the
    /// next recorded position and re-parses just that record. Fails with an
    /// unknown-index error if `name` was never built; an unknown `key`
    /// yields an empty sequence.
    pub fn lookup(&mut self, name: &str, key: &str) -> Result<Lookup<'_>> {
        let table = self
            .catalog
            .get(name)
            .ok_or_else(|| Error::unknown_index(name))?;
        let segments = table
            .get(&key.to_string())
            .map(<[Segment]>::to_vec)
            .unwrap_or_default();
        self.reset()?;
        Ok(Lookup {
            dataset: self,
            segments,
            position: 0,
        })
    }

    /// Returns a lazy sequence decoding up to `limit` records (all records
    /// when `limit` is zero) into a caller-defined record type, scanning from
    /// the first data record.
    pub fn typed_stream<T>(&mut self, limit: u64) -> Result<TypedStream<'_, T>>
    where
        T: DeserializeOwned,
    {
        self.reset()?;
        Ok(TypedStream {
            dataset: self,
            limit,
            produced: 0,
            _record: PhantomData,
        })
    }

    /// Groups all records by `key_fn`, yielding one `(key, members)` group
    /// per distinct key in order of first appearance in the file.
    ///
    /// The grouping runs over a transient, dataset-private index built by one
    /// full scan; each group's members are then re-read through their
    /// recorded positions and decoded.
    pub fn group_by<K, T, F>(&mut self, mut key_fn: F) -> Result<Groups<'_, K, T>>
    where
        K: Hash + Eq + Clone,
        T: DeserializeOwned,
        F: FnMut(&RawRecord) -> K,
    {
        self.reset()?;
        let mut table = IndexTable::new();
        loop {
            let anchor = self.scanner_ref()?.current_segment();
            let Some(record) = self.read_one_record()? else {
                break;
            };
            table.append(key_fn(&record), anchor);
        }
        Ok(Groups {
            dataset: self,
            table,
            position: 0,
            _record: PhantomData,
        })
    }

    /// Renders a structured record back to a flat delimited line honoring the
    /// header's column order. Columns absent from the record render as empty
    /// strings.
    pub fn export_row<T: Serialize>(&self, record: &T) -> Result<String> {
        let raw = codec::encode(record)?;
        Ok(self.header.render_row(&raw))
    }

    /// Appends every record indexed under `key` in the named index to the
    /// file at `target`, creating it (with the flattened header line) when it
    /// does not exist yet. Returns the number of rows appended.
    pub fn append_matching<T>(
        &mut self,
        target: impl AsRef<Path>,
        index: &str,
        key: &str,
    ) -> Result<u64>
    where
        T: DeserializeOwned + Serialize,
    {
        self.append_matching_with(target, index, key, |_, record: T| record)
    }

    /// Like [`append_matching`](RecordDataset::append_matching), applying
    /// `transform(key, record)` to each record before it is rendered.
    pub fn append_matching_with<T, F>(
        &mut self,
        target: impl AsRef<Path>,
        index: &str,
        key: &str,
        mut transform: F,
    ) -> Result<u64>
    where
        T: DeserializeOwned + Serialize,
        F: FnMut(&str, T) -> T,
    {
        let target = target.as_ref();
        let header = self.header.clone();
        let existed = target.exists();

        let mut appender =
            LineAppender::open(target).map_err(|e| Error::io("open append destination", e))?;
        if !existed {
            appender
                .write_line(header.line())
                .map_err(|e| Error::io("write header line", e))?;
        }

        let mut appended = 0u64;
        for record in self.lookup(index, key)? {
            let typed: T = codec::decode(&record?)?;
            let typed = transform(key, typed);
            let raw = codec::encode(&typed)?;
            appender
                .write_line(&header.render_row(&raw))
                .map_err(|e| Error::io("append row", e))?;
            appended += 1;
        }

        appender
            .seal()
            .map_err(|e| Error::io("seal append destination", e))?;
        Ok(appended)
    }

    /// Returns the total record count, computed by a full scan on the first
    /// call and cached afterwards.
    pub fn size(&mut self) -> Result<u64> {
        if let Some(size) = self.size {
            return Ok(size);
        }
        self.reset()?;
        let mut count = 0u64;
        while self.read_one_record()?.is_some() {
            count += 1;
        }
        self.size = Some(count);
        Ok(count)
    }

    /// Returns `true` once the dataset has been closed.
    pub fn is_closed(&self) -> bool {
        self.scanner.is_none()
    }

    /// Releases the open file and all indexes. Closing twice is a no-op;
    /// every other operation on a closed dataset fails.
    pub fn close(&mut self) {
        self.scanner = None;
        self.catalog.clear();
        self.size = None;
    }

    fn open_error(path: &Path, e: std::io::Error) -> Error {
        if e.kind() == std::io::ErrorKind::NotFound {
            Error::not_found(path.display().to_string())
        } else {
            Error::io(path.display().to_string(), e)
        }
    }

    fn scanner_ref(&self) -> Result<&LineScanner<File>> {
        self.scanner
            .as_ref()
            .ok_or_else(|| Error::closed("dataset"))
    }

    fn scanner_mut(&mut self) -> Result<&mut LineScanner<File>> {
        self.scanner
            .as_mut()
            .ok_or_else(|| Error::closed("dataset"))
    }

    /// Reads and parses one record at the current position, or `None` at end
    /// of stream.
    fn read_one_record(&mut self) -> Result<Option<RawRecord>> {
        let scanner = self.scanner_mut()?;
        let Some(line) = scanner.read_line()? else {
            return Ok(None);
        };
        let line_number = scanner.line_number();
        let values = self.parser.parse(&line);
        self.header.zip_record(values, line_number).map(Some)
    }
}

/// Lazy sequence of the raw records recorded under one index key.
///
/// Returned by [`RecordDataset::lookup`]. Each step seeks the dataset's
/// cursor to the next recorded position, so the borrow on the dataset lasts
/// for the sequence's lifetime.
#[derive(Debug)]
pub struct Lookup<'a> {
    dataset: &'a mut RecordDataset,
    segments: Vec<Segment>,
    position: usize,
}

impl Iterator for Lookup<'_> {
    type Item = Result<RawRecord>;

    fn next(&mut self) -> Option<Result<RawRecord>> {
        let segment = *self.segments.get(self.position)?;
        self.position += 1;
        let scanner = try_or_ret_some_err!(self.dataset.scanner_mut());
        try_or_ret_some_err!(scanner.go_to_segment(segment));
        match try_or_ret_some_err!(self.dataset.read_one_record()) {
            Some(record) => Some(Ok(record)),
            None => Some(Err(Error::invalid_seek(
                "segment resumes past the end of the stream",
            ))),
        }
    }
}

/// Lazy sequence of records decoded into a caller-defined type.
///
/// Returned by [`RecordDataset::typed_stream`].
pub struct TypedStream<'a, T> {
    dataset: &'a mut RecordDataset,
    limit: u64,
    produced: u64,
    _record: PhantomData<T>,
}

impl<T: DeserializeOwned> Iterator for TypedStream<'_, T> {
    type Item = Result<T>;

    fn next(&mut self) -> Option<Result<T>> {
        if self.limit != 0 && self.produced >= self.limit {
            return None;
        }
        let record = try_or_ret_some_err!(self.dataset.read_one_record())?;
        self.produced += 1;
        Some(codec::decode(&record))
    }
}

/// Lazy sequence of `(key, members)` groups in first-appearance order.
///
/// Returned by [`RecordDataset::group_by`]. Members of each group are
/// re-read through their recorded positions when the group is yielded.
pub struct Groups<'a, K, T> {
    dataset: &'a mut RecordDataset,
    table: IndexTable<K, Segment>,
    position: usize,
    _record: PhantomData<T>,
}

impl<K: Clone, T: DeserializeOwned> Iterator for Groups<'_, K, T> {
    type Item = Result<(K, Vec<T>)>;

    fn next(&mut self) -> Option<Result<(K, Vec<T>)>> {
        let (key, segments) = self.table.entry_at(self.position)?;
        let key = key.clone();
        let segments = segments.to_vec();
        self.position += 1;

        let mut members = Vec::with_capacity(segments.len());
        for segment in segments {
            let scanner = try_or_ret_some_err!(self.dataset.scanner_mut());
            try_or_ret_some_err!(scanner.go_to_segment(segment));
            match try_or_ret_some_err!(self.dataset.read_one_record()) {
                Some(record) => members.push(try_or_ret_some_err!(codec::decode(&record))),
                None => {
                    return Some(Err(Error::invalid_seek(
                        "segment resumes past the end of the stream",
                    )));
                }
            }
        }
        Some(Ok((key, members)))
    }
}
