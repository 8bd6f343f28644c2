use std::io::{Read, Seek, SeekFrom};

use recset_common::{Result, error::Error};

/// Size of the internal read buffer, in bytes.
const BUFFER_SIZE: usize = 4096;

/// A value recording a line number plus the byte offsets bounding that line,
/// used as a resumable position handle.
///
/// `start_offset` is the byte offset where the line begins; `current_offset` is
/// the offset immediately after the line's terminator, i.e. where the next line
/// would start. Segments are plain values: copying one never aliases scanner
/// state, and a segment is meaningless once the scanner that produced it is
/// gone.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Segment {
    /// Number of lines read up to and including the line this segment bounds.
    pub line_number: u64,
    /// Byte offset where the line begins.
    pub start_offset: u64,
    /// Byte offset immediately after the line's terminator.
    pub current_offset: u64,
}

/// Presents a seekable byte stream as discrete lines while tracking exact byte
/// offsets, independent of how many physical read calls are needed.
///
/// A `'\n'` or a NUL byte terminates a line; `'\r'` is dropped and never
/// appears in the returned text; all other bytes are appended verbatim.
/// Unterminated trailing content is returned once as a final line, after which
/// the scanner reports end of stream.
///
/// The scanner's position is exposed as a [`Segment`] via
/// [`current_segment`](LineScanner::current_segment); passing that value back
/// to [`go_to_segment`](LineScanner::go_to_segment) restores the scanner to
/// the exact state it had when the segment was captured.
#[derive(Debug)]
pub struct LineScanner<R> {
    stream: R,
    /// Offset where logical line numbering begins (e.g. past a byte-order mark).
    origin: u64,
    /// Total stream length, captured at construction for seek validation.
    length: u64,
    buffer: Box<[u8]>,
    buf_pos: usize,
    buf_avail: usize,
    segment: Segment,
}

impl<R: Read + Seek> LineScanner<R> {
    /// Creates a scanner over `stream`, beginning the scan at byte `origin`.
    ///
    /// `origin` is typically the width of a byte-order mark the caller has
    /// already measured; line numbering starts at 0 from that offset.
    pub fn new(mut stream: R, origin: u64) -> Result<LineScanner<R>> {
        let length = stream
            .seek(SeekFrom::End(0))
            .map_err(|e| Error::io("seek to end", e))?;
        recset_common::verify_arg!(origin, origin <= length);
        stream
            .seek(SeekFrom::Start(origin))
            .map_err(|e| Error::io("seek to origin", e))?;
        Ok(LineScanner {
            stream,
            origin,
            length,
            buffer: vec![0u8; BUFFER_SIZE].into_boxed_slice(),
            buf_pos: 0,
            buf_avail: 0,
            segment: Segment {
                line_number: 0,
                start_offset: origin,
                current_offset: origin,
            },
        })
    }

    /// Returns the offset where the scan originates (just past any byte-order
    /// mark).
    pub fn origin(&self) -> u64 {
        self.origin
    }

    /// Returns the total stream length observed at construction.
    pub fn length(&self) -> u64 {
        self.length
    }

    /// Returns a value copy of the scanner's current position.
    pub fn current_segment(&self) -> Segment {
        self.segment
    }

    /// Returns the number of lines read since the last (re)positioning from
    /// the origin.
    pub fn line_number(&self) -> u64 {
        self.segment.line_number
    }

    /// Reads the next logical line, or `None` at end of stream.
    ///
    /// Each call advances `current_offset` by the number of bytes consumed
    /// (including the terminator) and increments the line counter. The
    /// segment's `start_offset` is taken from the offset in effect at the
    /// start of the call, but only if the offset actually moved since the
    /// previous line's end; a position that was just restored by a re-seek is
    /// not represented as having moved.
    pub fn read_line(&mut self) -> Result<Option<String>> {
        let save_point = self.segment.current_offset;
        let mut text: Vec<u8> = Vec::new();
        let mut found = false;

        while !found {
            if self.buf_avail == 0 {
                self.buf_pos = 0;
                let read = self
                    .stream
                    .read(&mut self.buffer)
                    .map_err(|e| Error::io("read line", e))?;
                if read == 0 {
                    if text.is_empty() {
                        return Ok(None);
                    }
                    break;
                }
                self.buf_avail = read;
            }

            while self.buf_avail > 0 {
                let byte = self.buffer[self.buf_pos];
                self.buf_pos += 1;
                self.buf_avail -= 1;
                self.segment.current_offset += 1;

                match byte {
                    b'\n' | 0 => {
                        found = true;
                        break;
                    }
                    b'\r' => {}
                    _ => text.push(byte),
                }
            }
        }

        if save_point != self.segment.current_offset {
            self.segment.start_offset = save_point;
        }
        self.segment.line_number += 1;
        Ok(Some(String::from_utf8_lossy(&text).into_owned()))
    }

    /// Replays the stream from the origin until the internal line counter
    /// equals `target`, leaving the scanner positioned so that the next
    /// [`read_line`](LineScanner::read_line) returns line `target`.
    ///
    /// This is a full replay, O(`target`) in lines skipped. Returns `false`
    /// (with the scanner at end of stream) if the stream has fewer lines.
    pub fn go_to_line(&mut self, target: u64) -> Result<bool> {
        self.rewind()?;
        loop {
            if self.segment.line_number == target {
                return Ok(true);
            }
            if self.read_line()?.is_none() {
                return Ok(false);
            }
        }
    }

    /// Discards buffered state and restores the scanner to the position
    /// captured by `segment`.
    ///
    /// The scanner adopts the segment's line number and offsets as current
    /// state and seeks the underlying stream to the segment's resume point,
    /// so that re-seeking to [`current_segment`](LineScanner::current_segment)
    /// is a no-op: the next [`read_line`](LineScanner::read_line) returns the
    /// line that follows the segment's line.
    pub fn go_to_segment(&mut self, segment: Segment) -> Result<()> {
        if segment.start_offset > segment.current_offset
            || segment.start_offset < self.origin
            || segment.current_offset > self.length
        {
            return Err(Error::invalid_seek(format!(
                "segment {segment:?} does not belong to this stream"
            )));
        }
        self.buf_pos = 0;
        self.buf_avail = 0;
        self.stream
            .seek(SeekFrom::Start(segment.current_offset))
            .map_err(|e| Error::io("seek to segment", e))?;
        self.segment = segment;
        Ok(())
    }

    /// Counts the lines remaining in the stream when replayed from the
    /// origin, leaving the scanner at end of stream.
    pub fn count_lines(&mut self) -> Result<u64> {
        self.rewind()?;
        while self.read_line()?.is_some() {}
        Ok(self.segment.line_number)
    }

    /// Consumes the scanner, returning the underlying stream.
    pub fn into_inner(self) -> R {
        self.stream
    }

    fn rewind(&mut self) -> Result<()> {
        self.stream
            .seek(SeekFrom::Start(self.origin))
            .map_err(|e| Error::io("seek to origin", e))?;
        self.buf_pos = 0;
        self.buf_avail = 0;
        self.segment = Segment {
            line_number: 0,
            start_offset: self.origin,
            current_offset: self.origin,
        };
        Ok(())
    }
}
