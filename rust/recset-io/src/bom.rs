//! Byte-order-mark detection.
//!
//! A delimited text file may be prefixed by a byte-order mark. The engine does
//! not transcode the content; it only measures the mark so the line scan can
//! begin just past it.

use std::{fs::File, io::Read, path::Path};

/// A recognized byte-order mark.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ByteOrderMark {
    /// Name of the encoding the mark announces.
    pub encoding: &'static str,
    /// The mark's byte sequence.
    pub mark: &'static [u8],
}

/// Marks for the text encodings the engine recognizes, longest first so that
/// a prefix scan picks the longest match (UTF-32LE starts with the UTF-16LE
/// mark).
const MARKS: &[ByteOrderMark] = &[
    ByteOrderMark {
        encoding: "UTF-32LE",
        mark: &[0xFF, 0xFE, 0x00, 0x00],
    },
    ByteOrderMark {
        encoding: "UTF-32BE",
        mark: &[0x00, 0x00, 0xFE, 0xFF],
    },
    ByteOrderMark {
        encoding: "UTF-8",
        mark: &[0xEF, 0xBB, 0xBF],
    },
    ByteOrderMark {
        encoding: "UTF-16LE",
        mark: &[0xFF, 0xFE],
    },
    ByteOrderMark {
        encoding: "UTF-16BE",
        mark: &[0xFE, 0xFF],
    },
];

/// The longest mark the engine knows about.
pub const MAX_MARK_LEN: usize = 4;

/// Matches `prefix` against all known marks, returning the longest one that
/// `prefix` starts with.
pub fn detect(prefix: &[u8]) -> Option<ByteOrderMark> {
    MARKS.iter().find(|b| prefix.starts_with(b.mark)).copied()
}

/// Reads the leading bytes of the file at `path` and returns the width of its
/// byte-order mark, or 0 when none is present.
pub fn measure(path: impl AsRef<Path>) -> std::io::Result<u64> {
    let mut file = File::open(path)?;
    let mut prefix = [0u8; MAX_MARK_LEN];
    let mut filled = 0;
    while filled < prefix.len() {
        let read = file.read(&mut prefix[filled..])?;
        if read == 0 {
            break;
        }
        filled += read;
    }
    Ok(detect(&prefix[..filled]).map_or(0, |b| b.mark.len() as u64))
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn test_detect_utf8() {
        let bom = detect(&[0xEF, 0xBB, 0xBF, b'a']).unwrap();
        assert_eq!(bom.encoding, "UTF-8");
        assert_eq!(bom.mark.len(), 3);
    }

    #[test]
    fn test_detect_longest_match_wins() {
        // UTF-32LE's mark begins with UTF-16LE's mark.
        let bom = detect(&[0xFF, 0xFE, 0x00, 0x00]).unwrap();
        assert_eq!(bom.encoding, "UTF-32LE");

        let bom = detect(&[0xFF, 0xFE, b'a', 0x00]).unwrap();
        assert_eq!(bom.encoding, "UTF-16LE");
    }

    #[test]
    fn test_detect_none() {
        assert_eq!(detect(b"Code,Name"), None);
        assert_eq!(detect(&[]), None);
    }

    #[test]
    fn test_measure_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(&[0xEF, 0xBB, 0xBF]).unwrap();
        file.write_all(b"Code,Name\n").unwrap();
        assert_eq!(measure(file.path()).unwrap(), 3);

        let mut plain = tempfile::NamedTempFile::new().unwrap();
        plain.write_all(b"Code,Name\n").unwrap();
        assert_eq!(measure(plain.path()).unwrap(), 0);
    }

    #[test]
    fn test_measure_short_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(&[0xFE]).unwrap();
        assert_eq!(measure(file.path()).unwrap(), 0);
    }
}
