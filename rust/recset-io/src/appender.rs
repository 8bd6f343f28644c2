use std::{
    fs::{File, OpenOptions},
    io::{BufWriter, Write},
    path::Path,
};

/// An append-mode text destination.
///
/// Opens (creating the file and any missing parent directories if needed) a
/// destination for line-by-line appends. Written data is committed by an
/// explicit [`seal`](LineAppender::seal); dropping an unsealed appender still
/// flushes buffered lines as a safety net, but cannot report failures.
pub struct LineAppender {
    writer: Option<BufWriter<File>>,
}

impl LineAppender {
    /// Opens `path` for appending, creating it (and its parent directories)
    /// when absent.
    pub fn open(path: impl AsRef<Path>) -> std::io::Result<LineAppender> {
        let path = path.as_ref();
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent)?;
        }
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        Ok(LineAppender {
            writer: Some(BufWriter::new(file)),
        })
    }

    /// Appends `text` followed by a line terminator.
    pub fn write_line(&mut self, text: &str) -> std::io::Result<()> {
        let writer = self
            .writer
            .as_mut()
            .ok_or_else(|| std::io::Error::from(std::io::ErrorKind::NotFound))?;
        writer.write_all(text.as_bytes())?;
        writer.write_all(b"\n")
    }

    /// Appends every line produced by `lines`.
    pub fn write_lines<I, S>(&mut self, lines: I) -> std::io::Result<()>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for line in lines {
            self.write_line(line.as_ref())?;
        }
        Ok(())
    }

    /// Seals the appender, flushing buffered data and syncing the file.
    ///
    /// Further writes after sealing fail; sealing an already sealed appender
    /// is a no-op.
    pub fn seal(&mut self) -> std::io::Result<()> {
        let Some(mut writer) = self.writer.take() else {
            return Ok(());
        };
        writer.flush()?;
        writer.get_ref().sync_all()?;
        Ok(())
    }
}

impl Drop for LineAppender {
    fn drop(&mut self) {
        if let Some(mut writer) = self.writer.take() {
            let _ = writer.flush();
        }
    }
}
