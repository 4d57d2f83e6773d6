//! Loading and saving buffers.
//!
//! Files are split on `\n` only. Joining with `\n` and no trailing
//! separator is the exact inverse, so load → save is byte-identical:
//! a file ending in `\n` loads with a final empty line, which saves back
//! as that same trailing `\n`.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::info;

use super::line::Line;
use super::text_buffer::TextBuffer;
use crate::error::{PagerError, Result};

/// Read `path` and split it into lines.
///
/// A file without a trailing line feed still yields its final line; an
/// empty file yields one empty line.
pub fn read_all_lines(path: &Path) -> Result<Vec<Line>> {
    let bytes = fs::read(path).map_err(|e| PagerError::io(path, e))?;
    split_lines(&bytes)
}

/// Split raw bytes on line feeds.
pub fn split_lines(bytes: &[u8]) -> Result<Vec<Line>> {
    let count = bytes.iter().filter(|&&b| b == b'\n').count() + 1;
    let mut lines = Vec::new();
    lines.try_reserve_exact(count)?;
    for piece in bytes.split(|&b| b == b'\n') {
        lines.push(Line::try_from_slice(piece)?);
    }
    Ok(lines)
}

/// Join lines with `\n`, no separator after the last one.
pub fn join_lines(lines: &[Line]) -> Result<Vec<u8>> {
    let total = lines.iter().map(Line::len).sum::<usize>() + lines.len().saturating_sub(1);
    let mut out = Vec::new();
    out.try_reserve_exact(total)?;
    for (i, line) in lines.iter().enumerate() {
        if i > 0 {
            out.push(b'\n');
        }
        out.extend_from_slice(line.as_bytes());
    }
    Ok(out)
}

impl TextBuffer {
    /// Load `path` into the buffer and associate the buffer with it.
    ///
    /// On failure both the contents and the file association are untouched.
    pub fn open(&mut self, path: impl Into<PathBuf>) -> Result<()> {
        let path = path.into();
        let lines = read_all_lines(&path)?;
        info!(path = %path.display(), lines = lines.len(), "loaded file");
        self.load(lines);
        self.set_file_name(path);
        Ok(())
    }

    /// Write the buffer to its associated file in one bulk write.
    ///
    /// The modified flag is only cleared when the write succeeds.
    pub fn save(&mut self) -> Result<()> {
        let path = self.file_name().ok_or(PagerError::NoFileName)?.to_path_buf();
        self.write_to(&path)
    }

    /// Write the buffer to `path`; on success `path` becomes the associated file.
    pub fn save_as(&mut self, path: impl Into<PathBuf>) -> Result<()> {
        let path = path.into();
        self.write_to(&path)?;
        self.set_file_name(path);
        Ok(())
    }

    fn write_to(&mut self, path: &Path) -> Result<()> {
        let bytes = join_lines(self.lines())?;
        fs::write(path, &bytes).map_err(|e| PagerError::io(path, e))?;
        self.mark_saved();
        info!(path = %path.display(), bytes = bytes.len(), "saved file");
        Ok(())
    }
}
