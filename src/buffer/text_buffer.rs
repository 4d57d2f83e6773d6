//! Ordered, growable sequence of lines with range-addressed edits.
//!
//! Line arguments of the edit operations are 1-based. `insert_after` takes
//! the line to insert after, so `0` means "before the first line".
//! Every successful mutation sets the modified flag.

use std::path::{Path, PathBuf};

use tracing::debug;

use super::line::Line;
use crate::error::{PagerError, Result};

/// The whole document held in memory.
#[derive(Debug, Clone, Default)]
pub struct TextBuffer {
    lines: Vec<Line>,
    modified: bool,
    file_name: Option<PathBuf>,
}

impl TextBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a buffer directly from lines (not marked modified).
    pub fn from_lines(lines: Vec<Line>) -> Self {
        Self {
            lines,
            ..Self::default()
        }
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    #[inline]
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Line at 0-based `index`.
    #[inline]
    pub fn line(&self, index: usize) -> Option<&Line> {
        self.lines.get(index)
    }

    #[inline]
    pub fn lines(&self) -> &[Line] {
        &self.lines
    }

    #[inline]
    pub fn is_modified(&self) -> bool {
        self.modified
    }

    pub fn file_name(&self) -> Option<&Path> {
        self.file_name.as_deref()
    }

    pub(crate) fn set_file_name(&mut self, path: PathBuf) {
        self.file_name = Some(path);
    }

    pub(crate) fn mark_saved(&mut self) {
        self.modified = false;
    }

    // =========================================================================
    // Mutations
    // =========================================================================

    /// Replace the entire sequence. Used for the initial file load, so the
    /// buffer starts out clean.
    pub fn load(&mut self, lines: Vec<Line>) {
        self.lines = lines;
        self.modified = false;
    }

    /// Split `text` on line feeds and splice the pieces after line `index`.
    ///
    /// `index` must be in `0..=len`. Nothing changes unless every new line
    /// could be allocated. Returns the number of lines inserted.
    pub fn insert_after(&mut self, text: &[u8], index: usize) -> Result<usize> {
        if index > self.lines.len() {
            return Err(PagerError::out_of_bounds("line", index, 0, self.lines.len()));
        }

        let count = text.iter().filter(|&&b| b == b'\n').count() + 1;
        let mut new_lines = Vec::new();
        new_lines.try_reserve_exact(count)?;
        for piece in text.split(|&b| b == b'\n') {
            new_lines.push(Line::try_from_slice(piece)?);
        }
        self.lines.try_reserve(count)?;

        self.lines.splice(index..index, new_lines);
        self.modified = true;
        debug!(index, count, "inserted lines");
        Ok(count)
    }

    /// Remove lines `start..=end` (1-based), clamping the range to the
    /// buffer instead of failing. Returns the number of lines removed.
    pub fn delete_range(&mut self, start: usize, end: usize) -> Result<usize> {
        let Some((from, to)) = self.clamp_range(start, end) else {
            return Ok(0);
        };
        let removed = self.lines.drain(from..=to).count();
        self.modified = true;
        debug!(start = from + 1, end = to + 1, removed, "deleted lines");
        Ok(removed)
    }

    /// Overwrite the byte at 1-based `pos` of 1-based `line`.
    ///
    /// The bound check rejects `pos == len`, so the final byte of a line
    /// cannot be edited this way. Existing scripts depend on the rejection,
    /// so it stays until the bound is revisited.
    pub fn edit_char(&mut self, line: usize, pos: usize, byte: u8) -> Result<()> {
        let index = self.line_index(line)?;
        let current = &self.lines[index];
        if pos < 1 || pos >= current.len() {
            return Err(PagerError::out_of_bounds(
                "position",
                pos,
                1,
                current.len().saturating_sub(1),
            ));
        }
        let updated = current.spliced(pos - 1..pos, &[byte])?;
        self.lines[index] = updated;
        self.modified = true;
        Ok(())
    }

    /// Insert `byte` before position `pos` of 1-based `line`; `pos` is
    /// clamped into `0..=len`.
    pub fn insert_char(&mut self, line: usize, pos: usize, byte: u8) -> Result<()> {
        let index = self.line_index(line)?;
        let current = &self.lines[index];
        let at = pos.min(current.len());
        let updated = current.spliced(at..at, &[byte])?;
        self.lines[index] = updated;
        self.modified = true;
        Ok(())
    }

    /// Replace the first occurrence of `needle` in each line of
    /// `start..=end` (1-based, clamped). Returns how many lines changed.
    ///
    /// All replacement lines are built before any is spliced in.
    pub fn replace_substring(
        &mut self,
        start: usize,
        end: usize,
        needle: &[u8],
        replacement: &[u8],
    ) -> Result<usize> {
        if needle.is_empty() {
            return Err(PagerError::InvalidArgument(
                "search text must not be empty".to_string(),
            ));
        }
        let Some((from, to)) = self.clamp_range(start, end) else {
            return Ok(0);
        };

        let mut rebuilt = Vec::new();
        for index in from..=to {
            let line = &self.lines[index];
            if let Some(at) = line.find(needle) {
                rebuilt.try_reserve(1)?;
                rebuilt.push((index, line.spliced(at..at + needle.len(), replacement)?));
            }
        }

        let changed = rebuilt.len();
        for (index, line) in rebuilt {
            self.lines.splice(index..=index, std::iter::once(line));
        }
        if changed > 0 {
            self.modified = true;
        }
        debug!(changed, "replaced substrings");
        Ok(changed)
    }

    // =========================================================================
    // Helpers
    // =========================================================================

    /// 1-based line number to 0-based index.
    fn line_index(&self, line: usize) -> Result<usize> {
        if line < 1 || line > self.lines.len() {
            return Err(PagerError::out_of_bounds("line", line, 1, self.lines.len()));
        }
        Ok(line - 1)
    }

    /// Clamp a 1-based inclusive range to the buffer, as 0-based indices.
    fn clamp_range(&self, start: usize, end: usize) -> Option<(usize, usize)> {
        let start = start.max(1);
        let end = end.min(self.lines.len());
        (start <= end).then(|| (start - 1, end - 1))
    }
}
