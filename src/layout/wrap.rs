//! Row filling for wrap mode.
//!
//! A line is laid out one row at a time. The caller passes the byte offset
//! to start from and gets back the offset where the next row starts, which
//! is exactly what the paginator records when a frame runs out of rows.

use super::tabs::next_tab_stop;
use crate::error::Result;
use crate::renderer::ByteAssembler;

/// Emit one row of `line` starting at byte `start`.
///
/// Tabs expand to the next tab stop of the row, cut short at the row edge.
/// The row ends once `width` columns are filled or the line runs out.
/// Returns the byte offset the following row starts at.
pub fn fill_row(
    line: &[u8],
    start: usize,
    width: usize,
    tab_width: usize,
    out: &mut ByteAssembler,
) -> Result<usize> {
    let width = width.max(1);
    let mut pos = start.min(line.len());
    let mut col = 0;
    let mut run_start = pos;

    while pos < line.len() && col < width {
        if line[pos] == b'\t' {
            out.append(&line[run_start..pos])?;
            let stop = next_tab_stop(col, tab_width).min(width);
            out.append_repeated(b' ', stop - col)?;
            col = stop;
            pos += 1;
            run_start = pos;
        } else {
            col += 1;
            pos += 1;
        }
    }
    out.append(&line[run_start..pos])?;
    Ok(pos)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rows(line: &[u8], width: usize, tab_width: usize) -> Vec<String> {
        let mut result = Vec::new();
        let mut pos = 0;
        loop {
            let mut out = ByteAssembler::new();
            pos = fill_row(line, pos, width, tab_width, &mut out).unwrap();
            result.push(out.as_str().into_owned());
            if pos >= line.len() {
                return result;
            }
        }
    }

    #[test]
    fn test_short_line_single_row() {
        assert_eq!(rows(b"hello", 10, 4), vec!["hello"]);
    }

    #[test]
    fn test_empty_line_single_empty_row() {
        assert_eq!(rows(b"", 10, 4), vec![""]);
    }

    #[test]
    fn test_breaks_at_width() {
        assert_eq!(rows(b"abcdefgh", 3, 4), vec!["abc", "def", "gh"]);
    }

    #[test]
    fn test_exact_multiple_has_no_trailing_row() {
        assert_eq!(rows(b"abcdef", 3, 4), vec!["abc", "def"]);
    }

    #[test]
    fn test_tab_expands_within_row() {
        assert_eq!(rows(b"a\tb", 10, 4), vec!["a   b"]);
    }

    #[test]
    fn test_tab_cut_at_row_edge() {
        // tab at col 4 would reach col 8; the row is only 6 wide
        assert_eq!(rows(b"abcd\tef", 6, 4), vec!["abcd  ", "ef"]);
    }

    #[test]
    fn test_resume_offset_is_byte_offset() {
        let mut out = ByteAssembler::new();
        let next = fill_row(b"abcdefgh", 0, 5, 4, &mut out).unwrap();
        assert_eq!(next, 5);
        out.clear();
        let next = fill_row(b"abcdefgh", next, 5, 4, &mut out).unwrap();
        assert_eq!(next, 8);
        assert_eq!(out.as_bytes(), b"fgh");
    }

    #[test]
    fn test_start_past_end_emits_nothing() {
        let mut out = ByteAssembler::new();
        let next = fill_row(b"abc", 7, 5, 4, &mut out).unwrap();
        assert_eq!(next, 3);
        assert!(out.is_empty());
    }
}
