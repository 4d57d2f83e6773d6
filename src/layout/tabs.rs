//! Tab expansion.
//!
//! A tab becomes at least one space and then pads to the next multiple of
//! the tab width, measured from the start of the line.

use crate::error::Result;

/// Column reached after a tab at column `col`.
#[inline]
pub fn next_tab_stop(col: usize, tab_width: usize) -> usize {
    (col / tab_width + 1) * tab_width
}

/// Expand every tab in `line` to spaces.
///
/// The result is never longer than `line.len() + tabs * (tab_width - 1)`;
/// tabs that already sit on a tab stop reach exactly that length.
pub fn expand_tabs(line: &[u8], tab_width: usize) -> Result<Vec<u8>> {
    let tabs = line.iter().filter(|&&b| b == b'\t').count();
    let mut out = Vec::new();
    out.try_reserve_exact(line.len() + tabs * tab_width.saturating_sub(1))?;

    for &byte in line {
        if byte == b'\t' {
            let stop = next_tab_stop(out.len(), tab_width);
            out.resize(stop, b' ');
        } else {
            out.push(byte);
        }
    }
    Ok(out)
}
