//! Left gutter: line numbers and wrap continuation markers.

use crate::config::{CONTINUATION_MARKER, GUTTER_WIDTH};
use crate::error::Result;
use crate::renderer::ByteAssembler;

/// What the gutter shows on a row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GutterCell {
    /// First row of a line: its 1-based number.
    Number(usize),
    /// Wrapped continuation row.
    Continuation,
}

/// Write a gutter cell, right-aligned, followed by one separating space.
pub fn write_gutter(out: &mut ByteAssembler, cell: GutterCell) -> Result<()> {
    let field = GUTTER_WIDTH - 1;
    match cell {
        GutterCell::Number(n) => {
            let digits = n.to_string();
            out.append_repeated(b' ', field.saturating_sub(digits.len()))?;
            out.append(digits.as_bytes())?;
        }
        GutterCell::Continuation => {
            out.append_repeated(b' ', field - CONTINUATION_MARKER.len())?;
            out.append(CONTINUATION_MARKER)?;
        }
    }
    out.append(b" ")
}
