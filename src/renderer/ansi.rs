//! ANSI escape sequences used by the pager.
//!
//! The pager only needs a handful of VT100 controls:
//! - Cursor home / far corner moves
//! - Erase to end of line
//! - Cursor position report (for the size fallback)

use std::io::Write;

// =============================================================================
// Constants
// =============================================================================

/// Control Sequence Introducer.
pub const CSI: &str = "\x1b[";

/// Row terminator in raw mode (output post-processing is off).
pub const NEWLINE: &[u8] = b"\r\n";

// =============================================================================
// Cursor Movement
// =============================================================================

/// Move cursor to the top-left corner.
#[inline]
pub fn cursor_home<W: Write>(w: &mut W) -> std::io::Result<()> {
    write!(w, "\x1b[H")
}

/// Push the cursor as far right and down as the terminal allows.
#[inline]
pub fn cursor_far_corner<W: Write>(w: &mut W) -> std::io::Result<()> {
    write!(w, "\x1b[999C\x1b[999B")
}

/// Ask the terminal to report the cursor position (`ESC [ row ; col R`).
#[inline]
pub fn request_cursor_position<W: Write>(w: &mut W) -> std::io::Result<()> {
    write!(w, "\x1b[6n")
}

// =============================================================================
// Screen Control
// =============================================================================

/// Clear from cursor to end of line.
#[inline]
pub fn erase_to_eol<W: Write>(w: &mut W) -> std::io::Result<()> {
    write!(w, "\x1b[K")
}

/// Terminate a row: erase the rest of it, then break the line.
#[inline]
pub fn end_row<W: Write>(w: &mut W) -> std::io::Result<()> {
    erase_to_eol(w)?;
    w.write_all(NEWLINE)
}

// =============================================================================
// Reports
// =============================================================================

/// Parse a cursor position report `ESC [ rows ; cols R`.
///
/// The trailing `R` is optional so callers can pass what they read up to it.
pub fn parse_cursor_report(report: &[u8]) -> Option<(u16, u16)> {
    let body = report.strip_prefix(b"\x1b[")?;
    let body = body.strip_suffix(b"R").unwrap_or(body);
    let text = std::str::from_utf8(body).ok()?;
    let (rows, cols) = text.split_once(';')?;
    Some((rows.trim().parse().ok()?, cols.trim().parse().ok()?))
}
