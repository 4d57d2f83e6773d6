//! Row slicing for truncate mode.
//!
//! Truncate mode shows one line per row. The row is the window
//! `[offset, offset + width)` of the tab-expanded line; anything outside
//! it is simply not drawn.

/// The part of `expanded` visible at horizontal `offset` in `width` columns.
pub fn visible_slice(expanded: &[u8], offset: usize, width: usize) -> &[u8] {
    let start = offset.min(expanded.len());
    let end = offset.saturating_add(width).min(expanded.len());
    &expanded[start..end]
}

/// Largest useful horizontal offset for the widest line seen.
///
/// Lines are `max_width` bytes wide after tab expansion; the offset may
/// go one column past the point where the widest line's end becomes
/// visible. Never negative.
pub fn max_offset(max_width: usize, content_width: usize, gutter_width: usize) -> usize {
    (max_width + gutter_width + 1).saturating_sub(content_width)
}
