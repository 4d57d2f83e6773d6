//! Line layout for the two display modes.
//!
//! - [`tabs`] - tab expansion shared by both modes
//! - [`truncate`] - one line per row, horizontal window
//! - [`wrap`] - one line over several rows, resumable mid-line
//! - [`gutter`] - line numbers and continuation markers

pub mod gutter;
pub mod tabs;
pub mod truncate;
pub mod wrap;

pub use gutter::{GutterCell, write_gutter};
pub use tabs::{expand_tabs, next_tab_stop};
pub use truncate::{max_offset, visible_slice};
pub use wrap::fill_row;
