//! In-memory document model.
//!
//! - [`Line`] - one row of raw bytes
//! - [`TextBuffer`] - the ordered line sequence and its edit operations
//! - [`read_all_lines`] / [`join_lines`] - file load and save format

mod file_io;
mod line;
mod text_buffer;

pub use file_io::{join_lines, read_all_lines, split_lines};
pub use line::Line;
pub use text_buffer::TextBuffer;
