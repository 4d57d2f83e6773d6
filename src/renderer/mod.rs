//! Frame output.
//!
//! - [`ByteAssembler`] - accumulates one frame, flushed once
//! - [`ansi`] - the escape sequences frames are built from

pub mod ansi;
mod output;

pub use output::{ByteAssembler, FRAME_INCREMENT};
