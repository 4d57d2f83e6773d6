//! # linepager
//!
//! Terminal line pager with a range-addressed text editing core.
//!
//! ## Architecture
//!
//! A document is held in memory as a [`TextBuffer`] of byte [`buffer::Line`]s.
//! The [`Paginator`] walks a slice of it and builds one screen frame at a
//! time into a [`renderer::ByteAssembler`], flushed to the terminal in a
//! single write:
//!
//! ```text
//! TextBuffer ──┐
//!              ├─→ Paginator::render_frame ─→ ByteAssembler ─→ Terminal
//! Viewport ────┘        ▲
//!                       │ keys / resize flag
//!                  session loop
//! ```
//!
//! Edits go straight to the buffer; the paginator only forgets its
//! recorded maximum line width.
//!
//! ## Modules
//!
//! - [`buffer`] - Lines, the text buffer and file load/save
//! - [`layout`] - Tab expansion, truncation, wrapping and the gutter
//! - [`renderer`] - Frame assembly and ANSI sequences
//! - [`pipeline`] - Paginator, terminal contract, resize flag, session loop
//! - [`command`] - Tokenizer, parser and shell for the command language
//! - [`app`] - Application context the shell drives

pub mod app;
pub mod buffer;
pub mod command;
pub mod config;
pub mod error;
pub mod layout;
pub mod pipeline;
pub mod renderer;

pub use app::{App, Outcome};
pub use buffer::{Line, TextBuffer};
pub use config::{DisplayFlags, LayoutMode, PagerConfig};
pub use error::{PagerError, Result};
pub use pipeline::{
    Frame, PagerState, Paginator, ResizeFlag, ResizeWatcher, SessionEnd, Terminal,
    TerminalSetup, Viewport,
};
