//! Paging pipeline: terminal contract, frame production, session loop.
//!
//! ```text
//! TextBuffer ─┐
//!             ├─→ Paginator::render_frame ─→ ByteAssembler ─→ Terminal
//! Viewport ───┘            ▲
//!                          │ keys / resize flag
//!                  Paginator::run (session loop)
//! ```

mod paginator;
mod resize;
mod session;
mod terminal;

pub use paginator::{Frame, PagerState, Paginator};
pub use resize::{ResizeFlag, ResizeWatcher};
pub use session::SessionEnd;
pub use terminal::{Terminal, TerminalSetup, Viewport};
