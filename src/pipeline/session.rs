//! Interactive paging loop.
//!
//! ```text
//! enter raw mode → initial frame
//!   loop:
//!     resize pending?  → refresh viewport, clamp offset, redraw
//!     read key (bounded timeout)
//!       ' '  → next frame (end of slice ends the session)
//!       'q'  → quit
//!       '>'  → offset + 1, redraw   (truncate mode, up to the clamp)
//!       '<'  → offset - 1, redraw   (truncate mode, down to 0)
//! blank viewport → restore mode
//! ```

use std::io;
use std::ops::Range;

use tracing::{debug, warn};

use super::paginator::{Frame, Paginator};
use super::resize::ResizeFlag;
use super::terminal::{Terminal, Viewport};
use crate::buffer::TextBuffer;
use crate::config::{LayoutMode, PagerConfig};
use crate::error::{PagerError, Result};
use crate::renderer::ansi;

/// Why a paging session ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEnd {
    /// The user pressed `q` (or input ran out).
    Quit,
    /// Paged past the end of the slice.
    EndOfDocument,
}

impl Paginator {
    /// Page the 0-based line `range` of `buffer` until the user quits or
    /// the slice is exhausted.
    ///
    /// Normal terminal mode is restored and the viewport blanked on every
    /// exit path, including errors.
    pub fn run<T: Terminal>(
        &mut self,
        buffer: &TextBuffer,
        config: &PagerConfig,
        range: Range<usize>,
        terminal: &mut T,
        resize: &ResizeFlag,
    ) -> Result<SessionEnd> {
        self.refresh_viewport(terminal);
        self.reset(range);
        terminal.enter_interactive_mode().map_err(PagerError::Terminal)?;

        let result = self.session_loop(buffer, config, terminal, resize);

        let blanked = self.blank_viewport(terminal);
        let restored = terminal.restore_mode().map_err(PagerError::Terminal);
        if let Err(err) = &restored {
            warn!(%err, "failed to restore terminal mode");
        }

        let end = result?;
        blanked?;
        restored?;
        debug!(?end, frames = self.state().frames_rendered, "session finished");
        Ok(end)
    }

    fn session_loop<T: Terminal>(
        &mut self,
        buffer: &TextBuffer,
        config: &PagerConfig,
        terminal: &mut T,
        resize: &ResizeFlag,
    ) -> Result<SessionEnd> {
        self.present(buffer, config, terminal)?;
        let truncate = config.layout_mode() == LayoutMode::Truncate;

        loop {
            if resize.take() {
                self.handle_resize(buffer, config, terminal)?;
            }

            let key = match terminal.read_key() {
                Ok(Some(key)) => key,
                Ok(None) => continue,
                Err(err) if err.kind() == io::ErrorKind::UnexpectedEof => {
                    return Ok(SessionEnd::Quit);
                }
                Err(err) => return Err(PagerError::Terminal(err)),
            };

            match key {
                b' ' => {
                    if self.present(buffer, config, terminal)? == Frame::End {
                        return Ok(SessionEnd::EndOfDocument);
                    }
                }
                b'q' => return Ok(SessionEnd::Quit),
                b'>' if truncate => {
                    if self.offset() < self.max_offset(config) {
                        self.set_offset(self.offset() + 1);
                        self.redraw(buffer, config, terminal)?;
                    } else {
                        debug!(offset = self.offset(), "already at right edge");
                    }
                }
                b'<' if truncate => {
                    if self.offset() > 0 {
                        self.set_offset(self.offset() - 1);
                        self.redraw(buffer, config, terminal)?;
                    }
                }
                _ => {}
            }
        }
    }

    /// Render the next frame and flush it in one write.
    fn present<T: Terminal>(
        &mut self,
        buffer: &TextBuffer,
        config: &PagerConfig,
        terminal: &mut T,
    ) -> Result<Frame> {
        let frame = self.render_frame(buffer, config)?;
        if let Frame::Rendered { .. } = frame {
            self.output_mut().flush_to(terminal)?;
        }
        Ok(frame)
    }

    /// Re-render the page that is currently on screen.
    fn redraw<T: Terminal>(
        &mut self,
        buffer: &TextBuffer,
        config: &PagerConfig,
        terminal: &mut T,
    ) -> Result<Frame> {
        self.request_recompute();
        self.present(buffer, config, terminal)
    }

    fn handle_resize<T: Terminal>(
        &mut self,
        buffer: &TextBuffer,
        config: &PagerConfig,
        terminal: &mut T,
    ) -> Result<()> {
        self.refresh_viewport(terminal);
        self.redraw(buffer, config, terminal)?;

        if config.layout_mode() == LayoutMode::Truncate {
            let max = self.max_offset(config);
            if self.offset() > max {
                debug!(offset = self.offset(), max, "clamping offset after resize");
                self.set_offset(max);
                self.redraw(buffer, config, terminal)?;
            }
        }
        Ok(())
    }

    /// Re-query the terminal size, keeping the old viewport if that fails.
    fn refresh_viewport<T: Terminal>(&mut self, terminal: &mut T) {
        match terminal.query_dimensions() {
            Ok((rows, cols)) => {
                let viewport = Viewport::from_terminal_size(rows, cols);
                debug!(rows = viewport.rows, cols = viewport.cols, "viewport");
                self.set_viewport(viewport);
            }
            Err(err) => warn!(%err, "terminal size unavailable, keeping previous viewport"),
        }
    }

    fn blank_viewport<T: Terminal>(&mut self, terminal: &mut T) -> Result<()> {
        let rows = self.viewport().rows;
        let out = self.output_mut();
        out.clear();
        ansi::cursor_home(out)?;
        for _ in 0..rows {
            ansi::end_row(out)?;
        }
        ansi::cursor_home(out)?;
        out.flush_to(terminal)
    }
}
