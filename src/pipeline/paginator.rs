//! Frame production.
//!
//! The paginator walks a slice of the buffer one screen at a time:
//!
//! ```text
//! PagerState.current_line ─┐
//!                          ├─→ render_frame ─→ ByteAssembler ─→ one flush
//! Viewport rows/cols ──────┘        │
//!                                   └─→ checkpoint = where this frame began
//! ```
//!
//! Forward paging just renders again: the cursor already points past the
//! last emitted row. Redrawing the current page (resize, horizontal
//! scroll) goes through [`Paginator::request_recompute`], which rewinds
//! to the checkpoint before the next frame.

use std::ops::Range;

use tracing::debug;

use super::terminal::Viewport;
use crate::buffer::TextBuffer;
use crate::config::{LayoutMode, PagerConfig};
use crate::error::Result;
use crate::layout::{self, GutterCell};
use crate::renderer::{ByteAssembler, ansi};

// =============================================================================
// Types
// =============================================================================

/// Navigation cursor for one paging session.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PagerState {
    /// 0-based line the next frame starts at.
    pub current_line: usize,
    /// Byte offset into `current_line` (wrap mode only).
    pub resume_offset: usize,
    /// Where the previous frame began.
    pub checkpoint_line: usize,
    pub checkpoint_offset: usize,
    /// Rewind to the checkpoint before the next frame.
    pub recompute: bool,
    /// Lines at or past this index are never shown.
    pub upper_bound: usize,
    /// Widest tab-expanded line of the last frame (truncate mode).
    pub max_width: usize,
    pub frames_rendered: usize,
}

impl PagerState {
    /// Fresh cursor over the 0-based line range.
    pub fn new(range: Range<usize>) -> Self {
        Self {
            current_line: range.start,
            checkpoint_line: range.start,
            upper_bound: range.end,
            ..Self::default()
        }
    }
}

/// Outcome of one `render_frame` call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Frame {
    /// A frame was assembled with this many content rows.
    Rendered { rows: usize },
    /// The cursor is at the end of the slice; nothing was written.
    End,
}

// =============================================================================
// Paginator
// =============================================================================

/// Stateful pager over a [`TextBuffer`].
#[derive(Debug, Default)]
pub struct Paginator {
    state: PagerState,
    viewport: Viewport,
    offset: usize,
    out: ByteAssembler,
}

impl Paginator {
    pub fn new(viewport: Viewport) -> Self {
        Self {
            viewport,
            ..Self::default()
        }
    }

    #[inline]
    pub fn state(&self) -> &PagerState {
        &self.state
    }

    #[inline]
    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn set_viewport(&mut self, viewport: Viewport) {
        self.viewport = viewport;
    }

    /// Horizontal scroll offset, in bytes of the tab-expanded line.
    #[inline]
    pub fn offset(&self) -> usize {
        self.offset
    }

    pub fn set_offset(&mut self, offset: usize) {
        self.offset = offset;
    }

    /// The most recently assembled frame.
    pub fn frame_bytes(&self) -> &[u8] {
        self.out.as_bytes()
    }

    pub(crate) fn output_mut(&mut self) -> &mut ByteAssembler {
        &mut self.out
    }

    /// Start a new session over the 0-based line range, scrolled fully left.
    pub fn reset(&mut self, range: Range<usize>) {
        self.state = PagerState::new(range);
        self.offset = 0;
        self.out.clear();
    }

    /// Make the next frame start where the previous one began.
    pub fn request_recompute(&mut self) {
        self.state.recompute = true;
    }

    /// Forget the recorded maximum width (the buffer was edited).
    pub fn invalidate_width(&mut self) {
        self.state.max_width = 0;
    }

    /// Columns left for text after the gutter.
    pub fn content_width(&self, config: &PagerConfig) -> usize {
        self.viewport.cols.saturating_sub(config.gutter_width()).max(1)
    }

    /// Upper clamp for the horizontal offset given the last frame.
    pub fn max_offset(&self, config: &PagerConfig) -> usize {
        layout::max_offset(
            self.state.max_width,
            self.content_width(config),
            config.gutter_width(),
        )
    }

    /// Assemble the next frame.
    ///
    /// Returns [`Frame::End`] without touching the output when the cursor
    /// is already at the end of the slice. On error the cursor is rewound
    /// to where the frame began.
    pub fn render_frame(&mut self, buffer: &TextBuffer, config: &PagerConfig) -> Result<Frame> {
        if self.state.recompute {
            self.state.current_line = self.state.checkpoint_line;
            self.state.resume_offset = self.state.checkpoint_offset;
            self.state.recompute = false;
        }

        let bound = self.state.upper_bound.min(buffer.len());
        if self.state.current_line >= bound {
            return Ok(Frame::End);
        }

        self.state.checkpoint_line = self.state.current_line;
        self.state.checkpoint_offset = self.state.resume_offset;
        self.state.max_width = 0;
        self.out.clear();

        match self.assemble(buffer, config, bound) {
            Ok(rows) => {
                self.state.frames_rendered += 1;
                debug!(
                    start = self.state.checkpoint_line,
                    next = self.state.current_line,
                    rows,
                    bytes = self.out.len(),
                    "frame assembled"
                );
                Ok(Frame::Rendered { rows })
            }
            Err(err) => {
                self.state.current_line = self.state.checkpoint_line;
                self.state.resume_offset = self.state.checkpoint_offset;
                self.out.clear();
                Err(err)
            }
        }
    }

    fn assemble(&mut self, buffer: &TextBuffer, config: &PagerConfig, bound: usize) -> Result<usize> {
        let at_top = self.state.frames_rendered == 0
            && self.state.current_line == 0
            && self.state.resume_offset == 0;
        if !at_top {
            ansi::cursor_home(&mut self.out)?;
        }

        let rows = match config.layout_mode() {
            LayoutMode::Truncate => self.truncate_rows(buffer, config, bound)?,
            LayoutMode::Wrap => self.wrap_rows(buffer, config, bound)?,
        };

        // Blank the rest so a shorter page does not leave stale text
        for _ in rows..self.viewport.rows {
            ansi::end_row(&mut self.out)?;
        }
        Ok(rows)
    }

    fn truncate_rows(&mut self, buffer: &TextBuffer, config: &PagerConfig, bound: usize) -> Result<usize> {
        let width = self.content_width(config);
        let mut rows = 0;

        while rows < self.viewport.rows && self.state.current_line < bound {
            let index = self.state.current_line;
            let Some(line) = buffer.line(index) else { break };

            let expanded = layout::expand_tabs(line.as_bytes(), config.tab_width())?;
            self.state.max_width = self.state.max_width.max(expanded.len());

            if config.line_numbers() {
                layout::write_gutter(&mut self.out, GutterCell::Number(index + 1))?;
            }
            self.out.append(layout::visible_slice(&expanded, self.offset, width))?;
            ansi::end_row(&mut self.out)?;

            self.state.current_line += 1;
            self.state.resume_offset = 0;
            rows += 1;
        }
        Ok(rows)
    }

    fn wrap_rows(&mut self, buffer: &TextBuffer, config: &PagerConfig, bound: usize) -> Result<usize> {
        let width = self.content_width(config);
        let mut rows = 0;

        while rows < self.viewport.rows && self.state.current_line < bound {
            let index = self.state.current_line;
            let Some(line) = buffer.line(index) else { break };
            let bytes = line.as_bytes();
            let mut pos = self.state.resume_offset;

            loop {
                if config.line_numbers() {
                    let cell = if pos == 0 {
                        GutterCell::Number(index + 1)
                    } else {
                        GutterCell::Continuation
                    };
                    layout::write_gutter(&mut self.out, cell)?;
                }
                pos = layout::fill_row(bytes, pos, width, config.tab_width(), &mut self.out)?;
                ansi::end_row(&mut self.out)?;
                rows += 1;

                if pos >= bytes.len() {
                    self.state.current_line += 1;
                    self.state.resume_offset = 0;
                    break;
                }
                if rows == self.viewport.rows {
                    // Out of rows mid-line: the next frame picks up here
                    self.state.resume_offset = pos;
                    break;
                }
            }
        }
        Ok(rows)
    }
}

// =============================================================================
// Tests
// =============================================================================
