//! Display configuration.
//!
//! The pager has two independent switches (wrap and line numbers) plus a
//! tab width. The switches live in a [`DisplayFlags`] bitset; the layout
//! mode the paginator uses is derived from the `WRAP` bit.

use crate::error::{PagerError, Result};

// =============================================================================
// Defaults
// =============================================================================

/// Default tab stop.
pub const DEFAULT_TAB_WIDTH: usize = 4;

/// Width of the line-number gutter, including the separating space.
pub const GUTTER_WIDTH: usize = 6;

/// Marker shown in the gutter on wrapped continuation rows.
pub const CONTINUATION_MARKER: &[u8; 3] = b"...";

// =============================================================================
// Flags
// =============================================================================

bitflags::bitflags! {
    /// Display switches.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct DisplayFlags: u8 {
        /// Long lines continue on the following rows.
        const WRAP = 1 << 0;
        /// Show a gutter with 1-based line numbers.
        const LINE_NUMBERS = 1 << 1;
    }
}

/// How one buffer line maps onto screen rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayoutMode {
    /// One line per row, horizontally scrollable.
    Truncate,
    /// A line may span several rows.
    Wrap,
}

// =============================================================================
// PagerConfig
// =============================================================================

/// User-facing display configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PagerConfig {
    tab_width: usize,
    flags: DisplayFlags,
}

impl PagerConfig {
    pub fn new(tab_width: usize, flags: DisplayFlags) -> Result<Self> {
        let mut config = Self {
            tab_width: DEFAULT_TAB_WIDTH,
            flags,
        };
        config.set_tab_width(tab_width)?;
        Ok(config)
    }

    #[inline]
    pub fn tab_width(&self) -> usize {
        self.tab_width
    }

    #[inline]
    pub fn flags(&self) -> DisplayFlags {
        self.flags
    }

    pub fn layout_mode(&self) -> LayoutMode {
        if self.flags.contains(DisplayFlags::WRAP) {
            LayoutMode::Wrap
        } else {
            LayoutMode::Truncate
        }
    }

    #[inline]
    pub fn line_numbers(&self) -> bool {
        self.flags.contains(DisplayFlags::LINE_NUMBERS)
    }

    /// Columns taken by the gutter (0 when numbers are off).
    pub fn gutter_width(&self) -> usize {
        if self.line_numbers() { GUTTER_WIDTH } else { 0 }
    }

    pub fn set_wrap(&mut self, on: bool) {
        self.flags.set(DisplayFlags::WRAP, on);
    }

    pub fn set_numbers(&mut self, on: bool) {
        self.flags.set(DisplayFlags::LINE_NUMBERS, on);
    }

    /// Tab stops must be at least one column apart.
    pub fn set_tab_width(&mut self, width: usize) -> Result<()> {
        if width == 0 {
            return Err(PagerError::InvalidArgument(
                "tab width must be at least 1".to_string(),
            ));
        }
        self.tab_width = width;
        Ok(())
    }
}

impl Default for PagerConfig {
    fn default() -> Self {
        Self {
            tab_width: DEFAULT_TAB_WIDTH,
            flags: DisplayFlags::WRAP,
        }
    }
}
