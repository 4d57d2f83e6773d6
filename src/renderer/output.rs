//! Frame output accumulation.
//!
//! A whole frame is assembled in memory and written with a single flush,
//! so the terminal never shows a half-drawn page.

use std::io::{self, Write};

use crate::error::{PagerError, Result};

// =============================================================================
// ByteAssembler
// =============================================================================

/// Minimum capacity step when the assembler runs out of room.
pub const FRAME_INCREMENT: usize = 4096;

/// Append-only byte accumulator for one frame.
///
/// Growth is explicit: when an append does not fit, capacity grows by
/// `max(FRAME_INCREMENT, incoming)`. A single large append therefore never
/// triggers more than one reallocation, and allocation failure is reported
/// instead of aborting.
#[derive(Debug, Default)]
pub struct ByteAssembler {
    data: Vec<u8>,
}

impl ByteAssembler {
    /// Create an empty assembler. No memory is reserved until the first append.
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.data.capacity()
    }

    /// Drop the content, keeping the allocation for the next frame.
    #[inline]
    pub fn clear(&mut self) {
        self.data.clear();
    }

    /// Append `bytes`, growing by `max(FRAME_INCREMENT, bytes.len())` on overflow.
    pub fn append(&mut self, bytes: &[u8]) -> Result<()> {
        if self.data.len() + bytes.len() > self.data.capacity() {
            let grow = FRAME_INCREMENT.max(bytes.len());
            let target = self.data.capacity() + grow;
            self.data.try_reserve_exact(target - self.data.len())?;
        }
        self.data.extend_from_slice(bytes);
        Ok(())
    }

    /// Append `count` copies of `byte`.
    pub fn append_repeated(&mut self, byte: u8, count: usize) -> Result<()> {
        const SPACES: [u8; 64] = [b' '; 64];
        if byte == b' ' {
            let mut left = count;
            while left > 0 {
                let n = left.min(SPACES.len());
                self.append(&SPACES[..n])?;
                left -= n;
            }
            return Ok(());
        }
        for _ in 0..count {
            self.append(&[byte])?;
        }
        Ok(())
    }

    /// Write everything to `writer` in one call and clear.
    pub fn flush_to<W: Write>(&mut self, writer: &mut W) -> Result<()> {
        if self.data.is_empty() {
            return Ok(());
        }
        writer.write_all(&self.data).map_err(PagerError::from)?;
        writer.flush().map_err(PagerError::from)?;
        self.data.clear();
        Ok(())
    }

    /// The assembled bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    /// The assembled bytes as text (lossy), for tests and logging.
    pub fn as_str(&self) -> std::borrow::Cow<'_, str> {
        String::from_utf8_lossy(&self.data)
    }
}

impl Write for ByteAssembler {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.append(buf)
            .map_err(|_| io::Error::from(io::ErrorKind::OutOfMemory))?;
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(()) // Buffering only - real flush via flush_to
    }
}

// =============================================================================
// Tests
// =============================================================================
