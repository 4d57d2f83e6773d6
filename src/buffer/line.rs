//! A single buffer line: raw bytes, no stored terminator.

use std::fmt;

use crate::error::Result;

/// One row of the text buffer.
///
/// The length is the byte count, not the display width. Edits that change
/// the content build a fresh `Line` and swap it in.
#[derive(Clone, Default, PartialEq, Eq, Hash)]
pub struct Line {
    bytes: Vec<u8>,
}

impl Line {
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy `bytes` into a new line, reporting allocation failure.
    pub fn try_from_slice(bytes: &[u8]) -> Result<Self> {
        let mut owned = Vec::new();
        owned.try_reserve_exact(bytes.len())?;
        owned.extend_from_slice(bytes);
        Ok(Self { bytes: owned })
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Byte index of the first occurrence of `needle`, scanning left to right.
    ///
    /// Each candidate position is pre-checked on its first byte before the
    /// full comparison.
    pub fn find(&self, needle: &[u8]) -> Option<usize> {
        let (&first, _) = needle.split_first()?;
        if needle.len() > self.bytes.len() {
            return None;
        }
        (0..=self.bytes.len() - needle.len())
            .find(|&i| self.bytes[i] == first && &self.bytes[i..i + needle.len()] == needle)
    }

    /// Build a copy with `range` replaced by `replacement`.
    pub(crate) fn spliced(
        &self,
        range: std::ops::Range<usize>,
        replacement: &[u8],
    ) -> Result<Self> {
        let mut bytes = Vec::new();
        bytes.try_reserve_exact(self.bytes.len() - range.len() + replacement.len())?;
        bytes.extend_from_slice(&self.bytes[..range.start]);
        bytes.extend_from_slice(replacement);
        bytes.extend_from_slice(&self.bytes[range.end..]);
        Ok(Self { bytes })
    }
}

impl From<Vec<u8>> for Line {
    fn from(bytes: Vec<u8>) -> Self {
        Self { bytes }
    }
}

impl From<&str> for Line {
    fn from(s: &str) -> Self {
        Self {
            bytes: s.as_bytes().to_vec(),
        }
    }
}

impl fmt::Debug for Line {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Line({:?})", String::from_utf8_lossy(&self.bytes))
    }
}
