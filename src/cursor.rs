use crate::error::{OutOfBoundsSnafu, Result};
use log::trace;
use snafu::ensure;

/// A bounds-checked sequential reader over the input buffer. The cursor holds a shared
/// reference to the caller's bytes and never copies or mutates them. Positions are always
/// absolute buffer offsets, even when the cursor is confined to one chunk's byte range, so
/// that error messages point at the real location in the file.
///
/// Every read checks the remaining range first and fails with [`crate::Error::OutOfBounds`]
/// rather than truncating or wrapping.
#[derive(Debug)]
pub(crate) struct Cursor<'a> {
    bytes: &'a [u8],
    position: usize,
    /// Exclusive upper bound for reads. Equal to `bytes.len()` for a whole-buffer cursor,
    /// or to the end of a chunk's payload for a range cursor.
    end: usize,
}

impl<'a> Cursor<'a> {
    pub(crate) fn new(bytes: &'a [u8]) -> Self {
        Self {
            bytes,
            position: 0,
            end: bytes.len(),
        }
    }

    /// A cursor confined to `start..end` of `bytes`. Positions remain absolute.
    pub(crate) fn with_range(bytes: &'a [u8], start: usize, end: usize) -> Self {
        debug_assert!(start <= end);
        debug_assert!(end <= bytes.len());
        Self {
            bytes,
            position: start,
            end,
        }
    }

    pub(crate) fn position(&self) -> usize {
        self.position
    }

    /// The number of bytes left before the cursor's end bound.
    pub(crate) fn remaining(&self) -> usize {
        self.end.saturating_sub(self.position)
    }

    pub(crate) fn is_end(&self) -> bool {
        self.position >= self.end
    }

    fn check(&self, wanted: usize) -> Result<()> {
        ensure!(
            wanted <= self.remaining(),
            OutOfBoundsSnafu {
                offset: self.position,
                wanted,
                end: self.end,
            }
        );
        Ok(())
    }

    pub(crate) fn read_u8(&mut self) -> Result<u8> {
        self.check(1)?;
        let value = self.bytes[self.position];
        trace!("read {:#04x} at position {}", value, self.position);
        self.position += 1;
        Ok(value)
    }

    /// The next byte without advancing the cursor, or `None` at the end bound.
    pub(crate) fn peek_u8(&self) -> Option<u8> {
        if self.is_end() {
            None
        } else {
            Some(self.bytes[self.position])
        }
    }

    /// Reads `num_bytes` as a borrowed slice of the underlying buffer.
    pub(crate) fn read_bytes(&mut self, num_bytes: usize) -> Result<&'a [u8]> {
        self.check(num_bytes)?;
        let bytes = &self.bytes[self.position..self.position + num_bytes];
        self.position += num_bytes;
        Ok(bytes)
    }

    pub(crate) fn read_u16(&mut self) -> Result<u16> {
        let bytes = self.read_bytes(2)?;
        Ok(u16::from_be_bytes([bytes[0], bytes[1]]))
    }

    pub(crate) fn read_u32(&mut self) -> Result<u32> {
        let bytes = self.read_bytes(4)?;
        Ok(u32::from_be_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]))
    }

    /// Advances past `num_bytes` without inspecting them.
    pub(crate) fn skip(&mut self, num_bytes: usize) -> Result<()> {
        self.check(num_bytes)?;
        trace!("skipping {} byte(s) at position {}", num_bytes, self.position);
        self.position += num_bytes;
        Ok(())
    }
}
