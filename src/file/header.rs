use crate::chunk::{Chunk, ChunkKind};
use crate::cursor::Cursor;
use crate::error::{InvalidFormatSnafu, Result};
use crate::file::Division;
use crate::Error;
use std::convert::TryFrom;

/// The decoded header chunk: the file's format, the number of track chunks it claims to hold,
/// and the meaning of delta-time ticks.
#[derive(Clone, Copy, Debug, Default, Eq, Ord, PartialEq, PartialOrd, Hash)]
pub struct Header {
    format: Format,
    ntracks: u16,
    division: Division,
}

impl Header {
    /// Decode the 6-byte header payload: format word, track count, division, each a 16-bit
    /// big-endian value.
    pub(crate) fn decode(bytes: &[u8], chunk: &Chunk) -> Result<Self> {
        debug_assert_eq!(ChunkKind::Header, chunk.kind());
        let mut cursor = Cursor::with_range(bytes, chunk.start(), chunk.end());
        let format_word = cursor.read_u16()?;
        let ntracks = cursor.read_u16()?;
        let division_word = cursor.read_u16()?;
        Ok(Self {
            format: Format::from_u16(format_word)?,
            ntracks,
            division: Division::from_u16(division_word)?,
        })
    }

    /// A getter for the `format` field.
    pub fn format(&self) -> &Format {
        &self.format
    }

    /// The number of track chunks the header claims the file holds. The assembled document is
    /// required to match this count.
    pub fn ntracks(&self) -> u16 {
        self.ntracks
    }

    /// A getter for the `division` field.
    pub fn division(&self) -> &Division {
        &self.division
    }
}

/// How the file's tracks are semantically related.
#[repr(u16)]
#[derive(Clone, Copy, Debug, Eq, Ord, PartialEq, PartialOrd, Hash, Default)]
pub enum Format {
    /// 0 the file contains a single multi-channel track
    Single = 0,
    /// 1 the file contains one or more simultaneous tracks (or MIDI outputs) of a sequence
    #[default]
    Multi = 1,
    /// 2 the file contains one or more sequentially independent single-track patterns
    Sequential = 2,
}

impl Format {
    pub(crate) fn from_u16(value: u16) -> Result<Self> {
        match value {
            0 => Ok(Format::Single),
            1 => Ok(Format::Multi),
            2 => Ok(Format::Sequential),
            _ => InvalidFormatSnafu { value }.fail(),
        }
    }
}

impl TryFrom<u16> for Format {
    type Error = Error;

    fn try_from(value: u16) -> Result<Self> {
        Format::from_u16(value)
    }
}
