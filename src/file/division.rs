use crate::error::{InvalidDivisionSnafu, InvalidSmpteSnafu, Result};
use crate::Error;
use snafu::ensure;
use std::convert::TryFrom;

const DIVISION_TYPE_BIT: u16 = 0b1000000000000000;

/// Specifies the meaning of the delta-times. It has two formats, one for metrical time, and
/// one for time-code-based time, selected by bit 15 of the header's division field.
#[derive(Clone, Copy, Debug, Eq, Ord, PartialEq, PartialOrd, Hash)]
pub enum Division {
    /// If bit 15 of <division> is a zero, the bits 14 thru 0 represent the number of
    /// delta-time "ticks" which make up a quarter-note. For instance, if <division> is 96,
    /// then a time interval of an eighth-note between two events in the file would be 48.
    /// Must be nonzero.
    QuarterNote(u16),
    /// Frame rate and resolution within the frame.
    Smpte(SmpteRate),
}

impl Default for Division {
    fn default() -> Self {
        Division::QuarterNote(1024)
    }
}

impl Division {
    pub(crate) fn from_u16(value: u16) -> Result<Self> {
        if value & DIVISION_TYPE_BIT == DIVISION_TYPE_BIT {
            // the high byte is a negative frame rate code in two's complement form
            let code = (value >> 8) as u8 as i8;
            Ok(Division::Smpte(SmpteRate {
                frame_rate: FrameRate::from_code(code)?,
                resolution: (value & 0x00FF) as u8,
            }))
        } else {
            ensure!(value != 0, InvalidDivisionSnafu);
            Ok(Division::QuarterNote(value))
        }
    }
}

impl TryFrom<u16> for Division {
    type Error = Error;

    fn try_from(value: u16) -> Result<Self> {
        Division::from_u16(value)
    }
}

/// <division> Bits 14 thru 8 contain one of the four values -24, -25, -29, or -30,
/// corresponding to the four standard SMPTE and MIDI time code formats (-29 corresponds to 30
/// drop frame), and represents the number of frames per second. These negative numbers are
/// stored in two's complement form.
#[derive(Clone, Copy, Debug, Eq, Ord, PartialEq, PartialOrd, Hash)]
pub enum FrameRate {
    /// 24 frames per second
    N24,
    /// 25 frames per second
    N25,
    /// 30 drop
    N29,
    /// 30 frames per second
    N30,
}

impl Default for FrameRate {
    fn default() -> Self {
        FrameRate::N24
    }
}

impl FrameRate {
    fn from_code(code: i8) -> Result<Self> {
        match code {
            -24 => Ok(FrameRate::N24),
            -25 => Ok(FrameRate::N25),
            -29 => Ok(FrameRate::N29),
            -30 => Ok(FrameRate::N30),
            _ => InvalidSmpteSnafu { code }.fail(),
        }
    }

    /// The frame rate as a positive frames-per-second count.
    pub fn per_second(&self) -> u8 {
        match self {
            FrameRate::N24 => 24,
            FrameRate::N25 => 25,
            FrameRate::N29 => 29,
            FrameRate::N30 => 30,
        }
    }
}

/// Frame rate and resolution within the frame for time-code-based tracks.
#[derive(Clone, Copy, Debug, Eq, Ord, PartialEq, PartialOrd, Hash)]
pub struct SmpteRate {
    /// The number of frames per second.
    frame_rate: FrameRate,
    /// The <division> second byte (stored positive) is the resolution within a frame: typical
    /// values may be 4 (MIDI time code resolution), 8, 10, 80 (bit resolution), or 100. This
    /// allows millisecond-based tracks by specifying 25 frames/sec and a resolution of 40
    /// units per frame.
    resolution: u8,
}

impl Default for SmpteRate {
    fn default() -> Self {
        // This is the 'millisecond-based tracks' example given by the spec.
        SmpteRate {
            frame_rate: FrameRate::N25,
            resolution: 40,
        }
    }
}

impl SmpteRate {
    pub fn frame_rate(&self) -> FrameRate {
        self.frame_rate
    }

    pub fn resolution(&self) -> u8 {
        self.resolution
    }

    /// Ticks per second of wall-clock time, the product of the frame rate and the per-frame
    /// resolution.
    pub fn ticks_per_second(&self) -> u32 {
        u32::from(self.frame_rate.per_second()) * u32::from(self.resolution)
    }
}
