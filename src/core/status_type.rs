/// Represents the channel voice status byte types in Table I "Summary of Status Bytes" from
/// the MIDI specification. The high nibble of a status byte selects the type; the low nibble
/// is the channel. System messages (`0xF_`) are not represented here, they are dispatched
/// before the status byte is split.
#[repr(u8)]
#[derive(Clone, Copy, Debug, Eq, Ord, PartialEq, PartialOrd, Hash)]
pub enum StatusType {
    /// `0x8`: a `Note Off` message.
    NoteOff = 0x8,

    /// `0x9`: a `Note On (a velocity of 0 = Note Off)` message.
    NoteOn = 0x9,

    /// `0xA`: a `Polyphonic key pressure/Aftertouch` message.
    PolyPressure = 0xA,

    /// `0xB`: a `Control change` message or a `Channel Mode` message, differentiated by the
    /// first data byte (121 to 127 for Channel Mode messages).
    Control = 0xB,

    /// `0xC`: a `Program change` message.
    Program = 0xC,

    /// `0xD`: a `Channel pressure/After touch` message.
    ChannelPressure = 0xD,

    /// `0xE`: a `Pitch bend change` message.
    PitchBend = 0xE,
}

impl Default for StatusType {
    fn default() -> Self {
        StatusType::NoteOff
    }
}

impl StatusType {
    pub(crate) fn from_nibble(nibble: u8) -> Option<Self> {
        match nibble {
            0x8 => Some(StatusType::NoteOff),
            0x9 => Some(StatusType::NoteOn),
            0xA => Some(StatusType::PolyPressure),
            0xB => Some(StatusType::Control),
            0xC => Some(StatusType::Program),
            0xD => Some(StatusType::ChannelPressure),
            0xE => Some(StatusType::PitchBend),
            _ => None,
        }
    }

    /// The number of data bytes that follow this status: 1 for `Program` and
    /// `ChannelPressure`, 2 for everything else.
    pub fn data_len(&self) -> usize {
        match self {
            StatusType::Program | StatusType::ChannelPressure => 1,
            _ => 2,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nibbles_round_trip() {
        for nibble in 0x8..=0xE {
            let status = StatusType::from_nibble(nibble).unwrap();
            assert_eq!(nibble, status as u8);
        }
        assert!(StatusType::from_nibble(0x7).is_none());
        assert!(StatusType::from_nibble(0xF).is_none());
    }

    #[test]
    fn data_lengths() {
        assert_eq!(2, StatusType::NoteOn.data_len());
        assert_eq!(2, StatusType::PitchBend.data_len());
        assert_eq!(1, StatusType::Program.data_len());
        assert_eq!(1, StatusType::ChannelPressure.data_len());
    }
}
