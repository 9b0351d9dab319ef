/// Represents the MIDI channel. The channel lives in the low four bits of a status byte, so
/// the valid range is 0 through 15. Out-of-range values are masked to the low four bits.
#[derive(Clone, Copy, Debug, Default, Eq, Ord, PartialEq, PartialOrd, Hash)]
pub struct Channel(u8);

impl Channel {
    /// Masks `value` to the low four bits.
    pub const fn new(value: u8) -> Self {
        Self(value & 0x0F)
    }

    /// Returns the inner value.
    pub const fn get(&self) -> u8 {
        self.0
    }
}

/// Represents the MIDI note number (`C4` is `60`, for example). A note number is a data byte
/// and thus a `u7`, 0 through 127. Out-of-range values are masked to seven bits.
#[derive(Clone, Copy, Debug, Default, Eq, Ord, PartialEq, PartialOrd, Hash)]
pub struct NoteNumber(u8);

impl NoteNumber {
    /// Masks `value` to seven bits.
    pub const fn new(value: u8) -> Self {
        Self(value & 0x7F)
    }

    /// Returns the inner value.
    pub const fn get(&self) -> u8 {
        self.0
    }

    /// The key index on an 88-key piano, where A0 (MIDI note 21) is key 1. This is a computed
    /// projection of the note number, never stored separately. Note numbers below 21 give
    /// zero or negative indices.
    pub const fn piano_key(&self) -> i8 {
        self.0 as i8 - 20
    }
}

/// Represents the MIDI velocity, a `u7`, 0 through 127. Out-of-range values are masked to
/// seven bits. A `NoteOn` velocity of 0 is commonly used to mean `NoteOff`; this library does
/// not collapse the two, that normalization belongs to the consumer.
#[derive(Clone, Copy, Debug, Default, Eq, Ord, PartialEq, PartialOrd, Hash)]
pub struct Velocity(u8);

impl Velocity {
    /// Masks `value` to seven bits.
    pub const fn new(value: u8) -> Self {
        Self(value & 0x7F)
    }

    /// Returns the inner value.
    pub const fn get(&self) -> u8 {
        self.0
    }
}

macro_rules! impl_conversions {
    ($symbol:ident) => {
        impl From<u8> for $symbol {
            fn from(value: u8) -> Self {
                Self::new(value)
            }
        }

        impl From<$symbol> for u8 {
            fn from(value: $symbol) -> Self {
                value.get()
            }
        }

        impl std::fmt::Display for $symbol {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                std::fmt::Display::fmt(&self.0, f)
            }
        }
    };
}

impl_conversions!(Channel);
impl_conversions!(NoteNumber);
impl_conversions!(Velocity);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn masking() {
        assert_eq!(0x0F & 0xFF, Channel::new(0xFF).get());
        assert_eq!(0x7F, NoteNumber::new(0xFF).get());
        assert_eq!(0, Velocity::new(0x80).get());
    }

    #[test]
    fn piano_keys() {
        assert_eq!(1, NoteNumber::new(21).piano_key()); // A0
        assert_eq!(40, NoteNumber::new(60).piano_key()); // C4
        assert_eq!(88, NoteNumber::new(108).piano_key()); // C8
    }
}
