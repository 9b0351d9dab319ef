/*!
The `vlq` module implements MIDI's variable-length quantity encoding. A value from `0x00000000`
to `0x0FFFFFFF` is stored in one to four bytes: each byte carries seven bits of the value,
most-significant first, and the high bit of every byte except the last is set to signal that
another byte follows. Delta-times and meta event lengths are stored this way.
!*/

use crate::cursor::Cursor;
use crate::error::{MalformedVlqSnafu, Result};
use snafu::ensure;

/// `0x7f`, 127: the largest 7 bit number.
const MAX_7BIT: u8 = 0b0111_1111;

/// `0x80`, 128: when this bit is set, another byte of the quantity follows.
const CONTINUE: u8 = 0b1000_0000;

/// The largest value a 4-byte quantity can hold.
pub const MAX_VLQ_VALUE: u32 = 0x0FFF_FFFF;

/// A decoded variable-length quantity: the value together with the number of bytes of its
/// encoding.
#[derive(Clone, Copy, Debug, Default, Eq, Ord, PartialEq, PartialOrd, Hash)]
pub struct Vlq {
    value: u32,
    byte_len: usize,
}

impl Vlq {
    /// Create a `Vlq` from a value. Values larger than [`MAX_VLQ_VALUE`] are masked down to
    /// the representable 28 bits.
    pub fn new(value: u32) -> Self {
        let value = value & MAX_VLQ_VALUE;
        Self {
            value,
            byte_len: encoded_len(value),
        }
    }

    /// Decode a quantity from the front of `bytes`.
    pub fn decode(bytes: &[u8]) -> Result<Self> {
        Self::parse(&mut Cursor::new(bytes))
    }

    /// Decode a quantity at the cursor's position. Reads bytes, accumulating seven bits from
    /// each, until a byte without the continuation bit terminates the sequence. A quantity
    /// that has not terminated after four bytes fails with [`crate::Error::MalformedVlq`];
    /// running out of bytes mid-sequence fails with the cursor's out-of-bounds error.
    pub(crate) fn parse(cursor: &mut Cursor<'_>) -> Result<Self> {
        let start = cursor.position();
        let mut value: u32 = 0;
        loop {
            ensure!(
                cursor.position() - start < 4,
                MalformedVlqSnafu { offset: start }
            );
            let byte = cursor.read_u8()?;
            value = (value << 7) | u32::from(byte & MAX_7BIT);
            if byte & CONTINUE == 0 {
                return Ok(Self {
                    value,
                    byte_len: cursor.position() - start,
                });
            }
        }
    }

    /// The decoded value.
    pub fn value(&self) -> u32 {
        self.value
    }

    /// The number of bytes the encoding occupies, 1 through 4.
    pub fn byte_len(&self) -> usize {
        self.byte_len
    }

    /// Encode the value. Retained for tests and for callers that need to reproduce an
    /// encoding; this library does not write MIDI files.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut out = vec![(self.value & u32::from(MAX_7BIT)) as u8];
        let mut rest = self.value >> 7;
        while rest > 0 {
            out.push((rest & u32::from(MAX_7BIT)) as u8 | CONTINUE);
            rest >>= 7;
        }
        out.reverse();
        out
    }
}

impl From<u32> for Vlq {
    fn from(value: u32) -> Self {
        Self::new(value)
    }
}

impl From<Vlq> for u32 {
    fn from(vlq: Vlq) -> Self {
        vlq.value
    }
}

const fn encoded_len(value: u32) -> usize {
    match value {
        0..=0x7F => 1,
        0x80..=0x3FFF => 2,
        0x4000..=0x001F_FFFF => 3,
        _ => 4,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Error;

    fn check(vlq_bytes: &[u8], value: u32) {
        let encoded = Vlq::new(value).to_bytes();
        assert_eq!(vlq_bytes, encoded.as_slice());
        let decoded = Vlq::decode(&encoded).unwrap();
        assert_eq!(value, decoded.value());
        assert_eq!(vlq_bytes.len(), decoded.byte_len());
    }

    #[test]
    fn one_byte() {
        check(&[0x00], 0x00);
        check(&[0x40], 0x40);
        check(&[0x7f], 0x7f);
    }

    #[test]
    fn two_bytes() {
        check(&[0x81, 0x00], 0x80);
        check(&[0xc0, 0x00], 0x2000);
        check(&[0xff, 0x7f], 0x3fff);
    }

    #[test]
    fn three_bytes() {
        check(&[0x81, 0x80, 0x00], 0x4000);
        check(&[0xc0, 0x80, 0x00], 0x10_0000);
        check(&[0xff, 0xff, 0x7f], 0x1f_ffff);
    }

    #[test]
    fn four_bytes() {
        check(&[0x81, 0x80, 0x80, 0x00], 0x20_0000);
        check(&[0xc0, 0x80, 0x80, 0x00], 0x0800_0000);
        check(&[0xff, 0xff, 0xff, 0x7f], 0x0fff_ffff);
    }

    #[test]
    fn five_bytes_is_malformed() {
        let result = Vlq::decode(&[0x81, 0x80, 0x80, 0x80, 0x00]);
        assert!(matches!(result, Err(Error::MalformedVlq { offset: 0 })));
    }

    #[test]
    fn truncated_is_out_of_bounds() {
        let result = Vlq::decode(&[0xff, 0xff]);
        assert!(matches!(result, Err(Error::OutOfBounds { .. })));
    }

    #[test]
    fn trailing_bytes_are_left_alone() {
        let decoded = Vlq::decode(&[0x81, 0x00, 0x55]).unwrap();
        assert_eq!(0x80, decoded.value());
        assert_eq!(2, decoded.byte_len());
    }

    #[test]
    fn oversized_value_is_masked() {
        assert_eq!(MAX_VLQ_VALUE, Vlq::new(u32::MAX).value());
    }
}
