use crate::cursor::Cursor;
use crate::error::Result;
use crate::vlq::Vlq;
use log::trace;
use std::borrow::Cow;

/// Meta events only exist in the MIDI File Spec. Each begins with `0xFF`, then has a type byte
/// (always less than 128) and a variable-length quantity giving the number of payload bytes.
///
/// The payload is kept verbatim: every meta type passes through the decoder, including types
/// it has never heard of. It is not required for every program to support every meta-event,
/// but it *is* required that none of them are lost on the way to the consumer.
#[derive(Clone, Debug, Default, Eq, Ord, PartialEq, PartialOrd, Hash)]
pub struct MetaEvent {
    kind: MetaKind,
    data: Vec<u8>,
}

impl MetaEvent {
    /// Parse a meta event. The caller has already consumed the `0xFF` marker; what remains is
    /// the type byte, a variable-length payload length, and the payload itself.
    pub(crate) fn parse(cursor: &mut Cursor<'_>) -> Result<Self> {
        let type_byte = cursor.read_u8()?;
        let length = Vlq::parse(cursor)?.value();
        let data = cursor.read_bytes(length as usize)?.to_vec();
        let kind = MetaKind::from_u8(type_byte);
        trace!("meta event {:?}, {} payload byte(s)", kind, data.len());
        Ok(Self { kind, data })
    }

    pub fn kind(&self) -> MetaKind {
        self.kind
    }

    /// The raw payload bytes, exactly as they appeared in the file.
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// For the text-carrying kinds (`FF 01` through `FF 09`), the payload as a string. The
    /// file spec does not strictly specify an encoding, so invalid UTF-8 is replaced rather
    /// than rejected. `None` for non-text kinds.
    pub fn text(&self) -> Option<Cow<'_, str>> {
        match self.kind {
            MetaKind::Text
            | MetaKind::Copyright
            | MetaKind::TrackName
            | MetaKind::InstrumentName
            | MetaKind::Lyric
            | MetaKind::Marker
            | MetaKind::CuePoint
            | MetaKind::ProgramName
            | MetaKind::DeviceName => Some(String::from_utf8_lossy(&self.data)),
            _ => None,
        }
    }

    /// For a well-formed `SetTempo` event, the tempo in microseconds per quarter note (a
    /// 24-bit big-endian value). `None` for other kinds or a payload of the wrong size.
    pub fn tempo(&self) -> Option<u32> {
        match (self.kind, self.data.as_slice()) {
            (MetaKind::SetTempo, [a, b, c]) => Some(u32::from_be_bytes([0, *a, *b, *c])),
            _ => None,
        }
    }
}

/// The meta event types named by the MIDI File Spec, plus a fallback for everything else. The
/// kind only classifies the event; the payload always stays with the [`MetaEvent`] as raw
/// bytes.
#[derive(Clone, Copy, Debug, Eq, Ord, PartialEq, PartialOrd, Hash)]
pub enum MetaKind {
    /// `FF 00 02 ssss`: the number of a sequence.
    SequenceNumber,

    /// `FF 01 len text`: any amount of text describing anything.
    Text,

    /// `FF 02 len text`: a copyright notice as printable ASCII text.
    Copyright,

    /// `FF 03 len text`: if in a format 0 track, or the first track in a format 1 file, the
    /// name of the sequence. Otherwise, the name of the track.
    TrackName,

    /// `FF 04 len text`: a description of the type of instrumentation to be used in the track.
    InstrumentName,

    /// `FF 05 len text`: a lyric to be sung.
    Lyric,

    /// `FF 06 len text`: the name of that point in the sequence, such as a rehearsal letter.
    Marker,

    /// `FF 07 len text`: a description of something happening on a film or video screen or
    /// stage at that point in the musical score.
    CuePoint,

    /// `FF 08 len text`: found at http://www.somascape.org/midi/tech/mfile.html
    ProgramName,

    /// `FF 09 len text`: found at http://www.somascape.org/midi/tech/mfile.html
    DeviceName,

    /// `FF 20 01 cc`: associates a MIDI channel with all events which follow.
    ChannelPrefix,

    /// `FF 21 01 pp`: an obsolete port specifier, still written by some sequencers.
    Port,

    /// `FF 2F 00`: this event is not optional. It is included so that an exact ending point
    /// may be specified for the track, so that it has an exact length, which is necessary for
    /// tracks which are looped or concatenated.
    EndOfTrack,

    /// `FF 51 03 tttttt`: Set Tempo, in microseconds per MIDI quarter-note.
    SetTempo,

    /// `FF 54 05 hr mn se fr ff`: the SMPTE time at which the track chunk is supposed to
    /// start.
    SmpteOffset,

    /// `FF 58 04 nn dd cc bb`: the time signature, expressed as four numbers.
    TimeSignature,

    /// `FF 59 02 sf mi`: the key signature, as a count of sharps or flats and a major/minor
    /// flag.
    KeySignature,

    /// `FF 7F len data`: sequencer-specific data behind a manufacturer ID.
    SequencerSpecific,

    /// Any type byte this library does not recognize. The payload passes through untouched.
    Unknown(u8),
}

impl Default for MetaKind {
    fn default() -> Self {
        MetaKind::EndOfTrack
    }
}

impl MetaKind {
    pub fn from_u8(value: u8) -> Self {
        match value {
            0x00 => MetaKind::SequenceNumber,
            0x01 => MetaKind::Text,
            0x02 => MetaKind::Copyright,
            0x03 => MetaKind::TrackName,
            0x04 => MetaKind::InstrumentName,
            0x05 => MetaKind::Lyric,
            0x06 => MetaKind::Marker,
            0x07 => MetaKind::CuePoint,
            0x08 => MetaKind::ProgramName,
            0x09 => MetaKind::DeviceName,
            0x20 => MetaKind::ChannelPrefix,
            0x21 => MetaKind::Port,
            0x2F => MetaKind::EndOfTrack,
            0x51 => MetaKind::SetTempo,
            0x54 => MetaKind::SmpteOffset,
            0x58 => MetaKind::TimeSignature,
            0x59 => MetaKind::KeySignature,
            0x7F => MetaKind::SequencerSpecific,
            other => MetaKind::Unknown(other),
        }
    }

    /// The type byte as it appeared in the file.
    pub fn to_u8(&self) -> u8 {
        match self {
            MetaKind::SequenceNumber => 0x00,
            MetaKind::Text => 0x01,
            MetaKind::Copyright => 0x02,
            MetaKind::TrackName => 0x03,
            MetaKind::InstrumentName => 0x04,
            MetaKind::Lyric => 0x05,
            MetaKind::Marker => 0x06,
            MetaKind::CuePoint => 0x07,
            MetaKind::ProgramName => 0x08,
            MetaKind::DeviceName => 0x09,
            MetaKind::ChannelPrefix => 0x20,
            MetaKind::Port => 0x21,
            MetaKind::EndOfTrack => 0x2F,
            MetaKind::SetTempo => 0x51,
            MetaKind::SmpteOffset => 0x54,
            MetaKind::TimeSignature => 0x58,
            MetaKind::KeySignature => 0x59,
            MetaKind::SequencerSpecific => 0x7F,
            MetaKind::Unknown(other) => *other,
        }
    }
}
