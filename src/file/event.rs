use crate::core::{Channel, NoteNumber, StatusType, Velocity};
use crate::cursor::Cursor;
use crate::error::Result;
use crate::file::MetaEvent;

/// <MTrk event> = <delta-time> <event>
///
/// <delta-time> is stored as a variable-length quantity. It represents the amount of time
/// before the following event. If the first event in a track occurs at the very beginning of
/// a track, or if two events occur simultaneously, a delta-time of zero is used. Delta-times
/// are always present. Delta-time is in ticks as specified in the header chunk.
#[derive(Clone, Debug, Default, Eq, Ord, PartialEq, PartialOrd, Hash)]
pub struct TrackEvent {
    delta_time: u32,
    /// Absolute buffer offset of the event's delta-time, kept for diagnostics.
    offset: usize,
    event: Event,
}

impl TrackEvent {
    pub(crate) fn new(delta_time: u32, offset: usize, event: Event) -> Self {
        Self {
            delta_time,
            offset,
            event,
        }
    }

    pub fn delta_time(&self) -> u32 {
        self.delta_time
    }

    /// The absolute byte offset at which this event's delta-time began.
    pub fn offset(&self) -> usize {
        self.offset
    }

    pub fn event(&self) -> &Event {
        &self.event
    }
}

/// <event> = <MIDI event> | <meta-event>
///
/// Sysex events are skipped during decoding and do not appear here.
#[derive(Clone, Debug, Eq, Ord, PartialEq, PartialOrd, Hash)]
pub enum Event {
    /// <MIDI event> is any MIDI channel message. Running status is used.
    Channel(ChannelEvent),
    /// <meta-event> specifies non-MIDI information useful to this format or to sequencers.
    Meta(MetaEvent),
}

impl Default for Event {
    fn default() -> Self {
        Event::Meta(MetaEvent::default())
    }
}

/// A channel voice message: the status type, the channel, and the one or two data bytes the
/// status mandates.
#[derive(Clone, Copy, Debug, Eq, Ord, PartialEq, PartialOrd, Hash)]
pub struct ChannelEvent {
    status: StatusType,
    channel: Channel,
    /// The second byte is only meaningful when the status takes two data bytes.
    data: [u8; 2],
}

impl ChannelEvent {
    /// Read the event's data bytes. When decoding under running status the first data byte
    /// has already been consumed by the dispatcher and arrives as `first_data`.
    pub(crate) fn decode(
        cursor: &mut Cursor<'_>,
        status: StatusType,
        channel: Channel,
        first_data: Option<u8>,
    ) -> Result<Self> {
        let mut data = [0u8; 2];
        data[0] = match first_data {
            Some(byte) => byte,
            None => cursor.read_u8()?,
        };
        if status.data_len() == 2 {
            data[1] = cursor.read_u8()?;
        }
        Ok(Self {
            status,
            channel,
            data,
        })
    }

    pub fn status(&self) -> StatusType {
        self.status
    }

    pub fn channel(&self) -> Channel {
        self.channel
    }

    /// The data bytes. The length is fixed by the status: 1 for `Program` and
    /// `ChannelPressure`, 2 for everything else.
    pub fn data(&self) -> &[u8] {
        &self.data[..self.status.data_len()]
    }

    /// For `NoteOn` and `NoteOff` events, the note the data bytes describe. `None` for every
    /// other status. A `NoteOn` with velocity 0 is reported as-is, not as a `NoteOff`.
    pub fn note(&self) -> Option<Note> {
        match self.status {
            StatusType::NoteOn | StatusType::NoteOff => Some(Note {
                number: NoteNumber::new(self.data[0]),
                velocity: Velocity::new(self.data[1]),
            }),
            _ => None,
        }
    }
}

/// The note data carried by a `NoteOn` or `NoteOff` event. Derived from the event's data
/// bytes on demand; nothing here is stored separately from the event.
#[derive(Clone, Copy, Debug, Default, Eq, Ord, PartialEq, PartialOrd, Hash)]
pub struct Note {
    number: NoteNumber,
    velocity: Velocity,
}

impl Note {
    pub fn number(&self) -> NoteNumber {
        self.number
    }

    pub fn velocity(&self) -> Velocity {
        self.velocity
    }
}
