use crate::chunk::{Chunk, ChunkKind};
use crate::core::{Channel, StatusType};
use crate::cursor::Cursor;
use crate::error::{NoRunningStatusSnafu, Result, UnterminatedTrackSnafu};
use crate::file::{ChannelEvent, Event, MetaEvent, MetaKind, TrackEvent};
use crate::vlq::Vlq;
use log::{debug, trace, warn};
use snafu::OptionExt;

/// `0xFF`: File Spec: all meta-events begin with FF, then have an event type byte (which is
/// always less than 128).
const META_EVENT: u8 = 0xFF;

/// `0xF0`: File Spec: `F0 <length> <bytes to be transmitted after F0>`
const SYSEX_F0: u8 = 0xF0;

/// `0xF7`: File Spec: `F7 <length> <all bytes to be transmitted>`
const SYSEX_F7: u8 = 0xF7;

/// 2.3 - Track Chunks
/// The track chunks (type MTrk) are where actual song data is stored. Each track chunk is
/// simply a stream of MIDI events (and non-MIDI events), preceded by delta-time values. The
/// format for track chunks is exactly the same for all three formats (0, 1, and 2) of MIDI
/// files.
///
/// The decoded track holds every event up to, but excluding, the mandatory End of Track meta
/// event that terminated it.
#[derive(Clone, Debug, Default, Eq, Ord, PartialEq, PartialOrd, Hash)]
pub struct Track {
    events: Vec<TrackEvent>,
}

impl Track {
    /// Returns `true` if the track has no events.
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// The number of events in the track.
    pub fn events_len(&self) -> usize {
        self.events.len()
    }

    /// Iterator over the events in the track.
    pub fn events(&self) -> impl Iterator<Item = &TrackEvent> {
        self.events.iter()
    }

    /// The event at `index`, if the track is that long.
    pub fn event(&self, index: usize) -> Option<&TrackEvent> {
        self.events.get(index)
    }

    /// Decode one track chunk's payload into its event sequence.
    ///
    /// This is the running-status state machine. Each iteration decodes a variable-length
    /// delta-time and then dispatches on the next byte: a meta event marker, a sysex or
    /// system byte (skipped), a new channel status byte, or a bare data byte that reuses the
    /// running status. Running status is local to this one call; it never leaks between
    /// tracks. `index` is the zero-based track number, used only for diagnostics.
    pub(crate) fn decode(bytes: &[u8], chunk: &Chunk, index: usize) -> Result<Self> {
        debug_assert_eq!(ChunkKind::Track, chunk.kind());
        let mut cursor = Cursor::with_range(bytes, chunk.start(), chunk.end());
        let mut running_status: Option<(StatusType, Channel)> = None;
        let mut events = Vec::new();
        loop {
            if cursor.is_end() {
                return UnterminatedTrackSnafu {
                    track: index,
                    offset: cursor.position(),
                }
                .fail();
            }
            let offset = cursor.position();
            let delta_time = Vlq::parse(&mut cursor)?.value();
            trace!("delta_time {}", delta_time);
            let byte = cursor.read_u8()?;
            match byte {
                META_EVENT => {
                    let meta = MetaEvent::parse(&mut cursor)?;
                    if meta.kind() == MetaKind::EndOfTrack {
                        debug!("end of track event");
                        if let Some(next) = cursor.peek_u8() {
                            warn!(
                                "track {}: ignoring {} byte(s) after the End of Track event, \
                                 starting with {:#04x}",
                                index,
                                cursor.remaining(),
                                next
                            );
                        }
                        break;
                    }
                    events.push(TrackEvent::new(delta_time, offset, Event::Meta(meta)));
                }
                SYSEX_F0 | SYSEX_F7 => {
                    // not part of this decoder's event model: hop over the length-prefixed
                    // payload. a sysex also cancels any running status.
                    let length = Vlq::parse(&mut cursor)?.value();
                    trace!("skipping {} byte sysex at position {}", length, offset);
                    cursor.skip(length as usize)?;
                    running_status = None;
                }
                0xF1..=0xFE => {
                    // system common bytes have no business in a track chunk, but some files
                    // carry them anyway. hop over their fixed data bytes.
                    warn!(
                        "track {}: skipping system byte {:#04x} at position {}",
                        index, byte, offset
                    );
                    cursor.skip(system_data_len(byte))?;
                    running_status = None;
                }
                0x80..=0xEF => {
                    let (status, channel) = split_status_byte(byte);
                    let event = ChannelEvent::decode(&mut cursor, status, channel, None)?;
                    running_status = Some((status, channel));
                    trace!("parsed {:?}", event);
                    events.push(TrackEvent::new(delta_time, offset, Event::Channel(event)));
                }
                first_data => {
                    // no status byte: reuse the running status, and the byte just read is the
                    // event's first data byte
                    let (status, channel) = running_status.context(NoRunningStatusSnafu {
                        track: index,
                        offset,
                    })?;
                    trace!("running status {:?} on channel {}", status, channel);
                    let event =
                        ChannelEvent::decode(&mut cursor, status, channel, Some(first_data))?;
                    events.push(TrackEvent::new(delta_time, offset, Event::Channel(event)));
                }
            }
        }
        Ok(Self { events })
    }
}

/// Splits a channel voice status byte into its status nibble and channel nibble. Callers
/// guarantee `byte` is in `0x80..=0xEF`.
fn split_status_byte(byte: u8) -> (StatusType, Channel) {
    let status = match StatusType::from_nibble(byte >> 4) {
        Some(status) => status,
        // the dispatcher's match arm admits only channel voice status bytes
        None => unreachable!("not a channel voice status byte: {:#04x}", byte),
    };
    (status, Channel::new(byte))
}

/// Data byte counts for the system common messages, `0xF1` through `0xF6` (`0xF8` and above
/// are realtime and carry no data).
fn system_data_len(byte: u8) -> usize {
    match byte {
        0xF1 | 0xF3 => 1,
        0xF2 => 2,
        _ => 0,
    }
}
