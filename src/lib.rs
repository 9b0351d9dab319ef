/*!
This library decodes Standard MIDI Files from an in-memory byte buffer. It does not sequence
or play the music; it turns the binary chunk format into typed data a program can inspect.

A MIDI file is a header chunk followed by track chunks. The header names the file's format,
the number of tracks, and the meaning of delta-time ticks. Each track is a stream of events,
each preceded by a variable-length delta-time, with MIDI's running status convention allowing
a channel message to omit its status byte when the previous one matches.

The entry points are [`MidiFile::parse`] for a buffer you already hold, and [`MidiFile::load`]
to read a file from disk first.

# Example

```
use midi_decode::{Event, MidiFile, StatusType};

// a format 0 file holding a single NoteOn event
let bytes: &[u8] = &[
    0x4D, 0x54, 0x68, 0x64, // MThd
    0x00, 0x00, 0x00, 0x06, // header length 6
    0x00, 0x00, // format 0
    0x00, 0x01, // one track
    0x00, 0x60, // 96 ticks per quarter note
    0x4D, 0x54, 0x72, 0x6B, // MTrk
    0x00, 0x00, 0x00, 0x08, // track length 8
    0x00, 0x90, 0x3C, 0x40, // delta 0, NoteOn channel 0, note 60, velocity 64
    0x00, 0xFF, 0x2F, 0x00, // delta 0, End of Track
];
let file = MidiFile::parse(bytes)?;
assert_eq!(1, file.tracks_len());
let track = file.track(0).unwrap();
match track.event(0).unwrap().event() {
    Event::Channel(event) => {
        assert_eq!(StatusType::NoteOn, event.status());
        assert_eq!(60, event.note().unwrap().number().get());
    }
    _ => panic!("expected a channel event"),
}
# Ok::<(), midi_decode::Error>(())
```
*/

mod chunk;
mod core;
mod cursor;
mod error;
mod file;
mod vlq;

pub use crate::chunk::{Chunk, ChunkKind};
pub use crate::core::{Channel, NoteNumber, StatusType, Velocity};
pub use crate::error::{Error, Result};
pub use crate::file::{
    ChannelEvent, Division, Event, Format, FrameRate, Header, MetaEvent, MetaKind, Note,
    SmpteRate, Track, TrackEvent,
};
pub use crate::vlq::{Vlq, MAX_VLQ_VALUE};

use crate::error::{FileOpenSnafu, FileTooLargeSnafu, TrackCountMismatchSnafu};
use log::debug;
use snafu::{ensure, ResultExt};
use std::fs;
use std::path::Path;

/// The largest file [`MidiFile::load`] will read, 5 MiB. Real-world MIDI files are far
/// smaller; anything beyond this is almost certainly not a MIDI file. [`MidiFile::parse`]
/// does not enforce a limit, the caller already chose to hold the buffer.
pub const DEFAULT_MAX_FILE_SIZE: u64 = 5 * 1024 * 1024;

/// A fully decoded MIDI file: the header and every track, in file order.
#[derive(Clone, Debug, Default, Eq, Ord, PartialEq, PartialOrd, Hash)]
pub struct MidiFile {
    header: Header,
    tracks: Vec<Track>,
}

impl MidiFile {
    /// Decode a MIDI file from bytes already in memory.
    ///
    /// The buffer is read, never mutated, and nothing of it is retained: the returned value
    /// owns its data. Decoding is all-or-nothing; any malformation fails the whole parse with
    /// an [`Error`] locating the problem.
    pub fn parse(bytes: &[u8]) -> Result<Self> {
        let chunks = chunk::locate_chunks(bytes)?;
        // locate_chunks guarantees the header chunk is first
        let header = Header::decode(bytes, &chunks[0])?;
        debug!(
            "decoding {:?} file, {} declared track(s), division {:?}",
            header.format(),
            header.ntracks(),
            header.division()
        );
        let mut tracks = Vec::new();
        for chunk in chunks.iter().filter(|c| c.kind() == ChunkKind::Track) {
            let track = Track::decode(bytes, chunk, tracks.len())?;
            tracks.push(track);
        }
        ensure!(
            tracks.len() == usize::from(header.ntracks()),
            TrackCountMismatchSnafu {
                declared: header.ntracks(),
                found: tracks.len(),
                tracks,
            }
        );
        Ok(Self { header, tracks })
    }

    /// Read a file from disk and decode it, refusing files larger than
    /// [`DEFAULT_MAX_FILE_SIZE`].
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::load_with_limit(path, DEFAULT_MAX_FILE_SIZE)
    }

    /// Read a file from disk and decode it, refusing files larger than `limit` bytes. The
    /// size is checked before the read so an oversized file is never pulled into memory.
    pub fn load_with_limit<P: AsRef<Path>>(path: P, limit: u64) -> Result<Self> {
        let path = path.as_ref();
        let size = fs::metadata(path).context(FileOpenSnafu { path })?.len();
        ensure!(size <= limit, FileTooLargeSnafu { size, limit });
        let bytes = fs::read(path).context(FileOpenSnafu { path })?;
        Self::parse(&bytes)
    }

    /// A getter for the `header` field.
    pub fn header(&self) -> &Header {
        &self.header
    }

    /// The number of decoded tracks. Always equal to the header's declared count.
    pub fn tracks_len(&self) -> usize {
        self.tracks.len()
    }

    /// Iterator over the tracks, in file order.
    pub fn tracks(&self) -> impl Iterator<Item = &Track> {
        self.tracks.iter()
    }

    /// The track at `index`, if the file has that many.
    pub fn track(&self, index: usize) -> Option<&Track> {
        self.tracks.get(index)
    }

    /// In a [`Format::Multi`] file the first track is, by convention, the tempo map: the track
    /// carrying the tempo and time signature meta events for the whole sequence. `None` for
    /// the other formats, where no track has that role.
    pub fn tempo_track(&self) -> Option<&Track> {
        match self.header.format() {
            Format::Multi => self.tracks.first(),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn minimal_file(format: u16, declared_tracks: u16, track_payloads: &[&[u8]]) -> Vec<u8> {
        let mut bytes = b"MThd".to_vec();
        bytes.extend_from_slice(&6u32.to_be_bytes());
        bytes.extend_from_slice(&format.to_be_bytes());
        bytes.extend_from_slice(&declared_tracks.to_be_bytes());
        bytes.extend_from_slice(&96u16.to_be_bytes());
        for payload in track_payloads {
            bytes.extend_from_slice(b"MTrk");
            bytes.extend_from_slice(&(payload.len() as u32).to_be_bytes());
            bytes.extend_from_slice(payload);
        }
        bytes
    }

    const EMPTY_TRACK: &[u8] = &[0x00, 0xFF, 0x2F, 0x00];

    #[test]
    fn parse_assembles_all_tracks() {
        let bytes = minimal_file(1, 2, &[EMPTY_TRACK, EMPTY_TRACK]);
        let file = MidiFile::parse(&bytes).unwrap();
        assert_eq!(Format::Multi, *file.header().format());
        assert_eq!(2, file.tracks_len());
        assert!(file.tempo_track().is_some());
    }

    #[test]
    fn track_count_mismatch_keeps_tracks() {
        let bytes = minimal_file(1, 3, &[EMPTY_TRACK, EMPTY_TRACK]);
        let err = MidiFile::parse(&bytes).unwrap_err();
        match &err {
            Error::TrackCountMismatch {
                declared, found, ..
            } => {
                assert_eq!(3, *declared);
                assert_eq!(2, *found);
            }
            other => panic!("wrong variant, got {:?}", other),
        }
        assert_eq!(2, err.decoded_tracks().len());
    }

    #[test]
    fn single_format_has_no_tempo_track() {
        let bytes = minimal_file(0, 1, &[EMPTY_TRACK]);
        let file = MidiFile::parse(&bytes).unwrap();
        assert!(file.tempo_track().is_none());
    }
}
