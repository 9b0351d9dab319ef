use crate::file::Track;
use snafu::Snafu;
use std::path::PathBuf;

/// The public Error type for this library. Every way a decode can fail is a variant here, and
/// each variant carries the context (byte offsets, track indices, offending values) needed to
/// report a precise diagnostic. Decoding is deterministic: the same bytes always produce the
/// same error, so nothing is ever retried.
#[derive(Debug, Snafu)]
#[snafu(visibility(pub(crate)))]
pub enum Error {
    /// The buffer does not begin with the `MThd` magic string.
    #[snafu(display("not a MIDI file: the buffer does not begin with 'MThd'"))]
    NotMidi,

    /// A chunk declared more payload bytes than the buffer holds.
    #[snafu(display(
        "chunk at byte {} declares a length of {} but only {} byte(s) remain",
        offset,
        declared,
        available
    ))]
    TruncatedChunk {
        offset: usize,
        declared: u32,
        available: usize,
    },

    /// A read would pass the end of the buffer, or the end of the current chunk.
    #[snafu(display(
        "cannot read {} byte(s) at position {}, the readable range ends at byte {}",
        wanted,
        offset,
        end
    ))]
    OutOfBounds {
        offset: usize,
        wanted: usize,
        end: usize,
    },

    /// The header's format field was something other than 0, 1 or 2.
    #[snafu(display("invalid MIDI format {}, must be 0, 1 or 2", value))]
    InvalidFormat { value: u16 },

    /// The header declared zero ticks per quarter note.
    #[snafu(display("invalid division: ticks per quarter note must be nonzero"))]
    InvalidDivision,

    /// The header's SMPTE frame rate code was not one of -24, -25, -29 or -30.
    #[snafu(display(
        "invalid SMPTE frame rate code {}, must be -24, -25, -29 or -30",
        code
    ))]
    InvalidSmpte { code: i8 },

    /// A variable-length quantity did not terminate within its 4-byte maximum.
    #[snafu(display(
        "malformed variable-length quantity at byte {}: longer than 4 bytes",
        offset
    ))]
    MalformedVlq { offset: usize },

    /// A data byte appeared where an event should start, with no earlier status byte to reuse.
    #[snafu(display(
        "track {}: data byte at position {} but there is no running status to reuse",
        track,
        offset
    ))]
    NoRunningStatus { track: usize, offset: usize },

    /// The track's bytes ran out before an End of Track meta event.
    #[snafu(display(
        "track {}: byte {} reached before an End of Track event",
        track,
        offset
    ))]
    UnterminatedTrack { track: usize, offset: usize },

    /// The number of decoded tracks disagrees with the header's declared count. The decoded
    /// tracks ride along for diagnostics, but the parse as a whole still fails.
    #[snafu(display("MIDI header declared {} track(s) but found {}", declared, found))]
    TrackCountMismatch {
        declared: u16,
        found: usize,
        tracks: Vec<Track>,
    },

    /// `MidiFile::load` could not open or read the file.
    #[snafu(display("unable to read '{}': {}", path.display(), source))]
    FileOpen {
        path: PathBuf,
        source: std::io::Error,
    },

    /// The file is larger than the maximum that `MidiFile::load` will decode.
    #[snafu(display("file is {} bytes, larger than the {} byte maximum", size, limit))]
    FileTooLarge { size: u64, limit: u64 },
}

impl Error {
    /// For [`Error::TrackCountMismatch`], the tracks that were decoded before the mismatch was
    /// detected. Empty for every other variant.
    pub fn decoded_tracks(&self) -> &[Track] {
        match self {
            Error::TrackCountMismatch { tracks, .. } => tracks,
            _ => &[],
        }
    }
}

/// The public Result type for this library.
pub type Result<T> = std::result::Result<T, Error>;
