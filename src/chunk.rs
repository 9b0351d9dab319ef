/*!
The `chunk` module locates the header and track chunks inside an undifferentiated byte buffer.
A chunk is a 4-byte ASCII type, a 4-byte big-endian payload length, and that many payload
bytes. Locating is done with structured reads, hopping from one declared length to the next,
never by scanning the buffer for magic strings (which would find false positives inside event
data).
!*/

use crate::cursor::Cursor;
use crate::error::{NotMidiSnafu, Result, TruncatedChunkSnafu};
use log::{debug, warn};
use snafu::ensure;

/// Magic strings are always 4 bytes.
const MAGIC_SIZE: usize = 4;

/// `MThd`: a MIDI file begins with this chunk type.
const HEADER_MAGIC: &[u8; 4] = b"MThd";

/// `MTrk`: the chunk type that holds track event data.
const TRACK_MAGIC: &[u8; 4] = b"MTrk";

/// A header chunk's payload is always 6 bytes, making the header 14 bytes in all.
pub(crate) const HEADER_PAYLOAD_SIZE: usize = 6;

/// The kind of chunk a [`Chunk`] refers to.
#[derive(Clone, Copy, Debug, Eq, Ord, PartialEq, PartialOrd, Hash)]
pub enum ChunkKind {
    /// The `MThd` header chunk.
    Header,
    /// An `MTrk` track chunk.
    Track,
}

/// A located, not yet decoded, region of the input buffer. `start..start + length` is the
/// chunk's payload; the 8-byte type-and-length preamble comes before `start`. Chunks never
/// overlap and are recorded in discovery order.
#[derive(Clone, Copy, Debug, Eq, Ord, PartialEq, PartialOrd, Hash)]
pub struct Chunk {
    kind: ChunkKind,
    start: usize,
    length: usize,
}

impl Chunk {
    pub fn kind(&self) -> ChunkKind {
        self.kind
    }

    /// Absolute offset of the first payload byte.
    pub fn start(&self) -> usize {
        self.start
    }

    /// Payload length in bytes.
    pub fn length(&self) -> usize {
        self.length
    }

    /// Absolute offset one past the last payload byte.
    pub(crate) fn end(&self) -> usize {
        self.start + self.length
    }
}

/// Finds the header chunk and every track chunk in `bytes`. The first chunk of the returned
/// list is always the header. Chunk types other than `MThd` and `MTrk` are skipped over using
/// their declared lengths so that files carrying vendor chunks still decode.
pub(crate) fn locate_chunks(bytes: &[u8]) -> Result<Vec<Chunk>> {
    ensure!(
        bytes.len() >= MAGIC_SIZE && &bytes[..MAGIC_SIZE] == HEADER_MAGIC,
        NotMidiSnafu
    );
    let mut cursor = Cursor::new(bytes);
    cursor.skip(MAGIC_SIZE)?;
    let declared = cursor.read_u32()?;

    // The header payload is always 6 bytes no matter what the length field claims. Padded
    // headers (declared > 6) have the padding skipped; a smaller or garbage value cannot make
    // the scanner re-read payload bytes as a chunk type.
    if declared != HEADER_PAYLOAD_SIZE as u32 {
        warn!(
            "header chunk declares a length of {}, using the fixed {} byte payload",
            declared, HEADER_PAYLOAD_SIZE
        );
    }
    let hop = (declared as usize).max(HEADER_PAYLOAD_SIZE);
    ensure!(
        hop <= cursor.remaining(),
        TruncatedChunkSnafu {
            offset: 0usize,
            declared,
            available: cursor.remaining(),
        }
    );
    let mut chunks = vec![Chunk {
        kind: ChunkKind::Header,
        start: cursor.position(),
        length: HEADER_PAYLOAD_SIZE,
    }];
    cursor.skip(hop)?;

    while !cursor.is_end() {
        let offset = cursor.position();
        let magic = cursor.read_bytes(MAGIC_SIZE)?;
        let length = cursor.read_u32()?;
        ensure!(
            length as usize <= cursor.remaining(),
            TruncatedChunkSnafu {
                offset,
                declared: length,
                available: cursor.remaining(),
            }
        );
        if magic == TRACK_MAGIC {
            debug!(
                "located track chunk {} at byte {}, {} payload byte(s)",
                chunks.len() - 1,
                offset,
                length
            );
            chunks.push(Chunk {
                kind: ChunkKind::Track,
                start: cursor.position(),
                length: length as usize,
            });
        } else {
            warn!(
                "skipping unrecognized chunk type '{}' at byte {}",
                String::from_utf8_lossy(magic),
                offset
            );
        }
        cursor.skip(length as usize)?;
    }
    Ok(chunks)
}
