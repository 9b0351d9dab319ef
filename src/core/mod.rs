/*!
The `core` module is for types and concepts that are *not* strictly related to MIDI *files*.
These types describe channel voice messages as they exist on the wire and could serve realtime
MIDI equally well.
!*/

mod numbers;
mod status_type;

pub use numbers::{Channel, NoteNumber, Velocity};
pub use status_type::StatusType;
