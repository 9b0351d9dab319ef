//! The `file` module is for types and concepts strictly related to MIDI *files*: the header,
//! the timing division, and the per-track event stream.

mod division;
mod event;
mod header;
mod meta_event;
mod track;

pub use division::{Division, FrameRate, SmpteRate};
pub use event::{ChannelEvent, Event, Note, TrackEvent};
pub use header::{Format, Header};
pub use meta_event::{MetaEvent, MetaKind};
pub use track::Track;
