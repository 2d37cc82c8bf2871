#![warn(clippy::pedantic)]
//! The persisted screen buffer (§3/§6): a packed header, a flat array of
//! character cells, the narrow write API `vtterm` mutates it through, and
//! the consumer→producer input-message ring.
//!
//! `vtterm` owns margins, modes, tab stops, and the current pen; this crate
//! owns only what must be visible to a realizer reading the shared artefact:
//! cells, cursor/pointer sprites, and screen flags. See `DESIGN.md`'s entry
//! for the ownership split this mirrors from
//! `examples/original_source/source/TUIDisplayCompositor.h`.

mod buffer;
mod codec;
mod error;
mod mapped;

pub use buffer::ScreenBuffer;
pub use codec::{CELL_LEN, HEADER_LEN};
pub use error::DecodeError;
pub use mapped::{InProcessTransport, MappedScreenBuffer, Transport};
