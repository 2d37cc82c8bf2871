#![warn(clippy::pedantic)]
//! Emits ECMA-48/DEC VT/xterm byte sequences honouring a
//! [`vtcap::CapabilityDescriptor`].
//!
//! The colour downsampler in [`colour::sgr_colour`] is a close translation of
//! `ECMA48Output::SGRColour`'s three-tier optimisation search, and
//! [`Emitter`] reproduces the rest of that file's command emitters generic
//! over any [`std::io::Write`] rather than a fixed `FILE*`.

mod colour;
mod emitter;

pub use colour::sgr_colour;
pub use emitter::Emitter;
