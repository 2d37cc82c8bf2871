#![warn(clippy::pedantic)]
//! Drives a [`vtcompositor::Compositor`] and a [`vtoutput::Emitter`] into a
//! minimal, diff-based realization of touched cells.
//!
//! Grounded directly on
//! `examples/original_source/source/TUIOutputBase.h`/`.cpp`: [`Realizer`] is
//! `TUIOutputBase` generalised from a fixed `FILE *`/`TUIDisplayCompositor &`
//! pair bound at construction to borrowed arguments passed per call, since a
//! realizer here doesn't own a terminal file descriptor; whatever embeds
//! this crate (the `vtio` facade, in this workspace) does, and threads the
//! ioctl-derived size and the raw byte sink in.

mod frame;
mod options;
mod realizer;

pub use frame::FrameSource;
pub use options::Options;
pub use realizer::Realizer;
