#![warn(clippy::pedantic)]
//! Wires the producer pipeline (bytes → [`vtutf8`] → [`vtdecode`] →
//! [`vtterm`] → [`vtscreen`]) and the consumer pipeline ([`vtscreen`] →
//! [`vtcompositor`] → [`vttui`] → [`vtoutput`]) into a single [`Session`]
//! type, and hosts the `tracing` setup and the demonstration binaries under
//! `demos/`.
//!
//! This crate owns no terminal-specific logic of its own; every module
//! letter from §2's dependency table lives in its own crate, and this is the
//! glue that assumes they all exist. See `DESIGN.md` for the grounding
//! ledger and `SPEC_FULL.md` §4.K for this facade's contract.

mod event_source;
mod exit;
mod session;

pub use event_source::{EventSource, SessionEvent};
pub use exit::ExitCode;
pub use session::Session;
