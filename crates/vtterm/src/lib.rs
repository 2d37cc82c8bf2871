#![warn(clippy::pedantic)]
//! The DEC VT/ECMA-48 virtual-terminal state machine: cursor, margins,
//! modes, tab stops, the SGR pen, and the screen contents they all act on.
//!
//! [`SoftTerm`] consumes already-classified [`vtdecode::Event`]s (a driving
//! loop is expected to push raw bytes through [`vtutf8::Utf8Decoder`] and
//! [`vtdecode::Decoder`] first) via [`SoftTerm::feed_event`], and holds a
//! [`vtscreen::ScreenBuffer`] as its cell storage. It never reads or writes
//! bytes itself except through the narrow [`Host`] callback trait, which
//! covers device-attribute/status responses and keyboard/mouse mode changes;
//! raw I/O is left to whatever embeds this crate.
//!
//! Grounded directly on `examples/original_source/source/SoftTerm.h`/`.cpp`;
//! see `DESIGN.md` for the module-by-module ledger and the final-byte
//! dispatch tables this crate's [`dispatch`] module reproduces.

mod dispatch;
mod edit;
mod host;
mod modes;
mod motion;
mod page;
mod reports;
mod reset;
mod sgr;
mod state;
mod tabs;

pub use host::{Host, NullHost};
pub use state::{Cursor, Modes, Point, Size, SoftTerm};
