#![warn(clippy::pedantic)]
//! Value types for a single terminal character cell.
//!
//! Everything in this crate is a plain, `Copy`able value type: colours, SGR
//! attributes, cursor/pointer sprite state, and screen-wide flags. None of it
//! performs I/O or owns a buffer; [`vtscreen`](../vtscreen) and
//! [`vtcompositor`](../vtcompositor) build the owning structures on top.

mod attributes;
mod cell;
mod colour;
mod cursor;

pub use attributes::{Attributes, Underline};
pub use cell::CharacterCell;
pub use colour::{Alpha, Colour};
pub use cursor::{CursorGlyph, CursorSprite, PointerSprite, ScreenFlags};
