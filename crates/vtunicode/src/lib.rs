#![warn(clippy::pedantic)]
//! Unicode classification predicates, a display-width function, and the
//! combining-character tables `vtterm`'s printable-character handling needs.
//!
//! Grounded on `examples/original_source/source/UnicodeClassification.h`'s
//! `UnicodeCategorization` namespace (predicate names and shape); the
//! underlying range tables are a minimal subset covering the scenarios
//! `SPEC_FULL.md` §8 specifies, not a full UCD transcription (see
//! `DESIGN.md`).

mod combine;
mod predicates;
mod width;

pub use combine::{combine_dead_keys, combine_peculiar_non_combiners, combine_unicode, lower_combining_class};
pub use predicates::{
    is_ascii, is_bmp, is_mark_enclosing, is_mark_nonspacing, is_other_control, is_other_format, is_other_surrogate,
    is_wide_or_full,
};
pub use width::width;
