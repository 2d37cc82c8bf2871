//! The alpha-tagged colour quadruple and its mapping functions.
//!
//! Grounded on `CharacterCell.h`'s `ColourPair::colour_type` and
//! `MapColours.cpp`'s `Map16Colour`/`Map256Colour`/`MapTrueColour`.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Provenance tag carried alongside a colour's RGB value.
///
/// This is not an alpha-blending channel: it records *why* a colour has the
/// value it has, so that the output emitter (`vtoutput`) can decide how
/// faithfully it needs to reproduce it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[repr(u8)]
pub enum Alpha {
    /// The cell was erased; its colour is a sentinel, not a request.
    Erased = 0,
    /// The cell never had an explicit colour set.
    Default = 1,
    /// Colour was set via one of the 8/16 ECMA-48 indexed colours.
    Ecma16Indexed = 2,
    /// Colour was set via the 256-colour palette.
    Indexed256 = 3,
    /// Colour was set via 24-bit direct RGB.
    TrueColour = 4,
    /// Reserved for the pointer sprite's fixed glyph colour.
    PointerSprite = 31,
}

/// An (alpha, r, g, b) colour quadruple.
///
/// Two colours compare equal iff all four octets match: a default-provenance
/// white and a true-colour white are *not* equal, because they are different
/// requests that happen to render the same.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Colour {
    pub alpha: Alpha,
    pub red: u8,
    pub green: u8,
    pub blue: u8,
}

impl Colour {
    #[must_use]
    pub const fn new(alpha: Alpha, red: u8, green: u8, blue: u8) -> Self {
        Self { alpha, red, green, blue }
    }

    /// The erased-cell foreground, per `ColourPair::erased` in the original:
    /// a dimmed version of the default foreground, still tagged `Erased`.
    pub const ERASED_FOREGROUND: Self = Self::new(Alpha::Erased, 0x80, 0x80, 0x80);
    /// The erased-cell background: a brightened version of black, tagged
    /// `Erased`.
    pub const ERASED_BACKGROUND: Self = Self::new(Alpha::Erased, 0x40, 0x40, 0x40);
    pub const DEFAULT_FOREGROUND: Self = Self::new(Alpha::Default, 0xC0, 0xC0, 0xC0);
    pub const DEFAULT_BACKGROUND: Self = Self::new(Alpha::Default, 0x00, 0x00, 0x00);

    #[must_use]
    pub fn is_default_or_erased(self) -> bool {
        matches!(self.alpha, Alpha::Erased | Alpha::Default)
    }

    #[must_use]
    pub fn is_black(self) -> bool {
        self.red == 0 && self.green == 0 && self.blue == 0
    }

    /// Darken one channel, saturating at zero. `c > 0x40 ? c - 0x40 : 0`.
    #[must_use]
    pub fn dim_channel(c: u8) -> u8 {
        c.saturating_sub(0x40)
    }

    /// Brighten one channel, saturating at 0xFF. `c < 0xC0 ? c + 0x40 : 0xFF`.
    #[must_use]
    pub fn bright_channel(c: u8) -> u8 {
        if c < 0xC0 { c + 0x40 } else { 0xFF }
    }

    #[must_use]
    pub fn dim(self) -> Self {
        Self {
            red: Self::dim_channel(self.red),
            green: Self::dim_channel(self.green),
            blue: Self::dim_channel(self.blue),
            ..self
        }
    }

    #[must_use]
    pub fn bright(self) -> Self {
        Self {
            red: Self::bright_channel(self.red),
            green: Self::bright_channel(self.green),
            blue: Self::bright_channel(self.blue),
            ..self
        }
    }

    /// Bitwise-NOT of r/g/b; alpha (provenance) is untouched.
    #[must_use]
    pub fn complement(self) -> Self {
        Self { red: !self.red, green: !self.green, blue: !self.blue, ..self }
    }

    /// Sum of squared per-component differences, including alpha. Used by
    /// `vtoutput`'s nearest-colour downsampling search.
    #[must_use]
    pub fn squared_distance(self, other: Self) -> u32 {
        fn sq(a: u8, b: u8) -> u32 {
            let d = i32::from(a) - i32::from(b);
            (d * d) as u32
        }
        sq(self.alpha as u8, other.alpha as u8)
            + sq(self.red, other.red)
            + sq(self.green, other.green)
            + sq(self.blue, other.blue)
    }

    /// Map one of the 16 ECMA-48/AIXTerm indexed colours (mod 16) to RGB.
    ///
    /// Three fixups from the original: index 7 is brighter than "bright
    /// black" (`0xBF,0xBF,0xBF`); index 4 is Web Indigo (`0x4B,0x00,0x82`,
    /// "everyone fusses about dark blue"); index 8 is substituted with
    /// index 7's bit pattern before the general bit-plane computation, so
    /// that bright-black does not collapse onto dark-black.
    #[must_use]
    pub fn map_16(index: u8) -> Self {
        let mut c = index % 16;
        if c == 7 {
            return Self::new(Alpha::Ecma16Indexed, 0xBF, 0xBF, 0xBF);
        }
        if c == 4 {
            return Self::new(Alpha::Ecma16Indexed, 0x4B, 0x00, 0x82);
        }
        if c == 8 {
            c = 7;
        }
        let h: u8 = if c & 8 != 0 { 0xFF } else { 0x7F };
        let (r_bit, g_bit, b_bit) = (c & 1 != 0, c & 2 != 0, c & 4 != 0);
        Self::new(
            Alpha::Ecma16Indexed,
            if r_bit { h } else { 0 },
            if g_bit { h } else { 0 },
            if b_bit { h } else { 0 },
        )
    }

    /// Map a 256-colour palette index to RGB: <16 defers to [`Colour::map_16`]
    /// (re-tagged), 16..=231 is a 6×6×6 cube with levels `{0,95,135,175,215,255}`,
    /// 232..=255 is a greyscale ramp `8 + 10*n`.
    #[must_use]
    pub fn map_256(index: u8) -> Self {
        if index < 16 {
            let mut c = Self::map_16(index);
            c.alpha = Alpha::Indexed256;
            return c;
        }
        if index < 232 {
            let c = index - 16;
            let (b, g, r) = (c % 6, (c / 6) % 6, c / 36);
            let level = |n: u8| if n > 0 { n * 40 + 55 } else { 0 };
            return Self::new(Alpha::Indexed256, level(r), level(g), level(b));
        }
        let c = index - 232;
        let v = c * 10 + 8;
        Self::new(Alpha::Indexed256, v, v, v)
    }

    #[must_use]
    pub const fn map_true(red: u8, green: u8, blue: u8) -> Self {
        Self::new(Alpha::TrueColour, red, green, blue)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn map_16_index_seven_is_brighter_than_bright_black() {
        assert_eq!(Colour::map_16(7), Colour::new(Alpha::Ecma16Indexed, 0xBF, 0xBF, 0xBF));
    }

    #[test]
    fn map_16_index_four_is_web_indigo() {
        assert_eq!(Colour::map_16(4), Colour::new(Alpha::Ecma16Indexed, 0x4B, 0x00, 0x82));
    }

    #[test]
    fn map_16_index_eight_aliases_seven_high_intensity() {
        let eight = Colour::map_16(8);
        assert_eq!(eight, Colour::new(Alpha::Ecma16Indexed, 0xFF, 0xFF, 0xFF));
    }

    #[test]
    fn map_16_wraps_modulo_sixteen() {
        assert_eq!(Colour::map_16(16 + 7), Colour::map_16(7));
    }

    #[test]
    fn map_256_below_sixteen_defers_to_map_16_retagged() {
        let mapped = Colour::map_256(1);
        let via_16 = Colour::map_16(1);
        assert_eq!(mapped.red, via_16.red);
        assert_eq!(mapped.alpha, Alpha::Indexed256);
    }

    #[test]
    fn map_256_cube_first_entry_is_black() {
        assert_eq!(Colour::map_256(16), Colour::new(Alpha::Indexed256, 0, 0, 0));
    }

    #[test]
    fn map_256_cube_last_entry_is_white() {
        assert_eq!(Colour::map_256(231), Colour::new(Alpha::Indexed256, 255, 255, 255));
    }

    #[test]
    fn map_256_greyscale_ramp() {
        assert_eq!(Colour::map_256(232), Colour::new(Alpha::Indexed256, 8, 8, 8));
        assert_eq!(Colour::map_256(255), Colour::new(Alpha::Indexed256, 238, 238, 238));
    }

    #[test]
    fn dim_saturates_at_zero() {
        assert_eq!(Colour::dim_channel(0x30), 0x00);
        assert_eq!(Colour::dim_channel(0x80), 0x40);
    }

    #[test]
    fn bright_saturates_at_max() {
        assert_eq!(Colour::bright_channel(0xF0), 0xFF);
        assert_eq!(Colour::bright_channel(0x10), 0x50);
    }

    #[test]
    fn complement_flips_rgb_but_not_alpha() {
        let c = Colour::new(Alpha::TrueColour, 0x00, 0xFF, 0x0F);
        let flipped = c.complement();
        assert_eq!(flipped.alpha, Alpha::TrueColour);
        assert_eq!(flipped.red, 0xFF);
        assert_eq!(flipped.green, 0x00);
        assert_eq!(flipped.blue, 0xF0);
    }

    #[test]
    fn equality_is_fieldwise_provenance_included() {
        let default_white = Colour::DEFAULT_FOREGROUND;
        let true_white = Colour::map_true(0xC0, 0xC0, 0xC0);
        assert_ne!(default_white, true_white);
    }

    #[test]
    fn squared_distance_of_identical_colours_is_zero() {
        assert_eq!(Colour::map_true(1, 2, 3).squared_distance(Colour::map_true(1, 2, 3)), 0);
    }
}
