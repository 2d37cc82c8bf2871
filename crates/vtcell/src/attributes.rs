//! SGR attribute bits and the underline-style sub-field.
//!
//! Bit positions are kept identical to `ColourPairAndAttributes`'s enum in
//! `CharacterCell.h` so that the 16-bit mask round-trips through `vtscreen`'s
//! on-disk layout (§6) without any reshuffling.

use bitflags::bitflags;

bitflags! {
    /// A 16-bit SGR attribute mask. The 4-bit underline sub-field occupies
    /// bits 8..=11 and is best read/written through [`Attributes::underline`]
    /// and [`Attributes::set_underline`] rather than the raw bits.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    pub struct Attributes: u16 {
        const BOLD          = 1 << 0;
        const ITALIC        = 1 << 1;
        const OVERLINE      = 1 << 2;
        const BLINK         = 1 << 3;
        const INVERSE       = 1 << 4;
        const STRIKETHROUGH = 1 << 5;
        const INVISIBLE     = 1 << 6;
        const FAINT         = 1 << 7;
        const UNDERLINES    = 15 << 8;
        const FRAME         = 1 << 12;
        const ENCIRCLE      = 1 << 13;
    }
}

/// The eleven values the 4-bit underline sub-field can hold.
///
/// Numeric values match the SGR `4:<style>` sub-parameter exactly (see
/// `SoftTerm::SetAttributes`'s nested `switch (style)`), which is *not* the
/// same order as the bit-shift constants in the original header: e.g.
/// style `6` selects [`Underline::LightDashed`], not light-dotted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u8)]
pub enum Underline {
    #[default]
    None = 0,
    Simple = 1,
    Double = 2,
    Curly = 3,
    Dotted = 4,
    Dashed = 5,
    LightDashed = 6,
    LightLightDashed = 7,
    LightDotted = 8,
    LightLightDotted = 9,
    LightCurly = 10,
}

impl Underline {
    /// Maps an SGR `4:<style>` sub-parameter to an underline style. Styles 0
    /// and 1 both select [`Underline::Simple`]; any value above 10 (and the
    /// explicit style 3) fall back to [`Underline::Curly`], matching the
    /// original's `default: case 3U` fallthrough.
    #[must_use]
    pub fn from_sgr_style(style: u32) -> Self {
        match style {
            0 | 1 => Self::Simple,
            2 => Self::Double,
            4 => Self::Dotted,
            5 => Self::Dashed,
            6 => Self::LightDashed,
            7 => Self::LightLightDashed,
            8 => Self::LightDotted,
            9 => Self::LightLightDotted,
            10 => Self::LightCurly,
            _ => Self::Curly,
        }
    }

    #[must_use]
    const fn bits(self) -> u16 {
        (self as u16) << 8
    }
}

impl Attributes {
    #[must_use]
    pub fn underline(self) -> Underline {
        match (self.bits() & Self::UNDERLINES.bits()) >> 8 {
            1 => Underline::Simple,
            2 => Underline::Double,
            3 => Underline::Curly,
            4 => Underline::Dotted,
            5 => Underline::Dashed,
            6 => Underline::LightDashed,
            7 => Underline::LightLightDashed,
            8 => Underline::LightDotted,
            9 => Underline::LightLightDotted,
            10 => Underline::LightCurly,
            _ => Underline::None,
        }
    }

    pub fn set_underline(&mut self, style: Underline) {
        self.remove(Self::UNDERLINES);
        if style != Underline::None {
            *self |= Self::from_bits_retain(style.bits());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn style_six_is_light_dashed_not_light_dotted() {
        assert_eq!(Underline::from_sgr_style(6), Underline::LightDashed);
    }

    #[test]
    fn style_eight_is_light_dotted_not_light_curly() {
        assert_eq!(Underline::from_sgr_style(8), Underline::LightDotted);
    }

    #[test]
    fn set_then_get_underline_round_trips() {
        let mut a = Attributes::BOLD;
        a.set_underline(Underline::LightDashed);
        assert_eq!(a.underline(), Underline::LightDashed);
        assert!(a.contains(Attributes::BOLD));
    }

    #[test]
    fn clearing_underline_sets_none() {
        let mut a = Attributes::empty();
        a.set_underline(Underline::Double);
        a.set_underline(Underline::None);
        assert_eq!(a.underline(), Underline::None);
        assert_eq!(a.bits() & Attributes::UNDERLINES.bits(), 0);
    }

    #[test]
    fn sgr_0_equivalent_is_the_empty_mask() {
        assert_eq!(Attributes::empty().bits(), 0);
    }
}
