//! Cursor/pointer sprite state and whole-screen flags.

use bitflags::bitflags;

bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    pub struct CursorAttributes: u8 {
        const VISIBLE = 1 << 0;
        const BLINK   = 1 << 1;
    }
}

bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    pub struct PointerAttributes: u8 {
        const VISIBLE = 1 << 0;
    }
}

bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    pub struct ScreenFlags: u8 {
        const INVERTED = 1 << 0;
    }
}

/// The seven cursor glyph shapes `DECSCUSR` and its SCO/Linux counterparts
/// can select.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u8)]
pub enum CursorGlyph {
    Underline = 0,
    Bar = 1,
    Box = 2,
    #[default]
    Block = 3,
    Star = 4,
    Underover = 5,
    MirrorL = 6,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CursorSprite {
    pub glyph: CursorGlyph,
    pub attributes: CursorAttributes,
}

impl CursorSprite {
    #[must_use]
    pub fn visible_blinking_block() -> Self {
        Self { glyph: CursorGlyph::Block, attributes: CursorAttributes::VISIBLE | CursorAttributes::BLINK }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PointerSprite {
    pub attributes: PointerAttributes,
}
