//! The `SGRColour` downsampler: picks the cheapest SGR encoding of a colour
//! that the capability descriptor's colour level can actually carry.
//!
//! A close translation of `ECMA48Output::SGRColour`'s three tiers: (1) an
//! exact-match short form when the source colour's provenance says it came
//! from that very table in the first place, (2) an exact-match cheaper
//! encoding one tier down, (3) nearest-colour-by-squared-distance at the
//! capability's best level.

use std::io::{self, Write};

use vtcap::{CapabilityDescriptor, ColourLevel};
use vtcell::{Alpha, Colour};

use crate::emitter::Emitter;

fn squared_distance(a: Colour, b: Colour) -> u32 {
    a.squared_distance(b)
}

/// Index of an exact RGB match (ignoring provenance) in the 16-colour table,
/// if any.
fn exact_16(colour: Colour) -> Option<u8> {
    (0..16u8).find(|&i| {
        let c = Colour::map_16(i);
        (c.red, c.green, c.blue) == (colour.red, colour.green, colour.blue)
    })
}

/// Index of an exact RGB match in the 256-colour table, if any.
fn exact_256(colour: Colour) -> Option<u16> {
    (0..256u16).find(|&i| {
        let c = Colour::map_256(i as u8);
        (c.red, c.green, c.blue) == (colour.red, colour.green, colour.blue)
    })
}

/// Nearest of the first 8 ECMA colours (`ECMA_8_COLOURS` capability).
fn nearest_8(colour: Colour) -> u8 {
    (0..8u8).min_by_key(|&i| squared_distance(Colour::map_16(i), colour)).unwrap_or(0)
}

/// Nearest of the 16 ECMA/AIXTerm colours. When `prefer_standard` is set (the
/// source colour was not itself one of the 16), ties are broken toward the
/// first match found rather than overwritten by a later equally-close one,
/// matching the original's asymmetric `<` vs `<=` comparison, which in
/// practice biases away from colours 8..16 ("AIXTerm" bright colours, which
/// colourschemes often remap) unless the source was already one of them.
fn nearest_16(colour: Colour, prefer_standard: bool) -> u8 {
    let mut best = 0u8;
    let mut best_dist = u32::MAX;
    for i in 0..16u8 {
        let d = squared_distance(Colour::map_16(i), colour);
        let better = if prefer_standard { d < best_dist } else { d <= best_dist };
        if better {
            best = i;
            best_dist = d;
            if prefer_standard && best_dist == 0 {
                break;
            }
        }
    }
    best
}

/// Nearest of the 256-colour table, with the same standard/AIXTerm bias as
/// [`nearest_16`].
fn nearest_256(colour: Colour, prefer_standard: bool) -> u16 {
    let mut best = 0u16;
    let mut best_dist = u32::MAX;
    for i in 0..256u16 {
        let d = squared_distance(Colour::map_256(i as u8), colour);
        let better = if prefer_standard { d < best_dist } else { d <= best_dist };
        if better {
            best = i;
            best_dist = d;
            if prefer_standard && best_dist == 0 {
                break;
            }
        }
    }
    best
}

fn sgr_default(out: &mut Emitter<'_, impl Write>, is_fg: bool) -> io::Result<()> {
    out.csi()?;
    out.print_graphic_text(&(if is_fg { 39u8 } else { 49u8 }).to_string())?;
    out.print_graphic_character('m')
}

fn sgr_16(out: &mut Emitter<'_, impl Write>, is_fg: bool, index: u8) -> io::Result<()> {
    let code = if index < 8 {
        (if is_fg { 30 } else { 40 }) + u16::from(index)
    } else {
        (if is_fg { 90 } else { 100 }) + u16::from(index - 8)
    };
    out.csi()?;
    out.print_graphic_text(&code.to_string())?;
    out.print_graphic_character('m')
}

fn sgr_256(out: &mut Emitter<'_, impl Write>, is_fg: bool, index: u16, iso: bool) -> io::Result<()> {
    out.csi()?;
    let sep = if iso { ':' } else { ';' };
    out.print_graphic_character(if is_fg { '3' } else { '4' })?;
    out.print_graphic_character('8')?;
    out.print_graphic_character(sep)?;
    out.print_graphic_character('5')?;
    out.print_graphic_character(sep)?;
    out.print_graphic_text(&index.to_string())?;
    out.print_graphic_character('m')
}

fn sgr_true(out: &mut Emitter<'_, impl Write>, is_fg: bool, colour: Colour, iso: bool) -> io::Result<()> {
    out.csi()?;
    out.print_graphic_character(if is_fg { '3' } else { '4' })?;
    out.print_graphic_character('8')?;
    if iso {
        out.print_graphic_text(":2::")?;
    } else {
        out.print_graphic_text(";2;")?;
    }
    out.print_graphic_text(&colour.red.to_string())?;
    out.print_graphic_character(if iso { ':' } else { ';' })?;
    out.print_graphic_text(&colour.green.to_string())?;
    out.print_graphic_character(if iso { ':' } else { ';' })?;
    out.print_graphic_text(&colour.blue.to_string())?;
    out.print_graphic_character('m')
}

/// Emits the cheapest legal SGR colour sub-sequence for `colour` given
/// `cap`'s colour level. Emits nothing when the capability has no colour at
/// all.
pub fn sgr_colour(out: &mut Emitter<'_, impl Write>, is_fg: bool, colour: Colour) -> io::Result<()> {
    let cap: CapabilityDescriptor = *out.capability();
    if cap.colour_level == ColourLevel::NoColours {
        return Ok(());
    }
    if colour.is_default_or_erased() {
        return sgr_default(out, is_fg);
    }
    // Tier 1: the colour came from the 16-colour table in the first place;
    // if we're about to use indexed or direct colour, see if an exact
    // ECMA-48 standard-colour (0..8, never AIXTerm 8..16) short form applies.
    if colour.alpha == Alpha::Ecma16Indexed
        && matches!(
            cap.colour_level,
            ColourLevel::IndexedColourFaulty | ColourLevel::IsoIndexedColour | ColourLevel::DirectColourFaulty | ColourLevel::IsoDirectColour
        )
    {
        if let Some(i) = exact_16(colour).filter(|&i| i < 8) {
            return sgr_16(out, is_fg, i);
        }
    }
    // Tier 2: the colour came from the 16- or 256-colour table; if we're
    // about to use direct colour, see if an exact indexed match applies.
    if matches!(colour.alpha, Alpha::Ecma16Indexed | Alpha::Indexed256)
        && matches!(cap.colour_level, ColourLevel::DirectColourFaulty | ColourLevel::IsoDirectColour)
    {
        if let Some(i) = exact_256(colour) {
            return sgr_256(out, is_fg, i, cap.colour_level == ColourLevel::IsoDirectColour);
        }
    }
    // Tier 3: no exact shortcut applies; use the closest colour at the
    // capability's own best level.
    match cap.colour_level {
        ColourLevel::NoColours => Ok(()),
        ColourLevel::Ecma8Colours => sgr_16(out, is_fg, nearest_8(colour)),
        ColourLevel::Ecma16Colours => sgr_16(out, is_fg, nearest_16(colour, colour.alpha != Alpha::Ecma16Indexed)),
        ColourLevel::IndexedColourFaulty => {
            sgr_256(out, is_fg, nearest_256(colour, colour.alpha == Alpha::Ecma16Indexed), false)
        }
        ColourLevel::IsoIndexedColour => {
            sgr_256(out, is_fg, nearest_256(colour, colour.alpha == Alpha::Ecma16Indexed), true)
        }
        ColourLevel::DirectColourFaulty => sgr_true(out, is_fg, colour, false),
        ColourLevel::IsoDirectColour => sgr_true(out, is_fg, colour, true),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use vtcap::CursorShapeCommand;

    fn rendered(cap: CapabilityDescriptor, is_fg: bool, colour: Colour) -> String {
        let mut buf = Vec::new();
        let mut out = Emitter::new(&mut buf, cap, false);
        sgr_colour(&mut out, is_fg, colour).unwrap();
        String::from_utf8(buf).unwrap()
    }

    fn direct_iso() -> CapabilityDescriptor {
        CapabilityDescriptor { colour_level: ColourLevel::IsoDirectColour, ..CapabilityDescriptor::xterm_256color() }
    }

    #[test]
    fn no_colours_emits_nothing() {
        let cap = CapabilityDescriptor::dumb();
        assert_eq!(rendered(cap, true, Colour::map_true(1, 2, 3)), "");
    }

    #[test]
    fn default_colour_emits_39_or_49() {
        let cap = CapabilityDescriptor::xterm_256color();
        assert_eq!(rendered(cap, true, Colour::DEFAULT_FOREGROUND), "\x1b[39m");
        assert_eq!(rendered(cap, false, Colour::DEFAULT_BACKGROUND), "\x1b[49m");
    }

    #[test]
    fn ecma16_exact_match_on_direct_capability_uses_short_form() {
        let cap = direct_iso();
        let red = Colour::map_16(1);
        assert_eq!(rendered(cap, true, red), "\x1b[31m");
    }

    #[test]
    fn ecma8_capability_downsamples_truecolour_to_nearest_bucket() {
        let cap = CapabilityDescriptor { colour_level: ColourLevel::Ecma8Colours, ..CapabilityDescriptor::vt220() };
        // Pure red should land on index 1 (red).
        assert_eq!(rendered(cap, true, Colour::map_true(0xFF, 0, 0)), "\x1b[31m");
    }

    #[test]
    fn indexed_256_exact_match_on_256_colour_index() {
        let cap = CapabilityDescriptor {
            colour_level: ColourLevel::IsoIndexedColour,
            cursor_shape_command: CursorShapeCommand::XtermDecscusr,
            ..CapabilityDescriptor::xterm_256color()
        };
        let c = Colour::map_256(200);
        assert_eq!(rendered(cap, true, c), "\x1b[38:5:200m");
    }

    #[test]
    fn direct_colour_emits_truecolour_triple() {
        let cap = direct_iso();
        let c = Colour::map_true(10, 20, 30);
        assert_eq!(rendered(cap, true, c), "\x1b[38:2::10:20:30m");
    }

    #[test]
    fn direct_colour_faulty_uses_semicolons() {
        let cap = CapabilityDescriptor { colour_level: ColourLevel::DirectColourFaulty, ..CapabilityDescriptor::xterm_256color() };
        let c = Colour::map_true(10, 20, 30);
        assert_eq!(rendered(cap, true, c), "\x1b[38;2;10;20;30m");
    }
}
