//! `SGR` attribute/colour setting and `DECCARA`, grounded on
//! `SoftTerm::SetAttributes`/`SoftTerm::ChangeAttributesInRectangularArea` in
//! `examples/original_source/source/SoftTerm.cpp`.

use vtcell::{Alpha, Attributes, Colour, Underline};
use vtdecode::Args;

use crate::host::Host;
use crate::state::SoftTerm;

/// Resolves a colour-selecting SGR sub-sequence (`38`/`48`/`58`) starting at
/// parameter `i`, after [`Args::collapse_args_to_subargs`] has folded any
/// legacy semicolon-separated form into sub-parameters.
fn resolve_colour(args: &Args, i: usize) -> Option<Colour> {
    match args.arg_zero_if_empty_sub(i, 1) {
        5 => Some(Colour::map_256(u8::try_from(args.arg_zero_if_empty_sub(i, 2)).unwrap_or(0))),
        2 => {
            let has_colourspace_id = args.subarg_count(i) >= 6;
            let base = usize::from(has_colourspace_id);
            Some(Colour::map_true(
                u8::try_from(args.arg_zero_if_empty_sub(i, 2 + base)).unwrap_or(0),
                u8::try_from(args.arg_zero_if_empty_sub(i, 3 + base)).unwrap_or(0),
                u8::try_from(args.arg_zero_if_empty_sub(i, 4 + base)).unwrap_or(0),
            ))
        }
        _ => None,
    }
}

impl<H: Host> SoftTerm<H> {
    pub fn sgr_reset(&mut self) {
        self.attributes = Attributes::empty();
        self.colour = (Colour::DEFAULT_FOREGROUND, Colour::DEFAULT_BACKGROUND);
    }

    /// `CSI ... m`: applies each parameter as a delta to the pen.
    pub fn set_attributes(&mut self, args: &Args) {
        let mut args = args.clone();
        args.minimum_one_arg();
        let args = &mut args;
        let mut i = 0;
        while i < args.arg_count() {
            if matches!(args.arg_zero_if_empty_sub(i, 0), 38 | 48 | 58) {
                args.collapse_args_to_subargs(i);
            }
            let code = args.arg_zero_if_empty_sub(i, 0);
            match code {
                0 => self.sgr_reset(),
                1 => self.attributes.insert(Attributes::BOLD),
                2 => self.attributes.insert(Attributes::FAINT),
                3 => self.attributes.insert(Attributes::ITALIC),
                4 => {
                    let style = if args.subarg_count(i) > 1 {
                        Underline::from_sgr_style(args.arg_zero_if_empty_sub(i, 1))
                    } else {
                        Underline::Simple
                    };
                    self.attributes.set_underline(style);
                }
                5 | 6 => self.attributes.insert(Attributes::BLINK),
                7 => self.attributes.insert(Attributes::INVERSE),
                8 => self.attributes.insert(Attributes::INVISIBLE),
                9 => self.attributes.insert(Attributes::STRIKETHROUGH),
                21 => self.attributes.set_underline(Underline::Double),
                22 => self.attributes.remove(Attributes::BOLD | Attributes::FAINT),
                23 => self.attributes.remove(Attributes::ITALIC),
                24 => self.attributes.set_underline(Underline::None),
                25 => self.attributes.remove(Attributes::BLINK),
                27 => self.attributes.remove(Attributes::INVERSE),
                28 => self.attributes.remove(Attributes::INVISIBLE),
                29 => self.attributes.remove(Attributes::STRIKETHROUGH),
                30..=37 => self.colour.0 = Colour::map_16(u8::try_from(code - 30).unwrap_or(0)),
                38 => {
                    if let Some(c) = resolve_colour(args, i) {
                        self.colour.0 = c;
                    }
                }
                39 => self.colour.0 = Colour::DEFAULT_FOREGROUND,
                40..=47 => self.colour.1 = Colour::map_16(u8::try_from(code - 40).unwrap_or(0)),
                48 => {
                    if let Some(c) = resolve_colour(args, i) {
                        self.colour.1 = c;
                    }
                }
                49 => self.colour.1 = Colour::DEFAULT_BACKGROUND,
                51 => self.attributes.insert(Attributes::FRAME),
                52 => self.attributes.insert(Attributes::ENCIRCLE),
                53 => self.attributes.insert(Attributes::OVERLINE),
                54 => self.attributes.remove(Attributes::FRAME | Attributes::ENCIRCLE),
                55 => self.attributes.remove(Attributes::OVERLINE),
                90..=97 => {
                    let mut c = Colour::map_16(u8::try_from(code - 90).unwrap_or(0) + 8);
                    c.alpha = Alpha::Ecma16Indexed;
                    self.colour.0 = c;
                }
                100..=107 => {
                    let mut c = Colour::map_16(u8::try_from(code - 100).unwrap_or(0) + 8);
                    c.alpha = Alpha::Ecma16Indexed;
                    self.colour.1 = c;
                }
                _ => {}
            }
            i += 1;
        }
    }

    /// `DECCARA`: applies an SGR-like delta to every cell of a rectangle,
    /// bounded to the scroll region, via [`vtscreen::ScreenBuffer::modify_n_cells`].
    pub fn change_area_attributes(&mut self, args: &Args) {
        let top = u16::try_from(args.arg_one_if_zero_or_empty(0)).unwrap_or(1) - 1 + self.display_origin.y;
        let left = u16::try_from(args.arg_one_if_zero_or_empty(1)).unwrap_or(1) - 1 + self.display_origin.x;
        let bottom = u16::try_from(args.arg_this_if_zero_or_empty(2, u32::from(self.display_margin.h))).unwrap_or(self.display_margin.h);
        let right = u16::try_from(args.arg_this_if_zero_or_empty(3, u32::from(self.display_margin.w))).unwrap_or(self.display_margin.w);
        if top >= bottom || left >= right {
            return;
        }
        let mut deltas: Vec<u32> = Vec::new();
        for i in 4..args.arg_count() {
            deltas.push(args.arg_zero_if_empty(i));
        }
        for row in top..bottom.min(self.display_origin.y + self.display_margin.h) {
            let width = usize::from((right.min(self.display_origin.x + self.display_margin.w)) - left);
            self.screen.modify_n_cells(row, left, width, |mut cell| {
                for &code in &deltas {
                    match code {
                        0 => cell.attributes = Attributes::empty(),
                        1 => cell.attributes.insert(Attributes::BOLD),
                        4 => cell.attributes.set_underline(Underline::Simple),
                        5 => cell.attributes.insert(Attributes::BLINK),
                        7 => cell.attributes.insert(Attributes::INVERSE),
                        22 => cell.attributes.remove(Attributes::BOLD | Attributes::FAINT),
                        24 => cell.attributes.set_underline(Underline::None),
                        25 => cell.attributes.remove(Attributes::BLINK),
                        27 => cell.attributes.remove(Attributes::INVERSE),
                        _ => {}
                    }
                }
                cell
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::NullHost;
    use pretty_assertions::assert_eq;

    fn parsed(values: &[u32]) -> Args {
        let mut args = Args::default();
        for &v in values {
            args.push_arg();
            for d in v.to_string().chars() {
                args.push_digit(d.to_digit(10).unwrap());
            }
        }
        args
    }

    #[test]
    fn sgr_zero_resets_pen() {
        let mut t = SoftTerm::new(5, 5, NullHost::default());
        t.set_attributes(&parsed(&[1, 31]));
        assert!(t.attributes.contains(Attributes::BOLD));
        t.set_attributes(&parsed(&[0]));
        assert_eq!(t.attributes, Attributes::empty());
        assert_eq!(t.colour.0, Colour::DEFAULT_FOREGROUND);
    }

    #[test]
    fn legacy_indexed_foreground_is_collapsed_and_mapped() {
        let mut t = SoftTerm::new(5, 5, NullHost::default());
        t.set_attributes(&parsed(&[38, 5, 196]));
        assert_eq!(t.colour.0.alpha, Alpha::Indexed256);
    }

    #[test]
    fn bright_foreground_sets_legacy_colour_tag() {
        let mut t = SoftTerm::new(5, 5, NullHost::default());
        t.set_attributes(&parsed(&[91]));
        assert_eq!(t.colour.0.alpha, Alpha::Ecma16Indexed);
    }
}
