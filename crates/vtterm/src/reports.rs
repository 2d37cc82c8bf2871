//! Device-attribute/status reports, locator control, and cursor-style
//! selection, grounded on the "Reports" and "Cursor style" parts of
//! `examples/original_source/source/SoftTerm.cpp`.

use vtcell::{CursorAttributes, CursorGlyph};
use vtdecode::Args;

use crate::host::Host;
use crate::state::SoftTerm;

impl<H: Host> SoftTerm<H> {
    fn reply(&mut self, csi_body: &str, final_byte: char) {
        self.host.write_control1('\u{9b}'); // CSI
        self.host.write_latin1(csi_body);
        self.host.write_latin1(&final_byte.to_string());
    }

    /// `DA1`: "I am a VT-family terminal with these extensions."
    pub fn send_primary_device_attributes(&mut self) {
        self.reply("?62;22", 'c');
    }

    /// `DA2`: firmware/hardware identification triple.
    pub fn send_secondary_device_attributes(&mut self) {
        self.reply(">1;10;0", 'c');
    }

    /// `DA3`: a fixed unit-id string, sent inside a `DCS`.
    pub fn send_tertiary_device_attributes(&mut self) {
        self.host.write_control1('\u{90}'); // DCS
        self.host.write_latin1("!|00000000");
        self.host.write_control1('\u{9c}'); // ST
    }

    /// `DSR 5`: operating status, always "ok".
    pub fn send_device_status_report(&mut self) {
        self.reply("0", 'n');
    }

    /// `DSR 6`: cursor position, in 1-based DEC coordinates relative to the
    /// active origin.
    pub fn send_cursor_position_report(&mut self) {
        let x = Self::to_dec(self.active_cursor.x - self.origin_for_report().x);
        let y = Self::to_dec(self.active_cursor.y - self.origin_for_report().y);
        self.reply(&format!("{y};{x}"), 'R');
    }

    fn origin_for_report(&self) -> crate::state::Point {
        if self.active_modes.origin { self.scroll_origin } else { self.display_origin }
    }

    /// `DECXCPR`: cursor position with a fixed page number of 1.
    pub fn send_extended_cursor_position_report(&mut self) {
        let x = Self::to_dec(self.active_cursor.x - self.origin_for_report().x);
        let y = Self::to_dec(self.active_cursor.y - self.origin_for_report().y);
        self.reply(&format!("?{y};{x};1"), 'R');
    }

    /// `DECDSR`: the fixed-string status reports (printer, UDK, keyboard,
    /// locator presence/type, data integrity, session).
    pub fn send_private_device_status_report(&mut self, args: &Args) {
        match args.arg_zero_if_empty(0) {
            15 => self.reply("?13", 'n'),   // printer not attached
            25 => self.reply("?21", 'n'),   // UDK locked
            26 => self.reply("?27;0;0;0", 'n'), // keyboard: North American, no dialect
            55 => self.reply("?53", 'n'),   // locator device ready
            56 => self.reply("?57;1", 'n'), // locator is a mouse
            62 => self.reply("?70", 'n'),   // data integrity: no error
            63 => self.reply("?83;1", 'n'), // multiple sessions, session 1
            _ => {}
        }
    }

    /// `DECRQPSR`: cursor-information or tab-stop presentation-state reports.
    pub fn send_presentation_state_report(&mut self, args: &Args) {
        match args.arg_zero_if_empty(0) {
            1 => {
                let x = Self::to_dec(self.active_cursor.x);
                let y = Self::to_dec(self.active_cursor.y);
                let srend = u8::from(self.attributes.contains(vtcell::Attributes::BOLD)) * 2
                    + u8::from(self.attributes.contains(vtcell::Attributes::BLINK)) * 4
                    + u8::from(self.attributes.contains(vtcell::Attributes::INVERSE)) * 8;
                let satt = u8::from(self.active_modes.origin);
                let sflag = u8::from(self.active_modes.automatic_right_margin) * 2
                    + u8::from(self.overstrike) * 4;
                self.host.write_control1('\u{90}');
                self.host
                    .write_latin1(&format!("1$u{y};{x};1;{};{};{}", srend + 0x40, satt + 0x40, sflag + 0x40));
                self.host.write_control1('\u{9c}');
            }
            2 => {
                let mut stops = Vec::new();
                for x in 0..self.display_margin.w {
                    if self.htabs.is_set(x) {
                        stops.push(Self::to_dec(x).to_string());
                    }
                }
                self.host.write_control1('\u{90}');
                self.host.write_latin1(&format!("2$u{}", stops.join("/")));
                self.host.write_control1('\u{9c}');
            }
            _ => {}
        }
    }

    /// `DECRQLP`: ask the host to emit a locator report now.
    pub fn request_locator_report(&mut self) {
        self.host.request_dec_locator_report();
    }

    /// `DECELR`: whether locator reports are sent at all.
    pub fn enable_locator_reports(&mut self, on: bool) {
        self.send_dec_locator = on;
        self.host.set_send_dec_locator(on);
    }

    /// `DECSLE`: select which button transitions get reported.
    pub fn select_locator_events(&mut self, args: &Args) {
        for i in 0..args.arg_count() {
            match args.arg_zero_if_empty(i) {
                0 => {
                    self.host.set_send_dec_locator_press_event(false);
                    self.host.set_send_dec_locator_release_event(false);
                }
                1 => self.host.set_send_dec_locator_press_event(true),
                2 => self.host.set_send_dec_locator_press_event(false),
                3 => self.host.set_send_dec_locator_release_event(true),
                4 => self.host.set_send_dec_locator_release_event(false),
                _ => {}
            }
        }
    }

    /// `DECSCUSR`: numeric cursor-shape parameter to glyph+blink.
    pub fn set_cursor_style(&mut self, args: &Args) {
        let (glyph, blink) = match args.arg_zero_if_empty(0) {
            0 | 1 => (CursorGlyph::Block, true),
            2 => (CursorGlyph::Block, false),
            3 => (CursorGlyph::Underline, true),
            4 => (CursorGlyph::Underline, false),
            5 => (CursorGlyph::Bar, true),
            6 => (CursorGlyph::Bar, false),
            7 => (CursorGlyph::Star, true),
            8 => (CursorGlyph::Star, false),
            _ => (self.cursor_type, self.cursor_attributes.contains(CursorAttributes::BLINK)),
        };
        self.cursor_type = glyph;
        self.cursor_attributes.set(CursorAttributes::BLINK, blink);
        self.update_cursor_type();
    }

    /// `scusr` SCO-style cursor-type selector.
    pub fn set_sco_cursor_type(&mut self, args: &Args) {
        let glyph = match args.arg_zero_if_empty(0) {
            0 | 2 => CursorGlyph::Block,
            1 => CursorGlyph::Underover,
            _ => CursorGlyph::Block,
        };
        self.cursor_type = glyph;
        self.update_cursor_type();
    }

    /// The Linux-console private cursor-type control.
    pub fn set_linux_cursor_type(&mut self, args: &Args) {
        let glyph = match args.arg_zero_if_empty(0) {
            0 | 1 => CursorGlyph::Block,
            2 => CursorGlyph::Underline,
            _ => CursorGlyph::MirrorL,
        };
        self.cursor_type = glyph;
        self.update_cursor_type();
    }

    /// SCOSGR (`CSI = fg ; bg SGR`-like sequence selecting 256-colour
    /// indices directly for foreground/background).
    pub fn set_sco_attributes(&mut self, args: &Args) {
        let fg = u8::try_from(args.arg_zero_if_empty(0)).unwrap_or(0);
        let bg = u8::try_from(args.arg_zero_if_empty(1)).unwrap_or(0);
        self.colour.0 = vtcell::Colour::map_256(fg);
        self.colour.1 = vtcell::Colour::map_256(bg);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::NullHost;
    use pretty_assertions::assert_eq;

    #[test]
    fn device_status_report_is_always_ok() {
        let mut t = SoftTerm::new(10, 5, NullHost::default());
        t.send_device_status_report();
        assert_eq!(t.host().written, "\u{9b}0n");
    }

    #[test]
    fn cursor_position_report_is_one_based() {
        let mut t = SoftTerm::new(10, 5, NullHost::default());
        t.goto_yx(3, 4);
        t.send_cursor_position_report();
        assert_eq!(t.host().written, "\u{9b}3;4R");
    }

    #[test]
    fn decscusr_bar_blinking_selects_bar_glyph() {
        let mut t = SoftTerm::new(10, 5, NullHost::default());
        let mut a = Args::default();
        a.push_arg();
        for d in "5".chars() {
            a.push_digit(d.to_digit(10).unwrap());
        }
        t.set_cursor_style(&a);
        assert_eq!(t.cursor_type, CursorGlyph::Bar);
        assert!(t.cursor_attributes.contains(CursorAttributes::BLINK));
    }
}
