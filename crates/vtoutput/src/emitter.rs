//! Byte-level ECMA-48/DEC-VT/xterm sequence emission.
//!
//! A close translation of `ECMA48Output`'s public emitters, generalised from
//! a fixed `FILE *out` to any [`Write`] and from a `bool c1_7bit` data member
//! to a constructor argument, since nothing else in this workspace needs a
//! mutable global dialect switch.

use std::io::{self, Write};

use vtcap::{CapabilityDescriptor, ColourLevel, CursorShapeCommand};
use vtcell::{Colour, CursorAttributes, CursorGlyph};

const ESC: u8 = 0x1B;
const CSI: u8 = b'[';
const NEL: u8 = 0x85;
const RI: u8 = 0x8D;
const IND: u8 = 0x84;
const CR: u8 = b'\r';
const LF: u8 = b'\n';

/// Emits capability-aware ECMA-48 output to `W`.
///
/// `c1_7bit` selects the two-byte `ESC Fe` encoding for C1 controls (`NEL`,
/// `RI`, `IND`, CSI's introducer); when false, C1 controls are instead
/// written as their UTF-8 encoding of the 0x80..0x9F codepoint, which is
/// what every modern UTF-8 terminal actually expects on its input byte
/// stream.
pub struct Emitter<'w, W: Write> {
    out: &'w mut W,
    cap: CapabilityDescriptor,
    c1_7bit: bool,
}

impl<'w, W: Write> Emitter<'w, W> {
    pub fn new(out: &'w mut W, cap: CapabilityDescriptor, c1_7bit: bool) -> Self {
        Self { out, cap, c1_7bit }
    }

    #[must_use]
    pub fn capability(&self) -> &CapabilityDescriptor {
        &self.cap
    }

    /// Writes a single C0 (<0x20) or C1 (0x80..0x9F) control character in
    /// whichever dialect `c1_7bit` selects.
    pub fn print_control_character(&mut self, character: u8) -> io::Result<()> {
        if character < 0x80 {
            return self.out.write_all(&[character]);
        }
        if self.c1_7bit {
            self.out.write_all(&[ESC, character - 0x40])
        } else {
            self.utf8(u32::from(character))
        }
    }

    pub fn print_control_characters(&mut self, character: u8, n: usize) -> io::Result<()> {
        for _ in 0..n {
            self.print_control_character(character)?;
        }
        Ok(())
    }

    /// Writes a printable grapheme as UTF-8.
    pub fn print_graphic_character(&mut self, ch: char) -> io::Result<()> {
        let mut buf = [0u8; 4];
        self.out.write_all(ch.encode_utf8(&mut buf).as_bytes())
    }

    pub fn print_graphic_text(&mut self, text: &str) -> io::Result<()> {
        self.out.write_all(text.as_bytes())
    }

    /// `NEL` if the capability has it, else `CR LF`.
    pub fn newline(&mut self) -> io::Result<()> {
        if self.cap.lacks_nel {
            self.print_control_character(CR)?;
            self.print_control_character(LF)
        } else {
            self.print_control_character(NEL)
        }
    }

    pub fn reverse_index(&mut self) -> io::Result<()> {
        self.print_control_character(RI)
    }

    pub fn forward_index(&mut self) -> io::Result<()> {
        self.print_control_character(IND)
    }

    /// Raw UTF-8 encoder for an arbitrary codepoint (used for C1 controls
    /// when `!c1_7bit`, and available directly for callers that already
    /// have a `u32`).
    pub fn utf8(&mut self, ch: u32) -> io::Result<()> {
        if let Some(c) = char::from_u32(ch) {
            return self.print_graphic_character(c);
        }
        // Not a valid scalar value (lone surrogate, etc.; cannot occur from
        // `print_control_character`'s 0x80..0x9F range, but kept total for
        // any other caller): fall back to the replacement character.
        self.print_graphic_character('\u{FFFD}')
    }

    pub fn csi(&mut self) -> io::Result<()> {
        if self.c1_7bit {
            self.out.write_all(&[ESC, CSI])
        } else {
            self.out.write_all("\u{9B}".as_bytes())
        }
    }

    /// Emits a colon-prefixed SGR sub-parameter (e.g. the extended
    /// underline style in `4:3`), used while assembling a `CSI` sequence
    /// whose parameters are being written one piece at a time.
    pub fn print_subparameter(&mut self, n: u16) -> io::Result<()> {
        self.print_graphic_character(':')?;
        self.print_graphic_text(&n.to_string())
    }

    fn csi_params(&mut self, params: &str, final_byte: char) -> io::Result<()> {
        self.csi()?;
        self.print_graphic_text(params)?;
        self.print_graphic_character(final_byte)
    }

    pub fn cup(&mut self, row: u16, col: u16) -> io::Result<()> {
        self.csi_params(&format!("{};{}", row + 1, col + 1), 'H')
    }

    pub fn cuu(&mut self, n: u16) -> io::Result<()> {
        if n == 0 {
            return Ok(());
        }
        self.csi_params(&n.to_string(), 'A')
    }

    pub fn cud(&mut self, n: u16) -> io::Result<()> {
        if n == 0 {
            return Ok(());
        }
        self.csi_params(&n.to_string(), 'B')
    }

    pub fn cuf(&mut self, n: u16) -> io::Result<()> {
        if n == 0 {
            return Ok(());
        }
        self.csi_params(&n.to_string(), 'C')
    }

    pub fn cub(&mut self, n: u16) -> io::Result<()> {
        if n == 0 {
            return Ok(());
        }
        self.csi_params(&n.to_string(), 'D')
    }

    /// Generic DEC private mode set/reset (`CSI ? n h` / `CSI ? n l`).
    /// Silently a no-op when the capability lacks DEC private modes.
    pub fn dec_private_mode(&mut self, n: u16, on: bool) -> io::Result<()> {
        if !self.cap.use_dec_private_mode {
            return Ok(());
        }
        self.csi_params(&format!("?{n}"), if on { 'h' } else { 'l' })
    }

    pub fn dectcem(&mut self, visible: bool) -> io::Result<()> {
        self.dec_private_mode(25, visible)
    }

    /// `change_cursor_visibility`: DECTCEM, but only emitted when the
    /// capability can express DEC private modes at all.
    pub fn change_cursor_visibility(&mut self, visible: bool) -> io::Result<()> {
        if self.cap.use_dec_private_mode {
            self.dectcem(visible)?;
        }
        Ok(())
    }

    pub fn decscusr(&mut self, n: u16) -> io::Result<()> {
        self.csi_params(&n.to_string(), ' ')?;
        self.print_graphic_character('q')
    }

    pub fn decscusr_reset(&mut self) -> io::Result<()> {
        self.decscusr(0)
    }

    pub fn linuxscusr(&mut self, n: u16) -> io::Result<()> {
        self.csi_params(&format!("?{n}"), 'c')
    }

    pub fn linuxscusr_reset(&mut self) -> io::Result<()> {
        self.linuxscusr(0)
    }

    /// Repeats the last graphic character `n` times with `REP`, when the
    /// capability supports it; callers must have already printed the
    /// character once.
    pub fn rep(&mut self, n: u16) -> io::Result<()> {
        if n == 0 {
            return Ok(());
        }
        self.csi_params(&n.to_string(), 'b')
    }

    /// Erase in line. `mode` 0 = cursor to end, 1 = start to cursor, 2 =
    /// whole line.
    pub fn el(&mut self, mode: u16) -> io::Result<()> {
        if mode == 0 {
            self.csi_params("", 'K')
        } else {
            self.csi_params(&mode.to_string(), 'K')
        }
    }

    /// `SCUSR(attributes, glyph)`: picks the cursor-shape command matching
    /// `cap.cursor_shape_command`, translating the glyph/blink pair into
    /// that dialect's numeric or boolean argument.
    pub fn scusr(&mut self, attributes: CursorAttributes, glyph: CursorGlyph) -> io::Result<()> {
        let blink = attributes.contains(CursorAttributes::BLINK);
        match self.cap.cursor_shape_command {
            CursorShapeCommand::NoScusr => {
                if self.cap.use_dec_private_mode {
                    self.dec_private_mode(12, blink)?;
                }
                Ok(())
            }
            CursorShapeCommand::OriginalDecscusr => {
                let n = match glyph {
                    CursorGlyph::Bar | CursorGlyph::Underover | CursorGlyph::Underline => {
                        if blink {
                            3
                        } else {
                            4
                        }
                    }
                    _ => {
                        if blink {
                            1
                        } else {
                            2
                        }
                    }
                };
                self.decscusr(n)
            }
            CursorShapeCommand::XtermDecscusr => {
                let n = match glyph {
                    CursorGlyph::Bar => {
                        if blink {
                            5
                        } else {
                            6
                        }
                    }
                    CursorGlyph::Underover | CursorGlyph::Underline => {
                        if blink {
                            3
                        } else {
                            4
                        }
                    }
                    _ => {
                        if blink {
                            1
                        } else {
                            2
                        }
                    }
                };
                self.decscusr(n)
            }
            CursorShapeCommand::ExtendedDecscusr => {
                let n = match glyph {
                    CursorGlyph::Block => {
                        if blink {
                            1
                        } else {
                            2
                        }
                    }
                    CursorGlyph::Underline => {
                        if blink {
                            3
                        } else {
                            4
                        }
                    }
                    CursorGlyph::Bar => {
                        if blink {
                            5
                        } else {
                            6
                        }
                    }
                    CursorGlyph::Box => {
                        if blink {
                            7
                        } else {
                            8
                        }
                    }
                    CursorGlyph::Star => {
                        if blink {
                            9
                        } else {
                            10
                        }
                    }
                    CursorGlyph::Underover => {
                        if blink {
                            11
                        } else {
                            12
                        }
                    }
                    CursorGlyph::MirrorL => {
                        if blink {
                            13
                        } else {
                            14
                        }
                    }
                };
                self.decscusr(n)
            }
            CursorShapeCommand::LinuxScusr => {
                let n = match glyph {
                    CursorGlyph::Underover | CursorGlyph::Underline | CursorGlyph::Bar => 1,
                    _ => 8,
                };
                self.linuxscusr(n)
            }
        }
    }

    /// `SCUSR()`: resets the cursor shape to the terminal's default, in
    /// whichever dialect applies.
    pub fn scusr_reset(&mut self) -> io::Result<()> {
        match self.cap.cursor_shape_command {
            CursorShapeCommand::NoScusr => Ok(()),
            CursorShapeCommand::OriginalDecscusr | CursorShapeCommand::XtermDecscusr | CursorShapeCommand::ExtendedDecscusr => {
                self.decscusr_reset()
            }
            CursorShapeCommand::LinuxScusr => self.linuxscusr_reset(),
        }
    }

    /// Emits the cheapest legal default-colour SGR (`39`/`49`), or nothing
    /// at all when the capability has no colour.
    pub fn sgr_default_colour(&mut self, is_fg: bool) -> io::Result<()> {
        if self.cap.colour_level == ColourLevel::NoColours {
            return Ok(());
        }
        self.csi_params(&(if is_fg { 39u16 } else { 49u16 }).to_string(), 'm')
    }

    pub fn sgr_colour(&mut self, is_fg: bool, colour: Colour) -> io::Result<()> {
        crate::colour::sgr_colour(self, is_fg, colour)
    }

    pub fn xterm_save_restore(&mut self, save: bool) -> io::Result<()> {
        self.dec_private_mode(1048, save)
    }

    pub fn xterm_alternate_screen_buffer(&mut self, on: bool) -> io::Result<()> {
        self.dec_private_mode(1049, on)
    }

    pub fn xterm_send_any_mouse_events(&mut self, on: bool) -> io::Result<()> {
        self.dec_private_mode(1003, on)?;
        if self.cap.has_xterm1006_mouse {
            self.dec_private_mode(1006, on)?;
        }
        Ok(())
    }

    pub fn xterm_no_mouse_events(&mut self) -> io::Result<()> {
        self.xterm_send_any_mouse_events(false)
    }

    pub fn decawm(&mut self, on: bool) -> io::Result<()> {
        self.dec_private_mode(7, on)
    }

    pub fn decbkm(&mut self, on: bool) -> io::Result<()> {
        self.dec_private_mode(67, on)
    }

    pub fn decnkm(&mut self, on: bool) -> io::Result<()> {
        if self.cap.use_decnkm {
            self.dec_private_mode(66, on)?;
        }
        Ok(())
    }

    pub fn square_mode(&mut self, on: bool) -> io::Result<()> {
        if self.cap.has_square_mode {
            self.dec_private_mode(80, on)?;
        }
        Ok(())
    }

    pub fn sgr_reset(&mut self) -> io::Result<()> {
        self.csi_params("0", 'm')
    }

    pub fn flush(&mut self) -> io::Result<()> {
        self.out.flush()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn render(cap: CapabilityDescriptor, f: impl FnOnce(&mut Emitter<'_, Vec<u8>>) -> io::Result<()>) -> String {
        let mut buf = Vec::new();
        let mut out = Emitter::new(&mut buf, cap, false);
        f(&mut out).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn newline_uses_nel_when_available() {
        let got = render(CapabilityDescriptor::vt220(), Emitter::newline);
        assert_eq!(got, "\u{85}");
    }

    #[test]
    fn newline_falls_back_to_cr_lf() {
        let got = render(CapabilityDescriptor::dumb(), Emitter::newline);
        assert_eq!(got, "\r\n");
    }

    #[test]
    fn cup_is_one_indexed() {
        let got = render(CapabilityDescriptor::vt220(), |o| o.cup(0, 0));
        assert_eq!(got, "\x1b[1;1H");
    }

    #[test]
    fn cuu_with_zero_is_a_no_op() {
        let got = render(CapabilityDescriptor::vt220(), |o| o.cuu(0));
        assert_eq!(got, "");
    }

    #[test]
    fn dec_private_mode_is_suppressed_without_capability() {
        let got = render(CapabilityDescriptor::dumb(), |o| o.dectcem(true));
        assert_eq!(got, "");
    }

    #[test]
    fn dec_private_mode_on_and_off() {
        let got = render(CapabilityDescriptor::vt220(), |o| o.dectcem(false));
        assert_eq!(got, "\x1b[?25l");
    }

    #[test]
    fn rep_emits_csi_b() {
        let got = render(CapabilityDescriptor::vt220(), |o| o.rep(4));
        assert_eq!(got, "\x1b[4b");
    }

    #[test]
    fn el_default_mode_omits_parameter() {
        let got = render(CapabilityDescriptor::vt220(), |o| o.el(0));
        assert_eq!(got, "\x1b[K");
    }

    #[test]
    fn scusr_xterm_block_blinking() {
        let got = render(CapabilityDescriptor::xterm_256color(), |o| {
            o.scusr(CursorAttributes::BLINK, CursorGlyph::Block)
        });
        assert_eq!(got, "\x1b[1 q");
    }

    #[test]
    fn scusr_linux_dialect_uses_linuxscusr() {
        let got = render(CapabilityDescriptor::linux_console(), |o| {
            o.scusr(CursorAttributes::empty(), CursorGlyph::Block)
        });
        assert_eq!(got, "\x1b[?8c");
    }

    #[test]
    fn utf8_encodes_c1_when_not_seven_bit() {
        let mut buf = Vec::new();
        let mut out = Emitter::new(&mut buf, CapabilityDescriptor::vt220(), false);
        out.print_control_character(RI).unwrap();
        assert_eq!(buf, "\u{8D}".as_bytes());
    }

    #[test]
    fn seven_bit_c1_uses_esc_prefix() {
        let mut buf = Vec::new();
        let mut out = Emitter::new(&mut buf, CapabilityDescriptor::vt220(), true);
        out.print_control_character(RI).unwrap();
        assert_eq!(buf, [ESC, RI - 0x40]);
    }
}
