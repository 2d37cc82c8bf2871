//! `DECSTR`/`RIS`, `REP`, and printable-character handling (combining marks,
//! wide-glyph companion spaces), grounded on `SoftTerm::SoftReset`/
//! `ResetToInitialState`/`RepeatPrintableCharacter`/`PrintableCharacter` in
//! `examples/original_source/source/SoftTerm.cpp`.

use vtcell::{CharacterCell, CursorAttributes, CursorGlyph};

use crate::host::Host;
use crate::state::SoftTerm;

impl<H: Host> SoftTerm<H> {
    /// `DECSTR`: resets modes and the pen, but not the screen contents or size.
    pub fn soft_reset(&mut self) {
        self.altbuffer = false;
        self.screen.set_alt_buffer(false);
        self.reset_margins();
        self.htabs.set_regular(8);
        self.cursor_attributes = CursorAttributes::VISIBLE | CursorAttributes::BLINK;
        self.cursor_type = CursorGlyph::Block;
        self.update_cursor_type();
        self.enable_locator_reports(false);
        self.sgr_reset();
        self.host.set_cursor_application_mode(false);
        self.host.set_calculator_application_mode(false);
        self.host.set_backspace_is_bs(false);
        self.active_modes = crate::state::Modes::default();
        self.scrolling = true;
        self.overstrike = true;
        self.square = true;
    }

    /// `RIS`: does everything [`Self::soft_reset`] does, plus a hard resize
    /// to the classic 80x25 and a full clear.
    pub fn reset_to_initial_state(&mut self) {
        self.soft_reset();
        self.resize(80, 25);
        self.invert_screen = false;
        self.update_screen_flags();
        self.last_printable_character = '\0';
        self.home();
        self.clear_display();
    }

    /// `DECSC`: checkpoints cursor position, pen (attributes and colour) and
    /// the mode record, for a later `DECRC`/mode-1048/1049 restore.
    pub fn dec_save_cursor(&mut self) {
        self.saved_cursor = self.active_cursor;
        self.saved_attributes = self.attributes;
        self.saved_colour = self.colour;
        self.save_modes();
    }

    /// `DECRC`: the inverse of [`Self::dec_save_cursor`].
    pub fn dec_restore_cursor(&mut self) {
        self.active_cursor = self.saved_cursor;
        self.update_cursor_pos();
        self.attributes = self.saved_attributes;
        self.colour = self.saved_colour;
        self.restore_modes();
    }

    /// `REP`: repeats the last printable character `n` times, clamped to one
    /// screenful if DECAWM is set, else to the remainder of the current line.
    pub fn repeat_printable_character(&mut self, n: u32) {
        if self.last_printable_character == '\0' {
            return;
        }
        let cap = if self.active_modes.automatic_right_margin {
            u32::from(self.display_margin.w) * u32::from(self.display_margin.h)
        } else {
            u32::from(self.right_margin() - self.active_cursor.x + 1)
        };
        let character = self.last_printable_character;
        for _ in 0..n.min(cap) {
            self.printable_character(character, 1, false);
        }
    }

    /// The handler behind every [`vtdecode::Event::Printable`]: drops
    /// format/control/surrogate characters silently, composes onto the
    /// existing cell when `character` is a combining mark, and otherwise
    /// writes it and advances (inserting a blank companion cell for wide
    /// glyphs when square mode is off).
    pub fn printable_character(&mut self, character: char, shift_level: u8, error: bool) {
        let _ = (shift_level, error);
        self.last_printable_character = character;
        if vtunicode::is_other_format(character) || vtunicode::is_other_control(character) {
            return;
        }

        if vtunicode::is_mark_nonspacing(character) || vtunicode::is_mark_enclosing(character) {
            self.compose_onto_previous_cell(character);
            return;
        }

        if self.active_cursor.advance_pending {
            self.carriage_return_no_update();
            self.advance_within_line_on_wrap();
        }

        let (x, y) = (self.active_cursor.x, self.active_cursor.y);
        let cell = CharacterCell::new(character, self.attributes, self.colour.0, self.colour.1);
        self.screen.write_n_cells(y, x, &[cell]);

        let wide = vtunicode::width(character) == 2;
        if wide && !self.square && x < self.right_margin() {
            let companion = CharacterCell::new(' ', self.attributes, self.colour.0, self.colour.1);
            self.screen.write_n_cells(y, x + 1, &[companion]);
            self.advance_or_pend();
        }
        self.advance_or_pend();
    }

    /// DECAWM's wrap-to-next-line step, shared between a pending advance
    /// firing and `REP`'s repetition loop.
    fn advance_within_line_on_wrap(&mut self) {
        self.cursor_down(1, self.scrolling);
    }

    fn compose_onto_previous_cell(&mut self, mark: char) {
        let (x, y) = (self.active_cursor.x, self.active_cursor.y);
        let prev_x = if x > self.scroll_origin.x { x - 1 } else { x };
        let existing = self.screen.cells().get(usize::from(y) * usize::from(self.screen.width()) + usize::from(prev_x)).copied();
        let Some(existing) = existing else { return };

        if let Some(composed) = vtunicode::combine_unicode(existing.character, mark) {
            let cell = CharacterCell { character: composed, ..existing };
            self.screen.write_n_cells(y, prev_x, &[cell]);
            return;
        }
        if let Some(composed) = vtunicode::combine_peculiar_non_combiners(existing.character, mark) {
            let cell = CharacterCell { character: composed, ..existing };
            self.screen.write_n_cells(y, prev_x, &[cell]);
            return;
        }
        // No composition known: fall back to inserting the mark as its own
        // (zero-width, but still addressable) space-prefixed glyph.
        let cell = CharacterCell::new(' ', self.attributes, self.colour.0, self.colour.1);
        self.screen.write_n_cells(y, x, &[cell]);
        self.advance_or_pend();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::NullHost;
    use pretty_assertions::assert_eq;

    #[test]
    fn printable_advances_cursor() {
        let mut t = SoftTerm::new(5, 2, NullHost::default());
        t.printable_character('a', 0, false);
        assert_eq!(t.screen.cells()[0].character, 'a');
        assert_eq!(t.screen.cursor_pos(), (1, 0));
    }

    #[test]
    fn combining_mark_composes_onto_previous_cell() {
        let mut t = SoftTerm::new(5, 2, NullHost::default());
        t.printable_character('e', 0, false);
        t.printable_character('\u{301}', 0, false);
        assert_eq!(t.screen.cells()[0].character, 'é');
        assert_eq!(t.screen.cursor_pos(), (1, 0));
    }

    #[test]
    fn reset_to_initial_state_resizes_to_80x25_and_clears() {
        let mut t = SoftTerm::new(5, 2, NullHost::default());
        t.printable_character('a', 0, false);
        t.reset_to_initial_state();
        assert_eq!((t.screen.width(), t.screen.height()), (80, 25));
        assert_eq!(t.screen.cells()[0].character, ' ');
    }

    #[test]
    fn repeat_printable_character_repeats_last_glyph() {
        let mut t = SoftTerm::new(5, 2, NullHost::default());
        t.printable_character('x', 0, false);
        t.repeat_printable_character(2);
        let row: String = t.screen.cells()[0..3].iter().map(|c| c.character).collect();
        assert_eq!(row, "xxx");
    }

    #[test]
    fn dec_save_restore_cursor_round_trips_position_and_pen() {
        let mut t = SoftTerm::new(5, 2, NullHost::default());
        t.goto_yx(2, 3);
        t.dec_save_cursor();
        t.goto_yx(1, 1);
        t.dec_restore_cursor();
        assert_eq!(t.screen.cursor_pos(), (2, 1));
    }
}
