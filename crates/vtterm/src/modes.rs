//! `SM`/`RM` (ECMA), `DECSET`/`DECRST` (`?`), and `SCOSM`/`SCORM` (`=`) mode
//! dispatch, grounded on `SoftTerm::SetMode`/`SetPrivateMode`/`SetSCOMode` in
//! `examples/original_source/source/SoftTerm.cpp`.

use vtdecode::Args;

use crate::host::Host;
use crate::state::SoftTerm;

impl<H: Host> SoftTerm<H> {
    /// `CSI Pm h`/`CSI Pm l`: the plain ECMA-48 modes. Only `IRM` (insert vs.
    /// replace, tracked via `overstrike`) has a local effect; the rest are
    /// accepted and otherwise no-ops (ECMA modes like `GATM`/`KAM`/`CRM` are
    /// out of scope).
    pub fn set_mode(&mut self, args: &Args, on: bool) {
        for i in 0..args.arg_count() {
            match args.arg_zero_if_empty(i) {
                4 => self.overstrike = !on, // IRM: set means insert, i.e. not overstrike
                20 => {} // LNM: newline-vs-linefeed convention, host's concern
                _ => {}
            }
        }
    }

    /// `CSI ? Pm h`/`CSI ? Pm l`: the DEC private modes.
    pub fn set_private_mode(&mut self, args: &Args, on: bool) {
        for i in 0..args.arg_count() {
            let code = args.arg_zero_if_empty(i);
            self.apply_private_mode(code, on);
        }
    }

    fn apply_private_mode(&mut self, code: u32, on: bool) {
        match code {
            1 => self.host.set_cursor_application_mode(on),
            2 => self.host.set_dec_function_keys(!on), // DECANM: off selects VT52-ish/DEC fn keys
            3 => {
                // DECCOLM: 80/132 column switch. Resize first, then (unless
                // DECNCSM/mode 95 suppresses it) home and clear at the new
                // extent; `resize` itself always resets margins.
                let width = if on { 132 } else { 80 };
                self.resize(width, self.display_margin.h);
                if !self.no_clear_screen_on_column_change {
                    self.home();
                    self.clear_display();
                }
            }
            5 => {
                self.invert_screen = on;
                self.update_screen_flags();
            }
            6 => self.active_modes.origin = on,
            7 => self.active_modes.automatic_right_margin = on,
            8 => {} // DECARM: keyboard auto-repeat, host's concern
            9 | 1000 | 1002 | 1003 => self.send_xterm_mouse = on,
            1006 | 1037 => {} // mouse/keyboard encoding refinements, host's concern
            12 | 13 => self.cursor_attributes.set(vtcell::CursorAttributes::BLINK, on),
            18 => {} // DECPFF: print-form-feed, out of scope
            25 => {
                self.cursor_attributes.set(vtcell::CursorAttributes::VISIBLE, on);
                self.update_cursor_type();
            }
            45 => {} // reverse-wraparound, not modelled separately from DECAWM
            47 => {
                self.altbuffer = on;
                self.screen.set_alt_buffer(on);
            }
            66 => self.host.set_calculator_application_mode(on),
            67 => self.host.set_backspace_is_bs(on),
            69 => self.active_modes.left_right_margins = on,
            80 => {} // DECSDM: sixel scrolling, out of scope
            95 => self.no_clear_screen_on_column_change = on,
            112 => self.set_scrollback_buffer(on), // DECRPL
            117 => self.active_modes.background_colour_erase = !on, // DECECM
            1004 => {} // xterm GUI focus events, host's concern
            1369 => self.square = on, // deprecated square-mode toggle, kept for compatibility
            7727 => self.host.set_escape_is_fs(on), // TeraTerm extension
            1048 => {
                if on {
                    self.saved_cursor = self.active_cursor;
                } else {
                    self.active_cursor = self.saved_cursor;
                    self.update_cursor_pos();
                }
            }
            1047 => {
                if !on {
                    self.clear_display();
                }
                self.altbuffer = on;
                self.screen.set_alt_buffer(on);
            }
            1049 => {
                if on {
                    self.saved_cursor = self.active_cursor;
                    self.altbuffer = true;
                    self.screen.set_alt_buffer(true);
                    self.clear_display();
                } else {
                    self.altbuffer = false;
                    self.screen.set_alt_buffer(false);
                    self.active_cursor = self.saved_cursor;
                    self.update_cursor_pos();
                }
            }
            2004 => {} // bracketed paste, host's concern
            _ => {}
        }
    }

    /// `CSI = Pm h`/`CSI = Pm l`: the SCO console modes.
    pub fn set_sco_mode(&mut self, args: &Args, on: bool) {
        for i in 0..args.arg_count() {
            if args.arg_zero_if_empty(i) == 1 {
                self.host.set_sco_function_keys(on);
            }
        }
    }

    pub fn save_modes(&mut self) {
        self.saved_modes = self.active_modes;
    }

    pub fn restore_modes(&mut self) {
        self.active_modes = self.saved_modes;
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
    fn decom_sets_origin_mode() {
        let mut t = SoftTerm::new(10, 5, NullHost::default());
        t.set_private_mode(&parsed(&[6]), true);
        assert!(t.active_modes.origin);
    }

    #[test]
    fn mode_1049_saves_cursor_and_enters_alt_screen() {
        let mut t = SoftTerm::new(10, 5, NullHost::default());
        t.goto_yx(3, 3);
        t.set_private_mode(&parsed(&[1049]), true);
        assert!(t.screen.is_alt_buffer());
        t.set_private_mode(&parsed(&[1049]), false);
        assert!(!t.screen.is_alt_buffer());
        assert_eq!(t.screen.cursor_pos(), (2, 2));
    }

    #[test]
    fn irm_flips_overstrike() {
        let mut t = SoftTerm::new(10, 5, NullHost::default());
        assert!(t.overstrike);
        t.set_mode(&parsed(&[4]), true);
        assert!(!t.overstrike);
    }
}
