//! The contract `SoftTerm` needs from its keyboard/mouse collaborator.
//!
//! Keyboard and mouse input aggregation is deliberately out of scope for this
//! crate (it is treated, per the suite's own division of labour, as an
//! external collaborator): `SoftTerm` only ever *writes* device-attribute and
//! status responses back toward the host, and *tells* the keyboard/mouse
//! layer to change mode, never decodes a keypress itself. This trait is that
//! narrow contract, grounded on the `keyboard`/`mouse` member calls threaded
//! throughout `examples/original_source/source/SoftTerm.cpp`.

/// Everything `SoftTerm` needs to hand back to the host: response bytes for
/// device-attribute/status/locator queries, plus mode changes that affect how
/// the host's keyboard/mouse layer encodes its own output.
pub trait Host {
    /// Writes a single C0/C1 control character (`CSI`, `DCS`, `ST`, ...) back
    /// toward the host, in whatever 7-/8-bit form the host negotiated.
    fn write_control1(&mut self, character: char);

    /// Writes a run of Latin-1 (i.e. one-byte-per-character) bytes, used for
    /// the fixed device-attribute/status-report payloads.
    fn write_latin1(&mut self, text: &str);

    /// `S7C1T`/`S8C1T`: whether C1 controls sent *to* the host should use the
    /// two-byte 7-bit form or the single 8-bit byte form.
    fn set_8bit_control1(&mut self, on: bool);

    fn set_cursor_application_mode(&mut self, on: bool);
    fn set_calculator_application_mode(&mut self, on: bool);
    fn set_backspace_is_bs(&mut self, on: bool);
    fn set_escape_is_fs(&mut self, on: bool);
    fn set_sco_function_keys(&mut self, on: bool);
    fn set_dec_function_keys(&mut self, on: bool);
    fn set_teken_function_keys(&mut self, on: bool);

    /// `DECRQLP`: the host is asked to emit an unsolicited locator report now.
    fn request_dec_locator_report(&mut self);
    /// `DECELR`: whether locator reports are sent at all.
    fn set_send_dec_locator(&mut self, on: bool);
    /// `DECSLE`: whether a button press is one of the requested events.
    fn set_send_dec_locator_press_event(&mut self, on: bool);
    /// `DECSLE`: whether a button release is one of the requested events.
    fn set_send_dec_locator_release_event(&mut self, on: bool);
}

/// A `Host` that discards every response and mode change; useful for tests
/// that only care about the resulting `ScreenBuffer` contents.
#[derive(Debug, Default)]
pub struct NullHost {
    pub written: String,
}

impl Host for NullHost {
    fn write_control1(&mut self, character: char) {
        self.written.push(character);
    }

    fn write_latin1(&mut self, text: &str) {
        self.written.push_str(text);
    }

    fn set_8bit_control1(&mut self, _on: bool) {}
    fn set_cursor_application_mode(&mut self, _on: bool) {}
    fn set_calculator_application_mode(&mut self, _on: bool) {}
    fn set_backspace_is_bs(&mut self, _on: bool) {}
    fn set_escape_is_fs(&mut self, _on: bool) {}
    fn set_sco_function_keys(&mut self, _on: bool) {}
    fn set_dec_function_keys(&mut self, _on: bool) {}
    fn set_teken_function_keys(&mut self, _on: bool) {}
    fn request_dec_locator_report(&mut self) {}
    fn set_send_dec_locator(&mut self, _on: bool) {}
    fn set_send_dec_locator_press_event(&mut self, _on: bool) {}
    fn set_send_dec_locator_release_event(&mut self, _on: bool) {}
}
