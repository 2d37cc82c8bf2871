//! SGR (1006) mouse reports and DEC locator reports.
//!
//! `examples/original_source/source/SoftTerm.cpp` only *sends* locator
//! reports (in response to `DECRQLP`); this module decodes the same wire
//! shapes from the other direction, since a host terminal echoes the
//! identical grammar back.

use vtdecode::Args;
use vtmsg::{Message, Modifiers};

/// xterm 1006 SGR mouse button-bits: low two bits are the button number (or
/// `3` for "release" on some terminals, though 1006 always disambiguates via
/// the final byte instead); bit 2 is wheel, bit 3+4 are Shift/Alt, bit 4 is
/// Control, bit 5 is motion-only.
fn mouse_modifiers(raw: u32) -> Modifiers {
    let mut modifiers = Modifiers::empty();
    if raw & 0x04 != 0 {
        modifiers |= Modifiers::LEVEL2; // Shift
    }
    if raw & 0x08 != 0 {
        modifiers |= Modifiers::LEVEL3; // Alt
    }
    if raw & 0x10 != 0 {
        modifiers |= Modifiers::CONTROL;
    }
    modifiers
}

/// Attempts to classify a control sequence as an SGR mouse report (`CSI <
/// b ; x ; y M` press/motion, `CSI < b ; x ; y m` release) or a DEC locator
/// report (`CSI e ; b ; y ; x & w`). Emits a button/wheel message followed
/// by column and row messages, mirroring the order the compositor consumes
/// them in (button state before position, per `vtmsg`'s per-message framing
/// requiring no cross-message state).
pub fn try_dispatch<S: crate::Sink>(
    final_byte: char,
    last_intermediate: char,
    first_private_parameter: char,
    args: &Args,
    sink: &mut S,
) -> Option<()> {
    if first_private_parameter == '<' && matches!(final_byte, 'M' | 'm') {
        let raw = args.arg_zero_if_empty(0);
        let column = args.arg_one_if_zero_or_empty(1).saturating_sub(1);
        let row = args.arg_one_if_zero_or_empty(2).saturating_sub(1);
        let modifiers = mouse_modifiers(raw);
        if raw & 0x40 != 0 {
            // Wheel: button-bits 0/1 select the direction, final byte is
            // always 'M' for wheel events (no separate release).
            let delta: i8 = if raw & 0x01 == 0 { 1 } else { -1 };
            sink.message(Message::MouseWheel { axis: 0, delta, modifiers });
        } else {
            let button = (raw & 0x03) as u8;
            let pressed = final_byte == 'M';
            sink.message(Message::MouseButton { button, pressed, modifiers });
        }
        sink.message(Message::MouseColumn { column: u16::try_from(column).unwrap_or(u16::MAX) });
        sink.message(Message::MouseRow { row: u16::try_from(row).unwrap_or(u16::MAX) });
        return Some(());
    }

    if final_byte == 'w' && last_intermediate == '&' {
        // DEC locator report: CSI e ; b ; y ; x & w (1-origin row/column).
        let row = args.arg_one_if_zero_or_empty(2).saturating_sub(1);
        let column = args.arg_one_if_zero_or_empty(3).saturating_sub(1);
        sink.message(Message::MouseColumn { column: u16::try_from(column).unwrap_or(u16::MAX) });
        sink.message(Message::MouseRow { row: u16::try_from(row).unwrap_or(u16::MAX) });
        return Some(());
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn dispatch(bytes: &[u8]) -> Vec<Message> {
        let mut decoder = crate::Decoder::new();
        let mut out = Vec::new();
        decoder.feed(bytes, &mut |m| out.push(m));
        out
    }

    #[test]
    fn release_uses_lowercase_m() {
        let out = dispatch(b"\x1b[<0;5;5m");
        assert!(matches!(out[0], Message::MouseButton { pressed: false, .. }));
    }

    #[test]
    fn wheel_up_decodes_to_positive_delta() {
        let out = dispatch(b"\x1b[<64;1;1M");
        assert!(matches!(out[0], Message::MouseWheel { delta: 1, .. }));
    }

    #[test]
    fn locator_report_decodes_row_and_column() {
        let out = dispatch(b"\x1b[1;1;10;20&w");
        assert_eq!(out, vec![Message::MouseColumn { column: 19 }, Message::MouseRow { row: 9 }]);
    }
}
