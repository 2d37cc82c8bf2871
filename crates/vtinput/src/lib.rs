#![warn(clippy::pedantic)]
//! Decodes bytes arriving from a host terminal (key presses, mouse reports,
//! device-attribute and locator responses) into [`vtmsg::Message`]s.
//!
//! This is the mirror image of what a terminal *emits*: the host sends
//! `CSI`/`SS3`-introduced sequences for special keys and mouse events, and
//! this crate classifies them the same way
//! `examples/original_source/source/SoftTerm.cpp` classifies the sequences
//! *it* receives, reusing [`vtdecode`]'s CSI grammar since input from a host
//! terminal is itself ECMA-48.

mod c0;
mod keys;
mod mouse;

use vtdecode::{ByteFeed, Event};
use vtmsg::Message;

/// Receives decoded input messages.
pub trait Sink {
    fn message(&mut self, message: Message);
}

impl<F: FnMut(Message)> Sink for F {
    fn message(&mut self, message: Message) {
        (self)(message);
    }
}

/// Bridges a [`Sink`] of [`vtmsg::Message`] into a [`vtdecode::Sink`] of
/// classified control events, doing the actual key/mouse classification.
struct EventTranslator<'s, S> {
    sink: &'s mut S,
}

impl<S: Sink> vtdecode::Sink for EventTranslator<'_, S> {
    fn event(&mut self, event: Event<'_>) {
        match event {
            Event::Printable { character, shift_level, .. } => {
                // SS3-introduced single characters (shift level 3) are the
                // 7-bit form of application-cursor-mode arrow/Home/End keys
                // (`ESC O A`..`ESC O D`, `ESC O H`, `ESC O F`) and the PF
                // function keys (`ESC O P`..`ESC O S`).
                if shift_level == 3 {
                    if let Some(key) = keys::ss3_letter_key(character) {
                        self.sink.message(Message::ExtendedKey { key, modifiers: vtmsg::Modifiers::empty() });
                        return;
                    }
                }
                self.sink.message(Message::Ucs3 { codepoint: character as u32 });
            }
            Event::ControlCharacter(c) => {
                if let Some(message) = c0::parse_c0(c as u32 as u8) {
                    self.sink.message(message);
                }
            }
            Event::ControlSequence { final_byte, last_intermediate, first_private_parameter, args } => {
                let handled = mouse::try_dispatch(final_byte, last_intermediate, first_private_parameter, args, self.sink).is_some();
                if !handled {
                    keys::try_dispatch(final_byte, first_private_parameter, args, self.sink);
                }
            }
            Event::EscapeSequence { .. } | Event::ControlString { .. } => {}
        }
    }
}

/// Stateful decoder: owns the UTF-8 and control-sequence decoders so a
/// caller can feed raw bytes read straight off the controlling tty.
pub struct Decoder {
    utf8: vtutf8::Utf8Decoder,
    control: vtdecode::Decoder,
}

impl Default for Decoder {
    fn default() -> Self {
        Self::new()
    }
}

impl Decoder {
    #[must_use]
    pub fn new() -> Self {
        Self {
            utf8: vtutf8::Utf8Decoder::new(),
            control: vtdecode::Decoder::new(vtdecode::Flags::default()),
        }
    }

    /// Feeds raw bytes, emitting zero or more [`vtmsg::Message`]s to `sink`.
    pub fn feed(&mut self, bytes: &[u8], sink: &mut impl Sink) {
        let mut translator = EventTranslator { sink };
        let mut byte_feed = ByteFeed::new(&mut self.control, &mut translator);
        for &b in bytes {
            self.utf8.process(&mut byte_feed, b);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn decode(bytes: &[u8]) -> Vec<Message> {
        let mut decoder = Decoder::new();
        let mut out = Vec::new();
        decoder.feed(bytes, &mut |m| out.push(m));
        out
    }

    #[test]
    fn plain_ascii_becomes_ucs3() {
        assert_eq!(decode(b"hi"), vec![
            Message::Ucs3 { codepoint: u32::from(b'h') },
            Message::Ucs3 { codepoint: u32::from(b'i') },
        ]);
    }

    #[test]
    fn ctrl_c_becomes_control_modified_key() {
        let out = decode(b"\x03");
        assert_eq!(out, vec![Message::ExtendedKey { key: u16::from(b'c'), modifiers: vtmsg::Modifiers::CONTROL }]);
    }

    #[test]
    fn csi_cursor_up_with_no_modifiers() {
        let out = decode(b"\x1b[A");
        assert_eq!(out.len(), 1);
        assert!(matches!(out[0], Message::ExtendedKey { modifiers, .. } if modifiers.is_empty()));
    }

    #[test]
    fn csi_cursor_up_with_shift_modifier() {
        let out = decode(b"\x1b[1;2A");
        assert_eq!(out.len(), 1);
        assert!(matches!(out[0], Message::ExtendedKey { modifiers, .. } if modifiers == vtmsg::Modifiers::LEVEL2));
    }

    #[test]
    fn ss3_application_cursor_key_decodes_the_same_as_csi() {
        let out = decode(b"\x1bOA");
        assert_eq!(out.len(), 1);
        assert!(matches!(out[0], Message::ExtendedKey { .. }));
    }

    #[test]
    fn dec_fnk_delete_decodes() {
        let out = decode(b"\x1b[3~");
        assert_eq!(out.len(), 1);
        assert!(matches!(out[0], Message::ExtendedKey { .. }));
    }

    #[test]
    fn sgr_mouse_press_decodes() {
        let out = decode(b"\x1b[<0;10;20M");
        assert_eq!(out, vec![Message::MouseButton {
            button: 0,
            pressed: true,
            modifiers: vtmsg::Modifiers::empty(),
        }, Message::MouseColumn { column: 10 }, Message::MouseRow { row: 20 }]);
    }
}
