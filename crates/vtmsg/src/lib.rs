#![warn(clippy::pedantic)]
//! The input-message wire format carried from consumer to producer (§6 of the
//! external-interface contract this workspace implements).
//!
//! A message is always 4 bytes, little-endian, and self-describing: the low
//! bits of the first byte select which [`Message`] variant the remaining bits
//! belong to. The tag/payload split is flattened into one `encode`/`decode`
//! pair instead of a derive-macro registry, since this workspace has no
//! `vtenc`/`linkme` dispatch machinery to hang a macro-based encoding on.

mod modifiers;
mod ring;

pub use modifiers::Modifiers;
pub use ring::RingBuffer;

/// One decoded input message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Message {
    /// A Unicode code point up to 21 bits (UCS3: fits in 3 bytes), typically
    /// from ordinary printable-key input.
    Ucs3 { codepoint: u32 },
    /// An "accelerator" key: an application-defined shortcut identifier, not
    /// itself a character.
    Accelerator { key: u16, modifiers: Modifiers },
    /// A named key from the extended keyboard table (arrows, Home/End,
    /// Insert/Delete, etc.) together with the modifier mask in effect.
    ExtendedKey { key: u16, modifiers: Modifiers },
    /// A numbered function key (F1, F2, ...).
    FunctionKey { number: u16, modifiers: Modifiers },
    /// A USB HID consumer-page key (volume, media controls).
    ConsumerKey { usage: u16, modifiers: Modifiers },
    /// A "system" key (power, sleep, wake).
    SystemKey { usage: u16, modifiers: Modifiers },
    /// Selects which session/virtual-screen subsequent messages (and the
    /// producer's attention) apply to.
    SessionSelect { index: u16 },
    /// The mouse pointer's column changed.
    MouseColumn { column: u16 },
    /// The mouse pointer's row changed.
    MouseRow { row: u16 },
    /// The mouse pointer's depth (stacking order under a touch/pen device)
    /// changed.
    MouseDepth { depth: u16 },
    /// A mouse button transition.
    MouseButton { button: u8, pressed: bool, modifiers: Modifiers },
    /// A mouse wheel motion: `axis` 0 is vertical, 1 horizontal; `delta` is
    /// signed, positive away from the user.
    MouseWheel { axis: u8, delta: i8, modifiers: Modifiers },
}

const TAG_UCS3: u8 = 0;
const TAG_ACCELERATOR: u8 = 1;
const TAG_EXTENDED_KEY: u8 = 2;
const TAG_FUNCTION_KEY: u8 = 3;
const TAG_CONSUMER_KEY: u8 = 4;
const TAG_SYSTEM_KEY: u8 = 5;
const TAG_SESSION_SELECT: u8 = 6;
const TAG_MOUSE_COLUMN: u8 = 7;
const TAG_MOUSE_ROW: u8 = 8;
const TAG_MOUSE_DEPTH: u8 = 9;
const TAG_MOUSE_BUTTON: u8 = 10;
const TAG_MOUSE_WHEEL: u8 = 11;

/// Wire width of every message, in bytes.
pub const MESSAGE_LEN: usize = 4;

impl Message {
    /// Encodes this message as 4 little-endian bytes: byte 0 is the tag,
    /// bytes 1..4 the tag-specific payload.
    #[must_use]
    pub fn encode(self) -> [u8; MESSAGE_LEN] {
        match self {
            Message::Ucs3 { codepoint } => {
                let b = codepoint.to_le_bytes();
                [TAG_UCS3, b[0], b[1], b[2]]
            }
            Message::Accelerator { key, modifiers } => {
                let k = key.to_le_bytes();
                [TAG_ACCELERATOR, k[0], k[1], modifiers.bits()]
            }
            Message::ExtendedKey { key, modifiers } => {
                let k = key.to_le_bytes();
                [TAG_EXTENDED_KEY, k[0], k[1], modifiers.bits()]
            }
            Message::FunctionKey { number, modifiers } => {
                let n = number.to_le_bytes();
                [TAG_FUNCTION_KEY, n[0], n[1], modifiers.bits()]
            }
            Message::ConsumerKey { usage, modifiers } => {
                let u = usage.to_le_bytes();
                [TAG_CONSUMER_KEY, u[0], u[1], modifiers.bits()]
            }
            Message::SystemKey { usage, modifiers } => {
                let u = usage.to_le_bytes();
                [TAG_SYSTEM_KEY, u[0], u[1], modifiers.bits()]
            }
            Message::SessionSelect { index } => {
                let i = index.to_le_bytes();
                [TAG_SESSION_SELECT, i[0], i[1], 0]
            }
            Message::MouseColumn { column } => {
                let c = column.to_le_bytes();
                [TAG_MOUSE_COLUMN, c[0], c[1], 0]
            }
            Message::MouseRow { row } => {
                let r = row.to_le_bytes();
                [TAG_MOUSE_ROW, r[0], r[1], 0]
            }
            Message::MouseDepth { depth } => {
                let d = depth.to_le_bytes();
                [TAG_MOUSE_DEPTH, d[0], d[1], 0]
            }
            Message::MouseButton { button, pressed, modifiers } => {
                [TAG_MOUSE_BUTTON, button, u8::from(pressed), modifiers.bits()]
            }
            Message::MouseWheel { axis, delta, modifiers } => {
                #[allow(clippy::cast_sign_loss)]
                let raw = delta as u8;
                [TAG_MOUSE_WHEEL, axis, raw, modifiers.bits()]
            }
        }
    }

    /// Decodes a 4-byte wire message, or `None` if the tag byte is not one
    /// this version of the format recognises (future tags are reserved for
    /// forward extension, matching the ring buffer's "skip unknown" rule).
    #[must_use]
    pub fn decode(bytes: [u8; MESSAGE_LEN]) -> Option<Message> {
        let [tag, a, b, c] = bytes;
        let modifiers = Modifiers::from_bits_truncate(c);
        Some(match tag {
            TAG_UCS3 => Message::Ucs3 { codepoint: u32::from_le_bytes([a, b, c, 0]) },
            TAG_ACCELERATOR => Message::Accelerator { key: u16::from_le_bytes([a, b]), modifiers },
            TAG_EXTENDED_KEY => Message::ExtendedKey { key: u16::from_le_bytes([a, b]), modifiers },
            TAG_FUNCTION_KEY => Message::FunctionKey { number: u16::from_le_bytes([a, b]), modifiers },
            TAG_CONSUMER_KEY => Message::ConsumerKey { usage: u16::from_le_bytes([a, b]), modifiers },
            TAG_SYSTEM_KEY => Message::SystemKey { usage: u16::from_le_bytes([a, b]), modifiers },
            TAG_SESSION_SELECT => Message::SessionSelect { index: u16::from_le_bytes([a, b]) },
            TAG_MOUSE_COLUMN => Message::MouseColumn { column: u16::from_le_bytes([a, b]) },
            TAG_MOUSE_ROW => Message::MouseRow { row: u16::from_le_bytes([a, b]) },
            TAG_MOUSE_DEPTH => Message::MouseDepth { depth: u16::from_le_bytes([a, b]) },
            TAG_MOUSE_BUTTON => {
                Message::MouseButton { button: a, pressed: b != 0, modifiers }
            }
            #[allow(clippy::cast_possible_wrap)]
            TAG_MOUSE_WHEEL => Message::MouseWheel { axis: a, delta: b as i8, modifiers },
            _ => return None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn ucs3_round_trips() {
        let m = Message::Ucs3 { codepoint: 0x1_F600 };
        assert_eq!(Message::decode(m.encode()), Some(m));
    }

    #[test]
    fn extended_key_round_trips_with_modifiers() {
        let m = Message::ExtendedKey { key: 12, modifiers: Modifiers::CONTROL | Modifiers::SUPER };
        assert_eq!(Message::decode(m.encode()), Some(m));
    }

    #[test]
    fn mouse_button_round_trips() {
        let m = Message::MouseButton { button: 2, pressed: true, modifiers: Modifiers::empty() };
        assert_eq!(Message::decode(m.encode()), Some(m));
    }

    #[test]
    fn mouse_wheel_negative_delta_round_trips() {
        let m = Message::MouseWheel { axis: 0, delta: -3, modifiers: Modifiers::LEVEL2 };
        assert_eq!(Message::decode(m.encode()), Some(m));
    }

    #[test]
    fn unknown_tag_decodes_to_none() {
        assert_eq!(Message::decode([0xFF, 0, 0, 0]), None);
    }

    #[test]
    fn encoded_length_is_always_four() {
        let m = Message::SessionSelect { index: 3 };
        assert_eq!(m.encode().len(), MESSAGE_LEN);
    }
}
