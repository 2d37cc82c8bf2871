//! The exact §6 on-disk byte layout: a 16-byte header followed by
//! `width * height` 16-byte cells.

use vtcell::{Alpha, Attributes, CharacterCell, Colour, CursorAttributes, CursorGlyph, PointerAttributes, ScreenFlags};

use crate::error::DecodeError;
use crate::ScreenBuffer;

pub const HEADER_LEN: usize = 16;
pub const CELL_LEN: usize = 16;

fn alpha_from_u8(raw: u8) -> Option<Alpha> {
    Some(match raw {
        0 => Alpha::Erased,
        1 => Alpha::Default,
        2 => Alpha::Ecma16Indexed,
        3 => Alpha::Indexed256,
        4 => Alpha::TrueColour,
        31 => Alpha::PointerSprite,
        _ => return None,
    })
}

fn encode_colour(out: &mut [u8], colour: Colour) {
    out[0] = colour.alpha as u8;
    out[1] = colour.red;
    out[2] = colour.green;
    out[3] = colour.blue;
}

fn decode_colour(raw: [u8; 4]) -> Option<Colour> {
    Some(Colour::new(alpha_from_u8(raw[0])?, raw[1], raw[2], raw[3]))
}

impl ScreenBuffer {
    /// Encodes the header plus active-buffer cells into the exact §6 byte
    /// layout, little-endian throughout.
    #[must_use]
    pub fn encode(&self) -> Vec<u8> {
        let mut out = vec![0u8; HEADER_LEN + self.cells().len() * CELL_LEN];
        out[4..6].copy_from_slice(&self.width.to_le_bytes());
        out[6..8].copy_from_slice(&self.height.to_le_bytes());
        out[8..10].copy_from_slice(&self.cursor_x.to_le_bytes());
        out[10..12].copy_from_slice(&self.cursor_y.to_le_bytes());
        out[12] = self.cursor.glyph as u8 & 0x0F;
        out[13] = self.cursor.attributes.bits() & 0x0F;
        out[14] = (self.pointer.attributes.bits() & 0x0F) | (self.screen_flags.bits() << 4);
        // out[15] reserved, out[0..4] reserved: both left zero.

        for (i, cell) in self.cells().iter().enumerate() {
            let base = HEADER_LEN + i * CELL_LEN;
            let slot = &mut out[base..base + CELL_LEN];
            encode_colour(&mut slot[0..4], cell.foreground);
            encode_colour(&mut slot[4..8], cell.background);
            slot[8..12].copy_from_slice(&(cell.character as u32).to_le_bytes());
            slot[12..14].copy_from_slice(&cell.attributes.bits().to_le_bytes());
            // slot[14..16] reserved.
        }
        out
    }

    /// Decodes a buffer previously produced by [`Self::encode`]. Rejects a
    /// short read rather than panicking, since a consumer racing a producer's
    /// in-progress write (§5) may observe a torn buffer and should simply
    /// retry on the next change notification.
    pub fn decode(bytes: &[u8]) -> Result<Self, DecodeError> {
        if bytes.len() < HEADER_LEN {
            return Err(DecodeError::Truncated { expected: HEADER_LEN, actual: bytes.len() });
        }
        let width = u16::from_le_bytes([bytes[4], bytes[5]]);
        let height = u16::from_le_bytes([bytes[6], bytes[7]]);
        let cursor_x = u16::from_le_bytes([bytes[8], bytes[9]]);
        let cursor_y = u16::from_le_bytes([bytes[10], bytes[11]]);
        let cursor_glyph = match bytes[12] & 0x0F {
            0 => CursorGlyph::Underline,
            1 => CursorGlyph::Bar,
            2 => CursorGlyph::Box,
            4 => CursorGlyph::Star,
            5 => CursorGlyph::Underover,
            6 => CursorGlyph::MirrorL,
            _ => CursorGlyph::Block,
        };
        let cursor_attributes = CursorAttributes::from_bits_truncate(bytes[13] & 0x0F);
        let pointer_attributes = PointerAttributes::from_bits_truncate(bytes[14] & 0x0F);
        let screen_flags = ScreenFlags::from_bits_truncate(bytes[14] >> 4);

        let cell_count = usize::from(width) * usize::from(height);
        let expected = HEADER_LEN + cell_count * CELL_LEN;
        if bytes.len() < expected {
            return Err(DecodeError::Truncated { expected, actual: bytes.len() });
        }

        let mut cells = Vec::with_capacity(cell_count);
        for i in 0..cell_count {
            let base = HEADER_LEN + i * CELL_LEN;
            let slot = &bytes[base..base + CELL_LEN];
            let foreground = decode_colour([slot[0], slot[1], slot[2], slot[3]])
                .ok_or(DecodeError::InvalidCharacter { index: i, raw: u32::from(slot[0]) })?;
            let background = decode_colour([slot[4], slot[5], slot[6], slot[7]])
                .ok_or(DecodeError::InvalidCharacter { index: i, raw: u32::from(slot[4]) })?;
            let raw_character = u32::from_le_bytes([slot[8], slot[9], slot[10], slot[11]]);
            let character = if raw_character == 0 {
                ' '
            } else {
                char::from_u32(raw_character)
                    .ok_or(DecodeError::InvalidCharacter { index: i, raw: raw_character })?
            };
            let attributes = Attributes::from_bits_retain(u16::from_le_bytes([slot[12], slot[13]]));
            cells.push(CharacterCell { character, attributes, foreground, background });
        }

        Ok(ScreenBuffer::from_parts(
            width,
            height,
            cursor_x,
            cursor_y,
            vtcell::CursorSprite { glyph: cursor_glyph, attributes: cursor_attributes },
            vtcell::PointerSprite { attributes: pointer_attributes },
            screen_flags,
            cells,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn round_trips_an_empty_buffer() {
        let buffer = ScreenBuffer::new(4, 2);
        let encoded = buffer.encode();
        let decoded = ScreenBuffer::decode(&encoded).unwrap();
        assert_eq!(decoded.width(), 4);
        assert_eq!(decoded.height(), 2);
        assert_eq!(decoded.cells(), buffer.cells());
    }

    #[test]
    fn round_trips_cursor_and_flags() {
        let mut buffer = ScreenBuffer::new(3, 3);
        buffer.set_cursor_pos(1, 2);
        buffer.set_screen_flags(ScreenFlags::INVERTED);
        let decoded = ScreenBuffer::decode(&buffer.encode()).unwrap();
        assert_eq!(decoded.cursor_pos(), (1, 2));
        assert_eq!(decoded.screen_flags(), ScreenFlags::INVERTED);
    }

    #[test]
    fn truncated_header_is_rejected() {
        assert_eq!(ScreenBuffer::decode(&[0u8; 8]), Err(DecodeError::Truncated { expected: HEADER_LEN, actual: 8 }));
    }

    #[test]
    fn truncated_cell_data_is_rejected() {
        let buffer = ScreenBuffer::new(4, 4);
        let mut encoded = buffer.encode();
        encoded.truncate(encoded.len() - 1);
        assert!(ScreenBuffer::decode(&encoded).is_err());
    }
}
