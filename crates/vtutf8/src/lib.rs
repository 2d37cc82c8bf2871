#![warn(clippy::pedantic)]
//! A permissive, byte-at-a-time UTF-8 decoder.
//!
//! Grounded on `examples/original_source/source/UTF8Decoder.h`: the decoder
//! never fails. Malformed input produces a decoded code point with an error
//! flag set, rather than stopping the stream: exactly the contract
//! [`vtdecode`](../vtdecode) and ultimately
//! [`vtterm`](../vtterm) rely on never seeing a `Result`.

/// Receives one decoded code point at a time.
pub trait Utf8Sink {
    /// `overlong` is only meaningful when `error` is also `true`; it
    /// distinguishes "this was a structurally valid but non-minimal
    /// encoding" from other error causes (bad continuation, out-of-range,
    /// surrogate).
    fn process_decoded_utf8(&mut self, character: char, error: bool, overlong: bool);
}

const REPLACEMENT: char = '\u{FFFD}';

/// Decoder state. One instance should live for the lifetime of a single byte
/// stream; feeding bytes from unrelated streams through the same instance
/// would incorrectly treat a truncated sequence at the first stream's end as
/// continuing into the second.
#[derive(Debug, Default)]
pub struct Utf8Decoder {
    expected_continuation_bytes: u8,
    assemblage: u32,
    minimum: u32,
}

impl Utf8Decoder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed one byte, sinking zero or one decoded code points.
    ///
    /// Zero when the byte extends an in-progress multi-byte sequence that is
    /// not yet complete; one in every other case (including the "restart"
    /// case, where the byte both completes an error report for the
    /// abandoned sequence *and* starts fresh; that restart recurses once).
    pub fn process(&mut self, sink: &mut impl Utf8Sink, byte: u8) {
        if self.expected_continuation_bytes > 0 {
            if byte & 0xC0 == 0x80 {
                self.assemblage = (self.assemblage << 6) | u32::from(byte & 0x3F);
                self.expected_continuation_bytes -= 1;
                if self.expected_continuation_bytes == 0 {
                    self.finish(sink);
                }
                return;
            }
            // Continuation expected but not seen: report the partial
            // sequence as a replacement-character error, then restart on
            // this byte as if it were the first of a new sequence.
            self.expected_continuation_bytes = 0;
            sink.process_decoded_utf8(REPLACEMENT, true, false);
        }
        self.start(sink, byte);
    }

    fn start(&mut self, sink: &mut impl Utf8Sink, byte: u8) {
        if byte & 0x80 == 0 {
            sink.process_decoded_utf8(char::from(byte), false, false);
        } else if byte & 0xE0 == 0xC0 {
            self.begin(2, u32::from(byte & 0x1F), 0x80);
        } else if byte & 0xF0 == 0xE0 {
            self.begin(3, u32::from(byte & 0x0F), 0x800);
        } else if byte & 0xF8 == 0xF0 {
            self.begin(4, u32::from(byte & 0x07), 0x1_0000);
        } else if byte & 0xFC == 0xF8 {
            self.begin(5, u32::from(byte & 0x03), 0x20_0000);
        } else if byte & 0xFE == 0xFC {
            self.begin(6, u32::from(byte & 0x01), 0x400_0000);
        } else {
            // Either a stray continuation byte (0x80..=0xBF) with no lead
            // byte, or one of the two bytes (0xFE, 0xFF) that are never
            // legal anywhere in UTF-8. Both are reported using the raw byte
            // value as the "character", matching the original's SendBad.
            sink.process_decoded_utf8(char::from(byte), true, false);
        }
    }

    fn begin(&mut self, continuations: u8, lead_bits: u32, minimum: u32) {
        self.expected_continuation_bytes = continuations - 1;
        self.assemblage = lead_bits;
        self.minimum = minimum;
    }

    fn finish(&mut self, sink: &mut impl Utf8Sink) {
        let value = self.assemblage;
        let overlong = value < self.minimum;
        let out_of_range = value > 0x0010_FFFF;
        let surrogate = (0xD800..=0xDFFF).contains(&value);
        let error = overlong || out_of_range || surrogate;
        let character = char::from_u32(value).unwrap_or(REPLACEMENT);
        sink.process_decoded_utf8(character, error, overlong);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[derive(Default)]
    struct Recorder(Vec<(char, bool, bool)>);
    impl Utf8Sink for Recorder {
        fn process_decoded_utf8(&mut self, character: char, error: bool, overlong: bool) {
            self.0.push((character, error, overlong));
        }
    }

    fn decode(bytes: &[u8]) -> Vec<(char, bool, bool)> {
        let mut decoder = Utf8Decoder::new();
        let mut sink = Recorder::default();
        for &b in bytes {
            decoder.process(&mut sink, b);
        }
        sink.0
    }

    #[test]
    fn ascii_passes_through() {
        assert_eq!(decode(b"Hi!"), vec![('H', false, false), ('i', false, false), ('!', false, false)]);
    }

    #[test]
    fn two_byte_sequence_decodes() {
        // U+00E9 'é' = 0xC3 0xA9
        assert_eq!(decode(&[0xC3, 0xA9]), vec![('\u{E9}', false, false)]);
    }

    #[test]
    fn three_byte_sequence_decodes() {
        // U+20AC '€' = 0xE2 0x82 0xAC
        assert_eq!(decode(&[0xE2, 0x82, 0xAC]), vec![('\u{20AC}', false, false)]);
    }

    #[test]
    fn four_byte_sequence_decodes() {
        // U+1F600 emoji = 0xF0 0x9F 0x98 0x80
        assert_eq!(decode(&[0xF0, 0x9F, 0x98, 0x80]), vec![('\u{1F600}', false, false)]);
    }

    #[test]
    fn overlong_two_byte_null_is_flagged() {
        // 0xC0 0x80 assembles to 0, below the 2-byte minimum of 0x80.
        let out = decode(&[0xC0, 0x80]);
        assert_eq!(out.len(), 1);
        assert!(out[0].1);
        assert!(out[0].2);
    }

    #[test]
    fn stray_continuation_byte_is_an_error_with_raw_byte() {
        let out = decode(&[0x80]);
        assert_eq!(out, vec![('\u{80}', true, false)]);
    }

    #[test]
    fn truncated_sequence_emits_replacement_then_restarts() {
        // 0xC3 starts a 2-byte sequence, 'A' is not a continuation byte.
        let out = decode(&[0xC3, b'A']);
        assert_eq!(out, vec![(REPLACEMENT, true, false), ('A', false, false)]);
    }

    #[test]
    fn surrogate_code_point_is_flagged_but_still_emitted() {
        // 0xED 0xA0 0x80 assembles to 0xD800, a UTF-16 surrogate.
        let out = decode(&[0xED, 0xA0, 0x80]);
        assert_eq!(out.len(), 1);
        assert!(out[0].1);
        assert!(!out[0].2);
    }

    #[test]
    fn round_trip_law_holds_when_no_errors() {
        let input = "héllo wörld — 测试".as_bytes();
        let decoded = decode(input);
        assert!(decoded.iter().all(|&(_, error, _)| !error));
        let reencoded: String = decoded.iter().map(|&(c, _, _)| c).collect();
        assert_eq!(reencoded.as_bytes(), input);
    }
}
