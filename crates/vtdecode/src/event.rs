use crate::args::Args;

/// One classified unit of decoder output, handed to a [`crate::Sink`].
#[derive(Debug, Clone, PartialEq)]
pub enum Event<'a> {
    /// An ordinary graphic character, tagged with the shift level (`GL`/`GR`
    /// invocation, per SI/SO/SS2/SS3) that was in effect when it arrived.
    /// `error` is set when [`vtutf8`] had to substitute the replacement
    /// character for malformed input.
    Printable { character: char, shift_level: u8, error: bool },

    /// A C0 or C1 control character that the decoder does not otherwise
    /// special-case (its numeric value is always `< 0x20` or in
    /// `0x80..=0x9F`).
    ControlCharacter(char),

    /// `ESC` followed by zero or one intermediate bytes and a final byte,
    /// with no parameter bytes; `first_intermediate` is `'\0'` when none was
    /// present.
    EscapeSequence { final_byte: char, first_intermediate: char },

    /// A complete CSI-introduced control sequence. `first_private_parameter`
    /// is one of `? > = <` when the sequence used a private parameter
    /// introducer, else `'\0'`; `last_intermediate` is the final
    /// `0x20..=0x2F` intermediate byte seen before the final byte, or `'\0'`.
    ControlSequence { final_byte: char, last_intermediate: char, first_private_parameter: char, args: &'a Args },

    /// A complete DCS/OSC/PM/APC/SOS string, terminated by ST (or by the
    /// decoder's BEL/CAN/SUB string-terminator tolerance). Only produced
    /// when the decoder was constructed with `permit_control_strings`;
    /// otherwise such strings are consumed and dropped silently.
    ControlString { introducer: char, data: &'a str },
}
