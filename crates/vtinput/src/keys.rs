//! Named extended-key codes and the CSI/SS3 tables that decode onto them.
//!
//! Key codes below `0x0100` are literally their ASCII value (`Tab`, `Enter`,
//! `Backspace`, `Esc`); codes from `0x0100` name keys with no ASCII
//! representation (arrows, Home/End, ...); `0x0200 + n` names function key
//! `Fn`.

use vtdecode::Args;
use vtmsg::{Message, Modifiers};

pub const TAB: u16 = 0x0009;
pub const ENTER: u16 = 0x000D;
pub const BACKSPACE: u16 = 0x007F;
pub const ESCAPE: u16 = 0x001B;

pub const UP: u16 = 0x0100;
pub const DOWN: u16 = 0x0101;
pub const RIGHT: u16 = 0x0102;
pub const LEFT: u16 = 0x0103;
pub const HOME: u16 = 0x0104;
pub const END: u16 = 0x0105;
pub const PAGE_UP: u16 = 0x0106;
pub const PAGE_DOWN: u16 = 0x0107;
pub const INSERT: u16 = 0x0108;
pub const DELETE: u16 = 0x0109;

const FUNCTION_BASE: u16 = 0x0200;

#[must_use]
pub fn function_key(n: u16) -> u16 {
    FUNCTION_BASE + n
}

/// The final byte of a 7-bit `SS3`-introduced sequence (`ESC O <letter>`),
/// used for application-cursor-mode arrows, Home/End, and the PF1-PF4 keys.
#[must_use]
pub fn ss3_letter_key(letter: char) -> Option<u16> {
    Some(match letter {
        'A' => UP,
        'B' => DOWN,
        'C' => RIGHT,
        'D' => LEFT,
        'H' => HOME,
        'F' => END,
        'P' => function_key(1),
        'Q' => function_key(2),
        'R' => function_key(3),
        'S' => function_key(4),
        _ => return None,
    })
}

/// The final byte of a `CSI <params> <letter>` sequence with no `~`, used
/// for normal-mode arrows, Home/End in most dialects.
fn csi_letter_key(letter: char) -> Option<u16> {
    Some(match letter {
        'A' => UP,
        'B' => DOWN,
        'C' => RIGHT,
        'D' => LEFT,
        'H' => HOME,
        'F' => END,
        _ => return None,
    })
}

/// DEC FNK (`CSI <n> ~`) numbers, per the widely supported xterm table.
fn fnk_key(n: u32) -> Option<u16> {
    Some(match n {
        1 => HOME,
        2 => INSERT,
        3 => DELETE,
        4 => END,
        5 => PAGE_UP,
        6 => PAGE_DOWN,
        11..=15 => function_key((n - 10) as u16),
        17..=21 => function_key((n - 11) as u16),
        23..=26 => function_key((n - 12) as u16),
        28..=29 => function_key((n - 13) as u16),
        31..=34 => function_key((n - 14) as u16),
        _ => return None,
    })
}

/// The xterm modified-key modifier encoding: `CSI 1 ; m <letter>` / `CSI n ;
/// m ~` carry `m - 1` as a bitmask of Shift(1)/Alt(2)/Control(4)/Meta(8),
/// which this crate maps onto its own [`Modifiers`] bits.
fn xterm_modifiers(raw: u32) -> Modifiers {
    let bits = raw.saturating_sub(1);
    let mut modifiers = Modifiers::empty();
    if bits & 0x1 != 0 {
        modifiers |= Modifiers::LEVEL2; // Shift
    }
    if bits & 0x2 != 0 {
        modifiers |= Modifiers::LEVEL3; // Alt/Meta-as-Alt
    }
    if bits & 0x4 != 0 {
        modifiers |= Modifiers::CONTROL;
    }
    if bits & 0x8 != 0 {
        modifiers |= Modifiers::SUPER; // Meta
    }
    modifiers
}

/// Attempts to classify a control sequence as a key event. Returns `None`
/// (via the `Option<()>` convention shared with [`crate::mouse::try_dispatch`])
/// when `final_byte` is not one this table recognises, so the caller can try
/// the next classifier in the chain.
pub fn try_dispatch<S: crate::Sink>(
    final_byte: char,
    first_private_parameter: char,
    args: &Args,
    sink: &mut S,
) -> Option<()> {
    if first_private_parameter != '\0' {
        return None;
    }
    if final_byte == '~' {
        let n = args.arg_zero_if_empty(0);
        let key = fnk_key(n)?;
        let modifiers = modifiers_from_second_arg(args);
        sink.message(Message::ExtendedKey { key, modifiers });
        return Some(());
    }
    let key = csi_letter_key(final_byte)?;
    let modifiers = modifiers_from_second_arg(args);
    sink.message(Message::ExtendedKey { key, modifiers });
    Some(())
}

/// `CSI 1 ; m <letter>` / `CSI <n> ; m ~` carry the modifier mask as the
/// second parameter; a bare sequence with only one parameter (or none) has
/// no modifiers.
fn modifiers_from_second_arg(args: &Args) -> Modifiers {
    if args.arg_count() > 1 {
        xterm_modifiers(args.arg_zero_if_empty(1))
    } else {
        Modifiers::empty()
    }
}
