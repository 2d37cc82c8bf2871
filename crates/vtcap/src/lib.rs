#![warn(clippy::pedantic)]
//! The capability descriptor that constrains what [`vtoutput`](../vtoutput)
//! may emit and what [`vtterm`](../vtterm) may assume a host terminal
//! understands.
//!
//! Field list grounded verbatim on
//! `examples/original_source/source/TerminalCapabilities.h`. The original
//! populates this from a compiled-in terminfo-like database keyed by `TERM`;
//! this workspace has no such database, so [`detect`] instead pattern-matches
//! common environment values onto the closest [preset](#presets) (see
//! `DESIGN.md`'s Open Questions for why that's a deliberate simplification,
//! not a guess).

use std::collections::HashMap;

/// How many distinct colours (and via which SGR sub-parameter grammar) the
/// terminal accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ColourLevel {
    NoColours,
    Ecma8Colours,
    Ecma16Colours,
    /// Accepts indexed 256-colour SGR but only in the non-standard
    /// semicolon-separated `38;5;N` form.
    IndexedColourFaulty,
    /// Accepts indexed 256-colour SGR in the ISO 8613-6 colon-separated
    /// `38:5:N` form.
    IsoIndexedColour,
    /// Accepts direct (true-colour) SGR but only in the non-standard
    /// semicolon-separated `38;2;R;G;B` form.
    DirectColourFaulty,
    /// Accepts direct (true-colour) SGR in the ISO 8613-6 colon-separated
    /// `38:2:R:G:B` form.
    IsoDirectColour,
}

/// Which cursor-shape ("cursor style") command dialect the terminal
/// understands, if any.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CursorShapeCommand {
    NoScusr,
    /// The original VT520 `DECSCUSR` (blink/steady block/underline only).
    OriginalDecscusr,
    /// xterm's extended `DECSCUSR` (adds bar shapes).
    XtermDecscusr,
    /// A further-extended numeric range some terminals layer on top of
    /// xterm's.
    ExtendedDecscusr,
    /// The Linux console's distinct (non-DECSCUSR) cursor-shape escape.
    LinuxScusr,
}

/// The full capability record. Every boolean names a specific deficiency or
/// optional feature rather than a generic "level", matching the original's
/// one-flag-per-quirk design, so `vtoutput` branches on these directly instead
/// of re-deriving them from `colour_level`/`cursor_shape_command`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CapabilityDescriptor {
    pub permit_fake_truecolour: bool,
    pub colour_level: ColourLevel,
    pub cursor_shape_command: CursorShapeCommand,

    // Standards non-conformance, deficiencies, and bugs.
    pub lacks_pending_wrap: bool,
    pub lacks_nel: bool,
    pub lacks_ri: bool,
    pub lacks_ind: bool,
    pub lacks_ctc: bool,
    pub lacks_hpa: bool,
    pub lacks_rep: bool,
    pub lacks_invisible: bool,
    pub lacks_strikethrough: bool,
    pub lacks_reverse_off: bool,
    pub faulty_reverse_video: bool,
    pub faulty_inverse_erase: bool,
    pub faulty_sp_rep: bool,
    pub linux_editing_keypad: bool,
    pub interix_function_keys: bool,
    pub teken_function_keys: bool,
    pub sco_function_keys: bool,
    pub rxvt_function_keys: bool,
    pub linux_function_keys: bool,

    // DEC and other private modes and control sequences.
    pub use_dec_private_mode: bool,
    pub use_sco_private_mode: bool,
    pub use_decstr: bool,
    pub use_decst8c: bool,
    pub use_dec_locator: bool,
    pub use_decsnls: bool,
    pub use_decscpp: bool,
    pub use_decslrm: bool,
    pub use_decnkm: bool,
    pub has_dececm: bool,
    pub initial_dececm: bool,
    pub has_dtterm_decslpp_extensions: bool,
    pub has_xterm1006_mouse: bool,
    pub has_square_mode: bool,

    // Other augmentations.
    pub reset_sets_tabs: bool,
    pub has_extended_underline: bool,
}

impl CapabilityDescriptor {
    /// A maximally conservative descriptor: no colour, no private modes, no
    /// known deficiencies (because nothing is claimed to work in the first
    /// place). The starting point every [preset](#presets) builds on by
    /// overriding only the fields it actually differs on.
    const BASE: Self = Self {
        permit_fake_truecolour: false,
        colour_level: ColourLevel::NoColours,
        cursor_shape_command: CursorShapeCommand::NoScusr,
        lacks_pending_wrap: true,
        lacks_nel: true,
        lacks_ri: true,
        lacks_ind: true,
        lacks_ctc: true,
        lacks_hpa: true,
        lacks_rep: true,
        lacks_invisible: true,
        lacks_strikethrough: true,
        lacks_reverse_off: true,
        faulty_reverse_video: false,
        faulty_inverse_erase: false,
        faulty_sp_rep: false,
        linux_editing_keypad: false,
        interix_function_keys: false,
        teken_function_keys: false,
        sco_function_keys: false,
        rxvt_function_keys: false,
        linux_function_keys: false,
        use_dec_private_mode: false,
        use_sco_private_mode: false,
        use_decstr: false,
        use_decst8c: false,
        use_dec_locator: false,
        use_decsnls: false,
        use_decscpp: false,
        use_decslrm: false,
        use_decnkm: false,
        has_dececm: false,
        initial_dececm: false,
        has_dtterm_decslpp_extensions: false,
        has_xterm1006_mouse: false,
        has_square_mode: false,
        reset_sets_tabs: false,
        has_extended_underline: false,
    };

    /// The baseline DEC VT220: ECMA-48 motion controls all present, no
    /// colour, original `DECSCUSR`, DEC private modes and `DECSTR` supported.
    /// Used as the fallback when [`detect`] cannot identify the environment.
    #[must_use]
    pub fn vt220() -> Self {
        Self {
            lacks_pending_wrap: false,
            lacks_nel: false,
            lacks_ri: false,
            lacks_ind: false,
            lacks_ctc: false,
            lacks_hpa: false,
            lacks_rep: false,
            use_dec_private_mode: true,
            use_decstr: true,
            reset_sets_tabs: true,
            ..Self::BASE
        }
    }

    /// A modern xterm in 256-colour mode: everything `vt220` has, plus
    /// indexed and direct colour, the xterm `DECSCUSR` bar shapes, SGR mouse,
    /// rectangular-area DEC private extensions, and no inherited
    /// deficiencies.
    #[must_use]
    pub fn xterm_256color() -> Self {
        Self {
            colour_level: ColourLevel::IsoDirectColour,
            cursor_shape_command: CursorShapeCommand::XtermDecscusr,
            use_dec_locator: true,
            use_decsnls: true,
            use_decscpp: true,
            use_decslrm: true,
            has_dtterm_decslpp_extensions: true,
            has_xterm1006_mouse: true,
            has_extended_underline: true,
            ..Self::vt220()
        }
    }

    /// The Linux virtual console: 16-colour only (no sub-parameter form at
    /// all, hence `Ecma16Colours` rather than either indexed variant), its
    /// own cursor-shape escape, no invisible attribute, reverse-video bugs,
    /// and the Linux function-key dialect.
    #[must_use]
    pub fn linux_console() -> Self {
        Self {
            colour_level: ColourLevel::Ecma16Colours,
            cursor_shape_command: CursorShapeCommand::LinuxScusr,
            lacks_invisible: true,
            lacks_strikethrough: true,
            faulty_reverse_video: true,
            linux_editing_keypad: true,
            linux_function_keys: true,
            ..Self::vt220()
        }
    }

    /// A "dumb" terminal / plain pipe: nothing beyond bare C0 controls is
    /// assumed to work.
    #[must_use]
    pub fn dumb() -> Self {
        Self::BASE
    }
}

/// Detects a capability descriptor from the process environment.
///
/// Pattern-matches `TERM`/`COLORTERM` onto the closest named preset and
/// falls back to [`CapabilityDescriptor::vt220`] (a conservative featureset,
/// not [`CapabilityDescriptor::dumb`]) for anything unrecognised, since most
/// terminals that bother setting `TERM` at all implement at least VT220-era
/// ECMA-48.
#[must_use]
pub fn detect(env: &HashMap<String, String>) -> CapabilityDescriptor {
    let term = env.get("TERM").map(String::as_str).unwrap_or_default();
    let colorterm = env.get("COLORTERM").map(String::as_str).unwrap_or_default();

    if term.is_empty() || term == "dumb" {
        return CapabilityDescriptor::dumb();
    }
    if term == "linux" {
        return CapabilityDescriptor::linux_console();
    }
    if colorterm == "truecolor" || colorterm == "24bit" || term.contains("256color") || term.starts_with("xterm") {
        return CapabilityDescriptor::xterm_256color();
    }
    CapabilityDescriptor::vt220()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn env(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs.iter().map(|&(k, v)| (k.to_string(), v.to_string())).collect()
    }

    #[test]
    fn empty_term_is_dumb() {
        assert_eq!(detect(&env(&[])), CapabilityDescriptor::dumb());
    }

    #[test]
    fn dumb_term_is_dumb() {
        assert_eq!(detect(&env(&[("TERM", "dumb")])), CapabilityDescriptor::dumb());
    }

    #[test]
    fn linux_term_is_linux_console() {
        assert_eq!(detect(&env(&[("TERM", "linux")])), CapabilityDescriptor::linux_console());
    }

    #[test]
    fn xterm_256color_term_is_detected() {
        assert_eq!(detect(&env(&[("TERM", "xterm-256color")])), CapabilityDescriptor::xterm_256color());
    }

    #[test]
    fn truecolor_colorterm_upgrades_plain_xterm() {
        assert_eq!(
            detect(&env(&[("TERM", "xterm"), ("COLORTERM", "truecolor")])),
            CapabilityDescriptor::xterm_256color()
        );
    }

    #[test]
    fn unrecognised_term_falls_back_to_vt220() {
        assert_eq!(detect(&env(&[("TERM", "some-unknown-terminal")])), CapabilityDescriptor::vt220());
    }

    #[test]
    fn vt220_has_core_ecma48_motion_but_no_colour() {
        let caps = CapabilityDescriptor::vt220();
        assert!(!caps.lacks_ind);
        assert_eq!(caps.colour_level, ColourLevel::NoColours);
    }
}
