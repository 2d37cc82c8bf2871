/// Realizer-wide rendering choices, grounded on `TUIOutputBase::Options`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Options {
    /// Render `BOLD` as a foreground brightness change instead of SGR `1`.
    pub bold_as_colour: bool,
    /// Render `FAINT` as a foreground/background dim instead of SGR `2`.
    pub faint_as_colour: bool,
    /// Re-tag default/erased colours as explicit 256-colour before
    /// emission, for hosts that mishandle the bare default-colour SGRs.
    pub no_default_colour: bool,
    /// Skip `XTermAlternateScreenBuffer` on entry/exit.
    pub no_alternate_screen_buffer: bool,
    /// `DECCKM`: cursor keys send application- rather than ANSI-mode
    /// sequences.
    pub cursor_application_mode: bool,
    /// `DECKPAM`/`DECNKM`: numeric keypad sends application- rather than
    /// numeric-mode sequences.
    pub calculator_application_mode: bool,
    /// `0` draws the mouse pointer as a fixed glyph; above `0` it instead
    /// toggles the mark state of whatever cell it's over (host terminals
    /// capable enough to manage their own pointer glyph).
    pub tui_level: u8,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            bold_as_colour: false,
            faint_as_colour: false,
            no_default_colour: false,
            no_alternate_screen_buffer: false,
            cursor_application_mode: false,
            calculator_application_mode: false,
            tui_level: 0,
        }
    }
}
