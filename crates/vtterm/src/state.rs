//! `SoftTerm`'s field layout: the cursor, margins, attribute/colour pen, mode
//! record, and saved-state slots described in §3's "SoftTerm state"
//! paragraph.

use vtcell::{Attributes, Colour, CursorAttributes, CursorGlyph};
use vtscreen::ScreenBuffer;

use crate::host::Host;
use crate::tabs::TabStops;

/// A rectangular extent in character cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Size {
    pub w: u16,
    pub h: u16,
}

/// A point in absolute display coordinates (not DEC's 1-based external ones).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Point {
    pub x: u16,
    pub y: u16,
}

/// The active cursor: position plus the "advance is pending" latch that
/// implements DECAWM's deferred wrap (`AdvanceOrPend`/`ClearPendingAdvance`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Cursor {
    pub x: u16,
    pub y: u16,
    pub advance_pending: bool,
}

/// The subset of terminal modes `SoftTerm` itself must consult on every
/// motion/erase operation (as opposed to modes that are pure host pass-through,
/// like DECCKM, or pure local state, like cursor visibility).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Modes {
    /// DECAWM: wrap at the right margin instead of overstriking in place.
    pub automatic_right_margin: bool,
    /// Whether erasure paints the current pen colour rather than the
    /// dedicated erased sentinel.
    pub background_colour_erase: bool,
    /// DECOM: cursor addressing and clamping are relative to the scroll
    /// region rather than the whole display.
    pub origin: bool,
    /// DECLRMM: `DECSLRM` is honoured at all (otherwise it is a no-op and
    /// `CSI s` means SCOSC instead).
    pub left_right_margins: bool,
}

pub struct SoftTerm<H> {
    pub(crate) host: H,
    pub screen: ScreenBuffer,

    pub(crate) display_origin: Point,
    pub(crate) display_margin: Size,
    pub(crate) scroll_origin: Point,
    pub(crate) scroll_margin: Size,

    pub(crate) active_cursor: Cursor,
    pub(crate) saved_cursor: Cursor,

    pub(crate) attributes: Attributes,
    pub(crate) colour: (Colour, Colour),
    pub(crate) saved_attributes: Attributes,
    pub(crate) saved_colour: (Colour, Colour),

    pub(crate) active_modes: Modes,
    pub(crate) saved_modes: Modes,

    pub(crate) scrolling: bool,
    pub(crate) overstrike: bool,
    pub(crate) square: bool,
    pub(crate) altbuffer: bool,
    pub(crate) invert_screen: bool,

    pub(crate) cursor_attributes: CursorAttributes,
    pub(crate) cursor_type: CursorGlyph,

    pub(crate) send_dec_locator: bool,
    pub(crate) send_xterm_mouse: bool,

    pub(crate) htabs: TabStops,
    pub(crate) vtabs: TabStops,

    pub(crate) last_printable_character: char,
    pub(crate) no_clear_screen_on_column_change: bool,
}

impl<H: Host> SoftTerm<H> {
    #[must_use]
    pub fn new(width: u16, height: u16, host: H) -> Self {
        let mut term = Self {
            host,
            screen: ScreenBuffer::new(width, height),
            display_origin: Point::default(),
            display_margin: Size { w: width, h: height },
            scroll_origin: Point::default(),
            scroll_margin: Size { w: width, h: height },
            active_cursor: Cursor::default(),
            saved_cursor: Cursor::default(),
            attributes: Attributes::empty(),
            colour: (Colour::DEFAULT_FOREGROUND, Colour::DEFAULT_BACKGROUND),
            saved_attributes: Attributes::empty(),
            saved_colour: (Colour::DEFAULT_FOREGROUND, Colour::DEFAULT_BACKGROUND),
            active_modes: Modes::default(),
            saved_modes: Modes::default(),
            scrolling: true,
            overstrike: true,
            square: true,
            altbuffer: false,
            invert_screen: false,
            cursor_attributes: CursorAttributes::VISIBLE | CursorAttributes::BLINK,
            cursor_type: CursorGlyph::Block,
            send_dec_locator: false,
            send_xterm_mouse: false,
            htabs: TabStops::new(width),
            vtabs: TabStops::new(height),
            last_printable_character: '\0',
            no_clear_screen_on_column_change: false,
        };
        term.htabs.set_regular(8);
        term
    }

    #[must_use]
    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    /// `Resize`: grows/shrinks the display, resets margins to the new full
    /// extent, and extends tab stops.
    pub fn resize(&mut self, width: u16, height: u16) {
        self.display_margin = Size { w: width, h: height };
        self.htabs.resize(width);
        self.vtabs.resize(height);
        let fill = vtcell::CharacterCell::blank(self.active_modes.background_colour_erase, self.colour);
        self.screen.set_size(width, height, fill);
        self.reset_margins();
    }

    pub(crate) fn update_cursor_pos(&mut self) {
        self.screen.set_cursor_pos(self.active_cursor.x, self.active_cursor.y);
    }

    pub(crate) fn update_cursor_type(&mut self) {
        self.screen.set_cursor_type(self.cursor_type, self.cursor_attributes);
    }

    pub(crate) fn update_screen_flags(&mut self) {
        let flags = if self.invert_screen { vtcell::ScreenFlags::INVERTED } else { vtcell::ScreenFlags::empty() };
        self.screen.set_screen_flags(flags);
    }

    /// The right edge of the scroll region, per the `scroll_origin.x +
    /// scroll_margin.w - 1` arithmetic repeated throughout the original.
    pub(crate) fn right_margin(&self) -> u16 {
        self.scroll_origin.x + self.scroll_margin.w.saturating_sub(1)
    }

    pub(crate) fn bottom_margin(&self) -> u16 {
        self.scroll_origin.y + self.scroll_margin.h.saturating_sub(1)
    }

    /// Whether the horizontal scroll margins span the whole display width,
    /// the degenerate case `DECLRMM` leaves IL/DL free to implement as a
    /// stride-aligned scroll rather than a row-by-row copy.
    pub(crate) fn horizontal_margins_are_full_width(&self) -> bool {
        self.scroll_origin.x == self.display_origin.x && self.right_margin() == self.display_origin.x + self.display_margin.w.saturating_sub(1)
    }

    pub(crate) fn erasure(&self, character: char) -> vtcell::CharacterCell {
        vtcell::CharacterCell::erasure(character, self.active_modes.background_colour_erase, self.colour)
    }
}
