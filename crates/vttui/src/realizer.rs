use std::io::{self, Write};

use vtcap::CapabilityDescriptor;
use vtcell::{Attributes, CharacterCell, Colour, CursorAttributes, CursorGlyph};
use vtcompositor::Compositor;
use vtoutput::Emitter;

use crate::{FrameSource, Options};

const BF: Attributes = Attributes::from_bits_truncate(Attributes::BOLD.bits() | Attributes::FAINT.bits());
const FE: Attributes = Attributes::from_bits_truncate(Attributes::FRAME.bits() | Attributes::ENCIRCLE.bits());

/// Per-frame diff state: the last attribute mask and colour pair emitted,
/// and where the realizer believes the host terminal's cursor actually is.
///
/// Grounded on `TUIOutputBase`'s data members; the host file descriptor and
/// `termios` save/restore it also carries are left to the caller (see the
/// crate doc comment).
pub struct Realizer {
    options: Options,
    cursor_y: u16,
    cursor_x: u16,
    current_fg: Colour,
    current_bg: Colour,
    current_attr: Attributes,
    current_attr_unknown: bool,
    cursor_glyph: CursorGlyph,
    cursor_attributes: CursorAttributes,
    invert_screen: Option<bool>,
}

impl Realizer {
    #[must_use]
    pub fn new(options: Options) -> Self {
        Self {
            options,
            cursor_y: 0,
            cursor_x: 0,
            // An impossible pair (Erased-alpha white-on-black never actually
            // occurs as a pen colour) forces the first `print` to emit SGR
            // colours rather than assume the terminal already matches.
            current_fg: Colour::ERASED_FOREGROUND,
            current_bg: Colour::ERASED_BACKGROUND,
            current_attr: Attributes::empty(),
            current_attr_unknown: true,
            cursor_glyph: CursorGlyph::Box,
            cursor_attributes: CursorAttributes::VISIBLE,
            invert_screen: None,
        }
    }

    fn width(cap: &CapabilityDescriptor, ch: char) -> u16 {
        let w = u16::from(vtunicode::width(ch));
        if cap.has_square_mode && w == 2 { 1 } else { w }
    }

    /// Applies screen-inversion, bold/faint-as-colour, pointer-glyph, and
    /// mark-complement transforms to a copy of a cell, just before it is
    /// measured or emitted.
    fn fixup(&self, cap: &CapabilityDescriptor, mut cell: CharacterCell, marked: bool, is_pointer: bool) -> CharacterCell {
        if self.invert_screen == Some(true) {
            cell.attributes ^= Attributes::INVERSE;
        }
        let mut marked = marked;
        if self.options.faint_as_colour || self.options.bold_as_colour || cap.faulty_reverse_video {
            if cell.attributes.contains(Attributes::INVERSE) {
                std::mem::swap(&mut cell.foreground, &mut cell.background);
                cell.attributes.remove(Attributes::INVERSE);
            }
            if self.options.faint_as_colour && cell.attributes.contains(Attributes::FAINT) {
                if cell.foreground.is_black() {
                    cell.background = cell.background.dim();
                } else {
                    cell.foreground = cell.foreground.dim();
                }
                cell.attributes.remove(Attributes::FAINT);
            }
            if self.options.bold_as_colour && cell.attributes.contains(Attributes::BOLD) {
                if cell.foreground.is_black() {
                    cell.background = cell.background.bright();
                } else {
                    cell.foreground = cell.foreground.bright();
                }
                cell.attributes.remove(Attributes::BOLD);
            }
        }
        if is_pointer {
            if self.options.tui_level > 0 {
                marked = !marked;
            } else {
                cell.character = '\u{1FBB0}';
            }
        }
        if marked {
            cell.foreground = cell.foreground.complement();
            cell.background = cell.background.complement();
        }
        if self.options.no_default_colour {
            // Re-tag, rather than re-map: the RGB value already renders the
            // same; only the provenance needs to stop looking "default".
            if cell.foreground.is_default_or_erased() {
                cell.foreground = Colour::new(vtcell::Alpha::Indexed256, cell.foreground.red, cell.foreground.green, cell.foreground.blue);
            }
            if cell.background.is_default_or_erased() {
                cell.background = Colour::new(vtcell::Alpha::Indexed256, cell.background.red, cell.background.green, cell.background.blue);
            }
        }
        if cap.lacks_invisible && cell.attributes.contains(Attributes::INVISIBLE) {
            cell.attributes.remove(Attributes::INVISIBLE);
            cell.foreground = cell.background;
        }
        cell
    }

    fn count_cheap(
        &self,
        cap: &CapabilityDescriptor,
        comp: &Compositor,
        row: u16,
        col: u16,
        cols: u16,
        attr: Attributes,
        fg: Colour,
        bg: Colour,
        ch: char,
    ) -> u16 {
        for i in 0..cols {
            if comp.is_marked(false, row, col + i) || comp.is_pointer(row, col + i) {
                return i;
            }
            let cell = self.fixup(cap, comp.cur_at(row, col + i).cell(), false, false);
            if cell.attributes != attr || cell.foreground != fg || cell.background != bg || cell.character != ch {
                return i;
            }
        }
        cols
    }

    fn count_cheap_narrow(&self, cap: &CapabilityDescriptor, comp: &Compositor, row: u16, col: u16, cols: u16) -> u16 {
        for i in 0..cols {
            if comp.is_marked(false, row, col + i) || comp.is_pointer(row, col + i) {
                return i;
            }
            let cell = self.fixup(cap, comp.cur_at(row, col + i).cell(), false, false);
            if cell.attributes != self.current_attr
                || cell.foreground != self.current_fg
                || cell.background != self.current_bg
                || Self::width(cap, cell.character) != 1
            {
                return i;
            }
        }
        cols
    }

    fn count_cheap_eraseable(&self, cap: &CapabilityDescriptor, comp: &Compositor, row: u16, col: u16, cols: u16, attr: Attributes) -> u16 {
        self.count_cheap(cap, comp, row, col, cols, attr, self.current_fg, self.current_bg, ' ')
    }

    fn count_cheap_spaces(&self, cap: &CapabilityDescriptor, comp: &Compositor, row: u16, col: u16, cols: u16) -> u16 {
        self.count_cheap(cap, comp, row, col, cols, self.current_attr, self.current_fg, self.current_bg, ' ')
    }

    fn count_cheap_repeatable(&self, cap: &CapabilityDescriptor, comp: &Compositor, row: u16, col: u16, cols: u16, ch: char) -> u16 {
        self.count_cheap(cap, comp, row, col, cols, self.current_attr, self.current_fg, self.current_bg, ch)
    }

    /// Moves the host terminal's cursor to `(row, col)` using whichever of
    /// `CR`+newlines, `RI`/`IND`, `CUU`/`CUD`/`CUL`/`CUR`, reprinting
    /// unchanged cells, or a direct `CUP` is cheapest.
    fn goto_yx(&mut self, comp: &Compositor, out: &mut Emitter<'_, impl Write>, row: u16, col: u16) -> io::Result<()> {
        if row == self.cursor_y && col == self.cursor_x {
            return Ok(());
        }
        if col == 0 && row == 0 {
            out.cup(0, 0)?;
            self.cursor_y = 0;
            self.cursor_x = 0;
            return Ok(());
        }
        let cap = *out.capability();
        let use_home_run = match col {
            0 => col != self.cursor_x,
            1 => self.cursor_x > 2,
            2 => self.cursor_x > 5,
            _ => false,
        };
        if use_home_run {
            if row > self.cursor_y {
                out.newline()?;
                self.cursor_y += 1;
                if row > self.cursor_y {
                    let n = row - self.cursor_y;
                    if !cap.lacks_ind && n <= 3 {
                        out.print_control_characters(0x84, usize::from(n))?;
                    } else if n <= 6 {
                        out.print_control_characters(b'\n', usize::from(n))?;
                    } else {
                        out.cud(n)?;
                    }
                    self.cursor_y = row;
                }
            } else {
                out.print_control_character(b'\r')?;
            }
            self.cursor_x = 0;
        }
        if col == self.cursor_x {
            if row < self.cursor_y {
                let n = self.cursor_y - row;
                if !cap.lacks_ri && n <= 3 {
                    out.print_control_characters(0x8D, usize::from(n))?;
                } else {
                    out.cuu(n)?;
                }
                self.cursor_y = row;
            } else if row > self.cursor_y {
                let n = row - self.cursor_y;
                if !cap.lacks_ind && n <= 3 {
                    out.print_control_characters(0x84, usize::from(n))?;
                } else if n <= 6 {
                    out.print_control_characters(b'\n', usize::from(n))?;
                } else {
                    out.cud(n)?;
                }
                self.cursor_y = row;
            }
        } else if row == self.cursor_y && self.cursor_x < comp.query_w() {
            if col < self.cursor_x {
                let n = self.cursor_x - col;
                if n <= 6 {
                    out.print_control_characters(0x08, usize::from(n))?;
                } else {
                    out.cub(n)?;
                }
                self.cursor_x = col;
            } else if col > self.cursor_x {
                let n = col - self.cursor_x;
                if n <= 6 && n == self.count_cheap_narrow(&cap, comp, self.cursor_y, self.cursor_x, n) {
                    for i in self.cursor_x..col {
                        let cell = comp.cur_at(self.cursor_y, i).cell();
                        self.print(&cap, comp, out, cell, false, false)?;
                    }
                } else {
                    out.cuf(n)?;
                }
                self.cursor_x = col;
            }
        } else {
            out.cup(row, col)?;
            self.cursor_y = row;
            self.cursor_x = col;
        }
        Ok(())
    }

    fn sgr_attr1(&self, out: &mut Emitter<'_, impl Write>, attr: Attributes, mask: Attributes, m: char, semi: &mut Option<char>) -> io::Result<()> {
        if (attr & mask) != (self.current_attr & mask) {
            if let Some(s) = *semi {
                out.print_graphic_character(s)?;
            }
            if (attr & mask).is_empty() {
                out.print_graphic_character('2')?;
            }
            out.print_graphic_character(m)?;
            *semi = Some(';');
        }
        Ok(())
    }

    /// Emits the SGR parameter delta for `attr` against `self.current_attr`,
    /// then commits `attr` as current.
    fn sgr_attr(&mut self, out: &mut Emitter<'_, impl Write>, mut attr: Attributes) -> io::Result<()> {
        if attr == self.current_attr {
            return Ok(());
        }
        let cap = *out.capability();
        out.csi()?;
        let mut semi: Option<char> = None;
        if cap.lacks_reverse_off && self.current_attr.contains(Attributes::INVERSE) {
            out.print_graphic_character('0')?;
            semi = Some(';');
            self.current_attr = Attributes::empty();
        }
        if (attr & BF) != (self.current_attr & BF) {
            if (self.current_attr & BF) != Attributes::empty() {
                if let Some(s) = semi {
                    out.print_graphic_character(s)?;
                }
                out.print_graphic_text("22")?;
                semi = Some(';');
            }
            if attr.contains(Attributes::BOLD) {
                if let Some(s) = semi {
                    out.print_graphic_character(s)?;
                }
                out.print_graphic_character('1')?;
                semi = Some(';');
            }
            if attr.contains(Attributes::FAINT) {
                if let Some(s) = semi {
                    out.print_graphic_character(s)?;
                }
                out.print_graphic_character('2')?;
                semi = Some(';');
            }
        }
        if (attr & FE) != (self.current_attr & FE) {
            if (self.current_attr & FE) != Attributes::empty() {
                if let Some(s) = semi {
                    out.print_graphic_character(s)?;
                }
                out.print_graphic_text("54")?;
                semi = Some(';');
            }
            if attr.contains(Attributes::FRAME) {
                if let Some(s) = semi {
                    out.print_graphic_character(s)?;
                }
                out.print_graphic_text("51")?;
                semi = Some(';');
            }
            if attr.contains(Attributes::ENCIRCLE) {
                if let Some(s) = semi {
                    out.print_graphic_character(s)?;
                }
                out.print_graphic_text("52")?;
                semi = Some(';');
            }
        }
        self.sgr_attr1(out, attr, Attributes::ITALIC, '3', &mut semi)?;
        let underlines = Attributes::UNDERLINES;
        if (attr & underlines) != (self.current_attr & underlines) {
            if let Some(s) = semi {
                out.print_graphic_character(s)?;
            }
            let bits = attr & underlines;
            if bits.is_empty() {
                out.print_graphic_character('2')?;
            }
            out.print_graphic_character('4')?;
            if cap.has_extended_underline && !bits.is_empty() {
                out.print_subparameter(u16::from(attr.underline() as u8))?;
            }
            semi = Some(';');
        }
        self.sgr_attr1(out, attr, Attributes::BLINK, '5', &mut semi)?;
        self.sgr_attr1(out, attr, Attributes::INVERSE, '7', &mut semi)?;
        if !cap.lacks_invisible {
            self.sgr_attr1(out, attr, Attributes::INVISIBLE, '8', &mut semi)?;
        } else {
            attr.remove(Attributes::INVISIBLE);
        }
        if !cap.lacks_strikethrough {
            self.sgr_attr1(out, attr, Attributes::STRIKETHROUGH, '9', &mut semi)?;
        } else {
            attr.remove(Attributes::STRIKETHROUGH);
        }
        if (attr & Attributes::OVERLINE) != (self.current_attr & Attributes::OVERLINE) {
            if let Some(s) = semi {
                out.print_graphic_character(s)?;
            }
            out.print_graphic_character('5')?;
            out.print_graphic_character(if attr.contains(Attributes::OVERLINE) { '3' } else { '5' })?;
        }
        out.print_graphic_character('m')?;
        self.current_attr = attr;
        Ok(())
    }

    /// Writes one (already-copied) cell, applying `fixup`, SGR colour and
    /// attribute deltas, and advancing the tracked cursor column.
    fn print(
        &mut self,
        cap: &CapabilityDescriptor,
        comp: &Compositor,
        out: &mut Emitter<'_, impl Write>,
        cell: CharacterCell,
        marked: bool,
        is_pointer: bool,
    ) -> io::Result<()> {
        let mut cell = self.fixup(cap, cell, marked, is_pointer);
        let mut w = Self::width(cap, cell.character);
        if w < 1 {
            cell.character = ' ';
            w = 1;
        }
        if cell.foreground != self.current_fg {
            out.sgr_colour(true, cell.foreground)?;
            self.current_fg = cell.foreground;
        }
        if cell.background != self.current_bg {
            out.sgr_colour(false, cell.background)?;
            self.current_bg = cell.background;
        }
        self.sgr_attr(out, cell.attributes)?;
        out.print_graphic_character(cell.character)?;
        for _ in 0..w {
            self.cursor_x += 1;
            if cap.lacks_pending_wrap && self.cursor_x >= comp.query_w() {
                self.cursor_x = 0;
                if self.cursor_y < comp.query_h() {
                    self.cursor_y += 1;
                }
            }
        }
        Ok(())
    }

    /// Raw-mode entry sequence: alternate screen, DEC private modes, cursor
    /// shape, mouse reporting. Assumes the caller has already put the host
    /// file descriptor into raw mode.
    pub fn enter_full_screen_mode(&mut self, out: &mut Emitter<'_, impl Write>) -> io::Result<()> {
        let cap = *out.capability();
        if cap.use_dec_private_mode {
            out.xterm_save_restore(true)?;
            out.xterm_alternate_screen_buffer(!self.options.no_alternate_screen_buffer)?;
        }
        out.cup(0, 0)?;
        self.cursor_y = 0;
        self.cursor_x = 0;
        self.current_attr = Attributes::empty();
        out.sgr_reset()?;
        out.sgr_colour(true, Colour::DEFAULT_FOREGROUND)?;
        out.sgr_colour(false, Colour::DEFAULT_BACKGROUND)?;
        self.current_fg = Colour::DEFAULT_FOREGROUND;
        self.current_bg = Colour::DEFAULT_BACKGROUND;
        if cap.use_dec_locator && !cap.has_xterm1006_mouse {
            out.dec_private_mode(1003, true)?; // DECELR
            out.dec_private_mode(1001, true)?; // DECSLE press
            out.dec_private_mode(1001, false)?; // DECSLE release
        }
        if cap.use_sco_private_mode && cap.has_square_mode {
            out.square_mode(true)?;
        }
        if cap.use_dec_private_mode {
            out.decawm(false)?;
            out.decbkm(true)?;
            if cap.has_xterm1006_mouse {
                out.xterm_send_any_mouse_events(true)?;
            } else {
                out.xterm_no_mouse_events()?;
            }
            out.decnkm(self.options.calculator_application_mode)?;
        }
        out.change_cursor_visibility(false)?;
        out.scusr(self.cursor_attributes, self.cursor_glyph)?;
        out.flush()
    }

    /// Restores the terminal to its entry state; the caller must still
    /// restore the file descriptor's original `termios` afterward.
    pub fn exit_full_screen_mode(&mut self, out: &mut Emitter<'_, impl Write>) -> io::Result<()> {
        let cap = *out.capability();
        out.scusr_reset()?;
        out.change_cursor_visibility(true)?;
        if cap.use_dec_private_mode {
            out.decnkm(false)?;
            out.xterm_no_mouse_events()?;
            out.decbkm(false)?;
            out.decawm(true)?;
        }
        if cap.use_dec_locator {
            out.dec_private_mode(1001, false)?;
            out.dec_private_mode(1003, false)?;
        }
        out.sgr_colour(false, Colour::DEFAULT_BACKGROUND)?;
        out.sgr_colour(true, Colour::DEFAULT_FOREGROUND)?;
        out.sgr_reset()?;
        self.current_attr = Attributes::empty();
        self.current_fg = Colour::DEFAULT_FOREGROUND;
        self.current_bg = Colour::DEFAULT_BACKGROUND;
        out.cup(0, 0)?;
        self.cursor_y = 0;
        self.cursor_x = 0;
        if cap.use_dec_private_mode {
            out.xterm_alternate_screen_buffer(false)?;
            out.xterm_save_restore(false)?;
        }
        out.flush()
    }

    /// Walks every touched `cur` cell in row-major order and emits it,
    /// applying the erase-to-EOL and `REP`-run optimisations before falling
    /// back to a plain positioned write.
    pub fn write_changed_cells_to_output(&mut self, comp: &mut Compositor, out: &mut Emitter<'_, impl Write>) -> io::Result<()> {
        let cap = *out.capability();
        let inverted = comp.query_screen_flags().contains(vtcell::ScreenFlags::INVERTED);
        if self.invert_screen != Some(inverted) {
            self.invert_screen = Some(inverted);
            comp.touch_all();
        }
        if self.current_attr_unknown {
            out.sgr_reset()?;
            self.current_attr = Attributes::empty();
            self.current_attr_unknown = false;
        }
        let cursor_attrs = comp.query_cursor_attributes();
        if cursor_attrs.contains(CursorAttributes::VISIBLE) {
            out.change_cursor_visibility(false)?;
        }
        let (height, width) = (comp.query_h(), comp.query_w());
        for row in 0..height {
            let mut col = 0u16;
            while col < width {
                if !comp.cur_at(row, col).touched() {
                    col += 1;
                    continue;
                }
                self.goto_yx(comp, out, row, col)?;
                let toeol = width - col;
                if toeol > 3
                    && (cap.has_dececm || !cap.initial_dececm)
                    && !cap.faulty_inverse_erase
                    && toeol == self.count_cheap_eraseable(&cap, comp, row, col, toeol, Attributes::empty())
                {
                    out.el(0)?;
                    while col < width {
                        comp.cur_at_mut(row, col).untouch();
                        col += 1;
                    }
                    continue;
                }
                let marked = cursor_attrs.contains(CursorAttributes::VISIBLE) && comp.is_marked(false, row, col);
                let is_pointer = comp.query_pointer_attributes().contains(vtcell::PointerAttributes::VISIBLE) && comp.is_pointer(row, col);
                let cell = comp.cur_at(row, col).cell();
                self.print(&cap, comp, out, cell, marked, is_pointer)?;
                comp.cur_at_mut(row, col).untouch();
                let printed_width = Self::width(&cap, cell.character);
                if printed_width > 1 {
                    let mut n = printed_width - 1;
                    if n == self.count_cheap_spaces(&cap, comp, row, col + 1, n) {
                        while n > 0 && col + 1 < width {
                            col += 1;
                            comp.cur_at_mut(row, col).untouch();
                            n -= 1;
                        }
                    }
                } else if printed_width == 1
                    && toeol > 3
                    && !cap.lacks_rep
                    && !marked
                    && !is_pointer
                    && (!cap.faulty_sp_rep || vtunicode::is_bmp(cell.character))
                {
                    let r = self.count_cheap_repeatable(&cap, comp, row, col + 1, toeol - 1, cell.character);
                    if r > 3 {
                        out.rep(r)?;
                        for _ in 0..r {
                            col += 1;
                            comp.cur_at_mut(row, col).untouch();
                        }
                        self.cursor_x += r;
                    }
                }
                col += 1;
            }
        }
        self.goto_yx(comp, out, comp.query_cursor_row(), comp.query_cursor_col())?;
        let glyph = comp.query_cursor_glyph();
        if cursor_attrs != self.cursor_attributes || glyph != self.cursor_glyph {
            self.cursor_attributes = cursor_attrs;
            self.cursor_glyph = glyph;
            out.scusr(self.cursor_attributes, self.cursor_glyph)?;
        }
        if cursor_attrs.contains(CursorAttributes::VISIBLE) {
            out.change_cursor_visibility(true)?;
        }
        out.flush()
    }

    /// Scrolls the host terminal up by `rows` via `RI` rather than
    /// repainting, rotating `comp`'s `cur` buffer to match and marking the
    /// newly exposed rows as plain erased space so later frames' erase-to-EOL
    /// optimisation still applies to them.
    pub fn optimize_scroll_up(&mut self, comp: &mut Compositor, out: &mut Emitter<'_, impl Write>, rows: u16) -> io::Result<()> {
        let visible = comp.query_cursor_attributes().contains(CursorAttributes::VISIBLE);
        if visible {
            out.change_cursor_visibility(false)?;
        }
        self.goto_yx(comp, out, 0, 0)?;
        for _ in 0..rows {
            out.reverse_index()?;
        }
        self.goto_yx(comp, out, comp.query_cursor_row(), comp.query_cursor_col())?;
        if visible {
            out.change_cursor_visibility(true)?;
        }
        comp.scroll_up(rows);
        let cap = *out.capability();
        if (cap.has_dececm || !cap.initial_dececm) && !cap.faulty_inverse_erase {
            let fill = CharacterCell::new(' ', Attributes::empty(), self.current_fg, self.current_bg);
            for row in 0..rows.min(comp.query_h()) {
                for col in 0..comp.query_w() {
                    comp.poke_cur(row, col, fill);
                }
            }
        }
        Ok(())
    }

    pub fn optimize_scroll_down(&mut self, comp: &mut Compositor, out: &mut Emitter<'_, impl Write>, rows: u16) -> io::Result<()> {
        let visible = comp.query_cursor_attributes().contains(CursorAttributes::VISIBLE);
        if visible {
            out.change_cursor_visibility(false)?;
        }
        self.goto_yx(comp, out, comp.query_h().saturating_sub(1), 0)?;
        for _ in 0..rows {
            out.forward_index()?;
        }
        self.goto_yx(comp, out, comp.query_cursor_row(), comp.query_cursor_col())?;
        if visible {
            out.change_cursor_visibility(true)?;
        }
        comp.scroll_down(rows);
        let cap = *out.capability();
        if (cap.has_dececm || !cap.initial_dececm) && !cap.faulty_inverse_erase {
            let fill = CharacterCell::new(' ', Attributes::empty(), self.current_fg, self.current_bg);
            let height = comp.query_h();
            for row in 0..rows.min(height) {
                for col in 0..comp.query_w() {
                    comp.poke_cur(height - 1 - row, col, fill);
                }
            }
        }
        Ok(())
    }

    /// Runs the per-frame update: width-change shadow touching (unless
    /// square mode is on), repaint-new-to-cur, and the diff/emit walk.
    pub fn handle_update_event(&mut self, comp: &mut Compositor, out: &mut Emitter<'_, impl Write>) -> io::Result<()> {
        if !out.capability().has_square_mode {
            comp.touch_width_change_shadows();
        }
        comp.repaint_new_to_cur();
        self.write_changed_cells_to_output(comp, out)
    }

    /// Picks up a new host size and forces the next update to repaint
    /// every cell, since nothing in `cur` can be trusted to still be
    /// on-screen after a resize.
    pub fn handle_resize_event(&mut self, comp: &mut Compositor, width: u16, height: u16) {
        comp.resize(height, width);
        comp.touch_all();
    }

    /// Asks `source` to populate `comp`'s `new` array, then runs the usual
    /// per-frame update over the result.
    ///
    /// The analogue of `TUIOutputBase::handle_refresh_event` calling the
    /// derived class's `redraw_new`: the source is whatever backs this
    /// frame (in this workspace, a `vtscreen::ScreenBuffer`), abstracted
    /// behind [`FrameSource`] rather than virtual dispatch.
    pub fn handle_refresh_event(
        &mut self,
        comp: &mut Compositor,
        source: &impl FrameSource,
        out: &mut Emitter<'_, impl Write>,
    ) -> io::Result<()> {
        source.redraw_new(comp);
        self.handle_update_event(comp, out)
    }
}
