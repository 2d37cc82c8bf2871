#![warn(clippy::pedantic)]
//! Output composition and change buffering for a realizer.
//!
//! A realizer composes into the `new` array (via [`Compositor::poke`]) and
//! then transposes it into the `cur` array (via
//! [`Compositor::repaint_new_to_cur`], or a scroll shim that avoids a full
//! repaint). `cur` cells carry a "touched" flag set during transposition;
//! actually emitting bytes for touched cells is [`vttui`](../vttui)'s job;
//! this crate knows nothing about I/O.
//!
//! Grounded directly on
//! `examples/original_source/source/TUIDisplayCompositor.h`/`.cpp`: method
//! names, the `xy`/`xyz`/`wh` coordinate shapes (collapsed here into plain
//! tuples and fields, since Rust doesn't need the original's base-class
//! trick to share `x`/`y` between `xy` and `xyz`), and the touched-bit
//! semantics are a close translation.

use vtcell::{CharacterCell, CursorAttributes, CursorGlyph, CursorSprite, PointerAttributes, PointerSprite, ScreenFlags};

/// A [`CharacterCell`] plus a "changed since last repaint" bit.
///
/// Assigning a [`CharacterCell`] only sets the bit when the incoming cell
/// actually differs from the current contents (matching the original's
/// `operator=(const CharacterCell&)`); assigning another [`DirtiableCell`]
/// copies its touched bit verbatim instead, which is how [`Compositor::resize`]
/// and the scroll shims propagate "this row is now garbage" without
/// re-deriving it from a cell comparison.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DirtiableCell {
    cell: CharacterCell,
    touched: bool,
}

impl DirtiableCell {
    #[must_use]
    pub fn cell(&self) -> CharacterCell {
        self.cell
    }

    #[must_use]
    pub fn touched(&self) -> bool {
        self.touched
    }

    pub fn untouch(&mut self) {
        self.touched = false;
    }

    pub fn touch(&mut self) {
        self.touched = true;
    }

    /// Overwrites both the cell and the touched bit directly, bypassing the
    /// change-comparison [`Self::assign`] does. Used when a realizer already
    /// knows the host terminal's screen matches (e.g. right after a
    /// hardware scroll) and wants to record the new contents without
    /// re-triggering a repaint.
    pub fn set_untouched(&mut self, cell: CharacterCell) {
        self.cell = cell;
        self.touched = false;
    }

    fn assign(&mut self, cell: CharacterCell) {
        if cell != self.cell {
            self.cell = cell;
            self.touched = true;
        }
    }
}

impl Default for DirtiableCell {
    /// The original's default constructor starts pre-touched, so a freshly
    /// (re)sized compositor paints its initial content rather than assuming
    /// a blank screen is already on the terminal.
    fn default() -> Self {
        Self { cell: CharacterCell::default(), touched: true }
    }
}

/// Double-buffered compositor: `new` is what a realizer wants on screen,
/// `cur` is what was last transposed (with per-cell dirty tracking).
pub struct Compositor {
    invalidate_software_cursor: bool,
    cursor_x: u16,
    cursor_y: u16,
    pointer_x: u16,
    pointer_y: u16,
    pointer_z: u16,
    cursor_glyph: CursorGlyph,
    cursor_attributes: CursorAttributes,
    pointer_attributes: PointerAttributes,
    screen_flags: ScreenFlags,
    width: u16,
    height: u16,
    cur_cells: Vec<DirtiableCell>,
    new_cells: Vec<CharacterCell>,
}

impl Compositor {
    /// `invalidate_software_cursor` controls whether moving the cursor or
    /// changing its sprite touches the cell(s) under it, needed when the
    /// realizer draws the cursor itself rather than relying on the host
    /// terminal's hardware cursor.
    #[must_use]
    pub fn new(invalidate_software_cursor: bool, height: u16, width: u16) -> Self {
        let count = usize::from(height) * usize::from(width);
        Self {
            invalidate_software_cursor,
            cursor_x: 0,
            cursor_y: 0,
            pointer_x: 0,
            pointer_y: 0,
            pointer_z: 0,
            cursor_glyph: CursorGlyph::Block,
            cursor_attributes: CursorAttributes::empty(),
            pointer_attributes: PointerAttributes::empty(),
            screen_flags: ScreenFlags::empty(),
            width,
            height,
            cur_cells: vec![DirtiableCell::default(); count],
            new_cells: vec![CharacterCell::default(); count],
        }
    }

    #[must_use]
    pub fn query_h(&self) -> u16 {
        self.height
    }

    #[must_use]
    pub fn query_w(&self) -> u16 {
        self.width
    }

    #[must_use]
    pub fn query_cursor_col(&self) -> u16 {
        self.cursor_x
    }

    #[must_use]
    pub fn query_cursor_row(&self) -> u16 {
        self.cursor_y
    }

    #[must_use]
    pub fn query_pointer_col(&self) -> u16 {
        self.pointer_x
    }

    #[must_use]
    pub fn query_pointer_row(&self) -> u16 {
        self.pointer_y
    }

    #[must_use]
    pub fn query_pointer_dep(&self) -> u16 {
        self.pointer_z
    }

    #[must_use]
    pub fn query_cursor_glyph(&self) -> CursorGlyph {
        self.cursor_glyph
    }

    #[must_use]
    pub fn query_cursor_attributes(&self) -> CursorAttributes {
        self.cursor_attributes
    }

    #[must_use]
    pub fn query_pointer_attributes(&self) -> PointerAttributes {
        self.pointer_attributes
    }

    #[must_use]
    pub fn query_screen_flags(&self) -> ScreenFlags {
        self.screen_flags
    }

    fn stride(&self) -> usize {
        usize::from(self.width)
    }

    fn index(&self, y: u16, x: u16) -> usize {
        usize::from(y) * self.stride() + usize::from(x)
    }

    #[must_use]
    pub fn cur_at(&self, y: u16, x: u16) -> &DirtiableCell {
        &self.cur_cells[self.index(y, x)]
    }

    /// Mutable access to a `cur` cell, for a realizer that has just emitted
    /// (or otherwise accounted for) its contents and wants to clear the
    /// touched bit, or overwrite it outright via
    /// [`DirtiableCell::set_untouched`].
    pub fn cur_at_mut(&mut self, y: u16, x: u16) -> &mut DirtiableCell {
        let idx = self.index(y, x);
        &mut self.cur_cells[idx]
    }

    /// Writes `cell` directly into the `cur` array as already-untouched,
    /// skipping [`DirtiableCell::assign`]'s change comparison. Used by a
    /// scroll-via-hardware-indexing shortcut, where the newly exposed rows
    /// are known to already be blank on the host terminal.
    pub fn poke_cur(&mut self, y: u16, x: u16, cell: CharacterCell) {
        let idx = self.index(y, x);
        self.cur_cells[idx].set_untouched(cell);
    }

    #[must_use]
    pub fn new_at(&self, y: u16, x: u16) -> CharacterCell {
        self.new_cells[self.index(y, x)]
    }

    /// Iterates `(row, col, cell)` for every touched `cur` cell, the shape a
    /// realizer's diff/emit loop (`vttui`) consumes.
    pub fn touched_cells(&self) -> impl Iterator<Item = (u16, u16, CharacterCell)> + '_ {
        let width = self.width;
        self.cur_cells.iter().enumerate().filter(|(_, c)| c.touched()).map(move |(i, c)| {
            let i = u16::try_from(i).unwrap_or(u16::MAX);
            (i / width, i % width, c.cell())
        })
    }

    pub fn touch_all(&mut self) {
        for cell in &mut self.cur_cells {
            cell.touch();
        }
    }

    /// Marks the "shadow" cells a shrinking wide glyph leaves behind: where a
    /// `new` cell's character is narrower than the `cur` cell it is
    /// replacing, the trailing columns the wider glyph used to occupy would
    /// otherwise be judged unchanged by [`Self::repaint_new_to_cur`]'s plain
    /// cell comparison.
    pub fn touch_width_change_shadows(&mut self) {
        let (height, width) = (self.height, self.width);
        for row in 0..height {
            for col in 0..width {
                let cur = self.cur_at(row, col).cell();
                let new = self.new_at(row, col);
                if cur.character == new.character {
                    continue;
                }
                let cur_width = u16::from(vtunicode::width(cur.character));
                let new_width = u16::from(vtunicode::width(new.character));
                let mut i = new_width;
                while i < cur_width && col + i < width {
                    let idx = self.index(row, col + i);
                    self.cur_cells[idx].touch();
                    i += 1;
                }
            }
        }
    }

    pub fn repaint_new_to_cur(&mut self) {
        for (cur, &new) in self.cur_cells.iter_mut().zip(self.new_cells.iter()) {
            cur.assign(new);
        }
    }

    pub fn poke(&mut self, y: u16, x: u16, cell: CharacterCell) {
        if y < self.height && x < self.width {
            let idx = self.index(y, x);
            self.new_cells[idx] = cell;
        }
    }

    pub fn move_cursor(&mut self, row: u16, col: u16) {
        if self.cursor_y != row || self.cursor_x != col {
            if self.invalidate_software_cursor {
                let idx = self.index(self.cursor_y, self.cursor_x);
                self.cur_cells[idx].touch();
            }
            self.cursor_y = row;
            self.cursor_x = col;
            if self.invalidate_software_cursor {
                let idx = self.index(self.cursor_y, self.cursor_x);
                self.cur_cells[idx].touch();
            }
        }
    }

    pub fn change_pointer_col(&mut self, col: u16) -> bool {
        if col < self.width && self.pointer_x != col {
            let idx = self.index(self.pointer_y, self.pointer_x);
            self.cur_cells[idx].touch();
            self.pointer_x = col;
            let idx = self.index(self.pointer_y, self.pointer_x);
            self.cur_cells[idx].touch();
            true
        } else {
            false
        }
    }

    pub fn change_pointer_row(&mut self, row: u16) -> bool {
        if row < self.height && self.pointer_y != row {
            let idx = self.index(self.pointer_y, self.pointer_x);
            self.cur_cells[idx].touch();
            self.pointer_y = row;
            let idx = self.index(self.pointer_y, self.pointer_x);
            self.cur_cells[idx].touch();
            true
        } else {
            false
        }
    }

    pub fn change_pointer_dep(&mut self, dep: u16) -> bool {
        if self.pointer_z != dep {
            let idx = self.index(self.pointer_y, self.pointer_x);
            self.cur_cells[idx].touch();
            self.pointer_z = dep;
            let idx = self.index(self.pointer_y, self.pointer_x);
            self.cur_cells[idx].touch();
            true
        } else {
            false
        }
    }

    pub fn set_cursor_state(&mut self, attributes: CursorAttributes, glyph: CursorGlyph) {
        if self.cursor_attributes != attributes || self.cursor_glyph != glyph {
            self.cursor_attributes = attributes;
            self.cursor_glyph = glyph;
            if self.invalidate_software_cursor {
                let idx = self.index(self.cursor_y, self.cursor_x);
                self.cur_cells[idx].touch();
            }
        }
    }

    pub fn set_pointer_attributes(&mut self, attributes: PointerAttributes) {
        if self.pointer_attributes != attributes {
            self.pointer_attributes = attributes;
            let idx = self.index(self.pointer_y, self.pointer_x);
            self.cur_cells[idx].touch();
        }
    }

    pub fn set_screen_flags(&mut self, flags: ScreenFlags) -> bool {
        if self.screen_flags == flags {
            false
        } else {
            self.screen_flags = flags;
            true
        }
    }

    /// A fairly minimal test for whether a cell is within the current cursor
    /// so it can be displayed marked. When mark/copy selection is added, the
    /// marked region will be more than one cell; for now `inclusive` is the
    /// caller's "is there a selection at all" gate.
    #[must_use]
    pub fn is_marked(&self, inclusive: bool, row: u16, col: u16) -> bool {
        inclusive && self.cursor_y == row && self.cursor_x == col
    }

    #[must_use]
    pub fn is_pointer(&self, row: u16, col: u16) -> bool {
        self.pointer_y == row && self.pointer_x == col
    }

    pub fn resize(&mut self, height: u16, width: u16) {
        if self.height == height && self.width == width {
            return;
        }
        self.touch_all();
        self.width = width;
        self.height = height;
        let count = usize::from(height) * usize::from(width);
        self.cur_cells.resize(count, DirtiableCell::default());
        self.new_cells.resize(count, CharacterCell::default());
    }

    pub fn scroll_up(&mut self, n: u16) {
        if n >= self.height {
            self.touch_all();
            return;
        }
        let (height, width) = (self.height, self.width);
        for row in (n..height).rev() {
            for col in 0..width {
                let src = self.cur_at(row - n, col).cell();
                let idx = self.index(row, col);
                self.cur_cells[idx].assign(src);
            }
        }
        for row in 0..n {
            for col in 0..width {
                let idx = self.index(row, col);
                self.cur_cells[idx].touch();
            }
        }
    }

    pub fn scroll_down(&mut self, n: u16) {
        if n >= self.height {
            self.touch_all();
            return;
        }
        let (height, width) = (self.height, self.width);
        for row in 0..height - n {
            for col in 0..width {
                let src = self.cur_at(row + n, col).cell();
                let idx = self.index(row, col);
                self.cur_cells[idx].assign(src);
            }
        }
        for row in height - n..height {
            for col in 0..width {
                let idx = self.index(row, col);
                self.cur_cells[idx].touch();
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn cell(ch: char) -> CharacterCell {
        CharacterCell { character: ch, ..CharacterCell::default() }
    }

    #[test]
    fn fresh_compositor_is_fully_touched() {
        let comp = Compositor::new(true, 2, 2);
        assert!(comp.cur_at(0, 0).touched());
        assert!(comp.cur_at(1, 1).touched());
    }

    #[test]
    fn repaint_only_touches_changed_cells() {
        let mut comp = Compositor::new(true, 1, 2);
        comp.repaint_new_to_cur();
        comp.cur_cells.iter_mut().for_each(DirtiableCell::untouch);
        comp.poke(0, 0, cell('x'));
        comp.repaint_new_to_cur();
        assert!(comp.cur_at(0, 0).touched());
        assert!(!comp.cur_at(0, 1).touched());
    }

    #[test]
    fn move_cursor_touches_old_and_new_position() {
        let mut comp = Compositor::new(true, 3, 3);
        comp.repaint_new_to_cur();
        comp.cur_cells.iter_mut().for_each(DirtiableCell::untouch);
        comp.move_cursor(0, 0);
        comp.move_cursor(2, 2);
        assert!(comp.cur_at(0, 0).touched());
        assert!(comp.cur_at(2, 2).touched());
        assert!(!comp.cur_at(1, 1).touched());
    }

    #[test]
    fn change_pointer_col_reports_whether_it_moved() {
        let mut comp = Compositor::new(true, 2, 2);
        assert!(comp.change_pointer_col(1));
        assert!(!comp.change_pointer_col(1));
    }

    #[test]
    fn scroll_up_shifts_cur_and_touches_exposed_rows() {
        let mut comp = Compositor::new(true, 3, 1);
        comp.poke(0, 0, cell('a'));
        comp.poke(1, 0, cell('b'));
        comp.poke(2, 0, cell('c'));
        comp.repaint_new_to_cur();
        comp.scroll_up(1);
        assert_eq!(comp.cur_at(0, 0).cell().character, 'b');
        assert_eq!(comp.cur_at(1, 0).cell().character, 'c');
        assert!(comp.cur_at(2, 0).touched());
    }

    #[test]
    fn resize_touches_everything() {
        let mut comp = Compositor::new(true, 2, 2);
        comp.repaint_new_to_cur();
        comp.cur_cells.iter_mut().for_each(DirtiableCell::untouch);
        comp.resize(3, 3);
        assert!(comp.cur_at(2, 2).touched());
    }

    #[test]
    fn touch_width_change_shadows_marks_trailing_cell_of_shrinking_wide_glyph() {
        let mut comp = Compositor::new(true, 1, 2);
        comp.poke(0, 0, cell('\u{4E2D}')); // wide, occupies col 0 and its shadow col 1
        comp.repaint_new_to_cur();
        comp.cur_cells.iter_mut().for_each(DirtiableCell::untouch);
        comp.poke(0, 0, cell('a')); // narrow replacement
        comp.touch_width_change_shadows();
        assert!(comp.cur_at(0, 1).touched());
    }
}
