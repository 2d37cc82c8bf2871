use vtcell::{CharacterCell, CursorAttributes, CursorGlyph, CursorSprite, PointerAttributes, PointerSprite, ScreenFlags};

/// The persisted screen: header-equivalent scalar state plus a flat cell
/// array, mutated only through the narrow write API §3's "Ownership"
/// paragraph grants `vtterm`.
///
/// Holds both the primary and alternate-screen cell arrays (`set_alt_buffer`
/// toggles which is active) even though only the active one is ever
/// persisted by [`Self::encode`](crate::ScreenBuffer::encode): §6's wire
/// layout has no slot for "the other screen", matching a real terminal where
/// the alt screen is never visible to anything outside the producer
/// process.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScreenBuffer {
    pub(crate) width: u16,
    pub(crate) height: u16,
    pub(crate) cursor_x: u16,
    pub(crate) cursor_y: u16,
    pub(crate) cursor: CursorSprite,
    pub(crate) pointer: PointerSprite,
    pub(crate) screen_flags: ScreenFlags,
    primary: Vec<CharacterCell>,
    alt: Vec<CharacterCell>,
    alt_active: bool,
}

impl ScreenBuffer {
    #[must_use]
    pub fn new(width: u16, height: u16) -> Self {
        let count = usize::from(width) * usize::from(height);
        Self {
            width,
            height,
            cursor_x: 0,
            cursor_y: 0,
            cursor: CursorSprite { glyph: CursorGlyph::Block, attributes: CursorAttributes::VISIBLE },
            pointer: PointerSprite { attributes: PointerAttributes::empty() },
            screen_flags: ScreenFlags::empty(),
            primary: vec![CharacterCell::default(); count],
            alt: vec![CharacterCell::default(); count],
            alt_active: false,
        }
    }

    #[allow(clippy::too_many_arguments)]
    pub(crate) fn from_parts(
        width: u16,
        height: u16,
        cursor_x: u16,
        cursor_y: u16,
        cursor: CursorSprite,
        pointer: PointerSprite,
        screen_flags: ScreenFlags,
        cells: Vec<CharacterCell>,
    ) -> Self {
        let alt = vec![CharacterCell::default(); cells.len()];
        Self { width, height, cursor_x, cursor_y, cursor, pointer, screen_flags, primary: cells, alt, alt_active: false }
    }

    #[must_use]
    pub fn width(&self) -> u16 {
        self.width
    }

    #[must_use]
    pub fn height(&self) -> u16 {
        self.height
    }

    #[must_use]
    pub fn cursor_pos(&self) -> (u16, u16) {
        (self.cursor_x, self.cursor_y)
    }

    #[must_use]
    pub fn cursor(&self) -> CursorSprite {
        self.cursor
    }

    #[must_use]
    pub fn pointer(&self) -> PointerSprite {
        self.pointer
    }

    #[must_use]
    pub fn screen_flags(&self) -> ScreenFlags {
        self.screen_flags
    }

    #[must_use]
    pub fn is_alt_buffer(&self) -> bool {
        self.alt_active
    }

    #[must_use]
    pub fn cells(&self) -> &[CharacterCell] {
        if self.alt_active { &self.alt } else { &self.primary }
    }

    fn cells_mut(&mut self) -> &mut [CharacterCell] {
        if self.alt_active { &mut self.alt } else { &mut self.primary }
    }

    fn index(&self, y: u16, x: u16) -> Option<usize> {
        (x < self.width && y < self.height).then(|| usize::from(y) * usize::from(self.width) + usize::from(x))
    }

    /// Writes `cells` starting at `(y, x)`, clipped to the row's remaining
    /// width (never wraps to the next row).
    pub fn write_n_cells(&mut self, y: u16, x: u16, cells: &[CharacterCell]) {
        let width = self.width;
        let Some(start) = self.index(y, x) else { return };
        let room = usize::from(width - x);
        let n = cells.len().min(room);
        self.cells_mut()[start..start + n].copy_from_slice(&cells[..n]);
    }

    /// Copies `n` cells from `(src_y, src_x)` to `(dst_y, dst_x)`, both
    /// within the active buffer. Used for character insert/delete and
    /// scroll-region shifts that are narrower than the full screen width.
    pub fn copy_n_cells(&mut self, dst_y: u16, dst_x: u16, src_y: u16, src_x: u16, n: usize) {
        let Some(dst) = self.index(dst_y, dst_x) else { return };
        let Some(src) = self.index(src_y, src_x) else { return };
        let cells = self.cells_mut();
        let n = n.min(cells.len().saturating_sub(dst.max(src)));
        if n == 0 {
            return;
        }
        // `copy_within` handles overlap correctly regardless of direction.
        cells.copy_within(src..src + n, dst);
    }

    /// Applies `f` to each of `n` cells starting at `(y, x)`, clipped to the
    /// row. Used by rectangular attribute-change operations (`DECCARA`-style).
    pub fn modify_n_cells(&mut self, y: u16, x: u16, n: usize, mut f: impl FnMut(CharacterCell) -> CharacterCell) {
        let width = self.width;
        let Some(start) = self.index(y, x) else { return };
        let room = usize::from(width - x);
        let n = n.min(room);
        for cell in &mut self.cells_mut()[start..start + n] {
            *cell = f(*cell);
        }
    }

    /// Shifts rows `[top, bottom)` up by `n`, filling the newly exposed
    /// bottom rows with `fill`. Rows outside `[top, bottom)` are untouched.
    pub fn scroll_up(&mut self, top: u16, bottom: u16, n: u16, fill: CharacterCell) {
        let width = usize::from(self.width);
        let (top, bottom) = (usize::from(top), usize::from(bottom).min(usize::from(self.height)));
        if top >= bottom {
            return;
        }
        let n = usize::from(n).min(bottom - top);
        let cells = self.cells_mut();
        for row in top..bottom - n {
            let (src, dst) = ((row + n) * width, row * width);
            cells.copy_within(src..src + width, dst);
        }
        for row in bottom - n..bottom {
            cells[row * width..(row + 1) * width].fill(fill);
        }
    }

    /// Shifts rows `[top, bottom)` down by `n`, filling the newly exposed top
    /// rows with `fill`.
    pub fn scroll_down(&mut self, top: u16, bottom: u16, n: u16, fill: CharacterCell) {
        let width = usize::from(self.width);
        let (top, bottom) = (usize::from(top), usize::from(bottom).min(usize::from(self.height)));
        if top >= bottom {
            return;
        }
        let n = usize::from(n).min(bottom - top);
        let cells = self.cells_mut();
        for row in (top + n..bottom).rev() {
            let (src, dst) = ((row - n) * width, row * width);
            cells.copy_within(src..src + width, dst);
        }
        for row in top..top + n {
            cells[row * width..(row + 1) * width].fill(fill);
        }
    }

    pub fn set_cursor_pos(&mut self, x: u16, y: u16) {
        self.cursor_x = x;
        self.cursor_y = y;
    }

    pub fn set_cursor_type(&mut self, glyph: CursorGlyph, attributes: CursorAttributes) {
        self.cursor = CursorSprite { glyph, attributes };
    }

    pub fn set_pointer_type(&mut self, attributes: PointerAttributes) {
        self.pointer = PointerSprite { attributes };
    }

    pub fn set_screen_flags(&mut self, flags: ScreenFlags) {
        self.screen_flags = flags;
    }

    /// Switches between the primary and alternate screen. Entering the
    /// alternate screen does not clear it implicitly; callers that want a
    /// blank alternate screen (the usual `smcup` behaviour) should follow
    /// with an explicit fill, matching `SoftTerm`'s own separation of "switch
    /// buffer" from "erase display".
    pub fn set_alt_buffer(&mut self, alt: bool) {
        self.alt_active = alt;
    }

    /// Resizes both buffers, preserving the top-left overlap of old and new
    /// content and filling any newly exposed area with `fill`.
    pub fn set_size(&mut self, width: u16, height: u16, fill: CharacterCell) {
        if width == self.width && height == self.height {
            return;
        }
        self.primary = Self::resized(&self.primary, self.width, self.height, width, height, fill);
        self.alt = Self::resized(&self.alt, self.width, self.height, width, height, fill);
        self.width = width;
        self.height = height;
        self.cursor_x = self.cursor_x.min(width.saturating_sub(1));
        self.cursor_y = self.cursor_y.min(height.saturating_sub(1));
    }

    fn resized(old: &[CharacterCell], old_w: u16, old_h: u16, new_w: u16, new_h: u16, fill: CharacterCell) -> Vec<CharacterCell> {
        let mut new = vec![fill; usize::from(new_w) * usize::from(new_h)];
        let copy_w = old_w.min(new_w);
        let copy_h = old_h.min(new_h);
        for row in 0..copy_h {
            let old_start = usize::from(row) * usize::from(old_w);
            let new_start = usize::from(row) * usize::from(new_w);
            new[new_start..new_start + usize::from(copy_w)]
                .copy_from_slice(&old[old_start..old_start + usize::from(copy_w)]);
        }
        new
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
    fn write_n_cells_clips_to_row_width() {
        let mut buf = ScreenBuffer::new(3, 1);
        buf.write_n_cells(0, 1, &[cell('a'), cell('b'), cell('c')]);
        assert_eq!(buf.cells()[1].character, 'a');
        assert_eq!(buf.cells()[2].character, 'b');
    }

    #[test]
    fn scroll_up_shifts_rows_and_fills_bottom() {
        let mut buf = ScreenBuffer::new(1, 3);
        buf.write_n_cells(0, 0, &[cell('a')]);
        buf.write_n_cells(1, 0, &[cell('b')]);
        buf.write_n_cells(2, 0, &[cell('c')]);
        buf.scroll_up(0, 3, 1, cell('x'));
        let chars: Vec<char> = buf.cells().iter().map(|c| c.character).collect();
        assert_eq!(chars, vec!['b', 'c', 'x']);
    }

    #[test]
    fn scroll_down_shifts_rows_and_fills_top() {
        let mut buf = ScreenBuffer::new(1, 3);
        buf.write_n_cells(0, 0, &[cell('a')]);
        buf.write_n_cells(1, 0, &[cell('b')]);
        buf.write_n_cells(2, 0, &[cell('c')]);
        buf.scroll_down(0, 3, 1, cell('x'));
        let chars: Vec<char> = buf.cells().iter().map(|c| c.character).collect();
        assert_eq!(chars, vec!['x', 'a', 'b']);
    }

    #[test]
    fn set_alt_buffer_swaps_view_without_mixing_content() {
        let mut buf = ScreenBuffer::new(1, 1);
        buf.write_n_cells(0, 0, &[cell('p')]);
        buf.set_alt_buffer(true);
        assert_eq!(buf.cells()[0].character, ' ');
        buf.write_n_cells(0, 0, &[cell('a')]);
        buf.set_alt_buffer(false);
        assert_eq!(buf.cells()[0].character, 'p');
    }

    #[test]
    fn set_size_preserves_overlap() {
        let mut buf = ScreenBuffer::new(2, 2);
        buf.write_n_cells(0, 0, &[cell('a'), cell('b')]);
        buf.set_size(3, 3, cell('.'));
        assert_eq!(buf.cells()[0].character, 'a');
        assert_eq!(buf.cells()[1].character, 'b');
        assert_eq!(buf.cells()[2].character, '.');
    }

    #[test]
    fn copy_n_cells_handles_forward_overlap() {
        let mut buf = ScreenBuffer::new(5, 1);
        buf.write_n_cells(0, 0, &[cell('a'), cell('b'), cell('c')]);
        buf.copy_n_cells(0, 1, 0, 0, 3);
        let chars: Vec<char> = buf.cells().iter().map(|c| c.character).collect();
        assert_eq!(chars, vec!['a', 'a', 'b', 'c', ' ']);
    }
}
