//! The interface-not-inheritance replacement for `TUIOutputBase::redraw_new`
//! being a pure virtual method: whatever backs a frame populates
//! [`Compositor`]'s `new` array through this trait instead of the realizer
//! reaching into a concrete subclass.

use vtcompositor::Compositor;
use vtscreen::ScreenBuffer;

/// Something that can repaint a [`Compositor`]'s `new` array for the next
/// frame: a live application's [`ScreenBuffer`] in this workspace, but
/// nothing here assumes that: a recorded session or a test fixture works
/// just as well.
pub trait FrameSource {
    fn redraw_new(&self, comp: &mut Compositor);
}

impl FrameSource for ScreenBuffer {
    fn redraw_new(&self, comp: &mut Compositor) {
        let (width, height) = (self.width(), self.height());
        let cells = self.cells();
        for y in 0..height {
            let row = y as usize * width as usize;
            for x in 0..width {
                comp.poke(y, x, cells[row + x as usize]);
            }
        }
        let (cursor_x, cursor_y) = self.cursor_pos();
        comp.move_cursor(cursor_y, cursor_x);
        let cursor = self.cursor();
        comp.set_cursor_state(cursor.attributes, cursor.glyph);
        let pointer = self.pointer();
        comp.set_pointer_attributes(pointer.attributes);
        comp.set_screen_flags(self.screen_flags());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vtcell::{Attributes, CharacterCell, Colour};

    #[test]
    fn redraw_new_copies_every_cell_and_the_cursor() {
        let mut screen = ScreenBuffer::new(3, 2);
        screen.write_n_cells(
            0,
            0,
            &[CharacterCell::new('A', Attributes::empty(), Colour::DEFAULT_FOREGROUND, Colour::DEFAULT_BACKGROUND)],
        );
        screen.set_cursor_pos(1, 0);
        let mut comp = Compositor::new(false, 2, 3);
        screen.redraw_new(&mut comp);
        assert_eq!(comp.new_at(0, 0).character, 'A');
        assert_eq!(comp.query_cursor_col(), 1);
        assert_eq!(comp.query_cursor_row(), 0);
    }
}
