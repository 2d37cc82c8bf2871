//! Erasure and character/line/column insert-delete, grounded on the "Erase
//! and edit" part of `examples/original_source/source/SoftTerm.cpp`.

use vtdecode::Args;

use crate::host::Host;
use crate::state::SoftTerm;

impl<H: Host> SoftTerm<H> {
    /// `ED`: each argument selects a clear (to/from/whole display); repeated
    /// per DEC EL-00070-D even though a sane emitter only ever sends one.
    pub fn erase_in_display(&mut self, args: &Args) {
        let mut args = args.clone();
        args.minimum_one_arg();
        for i in 0..args.arg_count() {
            match args.arg_zero_if_empty(i) {
                0 => self.clear_to_eod(),
                1 => self.clear_from_bod(),
                2 => self.clear_display(),
                _ => {}
            }
        }
    }

    /// `EL`: as [`Self::erase_in_display`], but confined to the current row.
    pub fn erase_in_line(&mut self, args: &Args) {
        let mut args = args.clone();
        args.minimum_one_arg();
        for i in 0..args.arg_count() {
            match args.arg_zero_if_empty(i) {
                0 => self.clear_to_eol(),
                1 => self.clear_from_bol(),
                2 => self.clear_line(),
                _ => {}
            }
        }
    }

    fn fill_row(&mut self, y: u16, x: u16, n: usize) {
        let fill = self.erasure(' ');
        self.screen.modify_n_cells(y, x, n, |_| fill);
    }

    pub fn clear_display(&mut self) {
        for y in self.display_origin.y..self.display_origin.y + self.display_margin.h {
            self.fill_row(y, self.display_origin.x, usize::from(self.display_margin.w));
        }
    }

    /// `DECALN`: fills the whole display with `'E'`, ignoring the pen.
    pub fn screen_alignment_pattern(&mut self) {
        let fill = self.erasure('E');
        for y in self.display_origin.y..self.display_origin.y + self.display_margin.h {
            self.screen.modify_n_cells(y, self.display_origin.x, usize::from(self.display_margin.w), |_| fill);
        }
    }

    pub fn clear_line(&mut self) {
        let y = self.active_cursor.y;
        self.fill_row(y, self.display_origin.x, usize::from(self.display_margin.w));
    }

    pub fn clear_to_eol(&mut self) {
        let (x, y) = (self.active_cursor.x, self.active_cursor.y);
        let end = self.display_origin.x + self.display_margin.w;
        self.fill_row(y, x, usize::from(end.saturating_sub(x)));
    }

    pub fn clear_from_bol(&mut self) {
        let (x, y) = (self.active_cursor.x, self.active_cursor.y);
        self.fill_row(y, self.display_origin.x, usize::from(x - self.display_origin.x) + 1);
    }

    pub fn clear_to_eod(&mut self) {
        self.clear_to_eol();
        let y = self.active_cursor.y;
        for row in y + 1..self.display_origin.y + self.display_margin.h {
            self.fill_row(row, self.display_origin.x, usize::from(self.display_margin.w));
        }
    }

    pub fn clear_from_bod(&mut self) {
        self.clear_from_bol();
        let y = self.active_cursor.y;
        for row in self.display_origin.y..y {
            self.fill_row(row, self.display_origin.x, usize::from(self.display_margin.w));
        }
    }

    pub fn erase_characters(&mut self, n: u16) {
        let (x, y) = (self.active_cursor.x, self.active_cursor.y);
        let right = self.right_margin();
        let count = usize::from(n.min(right + 1 - x));
        self.fill_row(y, x, count);
    }

    pub fn insert_characters(&mut self, n: u16) {
        let (x, y) = (self.active_cursor.x, self.active_cursor.y);
        let right = self.right_margin();
        let room = right + 1 - x;
        let n = n.min(room);
        let keep = usize::from(room - n);
        if keep > 0 {
            self.screen.copy_n_cells(y, x + n, y, x, keep);
        }
        self.fill_row(y, x, usize::from(n));
    }

    pub fn delete_characters(&mut self, n: u16) {
        let (x, y) = (self.active_cursor.x, self.active_cursor.y);
        let right = self.right_margin();
        let room = right + 1 - x;
        let n = n.min(room);
        let keep = usize::from(room - n);
        if keep > 0 {
            self.screen.copy_n_cells(y, x, y, x + n, keep);
        }
        self.fill_row(y, right + 1 - n, usize::from(n));
    }

    pub fn insert_lines(&mut self, n: u16) {
        let y = self.active_cursor.y;
        let bottom = self.bottom_margin();
        if y < self.scroll_origin.y || y > bottom {
            return;
        }
        let fill = self.erasure(' ');
        if self.horizontal_margins_are_full_width() {
            self.screen.scroll_down(y, bottom + 1, n, fill);
            return;
        }
        let left = self.scroll_origin.x;
        let width = usize::from(self.right_margin() + 1 - left);
        let (top, end) = (usize::from(y), usize::from(bottom) + 1);
        let n = usize::from(n).min(end - top);
        for row in (top + n..end).rev() {
            self.screen.copy_n_cells(row as u16, left, (row - n) as u16, left, width);
        }
        for row in top..top + n {
            self.screen.modify_n_cells(row as u16, left, width, |_| fill);
        }
    }

    pub fn delete_lines(&mut self, n: u16) {
        let y = self.active_cursor.y;
        let bottom = self.bottom_margin();
        if y < self.scroll_origin.y || y > bottom {
            return;
        }
        let fill = self.erasure(' ');
        if self.horizontal_margins_are_full_width() {
            self.screen.scroll_up(y, bottom + 1, n, fill);
            return;
        }
        let left = self.scroll_origin.x;
        let width = usize::from(self.right_margin() + 1 - left);
        let (top, end) = (usize::from(y), usize::from(bottom) + 1);
        let n = usize::from(n).min(end - top);
        for row in top..end - n {
            self.screen.copy_n_cells(row as u16, left, (row + n) as u16, left, width);
        }
        for row in end - n..end {
            self.screen.modify_n_cells(row as u16, left, width, |_| fill);
        }
    }

    pub fn insert_columns(&mut self, n: u16) {
        let x = self.active_cursor.x;
        let right = self.right_margin();
        if x < self.scroll_origin.x || x > right {
            return;
        }
        let room = right + 1 - x;
        let n = n.min(room);
        let keep = usize::from(room - n);
        let fill = self.erasure(' ');
        for row in self.scroll_origin.y..=self.bottom_margin() {
            if keep > 0 {
                self.screen.copy_n_cells(row, x + n, row, x, keep);
            }
            self.screen.modify_n_cells(row, x, usize::from(n), |_| fill);
        }
    }

    pub fn delete_columns(&mut self, n: u16) {
        let x = self.active_cursor.x;
        let right = self.right_margin();
        if x < self.scroll_origin.x || x > right {
            return;
        }
        let room = right + 1 - x;
        let n = n.min(room);
        let keep = usize::from(room - n);
        let fill = self.erasure(' ');
        for row in self.scroll_origin.y..=self.bottom_margin() {
            if keep > 0 {
                self.screen.copy_n_cells(row, x, row, x + n, keep);
            }
            self.screen.modify_n_cells(row, right + 1 - n, usize::from(n), |_| fill);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::NullHost;
    use pretty_assertions::assert_eq;

    fn term() -> SoftTerm<NullHost> {
        SoftTerm::new(5, 3, NullHost::default())
    }

    #[test]
    fn clear_to_eol_only_clears_from_cursor() {
        let mut t = term();
        t.screen.write_n_cells(0, 0, &[vtcell::CharacterCell { character: 'a', ..vtcell::CharacterCell::default() }]);
        t.goto_yx(1, 2);
        t.clear_to_eol();
        assert_eq!(t.screen.cells()[0].character, 'a');
        assert_eq!(t.screen.cells()[1].character, ' ');
    }

    #[test]
    fn insert_characters_shifts_right_within_margin() {
        let mut t = term();
        for (i, c) in "abcde".chars().enumerate() {
            t.screen.write_n_cells(0, i as u16, &[vtcell::CharacterCell { character: c, ..vtcell::CharacterCell::default() }]);
        }
        t.insert_characters(2);
        let chars: String = t.screen.cells()[0..5].iter().map(|c| c.character).collect();
        assert_eq!(chars, "  abc");
    }

    #[test]
    fn erase_in_line_mode_2_clears_whole_row_regardless_of_cursor() {
        let mut t = term();
        t.screen.write_n_cells(0, 0, &[vtcell::CharacterCell { character: 'a', ..vtcell::CharacterCell::default() }]);
        t.goto_yx(1, 4);
        let mut args = Args::default();
        args.push_arg();
        args.push_digit(2);
        t.erase_in_line(&args);
        assert_eq!(t.screen.cells()[0].character, ' ');
    }

    #[test]
    fn delete_lines_pulls_rows_up_and_fills_bottom_of_region() {
        let mut t = term();
        for y in 0..3u16 {
            t.screen.write_n_cells(y, 0, &[vtcell::CharacterCell { character: (b'a' + y as u8) as char, ..vtcell::CharacterCell::default() }]);
        }
        t.delete_lines(1);
        assert_eq!(t.screen.cells()[0].character, 'b');
        assert_eq!(t.screen.cells()[5].character, 'c');
        assert_eq!(t.screen.cells()[10].character, ' ');
    }
}
