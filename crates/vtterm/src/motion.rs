//! Cursor motion, margins, tab stops, and the DEC/ECMA coordinate
//! translation, grounded on the "Cursor motion", "Margins" and tab-control
//! parts of `examples/original_source/source/SoftTerm.cpp`.

use vtdecode::Args;

use crate::host::Host;
use crate::state::{Point, SoftTerm};

impl<H: Host> SoftTerm<H> {
    /// DEC coordinates are 1-based; `SendDeviceStatusReport`/`GotoX`/`GotoY`
    /// all translate through this pair of helpers.
    pub(crate) fn to_dec(internal: u16) -> u32 {
        u32::from(internal) + 1
    }

    fn from_dec(dec: u32) -> u16 {
        u16::try_from(dec.saturating_sub(1)).unwrap_or(u16::MAX)
    }

    pub(crate) fn clear_pending_advance(&mut self) {
        self.active_cursor.advance_pending = false;
    }

    /// Advances the cursor one column, wrapping at the right margin per
    /// DECAWM. Always clears `advance_pending` first (it is the "actual"
    /// advance that a pending wrap defers to).
    pub(crate) fn advance(&mut self) {
        self.clear_pending_advance();
        let right = self.right_margin();
        if self.active_cursor.x < right {
            self.active_cursor.x += 1;
        } else if self.active_modes.automatic_right_margin {
            self.active_cursor.x = self.scroll_origin.x;
            self.cursor_down(1, self.scrolling);
        }
        self.update_cursor_pos();
    }

    /// Printable characters call this instead of [`Self::advance`] directly:
    /// at the right margin it only *latches* the wrap, so that a glyph
    /// actually occupies the last column before the next one wraps.
    pub(crate) fn advance_or_pend(&mut self) {
        let right = self.right_margin();
        if self.active_cursor.x < right {
            self.active_cursor.x += 1;
            self.active_cursor.advance_pending = false;
        } else if self.active_modes.automatic_right_margin {
            self.active_cursor.advance_pending = true;
        }
        self.update_cursor_pos();
    }

    fn clamp_row_to_display(&self, y: u16) -> u16 {
        y.min(self.display_origin.y + self.display_margin.h.saturating_sub(1))
    }

    fn clamp_col_to_display(&self, x: u16) -> u16 {
        x.min(self.display_origin.x + self.display_margin.w.saturating_sub(1))
    }

    pub fn cursor_up(&mut self, mut n: u16, scroll_at_edge: bool) {
        self.clear_pending_advance();
        if self.active_cursor.y > self.scroll_origin.y {
            let m = n.min(self.active_cursor.y - self.scroll_origin.y);
            self.active_cursor.y -= m;
            n -= m;
        }
        if n > 0 && scroll_at_edge && self.active_cursor.y == self.scroll_origin.y {
            self.scroll_down_region(n);
        } else if n > 0 && self.active_cursor.y > self.display_origin.y {
            let m = n.min(self.active_cursor.y - self.display_origin.y);
            self.active_cursor.y -= m;
        }
        self.update_cursor_pos();
    }

    pub fn cursor_down(&mut self, mut n: u16, scroll_at_edge: bool) {
        self.clear_pending_advance();
        let bottom = self.bottom_margin();
        if self.active_cursor.y < bottom {
            let m = n.min(bottom - self.active_cursor.y);
            self.active_cursor.y += m;
            n -= m;
        }
        if n > 0 && scroll_at_edge && self.active_cursor.y == bottom {
            self.scroll_up_region(n);
        } else if n > 0 {
            let edge = self.clamp_row_to_display(self.active_cursor.y + n);
            self.active_cursor.y = edge;
        }
        self.update_cursor_pos();
    }

    pub fn cursor_left(&mut self, mut n: u16, scroll_at_edge: bool) {
        self.clear_pending_advance();
        if self.active_cursor.x > self.scroll_origin.x {
            let m = n.min(self.active_cursor.x - self.scroll_origin.x);
            self.active_cursor.x -= m;
            n -= m;
        }
        if n > 0 && scroll_at_edge && self.active_cursor.x == self.scroll_origin.x {
            self.scroll_right_region(n);
        } else if n > 0 && self.active_cursor.x > self.display_origin.x {
            let m = n.min(self.active_cursor.x - self.display_origin.x);
            self.active_cursor.x -= m;
        }
        self.update_cursor_pos();
    }

    pub fn cursor_right(&mut self, mut n: u16, scroll_at_edge: bool) {
        self.clear_pending_advance();
        let right = self.right_margin();
        if self.active_cursor.x < right {
            let m = n.min(right - self.active_cursor.x);
            self.active_cursor.x += m;
            n -= m;
        }
        if n > 0 && scroll_at_edge && self.active_cursor.x == right {
            self.scroll_left_region(n);
        } else if n > 0 {
            let edge = self.clamp_col_to_display(self.active_cursor.x + n);
            self.active_cursor.x = edge;
        }
        self.update_cursor_pos();
    }

    pub fn carriage_return(&mut self) {
        self.carriage_return_no_update();
        self.update_cursor_pos();
    }

    pub(crate) fn carriage_return_no_update(&mut self) {
        self.clear_pending_advance();
        self.active_cursor.x = self.scroll_origin.x;
    }

    pub fn home(&mut self) {
        self.clear_pending_advance();
        self.active_cursor.x = self.scroll_origin.x;
        self.active_cursor.y = self.scroll_origin.y;
        self.update_cursor_pos();
    }

    fn origin_point(&self) -> Point {
        if self.active_modes.origin { self.scroll_origin } else { self.display_origin }
    }

    fn bound_x(&self) -> (u16, u16) {
        if self.active_modes.origin {
            (self.scroll_origin.x, self.right_margin())
        } else {
            (self.display_origin.x, self.display_origin.x + self.display_margin.w.saturating_sub(1))
        }
    }

    fn bound_y(&self) -> (u16, u16) {
        if self.active_modes.origin {
            (self.scroll_origin.y, self.bottom_margin())
        } else {
            (self.display_origin.y, self.display_origin.y + self.display_margin.h.saturating_sub(1))
        }
    }

    pub fn goto_x(&mut self, dec_x: u32) {
        self.clear_pending_advance();
        let (lo, hi) = self.bound_x();
        let x = self.origin_point().x + Self::from_dec(dec_x);
        self.active_cursor.x = x.clamp(lo, hi);
        self.update_cursor_pos();
    }

    pub fn goto_y(&mut self, dec_y: u32) {
        self.clear_pending_advance();
        let (lo, hi) = self.bound_y();
        let y = self.origin_point().y + Self::from_dec(dec_y);
        self.active_cursor.y = y.clamp(lo, hi);
        self.update_cursor_pos();
    }

    pub fn goto_yx(&mut self, dec_y: u32, dec_x: u32) {
        self.clear_pending_advance();
        let (xlo, xhi) = self.bound_x();
        let (ylo, yhi) = self.bound_y();
        let origin = self.origin_point();
        self.active_cursor.x = (origin.x + Self::from_dec(dec_x)).clamp(xlo, xhi);
        self.active_cursor.y = (origin.y + Self::from_dec(dec_y)).clamp(ylo, yhi);
        self.update_cursor_pos();
    }

    pub(crate) fn scroll_up_region(&mut self, n: u16) {
        let fill = self.erasure(' ');
        self.screen.scroll_up(self.scroll_origin.y, self.bottom_margin() + 1, n, fill);
    }

    pub(crate) fn scroll_down_region(&mut self, n: u16) {
        let fill = self.erasure(' ');
        self.screen.scroll_down(self.scroll_origin.y, self.bottom_margin() + 1, n, fill);
    }

    /// `SL`/`SR`/`SU`/`SD` (pan) and the scroll-at-edge induction from cursor
    /// motion share the same column-shift primitive; `ScreenBuffer` only
    /// offers a row-range shift, so a horizontal scroll is done row by row.
    fn scroll_columns(&mut self, by: u16, leftward: bool) {
        let fill = self.erasure(' ');
        let (left, right) = (self.scroll_origin.x, self.right_margin());
        let width = usize::from(right - left + 1);
        let by = usize::from(by).min(width);
        for row in self.scroll_origin.y..=self.bottom_margin() {
            if leftward {
                if by < width {
                    self.screen.copy_n_cells(row, left, row, left + by as u16, width - by);
                }
                self.screen.modify_n_cells(row, right + 1 - by as u16, by, |_| fill);
            } else {
                if by < width {
                    self.screen.copy_n_cells(row, left + by as u16, row, left, width - by);
                }
                self.screen.modify_n_cells(row, left, by, |_| fill);
            }
        }
    }

    pub(crate) fn scroll_left_region(&mut self, n: u16) {
        self.scroll_columns(n, true);
    }

    pub(crate) fn scroll_right_region(&mut self, n: u16) {
        self.scroll_columns(n, false);
    }

    pub fn scroll_left(&mut self, n: u16) {
        self.scroll_left_region(n);
    }

    pub fn scroll_right(&mut self, n: u16) {
        self.scroll_right_region(n);
    }

    /// `SU` pans the content up (new rows appear at the bottom), the
    /// opposite sense of `IND`-driven scrolling induced at the cursor.
    pub fn pan_up(&mut self, n: u16) {
        self.scroll_up_region(n);
    }

    pub fn pan_down(&mut self, n: u16) {
        self.scroll_down_region(n);
    }

    pub fn reset_margins(&mut self) {
        self.scroll_origin = self.display_origin;
        self.scroll_margin = self.display_margin;
        self.home();
    }

    pub fn set_top_bottom_margins(&mut self, args: &Args) {
        let top = args.arg_one_if_zero_or_empty(0);
        let bottom = args.arg_this_if_zero_or_empty(1, u32::from(self.display_margin.h));
        let top0 = Self::from_dec(top).max(self.display_origin.y);
        let bottom0 = u16::try_from(bottom).unwrap_or(u16::MAX).min(self.display_margin.h);
        if top0 >= bottom0 {
            return;
        }
        self.scroll_origin.y = top0;
        self.scroll_margin.h = bottom0 - top0;
        self.home();
    }

    pub fn set_left_right_margins(&mut self, args: &Args) {
        if !self.active_modes.left_right_margins {
            return;
        }
        let left = args.arg_one_if_zero_or_empty(0);
        let right = args.arg_this_if_zero_or_empty(1, u32::from(self.display_margin.w));
        let left0 = Self::from_dec(left).max(self.display_origin.x);
        let right0 = u16::try_from(right).unwrap_or(u16::MAX).min(self.display_margin.w);
        if left0 >= right0 {
            return;
        }
        self.scroll_origin.x = left0;
        self.scroll_margin.w = right0 - left0;
        self.home();
    }

    // -- Tab stops -----------------------------------------------------

    pub fn set_horizontal_tabstop(&mut self) {
        self.htabs.set(self.active_cursor.x);
    }

    pub fn set_regular_horizontal_tabstops(&mut self, every: u16) {
        self.htabs.set_regular(every);
    }

    pub fn tab_clear(&mut self, args: &Args) {
        match args.arg_zero_if_empty(0) {
            0 => self.htabs.clear(self.active_cursor.x),
            3 => self.htabs.clear_all(),
            _ => {}
        }
    }

    pub fn cursor_tabulation_control(&mut self, args: &Args) {
        match args.arg_zero_if_empty(0) {
            0 => self.htabs.set(self.active_cursor.x),
            2 => self.htabs.clear(self.active_cursor.x),
            5 => self.htabs.clear_all(),
            _ => {}
        }
    }

    pub fn dec_cursor_tabulation_control(&mut self, args: &Args) {
        match args.arg_zero_if_empty(0) {
            0 => self.vtabs.set(self.active_cursor.y),
            2 => self.vtabs.clear(self.active_cursor.y),
            5 => self.vtabs.clear_all(),
            _ => {}
        }
    }

    pub fn horizontal_tab(&mut self, mut n: u16, clear_pending: bool) {
        if clear_pending {
            self.clear_pending_advance();
        }
        let right = self.right_margin();
        while n > 0 {
            match self.htabs.next_after(self.active_cursor.x) {
                Some(next) if next <= right => self.active_cursor.x = next,
                _ => {
                    self.active_cursor.x = right;
                    break;
                }
            }
            n -= 1;
        }
        self.update_cursor_pos();
    }

    pub fn backwards_horizontal_tab(&mut self, mut n: u16, clear_pending: bool) {
        if clear_pending {
            self.clear_pending_advance();
        }
        while n > 0 {
            match self.htabs.prev_before(self.active_cursor.x) {
                Some(prev) if prev >= self.scroll_origin.x => self.active_cursor.x = prev,
                _ => {
                    self.active_cursor.x = self.scroll_origin.x;
                    break;
                }
            }
            n -= 1;
        }
        self.update_cursor_pos();
    }

    pub fn vertical_tab(&mut self, mut n: u16, clear_pending: bool) {
        if clear_pending {
            self.clear_pending_advance();
        }
        let bottom = self.bottom_margin();
        while n > 0 {
            match self.vtabs.next_after(self.active_cursor.y) {
                Some(next) if next <= bottom => self.active_cursor.y = next,
                _ => {
                    self.active_cursor.y = bottom;
                    break;
                }
            }
            n -= 1;
        }
        self.update_cursor_pos();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::NullHost;
    use pretty_assertions::assert_eq;

    fn term() -> SoftTerm<NullHost> {
        SoftTerm::new(10, 5, NullHost::default())
    }

    #[test]
    fn goto_yx_clamps_to_display() {
        let mut t = term();
        t.goto_yx(100, 100);
        assert_eq!(t.screen.cursor_pos(), (9, 4));
    }

    #[test]
    fn cursor_down_scrolls_at_bottom_margin() {
        let mut t = term();
        t.goto_yx(5, 1);
        t.cursor_down(1, true);
        assert_eq!(t.screen.cursor_pos(), (0, 4));
    }

    #[test]
    fn horizontal_tab_advances_to_next_stop() {
        let mut t = term();
        t.horizontal_tab(1, true);
        assert_eq!(t.screen.cursor_pos(), (8, 0));
    }

    #[test]
    fn reset_margins_restores_full_screen_and_homes() {
        let mut t = term();
        t.set_top_bottom_margins(&{
            let mut a = Args::default();
            a.minimum_one_arg();
            a
        });
        t.goto_yx(3, 3);
        t.reset_margins();
        assert_eq!(t.screen.cursor_pos(), (0, 0));
    }
}
