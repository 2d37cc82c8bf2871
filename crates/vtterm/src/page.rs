//! `DECSCPP`/`DECSNLS`/`DECSLPP`: resizing the page by control sequence
//! rather than by host-driven `resize`, grounded on `SoftTerm::SetColumnsPerPage`/
//! `SetLinesPerPage`/`SetLinesPerPageOrDTTerm` in
//! `examples/original_source/source/SoftTerm.cpp`.

use vtdecode::Args;

use crate::host::Host;
use crate::state::SoftTerm;

impl<H: Host> SoftTerm<H> {
    /// `CSI Pn * |` (`DECSNLS`). The DEC VT minimum is 24 rows; this emulator
    /// is not CRT-constrained, so only `n < 2` is rejected.
    pub fn set_lines_per_page(&mut self, args: &Args) {
        if args.arg_count() == 0 {
            return;
        }
        let n = args.arg_one_if_zero_or_empty(args.arg_count() - 1);
        let n = u16::try_from(n).unwrap_or(u16::MAX);
        if n >= 2 {
            self.resize(self.display_margin.w, n);
        }
    }

    /// `CSI Pn $ |` (`DECSCPP`). As [`Self::set_lines_per_page`], but columns.
    pub fn set_columns_per_page(&mut self, args: &Args) {
        if args.arg_count() == 0 {
            return;
        }
        let n = args.arg_one_if_zero_or_empty(args.arg_count() - 1);
        let n = u16::try_from(n).unwrap_or(u16::MAX);
        if n >= 2 {
            self.resize(n, self.display_margin.h);
        }
    }

    /// `DECRPL` (private mode 112): the "scrollback buffer" extension, which
    /// the original implementation's own comment flags as not really
    /// working properly, reproduced verbatim (including the no-op `off`
    /// resize) rather than "fixed" into cleaner semantics.
    pub fn set_scrollback_buffer(&mut self, on: bool) {
        if on {
            let height = self.display_margin.h + 25;
            self.resize(self.display_margin.w, height);
            self.reset_margins();
            self.display_origin.y = 25;
        } else {
            self.display_origin.y = 0;
            self.resize(self.display_margin.w, self.display_margin.h);
        }
    }

    /// `CSI Pn t`: `DECSLPP`, bodged to also accept xterm/dtterm's
    /// `CSI 8 ; rows ; columns t` "resize text area" extension, since
    /// real-world clients (e.g. NeoVim) hardwire it. Values of `1` for either
    /// dimension leave that dimension alone, matching xterm.
    pub fn set_lines_per_page_or_dtterm(&mut self, args: &Args) {
        if args.arg_one_if_zero_or_empty(0) == 8 {
            let mut args = args.clone();
            if args.has_no_subargs_from(0) {
                args.collapse_args_to_subargs(0);
            }
            let rows = args.arg_zero_if_empty_sub(0, 1);
            let columns = args.arg_zero_if_empty_sub(0, 2);
            let rows = u16::try_from(rows).unwrap_or(u16::MAX);
            let columns = u16::try_from(columns).unwrap_or(u16::MAX);
            if columns != 1 && rows != 1 {
                let w = if columns == 0 { self.display_margin.w } else { columns };
                let h = if rows == 0 { self.display_margin.h } else { rows };
                self.resize(w, h);
            }
            if args.arg_count() <= 1 {
                return;
            }
        }
        self.set_lines_per_page(args);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::NullHost;
    use pretty_assertions::assert_eq;

    fn parsed(values: &[u32]) -> Args {
        let mut args = Args::default();
        for &v in values {
            args.push_arg();
            for d in v.to_string().chars() {
                args.push_digit(d.to_digit(10).unwrap());
            }
        }
        args
    }

    #[test]
    fn set_lines_per_page_resizes_height_only() {
        let mut t = SoftTerm::new(80, 25, NullHost::default());
        t.set_lines_per_page(&parsed(&[40]));
        assert_eq!((t.screen.width(), t.screen.height()), (80, 40));
    }

    #[test]
    fn dtterm_resize_extension_sets_both_dimensions() {
        let mut t = SoftTerm::new(80, 25, NullHost::default());
        let mut args = Args::default();
        args.push_arg();
        args.push_digit(8);
        args.push_subarg();
        args.push_digit(3);
        args.push_digit(0);
        args.push_subarg();
        args.push_digit(1);
        args.push_digit(0);
        args.push_digit(0);
        t.set_lines_per_page_or_dtterm(&args);
        assert_eq!((t.screen.width(), t.screen.height()), (100, 30));
    }
}
