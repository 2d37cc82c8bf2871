//! Parameter storage for control sequences, plus the accessor helpers
//! `vtterm`'s dispatch switch calls to pull defaults out of them.
//!
//! ECMA-48 parameter strings are `;`-separated, and (per the later DEC/xterm
//! convention this decoder also accepts) each parameter may itself carry
//! `:`-separated sub-parameters, e.g. `38:2:255:0:0` for a true-colour SGR.
//! An *empty* parameter (two `;` with nothing between them, or nothing before
//! the first `;`) is distinct from an explicit `0`: ECMA-48 default
//! substitution only fires on the former, but most real terminals (and the
//! dispatch table this crate is grounded on) fold explicit `0` into the same
//! default for movement-style operations. That folding is what
//! [`Args::arg_one_if_zero_or_empty`] and [`Args::arg_zd_if_zero_one_if_empty`]
//! give callers, distinctly from the strict [`Args::arg_zero_if_empty`].

use smallvec::SmallVec;

/// A single sub-parameter slot. `None` means empty (no digits were seen).
pub type SubArg = Option<u32>;

/// One parameter and its sub-parameters. A bare parameter (no `:`) has
/// exactly one slot.
pub type Arg = SmallVec<[SubArg; 2]>;

/// The full parameter vector of one control sequence.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Args(SmallVec<[Arg; 8]>);

impl Args {
    pub(crate) fn clear(&mut self) {
        self.0.clear();
    }

    /// Begins a new parameter slot (called on `;` and at the first digit).
    pub(crate) fn push_arg(&mut self) {
        self.0.push(Arg::new());
    }

    /// Begins a new sub-parameter slot within the current parameter (`:`).
    pub(crate) fn push_subarg(&mut self) {
        if self.0.is_empty() {
            self.push_arg();
        }
        self.0.last_mut().expect("just ensured non-empty").push(None);
    }

    /// Feeds one parameter digit into the current (last) sub-parameter slot.
    pub(crate) fn push_digit(&mut self, digit: u32) {
        if self.0.is_empty() {
            self.push_arg();
        }
        let arg = self.0.last_mut().expect("just ensured non-empty");
        if arg.is_empty() {
            arg.push(None);
        }
        let slot = arg.last_mut().expect("just ensured non-empty");
        *slot = Some(slot.unwrap_or(0).saturating_mul(10).saturating_add(digit));
    }

    /// Ensures at least one (possibly empty) parameter is present, matching
    /// ECMA-48's rule that a sequence with no parameter bytes at all still
    /// has one default parameter rather than zero.
    pub fn minimum_one_arg(&mut self) {
        if self.0.is_empty() {
            self.push_arg();
        }
    }

    #[must_use]
    pub fn arg_count(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn subarg_count(&self, i: usize) -> usize {
        self.0.get(i).map_or(0, SmallVec::len)
    }

    fn raw(&self, i: usize, j: usize) -> SubArg {
        self.0.get(i).and_then(|arg| arg.get(j).copied().flatten())
    }

    /// Strict ECMA-48 default substitution: empty parameter becomes 0.
    #[must_use]
    pub fn arg_zero_if_empty(&self, i: usize) -> u32 {
        self.arg_zero_if_empty_sub(i, 0)
    }

    #[must_use]
    pub fn arg_zero_if_empty_sub(&self, i: usize, j: usize) -> u32 {
        self.raw(i, j).unwrap_or(0)
    }

    /// Empty *or* explicit zero both become 1, the common case for
    /// movement counts, insert/delete counts, and repeat counts, where a
    /// terminal treats `CSI 0 A` the same as a bare `CSI A`.
    #[must_use]
    pub fn arg_one_if_zero_or_empty(&self, i: usize) -> u32 {
        self.arg_one_if_zero_or_empty_sub(i, 0)
    }

    #[must_use]
    pub fn arg_one_if_zero_or_empty_sub(&self, i: usize, j: usize) -> u32 {
        match self.raw(i, j) {
            None | Some(0) => 1,
            Some(n) => n,
        }
    }

    /// Named for the "zero default" ECMA-48 substitution rule, but for the
    /// single-cursor-motion parameter every caller uses it on, behaves
    /// identically to [`Self::arg_one_if_zero_or_empty`]: explicit zero and
    /// an absent parameter both mean "move by one". See `DESIGN.md`'s Open
    /// Questions for why these two helpers are kept distinct even though
    /// their bodies agree: they document two different *rules* (strict
    /// ECMA-48 substitution vs. the common terminal folding of zero into
    /// one) that happen to coincide for every call site observed.
    #[must_use]
    pub fn arg_zd_if_zero_one_if_empty(&self, i: usize) -> u32 {
        self.arg_one_if_zero_or_empty(i)
    }

    /// Empty or explicit zero both become `default`.
    #[must_use]
    pub fn arg_this_if_zero_or_empty(&self, i: usize, default: u32) -> u32 {
        match self.raw(i, 0) {
            None | Some(0) => default,
            Some(n) => n,
        }
    }

    /// True when parameter `i` has at most one sub-parameter slot, i.e. it
    /// was never written with a `:`, the precondition SGR's `38;5;N` /
    /// `38;2;R;G;B` legacy forms check before folding the following
    /// semicolon-separated parameters into sub-parameters of `i` via
    /// [`Self::collapse_args_to_subargs`].
    #[must_use]
    pub fn has_no_subargs_from(&self, i: usize) -> bool {
        self.subarg_count(i) <= 1
    }

    /// Normalises the legacy `38;5;N` / `38;2;R;G;B` SGR forms (colour
    /// selector and components passed as separate top-level parameters) into
    /// the modern `38:5:N` / `38:2:R:G:B` sub-parameter form, by moving the
    /// parameters immediately following `i` into `i`'s sub-parameter list and
    /// removing them as standalone parameters.
    pub fn collapse_args_to_subargs(&mut self, i: usize) {
        if !self.has_no_subargs_from(i) || i >= self.0.len() {
            return;
        }
        let code = self.raw(i, 0);
        // arg[i+1] is the colour-space mode selector: 5 = indexed (one more
        // arg follows, the palette index), 2 = true-colour (three more
        // follow, r/g/b; some emitters add a trailing colour-space id).
        let mode = self.raw(i + 1, 0);
        let trailing = match mode {
            Some(5) => 1,
            Some(2) => 3,
            _ => return,
        };
        let available_after_mode = self.0.len() - i - 2;
        let take = trailing.min(available_after_mode);
        let mut collapsed = Arg::new();
        collapsed.push(code);
        for arg in self.0.drain(i + 1..=i + 1 + take) {
            collapsed.push(arg.first().copied().flatten());
        }
        self.0[i] = collapsed;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parsed(params: &[&[u32]]) -> Args {
        let mut args = Args::default();
        for param in params {
            args.push_arg();
            for (j, &digit_group) in param.iter().enumerate() {
                if j > 0 {
                    args.push_subarg();
                }
                for digit in digit_group.to_string().chars() {
                    args.push_digit(digit.to_digit(10).unwrap());
                }
            }
        }
        args
    }

    #[test]
    fn empty_args_default_to_zero_or_one_per_helper() {
        let args = Args::default();
        assert_eq!(args.arg_zero_if_empty(0), 0);
        assert_eq!(args.arg_one_if_zero_or_empty(0), 1);
        assert_eq!(args.arg_zd_if_zero_one_if_empty(0), 1);
        assert_eq!(args.arg_this_if_zero_or_empty(0, 7), 7);
    }

    #[test]
    fn explicit_zero_folds_to_one_for_motion_helpers_but_not_strict() {
        let args = parsed(&[&[0]]);
        assert_eq!(args.arg_zero_if_empty(0), 0);
        assert_eq!(args.arg_one_if_zero_or_empty(0), 1);
    }

    #[test]
    fn explicit_nonzero_passes_through_every_helper() {
        let args = parsed(&[&[5]]);
        assert_eq!(args.arg_zero_if_empty(0), 5);
        assert_eq!(args.arg_one_if_zero_or_empty(0), 5);
        assert_eq!(args.arg_this_if_zero_or_empty(0, 9), 5);
    }

    #[test]
    fn digit_accumulation_is_decimal() {
        let args = parsed(&[&[1, 2, 3]]);
        // parsed() treats each slice entry as a *separate sub-arg*, so build
        // a multi-digit parameter directly instead.
        let mut a = Args::default();
        a.push_arg();
        for d in [1, 2, 3] {
            a.push_digit(d);
        }
        assert_eq!(a.arg_zero_if_empty(0), 123);
        let _ = args;
    }

    #[test]
    fn collapses_legacy_indexed_sgr_form() {
        let mut args = parsed(&[&[38], &[5], &[220]]);
        args.collapse_args_to_subargs(0);
        assert_eq!(args.arg_count(), 1);
        assert_eq!(args.subarg_count(0), 3);
        assert_eq!(args.arg_zero_if_empty_sub(0, 0), 38);
        assert_eq!(args.arg_zero_if_empty_sub(0, 1), 5);
        assert_eq!(args.arg_zero_if_empty_sub(0, 2), 220);
    }

    #[test]
    fn collapses_legacy_truecolour_sgr_form() {
        let mut args = parsed(&[&[48], &[2], &[10], &[20], &[30]]);
        args.collapse_args_to_subargs(0);
        assert_eq!(args.arg_count(), 1);
        assert_eq!(args.subarg_count(0), 5);
    }

    #[test]
    fn does_not_collapse_when_already_using_subargs() {
        let mut args = Args::default();
        args.push_arg();
        args.push_digit(3);
        args.push_digit(8);
        args.push_subarg();
        args.push_digit(5);
        assert!(!args.has_no_subargs_from(0));
        let before = args.clone();
        args.collapse_args_to_subargs(0);
        assert_eq!(args, before);
    }

    #[test]
    fn minimum_one_arg_ensures_a_slot_exists() {
        let mut args = Args::default();
        args.minimum_one_arg();
        assert_eq!(args.arg_count(), 1);
        assert_eq!(args.arg_zero_if_empty(0), 0);
    }
}
