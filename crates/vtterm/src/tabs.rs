//! Horizontal/vertical tab-stop sets: one bit per column/row, resized to
//! follow the screen, grounded on the "tab-stop set (bit per column, up to
//! 256)" field of §3's `SoftTerm state` paragraph.

#[derive(Debug, Clone, Default)]
pub struct TabStops(Vec<bool>);

impl TabStops {
    #[must_use]
    pub fn new(len: u16) -> Self {
        Self(vec![false; usize::from(len)])
    }

    pub fn resize(&mut self, len: u16) {
        self.0.resize(usize::from(len), false);
    }

    pub fn clear_all(&mut self) {
        self.0.fill(false);
    }

    /// Sets a stop every `n` columns starting at zero, matching
    /// `SetRegularHorizontalTabstops(8U)`'s every-eighth-column default.
    pub fn set_regular(&mut self, n: u16) {
        self.clear_all();
        if n == 0 {
            return;
        }
        let mut i = 0usize;
        while i < self.0.len() {
            self.0[i] = true;
            i += usize::from(n);
        }
    }

    pub fn set(&mut self, at: u16) {
        if let Some(slot) = self.0.get_mut(usize::from(at)) {
            *slot = true;
        }
    }

    pub fn clear(&mut self, at: u16) {
        if let Some(slot) = self.0.get_mut(usize::from(at)) {
            *slot = false;
        }
    }

    #[must_use]
    pub fn is_set(&self, at: u16) -> bool {
        self.0.get(usize::from(at)).copied().unwrap_or(false)
    }

    /// The next set stop strictly after `from`, if any.
    #[must_use]
    pub fn next_after(&self, from: u16) -> Option<u16> {
        let start = usize::from(from) + 1;
        self.0.iter().skip(start).position(|&s| s).map(|i| (start + i) as u16)
    }

    /// The previous set stop strictly before `from`, if any.
    #[must_use]
    pub fn prev_before(&self, from: u16) -> Option<u16> {
        if from == 0 {
            return None;
        }
        (0..from).rev().find(|&x| self.is_set(x))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn set_regular_marks_every_eighth_column() {
        let mut t = TabStops::new(20);
        t.set_regular(8);
        assert!(t.is_set(0));
        assert!(t.is_set(8));
        assert!(t.is_set(16));
        assert!(!t.is_set(4));
    }

    #[test]
    fn next_after_finds_the_nearest_stop_strictly_right() {
        let mut t = TabStops::new(20);
        t.set_regular(8);
        assert_eq!(t.next_after(0), Some(8));
        assert_eq!(t.next_after(8), Some(16));
        assert_eq!(t.next_after(16), None);
    }

    #[test]
    fn prev_before_finds_the_nearest_stop_strictly_left() {
        let mut t = TabStops::new(20);
        t.set_regular(8);
        assert_eq!(t.prev_before(10), Some(8));
        assert_eq!(t.prev_before(8), Some(0));
        assert_eq!(t.prev_before(0), None);
    }
}
