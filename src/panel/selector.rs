//! Switching between alternative recipe trees.

/// Prev/next control over the list of alternative trees.
///
/// The selector never changes the index itself. Every accepted change is
/// forwarded to the owner's callback, and the owner decides whether to
/// feed the new index back in.
pub struct TreeSelector<'a> {
    count: usize,
    current: usize,
    on_change: &'a mut dyn FnMut(usize),
}

impl<'a> TreeSelector<'a> {
    pub fn new(count: usize, current: usize, on_change: &'a mut dyn FnMut(usize)) -> Self {
        Self {
            count,
            current,
            on_change,
        }
    }

    pub fn count(&self) -> usize {
        self.count
    }

    pub fn current_index(&self) -> usize {
        self.current
    }

    /// One-based position label, e.g. "Recipe 2 of 5".
    pub fn label(&self) -> String {
        format!("Recipe {} of {}", self.current + 1, self.count)
    }

    pub fn has_previous(&self) -> bool {
        self.current > 0 && self.current - 1 < self.count
    }

    pub fn has_next(&self) -> bool {
        self.current + 1 < self.count
    }

    /// Request the previous tree. Returns whether the callback fired.
    pub fn previous(&mut self) -> bool {
        match self.current.checked_sub(1) {
            Some(index) => self.select(index),
            None => false,
        }
    }

    /// Request the next tree. Returns whether the callback fired.
    pub fn next(&mut self) -> bool {
        self.select(self.current + 1)
    }

    /// Request a specific tree. Out-of-range and unchanged indices are ignored.
    pub fn select(&mut self, index: usize) -> bool {
        if index >= self.count || index == self.current {
            return false;
        }
        (self.on_change)(index);
        true
    }
}

impl std::fmt::Debug for TreeSelector<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TreeSelector")
            .field("count", &self.count)
            .field("current", &self.current)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_label_is_one_based() {
        let mut sink = |_: usize| {};
        let selector = TreeSelector::new(5, 1, &mut sink);
        assert_eq!(selector.label(), "Recipe 2 of 5");
    }

    #[test]
    fn test_next_and_previous_forward_to_callback() {
        let mut seen = Vec::new();
        let mut record = |i: usize| seen.push(i);
        let mut selector = TreeSelector::new(3, 1, &mut record);
        assert!(selector.next());
        assert!(selector.previous());
        // The selector does not move on its own.
        assert_eq!(selector.current_index(), 1);
        drop(selector);
        assert_eq!(seen, vec![2, 0]);
    }

    #[test]
    fn test_no_wrap_at_ends() {
        let mut calls = 0;
        let mut count = |_: usize| calls += 1;
        {
            let mut first = TreeSelector::new(3, 0, &mut count);
            assert!(!first.has_previous());
            assert!(!first.previous());
        }
        {
            let mut last = TreeSelector::new(3, 2, &mut count);
            assert!(!last.has_next());
            assert!(!last.next());
        }
        assert_eq!(calls, 0);
    }

    #[test]
    fn test_select_rejects_invalid_and_current() {
        let mut seen = Vec::new();
        let mut record = |i: usize| seen.push(i);
        let mut selector = TreeSelector::new(4, 2, &mut record);
        assert!(!selector.select(2));
        assert!(!selector.select(4));
        assert!(selector.select(3));
        drop(selector);
        assert_eq!(seen, vec![3]);
    }

    #[test]
    fn test_out_of_range_current_steps_back_into_range() {
        let mut seen = Vec::new();
        let mut record = |i: usize| seen.push(i);
        let mut selector = TreeSelector::new(3, 7, &mut record);
        assert!(!selector.has_next());
        assert!(!selector.has_previous());
        assert!(!selector.next());
        assert!(!selector.previous());
        assert!(selector.select(0));
        drop(selector);
        assert_eq!(seen, vec![0]);
    }
}
