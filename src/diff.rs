/// Row counts of the persisted baseline and a fresh fetch of the same dataset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RowDelta {
    pub baseline: usize,
    pub fetched: usize,
}

impl RowDelta {
    /// A missing baseline (first run) counts as zero rows.
    pub fn new(baseline: Option<usize>, fetched: usize) -> Self {
        Self {
            baseline: baseline.unwrap_or(0),
            fetched,
        }
    }

    pub fn has_new_rows(&self) -> bool {
        self.fetched > self.baseline
    }

    pub fn added(&self) -> usize {
        self.fetched.saturating_sub(self.baseline)
    }
}

#[cfg(test)]
mod tests {
    use super::RowDelta;

    #[test]
    fn strictly_greater_counts_as_new() {
        assert!(!RowDelta::new(Some(10), 10).has_new_rows());
        assert!(RowDelta::new(Some(10), 12).has_new_rows());
        assert_eq!(RowDelta::new(Some(10), 12).added(), 2);
        assert!(!RowDelta::new(Some(10), 7).has_new_rows());
        assert_eq!(RowDelta::new(Some(10), 7).added(), 0);
    }

    #[test]
    fn first_run_is_all_new() {
        let delta = RowDelta::new(None, 3);
        assert_eq!(delta.baseline, 0);
        assert!(delta.has_new_rows());
        assert!(!RowDelta::new(None, 0).has_new_rows());
    }
}
