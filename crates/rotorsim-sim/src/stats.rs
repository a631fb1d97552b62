//! Per-run statistics.
//!
//! [`RunStats`] summarizes how well a run tracked its target: where it ended,
//! how high it went, when it first got there and the average tracking error.

use rotorsim_core::history::History;

// ---------------------------------------------------------------------------
// RunStats
// ---------------------------------------------------------------------------

/// Summary of one completed run.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RunStats {
    /// Number of recorded samples.
    pub ticks: usize,
    /// Last recorded sample.
    pub final_rpm: f64,
    /// Largest recorded sample.
    pub peak_rpm: f64,
    /// Index of the first sample at or above the target, if any.
    pub first_reach: Option<usize>,
    /// How far the peak went past the target; zero if it never did.
    pub overshoot: f64,
    /// Mean of `|target - sample|` over all samples.
    pub mean_abs_error: f64,
    /// Ticks on which a fuzzy gain fell back to its universe midpoint.
    pub fallback_ticks: u32,
}

impl RunStats {
    /// Compute statistics for `history` against `target_rpm`. Returns
    /// `None` for an empty history.
    pub fn compute(history: &History, target_rpm: f64, fallback_ticks: u32) -> Option<Self> {
        let final_rpm = history.last()?;
        let peak_rpm = history.iter().fold(f64::NEG_INFINITY, f64::max);
        let first_reach = history.iter().position(|rpm| rpm >= target_rpm);
        let abs_error_sum: f64 = history.iter().map(|rpm| (target_rpm - rpm).abs()).sum();
        #[allow(clippy::cast_precision_loss)]
        let mean_abs_error = abs_error_sum / history.len() as f64;

        Some(Self {
            ticks: history.len(),
            final_rpm,
            peak_rpm,
            first_reach,
            overshoot: (peak_rpm - target_rpm).max(0.0),
            mean_abs_error,
            fallback_ticks,
        })
    }

    /// Whether any sample reached the target.
    pub const fn reached_target(&self) -> bool {
        self.first_reach.is_some()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn empty_history_has_no_stats() {
        assert!(RunStats::compute(&History::new(), 70.0, 0).is_none());
    }

    #[test]
    fn stats_for_overshooting_run() {
        let history = History::from(vec![20.0, 60.0, 80.0, 75.0, 68.0]);
        let stats = RunStats::compute(&history, 70.0, 2).unwrap();
        assert_eq!(stats.ticks, 5);
        assert_relative_eq!(stats.final_rpm, 68.0);
        assert_relative_eq!(stats.peak_rpm, 80.0);
        assert_eq!(stats.first_reach, Some(2));
        assert!(stats.reached_target());
        assert_relative_eq!(stats.overshoot, 10.0);
        // |50| + |10| + |10| + |5| + |2| = 77
        assert_relative_eq!(stats.mean_abs_error, 77.0 / 5.0);
        assert_eq!(stats.fallback_ticks, 2);
    }

    #[test]
    fn stats_for_undershooting_run() {
        let history = History::from(vec![4.0, 7.6, 10.84]);
        let stats = RunStats::compute(&history, 70.0, 0).unwrap();
        assert!(!stats.reached_target());
        assert_relative_eq!(stats.overshoot, 0.0);
        assert_relative_eq!(stats.peak_rpm, 10.84);
    }

    #[test]
    fn reaching_exactly_the_target_counts() {
        let history = History::from(vec![69.0, 70.0]);
        let stats = RunStats::compute(&history, 70.0, 0).unwrap();
        assert_eq!(stats.first_reach, Some(1));
        assert_relative_eq!(stats.overshoot, 0.0);
    }
}
