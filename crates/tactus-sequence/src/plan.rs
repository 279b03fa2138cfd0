//! Trial parameter planning.
//!
//! Builds the ISI and deviation grids a stimulus set is rendered over.
//! Deviations come from an arithmetic grid with zero removed plus a few
//! extra magnitudes near the detection threshold; the set is then balanced
//! so that sub-threshold (perceptually no-signal) and supra-threshold
//! trials are equinumerous, by drawing filler deviations from the unused
//! sub-threshold integers.

use std::collections::HashSet;

use rand::Rng;
use rand::seq::SliceRandom;

use crate::error::{Result, SequenceError};

/// Inter-stimulus intervals from `min_ms` (inclusive) to `max_ms`
/// (exclusive) in `step_ms` increments.
pub fn isi_grid(min_ms: i32, max_ms: i32, step_ms: i32) -> Result<Vec<i32>> {
    if step_ms <= 0 {
        return Err(SequenceError::invalid("isi_step", "must be positive"));
    }
    if min_ms <= 0 || max_ms <= min_ms {
        return Err(SequenceError::invalid(
            "isi_range",
            format!("[{min_ms}, {max_ms}) is not a valid positive range"),
        ));
    }
    Ok((min_ms..max_ms).step_by(step_ms as usize).collect())
}

/// Specification of the deviation set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeltaGrid {
    /// Smallest grid deviation in ms (inclusive, typically negative).
    pub min_ms: i32,
    /// Largest grid deviation in ms (exclusive).
    pub max_ms: i32,
    /// Grid step in ms.
    pub step_ms: i32,
    /// Extra deviations appended outside the grid, e.g. near-threshold
    /// magnitudes the grid step would skip.
    pub extra_ms: Vec<i32>,
    /// Detectability threshold in ms: deviations with `|delta| <
    /// threshold` count as no-signal trials.
    pub threshold_ms: i32,
}

impl DeltaGrid {
    /// Build the balanced deviation list, ascending.
    ///
    /// Zero is dropped from the signal grid (an on-time trial carries no
    /// signal by definition). If supra-threshold trials outnumber
    /// sub-threshold ones, the difference is drawn without replacement
    /// from the unused integers inside `(-threshold, threshold)`, zero
    /// included, since fillers are no-signal by construction.
    pub fn build<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<Vec<i32>> {
        if self.step_ms <= 0 {
            return Err(SequenceError::invalid("delta_step", "must be positive"));
        }
        if self.max_ms <= self.min_ms {
            return Err(SequenceError::invalid(
                "delta_range",
                format!("[{}, {}) is empty", self.min_ms, self.max_ms),
            ));
        }
        if self.threshold_ms <= 0 {
            return Err(SequenceError::invalid("threshold", "must be positive"));
        }

        let mut deltas: Vec<i32> = (self.min_ms..self.max_ms)
            .step_by(self.step_ms as usize)
            .filter(|&d| d != 0)
            .collect();
        deltas.extend(self.extra_ms.iter().copied().filter(|&d| d != 0));

        let below = deltas
            .iter()
            .filter(|d| d.abs() < self.threshold_ms)
            .count();
        let above = deltas
            .iter()
            .filter(|d| d.abs() > self.threshold_ms)
            .count();

        if above > below {
            let deficit = above - below;
            let used: HashSet<i32> = deltas.iter().copied().collect();
            let fillers: Vec<i32> = (-self.threshold_ms + 1..self.threshold_ms)
                .filter(|d| !used.contains(d))
                .collect();
            if fillers.len() < deficit {
                return Err(SequenceError::invalid(
                    "threshold",
                    format!(
                        "cannot balance: {deficit} no-signal trials needed, {} sub-threshold values free",
                        fillers.len()
                    ),
                ));
            }
            deltas.extend(fillers.choose_multiple(rng, deficit).copied());
        }

        deltas.sort_unstable();
        Ok(deltas)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn reference_grid() -> DeltaGrid {
        DeltaGrid {
            min_ms: -300,
            max_ms: 301,
            step_ms: 10,
            extra_ms: vec![-15, -5, 5, 15],
            threshold_ms: 50,
        }
    }

    #[test]
    fn isi_grid_is_inclusive_exclusive() {
        assert_eq!(isi_grid(500, 800, 100).unwrap(), vec![500, 600, 700]);
        assert_eq!(isi_grid(400, 800, 100).unwrap(), vec![400, 500, 600, 700]);
    }

    #[test]
    fn isi_grid_rejects_bad_ranges() {
        assert!(isi_grid(500, 800, 0).is_err());
        assert!(isi_grid(800, 500, 100).is_err());
        assert!(isi_grid(0, 800, 100).is_err());
    }

    #[test]
    fn signal_grid_never_contains_zero_signal() {
        let mut rng = StdRng::seed_from_u64(1);
        let grid = DeltaGrid {
            threshold_ms: 1000, // no balancing fillers kick in
            ..reference_grid()
        };
        let deltas = grid.build(&mut rng).unwrap();
        assert!(!deltas.contains(&0));
    }

    #[test]
    fn extras_are_included() {
        let mut rng = StdRng::seed_from_u64(1);
        let deltas = reference_grid().build(&mut rng).unwrap();
        for extra in [-15, -5, 5, 15] {
            assert!(deltas.contains(&extra), "missing extra {extra}");
        }
    }

    #[test]
    fn balancing_equalizes_signal_and_no_signal_counts() {
        let mut rng = StdRng::seed_from_u64(7);
        let grid = reference_grid();
        let deltas = grid.build(&mut rng).unwrap();

        let below = deltas.iter().filter(|d| d.abs() < 50).count();
        let above = deltas.iter().filter(|d| d.abs() > 50).count();
        assert_eq!(below, above);
    }

    #[test]
    fn fillers_are_unique_and_sub_threshold() {
        let mut rng = StdRng::seed_from_u64(7);
        let deltas = reference_grid().build(&mut rng).unwrap();

        let mut seen = HashSet::new();
        for &d in &deltas {
            assert!(seen.insert(d), "duplicate deviation {d}");
        }
        assert!(deltas.windows(2).all(|w| w[0] < w[1]), "not ascending");
    }

    #[test]
    fn deterministic_under_a_fixed_seed() {
        let a = reference_grid().build(&mut StdRng::seed_from_u64(3)).unwrap();
        let b = reference_grid().build(&mut StdRng::seed_from_u64(3)).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn impossible_balance_is_rejected() {
        // Step 1 saturates the sub-threshold integers, leaving no fillers.
        let grid = DeltaGrid {
            min_ms: -300,
            max_ms: 301,
            step_ms: 1,
            extra_ms: vec![],
            threshold_ms: 50,
        };
        let mut rng = StdRng::seed_from_u64(0);
        assert!(grid.build(&mut rng).is_err());
    }

    #[test]
    fn parameter_bounds_are_enforced() {
        let mut rng = StdRng::seed_from_u64(0);
        let bad_step = DeltaGrid { step_ms: 0, ..reference_grid() };
        let bad_range = DeltaGrid { min_ms: 10, max_ms: 10, ..reference_grid() };
        let bad_threshold = DeltaGrid { threshold_ms: 0, ..reference_grid() };
        assert!(bad_step.build(&mut rng).is_err());
        assert!(bad_range.build(&mut rng).is_err());
        assert!(bad_threshold.build(&mut rng).is_err());
    }
}
