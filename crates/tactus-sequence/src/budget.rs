//! Stochastic repetition budgeting.

use rand::Rng;

use crate::error::{Result, SequenceError};

/// Minimum number of non-repeated slots a stream must keep. The protected
/// head (3), tail (2), and block seams all demand unique tokens, so a
/// budget that eats into this headroom can never be placed.
pub const MIN_UNIQUE_SLOTS: usize = 5;

/// Number of adjacent-repeat events to engineer into a stream of
/// `total_tokens` tokens at repetition probability `rep_prob`.
///
/// The expectation `rep_prob * total_tokens` is rarely an integer;
/// truncating it would bias every run of the experiment low. Instead the
/// fractional part becomes one weighted coin flip: `floor` with
/// probability `1 - frac`, `ceil` with probability `frac`. Integral
/// expectations consume no randomness at all.
///
/// # Example
///
/// ```rust
/// use rand::SeedableRng;
/// use rand::rngs::StdRng;
///
/// let mut rng = StdRng::seed_from_u64(0);
/// // 5% of 100 tokens is exactly 5, so no coin is flipped.
/// let n = tactus_sequence::repetition_budget(0.05, 100, &mut rng).unwrap();
/// assert_eq!(n, 5);
/// ```
pub fn repetition_budget<R: Rng + ?Sized>(
    rep_prob: f64,
    total_tokens: usize,
    rng: &mut R,
) -> Result<usize> {
    if !(0.0..1.0).contains(&rep_prob) {
        return Err(SequenceError::invalid(
            "rep_prob",
            format!("{rep_prob} is outside [0, 1)"),
        ));
    }
    if total_tokens == 0 {
        return Err(SequenceError::invalid("total_tokens", "must be positive"));
    }

    let expected = rep_prob * total_tokens as f64;
    let floor = expected.floor();
    let frac = expected - floor;
    let n_reps = if frac > 0.0 && rng.gen_bool(frac) {
        floor as usize + 1
    } else {
        floor as usize
    };

    if total_tokens - n_reps < MIN_UNIQUE_SLOTS {
        return Err(SequenceError::BudgetInfeasible {
            n_reps,
            total: total_tokens,
            min_unique: MIN_UNIQUE_SLOTS,
        });
    }
    Ok(n_reps)
}
