//! Error types for sequence sampling.

use thiserror::Error;

/// Errors that can occur while sampling a constrained sequence.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SequenceError {
    /// A parameter is outside its operating range.
    #[error("invalid parameter '{param}': {reason}")]
    InvalidParameter {
        /// Name of the offending parameter.
        param: &'static str,
        /// Description of the violated bound.
        reason: String,
    },

    /// The repetition budget leaves too few unique slots to satisfy the
    /// protected zones and block boundaries.
    #[error(
        "repetition probability too high: {n_reps} repeats leave fewer than {min_unique} unique slots in {total} tokens"
    )]
    BudgetInfeasible {
        /// Number of repeats requested by the budget.
        n_reps: usize,
        /// Total token count of the stream.
        total: usize,
        /// Minimum number of unique slots required.
        min_unique: usize,
    },

    /// A bounded rejection-sampling loop ran out of attempts. The
    /// parameters are treated as infeasible; the loop is never resumed.
    #[error("{stage} sampling did not converge within {attempts} attempts")]
    SamplingExhausted {
        /// Which sampling phase gave up.
        stage: &'static str,
        /// The attempt bound that was exhausted.
        attempts: usize,
    },

    /// A post-condition the sampler guarantees by construction failed.
    /// This indicates a programming defect, not bad input.
    #[error("internal consistency fault: {0}")]
    Consistency(String),
}

impl SequenceError {
    pub(crate) fn invalid(param: &'static str, reason: impl Into<String>) -> Self {
        SequenceError::InvalidParameter {
            param,
            reason: reason.into(),
        }
    }
}

/// Convenience result type for sequence sampling.
pub type Result<T> = core::result::Result<T, SequenceError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn budget_display_names_all_quantities() {
        let err = SequenceError::BudgetInfeasible {
            n_reps: 97,
            total: 100,
            min_unique: 5,
        };
        let msg = err.to_string();
        assert!(msg.contains("97") && msg.contains("100") && msg.contains('5'), "got: {msg}");
    }

    #[test]
    fn exhaustion_display() {
        let err = SequenceError::SamplingExhausted {
            stage: "repeat placement",
            attempts: 10_000,
        };
        assert_eq!(
            err.to_string(),
            "repeat placement sampling did not converge within 10000 attempts"
        );
    }
}
