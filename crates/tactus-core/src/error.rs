//! Error types for the audio generation path.

use thiserror::Error;

/// Errors that can occur while synthesizing a stimulus waveform.
///
/// Every variant is fatal to the generation call that raised it; the crate
/// never returns a partially built buffer alongside an error.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum StimulusError {
    /// A parameter is outside its operating range.
    #[error("invalid parameter '{param}': {reason}")]
    InvalidParameter {
        /// Name of the offending parameter.
        param: &'static str,
        /// Description of the violated bound.
        reason: String,
    },

    /// The timing deviation leaves a non-positive gap next to the
    /// displaced tone.
    #[error(
        "deviation of {delta_ms} ms leaves no gap at {isi_ms} ms ISI; reduce the deviation or increase the ISI"
    )]
    DeviationTooLarge {
        /// Inter-stimulus interval in milliseconds.
        isi_ms: f32,
        /// Signed deviation in milliseconds.
        delta_ms: f32,
    },

    /// The ramp window does not fit the tone buffer.
    #[error("ramp of {ramp_samples} samples does not fit a {buffer_samples}-sample tone twice")]
    RampTooLong {
        /// Ramp window length in samples.
        ramp_samples: usize,
        /// Length of the buffer the ramp was applied to.
        buffer_samples: usize,
    },

    /// A post-condition the composer guarantees by construction failed.
    /// This indicates a programming defect, not bad input.
    #[error("internal consistency fault: {0}")]
    Consistency(String),
}

impl StimulusError {
    pub(crate) fn invalid(param: &'static str, reason: impl Into<String>) -> Self {
        StimulusError::InvalidParameter {
            param,
            reason: reason.into(),
        }
    }
}

/// Convenience result type for stimulus generation.
pub type Result<T> = core::result::Result<T, StimulusError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_parameter_display() {
        let err = StimulusError::invalid("frequency", "must be positive");
        assert_eq!(err.to_string(), "invalid parameter 'frequency': must be positive");
    }

    #[test]
    fn deviation_display_names_both_quantities() {
        let err = StimulusError::DeviationTooLarge {
            isi_ms: 100.0,
            delta_ms: -120.0,
        };
        let msg = err.to_string();
        assert!(msg.contains("-120"), "got: {msg}");
        assert!(msg.contains("100"), "got: {msg}");
    }

    #[test]
    fn ramp_display() {
        let err = StimulusError::RampTooLong {
            ramp_samples: 500,
            buffer_samples: 240,
        };
        assert!(err.to_string().contains("500"));
        assert!(err.to_string().contains("240"));
    }
}
