//! Raised-sine onset and offset ramps.
//!
//! Tone bursts that start or stop at a nonzero sample produce audible
//! clicks; a short sin^2 fade at both ends removes them without changing
//! the interior of the burst.

use std::f32::consts::PI;

use crate::error::{Result, StimulusError};

/// Applies a raised-sine fade-in/fade-out to tone buffers.
///
/// The window is `w[i] = sin^2(pi * i / (2L))` for `i = 0..L`, applied
/// forward over the first `L` samples and reversed over the last `L`.
///
/// # Example
///
/// ```rust
/// use tactus_core::SineRamp;
///
/// let ramp = SineRamp::new(48000, 5.0);
/// let mut tone = vec![1.0f32; 2400];
/// ramp.apply(&mut tone).unwrap();
/// assert_eq!(tone[0], 0.0);
/// assert_eq!(tone[2399], 0.0);
/// assert_eq!(tone[1200], 1.0); // interior untouched
/// ```
#[derive(Debug, Clone, Copy)]
pub struct SineRamp {
    sample_rate: f32,
    tau_ms: f32,
}

impl SineRamp {
    /// Create a ramp of `tau_ms` milliseconds at the given sample rate.
    pub fn new(sample_rate: u32, tau_ms: f32) -> Self {
        Self {
            sample_rate: sample_rate as f32,
            tau_ms,
        }
    }

    /// Ramp duration in milliseconds.
    pub fn tau_ms(&self) -> f32 {
        self.tau_ms
    }

    /// Ramp window length in samples.
    pub fn len_samples(&self) -> usize {
        (self.tau_ms / 1000.0 * self.sample_rate).round() as usize
    }

    /// Fade the buffer in and out, in place.
    ///
    /// A zero-length window is a no-op. Fails when the two windows would
    /// overlap, i.e. when `2L > buffer.len()`; keep the tone duration well
    /// above `tau`.
    pub fn apply(&self, buffer: &mut [f32]) -> Result<()> {
        if self.tau_ms < 0.0 || !self.tau_ms.is_finite() {
            return Err(StimulusError::invalid("tau", "must be a non-negative ms value"));
        }

        let l = self.len_samples();
        if l == 0 {
            return Ok(());
        }
        if 2 * l > buffer.len() {
            return Err(StimulusError::RampTooLong {
                ramp_samples: l,
                buffer_samples: buffer.len(),
            });
        }

        let len = buffer.len();
        for i in 0..l {
            let w = (PI * i as f32 / (2.0 * l as f32)).sin().powi(2);
            buffer[i] *= w;
            buffer[len - 1 - i] *= w;
        }
        Ok(())
    }
}
