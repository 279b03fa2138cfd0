//! Offline amplitude-ceiling calibration.
//!
//! The tone synthesizer takes a fixed peak ceiling. To choose it, sweep
//! the operating envelope (every frequency/decay-factor combination the
//! experiment may use) at unit ceiling, record the largest absolute
//! sample value `z`, and set the ceiling to `1 / (z + margin)`. Any burst
//! rendered inside the envelope then peaks below full scale.

use crate::error::{Result, StimulusError};
use crate::tone::{ToneSpec, ToneSynth};

/// The frequency/decay-factor envelope to sweep.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CalibrationGrid {
    /// Lowest base frequency in Hz.
    pub freq_min_hz: f32,
    /// Highest base frequency in Hz.
    pub freq_max_hz: f32,
    /// Number of frequency grid points.
    pub freq_steps: usize,
    /// Lowest harmonic decay factor.
    pub factor_min: f32,
    /// Highest harmonic decay factor.
    pub factor_max: f32,
    /// Number of decay-factor grid points.
    pub factor_steps: usize,
    /// Harmonic count used throughout the sweep.
    pub num_harmonics: u32,
    /// Burst duration in milliseconds. The shortest duration in use is the
    /// worst case: longer bursts only repeat the same peak.
    pub duration_ms: f32,
}

impl Default for CalibrationGrid {
    fn default() -> Self {
        Self {
            freq_min_hz: 33.0,
            freq_max_hz: 500.0,
            freq_steps: 200,
            factor_min: 0.009,
            factor_max: 0.99,
            factor_steps: 100,
            num_harmonics: 5,
            duration_ms: 33.0,
        }
    }
}

/// Result of a calibration sweep.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Calibration {
    /// Largest absolute sample value observed at unit ceiling.
    pub peak: f32,
    /// Derived ceiling: `1 / (peak + margin)`.
    pub max_amplitude: f32,
}

fn grid_point(min: f32, max: f32, steps: usize, i: usize) -> f32 {
    min + (max - min) * i as f32 / (steps - 1) as f32
}

/// Sweep the envelope and derive the peak ceiling.
pub fn calibrate_ceiling(
    synth: &ToneSynth,
    grid: &CalibrationGrid,
    margin: f32,
) -> Result<Calibration> {
    if grid.freq_steps < 2 || grid.factor_steps < 2 {
        return Err(StimulusError::invalid(
            "calibration_grid",
            "need at least 2 grid points per axis",
        ));
    }
    if !(margin >= 0.0) || !margin.is_finite() {
        return Err(StimulusError::invalid("margin", "must be non-negative"));
    }

    let mut peak = 0.0f32;
    for fi in 0..grid.freq_steps {
        let frequency = grid_point(grid.freq_min_hz, grid.freq_max_hz, grid.freq_steps, fi);
        for hi in 0..grid.factor_steps {
            let harmonic_factor =
                grid_point(grid.factor_min, grid.factor_max, grid.factor_steps, hi);
            let spec = ToneSpec {
                frequency,
                num_harmonics: grid.num_harmonics,
                duration_ms: grid.duration_ms,
                harmonic_factor,
                max_amplitude: 1.0,
            };
            let sound = synth.render(&spec)?;
            let local = sound.iter().fold(0.0f32, |m, s| m.max(s.abs()));
            peak = peak.max(local);
        }
        tracing::trace!(frequency, peak, "calibration row done");
    }

    if peak <= 0.0 {
        return Err(StimulusError::Consistency(
            "calibration sweep observed no signal".into(),
        ));
    }

    Ok(Calibration {
        peak,
        max_amplitude: 1.0 / (peak + margin),
    })
}
