//! Harmonic complex tone synthesis.
//!
//! A tone burst is an additive sum of `K` sinusoidal harmonics of a base
//! frequency, each scaled by a geometric decay factor and a shared peak
//! ceiling calibrated offline (see [`crate::calibrate`]).

use std::f32::consts::TAU;

use crate::error::{Result, StimulusError};

/// Parameters of one harmonic complex tone burst.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ToneSpec {
    /// Base frequency in Hz.
    pub frequency: f32,
    /// Number of harmonics, fundamental included.
    pub num_harmonics: u32,
    /// Burst duration in milliseconds.
    pub duration_ms: f32,
    /// Per-harmonic amplitude decay factor, strictly between 0 and 1.
    pub harmonic_factor: f32,
    /// Peak ceiling. Calibrated so that no frequency/decay combination in
    /// the operating envelope clips; see [`crate::calibrate::calibrate_ceiling`].
    pub max_amplitude: f32,
}

impl ToneSpec {
    fn validate(&self) -> Result<()> {
        if !(self.frequency > 0.0) || !self.frequency.is_finite() {
            return Err(StimulusError::invalid("frequency", "must be a positive, finite Hz value"));
        }
        if self.num_harmonics < 1 {
            return Err(StimulusError::invalid("num_harmonics", "must be at least 1"));
        }
        if !(self.duration_ms > 0.0) || !self.duration_ms.is_finite() {
            return Err(StimulusError::invalid("duration_ms", "must be positive"));
        }
        if !(self.harmonic_factor > 0.0 && self.harmonic_factor < 1.0) {
            return Err(StimulusError::invalid(
                "harmonic_factor",
                format!("{} is outside (0, 1)", self.harmonic_factor),
            ));
        }
        if !(self.max_amplitude > 0.0) || !self.max_amplitude.is_finite() {
            return Err(StimulusError::invalid("max_amplitude", "must be positive"));
        }
        Ok(())
    }
}

/// Renders harmonic complex tone bursts at a fixed sample rate.
///
/// # Example
///
/// ```rust
/// use tactus_core::{ToneSpec, ToneSynth};
///
/// let synth = ToneSynth::new(48000);
/// let spec = ToneSpec {
///     frequency: 440.0,
///     num_harmonics: 5,
///     duration_ms: 50.0,
///     harmonic_factor: 0.7,
///     max_amplitude: 1.0,
/// };
/// let sound = synth.render(&spec).unwrap();
/// assert_eq!(sound.len(), 2400); // 50 ms at 48 kHz
/// ```
#[derive(Debug, Clone, Copy)]
pub struct ToneSynth {
    sample_rate: f32,
}

impl ToneSynth {
    /// Create a synthesizer for the given sample rate in Hz.
    pub fn new(sample_rate: u32) -> Self {
        Self {
            sample_rate: sample_rate as f32,
        }
    }

    /// Sample rate in Hz.
    pub fn sample_rate(&self) -> f32 {
        self.sample_rate
    }

    /// Number of samples in a burst of `duration_ms`.
    pub fn burst_samples(&self, duration_ms: f32) -> usize {
        (self.sample_rate * duration_ms / 1000.0).round() as usize
    }

    /// Render one tone burst.
    ///
    /// Produces `round(sample_rate * duration)` samples over `t in
    /// [0, duration)`, summing `max_amplitude * factor^(k-1) / K *
    /// sin(2*pi*frequency*k*t)` over harmonics `k = 1..=K`.
    ///
    /// The ceiling is rejected if the rendered peak exceeds full scale:
    /// a calibrated ceiling keeps every combination in its envelope below
    /// 1.0, so exceeding it means the caller left the envelope.
    pub fn render(&self, spec: &ToneSpec) -> Result<Vec<f32>> {
        if self.sample_rate <= 0.0 {
            return Err(StimulusError::invalid("sample_rate", "must be positive"));
        }
        spec.validate()?;

        let n = self.burst_samples(spec.duration_ms);
        let k_total = spec.num_harmonics as f32;
        let mut sound = vec![0.0f32; n];

        for k in 1..=spec.num_harmonics {
            let amplitude =
                spec.max_amplitude * spec.harmonic_factor.powi(k as i32 - 1) / k_total;
            let omega = TAU * spec.frequency * k as f32;
            for (i, sample) in sound.iter_mut().enumerate() {
                let t = i as f32 / self.sample_rate;
                *sample += amplitude * (omega * t).sin();
            }
        }

        let peak = sound.iter().fold(0.0f32, |m, s| m.max(s.abs()));
        if peak > 1.0 {
            return Err(StimulusError::invalid(
                "max_amplitude",
                format!("ceiling {} clips at {:.3} peak; recalibrate", spec.max_amplitude, peak),
            ));
        }

        Ok(sound)
    }
}
