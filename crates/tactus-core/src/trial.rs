//! High-level trial rendering.
//!
//! Glues the synthesis stages together: render one harmonic burst, ramp
//! it, pick the displaced tone, compose the timeline. One rendered burst
//! is reused for every tone slot of the trial.

use rand::Rng;

use crate::error::Result;
use crate::ramp::SineRamp;
use crate::timeline::{TimelineComposer, TimingSpec, Waveform, schedule_deviation};
use crate::tone::{ToneSpec, ToneSynth};

/// Renders complete timing-deviation trials.
///
/// # Example
///
/// ```rust
/// use rand::SeedableRng;
/// use rand::rngs::StdRng;
/// use tactus_core::{TimingSpec, ToneSpec, TrialRenderer};
///
/// let renderer = TrialRenderer::new(48000, 5.0);
/// let tone = ToneSpec {
///     frequency: 440.0,
///     num_harmonics: 5,
///     duration_ms: 50.0,
///     harmonic_factor: 0.7,
///     max_amplitude: 1.0,
/// };
/// let timing = TimingSpec { isi_ms: 600.0, no_tones: 7, delta_ms: 50.0 };
///
/// let mut rng = StdRng::seed_from_u64(42);
/// let trial = renderer.render_trial(&tone, &timing, &mut rng).unwrap();
/// assert!((3..6).contains(&trial.displaced_tone));
/// assert_eq!(trial.samples.len(), trial.predicted_samples);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct TrialRenderer {
    synth: ToneSynth,
    ramp: SineRamp,
    composer: TimelineComposer,
}

impl TrialRenderer {
    /// Create a renderer for the given sample rate (Hz) and ramp window (ms).
    pub fn new(sample_rate: u32, tau_ms: f32) -> Self {
        Self {
            synth: ToneSynth::new(sample_rate),
            ramp: SineRamp::new(sample_rate, tau_ms),
            composer: TimelineComposer::new(sample_rate),
        }
    }

    /// Render one ramped tone burst.
    pub fn render_tone(&self, spec: &ToneSpec) -> Result<Vec<f32>> {
        let mut sound = self.synth.render(spec)?;
        self.ramp.apply(&mut sound)?;
        Ok(sound)
    }

    /// Render one full trial: ramped burst, scheduled displacement,
    /// composed timeline.
    ///
    /// The displaced tone is drawn from the RNG even for on-time trials,
    /// so a fixed seed yields the same draw sequence whatever the
    /// deviation.
    pub fn render_trial<R: Rng + ?Sized>(
        &self,
        tone: &ToneSpec,
        timing: &TimingSpec,
        rng: &mut R,
    ) -> Result<Waveform> {
        let burst = self.render_tone(tone)?;
        let displaced_tone = schedule_deviation(timing.no_tones, rng)?;
        self.composer.compose(&burst, timing, displaced_tone)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn tone_spec() -> ToneSpec {
        ToneSpec {
            frequency: 440.0,
            num_harmonics: 5,
            duration_ms: 50.0,
            harmonic_factor: 0.7,
            max_amplitude: 1.0,
        }
    }

    #[test]
    fn rendered_tone_is_ramped() {
        let renderer = TrialRenderer::new(48000, 5.0);
        let burst = renderer.render_tone(&tone_spec()).unwrap();
        assert_eq!(burst.len(), 2400);
        assert_eq!(burst[0], 0.0);
        assert!(burst[2399].abs() < 1e-3);
    }

    #[test]
    fn trial_length_matches_prediction_for_reference_parameters() {
        // 48 kHz, 440 Hz, 50 ms burst, K=5, h=0.7, 600 ms ISI, 7 tones,
        // 50 ms late deviation.
        let renderer = TrialRenderer::new(48000, 5.0);
        let timing = TimingSpec { isi_ms: 600.0, no_tones: 7, delta_ms: 50.0 };
        let mut rng = StdRng::seed_from_u64(1);

        let trial = renderer.render_trial(&tone_spec(), &timing, &mut rng).unwrap();
        // Burst 2400, gaps 6 * 28800 with +-2400 cancelling out.
        assert_eq!(trial.samples.len(), 7 * 2400 + 6 * 28800);
        assert_eq!(trial.samples.len(), trial.predicted_samples);
        assert!((3..6).contains(&trial.displaced_tone));
    }

    #[test]
    fn fixed_seed_reproduces_the_trial() {
        let renderer = TrialRenderer::new(48000, 5.0);
        let timing = TimingSpec { isi_ms: 500.0, no_tones: 7, delta_ms: -30.0 };

        let a = renderer
            .render_trial(&tone_spec(), &timing, &mut StdRng::seed_from_u64(7))
            .unwrap();
        let b = renderer
            .render_trial(&tone_spec(), &timing, &mut StdRng::seed_from_u64(7))
            .unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn peak_stays_within_full_scale() {
        let renderer = TrialRenderer::new(48000, 5.0);
        let timing = TimingSpec { isi_ms: 400.0, no_tones: 7, delta_ms: 20.0 };
        let mut rng = StdRng::seed_from_u64(3);
        let trial = renderer.render_trial(&tone_spec(), &timing, &mut rng).unwrap();

        let peak = trial.samples.iter().fold(0.0f32, |m, s| m.max(s.abs()));
        assert!(peak <= 1.0, "peak {peak}");
    }
}
