//! Deviation scheduling and sample-accurate timeline assembly.
//!
//! A trial is `no_tones` identical tone bursts separated by silent gaps.
//! One mid-sequence tone is displaced in time: the gap before it is
//! lengthened by the signed deviation and the gap after it shortened by
//! the same amount, so a positive deviation delays the displaced onset
//! and a negative one advances it.

use rand::Rng;

use crate::error::{Result, StimulusError};

/// First tone index eligible for displacement. The opening tones establish
/// the rhythm and are never displaced; neither is the final tone, which has
/// no trailing gap to compensate into.
const FIRST_ELIGIBLE_TONE: usize = 3;

/// Timing of one trial.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimingSpec {
    /// Inter-stimulus interval in milliseconds (silence between bursts).
    pub isi_ms: f32,
    /// Number of tone bursts in the trial.
    pub no_tones: usize,
    /// Signed deviation in milliseconds. Positive = late onset, negative =
    /// early onset, zero = an on-time (no-signal) trial.
    pub delta_ms: f32,
}

/// One assembled stimulus waveform.
#[derive(Debug, Clone, PartialEq)]
pub struct Waveform {
    /// Mono samples of the whole trial.
    pub samples: Vec<f32>,
    /// Index of the displaced tone burst.
    pub displaced_tone: usize,
    /// Analytically predicted total length; always equals `samples.len()`.
    pub predicted_samples: usize,
}

/// Draw the displaced tone uniformly from the eligible mid-range
/// `[3, no_tones - 1)`.
///
/// Needs at least five tones, otherwise the eligible range is empty.
/// The draw happens for on-time trials too, so the RNG cursor advances
/// identically whatever the deviation.
pub fn schedule_deviation<R: Rng + ?Sized>(no_tones: usize, rng: &mut R) -> Result<usize> {
    if no_tones < FIRST_ELIGIBLE_TONE + 2 {
        return Err(StimulusError::invalid(
            "no_tones",
            format!(
                "{no_tones} tones leave no displacement candidate; need at least {}",
                FIRST_ELIGIBLE_TONE + 2
            ),
        ));
    }
    Ok(rng.gen_range(FIRST_ELIGIBLE_TONE..no_tones - 1))
}

/// Position of an inter-tone gap relative to the displaced tone.
///
/// Gap `g` is the silence between tones `g` and `g + 1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum GapKind {
    /// The gap whose end is the displaced onset; carries `isi + delta`.
    Before,
    /// The gap right after the displaced tone; carries `isi - delta`.
    After,
    /// Any other gap; carries `isi`.
    Ordinary,
}

fn classify_gap(gap: usize, displaced: usize) -> GapKind {
    if gap + 1 == displaced {
        GapKind::Before
    } else if gap == displaced {
        GapKind::After
    } else {
        GapKind::Ordinary
    }
}

/// Concatenates tone bursts and silences into one sample-exact waveform.
///
/// # Example
///
/// ```rust
/// use tactus_core::{TimelineComposer, TimingSpec};
///
/// let composer = TimelineComposer::new(48000);
/// let tone = vec![1.0f32; 2400]; // 50 ms burst
/// let timing = TimingSpec { isi_ms: 600.0, no_tones: 7, delta_ms: 0.0 };
/// let trial = composer.compose(&tone, &timing, 4).unwrap();
/// assert_eq!(trial.samples.len(), 7 * 2400 + 6 * 28800);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct TimelineComposer {
    sample_rate: f32,
}

impl TimelineComposer {
    /// Create a composer for the given sample rate in Hz.
    pub fn new(sample_rate: u32) -> Self {
        Self {
            sample_rate: sample_rate as f32,
        }
    }

    fn ms_to_samples(&self, ms: f32) -> i64 {
        (ms / 1000.0 * self.sample_rate).round() as i64
    }

    fn gap_samples(&self, timing: &TimingSpec) -> Result<(i64, i64)> {
        let isi_samples = self.ms_to_samples(timing.isi_ms);
        let delta_samples = self.ms_to_samples(timing.delta_ms);
        if isi_samples - delta_samples.abs() <= 0 {
            return Err(StimulusError::DeviationTooLarge {
                isi_ms: timing.isi_ms,
                delta_ms: timing.delta_ms,
            });
        }
        Ok((isi_samples, delta_samples))
    }

    fn validate(&self, timing: &TimingSpec, displaced_tone: usize) -> Result<()> {
        if self.sample_rate <= 0.0 {
            return Err(StimulusError::invalid("sample_rate", "must be positive"));
        }
        if timing.no_tones < 3 {
            return Err(StimulusError::invalid("no_tones", "must be at least 3"));
        }
        if !(timing.isi_ms > 0.0) || !timing.isi_ms.is_finite() {
            return Err(StimulusError::invalid("isi", "must be a positive ms value"));
        }
        // An on-time trial has no displaced onset, so the index is only a
        // label there; with a real deviation it must be an eligible slot.
        if timing.delta_ms != 0.0
            && !(FIRST_ELIGIBLE_TONE..timing.no_tones - 1).contains(&displaced_tone)
        {
            return Err(StimulusError::invalid(
                "displaced_tone",
                format!(
                    "{displaced_tone} is outside [{FIRST_ELIGIBLE_TONE}, {})",
                    timing.no_tones - 1
                ),
            ));
        }
        Ok(())
    }

    /// Total sample count of a trial, computed without building it.
    pub fn predicted_samples(
        &self,
        tone_samples: usize,
        timing: &TimingSpec,
        displaced_tone: usize,
    ) -> Result<usize> {
        self.validate(timing, displaced_tone)?;
        let (isi_samples, delta_samples) = self.gap_samples(timing)?;

        let mut total = (timing.no_tones * tone_samples) as i64;
        for gap in 0..timing.no_tones - 1 {
            total += match classify_gap(gap, displaced_tone) {
                GapKind::Before => isi_samples + delta_samples,
                GapKind::After => isi_samples - delta_samples,
                GapKind::Ordinary => isi_samples,
            };
        }
        Ok(total as usize)
    }

    /// Build the waveform for one trial.
    ///
    /// Appends the (already ramped) tone burst `no_tones` times with a
    /// silence after each tone but the last. The silence lengths follow
    /// the gap classification relative to `displaced_tone`; the deviation
    /// is applied symmetrically, never clamped. An infeasible deviation
    /// (`|delta|` at least one ISI) is a configuration error.
    pub fn compose(
        &self,
        tone: &[f32],
        timing: &TimingSpec,
        displaced_tone: usize,
    ) -> Result<Waveform> {
        if tone.is_empty() {
            return Err(StimulusError::invalid("tone", "burst buffer is empty"));
        }
        let predicted = self.predicted_samples(tone.len(), timing, displaced_tone)?;
        let (isi_samples, delta_samples) = self.gap_samples(timing)?;

        let mut samples = Vec::with_capacity(predicted);
        for tone_idx in 0..timing.no_tones {
            samples.extend_from_slice(tone);
            if tone_idx == timing.no_tones - 1 {
                break; // no gap after the final tone
            }
            let gap_len = match classify_gap(tone_idx, displaced_tone) {
                GapKind::Before => isi_samples + delta_samples,
                GapKind::After => isi_samples - delta_samples,
                GapKind::Ordinary => isi_samples,
            };
            samples.resize(samples.len() + gap_len as usize, 0.0);
        }

        if samples.len() != predicted {
            return Err(StimulusError::Consistency(format!(
                "composed {} samples but predicted {predicted}",
                samples.len()
            )));
        }

        tracing::debug!(
            no_tones = timing.no_tones,
            isi_ms = timing.isi_ms,
            delta_ms = timing.delta_ms,
            displaced_tone,
            total_samples = samples.len(),
            "composed trial"
        );

        Ok(Waveform {
            samples,
            displaced_tone,
            predicted_samples: predicted,
        })
    }
}
