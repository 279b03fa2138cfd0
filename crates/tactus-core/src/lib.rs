//! Tactus Core - stimulus synthesis for auditory timing experiments.
//!
//! This crate builds the audio half of a timing-deviation experiment:
//! sequences of identical harmonic tone bursts separated by silences, in
//! which one mid-sequence tone is displaced in time by a known, signed
//! amount. Everything is computed sample-exactly so that the deviation a
//! listener hears is the deviation the log records.
//!
//! # Pipeline
//!
//! - [`ToneSynth`] renders one harmonic complex burst ([`ToneSpec`]).
//! - [`SineRamp`] fades the burst in and out to remove onset clicks.
//! - [`schedule_deviation`] draws which tone is displaced.
//! - [`TimelineComposer`] concatenates bursts and gaps into a [`Waveform`],
//!   lengthening the gap before the displaced tone by the deviation and
//!   shortening the gap after it by the same amount.
//! - [`TrialRenderer`] wires the stages together for one-call rendering.
//! - [`calibrate::calibrate_ceiling`] derives the peak ceiling offline.
//!
//! # Example
//!
//! ```rust
//! use rand::SeedableRng;
//! use rand::rngs::StdRng;
//! use tactus_core::{TimingSpec, ToneSpec, TrialRenderer};
//!
//! let renderer = TrialRenderer::new(48000, 5.0);
//! let tone = ToneSpec {
//!     frequency: 392.0,
//!     num_harmonics: 5,
//!     duration_ms: 50.0,
//!     harmonic_factor: 0.7,
//!     max_amplitude: 1.0,
//! };
//! let timing = TimingSpec { isi_ms: 500.0, no_tones: 7, delta_ms: -20.0 };
//!
//! let mut rng = StdRng::seed_from_u64(1);
//! let trial = renderer.render_trial(&tone, &timing, &mut rng).unwrap();
//! assert_eq!(trial.samples.len(), trial.predicted_samples);
//! ```
//!
//! # Determinism
//!
//! The only source of randomness is the caller-supplied [`rand::Rng`];
//! seeding it fixes the output byte for byte. The crate performs no I/O:
//! playing or persisting the waveform is the caller's job.

pub mod calibrate;
pub mod error;
pub mod ramp;
pub mod timeline;
pub mod tone;
pub mod trial;

pub use calibrate::{Calibration, CalibrationGrid, calibrate_ceiling};
pub use error::{Result, StimulusError};
pub use ramp::SineRamp;
pub use timeline::{TimelineComposer, TimingSpec, Waveform, schedule_deviation};
pub use tone::{ToneSpec, ToneSynth};
pub use trial::TrialRenderer;
