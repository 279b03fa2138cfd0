//! Batch parameter files.
//!
//! A stimulus set is described by one TOML file; every field has a
//! default matching the reference experiment, so a partial file only
//! overrides what it names.

use std::fs;
use std::path::Path;

use anyhow::Context;
use serde::{Deserialize, Serialize};

/// Parameters of a full stimulus set.
///
/// # TOML format
///
/// ```toml
/// sample_rate = 48000
/// tone_frequency_hz = 440.0
/// tone_duration_ms = 100.0
/// no_tones = 7
///
/// isi_min_ms = 500
/// isi_max_ms = 800
/// isi_step_ms = 100
///
/// delta_min_ms = -300
/// delta_max_ms = 301
/// delta_step_ms = 10
/// delta_extra_ms = [-15, -5, 5, 15]
/// threshold_ms = 50
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BatchConfig {
    /// Sample rate in Hz.
    pub sample_rate: u32,
    /// Ramp window in milliseconds.
    pub tau_ms: f32,
    /// Tone base frequency in Hz.
    pub tone_frequency_hz: f32,
    /// Number of harmonics per tone.
    pub num_harmonics: u32,
    /// Tone duration in milliseconds.
    pub tone_duration_ms: f32,
    /// Harmonic amplitude decay factor.
    pub harmonic_factor: f32,
    /// Peak ceiling from the calibration sweep.
    pub max_amplitude: f32,
    /// Tones per trial.
    pub no_tones: usize,
    /// Smallest ISI in ms, inclusive.
    pub isi_min_ms: i32,
    /// Largest ISI in ms, exclusive.
    pub isi_max_ms: i32,
    /// ISI grid step in ms.
    pub isi_step_ms: i32,
    /// Smallest deviation in ms, inclusive.
    pub delta_min_ms: i32,
    /// Largest deviation in ms, exclusive.
    pub delta_max_ms: i32,
    /// Deviation grid step in ms.
    pub delta_step_ms: i32,
    /// Extra deviations outside the grid.
    pub delta_extra_ms: Vec<i32>,
    /// Detectability threshold in ms for no-signal balancing.
    pub threshold_ms: i32,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            sample_rate: 48000,
            tau_ms: 5.0,
            tone_frequency_hz: 440.0,
            num_harmonics: 5,
            tone_duration_ms: 100.0,
            harmonic_factor: 0.9,
            // From the reference calibration sweep: peak 0.7745 + 0.1 margin.
            max_amplitude: 1.1435,
            no_tones: 7,
            isi_min_ms: 500,
            isi_max_ms: 800,
            isi_step_ms: 100,
            delta_min_ms: -300,
            delta_max_ms: 301,
            delta_step_ms: 10,
            delta_extra_ms: vec![-15, -5, 5, 15],
            threshold_ms: 50,
        }
    }
}

impl BatchConfig {
    /// Load a config from a TOML file.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("failed to read config '{}'", path.display()))?;
        let config = toml::from_str(&text)
            .with_context(|| format!("failed to parse config '{}'", path.display()))?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toml_round_trip_preserves_the_config() {
        let config = BatchConfig::default();
        let text = toml::to_string(&config).unwrap();
        let back: BatchConfig = toml::from_str(&text).unwrap();
        assert_eq!(back, config);
    }

    #[test]
    fn partial_file_overrides_only_named_fields() {
        let config: BatchConfig =
            toml::from_str("no_tones = 9\nisi_min_ms = 400\n").unwrap();
        assert_eq!(config.no_tones, 9);
        assert_eq!(config.isi_min_ms, 400);
        assert_eq!(config.sample_rate, 48000);
        assert_eq!(config.delta_extra_ms, vec![-15, -5, 5, 15]);
    }

    #[test]
    fn load_reads_a_file_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("batch.toml");
        std::fs::write(&path, "tone_frequency_hz = 392.0\n").unwrap();

        let config = BatchConfig::load(&path).unwrap();
        assert_eq!(config.tone_frequency_hz, 392.0);
    }

    #[test]
    fn missing_file_is_an_error() {
        let err = BatchConfig::load(Path::new("/no/such/config.toml")).unwrap_err();
        assert!(err.to_string().contains("failed to read config"));
    }
}
