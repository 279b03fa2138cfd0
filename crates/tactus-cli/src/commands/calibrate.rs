//! Amplitude calibration command.
//!
//! Sweeps the tone envelope at unit ceiling and prints the observed peak
//! together with the ceiling that keeps the whole envelope below full
//! scale.

use clap::Args;
use tactus_core::{CalibrationGrid, ToneSynth, calibrate_ceiling};

#[derive(Args)]
pub struct CalibrateArgs {
    /// Sample rate in Hz
    #[arg(long, default_value = "48000")]
    sample_rate: u32,

    /// Lowest base frequency in Hz
    #[arg(long, default_value = "33.0")]
    freq_min: f32,

    /// Highest base frequency in Hz
    #[arg(long, default_value = "500.0")]
    freq_max: f32,

    /// Frequency grid points
    #[arg(long, default_value = "200")]
    freq_steps: usize,

    /// Lowest harmonic decay factor
    #[arg(long, default_value = "0.009")]
    factor_min: f32,

    /// Highest harmonic decay factor
    #[arg(long, default_value = "0.99")]
    factor_max: f32,

    /// Decay-factor grid points
    #[arg(long, default_value = "100")]
    factor_steps: usize,

    /// Number of harmonics
    #[arg(long, default_value = "5")]
    harmonics: u32,

    /// Burst duration in milliseconds (shortest duration in use)
    #[arg(long, default_value = "33.0")]
    tone_duration: f32,

    /// Safety margin added to the observed peak
    #[arg(long, default_value = "0.1")]
    margin: f32,
}

pub fn run(args: CalibrateArgs) -> anyhow::Result<()> {
    let synth = ToneSynth::new(args.sample_rate);
    let grid = CalibrationGrid {
        freq_min_hz: args.freq_min,
        freq_max_hz: args.freq_max,
        freq_steps: args.freq_steps,
        factor_min: args.factor_min,
        factor_max: args.factor_max,
        factor_steps: args.factor_steps,
        num_harmonics: args.harmonics,
        duration_ms: args.tone_duration,
    };

    println!(
        "Sweeping {} x {} grid ({}-{} Hz, factor {}-{})...",
        args.freq_steps, args.factor_steps, args.freq_min, args.freq_max,
        args.factor_min, args.factor_max
    );

    let calibration = calibrate_ceiling(&synth, &grid, args.margin)?;

    println!("Peak at unit ceiling: {:.6}", calibration.peak);
    println!(
        "Recommended max_amplitude: {:.6} (margin {})",
        calibration.max_amplitude, args.margin
    );
    Ok(())
}
