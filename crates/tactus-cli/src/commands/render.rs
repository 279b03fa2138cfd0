//! Single-trial rendering command.

use std::path::PathBuf;

use clap::Args;
use tactus_core::{TimingSpec, ToneSpec, TrialRenderer};

use crate::wav::{BitDepth, write_wav};

#[derive(Args)]
pub struct RenderArgs {
    /// Output WAV file
    #[arg(value_name = "OUTPUT")]
    output: PathBuf,

    /// Sample rate in Hz
    #[arg(long, default_value = "48000")]
    sample_rate: u32,

    /// Ramp window in milliseconds
    #[arg(long, default_value = "5.0")]
    tau: f32,

    /// Tone base frequency in Hz
    #[arg(long, default_value = "440.0")]
    freq: f32,

    /// Number of harmonics
    #[arg(long, default_value = "5")]
    harmonics: u32,

    /// Tone duration in milliseconds
    #[arg(long, default_value = "50.0")]
    tone_duration: f32,

    /// Harmonic amplitude decay factor
    #[arg(long, default_value = "0.7")]
    harmonic_factor: f32,

    /// Peak ceiling from the calibration sweep
    #[arg(long, default_value = "1.1435")]
    amplitude: f32,

    /// Inter-stimulus interval in milliseconds
    #[arg(long, default_value = "600.0")]
    isi: f32,

    /// Number of tones in the trial
    #[arg(long, default_value = "7")]
    no_tones: usize,

    /// Signed timing deviation in milliseconds (negative = early)
    #[arg(long, default_value = "50.0", allow_hyphen_values = true)]
    delta: f32,

    /// RNG seed; drawn from entropy when omitted
    #[arg(long)]
    seed: Option<u64>,

    /// Sample encoding of the output file
    #[arg(long, value_enum, default_value = "float32")]
    bit_depth: BitDepth,
}

pub fn run(args: RenderArgs) -> anyhow::Result<()> {
    let mut rng = super::seeded_rng(args.seed);
    let renderer = TrialRenderer::new(args.sample_rate, args.tau);

    let tone = ToneSpec {
        frequency: args.freq,
        num_harmonics: args.harmonics,
        duration_ms: args.tone_duration,
        harmonic_factor: args.harmonic_factor,
        max_amplitude: args.amplitude,
    };
    let timing = TimingSpec {
        isi_ms: args.isi,
        no_tones: args.no_tones,
        delta_ms: args.delta,
    };

    let trial = renderer.render_trial(&tone, &timing, &mut rng)?;
    write_wav(&args.output, &trial.samples, args.sample_rate, args.bit_depth)?;

    println!(
        "delta: {} ms, isi: {} ms, displaced tone: {}",
        args.delta, args.isi, trial.displaced_tone
    );
    println!(
        "Wrote {} samples to {}",
        trial.samples.len(),
        args.output.display()
    );
    Ok(())
}
