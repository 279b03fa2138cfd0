//! Full stimulus-set rendering command.
//!
//! Renders one WAV per (ISI, deviation) pair: ISIs define the blocks,
//! deviations are shuffled afresh inside each block, and the deviation set
//! is balanced with no-signal fillers before rendering starts.

use std::fs;
use std::path::PathBuf;

use clap::Args;
use indicatif::{ProgressBar, ProgressStyle};
use rand::seq::SliceRandom;
use tactus_core::{TimingSpec, ToneSpec, TrialRenderer};
use tactus_sequence::{DeltaGrid, isi_grid};

use crate::config::BatchConfig;
use crate::wav::{BitDepth, write_wav};

#[derive(Args)]
pub struct BatchArgs {
    /// Output directory for the stimulus set
    #[arg(value_name = "OUT_DIR")]
    out_dir: PathBuf,

    /// TOML parameter file; reference defaults are used when omitted
    #[arg(long)]
    config: Option<PathBuf>,

    /// RNG seed; drawn from entropy when omitted
    #[arg(long)]
    seed: Option<u64>,

    /// Sample encoding of the output files
    #[arg(long, value_enum, default_value = "float32")]
    bit_depth: BitDepth,
}

pub fn run(args: BatchArgs) -> anyhow::Result<()> {
    let config = match &args.config {
        Some(path) => BatchConfig::load(path)?,
        None => BatchConfig::default(),
    };
    tracing::debug!(seed = ?args.seed, config = ?args.config, "batch parameters resolved");
    let mut rng = super::seeded_rng(args.seed);

    let mut isis = isi_grid(config.isi_min_ms, config.isi_max_ms, config.isi_step_ms)?;
    isis.shuffle(&mut rng);

    let grid = DeltaGrid {
        min_ms: config.delta_min_ms,
        max_ms: config.delta_max_ms,
        step_ms: config.delta_step_ms,
        extra_ms: config.delta_extra_ms.clone(),
        threshold_ms: config.threshold_ms,
    };
    let deltas = grid.build(&mut rng)?;

    let renderer = TrialRenderer::new(config.sample_rate, config.tau_ms);
    let tone = ToneSpec {
        frequency: config.tone_frequency_hz,
        num_harmonics: config.num_harmonics,
        duration_ms: config.tone_duration_ms,
        harmonic_factor: config.harmonic_factor,
        max_amplitude: config.max_amplitude,
    };

    fs::create_dir_all(&args.out_dir)?;

    println!(
        "Rendering {} blocks x {} trials to {}",
        isis.len(),
        deltas.len(),
        args.out_dir.display()
    );

    let pb = ProgressBar::new((isis.len() * deltas.len()) as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("[{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({eta})")
            .unwrap()
            .progress_chars("##-"),
    );

    for &isi in &isis {
        let mut block = deltas.clone();
        block.shuffle(&mut rng);

        for delta in block {
            let timing = TimingSpec {
                isi_ms: isi as f32,
                no_tones: config.no_tones,
                delta_ms: delta as f32,
            };
            let trial = renderer.render_trial(&tone, &timing, &mut rng)?;

            let filename = format!("sequence_delta_{delta}_isi_{isi}.wav");
            write_wav(
                &args.out_dir.join(filename),
                &trial.samples,
                config.sample_rate,
                args.bit_depth,
            )?;
            pb.inc(1);
        }
    }

    pb.finish_with_message("done");
    println!("Wrote {} stimulus files", isis.len() * deltas.len());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn batch_writes_one_named_file_per_pair() {
        let dir = tempfile::tempdir().unwrap();
        let config_path = dir.path().join("batch.toml");
        // One 500 ms block, four deviations (already balanced around the
        // 50 ms threshold, so no fillers are drawn).
        std::fs::write(
            &config_path,
            "tone_duration_ms = 50.0\n\
             isi_min_ms = 500\n\
             isi_max_ms = 600\n\
             delta_min_ms = -60\n\
             delta_max_ms = 61\n\
             delta_step_ms = 30\n\
             delta_extra_ms = []\n",
        )
        .unwrap();

        let out_dir = dir.path().join("stimuli");
        run(BatchArgs {
            out_dir: out_dir.clone(),
            config: Some(config_path),
            seed: Some(11),
            bit_depth: BitDepth::Float32,
        })
        .unwrap();

        for name in [
            "sequence_delta_-60_isi_500.wav",
            "sequence_delta_-30_isi_500.wav",
            "sequence_delta_30_isi_500.wav",
            "sequence_delta_60_isi_500.wav",
        ] {
            assert!(out_dir.join(name).is_file(), "missing {name}");
        }
        assert_eq!(std::fs::read_dir(&out_dir).unwrap().count(), 4);
    }
}
