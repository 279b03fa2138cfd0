//! Soundtrack sampling command.
//!
//! Samples a repetition-constrained soundtrack over integer strata and
//! emits it as JSON for the presentation script to pair with its sound
//! files.

use std::fs;
use std::path::PathBuf;

use clap::Args;
use serde::Serialize;
use tactus_sequence::{SoundtrackSpec, generate_soundtrack};

#[derive(Args)]
pub struct SoundtrackArgs {
    /// Output JSON file; stdout when omitted
    #[arg(long, short)]
    output: Option<PathBuf>,

    /// Number of distinct sound strata
    #[arg(long, default_value = "84")]
    strata: usize,

    /// Sounds per sequence
    #[arg(long, default_value = "30")]
    sequence_len: usize,

    /// Number of sequences
    #[arg(long, default_value = "5")]
    sequences: usize,

    /// Probability that a sound repeats its predecessor
    #[arg(long, default_value = "0.05")]
    rep_prob: f64,

    /// RNG seed; drawn from entropy when omitted
    #[arg(long)]
    seed: Option<u64>,
}

#[derive(Serialize)]
struct SoundtrackOutput {
    strata: usize,
    sequence_len: usize,
    sequence_no: usize,
    n_reps: usize,
    repeat_positions: Vec<usize>,
    sequences: Vec<Vec<usize>>,
}

pub fn run(args: SoundtrackArgs) -> anyhow::Result<()> {
    let mut rng = super::seeded_rng(args.seed);
    let pool: Vec<usize> = (0..args.strata).collect();
    let spec = SoundtrackSpec {
        sequence_len: args.sequence_len,
        sequence_no: args.sequences,
        rep_prob: args.rep_prob,
    };

    let track = generate_soundtrack(&pool, &spec, &mut rng)?;
    let output = SoundtrackOutput {
        strata: args.strata,
        sequence_len: args.sequence_len,
        sequence_no: args.sequences,
        n_reps: track.n_reps(),
        repeat_positions: track.repeats().to_vec(),
        sequences: track.into_blocks(),
    };

    let json = serde_json::to_string_pretty(&output)?;
    match &args.output {
        Some(path) => {
            fs::write(path, json)?;
            println!(
                "Wrote {} sequences ({} repeats) to {}",
                output.sequence_no,
                output.n_reps,
                path.display()
            );
        }
        None => println!("{json}"),
    }
    Ok(())
}
