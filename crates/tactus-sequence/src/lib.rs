//! Tactus Sequence - repetition-constrained sound sequence sampling.
//!
//! This crate builds the identity half of a repetition-detection
//! experiment: which sound plays in which slot. A soundtrack is a long
//! stream of tokens drawn fairly from a pool, with exactly the budgeted
//! number of adjacent repeats engineered in, none of them at the stream's
//! head, tail, or block seams. The stream is then sliced into fixed-length
//! blocks for presentation.
//!
//! # Components
//!
//! - [`repetition_budget`] - stochastic rounding of the expected repeat
//!   count, so repeated runs are unbiased.
//! - [`generate_soundtrack`] - bounded rejection sampling of the
//!   constrained stream; [`Soundtrack`] slices it into blocks.
//! - [`DetectionContext`] - caller-owned scoring context classifying
//!   responses into hits, misses, correct rejections, and false alarms.
//! - [`plan`] - ISI and deviation grids for a full stimulus set.
//!
//! # Example
//!
//! ```rust
//! use rand::SeedableRng;
//! use rand::rngs::StdRng;
//! use tactus_sequence::{SoundtrackSpec, generate_soundtrack};
//!
//! let pool: Vec<u32> = (0..84).collect();
//! let spec = SoundtrackSpec { sequence_len: 30, sequence_no: 5, rep_prob: 0.05 };
//! let mut rng = StdRng::seed_from_u64(1);
//!
//! let track = generate_soundtrack(&pool, &spec, &mut rng).unwrap();
//! assert_eq!(track.blocks().count(), 5);
//! for block in track.blocks() {
//!     assert_eq!(block.len(), 30);
//! }
//! ```
//!
//! # Determinism
//!
//! All randomness flows through the caller's [`rand::Rng`]. Rejection
//! loops consume a variable number of draws, so never share one RNG
//! across concurrent generation calls; seed one stream per run instead.

pub mod budget;
pub mod error;
pub mod plan;
pub mod scoring;
pub mod soundtrack;

pub use budget::{MIN_UNIQUE_SLOTS, repetition_budget};
pub use error::{Result, SequenceError};
pub use plan::{DeltaGrid, isi_grid};
pub use scoring::{DetectionContext, PerfTally, ResponseClass, predicted_block_duration_ms};
pub use soundtrack::{Soundtrack, SoundtrackSpec, generate_soundtrack};
