//! Repetition-constrained soundtrack sampling.
//!
//! A soundtrack is one long token stream later sliced into fixed-length
//! blocks. Two adjacent slots never share a token except at the engineered
//! repeat positions, of which there are exactly as many as the repetition
//! budget demands. Repeats never fall on the opening three slots, the
//! closing two, or the seam between two blocks, so every block starts and
//! ends unambiguous.
//!
//! Both sampling phases are rejection loops with a hard attempt bound;
//! exhausting the bound reports the parameters as infeasible rather than
//! spinning forever.

use std::collections::HashSet;

use rand::Rng;
use rand::seq::SliceRandom;
use tracing::{debug, trace};

use crate::budget::repetition_budget;
use crate::error::{Result, SequenceError};

/// Attempt bound for the adjacent-duplicate-free base stream.
const MAX_STREAM_ATTEMPTS: usize = 10_000;
/// Attempt bound for placing the repeat pairs.
const MAX_PLACEMENT_ATTEMPTS: usize = 10_000;
/// Smallest pool for which the base-stream rejection loop converges fast.
const MIN_POOL: usize = 4;
/// Opening slots that must stay unique.
const HEAD_PROTECTED: usize = 3;
/// Closing slots that must stay unique.
const TAIL_PROTECTED: usize = 2;

/// Shape of the requested soundtrack.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SoundtrackSpec {
    /// Tokens per block.
    pub sequence_len: usize,
    /// Number of blocks.
    pub sequence_no: usize,
    /// Probability that a slot repeats its predecessor, in `[0, 1)`.
    pub rep_prob: f64,
}

impl SoundtrackSpec {
    /// Total token count across all blocks.
    pub fn total_tokens(&self) -> usize {
        self.sequence_len * self.sequence_no
    }

    fn validate(&self) -> Result<()> {
        if self.sequence_len == 0 {
            return Err(SequenceError::invalid("sequence_len", "must be at least 1"));
        }
        if self.sequence_no == 0 {
            return Err(SequenceError::invalid("sequence_no", "must be at least 1"));
        }
        Ok(())
    }
}

/// A sampled soundtrack: the full stream plus its repeat plan.
#[derive(Debug, Clone, PartialEq)]
pub struct Soundtrack<T> {
    stream: Vec<T>,
    repeats: Vec<usize>,
    sequence_len: usize,
}

impl<T> Soundtrack<T> {
    /// The full token stream.
    pub fn stream(&self) -> &[T] {
        &self.stream
    }

    /// First index of each engineered repeat pair, ascending.
    pub fn repeats(&self) -> &[usize] {
        &self.repeats
    }

    /// Number of engineered repeats.
    pub fn n_reps(&self) -> usize {
        self.repeats.len()
    }

    /// Tokens per block.
    pub fn sequence_len(&self) -> usize {
        self.sequence_len
    }

    /// Number of blocks.
    pub fn sequence_no(&self) -> usize {
        self.stream.len() / self.sequence_len
    }

    /// Iterate over the blocks as slices of the stream.
    pub fn blocks(&self) -> std::slice::ChunksExact<'_, T> {
        self.stream.chunks_exact(self.sequence_len)
    }
}

impl<T: Clone> Soundtrack<T> {
    /// Split the stream into owned blocks.
    pub fn into_blocks(self) -> Vec<Vec<T>> {
        self.stream
            .chunks_exact(self.sequence_len)
            .map(<[T]>::to_vec)
            .collect()
    }
}

/// Sample a soundtrack over the given token pool.
///
/// The pool must hold at least four pairwise-distinct tokens; the stream
/// cycles through independent shuffles of the whole pool so every token is
/// used fairly. All randomness comes from the caller's RNG: a fixed seed
/// reproduces the soundtrack exactly.
///
/// # Example
///
/// ```rust
/// use rand::SeedableRng;
/// use rand::rngs::StdRng;
/// use tactus_sequence::{SoundtrackSpec, generate_soundtrack};
///
/// let pool: Vec<u32> = (0..10).collect();
/// let spec = SoundtrackSpec { sequence_len: 20, sequence_no: 5, rep_prob: 0.05 };
/// let mut rng = StdRng::seed_from_u64(7);
///
/// let track = generate_soundtrack(&pool, &spec, &mut rng).unwrap();
/// assert_eq!(track.blocks().count(), 5);
/// assert_eq!(track.n_reps(), 5);
/// ```
pub fn generate_soundtrack<T, R>(
    pool: &[T],
    spec: &SoundtrackSpec,
    rng: &mut R,
) -> Result<Soundtrack<T>>
where
    T: Clone + PartialEq,
    R: Rng + ?Sized,
{
    spec.validate()?;
    validate_pool(pool)?;

    let total = spec.total_tokens();
    let n_reps = repetition_budget(spec.rep_prob, total, rng)?;

    let mut stream = base_stream(pool, total, rng)?;
    let protected = protected_indices(spec.sequence_len, spec.sequence_no);
    let repeats = place_repeats(&mut stream, n_reps, &protected, rng)?;

    verify_stream(&stream, &repeats, n_reps)?;
    debug!(total, n_reps, "soundtrack sampled");

    Ok(Soundtrack {
        stream,
        repeats,
        sequence_len: spec.sequence_len,
    })
}

fn validate_pool<T: PartialEq>(pool: &[T]) -> Result<()> {
    if pool.len() < MIN_POOL {
        return Err(SequenceError::invalid(
            "pool",
            format!("{} tokens given, need at least {MIN_POOL}", pool.len()),
        ));
    }
    for (i, a) in pool.iter().enumerate() {
        if pool[i + 1..].contains(a) {
            return Err(SequenceError::invalid("pool", "tokens must be distinct"));
        }
    }
    Ok(())
}

/// Phase 1: a stream with no adjacent duplicates at all.
///
/// Candidates are built by concatenating independent shuffles of the pool
/// and truncating; duplicates can only arise at shuffle seams, so for
/// pools of four or more the loop converges in a handful of attempts.
fn base_stream<T, R>(pool: &[T], total: usize, rng: &mut R) -> Result<Vec<T>>
where
    T: Clone + PartialEq,
    R: Rng + ?Sized,
{
    let rounds = total.div_ceil(pool.len());
    let mut order: Vec<usize> = (0..pool.len()).collect();

    for attempt in 1..=MAX_STREAM_ATTEMPTS {
        let mut stream = Vec::with_capacity(rounds * pool.len());
        for _ in 0..rounds {
            order.shuffle(rng);
            stream.extend(order.iter().map(|&u| pool[u].clone()));
        }
        stream.truncate(total);

        if stream.windows(2).all(|w| w[0] != w[1]) {
            trace!(attempt, "base stream accepted");
            return Ok(stream);
        }
    }
    Err(SequenceError::SamplingExhausted {
        stage: "base stream",
        attempts: MAX_STREAM_ATTEMPTS,
    })
}

/// Indices that must never belong to a repeat pair: the protected head and
/// tail of the experiment plus both sides of every block seam.
fn protected_indices(sequence_len: usize, sequence_no: usize) -> HashSet<usize> {
    let total = sequence_len * sequence_no;
    let mut protected: HashSet<usize> = (0..HEAD_PROTECTED).collect();
    protected.extend(total - TAIL_PROTECTED..total);
    for k in 1..sequence_no {
        protected.insert(k * sequence_len - 1);
        protected.insert(k * sequence_len);
    }
    protected
}

/// Phase 2: choose `n_reps` pair positions and overwrite each pair with a
/// single token.
///
/// A candidate plan is rejected when chosen first-indices sit closer than
/// three slots apart (pairs may neither share nor touch an index) or when
/// a pair touches the protected set. The overwrite value is drawn from the
/// pair's two original tokens, restricted to those that do not collide
/// with the untouched neighbours on either side; a pair with no safe value
/// rejects the whole plan. This keeps the final repeat count exact.
fn place_repeats<T, R>(
    stream: &mut Vec<T>,
    n_reps: usize,
    protected: &HashSet<usize>,
    rng: &mut R,
) -> Result<Vec<usize>>
where
    T: Clone + PartialEq,
    R: Rng + ?Sized,
{
    if n_reps == 0 {
        return Ok(Vec::new());
    }

    let total = stream.len();
    // Candidate first-indices: [3, total - 2), as the pair's second slot
    // must stay clear of the protected tail.
    let candidates: Vec<usize> = (HEAD_PROTECTED..total - TAIL_PROTECTED).collect();
    if candidates.len() < n_reps {
        // The budget caps n_reps at total - 5 == candidates.len().
        return Err(SequenceError::Consistency(format!(
            "{n_reps} repeats requested but only {} candidate positions",
            candidates.len()
        )));
    }

    'attempt: for attempt in 1..=MAX_PLACEMENT_ATTEMPTS {
        let mut shuffled = candidates.clone();
        shuffled.shuffle(rng);
        let mut chosen = shuffled[..n_reps].to_vec();
        chosen.sort_unstable();

        if chosen.windows(2).any(|w| w[1] - w[0] < 3) {
            continue;
        }
        if chosen
            .iter()
            .any(|&i| protected.contains(&i) || protected.contains(&(i + 1)))
        {
            continue;
        }

        let mut scratch = stream.clone();
        for &i in &chosen {
            let left = &stream[i - 1];
            let right = &stream[i + 2];
            let first_ok = stream[i] != *left && stream[i] != *right;
            let second_ok = stream[i + 1] != *left && stream[i + 1] != *right;

            let value = match (first_ok, second_ok) {
                (true, true) => {
                    if rng.gen_bool(0.5) {
                        stream[i].clone()
                    } else {
                        stream[i + 1].clone()
                    }
                }
                (true, false) => stream[i].clone(),
                (false, true) => stream[i + 1].clone(),
                // Both tokens collide with a neighbour; this plan cannot
                // keep the repeat count exact.
                (false, false) => continue 'attempt,
            };
            scratch[i] = value.clone();
            scratch[i + 1] = value;
        }

        *stream = scratch;
        trace!(attempt, n_reps, "repeat plan accepted");
        return Ok(chosen);
    }

    Err(SequenceError::SamplingExhausted {
        stage: "repeat placement",
        attempts: MAX_PLACEMENT_ATTEMPTS,
    })
}

/// Post-conditions the construction guarantees: the adjacent-equal pairs in
/// the final stream are exactly the planned ones.
fn verify_stream<T: PartialEq>(stream: &[T], repeats: &[usize], n_reps: usize) -> Result<()> {
    if repeats.len() != n_reps {
        return Err(SequenceError::Consistency(format!(
            "planned {} repeats, requested {n_reps}",
            repeats.len()
        )));
    }
    let found: Vec<usize> = stream
        .windows(2)
        .enumerate()
        .filter(|(_, w)| w[0] == w[1])
        .map(|(i, _)| i)
        .collect();
    if found != repeats {
        return Err(SequenceError::Consistency(format!(
            "stream has repeats at {found:?}, planned {repeats:?}"
        )));
    }
    Ok(())
}
