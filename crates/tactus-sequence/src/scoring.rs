//! Repetition-detection scoring.
//!
//! During presentation the subject presses a key whenever the current
//! sound repeats the previous one. Classifying that response needs the
//! play history, which used to live in ambient global state in earlier
//! tooling; here it is an explicit context object the caller owns and
//! passes into each observation.

/// Outcome category of one (sound, response) observation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseClass {
    /// The sound repeated and the subject responded.
    Hit,
    /// The sound repeated and the subject stayed silent.
    Miss,
    /// The sound was novel and the subject stayed silent.
    CorrectRejection,
    /// The sound was novel but the subject responded.
    FalseAlarm,
}

/// Running tally of response categories.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PerfTally {
    /// Responses to actual repeats.
    pub hits: u32,
    /// Missed repeats.
    pub misses: u32,
    /// Correctly ignored novel sounds.
    pub correct_rejections: u32,
    /// Responses to novel sounds.
    pub false_alarms: u32,
}

impl PerfTally {
    /// Total number of scored observations.
    pub fn total(&self) -> u32 {
        self.hits + self.misses + self.correct_rejections + self.false_alarms
    }
}

/// Caller-owned detection context: the play history of the current block
/// and the tally across the whole run.
#[derive(Debug, Clone)]
pub struct DetectionContext<T> {
    history: Vec<T>,
    tally: PerfTally,
}

impl<T> Default for DetectionContext<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> DetectionContext<T> {
    /// Create an empty context.
    pub fn new() -> Self {
        Self {
            history: Vec::new(),
            tally: PerfTally::default(),
        }
    }

    /// Sounds played so far in the current block, oldest first.
    pub fn history(&self) -> &[T] {
        &self.history
    }

    /// Tally across all recorded observations.
    pub fn tally(&self) -> PerfTally {
        self.tally
    }

    /// Clear the play history at a block boundary. The tally carries over:
    /// the first sound of a block is never a repeat, so seam responses are
    /// scored against a novel sound.
    pub fn start_block(&mut self) {
        self.history.clear();
    }
}

impl<T: PartialEq> DetectionContext<T> {
    /// Score one observation and append the sound to the history.
    ///
    /// A repeat is the current sound equalling the immediately previous
    /// one; the very first sound of a block is always novel.
    pub fn record(&mut self, sound: T, responded: bool) -> ResponseClass {
        let repeat = self.history.last().is_some_and(|prev| *prev == sound);
        let class = match (repeat, responded) {
            (true, true) => ResponseClass::Hit,
            (true, false) => ResponseClass::Miss,
            (false, false) => ResponseClass::CorrectRejection,
            (false, true) => ResponseClass::FalseAlarm,
        };
        match class {
            ResponseClass::Hit => self.tally.hits += 1,
            ResponseClass::Miss => self.tally.misses += 1,
            ResponseClass::CorrectRejection => self.tally.correct_rejections += 1,
            ResponseClass::FalseAlarm => self.tally.false_alarms += 1,
        }
        self.history.push(sound);
        class
    }
}

/// Predicted duration of one block in milliseconds, for comparison against
/// the presentation clock.
pub fn predicted_block_duration_ms(sequence_len: usize, sound_duration_ms: f32) -> f32 {
    sequence_len as f32 * sound_duration_ms
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classification_covers_the_full_table() {
        let mut ctx = DetectionContext::new();
        assert_eq!(ctx.record("a", false), ResponseClass::CorrectRejection);
        assert_eq!(ctx.record("a", true), ResponseClass::Hit);
        assert_eq!(ctx.record("a", false), ResponseClass::Miss);
        assert_eq!(ctx.record("b", true), ResponseClass::FalseAlarm);

        let tally = ctx.tally();
        assert_eq!(tally.hits, 1);
        assert_eq!(tally.misses, 1);
        assert_eq!(tally.correct_rejections, 1);
        assert_eq!(tally.false_alarms, 1);
        assert_eq!(tally.total(), 4);
    }

    #[test]
    fn first_sound_is_never_a_repeat() {
        let mut ctx = DetectionContext::new();
        assert_eq!(ctx.record(7u32, true), ResponseClass::FalseAlarm);
    }

    #[test]
    fn block_boundary_resets_history_but_keeps_tally() {
        let mut ctx = DetectionContext::new();
        ctx.record(1u32, false);
        ctx.record(1u32, true);
        assert_eq!(ctx.tally().hits, 1);

        ctx.start_block();
        assert!(ctx.history().is_empty());
        // Same token as the last one before the seam, but a new block.
        assert_eq!(ctx.record(1u32, false), ResponseClass::CorrectRejection);
        assert_eq!(ctx.tally().hits, 1);
    }

    #[test]
    fn history_tracks_play_order() {
        let mut ctx = DetectionContext::new();
        for sound in [3u32, 1, 4, 1] {
            ctx.record(sound, false);
        }
        assert_eq!(ctx.history(), &[3, 1, 4, 1]);
    }

    #[test]
    fn predicted_duration_is_len_times_sound() {
        assert_eq!(predicted_block_duration_ms(30, 1000.0), 30_000.0);
    }
}
