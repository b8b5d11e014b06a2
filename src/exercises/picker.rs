//! Weighted exercise picker with recency avoidance.
//!
//! Exercises are drawn with probability proportional to their weight. Draws
//! that hit one of the recently picked exercises are rejected and redrawn, up
//! to [`MAX_ATTEMPTS`] times.

use std::collections::VecDeque;

use rand::distributions::{Distribution, WeightedError, WeightedIndex};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use super::types::{ExerciseError, ExerciseId, Weight};

/// Default number of recent picks to avoid.
pub const DEFAULT_BUFFER_SIZE: usize = 10;

/// Hard cap on draws for a single pick.
pub const MAX_ATTEMPTS: usize = 100;

/// Recently picked exercises, oldest first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecencyBuffer {
    entries: VecDeque<ExerciseId>,
    capacity: usize,
}

impl Default for RecencyBuffer {
    fn default() -> Self {
        Self::new(DEFAULT_BUFFER_SIZE)
    }
}

impl RecencyBuffer {
    /// Create an empty buffer remembering up to `capacity` picks.
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: VecDeque::with_capacity(capacity + 1),
            capacity,
        }
    }

    /// Create a buffer pre-filled with `entries` (oldest first).
    pub fn with_entries(capacity: usize, entries: impl IntoIterator<Item = ExerciseId>) -> Self {
        let mut buffer = Self::new(capacity);
        buffer.entries.extend(entries);
        buffer
    }

    /// Whether `id` was picked recently.
    pub fn contains(&self, id: ExerciseId) -> bool {
        self.entries.contains(&id)
    }

    /// Record a pick, evicting the oldest entry once over capacity.
    pub fn push(&mut self, id: ExerciseId) {
        self.entries.push_back(id);
        while self.entries.len() > self.capacity {
            self.entries.pop_front();
        }
    }

    /// Forget every recent pick.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Recent picks, oldest first.
    pub fn iter(&self) -> impl Iterator<Item = ExerciseId> + '_ {
        self.entries.iter().copied()
    }
}

/// Source of single weighted draws.
pub trait Drawer {
    /// Draw one id with probability proportional to its weight.
    fn draw(&mut self, ids: &[ExerciseId], weights: &[Weight]) -> Result<ExerciseId, ExerciseError>;
}

/// Drawer backed by a random number generator.
///
/// Uses cumulative weights with binary search; zero-weight ids stay in the
/// universe but are never returned.
#[derive(Debug, Clone)]
pub struct WeightedDrawer<R: Rng> {
    rng: R,
}

impl<R: Rng> WeightedDrawer<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl WeightedDrawer<ChaCha8Rng> {
    /// Drawer seeded from OS entropy.
    pub fn from_entropy() -> Self {
        Self::new(ChaCha8Rng::from_entropy())
    }

    /// Reproducible drawer.
    pub fn seeded(seed: u64) -> Self {
        Self::new(ChaCha8Rng::seed_from_u64(seed))
    }
}

impl<R: Rng> Drawer for WeightedDrawer<R> {
    fn draw(&mut self, ids: &[ExerciseId], weights: &[Weight]) -> Result<ExerciseId, ExerciseError> {
        let index = WeightedIndex::new(weights).map_err(|e| match e {
            WeightedError::NoItem => ExerciseError::EmptyCatalogue,
            WeightedError::AllWeightsZero => ExerciseError::NoDrawableWeight,
            // u32 weights are never negative; only overflow of the total remains
            _ => ExerciseError::NoDrawableWeight,
        })?;
        Ok(ids[index.sample(&mut self.rng)])
    }
}

/// Picks the next exercise to practice.
#[derive(Debug, Clone)]
pub struct WeightedPicker<D: Drawer> {
    drawer: D,
}

impl WeightedPicker<WeightedDrawer<ChaCha8Rng>> {
    /// Picker drawing from an entropy-seeded generator.
    pub fn from_entropy() -> Self {
        Self::new(WeightedDrawer::from_entropy())
    }

    /// Picker with a reproducible sequence of draws.
    pub fn seeded(seed: u64) -> Self {
        Self::new(WeightedDrawer::seeded(seed))
    }
}

impl<D: Drawer> WeightedPicker<D> {
    pub fn new(drawer: D) -> Self {
        Self { drawer }
    }

    /// Pick one exercise not present in `buffer` and record it there.
    ///
    /// Fails with [`ExerciseError::UniqueSelectionFailed`] after
    /// [`MAX_ATTEMPTS`] draws that all hit the buffer. The buffer is left
    /// untouched in that case; clearing it and retrying is up to the caller.
    pub fn pick(
        &mut self,
        ids: &[ExerciseId],
        weights: &[Weight],
        buffer: &mut RecencyBuffer,
    ) -> Result<ExerciseId, ExerciseError> {
        if ids.is_empty() {
            return Err(ExerciseError::EmptyCatalogue);
        }
        if ids.len() != weights.len() {
            return Err(ExerciseError::LengthMismatch {
                ids: ids.len(),
                weights: weights.len(),
            });
        }

        for attempt in 1..=MAX_ATTEMPTS {
            let id = self.drawer.draw(ids, weights)?;
            if !buffer.contains(id) {
                buffer.push(id);
                tracing::debug!("Picked exercise {} after {} draw(s)", id, attempt);
                return Ok(id);
            }
        }

        tracing::error!(
            "Failed to select a unique exercise after {} attempts",
            MAX_ATTEMPTS
        );
        Err(ExerciseError::UniqueSelectionFailed {
            attempts: MAX_ATTEMPTS,
        })
    }
}
