//! Exercise working set, feedback and error types.

use std::path::PathBuf;

/// Exercise identifier (1-based, dense).
pub type ExerciseId = u32;

/// Relative draw weight of an exercise.
pub type Weight = u32;

/// Outcome reported by the player after an attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Feedback {
    /// Played well: the exercise becomes less likely.
    Good,
    /// Played poorly: the exercise becomes more likely.
    Bad,
}

impl Feedback {
    /// Apply this feedback to a weight.
    ///
    /// Good lowers the weight by one but never below 1, Bad raises it by one.
    pub fn adjust(self, weight: Weight) -> Weight {
        match self {
            Feedback::Good => {
                if weight > 1 {
                    weight - 1
                } else {
                    weight
                }
            }
            Feedback::Bad => weight.saturating_add(1),
        }
    }
}

/// In-memory exercise table for one session: parallel id and weight columns.
///
/// Ids are ascending and contiguous, so position lookup is an offset from the
/// first id.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WorkingSet {
    /// Exercise ids, ascending
    pub ids: Vec<ExerciseId>,
    /// Weight for the id at the same position
    pub weights: Vec<Weight>,
}

impl WorkingSet {
    /// Build a working set from parallel columns.
    pub fn new(ids: Vec<ExerciseId>, weights: Vec<Weight>) -> Result<Self, ExerciseError> {
        if ids.len() != weights.len() {
            return Err(ExerciseError::LengthMismatch {
                ids: ids.len(),
                weights: weights.len(),
            });
        }
        Ok(Self { ids, weights })
    }

    /// Number of exercises in the set.
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    /// Whether the set holds no exercise.
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Position of an exercise in the columns.
    pub fn index_of(&self, id: ExerciseId) -> Option<usize> {
        let first = *self.ids.first()?;
        let index = id.checked_sub(first)? as usize;
        (self.ids.get(index) == Some(&id)).then_some(index)
    }

    /// Current weight of an exercise.
    pub fn weight_of(&self, id: ExerciseId) -> Option<Weight> {
        self.index_of(id).map(|i| self.weights[i])
    }

    /// Apply feedback to an exercise and return its new weight.
    pub fn apply_feedback(&mut self, id: ExerciseId, feedback: Feedback) -> Option<Weight> {
        let index = self.index_of(id)?;
        let updated = feedback.adjust(self.weights[index]);
        self.weights[index] = updated;
        Some(updated)
    }
}

/// Errors raised by the exercise store and picker.
#[derive(Debug, thiserror::Error)]
pub enum ExerciseError {
    #[error("IO error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Malformed row {row}: {reason}")]
    MalformedRow { row: usize, reason: String },

    #[error(
        "Exercise table holds {found} exercises but the range ends at {expected}; \
         set the last exercise to {found} or lower"
    )]
    TruncatedStorage { expected: u32, found: u32 },

    #[error("The exercise list is empty")]
    EmptyCatalogue,

    #[error("Got {ids} exercise ids but {weights} weights")]
    LengthMismatch { ids: usize, weights: usize },

    #[error("Every exercise has weight zero")]
    NoDrawableWeight,

    #[error("Failed to select a unique exercise after {attempts} attempts")]
    UniqueSelectionFailed { attempts: usize },
}

impl ExerciseError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ExerciseError::Io {
            path: path.into(),
            source,
        }
    }
}
