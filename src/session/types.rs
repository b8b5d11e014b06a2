//! Session types and enums.

use thiserror::Error;

use crate::exercises::{ExerciseError, ExerciseId};

/// How the next exercise is chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PracticeMode {
    /// Weighted random pick
    #[default]
    Random,
    /// Player enters the exercise number
    Manual,
}

impl std::fmt::Display for PracticeMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PracticeMode::Random => write!(f, "Random"),
            PracticeMode::Manual => write!(f, "Manual"),
        }
    }
}

/// When weights are written back to the exercise table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SavePolicy {
    /// After every answer
    #[default]
    EveryRound,
    /// Only when the session ends
    OnQuit,
}

impl SavePolicy {
    pub fn from_flag(save_every_round: bool) -> Self {
        if save_every_round {
            SavePolicy::EveryRound
        } else {
            SavePolicy::OnQuit
        }
    }
}

/// A random pick made by the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pick {
    /// Selected exercise
    pub exercise: ExerciseId,
    /// The recency buffer had to be cleared to find it
    pub buffer_reset: bool,
}

/// Session errors.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error(transparent)]
    Exercise(#[from] ExerciseError),

    #[error("Exercise {exercise} is outside the active range {first}-{last}")]
    OutOfRange {
        exercise: ExerciseId,
        first: ExerciseId,
        last: ExerciseId,
    },

    #[error("No exercise is currently selected")]
    NoCurrentExercise,
}
