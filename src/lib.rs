//! Rhythm Trainer - weighted practice drill scheduler
//!
//! Keeps a weight per exercise, picks the next exercise to practice with a
//! weighted draw that avoids recent repeats, and adjusts the weight from the
//! player's feedback. Weights persist in a two-column CSV table.

pub mod audio;
pub mod exercises;
pub mod i18n;
pub mod input;
pub mod logging;
pub mod session;
pub mod storage;
pub mod ui;

// Re-export commonly used types
pub use exercises::{ExerciseError, ExerciseStore, Feedback, RecencyBuffer, WeightedPicker, WorkingSet};
pub use session::{PracticeMode, SessionError, TrainingSession};
pub use storage::config::AppConfig;
