//! Practice session module.
//!
//! Ties the exercise store and picker together into the round loop used by
//! both front-ends.

pub mod engine;
pub mod types;

pub use engine::TrainingSession;
pub use types::{Pick, PracticeMode, SavePolicy, SessionError};
