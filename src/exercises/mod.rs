//! Exercise catalogue: persisted weights and weighted selection.

pub mod picker;
pub mod store;
pub mod types;

pub use picker::{
    Drawer, RecencyBuffer, WeightedDrawer, WeightedPicker, DEFAULT_BUFFER_SIZE, MAX_ATTEMPTS,
};
pub use store::ExerciseStore;
pub use types::{ExerciseError, ExerciseId, Feedback, Weight, WorkingSet};

/// Default size of the exercise catalogue.
pub const MAX_EXERCISES: u32 = 90;
