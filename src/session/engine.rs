//! Practice session engine.
//!
//! Drives the load, pick, feedback and save loop over one active range of
//! the exercise table. Front-ends own the session and call into it once per
//! round.

use rand_chacha::ChaCha8Rng;

use crate::exercises::{
    Drawer, ExerciseError, ExerciseId, ExerciseStore, Feedback, RecencyBuffer, Weight,
    WeightedDrawer, WeightedPicker, WorkingSet, DEFAULT_BUFFER_SIZE,
};
use crate::session::types::{Pick, PracticeMode, SavePolicy, SessionError};
use crate::storage::config::AppConfig;

/// One practice session.
///
/// Owns the working copy of the active range and the recency buffer; the
/// exercise table on disk is only touched through [`ExerciseStore`].
pub struct TrainingSession<D: Drawer = WeightedDrawer<ChaCha8Rng>> {
    store: ExerciseStore,
    first: ExerciseId,
    last: ExerciseId,
    total_exercises: u32,
    working: WorkingSet,
    buffer: RecencyBuffer,
    picker: WeightedPicker<D>,
    current: Option<ExerciseId>,
    mode: PracticeMode,
    save_policy: SavePolicy,
}

impl TrainingSession {
    /// Start a session with an entropy-seeded picker.
    pub fn start(config: &AppConfig) -> Result<Self, SessionError> {
        Self::with_picker(config, WeightedPicker::from_entropy())
    }
}

impl<D: Drawer> TrainingSession<D> {
    /// Start a session drawing with `picker`.
    pub fn with_picker(config: &AppConfig, picker: WeightedPicker<D>) -> Result<Self, SessionError> {
        let store = ExerciseStore::new(&config.csv_path);
        let working = store.load_or_default(config.first_exercise, config.last_exercise)?;

        let mode = if config.random_mode {
            PracticeMode::Random
        } else {
            PracticeMode::Manual
        };

        tracing::info!(
            "Session started: exercises {}-{}, {} mode",
            config.first_exercise,
            config.last_exercise,
            mode
        );

        Ok(Self {
            store,
            first: config.first_exercise,
            last: config.last_exercise,
            total_exercises: config.total_exercises,
            working,
            buffer: RecencyBuffer::new(DEFAULT_BUFFER_SIZE),
            picker,
            current: None,
            mode,
            save_policy: SavePolicy::from_flag(config.save_every_round),
        })
    }

    /// Pick the next exercise at random.
    pub fn next_random(&mut self) -> Result<ExerciseId, SessionError> {
        let exercise =
            self.picker
                .pick(&self.working.ids, &self.working.weights, &mut self.buffer)?;
        self.current = Some(exercise);
        Ok(exercise)
    }

    /// Pick the next exercise at random, clearing the recency buffer and
    /// retrying once when every drawable exercise was picked recently.
    pub fn next_random_with_reset(&mut self) -> Result<Pick, SessionError> {
        match self.next_random() {
            Ok(exercise) => Ok(Pick {
                exercise,
                buffer_reset: false,
            }),
            Err(SessionError::Exercise(ExerciseError::UniqueSelectionFailed { .. })) => {
                tracing::warn!("Recent exercises exhausted the active range; clearing history");
                self.buffer.clear();
                let exercise = self.next_random()?;
                Ok(Pick {
                    exercise,
                    buffer_reset: true,
                })
            }
            Err(e) => Err(e),
        }
    }

    /// Select an exercise by number.
    pub fn select_manual(&mut self, exercise: ExerciseId) -> Result<(), SessionError> {
        if !self.in_range(exercise) || self.working.index_of(exercise).is_none() {
            return Err(SessionError::OutOfRange {
                exercise,
                first: self.first,
                last: self.last,
            });
        }
        self.current = Some(exercise);
        Ok(())
    }

    /// Forget the current exercise without recording feedback.
    pub fn clear_current(&mut self) {
        self.current = None;
    }

    /// Record feedback for the current exercise and return its new weight.
    pub fn record(&mut self, feedback: Feedback) -> Result<Weight, SessionError> {
        let exercise = self.current.ok_or(SessionError::NoCurrentExercise)?;
        let out_of_range = SessionError::OutOfRange {
            exercise,
            first: self.first,
            last: self.last,
        };
        let previous = self.working.weight_of(exercise).ok_or(out_of_range)?;
        let weight = self
            .working
            .apply_feedback(exercise, feedback)
            .unwrap_or(previous);

        tracing::info!(
            "{:?} feedback on exercise {}; weight now {}",
            feedback,
            exercise,
            weight
        );

        if self.save_policy == SavePolicy::EveryRound {
            if let Err(e) = self.save() {
                // Undo so a retried answer counts once
                if let Some(index) = self.working.index_of(exercise) {
                    self.working.weights[index] = previous;
                }
                tracing::warn!("Feedback on exercise {} rolled back: {}", exercise, e);
                return Err(e);
            }
        }
        self.current = None;
        Ok(weight)
    }

    /// Write the working weights back to the exercise table.
    pub fn save(&self) -> Result<(), SessionError> {
        self.store.save(&self.working, self.total_exercises)?;
        Ok(())
    }

    /// End the session, always saving.
    pub fn finish(self) -> Result<(), SessionError> {
        self.save()?;
        tracing::info!("Session finished");
        Ok(())
    }

    /// Whether `exercise` lies in the configured active range.
    pub fn in_range(&self, exercise: ExerciseId) -> bool {
        (self.first..=self.last).contains(&exercise)
    }

    pub fn current(&self) -> Option<ExerciseId> {
        self.current
    }

    pub fn weight_of(&self, exercise: ExerciseId) -> Option<Weight> {
        self.working.weight_of(exercise)
    }

    pub fn working_set(&self) -> &WorkingSet {
        &self.working
    }

    pub fn recent(&self) -> &RecencyBuffer {
        &self.buffer
    }

    pub fn range(&self) -> (ExerciseId, ExerciseId) {
        (self.first, self.last)
    }

    pub fn mode(&self) -> PracticeMode {
        self.mode
    }

    /// Switch mode; the current exercise is dropped.
    pub fn set_mode(&mut self, mode: PracticeMode) {
        if self.mode != mode {
            tracing::debug!("Practice mode changed to {}", mode);
            self.mode = mode;
            self.current = None;
        }
    }

    pub fn save_policy(&self) -> SavePolicy {
        self.save_policy
    }

    pub fn store(&self) -> &ExerciseStore {
        &self.store
    }
}
