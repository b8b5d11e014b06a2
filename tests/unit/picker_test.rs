//! Weighted picker behaviour with real and scripted drawers.

use rhythm_trainer::exercises::{
    Drawer, ExerciseError, ExerciseId, RecencyBuffer, Weight, WeightedPicker, DEFAULT_BUFFER_SIZE,
    MAX_ATTEMPTS,
};

/// Cycles through the ids uniformly, ignoring weights.
struct RoundRobin {
    next: usize,
}

impl Drawer for RoundRobin {
    fn draw(&mut self, ids: &[ExerciseId], _weights: &[Weight]) -> Result<ExerciseId, ExerciseError> {
        let id = ids[self.next % ids.len()];
        self.next += 1;
        Ok(id)
    }
}

#[test]
fn test_picker_returns_only_unbuffered_id() {
    let ids: Vec<ExerciseId> = (1..=5).collect();
    let weights = vec![1; 5];
    let mut picker = WeightedPicker::new(RoundRobin { next: 0 });

    for _ in 0..10 {
        let mut buffer = RecencyBuffer::with_entries(DEFAULT_BUFFER_SIZE, [1, 2, 4, 5]);
        assert_eq!(picker.pick(&ids, &weights, &mut buffer).unwrap(), 3);
    }
}

#[test]
fn test_picker_exhaustion_keeps_buffer() {
    let ids: Vec<ExerciseId> = (1..=3).collect();
    let weights = vec![1; 3];
    let mut picker = WeightedPicker::new(RoundRobin { next: 0 });
    let mut buffer = RecencyBuffer::with_entries(DEFAULT_BUFFER_SIZE, [1, 2, 3]);

    let err = picker.pick(&ids, &weights, &mut buffer).unwrap_err();

    assert!(matches!(
        err,
        ExerciseError::UniqueSelectionFailed { attempts } if attempts == MAX_ATTEMPTS
    ));
    assert_eq!(buffer.iter().collect::<Vec<_>>(), vec![1, 2, 3]);
}

#[test]
fn test_buffer_is_fifo_over_many_picks() {
    let ids: Vec<ExerciseId> = (1..=20).collect();
    let weights = vec![1; 20];
    let mut picker = WeightedPicker::new(RoundRobin { next: 0 });
    let mut buffer = RecencyBuffer::new(DEFAULT_BUFFER_SIZE);

    for _ in 0..=DEFAULT_BUFFER_SIZE {
        picker.pick(&ids, &weights, &mut buffer).unwrap();
        assert!(buffer.len() <= DEFAULT_BUFFER_SIZE);
    }

    assert!(!buffer.contains(1));
    assert_eq!(buffer.iter().next(), Some(2));
    assert_eq!(buffer.iter().last(), Some(11));
}

#[test]
fn test_seeded_picker_prefers_heavy_exercises() {
    let ids: Vec<ExerciseId> = vec![1, 2, 3];
    let weights = vec![0, 1, 9];
    let mut picker = WeightedPicker::seeded(42);
    let mut counts = [0u32; 3];

    for _ in 0..2000 {
        // Fresh buffer each round so every draw counts
        let mut buffer = RecencyBuffer::new(1);
        let id = picker.pick(&ids, &weights, &mut buffer).unwrap();
        counts[(id - 1) as usize] += 1;
    }

    assert_eq!(counts[0], 0);
    assert!(counts[2] > counts[1] * 4);
}

#[test]
fn test_seeded_picker_is_reproducible() {
    let ids: Vec<ExerciseId> = (1..=30).collect();
    let weights: Vec<Weight> = (1..=30).collect();

    let run = |seed| {
        let mut picker = WeightedPicker::seeded(seed);
        let mut buffer = RecencyBuffer::new(DEFAULT_BUFFER_SIZE);
        (0..15)
            .map(|_| picker.pick(&ids, &weights, &mut buffer).unwrap())
            .collect::<Vec<_>>()
    };

    assert_eq!(run(7), run(7));
}
