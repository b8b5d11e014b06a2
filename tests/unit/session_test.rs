//! Practice session rounds against a real exercise table.

use rhythm_trainer::exercises::{ExerciseStore, Feedback, WeightedPicker};
use rhythm_trainer::session::{PracticeMode, SessionError, TrainingSession};
use rhythm_trainer::storage::config::AppConfig;
use tempfile::TempDir;

fn config(dir: &TempDir, first: u32, last: u32) -> AppConfig {
    let mut config = AppConfig::with_csv_path(dir.path().join("exercises.csv"));
    config.first_exercise = first;
    config.last_exercise = last;
    config
}

#[test]
fn test_first_session_writes_full_catalogue() {
    let dir = TempDir::new().unwrap();
    let cfg = config(&dir, 11, 20);
    let mut session = TrainingSession::with_picker(&cfg, WeightedPicker::seeded(1)).unwrap();

    let exercise = session.next_random().unwrap();
    assert!((11..=20).contains(&exercise));
    assert_eq!(session.record(Feedback::Bad).unwrap(), 2);

    let content = std::fs::read_to_string(&cfg.csv_path).unwrap();
    assert_eq!(content.lines().count(), 1 + 90);

    let reloaded = ExerciseStore::new(&cfg.csv_path).load_or_default(1, 90).unwrap();
    for (id, weight) in reloaded.ids.iter().zip(&reloaded.weights) {
        let expected = if *id == exercise { 2 } else { 1 };
        assert_eq!(*weight, expected, "exercise {}", id);
    }
}

#[test]
fn test_weights_carry_over_between_sessions() {
    let dir = TempDir::new().unwrap();
    let cfg = config(&dir, 1, 5);

    let mut session = TrainingSession::start(&cfg).unwrap();
    session.select_manual(4).unwrap();
    session.record(Feedback::Bad).unwrap();
    session.select_manual(4).unwrap();
    session.record(Feedback::Bad).unwrap();
    session.finish().unwrap();

    let mut session = TrainingSession::start(&cfg).unwrap();
    assert_eq!(session.weight_of(4), Some(3));
    session.select_manual(4).unwrap();
    assert_eq!(session.record(Feedback::Good).unwrap(), 2);
}

#[test]
fn test_manual_mode_from_config() {
    let dir = TempDir::new().unwrap();
    let mut cfg = config(&dir, 1, 10);
    cfg.random_mode = false;

    let mut session = TrainingSession::start(&cfg).unwrap();

    assert_eq!(session.mode(), PracticeMode::Manual);
    assert!(matches!(
        session.select_manual(11),
        Err(SessionError::OutOfRange { exercise: 11, .. })
    ));
}

#[test]
fn test_small_range_keeps_rotating() {
    let dir = TempDir::new().unwrap();
    let cfg = config(&dir, 1, 3);
    let mut session = TrainingSession::with_picker(&cfg, WeightedPicker::seeded(5)).unwrap();
    let mut resets = 0;

    for _ in 0..12 {
        let pick = session.next_random_with_reset().unwrap();
        if pick.buffer_reset {
            resets += 1;
        }
        session.record(Feedback::Good).unwrap();
    }

    assert!(resets > 0);
    assert!(session.recent().len() <= 3);
}

#[test]
fn test_short_table_recovers_after_lowering_range() {
    let dir = TempDir::new().unwrap();
    let mut cfg = config(&dir, 1, 5);
    cfg.total_exercises = 5;
    TrainingSession::start(&cfg).unwrap().finish().unwrap();

    cfg.total_exercises = 10;
    cfg.last_exercise = 8;
    let err = match TrainingSession::start(&cfg) {
        Err(e) => e,
        Ok(_) => panic!("short table accepted"),
    };
    assert!(err.to_string().contains("set the last exercise to 5"));

    cfg.last_exercise = 5;
    let mut session = TrainingSession::start(&cfg).unwrap();
    session.select_manual(3).unwrap();
    session.record(Feedback::Bad).unwrap();

    cfg.last_exercise = 8;
    let session = TrainingSession::start(&cfg).unwrap();
    assert_eq!(session.weight_of(3), Some(2));
    assert_eq!(session.weight_of(8), Some(1));
}
