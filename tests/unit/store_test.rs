//! Exercise table load/save behaviour through the public API.

use std::fs;

use rhythm_trainer::exercises::{ExerciseError, ExerciseStore};
use tempfile::TempDir;

fn table_with_weight_equal_to_id(store: &ExerciseStore, total: u32) {
    let ids: Vec<u32> = (1..=total).collect();
    store.overlay_and_write(&ids, &ids, total).unwrap();
}

#[test]
fn test_load_without_table() {
    let dir = TempDir::new().unwrap();
    let store = ExerciseStore::new(dir.path().join("exercises.csv"));

    let set = store.load_or_default(3, 7).unwrap();

    assert_eq!(set.ids, vec![1, 2, 3, 4, 5, 6, 7]);
    assert_eq!(set.weights, vec![0, 0, 1, 1, 1, 1, 1]);
    assert!(!store.exists());
}

#[test]
fn test_load_with_table() {
    let dir = TempDir::new().unwrap();
    let store = ExerciseStore::new(dir.path().join("exercises.csv"));
    table_with_weight_equal_to_id(&store, 10);

    let set = store.load_or_default(3, 7).unwrap();

    assert_eq!(set.ids, vec![3, 4, 5, 6, 7]);
    assert_eq!(set.weights, vec![3, 4, 5, 6, 7]);
}

#[test]
fn test_resave_leaves_untouched_ids_at_zero() {
    let dir = TempDir::new().unwrap();
    let store = ExerciseStore::new(dir.path().join("exercises.csv"));
    let ids: Vec<u32> = (1..=7).collect();

    store.overlay_and_write(&ids, &[0, 0, 1, 1, 2, 1, 1], 10).unwrap();
    store.overlay_and_write(&ids, &[0, 0, 4, 1, 1, 3, 2], 10).unwrap();

    let content = fs::read_to_string(store.path()).unwrap();
    let rows: Vec<&str> = content.lines().collect();
    assert_eq!(rows[0], "Exercise,Weight");
    assert_eq!(
        &rows[1..],
        &["1,0", "2,0", "3,4", "4,1", "5,1", "6,3", "7,2", "8,0", "9,0", "10,0"]
    );

    let set = store.load_or_default(3, 7).unwrap();
    assert_eq!(set.weights, vec![4, 1, 1, 3, 2]);
}

#[test]
fn test_save_leaves_no_temporary_file() {
    let dir = TempDir::new().unwrap();
    let store = ExerciseStore::new(dir.path().join("nested").join("exercises.csv"));
    table_with_weight_equal_to_id(&store, 5);

    let names: Vec<String> = fs::read_dir(dir.path().join("nested"))
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    assert_eq!(names, vec!["exercises.csv".to_string()]);
}

#[test]
fn test_truncated_table() {
    let dir = TempDir::new().unwrap();
    let store = ExerciseStore::new(dir.path().join("exercises.csv"));
    table_with_weight_equal_to_id(&store, 5);

    let err = store.load_or_default(1, 8).unwrap_err();

    assert!(matches!(
        err,
        ExerciseError::TruncatedStorage {
            expected: 8,
            found: 5
        }
    ));
}
