//! Backing track lookup across chapters and naming schemes.

use std::path::{Path, PathBuf};

use rhythm_trainer::audio::{
    detect_track_settings, locate_backing_track, track_file_name, AudioError, CHAPTERS,
};
use rhythm_trainer::storage::config::{FileFormat, NamingScheme};
use tempfile::TempDir;

fn build_library(root: &Path, naming: NamingScheme, format: FileFormat) -> Vec<PathBuf> {
    let mut tracks = Vec::new();
    for (index, chapter) in CHAPTERS.iter().enumerate() {
        let chapter_dir = root.join(chapter);
        std::fs::create_dir_all(&chapter_dir).unwrap();
        for offset in 1..=10 {
            let exercise = index as u32 * 10 + offset;
            let track = chapter_dir.join(track_file_name(exercise, chapter, naming, format));
            std::fs::write(&track, b"").unwrap();
            tracks.push(track);
        }
    }
    tracks
}

#[test]
fn test_every_exercise_has_a_track() {
    let dir = TempDir::new().unwrap();
    let tracks = build_library(dir.path(), NamingScheme::Logical, FileFormat::Mp3);

    for (index, track) in tracks.iter().enumerate() {
        let exercise = index as u32 + 1;
        assert_eq!(
            locate_backing_track(exercise, dir.path(), NamingScheme::Logical, FileFormat::Mp3).as_ref(),
            Some(track)
        );
    }
    assert_eq!(
        locate_backing_track(91, dir.path(), NamingScheme::Logical, FileFormat::Mp3),
        None
    );
}

#[test]
fn test_wrong_scheme_finds_nothing() {
    let dir = TempDir::new().unwrap();
    build_library(dir.path(), NamingScheme::Default, FileFormat::Wav);

    assert!(locate_backing_track(45, dir.path(), NamingScheme::Default, FileFormat::Wav).is_some());
    assert!(locate_backing_track(45, dir.path(), NamingScheme::Logical, FileFormat::Wav).is_none());
    assert!(locate_backing_track(45, dir.path(), NamingScheme::Default, FileFormat::Mp3).is_none());
}

#[test]
fn test_detect_settings_of_library() {
    let dir = TempDir::new().unwrap();
    build_library(dir.path(), NamingScheme::Default, FileFormat::Mp3);

    assert_eq!(
        detect_track_settings(dir.path()).unwrap(),
        (NamingScheme::Default, FileFormat::Mp3)
    );
}

#[test]
fn test_detect_settings_without_reference_chapter() {
    let dir = TempDir::new().unwrap();
    std::fs::create_dir(dir.path().join("Jazz")).unwrap();

    assert!(matches!(
        detect_track_settings(dir.path()),
        Err(AudioError::NoReferenceChapter(_))
    ));
}
