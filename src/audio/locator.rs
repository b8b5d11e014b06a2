//! Backing track lookup
//!
//! Tracks are grouped in nine chapter folders of ten exercises each.

use std::path::{Path, PathBuf};

use super::AudioError;
use crate::exercises::ExerciseId;
use crate::storage::config::{AppConfig, FileFormat, NamingScheme};

/// Chapter folders, in exercise order.
pub const CHAPTERS: [&str; 9] = [
    "Acoustic",
    "Classic Blues",
    "Classic Rock",
    "Funk",
    "Fusion",
    "Hard Rock & Heavy Metal",
    "Jazz",
    "Pop",
    "Soul",
];

/// Chapter inspected when inferring the naming scheme and file format.
pub const REFERENCE_CHAPTER: &str = "Acoustic";

/// Exercises per chapter folder.
const EXERCISES_PER_CHAPTER: u32 = 10;

/// Marker carried by every backing track file name.
const TRACK_MARKER: &str = "BK";

/// Chapter folder holding an exercise.
pub fn chapter_for(exercise: ExerciseId) -> Option<&'static str> {
    let index = exercise.checked_sub(1)? / EXERCISES_PER_CHAPTER;
    CHAPTERS.get(index as usize).copied()
}

/// File name of a backing track inside its chapter folder.
pub fn track_file_name(
    exercise: ExerciseId,
    chapter: &str,
    naming: NamingScheme,
    format: FileFormat,
) -> String {
    match naming {
        NamingScheme::Logical => format!(
            "{} {} {:02}.{}",
            TRACK_MARKER,
            chapter,
            exercise,
            format.extension()
        ),
        NamingScheme::Default => format!(
            "{} {} {}.{}",
            chapter,
            exercise,
            TRACK_MARKER,
            format.extension()
        ),
    }
}

/// Path of the backing track for `exercise`, if the file exists.
pub fn locate_backing_track(
    exercise: ExerciseId,
    backing_tracks_dir: &Path,
    naming: NamingScheme,
    format: FileFormat,
) -> Option<PathBuf> {
    let chapter = chapter_for(exercise)?;
    let chapter_dir = backing_tracks_dir.join(chapter);
    if !chapter_dir.is_dir() {
        return None;
    }

    let track = chapter_dir.join(track_file_name(exercise, chapter, naming, format));
    track.is_file().then_some(track)
}

/// Infer the audio format from the first track of the reference chapter.
pub fn infer_file_format(backing_tracks_dir: &Path) -> Result<FileFormat, AudioError> {
    let chapter_dir = reference_chapter(backing_tracks_dir)?;
    let track = first_track(&chapter_dir)?
        .ok_or_else(|| AudioError::NoRecognizableFormat(chapter_dir.clone()))?;

    let extension = track
        .extension()
        .map(|ext| ext.to_string_lossy().into_owned())
        .unwrap_or_default();

    extension
        .parse::<FileFormat>()
        .map_err(|_| AudioError::UnsupportedFormat(format!(".{}", extension)))
}

/// Infer the naming scheme from the first track of the reference chapter.
pub fn infer_naming_scheme(backing_tracks_dir: &Path) -> Result<NamingScheme, AudioError> {
    let chapter_dir = reference_chapter(backing_tracks_dir)?;
    let unrecognized = || AudioError::NoRecognizableName(chapter_dir.clone());

    let track = first_track(&chapter_dir)?.ok_or_else(unrecognized)?;
    let stem = track
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();

    if stem.starts_with(TRACK_MARKER) {
        Ok(NamingScheme::Logical)
    } else if stem.ends_with(TRACK_MARKER) {
        Ok(NamingScheme::Default)
    } else {
        Err(unrecognized())
    }
}

/// Infer both the naming scheme and the file format of a track folder.
pub fn detect_track_settings(
    backing_tracks_dir: &Path,
) -> Result<(NamingScheme, FileFormat), AudioError> {
    let naming = infer_naming_scheme(backing_tracks_dir)?;
    let format = infer_file_format(backing_tracks_dir)?;
    tracing::debug!(
        "Detected backing tracks in {}: naming {}, format {}",
        backing_tracks_dir.display(),
        naming,
        format
    );
    Ok((naming, format))
}

/// Update the configured naming scheme and format from the tracks folder.
///
/// Returns whether anything changed. Nothing happens without a folder.
pub fn apply_detected_track_settings(config: &mut AppConfig) -> Result<bool, AudioError> {
    let Some(dir) = config.backing_tracks_dir.as_deref() else {
        return Ok(false);
    };

    let (naming, format) = detect_track_settings(dir)?;
    let changed = naming != config.naming_scheme || format != config.file_format;
    config.naming_scheme = naming;
    config.file_format = format;
    Ok(changed)
}

fn reference_chapter(backing_tracks_dir: &Path) -> Result<PathBuf, AudioError> {
    let chapter_dir = backing_tracks_dir.join(REFERENCE_CHAPTER);
    if chapter_dir.is_dir() {
        Ok(chapter_dir)
    } else {
        Err(AudioError::NoReferenceChapter(backing_tracks_dir.to_path_buf()))
    }
}

/// First visible file of a folder, by name.
fn first_track(dir: &Path) -> Result<Option<PathBuf>, AudioError> {
    let mut files = Vec::new();
    for entry in std::fs::read_dir(dir).map_err(|e| AudioError::IoError(e.to_string()))? {
        let path = entry.map_err(|e| AudioError::IoError(e.to_string()))?.path();
        let hidden = path
            .file_name()
            .is_some_and(|name| name.to_string_lossy().starts_with('.'));
        if path.is_file() && !hidden {
            files.push(path);
        }
    }
    files.sort();
    Ok(files.into_iter().next())
}
