//! Backing Tracks Module
//!
//! Locates the backing track that goes with an exercise and hands it to an
//! external player. Nothing here keeps state between calls.

pub mod locator;
pub mod player;

use std::path::PathBuf;
use thiserror::Error;

// Re-export main types
pub use locator::{
    apply_detected_track_settings, chapter_for, detect_track_settings, infer_file_format, infer_naming_scheme,
    locate_backing_track, track_file_name, CHAPTERS, REFERENCE_CHAPTER,
};
pub use player::{play_backing_track, SystemPlayer, TrackPlayer};

/// Errors that can occur while looking up or launching backing tracks
#[derive(Debug, Error)]
pub enum AudioError {
    #[error("No backing track directory configured")]
    NoTracksDir,

    #[error("Backing track for exercise {exercise} not found in directory {}. Please check your configuration.", .dir.display())]
    TrackNotFound { exercise: u32, dir: PathBuf },

    #[error("Backing track directory '{}' does not contain an 'Acoustic' subdirectory", .0.display())]
    NoReferenceChapter(PathBuf),

    #[error("'{}' holds no backing track with a recognizable file format.", .0.display())]
    NoRecognizableFormat(PathBuf),

    #[error("Unsupported file format: {0}")]
    UnsupportedFormat(String),

    #[error("'{}' holds no backing track with a recognizable name.", .0.display())]
    NoRecognizableName(PathBuf),

    #[error("IO error: {0}")]
    IoError(String),

    #[error("Playback failed: {0}")]
    PlaybackFailed(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = AudioError::TrackNotFound {
            exercise: 12,
            dir: PathBuf::from("/tracks"),
        };
        assert!(err.to_string().contains("not found in directory /tracks"));

        let err = AudioError::NoReferenceChapter(PathBuf::from("/tracks"));
        assert!(err
            .to_string()
            .contains("does not contain an 'Acoustic' subdirectory"));
    }
}
