//! Backing track playback
//!
//! Playback is delegated to the platform's default application. The caller
//! never blocks on the child process; a background thread reaps it.

use std::io;
use std::path::{Path, PathBuf};
use std::process::{Command, ExitStatus, Stdio};
use std::thread::{self, JoinHandle};

use super::locator::locate_backing_track;
use super::AudioError;
use crate::exercises::ExerciseId;
use crate::storage::config::AppConfig;

/// Something able to start playing an audio file.
pub trait TrackPlayer {
    /// Start playback of `path` without blocking.
    fn play(&self, path: &Path) -> Result<(), AudioError>;
}

/// Opens tracks with the system's default application.
#[derive(Debug, Clone)]
pub struct SystemPlayer {
    program: String,
    args: Vec<String>,
}

impl Default for SystemPlayer {
    fn default() -> Self {
        if cfg!(target_os = "macos") {
            Self::with_command("open", &[])
        } else if cfg!(target_os = "windows") {
            Self::with_command("cmd", &["/C", "start", ""])
        } else {
            Self::with_command("xdg-open", &[])
        }
    }
}

impl SystemPlayer {
    /// Player launching `program args... <track>`.
    pub fn with_command(program: &str, args: &[&str]) -> Self {
        Self {
            program: program.to_string(),
            args: args.iter().map(|a| a.to_string()).collect(),
        }
    }

    /// Launch the player on `path` and reap it on a background thread.
    pub fn launch(&self, path: &Path) -> Result<JoinHandle<io::Result<ExitStatus>>, AudioError> {
        let mut child = Command::new(&self.program)
            .args(&self.args)
            .arg(path)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .map_err(|e| AudioError::PlaybackFailed(format!("{}: {}", self.program, e)))?;

        let program = self.program.clone();
        Ok(thread::spawn(move || {
            let status = child.wait();
            match &status {
                Ok(status) if !status.success() => {
                    tracing::warn!("{} exited with {}", program, status)
                }
                Err(e) => tracing::warn!("Failed to wait for {}: {}", program, e),
                Ok(_) => {}
            }
            status
        }))
    }
}

impl TrackPlayer for SystemPlayer {
    fn play(&self, path: &Path) -> Result<(), AudioError> {
        self.launch(path)?;
        Ok(())
    }
}

/// Locate the backing track of `exercise` and start playing it.
///
/// Returns the path handed to the player.
pub fn play_backing_track(
    exercise: ExerciseId,
    config: &AppConfig,
    player: &dyn TrackPlayer,
) -> Result<PathBuf, AudioError> {
    let dir = config
        .backing_tracks_dir
        .as_deref()
        .ok_or(AudioError::NoTracksDir)?;

    let track = locate_backing_track(exercise, dir, config.naming_scheme, config.file_format)
        .ok_or_else(|| AudioError::TrackNotFound {
            exercise,
            dir: dir.to_path_buf(),
        })?;

    tracing::info!(
        "Playing backing track '{}'",
        track.file_name().unwrap_or_default().to_string_lossy()
    );
    player.play(&track)?;
    Ok(track)
}
