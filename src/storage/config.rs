//! Application configuration.
//!
//! Stored as TOML in the platform config directory. Only `csv_path` is
//! required; every other key falls back to a default.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::str::FromStr;

use crate::exercises::MAX_EXERCISES;

/// Backing track file naming convention.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum NamingScheme {
    /// `"<Chapter> <n> BK.<ext>"`
    #[default]
    Default,
    /// `"BK <Chapter> <nn>.<ext>"`
    Logical,
}

impl NamingScheme {
    pub fn as_str(&self) -> &'static str {
        match self {
            NamingScheme::Default => "default",
            NamingScheme::Logical => "logical",
        }
    }
}

impl std::fmt::Display for NamingScheme {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for NamingScheme {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "default" => Ok(NamingScheme::Default),
            "logical" => Ok(NamingScheme::Logical),
            other => Err(ConfigError::UnknownValue {
                kind: "naming scheme",
                value: other.to_string(),
            }),
        }
    }
}

impl TryFrom<String> for NamingScheme {
    type Error = ConfigError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<NamingScheme> for String {
    fn from(value: NamingScheme) -> Self {
        value.as_str().to_string()
    }
}

/// Backing track audio format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum FileFormat {
    #[default]
    Wav,
    Mp3,
}

impl FileFormat {
    /// File extension without the dot.
    pub fn extension(&self) -> &'static str {
        match self {
            FileFormat::Wav => "wav",
            FileFormat::Mp3 => "mp3",
        }
    }
}

impl std::fmt::Display for FileFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.extension())
    }
}

impl FromStr for FileFormat {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().trim_start_matches('.').to_lowercase().as_str() {
            "wav" => Ok(FileFormat::Wav),
            "mp3" => Ok(FileFormat::Mp3),
            other => Err(ConfigError::UnknownValue {
                kind: "file format",
                value: other.to_string(),
            }),
        }
    }
}

impl TryFrom<String> for FileFormat {
    type Error = ConfigError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<FileFormat> for String {
    fn from(value: FileFormat) -> Self {
        value.extension().to_string()
    }
}

fn default_first_exercise() -> u32 {
    1
}

fn default_last_exercise() -> u32 {
    MAX_EXERCISES
}

fn default_total_exercises() -> u32 {
    MAX_EXERCISES
}

fn default_true() -> bool {
    true
}

/// Application configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Exercise weight table
    pub csv_path: PathBuf,
    /// First exercise of the active range
    #[serde(default = "default_first_exercise")]
    pub first_exercise: u32,
    /// Last exercise of the active range
    #[serde(default = "default_last_exercise")]
    pub last_exercise: u32,
    /// Size of the exercise catalogue
    #[serde(default = "default_total_exercises")]
    pub total_exercises: u32,
    /// Folder holding the backing track chapters
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub backing_tracks_dir: Option<PathBuf>,
    /// Backing track naming convention
    #[serde(default)]
    pub naming_scheme: NamingScheme,
    /// Backing track audio format
    #[serde(default)]
    pub file_format: FileFormat,
    /// Start in random mode (manual entry otherwise)
    #[serde(default = "default_true")]
    pub random_mode: bool,
    /// Save the weight table after every answer, not only on quit
    #[serde(default = "default_true")]
    pub save_every_round: bool,
    /// UI language override (system locale otherwise)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::with_csv_path(get_data_dir().join("exercises.csv"))
    }
}

impl AppConfig {
    /// Default configuration storing weights at `csv_path`.
    pub fn with_csv_path(csv_path: impl Into<PathBuf>) -> Self {
        Self {
            csv_path: csv_path.into(),
            first_exercise: default_first_exercise(),
            last_exercise: default_last_exercise(),
            total_exercises: default_total_exercises(),
            backing_tracks_dir: None,
            naming_scheme: NamingScheme::default(),
            file_format: FileFormat::default(),
            random_mode: true,
            save_every_round: true,
            language: None,
        }
    }

    /// Check the exercise range and the backing track folder.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.first_exercise < 1
            || self.first_exercise > self.last_exercise
            || self.last_exercise > self.total_exercises
        {
            return Err(ConfigError::InvalidRange {
                first: self.first_exercise,
                last: self.last_exercise,
                total: self.total_exercises,
            });
        }

        if let Some(dir) = &self.backing_tracks_dir {
            if !dir.is_dir() {
                return Err(ConfigError::TracksDirMissing(dir.clone()));
            }
        }

        Ok(())
    }
}

/// Get the application data directory.
pub fn get_data_dir() -> PathBuf {
    directories::ProjectDirs::from("com", "rhythmtrainer", "RhythmTrainer")
        .map(|dirs| dirs.data_dir().to_path_buf())
        .unwrap_or_else(|| PathBuf::from("."))
}

/// Get the directory holding the log file.
pub fn get_log_dir() -> PathBuf {
    directories::ProjectDirs::from("com", "rhythmtrainer", "RhythmTrainer")
        .map(|dirs| dirs.data_local_dir().join("logs"))
        .unwrap_or_else(|| PathBuf::from("logs"))
}

/// Get the application config directory.
pub fn get_config_dir() -> PathBuf {
    directories::ProjectDirs::from("com", "rhythmtrainer", "RhythmTrainer")
        .map(|dirs| dirs.config_dir().to_path_buf())
        .unwrap_or_else(|| PathBuf::from("."))
}

/// Get the configuration file path.
pub fn get_config_path() -> PathBuf {
    get_config_dir().join("config.toml")
}

/// Load the configuration, writing a default one on first run.
pub fn load_config() -> Result<AppConfig, ConfigError> {
    load_config_from(&get_config_path())
}

/// Load and validate the configuration stored at `path`.
///
/// A missing file is replaced by the default configuration, which is
/// written to `path` before being returned.
pub fn load_config_from(path: &Path) -> Result<AppConfig, ConfigError> {
    if !path.exists() {
        tracing::info!(
            "Configuration file not found. Creating a default one at {}",
            path.display()
        );
        let config = AppConfig::default();
        save_config_to(&config, path)?;
        return Ok(config);
    }

    tracing::info!("Reading configuration from {}", path.display());
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::IoError(e.to_string()))?;

    let config: AppConfig =
        toml::from_str(&content).map_err(|e| ConfigError::ParseError(e.to_string()))?;

    config.validate()?;
    Ok(config)
}

/// Save the configuration to the default location.
pub fn save_config(config: &AppConfig) -> Result<(), ConfigError> {
    save_config_to(config, &get_config_path())
}

/// Save the configuration to `path`.
pub fn save_config_to(config: &AppConfig, path: &Path) -> Result<(), ConfigError> {
    // Ensure parent directory exists
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| ConfigError::IoError(e.to_string()))?;
    }

    let content =
        toml::to_string_pretty(config).map_err(|e| ConfigError::SerializeError(e.to_string()))?;

    std::fs::write(path, content).map_err(|e| ConfigError::IoError(e.to_string()))?;
    tracing::debug!("Configuration saved to {}", path.display());

    Ok(())
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    IoError(String),

    #[error("Parse error: {0}")]
    ParseError(String),

    #[error("Serialize error: {0}")]
    SerializeError(String),

    #[error("Invalid exercise range {first}-{last}: it must lie within 1-{total}")]
    InvalidRange { first: u32, last: u32, total: u32 },

    #[error("Backing track directory '{}' does not exist", .0.display())]
    TracksDirMissing(PathBuf),

    #[error("Unknown {kind} '{value}'")]
    UnknownValue { kind: &'static str, value: String },
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_minimal_config_uses_defaults() {
        let config: AppConfig = toml::from_str(r#"csv_path = "foo.csv""#).unwrap();

        assert_eq!(config.csv_path, PathBuf::from("foo.csv"));
        assert_eq!(config.first_exercise, 1);
        assert_eq!(config.last_exercise, MAX_EXERCISES);
        assert_eq!(config.total_exercises, MAX_EXERCISES);
        assert_eq!(config.backing_tracks_dir, None);
        assert_eq!(config.naming_scheme, NamingScheme::Default);
        assert_eq!(config.file_format, FileFormat::Wav);
        assert!(config.random_mode);
        assert!(config.save_every_round);
    }

    #[test]
    fn test_missing_csv_path_is_parse_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "first_exercise = 3\n").unwrap();

        let err = load_config_from(&path).unwrap_err();

        match err {
            ConfigError::ParseError(message) => assert!(message.contains("csv_path")),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_enums_parse_case_insensitively() {
        let config: AppConfig = toml::from_str(
            r#"
            csv_path = "foo.csv"
            naming_scheme = "LOGICAL"
            file_format = "Mp3"
            "#,
        )
        .unwrap();

        assert_eq!(config.naming_scheme, NamingScheme::Logical);
        assert_eq!(config.file_format, FileFormat::Mp3);
    }

    #[test]
    fn test_unknown_enum_value_rejected() {
        let result: Result<AppConfig, _> = toml::from_str(
            r#"
            csv_path = "foo.csv"
            file_format = "flac"
            "#,
        );
        assert!(result.is_err());
        assert!("flac".parse::<FileFormat>().is_err());
        assert!("weird".parse::<NamingScheme>().is_err());
    }

    #[test]
    fn test_missing_file_creates_default() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let config = load_config_from(&path).unwrap();

        assert!(path.exists());
        assert_eq!(config.first_exercise, 1);
        assert!(config.csv_path.ends_with("exercises.csv"));
    }

    #[test]
    fn test_save_and_reload() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        let mut config = AppConfig::with_csv_path("foo.csv");
        config.first_exercise = 11;
        config.last_exercise = 20;
        config.naming_scheme = NamingScheme::Logical;
        config.backing_tracks_dir = Some(dir.path().to_path_buf());

        save_config_to(&config, &path).unwrap();
        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.contains("foo.csv"));
        assert!(content.contains("logical"));

        let reloaded = load_config_from(&path).unwrap();
        assert_eq!(reloaded, config);
    }

    #[test]
    fn test_save_without_tracks_dir_omits_key() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");

        save_config_to(&AppConfig::with_csv_path("foo.csv"), &path).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert!(!content.contains("backing_tracks_dir"));
    }

    #[test]
    fn test_missing_tracks_dir_rejected() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            "csv_path = \"foo.csv\"\nbacking_tracks_dir = \"/definitely/not/here\"\n",
        )
        .unwrap();

        let err = load_config_from(&path).unwrap_err();

        assert!(matches!(err, ConfigError::TracksDirMissing(_)));
        assert!(err.to_string().contains("does not exist"));
    }

    #[test]
    fn test_invalid_ranges_rejected() {
        let mut config = AppConfig::with_csv_path("foo.csv");
        config.first_exercise = 0;
        assert!(matches!(config.validate(), Err(ConfigError::InvalidRange { .. })));

        config.first_exercise = 10;
        config.last_exercise = 5;
        assert!(config.validate().is_err());

        config.first_exercise = 1;
        config.last_exercise = MAX_EXERCISES + 1;
        assert!(config.validate().is_err());

        config.last_exercise = MAX_EXERCISES;
        assert!(config.validate().is_ok());
    }
}
