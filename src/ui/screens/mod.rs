//! UI screens for the application.

pub mod practice;
pub mod settings;

pub use practice::{PracticeAction, PracticeScreen, PracticeView};
pub use settings::{SettingsAction, SettingsScreen};

/// Screen navigation state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Screen {
    /// Exercise practice
    #[default]
    Practice,
    /// Settings screen
    Settings,
}
