//! Input handling for both front-ends.
//!
//! Keyboard shortcuts for the window and line prompts for the terminal.

pub mod keyboard;
pub mod prompt;

// Re-export types
pub use keyboard::{KeyAction, KeyboardHandler, KeyboardShortcut};
pub use prompt::{prompt_choice, prompt_number, wait_for_enter};
