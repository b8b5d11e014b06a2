//! Keyboard shortcuts for the practice window.

use egui::{Key, Modifiers};
use std::collections::HashMap;

/// A keyboard shortcut definition.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct KeyboardShortcut {
    /// The primary key
    pub key: Key,
    /// Required modifiers
    pub modifiers: Modifiers,
}

impl KeyboardShortcut {
    /// Create a new shortcut with just a key.
    pub fn new(key: Key) -> Self {
        Self {
            key,
            modifiers: Modifiers::NONE,
        }
    }

    /// Create a shortcut with Ctrl modifier.
    pub fn ctrl(key: Key) -> Self {
        Self {
            key,
            modifiers: Modifiers::CTRL,
        }
    }

    /// Check if this shortcut matches the given input.
    ///
    /// Shift is ignored unless the shortcut asks for it, since `+` needs
    /// Shift on most layouts.
    pub fn matches(&self, key: Key, modifiers: Modifiers) -> bool {
        self.key == key && modifiers.matches_logically(self.modifiers)
    }

    /// Get a display string for the shortcut.
    pub fn display(&self) -> String {
        let mut parts = Vec::new();

        if self.modifiers.ctrl {
            parts.push("Ctrl");
        }
        if self.modifiers.shift {
            parts.push("Shift");
        }

        parts.push(key_name(self.key));

        parts.join("+")
    }
}

/// Actions that can be triggered by keyboard shortcuts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyAction {
    /// Play the backing track of the current exercise
    PlayTrack,
    /// Report the current exercise as played well
    Good,
    /// Report the current exercise as played poorly
    Bad,
    /// Switch to random mode
    RandomTab,
    /// Switch to manual mode
    ManualTab,
}

impl KeyAction {
    /// Every action, in display order.
    pub fn all() -> &'static [KeyAction] {
        &[
            KeyAction::PlayTrack,
            KeyAction::Good,
            KeyAction::Bad,
            KeyAction::RandomTab,
            KeyAction::ManualTab,
        ]
    }

    /// Get the default shortcut for this action.
    pub fn default_shortcut(&self) -> KeyboardShortcut {
        match self {
            KeyAction::PlayTrack => KeyboardShortcut::new(Key::Enter),
            KeyAction::Good => KeyboardShortcut::new(Key::Plus),
            KeyAction::Bad => KeyboardShortcut::new(Key::Minus),
            KeyAction::RandomTab => KeyboardShortcut::ctrl(Key::Num1),
            KeyAction::ManualTab => KeyboardShortcut::ctrl(Key::Num2),
        }
    }

}

/// Keyboard input handler.
#[derive(Debug, Clone)]
pub struct KeyboardHandler {
    /// Registered shortcuts
    shortcuts: HashMap<KeyboardShortcut, KeyAction>,
}

impl Default for KeyboardHandler {
    fn default() -> Self {
        Self::new()
    }
}

impl KeyboardHandler {
    /// Create a new keyboard handler with default shortcuts.
    pub fn new() -> Self {
        let mut handler = Self {
            shortcuts: HashMap::new(),
        };
        for &action in KeyAction::all() {
            handler.register(action.default_shortcut(), action);
        }
        handler
    }

    /// Register a shortcut for an action.
    pub fn register(&mut self, shortcut: KeyboardShortcut, action: KeyAction) {
        self.shortcuts.insert(shortcut, action);
    }

    /// Get the action for a key press.
    pub fn get_action(&self, key: Key, modifiers: Modifiers) -> Option<KeyAction> {
        self.shortcuts
            .iter()
            .find(|(shortcut, _)| shortcut.matches(key, modifiers))
            .map(|(_, &action)| action)
    }

    /// Actions triggered by this frame's key presses.
    pub fn actions(&self, ctx: &egui::Context) -> Vec<KeyAction> {
        let presses: Vec<(Key, Modifiers)> = ctx.input(|i| {
            i.events
                .iter()
                .filter_map(|event| match event {
                    egui::Event::Key {
                        key,
                        pressed: true,
                        modifiers,
                        ..
                    } => Some((*key, *modifiers)),
                    _ => None,
                })
                .collect()
        });

        presses
            .into_iter()
            .filter_map(|(key, modifiers)| self.get_action(key, modifiers))
            .collect()
    }

    /// Get the shortcut for an action.
    pub fn shortcut_for(&self, action: KeyAction) -> Option<&KeyboardShortcut> {
        self.shortcuts
            .iter()
            .find(|(_, &a)| a == action)
            .map(|(s, _)| s)
    }

    /// Hover text naming the shortcut of an action, empty when unbound.
    pub fn hint(&self, action: KeyAction) -> String {
        self.shortcut_for(action)
            .map(KeyboardShortcut::display)
            .unwrap_or_default()
    }
}

/// Get a display name for a key.
fn key_name(key: Key) -> &'static str {
    match key {
        Key::Enter => "Enter",
        Key::Plus => "+",
        Key::Minus => "-",
        Key::Num1 => "1",
        Key::Num2 => "2",
        _ => "?",
    }
}
