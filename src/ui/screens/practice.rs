//! Practice screen implementation.
//!
//! Shows the random and manual tabs, the backing track button and the
//! Good/Bad feedback buttons. The screen only reports what the player did;
//! the app applies it to the session.

use egui::{Align, Layout, RichText, Ui, Vec2};

use crate::exercises::{ExerciseId, Feedback, Weight};
use crate::input::{KeyAction, KeyboardHandler};
use crate::session::PracticeMode;
use crate::t;
use crate::ui::theme::Palette;

/// Snapshot of the session the screen renders.
#[derive(Debug, Clone, Copy)]
pub struct PracticeView<'a> {
    pub mode: PracticeMode,
    pub current: Option<ExerciseId>,
    pub weight: Option<Weight>,
    pub first: ExerciseId,
    pub last: ExerciseId,
    /// The current exercise has a backing track on disk
    pub track_available: bool,
    /// Its backing track was already played this round
    pub track_played: bool,
    pub palette: &'a Palette,
    pub shortcuts: &'a KeyboardHandler,
}

impl PracticeView<'_> {
    /// The track button is live once per round.
    pub fn track_enabled(&self) -> bool {
        self.current.is_some() && self.track_available && !self.track_played
    }

    /// With a backing track, feedback waits until it has been played.
    pub fn feedback_enabled(&self) -> bool {
        self.current.is_some() && (!self.track_available || self.track_played)
    }
}

/// Something the player asked for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PracticeAction {
    SwitchMode(PracticeMode),
    /// A valid number was typed in the manual tab
    SelectManual(ExerciseId),
    /// The manual field no longer holds a valid number
    ClearManual,
    PlayTrack,
    Feedback(Feedback),
}

/// Practice screen state.
#[derive(Debug, Default)]
pub struct PracticeScreen {
    /// Text typed in the manual tab
    pub manual_input: String,
}

impl PracticeScreen {
    pub fn new() -> Self {
        Self::default()
    }

    /// Clear the manual field, after feedback or a tab switch.
    pub fn reset_input(&mut self) {
        self.manual_input.clear();
    }

    /// Render the screen and return the player's action, if any.
    pub fn show(&mut self, ui: &mut Ui, view: &PracticeView<'_>) -> Option<PracticeAction> {
        let mut action = None;

        // Tabs
        ui.horizontal(|ui| {
            for (mode, label, shortcut) in [
                (PracticeMode::Random, t!("tab-random"), KeyAction::RandomTab),
                (PracticeMode::Manual, t!("tab-manual"), KeyAction::ManualTab),
            ] {
                if ui
                    .selectable_label(view.mode == mode, label)
                    .on_hover_text(view.shortcuts.hint(shortcut))
                    .clicked()
                    && view.mode != mode
                {
                    action = Some(PracticeAction::SwitchMode(mode));
                }
            }
        });

        ui.separator();
        ui.add_space(16.0);

        ui.vertical_centered(|ui| {
            match view.mode {
                PracticeMode::Random => {
                    if let Some(exercise) = view.current {
                        ui.label(
                            RichText::new(t!("exercise-label", "number" => exercise))
                                .size(28.0)
                                .strong(),
                        );
                    }
                }
                PracticeMode::Manual => {
                    if let Some(next) = self.show_manual_input(ui, view) {
                        action = Some(next);
                    }
                }
            }

            if let Some(weight) = view.weight {
                ui.label(
                    RichText::new(t!("exercise-weight", "weight" => weight))
                        .color(view.palette.text_secondary),
                );
            }

            ui.add_space(24.0);

            if ui
                .add_enabled(
                    view.track_enabled(),
                    egui::Button::new(RichText::new(t!("play-backing-track")).size(18.0))
                        .min_size(Vec2::new(250.0, 50.0)),
                )
                .on_hover_text(view.shortcuts.hint(KeyAction::PlayTrack))
                .clicked()
            {
                action = Some(PracticeAction::PlayTrack);
            }

            ui.add_space(24.0);
            ui.label(RichText::new(t!("feedback-question")).size(18.0));
            ui.add_space(8.0);
        });

        ui.with_layout(Layout::left_to_right(Align::Center), |ui| {
            let button_size = Vec2::new(100.0, 50.0);
            ui.add_space((ui.available_width() - button_size.x * 2.0 - 16.0).max(0.0) / 2.0);

            let enabled = view.feedback_enabled();
            if ui
                .add_enabled(
                    enabled,
                    egui::Button::new(RichText::new(t!("feedback-good")).size(18.0))
                        .fill(view.palette.good)
                        .min_size(button_size),
                )
                .on_hover_text(view.shortcuts.hint(KeyAction::Good))
                .clicked()
            {
                action = Some(PracticeAction::Feedback(Feedback::Good));
            }

            ui.add_space(16.0);

            if ui
                .add_enabled(
                    enabled,
                    egui::Button::new(RichText::new(t!("feedback-bad")).size(18.0))
                        .fill(view.palette.bad)
                        .min_size(button_size),
                )
                .on_hover_text(view.shortcuts.hint(KeyAction::Bad))
                .clicked()
            {
                action = Some(PracticeAction::Feedback(Feedback::Bad));
            }
        });

        action
    }

    fn show_manual_input(&mut self, ui: &mut Ui, view: &PracticeView<'_>) -> Option<PracticeAction> {
        ui.label(t!("manual-prompt"));

        let valid = self.parsed(view.first, view.last);
        let color = if valid.is_some() || self.manual_input.is_empty() {
            view.palette.text
        } else {
            view.palette.error
        };

        let response = ui.add(
            egui::TextEdit::singleline(&mut self.manual_input)
                .hint_text(t!("manual-placeholder", "first" => view.first, "last" => view.last))
                .text_color(color)
                .desired_width(200.0),
        );

        if !self.manual_input.is_empty() && valid.is_none() {
            ui.label(
                RichText::new(t!("manual-out-of-range", "first" => view.first, "last" => view.last))
                    .color(view.palette.error)
                    .small(),
            );
        }

        if !response.changed() {
            return None;
        }

        // Keep digits only; `+` and `-` are feedback shortcuts
        self.manual_input.retain(|c| c.is_ascii_digit());
        match self.parsed(view.first, view.last) {
            Some(exercise) => Some(PracticeAction::SelectManual(exercise)),
            None => Some(PracticeAction::ClearManual),
        }
    }

    /// The typed exercise number, when it lies in `[first, last]`.
    pub fn parsed(&self, first: ExerciseId, last: ExerciseId) -> Option<ExerciseId> {
        self.manual_input
            .trim()
            .parse::<ExerciseId>()
            .ok()
            .filter(|n| (first..=last).contains(n))
    }
}
