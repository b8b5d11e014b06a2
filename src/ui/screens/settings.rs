//! Settings screen implementation.
//!
//! Edits the exercise file, the backing tracks folder and the active range.
//! Changes are only applied when the player saves and the result validates.

use std::path::PathBuf;

use egui::{Align, Layout, RichText, Ui};

use crate::storage::config::AppConfig;
use crate::t;
use crate::ui::theme::Palette;

/// Actions that can result from the settings screen.
#[derive(Debug, Clone, PartialEq)]
pub enum SettingsAction {
    /// No action
    None,
    /// Save changes and go back
    Save(AppConfig),
    /// Cancel changes and go back
    Cancel,
}

/// Settings screen state.
pub struct SettingsScreen {
    /// Configuration the edits start from
    original: AppConfig,
    csv_path: String,
    tracks_dir: String,
    first_exercise: u32,
    last_exercise: u32,
    /// Validation error message
    pub error_message: Option<String>,
}

impl SettingsScreen {
    /// Create a settings screen editing `config`.
    pub fn new(config: &AppConfig) -> Self {
        Self {
            original: config.clone(),
            csv_path: config.csv_path.display().to_string(),
            tracks_dir: config
                .backing_tracks_dir
                .as_ref()
                .map(|dir| dir.display().to_string())
                .unwrap_or_default(),
            first_exercise: config.first_exercise,
            last_exercise: config.last_exercise,
            error_message: None,
        }
    }

    /// Discard edits.
    pub fn reset(&mut self) {
        *self = Self::new(&self.original.clone());
    }

    /// Build and validate the edited configuration.
    pub fn edited_config(&self) -> Result<AppConfig, String> {
        let csv_path = self.csv_path.trim();
        if csv_path.is_empty() {
            return Err(format!("{}: {}", t!("settings-csv"), t!("settings-none")));
        }

        let tracks_dir = self.tracks_dir.trim();
        let config = AppConfig {
            csv_path: PathBuf::from(csv_path),
            first_exercise: self.first_exercise,
            last_exercise: self.last_exercise,
            backing_tracks_dir: (!tracks_dir.is_empty()).then(|| PathBuf::from(tracks_dir)),
            ..self.original.clone()
        };

        config.validate().map_err(|e| e.to_string())?;
        Ok(config)
    }

    /// Render the settings screen.
    pub fn show(&mut self, ui: &mut Ui, palette: &Palette) -> SettingsAction {
        let mut action = SettingsAction::None;

        // Header
        ui.horizontal(|ui| {
            ui.heading(t!("settings-title"));

            ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                if ui
                    .add(egui::Button::new(t!("settings-save")).fill(palette.good))
                    .clicked()
                {
                    match self.edited_config() {
                        Ok(config) => {
                            self.error_message = None;
                            action = SettingsAction::Save(config);
                        }
                        Err(e) => self.error_message = Some(e),
                    }
                }

                if ui.button(t!("settings-cancel")).clicked() {
                    action = SettingsAction::Cancel;
                }
            });
        });

        ui.separator();

        if let Some(ref error) = self.error_message {
            ui.label(RichText::new(format!("⚠ {}", error)).color(palette.error));
            ui.add_space(8.0);
        }

        egui::Grid::new("settings_grid")
            .num_columns(2)
            .spacing([12.0, 10.0])
            .show(ui, |ui| {
                ui.label(t!("settings-csv"));
                ui.horizontal(|ui| {
                    ui.text_edit_singleline(&mut self.csv_path);
                    if ui.button(t!("settings-browse")).clicked() {
                        if let Some(path) = rfd::FileDialog::new()
                            .add_filter("CSV", &["csv"])
                            .pick_file()
                        {
                            self.csv_path = path.display().to_string();
                        }
                    }
                    if ui.button(t!("settings-new")).clicked() {
                        if let Some(path) = rfd::FileDialog::new()
                            .add_filter("CSV", &["csv"])
                            .set_file_name("exercises.csv")
                            .save_file()
                        {
                            self.csv_path = path.display().to_string();
                        }
                    }
                });
                ui.end_row();

                ui.label(t!("settings-tracks"));
                ui.horizontal(|ui| {
                    ui.add(
                        egui::TextEdit::singleline(&mut self.tracks_dir).hint_text(t!("settings-none")),
                    );
                    if ui.button(t!("settings-browse")).clicked() {
                        if let Some(dir) = rfd::FileDialog::new().pick_folder() {
                            self.tracks_dir = dir.display().to_string();
                        }
                    }
                    if ui.button(t!("settings-clear")).clicked() {
                        self.tracks_dir.clear();
                    }
                });
                ui.end_row();

                ui.label(t!("settings-range"));
                ui.horizontal(|ui| {
                    let total = self.original.total_exercises.max(1);
                    ui.add(egui::DragValue::new(&mut self.first_exercise).range(1..=total));
                    ui.label("-");
                    ui.add(egui::DragValue::new(&mut self.last_exercise).range(1..=total));
                });
                ui.end_row();
            });

        action
    }
}
