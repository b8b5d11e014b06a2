//! Main application state and egui integration.

use eframe::egui;

use rhythm_trainer::audio::{
    apply_detected_track_settings, locate_backing_track, play_backing_track, SystemPlayer,
};
use rhythm_trainer::exercises::{ExerciseId, Feedback};
use rhythm_trainer::input::{KeyAction, KeyboardHandler};
use rhythm_trainer::session::{PracticeMode, TrainingSession};
use rhythm_trainer::storage::config::{self, AppConfig};
use rhythm_trainer::t;
use rhythm_trainer::ui::screens::{
    PracticeAction, PracticeScreen, PracticeView, Screen, SettingsAction, SettingsScreen,
};
use rhythm_trainer::ui::theme::Theme;

/// Main application state.
pub struct TrainerApp {
    /// Current screen
    current_screen: Screen,
    /// UI theme
    theme: Theme,
    /// Application configuration
    config: AppConfig,
    /// Running session, absent when it failed to start
    session: Option<TrainingSession>,
    /// Practice screen state
    practice_screen: PracticeScreen,
    /// Settings screen state
    settings_screen: SettingsScreen,
    /// Keyboard shortcuts
    keyboard: KeyboardHandler,
    /// Backing track launcher
    player: SystemPlayer,
    /// Exercise whose backing track was played this round
    played: Option<ExerciseId>,
    /// Last error, shown until dismissed
    error_message: Option<String>,
    /// Informational message
    notice: Option<String>,
}

impl TrainerApp {
    /// Create a new application instance.
    pub fn new(cc: &eframe::CreationContext<'_>) -> Self {
        let mut error_message = None;

        let config = match config::load_config() {
            Ok(config) => config,
            Err(e) => {
                tracing::error!("Failed to load configuration: {}", e);
                error_message = Some(e.to_string());
                AppConfig::default()
            }
        };

        rhythm_trainer::i18n::init(config.language.as_deref());

        let theme = Theme::Dark;
        cc.egui_ctx.set_visuals(theme.visuals());

        let mut app = Self {
            current_screen: Screen::Practice,
            theme,
            settings_screen: SettingsScreen::new(&config),
            config,
            session: None,
            practice_screen: PracticeScreen::new(),
            keyboard: KeyboardHandler::new(),
            player: SystemPlayer::default(),
            played: None,
            error_message,
            notice: None,
        };
        app.refresh_track_settings();
        app.start_session();
        app
    }

    /// Re-detect the track naming and format, persisting any change.
    fn refresh_track_settings(&mut self) {
        match apply_detected_track_settings(&mut self.config) {
            Ok(true) => {
                if let Err(e) = config::save_config(&self.config) {
                    tracing::warn!("Failed to save detected track settings: {}", e);
                }
            }
            Ok(false) => {}
            Err(e) => {
                tracing::warn!("Could not detect backing track settings: {}", e);
                self.error_message = Some(e.to_string());
            }
        }
    }

    fn start_session(&mut self) {
        self.practice_screen.reset_input();
        self.played = None;
        match TrainingSession::start(&self.config) {
            Ok(session) => {
                self.session = Some(session);
                if self.mode() == PracticeMode::Random {
                    self.next_random();
                }
            }
            Err(e) => {
                tracing::error!("Failed to start session: {}", e);
                self.session = None;
                self.error_message = Some(e.to_string());
            }
        }
    }

    fn mode(&self) -> PracticeMode {
        self.session
            .as_ref()
            .map(|s| s.mode())
            .unwrap_or_default()
    }

    fn next_random(&mut self) {
        let Some(session) = self.session.as_mut() else {
            return;
        };
        match session.next_random_with_reset() {
            Ok(pick) => {
                self.notice = pick.buffer_reset.then(|| t!("selection-reset"));
            }
            Err(e) => {
                tracing::error!("Failed to pick an exercise: {}", e);
                self.error_message = Some(e.to_string());
            }
        }
    }

    fn switch_mode(&mut self, mode: PracticeMode) {
        let Some(session) = self.session.as_mut() else {
            return;
        };
        session.set_mode(mode);
        self.practice_screen.reset_input();
        self.played = None;
        if mode == PracticeMode::Random && session.current().is_none() {
            self.next_random();
        }
    }

    fn track_available(&self) -> bool {
        let (Some(dir), Some(exercise)) = (
            self.config.backing_tracks_dir.as_deref(),
            self.session.as_ref().and_then(|s| s.current()),
        ) else {
            return false;
        };
        locate_backing_track(exercise, dir, self.config.naming_scheme, self.config.file_format)
            .is_some()
    }

    fn practice_view(&self) -> Option<PracticeView<'_>> {
        let session = self.session.as_ref()?;
        let (first, last) = session.range();
        let current = session.current();
        Some(PracticeView {
            mode: session.mode(),
            current,
            weight: current.and_then(|id| session.weight_of(id)),
            first,
            last,
            track_available: self.track_available(),
            track_played: current.is_some() && self.played == current,
            palette: self.theme.palette(),
            shortcuts: &self.keyboard,
        })
    }

    fn play_track(&mut self) {
        let Some(exercise) = self.session.as_ref().and_then(|s| s.current()) else {
            return;
        };
        self.played = Some(exercise);
        if let Err(e) = play_backing_track(exercise, &self.config, &self.player) {
            tracing::error!("Failed to play backing track: {}", e);
            self.error_message = Some(e.to_string());
        }
    }

    fn feedback(&mut self, feedback: Feedback) {
        let Some(session) = self.session.as_mut() else {
            return;
        };
        if session.current().is_none() {
            return;
        }
        if let Err(e) = session.record(feedback) {
            tracing::error!("Failed to record feedback: {}", e);
            self.error_message = Some(e.to_string());
            return;
        }

        self.played = None;
        self.practice_screen.reset_input();
        if self.mode() == PracticeMode::Random {
            self.next_random();
        }
    }

    fn handle(&mut self, action: PracticeAction) {
        match action {
            PracticeAction::SwitchMode(mode) => self.switch_mode(mode),
            PracticeAction::SelectManual(exercise) => {
                if let Some(session) = self.session.as_mut() {
                    if let Err(e) = session.select_manual(exercise) {
                        self.error_message = Some(e.to_string());
                    }
                }
            }
            PracticeAction::ClearManual => {
                if let Some(session) = self.session.as_mut() {
                    session.clear_current();
                }
            }
            PracticeAction::PlayTrack => {
                if self.practice_view().is_some_and(|view| view.track_enabled()) {
                    self.play_track();
                }
            }
            PracticeAction::Feedback(feedback) => {
                if self.practice_view().is_some_and(|view| view.feedback_enabled()) {
                    self.feedback(feedback);
                }
            }
        }
    }

    fn handle_shortcuts(&mut self, ctx: &egui::Context) {
        for action in self.keyboard.actions(ctx) {
            let action = match action {
                KeyAction::PlayTrack => PracticeAction::PlayTrack,
                KeyAction::Good => PracticeAction::Feedback(Feedback::Good),
                KeyAction::Bad => PracticeAction::Feedback(Feedback::Bad),
                KeyAction::RandomTab => PracticeAction::SwitchMode(PracticeMode::Random),
                KeyAction::ManualTab => PracticeAction::SwitchMode(PracticeMode::Manual),
            };
            self.handle(action);
        }
    }

    fn apply_settings(&mut self, new_config: AppConfig) {
        self.save_session();
        self.config = new_config;
        self.refresh_track_settings();
        if let Err(e) = config::save_config(&self.config) {
            tracing::error!("Failed to save configuration: {}", e);
            self.error_message = Some(e.to_string());
        }
        tracing::info!("Settings saved; restarting session");
        self.settings_screen = SettingsScreen::new(&self.config);
        self.start_session();
    }

    fn save_session(&mut self) {
        if let Some(session) = self.session.as_ref() {
            if let Err(e) = session.save() {
                tracing::error!("Failed to save exercise weights: {}", e);
                self.error_message = Some(e.to_string());
            }
        }
    }

    fn navigate(&mut self, screen: Screen) {
        tracing::debug!("Navigating to {:?}", screen);
        self.current_screen = screen;
    }

    fn toggle_theme(&mut self, ctx: &egui::Context) {
        self.theme = self.theme.toggled();
        ctx.set_visuals(self.theme.visuals());
    }
}

impl eframe::App for TrainerApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        if ctx.input(|i| i.viewport().close_requested()) {
            self.save_session();
        }

        if self.current_screen == Screen::Practice {
            self.handle_shortcuts(ctx);
        } else if ctx.input(|i| i.key_pressed(egui::Key::Escape)) {
            self.settings_screen.reset();
            self.navigate(Screen::Practice);
        }

        let palette = self.theme.palette();

        // Top panel
        egui::TopBottomPanel::top("top_panel").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.heading(t!("app-title"));

                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    if ui.button("⚙").clicked() && self.current_screen != Screen::Settings {
                        self.settings_screen = SettingsScreen::new(&self.config);
                        self.navigate(Screen::Settings);
                    }
                    if ui.button(self.theme.icon()).clicked() {
                        self.toggle_theme(ctx);
                    }
                });
            });
        });

        // Messages
        if self.error_message.is_some() || self.notice.is_some() {
            egui::TopBottomPanel::bottom("message_panel").show(ctx, |ui| {
                if let Some(error) = self.error_message.clone() {
                    ui.horizontal(|ui| {
                        ui.label(
                            egui::RichText::new(format!("{}: {}", t!("error-title"), error))
                                .color(palette.error),
                        );
                        if ui.small_button("✖").clicked() {
                            self.error_message = None;
                        }
                    });
                }
                if let Some(notice) = &self.notice {
                    ui.label(egui::RichText::new(notice).color(palette.text_secondary));
                }
            });
        }

        // Main content area
        egui::CentralPanel::default().show(ctx, |ui| match self.current_screen {
            Screen::Practice => {
                let mut screen = std::mem::take(&mut self.practice_screen);
                let action = self
                    .practice_view()
                    .and_then(|view| screen.show(ui, &view));
                self.practice_screen = screen;
                if let Some(action) = action {
                    self.handle(action);
                }
            }
            Screen::Settings => match self.settings_screen.show(ui, palette) {
                SettingsAction::Save(new_config) => {
                    self.apply_settings(new_config);
                    self.navigate(Screen::Practice);
                }
                SettingsAction::Cancel => {
                    self.settings_screen.reset();
                    self.navigate(Screen::Practice);
                }
                SettingsAction::None => {}
            },
        });
    }
}
