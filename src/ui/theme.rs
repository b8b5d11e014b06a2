//! UI theme definitions.

use egui::{Color32, Visuals};

/// Theme configuration for the application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Theme {
    #[default]
    Dark,
    Light,
}

impl Theme {
    /// Get the egui Visuals for this theme.
    pub fn visuals(&self) -> Visuals {
        let palette = self.palette();
        let mut visuals = match self {
            Theme::Dark => Visuals::dark(),
            Theme::Light => Visuals::light(),
        };

        visuals.window_fill = palette.panel;
        visuals.panel_fill = palette.panel;
        visuals.faint_bg_color = palette.card;
        visuals.extreme_bg_color = palette.background;

        visuals.widgets.noninteractive.bg_fill = palette.card;
        visuals.widgets.inactive.bg_fill = palette.card;
        visuals.widgets.active.bg_fill = palette.accent;
        visuals.selection.bg_fill = palette.accent.linear_multiply(0.3);
        visuals.selection.stroke.color = palette.accent;

        visuals.widgets.noninteractive.fg_stroke.color = palette.text;
        visuals.widgets.inactive.fg_stroke.color = palette.text_secondary;
        visuals.widgets.noninteractive.bg_stroke.color = palette.border;
        visuals.widgets.inactive.bg_stroke.color = palette.border;

        visuals
    }

    /// Colors for this theme.
    pub fn palette(&self) -> &'static Palette {
        match self {
            Theme::Dark => &DARK,
            Theme::Light => &LIGHT,
        }
    }

    /// The other theme.
    pub fn toggled(&self) -> Theme {
        match self {
            Theme::Dark => Theme::Light,
            Theme::Light => Theme::Dark,
        }
    }

    /// Icon for the toggle button.
    pub fn icon(&self) -> &'static str {
        match self {
            Theme::Dark => "🌙",
            Theme::Light => "☀",
        }
    }
}

/// Named colors used by the screens.
#[derive(Debug, Clone, Copy)]
pub struct Palette {
    pub background: Color32,
    pub panel: Color32,
    pub card: Color32,
    pub text: Color32,
    pub text_secondary: Color32,
    pub accent: Color32,
    /// Good feedback button
    pub good: Color32,
    /// Bad feedback button
    pub bad: Color32,
    pub error: Color32,
    pub border: Color32,
}

const DARK: Palette = Palette {
    background: Color32::from_rgb(18, 18, 24),
    panel: Color32::from_rgb(28, 28, 36),
    card: Color32::from_rgb(38, 38, 48),
    text: Color32::from_rgb(240, 240, 245),
    text_secondary: Color32::from_rgb(160, 160, 170),
    accent: Color32::from_rgb(66, 133, 244),
    good: Color32::from_rgb(52, 168, 83),
    bad: Color32::from_rgb(234, 67, 53),
    error: Color32::from_rgb(251, 188, 4),
    border: Color32::from_rgb(60, 60, 70),
};

const LIGHT: Palette = Palette {
    background: Color32::from_rgb(250, 250, 252),
    panel: Color32::from_rgb(255, 255, 255),
    card: Color32::from_rgb(245, 245, 248),
    text: Color32::from_rgb(32, 32, 40),
    text_secondary: Color32::from_rgb(96, 96, 104),
    accent: Color32::from_rgb(26, 115, 232),
    good: Color32::from_rgb(24, 128, 56),
    bad: Color32::from_rgb(200, 50, 40),
    error: Color32::from_rgb(200, 50, 40),
    border: Color32::from_rgb(218, 218, 224),
};
