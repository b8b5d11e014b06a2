//! Rhythm Trainer - weighted practice drill scheduler
//!
//! Main entry point for the windowed application.

use eframe::egui;

mod app;

fn main() -> eframe::Result<()> {
    rhythm_trainer::logging::init(std::io::stdout);

    tracing::info!("Starting Rhythm Trainer v{}", env!("CARGO_PKG_VERSION"));

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([420.0, 480.0])
            .with_min_inner_size([350.0, 425.0])
            .with_title("Rhythm Trainer"),
        ..Default::default()
    };

    eframe::run_native(
        "Rhythm Trainer",
        options,
        Box::new(|cc| Ok(Box::new(app::TrainerApp::new(cc)))),
    )
}
