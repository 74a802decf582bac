mod app;
mod color;
mod config;
mod data;
mod state;
mod ui;

use std::path::Path;

use app::SurveyDashApp;
use config::DashboardConfig;
use eframe::egui;

fn main() -> eframe::Result {
    env_logger::init();

    let config = DashboardConfig::load(Path::new(DashboardConfig::FILE_NAME));

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1200.0, 800.0])
            .with_min_inner_size([600.0, 400.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Surveydash – Survey Explorer",
        options,
        Box::new(|_cc| Ok(Box::new(SurveyDashApp::new(config)))),
    )
}
