mod app;
mod cli;
mod color;
mod data;
mod state;
mod ui;

use app::DashboardApp;
use clap::Parser;
use eframe::egui;
use state::AppState;

fn main() -> eframe::Result {
    env_logger::init();

    let args = cli::Args::parse();
    log::debug!("{args:?}");

    let mut state = AppState {
        site: args.site_filter(),
        slider_step: args.slider_step,
        ..Default::default()
    };
    app::load_into(&mut state, &args.data);

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1200.0, 900.0])
            .with_min_inner_size([700.0, 500.0]),
        ..Default::default()
    };

    eframe::run_native(
        "SpaceX Launch Records Dashboard",
        options,
        Box::new(|_cc| Ok(Box::new(DashboardApp::new(state)))),
    )
}
