mod app;
mod cli;
mod color;
mod state;
mod ui;

use app::ExplorerApp;
use clap::Parser;
use eframe::egui;

use crate::cli::Args;
use crate::state::AppState;

fn main() -> eframe::Result {
    env_logger::init();
    let args = Args::parse();

    let mut state = AppState::with_filters(args.initial_filters());
    state.load(&args.data_file);

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1200.0, 800.0])
            .with_min_inner_size([600.0, 400.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Exhibition Explorer",
        options,
        Box::new(|_cc| Ok(Box::new(ExplorerApp::new(state)))),
    )
}
