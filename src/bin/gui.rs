// src/bin/gui.rs
#![cfg_attr(target_os = "windows", windows_subsystem = "windows")]
use clap::Parser;
use eframe::egui::ViewportBuilder;
use seoul_market::{ cli::GuiArgs, config::state::AppState, gui, log };

fn main() {
    log::init();

    let args = GuiArgs::parse();
    let state = AppState::default().with_data_dir(&args.data_dir);
    let options = eframe::NativeOptions {
        viewport: ViewportBuilder::default()
            .with_title("Seoul local commercial districts")
            .with_inner_size([state.gui.window_w as f32, state.gui.window_h as f32]),
        ..Default::default()
    };

    if let Err(e) = gui::run(options, state) {
        eprintln!("GUI failed: {}", e);
        std::process::exit(1);
    }
}
