#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")] // hide console window on Windows in release

use clap::Parser;

use candle_view::{Cli, run_app, ui::UI_TEXT};

fn main() -> eframe::Result {
    std::panic::set_hook(Box::new(|panic_info| {
        eprintln!("Application panicked: {:?}", panic_info);
    }));
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    let args = Cli::parse();
    #[cfg(debug_assertions)]
    log::info!("Parsed arguments: {:?}", args);

    let settings = args.settings();
    eframe::run_native(
        UI_TEXT.window_title,
        eframe::NativeOptions::default(),
        Box::new(move |cc| Ok(run_app(cc, settings))),
    )
}
