use neuroscan::app::NeuroScanApp;
use neuroscan::config::AppConfig;
use neuroscan::error::{AppError, Result};
use neuroscan::logging;
use tracing::info;

fn main() -> Result<()> {
    logging::init();

    let config = AppConfig::load()?;
    info!(?config, "configuration loaded");

    // Timer tasks live here; the UI keeps the main thread.
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .worker_threads(1)
        .thread_name("neuroscan-timers")
        .enable_all()
        .build()
        .map_err(AppError::Runtime)?;
    let handle = runtime.handle().clone();

    let options = eframe::NativeOptions {
        viewport: eframe::egui::ViewportBuilder::default()
            .with_inner_size([config.ui.window_width, config.ui.window_height])
            .with_min_inner_size([720.0, 560.0]),
        ..Default::default()
    };

    eframe::run_native(
        "NeuroScan",
        options,
        Box::new(move |cc| Box::new(NeuroScanApp::new(cc, config, handle))),
    )
    .map_err(|e| AppError::Ui(e.to_string()))?;

    info!("NeuroScan closed");
    Ok(())
}
