//! Top-level entry points for running the profiler as a native window.

use tracing::{error, info};

use crate::config::ProfilerConfig;
use crate::data::parser::LineParser;
use crate::error::ProfilerError;
use crate::serial::{open_serial, spawn_reader, LineSource, StopFlag};
use crate::sink::{channel_readings, SensorMessage};

use super::ProfilerApp;

/// Launch the panel against the configured serial port.
///
/// Blocks until the window is closed. `cfg` is expected to be validated.
pub fn run_profiler(cfg: ProfilerConfig) -> eframe::Result<()> {
    let serial = cfg.serial.clone();
    run_profiler_with_source(cfg, move || open_serial(&serial))
}

/// Launch the panel with a custom line source (simulators, recorded streams).
///
/// 1. Spawns the reader thread, which calls `open` and starts streaming.
/// 2. Opens the native window and runs the eframe event loop.
/// 3. After the window closes, raises the stop flag and waits for the reader
///    to finish its current read.
pub fn run_profiler_with_source<S, F>(cfg: ProfilerConfig, open: F) -> eframe::Result<()>
where
    S: LineSource + 'static,
    F: FnOnce() -> Result<S, ProfilerError> + Send + 'static,
{
    let (sink, rx) = channel_readings();
    let stop = StopFlag::new();
    let parser = LineParser::default();

    let mut app = ProfilerApp::new(rx, &cfg, stop.clone());
    let reader = match spawn_reader(open, parser, sink, stop.clone()) {
        Ok(handle) => Some(handle),
        Err(e) => {
            error!("cannot start reader thread: {e}");
            app.apply(SensorMessage::TransportError(format!(
                "cannot start reader thread: {e}"
            )));
            None
        }
    };

    let opts = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size(cfg.display.window_size)
            .with_min_inner_size([480.0, 400.0]),
        ..Default::default()
    };

    let result = eframe::run_native(
        &cfg.display.title,
        opts,
        Box::new(|cc| {
            // Install Phosphor icon font before creating the app.
            let mut fonts = egui::FontDefinitions::default();
            egui_phosphor::add_to_fonts(&mut fonts, egui_phosphor::Variant::Regular);
            cc.egui_ctx.set_fonts(fonts);
            Ok(Box::new(app))
        }),
    );

    stop.raise();
    if let Some(handle) = reader {
        if handle.join().is_err() {
            error!("reader thread panicked");
        }
    }
    info!("profiler closed");
    result
}
