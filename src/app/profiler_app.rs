//! Standalone eframe application for the profiler.

use std::sync::mpsc::Receiver;

use tracing::debug;

use crate::color_scheme::PanelColors;
use crate::config::{DisplayConfig, ProfilerConfig};
use crate::data::monitor::{DisplayFrame, SurfaceMonitor};
use crate::error::CalibrationError;
use crate::serial::StopFlag;
use crate::sink::SensorMessage;

use super::layout;

/// The instrument panel.
///
/// Each frame it drains the reading channel into its [`SurfaceMonitor`],
/// renders the resulting [`DisplayFrame`] and handles the calibrate button.
/// Dropping the app raises the reader's [`StopFlag`].
pub struct ProfilerApp {
    rx: Receiver<SensorMessage>,
    monitor: SurfaceMonitor,
    display: DisplayConfig,
    colors: PanelColors,
    stop: StopFlag,
    /// Visuals are installed on the first frame, once a context exists.
    colors_applied: bool,
}

impl ProfilerApp {
    pub fn new(rx: Receiver<SensorMessage>, cfg: &ProfilerConfig, stop: StopFlag) -> Self {
        Self {
            rx,
            monitor: SurfaceMonitor::new(&cfg.detection),
            display: cfg.display.clone(),
            colors: PanelColors::default(),
            stop,
            colors_applied: false,
        }
    }

    /// Apply a message that did not come through the channel (e.g. a startup failure).
    pub fn apply(&mut self, msg: SensorMessage) {
        self.monitor.apply(msg);
    }

    /// Drain pending readings and build this tick's frame.
    pub fn tick(&mut self) -> DisplayFrame {
        self.monitor.drain(&self.rx);
        self.monitor.frame()
    }

    /// Operator calibrate action.
    pub fn calibrate(&mut self) -> Result<f64, CalibrationError> {
        self.monitor.calibrate()
    }
}

impl Drop for ProfilerApp {
    fn drop(&mut self) {
        self.stop.raise();
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// eframe integration
// ─────────────────────────────────────────────────────────────────────────────

impl eframe::App for ProfilerApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        if !self.colors_applied {
            self.colors.apply(ctx);
            self.colors_applied = true;
        }

        let frame = self.tick();
        let tone = frame.status.tone();

        egui::TopBottomPanel::bottom("profiler_status_bar").show(ctx, |ui| {
            layout::status_bar(ui, &frame, &self.colors);
        });

        let mut calibrate_clicked = false;
        let background = self.colors.background_for(tone);
        egui::CentralPanel::default()
            .frame(egui::Frame::central_panel(&ctx.style()).fill(background))
            .show(ctx, |ui| {
                calibrate_clicked = layout::readout(ui, &frame, &self.colors);
                ui.add_space(8.0);
                layout::depth_plot(ui, &frame, &self.colors, self.display.y_half_range_mm);
            });

        if calibrate_clicked {
            if let Err(err) = self.calibrate() {
                debug!("calibrate button: {err}");
            }
        }

        ctx.request_repaint_after(self.display.tick_interval());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::status::StatusLine;
    use crate::data::Reading;
    use crate::sink::channel_readings;

    #[test]
    fn tick_drains_channel_and_calibrate_uses_drained_readings() {
        let (sink, rx) = channel_readings();
        let mut app = ProfilerApp::new(rx, &ProfilerConfig::default(), StopFlag::new());

        for _ in 0..9 {
            sink.send_reading(Reading::from_mm(80.0)).unwrap();
        }
        assert_eq!(app.tick().samples.len(), 9);
        assert!(app.calibrate().is_err());
        assert_eq!(app.tick().status, StatusLine::WaitingForData);

        sink.send_reading(Reading::from_mm(80.0)).unwrap();
        app.tick();
        assert_eq!(app.calibrate(), Ok(80.0));
        assert_eq!(app.tick().reference_mm, Some(80.0));
    }

    #[test]
    fn dropping_the_app_raises_stop() {
        let (_sink, rx) = channel_readings();
        let stop = StopFlag::new();
        let app = ProfilerApp::new(rx, &ProfilerConfig::default(), stop.clone());
        assert!(!stop.is_raised());
        drop(app);
        assert!(stop.is_raised());
    }
}
