//! Widgets of the instrument panel.
//!
//! * **[`readout`]** – title, large value, status line and the calibrate button.
//! * **[`depth_plot`]** – rolling chart of the buffer with the reference line
//!   and tolerance band.
//! * **[`status_bar`]** – connection state and calibration details.

use egui::RichText;
use egui_phosphor::regular::{CROSSHAIR, PLUG, WARNING};
use egui_plot::{HLine, Line, LineStyle, Plot, PlotPoints};

use crate::color_scheme::PanelColors;
use crate::data::monitor::DisplayFrame;

/// Draw the readout block. Returns `true` when the calibrate button was clicked.
pub(super) fn readout(ui: &mut egui::Ui, frame: &DisplayFrame, colors: &PanelColors) -> bool {
    let tone = frame.status.tone();
    ui.vertical_centered(|ui| {
        ui.label(
            RichText::new("SURFACE DEPTH (mm)")
                .size(18.0)
                .strong()
                .color(colors.text),
        );

        let value = frame
            .latest
            .map(|r| r.to_string())
            .unwrap_or_else(|| "--".to_string());
        ui.label(
            RichText::new(value)
                .size(80.0)
                .strong()
                .color(colors.value_for(tone)),
        );

        if let Some(d) = frame.defect_deviation() {
            ui.label(
                RichText::new(format!("Δ {d:+.1} mm"))
                    .size(20.0)
                    .color(colors.status_for(tone)),
            );
        }

        ui.label(
            RichText::new(frame.status.to_string())
                .size(24.0)
                .strong()
                .color(colors.status_for(tone)),
        );
        ui.add_space(6.0);

        let button = egui::Button::new(
            RichText::new(format!("{CROSSHAIR} CALIBRATE (ZERO)"))
                .size(16.0)
                .strong(),
        )
        .min_size(egui::vec2(240.0, 36.0));
        ui.add(button)
            .on_hover_cursor(egui::CursorIcon::PointingHand)
            .on_hover_text("Use the mean of the latest readings as the zero surface level")
            .clicked()
    })
    .inner
}

/// Draw the rolling depth chart.
///
/// Once calibrated the y-axis is pinned to `reference ± y_half_range_mm`;
/// before that it follows the data.
pub(super) fn depth_plot(
    ui: &mut egui::Ui,
    frame: &DisplayFrame,
    colors: &PanelColors,
    y_half_range_mm: f64,
) {
    let plot = Plot::new("surface_depth_plot")
        .allow_scroll(false)
        .allow_zoom(false)
        .allow_drag(false)
        .allow_boxed_zoom(false)
        .x_axis_label("sample")
        .y_axis_label("mm");

    plot.show(ui, |plot_ui| {
        if !frame.samples.is_empty() {
            let points = PlotPoints::from(frame.samples.clone());
            plot_ui.line(Line::new("depth", points).color(colors.accent).width(3.0));
        }

        if let Some(z) = frame.reference_mm {
            plot_ui.hline(
                HLine::new("reference", z)
                    .color(colors.reference_line)
                    .width(2.0)
                    .style(LineStyle::dashed_loose()),
            );
            for edge in [z + frame.tolerance_mm, z - frame.tolerance_mm] {
                plot_ui.hline(
                    HLine::new("tolerance", edge)
                        .color(colors.tolerance_line)
                        .width(1.0)
                        .style(LineStyle::dotted_dense()),
                );
            }
            plot_ui.set_plot_bounds_y(z - y_half_range_mm..=z + y_half_range_mm);
        }
    });
}

/// Draw the bottom status bar.
pub(super) fn status_bar(ui: &mut egui::Ui, frame: &DisplayFrame, colors: &PanelColors) {
    ui.horizontal(|ui| {
        if let Some(err) = &frame.transport_error {
            ui.colored_label(colors.hole, format!("{WARNING} {err}"));
        } else if let Some(port) = &frame.port {
            ui.label(format!("{PLUG} {port}"));
        } else {
            ui.label("Connecting…");
        }

        ui.separator();
        match (frame.reference_mm, frame.calibrated_at) {
            (Some(z), Some(at)) => {
                ui.label(format!("Reference {z:.1} mm (set {})", at.format("%H:%M:%S")));
            }
            (Some(z), None) => {
                ui.label(format!("Reference {z:.1} mm"));
            }
            _ => {
                ui.label("Reference not set");
            }
        }

        ui.separator();
        ui.label(format!("Tolerance ±{:.1} mm", frame.tolerance_mm));

        ui.separator();
        ui.label(format!("{} samples", frame.samples.len()));
    });
}
