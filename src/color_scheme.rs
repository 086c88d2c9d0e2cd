//! Colors of the instrument panel.
//!
//! The panel uses one dark theme. Window background and the large value change
//! color with the status so a defect is visible from across the bench.

use egui::{Color32, Context, Visuals};

use crate::data::status::StatusTone;

/// Palette for the panel chrome, the status feedback and the chart.
#[derive(Clone, Debug, PartialEq)]
pub struct PanelColors {
    /// Window background while the surface is normal or uncalibrated.
    pub background: Color32,
    /// Window background while a hole is detected.
    pub hole_background: Color32,
    /// Window background while a bump is detected.
    pub bump_background: Color32,
    /// Chart background.
    pub plot_background: Color32,
    /// Accent used for the value, the OK status and the depth curve.
    pub accent: Color32,
    /// Value color during a hole.
    pub hole: Color32,
    /// Value color during a bump, and status color while uncalibrated.
    pub attention: Color32,
    /// Dashed reference line.
    pub reference_line: Color32,
    /// Tolerance band edges.
    pub tolerance_line: Color32,
    /// Buttons.
    pub button: Color32,
    pub button_hovered: Color32,
    pub button_pressed: Color32,
    pub text: Color32,
}

impl Default for PanelColors {
    fn default() -> Self {
        Self {
            background: Color32::from_rgb(0x2b, 0x2b, 0x2b),
            hole_background: Color32::from_rgb(0x80, 0x00, 0x00),
            bump_background: Color32::from_rgb(0x80, 0x40, 0x00),
            plot_background: Color32::from_rgb(0x1e, 0x1e, 0x1e),
            accent: Color32::from_rgb(0x00, 0xff, 0xcc),
            hole: Color32::RED,
            attention: Color32::from_rgb(0xff, 0xa5, 0x00),
            reference_line: Color32::YELLOW,
            tolerance_line: Color32::from_rgba_unmultiplied(0xff, 0xff, 0x00, 0x60),
            button: Color32::from_rgb(0x44, 0x44, 0x44),
            button_hovered: Color32::from_rgb(0x66, 0x66, 0x66),
            button_pressed: Color32::from_rgb(0x88, 0x88, 0x88),
            text: Color32::WHITE,
        }
    }
}

impl PanelColors {
    /// Install the dark visuals on the egui context.
    pub fn apply(&self, ctx: &Context) {
        let mut v = Visuals::dark();
        v.panel_fill = self.background;
        v.window_fill = self.background;
        v.extreme_bg_color = self.plot_background;
        v.faint_bg_color = self.plot_background;
        v.override_text_color = Some(self.text);
        v.widgets.inactive.bg_fill = self.button;
        v.widgets.inactive.weak_bg_fill = self.button;
        v.widgets.hovered.bg_fill = self.button_hovered;
        v.widgets.hovered.weak_bg_fill = self.button_hovered;
        v.widgets.active.bg_fill = self.button_pressed;
        v.widgets.active.weak_bg_fill = self.button_pressed;
        ctx.set_visuals(v);
    }

    pub fn background_for(&self, tone: StatusTone) -> Color32 {
        match tone {
            StatusTone::Hole => self.hole_background,
            StatusTone::Bump => self.bump_background,
            StatusTone::Attention | StatusTone::Ok => self.background,
        }
    }

    /// Color of the large value readout.
    pub fn value_for(&self, tone: StatusTone) -> Color32 {
        match tone {
            StatusTone::Hole => self.hole,
            StatusTone::Bump => self.attention,
            StatusTone::Attention | StatusTone::Ok => self.accent,
        }
    }

    /// Color of the status label.
    pub fn status_for(&self, tone: StatusTone) -> Color32 {
        match tone {
            StatusTone::Attention => self.attention,
            StatusTone::Ok | StatusTone::Hole | StatusTone::Bump => self.accent,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defects_change_background() {
        let c = PanelColors::default();
        assert_eq!(c.background_for(StatusTone::Ok), c.background);
        assert_eq!(c.background_for(StatusTone::Hole), c.hole_background);
        assert_eq!(c.background_for(StatusTone::Bump), c.bump_background);
    }

    #[test]
    fn apply_installs_dark_panel_visuals() {
        let c = PanelColors::default();
        let ctx = egui::Context::default();
        c.apply(&ctx);
        let style = ctx.style();
        assert!(style.visuals.dark_mode);
        assert_eq!(style.visuals.panel_fill, c.background);
        assert_eq!(style.visuals.override_text_color, Some(c.text));
    }

    #[test]
    fn uncalibrated_status_uses_attention_color() {
        let c = PanelColors::default();
        assert_eq!(c.status_for(StatusTone::Attention), c.attention);
        assert_eq!(c.value_for(StatusTone::Attention), c.accent);
    }
}
