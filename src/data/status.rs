//! Operator-facing status line.

use super::classifier::Classification;

/// What the status label currently says.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub enum StatusLine {
    #[default]
    NotCalibrated,
    /// A calibration request was refused for lack of readings.
    WaitingForData,
    /// Calibration just succeeded; replaced by the next classified reading.
    Calibrated,
    Normal,
    Hole { deviation_mm: f64 },
    Bump { deviation_mm: f64 },
}

/// Visual weight of a status, mapped to colors by the theme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StatusTone {
    Attention,
    Ok,
    Hole,
    Bump,
}

impl StatusLine {
    /// Status for a classified reading. `Uncalibrated` leaves `current` untouched.
    pub fn after_reading(
        current: StatusLine,
        classification: Classification,
        deviation_mm: Option<f64>,
    ) -> StatusLine {
        let d = deviation_mm.unwrap_or(0.0);
        match classification {
            Classification::Uncalibrated => current,
            Classification::Normal => StatusLine::Normal,
            Classification::Hole => StatusLine::Hole { deviation_mm: d },
            Classification::Bump => StatusLine::Bump { deviation_mm: d },
        }
    }

    pub fn text(&self) -> String {
        match self {
            StatusLine::NotCalibrated => "NOT CALIBRATED".to_string(),
            StatusLine::WaitingForData => "WAITING FOR DATA...".to_string(),
            StatusLine::Calibrated => "CALIBRATED - READY TO SCAN".to_string(),
            StatusLine::Normal => "SURFACE NORMAL".to_string(),
            StatusLine::Hole { deviation_mm } => {
                format!("⚠ HOLE DETECTED (+{deviation_mm:.1}mm)")
            }
            StatusLine::Bump { deviation_mm } => {
                format!("⚠ BUMP DETECTED ({deviation_mm:.1}mm)")
            }
        }
    }

    pub fn tone(&self) -> StatusTone {
        match self {
            StatusLine::NotCalibrated | StatusLine::WaitingForData => StatusTone::Attention,
            StatusLine::Calibrated | StatusLine::Normal => StatusTone::Ok,
            StatusLine::Hole { .. } => StatusTone::Hole,
            StatusLine::Bump { .. } => StatusTone::Bump,
        }
    }
}

impl std::fmt::Display for StatusLine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.text())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defect_texts_carry_signed_deviation() {
        let hole = StatusLine::Hole { deviation_mm: 6.04 };
        assert_eq!(hole.text(), "⚠ HOLE DETECTED (+6.0mm)");
        let bump = StatusLine::Bump {
            deviation_mm: -7.34,
        };
        assert_eq!(bump.text(), "⚠ BUMP DETECTED (-7.3mm)");
    }

    #[test]
    fn uncalibrated_reading_keeps_waiting_message() {
        let next = StatusLine::after_reading(
            StatusLine::WaitingForData,
            Classification::Uncalibrated,
            None,
        );
        assert_eq!(next, StatusLine::WaitingForData);
    }

    #[test]
    fn panel_starts_not_calibrated_and_displays_its_text() {
        let status = StatusLine::default();
        assert_eq!(status, StatusLine::NotCalibrated);
        assert_eq!(status.to_string(), "NOT CALIBRATED");
        assert_eq!(
            StatusLine::Hole { deviation_mm: 6.0 }.to_string(),
            "⚠ HOLE DETECTED (+6.0mm)"
        );
    }

    #[test]
    fn tones() {
        assert_eq!(StatusLine::NotCalibrated.tone(), StatusTone::Attention);
        assert_eq!(StatusLine::Calibrated.tone(), StatusTone::Ok);
        assert_eq!(
            StatusLine::Bump { deviation_mm: -9.0 }.tone(),
            StatusTone::Bump
        );
    }
}
