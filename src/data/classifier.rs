//! Per-reading defect classification against the reference level.

use serde::{Deserialize, Serialize};

use super::calibration::Calibration;
use super::Reading;

/// Outcome of comparing one reading to the reference level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Classification {
    /// No reference level has been set yet.
    Uncalibrated,
    /// Within tolerance of the reference.
    Normal,
    /// Surface farther away than the reference: material missing or recessed.
    Hole,
    /// Surface closer than the reference: obstruction or protrusion.
    Bump,
}

impl Classification {
    pub fn is_defect(self) -> bool {
        matches!(self, Classification::Hole | Classification::Bump)
    }

    pub fn label(self) -> &'static str {
        match self {
            Classification::Uncalibrated => "UNCALIBRATED",
            Classification::Normal => "NORMAL",
            Classification::Hole => "HOLE",
            Classification::Bump => "BUMP",
        }
    }
}

impl std::fmt::Display for Classification {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Fixed-tolerance classifier. Stateless: every reading is judged on its own.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DefectClassifier {
    tolerance_mm: f64,
}

impl DefectClassifier {
    pub fn new(tolerance_mm: f64) -> Self {
        Self { tolerance_mm }
    }

    pub fn tolerance_mm(&self) -> f64 {
        self.tolerance_mm
    }

    /// Signed distance from the reference (`reading - reference`), if calibrated.
    pub fn deviation(&self, reading: Reading, calibration: &Calibration) -> Option<f64> {
        calibration.reference().map(|z| reading.mm() - z)
    }

    /// Classify a reading. A deviation of exactly `±tolerance` is still normal.
    pub fn classify(&self, reading: Reading, calibration: &Calibration) -> Classification {
        match self.deviation(reading, calibration) {
            None => Classification::Uncalibrated,
            Some(diff) => self.classify_deviation(diff),
        }
    }

    /// Classify an already computed deviation.
    pub fn classify_deviation(&self, diff: f64) -> Classification {
        if diff > self.tolerance_mm {
            Classification::Hole
        } else if diff < -self.tolerance_mm {
            Classification::Bump
        } else {
            Classification::Normal
        }
    }
}
