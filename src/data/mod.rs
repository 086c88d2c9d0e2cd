//! Measurement core: parsing, buffering, calibration and defect classification.
//!
//! Everything in this module is free of I/O and GUI types so it can be driven
//! directly from tests.

pub mod buffer;
pub mod calibration;
pub mod classifier;
pub mod monitor;
pub mod parser;
pub mod status;

/// One parsed, unit-converted distance sample in millimeters.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct Reading(f64);

impl Reading {
    pub const fn from_mm(mm: f64) -> Self {
        Self(mm)
    }

    pub const fn mm(self) -> f64 {
        self.0
    }
}

impl From<f64> for Reading {
    fn from(mm: f64) -> Self {
        Self(mm)
    }
}

impl std::fmt::Display for Reading {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.1}", self.0)
    }
}
