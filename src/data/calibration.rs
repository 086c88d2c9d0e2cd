//! Reference ("zero") surface level.

use tracing::{debug, info};

use crate::error::CalibrationError;

use super::buffer::SampleBuffer;
use super::Reading;

/// Calibration state: unset at startup, set by [`calibrate`](Self::calibrate).
/// Once set, the reference is only ever replaced, never cleared.
#[derive(Debug, Clone, PartialEq)]
pub struct Calibration {
    window: usize,
    reference: Option<f64>,
}

impl Calibration {
    /// Creates an uncalibrated state that averages `window` readings.
    pub fn new(window: usize) -> Self {
        Self {
            window: window.max(1),
            reference: None,
        }
    }

    /// Number of trailing readings averaged by [`calibrate`](Self::calibrate).
    pub fn window(&self) -> usize {
        self.window
    }

    pub fn is_calibrated(&self) -> bool {
        self.reference.is_some()
    }

    /// Reference level in millimeters, if calibrated.
    pub fn reference(&self) -> Option<f64> {
        self.reference
    }

    /// Set the reference to the mean of the last `window` buffered readings.
    ///
    /// On [`CalibrationError::InsufficientData`] the previous state is kept.
    pub fn calibrate(&mut self, buffer: &SampleBuffer) -> Result<f64, CalibrationError> {
        let recent = buffer.recent(self.window).ok_or_else(|| {
            debug!(
                required = self.window,
                available = buffer.len(),
                "calibration refused"
            );
            CalibrationError::InsufficientData {
                required: self.window,
                available: buffer.len(),
            }
        })?;
        let reference = mean(&recent);
        self.reference = Some(reference);
        info!("calibrated at {reference:.3} mm");
        Ok(reference)
    }
}

fn mean(readings: &[Reading]) -> f64 {
    let sum: f64 = readings.iter().map(|r| r.mm()).sum();
    sum / readings.len() as f64
}
