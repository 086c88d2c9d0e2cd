//! Startup configuration for the profiler.
//!
//! A single [`ProfilerConfig`] is built once (defaults, optionally overlaid by a
//! JSON file and command line overrides), validated, and then handed by
//! reference to every component constructor. Nothing here changes while the
//! panel is running.

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Arduino sketches report distance in centimeters; the panel works in millimeters.
pub const CM_TO_MM: f64 = 10.0;

// ─────────────────────────────────────────────────────────────────────────────
// Serial link
// ─────────────────────────────────────────────────────────────────────────────

/// Serial transport settings.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SerialConfig {
    /// Port identifier, e.g. `COM9` or `/dev/ttyACM0`.
    pub port: String,
    /// Baud rate. Must match the sensor firmware.
    pub baud_rate: u32,
    /// Upper bound on a single blocking read, so the reader can notice shutdown.
    pub read_timeout_ms: u64,
}

impl SerialConfig {
    pub fn read_timeout(&self) -> Duration {
        Duration::from_millis(self.read_timeout_ms)
    }
}

impl Default for SerialConfig {
    fn default() -> Self {
        let port = if cfg!(windows) { "COM9" } else { "/dev/ttyACM0" };
        Self {
            port: port.to_string(),
            baud_rate: 115_200,
            read_timeout_ms: 1_000,
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Detection
// ─────────────────────────────────────────────────────────────────────────────

/// Buffer, calibration and classification constants.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DetectionConfig {
    /// Number of readings kept in the rolling window. Default: `300`.
    pub buffer_capacity: usize,
    /// Number of trailing readings averaged into the reference level. Default: `10`.
    pub calibration_samples: usize,
    /// Deviation (mm) beyond which a reading is a defect. Default: `5.0`.
    pub tolerance_mm: f64,
}

impl Default for DetectionConfig {
    fn default() -> Self {
        Self {
            buffer_capacity: 300,
            calibration_samples: 10,
            tolerance_mm: 5.0,
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Display
// ─────────────────────────────────────────────────────────────────────────────

/// Window and chart settings.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    /// Native window title.
    pub title: String,
    /// Inner window size in logical points.
    pub window_size: [f32; 2],
    /// Interval between UI refreshes.
    pub tick_interval_ms: u64,
    /// Once calibrated, the chart shows `reference ± y_half_range_mm`.
    pub y_half_range_mm: f64,
}

impl DisplayConfig {
    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms)
    }
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            title: "Ultrasonic Surface Profiler (Defectoscope)".to_string(),
            window_size: [800.0, 600.0],
            tick_interval_ms: 50,
            y_half_range_mm: 50.0,
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// ProfilerConfig
// ─────────────────────────────────────────────────────────────────────────────

/// Top-level configuration.
///
/// | Field       | Purpose |
/// |-------------|---------|
/// | `serial`    | Port, baud rate and read timeout |
/// | `detection` | Buffer size, calibration window, tolerance |
/// | `display`   | Window title/size, refresh interval, chart range |
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProfilerConfig {
    pub serial: SerialConfig,
    pub detection: DetectionConfig,
    pub display: DisplayConfig,
}

impl ProfilerConfig {
    /// Load a configuration file. Missing fields fall back to their defaults.
    ///
    /// The result is not validated; call [`validate`](Self::validate) after
    /// applying any overrides.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Parse a configuration from JSON text.
    pub fn from_json(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }

    /// Check the invariants the rest of the crate relies on.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let d = &self.detection;
        if self.serial.port.trim().is_empty() {
            return Err(ConfigError::invalid("serial port must not be empty"));
        }
        if self.serial.baud_rate == 0 {
            return Err(ConfigError::invalid("baud rate must be greater than 0"));
        }
        if self.serial.read_timeout_ms == 0 {
            return Err(ConfigError::invalid("read timeout must be greater than 0"));
        }
        if d.calibration_samples == 0 {
            return Err(ConfigError::invalid(
                "calibration_samples must be greater than 0",
            ));
        }
        if d.buffer_capacity < d.calibration_samples {
            return Err(ConfigError::invalid(format!(
                "buffer_capacity ({}) must hold at least calibration_samples ({})",
                d.buffer_capacity, d.calibration_samples
            )));
        }
        if !d.tolerance_mm.is_finite() || d.tolerance_mm < 0.0 {
            return Err(ConfigError::invalid(format!(
                "tolerance_mm must be a non-negative number (got {})",
                d.tolerance_mm
            )));
        }
        if self.display.tick_interval_ms == 0 {
            return Err(ConfigError::invalid("tick interval must be greater than 0"));
        }
        if !self.display.y_half_range_mm.is_finite() || self.display.y_half_range_mm <= 0.0 {
            return Err(ConfigError::invalid("y_half_range_mm must be positive"));
        }
        Ok(())
    }
}
