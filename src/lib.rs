//! Defectoscope crate root: re-exports and module wiring.
//!
//! An instrument panel for an ultrasonic distance sensor on a serial link. It
//! shows the live distance, lets the operator zero the panel on a reference
//! surface, and flags holes and bumps beyond a fixed tolerance.
//!
//! Modules:
//! - `data`: readings, parser, rolling buffer, calibration, classifier, monitor
//! - `sink`: channel carrying readings from the reader thread to the panel
//! - `serial`: line sources and the background reader thread
//! - `config`: startup configuration
//! - `color_scheme`: panel colors
//! - `app`: the egui/eframe window and run helpers

pub mod app;
pub mod color_scheme;
pub mod config;
pub mod data;
pub mod error;
pub mod serial;
pub mod sink;

// Public re-exports for a compact external API
pub use app::{run_profiler, run_profiler_with_source, ProfilerApp};
pub use config::{DetectionConfig, DisplayConfig, ProfilerConfig, SerialConfig, CM_TO_MM};
pub use data::buffer::SampleBuffer;
pub use data::calibration::Calibration;
pub use data::classifier::{Classification, DefectClassifier};
pub use data::monitor::{DisplayFrame, SurfaceMonitor};
pub use data::parser::{parse_line, LineParser};
pub use data::status::{StatusLine, StatusTone};
pub use data::Reading;
pub use error::{CalibrationError, ConfigError, ProfilerError};
pub use serial::{open_serial, spawn_reader, BufLineSource, LineRead, LineSource, StopFlag};
pub use sink::{channel_readings, ReadingSink, SensorMessage};
