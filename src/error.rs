//! Error types for the profiler.
//!
//! Malformed sensor lines are not errors: the parser simply yields no reading
//! for them. Everything that can actually fail is listed here.

use std::path::PathBuf;

use thiserror::Error;

/// Failures of the serial ingestion path.
#[derive(Debug, Error)]
pub enum ProfilerError {
    /// The serial port could not be opened.
    #[error("cannot open serial port {port}: {source}")]
    Open {
        /// Port identifier that was requested.
        port: String,
        /// Underlying serialport error.
        #[source]
        source: serialport::Error,
    },

    /// Reading from an already opened transport failed.
    #[error("serial read failed: {0}")]
    Read(#[from] std::io::Error),
}

impl ProfilerError {
    /// Creates an open error for the given port.
    #[must_use]
    pub fn open(port: impl Into<String>, source: serialport::Error) -> Self {
        Self::Open {
            port: port.into(),
            source,
        }
    }
}

/// Operator-triggered calibration failures. Never fatal.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CalibrationError {
    /// Fewer readings are buffered than the calibration window needs.
    #[error("insufficient data: need {required} readings, have {available}")]
    InsufficientData {
        /// Size of the calibration window.
        required: usize,
        /// Readings currently buffered.
        available: usize,
    },
}

/// Problems loading or validating [`ProfilerConfig`](crate::config::ProfilerConfig).
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The configuration file could not be read.
    #[error("cannot read config file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The configuration file is not valid JSON for the config schema.
    #[error("invalid config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// A value is out of its allowed range.
    #[error("invalid configuration: {0}")]
    Invalid(String),
}

impl ConfigError {
    /// Creates a validation error.
    #[must_use]
    pub fn invalid(reason: impl Into<String>) -> Self {
        Self::Invalid(reason.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insufficient_data_message_names_both_counts() {
        let err = CalibrationError::InsufficientData {
            required: 10,
            available: 4,
        };
        let msg = err.to_string();
        assert!(msg.contains("need 10"));
        assert!(msg.contains("have 4"));
    }

    #[test]
    fn io_error_converts_into_read_error() {
        let io = std::io::Error::new(std::io::ErrorKind::BrokenPipe, "unplugged");
        let err: ProfilerError = io.into();
        assert!(matches!(err, ProfilerError::Read(_)));
        assert!(err.to_string().contains("unplugged"));
    }
}
