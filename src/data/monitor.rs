//! Foreground owner of the sample buffer and calibration state.
//!
//! [`SurfaceMonitor`] is the only writer of the buffer and the calibration.
//! The reader thread never touches either: it hands readings over through the
//! channel in [`crate::sink`], and the panel applies them here, in order, on
//! its own thread. That makes `calibrate` (read the window, then set the
//! reference) atomic with respect to incoming readings without any locking.

use std::sync::mpsc::Receiver;

use chrono::{DateTime, Local};
use tracing::{error, info, warn};

use crate::config::DetectionConfig;
use crate::error::CalibrationError;
use crate::sink::SensorMessage;

use super::buffer::SampleBuffer;
use super::calibration::Calibration;
use super::classifier::{Classification, DefectClassifier};
use super::status::StatusLine;
use super::Reading;

/// Everything the display needs for one tick.
#[derive(Debug, Clone, PartialEq)]
pub struct DisplayFrame {
    /// Latest reading, or `None` before the first one arrives.
    pub latest: Option<Reading>,
    /// Classification of the latest reading.
    pub classification: Classification,
    /// `latest - reference`, when both exist.
    pub deviation_mm: Option<f64>,
    /// Reference level, when calibrated.
    pub reference_mm: Option<f64>,
    /// Classifier tolerance, for drawing the band around the reference.
    pub tolerance_mm: f64,
    /// Local time of the last successful calibration.
    pub calibrated_at: Option<DateTime<Local>>,
    pub status: StatusLine,
    /// Buffered readings as `[index, mm]`, oldest first.
    pub samples: Vec<[f64; 2]>,
    /// Connected port, once the reader reports it.
    pub port: Option<String>,
    /// Transport failure reported by the reader, if any.
    pub transport_error: Option<String>,
}

impl DisplayFrame {
    /// Deviation of the latest reading, only while it is classified as a defect.
    pub fn defect_deviation(&self) -> Option<f64> {
        self.deviation_mm.filter(|_| self.classification.is_defect())
    }
}

/// Buffer + calibration + classifier, driven by the UI thread.
#[derive(Debug, Clone)]
pub struct SurfaceMonitor {
    buffer: SampleBuffer,
    calibration: Calibration,
    classifier: DefectClassifier,
    latest: Option<Reading>,
    classification: Classification,
    deviation_mm: Option<f64>,
    status: StatusLine,
    calibrated_at: Option<DateTime<Local>>,
    port: Option<String>,
    transport_error: Option<String>,
}

impl SurfaceMonitor {
    pub fn new(cfg: &DetectionConfig) -> Self {
        Self {
            buffer: SampleBuffer::new(cfg.buffer_capacity),
            calibration: Calibration::new(cfg.calibration_samples),
            classifier: DefectClassifier::new(cfg.tolerance_mm),
            latest: None,
            classification: Classification::Uncalibrated,
            deviation_mm: None,
            status: StatusLine::NotCalibrated,
            calibrated_at: None,
            port: None,
            transport_error: None,
        }
    }

    pub fn buffer(&self) -> &SampleBuffer {
        &self.buffer
    }

    pub fn calibration(&self) -> &Calibration {
        &self.calibration
    }

    pub fn classifier(&self) -> &DefectClassifier {
        &self.classifier
    }

    pub fn latest(&self) -> Option<Reading> {
        self.latest
    }

    pub fn classification(&self) -> Classification {
        self.classification
    }

    pub fn status(&self) -> StatusLine {
        self.status
    }

    pub fn transport_error(&self) -> Option<&str> {
        self.transport_error.as_deref()
    }

    /// Append one reading and classify it against the current reference.
    pub fn ingest(&mut self, reading: Reading) -> Classification {
        self.buffer.append(reading);
        self.latest = Some(reading);
        self.deviation_mm = self.classifier.deviation(reading, &self.calibration);
        self.classification = self.classifier.classify(reading, &self.calibration);
        self.status =
            StatusLine::after_reading(self.status, self.classification, self.deviation_mm);
        self.classification
    }

    /// Apply one message from the reader.
    pub fn apply(&mut self, msg: SensorMessage) {
        match msg {
            SensorMessage::Reading(reading) => {
                self.ingest(reading);
            }
            SensorMessage::Connected { port } => {
                info!("sensor connected on {port}");
                self.port = Some(port);
            }
            SensorMessage::TransportError(message) => {
                // The reader stops after its first failure; keep the first report.
                if self.transport_error.is_none() {
                    error!("{message}");
                    self.transport_error = Some(message);
                }
            }
        }
    }

    /// Apply every pending message without blocking. Returns how many were applied.
    pub fn drain(&mut self, rx: &Receiver<SensorMessage>) -> usize {
        let mut applied = 0usize;
        while let Ok(msg) = rx.try_recv() {
            self.apply(msg);
            applied += 1;
        }
        applied
    }

    /// Operator "Calibrate" action.
    ///
    /// On failure the previous reference (if any) is kept and the status shows
    /// that the panel is waiting for data.
    pub fn calibrate(&mut self) -> Result<f64, CalibrationError> {
        match self.calibration.calibrate(&self.buffer) {
            Ok(reference) => {
                self.status = StatusLine::Calibrated;
                self.calibrated_at = Some(Local::now());
                Ok(reference)
            }
            Err(err) => {
                warn!("{err}");
                self.status = StatusLine::WaitingForData;
                Err(err)
            }
        }
    }

    /// Snapshot for rendering.
    pub fn frame(&self) -> DisplayFrame {
        DisplayFrame {
            latest: self.latest,
            classification: self.classification,
            deviation_mm: self.deviation_mm,
            reference_mm: self.calibration.reference(),
            tolerance_mm: self.classifier.tolerance_mm(),
            calibrated_at: self.calibrated_at,
            status: self.status,
            samples: self.buffer.plot_points(),
            port: self.port.clone(),
            transport_error: self.transport_error.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sink::channel_readings;

    fn monitor() -> SurfaceMonitor {
        SurfaceMonitor::new(&DetectionConfig::default())
    }

    #[test]
    fn refused_calibration_shows_waiting_for_data() {
        let mut m = monitor();
        m.ingest(Reading::from_mm(1.0));
        assert!(m.calibrate().is_err());
        assert_eq!(m.status(), StatusLine::WaitingForData);
        assert!(!m.calibration().is_calibrated());

        // Further uncalibrated readings leave the message in place.
        m.ingest(Reading::from_mm(2.0));
        assert_eq!(m.status(), StatusLine::WaitingForData);
    }

    #[test]
    fn calibrated_status_lasts_until_next_reading() {
        let mut m = monitor();
        for _ in 0..10 {
            m.ingest(Reading::from_mm(50.0));
        }
        m.calibrate().unwrap();
        assert_eq!(m.status(), StatusLine::Calibrated);
        m.ingest(Reading::from_mm(50.5));
        assert_eq!(m.status(), StatusLine::Normal);
    }

    #[test]
    fn drain_applies_messages_in_order_and_latches_first_error() {
        let (sink, rx) = channel_readings();
        sink.report_connected("COM9").unwrap();
        sink.send_reading(Reading::from_mm(1.0)).unwrap();
        sink.send_reading(Reading::from_mm(2.0)).unwrap();
        sink.report_transport_error("first").unwrap();
        sink.report_transport_error("second").unwrap();

        let mut m = monitor();
        assert_eq!(m.drain(&rx), 5);
        assert_eq!(m.latest(), Some(Reading::from_mm(2.0)));
        assert_eq!(
            m.buffer().snapshot(),
            vec![Reading::from_mm(1.0), Reading::from_mm(2.0)]
        );
        let frame = m.frame();
        assert_eq!(frame.port.as_deref(), Some("COM9"));
        assert_eq!(frame.transport_error.as_deref(), Some("first"));
    }

    #[test]
    fn defect_deviation_only_while_out_of_tolerance() {
        let mut m = monitor();
        for _ in 0..10 {
            m.ingest(Reading::from_mm(100.0));
        }
        m.calibrate().unwrap();

        m.ingest(Reading::from_mm(103.0));
        let frame = m.frame();
        assert_eq!(frame.deviation_mm, Some(3.0));
        assert_eq!(frame.defect_deviation(), None);

        m.ingest(Reading::from_mm(92.0));
        assert_eq!(m.frame().defect_deviation(), Some(-8.0));
    }

    #[test]
    fn frame_before_any_data() {
        let frame = monitor().frame();
        assert_eq!(frame.latest, None);
        assert_eq!(frame.classification, Classification::Uncalibrated);
        assert_eq!(frame.status, StatusLine::NotCalibrated);
        assert!(frame.samples.is_empty());
    }
}
