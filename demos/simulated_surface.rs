//! Example: Panel driven by a simulated sensor
//!
//! What it demonstrates
//! - Running the panel without hardware via `run_profiler_with_source` and a
//!   `BufLineSource` wrapped around any `Read`.
//! - A surface at ~12.3 cm with a recess and a protrusion passing under the
//!   sensor every few seconds.
//!
//! How to run
//! ```bash
//! cargo run --example simulated_surface
//! ```
//! Wait a moment, press CALIBRATE, and watch the status switch between
//! SURFACE NORMAL, HOLE and BUMP.

use std::io::{self, Read};
use std::time::Duration;

use defectoscope::{run_profiler_with_source, BufLineSource, ProfilerConfig};

/// Emits one line per read, 50 lines per second, like an Arduino sketch.
struct SimulatedSensor {
    n: u64,
}

impl SimulatedSensor {
    fn distance_cm(&self) -> f64 {
        let t = self.n as f64 * 0.02;
        // Small ripple standing in for sensor noise.
        let noise = 0.03 * (t * 37.0).sin() + 0.02 * (t * 11.0).cos();
        let phase = t % 8.0;
        let defect = if (2.0..2.6).contains(&phase) {
            0.9 // recess
        } else if (5.0..5.5).contains(&phase) {
            -1.1 // protrusion
        } else {
            0.0
        };
        12.3 + noise + defect
    }
}

impl Read for SimulatedSensor {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        std::thread::sleep(Duration::from_millis(20));
        let line = format!("Distance: {:.2} cm\r\n", self.distance_cm());
        self.n = self.n.wrapping_add(1);
        let bytes = line.as_bytes();
        let len = bytes.len().min(buf.len());
        buf[..len].copy_from_slice(&bytes[..len]);
        Ok(len)
    }
}

fn main() -> eframe::Result<()> {
    tracing_subscriber::fmt().with_target(false).init();

    let mut cfg = ProfilerConfig::default();
    cfg.display.title = "Defectoscope (simulated sensor)".into();
    run_profiler_with_source(cfg, || {
        Ok(BufLineSource::new("simulator", SimulatedSensor { n: 0 }))
    })
}
