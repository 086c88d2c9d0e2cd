use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tracing::{error, info};

use defectoscope::{run_profiler, ProfilerConfig};

/// Ultrasonic surface profiler panel.
#[derive(Debug, Parser)]
#[command(version, about)]
struct Args {
    /// JSON configuration file; missing fields use built-in defaults.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Serial port, overriding the configuration.
    #[arg(short, long)]
    port: Option<String>,

    /// Baud rate, overriding the configuration.
    #[arg(short, long)]
    baud: Option<u32>,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt().with_target(false).init();

    let args = Args::parse();
    let mut cfg = match &args.config {
        Some(path) => match ProfilerConfig::load(path) {
            Ok(cfg) => cfg,
            Err(e) => {
                error!("{e}");
                return ExitCode::FAILURE;
            }
        },
        None => ProfilerConfig::default(),
    };
    if let Some(port) = args.port {
        cfg.serial.port = port;
    }
    if let Some(baud) = args.baud {
        cfg.serial.baud_rate = baud;
    }
    if let Err(e) = cfg.validate() {
        error!("{e}");
        return ExitCode::FAILURE;
    }

    info!(
        port = %cfg.serial.port,
        baud = cfg.serial.baud_rate,
        tolerance_mm = cfg.detection.tolerance_mm,
        "starting profiler"
    );
    match run_profiler(cfg) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("window error: {e}");
            ExitCode::FAILURE
        }
    }
}
