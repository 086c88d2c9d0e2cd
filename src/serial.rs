//! Background ingestion: pull lines from the sensor, parse them, send readings.
//!
//! The transport is hidden behind [`LineSource`] so the reader loop can be
//! driven by a real serial port ([`open_serial`]) or by any `Read` in tests
//! and demos ([`BufLineSource`]).

use std::io::{self, BufRead, BufReader, Read};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};

use serialport::SerialPort;
use tracing::{debug, error, info, trace};

use crate::config::SerialConfig;
use crate::data::parser::LineParser;
use crate::error::ProfilerError;
use crate::sink::ReadingSink;

/// Outcome of one blocking read on a [`LineSource`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineRead {
    /// A full line, without its `\n` terminator.
    Line(Vec<u8>),
    /// The read timed out before a line was complete.
    Timeout,
    /// The stream ended.
    Closed,
}

/// Producer of raw, newline-terminated lines.
pub trait LineSource: Send {
    /// Block until a line is available, the read times out, or the stream ends.
    fn next_line(&mut self) -> io::Result<LineRead>;

    /// Human readable name for logs and the status bar.
    fn describe(&self) -> String;
}

/// [`LineSource`] over any byte stream.
///
/// Bytes of a line interrupted by a timeout are kept and completed by the next
/// read; they are dropped together with the source on shutdown.
pub struct BufLineSource<R> {
    name: String,
    reader: BufReader<R>,
    pending: Vec<u8>,
}

impl<R: Read> BufLineSource<R> {
    pub fn new(name: impl Into<String>, inner: R) -> Self {
        Self {
            name: name.into(),
            reader: BufReader::new(inner),
            pending: Vec::new(),
        }
    }
}

impl<R: Read + Send> LineSource for BufLineSource<R> {
    fn next_line(&mut self) -> io::Result<LineRead> {
        match self.reader.read_until(b'\n', &mut self.pending) {
            Ok(0) if self.pending.is_empty() => Ok(LineRead::Closed),
            Ok(_) => {
                let mut line = std::mem::take(&mut self.pending);
                if line.last() == Some(&b'\n') {
                    line.pop();
                }
                Ok(LineRead::Line(line))
            }
            Err(e) if matches!(e.kind(), io::ErrorKind::TimedOut | io::ErrorKind::WouldBlock) => {
                Ok(LineRead::Timeout)
            }
            Err(e) => Err(e),
        }
    }

    fn describe(&self) -> String {
        self.name.clone()
    }
}

/// Line source backed by a serial port.
pub type SerialLineSource = BufLineSource<Box<dyn SerialPort>>;

/// Open the configured serial port with its read timeout.
pub fn open_serial(cfg: &SerialConfig) -> Result<SerialLineSource, ProfilerError> {
    let port = serialport::new(&cfg.port, cfg.baud_rate)
        .timeout(cfg.read_timeout())
        .open()
        .map_err(|e| ProfilerError::open(&cfg.port, e))?;
    Ok(BufLineSource::new(cfg.port.clone(), port))
}

/// Cooperative shutdown signal shared between the UI and the reader.
#[derive(Clone, Debug, Default)]
pub struct StopFlag(Arc<AtomicBool>);

impl StopFlag {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn raise(&self) {
        self.0.store(true, Ordering::Release);
    }

    pub fn is_raised(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }
}

/// Spawn the reader thread.
///
/// `open` runs on the new thread, so a port that cannot be opened is reported
/// through the sink like any other transport failure. The thread exits on the
/// first transport error (no reconnection), when the stream closes, when the
/// panel drops its receiver, or when `stop` is raised and the current read
/// returns.
pub fn spawn_reader<S, F>(
    open: F,
    parser: LineParser,
    sink: ReadingSink,
    stop: StopFlag,
) -> io::Result<JoinHandle<()>>
where
    S: LineSource + 'static,
    F: FnOnce() -> Result<S, ProfilerError> + Send + 'static,
{
    thread::Builder::new()
        .name("serial-reader".into())
        .spawn(move || match open() {
            Ok(source) => {
                info!("connected to {}", source.describe());
                if sink.report_connected(source.describe()).is_ok() {
                    read_lines(source, parser, &sink, &stop);
                }
            }
            Err(e) => {
                error!("{e}");
                let _ = sink.report_transport_error(e.to_string());
            }
        })
}

/// Reader loop. Runs on the calling thread until one of the exit conditions
/// of [`spawn_reader`] is met.
pub fn read_lines<S: LineSource>(
    mut source: S,
    parser: LineParser,
    sink: &ReadingSink,
    stop: &StopFlag,
) {
    while !stop.is_raised() {
        match source.next_line() {
            Ok(LineRead::Line(raw)) => match parser.parse_bytes(&raw) {
                Some(reading) => {
                    if sink.send_reading(reading).is_err() {
                        debug!("panel closed, reader exiting");
                        return;
                    }
                }
                None => trace!("skipped line {:?}", String::from_utf8_lossy(&raw)),
            },
            Ok(LineRead::Timeout) => continue,
            Ok(LineRead::Closed) => {
                info!("{} closed the stream", source.describe());
                return;
            }
            Err(e) => {
                let err = ProfilerError::from(e);
                error!("{}: {err}", source.describe());
                let _ = sink.report_transport_error(format!("{}: {err}", source.describe()));
                return;
            }
        }
    }
    debug!("stop requested, reader exiting");
}
