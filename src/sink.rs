//! Channel that carries sensor output from the reader thread to the panel.
//!
//! The reader owns a [`ReadingSink`]; the UI owns the matching receiver and
//! drains it once per tick. Sending never blocks and messages arrive in the
//! order they were sent.

use std::sync::mpsc::{Receiver, SendError, Sender};

use crate::data::Reading;

/// Messages sent over the channel to drive the panel.
#[derive(Debug, Clone, PartialEq)]
pub enum SensorMessage {
    /// The transport was opened successfully.
    Connected { port: String },
    /// One parsed reading, in millimeters.
    Reading(Reading),
    /// The transport failed; the reader has stopped and sends nothing more.
    TransportError(String),
}

/// Convenience sender for feeding the panel.
#[derive(Clone, Debug)]
pub struct ReadingSink {
    tx: Sender<SensorMessage>,
}

impl ReadingSink {
    /// Send one reading. Fails only when the panel has gone away.
    pub fn send_reading(&self, reading: Reading) -> Result<(), SendError<SensorMessage>> {
        self.tx.send(SensorMessage::Reading(reading))
    }

    /// Announce the connected port.
    pub fn report_connected(
        &self,
        port: impl Into<String>,
    ) -> Result<(), SendError<SensorMessage>> {
        self.tx.send(SensorMessage::Connected { port: port.into() })
    }

    /// Report a fatal transport failure.
    pub fn report_transport_error(
        &self,
        message: impl Into<String>,
    ) -> Result<(), SendError<SensorMessage>> {
        self.tx.send(SensorMessage::TransportError(message.into()))
    }
}

/// Create a new channel pair: `(ReadingSink, Receiver<SensorMessage>)`.
pub fn channel_readings() -> (ReadingSink, Receiver<SensorMessage>) {
    let (tx, rx) = std::sync::mpsc::channel();
    (ReadingSink { tx }, rx)
}
