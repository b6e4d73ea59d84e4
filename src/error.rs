//! Unified error types for FlapWatch.
//!
//! A single `Error` enum that every subsystem converts into, keeping the
//! binary's error handling uniform.  The subsystem enums map onto the three
//! failure classes of the monitor:
//!
//! | Type           | Failure class              | Policy                |
//! |----------------|----------------------------|-----------------------|
//! | `SensorError`  | sensor bus I/O             | fatal, never retried  |
//! | `RecordError`  | missing/malformed record   | fatal at startup      |
//! | `NotifyError`  | notification publish       | logged, loop goes on  |

use core::fmt;

use crate::flap::FlapState;

// ---------------------------------------------------------------------------
// Top-level error
// ---------------------------------------------------------------------------

/// Every fallible operation in the crate funnels into this type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// The accelerometer could not be read or initialised.
    Sensor(SensorError),
    /// The calibration record is absent, corrupt, incomplete or unwritable.
    Record(RecordError),
    /// The notification client could not be set up.
    Notify(NotifyError),
    /// Configuration failed validation.
    Config(&'static str),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Sensor(e) => write!(f, "sensor: {e}"),
            Self::Record(e) => write!(f, "calibration record: {e}"),
            Self::Notify(e) => write!(f, "notification: {e}"),
            Self::Config(msg) => write!(f, "config: {msg}"),
        }
    }
}

impl std::error::Error for Error {}

// ---------------------------------------------------------------------------
// Sensor errors
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SensorError {
    /// SPI transaction failed.
    Bus(embedded_hal::spi::ErrorKind),
    /// DEVID register did not identify an ADXL345.
    UnexpectedDevice(u8),
}

impl fmt::Display for SensorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bus(kind) => write!(f, "SPI bus error ({kind})"),
            Self::UnexpectedDevice(id) => write!(f, "unexpected device id 0x{id:02X}"),
        }
    }
}

impl std::error::Error for SensorError {}

impl From<SensorError> for Error {
    fn from(e: SensorError) -> Self {
        Self::Sensor(e)
    }
}

// ---------------------------------------------------------------------------
// Calibration record errors
// ---------------------------------------------------------------------------

/// Load and save failures of the persisted reference vectors.
///
/// All variants are fatal: the monitor cannot run without a complete
/// reference set, and the operator recovers by recalibrating.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordError {
    /// The record file does not exist or cannot be read.
    Missing,
    /// A line could not be parsed.  `line` is 1-based.
    Malformed { line: usize, reason: &'static str },
    /// Parsing finished without a reference for this state.
    Incomplete(FlapState),
    /// Writing the record failed.
    Io(std::io::ErrorKind),
}

impl fmt::Display for RecordError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Missing => write!(f, "record file missing or unreadable"),
            Self::Malformed { line, reason } => write!(f, "line {line}: {reason}"),
            Self::Incomplete(state) => write!(f, "no reference vector for {state}"),
            Self::Io(kind) => write!(f, "write failed ({kind})"),
        }
    }
}

impl std::error::Error for RecordError {}

impl From<RecordError> for Error {
    fn from(e: RecordError) -> Self {
        Self::Record(e)
    }
}

// ---------------------------------------------------------------------------
// Notification errors
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NotifyError {
    /// The request never produced a response (DNS, TLS, timeout, ...).
    Transport(String),
    /// The server answered with a non-success status code.
    Rejected(u16),
}

impl fmt::Display for NotifyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Transport(msg) => write!(f, "transport failed: {msg}"),
            Self::Rejected(status) => write!(f, "rejected with HTTP {status}"),
        }
    }
}

impl std::error::Error for NotifyError {}

impl From<NotifyError> for Error {
    fn from(e: NotifyError) -> Self {
        Self::Notify(e)
    }
}
