//! Port traits: the hexagonal boundary between the flap logic and the
//! outside world.
//!
//! ```text
//!   Adapter ──▶ Port trait ──▶ Calibrator / MonitorLoop (domain)
//! ```
//!
//! Driven adapters (accelerometer, calibration file, notifier, clock,
//! console) implement these traits.  The domain consumes them via generics,
//! so the core never touches hardware or the network directly and every
//! path can be exercised with in-memory fakes.
//!
//! Blocking waits are not a port of their own: the domain takes an
//! [`embedded_hal::delay::DelayNs`] wherever it has to pause.

use chrono::NaiveTime;

use crate::error::{NotifyError, RecordError, SensorError};
use crate::flap::{ReferenceSet, Vector3};

use super::events::AppEvent;

// ───────────────────────────────────────────────────────────────
// Accelerometer port (driven adapter: hardware → domain)
// ───────────────────────────────────────────────────────────────

/// Raw, unfiltered acceleration source.
pub trait AccelerometerPort {
    /// One reading in g.  Bus failures are fatal to the caller.
    fn read_once(&mut self) -> Result<Vector3, SensorError>;
}

// ───────────────────────────────────────────────────────────────
// Calibration port (driven adapter: domain ↔ persisted references)
// ───────────────────────────────────────────────────────────────

/// Loads and persists the reference vectors.
///
/// A record is written once at the end of calibration and read once at
/// startup.  It is never patched incrementally.
pub trait CalibrationPort {
    /// Load a complete reference set.  Absent, corrupt or incomplete
    /// records are errors; there is no default.
    fn load(&self) -> Result<ReferenceSet, RecordError>;

    /// Replace any existing record with `refs`.
    fn save(&self, refs: &ReferenceSet) -> Result<(), RecordError>;
}

// ───────────────────────────────────────────────────────────────
// Notifier port (driven adapter: domain → social feed)
// ───────────────────────────────────────────────────────────────

/// Publishes a human-readable status message.
pub trait NotifierPort {
    fn publish(&mut self, message: &str) -> Result<(), NotifyError>;
}

// ───────────────────────────────────────────────────────────────
// Clock port (driven adapter: wall clock → domain)
// ───────────────────────────────────────────────────────────────

/// Local wall-clock time used to stamp notifications.
pub trait ClockPort {
    fn local_time(&self) -> NaiveTime;
}

// ───────────────────────────────────────────────────────────────
// Operator port (driven adapter: console → domain)
// ───────────────────────────────────────────────────────────────

/// The human running an interactive calibration.
pub trait OperatorPort {
    /// Show `prompt` and block until the operator confirms.
    fn acknowledge(&mut self, prompt: &str);
}

// ───────────────────────────────────────────────────────────────
// Event sink port (driven adapter: domain → console / log)
// ───────────────────────────────────────────────────────────────

/// The domain emits structured [`AppEvent`]s through this port.  Adapters
/// decide where they go.
pub trait EventSink {
    fn emit(&mut self, event: &AppEvent);
}
