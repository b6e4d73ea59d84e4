//! Outbound application events.
//!
//! The [`Calibrator`](super::calibrator::Calibrator) and
//! [`MonitorLoop`](super::monitor::MonitorLoop) emit these through the
//! [`EventSink`](super::ports::EventSink) port.  Adapters on the other side
//! decide how to render them.

use crate::error::NotifyError;
use crate::flap::{FlapState, ReferenceSet, Vector3};

/// What a one-second countdown is waiting for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CountdownPhase {
    /// Operator is moving the flap into the next calibration position.
    Settle,
    /// Calibration finished; monitoring starts afterwards.
    Cooldown,
    /// Sampling is suspended after a notification.
    Quiet,
}

/// Structured events emitted by the application core.
#[derive(Debug, Clone, PartialEq)]
pub enum AppEvent {
    /// The operator confirmed the start of calibration.
    CalibrationStarted,

    /// The operator should now hold the flap in `state`.
    CalibrationPrompt(FlapState),

    /// A reference vector was captured.
    ReferenceCaptured { state: FlapState, vector: Vector3 },

    /// All three references were captured and persisted.
    CalibrationCompleted(ReferenceSet),

    /// References were read from the calibration record.
    ReferencesLoaded(ReferenceSet),

    /// The monitor loop is about to take its first sample.
    MonitorStarted,

    /// Every averaged measurement, only when tracing is on.
    Measurement(Vector3),

    /// A qualifying transition into `state` was detected.
    Transition { state: FlapState, vector: Vector3 },

    /// A notification for `state` was published.
    Notified { state: FlapState, message: String },

    /// Publishing failed; the loop carries on.
    NotifyFailed(NotifyError),

    /// One tick of a blocking countdown.
    Countdown {
        phase: CountdownPhase,
        remaining_secs: u32,
    },
}
