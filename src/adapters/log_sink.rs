//! Log-based event sink adapter.
//!
//! Implements [`EventSink`] by rendering application events through the
//! `log` facade (initialised with `env_logger` by the binary, so they land
//! on the service's console/journal).

use log::{debug, error, info};

use crate::app::events::{AppEvent, CountdownPhase};
use crate::app::ports::EventSink;
use crate::flap::FlapState;

/// Adapter that logs every [`AppEvent`] to the console.
pub struct LogEventSink;

impl LogEventSink {
    pub fn new() -> Self {
        Self
    }
}

impl Default for LogEventSink {
    fn default() -> Self {
        Self::new()
    }
}

impl EventSink for LogEventSink {
    fn emit(&mut self, event: &AppEvent) {
        match event {
            AppEvent::CalibrationStarted => {
                info!("CALIB | start");
            }
            AppEvent::CalibrationPrompt(state) => match state {
                FlapState::Closed => info!("CALIB | read values for state [closed]..."),
                FlapState::Outside => info!("CALIB | open flap to OUTside and wait..."),
                FlapState::Inside => info!("CALIB | open flap to INside and wait..."),
            },
            AppEvent::ReferenceCaptured { state, vector } => {
                info!("CALIB | [{}] {}", state, vector);
            }
            AppEvent::CalibrationCompleted(refs) => {
                info!(
                    "CALIB | completed, the gate is ready | C {} | O {} | I {}",
                    refs.closed, refs.outside, refs.inside
                );
            }
            AppEvent::ReferencesLoaded(refs) => {
                info!(
                    "REFS  | loaded | C {} | O {} | I {}",
                    refs.closed, refs.outside, refs.inside
                );
            }
            AppEvent::MonitorStarted => {
                info!("Started.");
            }
            AppEvent::Measurement(v) => {
                debug!("{:>7} {:>5.2} {:>5.2} {:>5.2}", "", v.x, v.y, v.z);
            }
            AppEvent::Transition { state, vector } => {
                info!(
                    "{:>7} {:>5.2} {:>5.2} {:>5.2}",
                    state.to_string(),
                    vector.x,
                    vector.y,
                    vector.z
                );
            }
            AppEvent::Notified { state, message } => {
                info!("TOOT  | {:?} | {}", state, message);
            }
            AppEvent::NotifyFailed(e) => {
                error!("TOOT  | publish failed: {}", e);
            }
            AppEvent::Countdown {
                phase,
                remaining_secs,
            } => match phase {
                CountdownPhase::Settle | CountdownPhase::Quiet => info!("{}...", remaining_secs),
                CountdownPhase::Cooldown => {
                    info!("{} second/s until starting...", remaining_secs);
                }
            },
        }
    }
}
