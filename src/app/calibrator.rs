//! Interactive, operator-paced capture of the three reference vectors.
//!
//! ```text
//!  ack ──▶ Closed ──▶ settle ──▶ Outside ──▶ settle ──▶ Inside ──▶ save ──▶ cooldown
//! ```
//!
//! There is no retry.  A capture taken with the flap in the wrong position
//! is simply wrong, and the operator reruns calibration.

use embedded_hal::delay::DelayNs;
use log::info;

use crate::calibration::PartialReferences;
use crate::config::MonitorConfig;
use crate::error::Error;
use crate::flap::{FlapState, ReferenceSet};
use crate::sensors::VectorSampler;

use super::events::{AppEvent, CountdownPhase};
use super::pacing::countdown;
use super::ports::{AccelerometerPort, CalibrationPort, EventSink, OperatorPort};

pub const START_PROMPT: &str = "Press Enter to start calibration";

pub struct Calibrator {
    settle_secs: u32,
    cooldown_secs: u32,
}

impl Calibrator {
    pub fn new(settle_secs: u32, cooldown_secs: u32) -> Self {
        Self {
            settle_secs,
            cooldown_secs,
        }
    }

    pub fn from_config(config: &MonitorConfig) -> Self {
        Self::new(config.settle_secs, config.cooldown_secs)
    }

    /// Run the full calibration sequence and persist the result.
    ///
    /// Captures in [`FlapState::CAPTURE_ORDER`]; every capture after the
    /// first is preceded by the settle countdown.  Sensor and save failures
    /// abort calibration.
    pub fn run<A: AccelerometerPort, D: DelayNs>(
        &self,
        sampler: &mut VectorSampler<A, D>,
        operator: &mut impl OperatorPort,
        store: &impl CalibrationPort,
        sink: &mut impl EventSink,
    ) -> Result<ReferenceSet, Error> {
        operator.acknowledge(START_PROMPT);
        sink.emit(&AppEvent::CalibrationStarted);

        let mut partial = PartialReferences::default();
        for (i, state) in FlapState::CAPTURE_ORDER.into_iter().enumerate() {
            sink.emit(&AppEvent::CalibrationPrompt(state));
            if i > 0 {
                countdown(
                    sampler.delay_mut(),
                    CountdownPhase::Settle,
                    self.settle_secs,
                    sink,
                );
            }
            let vector = sampler.sample()?;
            partial.set(state, vector);
            sink.emit(&AppEvent::ReferenceCaptured { state, vector });
        }

        let refs = partial.complete()?;
        store.save(&refs)?;
        info!("Calibration saved");
        sink.emit(&AppEvent::CalibrationCompleted(refs));

        countdown(
            sampler.delay_mut(),
            CountdownPhase::Cooldown,
            self.cooldown_secs,
            sink,
        );
        Ok(refs)
    }
}
