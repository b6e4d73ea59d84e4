//! The continuous sample → classify → notify loop.
//!
//! ```text
//!  VectorSampler ──▶ classify ──▶ qualifying? ──yes──▶ NotifierPort ──▶ quiet period
//!        ▲                             │
//!        └────────────── no ───────────┘
//! ```
//!
//! A transition qualifies when the new state is not `Closed` and differs
//! from the last observed state.  Closing the flap is never announced, but
//! it resets the last observed state so the next opening is.

use core::convert::Infallible;

use chrono::NaiveTime;
use embedded_hal::delay::DelayNs;

use crate::config::MonitorConfig;
use crate::error::SensorError;
use crate::flap::{FlapState, ReferenceSet, classify};
use crate::sensors::VectorSampler;

use super::events::{AppEvent, CountdownPhase};
use super::pacing::countdown;
use super::ports::{AccelerometerPort, ClockPort, EventSink, NotifierPort};

/// Loop state carried from one iteration into the next.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MonitorState {
    pub last_observed: FlapState,
}

impl MonitorState {
    /// Whether moving to `current` should be announced.
    pub fn is_qualifying(self, current: FlapState) -> bool {
        current != FlapState::Closed && current != self.last_observed
    }
}

pub struct MonitorLoop {
    refs: ReferenceSet,
    quiet_period_secs: u32,
    subject: String,
    trace: bool,
}

impl MonitorLoop {
    pub fn new(refs: ReferenceSet, quiet_period_secs: u32, subject: impl Into<String>) -> Self {
        Self {
            refs,
            quiet_period_secs,
            subject: subject.into(),
            trace: false,
        }
    }

    pub fn from_config(refs: ReferenceSet, config: &MonitorConfig) -> Self {
        Self::new(refs, config.quiet_period_secs, config.subject_name.clone())
    }

    /// Emit every measurement as [`AppEvent::Measurement`].
    #[must_use]
    pub fn with_trace(mut self, trace: bool) -> Self {
        self.trace = trace;
        self
    }

    /// One iteration: sample, classify, announce a qualifying transition
    /// followed by the quiet period, and return the updated state.
    pub fn step<A: AccelerometerPort, D: DelayNs>(
        &self,
        state: MonitorState,
        sampler: &mut VectorSampler<A, D>,
        notifier: &mut impl NotifierPort,
        clock: &impl ClockPort,
        sink: &mut impl EventSink,
    ) -> Result<MonitorState, SensorError> {
        let vector = sampler.sample()?;
        let current = classify(vector, &self.refs);

        if self.trace {
            sink.emit(&AppEvent::Measurement(vector));
        }

        if state.is_qualifying(current) {
            sink.emit(&AppEvent::Transition {
                state: current,
                vector,
            });
            self.announce(current, notifier, clock, sink);
            countdown(
                sampler.delay_mut(),
                CountdownPhase::Quiet,
                self.quiet_period_secs,
                sink,
            );
        }

        Ok(MonitorState {
            last_observed: current,
        })
    }

    /// Run until the sensor fails.  Starts from `Closed`.
    pub fn run<A: AccelerometerPort, D: DelayNs>(
        &self,
        sampler: &mut VectorSampler<A, D>,
        notifier: &mut impl NotifierPort,
        clock: &impl ClockPort,
        sink: &mut impl EventSink,
    ) -> Result<Infallible, SensorError> {
        sink.emit(&AppEvent::MonitorStarted);
        let mut state = MonitorState::default();
        loop {
            state = self.step(state, sampler, notifier, clock, sink)?;
        }
    }

    /// Publish failures are reported and swallowed; a missed notification
    /// is never retried.
    fn announce(
        &self,
        state: FlapState,
        notifier: &mut impl NotifierPort,
        clock: &impl ClockPort,
        sink: &mut impl EventSink,
    ) {
        let Some(message) = notification_message(&self.subject, state, clock.local_time()) else {
            return;
        };
        match notifier.publish(&message) {
            Ok(()) => sink.emit(&AppEvent::Notified { state, message }),
            Err(e) => sink.emit(&AppEvent::NotifyFailed(e)),
        }
    }
}

/// Status text for a transition into `state`.  `Closed` has none.
pub fn notification_message(subject: &str, state: FlapState, at: NaiveTime) -> Option<String> {
    let time = at.format("%H:%M:%S");
    match state {
        FlapState::Outside => Some(format!("{subject} left at {time}")),
        FlapState::Inside => Some(format!("{subject} has been home since {time}")),
        FlapState::Closed => None,
    }
}
