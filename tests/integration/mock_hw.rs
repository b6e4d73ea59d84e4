//! Mock adapters for integration tests.
//!
//! Every fake that blocks, reads, or publishes records onto one shared
//! [`Timeline`], so tests can assert on the exact interleaving of sensor
//! reads, delays and notifications without real hardware or time passing.

#![allow(dead_code)]

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

use chrono::NaiveTime;
use embedded_hal::delay::DelayNs;
use flapwatch::app::events::AppEvent;
use flapwatch::app::ports::{
    AccelerometerPort, CalibrationPort, ClockPort, EventSink, NotifierPort, OperatorPort,
};
use flapwatch::error::{NotifyError, RecordError, SensorError};
use flapwatch::flap::{ReferenceSet, Vector3};
use flapwatch::sensors::VectorSampler;

/// Readings per averaged vector used throughout the tests.
pub const SAMPLES: u8 = 3;
pub const SAMPLE_INTERVAL_MS: u32 = 200;

// ── Timeline ─────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
pub enum Op {
    Read,
    Delay(u32),
    Ack,
    Publish(String),
    Save,
}

#[derive(Clone, Default)]
pub struct Timeline(Rc<RefCell<Vec<Op>>>);

impl Timeline {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&self, op: Op) {
        self.0.borrow_mut().push(op);
    }

    pub fn ops(&self) -> Vec<Op> {
        self.0.borrow().clone()
    }

    pub fn count(&self, op: &Op) -> usize {
        self.0.borrow().iter().filter(|o| *o == op).count()
    }

    pub fn reads(&self) -> usize {
        self.count(&Op::Read)
    }

    /// Sum of delays (ms) recorded between the `n`-th and `n+1`-th read
    /// (0-based).
    pub fn delay_after_read(&self, n: usize) -> u32 {
        let ops = self.0.borrow();
        let mut seen = 0;
        let mut total = 0;
        let mut counting = false;
        for op in ops.iter() {
            match op {
                Op::Read if counting => break,
                Op::Read => {
                    if seen == n {
                        counting = true;
                    }
                    seen += 1;
                }
                Op::Delay(ms) if counting => total += ms,
                _ => {}
            }
        }
        total
    }
}

// ── MockAccel ────────────────────────────────────────────────

/// Scripted accelerometer.  Each queued vector is returned for
/// [`SAMPLES`] consecutive reads, so the sampler average equals it.
pub struct MockAccel {
    queue: VecDeque<Vector3>,
    repeat_left: u8,
    current: Option<Vector3>,
    /// Fail with a bus error once the script runs out.
    pub fail_when_empty: bool,
    timeline: Timeline,
}

impl MockAccel {
    pub fn new(vectors: &[Vector3], timeline: &Timeline) -> Self {
        Self {
            queue: vectors.iter().copied().collect(),
            repeat_left: 0,
            current: None,
            fail_when_empty: true,
            timeline: timeline.clone(),
        }
    }
}

impl AccelerometerPort for MockAccel {
    fn read_once(&mut self) -> Result<Vector3, SensorError> {
        self.timeline.push(Op::Read);
        if self.repeat_left == 0 {
            self.current = self.queue.pop_front();
            self.repeat_left = SAMPLES;
        }
        self.repeat_left -= 1;
        match self.current {
            Some(v) => Ok(v),
            None if self.fail_when_empty => {
                Err(SensorError::Bus(embedded_hal::spi::ErrorKind::Other))
            }
            None => Ok(Vector3::ZERO),
        }
    }
}

// ── MockDelay ────────────────────────────────────────────────

pub struct MockDelay {
    timeline: Timeline,
}

impl MockDelay {
    pub fn new(timeline: &Timeline) -> Self {
        Self {
            timeline: timeline.clone(),
        }
    }
}

impl DelayNs for MockDelay {
    fn delay_ns(&mut self, ns: u32) {
        self.timeline.push(Op::Delay(ns / 1_000_000));
    }

    fn delay_ms(&mut self, ms: u32) {
        self.timeline.push(Op::Delay(ms));
    }
}

pub fn sampler(vectors: &[Vector3], timeline: &Timeline) -> VectorSampler<MockAccel, MockDelay> {
    VectorSampler::new(
        MockAccel::new(vectors, timeline),
        MockDelay::new(timeline),
        SAMPLES,
        SAMPLE_INTERVAL_MS,
    )
}

// ── RecordingNotifier ────────────────────────────────────────

pub struct RecordingNotifier {
    pub published: Vec<String>,
    pub fail: bool,
    timeline: Timeline,
}

impl RecordingNotifier {
    pub fn new(timeline: &Timeline) -> Self {
        Self {
            published: Vec::new(),
            fail: false,
            timeline: timeline.clone(),
        }
    }

    pub fn failing(timeline: &Timeline) -> Self {
        Self {
            fail: true,
            ..Self::new(timeline)
        }
    }
}

impl NotifierPort for RecordingNotifier {
    fn publish(&mut self, message: &str) -> Result<(), NotifyError> {
        self.timeline.push(Op::Publish(message.to_owned()));
        if self.fail {
            return Err(NotifyError::Rejected(503));
        }
        self.published.push(message.to_owned());
        Ok(())
    }
}

// ── FixedClock ───────────────────────────────────────────────

pub struct FixedClock(pub NaiveTime);

impl FixedClock {
    pub fn at(h: u32, m: u32, s: u32) -> Self {
        Self(NaiveTime::from_hms_opt(h, m, s).unwrap())
    }
}

impl ClockPort for FixedClock {
    fn local_time(&self) -> NaiveTime {
        self.0
    }
}

// ── MemoryStore ──────────────────────────────────────────────

pub struct MemoryStore {
    pub saved: RefCell<Option<ReferenceSet>>,
    pub fail_save: bool,
    timeline: Timeline,
}

impl MemoryStore {
    pub fn new(timeline: &Timeline) -> Self {
        Self {
            saved: RefCell::new(None),
            fail_save: false,
            timeline: timeline.clone(),
        }
    }
}

impl CalibrationPort for MemoryStore {
    fn load(&self) -> Result<ReferenceSet, RecordError> {
        self.saved.borrow().ok_or(RecordError::Missing)
    }

    fn save(&self, refs: &ReferenceSet) -> Result<(), RecordError> {
        self.timeline.push(Op::Save);
        if self.fail_save {
            return Err(RecordError::Io(std::io::ErrorKind::PermissionDenied));
        }
        *self.saved.borrow_mut() = Some(*refs);
        Ok(())
    }
}

// ── ScriptedOperator ─────────────────────────────────────────

pub struct ScriptedOperator {
    pub prompts: Vec<String>,
    timeline: Timeline,
}

impl ScriptedOperator {
    pub fn new(timeline: &Timeline) -> Self {
        Self {
            prompts: Vec::new(),
            timeline: timeline.clone(),
        }
    }
}

impl OperatorPort for ScriptedOperator {
    fn acknowledge(&mut self, prompt: &str) {
        self.timeline.push(Op::Ack);
        self.prompts.push(prompt.to_owned());
    }
}

// ── EventLog ─────────────────────────────────────────────────

#[derive(Default)]
pub struct EventLog {
    pub events: Vec<AppEvent>,
}

impl EventLog {
    pub fn new() -> Self {
        Self::default()
    }
}

impl EventSink for EventLog {
    fn emit(&mut self, event: &AppEvent) {
        self.events.push(event.clone());
    }
}

// ── Fixtures ─────────────────────────────────────────────────

pub const CLOSED: Vector3 = Vector3::new(0.0, 0.0, 1.0);
pub const INSIDE: Vector3 = Vector3::new(0.0, 0.7, 0.7);
pub const OUTSIDE: Vector3 = Vector3::new(0.0, -0.7, 0.7);

pub fn refs() -> ReferenceSet {
    ReferenceSet::new(CLOSED, INSIDE, OUTSIDE)
}
