//! Wall-clock adapter.
//!
//! Implements [`ClockPort`] with the host's local time zone via `chrono`.
//! On the Pi this follows the system clock, which is NTP-synced by the OS.

use chrono::{Local, NaiveTime};

use crate::app::ports::ClockPort;

#[derive(Debug, Default, Clone, Copy)]
pub struct LocalClock;

impl LocalClock {
    pub fn new() -> Self {
        Self
    }
}

impl ClockPort for LocalClock {
    fn local_time(&self) -> NaiveTime {
        Local::now().time()
    }
}
