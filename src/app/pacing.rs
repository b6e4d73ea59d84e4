//! Blocking countdowns on top of [`DelayNs`].

use embedded_hal::delay::DelayNs;

use super::events::{AppEvent, CountdownPhase};
use super::ports::EventSink;

const TICK_MS: u32 = 1_000;

/// Block for `secs` seconds in one-second steps, emitting a
/// [`AppEvent::Countdown`] before each step (`secs`, `secs - 1`, …, 1).
pub fn countdown(
    delay: &mut impl DelayNs,
    phase: CountdownPhase,
    secs: u32,
    sink: &mut impl EventSink,
) {
    for remaining_secs in (1..=secs).rev() {
        sink.emit(&AppEvent::Countdown {
            phase,
            remaining_secs,
        });
        delay.delay_ms(TICK_MS);
    }
}
