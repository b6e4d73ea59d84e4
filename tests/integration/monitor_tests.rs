//! Monitor loop tests.
//!
//! Drives `MonitorLoop::step` through scripted flap movements and checks
//! which transitions get announced, the message wording and the quiet
//! period that follows each announcement.

use flapwatch::app::events::{AppEvent, CountdownPhase};
use flapwatch::app::monitor::{MonitorLoop, MonitorState};
use flapwatch::error::{NotifyError, SensorError};
use flapwatch::flap::{FlapState, Vector3};

use crate::mock_hw::{
    CLOSED, EventLog, FixedClock, INSIDE, OUTSIDE, Op, RecordingNotifier, SAMPLE_INTERVAL_MS,
    Timeline, refs, sampler,
};

const QUIET: u32 = 15;

fn monitor() -> MonitorLoop {
    MonitorLoop::new(refs(), QUIET, "Max")
}

/// Step once per scripted vector and collect the state after each step.
fn drive(
    m: &MonitorLoop,
    vectors: &[Vector3],
    tl: &Timeline,
    notifier: &mut RecordingNotifier,
    log: &mut EventLog,
) -> Vec<FlapState> {
    let mut s = sampler(vectors, tl);
    let clock = FixedClock::at(12, 34, 56);
    let mut state = MonitorState::default();
    let mut seen = Vec::new();
    for _ in vectors {
        state = m.step(state, &mut s, notifier, &clock, log).unwrap();
        seen.push(state.last_observed);
    }
    seen
}

#[test]
fn flap_session_announces_only_qualifying_transitions() {
    let tl = Timeline::new();
    let mut n = RecordingNotifier::new(&tl);
    let mut log = EventLog::new();

    let states = drive(
        &monitor(),
        &[INSIDE, INSIDE, CLOSED, OUTSIDE],
        &tl,
        &mut n,
        &mut log,
    );

    assert_eq!(
        states,
        [
            FlapState::Inside,
            FlapState::Inside,
            FlapState::Closed,
            FlapState::Outside,
        ]
    );
    assert_eq!(
        n.published,
        ["Max has been home since 12:34:56", "Max left at 12:34:56"]
    );
    // One quiet period per announcement.
    assert_eq!(tl.count(&Op::Delay(1000)), 2 * QUIET as usize);
}

#[test]
fn quiet_period_follows_publish_before_next_read() {
    let tl = Timeline::new();
    let mut n = RecordingNotifier::new(&tl);

    drive(&monitor(), &[OUTSIDE, CLOSED], &tl, &mut n, &mut EventLog::new());

    let ops = tl.ops();
    let publish_at = ops
        .iter()
        .position(|o| matches!(o, Op::Publish(_)))
        .unwrap();
    let quiet: Vec<&Op> = ops[publish_at + 1..]
        .iter()
        .take_while(|o| **o != Op::Read)
        .collect();
    assert_eq!(quiet.len(), QUIET as usize);
    assert!(quiet.iter().all(|o| **o == Op::Delay(1000)));

    // Publish happens after the last interval of the triggering sample.
    assert_eq!(
        tl.delay_after_read(2),
        SAMPLE_INTERVAL_MS + QUIET * 1000
    );
}

#[test]
fn staying_closed_never_notifies() {
    let tl = Timeline::new();
    let mut n = RecordingNotifier::new(&tl);

    let states = drive(&monitor(), &[CLOSED, CLOSED, CLOSED], &tl, &mut n, &mut EventLog::new());

    assert!(states.iter().all(|s| *s == FlapState::Closed));
    assert!(n.published.is_empty());
    assert_eq!(tl.count(&Op::Delay(1000)), 0);
}

#[test]
fn swinging_straight_through_announces_both_directions() {
    let tl = Timeline::new();
    let mut n = RecordingNotifier::new(&tl);

    drive(&monitor(), &[OUTSIDE, INSIDE], &tl, &mut n, &mut EventLog::new());

    assert_eq!(
        n.published,
        ["Max left at 12:34:56", "Max has been home since 12:34:56"]
    );
}

#[test]
fn publish_failure_is_not_fatal() {
    let tl = Timeline::new();
    let mut n = RecordingNotifier::failing(&tl);
    let mut log = EventLog::new();

    let states = drive(&monitor(), &[INSIDE, CLOSED], &tl, &mut n, &mut log);

    assert_eq!(states, [FlapState::Inside, FlapState::Closed]);
    assert!(log.events.iter().any(|e| matches!(
        e,
        AppEvent::NotifyFailed(NotifyError::Rejected(503))
    )));
    // The quiet period still applies after a failed publish.
    assert_eq!(tl.count(&Op::Delay(1000)), QUIET as usize);
}

#[test]
fn successful_publish_emits_notified_event() {
    let tl = Timeline::new();
    let mut n = RecordingNotifier::new(&tl);
    let mut log = EventLog::new();

    drive(&monitor(), &[OUTSIDE], &tl, &mut n, &mut log);

    assert!(log.events.contains(&AppEvent::Notified {
        state: FlapState::Outside,
        message: "Max left at 12:34:56".into(),
    }));
    let quiet_ticks = log
        .events
        .iter()
        .filter(|e| {
            matches!(
                e,
                AppEvent::Countdown {
                    phase: CountdownPhase::Quiet,
                    ..
                }
            )
        })
        .count();
    assert_eq!(quiet_ticks, QUIET as usize);
}

#[test]
fn trace_reports_every_measurement() {
    let tl = Timeline::new();
    let mut n = RecordingNotifier::new(&tl);

    let mut quiet_log = EventLog::new();
    drive(&monitor(), &[CLOSED, CLOSED], &tl, &mut n, &mut quiet_log);
    assert!(
        !quiet_log
            .events
            .iter()
            .any(|e| matches!(e, AppEvent::Measurement(_)))
    );

    let mut trace_log = EventLog::new();
    let traced = monitor().with_trace(true);
    drive(&traced, &[CLOSED, CLOSED], &tl, &mut n, &mut trace_log);
    let measurements: Vec<&AppEvent> = trace_log
        .events
        .iter()
        .filter(|e| matches!(e, AppEvent::Measurement(_)))
        .collect();
    assert_eq!(measurements.len(), 2);
    assert_eq!(*measurements[0], AppEvent::Measurement(CLOSED));
}

#[test]
fn run_stops_on_sensor_failure() {
    let tl = Timeline::new();
    let mut n = RecordingNotifier::new(&tl);
    let mut log = EventLog::new();
    let mut s = sampler(&[INSIDE, CLOSED], &tl);

    let err = monitor()
        .run(&mut s, &mut n, &FixedClock::at(8, 0, 5), &mut log)
        .unwrap_err();

    assert!(matches!(err, SensorError::Bus(_)));
    assert_eq!(log.events.first(), Some(&AppEvent::MonitorStarted));
    assert_eq!(n.published, ["Max has been home since 08:00:05"]);
}
