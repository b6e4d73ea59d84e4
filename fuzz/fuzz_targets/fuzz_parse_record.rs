//! Fuzz target: `calibration::parse_record`
//!
//! Feeds arbitrary text to the calibration record parser.  It must never
//! panic, and anything it accepts must survive a format/parse cycle
//! unchanged.
//!
//! cargo fuzz run fuzz_parse_record

#![no_main]

use flapwatch::calibration::{format_record, parse_record};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Ok(text) = core::str::from_utf8(data) else {
        return;
    };

    if let Ok(refs) = parse_record(text) {
        for state in flapwatch::flap::FlapState::CAPTURE_ORDER {
            assert!(refs.get(state).is_finite(), "accepted a non-finite vector");
        }
        let again = parse_record(&format_record(&refs)).expect("re-parse of formatted record");
        assert_eq!(again, refs);
    }
});
