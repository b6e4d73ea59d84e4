//! Nearest-reference classification of a live measurement.
//!
//! The decision is a fixed two-round elimination rather than a global
//! minimum of three distances:
//!
//! ```text
//!   round 1:  Closed  vs  Inside   (Closed keeps ties)
//!   round 2:  winner  vs  Outside  (winner keeps ties)
//! ```
//!
//! In degenerate geometries this can differ from a true 3-way nearest
//! neighbour.  Deployed calibrations were tuned against this behaviour,
//! so it is kept bit-for-bit.

use super::{FlapState, ReferenceSet, Vector3};

/// Distances from a measurement to each reference vector.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Distances {
    pub closed: f32,
    pub inside: f32,
    pub outside: f32,
}

impl Distances {
    pub fn between(measurement: Vector3, refs: &ReferenceSet) -> Self {
        Self {
            closed: measurement.distance(refs.closed),
            inside: measurement.distance(refs.inside),
            outside: measurement.distance(refs.outside),
        }
    }
}

/// Classify `measurement` against `refs`.  Total: always returns a state,
/// including for non-finite input.
pub fn classify(measurement: Vector3, refs: &ReferenceSet) -> FlapState {
    let d = Distances::between(measurement, refs);

    let (finalist, finalist_distance) = if d.closed <= d.inside {
        (FlapState::Closed, d.closed)
    } else {
        (FlapState::Inside, d.inside)
    };

    if finalist_distance <= d.outside {
        finalist
    } else {
        FlapState::Outside
    }
}
