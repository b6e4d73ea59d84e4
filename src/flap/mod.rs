//! Flap domain model: measured vectors, the three flap states, and the
//! reference set the classifier compares against.

pub mod classifier;
mod vector;

use core::fmt;

pub use classifier::classify;
pub use vector::Vector3;

/// Physical position of the flap.  Exactly one is active at any instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum FlapState {
    #[default]
    Closed,
    /// Swung into the house; the cat came home.
    Inside,
    /// Swung out of the house; the cat left.
    Outside,
}

impl FlapState {
    /// Order in which states are captured during calibration and written
    /// to the calibration record.
    pub const CAPTURE_ORDER: [Self; 3] = [Self::Closed, Self::Outside, Self::Inside];

    /// Single-character tag used in the calibration record.
    pub const fn tag(self) -> char {
        match self {
            Self::Closed => 'C',
            Self::Inside => 'I',
            Self::Outside => 'O',
        }
    }

    /// Inverse of [`tag`](Self::tag).  Unknown tags yield `None`.
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "C" => Some(Self::Closed),
            "I" => Some(Self::Inside),
            "O" => Some(Self::Outside),
            _ => None,
        }
    }
}

impl fmt::Display for FlapState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Closed => write!(f, "Closed"),
            Self::Inside => write!(f, "Inside"),
            Self::Outside => write!(f, "Outside"),
        }
    }
}

/// One reference vector per flap state.
///
/// The struct can only be built fully populated, so a partially calibrated
/// or partially loaded set never reaches the classifier.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReferenceSet {
    pub closed: Vector3,
    pub inside: Vector3,
    pub outside: Vector3,
}

impl ReferenceSet {
    pub const fn new(closed: Vector3, inside: Vector3, outside: Vector3) -> Self {
        Self {
            closed,
            inside,
            outside,
        }
    }

    pub const fn get(&self, state: FlapState) -> Vector3 {
        match state {
            FlapState::Closed => self.closed,
            FlapState::Inside => self.inside,
            FlapState::Outside => self.outside,
        }
    }
}
