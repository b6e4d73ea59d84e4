//! Application core: flap logic behind port traits, zero direct I/O.
//!
//! The [`calibrator`] builds a reference set interactively, the
//! [`monitor`] loop classifies live readings against it.  All interaction
//! with hardware, storage, the network and the console happens through the
//! **port traits** in [`ports`], keeping this layer testable without real
//! peripherals.

pub mod calibrator;
pub mod events;
pub mod monitor;
pub mod pacing;
pub mod ports;
