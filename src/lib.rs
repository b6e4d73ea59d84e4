//! FlapWatch library.
//!
//! Infers the position of a cat flap (closed / swung inside / swung
//! outside) from an ADXL345 accelerometer and announces comings and goings.
//! Exposes the pure-logic modules for integration testing; hardware and
//! network adapters that need the `linux` feature are gated inside
//! [`adapters`].

#![deny(unused_must_use)]

pub mod adapters;
pub mod app;
pub mod calibration;
pub mod config;
pub mod error;
pub mod flap;
pub mod sensors;
