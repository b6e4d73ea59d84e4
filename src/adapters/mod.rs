//! Adapters: concrete implementations of the hexagonal port traits.
//!
//! | Adapter        | Implements         | Connects to               |
//! |----------------|--------------------|---------------------------|
//! | `console`      | OperatorPort       | stdin / stdout            |
//! | `log_sink`     | EventSink          | `log` facade              |
//! | `mastodon`     | NotifierPort       | Mastodon REST API         |
//! | `states_file`  | CalibrationPort    | `states.max` text file    |
//! | `time`         | ClockPort          | local system clock        |
//!
//! The accelerometer port is implemented by the ADXL345 driver in
//! [`crate::sensors::adxl345`] on top of any `embedded-hal` SPI device.

pub mod console;
pub mod log_sink;
#[cfg(feature = "linux")]
pub mod mastodon;
pub mod states_file;
pub mod time;
