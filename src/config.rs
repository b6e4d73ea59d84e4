//! Monitor configuration parameters
//!
//! All tunable parameters for FlapWatch.  Defaults reproduce the deployed
//! cat-door setup; any field can be overridden from a JSON file passed with
//! `--config`.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::error::Error;
use crate::sensors::adxl345::{GravityRange, MAX_SPI_CLOCK_HZ};

/// Core monitor configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MonitorConfig {
    // --- Sampling ---
    /// Raw readings averaged into one vector
    pub samples_per_vector: u8,
    /// Pause after each raw reading (milliseconds)
    pub sample_interval_ms: u32,

    // --- Calibration ---
    /// Time the operator gets to move the flap before a capture (seconds)
    pub settle_secs: u32,
    /// Pause between end of calibration and start of monitoring (seconds)
    pub cooldown_secs: u32,
    /// Calibration record location
    pub states_file: PathBuf,

    // --- Monitoring ---
    /// Sampling pause after a notification (seconds)
    pub quiet_period_secs: u32,
    /// Name used in notification messages
    pub subject_name: String,

    // --- Notifications ---
    /// Mastodon instance host name
    pub mastodon_instance: String,
    /// File holding the Mastodon access token
    pub token_file: PathBuf,

    // --- Hardware ---
    /// spidev node the ADXL345 is wired to
    pub spi_device: PathBuf,
    /// SPI clock (Hz)
    pub spi_clock_hz: u32,
    /// Accelerometer measurement range
    pub gravity_range: GravityRange,
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            // Sampling
            samples_per_vector: 3,
            sample_interval_ms: 200,

            // Calibration
            settle_secs: 4,
            cooldown_secs: 4,
            states_file: PathBuf::from("states.max"),

            // Monitoring
            quiet_period_secs: 15,
            subject_name: "Max".into(),

            // Notifications
            mastodon_instance: "botsin.space".into(),
            token_file: PathBuf::from("secret.txt"),

            // Hardware
            spi_device: PathBuf::from("/dev/spidev0.0"),
            spi_clock_hz: MAX_SPI_CLOCK_HZ,
            gravity_range: GravityRange::G4,
        }
    }
}

impl MonitorConfig {
    /// Parse a JSON document; absent fields keep their defaults.  The
    /// result is validated before it is returned.
    pub fn from_json(json: &str) -> Result<Self, Error> {
        let config: Self =
            serde_json::from_str(json).map_err(|_| Error::Config("invalid JSON config"))?;
        config.validate()?;
        Ok(config)
    }

    /// Range-check every field.  Invalid values are rejected, never
    /// clamped.
    pub fn validate(&self) -> Result<(), Error> {
        if !(1..=32).contains(&self.samples_per_vector) {
            return Err(Error::Config("samples_per_vector must be 1–32"));
        }
        if self.sample_interval_ms > 10_000 {
            return Err(Error::Config("sample_interval_ms must be 0–10000"));
        }
        if self.settle_secs > 60 {
            return Err(Error::Config("settle_secs must be 0–60"));
        }
        if self.cooldown_secs > 60 {
            return Err(Error::Config("cooldown_secs must be 0–60"));
        }
        if !(1..=3600).contains(&self.quiet_period_secs) {
            return Err(Error::Config("quiet_period_secs must be 1–3600"));
        }
        if self.subject_name.trim().is_empty() {
            return Err(Error::Config("subject_name must not be empty"));
        }
        if self.mastodon_instance.trim().is_empty() {
            return Err(Error::Config("mastodon_instance must not be empty"));
        }
        if self.states_file.as_os_str().is_empty()
            || self.token_file.as_os_str().is_empty()
            || self.spi_device.as_os_str().is_empty()
        {
            return Err(Error::Config("file paths must not be empty"));
        }
        if self.spi_clock_hz == 0 || self.spi_clock_hz > MAX_SPI_CLOCK_HZ {
            return Err(Error::Config("spi_clock_hz must be 1–5000000"));
        }
        Ok(())
    }
}
