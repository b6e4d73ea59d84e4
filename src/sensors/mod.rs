//! Sensor subsystem: the ADXL345 driver and the averaging [`VectorSampler`].
//!
//! The sampler is the only consumer of the raw accelerometer port.  It
//! smooths out flap vibration and bus jitter by averaging a fixed number of
//! readings taken a fixed interval apart.

pub mod adxl345;

use embedded_hal::delay::DelayNs;

use crate::app::ports::AccelerometerPort;
use crate::config::MonitorConfig;
use crate::error::SensorError;
use crate::flap::Vector3;

/// Produces one stabilised vector per call by averaging raw readings.
///
/// Owns the accelerometer and the delay provider, so callers that need to
/// pause between captures borrow the delay through [`delay_mut`](Self::delay_mut).
pub struct VectorSampler<A, D> {
    accel: A,
    delay: D,
    samples: u8,
    interval_ms: u32,
}

impl<A: AccelerometerPort, D: DelayNs> VectorSampler<A, D> {
    /// `samples` is clamped to at least one reading.
    pub fn new(accel: A, delay: D, samples: u8, interval_ms: u32) -> Self {
        Self {
            accel,
            delay,
            samples: samples.max(1),
            interval_ms,
        }
    }

    pub fn from_config(accel: A, delay: D, config: &MonitorConfig) -> Self {
        Self::new(
            accel,
            delay,
            config.samples_per_vector,
            config.sample_interval_ms,
        )
    }

    /// Take `samples` readings, each followed by the sample interval, and
    /// return their arithmetic mean.
    ///
    /// A bus error aborts the whole sample; there is no retry here.
    pub fn sample(&mut self) -> Result<Vector3, SensorError> {
        let mut sum = Vector3::ZERO;
        for _ in 0..self.samples {
            sum += self.accel.read_once()?;
            self.delay.delay_ms(self.interval_ms);
        }
        Ok(sum / f32::from(self.samples))
    }

    pub fn delay_mut(&mut self) -> &mut D {
        &mut self.delay
    }

    pub fn into_parts(self) -> (A, D) {
        (self.accel, self.delay)
    }
}
