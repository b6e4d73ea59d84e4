//! ADXL345 3-axis accelerometer driver (SPI, 4-wire, mode 3).
//!
//! Generic over [`embedded_hal::spi::SpiDevice`], so the same driver runs on
//! the Raspberry Pi spidev node and against an in-memory register map in
//! tests.
//!
//! Readings use the 10-bit (non full-resolution) format: one LSB is
//! `full span / 1024` g, e.g. 7.8 mg at ±4 g.

use embedded_hal::spi::SpiDevice;
use serde::{Deserialize, Serialize};

use crate::app::ports::AccelerometerPort;
use crate::error::SensorError;
use crate::flap::Vector3;

// ── Registers ────────────────────────────────────────────────

const REG_DEVID: u8 = 0x00;
const REG_BW_RATE: u8 = 0x2C;
const REG_POWER_CTL: u8 = 0x2D;
const REG_DATA_FORMAT: u8 = 0x31;
const REG_DATAX0: u8 = 0x32;

const DEVICE_ID: u8 = 0xE5;
const SPI_READ: u8 = 0x80;
const SPI_MULTI_BYTE: u8 = 0x40;

/// 100 Hz output data rate.
const BW_RATE_100HZ: u8 = 0x0A;
const POWER_CTL_MEASURE: u8 = 0x08;

/// Maximum SPI clock supported by the part.
pub const MAX_SPI_CLOCK_HZ: u32 = 5_000_000;

/// Measurement range (DATA_FORMAT bits D1:D0).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GravityRange {
    G2,
    #[default]
    G4,
    G8,
    G16,
}

impl GravityRange {
    const fn format_bits(self) -> u8 {
        match self {
            Self::G2 => 0b00,
            Self::G4 => 0b01,
            Self::G8 => 0b10,
            Self::G16 => 0b11,
        }
    }

    /// Width of the measurable range in g (±4 g → 8 g).
    pub const fn span_g(self) -> f32 {
        match self {
            Self::G2 => 4.0,
            Self::G4 => 8.0,
            Self::G8 => 16.0,
            Self::G16 => 32.0,
        }
    }

    /// g per LSB in 10-bit mode.
    pub fn scale(self) -> f32 {
        self.span_g() / 1024.0
    }
}

/// Initialised ADXL345 in measurement mode.
pub struct Adxl345<SPI> {
    spi: SPI,
    range: GravityRange,
}

impl<SPI: SpiDevice> Adxl345<SPI> {
    /// Verify the device id, configure range and data rate, and start
    /// measuring.
    pub fn new(spi: SPI, range: GravityRange) -> Result<Self, SensorError> {
        let mut dev = Self { spi, range };

        let id = dev.read_register(REG_DEVID)?;
        if id != DEVICE_ID {
            return Err(SensorError::UnexpectedDevice(id));
        }

        dev.write_register(REG_DATA_FORMAT, range.format_bits())?;
        dev.write_register(REG_BW_RATE, BW_RATE_100HZ)?;
        dev.write_register(REG_POWER_CTL, POWER_CTL_MEASURE)?;

        log::info!("ADXL345: measuring at {:?}, 100 Hz", range);
        Ok(dev)
    }

    /// Raw X, Y, Z counts from one burst read of DATAX0..DATAZ1.
    pub fn read_raw(&mut self) -> Result<[i16; 3], SensorError> {
        let mut buf = [0u8; 7];
        buf[0] = REG_DATAX0 | SPI_READ | SPI_MULTI_BYTE;
        self.spi.transfer_in_place(&mut buf).map_err(bus_error)?;
        Ok([
            i16::from_le_bytes([buf[1], buf[2]]),
            i16::from_le_bytes([buf[3], buf[4]]),
            i16::from_le_bytes([buf[5], buf[6]]),
        ])
    }

    pub fn release(self) -> SPI {
        self.spi
    }

    fn read_register(&mut self, reg: u8) -> Result<u8, SensorError> {
        let mut buf = [reg | SPI_READ, 0];
        self.spi.transfer_in_place(&mut buf).map_err(bus_error)?;
        Ok(buf[1])
    }

    fn write_register(&mut self, reg: u8, value: u8) -> Result<(), SensorError> {
        self.spi.write(&[reg, value]).map_err(bus_error)
    }
}

impl<SPI: SpiDevice> AccelerometerPort for Adxl345<SPI> {
    fn read_once(&mut self) -> Result<Vector3, SensorError> {
        let [x, y, z] = self.read_raw()?;
        let scale = self.range.scale();
        Ok(Vector3::new(
            f32::from(x) * scale,
            f32::from(y) * scale,
            f32::from(z) * scale,
        ))
    }
}

fn bus_error<E: embedded_hal::spi::Error>(e: E) -> SensorError {
    SensorError::Bus(e.kind())
}
