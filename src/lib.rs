//! Biblioteca Rust para el sensor de movimiento InvenSense MPU-9250
//!
//! Esta biblioteca configura el giroscopio y el acelerómetro del MPU-9250,
//! convierte sus lecturas a unidades físicas y calcula los offsets DC de
//! ambos sensores. El magnetómetro integrado no está soportado.
#![cfg_attr(not(test), no_std)]

use embedded_hal::delay::DelayNs;
use embedded_hal::i2c::I2c;
use embedded_hal::spi::SpiDevice;

// Importaciones internas
pub mod calibration;
pub mod config;
pub mod conversion;
pub mod device;
pub mod interface;
pub mod register;
pub mod types;

#[cfg(test)]
mod mock;

// Re-exports públicos
pub use calibration::CalibrationResult;
pub use config::{CalibrationConfig, DriverConfig};
pub use device::{Mpu9250, Mpu9250Error};
pub use types::{AccelFullScale, DeviceState, GyroFullScale, SensorReading};

use crate::interface::{I2cInterface, SpiInterface};

/// Crea un nuevo dispositivo MPU-9250 usando el bus I2C
pub fn new_i2c_device<I, D>(i2c: I, address: u8, delay: D) -> Mpu9250<I2cInterface<I>, D>
where
    I: I2c,
    D: DelayNs,
{
    let interface = I2cInterface::new(i2c, address);
    Mpu9250::new(interface, delay)
}

/// Crea un nuevo dispositivo MPU-9250 usando un dispositivo SPI
pub fn new_spi_device<SPI, D>(spi: SPI, delay: D) -> Mpu9250<SpiInterface<SPI>, D>
where
    SPI: SpiDevice,
    D: DelayNs,
{
    let interface = SpiInterface::new(spi);
    Mpu9250::new(interface, delay)
}
