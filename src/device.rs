use core::fmt;

use embedded_hal::delay::DelayNs;

use crate::calibration::{self, CalibrationResult};
use crate::config::{CalibrationConfig, DriverConfig};
use crate::conversion::{assemble_axes, raw_to_physical, temp_raw_to_celsius};
use crate::interface::Interface;
use crate::register::{bit_pos, registers, WHO_AM_I_VALUE};
use crate::types::{
    AccelConfig, AccelFullScale, DeviceState, FullScale, GyroConfig, GyroFullScale, SensorReading,
};

// Define the device structure and enums
pub struct Mpu9250<I, D> {
    pub(crate) interface: I,
    pub(crate) delay: D,
    pub(crate) gyro: GyroConfig,
    pub(crate) accel: AccelConfig,
    pub(crate) state: DeviceState,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mpu9250Error {
    /// Fallo de lectura o escritura en el bus
    InterfaceError,
    /// Argumento fuera de rango
    InvalidParameter,
    /// WHO_AM_I no coincide; contiene el valor leído
    WhoAmIError(u8),
    /// La calibración agotó su presupuesto de sondeos
    Timeout,
    /// Operación no permitida en el estado actual del driver
    InvalidOperation,
}

impl Mpu9250Error {
    pub fn from_error<E: fmt::Debug>(error: E) -> Self {
        log::debug!("Error de bus: {:?}", error);
        Mpu9250Error::InterfaceError
    }
}

impl fmt::Display for Mpu9250Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Mpu9250Error::InterfaceError => write!(f, "bus transfer failed"),
            Mpu9250Error::InvalidParameter => write!(f, "invalid parameter"),
            Mpu9250Error::WhoAmIError(found) => write!(
                f,
                "unexpected WHO_AM_I 0x{:02X} (expected 0x{:02X})",
                found, WHO_AM_I_VALUE
            ),
            Mpu9250Error::Timeout => write!(f, "timed out waiting for data ready"),
            Mpu9250Error::InvalidOperation => write!(f, "device not initialized"),
        }
    }
}

impl<I, D> Mpu9250<I, D>
where
    I: Interface,
    I::Error: fmt::Debug,
    D: DelayNs,
{
    /// Create a new instance of Mpu9250. No bus traffic until `initialize`.
    pub fn new(interface: I, delay: D) -> Self {
        Self {
            interface,
            delay,
            gyro: GyroConfig::default(),
            accel: AccelConfig::default(),
            state: DeviceState::Unconfigured,
        }
    }

    /// Consume el driver y devuelve la interfaz y el retardo
    pub fn release(self) -> (I, D) {
        (self.interface, self.delay)
    }

    /// Leer un registro
    pub fn read_reg(&mut self, reg: u8) -> Result<u8, Mpu9250Error> {
        let mut data = [0u8];
        self.interface
            .read_reg(reg, &mut data)
            .map_err(Mpu9250Error::from_error)?;

        Ok(data[0])
    }

    /// Leer registros consecutivos a partir de `reg`
    pub fn read_regs(&mut self, reg: u8, data: &mut [u8]) -> Result<(), Mpu9250Error> {
        self.interface
            .read_reg(reg, data)
            .map_err(Mpu9250Error::from_error)
    }

    /// Escribir a un registro
    pub fn write_reg(&mut self, reg: u8, value: u8) -> Result<(), Mpu9250Error> {
        self.interface
            .write_reg(reg, &[value])
            .map_err(Mpu9250Error::from_error)
    }

    /// Initialize the device with the default configuration
    pub fn initialize(&mut self) -> Result<(), Mpu9250Error> {
        self.initialize_with(&DriverConfig::default())
    }

    /// Initialize the device: identity check, reset, clock, sample rate,
    /// filter and both full-scale ranges.
    pub fn initialize_with(&mut self, config: &DriverConfig) -> Result<(), Mpu9250Error> {
        let whoami = self.get_whoami()?;
        if whoami != WHO_AM_I_VALUE {
            log::warn!(
                "WHO_AM_I inesperado: 0x{:02X} (esperado 0x{:02X})",
                whoami,
                WHO_AM_I_VALUE
            );
            return Err(Mpu9250Error::WhoAmIError(whoami));
        }

        self.soft_reset(config.reset_delay_ms)?;

        // Despertar y reloj interno
        self.write_reg(registers::PWR_MGMT_1, 0x00)?;
        self.write_reg(registers::SMPLRT_DIV, config.sample_rate_divider)?;
        // Solo DLPF_CFG; FIFO_MODE y EXT_SYNC_SET quedan a cero
        self.write_reg(registers::CONFIG, config.dlpf & 0x07)?;

        self.set_gyro_fullscale(config.gyro_scale)?;
        self.set_accel_fullscale(config.accel_scale)?;

        self.state = DeviceState::Configured;
        log::info!(
            "MPU-9250 inicializado (giroscopio {:?}, acelerómetro {:?})",
            config.gyro_scale,
            config.accel_scale
        );

        Ok(())
    }

    /// Perform a device reset and clear offsets and self-test flags.
    ///
    /// Waits `delay_ms` afterwards; the device gives no reset-complete signal
    /// that the driver checks.
    pub fn soft_reset(&mut self, delay_ms: u32) -> Result<(), Mpu9250Error> {
        self.gyro = GyroConfig::default();
        self.accel = AccelConfig::default();
        self.state = DeviceState::Unconfigured;

        self.write_reg(registers::PWR_MGMT_1, 1 << bit_pos::H_RESET)?;
        self.delay.delay_ms(delay_ms);
        Ok(())
    }

    /// Get device ID (WHO_AM_I register)
    pub fn get_whoami(&mut self) -> Result<u8, Mpu9250Error> {
        self.read_reg(registers::WHO_AM_I)
    }

    /// `true` si WHO_AM_I devuelve el valor del MPU-9250
    pub fn who_am_i(&mut self) -> Result<bool, Mpu9250Error> {
        Ok(self.get_whoami()? == WHO_AM_I_VALUE)
    }

    /// Set gyro full-scale range
    pub fn set_gyro_fullscale(&mut self, fsr: GyroFullScale) -> Result<(), Mpu9250Error> {
        self.gyro.set_scale(fsr);
        self.write_reg(GyroFullScale::CONFIG_REG, self.gyro.config_byte())
    }

    /// Set accel full-scale range
    pub fn set_accel_fullscale(&mut self, fsr: AccelFullScale) -> Result<(), Mpu9250Error> {
        self.accel.set_scale(fsr);
        self.write_reg(AccelFullScale::CONFIG_REG, self.accel.config_byte())
    }

    /// Activa o desactiva el auto-test del giroscopio y reaplica su configuración
    pub fn set_gyro_self_test(&mut self, enable: bool) -> Result<(), Mpu9250Error> {
        self.gyro.self_test = enable;
        self.set_gyro_fullscale(self.gyro.scale())
    }

    /// Activa o desactiva el auto-test del acelerómetro y reaplica su configuración
    pub fn set_accel_self_test(&mut self, enable: bool) -> Result<(), Mpu9250Error> {
        self.accel.self_test = enable;
        self.set_accel_fullscale(self.accel.scale())
    }

    pub fn gyro_config(&self) -> &GyroConfig {
        &self.gyro
    }

    pub fn accel_config(&self) -> &AccelConfig {
        &self.accel
    }

    pub fn state(&self) -> DeviceState {
        self.state
    }

    /// Comprueba el bit de dato listo en INT_STATUS. Un fallo de bus cuenta
    /// como "no disponible".
    pub fn data_available(&mut self) -> bool {
        match self.read_data_ready() {
            Ok(ready) => ready,
            Err(e) => {
                log::warn!("No se pudo leer INT_STATUS: {}", e);
                false
            }
        }
    }

    pub(crate) fn read_data_ready(&mut self) -> Result<bool, Mpu9250Error> {
        let status = self.read_reg(registers::INT_STATUS)?;
        Ok(status & (1 << bit_pos::RAW_DATA_RDY_INT) != 0)
    }

    /// Read gyroscope data from hardware registers, without offset correction
    pub fn read_gyroscope_raw(&mut self) -> Result<[i16; 3], Mpu9250Error> {
        let mut gyro_data = [0u8; 6];
        self.read_regs(registers::GYRO_XOUT_H, &mut gyro_data)?;
        Ok(assemble_axes(&gyro_data))
    }

    /// Read accelerometer data from hardware registers, without offset correction
    pub fn read_accelerometer_raw(&mut self) -> Result<[i16; 3], Mpu9250Error> {
        let mut accel_data = [0u8; 6];
        self.read_regs(registers::ACCEL_XOUT_H, &mut accel_data)?;
        Ok(assemble_axes(&accel_data))
    }

    /// Lee el giroscopio y devuelve grados/segundo con el offset restado
    pub fn read_gyroscope(&mut self) -> Result<SensorReading, Mpu9250Error> {
        let raw = self.read_gyroscope_raw()?;
        Ok(SensorReading {
            raw,
            value: raw_to_physical(raw, self.gyro.dc_bias, self.gyro.scale_factor()),
        })
    }

    /// Lee el acelerómetro y devuelve g con el offset restado
    pub fn read_accelerometer(&mut self) -> Result<SensorReading, Mpu9250Error> {
        let raw = self.read_accelerometer_raw()?;
        Ok(SensorReading {
            raw,
            value: raw_to_physical(raw, self.accel.dc_bias, self.accel.scale_factor()),
        })
    }

    /// Lee el valor raw de temperatura y lo convierte a grados Celsius
    pub fn read_temperature(&mut self) -> Result<f32, Mpu9250Error> {
        let mut buffer = [0u8; 2];
        self.read_regs(registers::TEMP_OUT_H, &mut buffer)?;
        Ok(temp_raw_to_celsius(i16::from_be_bytes(buffer)))
    }

    /// Calibra los offsets con la configuración por defecto
    pub fn calibrate(&mut self) -> Result<CalibrationResult, Mpu9250Error> {
        calibration::calibrate(self, &CalibrationConfig::default())
    }

    pub fn calibrate_with(
        &mut self,
        config: &CalibrationConfig,
    ) -> Result<CalibrationResult, Mpu9250Error> {
        calibration::calibrate(self, config)
    }
}
