//! Configuración del driver y del procedimiento de calibración

use crate::types::{AccelFullScale, GyroFullScale};

/// Número de muestras promediadas por defecto en la calibración
pub const DEFAULT_CALIBRATION_SAMPLES: u16 = 1500;

/// Presupuesto de sondeos por defecto (100 sondeos por muestra)
pub const DEFAULT_MAX_POLLS: u32 = DEFAULT_CALIBRATION_SAMPLES as u32 * 100;

/// Configuración aplicada en la inicialización
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DriverConfig {
    /// Rango inicial del giroscopio
    pub gyro_scale: GyroFullScale,
    /// Rango inicial del acelerómetro
    pub accel_scale: AccelFullScale,
    /// Divisor de la tasa de muestreo (SMPLRT_DIV)
    pub sample_rate_divider: u8,
    /// Filtro paso bajo digital (CONFIG, bits 2:0)
    pub dlpf: u8,
    /// Espera tras el reset; no hay confirmación de fin de reset
    pub reset_delay_ms: u32,
}

impl Default for DriverConfig {
    fn default() -> Self {
        Self {
            gyro_scale: GyroFullScale::Fs250Dps,
            accel_scale: AccelFullScale::Fs2G,
            sample_rate_divider: 0,
            dlpf: 0,
            reset_delay_ms: 100,
        }
    }
}

impl DriverConfig {
    pub fn with_gyro_scale(mut self, scale: GyroFullScale) -> Self {
        self.gyro_scale = scale;
        self
    }

    pub fn with_accel_scale(mut self, scale: AccelFullScale) -> Self {
        self.accel_scale = scale;
        self
    }

    pub fn with_sample_rate_divider(mut self, divider: u8) -> Self {
        self.sample_rate_divider = divider;
        self
    }

    /// Solo se usan los 3 bits bajos
    pub fn with_dlpf(mut self, dlpf: u8) -> Self {
        self.dlpf = dlpf & 0x07;
        self
    }

    pub fn with_reset_delay_ms(mut self, ms: u32) -> Self {
        self.reset_delay_ms = ms;
        self
    }
}

/// Parámetros de la calibración de offsets
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CalibrationConfig {
    /// Muestras listas a promediar
    pub samples: u16,
    /// Máximo de lecturas de estado antes de abandonar. `None` espera sin
    /// límite: el llamante debe aportar su propio watchdog.
    pub max_polls: Option<u32>,
    /// Espera entre sondeos sin dato listo (µs)
    pub poll_interval_us: u32,
}

impl Default for CalibrationConfig {
    fn default() -> Self {
        Self {
            samples: DEFAULT_CALIBRATION_SAMPLES,
            max_polls: Some(DEFAULT_MAX_POLLS),
            poll_interval_us: 0,
        }
    }
}

impl CalibrationConfig {
    pub fn with_samples(mut self, samples: u16) -> Self {
        self.samples = samples;
        self
    }

    pub fn with_max_polls(mut self, max_polls: Option<u32>) -> Self {
        self.max_polls = max_polls;
        self
    }

    pub fn with_poll_interval_us(mut self, us: u32) -> Self {
        self.poll_interval_us = us;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_use_narrowest_gyro_and_2g() {
        let config = DriverConfig::default();
        assert_eq!(config.gyro_scale, GyroFullScale::Fs250Dps);
        assert_eq!(config.accel_scale, AccelFullScale::Fs2G);
    }

    #[test]
    fn calibration_defaults_are_bounded() {
        let config = CalibrationConfig::default();
        assert_eq!(config.samples, 1500);
        assert_eq!(config.max_polls, Some(150_000));
    }

    #[test]
    fn dlpf_is_masked() {
        assert_eq!(DriverConfig::default().with_dlpf(0xFF).dlpf, 0x07);
    }
}
