//! Definiciones de tipos y constantes comunes para el MPU-9250

use crate::register::{bit_pos, registers};

/// Tabla de factores de escala del giroscopio, LSB/(°/s), indexada por selector
pub const GYRO_SCALE_FACTORS: [f32; 4] = [131.072, 65.536, 32.768, 16.384];

/// Tabla de factores de escala del acelerómetro, LSB/g, indexada por selector
pub const ACCEL_SCALE_FACTORS: [f32; 4] = [16384.0, 8192.0, 4096.0, 2048.0];

/// Escalas completas disponibles para el giroscopio
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[repr(u8)]
pub enum GyroFullScale {
    /// ±250 dps
    #[default]
    Fs250Dps = 0,
    /// ±500 dps
    Fs500Dps = 1,
    /// ±1000 dps
    Fs1000Dps = 2,
    /// ±2000 dps
    Fs2000Dps = 3,
}

// Añadimos implementación para convertir desde u8
impl From<u8> for GyroFullScale {
    fn from(value: u8) -> Self {
        match value & 0x03 {
            0 => GyroFullScale::Fs250Dps,
            1 => GyroFullScale::Fs500Dps,
            2 => GyroFullScale::Fs1000Dps,
            _ => GyroFullScale::Fs2000Dps,
        }
    }
}

/// Escalas completas disponibles para el acelerómetro
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[repr(u8)]
pub enum AccelFullScale {
    /// ±2g
    #[default]
    Fs2G = 0,
    /// ±4g
    Fs4G = 1,
    /// ±8g
    Fs8G = 2,
    /// ±16g
    Fs16G = 3,
}

// Añadimos implementación para convertir desde u8
impl From<u8> for AccelFullScale {
    fn from(value: u8) -> Self {
        match value & 0x03 {
            0 => AccelFullScale::Fs2G,
            1 => AccelFullScale::Fs4G,
            2 => AccelFullScale::Fs8G,
            _ => AccelFullScale::Fs16G,
        }
    }
}

/// Selector de rango de un sensor: índice en su tabla y bits de auto-test
pub trait FullScale: Copy + Default + core::fmt::Debug {
    /// Registro de configuración del sensor
    const CONFIG_REG: u8;
    /// Desplazamiento del campo FS_SEL
    const FS_SEL_SHIFT: u8;
    /// Bits de auto-test (X, Y, Z)
    const SELF_TEST_BITS: [u8; 3];

    /// Índice del selector (0..=3)
    fn index(self) -> usize;

    /// Factor de escala (LSB por unidad física)
    fn scale_factor(self) -> f32;
}

impl FullScale for GyroFullScale {
    const CONFIG_REG: u8 = registers::GYRO_CONFIG;
    const FS_SEL_SHIFT: u8 = bit_pos::GYRO_FS_SEL;
    const SELF_TEST_BITS: [u8; 3] = [
        bit_pos::XGYRO_CTEN,
        bit_pos::YGYRO_CTEN,
        bit_pos::ZGYRO_CTEN,
    ];

    fn index(self) -> usize {
        self as usize
    }

    fn scale_factor(self) -> f32 {
        GYRO_SCALE_FACTORS[self.index()]
    }
}

impl FullScale for AccelFullScale {
    const CONFIG_REG: u8 = registers::ACCEL_CONFIG;
    const FS_SEL_SHIFT: u8 = bit_pos::ACCEL_FS_SEL;
    const SELF_TEST_BITS: [u8; 3] = [bit_pos::AX_ST_EN, bit_pos::AY_ST_EN, bit_pos::AZ_ST_EN];

    fn index(self) -> usize {
        self as usize
    }

    fn scale_factor(self) -> f32 {
        ACCEL_SCALE_FACTORS[self.index()]
    }
}

/// Configuración de un sensor (giroscopio o acelerómetro).
///
/// El factor de escala solo cambia a través de [`AxisConfig::set_scale`], de
/// modo que siempre corresponde al selector almacenado.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AxisConfig<S: FullScale> {
    scale: S,
    scale_factor: f32,
    /// Activa los bits de auto-test al aplicar la configuración
    pub self_test: bool,
    /// Offset DC por eje (X, Y, Z) en cuentas
    pub dc_bias: [i16; 3],
}

impl<S: FullScale> Default for AxisConfig<S> {
    fn default() -> Self {
        let scale = S::default();
        Self {
            scale,
            scale_factor: scale.scale_factor(),
            self_test: false,
            dc_bias: [0; 3],
        }
    }
}

impl<S: FullScale> AxisConfig<S> {
    /// Selector aplicado
    pub fn scale(&self) -> S {
        self.scale
    }

    /// Factor de escala del selector aplicado
    pub fn scale_factor(&self) -> f32 {
        self.scale_factor
    }

    pub(crate) fn set_scale(&mut self, scale: S) {
        self.scale = scale;
        self.scale_factor = scale.scale_factor();
    }

    /// Byte de configuración para el registro del sensor
    pub fn config_byte(&self) -> u8 {
        let mut data = (self.scale.index() as u8) << S::FS_SEL_SHIFT;

        if self.self_test {
            for bit in S::SELF_TEST_BITS {
                data |= 1 << bit;
            }
        }

        data
    }
}

/// Configuración del giroscopio
pub type GyroConfig = AxisConfig<GyroFullScale>;

/// Configuración del acelerómetro
pub type AccelConfig = AxisConfig<AccelFullScale>;

/// Lectura de un sensor: cuentas tal como llegan del bus y valores físicos
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SensorReading {
    /// Cuentas tal como llegan del bus [x, y, z], sin restar el offset.
    /// La corrección solo se aplica en `value`.
    pub raw: [i16; 3],
    /// Valores físicos calculados con las cuentas corregidas,
    /// `(raw - dc_bias) / scale_factor` [x, y, z] (°/s o g)
    pub value: [f32; 3],
}

/// Estado de configuración del dispositivo
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DeviceState {
    /// Sin inicializar
    #[default]
    Unconfigured,
    /// Inicializado con rangos y factores de escala aplicados
    Configured,
    /// Inicializado y con offsets calculados
    Calibrated,
}
