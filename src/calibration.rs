//! Calibración de offsets del giroscopio y del acelerómetro
//!
//! Promedia un número fijo de muestras, tomando una por cada ciclo con dato
//! listo. Con el sensor en reposo y el eje Z vertical, el promedio es el error
//! sistemático de cada eje; al eje Z del acelerómetro se le descuenta 1g (un
//! factor de escala en cuentas) por muestra.
//!
//! Los offsets se guardan en el driver y se restan en cada lectura. No se
//! escriben en los registros de offset del chip: su formato no está
//! confirmado.

use core::fmt;

use embedded_hal::delay::DelayNs;

use crate::config::CalibrationConfig;
use crate::device::{Mpu9250, Mpu9250Error};
use crate::interface::Interface;
use crate::types::DeviceState;

/// Índice del eje que soporta la gravedad
const GRAVITY_AXIS: usize = 2;

/// Resultado de una calibración
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct CalibrationResult {
    pub gyro_bias: [i16; 3],
    pub accel_bias: [i16; 3],
    /// Lecturas de INT_STATUS realizadas
    pub polls: u32,
}

/// Calibra el acelerómetro y giroscopio
///
/// Requiere un dispositivo inicializado. Si falla (bus o presupuesto de
/// sondeos agotado) los offsets anteriores no se modifican.
pub fn calibrate<I, D>(
    device: &mut Mpu9250<I, D>,
    config: &CalibrationConfig,
) -> Result<CalibrationResult, Mpu9250Error>
where
    I: Interface,
    I::Error: fmt::Debug,
    D: DelayNs,
{
    if config.samples == 0 {
        return Err(Mpu9250Error::InvalidParameter);
    }
    if device.state == DeviceState::Unconfigured {
        log::warn!("Calibración rechazada: dispositivo sin inicializar");
        return Err(Mpu9250Error::InvalidOperation);
    }

    let gravity_counts = device.accel.scale_factor() as i64;
    let mut gyro_sum = [0i64; 3];
    let mut accel_sum = [0i64; 3];
    let mut collected: u16 = 0;
    let mut polls: u32 = 0;

    log::info!(
        "Calibrando con {} muestras (límite de sondeos: {:?})",
        config.samples,
        config.max_polls
    );

    while collected < config.samples {
        if let Some(max) = config.max_polls {
            if polls >= max {
                log::warn!(
                    "Calibración abortada: {} de {} muestras tras {} sondeos",
                    collected,
                    config.samples,
                    polls
                );
                return Err(Mpu9250Error::Timeout);
            }
        }
        polls = polls.saturating_add(1);

        if !device.read_data_ready()? {
            if config.poll_interval_us > 0 {
                device.delay.delay_us(config.poll_interval_us);
            }
            continue;
        }

        let gyro_raw = device.read_gyroscope_raw()?;
        let accel_raw = device.read_accelerometer_raw()?;

        for (sum, raw) in gyro_sum.iter_mut().zip(gyro_raw) {
            *sum += raw as i64;
        }
        for (axis, (sum, raw)) in accel_sum.iter_mut().zip(accel_raw).enumerate() {
            *sum += raw as i64;
            if axis == GRAVITY_AXIS {
                *sum -= gravity_counts;
            }
        }

        collected += 1;
    }

    let gyro_bias = average(gyro_sum, config.samples);
    let accel_bias = average(accel_sum, config.samples);

    device.gyro.dc_bias = gyro_bias;
    device.accel.dc_bias = accel_bias;
    device.state = DeviceState::Calibrated;

    log::info!("Calibración completada tras {} sondeos", polls);
    log::info!(
        "Offsets de giroscopio: [{}, {}, {}]",
        gyro_bias[0],
        gyro_bias[1],
        gyro_bias[2]
    );
    log::info!(
        "Offsets de acelerómetro: [{}, {}, {}]",
        accel_bias[0],
        accel_bias[1],
        accel_bias[2]
    );

    Ok(CalibrationResult {
        gyro_bias,
        accel_bias,
        polls,
    })
}

/// Media truncada hacia cero, saturada al rango de i16
fn average(sums: [i64; 3], samples: u16) -> [i16; 3] {
    sums.map(|sum| (sum / samples as i64).clamp(i16::MIN as i64, i16::MAX as i64) as i16)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::{MockInterface, NoopDelay};
    use crate::register::registers;
    use crate::types::AccelFullScale;

    // Bloques cuyo ensamblado no depende del par de bytes del eje Z
    // (byte 3 == byte 4).
    const GYRO_BLOCK: [u8; 6] = [0x01, 0x02, 0x03, 0x05, 0x05, 0xFF];
    const ACCEL_BLOCK: [u8; 6] = [0x00, 0x00, 0x00, 0x40, 0x40, 0x10];
    const GYRO_RAW: [i16; 3] = [258, 773, 1535];
    const ACCEL_RAW: [i16; 3] = [0, 64, 16400];

    fn ready_device() -> Mpu9250<MockInterface, NoopDelay> {
        let mut dev = Mpu9250::new(MockInterface::new(), NoopDelay::default());
        dev.initialize().unwrap();
        dev.interface.set_block(registers::GYRO_XOUT_H, GYRO_BLOCK);
        dev.interface.set_block(registers::ACCEL_XOUT_H, ACCEL_BLOCK);
        dev.interface.regs[registers::INT_STATUS as usize] = 0x01;
        dev
    }

    #[test]
    fn constant_samples_give_constant_bias() {
        let mut dev = ready_device();

        let result = dev.calibrate().unwrap();

        assert_eq!(result.gyro_bias, GYRO_RAW);
        assert_eq!(result.accel_bias, [0, 64, 16400 - 16384]);
        assert_eq!(result.polls, 1500);
        assert_eq!(dev.interface.status_reads, 1500);
        assert_eq!(dev.gyro_config().dc_bias, GYRO_RAW);
        assert_eq!(dev.state(), DeviceState::Calibrated);
    }

    #[test]
    fn reads_after_calibration_are_zeroed() {
        let mut dev = ready_device();
        dev.calibrate().unwrap();

        let gyro = dev.read_gyroscope().unwrap();
        assert_eq!(gyro.raw, GYRO_RAW);
        assert_eq!(gyro.value, [0.0; 3]);

        let accel = dev.read_accelerometer().unwrap();
        assert_eq!(accel.raw, ACCEL_RAW);
        assert_eq!(accel.value, [0.0, 0.0, 1.0]);
    }

    #[test]
    fn not_ready_cycles_are_skipped() {
        let mut dev = ready_device();
        dev.interface.status_script.extend([0x00, 0x00, 0x01, 0x00, 0x01]);
        let config = CalibrationConfig::default()
            .with_samples(4)
            .with_poll_interval_us(50);

        let result = dev.calibrate_with(&config).unwrap();

        // 3 sondeos sin dato en el guion, 2 con dato, 2 más desde el registro
        assert_eq!(result.polls, 7);
        assert_eq!(result.gyro_bias, GYRO_RAW);
        assert_eq!(dev.delay.total_ns, 100_000_000 + 3 * 50_000);
    }

    #[test]
    fn gravity_offset_uses_current_accel_scale() {
        let mut dev = ready_device();
        dev.set_accel_fullscale(AccelFullScale::Fs8G).unwrap();

        let result = dev
            .calibrate_with(&CalibrationConfig::default().with_samples(10))
            .unwrap();
        assert_eq!(result.accel_bias[2], 16400 - 4096);
    }

    #[test]
    fn bias_is_truncated_toward_zero() {
        assert_eq!(average([-3, 3, -5], 2), [-1, 1, -2]);
        assert_eq!(average([2999, -2999, 1500], 1500), [1, -1, 1]);
    }

    #[test]
    fn bias_saturates_to_i16() {
        assert_eq!(
            average([-49_152 * 4, 40_000 * 4, 0], 4),
            [i16::MIN, i16::MAX, 0]
        );
    }

    #[test]
    fn timeout_keeps_previous_bias() {
        let mut dev = ready_device();
        dev.calibrate().unwrap();
        let state = dev.state();

        dev.interface.regs[registers::INT_STATUS as usize] = 0x00;
        dev.interface.status_reads = 0;
        let config = CalibrationConfig::default().with_max_polls(Some(10));

        assert_eq!(dev.calibrate_with(&config), Err(Mpu9250Error::Timeout));
        assert_eq!(dev.interface.status_reads, 10);
        assert_eq!(dev.gyro_config().dc_bias, GYRO_RAW);
        assert_eq!(dev.state(), state);
    }

    #[test]
    fn unbounded_polling_still_completes() {
        let mut dev = ready_device();
        dev.interface.status_script.extend([0x00; 500]);
        let config = CalibrationConfig::default()
            .with_samples(2)
            .with_max_polls(None);

        let result = dev.calibrate_with(&config).unwrap();
        assert_eq!(result.polls, 502);
    }

    #[test]
    fn bus_failure_aborts_calibration() {
        let mut dev = ready_device();
        dev.interface.fail_reg = Some(registers::ACCEL_XOUT_H);

        assert_eq!(dev.calibrate(), Err(Mpu9250Error::InterfaceError));
        assert_eq!(dev.gyro_config().dc_bias, [0; 3]);
        assert_eq!(dev.state(), DeviceState::Configured);
    }

    #[test]
    fn zero_samples_is_invalid() {
        let mut dev = ready_device();
        let config = CalibrationConfig::default().with_samples(0);

        assert_eq!(dev.calibrate_with(&config), Err(Mpu9250Error::InvalidParameter));
        assert_eq!(dev.interface.status_reads, 0);
    }

    #[test]
    fn uninitialized_device_is_rejected() {
        let mut dev = Mpu9250::new(MockInterface::new(), NoopDelay::default());
        dev.interface.regs[registers::INT_STATUS as usize] = 0x01;
        let config = CalibrationConfig::default().with_samples(3);

        assert_eq!(dev.calibrate_with(&config), Err(Mpu9250Error::InvalidOperation));
        assert_eq!(dev.state(), DeviceState::Unconfigured);
        assert_eq!(dev.accel_config().dc_bias, [0; 3]);
        assert_eq!(dev.interface.status_reads, 0);
    }

    // Cambiar de escala no invalida los offsets calculados con la anterior
    #[test]
    fn scale_change_keeps_stale_bias() {
        let mut dev = ready_device();
        dev.calibrate().unwrap();

        dev.set_accel_fullscale(AccelFullScale::Fs4G).unwrap();
        assert_eq!(dev.accel_config().dc_bias, [0, 64, 16]);
        assert_eq!(dev.state(), DeviceState::Calibrated);

        let accel = dev.read_accelerometer().unwrap();
        assert_eq!(accel.value[2], 16384.0 / 8192.0);
    }
}
