use linux_embedded_hal::{Delay, I2cdev};
use mpu9250_rs::{self, register::DEFAULT_I2C_ADDRESS, CalibrationConfig, GyroFullScale};
use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc,
};
use std::thread;
use std::time::Duration;

fn main() {
    println!("MPU-9250 - Ejemplo básico");

    // Flag para controlar la ejecución del programa
    let running = Arc::new(AtomicBool::new(true));
    let r = running.clone();

    // Configurar el manejador para Ctrl+C
    ctrlc::set_handler(move || {
        println!("\nDeteniendo el programa...");
        r.store(false, Ordering::SeqCst);
    })
    .expect("Error al configurar el manejador de Ctrl+C");

    // Crear instancia de I2C para Linux
    let i2c = match I2cdev::new("/dev/i2c-1") {
        Ok(i2c) => i2c,
        Err(e) => {
            eprintln!("Error al abrir dispositivo I2C: {:?}", e);
            return;
        }
    };

    let mut device = mpu9250_rs::new_i2c_device(i2c, DEFAULT_I2C_ADDRESS, Delay {});

    if let Err(e) = device.initialize() {
        eprintln!("Error al inicializar el dispositivo: {}", e);
        return;
    }
    println!("Dispositivo inicializado correctamente");

    if let Err(e) = device.set_gyro_fullscale(GyroFullScale::Fs500Dps) {
        eprintln!("Error al configurar la escala del giroscopio: {}", e);
    }

    // Calibrar con el sensor en reposo y el eje Z vertical
    println!("Calibrando, no mover el sensor...");
    let config = CalibrationConfig::default().with_poll_interval_us(200);
    match device.calibrate_with(&config) {
        Ok(result) => println!(
            "Offsets giroscopio {:?}, acelerómetro {:?}",
            result.gyro_bias, result.accel_bias
        ),
        Err(e) => eprintln!("Error en la calibración: {}", e),
    }

    while running.load(Ordering::SeqCst) {
        if device.data_available() {
            match (device.read_accelerometer(), device.read_gyroscope()) {
                (Ok(accel), Ok(gyro)) => println!(
                    "Accel [g]: {:7.3} {:7.3} {:7.3} | Gyro [°/s]: {:8.2} {:8.2} {:8.2}",
                    accel.value[0],
                    accel.value[1],
                    accel.value[2],
                    gyro.value[0],
                    gyro.value[1],
                    gyro.value[2]
                ),
                (Err(e), _) | (_, Err(e)) => eprintln!("Error de lectura: {}", e),
            }
        }
        thread::sleep(Duration::from_millis(100));
    }
}
