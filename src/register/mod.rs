//! Definiciones de registros para el MPU-9250
//!
//! Mapa de registros plano (un solo banco). Solo se listan los registros que
//! el driver usa o que delimitan las zonas que deja sin implementar.

pub mod registers {
    // Registros de auto-test
    pub const SELF_TEST_X_GYRO: u8 = 0x00;
    pub const SELF_TEST_Y_GYRO: u8 = 0x01;
    pub const SELF_TEST_Z_GYRO: u8 = 0x02;
    pub const SELF_TEST_X_ACCEL: u8 = 0x0D;
    pub const SELF_TEST_Y_ACCEL: u8 = 0x0E;
    pub const SELF_TEST_Z_ACCEL: u8 = 0x0F;

    // Offsets de giroscopio (sin usar, formato por confirmar)
    pub const XG_OFFSET_H: u8 = 0x13;
    pub const XG_OFFSET_L: u8 = 0x14;
    pub const YG_OFFSET_H: u8 = 0x15;
    pub const YG_OFFSET_L: u8 = 0x16;
    pub const ZG_OFFSET_H: u8 = 0x17;
    pub const ZG_OFFSET_L: u8 = 0x18;

    // Registros de configuración
    pub const SMPLRT_DIV: u8 = 0x19;
    pub const CONFIG: u8 = 0x1A;
    pub const GYRO_CONFIG: u8 = 0x1B;
    pub const ACCEL_CONFIG: u8 = 0x1C;
    pub const ACCEL_CONFIG_2: u8 = 0x1D;
    pub const LP_ACCEL_ODR: u8 = 0x1E;
    pub const WOM_THR: u8 = 0x1F;

    // Registros de interrupción y estado
    pub const INT_PIN_CFG: u8 = 0x37;
    pub const INT_ENABLE: u8 = 0x38;
    pub const INT_STATUS: u8 = 0x3A;

    // Registros de acelerómetro
    pub const ACCEL_XOUT_H: u8 = 0x3B;
    pub const ACCEL_XOUT_L: u8 = 0x3C;
    pub const ACCEL_YOUT_H: u8 = 0x3D;
    pub const ACCEL_YOUT_L: u8 = 0x3E;
    pub const ACCEL_ZOUT_H: u8 = 0x3F;
    pub const ACCEL_ZOUT_L: u8 = 0x40;

    // Registros de temperatura
    pub const TEMP_OUT_H: u8 = 0x41;
    pub const TEMP_OUT_L: u8 = 0x42;

    // Registros de giroscopio
    pub const GYRO_XOUT_H: u8 = 0x43;
    pub const GYRO_XOUT_L: u8 = 0x44;
    pub const GYRO_YOUT_H: u8 = 0x45;
    pub const GYRO_YOUT_L: u8 = 0x46;
    pub const GYRO_ZOUT_H: u8 = 0x47;
    pub const GYRO_ZOUT_L: u8 = 0x48;

    // Registros de control
    pub const SIGNAL_PATH_RESET: u8 = 0x68;
    pub const USER_CTRL: u8 = 0x6A;
    pub const PWR_MGMT_1: u8 = 0x6B;
    pub const PWR_MGMT_2: u8 = 0x6C;

    // Registros de identificación
    pub const WHO_AM_I: u8 = 0x75;

    // Offsets de acelerómetro (sin usar, formato por confirmar)
    pub const XA_OFFSET_H: u8 = 0x77;
    pub const XA_OFFSET_L: u8 = 0x78;
    pub const YA_OFFSET_H: u8 = 0x7A;
    pub const YA_OFFSET_L: u8 = 0x7B;
    pub const ZA_OFFSET_H: u8 = 0x7D;
    pub const ZA_OFFSET_L: u8 = 0x7E;
}

/// Posiciones de bit dentro de los registros de configuración
pub mod bit_pos {
    // GYRO_CONFIG
    pub const XGYRO_CTEN: u8 = 7;
    pub const YGYRO_CTEN: u8 = 6;
    pub const ZGYRO_CTEN: u8 = 5;
    pub const GYRO_FS_SEL: u8 = 3;
    pub const FCHOICE_B: u8 = 0;

    // ACCEL_CONFIG
    pub const AX_ST_EN: u8 = 7;
    pub const AY_ST_EN: u8 = 6;
    pub const AZ_ST_EN: u8 = 5;
    pub const ACCEL_FS_SEL: u8 = 3;

    // INT_STATUS
    pub const RAW_DATA_RDY_INT: u8 = 0;

    // PWR_MGMT_1
    pub const H_RESET: u8 = 7;
}

/// Dirección I2C por defecto (AD0 a nivel bajo)
pub const DEFAULT_I2C_ADDRESS: u8 = 0x68;

/// Valor esperado en WHO_AM_I
pub const WHO_AM_I_VALUE: u8 = 0x71;
