//! Módulo de abstracción para interfaces de comunicación con el dispositivo MPU-9250

use embedded_hal::i2c::I2c;
use embedded_hal::spi::{Operation, SpiDevice};

/// Máximo de bytes de datos por escritura I2C (sin contar el registro)
const MAX_WRITE_LEN: usize = 16;

/// Error genérico para interfaces de comunicación
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InterfaceError<E> {
    /// Error de comunicación I2C
    I2c(E),
    /// Error de comunicación SPI
    Spi(E),
    /// Parámetro inválido
    InvalidParameter,
}

/// Trait para abstraer la comunicación con el dispositivo.
///
/// El bus ya está direccionado al dispositivo: solo se indica el registro
/// inicial y el buffer. Una lectura o escritura de varios bytes recorre
/// registros consecutivos.
pub trait Interface {
    /// Tipo de error que puede producir la interfaz
    type Error;

    /// Escribe `data` a partir del registro `reg`
    fn write_reg(&mut self, reg: u8, data: &[u8]) -> Result<(), Self::Error>;

    /// Lee `data.len()` bytes a partir del registro `reg`
    fn read_reg(&mut self, reg: u8, data: &mut [u8]) -> Result<(), Self::Error>;
}

impl<T: Interface + ?Sized> Interface for &mut T {
    type Error = T::Error;

    fn write_reg(&mut self, reg: u8, data: &[u8]) -> Result<(), Self::Error> {
        (**self).write_reg(reg, data)
    }

    fn read_reg(&mut self, reg: u8, data: &mut [u8]) -> Result<(), Self::Error> {
        (**self).read_reg(reg, data)
    }
}

/// Implementación de Interface para I2C
pub struct I2cInterface<I2C> {
    i2c: I2C,
    addr: u8,
}

impl<I2C: I2c> I2cInterface<I2C> {
    /// Crea una nueva interfaz I2C
    pub fn new(i2c: I2C, addr: u8) -> Self {
        Self { i2c, addr }
    }

    /// Consume la interfaz y devuelve el dispositivo I2C subyacente
    pub fn release(self) -> I2C {
        self.i2c
    }
}

impl<I2C: I2c> Interface for I2cInterface<I2C> {
    type Error = InterfaceError<I2C::Error>;

    fn write_reg(&mut self, reg: u8, data: &[u8]) -> Result<(), Self::Error> {
        if data.len() > MAX_WRITE_LEN {
            return Err(InterfaceError::InvalidParameter);
        }

        let mut buffer = [0u8; MAX_WRITE_LEN + 1];
        buffer[0] = reg;
        buffer[1..data.len() + 1].copy_from_slice(data);

        self.i2c
            .write(self.addr, &buffer[..data.len() + 1])
            .map_err(InterfaceError::I2c)
    }

    fn read_reg(&mut self, reg: u8, data: &mut [u8]) -> Result<(), Self::Error> {
        if data.is_empty() {
            return Err(InterfaceError::InvalidParameter);
        }

        self.i2c
            .write_read(self.addr, &[reg], data)
            .map_err(InterfaceError::I2c)
    }
}

/// Implementación de Interface para un dispositivo SPI (CS gestionado por el bus)
pub struct SpiInterface<SPI> {
    spi: SPI,
}

impl<SPI: SpiDevice> SpiInterface<SPI> {
    /// Crea una nueva interfaz SPI
    pub fn new(spi: SPI) -> Self {
        Self { spi }
    }

    /// Consume la interfaz y devuelve el dispositivo SPI
    pub fn release(self) -> SPI {
        self.spi
    }
}

impl<SPI: SpiDevice> Interface for SpiInterface<SPI> {
    type Error = InterfaceError<SPI::Error>;

    fn write_reg(&mut self, reg: u8, data: &[u8]) -> Result<(), Self::Error> {
        if data.is_empty() {
            return Err(InterfaceError::InvalidParameter);
        }

        // Para SPI, el bit más significativo del primer byte debe ser 0 para escritura
        let write_reg = [reg & 0x7F];

        self.spi
            .transaction(&mut [Operation::Write(&write_reg), Operation::Write(data)])
            .map_err(InterfaceError::Spi)
    }

    fn read_reg(&mut self, reg: u8, data: &mut [u8]) -> Result<(), Self::Error> {
        if data.is_empty() {
            return Err(InterfaceError::InvalidParameter);
        }

        // Para SPI, el bit más significativo del primer byte debe ser 1 para lectura
        let read_reg = [reg | 0x80];

        self.spi
            .transaction(&mut [Operation::Write(&read_reg), Operation::Read(data)])
            .map_err(InterfaceError::Spi)
    }
}
