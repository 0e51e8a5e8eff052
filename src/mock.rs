//! Interfaz y retardo simulados para los tests

use std::collections::VecDeque;
use std::vec::Vec;

use embedded_hal::delay::DelayNs;

use crate::interface::Interface;
use crate::register::{registers, WHO_AM_I_VALUE};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MockError(pub u8);

/// Banco de registros en memoria. Las lecturas de INT_STATUS consumen primero
/// `status_script`; cuando se agota devuelven el valor del registro.
pub struct MockInterface {
    pub regs: [u8; 128],
    pub writes: Vec<(u8, Vec<u8>)>,
    pub status_script: VecDeque<u8>,
    pub status_reads: usize,
    pub fail_reads: bool,
    pub fail_writes: bool,
    pub fail_reg: Option<u8>,
}

impl MockInterface {
    pub fn new() -> Self {
        let mut regs = [0u8; 128];
        regs[registers::WHO_AM_I as usize] = WHO_AM_I_VALUE;
        Self {
            regs,
            writes: Vec::new(),
            status_script: VecDeque::new(),
            status_reads: 0,
            fail_reads: false,
            fail_writes: false,
            fail_reg: None,
        }
    }

    /// Carga un bloque de salida con el orden XH, XL, YH, YL, ZH, ZL
    pub fn set_block(&mut self, base: u8, bytes: [u8; 6]) {
        let base = base as usize;
        self.regs[base..base + 6].copy_from_slice(&bytes);
    }

    /// Último valor escrito en `reg`
    pub fn last_write(&self, reg: u8) -> Option<u8> {
        self.writes
            .iter()
            .rev()
            .find(|(r, _)| *r == reg)
            .map(|(_, data)| data[0])
    }

    pub fn writes_to(&self, reg: u8) -> Vec<u8> {
        self.writes
            .iter()
            .filter(|(r, _)| *r == reg)
            .map(|(_, data)| data[0])
            .collect()
    }
}

impl Interface for MockInterface {
    type Error = MockError;

    fn write_reg(&mut self, reg: u8, data: &[u8]) -> Result<(), Self::Error> {
        if self.fail_writes || self.fail_reg == Some(reg) {
            return Err(MockError(reg));
        }
        self.writes.push((reg, data.to_vec()));
        let start = reg as usize;
        self.regs[start..start + data.len()].copy_from_slice(data);
        Ok(())
    }

    fn read_reg(&mut self, reg: u8, data: &mut [u8]) -> Result<(), Self::Error> {
        if self.fail_reads || self.fail_reg == Some(reg) {
            return Err(MockError(reg));
        }
        if reg == registers::INT_STATUS {
            self.status_reads += 1;
            if let Some(status) = self.status_script.pop_front() {
                data[0] = status;
                return Ok(());
            }
        }
        let start = reg as usize;
        data.copy_from_slice(&self.regs[start..start + data.len()]);
        Ok(())
    }
}

/// Retardo que no espera y acumula el tiempo pedido
#[derive(Default)]
pub struct NoopDelay {
    pub total_ns: u64,
}

impl DelayNs for NoopDelay {
    fn delay_ns(&mut self, ns: u32) {
        self.total_ns += ns as u64;
    }
}
