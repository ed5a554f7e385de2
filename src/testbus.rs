//! Simulated shared bus for the driver tests
//!
//! Models both parts well enough to exercise the drivers end to end on the
//! host: the sensor's pointer-register protocol and the EEPROM's 15-bit
//! word memory. Every transfer is recorded so tests can assert exact
//! framing, and either direction can be made to fail on demand.

use std::collections::HashMap;

use embedded_hal::delay::DelayNs;

use crate::bus::I2cBus;
use crate::drivers::eeprom::EEPROM_ADDRESS;
use crate::drivers::tmp100::{registers, TMP100_ADDRESS};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Transaction {
    Transmit { bus_address: u8, bytes: Vec<u8> },
    Receive { bus_address: u8, len: usize },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SimBusError;

pub struct SimBus {
    sensor_address: u8,
    eeprom_address: u8,
    sensor_config: u8,
    sensor_pointer: u8,
    raw_temperature: u16,
    memory: HashMap<u16, u16>,
    memory_cursor: u16,
    pub transactions: Vec<Transaction>,
    fail_transmits: usize,
    fail_receives: usize,
}

impl SimBus {
    pub fn new() -> Self {
        Self::new_at(TMP100_ADDRESS, EEPROM_ADDRESS)
    }

    pub fn new_at(sensor_address: u8, eeprom_address: u8) -> Self {
        Self {
            sensor_address,
            eeprom_address,
            sensor_config: 0x00,
            sensor_pointer: registers::TEMPERATURE,
            raw_temperature: 0,
            memory: HashMap::new(),
            memory_cursor: 0,
            transactions: Vec::new(),
            fail_transmits: 0,
            fail_receives: 0,
        }
    }

    pub fn set_sensor_config(&mut self, config: u8) {
        self.sensor_config = config;
    }

    pub fn sensor_config(&self) -> u8 {
        self.sensor_config
    }

    pub fn set_raw_temperature(&mut self, raw: u16) {
        self.raw_temperature = raw;
    }

    pub fn memory_at(&self, address: u16) -> Option<u16> {
        self.memory.get(&address).copied()
    }

    /// Fail the next `n` transmit calls, then recover.
    pub fn fail_next_transmits(&mut self, n: usize) {
        self.fail_transmits = n;
    }

    /// Fail the next `n` receive calls, then recover.
    pub fn fail_next_receives(&mut self, n: usize) {
        self.fail_receives = n;
    }

    pub fn clear_transactions(&mut self) {
        self.transactions.clear();
    }
}

impl I2cBus for SimBus {
    type Error = SimBusError;

    fn transmit(&mut self, bus_address: u8, bytes: &[u8], _timeout_ms: u32) -> Result<(), SimBusError> {
        self.transactions.push(Transaction::Transmit { bus_address, bytes: bytes.to_vec() });
        if self.fail_transmits > 0 {
            self.fail_transmits -= 1;
            return Err(SimBusError);
        }

        let device = bus_address >> 1;
        if device == self.sensor_address {
            match *bytes {
                [] => {}
                [pointer] => self.sensor_pointer = pointer,
                [pointer, value] => {
                    self.sensor_pointer = pointer;
                    if pointer == registers::CONFIGURATION {
                        self.sensor_config = value;
                    }
                }
                _ => return Err(SimBusError),
            }
            Ok(())
        } else if device == self.eeprom_address {
            match *bytes {
                [] => {}
                [hi, lo] => self.memory_cursor = u16::from_be_bytes([hi, lo]),
                [ah, al, dh, dl] => {
                    let address = u16::from_be_bytes([ah, al]);
                    self.memory.insert(address, u16::from_be_bytes([dh, dl]));
                }
                _ => return Err(SimBusError),
            }
            Ok(())
        } else {
            // Nobody home at that address.
            Err(SimBusError)
        }
    }

    fn receive(&mut self, bus_address: u8, buffer: &mut [u8], _timeout_ms: u32) -> Result<(), SimBusError> {
        self.transactions.push(Transaction::Receive { bus_address, len: buffer.len() });
        if self.fail_receives > 0 {
            self.fail_receives -= 1;
            return Err(SimBusError);
        }

        let device = bus_address >> 1;
        if device == self.sensor_address {
            match self.sensor_pointer {
                registers::TEMPERATURE => buffer.copy_from_slice(&self.raw_temperature.to_be_bytes()),
                registers::CONFIGURATION => buffer[0] = self.sensor_config,
                _ => return Err(SimBusError),
            }
            Ok(())
        } else if device == self.eeprom_address {
            // Erased cells read all-ones, like the real part.
            let value = self.memory.get(&self.memory_cursor).copied().unwrap_or(0xFFFF);
            buffer.copy_from_slice(&value.to_be_bytes());
            Ok(())
        } else {
            Err(SimBusError)
        }
    }
}

/// Recording delay: accumulates requested time instead of sleeping.
pub struct SimDelay {
    total_ns: u64,
}

impl SimDelay {
    pub fn new() -> Self {
        Self { total_ns: 0 }
    }

    pub fn total_ms(&self) -> u64 {
        self.total_ns / 1_000_000
    }
}

impl DelayNs for SimDelay {
    fn delay_ns(&mut self, ns: u32) {
        self.total_ns += u64::from(ns);
    }
}
