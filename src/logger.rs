//! Sample-and-store logging core
//!
//! Ties the temperature sensor and the EEPROM together on the shared bus:
//! configure the sensor once, then each cycle trigger a conversion, read
//! the raw sample, and append it to the store. The firmware owns the
//! cadence (`hardware::constants::SAMPLE_INTERVAL_MS` between cycles).

use core::fmt::Write;

use embedded_hal::delay::DelayNs;
use heapless::String;

use crate::bus::I2cBus;
use crate::drivers::eeprom::{self, Eeprom};
use crate::drivers::tmp100::{self, Tmp100};
use crate::hardware::constants::INITIAL_SENSOR_CONFIG;

/// One stored sample: where it went, what was stored, what it decodes to.
#[derive(Debug, Clone, Copy, PartialEq, defmt::Format)]
pub struct LogRecord {
    pub address: u16,
    pub raw: u16,
    pub celsius: f32,
}

impl LogRecord {
    /// Fixed-capacity status line for a UART sink. Anything past the
    /// capacity is dropped.
    pub fn format(&self) -> String<64> {
        let mut line = String::new();
        let _ = write!(
            line,
            "addr=0x{:04X} raw=0x{:04X} temp={}C",
            self.address, self.raw, self.celsius
        );
        line
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, defmt::Format)]
pub enum LoggerError {
    Sensor(tmp100::Error),
    Store(eeprom::Error),
}

impl From<tmp100::Error> for LoggerError {
    fn from(e: tmp100::Error) -> Self {
        LoggerError::Sensor(e)
    }
}

impl From<eeprom::Error> for LoggerError {
    fn from(e: eeprom::Error) -> Self {
        LoggerError::Store(e)
    }
}

pub struct TemperatureLogger {
    sensor: Tmp100,
    store: Eeprom,
}

impl TemperatureLogger {
    pub fn new(sensor: Tmp100, store: Eeprom) -> Self {
        Self { sensor, store }
    }

    /// Put the sensor in shutdown/one-shot mode with the board's initial
    /// configuration. Call once before the first [`log_once`](Self::log_once).
    pub fn init<B: I2cBus>(&mut self, bus: &mut B) -> Result<(), LoggerError> {
        self.sensor.write_configuration(bus, INITIAL_SENSOR_CONFIG)?;
        Ok(())
    }

    /// One logging cycle: convert, read, append. Blocks for the conversion
    /// time and the store's write cycle. Nothing is stored if the sensor
    /// path fails.
    pub fn log_once<B, D>(&mut self, bus: &mut B, delay: &mut D) -> Result<LogRecord, LoggerError>
    where
        B: I2cBus,
        D: DelayNs,
    {
        let address = self.store.current_write_address();
        self.sensor.trigger_one_shot_conversion(bus, delay)?;
        let raw = self.sensor.read_raw_temperature(bus)?;
        self.store.write_sequential(bus, delay, raw)?;
        Ok(LogRecord { address, raw, celsius: self.sensor.to_celsius(raw) })
    }

    /// Read a previously stored sample back.
    pub fn read_back<B: I2cBus>(&self, bus: &mut B, address: u16) -> Result<u16, LoggerError> {
        Ok(self.store.read_at(bus, address)?)
    }

    pub fn sensor(&self) -> &Tmp100 {
        &self.sensor
    }

    /// Address the next sample will be stored at.
    pub fn next_address(&self) -> u16 {
        self.store.current_write_address()
    }
}
