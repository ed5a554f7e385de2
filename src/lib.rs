//! Register-level drivers and logging core for the temperature payload
//!
//! Two drivers share one blocking two-wire bus: a TMP100-class temperature
//! sensor ([`drivers::tmp100::Tmp100`]) and a 32 Kword serial EEPROM
//! ([`drivers::eeprom::Eeprom`]). [`logger::TemperatureLogger`] ties them
//! into the sample-and-store cycle the firmware runs on its cadence. The
//! bus comes in through [`bus::I2cBus`], with [`bus::I2cWrapper`] adapting
//! any `embedded_hal::i2c::I2c` implementation.
//!
//! The crate is `no_std`; the tests run on the host against a simulated
//! bus.

#![cfg_attr(not(test), no_std)]

pub mod bus;
pub mod drivers;
pub mod hardware;
pub mod logger;
pub mod tools;

#[cfg(test)]
mod testbus;

pub use bus::{I2cBus, I2cWrapper};
pub use drivers::eeprom::Eeprom;
pub use drivers::tmp100::{Resolution, Tmp100};
pub use logger::{LogRecord, TemperatureLogger};
