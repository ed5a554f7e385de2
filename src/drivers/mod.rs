//! Drivers module
//!
//! Contains the drivers for the two parts on the logger bus.

pub mod eeprom;
pub mod tmp100;
