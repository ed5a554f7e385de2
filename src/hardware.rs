//! Board configuration for the logger hardware
//!
//! One place for the values the firmware wires in: bus addresses, the
//! initial sensor configuration, the sample cadence, and default
//! peripheral settings.

use crate::drivers::eeprom::EEPROM_ADDRESS;
use crate::drivers::tmp100::TMP100_ADDRESS;

/// Static description of the logger board.
pub struct HardwareConfig {
    pub i2c_frequency_hz: u32,
    pub uart_baud: u32,
    pub sensor_address: u8,
    pub eeprom_address: u8,
}

impl HardwareConfig {
    pub const fn new() -> Self {
        Self {
            i2c_frequency_hz: constants::DEFAULT_I2C_FREQ_HZ,
            uart_baud: constants::DEFAULT_UART_BAUD,
            sensor_address: TMP100_ADDRESS,
            eeprom_address: EEPROM_ADDRESS,
        }
    }
}

pub static HARDWARE: HardwareConfig = HardwareConfig::new();

pub mod constants {
    pub const DEFAULT_I2C_FREQ_HZ: u32 = 100_000;
    pub const DEFAULT_UART_BAUD: u32 = 115_200;

    /// Ten minutes between samples.
    pub const SAMPLE_INTERVAL_MS: u32 = 600_000;

    /// Shutdown mode, 10-bit resolution.
    pub const INITIAL_SENSOR_CONFIG: u8 = 0x21;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::drivers::tmp100::{Resolution, CONFIG_SHUTDOWN};

    #[test]
    fn test_initial_sensor_config_bits() {
        let config = constants::INITIAL_SENSOR_CONFIG;
        assert_ne!(config & CONFIG_SHUTDOWN, 0);
        assert_eq!(Resolution::from_config_byte(config), Resolution::Bits10);
    }

    #[test]
    fn test_board_addresses() {
        assert_eq!(HARDWARE.sensor_address, 0x48);
        assert_eq!(HARDWARE.eeprom_address, 0x50);
    }
}
