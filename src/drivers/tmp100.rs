//! TMP100-class temperature sensor driver
//!
//! Goals:
//! - One-shot conversions on the shared blocking bus (address 0x48 on the
//!   logger board)
//! - Resolution bookkeeping: 9 to 12 bits change the conversion time, the
//!   LSB weight, and the bit layout of the raw 16-bit sample
//! - Decode raw samples to Celsius without touching the bus
//!
//! Notes:
//! - The part powers up in continuous conversion mode; one-shot only works
//!   once the shutdown bit is set (see `write_configuration`).
//! - Callers must not pipeline a second operation on this device while a
//!   conversion is in flight; the trigger call blocks for the full
//!   conversion time before returning.

use embedded_hal::delay::DelayNs;

use crate::bus::{read_address, write_address, I2cBus, WAIT_FOREVER};

/// Logger board default: both address pins grounded.
pub const TMP100_ADDRESS: u8 = 0x48;

// Register map
pub mod registers {
    pub const TEMPERATURE: u8 = 0x00; // two-byte big-endian read
    pub const CONFIGURATION: u8 = 0x01; // one byte, read/write
}

// Configuration register bits
pub const CONFIG_SHUTDOWN: u8 = 0x01; // bit 0
pub const CONFIG_ONE_SHOT: u8 = 0x80; // bit 7
pub const CONFIG_RESOLUTION_MASK: u8 = 0x60; // bits 5..6
const CONFIG_RESOLUTION_SHIFT: u8 = 5;

/// Conversion resolution, configuration bits 5..6.
#[derive(Debug, Clone, Copy, PartialEq, Eq, defmt::Format)]
pub enum Resolution {
    Bits9 = 0,
    Bits10 = 1,
    Bits11 = 2,
    Bits12 = 3,
}

/// Decode and timing parameters for one resolution.
struct ResolutionParams {
    shift: u8,
    sign_bit: u16,
    sign_extension: u16,
    celsius_per_count: f32,
    conversion_time_ms: u32,
}

/// Indexed by the 2-bit resolution code.
static RESOLUTION_TABLE: [ResolutionParams; 4] = [
    ResolutionParams { shift: 7, sign_bit: 0x0200, sign_extension: 0xFE00, celsius_per_count: 0.5, conversion_time_ms: 40 },
    ResolutionParams { shift: 6, sign_bit: 0x0400, sign_extension: 0xFC00, celsius_per_count: 0.25, conversion_time_ms: 80 },
    ResolutionParams { shift: 5, sign_bit: 0x0800, sign_extension: 0xF800, celsius_per_count: 0.125, conversion_time_ms: 160 },
    ResolutionParams { shift: 4, sign_bit: 0x1000, sign_extension: 0xF000, celsius_per_count: 0.0625, conversion_time_ms: 320 },
];

impl Resolution {
    /// Resolution encoded in a configuration byte.
    pub fn from_config_byte(config: u8) -> Self {
        match (config & CONFIG_RESOLUTION_MASK) >> CONFIG_RESOLUTION_SHIFT {
            0 => Resolution::Bits9,
            1 => Resolution::Bits10,
            2 => Resolution::Bits11,
            _ => Resolution::Bits12,
        }
    }

    /// The 2-bit code as it sits in the configuration register.
    pub const fn code(self) -> u8 {
        self as u8
    }

    /// Worst-case conversion time at this resolution.
    pub fn conversion_time_ms(self) -> u32 {
        self.params().conversion_time_ms
    }

    /// Weight of one raw count in degrees Celsius.
    pub fn celsius_per_count(self) -> f32 {
        self.params().celsius_per_count
    }

    fn params(self) -> &'static ResolutionParams {
        &RESOLUTION_TABLE[self as usize]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, defmt::Format)]
pub enum Error {
    /// The transfer failed; the cause stays with the transport.
    Transport,
    /// One-shot requested while the part is in continuous conversion mode
    /// (shutdown bit clear).
    NotReady,
}

pub struct Tmp100 {
    address: u8,
    resolution: Resolution,
}

impl Tmp100 {
    /// Bring up a handle on `address` and cache the resolution currently on
    /// the device.
    ///
    /// Construction never fails: if the configuration read errors out, the
    /// cache falls back to the lowest resolution ([`Resolution::Bits9`])
    /// and the handle stays usable. The next successful
    /// [`write_configuration`](Self::write_configuration) resynchronizes it.
    pub fn new<B: I2cBus>(bus: &mut B, address: u8) -> Self {
        let mut sensor = Self { address, resolution: Resolution::Bits9 };
        if let Ok(config) = sensor.read_configuration(bus) {
            sensor.resolution = Resolution::from_config_byte(config);
        }
        sensor
    }

    /// Write `config` to the configuration register as one framed
    /// transaction and re-derive the cached resolution from it.
    ///
    /// The byte is written as given. On failure the cache keeps its
    /// previous value; the device still holds whatever it held before.
    pub fn write_configuration<B: I2cBus>(&mut self, bus: &mut B, config: u8) -> Result<(), Error> {
        let frame = [registers::CONFIGURATION, config];
        bus.transmit(write_address(self.address), &frame, WAIT_FOREVER)
            .map_err(|_| Error::Transport)?;
        self.resolution = Resolution::from_config_byte(config);
        Ok(())
    }

    /// Start a single conversion and block until the part has finished it.
    ///
    /// The device must already be in shutdown mode; in continuous mode the
    /// one-shot bit has no effect, so this fails with [`Error::NotReady`]
    /// without writing anything.
    pub fn trigger_one_shot_conversion<B, D>(&mut self, bus: &mut B, delay: &mut D) -> Result<(), Error>
    where
        B: I2cBus,
        D: DelayNs,
    {
        let config = self.read_configuration(bus)?;
        if config & CONFIG_SHUTDOWN == 0 {
            return Err(Error::NotReady);
        }
        self.write_configuration(bus, config | CONFIG_ONE_SHOT)?;
        delay.delay_ms(self.resolution.conversion_time_ms());
        Ok(())
    }

    /// Latest conversion result, big-endian as the part sends it.
    pub fn read_raw_temperature<B: I2cBus>(&mut self, bus: &mut B) -> Result<u16, Error> {
        self.write_pointer_register(bus, registers::TEMPERATURE)?;
        let mut data = [0u8; 2];
        bus.receive(read_address(self.address), &mut data, WAIT_FOREVER)
            .map_err(|_| Error::Transport)?;
        Ok(u16::from_be_bytes(data))
    }

    /// Decode a raw sample with the cached resolution. Pure, no bus traffic.
    ///
    /// The sample is a left-justified two's-complement count: arithmetic
    /// shift down, extend the sign over the full 16 bits, weight by the
    /// resolution's degrees per count.
    pub fn to_celsius(&self, raw: u16) -> f32 {
        let params = self.resolution.params();
        let shifted = ((raw as i16) >> params.shift) as u16;
        let counts = if shifted & params.sign_bit != 0 {
            (shifted | params.sign_extension) as i16
        } else {
            shifted as i16
        };
        f32::from(counts) * params.celsius_per_count
    }

    /// Read the latest sample and decode it in one call.
    pub fn read_temperature<B: I2cBus>(&mut self, bus: &mut B) -> Result<f32, Error> {
        let raw = self.read_raw_temperature(bus)?;
        Ok(self.to_celsius(raw))
    }

    /// Cached resolution setting.
    pub fn resolution(&self) -> Resolution {
        self.resolution
    }

    fn write_pointer_register<B: I2cBus>(&self, bus: &mut B, register: u8) -> Result<(), Error> {
        bus.transmit(write_address(self.address), &[register], WAIT_FOREVER)
            .map_err(|_| Error::Transport)
    }

    fn read_configuration<B: I2cBus>(&self, bus: &mut B) -> Result<u8, Error> {
        self.write_pointer_register(bus, registers::CONFIGURATION)?;
        let mut data = [0u8; 1];
        bus.receive(read_address(self.address), &mut data, WAIT_FOREVER)
            .map_err(|_| Error::Transport)?;
        Ok(data[0])
    }
}
