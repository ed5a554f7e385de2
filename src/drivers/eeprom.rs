//! Serial EEPROM driver for two-byte sequential logging
//!
//! Goals:
//! - Append two-byte values behind an internal auto-incrementing write
//!   cursor (address 0x50 on the logger board)
//! - Random-access two-byte reads over the 15-bit address space
//! - Honor the part's internal write cycle after every successful write
//!
//! Notes:
//! - Addresses are word addresses: one address holds one two-byte value,
//!   big-endian on the wire. The final valid address is 0x7FFF.

use embedded_hal::delay::DelayNs;

use crate::bus::{read_address, write_address, I2cBus, WAIT_FOREVER};

/// Logger board default.
pub const EEPROM_ADDRESS: u8 = 0x50;

/// Final valid word address.
pub const MAX_ADDRESS: u16 = 0x7FFF;

/// Device-internal write-cycle time; the part NAKs anything sent before it
/// elapses.
pub const WRITE_CYCLE_MS: u32 = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, defmt::Format)]
pub enum Error {
    /// The transfer failed; the cause stays with the transport.
    Transport,
    /// Requested address is past [`MAX_ADDRESS`].
    InvalidAddress(u16),
}

pub struct Eeprom {
    address: u8,
    write_cursor: u16,
}

impl Eeprom {
    /// Fresh handle with the write cursor at 0. No bus traffic.
    pub fn new(address: u8) -> Self {
        Self { address, write_cursor: 0 }
    }

    /// Append `value` at the current cursor as one four-byte burst
    /// (big-endian address, then big-endian data), then block for the
    /// write cycle.
    ///
    /// The cursor advances only on success, wrapping to 0 past
    /// [`MAX_ADDRESS`], so a failed write retries at the same address.
    pub fn write_sequential<B, D>(&mut self, bus: &mut B, delay: &mut D, value: u16) -> Result<(), Error>
    where
        B: I2cBus,
        D: DelayNs,
    {
        let frame = write_frame(self.write_cursor, value);
        bus.transmit(write_address(self.address), &frame, WAIT_FOREVER)
            .map_err(|_| Error::Transport)?;
        self.write_cursor = if self.write_cursor == MAX_ADDRESS { 0 } else { self.write_cursor + 1 };
        delay.delay_ms(WRITE_CYCLE_MS);
        Ok(())
    }

    /// Read the two-byte value stored at `address`. Leaves the write
    /// cursor alone.
    pub fn read_at<B: I2cBus>(&self, bus: &mut B, address: u16) -> Result<u16, Error> {
        if address > MAX_ADDRESS {
            return Err(Error::InvalidAddress(address));
        }
        bus.transmit(write_address(self.address), &address.to_be_bytes(), WAIT_FOREVER)
            .map_err(|_| Error::Transport)?;
        let mut data = [0u8; 2];
        bus.receive(read_address(self.address), &mut data, WAIT_FOREVER)
            .map_err(|_| Error::Transport)?;
        Ok(u16::from_be_bytes(data))
    }

    /// Address the next `write_sequential` will store to.
    pub fn current_write_address(&self) -> u16 {
        self.write_cursor
    }
}

#[inline]
fn write_frame(address: u16, value: u16) -> [u8; 4] {
    let a = address.to_be_bytes();
    let v = value.to_be_bytes();
    [a[0], a[1], v[0], v[1]]
}
