//! Shared two-wire bus transport
//!
//! Goals:
//! - One trait the drivers consume for blocking master-mode transfers
//! - Wire-level (8-bit) address derivation kept in a single place
//! - Bridge onto `embedded_hal::i2c::I2c` so any HAL bus can carry the
//!   drivers
//!
//! Notes:
//! - Transfers are framed: one `transmit`/`receive` call is one bus
//!   transaction. Drivers never split a register address and its data
//!   across calls.

use embedded_hal::i2c::I2c;

/// Timeout meaning "block until the transfer completes or the bus errors".
pub const WAIT_FOREVER: u32 = u32::MAX;

/// Wire (8-bit) address for a master write to `device_address`.
#[inline]
pub const fn write_address(device_address: u8) -> u8 {
    device_address << 1
}

/// Wire (8-bit) address for a master read from `device_address`.
#[inline]
pub const fn read_address(device_address: u8) -> u8 {
    (device_address << 1) | 0x01
}

/// Blocking master-mode transport over a shared two-wire bus.
///
/// Addresses are pre-shifted 8-bit wire addresses with the direction bit
/// included; derive them with [`write_address`] and [`read_address`]. A
/// failed transfer carries an opaque cause that callers never branch on.
pub trait I2cBus {
    type Error;

    /// Transmit `bytes` as one framed write transaction. Zero-length
    /// `bytes` is a legal probe (address byte only).
    fn transmit(&mut self, bus_address: u8, bytes: &[u8], timeout_ms: u32) -> Result<(), Self::Error>;

    /// Fill `buffer` from one framed read transaction.
    fn receive(&mut self, bus_address: u8, buffer: &mut [u8], timeout_ms: u32) -> Result<(), Self::Error>;
}

/// Adapter carrying the drivers on any `embedded_hal::i2c::I2c` bus.
///
/// The HAL trait wants 7-bit addresses, so the wire address is shifted back
/// down. The timeout argument is not forwarded; the wrapped HAL applies its
/// own transfer policy.
pub struct I2cWrapper<I> {
    i2c: I,
}

impl<I> I2cWrapper<I> {
    pub fn new(i2c: I) -> Self {
        Self { i2c }
    }

    /// Give the bus back, e.g. to re-clock it.
    pub fn release(self) -> I {
        self.i2c
    }
}

impl<I: I2c> I2cBus for I2cWrapper<I> {
    type Error = I::Error;

    fn transmit(&mut self, bus_address: u8, bytes: &[u8], _timeout_ms: u32) -> Result<(), Self::Error> {
        self.i2c.write(bus_address >> 1, bytes)
    }

    fn receive(&mut self, bus_address: u8, buffer: &mut [u8], _timeout_ms: u32) -> Result<(), Self::Error> {
        self.i2c.read(bus_address >> 1, buffer)
    }
}
