//! I2C bus scan diagnostic
//!
//! Probes the 7-bit address range 0x08..=0x77: empty write first, one-byte
//! read as a fallback for receive-only parts. Useful on the bench when a
//! board comes up dead and you want to know who is still answering.

use core::fmt::Write;

use heapless::Vec;

use crate::bus::{read_address, write_address, I2cBus};

/// 7-bit range probed; addresses outside it are reserved.
pub const SCAN_FIRST: u8 = 0x08;
pub const SCAN_LAST: u8 = 0x77;

/// Upper bound on reported devices per scan.
pub const MAX_SCAN_DEVICES: usize = 16;

const SCAN_TIMEOUT_MS: u32 = 10;

/// Probe the whole range and collect responding 7-bit addresses.
///
/// Probe failures are expected and silent; the scan itself cannot fail.
pub fn scan_bus<B: I2cBus>(bus: &mut B) -> Vec<u8, MAX_SCAN_DEVICES> {
    let mut found = Vec::new();
    for address in SCAN_FIRST..=SCAN_LAST {
        let mut probe = [0u8; 1];
        let ack = bus.transmit(write_address(address), &[], SCAN_TIMEOUT_MS).is_ok()
            || bus.receive(read_address(address), &mut probe, SCAN_TIMEOUT_MS).is_ok();
        if ack && found.push(address).is_err() {
            break;
        }
    }
    found
}

/// Scan and write a one-line summary to `uart`.
pub fn scan_bus_summary<W: Write, B: I2cBus>(bus: &mut B, uart: &mut W, bus_name: &str) {
    let found = scan_bus(bus);
    if found.is_empty() {
        let _ = write!(uart, "I2C scan ({}): no devices responding\r\n", bus_name);
        return;
    }
    let _ = write!(uart, "I2C scan ({}): {} device(s):", bus_name, found.len());
    for address in &found {
        let _ = write!(uart, " 0x{:02X}", address);
    }
    let _ = write!(uart, "\r\n");
}
