// Peripheral drivers and adapters behind the poll loop's contracts.
//
// Board-independent: everything here takes embedded-hal buses or pins.
// Which bus, which pins and which address is decided in the board crate.

pub mod expander;
pub mod lsm6ds33;

use embedded_hal::i2c::I2c;

pub use expander::{BankError, PinBank};
pub use lsm6ds33::{Lsm6Error, Lsm6ds33};

/// Addresses outside the reserved ranges at either end of the 7-bit space.
pub const SCAN_RANGE: core::ops::RangeInclusive<u8> = 0x08..=0x77;

/// Probe every address in SCAN_RANGE with a one-byte read.
///
/// Fills `found` in ascending order and returns how many devices answered;
/// devices past the end of `found` are counted but not stored.
pub fn scan<I: I2c>(i2c: &mut I, found: &mut [u8]) -> usize {
    let mut count = 0;
    let mut probe = [0u8; 1];
    for addr in SCAN_RANGE {
        if i2c.read(addr, &mut probe).is_ok() {
            if let Some(slot) = found.get_mut(count) {
                *slot = addr;
            }
            count += 1;
        }
    }
    count
}
