// Contracts the poll loop needs from the rest of the board.
//
// Each one is the narrowest thing the loop actually calls. The adapters in
// drivers/ implement them; tests swap in fakes. The LED strip has no trait
// of its own: it is anything `smart_leds::SmartLedsWrite` over RGB8.

use core::fmt::Debug;

/// GPIO expander with numbered pins, direction fixed at bring-up.
pub trait Expander {
    type Error: Debug;

    fn get(&mut self, pin: u8) -> Result<bool, Self::Error>;
    fn set(&mut self, pin: u8, high: bool) -> Result<(), Self::Error>;
}

/// Transmit-only serial port. No reply is ever read back.
pub trait SerialTx {
    type Error: Debug;

    fn write(&mut self, bytes: &[u8]) -> Result<(), Self::Error>;
}

pub trait Accelerometer {
    type Error: Debug;

    /// (x, y, z) in m/s^2
    fn read_acceleration(&mut self) -> Result<(f32, f32, f32), Self::Error>;
}
