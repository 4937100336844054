// Board-independent core of the Digital Explorer Board demo.
//
// shift/       bit-banged 74HC595 / 74HC165 drivers (the only real protocol here)
// drivers/     expander pin bank, accelerometer, I2C bus scan
// peripherals  narrow contracts the poll loop talks to
// rainbow      color wheel + blocking strip animation (smart-leds)
// demo         the poll loop itself
//
// Nothing in here knows about esp-hal; pins and buses arrive as
// embedded-hal 1.0 implementors from the board crate.

#![cfg_attr(not(test), no_std)]

pub mod demo;
pub mod drivers;
pub mod peripherals;
pub mod rainbow;
pub mod shift;

#[cfg(test)]
pub(crate) mod sim;

pub use demo::{DemoConfig, DemoHw, IterationReport, PollLoop, Step};
pub use peripherals::{Accelerometer, Expander, SerialTx};
pub use rainbow::Rainbow;
pub use shift::{Bitfield, Line, LineError, Polarity, ShiftIn, ShiftOut};
