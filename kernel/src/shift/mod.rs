// Bit-banged shift register links
//
// Both directions are a three-wire synchronous link (data, clock, latch)
// driven straight from GPIO. There is no peripheral behind it, so edge
// order and line polarity are the entire protocol: get either wrong and
// the register silently latches garbage instead of failing.
//
//   hc595: serial-in / parallel-out, LSB first, enable active-low
//   hc165: parallel-in / serial-out, MSB first, enable active-high on this board
//
// Timing: no delay is inserted between edges unless `edge_delay_ns` is set.
// At 0 the only margin is GPIO write latency, which must stay above the
// 74HC setup/hold time (~25ns at 3V3). Raise `edge_delay_ns` when driving
// the lines from something faster than a register write.

use core::fmt;

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{self, ErrorKind, OutputPin, PinState};

pub mod hc165;
pub mod hc595;

pub use hc165::{Hc165, Hc165Config, Hc165Lines};
pub use hc595::{Hc595, Hc595Config, Hc595Lines};

/// One register's worth of bits. Bit 0 is the LSB.
///
/// Plain `u8`: a value that doesn't fit in eight bits can't reach a driver.
pub type Bitfield = u8;

/// Electrical level at which a line counts as asserted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Polarity {
    ActiveLow,
    ActiveHigh,
}

impl Polarity {
    pub const fn asserted(self) -> bool {
        matches!(self, Polarity::ActiveHigh)
    }

    pub const fn idle(self) -> bool {
        !self.asserted()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Line {
    Data,
    Clock,
    Latch,
}

impl Line {
    pub const fn name(self) -> &'static str {
        match self {
            Line::Data => "data",
            Line::Clock => "clock",
            Line::Latch => "latch",
        }
    }
}

/// A line read or write did not complete.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineError {
    pub line: Line,
    pub kind: ErrorKind,
}

impl LineError {
    pub(crate) fn on<E: digital::Error>(line: Line) -> impl FnOnce(E) -> Self {
        move |e| LineError {
            line,
            kind: e.kind(),
        }
    }
}

impl fmt::Display for LineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} line failed: {:?}", self.line.name(), self.kind)
    }
}

pub trait ShiftOut {
    fn shift_out(&mut self, value: Bitfield) -> Result<(), LineError>;
}

pub trait ShiftIn {
    fn shift_in(&mut self) -> Result<Bitfield, LineError>;
}

#[inline]
pub(crate) fn drive<P: OutputPin>(pin: &mut P, line: Line, high: bool) -> Result<(), LineError> {
    pin.set_state(PinState::from(high))
        .map_err(LineError::on(line))
}

#[inline]
pub(crate) fn settle<D: DelayNs>(delay: &mut D, ns: u32) {
    if ns > 0 {
        delay.delay_ns(ns);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn polarity_levels() {
        assert!(!Polarity::ActiveLow.asserted());
        assert!(Polarity::ActiveLow.idle());
        assert!(Polarity::ActiveHigh.asserted());
        assert!(!Polarity::ActiveHigh.idle());
    }

    #[test]
    fn line_error_display_names_the_line() {
        let err = LineError {
            line: Line::Clock,
            kind: ErrorKind::Other,
        };
        let mut buf = String::new();
        fmt::write(&mut buf, format_args!("{}", err)).unwrap();
        assert_eq!(buf, "clock line failed: Other");
    }
}
