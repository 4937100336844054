// 74HC595 serial-in / parallel-out driver
//
// Per byte:
//   latch asserted (low)
//   8x: clock low, data = bit i (LSB first), clock high, data low
//   clock low, latch released (high) -> outputs update
//
// Data is returned low after every shift edge, so between edges the data
// line reads the same for every value.

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::OutputPin;

use super::{Bitfield, Line, LineError, Polarity, ShiftOut, drive, settle};

pub struct Hc595Lines<DATA, CLK, LATCH> {
    pub data: DATA,
    pub clock: CLK,
    pub latch: LATCH,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Hc595Config {
    /// Enable/latch line polarity; asserted for the length of one byte.
    pub latch: Polarity,
    /// Data setup before, and clock high time after, each shift edge.
    pub edge_delay_ns: u32,
}

impl Hc595Config {
    pub const BOARD: Self = Self {
        latch: Polarity::ActiveLow,
        edge_delay_ns: 0,
    };
}

impl Default for Hc595Config {
    fn default() -> Self {
        Self::BOARD
    }
}

pub struct Hc595<DATA, CLK, LATCH, D> {
    lines: Hc595Lines<DATA, CLK, LATCH>,
    config: Hc595Config,
    delay: D,
}

impl<DATA, CLK, LATCH, D> Hc595<DATA, CLK, LATCH, D>
where
    DATA: OutputPin,
    CLK: OutputPin,
    LATCH: OutputPin,
    D: DelayNs,
{
    pub fn new(lines: Hc595Lines<DATA, CLK, LATCH>, config: Hc595Config, delay: D) -> Self {
        Self {
            lines,
            config,
            delay,
        }
    }

    /// Put all three lines at their idle level without shifting anything.
    pub fn idle(&mut self) -> Result<(), LineError> {
        drive(&mut self.lines.data, Line::Data, false)?;
        self.close()
    }

    pub fn release(self) -> (Hc595Lines<DATA, CLK, LATCH>, D) {
        (self.lines, self.delay)
    }

    fn write_bits(&mut self, value: Bitfield) -> Result<(), LineError> {
        let ns = self.config.edge_delay_ns;

        drive(&mut self.lines.latch, Line::Latch, self.config.latch.asserted())?;

        for i in 0..8 {
            drive(&mut self.lines.clock, Line::Clock, false)?;
            drive(&mut self.lines.data, Line::Data, (value >> i) & 1 == 1)?;
            settle(&mut self.delay, ns);

            // rising edge shifts the bit in
            drive(&mut self.lines.clock, Line::Clock, true)?;
            settle(&mut self.delay, ns);

            drive(&mut self.lines.data, Line::Data, false)?;
        }

        Ok(())
    }

    // Clock low, latch released. Runs on every exit path; if the clock
    // write fails the latch is still released so the bus isn't held.
    fn close(&mut self) -> Result<(), LineError> {
        let clock = drive(&mut self.lines.clock, Line::Clock, false);
        let latch = drive(&mut self.lines.latch, Line::Latch, self.config.latch.idle());
        clock.and(latch)
    }
}

impl<DATA, CLK, LATCH, D> ShiftOut for Hc595<DATA, CLK, LATCH, D>
where
    DATA: OutputPin,
    CLK: OutputPin,
    LATCH: OutputPin,
    D: DelayNs,
{
    fn shift_out(&mut self, value: Bitfield) -> Result<(), LineError> {
        let body = self.write_bits(value);
        let close = self.close();

        if let (Err(_), Err(e)) = (&body, &close) {
            log::warn!("hc595: release after failed shift also failed: {}", e);
        }

        body.and(close)
    }
}
