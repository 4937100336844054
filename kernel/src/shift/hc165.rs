// 74HC165 parallel-in / serial-out driver
//
// Per byte:
//   latch asserted (high on this board, see below)
//   8x: clock high, sample data into bit (7 - i), clock low
//   latch released (low)
//   result = ((raw << realign) & 0xFF), inverted if the inputs are active-low
//
// The schematic calls the enable line nLATCH, but on this board it is
// wired active-high. The name is kept so the pin map matches the silkscreen;
// the polarity lives in Hc165Config::latch.
//
// The DIP switches pull to ground when closed, so a closed switch reads 0.
// `<< 3` moves the four switch bits into the LED byte layout of the 595
// side and drops the top three bits read.

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{InputPin, OutputPin};

use super::{Bitfield, Line, LineError, Polarity, ShiftIn, drive, settle};

pub struct Hc165Lines<DATA, CLK, LATCH> {
    pub data: DATA,
    pub clock: CLK,
    pub latch: LATCH,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Hc165Config {
    pub latch: Polarity,
    /// Level of a closed switch on the serial output.
    pub data: Polarity,
    /// Left shift applied to the raw byte before inversion.
    pub realign: u32,
    /// Wait after each clock edge before the next line operation.
    pub edge_delay_ns: u32,
}

impl Hc165Config {
    pub const BOARD: Self = Self {
        latch: Polarity::ActiveHigh,
        data: Polarity::ActiveLow,
        realign: 3,
        edge_delay_ns: 0,
    };

    /// Raw accumulator to switch byte. Bits shifted past bit 7 are dropped.
    pub const fn transform(&self, raw: Bitfield) -> Bitfield {
        let aligned = match raw.checked_shl(self.realign) {
            Some(v) => v,
            None => 0,
        };
        match self.data {
            Polarity::ActiveLow => aligned ^ 0xFF,
            Polarity::ActiveHigh => aligned,
        }
    }
}

impl Default for Hc165Config {
    fn default() -> Self {
        Self::BOARD
    }
}

pub struct Hc165<DATA, CLK, LATCH, D> {
    lines: Hc165Lines<DATA, CLK, LATCH>,
    config: Hc165Config,
    delay: D,
}

impl<DATA, CLK, LATCH, D> Hc165<DATA, CLK, LATCH, D>
where
    DATA: InputPin,
    CLK: OutputPin,
    LATCH: OutputPin,
    D: DelayNs,
{
    pub fn new(lines: Hc165Lines<DATA, CLK, LATCH>, config: Hc165Config, delay: D) -> Self {
        Self {
            lines,
            config,
            delay,
        }
    }

    /// Clock low, latch released.
    pub fn idle(&mut self) -> Result<(), LineError> {
        self.abort()
    }

    pub fn release(self) -> (Hc165Lines<DATA, CLK, LATCH>, D) {
        (self.lines, self.delay)
    }

    /// Clock one byte out of the register without the board transform.
    ///
    /// The first bit read lands in bit 7.
    pub fn read_raw(&mut self) -> Result<Bitfield, LineError> {
        match self.read_bits() {
            Ok(raw) => {
                drive(&mut self.lines.latch, Line::Latch, self.config.latch.idle())?;
                Ok(raw)
            }
            Err(e) => {
                if let Err(release) = self.abort() {
                    log::warn!("hc165: release after failed read also failed: {}", release);
                }
                Err(e)
            }
        }
    }

    fn read_bits(&mut self) -> Result<Bitfield, LineError> {
        let ns = self.config.edge_delay_ns;

        drive(&mut self.lines.latch, Line::Latch, self.config.latch.asserted())?;

        let mut raw: Bitfield = 0;
        for i in 0..8 {
            // rising edge presents the next bit
            drive(&mut self.lines.clock, Line::Clock, true)?;
            settle(&mut self.delay, ns);

            let bit = self
                .lines
                .data
                .is_high()
                .map_err(LineError::on(Line::Data))?;
            raw |= (bit as Bitfield) << (7 - i);

            drive(&mut self.lines.clock, Line::Clock, false)?;
            settle(&mut self.delay, ns);
        }

        Ok(raw)
    }

    fn abort(&mut self) -> Result<(), LineError> {
        let clock = drive(&mut self.lines.clock, Line::Clock, false);
        let latch = drive(&mut self.lines.latch, Line::Latch, self.config.latch.idle());
        clock.and(latch)
    }
}

impl<DATA, CLK, LATCH, D> ShiftIn for Hc165<DATA, CLK, LATCH, D>
where
    DATA: InputPin,
    CLK: OutputPin,
    LATCH: OutputPin,
    D: DelayNs,
{
    fn shift_in(&mut self) -> Result<Bitfield, LineError> {
        let raw = self.read_raw()?;
        Ok(self.config.transform(raw))
    }
}
