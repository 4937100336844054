// Host-side stand-ins for board hardware, used by the unit tests.
//
// Bench: three simulated GPIO lines sharing one trace, with a 74HC165-ish
//        register behind the data line and per-line fault injection
// RecordingDelay: DelayNs that only counts
// RegisterDevice: I2C target with a flat 256-byte register file
// FakePin: single level pin with a fault switch
// FakeStrip: SmartLedsWrite that keeps every frame written

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;
use std::vec::Vec;

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{self, InputPin, OutputPin};
use embedded_hal::i2c::{self, I2c, NoAcknowledgeSource, Operation};
use smart_leds::{RGB8, SmartLedsWrite};

use crate::shift::Line;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    Set(Line, bool),
    Read(bool),
}

const fn slot(line: Line) -> usize {
    match line {
        Line::Data => 0,
        Line::Clock => 1,
        Line::Latch => 2,
    }
}

#[derive(Default)]
struct State {
    trace: Vec<Event>,
    levels: [bool; 3],
    ops: [usize; 3],
    fail_at: [Option<usize>; 3],
    presented: VecDeque<bool>,
    // level on the register's serial output; pulled up when nothing is clocked
    serial_out: Option<bool>,
}

impl State {
    fn check(&mut self, line: Line) -> Result<(), digital::ErrorKind> {
        let i = slot(line);
        let op = self.ops[i];
        self.ops[i] += 1;
        if self.fail_at[i] == Some(op) {
            self.fail_at[i] = None;
            return Err(digital::ErrorKind::Other);
        }
        Ok(())
    }

    fn set(&mut self, line: Line, high: bool) -> Result<(), digital::ErrorKind> {
        self.check(line)?;
        let i = slot(line);
        let rising = line == Line::Clock && !self.levels[i] && high;
        self.levels[i] = high;
        self.trace.push(Event::Set(line, high));
        if rising {
            self.serial_out = Some(self.presented.pop_front().unwrap_or(true));
        }
        Ok(())
    }

    fn read(&mut self) -> Result<bool, digital::ErrorKind> {
        self.check(Line::Data)?;
        let level = self.serial_out.unwrap_or(true);
        self.trace.push(Event::Read(level));
        Ok(level)
    }
}

#[derive(Clone, Default)]
pub struct Bench {
    state: Rc<RefCell<State>>,
}

impl Bench {
    pub fn new() -> Self {
        Self::default()
    }

    /// (data, clock, latch)
    pub fn lines(&self) -> (SimLine, SimLine, SimLine) {
        (self.line(Line::Data), self.line(Line::Clock), self.line(Line::Latch))
    }

    pub fn line(&self, line: Line) -> SimLine {
        SimLine {
            state: self.state.clone(),
            line,
        }
    }

    /// Make the `nth` (0-based) operation on `line` fail once.
    pub fn fail_nth(&self, line: Line, nth: usize) {
        let mut s = self.state.borrow_mut();
        let i = slot(line);
        s.fail_at[i] = Some(s.ops[i] + nth);
    }

    /// Bits the register shifts out, one per rising clock edge.
    pub fn present_bits(&self, bits: &[bool]) {
        let mut s = self.state.borrow_mut();
        s.presented = bits.iter().copied().collect();
    }

    /// Present `byte` MSB first.
    pub fn present_byte(&self, byte: u8) {
        let bits: Vec<bool> = (0..8).map(|i| (byte >> (7 - i)) & 1 == 1).collect();
        self.present_bits(&bits);
    }

    pub fn level(&self, line: Line) -> bool {
        self.state.borrow().levels[slot(line)]
    }

    pub fn trace(&self) -> Vec<Event> {
        self.state.borrow().trace.clone()
    }

    pub fn take_trace(&self) -> Vec<Event> {
        core::mem::take(&mut self.state.borrow_mut().trace)
    }

    pub fn rising_edges(&self, line: Line) -> usize {
        let mut level = false;
        let mut edges = 0;
        for ev in self.state.borrow().trace.iter() {
            if let Event::Set(l, high) = *ev {
                if l == line {
                    if high && !level {
                        edges += 1;
                    }
                    level = high;
                }
            }
        }
        edges
    }

    /// Data level at every rising clock edge, in order.
    pub fn data_at_rising_edges(&self) -> Vec<bool> {
        let mut clock = false;
        let mut data = false;
        let mut samples = Vec::new();
        for ev in self.state.borrow().trace.iter() {
            match *ev {
                Event::Set(Line::Data, high) => data = high,
                Event::Set(Line::Clock, high) => {
                    if high && !clock {
                        samples.push(data);
                    }
                    clock = high;
                }
                _ => {}
            }
        }
        samples
    }
}

pub struct SimLine {
    state: Rc<RefCell<State>>,
    line: Line,
}

impl digital::ErrorType for SimLine {
    type Error = digital::ErrorKind;
}

impl OutputPin for SimLine {
    fn set_low(&mut self) -> Result<(), Self::Error> {
        self.state.borrow_mut().set(self.line, false)
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        self.state.borrow_mut().set(self.line, true)
    }
}

impl InputPin for SimLine {
    fn is_high(&mut self) -> Result<bool, Self::Error> {
        self.state.borrow_mut().read()
    }

    fn is_low(&mut self) -> Result<bool, Self::Error> {
        self.is_high().map(|high| !high)
    }
}

#[derive(Debug, Default)]
pub struct RecordingDelay {
    pub calls: usize,
    pub total_ns: u64,
}

impl DelayNs for RecordingDelay {
    fn delay_ns(&mut self, ns: u32) {
        self.calls += 1;
        self.total_ns += ns as u64;
    }
}

pub struct RegisterDevice {
    pub address: u8,
    pub regs: [u8; 256],
    pub writes: Vec<(u8, u8)>,
    pub fail: bool,
    pointer: u8,
}

impl RegisterDevice {
    pub fn new(address: u8) -> Self {
        Self {
            address,
            regs: [0; 256],
            writes: Vec::new(),
            fail: false,
            pointer: 0,
        }
    }
}

impl i2c::ErrorType for RegisterDevice {
    type Error = i2c::ErrorKind;
}

impl I2c for RegisterDevice {
    fn transaction(
        &mut self,
        address: u8,
        operations: &mut [Operation<'_>],
    ) -> Result<(), Self::Error> {
        if self.fail {
            return Err(i2c::ErrorKind::Bus);
        }
        if address != self.address {
            return Err(i2c::ErrorKind::NoAcknowledge(NoAcknowledgeSource::Address));
        }
        for op in operations.iter_mut() {
            match op {
                Operation::Write(bytes) => {
                    let Some((&reg, data)) = bytes.split_first() else {
                        continue;
                    };
                    self.pointer = reg;
                    for &b in data {
                        self.regs[self.pointer as usize] = b;
                        self.writes.push((self.pointer, b));
                        self.pointer = self.pointer.wrapping_add(1);
                    }
                }
                Operation::Read(buf) => {
                    for b in buf.iter_mut() {
                        *b = self.regs[self.pointer as usize];
                        self.pointer = self.pointer.wrapping_add(1);
                    }
                }
            }
        }
        Ok(())
    }
}

/// Input or output pin holding one level, with an optional fault.
#[derive(Debug, Default)]
pub struct FakePin {
    pub high: bool,
    pub fail: bool,
}

impl FakePin {
    pub fn at(high: bool) -> Self {
        Self { high, fail: false }
    }

    pub fn broken() -> Self {
        Self {
            high: false,
            fail: true,
        }
    }

    fn check(&self) -> Result<(), digital::ErrorKind> {
        if self.fail {
            return Err(digital::ErrorKind::Other);
        }
        Ok(())
    }
}

impl digital::ErrorType for FakePin {
    type Error = digital::ErrorKind;
}

impl OutputPin for FakePin {
    fn set_low(&mut self) -> Result<(), Self::Error> {
        self.check()?;
        self.high = false;
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        self.check()?;
        self.high = true;
        Ok(())
    }
}

impl InputPin for FakePin {
    fn is_high(&mut self) -> Result<bool, Self::Error> {
        self.check()?;
        Ok(self.high)
    }

    fn is_low(&mut self) -> Result<bool, Self::Error> {
        self.is_high().map(|high| !high)
    }
}

/// SmartLedsWrite that keeps every frame written.
#[derive(Debug, Default)]
pub struct FakeStrip {
    pub shown: Vec<Vec<RGB8>>,
    /// Number of frames taken before `write` starts failing.
    pub fail_after: Option<usize>,
}

impl SmartLedsWrite for FakeStrip {
    type Error = digital::ErrorKind;
    type Color = RGB8;

    fn write<T, I>(&mut self, iterator: T) -> Result<(), Self::Error>
    where
        T: IntoIterator<Item = I>,
        I: Into<Self::Color>,
    {
        if self.fail_after.is_some_and(|n| self.shown.len() >= n) {
            return Err(digital::ErrorKind::Other);
        }
        self.shown.push(iterator.into_iter().map(Into::into).collect());
        Ok(())
    }
}
