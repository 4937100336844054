// The demo poll loop
//
// One iteration, always in this order:
//   1. DIP switch in  (74HC165)
//   2. LEDs out       (74HC595), skipped when 1 failed
//   3. expander mirror: 4 switches -> 4 LEDs, inverted (switches are active-low)
//   4. UART heartbeat
//   5. accelerometer sample, logged
//   6. one rainbow cycle on the strip (~1.3s, blocking), or a short idle wait
//
// No step's failure stops a later step. Failures are logged and reported in
// the IterationReport; the next iteration simply tries again.

use core::fmt::Debug;

use embedded_hal::delay::DelayNs;
use smart_leds::{RGB8, SmartLedsWrite};

use crate::peripherals::{Accelerometer, Expander, SerialTx};
use crate::rainbow::Rainbow;
use crate::shift::{Bitfield, ShiftIn, ShiftOut};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    ShiftIn,
    ShiftOut,
    Mirror,
    Uart,
    Accel,
    Strip,
}

impl Step {
    const fn bit(self) -> u8 {
        1 << self as u8
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DemoConfig {
    /// (expander input, expander output) pairs mirrored every iteration
    pub mirror: [(u8, u8); 4],
    pub message: &'static [u8],
    /// None skips the strip and waits `idle_ms` instead.
    pub rainbow: Option<Rainbow>,
    pub idle_ms: u32,
}

impl DemoConfig {
    pub const BOARD: Self = Self {
        mirror: [(0, 8), (1, 9), (2, 10), (3, 11)],
        message: b"Hello World!",
        rainbow: Some(Rainbow::BOARD),
        idle_ms: 100,
    };
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self::BOARD
    }
}

/// Everything the loop drives, already brought up.
pub struct DemoHw<I, O, X, U, A, L> {
    pub switches: I,
    pub leds: O,
    pub expander: X,
    pub uart: U,
    pub accel: A,
    pub strip: L,
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct IterationReport {
    pub switches: Option<Bitfield>,
    pub acceleration: Option<(f32, f32, f32)>,
    failed: u8,
}

impl IterationReport {
    pub fn failed(&self, step: Step) -> bool {
        self.failed & step.bit() != 0
    }

    pub fn is_clean(&self) -> bool {
        self.failed == 0
    }

    fn fail(&mut self, step: Step) {
        self.failed |= step.bit();
    }
}

pub struct PollLoop<I, O, X, U, A, L, D> {
    hw: DemoHw<I, O, X, U, A, L>,
    delay: D,
    config: DemoConfig,
    iterations: u32,
}

impl<I, O, X, U, A, L, D> PollLoop<I, O, X, U, A, L, D>
where
    I: ShiftIn,
    O: ShiftOut,
    X: Expander,
    U: SerialTx,
    A: Accelerometer,
    L: SmartLedsWrite<Color = RGB8>,
    L::Error: Debug,
    D: DelayNs,
{
    pub fn new(hw: DemoHw<I, O, X, U, A, L>, delay: D, config: DemoConfig) -> Self {
        Self {
            hw,
            delay,
            config,
            iterations: 0,
        }
    }

    pub fn iterations(&self) -> u32 {
        self.iterations
    }

    pub fn run(mut self) -> ! {
        log::info!("demo: running");
        loop {
            self.step();
        }
    }

    pub fn step(&mut self) -> IterationReport {
        let mut report = IterationReport::default();

        self.shift_registers(&mut report);
        self.mirror(&mut report);
        self.heartbeat(&mut report);
        self.accel(&mut report);
        self.animate(&mut report);

        self.iterations = self.iterations.wrapping_add(1);
        report
    }

    fn shift_registers(&mut self, report: &mut IterationReport) {
        let value = match self.hw.switches.shift_in() {
            Ok(v) => v,
            Err(e) => {
                log::warn!("shift: read failed: {}", e);
                report.fail(Step::ShiftIn);
                return;
            }
        };
        report.switches = Some(value);
        log::debug!("shift: dip {:04b}", value >> 4);

        if let Err(e) = self.hw.leds.shift_out(value) {
            log::warn!("shift: write failed: {}", e);
            report.fail(Step::ShiftOut);
        }
    }

    fn mirror(&mut self, report: &mut IterationReport) {
        for &(input, output) in self.config.mirror.iter() {
            let level = match self.hw.expander.get(input) {
                Ok(level) => level,
                Err(e) => {
                    log::warn!("expander: read pin {} failed: {:?}", input, e);
                    report.fail(Step::Mirror);
                    continue;
                }
            };

            if let Err(e) = self.hw.expander.set(output, !level) {
                log::warn!("expander: write pin {} failed: {:?}", output, e);
                report.fail(Step::Mirror);
            }
        }
    }

    fn heartbeat(&mut self, report: &mut IterationReport) {
        if let Err(e) = self.hw.uart.write(self.config.message) {
            log::warn!("uart: write failed: {:?}", e);
            report.fail(Step::Uart);
        }
    }

    fn accel(&mut self, report: &mut IterationReport) {
        match self.hw.accel.read_acceleration() {
            Ok((x, y, z)) => {
                log::info!("accel: X:{:.2}, Y: {:.2}, Z: {:.2} m/s^2", x, y, z);
                report.acceleration = Some((x, y, z));
            }
            Err(e) => {
                log::warn!("accel: read failed: {:?}", e);
                report.fail(Step::Accel);
            }
        }
    }

    fn animate(&mut self, report: &mut IterationReport) {
        let Some(rainbow) = self.config.rainbow else {
            self.delay.delay_ms(self.config.idle_ms);
            return;
        };

        if let Err(e) = rainbow.run(&mut self.hw.strip, &mut self.delay) {
            log::warn!("strip: write failed: {:?}", e);
            report.fail(Step::Strip);
        }
    }
}
