//! Digital Explorer Board support package
//!
//! Maps the board's hardware to named subsystems so the demo loop never
//! sees a GPIO number or a bus handle. Pin assignments live in `pins`,
//! bus settings and device addresses here.

pub mod pins;
pub mod serial;

pub use serial::Serial;

use core::cell::RefCell;

use embedded_hal_bus::i2c::RefCellDevice;
use esp_hal::{
    Blocking,
    delay::Delay,
    gpio::{AnyPin, Input, InputConfig, Level, Output, OutputConfig, Pull},
    i2c,
    peripherals::Peripherals,
    rmt::{ChannelCreator, Rmt},
    time::Rate,
    uart,
};
use explorer_kernel::drivers::{self, Lsm6ds33, lsm6ds33};
use explorer_kernel::shift::{Hc165, Hc165Config, Hc165Lines, Hc595, Hc595Config, Hc595Lines};
use log::{info, warn};
use static_cell::StaticCell;

pub const I2C_FREQ_KHZ: u32 = 100;
pub const UART_BAUD: u32 = 115_200;
pub const RMT_FREQ_MHZ: u32 = 80;
pub const STRIP_LEN: usize = 3;

/// MCP23017 A2..A0 straps, all low
pub const EXPANDER_STRAPS: [bool; 3] = [false, false, false];
pub const EXPANDER_ADDR: u8 = 0x20;
pub const IMU_ADDR: u8 = lsm6ds33::DEFAULT_ADDRESS;

// Type Aliases
pub type I2cBus = i2c::master::I2c<'static, Blocking>;
pub type SharedI2c = RefCellDevice<'static, I2cBus>;
pub type Switches = Hc165<Input<'static>, Output<'static>, Output<'static>, Delay>;
pub type Leds = Hc595<Output<'static>, Output<'static>, Output<'static>, Delay>;
pub type Imu = Lsm6ds33<SharedI2c>;

static I2C_BUS: StaticCell<RefCell<I2cBus>> = StaticCell::new();

// Hardware Bundles
/// Both shift registers, lines already at their idle levels.
pub struct ShiftHw {
    pub switches: Switches,
    pub leds: Leds,
}

/// Everything on the I2C bus. The IMU is running; the expander gets its
/// pins split and configured by `port_expander` in main.
pub struct I2cHw {
    pub expander: SharedI2c,
    pub imu: Imu,
}

/// RMT channel and data pin for the WS2812 strip. The pulse buffer is
/// sized and owned by whoever builds the `SmartLedsAdapter`.
pub struct StripHw {
    pub channel: ChannelCreator<'static, Blocking, 0>,
    pub pin: AnyPin<'static>,
}

/// Complete board hardware, ready for the demo loop.
pub struct Board {
    pub shift: ShiftHw,
    pub i2c: I2cHw,
    pub uart: Serial,
    pub strip: StripHw,
}

impl Board {
    pub fn init(p: Peripherals) -> Self {
        let out = OutputConfig::default();

        let mut leds = Hc595::new(
            Hc595Lines {
                data: Output::new(p.GPIO0, Level::Low, out),
                clock: Output::new(p.GPIO2, Level::Low, out),
                latch: Output::new(p.GPIO4, Level::High, out),
            },
            Hc595Config::BOARD,
            Delay::new(),
        );
        let mut switches = Hc165::new(
            Hc165Lines {
                data: Input::new(p.GPIO5, InputConfig::default().with_pull(Pull::Up)),
                clock: Output::new(p.GPIO6, Level::Low, out),
                latch: Output::new(p.GPIO7, Level::Low, out),
            },
            Hc165Config::BOARD,
            Delay::new(),
        );
        leds.idle().unwrap();
        switches.idle().unwrap();
        info!(
            "shift: 595 on GPIO{}/{}/{}, 165 on GPIO{}/{}/{}",
            pins::HC595_DATA,
            pins::HC595_CLOCK,
            pins::HC595_LATCH,
            pins::HC165_DATA,
            pins::HC165_CLOCK,
            pins::HC165_LATCH,
        );

        let i2c_cfg = i2c::master::Config::default().with_frequency(Rate::from_khz(I2C_FREQ_KHZ));
        let bus = i2c::master::I2c::new(p.I2C0, i2c_cfg)
            .unwrap()
            .with_sda(p.GPIO1)
            .with_scl(p.GPIO3);

        let uart_cfg = uart::Config::default().with_baudrate(UART_BAUD);
        let uart = uart::Uart::new(p.UART1, uart_cfg)
            .unwrap()
            .with_tx(p.GPIO21)
            .with_rx(p.GPIO20);
        info!("uart: {} baud on GPIO{}", UART_BAUD, pins::UART_TX);

        let rmt = Rmt::new(p.RMT, Rate::from_mhz(RMT_FREQ_MHZ)).unwrap();
        info!("strip: {} pixels on GPIO{}", STRIP_LEN, pins::STRIP_DIN);

        Board {
            shift: ShiftHw { switches, leds },
            i2c: Self::init_i2c(bus),
            uart: Serial::new(uart),
            strip: StripHw {
                channel: rmt.channel0,
                pin: p.GPIO10.into(),
            },
        }
    }

    fn init_i2c(bus: I2cBus) -> I2cHw {
        let bus: &'static RefCell<I2cBus> = I2C_BUS.init(RefCell::new(bus));

        let mut found = [0u8; 8];
        let n = drivers::scan(&mut RefCellDevice::new(bus), &mut found);
        info!("i2c: {} device(s) on GPIO{}/{}", n, pins::I2C_SDA, pins::I2C_SCL);
        for addr in found.iter().take(n) {
            info!("i2c:   {:#04x}", addr);
        }
        if !found[..n.min(found.len())].contains(&EXPANDER_ADDR) {
            warn!("i2c: no expander at {:#04x}", EXPANDER_ADDR);
        }

        let mut imu = Lsm6ds33::new(RefCellDevice::new(bus), IMU_ADDR);
        imu.init().unwrap();

        I2cHw {
            expander: RefCellDevice::new(bus),
            imu,
        }
    }
}
