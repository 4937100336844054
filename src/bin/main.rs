// Digital Explorer Board demo entry point
//
// Boot sequence: logger -> clocks -> board bring-up -> expander pins ->
// strip adapter -> poll loop
// The loop never returns; every peripheral failure after bring-up is logged
// and retried on the next iteration. Bring-up failures panic.
//
// The expander pins and the RMT pulse buffer borrow from locals here, which
// live as long as the loop does.

#![no_std]
#![no_main]

use esp_backtrace as _;
use esp_hal::clock::CpuClock;
use esp_hal::delay::Delay;
use esp_hal_smartled::{SmartLedsAdapter, smart_led_buffer};
use log::info;
use smart_leds::{RGB8, SmartLedsWrite};

use explorer_board::board::{self, Board};
use explorer_kernel::drivers::PinBank;
use explorer_kernel::{DemoConfig, DemoHw, PollLoop};

esp_bootloader_esp_idf::esp_app_desc!();

#[esp_hal::main]
fn main() -> ! {
    esp_println::logger::init_logger_from_env();
    let config = esp_hal::Config::default().with_cpu_clock(CpuClock::max());
    let peripherals = esp_hal::init(config);

    info!("booting...");

    let Board {
        shift,
        i2c,
        uart,
        strip,
    } = Board::init(peripherals);

    // MCP23017: switches on GPA0..3 (pulled up), LEDs on GPB0..3 (start low)
    let [a0, a1, a2] = board::EXPANDER_STRAPS;
    let mut mcp = port_expander::Mcp23x17::new_mcp23017(i2c.expander, a0, a1, a2);
    let pins = mcp.split();
    let mut inputs = [
        (0, pins.gpa0),
        (1, pins.gpa1),
        (2, pins.gpa2),
        (3, pins.gpa3),
    ];
    for (_, pin) in inputs.iter_mut() {
        pin.enable_pull_up(true).unwrap();
    }
    let outputs = [
        (8, pins.gpb0.into_output().unwrap()),
        (9, pins.gpb1.into_output().unwrap()),
        (10, pins.gpb2.into_output().unwrap()),
        (11, pins.gpb3.into_output().unwrap()),
    ];
    let expander = PinBank::new(inputs, outputs);
    info!("mcp23017: ready at {:#04x}", board::EXPANDER_ADDR);

    let mut rmt_buffer = smart_led_buffer!(board::STRIP_LEN);
    let mut leds = SmartLedsAdapter::new(strip.channel, strip.pin, &mut rmt_buffer);
    // blank whatever the pixels powered up showing
    leds.write([RGB8::default(); board::STRIP_LEN]).unwrap();

    info!("hardware initialized.");

    let hw = DemoHw {
        switches: shift.switches,
        leds: shift.leds,
        expander,
        uart,
        accel: i2c.imu,
        strip: leds,
    };
    PollLoop::new(hw, Delay::new(), DemoConfig::BOARD).run()
}
