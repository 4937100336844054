//! GPIO |     Function       |      Notes
//! -----+--------------------+----------------------------------
//!  0   | 595 SER            | LED register serial data
//!  1   | I2C0 SDA           | MCP23017 (0x20) + LSM6DS33 (0x6A), external pull-ups
//!  2   | 595 SRCLK          | LED register shift clock, idles low
//!  3   | I2C0 SCL           |
//!  4   | 595 RCLK / nOE     | LED register latch, active LOW, idles high
//!  5   | 165 QH             | DIP register serial out, internal pullup
//!  6   | 165 CLK            | DIP register clock, idles low
//!  7   | 165 SH/nLD         | DIP register load, asserted HIGH here, idles low
//! 10   | RMT ch0            | WS2812 DIN (3 pixels)
//! 20   | UART1 RX           | unused, routed for completeness
//! 21   | UART1 TX           | 115200 8N1 heartbeat

// ----- LED shift register (74HC595) -----
pub const HC595_DATA: u8 = 0;
pub const HC595_CLOCK: u8 = 2;
pub const HC595_LATCH: u8 = 4;

// ----- DIP switch shift register (74HC165) -----
pub const HC165_DATA: u8 = 5;
pub const HC165_CLOCK: u8 = 6;
pub const HC165_LATCH: u8 = 7;

// ----- I2C bus -----
pub const I2C_SDA: u8 = 1;
pub const I2C_SCL: u8 = 3;

// ----- LED strip -----
pub const STRIP_DIN: u8 = 10; // RMT channel 0

// ----- UART -----
pub const UART_TX: u8 = 21;
pub const UART_RX: u8 = 20;
