// LSM6DS33 accelerometer (gyro left powered down)
//
// Setup: BDU + register auto-increment, accel 104 Hz / +-4 g.
// One burst read of OUTX_L_XL..OUTZ_H_XL gives three little-endian i16s.
// +-4 g full scale is 0.122 mg/LSB.

use core::fmt;

use embedded_hal::i2c::I2c;

use crate::peripherals::Accelerometer;

/// SA0 high (board default)
pub const DEFAULT_ADDRESS: u8 = 0x6A;

pub const WHO_AM_I_VALUE: u8 = 0x69;

const STANDARD_GRAVITY: f32 = 9.806_65;
const MG_PER_LSB_4G: f32 = 0.122;

mod reg {
    pub const WHO_AM_I: u8 = 0x0F;
    pub const CTRL1_XL: u8 = 0x10;
    pub const CTRL3_C: u8 = 0x12;
    pub const OUTX_L_XL: u8 = 0x28;
}

// CTRL1_XL: ODR_XL = 0100 (104 Hz), FS_XL = 10 (+-4 g)
const CTRL1_XL_104HZ_4G: u8 = 0b0100_1000;
// CTRL3_C: BDU | IF_INC
const CTRL3_C_BDU_INC: u8 = 0b0100_0100;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lsm6Error<E> {
    Bus(E),
    /// WHO_AM_I returned something other than 0x69.
    UnknownDevice(u8),
}

impl<E: fmt::Debug> fmt::Display for Lsm6Error<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Lsm6Error::Bus(e) => write!(f, "i2c: {:?}", e),
            Lsm6Error::UnknownDevice(id) => write!(f, "unexpected WHO_AM_I {:#04x}", id),
        }
    }
}

pub fn raw_to_ms2(raw: i16) -> f32 {
    raw as f32 * MG_PER_LSB_4G / 1000.0 * STANDARD_GRAVITY
}

pub struct Lsm6ds33<I2C> {
    i2c: I2C,
    address: u8,
}

impl<I2C, E> Lsm6ds33<I2C>
where
    I2C: I2c<Error = E>,
{
    pub fn new(i2c: I2C, address: u8) -> Self {
        Self { i2c, address }
    }

    /// Check the chip id and start the accelerometer.
    pub fn init(&mut self) -> Result<(), Lsm6Error<E>> {
        let id = self.read_reg(reg::WHO_AM_I)?;
        if id != WHO_AM_I_VALUE {
            return Err(Lsm6Error::UnknownDevice(id));
        }

        self.write_reg(reg::CTRL3_C, CTRL3_C_BDU_INC)?;
        self.write_reg(reg::CTRL1_XL, CTRL1_XL_104HZ_4G)?;

        log::info!("lsm6ds33: accel 104Hz +-4g at {:#04x}", self.address);
        Ok(())
    }

    pub fn read_raw(&mut self) -> Result<[i16; 3], Lsm6Error<E>> {
        let mut buf = [0u8; 6];
        self.i2c
            .write_read(self.address, &[reg::OUTX_L_XL], &mut buf)
            .map_err(Lsm6Error::Bus)?;

        Ok([
            i16::from_le_bytes([buf[0], buf[1]]),
            i16::from_le_bytes([buf[2], buf[3]]),
            i16::from_le_bytes([buf[4], buf[5]]),
        ])
    }

    fn write_reg(&mut self, reg: u8, value: u8) -> Result<(), Lsm6Error<E>> {
        self.i2c
            .write(self.address, &[reg, value])
            .map_err(Lsm6Error::Bus)
    }

    fn read_reg(&mut self, reg: u8) -> Result<u8, Lsm6Error<E>> {
        let mut buf = [0u8; 1];
        self.i2c
            .write_read(self.address, &[reg], &mut buf)
            .map_err(Lsm6Error::Bus)?;
        Ok(buf[0])
    }
}

impl<I2C, E> Accelerometer for Lsm6ds33<I2C>
where
    I2C: I2c<Error = E>,
    E: fmt::Debug,
{
    type Error = Lsm6Error<E>;

    fn read_acceleration(&mut self) -> Result<(f32, f32, f32), Self::Error> {
        let [x, y, z] = self.read_raw()?;
        Ok((raw_to_ms2(x), raw_to_ms2(y), raw_to_ms2(z)))
    }
}
