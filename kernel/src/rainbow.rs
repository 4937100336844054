// Rainbow cycle for the RGB strip
//
// One cycle is `frames` frames. In frame j pixel i gets wheel((i * 256 / n + j) & 255),
// so the pixels sit evenly spaced around the wheel and the whole strip turns
// once per cycle. Blocking: FRAMES * FRAME_DELAY_MS = 1.275s plus write time.
//
// Brightness is applied on the way out with `smart_leds::brightness`; the
// wheel itself is always full scale.

use core::fmt::Debug;

use embedded_hal::delay::DelayNs;
use smart_leds::{RGB8, SmartLedsWrite, brightness};

pub const FRAMES: u16 = 255;
pub const FRAME_DELAY_MS: u32 = 5;

/// Map 0..=255 onto a red -> green -> blue -> red wheel.
pub const fn wheel(pos: u8) -> RGB8 {
    if pos < 85 {
        RGB8 {
            r: 255 - pos * 3,
            g: pos * 3,
            b: 0,
        }
    } else if pos < 170 {
        let p = pos - 85;
        RGB8 {
            r: 0,
            g: 255 - p * 3,
            b: p * 3,
        }
    } else {
        let p = pos - 170;
        RGB8 {
            r: p * 3,
            g: 0,
            b: 255 - p * 3,
        }
    }
}

/// Wheel position of `pixel` (of `pixels`) in `frame`.
pub fn hue(pixel: usize, pixels: usize, frame: u16) -> u8 {
    let base = pixel * 256 / pixels.max(1);
    ((base + frame as usize) & 0xFF) as u8
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rainbow {
    pub pixels: usize,
    pub frames: u16,
    pub frame_delay_ms: u32,
    /// 0..=255, passed straight to `smart_leds::brightness`
    pub brightness: u8,
}

impl Rainbow {
    /// Three pixels at 0.3 of full scale.
    pub const BOARD: Self = Self {
        pixels: 3,
        frames: FRAMES,
        frame_delay_ms: FRAME_DELAY_MS,
        brightness: 77,
    };

    /// Full-scale colours of every pixel in `frame`.
    pub fn frame(&self, frame: u16) -> impl Iterator<Item = RGB8> {
        let n = self.pixels;
        (0..n).map(move |i| wheel(hue(i, n, frame)))
    }

    /// Run one full cycle. Stops at the first frame the strip fails to take.
    pub fn run<L, D>(&self, strip: &mut L, delay: &mut D) -> Result<(), L::Error>
    where
        L: SmartLedsWrite<Color = RGB8>,
        L::Error: Debug,
        D: DelayNs,
    {
        for frame in 0..self.frames {
            strip.write(brightness(self.frame(frame), self.brightness))?;
            delay.delay_ms(self.frame_delay_ms);
        }
        Ok(())
    }
}

impl Default for Rainbow {
    fn default() -> Self {
        Self::BOARD
    }
}
