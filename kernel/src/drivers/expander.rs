// Numbered-pin view over an expander's split pins
//
// The chip driver hands out one embedded-hal pin per line and forgets the
// numbering. PinBank puts the chip's pin numbers back on them so the loop
// can say "mirror input 2 onto output 10". Direction is fixed when the
// bank is built: numbers in `inputs` can only be read, numbers in
// `outputs` can only be written.

use core::fmt;

use embedded_hal::digital::{InputPin, OutputPin};

use crate::peripherals::Expander;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BankError<E> {
    /// Not in the bank, or not in the direction asked for.
    NoSuchPin(u8),
    Pin(E),
}

impl<E: fmt::Debug> fmt::Display for BankError<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BankError::NoSuchPin(pin) => write!(f, "no pin {} in that direction", pin),
            BankError::Pin(e) => write!(f, "pin: {:?}", e),
        }
    }
}

pub struct PinBank<IN, OUT, const N: usize> {
    inputs: [(u8, IN); N],
    outputs: [(u8, OUT); N],
}

impl<IN, OUT, const N: usize> PinBank<IN, OUT, N> {
    pub fn new(inputs: [(u8, IN); N], outputs: [(u8, OUT); N]) -> Self {
        Self { inputs, outputs }
    }

    #[cfg(test)]
    pub(crate) fn outputs(&self) -> &[(u8, OUT); N] {
        &self.outputs
    }
}

impl<IN, OUT, E, const N: usize> Expander for PinBank<IN, OUT, N>
where
    IN: InputPin<Error = E>,
    OUT: OutputPin<Error = E>,
    E: fmt::Debug,
{
    type Error = BankError<E>;

    fn get(&mut self, pin: u8) -> Result<bool, Self::Error> {
        let (_, input) = self
            .inputs
            .iter_mut()
            .find(|(n, _)| *n == pin)
            .ok_or(BankError::NoSuchPin(pin))?;
        input.is_high().map_err(BankError::Pin)
    }

    fn set(&mut self, pin: u8, high: bool) -> Result<(), Self::Error> {
        let (_, output) = self
            .outputs
            .iter_mut()
            .find(|(n, _)| *n == pin)
            .ok_or(BankError::NoSuchPin(pin))?;
        output.set_state(high.into()).map_err(BankError::Pin)
    }
}
