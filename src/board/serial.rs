// UART1 as the heartbeat sink
//
// The FIFO takes whatever fits per `write`; loop until the whole message is
// queued, then wait for it to leave the wire.

use esp_hal::Blocking;
use esp_hal::uart::{TxError, Uart};
use explorer_kernel::SerialTx;

pub struct Serial {
    uart: Uart<'static, Blocking>,
}

impl Serial {
    pub fn new(uart: Uart<'static, Blocking>) -> Self {
        Self { uart }
    }
}

impl SerialTx for Serial {
    type Error = TxError;

    fn write(&mut self, bytes: &[u8]) -> Result<(), TxError> {
        let mut rest = bytes;
        while !rest.is_empty() {
            let n = self.uart.write(rest)?;
            rest = &rest[n..];
        }
        self.uart.flush()
    }
}
