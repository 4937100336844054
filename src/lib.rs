// Digital Explorer Board demo firmware (ESP32-C3)
//
// Board bring-up only; the loop and every driver live in explorer-kernel.

#![no_std]

pub mod board;
