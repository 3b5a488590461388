//! Pin mirroring firmware core
//!
//! Configures one output line for push-pull drive, then copies the level of
//! one input line onto it for as long as the device is powered. The core is
//! generic over `embedded-hal` 1.0 digital pins, so the same loop runs on the
//! ESP32 image and against the modelled C8051 port bank on the host.

#![cfg_attr(not(test), no_std)]

pub mod c8051;
pub mod drivers;
pub mod mirror;
pub mod pin;

pub use mirror::{PinMirror, Running, Unconfigured};
pub use pin::{InputLine, OutputLine, PushPull};
