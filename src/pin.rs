//! Capability-typed pin handles
//!
//! An [`InputLine`] can only be sampled and an [`OutputLine`] can only be
//! driven. Both wrap an `embedded-hal` pin whose error type is `Infallible`:
//! raw register I/O has no feedback path, so there is nothing to report.

use core::convert::Infallible;

use embedded_hal::digital::{InputPin, OutputPin, PinState};

/// Selects push-pull drive for an output-capable pin.
///
/// Implementations set the single mode bit that belongs to the pin and leave
/// every other bit of the shared mode register untouched. Applying it more
/// than once has the same effect as applying it once.
pub trait PushPull {
    fn set_push_pull(&mut self);
}

/// Read-only digital line.
pub struct InputLine<P> {
    pin: P,
}

impl<P> InputLine<P>
where
    P: InputPin<Error = Infallible>,
{
    pub const fn new(pin: P) -> Self {
        Self { pin }
    }

    /// Sample the current logical level.
    pub fn read(&mut self) -> bool {
        match self.pin.is_high() {
            Ok(level) => level,
            Err(never) => match never {},
        }
    }

    pub fn into_inner(self) -> P {
        self.pin
    }
}

/// Write-only digital line with a one-time drive-mode configuration.
pub struct OutputLine<P> {
    pin: P,
}

impl<P> OutputLine<P>
where
    P: OutputPin<Error = Infallible> + PushPull,
{
    pub const fn new(pin: P) -> Self {
        Self { pin }
    }

    /// Switch the line to push-pull drive.
    pub fn configure(&mut self) {
        self.pin.set_push_pull();
    }

    /// Drive `level` onto the line.
    pub fn write(&mut self, level: bool) {
        match self.pin.set_state(PinState::from(level)) {
            Ok(()) => {}
            Err(never) => match never {},
        }
    }

    pub fn into_inner(self) -> P {
        self.pin
    }
}
