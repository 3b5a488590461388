//! The pin mirror loop.
//!
//! `PinMirror` starts [`Unconfigured`]. [`PinMirror::configure`] consumes it
//! and returns the [`Running`] form, which is the only one that can step or
//! loop, so the output can never be driven before its drive mode is set.

use core::convert::Infallible;
use core::marker::PhantomData;

use embedded_hal::digital::{InputPin, OutputPin};
use log::info;

use crate::pin::{InputLine, OutputLine, PushPull};

/// Typestate: the output drive mode has not been selected yet.
pub struct Unconfigured;

/// Typestate: the output is push-pull and the loop may run.
pub struct Running;

pub struct PinMirror<I, O, S = Unconfigured> {
    input: InputLine<I>,
    output: OutputLine<O>,
    _state: PhantomData<S>,
}

impl<I, O> PinMirror<I, O, Unconfigured>
where
    I: InputPin<Error = Infallible>,
    O: OutputPin<Error = Infallible> + PushPull,
{
    /// Bind the mirror to its two lines. Nothing is touched until
    /// [`configure`](Self::configure).
    pub const fn new(input: I, output: O) -> Self {
        Self {
            input: InputLine::new(input),
            output: OutputLine::new(output),
            _state: PhantomData,
        }
    }

    /// Set the output pin's mode bit to push-pull.
    pub fn configure(mut self) -> PinMirror<I, O, Running> {
        self.output.configure();
        info!("output line set to push-pull");

        PinMirror {
            input: self.input,
            output: self.output,
            _state: PhantomData,
        }
    }
}

impl<I, O> PinMirror<I, O, Running>
where
    I: InputPin<Error = Infallible>,
    O: OutputPin<Error = Infallible> + PushPull,
{
    /// Re-apply the push-pull mode. Leaves the line exactly as the first
    /// configuration did.
    pub fn configure(&mut self) {
        self.output.configure();
    }

    /// One iteration: sample the input, drive the sampled level out.
    /// Returns the level written.
    #[inline(always)]
    pub fn step(&mut self) -> bool {
        let level = self.input.read();
        self.output.write(level);
        level
    }

    /// Mirror until power is removed.
    pub fn run_forever(&mut self) -> ! {
        loop {
            self.step();
        }
    }

    /// Mirror while `should_continue` returns true, checking it before every
    /// iteration. For hosted harnesses that need the loop to return; firmware
    /// calls [`run_forever`](Self::run_forever). Returns the iteration count.
    pub fn run_while<F>(&mut self, mut should_continue: F) -> u64
    where
        F: FnMut() -> bool,
    {
        let mut iterations = 0;
        while should_continue() {
            self.step();
            iterations += 1;
        }
        iterations
    }

    /// Give the pins back.
    pub fn release(self) -> (I, O) {
        (self.input.into_inner(), self.output.into_inner())
    }
}
