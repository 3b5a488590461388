//! The C8051 SFR bank as a singleton, and per-bit pin handles into it.

use core::convert::Infallible;
use core::fmt;

use embedded_hal::digital::{ErrorType, InputPin, OutputPin};
use log::debug;

use super::{install, DriverCell, DriverError, DriverHandle};
use crate::c8051::{SbitAddr, SbitError, SfrBank};
use crate::pin::PushPull;

pub type SfrHandle = DriverHandle<SfrBank>;

/// Install a power-on-reset bank into `cell`.
pub fn init_sfr(cell: &'static DriverCell<SfrBank>) -> Result<SfrHandle, DriverError> {
    let handle = install(cell, SfrBank::new())?;
    debug!("SFR bank installed");
    Ok(handle)
}

impl SfrHandle {
    /// Bind a pin handle to a bit address.
    pub fn sbit(&self, addr: u8) -> Result<Sbit, SbitError> {
        Ok(Sbit {
            sfr: *self,
            addr: SbitAddr::decode(addr)?,
        })
    }
}

/// One bit-addressable port pin, fixed at construction.
///
/// Reads return the pin level, writes go to the port latch, and
/// [`PushPull::set_push_pull`] sets the pin's `PnMDOUT` bit.
///
/// A handle is not `Copy`: whoever holds it is the pin's only writer.
///
/// ```compile_fail
/// fn copyable<T: Copy>() {}
/// copyable::<pin_mirror::drivers::sfr::Sbit>();
/// ```
pub struct Sbit {
    sfr: SfrHandle,
    addr: SbitAddr,
}

impl Sbit {
    pub fn addr(&self) -> SbitAddr {
        self.addr
    }
}

impl fmt::Debug for Sbit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Sbit").field(&self.addr).finish()
    }
}

impl ErrorType for Sbit {
    type Error = Infallible;
}

impl InputPin for Sbit {
    fn is_high(&mut self) -> Result<bool, Self::Error> {
        let addr = self.addr;
        Ok(self.sfr.with(|bank| bank.pin_level(addr)))
    }

    fn is_low(&mut self) -> Result<bool, Self::Error> {
        self.is_high().map(|level| !level)
    }
}

impl OutputPin for Sbit {
    fn set_low(&mut self) -> Result<(), Self::Error> {
        let addr = self.addr;
        self.sfr.with(|bank| bank.write_latch_bit(addr, false));
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        let addr = self.addr;
        self.sfr.with(|bank| bank.write_latch_bit(addr, true));
        Ok(())
    }
}

impl PushPull for Sbit {
    fn set_push_pull(&mut self) {
        let addr = self.addr;
        self.sfr.with(|bank| bank.set_push_pull(addr));
    }
}
