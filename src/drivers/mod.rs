//! Process-wide handles to physical resources.
//!
//! Each resource lives in a static [`DriverCell`] that starts empty. Its
//! `init_*` function installs the driver once and hands back a copyable
//! [`DriverHandle`]; every access goes through a critical section.

use core::{cell::RefCell, fmt, marker::PhantomData};

use critical_section::Mutex;

pub mod sfr;

pub type DriverCell<T> = Mutex<RefCell<Option<T>>>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DriverError {
    AlreadyInitialized,
}

impl fmt::Display for DriverError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DriverError::AlreadyInitialized => f.write_str("driver already initialized"),
        }
    }
}

impl core::error::Error for DriverError {}

/// Creates an empty cell for a `static`.
pub const fn empty_cell<T>() -> DriverCell<T> {
    Mutex::new(RefCell::new(None))
}

/// Install `driver` into `cell`, failing if something is already there.
pub fn install<T: 'static>(
    cell: &'static DriverCell<T>,
    driver: T,
) -> Result<DriverHandle<T>, DriverError> {
    critical_section::with(|cs| {
        let mut slot = cell.borrow_ref_mut(cs);
        if slot.is_some() {
            return Err(DriverError::AlreadyInitialized);
        }
        *slot = Some(driver);
        Ok(())
    })?;
    Ok(DriverHandle::new(cell))
}

pub struct DriverHandle<T: 'static> {
    cell: &'static DriverCell<T>,
    _marker: PhantomData<T>,
}

impl<T: 'static> Clone for DriverHandle<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T: 'static> Copy for DriverHandle<T> {}

impl<T: 'static> DriverHandle<T> {
    // Only `install` builds handles, so a handle always points at a filled
    // cell; nothing ever empties one.
    const fn new(cell: &'static DriverCell<T>) -> Self {
        Self {
            cell,
            _marker: PhantomData,
        }
    }

    /// Run `f` with exclusive access to the driver.
    pub fn with<R>(&self, f: impl FnOnce(&mut T) -> R) -> R {
        critical_section::with(|cs| {
            let mut slot = self.cell.borrow_ref_mut(cs);
            match slot.as_mut() {
                Some(driver) => f(driver),
                None => unreachable!("driver handle without an installed driver"),
            }
        })
    }
}
