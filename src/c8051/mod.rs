//! C8051F020 port model
//!
//! Bit-addressable port pins are named by their sbit address: ports 0-3
//! occupy SFR rows `0x80`, `0x90`, `0xA0` and `0xB0`, one address per bit.
//! [`SfrBank`] holds the port latches and output-mode registers behind those
//! addresses.

use core::fmt;

mod sfr;

pub use sfr::SfrBank;

/// Sbit the firmware drives (`SS`, P0.0).
pub const OUTPUT_SBIT: u8 = 0x80;
/// Sbit the firmware samples (`IN`, P0.3).
pub const INPUT_SBIT: u8 = 0x83;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Port {
    P0,
    P1,
    P2,
    P3,
}

impl Port {
    pub const ALL: [Port; 4] = [Port::P0, Port::P1, Port::P2, Port::P3];

    pub const fn index(self) -> usize {
        self as usize
    }

    /// SFR address of the port latch (`Pn`).
    pub const fn latch_address(self) -> u8 {
        0x80 + 0x10 * self as u8
    }

    /// SFR address of the output-mode register (`PnMDOUT`).
    pub const fn mode_address(self) -> u8 {
        0xA4 + self as u8
    }

    const fn from_index(index: u8) -> Option<Port> {
        match index {
            0 => Some(Port::P0),
            1 => Some(Port::P1),
            2 => Some(Port::P2),
            3 => Some(Port::P3),
            _ => None,
        }
    }
}

impl fmt::Display for Port {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "P{}", self.index())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SbitError {
    /// The address does not name a bit of ports 0-3.
    UnknownAddress(u8),
}

impl fmt::Display for SbitError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SbitError::UnknownAddress(addr) => write!(f, "unknown sbit address {addr:#04x}"),
        }
    }
}

impl core::error::Error for SbitError {}

/// A decoded bit address: one pin of one port.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SbitAddr {
    port: Port,
    bit: u8,
}

impl SbitAddr {
    pub const fn decode(addr: u8) -> Result<Self, SbitError> {
        let bit = addr & 0x0F;
        if addr < 0x80 || bit > 7 {
            return Err(SbitError::UnknownAddress(addr));
        }
        match Port::from_index((addr >> 4) - 8) {
            Some(port) => Ok(Self { port, bit }),
            None => Err(SbitError::UnknownAddress(addr)),
        }
    }

    pub const fn port(self) -> Port {
        self.port
    }

    pub const fn bit(self) -> u8 {
        self.bit
    }

    pub const fn mask(self) -> u8 {
        1 << self.bit
    }

    pub const fn address(self) -> u8 {
        self.port.latch_address() + self.bit
    }

    /// Pin number on the package footprint, where the part exposes one.
    pub const fn package_pin(self) -> Option<u8> {
        let pin = match (self.port, self.bit) {
            (Port::P0, 0) => 20,
            (Port::P0, 1) => 21,
            (Port::P0, 2) => 18,
            (Port::P0, 3) => 19,
            (Port::P0, 4) => 16,
            (Port::P0, 5) => 17,
            (Port::P0, 6) => 14,
            (Port::P0, 7) => 15,

            (Port::P1, 0) => 12,
            (Port::P1, 1) => 13,
            (Port::P1, 2) => 10,
            (Port::P1, 3) => 11,
            (Port::P1, 4) => 6,
            (Port::P1, 5) => 9,
            (Port::P1, 6) => 4,
            (Port::P1, 7) => 5,

            (Port::P2, 0) => 29,
            (Port::P2, 1) => 30,
            (Port::P2, 2) => 27,
            (Port::P2, 3) => 28,
            (Port::P2, 4) => 24,
            (Port::P2, 5) => 25,
            (Port::P2, 6) => 22,
            (Port::P2, 7) => 23,

            (Port::P3, 0) => 38,
            (Port::P3, 1) => 37,
            (Port::P3, 2) => 35,
            (Port::P3, 3) => 36,
            (Port::P3, 4) => 33,
            (Port::P3, 5) => 34,
            (Port::P3, 6) => 31,
            (Port::P3, 7) => 32,

            _ => return None,
        };
        Some(pin)
    }
}

impl fmt::Display for SbitAddr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.port, self.bit)
    }
}
