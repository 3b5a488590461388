use super::{Port, SbitAddr};

const LATCH_RESET: u8 = 0xFF;
const MODE_RESET: u8 = 0x00;

#[derive(Clone, Copy, Debug)]
struct PortState {
    latch: u8,
    /// `PnMDOUT`: 1 = push-pull, 0 = open-drain.
    mode: u8,
    /// Bits held by the attached circuit.
    driven: u8,
    /// Levels of the `driven` bits.
    external: u8,
    latch_writes: u32,
}

impl PortState {
    const RESET: PortState = PortState {
        latch: LATCH_RESET,
        mode: MODE_RESET,
        driven: 0,
        external: 0,
        latch_writes: 0,
    };

    /// Pin levels as seen by a read of the port.
    const fn pins(&self) -> u8 {
        let push_pull = self.latch & self.mode;
        // open-drain bits float high on the weak pull-up unless pulled low
        let released = self.latch & !self.mode;
        let open_drain = released & (!self.driven | self.external);
        push_pull | open_drain
    }
}

/// Port latches and output-mode registers of ports 0-3, plus whatever the
/// outside world is driving onto the pins.
#[derive(Clone, Debug)]
pub struct SfrBank {
    ports: [PortState; 4],
}

impl SfrBank {
    /// Power-on state: every latch `0xFF`, every pin open-drain, nothing
    /// attached.
    pub const fn new() -> Self {
        Self {
            ports: [PortState::RESET; 4],
        }
    }

    /// Read an SFR. Port latch addresses return pin levels, mode addresses
    /// return the mode register. Anything else reads as `None`.
    pub fn read_sfr(&self, addr: u8) -> Option<u8> {
        Port::ALL.iter().find_map(|&port| {
            let state = &self.ports[port.index()];
            if addr == port.latch_address() {
                Some(state.pins())
            } else if addr == port.mode_address() {
                Some(state.mode)
            } else {
                None
            }
        })
    }

    /// Write an SFR. Returns false for addresses this bank does not model.
    pub fn write_sfr(&mut self, addr: u8, value: u8) -> bool {
        for port in Port::ALL {
            let state = &mut self.ports[port.index()];
            if addr == port.latch_address() {
                state.latch = value;
                state.latch_writes = state.latch_writes.wrapping_add(1);
                return true;
            }
            if addr == port.mode_address() {
                state.mode = value;
                return true;
            }
        }
        false
    }

    pub fn pin_level(&self, sbit: SbitAddr) -> bool {
        self.ports[sbit.port().index()].pins() & sbit.mask() != 0
    }

    /// Write one latch bit, leaving the rest of the latch as it was.
    pub fn write_latch_bit(&mut self, sbit: SbitAddr, level: bool) {
        let state = &mut self.ports[sbit.port().index()];
        if level {
            state.latch |= sbit.mask();
        } else {
            state.latch &= !sbit.mask();
        }
        state.latch_writes = state.latch_writes.wrapping_add(1);
    }

    pub fn latch_bit(&self, sbit: SbitAddr) -> bool {
        self.ports[sbit.port().index()].latch & sbit.mask() != 0
    }

    /// `PnMDOUT |= mask`: only this pin's mode bit changes.
    pub fn set_push_pull(&mut self, sbit: SbitAddr) {
        self.ports[sbit.port().index()].mode |= sbit.mask();
    }

    pub fn is_push_pull(&self, sbit: SbitAddr) -> bool {
        self.ports[sbit.port().index()].mode & sbit.mask() != 0
    }

    pub fn mode_register(&self, port: Port) -> u8 {
        self.ports[port.index()].mode
    }

    /// Attach an external driver holding the pin at `level`.
    pub fn drive_external(&mut self, sbit: SbitAddr, level: bool) {
        let state = &mut self.ports[sbit.port().index()];
        state.driven |= sbit.mask();
        if level {
            state.external |= sbit.mask();
        } else {
            state.external &= !sbit.mask();
        }
    }

    /// Detach the external driver; the pin floats.
    pub fn release_external(&mut self, sbit: SbitAddr) {
        let state = &mut self.ports[sbit.port().index()];
        state.driven &= !sbit.mask();
        state.external &= !sbit.mask();
    }

    /// Number of latch writes to `port` since reset, wrapping.
    pub fn latch_writes(&self, port: Port) -> u32 {
        self.ports[port.index()].latch_writes
    }
}
