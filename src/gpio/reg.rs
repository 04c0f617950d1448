use super::dynpins::{DynInput, DynOutput, DynPinId, DynPinMode, PinState};
use crate::pac::{port, PORT};

//==================================================================================================
//  ModeFields
//==================================================================================================

/// Collect all fields needed to set the [`DynPinMode`]
#[derive(Debug, Default, PartialEq)]
struct ModeFields {
    dir: bool,
    inen: bool,
    pullen: bool,
    /// true for pullup, false for pulldown. Only relevant if `pullen` is set
    pull_dir: bool,
}

impl From<DynPinMode> for ModeFields {
    #[inline]
    fn from(mode: DynPinMode) -> Self {
        let mut fields = Self::default();
        match mode {
            DynPinMode::Input(config) => {
                fields.dir = false;
                fields.inen = true;
                match config {
                    DynInput::Floating => (),
                    DynInput::PullUp => {
                        fields.pullen = true;
                        fields.pull_dir = true;
                    }
                    DynInput::PullDown => {
                        fields.pullen = true;
                    }
                }
            }
            DynPinMode::Output(config) => {
                fields.dir = true;
                fields.inen = config == DynOutput::ReadablePushPull;
            }
        }
        fields
    }
}

//==================================================================================================
//  Register Interface
//==================================================================================================

/// Registers of a single PORT group, built from the PAC register types
///
/// The PAC spells out both groups of the PORT peripheral as separate fields
/// (`dir0`, `dir1`, ...). The groups are identical, so this struct mirrors the
/// 0x80 byte layout of one group to allow addressing a group by index.
#[repr(C)]
#[allow(dead_code)]
pub(super) struct PortGroup {
    dir: port::DIR,
    dirclr: port::DIRCLR,
    dirset: port::DIRSET,
    dirtgl: port::DIRTGL,
    out: port::OUT,
    outclr: port::OUTCLR,
    outset: port::OUTSET,
    outtgl: port::OUTTGL,
    in_: port::IN,
    ctrl: port::CTRL,
    wrconfig: port::WRCONFIG,
    _reserved0: [u8; 4],
    pmux: [port::PMUX0_; 16],
    pincfg: [port::PINCFG0_; 32],
    _reserved1: [u8; 32],
}

/// Both groups of the PORT peripheral, starting at the PAC base address
#[repr(C)]
pub(super) struct PortBlock {
    group: [PortGroup; 2],
}

impl PortGroup {
    /// Apply a pin mode, equivalent to the vendor `port_pin_set_config` with
    /// power saving disabled. The pin is released from the peripheral
    /// multiplexer.
    fn change_mode(&self, num: u8, mode: DynPinMode) {
        let ModeFields {
            dir,
            inen,
            pullen,
            pull_dir,
        } = mode.into();
        let mask = 1 << num;
        // Turn the driver off first so the pad never drives while reconfiguring
        // Safety: DIRCLR, DIRSET, OUTSET and OUTCLR are "mask" registers, and we
        // only write the bit for this pin
        unsafe {
            if !dir {
                self.dirclr.write(|w| w.bits(mask));
            }
            // OUT selects the pull direction while the pin is an input
            if pullen {
                if pull_dir {
                    self.outset.write(|w| w.bits(mask));
                } else {
                    self.outclr.write(|w| w.bits(mask));
                }
            }
        }
        self.pincfg[num as usize]
            .modify(|_, w| w.pmuxen().clear_bit().inen().bit(inen).pullen().bit(pullen));
        if dir {
            unsafe { self.dirset.write(|w| w.bits(mask)) };
        }
    }

    /// Write the logic level of an output pin
    #[inline]
    fn write_pin(&self, num: u8, level: PinState) {
        let mask = 1 << num;
        // Safety: OUTSET and OUTCLR are "mask" registers, and we only write
        // the bit for this pin
        unsafe {
            match level {
                PinState::High => self.outset.write(|w| w.bits(mask)),
                PinState::Low => self.outclr.write(|w| w.bits(mask)),
            }
        }
    }

    /// Read the pad level. Requires the input buffer of the pin to be enabled.
    #[inline]
    fn read_pin(&self, num: u8) -> PinState {
        (((self.in_.read().bits() >> num) & 0x01) == 1).into()
    }

    /// Read the driven output level
    #[inline]
    fn read_out(&self, num: u8) -> PinState {
        (((self.out.read().bits() >> num) & 0x01) == 1).into()
    }
}

//==================================================================================================
//  PortDriver
//==================================================================================================

/// Low-level port driver used by [`Gpio`](super::Gpio)
///
/// Implementers receive pin IDs which already passed the validity check, so
/// they only have to translate the request into register accesses. The trait
/// allows swapping the hardware [`Port`] for another driver, for example a
/// simulated port in tests.
pub trait PortDriver {
    /// Configure the direction and pull of a pin
    fn configure(&mut self, id: DynPinId, mode: DynPinMode);

    /// Drive the output latch of a pin
    fn set_output_level(&mut self, id: DynPinId, level: PinState);

    /// Read the level present at the pin
    fn input_level(&self, id: DynPinId) -> PinState;

    /// Read back the output latch of a pin
    fn output_level(&self, id: DynPinId) -> PinState;
}

/// Hardware [`PortDriver`] for the SAMD21 PORT peripheral
///
/// [`PORT`], like every PAC `struct`, is a singleton. Taking ownership of it
/// guarantees that this driver is the only one accessing the port registers.
pub struct Port {
    port: PORT,
}

impl Port {
    /// Take ownership of the PORT peripheral. The PORT bus clock is enabled
    /// after reset, so no clock setup is required.
    #[inline]
    pub fn new(port: PORT) -> Self {
        Port { port }
    }

    /// Consumes the driver and returns the PAC peripheral
    #[inline]
    pub fn free(self) -> PORT {
        self.port
    }

    #[inline]
    fn block(&self) -> &PortBlock {
        // Safety: `Port` owns the PORT singleton and `PortBlock` mirrors the
        // PAC register block at its base address
        unsafe { &*(PORT::ptr() as *const PortBlock) }
    }

    #[inline]
    fn group(&self, id: DynPinId) -> &PortGroup {
        &self.block().group[id.group.index()]
    }
}

impl PortDriver for Port {
    #[inline]
    fn configure(&mut self, id: DynPinId, mode: DynPinMode) {
        self.group(id).change_mode(id.num, mode);
    }

    #[inline]
    fn set_output_level(&mut self, id: DynPinId, level: PinState) {
        self.group(id).write_pin(id.num, level);
    }

    #[inline]
    fn input_level(&self, id: DynPinId) -> PinState {
        self.group(id).read_pin(id.num)
    }

    #[inline]
    fn output_level(&self, id: DynPinId) -> PinState {
        self.group(id).read_out(id.num)
    }
}
