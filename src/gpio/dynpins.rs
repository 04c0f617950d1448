//! # Value-level pin numbers, pin modes and errors
//!
//! The rest of the HAL addresses pins by a single logical number. Port A pins
//! occupy the numbers 0 to 31 and port B pins the numbers 32 to 63, so
//!
//! ```text
//! port   = pin / 32
//! offset = pin % 32
//! ```
//!
//! Only a subset of the pin indices is bonded out on the package. The
//! [`VALID_PINS`] table holds one 32 bit mask per port where bit `n` is set when
//! pin `n` may be used. A [`DynPinId`] can only be created through this check,
//! so any [`DynPinId`] handed to a [`PortDriver`](super::PortDriver) is known to
//! address a real pin.
//!
//! ```
//! use autonomo_hal::gpio::{DynGroup, DynPinId, PinError};
//!
//! let pb8 = DynPinId::from_pin_num(40).unwrap();
//! assert_eq!(pb8.group, DynGroup::B);
//! assert_eq!(pb8.num, 8);
//! // PA26 is not bonded out
//! assert_eq!(DynPinId::from_pin_num(26), Err(PinError::InvalidPin));
//! ```

use core::fmt;

//==================================================================================================
//  Errors and Definitions
//==================================================================================================

/// Index of the last port on the device
pub const GPIO_MAX_PORT: u8 = 1;

/// Number of logical pin numbers covered by all ports
pub const NUM_PINS: usize = (GPIO_MAX_PORT as usize + 1) * 32;

/// Pins available on each port. Bit `n` of entry `p` is set if pin `n` of port
/// `p` is usable.
pub const VALID_PINS: [u32; GPIO_MAX_PORT as usize + 1] = [0xdbff_ffff, 0xc000_0f0c];

/// Logic level of a pin, driven or read back
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum PinState {
    Low = 0,
    High = 1,
}

impl From<bool> for PinState {
    #[inline]
    fn from(high: bool) -> Self {
        if high {
            PinState::High
        } else {
            PinState::Low
        }
    }
}

impl From<PinState> for bool {
    #[inline]
    fn from(state: PinState) -> Self {
        state == PinState::High
    }
}

impl core::ops::Not for PinState {
    type Output = PinState;

    #[inline]
    fn not(self) -> Self::Output {
        match self {
            PinState::Low => PinState::High,
            PinState::High => PinState::Low,
        }
    }
}

/// GPIO error type
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum PinError {
    /// The pin number lies beyond the last port
    InvalidPort,
    /// The pin number addresses a pin which is not bonded out
    InvalidPin,
    /// The pin did not have the correct mode for the requested operation.
    /// [`DynPin`](super::DynPin)s are not verified at compile-time, so run-time
    /// operations are fallible.
    InvalidPinType,
}

impl fmt::Display for PinError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PinError::InvalidPort => write!(f, "pin number exceeds the last port"),
            PinError::InvalidPin => write!(f, "pin is not available on this device"),
            PinError::InvalidPinType => write!(f, "pin is not configured for this operation"),
        }
    }
}

//==================================================================================================
//  DynPinMode configurations
//==================================================================================================

/// Value-level `enum` for input configurations
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum DynInput {
    Floating,
    PullDown,
    PullUp,
}

/// Value-level `enum` for output configurations
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum DynOutput {
    PushPull,
    /// Push-pull output with the input buffer enabled so the pad level can be
    /// read back
    ReadablePushPull,
}

//==================================================================================================
//  DynPinMode
//==================================================================================================

/// Value-level `enum` representing pin modes
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum DynPinMode {
    Input(DynInput),
    Output(DynOutput),
}

impl DynPinMode {
    /// Whether the input buffer of the pin is enabled in this mode
    #[inline]
    pub fn is_readable(self) -> bool {
        !matches!(self, DYN_PUSH_PULL_OUTPUT)
    }

    /// Whether the pin drives its pad in this mode
    #[inline]
    pub fn is_output(self) -> bool {
        matches!(self, DynPinMode::Output(_))
    }
}

/// Value-level variant of [`DynPinMode`] for floating input mode
pub const DYN_FLOATING_INPUT: DynPinMode = DynPinMode::Input(DynInput::Floating);
/// Value-level variant of [`DynPinMode`] for pull-down input mode
pub const DYN_PULL_DOWN_INPUT: DynPinMode = DynPinMode::Input(DynInput::PullDown);
/// Value-level variant of [`DynPinMode`] for pull-up input mode
pub const DYN_PULL_UP_INPUT: DynPinMode = DynPinMode::Input(DynInput::PullUp);

/// Value-level variant of [`DynPinMode`] for push-pull output mode
pub const DYN_PUSH_PULL_OUTPUT: DynPinMode = DynPinMode::Output(DynOutput::PushPull);
/// Value-level variant of [`DynPinMode`] for readable push-pull output mode
pub const DYN_RD_PUSH_PULL_OUTPUT: DynPinMode = DynPinMode::Output(DynOutput::ReadablePushPull);

//==================================================================================================
//  DynGroup & DynPinId
//==================================================================================================

/// Value-level `enum` for pin groups
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum DynGroup {
    A = 0,
    B = 1,
}

impl DynGroup {
    /// Port index, used to address the register group
    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Pin mask of the usable pins on this port
    #[inline]
    pub const fn valid_pins(self) -> u32 {
        VALID_PINS[self as usize]
    }
}

/// Value-level `struct` representing pin IDs. Can only be created for valid
/// pins.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub struct DynPinId {
    pub group: DynGroup,
    pub num: u8,
}

impl DynPinId {
    /// Split a logical pin number into port and pin index and check that the
    /// pin is present on the device.
    pub const fn from_pin_num(pin: u8) -> Result<Self, PinError> {
        let group = match pin / 32 {
            0 => DynGroup::A,
            1 => DynGroup::B,
            _ => return Err(PinError::InvalidPort),
        };
        let num = pin % 32;
        if ((1 << num) & group.valid_pins()) == 0 {
            return Err(PinError::InvalidPin);
        }
        Ok(DynPinId { group, num })
    }

    /// Logical pin number of this ID
    #[inline]
    pub const fn pin_num(self) -> u8 {
        self.group as u8 * 32 + self.num
    }

    /// Bit of this pin in the 32 bit registers of its port
    #[inline]
    pub const fn mask_32(self) -> u32 {
        1 << self.num
    }
}

impl TryFrom<u8> for DynPinId {
    type Error = PinError;

    #[inline]
    fn try_from(pin: u8) -> Result<Self, Self::Error> {
        DynPinId::from_pin_num(pin)
    }
}

impl From<DynPinId> for u8 {
    #[inline]
    fn from(id: DynPinId) -> Self {
        id.pin_num()
    }
}

/// Check whether a logical pin number addresses a usable pin
#[inline]
pub const fn is_valid_pin(pin: u8) -> bool {
    DynPinId::from_pin_num(pin).is_ok()
}
