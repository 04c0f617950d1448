//! # Pin-number based GPIO API
//!
//! [`Gpio`] owns a [`PortDriver`] and exposes the classic HAL calls which take
//! a logical pin number: initialise as output or input, set, clear, write,
//! read and toggle. Every call validates the pin number first and returns
//! [`PinError`] instead of touching the registers of a pin which does not
//! exist.
//!
//! ```ignore
//! let dp = pac::Peripherals::take().unwrap();
//! let mut gpio = Gpio::new(Port::new(dp.PORT));
//! gpio.init_out(17, PinState::Low)?;
//! gpio.toggle(17)?;
//! ```
//!
//! For code written against the embedded HAL traits, [`Gpio::pin`] hands out a
//! [`DynPin`] which borrows the [`Gpio`] and implements [`InputPin`],
//! [`OutputPin`], [`StatefulOutputPin`] and [`ToggleableOutputPin`].

use super::dynpins::*;
use super::reg::PortDriver;
use embedded_hal::digital::v2::{InputPin, OutputPin, StatefulOutputPin, ToggleableOutputPin};

//==================================================================================================
//  Gpio
//==================================================================================================

pub struct Gpio<D: PortDriver> {
    driver: D,
    modes: [Option<DynPinMode>; NUM_PINS],
}

impl<D: PortDriver> Gpio<D> {
    /// Create the GPIO API on top of a port driver. All pins are considered
    /// unconfigured.
    pub fn new(driver: D) -> Self {
        Gpio {
            driver,
            modes: [None; NUM_PINS],
        }
    }

    /// Consumes the GPIO API and returns the port driver
    pub fn free(self) -> D {
        self.driver
    }

    /// Mode of the pin as last configured through this API
    pub fn mode(&self, pin: u8) -> Option<DynPinMode> {
        self.modes.get(pin as usize).copied().flatten()
    }

    /// Configure a pin as output with readback and drive it to `level`
    pub fn init_out(&mut self, pin: u8, level: PinState) -> Result<(), PinError> {
        let id = Self::checked_id(pin)?;
        self.configure(id, DYN_RD_PUSH_PULL_OUTPUT);
        self.driver.set_output_level(id, level);
        Ok(())
    }

    /// Configure a pin as input with the given pull configuration
    pub fn init_in(&mut self, pin: u8, pull: DynInput) -> Result<(), PinError> {
        let id = Self::checked_id(pin)?;
        self.configure(id, DynPinMode::Input(pull));
        Ok(())
    }

    /// Sets the specified pin to 1 (high)
    #[inline]
    pub fn set(&mut self, pin: u8) -> Result<(), PinError> {
        self.write(pin, PinState::High)
    }

    /// Sets the specified pin to 0 (low)
    #[inline]
    pub fn clear(&mut self, pin: u8) -> Result<(), PinError> {
        self.write(pin, PinState::Low)
    }

    /// Write a level to the specified pin
    pub fn write(&mut self, pin: u8, level: PinState) -> Result<(), PinError> {
        let id = DynPinId::from_pin_num(pin)?;
        self.driver.set_output_level(id, level);
        Ok(())
    }

    /// Read the level present at the specified pin
    pub fn read(&self, pin: u8) -> Result<PinState, PinError> {
        let id = DynPinId::from_pin_num(pin)?;
        Ok(self.driver.input_level(id))
    }

    /// Invert the level of the specified pin based on the level read at the
    /// pin and return the level read back afterwards
    ///
    /// The pin needs a mode with the input buffer enabled, i.e. an input or a
    /// readable push-pull output. Otherwise the pad always reads low and the
    /// pin is driven high on every call.
    pub fn toggle(&mut self, pin: u8) -> Result<PinState, PinError> {
        let id = DynPinId::from_pin_num(pin)?;
        let current = self.driver.input_level(id);
        self.driver.set_output_level(id, !current);
        Ok(self.driver.input_level(id))
    }

    /// Borrow a single pin as a value-level [`DynPin`]
    pub fn pin(&mut self, pin: u8) -> Result<DynPin<'_, D>, PinError> {
        let id = DynPinId::from_pin_num(pin)?;
        Ok(DynPin { gpio: self, id })
    }

    fn checked_id(pin: u8) -> Result<DynPinId, PinError> {
        DynPinId::from_pin_num(pin).map_err(|e| {
            log::warn!("gpio: rejected pin {}: {}", pin, e);
            e
        })
    }

    // Registers are written on every call. The pull direction of an input is
    // held in the output latch, which `write` may have moved.
    fn configure(&mut self, id: DynPinId, mode: DynPinMode) {
        log::debug!("gpio: P{:?}{} -> {:?}", id.group, id.num, mode);
        self.driver.configure(id, mode);
        self.modes[id.pin_num() as usize] = Some(mode);
    }
}

//==================================================================================================
//  DynPin
//==================================================================================================

/// A value-level pin borrowed from a [`Gpio`]
///
/// Because the pin mode is only known at run-time, operations which do not fit
/// the configured mode return [`PinError::InvalidPinType`]. An unconfigured pin
/// can neither be read nor written.
pub struct DynPin<'a, D: PortDriver> {
    gpio: &'a mut Gpio<D>,
    id: DynPinId,
}

impl<D: PortDriver> DynPin<'_, D> {
    /// Return a copy of the pin ID
    #[inline]
    pub fn id(&self) -> DynPinId {
        self.id
    }

    /// Return the configured pin mode
    #[inline]
    pub fn mode(&self) -> Option<DynPinMode> {
        self.gpio.modes[self.id.pin_num() as usize]
    }

    /// Convert the pin to the requested [`DynPinMode`]
    #[inline]
    pub fn into_mode(&mut self, mode: DynPinMode) {
        self.gpio.configure(self.id, mode);
    }

    /// Configure the pin to operate as a floating input
    #[inline]
    pub fn into_floating_input(&mut self) {
        self.into_mode(DYN_FLOATING_INPUT);
    }

    /// Configure the pin to operate as a pulled down input
    #[inline]
    pub fn into_pull_down_input(&mut self) {
        self.into_mode(DYN_PULL_DOWN_INPUT);
    }

    /// Configure the pin to operate as a pulled up input
    #[inline]
    pub fn into_pull_up_input(&mut self) {
        self.into_mode(DYN_PULL_UP_INPUT);
    }

    /// Configure the pin to operate as a push-pull output
    #[inline]
    pub fn into_push_pull_output(&mut self) {
        self.into_mode(DYN_PUSH_PULL_OUTPUT);
    }

    /// Configure the pin to operate as a push-pull output whose level can be
    /// read back
    #[inline]
    pub fn into_readable_push_pull_output(&mut self) {
        self.into_mode(DYN_RD_PUSH_PULL_OUTPUT);
    }

    #[inline]
    fn _read(&self) -> Result<bool, PinError> {
        match self.mode() {
            Some(mode) if mode.is_readable() => Ok(self.gpio.driver.input_level(self.id).into()),
            _ => Err(PinError::InvalidPinType),
        }
    }

    #[inline]
    fn _write(&mut self, level: PinState) -> Result<(), PinError> {
        match self.mode() {
            Some(DynPinMode::Output(_)) => {
                self.gpio.driver.set_output_level(self.id, level);
                Ok(())
            }
            _ => Err(PinError::InvalidPinType),
        }
    }

    #[inline]
    fn _out_level(&self) -> Result<PinState, PinError> {
        match self.mode() {
            Some(DynPinMode::Output(_)) => Ok(self.gpio.driver.output_level(self.id)),
            _ => Err(PinError::InvalidPinType),
        }
    }
}

//==================================================================================================
// Embedded HAL traits
//==================================================================================================

impl<D: PortDriver> OutputPin for DynPin<'_, D> {
    type Error = PinError;
    #[inline]
    fn set_high(&mut self) -> Result<(), Self::Error> {
        self._write(PinState::High)
    }
    #[inline]
    fn set_low(&mut self) -> Result<(), Self::Error> {
        self._write(PinState::Low)
    }
}

impl<D: PortDriver> StatefulOutputPin for DynPin<'_, D> {
    #[inline]
    fn is_set_high(&self) -> Result<bool, Self::Error> {
        self._out_level().map(bool::from)
    }
    #[inline]
    fn is_set_low(&self) -> Result<bool, Self::Error> {
        self._out_level().map(|v| v == PinState::Low)
    }
}

impl<D: PortDriver> ToggleableOutputPin for DynPin<'_, D> {
    type Error = PinError;
    /// Inverts the output latch, independent of the level at the pad
    #[inline]
    fn toggle(&mut self) -> Result<(), Self::Error> {
        let level = self._out_level()?;
        self._write(!level)
    }
}

impl<D: PortDriver> InputPin for DynPin<'_, D> {
    type Error = PinError;
    #[inline]
    fn is_high(&self) -> Result<bool, Self::Error> {
        self._read()
    }
    #[inline]
    fn is_low(&self) -> Result<bool, Self::Error> {
        self._read().map(|v| !v)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Simulated port. Pads of output pins follow the output latch and
    /// floating inputs an externally forced level. As on the SAMD21, the pull
    /// direction of an input is taken from the output latch, which is set or
    /// cleared when the pull is configured.
    #[derive(Default)]
    struct MockPort {
        out: [u32; 2],
        external: [u32; 2],
        modes: Vec<(DynPinId, DynPinMode)>,
        writes: Vec<(DynPinId, PinState)>,
    }

    impl MockPort {
        fn mode_of(&self, id: DynPinId) -> Option<DynPinMode> {
            self.modes
                .iter()
                .rev()
                .find(|(pin, _)| *pin == id)
                .map(|(_, mode)| *mode)
        }
    }

    impl PortDriver for MockPort {
        fn configure(&mut self, id: DynPinId, mode: DynPinMode) {
            self.modes.push((id, mode));
            let port = &mut self.out[id.group.index()];
            match mode {
                DYN_PULL_UP_INPUT => *port |= id.mask_32(),
                DYN_PULL_DOWN_INPUT => *port &= !id.mask_32(),
                _ => (),
            }
        }

        fn set_output_level(&mut self, id: DynPinId, level: PinState) {
            self.writes.push((id, level));
            let port = &mut self.out[id.group.index()];
            match level {
                PinState::High => *port |= id.mask_32(),
                PinState::Low => *port &= !id.mask_32(),
            }
        }

        fn input_level(&self, id: DynPinId) -> PinState {
            let port = id.group.index();
            match self.mode_of(id) {
                Some(DYN_PULL_UP_INPUT | DYN_PULL_DOWN_INPUT | DynPinMode::Output(_)) => {
                    ((self.out[port] & id.mask_32()) != 0).into()
                }
                _ => ((self.external[port] & id.mask_32()) != 0).into(),
            }
        }

        fn output_level(&self, id: DynPinId) -> PinState {
            ((self.out[id.group.index()] & id.mask_32()) != 0).into()
        }
    }

    fn id(pin: u8) -> DynPinId {
        DynPinId::from_pin_num(pin).unwrap()
    }

    #[test]
    fn init_out_configures_then_drives() {
        let mut gpio = Gpio::new(MockPort::default());
        gpio.init_out(17, PinState::High).unwrap();
        assert_eq!(gpio.mode(17), Some(DYN_RD_PUSH_PULL_OUTPUT));
        assert_eq!(gpio.read(17), Ok(PinState::High));
        let port = gpio.free();
        assert_eq!(port.modes, [(id(17), DYN_RD_PUSH_PULL_OUTPUT)]);
        assert_eq!(port.writes, [(id(17), PinState::High)]);
    }

    #[test]
    fn init_rejects_unusable_pins() {
        let mut gpio = Gpio::new(MockPort::default());
        assert_eq!(gpio.init_out(26, PinState::Low), Err(PinError::InvalidPin));
        assert_eq!(gpio.init_in(33, DynInput::PullUp), Err(PinError::InvalidPin));
        assert_eq!(gpio.init_in(64, DynInput::Floating), Err(PinError::InvalidPort));
        assert_eq!(gpio.mode(26), None);
        let port = gpio.free();
        assert!(port.modes.is_empty());
        assert!(port.writes.is_empty());
    }

    #[test]
    fn init_accepts_offset_zero_and_high_port_b() {
        let mut gpio = Gpio::new(MockPort::default());
        assert!(gpio.init_out(0, PinState::Low).is_ok());
        assert!(gpio.init_in(63, DynInput::Floating).is_ok());
    }

    #[test]
    fn init_in_pulls() {
        let mut gpio = Gpio::new(MockPort::default());
        gpio.init_in(40, DynInput::PullDown).unwrap();
        gpio.init_in(41, DynInput::PullUp).unwrap();
        gpio.init_in(34, DynInput::Floating).unwrap();
        assert_eq!(gpio.mode(40), Some(DYN_PULL_DOWN_INPUT));
        assert_eq!(gpio.mode(41), Some(DYN_PULL_UP_INPUT));
        assert_eq!(gpio.mode(34), Some(DYN_FLOATING_INPUT));
    }

    #[test]
    fn reinit_restores_pull_after_clear() {
        let mut gpio = Gpio::new(MockPort::default());
        gpio.init_in(5, DynInput::PullUp).unwrap();
        assert_eq!(gpio.read(5), Ok(PinState::High));
        // Clearing the latch of a pulled input turns the pull-up into a
        // pull-down
        gpio.clear(5).unwrap();
        assert_eq!(gpio.read(5), Ok(PinState::Low));
        gpio.init_in(5, DynInput::PullUp).unwrap();
        assert_eq!(gpio.read(5), Ok(PinState::High));
        let port = gpio.free();
        assert_eq!(port.modes, [(id(5), DYN_PULL_UP_INPUT), (id(5), DYN_PULL_UP_INPUT)]);
    }

    #[test]
    fn dyn_pin_reapplies_current_mode() {
        let mut gpio = Gpio::new(MockPort::default());
        gpio.init_in(41, DynInput::PullDown).unwrap();
        gpio.set(41).unwrap();
        assert_eq!(gpio.read(41), Ok(PinState::High));
        let mut pin = gpio.pin(41).unwrap();
        pin.into_pull_down_input();
        assert_eq!(pin.is_low(), Ok(true));
        assert_eq!(gpio.free().modes.len(), 2);
    }

    #[test]
    fn set_clear_write() {
        let mut gpio = Gpio::new(MockPort::default());
        gpio.init_out(8, PinState::Low).unwrap();
        gpio.set(8).unwrap();
        assert_eq!(gpio.read(8), Ok(PinState::High));
        gpio.clear(8).unwrap();
        assert_eq!(gpio.read(8), Ok(PinState::Low));
        gpio.write(8, PinState::High).unwrap();
        assert_eq!(gpio.read(8), Ok(PinState::High));
    }

    #[test]
    fn access_to_invalid_pins_fails() {
        let mut gpio = Gpio::new(MockPort::default());
        assert_eq!(gpio.set(29), Err(PinError::InvalidPin));
        assert_eq!(gpio.clear(100), Err(PinError::InvalidPort));
        assert_eq!(gpio.read(36), Err(PinError::InvalidPin));
        assert_eq!(gpio.toggle(26), Err(PinError::InvalidPin));
        assert!(gpio.pin(26).is_err());
        assert!(gpio.free().writes.is_empty());
    }

    #[test]
    fn toggle_returns_new_level() {
        let mut gpio = Gpio::new(MockPort::default());
        gpio.init_out(17, PinState::Low).unwrap();
        assert_eq!(gpio.toggle(17), Ok(PinState::High));
        assert_eq!(gpio.toggle(17), Ok(PinState::Low));
    }

    #[test]
    fn toggle_follows_pad_level() {
        let mut port = MockPort::default();
        port.external[0] = 1 << 3;
        let mut gpio = Gpio::new(port);
        gpio.init_in(3, DynInput::Floating).unwrap();
        // The pad is held high from outside, so the latch is cleared and the
        // pad still reads high
        assert_eq!(gpio.toggle(3), Ok(PinState::High));
        let port = gpio.free();
        assert_eq!(port.writes, [(id(3), PinState::Low)]);
    }

    #[test]
    fn dyn_pin_checks_mode() {
        let mut gpio = Gpio::new(MockPort::default());
        let mut pin = gpio.pin(17).unwrap();
        assert_eq!(pin.mode(), None);
        assert_eq!(pin.set_high(), Err(PinError::InvalidPinType));
        assert_eq!(pin.is_high(), Err(PinError::InvalidPinType));

        pin.into_push_pull_output();
        assert!(pin.set_high().is_ok());
        assert_eq!(pin.is_set_high(), Ok(true));
        // The input buffer is off in plain push-pull mode
        assert_eq!(pin.is_high(), Err(PinError::InvalidPinType));

        pin.into_readable_push_pull_output();
        assert_eq!(pin.is_high(), Ok(true));
        pin.toggle().unwrap();
        assert_eq!(pin.is_low(), Ok(true));
        assert_eq!(pin.is_set_low(), Ok(true));
    }

    #[test]
    fn dyn_pin_input_rejects_writes() {
        let mut gpio = Gpio::new(MockPort::default());
        let mut pin = gpio.pin(40).unwrap();
        assert_eq!(pin.id(), id(40));
        pin.into_pull_up_input();
        assert_eq!(pin.set_low(), Err(PinError::InvalidPinType));
        assert_eq!(pin.toggle(), Err(PinError::InvalidPinType));
        assert_eq!(pin.is_set_high(), Err(PinError::InvalidPinType));
        assert_eq!(pin.is_high(), Ok(true));
        assert_eq!(gpio.mode(40), Some(DYN_PULL_UP_INPUT));
    }

    #[test]
    fn dyn_pin_shares_mode_with_gpio() {
        let mut gpio = Gpio::new(MockPort::default());
        gpio.init_in(2, DynInput::PullDown).unwrap();
        let mut pin = gpio.pin(2).unwrap();
        assert_eq!(pin.mode(), Some(DYN_PULL_DOWN_INPUT));
        pin.into_floating_input();
        pin.into_pull_down_input();
        assert_eq!(gpio.free().modes.len(), 3);
    }
}
