//! # Board support for the SODAQ Autonomo
//!
//! Maps the Arduino style pin names printed on the board to the logical GPIO
//! pin numbers used by [`Gpio`](crate::gpio::Gpio). Port A pins keep their
//! index, port B pins are offset by 32.
//!
//! ```ignore
//! let mut gpio = Gpio::new(Port::new(dp.PORT));
//! gpio.init_out(bsp::LED_BLINK_PIN, PinState::Low)?;
//! ```
use crate::gpio::DynGroup;
use paste::paste;

macro_rules! board_pins {
    (
        $(($Name:ident, $Group:ident, $NUM:literal),)+
    ) => {
        paste!(
            /// System device IDs of the board
            ///
            /// The IDs of single pins are their logical pin numbers. The bus
            /// IDs start at 200 and do not map to a single pin.
            #[derive(Debug, PartialEq, Eq, Clone, Copy)]
            #[repr(u8)]
            pub enum SystemDeviceId {
                $(
                    #[doc = "Board pin " $Name ", wired to P" $Group $NUM]
                    $Name = DynGroup::$Group as u8 * 32 + $NUM,
                )+
                /// SPI on the ICSP header
                SpiIcsp = 200,
                /// Alternate SPI based on SERCOM0 at A3, A4, D8 and D9
                SpiAlt = 201,
                /// I2C port on SCL and SDA
                I2c = 202,
            }

            $(
                #[doc = "Logical pin number of board pin " $Name]
                pub const $Name: u8 = SystemDeviceId::$Name as u8;
            )+

            impl SystemDeviceId {
                /// All IDs which map to a single pin
                pub const PINS: &'static [SystemDeviceId] = &[$(SystemDeviceId::$Name,)+];
            }

            impl TryFrom<u8> for SystemDeviceId {
                type Error = InvalidDeviceId;

                fn try_from(id: u8) -> Result<Self, Self::Error> {
                    match id {
                        $(
                            $Name => Ok(SystemDeviceId::$Name),
                        )+
                        200 => Ok(SystemDeviceId::SpiIcsp),
                        201 => Ok(SystemDeviceId::SpiAlt),
                        202 => Ok(SystemDeviceId::I2c),
                        _ => Err(InvalidDeviceId(id)),
                    }
                }
            }
        );
    };
}

board_pins!(
    (D0, A, 11),
    (D1, A, 10),
    (D2, A, 8),
    (D3, A, 9),
    (D4, A, 14),
    (D5, A, 15),
    (D6, A, 20),
    (D7, A, 21),
    (D8, A, 6),
    (D9, A, 7),
    (D10, A, 18),
    (D11, A, 16),
    (D12, A, 19),
    (D13, A, 17),
    (A0, A, 2),
    (A1, B, 8),
    (A2, B, 9),
    (A3, A, 4),
    (A4, A, 5),
    (A5, B, 2),
);

/// The value does not name a device of this board
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub struct InvalidDeviceId(pub u8);

/// Pins of the alternate SPI, in the order A3, A4, D8, D9
pub const SPI_ALT_PINS: [u8; 4] = [A3, A4, D8, D9];

/// Console UART receive pin
pub const PIN_UART_RX: u8 = D0;
/// Console UART transmit pin
pub const PIN_UART_TX: u8 = D1;

/// Pin of the on-board LED
pub const LED_BLINK_PIN: u8 = D13;
/// UART number used for the console
pub const CONSOLE_UART: u8 = 2;

/// Maximum number of NFFS areas (blocks) in the flash file system space of
/// the board. Together with the flash map this determines how many NFFS
/// blocks there are. If this is smaller than the number of sectors, multiple
/// sectors are combined into one area.
pub const NFFS_AREA_MAX: usize = 8;

impl SystemDeviceId {
    /// Logical pin number, or [`None`] for bus IDs
    pub fn pin(self) -> Option<u8> {
        match self {
            SystemDeviceId::SpiIcsp | SystemDeviceId::SpiAlt | SystemDeviceId::I2c => None,
            pin => Some(pin as u8),
        }
    }

    /// Pins used by a bus ID, if they are known
    pub fn bus_pins(self) -> Option<&'static [u8]> {
        match self {
            SystemDeviceId::SpiAlt => Some(&SPI_ALT_PINS),
            _ => None,
        }
    }
}
