//! # GPIO module
//!
//! Pins are addressed by a logical pin number. Port A covers the numbers 0 to
//! 31 and port B the numbers 32 to 63. The [`dynpins`] submodule holds the
//! encoding together with the table of pins which are bonded out, [`hal`]
//! provides the [`Gpio`] API built on top of a [`PortDriver`], and the
//! [`Port`] driver accesses the SAMD21 PORT registers.
//!
//! ```ignore
//! let dp = pac::Peripherals::take().unwrap();
//! let mut gpio = Gpio::new(Port::new(dp.PORT));
//! gpio.init_in(40, DynInput::PullUp)?;
//! let mut led = gpio.pin(17)?;
//! led.into_push_pull_output();
//! led.set_high()?;
//! ```
//!
//! ## Examples
//!
//! - Blinky example in `demos/blinky.rs`
pub mod dynpins;
pub use dynpins::*;

pub mod hal;
pub use hal::*;

mod reg;
pub use reg::{Port, PortDriver};
