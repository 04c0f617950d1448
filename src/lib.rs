//! GPIO HAL for the Microchip SAMD21 and board support for the SODAQ Autonomo
//!
//! Enable the `rt` feature when building applications so the PAC provides the
//! interrupt vector table. The [`bsp`] module is available with the
//! `sodaq-autonomo` feature, which is enabled by default.
#![cfg_attr(not(test), no_std)]

pub use atsamd21j;
pub use atsamd21j as pac;

#[cfg(feature = "sodaq-autonomo")]
pub mod bsp;
pub mod gpio;
pub mod prelude;
