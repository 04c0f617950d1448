//! GPIO test image for the SODAQ Autonomo
//!
//! Runs on the target and reports over RTT. Tie D2 to D3 for the loopback
//! cases.
#![no_main]
#![no_std]

#[path = "common/rtt_log.rs"]
mod rtt_log;

use autonomo_hal::{
    bsp,
    gpio::{DynInput, Gpio, PinError, PinState, Port},
    pac,
    prelude::*,
};
use cortex_m_rt::entry;
use panic_rtt_target as _;
use rtt_target::{rprintln, rtt_init_print};

#[allow(dead_code)]
#[derive(Debug)]
enum TestCase {
    // Tie D2 to D3 for these tests!
    TestBasic,
    TestPullup,
    TestPulldown,
    TestToggle,
    TestDynPin,
    // No wiring required
    InvalidPins,
}

#[entry]
fn main() -> ! {
    rtt_init_print!();
    rtt_log::init(log::LevelFilter::Debug);
    rprintln!("-- SODAQ Autonomo GPIO Test Application --");
    let dp = pac::Peripherals::take().unwrap();
    let mut gpio = Gpio::new(Port::new(dp.PORT));
    gpio.init_out(bsp::LED_BLINK_PIN, PinState::Low).unwrap();
    let test_case = TestCase::TestBasic;

    match test_case {
        TestCase::InvalidPins => {
            rprintln!("Test case {:?}", test_case);
        }
        _ => {
            rprintln!("Test case {:?}. Make sure to tie D2 to D3", test_case);
        }
    }
    match test_case {
        TestCase::TestBasic => {
            gpio.init_out(bsp::D2, PinState::Low).unwrap();
            gpio.init_in(bsp::D3, DynInput::Floating).unwrap();
            gpio.set(bsp::D2).unwrap();
            assert_eq!(gpio.read(bsp::D3), Ok(PinState::High));
            gpio.clear(bsp::D2).unwrap();
            assert_eq!(gpio.read(bsp::D3), Ok(PinState::Low));
        }
        TestCase::TestPullup => {
            gpio.init_in(bsp::D3, DynInput::PullUp).unwrap();
            gpio.init_in(bsp::D2, DynInput::Floating).unwrap();
            assert_eq!(gpio.read(bsp::D3), Ok(PinState::High));
            gpio.init_out(bsp::D2, PinState::Low).unwrap();
            assert_eq!(gpio.read(bsp::D3), Ok(PinState::Low));
            gpio.init_in(bsp::D2, DynInput::Floating).unwrap();
            assert_eq!(gpio.read(bsp::D3), Ok(PinState::High));
        }
        TestCase::TestPulldown => {
            gpio.init_in(bsp::D3, DynInput::PullDown).unwrap();
            gpio.init_in(bsp::D2, DynInput::Floating).unwrap();
            assert_eq!(gpio.read(bsp::D3), Ok(PinState::Low));
            gpio.init_out(bsp::D2, PinState::High).unwrap();
            assert_eq!(gpio.read(bsp::D3), Ok(PinState::High));
            gpio.init_in(bsp::D2, DynInput::Floating).unwrap();
            assert_eq!(gpio.read(bsp::D3), Ok(PinState::Low));
        }
        TestCase::TestToggle => {
            gpio.init_out(bsp::D2, PinState::Low).unwrap();
            gpio.init_in(bsp::D3, DynInput::Floating).unwrap();
            assert_eq!(gpio.toggle(bsp::D2), Ok(PinState::High));
            assert_eq!(gpio.read(bsp::D3), Ok(PinState::High));
            assert_eq!(gpio.toggle(bsp::D2), Ok(PinState::Low));
            assert_eq!(gpio.read(bsp::D3), Ok(PinState::Low));
        }
        TestCase::TestDynPin => {
            gpio.init_in(bsp::D3, DynInput::Floating).unwrap();
            let mut out = gpio.pin(bsp::D2).unwrap();
            assert_eq!(out.set_high(), Err(PinError::InvalidPinType));
            out.into_push_pull_output();
            out.set_high().unwrap();
            assert!(out.is_set_high().unwrap());
            assert_eq!(gpio.read(bsp::D3), Ok(PinState::High));
            let mut out = gpio.pin(bsp::D2).unwrap();
            out.toggle().unwrap();
            assert_eq!(gpio.read(bsp::D3), Ok(PinState::Low));
        }
        TestCase::InvalidPins => {
            assert_eq!(gpio.init_out(26, PinState::Low), Err(PinError::InvalidPin));
            assert_eq!(gpio.set(33), Err(PinError::InvalidPin));
            assert_eq!(gpio.read(64), Err(PinError::InvalidPort));
        }
    }

    rprintln!("Test success");
    loop {
        gpio.toggle(bsp::LED_BLINK_PIN).unwrap();
        cortex_m::asm::delay(500_000);
    }
}
