//! Simple blinky example, using the on-board LED of the SODAQ Autonomo
#![no_main]
#![no_std]

#[path = "common/rtt_log.rs"]
mod rtt_log;

use autonomo_hal::{
    bsp,
    gpio::{Gpio, PinState, Port},
    pac,
};
use cortex_m::delay::Delay;
use cortex_m_rt::entry;
use panic_rtt_target as _;
use rtt_target::{rprintln, rtt_init_print};

/// Core clock after reset: OSC8M divided by 8
const RESET_CLOCK_HZ: u32 = 1_000_000;

#[entry]
fn main() -> ! {
    rtt_init_print!();
    rtt_log::init(log::LevelFilter::Debug);
    rprintln!("-- SODAQ Autonomo Blinky --");
    let dp = pac::Peripherals::take().unwrap();
    let cp = cortex_m::Peripherals::take().unwrap();
    let mut delay = Delay::new(cp.SYST, RESET_CLOCK_HZ);
    let mut gpio = Gpio::new(Port::new(dp.PORT));
    gpio.init_out(bsp::LED_BLINK_PIN, PinState::Low).unwrap();
    for _ in 0..10 {
        gpio.set(bsp::LED_BLINK_PIN).unwrap();
        delay.delay_ms(200);
        gpio.clear(bsp::LED_BLINK_PIN).unwrap();
        delay.delay_ms(200);
    }
    loop {
        let level = gpio.toggle(bsp::LED_BLINK_PIN).unwrap();
        rprintln!("LED {:?}", level);
        delay.delay_ms(500);
    }
}
