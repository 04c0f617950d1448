//! `log` backend printing over RTT
use rtt_target::rprintln;

struct RttLogger;

impl log::Log for RttLogger {
    fn enabled(&self, _metadata: &log::Metadata) -> bool {
        true
    }

    fn log(&self, record: &log::Record) {
        rprintln!("{} - {}", record.level(), record.args());
    }

    fn flush(&self) {}
}

static LOGGER: RttLogger = RttLogger;

/// Install the RTT logger. Must be called once, before interrupts are enabled
/// and after `rtt_init_print!`.
pub fn init(level: log::LevelFilter) {
    // Safety: thumbv6m has no atomic CAS, the logger is installed before any
    // other code can log
    unsafe {
        log::set_logger_racy(&LOGGER).ok();
        log::set_max_level_racy(level);
    }
}
