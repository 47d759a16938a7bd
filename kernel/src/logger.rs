//! A minimal `log::Log` implementation that routes every record to the
//! serial byte sink, so a warning (e.g. terminal init falling back to the
//! failsafe buffer) survives even when the display backend itself is the
//! thing that failed.

use log::{Level, LevelFilter, Log, Metadata, Record};

struct SerialLogger;

static LOGGER: SerialLogger = SerialLogger;

impl Log for SerialLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= Level::Debug
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        crate::serial_println!("[{}] {}", record.level(), record.args());
    }

    fn flush(&self) {}
}

/// Install the serial-backed logger as the global `log` sink. Idempotent:
/// safe to call more than once (later calls are no-ops per `log`'s own
/// `set_logger` contract).
pub fn init() {
    let _ = log::set_logger(&LOGGER).map(|()| log::set_max_level(LevelFilter::Debug));
}
