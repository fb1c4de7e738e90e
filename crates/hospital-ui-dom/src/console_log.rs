//! `log` records to the browser console.

use log::{Level, LevelFilter, Log, Metadata, Record};

struct ConsoleLogger;

static LOGGER: ConsoleLogger = ConsoleLogger;

impl Log for ConsoleLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        match record.level() {
            Level::Error | Level::Warn => {
                zoon::eprintln!("[{}] {}: {}", record.level(), record.target(), record.args())
            }
            _ => zoon::println!("[{}] {}: {}", record.level(), record.target(), record.args()),
        }
    }

    fn flush(&self) {}
}

/// Install the console logger. Calling it again only changes the level.
pub fn init(level: LevelFilter) {
    // Fails only when a logger is already installed; keep that one.
    let _ = log::set_logger(&LOGGER);
    log::set_max_level(level);
}
