use core::str::FromStr;

use log::{Level, LevelFilter, Log, Metadata, Record, SetLoggerError, set_logger, set_max_level};

use crate::console::{self, ConsoleSink};

pub struct Logger;

impl Log for Logger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let color = match record.level() {
            Level::Error => 31, // Red
            Level::Warn => 93,  // BrightYellow
            Level::Info => 20,  // White
            Level::Debug => 32, // Green
            Level::Trace => 90, // BrightBlack
        };
        crate::kprintln!(
            "\u{1B}[{}m[{:}] {}\u{1B}[0m",
            color,
            record.level(),
            record.args(),
        );
    }

    fn flush(&self) {}
}

/// Max level taken from the `LOG_LEVEL` build flag, `Info` if it does not parse.
pub fn default_level() -> LevelFilter {
    LevelFilter::from_str(config::LOG_LEVEL).unwrap_or(LevelFilter::Info)
}

/// Register `sink` as the console and install [Logger] as the `log` backend.
///
/// Fails if another logger was installed first; the console sink is kept either way.
pub fn init(sink: &'static dyn ConsoleSink) -> Result<(), SetLoggerError> {
    static LOGGER: Logger = Logger;
    console::register(sink);
    set_logger(&LOGGER)?;
    set_max_level(default_level());
    Ok(())
}

/// Improved debug macro,
/// only compiled in debug mode.
#[macro_export]
macro_rules! debug_ex {
    // debug_ex!(target: "my_target", "a {} event", "log")
    (target: $target:expr, $($arg:tt)+) => {
        #[cfg(debug_assertions)]
        {
            ::log::debug!(target: $target, $($arg)+)
        }
    };

    // debug_ex!("a {} event", "log")
    ($($arg:tt)+) => {
        #[cfg(debug_assertions)]
        {
            ::log::debug!($($arg)+)
        }
    }
}
