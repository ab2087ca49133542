//! Console output routed through a sink provided by the host.
//!
//! The driver has no device of its own to print on. The loader registers a
//! [ConsoleSink] once (kernel ring buffer, serial line, ...) and every
//! [kprint!]/[kprintln!] afterwards goes there. Output before registration is dropped.

use core::fmt::{Arguments, Error};

use spin::Once;

/// Host-provided text output.
pub trait ConsoleSink: Sync {
    fn put_str(&self, s: &str) -> Result<(), Error>;
}

static CONSOLE: Once<&'static dyn ConsoleSink> = Once::new();

/// Register the console sink.
///
/// Return `false` if a sink was already registered; the first one stays in place.
pub fn register(sink: &'static dyn ConsoleSink) -> bool {
    let mut fresh = false;
    CONSOLE.call_once(|| {
        fresh = true;
        sink
    });
    fresh
}

/// Format `args` and hand the whole text to the sink in a single `put_str`.
pub fn console_print(args: Arguments) {
    if let Some(sink) = CONSOLE.get() {
        let text = alloc::fmt::format(args);
        // Console output is best effort, a failing sink loses the line.
        let _ = sink.put_str(&text);
    }
}

#[macro_export]
/// print string macro
macro_rules! kprint {
    ($fmt: literal $(, $($arg: tt)+)?) => {
        $crate::console::console_print(format_args!($fmt $(, $($arg)+)?));
    }
}

#[macro_export]
macro_rules! kprintln {
    ($fmt: literal $(, $($arg: tt)+)?) => {
        $crate::console::console_print(format_args!(concat!($fmt, "\n") $(, $($arg)+)?));   // Use LF instead of CR-LF
    }
}
