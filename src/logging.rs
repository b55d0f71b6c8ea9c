//! `log` facade routed to the browser console.

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
        let msg = format!("[{}] {}", record.target(), record.args());
        write_console(record.level(), &msg);
    }

    fn flush(&self) {}
}

#[cfg(target_arch = "wasm32")]
fn write_console(level: Level, msg: &str) {
    use wasm_bindgen::JsValue;
    use web_sys::console;
    let v = JsValue::from_str(msg);
    match level {
        Level::Error => console::error_1(&v),
        Level::Warn => console::warn_1(&v),
        Level::Info => console::info_1(&v),
        Level::Debug | Level::Trace => console::debug_1(&v),
    }
}

// Host builds (cargo test) have no console binding.
#[cfg(not(target_arch = "wasm32"))]
fn write_console(level: Level, msg: &str) {
    eprintln!("{level} {msg}");
}

/// Installs the console logger. Safe to call more than once.
pub fn init(level: LevelFilter) {
    if log::set_logger(&LOGGER).is_ok() {
        log::set_max_level(level);
    }
}
