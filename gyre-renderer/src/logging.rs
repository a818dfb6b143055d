//! Routes `log` records to the browser console.

use log::{Level, LevelFilter, Log, Metadata, Record};
use wasm_bindgen::JsValue;
use web_sys::console;

use crate::error::Error;

static LOGGER: ConsoleLogger = ConsoleLogger;

/// `log` backend writing to `console.{error,warn,info,debug}`.
#[derive(Debug)]
pub struct ConsoleLogger;

impl Log for ConsoleLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }

        let message = JsValue::from(format_record(record));
        match record.level() {
            Level::Error => console::error_1(&message),
            Level::Warn => console::warn_1(&message),
            Level::Info => console::info_1(&message),
            Level::Debug | Level::Trace => console::debug_1(&message),
        }
    }

    fn flush(&self) {}
}

fn format_record(record: &Record) -> String {
    format!("[{}] {}: {}", record.level(), record.target(), record.args())
}

/// Installs the console logger.
///
/// # Errors
/// * `Error::Initialization` - another logger is already installed
pub fn init(level: LevelFilter) -> Result<(), Error> {
    log::set_logger(&LOGGER).map_err(|e| Error::logger_install_failed(&e.to_string()))?;
    log::set_max_level(level);

    log::debug!("logging initialized at {level}");
    Ok(())
}
