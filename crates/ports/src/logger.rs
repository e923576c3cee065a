// crates/ports/src/logger.rs
use log::Level;

/// Diagnostics sink injected into the engine at construction.
///
/// Verbosity belongs to the implementation; there is no process-wide switch.
pub trait Logger: Send + Sync {
    fn enabled(&self, level: Level) -> bool;
    fn log(&self, level: Level, message: &str);
}

/// Logger that accepts nothing.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullLogger;

impl Logger for NullLogger {
    fn enabled(&self, _level: Level) -> bool {
        false
    }

    fn log(&self, _level: Level, _message: &str) {}
}
