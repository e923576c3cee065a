// crates/infra/src/console.rs
use std::io::{self, Write};

use log::{Level, LevelFilter, Metadata, Record};

use notestat_ports::{Logger, Notifier};
use notestat_shared_kernel::{InfrastructureError, Result};

fn prefix(level: Level) -> &'static str {
    match level {
        Level::Error => "[error]",
        Level::Warn => "[warn]",
        Level::Info => "[info]",
        Level::Debug => "[debug]",
        Level::Trace => "[trace]",
    }
}

/// Diagnostics on stderr, `[warn] message` style.
#[derive(Debug, Clone, Copy)]
pub struct ConsoleLogger {
    max_level: LevelFilter,
}

impl ConsoleLogger {
    pub const fn new(max_level: LevelFilter) -> Self {
        Self { max_level }
    }

    pub const fn max_level(&self) -> LevelFilter {
        self.max_level
    }

    /// Route the `log` macros of every crate through this logger as well.
    ///
    /// # Errors
    ///
    /// Fails when a global logger has already been installed.
    pub fn install(self) -> std::result::Result<(), log::SetLoggerError> {
        log::set_boxed_logger(Box::new(self))?;
        log::set_max_level(self.max_level);
        Ok(())
    }
}

impl Logger for ConsoleLogger {
    fn enabled(&self, level: Level) -> bool {
        level <= self.max_level
    }

    fn log(&self, level: Level, message: &str) {
        if Logger::enabled(self, level) {
            eprintln!("{} {message}", prefix(level));
        }
    }
}

impl log::Log for ConsoleLogger {
    fn enabled(&self, metadata: &Metadata<'_>) -> bool {
        metadata.level() <= self.max_level
    }

    fn log(&self, record: &Record<'_>) {
        if log::Log::enabled(self, record.metadata()) {
            eprintln!("{} {}", prefix(record.level()), record.args());
        }
    }

    fn flush(&self) {
        let _ = io::stderr().flush();
    }
}

/// User-facing notices: results on stdout, failures and progress on stderr.
#[derive(Debug, Default, Clone, Copy)]
pub struct ConsoleNotifier {
    quiet: bool,
}

impl ConsoleNotifier {
    pub const fn new(quiet: bool) -> Self {
        Self { quiet }
    }

    fn emit(mut out: impl Write, line: std::fmt::Arguments<'_>) -> Result<()> {
        writeln!(out, "{line}").map_err(|err| {
            InfrastructureError::OutputError { message: "failed to write notice".to_string(), source: Some(Box::new(err)) }
                .into()
        })
    }
}

impl Notifier for ConsoleNotifier {
    fn info(&self, message: &str) -> Result<()> {
        if self.quiet {
            return Ok(());
        }
        Self::emit(io::stdout().lock(), format_args!("{message}"))
    }

    fn error(&self, message: &str) -> Result<()> {
        Self::emit(io::stderr().lock(), format_args!("[error] {message}"))
    }

    fn progress(&self, processed: usize, total: usize) -> Result<()> {
        if self.quiet {
            return Ok(());
        }
        let percent = processed * 100 / total.max(1);
        Self::emit(io::stderr().lock(), format_args!("[progress] {processed}/{total} ({percent}%)"))
    }
}
