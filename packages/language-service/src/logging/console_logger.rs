// Console Logger
//
// Logger that writes to the process console.

use super::logger::{LogLevel, Logger};

/// Console logger. Informational output goes to stdout, everything else to
/// stderr so it does not interleave with protocol traffic on stdout.
#[derive(Debug, Clone, Copy)]
pub struct ConsoleLogger {
    level: LogLevel,
}

impl ConsoleLogger {
    pub fn new(level: LogLevel) -> Self {
        Self { level }
    }

    fn write(&self, level: LogLevel, msg: &str) {
        if !self.is_enabled(level) {
            return;
        }
        match level {
            LogLevel::Info => println!("[{}] {}", level, msg),
            LogLevel::Debug | LogLevel::Warn | LogLevel::Error => {
                eprintln!("[{}] {}", level, msg)
            }
        }
    }
}

impl Logger for ConsoleLogger {
    fn level(&self) -> LogLevel {
        self.level
    }

    fn debug(&self, msg: &str) {
        self.write(LogLevel::Debug, msg);
    }

    fn info(&self, msg: &str) {
        self.write(LogLevel::Info, msg);
    }

    fn warn(&self, msg: &str) {
        self.write(LogLevel::Warn, msg);
    }

    fn error(&self, msg: &str) {
        self.write(LogLevel::Error, msg);
    }
}
