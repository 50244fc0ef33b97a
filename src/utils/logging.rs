// Tue Jan 13 2026 - Alex

use crate::utils::format_duration;
use colored::*;
use log::{Level, LevelFilter};
use std::io::Write;
use std::time::Instant;

pub fn level_from_str(s: &str) -> LevelFilter {
    match s.to_lowercase().as_str() {
        "error" => LevelFilter::Error,
        "warn" | "warning" => LevelFilter::Warn,
        "info" => LevelFilter::Info,
        "debug" => LevelFilter::Debug,
        "trace" => LevelFilter::Trace,
        "off" => LevelFilter::Off,
        _ => LevelFilter::Info,
    }
}

fn format_level(level: Level) -> ColoredString {
    match level {
        Level::Error => "ERROR".red().bold(),
        Level::Warn => "WARN ".yellow().bold(),
        Level::Info => "INFO ".green().bold(),
        Level::Debug => "DEBUG".blue().bold(),
        Level::Trace => "TRACE".magenta().bold(),
    }
}

/// Installs the stderr logger. `quiet` keeps warnings and errors only.
pub fn init_logger(level: LevelFilter, quiet: bool) {
    let level = if quiet { level.min(LevelFilter::Warn) } else { level };

    let _ = env_logger::Builder::new()
        .filter_level(level)
        .format_timestamp(None)
        .format(|buf, record| writeln!(buf, "{} {}", format_level(record.level()), record.args()))
        .try_init();
}

/// Logs how long a scope took when dropped.
pub struct ScopedTimer {
    name: String,
    start: Instant,
}

impl ScopedTimer {
    pub fn new(name: &str) -> Self {
        log::debug!("[TIMER] {} started", name);
        Self {
            name: name.to_string(),
            start: Instant::now(),
        }
    }
}

impl Drop for ScopedTimer {
    fn drop(&mut self) {
        log::debug!("[TIMER] {} took {}", self.name, format_duration(self.start.elapsed()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_from_str() {
        assert_eq!(level_from_str("DEBUG"), LevelFilter::Debug);
        assert_eq!(level_from_str("warning"), LevelFilter::Warn);
        assert_eq!(level_from_str("bogus"), LevelFilter::Info);
    }

    #[test]
    fn test_init_twice_is_harmless() {
        init_logger(LevelFilter::Debug, true);
        init_logger(LevelFilter::Info, false);
        let _timer = ScopedTimer::new("test");
    }
}
