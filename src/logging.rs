//! Log output setup: a `fern` dispatch writing timestamped lines to stdout
//! and, optionally, to a file.

use std::fmt::Display;

use log::LevelFilter;

use crate::config::LogConfig;

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

pub fn parse_level(level: &str) -> Result<LevelFilter, String> {
    level
        .trim()
        .parse::<LevelFilter>()
        .map_err(|_| format!("Unknown log level: {level:?}"))
}

fn format_line(
    timestamp: impl Display,
    level: log::Level,
    target: &str,
    message: impl Display,
) -> String {
    format!("[{timestamp}][{level}][{target}] {message}")
}

/// Installs the global logger. Must be called at most once.
pub fn init(config: &LogConfig) -> Result<(), String> {
    let level = parse_level(&config.level)?;

    let mut dispatch = fern::Dispatch::new()
        .format(|out, message, record| {
            out.finish(format_args!(
                "{}",
                format_line(
                    chrono::Local::now().format(TIMESTAMP_FORMAT),
                    record.level(),
                    record.target(),
                    message,
                )
            ))
        })
        .level(level)
        .chain(std::io::stdout());

    if let Some(path) = &config.file {
        let file = fern::log_file(path)
            .map_err(|e| format!("Failed to open log file {}: {e}", path.display()))?;
        dispatch = dispatch.chain(file);
    }

    dispatch.apply().map_err(|e| e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_level() {
        assert_eq!(parse_level("info").unwrap(), LevelFilter::Info);
        assert_eq!(parse_level("DEBUG").unwrap(), LevelFilter::Debug);
        assert_eq!(parse_level(" warn ").unwrap(), LevelFilter::Warn);
        assert_eq!(parse_level("off").unwrap(), LevelFilter::Off);
        assert!(parse_level("loud").is_err());
    }

    #[test]
    fn test_format_line() {
        let line = format_line("2024-01-02 03:04:05", log::Level::Warn, "glquad::abs::app", "hi");
        assert_eq!(line, "[2024-01-02 03:04:05][WARN][glquad::abs::app] hi");
    }
}
