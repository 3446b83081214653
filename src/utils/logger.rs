#[cfg(feature = "cli")]
use crossterm::style::{Attribute, Color, ResetColor, SetAttribute, SetForegroundColor};
#[cfg(feature = "cli")]
use std::fmt::Write;

/// Environment variable that enables `Debug` lines when set to `debug`.
pub const LOG_ENV: &str = "BADKIT_LOG";

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LogLevel {
    Success,
    Error,
    Info,
    Warning,
    Debug,
}

#[derive(Debug, Clone)]
pub struct Logger {
    debug: bool,
}

impl Default for Logger {
    fn default() -> Self {
        Self::new()
    }
}

impl Logger {
    pub fn new() -> Self {
        let debug = std::env::var(LOG_ENV)
            .map(|v| v.eq_ignore_ascii_case("debug"))
            .unwrap_or(false);
        Logger { debug }
    }

    fn enabled(&self, level: LogLevel) -> bool {
        level != LogLevel::Debug || self.debug
    }

    pub fn log_message(&self, level: LogLevel, message: &str) {
        if !self.enabled(level) {
            return;
        }
        println!("{}", self.format_line(level, message));
    }

    pub fn log_message_with_trace(&self, level: LogLevel, message: &str, trace: Vec<&str>) {
        if !self.enabled(level) {
            return;
        }
        println!("{}", self.format_line(level, message));
        for t in trace {
            println!("     ↳ {}", t);
        }
    }

    fn format_line(&self, level: LogLevel, message: &str) -> String {
        format!(
            "{} {} {} {}",
            timestamp(),
            self.tool_signature(),
            self.format_status(level),
            message
        )
    }

    #[cfg(feature = "cli")]
    fn tool_signature(&self) -> String {
        let mut s = String::new();

        let _ = write!(&mut s, "{}", SetForegroundColor(Color::Grey));
        s.push('[');
        let _ = write!(
            &mut s,
            "{}",
            SetForegroundColor(Color::Rgb {
                r: 232,
                g: 125,
                b: 13,
            })
        );
        let _ = write!(&mut s, "{}", SetAttribute(Attribute::Bold));
        s.push_str("BADKit");
        let _ = write!(&mut s, "{}", SetAttribute(Attribute::Reset));
        let _ = write!(&mut s, "{}", SetForegroundColor(Color::Grey));
        s.push(']');
        let _ = write!(&mut s, "{}", ResetColor);

        s
    }

    #[cfg(not(feature = "cli"))]
    fn tool_signature(&self) -> String {
        "[BADKit]".to_string()
    }

    #[cfg(feature = "cli")]
    fn format_status(&self, level: LogLevel) -> String {
        let mut s = String::new();

        let color = match level {
            LogLevel::Success => Color::Rgb {
                r: 76,
                g: 175,
                b: 80,
            },
            LogLevel::Error => Color::Rgb {
                r: 244,
                g: 67,
                b: 54,
            },
            LogLevel::Info => Color::Rgb {
                r: 33,
                g: 150,
                b: 243,
            },
            LogLevel::Warning => Color::Rgb {
                r: 255,
                g: 152,
                b: 0,
            },
            LogLevel::Debug => Color::Rgb {
                r: 103,
                g: 58,
                b: 183,
            },
        };

        s.push('[');
        let _ = write!(&mut s, "{}", SetForegroundColor(color));
        let _ = write!(&mut s, "{}", SetAttribute(Attribute::Bold));
        s.push_str(status_label(level));
        let _ = write!(&mut s, "{}", SetAttribute(Attribute::Reset));
        s.push(']');
        let _ = write!(&mut s, "{}", ResetColor);

        s
    }

    #[cfg(not(feature = "cli"))]
    fn format_status(&self, level: LogLevel) -> String {
        format!("[{}]", status_label(level))
    }
}

fn status_label(level: LogLevel) -> &'static str {
    match level {
        LogLevel::Success => "SUCCESS",
        LogLevel::Error => "ERROR",
        LogLevel::Info => "INFO",
        LogLevel::Warning => "WARNING",
        LogLevel::Debug => "DEBUG",
    }
}

fn timestamp() -> String {
    chrono::Local::now().format("%Y-%m-%d %H:%M:%S").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn debug_lines_are_gated() {
        let quiet = Logger { debug: false };
        assert!(!quiet.enabled(LogLevel::Debug));
        assert!(quiet.enabled(LogLevel::Warning));

        let verbose = Logger { debug: true };
        assert!(verbose.enabled(LogLevel::Debug));
    }

    #[test]
    fn line_carries_status_and_message() {
        let line = Logger { debug: false }.format_line(LogLevel::Error, "boom");
        assert!(line.contains("ERROR"));
        assert!(line.contains("BADKit"));
        assert!(line.ends_with("boom"));
    }
}
