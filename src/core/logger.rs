//! Match logging with verbosity levels and in-memory capture.
//!
//! The engine logs through a [`GameLogger`] owned by each `Game`. Messages
//! are built lazily, so a silent logger (the default for search forks)
//! costs one comparison per call site.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// How much the engine reports.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum VerbosityLevel {
    /// Nothing at all.
    Silent = 0,
    /// Match outcome only.
    Minimal = 1,
    /// Turns, plays, attacks, deaths.
    #[default]
    Normal = 2,
    /// Blocks, aura refreshes and every triggered action.
    Verbose = 3,
}

impl FromStr for VerbosityLevel {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "silent" | "0" => Ok(VerbosityLevel::Silent),
            "minimal" | "1" => Ok(VerbosityLevel::Minimal),
            "normal" | "2" => Ok(VerbosityLevel::Normal),
            "verbose" | "3" => Ok(VerbosityLevel::Verbose),
            _ => Err(format!(
                "invalid verbosity '{s}' (expected silent, minimal, normal, verbose or 0-3)"
            )),
        }
    }
}

/// Output destination for log messages.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum OutputMode {
    #[default]
    Stdout,
    /// Capture only to the in-memory buffer.
    Memory,
    Both,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogEntry {
    pub level: VerbosityLevel,
    /// Short tag such as "turn", "play" or "block".
    pub category: &'static str,
    pub message: String,
}

#[derive(Debug, Clone, Default)]
pub struct GameLogger {
    verbosity: VerbosityLevel,
    output_mode: OutputMode,
    buffer: Vec<LogEntry>,
}

impl GameLogger {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_verbosity(verbosity: VerbosityLevel) -> Self {
        Self {
            verbosity,
            ..Self::default()
        }
    }

    /// Logger that drops everything.
    #[must_use]
    pub fn silent() -> Self {
        Self::with_verbosity(VerbosityLevel::Silent)
    }

    /// Logger that keeps everything up to `verbosity` in memory.
    #[must_use]
    pub fn capturing(verbosity: VerbosityLevel) -> Self {
        Self {
            verbosity,
            output_mode: OutputMode::Memory,
            buffer: Vec::new(),
        }
    }

    #[must_use]
    pub fn verbosity(&self) -> VerbosityLevel {
        self.verbosity
    }

    pub fn set_verbosity(&mut self, verbosity: VerbosityLevel) {
        self.verbosity = verbosity;
    }

    pub fn set_output_mode(&mut self, mode: OutputMode) {
        self.output_mode = mode;
    }

    #[must_use]
    pub fn enabled(&self, level: VerbosityLevel) -> bool {
        level != VerbosityLevel::Silent && level <= self.verbosity
    }

    /// Log a lazily formatted message.
    pub fn log(&mut self, level: VerbosityLevel, category: &'static str, message: impl FnOnce() -> String) {
        if !self.enabled(level) {
            return;
        }
        let message = message();
        if matches!(self.output_mode, OutputMode::Stdout | OutputMode::Both) {
            if level == VerbosityLevel::Minimal {
                println!("{message}");
            } else {
                println!("  [{category}] {message}");
            }
        }
        if matches!(self.output_mode, OutputMode::Memory | OutputMode::Both) {
            self.buffer.push(LogEntry {
                level,
                category,
                message,
            });
        }
    }

    pub fn minimal(&mut self, category: &'static str, message: impl FnOnce() -> String) {
        self.log(VerbosityLevel::Minimal, category, message);
    }

    pub fn normal(&mut self, category: &'static str, message: impl FnOnce() -> String) {
        self.log(VerbosityLevel::Normal, category, message);
    }

    pub fn verbose(&mut self, category: &'static str, message: impl FnOnce() -> String) {
        self.log(VerbosityLevel::Verbose, category, message);
    }

    /// Captured entries.
    #[must_use]
    pub fn logs(&self) -> &[LogEntry] {
        &self.buffer
    }

    pub fn clear_logs(&mut self) {
        self.buffer.clear();
    }
}
