/*
 * ==========================================================================
 * CARMEN - Programs in Plain English
 * ==========================================================================
 *
 * File:      events.rs
 * Purpose:   Structured log entries and the observer hooks fired while
 *            parsing.
 *
 * Observers are called synchronously, in subscription order, at the
 * moment an error is recorded or a log entry is written. Nothing is
 * buffered.
 *
 * License:
 * This file is part of the Carmen programming language project.
 *
 * Carmen is dual-licensed under the terms of:
 *   - The MIT License
 *   - The Apache License, Version 2.0
 *
 * You may choose either license to govern your use of this software.
 *
 * Unless required by applicable law or agreed to in writing, software
 * distributed under these licenses is distributed on an "AS IS" BASIS,
 * WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
 *
 * ==========================================================================
 */

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::ParseError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum LogLevel {
    Debug,
    Info,
    Warning,
    Error,
}

impl LogLevel {
    /// The matching level of the `log` facade.
    pub fn as_log_level(self) -> log::Level {
        match self {
            LogLevel::Debug => log::Level::Debug,
            LogLevel::Info => log::Level::Info,
            LogLevel::Warning => log::Level::Warn,
            LogLevel::Error => log::Level::Error,
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warning => "warning",
            LogLevel::Error => "error",
        };
        write!(f, "{}", name)
    }
}

/// One entry of the per-parse log.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogEntry {
    pub time: DateTime<Utc>,
    pub level: LogLevel,
    pub message: String,
}

impl LogEntry {
    /// Creates an entry stamped with the current time.
    pub fn now(level: LogLevel, message: impl Into<String>) -> Self {
        Self {
            time: Utc::now(),
            level,
            message: message.into(),
        }
    }
}

impl fmt::Display for LogEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}] {}: {}",
            self.time.format("%H:%M:%S%.3f"),
            self.level,
            self.message
        )
    }
}

/// Receives errors and log entries as the parser produces them.
///
/// Both methods default to doing nothing, so an observer only implements
/// what it cares about.
pub trait ParseObserver {
    fn on_error(&self, _error: &ParseError) {}

    fn on_log(&self, _entry: &LogEntry) {}
}

/// Adapts a pair of closures into a [`ParseObserver`].
///
/// # Example
/// ```text
/// let observer = FnObserver::new(|e| eprintln!("{e}"), |_| {});
/// ```
pub struct FnObserver<E, L>
where
    E: Fn(&ParseError),
    L: Fn(&LogEntry),
{
    on_error: E,
    on_log: L,
}

impl<E, L> FnObserver<E, L>
where
    E: Fn(&ParseError),
    L: Fn(&LogEntry),
{
    pub fn new(on_error: E, on_log: L) -> Self {
        Self { on_error, on_log }
    }
}

impl<E, L> ParseObserver for FnObserver<E, L>
where
    E: Fn(&ParseError),
    L: Fn(&LogEntry),
{
    fn on_error(&self, error: &ParseError) {
        (self.on_error)(error)
    }

    fn on_log(&self, entry: &LogEntry) {
        (self.on_log)(entry)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn levels_are_ordered() {
        assert!(LogLevel::Debug < LogLevel::Warning);
        assert!(LogLevel::Warning < LogLevel::Error);
    }

    #[test]
    fn entry_display_has_level_and_message() {
        let entry = LogEntry::now(LogLevel::Warning, "missing terminator");
        let shown = entry.to_string();
        assert!(shown.contains("warning: missing terminator"));
    }

    #[test]
    fn facade_levels() {
        assert_eq!(LogLevel::Warning.as_log_level(), log::Level::Warn);
        assert_eq!(LogLevel::Info.as_log_level(), log::Level::Info);
    }
}
