//! Bake context providing logging, profiling, and progress tracking
//!
//! Entries recorded here are also forwarded to the `log` facade, so a host
//! that only installs a logger still sees bake diagnostics.

use std::collections::HashMap;
use std::time::Duration;
use web_time::Instant;

/// Oldest entries are dropped beyond this many
const MAX_LOG_ENTRIES: usize = 1000;

/// Log level for context messages
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum LogLevel {
    Debug = 0,
    Info = 1,
    Warning = 2,
    Error = 3,
}

impl From<LogLevel> for log::Level {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Debug => log::Level::Debug,
            LogLevel::Info => log::Level::Info,
            LogLevel::Warning => log::Level::Warn,
            LogLevel::Error => log::Level::Error,
        }
    }
}

/// Timer categories for bake profiling
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TimerCategory {
    /// Whole bake
    Total,
    /// Cell array allocation and center computation
    Allocation,
    /// Occupancy sampler calls
    Occupancy,
    /// Neighbor wiring
    Adjacency,
}

/// Bake stage currently running, counted from 1
#[derive(Debug, Clone)]
pub struct ProgressInfo {
    pub current: usize,
    pub total: usize,
    pub description: String,
}

/// Log entry containing message and metadata
#[derive(Debug, Clone)]
pub struct LogEntry {
    pub level: LogLevel,
    pub timestamp: Instant,
    pub message: String,
}

/// Accumulated timing for one category
#[derive(Debug, Clone)]
struct TimerEntry {
    category: TimerCategory,
    total: Duration,
    /// Number of times this timer was stopped
    count: usize,
}

/// Context for bake operations providing logging, profiling, and progress tracking
#[derive(Debug)]
pub struct BakeContext {
    logs: Vec<LogEntry>,
    active_timers: HashMap<TimerCategory, Instant>,
    timers: HashMap<TimerCategory, TimerEntry>,
    progress: Option<ProgressInfo>,
    min_log_level: LogLevel,
    enable_timing: bool,
}

impl Default for BakeContext {
    fn default() -> Self {
        Self::new()
    }
}

impl BakeContext {
    /// Creates a new context with default settings
    pub fn new() -> Self {
        Self {
            logs: Vec::new(),
            active_timers: HashMap::new(),
            timers: HashMap::new(),
            progress: None,
            min_log_level: LogLevel::Info,
            enable_timing: true,
        }
    }

    pub fn set_log_level(&mut self, level: LogLevel) {
        self.min_log_level = level;
    }

    pub fn set_timing_enabled(&mut self, enabled: bool) {
        self.enable_timing = enabled;
    }

    pub fn log_debug(&mut self, message: impl Into<String>) {
        self.log(LogLevel::Debug, message);
    }

    pub fn log_info(&mut self, message: impl Into<String>) {
        self.log(LogLevel::Info, message);
    }

    pub fn log_warning(&mut self, message: impl Into<String>) {
        self.log(LogLevel::Warning, message);
    }

    pub fn log_error(&mut self, message: impl Into<String>) {
        self.log(LogLevel::Error, message);
    }

    fn log(&mut self, level: LogLevel, message: impl Into<String>) {
        let message = message.into();
        let log_level: log::Level = level.into();
        log::log!(target: "voxnav::bake", log_level, "{}", message);

        if level >= self.min_log_level {
            self.logs.push(LogEntry {
                level,
                timestamp: Instant::now(),
                message,
            });

            if self.logs.len() > MAX_LOG_ENTRIES {
                self.logs.remove(0);
            }
        }
    }

    /// Starts a timer for the given category
    pub fn start_timer(&mut self, category: TimerCategory) {
        if self.enable_timing {
            self.active_timers.insert(category, Instant::now());
        }
    }

    /// Stops a timer and accumulates the elapsed duration
    pub fn stop_timer(&mut self, category: TimerCategory) {
        if !self.enable_timing {
            return;
        }
        if let Some(start_time) = self.active_timers.remove(&category) {
            let elapsed = start_time.elapsed();
            let entry = self
                .timers
                .entry(category.clone())
                .or_insert(TimerEntry {
                    category,
                    total: Duration::ZERO,
                    count: 0,
                });
            entry.total += elapsed;
            entry.count += 1;
        }
    }

    /// Gets how many times a timer was stopped
    pub fn get_timer_count(&self, category: &TimerCategory) -> usize {
        self.timers
            .get(category)
            .map(|entry| entry.count)
            .unwrap_or(0)
    }

    /// Records the stage being worked on and logs it at debug level
    pub fn set_progress(&mut self, current: usize, total: usize, description: impl Into<String>) {
        let description = description.into();
        log::debug!(target: "voxnav::bake", "[{}/{}] {}", current, total, description);
        self.progress = Some(ProgressInfo {
            current,
            total,
            description,
        });
    }

    /// Last stage recorded by [`BakeContext::set_progress`]
    pub fn get_progress(&self) -> Option<&ProgressInfo> {
        self.progress.as_ref()
    }

    pub fn get_logs(&self) -> &[LogEntry] {
        &self.logs
    }

    /// Resets the context (clears logs, timers, and progress)
    pub fn reset(&mut self) {
        self.logs.clear();
        self.active_timers.clear();
        self.timers.clear();
        self.progress = None;
    }

    /// Formats the timers as a table sorted by total duration
    pub fn timer_summary(&self) -> String {
        let mut sorted: Vec<_> = self.timers.values().collect();
        sorted.sort_by(|a, b| b.total.cmp(&a.total));

        let mut out = String::new();
        for entry in sorted {
            let ms = entry.total.as_secs_f64() * 1000.0;
            out.push_str(&format!(
                "{:20} {:8.2}ms ({} calls, avg: {:.2}ms)\n",
                format!("{:?}", entry.category),
                ms,
                entry.count,
                ms / entry.count.max(1) as f64
            ));
        }
        out
    }
}
