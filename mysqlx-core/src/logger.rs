use std::time::Instant;

use crate::options::LogSettings;
use crate::warning::{Warning, WarningLevel};

pub(crate) const TARGET: &str = "mysqlx::result";

// `tracing` doesn't currently support dynamic levels
// https://github.com/tokio-rs/tracing/issues/372
macro_rules! tracing_dynamic_enabled {
    (target: $target:expr, $level:expr) => {{
        use ::tracing::Level;

        match $level {
            Level::ERROR => ::tracing::enabled!(target: $target, Level::ERROR),
            Level::WARN => ::tracing::enabled!(target: $target, Level::WARN),
            Level::INFO => ::tracing::enabled!(target: $target, Level::INFO),
            Level::DEBUG => ::tracing::enabled!(target: $target, Level::DEBUG),
            Level::TRACE => ::tracing::enabled!(target: $target, Level::TRACE),
        }
    }};
}

macro_rules! tracing_dynamic_event {
    (target: $target:expr, $level:expr, $($args:tt)*) => {{
        use ::tracing::Level;

        match $level {
            Level::ERROR => ::tracing::event!(target: $target, Level::ERROR, $($args)*),
            Level::WARN => ::tracing::event!(target: $target, Level::WARN, $($args)*),
            Level::INFO => ::tracing::event!(target: $target, Level::INFO, $($args)*),
            Level::DEBUG => ::tracing::event!(target: $target, Level::DEBUG, $($args)*),
            Level::TRACE => ::tracing::event!(target: $target, Level::TRACE, $($args)*),
        }
    }};
}

fn level_filter_to_levels(
    filter: log::LevelFilter,
) -> Option<(tracing::Level, log::Level)> {
    let tracing_level = match filter {
        log::LevelFilter::Error => Some(tracing::Level::ERROR),
        log::LevelFilter::Warn => Some(tracing::Level::WARN),
        log::LevelFilter::Info => Some(tracing::Level::INFO),
        log::LevelFilter::Debug => Some(tracing::Level::DEBUG),
        log::LevelFilter::Trace => Some(tracing::Level::TRACE),
        log::LevelFilter::Off => None,
    };

    tracing_level.zip(filter.to_level())
}

// The enabled level could be set from either tracing world or log world, so check both
// to see if logging should be enabled for our level
fn enabled(tracing_level: tracing::Level, log_level: log::Level) -> bool {
    log::log_enabled!(target: TARGET, log_level)
        || tracing_dynamic_enabled!(target: TARGET, tracing_level)
}

/// Tracks one result of a reply, from the moment it starts until the source
/// signals its end.
#[derive(Debug)]
pub(crate) struct ResultLogger {
    index: u32,
    rows_read: u64,
    start: Instant,
    settings: LogSettings,
}

impl ResultLogger {
    pub(crate) fn new(settings: LogSettings) -> Self {
        Self { index: 0, rows_read: 0, start: Instant::now(), settings }
    }

    /// Starts tracking the next result of a multi-result reply.
    pub(crate) fn next_result(&mut self) {
        self.index += 1;
        self.rows_read = 0;
        self.start = Instant::now();
    }

    pub(crate) fn increment_rows_read(&mut self) {
        self.rows_read += 1;
    }

    pub(crate) fn discarded(&self, rows: usize) {
        if rows > 0 {
            tracing::debug!(target: TARGET, result = self.index, rows, "discarding unread rows");
        }
    }

    pub(crate) fn warning(&self, warning: &Warning) {
        let Some((tracing_level, log_level)) =
            level_filter_to_levels(self.settings.warnings_level)
        else {
            return;
        };

        if enabled(tracing_level, log_level) {
            let severity = match warning.level() {
                WarningLevel::Note => "note",
                WarningLevel::Warning => "warning",
                WarningLevel::Error => "error",
            };

            tracing_dynamic_event!(
                target: TARGET,
                tracing_level,
                result = self.index,
                severity,
                code = warning.code(),
                "{}",
                warning.message()
            );
        }
    }

    pub(crate) fn finish(&self, affected_items: u64, warnings: usize) {
        let elapsed = self.start.elapsed();

        let was_slow = elapsed >= self.settings.slow_results_duration;

        let lvl = if was_slow {
            self.settings.slow_results_level
        } else {
            self.settings.results_level
        };

        let Some((tracing_level, log_level)) = level_filter_to_levels(lvl) else {
            return;
        };

        if !enabled(tracing_level, log_level) {
            return;
        }

        if was_slow {
            tracing_dynamic_event!(
                target: TARGET,
                tracing_level,
                result = self.index,
                rows_read = self.rows_read,
                affected_items,
                warnings,
                ?elapsed,
                elapsed_secs = elapsed.as_secs_f64(),
                slow_threshold = ?self.settings.slow_results_duration,
                "slow result: time to complete exceeded alert threshold"
            );
        } else {
            tracing_dynamic_event!(
                target: TARGET,
                tracing_level,
                result = self.index,
                rows_read = self.rows_read,
                affected_items,
                warnings,
                ?elapsed,
                elapsed_secs = elapsed.as_secs_f64(),
                "result complete"
            );
        }
    }
}
