use std::time::Duration;

use log::LevelFilter;

/// Log settings for consuming results.
#[derive(Clone, Debug)]
#[non_exhaustive]
pub struct LogSettings {
    pub results_level: LevelFilter,
    pub slow_results_level: LevelFilter,
    pub slow_results_duration: Duration,
    pub warnings_level: LevelFilter,
}

impl Default for LogSettings {
    fn default() -> Self {
        LogSettings {
            results_level: LevelFilter::Debug,
            slow_results_level: LevelFilter::Warn,
            slow_results_duration: Duration::from_secs(1),
            warnings_level: LevelFilter::Info,
        }
    }
}

impl LogSettings {
    pub fn log_results(&mut self, level: LevelFilter) {
        self.results_level = level;
    }

    pub fn log_slow_results(&mut self, level: LevelFilter, duration: Duration) {
        self.slow_results_level = level;
        self.slow_results_duration = duration;
    }

    pub fn log_warnings(&mut self, level: LevelFilter) {
        self.warnings_level = level;
    }
}

/// Options for consuming a result, supplied by the code that executed the statement.
///
/// ```rust,ignore
/// let options = ResultOptions::new()
///     .log_results(LevelFilter::Trace)
///     .log_slow_results(LevelFilter::Warn, Duration::from_millis(500));
/// ```
#[derive(Clone, Debug, Default)]
pub struct ResultOptions {
    pub(crate) log_settings: LogSettings,
}

impl ResultOptions {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Log the summary of each completed result at the given level.
    ///
    /// The summary includes the number of rows read, affected items, the number of
    /// warnings and the time it took for the result to complete.
    #[must_use]
    pub fn log_results(mut self, level: LevelFilter) -> Self {
        self.log_settings.log_results(level);
        self
    }

    /// Log the summary of results that took longer than `duration` to complete
    /// at the given level instead.
    #[must_use]
    pub fn log_slow_results(mut self, level: LevelFilter, duration: Duration) -> Self {
        self.log_settings.log_slow_results(level, duration);
        self
    }

    /// Log each warning reported by the server at the given level.
    #[must_use]
    pub fn log_warnings(mut self, level: LevelFilter) -> Self {
        self.log_settings.log_warnings(level);
        self
    }

    /// Turn off all logging of results.
    #[must_use]
    pub fn disable_logging(self) -> Self {
        self.log_results(LevelFilter::Off)
            .log_slow_results(LevelFilter::Off, Duration::default())
            .log_warnings(LevelFilter::Off)
    }

    #[must_use]
    pub const fn log_settings(&self) -> &LogSettings {
        &self.log_settings
    }
}
