//! Store configuration.
use std::time::Duration;

/// Quiet period the guardian waits for before filtering.
pub const DEFAULT_DEBOUNCE_MS: u64 = 400;
/// Pause between two removals of a clear pass.
pub const DEFAULT_CLEAR_INTERVAL_MS: u64 = 80;
/// Names containing this pattern are removed by the guardian.
pub const DEFAULT_BAD_PATTERN: &str = "4";

/// Timing and filtering parameters shared by the view and the guardian.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    /// Guardian quiet period, restarted by every change of the list
    pub debounce: Duration,
    /// Pause before each removal of `clear_all` except the first one
    pub clear_interval: Duration,
    /// Substring marking a name as bad
    pub bad_pattern: String,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            debounce: Duration::from_millis(DEFAULT_DEBOUNCE_MS),
            clear_interval: Duration::from_millis(DEFAULT_CLEAR_INTERVAL_MS),
            bad_pattern: DEFAULT_BAD_PATTERN.to_string(),
        }
    }
}

impl StoreConfig {
    /// Sets the guardian quiet period
    pub fn with_debounce(self, debounce: Duration) -> Self {
        Self { debounce, ..self }
    }

    /// Sets the pause between two removals of a clear pass
    pub fn with_clear_interval(self, clear_interval: Duration) -> Self {
        Self { clear_interval, ..self }
    }

    /// Sets the substring marking a name as bad
    pub fn with_bad_pattern(self, bad_pattern: impl Into<String>) -> Self {
        Self { bad_pattern: bad_pattern.into(), ..self }
    }

    /// Whether the guardian should remove `name`.
    pub fn is_bad(&self, name: &str) -> bool {
        name.contains(self.bad_pattern.as_str())
    }
}
