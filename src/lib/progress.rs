//! Interval-based progress logging.
//!
//! Records are written one at a time from the main thread, so the tracker keeps a plain
//! counter and is updated through `&mut self`.

use log::info;

/// Logs a progress line each time the running count crosses a multiple of the interval.
///
/// # Example
/// ```
/// use methylref_lib::progress::ProgressTracker;
///
/// let mut tracker = ProgressTracker::new("Methylated records").with_interval(100);
/// for _ in 0..250 {
///     tracker.log_if_needed(1); // Logs at 100, 200
/// }
/// tracker.log_final(); // Logs "Methylated records 250 (complete)"
/// ```
pub struct ProgressTracker {
    interval: u64,
    message: String,
    count: u64,
}

impl ProgressTracker {
    /// Creates a tracker with the default interval of 1,000.
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self { interval: 1_000, message: message.into(), count: 0 }
    }

    /// Sets the logging interval. An interval of zero is treated as one.
    #[must_use]
    pub fn with_interval(mut self, interval: u64) -> Self {
        self.interval = interval.max(1);
        self
    }

    /// Adds `additional` to the count, logging once per interval boundary crossed.
    ///
    /// Returns `true` if the count now sits exactly on an interval boundary.
    pub fn log_if_needed(&mut self, additional: u64) -> bool {
        let prev = self.count;
        self.count += additional;

        for i in (prev / self.interval + 1)..=(self.count / self.interval) {
            info!("{} {}", self.message, i * self.interval);
        }

        self.count > 0 && self.count % self.interval == 0
    }

    /// Logs the final count unless the last boundary already reported it.
    pub fn log_final(&mut self) {
        if !self.log_if_needed(0) && self.count > 0 {
            info!("{} {} (complete)", self.message, self.count);
        }
    }

    /// Items counted so far.
    #[must_use]
    pub fn count(&self) -> u64 {
        self.count
    }
}
