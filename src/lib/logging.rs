//! Formatting helpers and run summaries for log output.
//!
//! All output here goes through the `log` facade, so it lands on standard error via
//! `env_logger` and never mixes with the FASTA written to standard output.

use std::time::{Duration, Instant};

use crate::metrics::MethylationSummary;

/// Formats an integer with thousands separators.
///
/// # Examples
///
/// ```
/// use methylref_lib::logging::format_count;
///
/// assert_eq!(format_count(1234567), "1,234,567");
/// assert_eq!(format_count(123), "123");
/// ```
#[must_use]
pub fn format_count(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

/// Formats a fraction (0.0-1.0) as a percentage with `decimals` decimal places.
///
/// # Examples
///
/// ```
/// use methylref_lib::logging::format_percent;
///
/// assert_eq!(format_percent(0.9543, 2), "95.43%");
/// assert_eq!(format_percent(1.0, 0), "100%");
/// ```
#[must_use]
pub fn format_percent(value: f64, decimals: usize) -> String {
    format!("{:.decimals$}%", value * 100.0, decimals = decimals)
}

/// Formats the elapsed time of a run with its two largest units.
///
/// Zero-valued trailing units are left out and seconds are dropped once a run passes an hour.
///
/// # Examples
///
/// ```
/// use methylref_lib::logging::format_duration;
/// use std::time::Duration;
///
/// // a whole-genome pass that took a little over an hour
/// assert_eq!(format_duration(Duration::from_secs(3725)), "1h 2m");
/// assert_eq!(format_duration(Duration::from_secs(42)), "42s");
/// ```
#[must_use]
pub fn format_duration(duration: Duration) -> String {
    let total = duration.as_secs();
    let (hours, minutes, seconds) = (total / 3600, total / 60 % 60, total % 60);
    let ((major, major_unit), (minor, minor_unit)) = match (hours, minutes) {
        (0, 0) => return format!("{seconds}s"),
        (0, m) => ((m, 'm'), (seconds, 's')),
        (h, m) => ((h, 'h'), (m, 'm')),
    };
    if minor == 0 {
        format!("{major}{major_unit}")
    } else {
        format!("{major}{major_unit} {minor}{minor_unit}")
    }
}

/// Formats a processing rate, switching to per-minute units below one item per second.
#[must_use]
pub fn format_rate(count: u64, duration: Duration) -> String {
    let secs = duration.as_secs_f64();
    if secs < 0.001 {
        return format!("{} records/s", format_count(count));
    }

    let rate = count as f64 / secs;
    if rate >= 1.0 {
        format!("{} records/s", format_count(rate as u64))
    } else {
        format!("{:.1} records/min", count as f64 / (secs / 60.0))
    }
}

/// Logs the totals of a methylation run.
pub fn log_methylation_summary(summary: &MethylationSummary) {
    log::info!("Methylation Summary:");
    log::info!("  Records: {}", format_count(summary.records));
    log::info!("  Bases: {}", format_count(summary.bases));
    log::info!("  Methylated sites: {}", format_count(summary.methylated_sites));

    if summary.bases > 0 {
        log::info!("  Sites per kb: {:.2}", summary.sites_per_kb());
    }
    if summary.records_without_sites > 0 {
        let fraction = summary.records_without_sites as f64 / summary.records as f64;
        log::info!(
            "  Records without sites: {} ({})",
            format_count(summary.records_without_sites),
            format_percent(fraction, 2)
        );
    }
}

/// Times an operation and logs its start and completion.
///
/// # Examples
///
/// ```no_run
/// use methylref_lib::logging::OperationTimer;
///
/// let timer = OperationTimer::new("Methylating records");
/// // ... do work ...
/// timer.log_completion(42);
/// ```
pub struct OperationTimer {
    operation: String,
    start_time: Instant,
}

impl OperationTimer {
    /// Creates a new operation timer and logs the start.
    #[must_use]
    pub fn new(operation: &str) -> Self {
        log::info!("{operation} ...");
        Self { operation: operation.to_string(), start_time: Instant::now() }
    }

    /// Time since the timer was created.
    #[must_use]
    pub fn elapsed(&self) -> Duration {
        self.start_time.elapsed()
    }

    /// Logs the completion with item count and rate.
    pub fn log_completion(&self, count: u64) {
        let duration = self.elapsed();
        log::info!(
            "{} completed: {} records in {} ({})",
            self.operation,
            format_count(count),
            format_duration(duration),
            format_rate(count, duration)
        );
    }
}
