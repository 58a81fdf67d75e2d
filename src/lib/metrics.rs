//! Per-record and per-run methylation metrics.
//!
//! [`RecordMetric`] rows are optionally written as a TSV (one row per FASTA record) and are
//! folded into a [`MethylationSummary`] that is logged when a run completes.

use anyhow::{Context, Result};
use fgoxide::io::DelimFile;
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::recognition::Recognition;

/// A metric type that can be serialized to TSV files.
pub trait Metric: Serialize + for<'de> Deserialize<'de> + Clone + Default {
    /// Human-readable name for this metric type, used in error messages.
    fn metric_name() -> &'static str;
}

/// Methylation counts for one FASTA record.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordMetric {
    /// Record name (the first word of the definition line).
    pub name: String,
    /// The recognition profile applied.
    pub recognition: String,
    /// Number of bases in the record.
    pub length: u64,
    /// Number of windows that matched a motif and were replaced.
    pub methylated_sites: u64,
}

impl RecordMetric {
    /// Creates the metric row for a record scanned with `recognition`.
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        recognition: Recognition,
        length: usize,
        sites: usize,
    ) -> Self {
        Self {
            name: name.into(),
            recognition: recognition.name().to_string(),
            length: length as u64,
            methylated_sites: sites as u64,
        }
    }
}

impl Metric for RecordMetric {
    fn metric_name() -> &'static str {
        "record methylation"
    }
}

/// Totals over all records of a run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MethylationSummary {
    /// Records processed.
    pub records: u64,
    /// Bases processed.
    pub bases: u64,
    /// Windows replaced.
    pub methylated_sites: u64,
    /// Records without a single replaced window.
    pub records_without_sites: u64,
}

impl MethylationSummary {
    /// Creates an empty summary.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds one record's counts.
    pub fn add(&mut self, metric: &RecordMetric) {
        self.records += 1;
        self.bases += metric.length;
        self.methylated_sites += metric.methylated_sites;
        if metric.methylated_sites == 0 {
            self.records_without_sites += 1;
        }
    }

    /// Methylated sites per kilobase, or 0 when no bases were seen.
    #[must_use]
    pub fn sites_per_kb(&self) -> f64 {
        if self.bases == 0 {
            0.0
        } else {
            self.methylated_sites as f64 * 1000.0 / self.bases as f64
        }
    }
}

/// Write metrics to a TSV file.
///
/// # Errors
/// Returns an error if the file cannot be created or written to
pub fn write_metrics<P: AsRef<Path>, T: Metric>(path: P, metrics: &[T]) -> Result<()> {
    let path_ref = path.as_ref();
    DelimFile::default().write_tsv(&path_ref, metrics).with_context(|| {
        format!("Failed to write {} metrics: {}", T::metric_name(), path_ref.display())
    })
}
