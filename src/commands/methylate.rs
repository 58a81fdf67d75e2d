//! Methylate a reference FASTA at the recognition sites of a chosen profile.
//!
//! Every record is scanned with the profile's motif rules and written, in input order, with
//! its original definition line. The profile is resolved before the input is opened, so an
//! unknown `--recognition` fails without writing anything.

use anyhow::{Context, Result};
use clap::Parser;
use log::{debug, info};
use methylref_lib::fasta_io::{
    FastaReader, FastaWriter, MethylatedRecord, fasta_records, methylate_record, open_fasta_reader,
    record_name,
};
use methylref_lib::logging::{OperationTimer, log_methylation_summary};
use methylref_lib::metrics::{MethylationSummary, RecordMetric, write_metrics};
use methylref_lib::progress::ProgressTracker;
use methylref_lib::recognition::{Recognition, lookup_profile};
use methylref_lib::scanner::{OverlapPolicy, Scanner};
use noodles::fasta;
use rayon::prelude::*;
use std::path::PathBuf;

use crate::commands::command::Command;
use crate::commands::common::{FastaIoOptions, ThreadingOptions};

/// Methylate a reference FASTA.
#[derive(Debug, Parser)]
#[command(
    name = "methylref",
    version,
    about = "Methylate a reference FASTA at enzyme recognition sites",
    long_about = r#"
Modify a reference genome to methylate positions according to a recognition set.

Every window of the profile's motif width is compared, left to right, against the profile's
motifs in order; the first exact (case-sensitive) match is replaced by its methylated form.
Records are written to stdout (or --output) in input order with their headers unchanged.

Recognition sets:
  cpg      CG    -> MG
  dam      GATC  -> GMTC
  dcm      CCAGG -> CMAGG, CCTGG -> CMTGG
  sin395   GATC  -> GATM
  pspjdri  CCGG  -> MCGG
  uracil   T     -> U

Example usage:
  methylref ref.fa --recognition cpg > ref.cpg.fa
  methylref ref.fa.gz --recognition dcm -o ref.dcm.fa.gz --metrics dcm.tsv
  zcat ref.fa.gz | methylref - --recognition dam --threads 4 > ref.dam.fa
"#
)]
pub struct Methylate {
    /// Input/output options
    #[command(flatten)]
    pub io: FastaIoOptions,

    /// The recognition set: cpg, dam, dcm, sin395, pspjdri or uracil
    #[arg(short = 'r', long = "recognition", value_name = "NAME")]
    pub recognition: String,

    /// Whether overlapping windows are read from the input (snapshot) or from the partially
    /// methylated output (in-place)
    #[arg(long = "overlap", default_value_t = OverlapPolicy::Snapshot)]
    pub overlap: OverlapPolicy,

    /// Optional TSV of per-record methylation counts
    #[arg(short = 'm', long = "metrics")]
    pub metrics: Option<PathBuf>,

    /// Threading options
    #[command(flatten)]
    pub threading: ThreadingOptions,
}

/// Collects the outputs of a run: the FASTA writer, metrics rows, and progress.
struct RunOutput {
    writer: FastaWriter,
    recognition: Recognition,
    summary: MethylationSummary,
    metrics: Option<Vec<RecordMetric>>,
    progress: ProgressTracker,
}

impl RunOutput {
    fn emit(&mut self, methylated: &MethylatedRecord) -> Result<()> {
        self.writer.write_record(&methylated.record)?;

        let metric = RecordMetric::new(
            record_name(&methylated.record),
            self.recognition,
            methylated.record.sequence().len(),
            methylated.sites,
        );
        debug!("{}: {} methylated sites", metric.name, metric.methylated_sites);
        self.summary.add(&metric);
        if let Some(metrics) = self.metrics.as_mut() {
            metrics.push(metric);
        }
        self.progress.log_if_needed(1);
        Ok(())
    }
}

impl Methylate {
    fn input_context(&self) -> String {
        format!("Failed to read FASTA record from {}", self.io.input.display())
    }

    /// Scans and writes one record at a time.
    fn run_streaming(
        &self,
        reader: &mut FastaReader,
        scanner: &Scanner<'_>,
        out: &mut RunOutput,
    ) -> Result<()> {
        for result in fasta_records(reader) {
            let record = result.with_context(|| self.input_context())?;
            out.emit(&methylate_record(scanner, &record))?;
        }
        Ok(())
    }

    /// Reads records in batches and scans each batch on a thread pool.
    fn run_parallel(
        &self,
        reader: &mut FastaReader,
        scanner: &Scanner<'_>,
        out: &mut RunOutput,
    ) -> Result<()> {
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(self.threading.num_threads())
            .build()
            .context("Failed to build rayon thread pool")?;

        let mut records = fasta_records(reader);
        loop {
            let batch: Vec<fasta::Record> = records
                .by_ref()
                .take(self.threading.batch_size)
                .collect::<std::io::Result<_>>()
                .with_context(|| self.input_context())?;
            if batch.is_empty() {
                break;
            }

            let methylated: Vec<MethylatedRecord> = pool.install(|| {
                batch.par_iter().map(|record| methylate_record(scanner, record)).collect()
            });
            for m in &methylated {
                out.emit(m)?;
            }
        }
        Ok(())
    }
}

impl Command for Methylate {
    fn execute(&self, command_line: &str) -> Result<()> {
        let recognition = lookup_profile(&self.recognition)?;
        self.io.validate()?;
        self.threading.validate()?;

        let scanner = Scanner::for_recognition(recognition)?.with_policy(self.overlap);

        debug!("Command line: {command_line}");
        info!("Input: {}", self.io.input.display());
        match &self.io.output {
            Some(output) => info!("Output: {}", output.display()),
            None => info!("Output: stdout"),
        }
        info!("Recognition: {recognition} (motif width {})", scanner.width());
        for rule in recognition.rules() {
            info!("  {rule}");
        }
        info!("Overlap policy: {}", self.overlap);
        info!("Threads: {}", self.threading.num_threads());

        let timer = OperationTimer::new("Methylating records");

        let mut reader = open_fasta_reader(&self.io.input)?;
        let writer = FastaWriter::new(self.io.output.as_deref(), self.io.line_width)?;
        let mut out = RunOutput {
            writer,
            recognition,
            summary: MethylationSummary::new(),
            metrics: self.metrics.as_ref().map(|_| Vec::new()),
            progress: ProgressTracker::new("Methylated records"),
        };

        if self.threading.is_parallel() {
            self.run_parallel(&mut reader, &scanner, &mut out)?;
        } else {
            self.run_streaming(&mut reader, &scanner, &mut out)?;
        }

        let RunOutput { writer, summary, metrics, mut progress, .. } = out;
        writer.finish()?;
        progress.log_final();

        if let (Some(path), Some(metrics)) = (&self.metrics, metrics) {
            write_metrics(path, &metrics)?;
            info!("Wrote metrics to: {}", path.display());
        }

        log_methylation_summary(&summary);
        timer.log_completion(summary.records);
        Ok(())
    }
}
