//! CLI options shared by command implementations.
//!
//! Argument groups here are composed into command structs with `#[command(flatten)]`.

use std::path::PathBuf;

use clap::Args;

use methylref_lib::fasta_io::DEFAULT_LINE_WIDTH;
use methylref_lib::validation::{validate_file_exists, validate_positive};

/// Records per batch when scanning on a thread pool.
pub const DEFAULT_BATCH_SIZE: usize = 64;

/// Input/output options for commands that read a FASTA and write a FASTA.
#[derive(Debug, Clone, Args)]
pub struct FastaIoOptions {
    /// Input FASTA file ('-' for stdin; .gz/.bgz are decompressed)
    #[arg(value_name = "INPUT")]
    pub input: PathBuf,

    /// Output FASTA file ('-' or omitted for stdout; .gz is compressed)
    #[arg(short = 'o', long = "output")]
    pub output: Option<PathBuf>,

    /// Number of bases per output sequence line
    #[arg(long = "line-width", default_value_t = DEFAULT_LINE_WIDTH)]
    pub line_width: usize,
}

impl FastaIoOptions {
    /// Validates that the input exists and the line width is usable.
    ///
    /// # Errors
    ///
    /// Returns an error if the input file does not exist or the line width is zero.
    pub fn validate(&self) -> anyhow::Result<()> {
        validate_file_exists(&self.input, "Input FASTA")?;
        validate_positive(self.line_width, "line-width")?;
        Ok(())
    }
}

/// Threading options for commands that can process records in parallel.
///
/// Without `--threads` (or with `--threads 1`) records are streamed one at a time. With more
/// threads, records are read in batches and scanned on a thread pool; output order always
/// matches input order.
#[derive(Debug, Clone, Args)]
pub struct ThreadingOptions {
    /// Number of worker threads
    #[arg(short = 't', long = "threads")]
    pub threads: Option<usize>,

    /// Records per batch when running with more than one thread
    #[arg(long = "batch-size", default_value_t = DEFAULT_BATCH_SIZE, hide = true)]
    pub batch_size: usize,
}

impl Default for ThreadingOptions {
    fn default() -> Self {
        Self { threads: None, batch_size: DEFAULT_BATCH_SIZE }
    }
}

impl ThreadingOptions {
    /// Creates threading options with N threads.
    #[must_use]
    pub fn new(threads: usize) -> Self {
        Self { threads: Some(threads), ..Self::default() }
    }

    /// Returns the number of threads.
    #[must_use]
    pub fn num_threads(&self) -> usize {
        self.threads.unwrap_or(1)
    }

    /// True when records should be scanned on a thread pool.
    #[must_use]
    pub fn is_parallel(&self) -> bool {
        self.num_threads() > 1
    }

    /// Validates the thread and batch counts.
    ///
    /// # Errors
    ///
    /// Returns an error if either count is zero.
    pub fn validate(&self) -> anyhow::Result<()> {
        validate_positive(self.num_threads(), "threads")?;
        validate_positive(self.batch_size, "batch-size")?;
        Ok(())
    }
}
