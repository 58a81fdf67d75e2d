#![deny(unsafe_code)]
// Clippy lint configuration for CI
// - cast_*: base and site counts move between usize, u64 and f64
// - missing_*_doc: error and panic sections are documented where they are not obvious
#![allow(
    clippy::cast_precision_loss,
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::uninlined_format_args
)]

//! # methylref - methylate a reference genome at enzyme recognition sites
//!
//! This library rewrites FASTA sequences, replacing every occurrence of a recognition motif
//! with its methylated form (e.g. `GATC` → `GMTC` for Dam), to simulate methylation patterns
//! over a reference.
//!
//! ## Overview
//!
//! ### Core Functionality
//!
//! - **[`recognition`]** - The closed table of recognition profiles and their motif rules
//! - **[`scanner`]** - The sliding-window motif replacement
//!
//! ### Utilities
//!
//! - **[`fasta_io`]** - FASTA reading and writing (plain, gzip, stdin/stdout)
//! - **[`metrics`]** - Per-record methylation metrics and TSV output
//! - **[`validation`]** - Input validation for parameters and files
//! - **[`progress`]** - Progress logging
//! - **[`logging`]** - Formatting helpers and run summaries
//! - **[`errors`]** - Error types
//!
//! ## Quick Start
//!
//! ```
//! use methylref_lib::recognition::lookup_profile;
//! use methylref_lib::scanner::Scanner;
//!
//! # fn main() -> anyhow::Result<()> {
//! let recognition = lookup_profile("dcm")?;
//! let scanner = Scanner::for_recognition(recognition)?;
//!
//! let result = scanner.scan(b"CCAGGCCTGG");
//! assert_eq!(result.bases, b"CMAGGCMTGG");
//! assert_eq!(result.sites, 2);
//! # Ok(())
//! # }
//! ```

pub mod errors;
pub mod fasta_io;
pub mod logging;
pub mod metrics;
pub mod progress;
pub mod recognition;
pub mod scanner;
pub mod validation;

pub use errors::{MethylError, Result};
pub use recognition::{MotifRule, Recognition, lookup_profile};
pub use scanner::{OverlapPolicy, ScanResult, Scanner, apply_scan};
