//! Input validation utilities
//!
//! Validation functions for command-line parameters and file paths, reporting failures as
//! [`crate::errors::MethylError`] values.

use crate::errors::{MethylError, Result};
use crate::fasta_io::is_stdin_path;
use std::path::Path;

/// Validate that a file exists
///
/// Standard input paths (`-`, `/dev/stdin`) always pass.
///
/// # Errors
/// Returns an error if the file does not exist
///
/// # Example
/// ```
/// use methylref_lib::validation::validate_file_exists;
///
/// assert!(validate_file_exists("/nonexistent/ref.fa", "Input FASTA").is_err());
/// assert!(validate_file_exists("-", "Input FASTA").is_ok());
/// ```
pub fn validate_file_exists<P: AsRef<Path>>(path: P, description: &str) -> Result<()> {
    let path_ref = path.as_ref();
    if is_stdin_path(path_ref) {
        return Ok(());
    }
    if !path_ref.exists() {
        return Err(MethylError::InvalidFileFormat {
            file_type: description.to_string(),
            path: path_ref.display().to_string(),
            reason: "File does not exist".to_string(),
        });
    }
    if path_ref.is_dir() {
        return Err(MethylError::InvalidFileFormat {
            file_type: description.to_string(),
            path: path_ref.display().to_string(),
            reason: "Path is a directory".to_string(),
        });
    }
    Ok(())
}

/// Validate that a count parameter is at least one
///
/// # Errors
/// Returns an error if `value` is zero
///
/// # Example
/// ```
/// use methylref_lib::validation::validate_positive;
///
/// assert!(validate_positive(60, "line-width").is_ok());
/// assert!(validate_positive(0, "threads").is_err());
/// ```
pub fn validate_positive(value: usize, name: &str) -> Result<()> {
    if value == 0 {
        return Err(MethylError::InvalidParameter {
            parameter: name.to_string(),
            reason: "must be >= 1".to_string(),
        });
    }
    Ok(())
}
