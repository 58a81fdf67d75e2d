//! Custom error types for methylref operations.

use thiserror::Error;

/// Result type alias for methylref operations
pub type Result<T> = std::result::Result<T, MethylError>;

/// Error type for methylref operations
#[derive(Error, Debug)]
pub enum MethylError {
    /// The requested recognition profile is not one of the built-in profiles
    #[error("unknown recognition: {name}")]
    UnknownProfile {
        /// The identifier that was requested
        name: String,
    },

    /// A rule list that cannot be scanned (empty, or motifs of differing lengths)
    #[error("Invalid recognition profile: {reason}")]
    InvalidProfile {
        /// Explanation of which invariant was violated
        reason: String,
    },

    /// Invalid parameter value provided
    #[error("Invalid parameter '{parameter}': {reason}")]
    InvalidParameter {
        /// The parameter name
        parameter: String,
        /// Explanation of why it's invalid
        reason: String,
    },

    /// File format error
    #[error("Invalid {file_type} file '{path}': {reason}")]
    InvalidFileFormat {
        /// Type of file (e.g., "Input FASTA")
        file_type: String,
        /// Path to the file
        path: String,
        /// Explanation of the problem
        reason: String,
    },
}
