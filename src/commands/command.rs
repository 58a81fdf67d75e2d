//! Command trait definition for CLI commands.

use anyhow::Result;

/// Trait implemented by methylref CLI commands.
///
/// `command_line` is the full invocation, logged for provenance.
pub trait Command {
    #[allow(clippy::missing_errors_doc)]
    fn execute(&self, command_line: &str) -> Result<()>;
}
