//! Integration tests for the methylref binary.
//!
//! These tests run the compiled binary end to end on small FASTA files and check the
//! methylated output, exit status and logging.

mod test_methylate_command;
