//! CLI command implementations for methylref.
//!
//! - [`methylate`] - Methylate a reference FASTA at recognition sites
//! - [`common`] - Option groups shared by commands

pub mod command;
pub mod common;
pub mod methylate;
