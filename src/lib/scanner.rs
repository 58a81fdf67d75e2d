//! Sliding-window replacement of recognition motifs with their methylated forms.
//!
//! A [`Scanner`] slides a window of the profile's motif width over a sequence one base at a
//! time, including the final window that ends on the last base. At each offset the rules are
//! tried in table order and the first whose source equals the window has its replacement
//! written over that window. The scan never skips past a match, so windows that start inside a
//! previous match are still evaluated.
//!
//! Where a window is read from is governed by the [`OverlapPolicy`]. For the built-in profiles
//! no motif overlaps itself or another motif in the same profile, so both policies produce the
//! same output; they only diverge for self-overlapping rule lists.
//!
//! # Example
//!
//! ```
//! use methylref_lib::recognition::Recognition;
//! use methylref_lib::scanner::apply_scan;
//!
//! assert_eq!(apply_scan(Recognition::Cpg.rules(), b"ACGT").unwrap(), b"AMGT");
//! assert_eq!(apply_scan(Recognition::Uracil.rules(), b"TTAT").unwrap(), b"UUAU");
//! ```

use std::fmt;
use std::str::FromStr;

use crate::errors::{MethylError, Result};
use crate::recognition::{MotifRule, Recognition};

/// Which buffer windows are read from while the output is being written.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OverlapPolicy {
    /// Every window is read from the unmodified input. A later overlapping replacement
    /// overwrites bases written by an earlier one.
    #[default]
    Snapshot,
    /// Windows are read from the output buffer, so a replacement at offset `i` is visible to
    /// the windows at `i + 1 ..`.
    InPlace,
}

impl OverlapPolicy {
    /// The identifier accepted on the command line.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            OverlapPolicy::Snapshot => "snapshot",
            OverlapPolicy::InPlace => "in-place",
        }
    }
}

impl fmt::Display for OverlapPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for OverlapPolicy {
    type Err = MethylError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "snapshot" => Ok(OverlapPolicy::Snapshot),
            "in-place" => Ok(OverlapPolicy::InPlace),
            _ => Err(MethylError::InvalidParameter {
                parameter: "overlap".to_string(),
                reason: format!("expected 'snapshot' or 'in-place', got '{s}'"),
            }),
        }
    }
}

/// The methylated sequence produced by a scan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanResult {
    /// Output bases, the same length as the input.
    pub bases: Vec<u8>,
    /// Number of windows that matched a rule and were replaced.
    pub sites: usize,
}

/// A validated rule list ready to scan sequences.
#[derive(Debug, Clone, Copy)]
pub struct Scanner<'a> {
    rules: &'a [MotifRule],
    width: usize,
    policy: OverlapPolicy,
}

impl<'a> Scanner<'a> {
    /// Builds a scanner over `rules` using [`OverlapPolicy::Snapshot`].
    ///
    /// # Errors
    ///
    /// Returns [`MethylError::InvalidProfile`] if `rules` is empty, a motif is empty, a rule's
    /// replacement differs in length from its source, or the rules do not all share one width.
    pub fn new(rules: &'a [MotifRule]) -> Result<Self> {
        let Some(first) = rules.first() else {
            return Err(MethylError::InvalidProfile { reason: "no rules".to_string() });
        };
        let width = first.len();
        if width == 0 {
            return Err(MethylError::InvalidProfile { reason: "empty motif".to_string() });
        }

        for rule in rules {
            if rule.source().len() != rule.replacement().len() {
                return Err(MethylError::InvalidProfile {
                    reason: format!("rule {rule} changes the motif length"),
                });
            }
            if rule.len() != width {
                return Err(MethylError::InvalidProfile {
                    reason: format!(
                        "rule {rule} has length {} but the profile width is {width}",
                        rule.len()
                    ),
                });
            }
        }

        Ok(Self { rules, width, policy: OverlapPolicy::default() })
    }

    /// Sets the overlap policy.
    #[must_use]
    pub fn with_policy(mut self, policy: OverlapPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Scan window width.
    #[must_use]
    pub fn width(&self) -> usize {
        self.width
    }

    /// The overlap policy in effect.
    #[must_use]
    pub fn policy(&self) -> OverlapPolicy {
        self.policy
    }

    /// Returns the replacement of the first rule whose source equals `window`.
    #[inline]
    fn first_match(&self, window: &[u8]) -> Option<&'static [u8]> {
        self.rules.iter().find(|rule| rule.source() == window).map(|rule| rule.replacement())
    }

    /// Methylates `input`, returning the new bases and the number of replaced windows.
    #[must_use]
    pub fn scan(&self, input: &[u8]) -> ScanResult {
        let mut bases = input.to_vec();
        let mut sites = 0;

        if input.len() < self.width {
            return ScanResult { bases, sites };
        }

        for start in 0..=input.len() - self.width {
            let end = start + self.width;
            let window = match self.policy {
                OverlapPolicy::Snapshot => &input[start..end],
                OverlapPolicy::InPlace => &bases[start..end],
            };
            if let Some(replacement) = self.first_match(window) {
                bases[start..end].copy_from_slice(replacement);
                sites += 1;
            }
        }

        ScanResult { bases, sites }
    }
}

impl Scanner<'static> {
    /// Builds a scanner for a built-in profile.
    ///
    /// # Errors
    ///
    /// Only fails if the built-in table is misconfigured.
    pub fn for_recognition(recognition: Recognition) -> Result<Self> {
        Self::new(recognition.rules())
    }
}

/// Methylates `input` with `rules` under [`OverlapPolicy::Snapshot`].
///
/// # Errors
///
/// Returns [`MethylError::InvalidProfile`] if the rules cannot form a scanner.
pub fn apply_scan(rules: &[MotifRule], input: &[u8]) -> Result<Vec<u8>> {
    Ok(Scanner::new(rules)?.scan(input).bases)
}
