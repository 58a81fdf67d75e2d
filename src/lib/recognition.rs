//! The built-in table of methylation recognition profiles.
//!
//! Each profile names an enzyme or modification convention and carries an ordered list of
//! [`MotifRule`]s. Every rule in a profile has the same motif length, which is the width of
//! the window the [`crate::scanner`] slides over a sequence.
//!
//! | Profile   | Rules                              |
//! |-----------|------------------------------------|
//! | `cpg`     | `CG` → `MG`                        |
//! | `dam`     | `GATC` → `GMTC`                    |
//! | `dcm`     | `CCAGG` → `CMAGG`, `CCTGG` → `CMTGG` |
//! | `sin395`  | `GATC` → `GATM`                    |
//! | `pspjdri` | `CCGG` → `MCGG`                    |
//! | `uracil`  | `T` → `U`                          |

use std::fmt;
use std::str::FromStr;

use crate::errors::{MethylError, Result};

/// A literal motif and the methylated motif that replaces it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MotifRule {
    source: &'static [u8],
    replacement: &'static [u8],
}

impl MotifRule {
    /// Creates a rule replacing `source` with `replacement`.
    ///
    /// Lengths are not checked here; [`crate::scanner::Scanner::new`] rejects rule lists whose
    /// source and replacement lengths differ.
    #[must_use]
    pub const fn new(source: &'static [u8], replacement: &'static [u8]) -> Self {
        Self { source, replacement }
    }

    /// The unmethylated motif matched against the sequence.
    #[must_use]
    pub const fn source(&self) -> &'static [u8] {
        self.source
    }

    /// The motif written in place of a match.
    #[must_use]
    pub const fn replacement(&self) -> &'static [u8] {
        self.replacement
    }

    /// Motif length.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.source.len()
    }

    /// True for a rule with an empty motif.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.source.is_empty()
    }
}

impl fmt::Display for MotifRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}->{}",
            String::from_utf8_lossy(self.source),
            String::from_utf8_lossy(self.replacement)
        )
    }
}

const CPG_RULES: &[MotifRule] = &[MotifRule::new(b"CG", b"MG")];
const DAM_RULES: &[MotifRule] = &[MotifRule::new(b"GATC", b"GMTC")];
const DCM_RULES: &[MotifRule] =
    &[MotifRule::new(b"CCAGG", b"CMAGG"), MotifRule::new(b"CCTGG", b"CMTGG")];
const SIN395_RULES: &[MotifRule] = &[MotifRule::new(b"GATC", b"GATM")];
const PSPJDRI_RULES: &[MotifRule] = &[MotifRule::new(b"CCGG", b"MCGG")];
const URACIL_RULES: &[MotifRule] = &[MotifRule::new(b"T", b"U")];

/// A named recognition profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Recognition {
    /// CpG dinucleotides.
    Cpg,
    /// Dam methyltransferase (`GATC`, adenine).
    Dam,
    /// Dcm methyltransferase (`CCWGG`, internal cytosine).
    Dcm,
    /// `GATC` methylated at the cytosine.
    Sin395,
    /// PspJDRI (`CCGG`, outer cytosine).
    Pspjdri,
    /// Uracil in place of every thymine.
    Uracil,
}

impl Recognition {
    /// All profiles, in table order.
    pub const ALL: [Recognition; 6] = [
        Recognition::Cpg,
        Recognition::Dam,
        Recognition::Dcm,
        Recognition::Sin395,
        Recognition::Pspjdri,
        Recognition::Uracil,
    ];

    /// The identifier accepted on the command line.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Recognition::Cpg => "cpg",
            Recognition::Dam => "dam",
            Recognition::Dcm => "dcm",
            Recognition::Sin395 => "sin395",
            Recognition::Pspjdri => "pspjdri",
            Recognition::Uracil => "uracil",
        }
    }

    /// The ordered rules for this profile. Earlier rules win when more than one matches.
    #[must_use]
    pub const fn rules(self) -> &'static [MotifRule] {
        match self {
            Recognition::Cpg => CPG_RULES,
            Recognition::Dam => DAM_RULES,
            Recognition::Dcm => DCM_RULES,
            Recognition::Sin395 => SIN395_RULES,
            Recognition::Pspjdri => PSPJDRI_RULES,
            Recognition::Uracil => URACIL_RULES,
        }
    }

    /// Scan window width, taken from the first rule.
    #[must_use]
    pub const fn width(self) -> usize {
        self.rules()[0].len()
    }
}

impl fmt::Display for Recognition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Recognition {
    type Err = MethylError;

    fn from_str(s: &str) -> Result<Self> {
        Recognition::ALL
            .into_iter()
            .find(|r| r.name() == s)
            .ok_or_else(|| MethylError::UnknownProfile { name: s.to_string() })
    }
}

/// Looks up a profile by its identifier.
///
/// # Errors
///
/// Returns [`MethylError::UnknownProfile`] if `name` is not one of `cpg`, `dam`, `dcm`,
/// `sin395`, `pspjdri` or `uracil`.
///
/// # Examples
///
/// ```
/// use methylref_lib::recognition::{Recognition, lookup_profile};
///
/// assert_eq!(lookup_profile("dam").unwrap(), Recognition::Dam);
/// assert!(lookup_profile("xyz").is_err());
/// ```
pub fn lookup_profile(name: &str) -> Result<Recognition> {
    name.parse()
}
