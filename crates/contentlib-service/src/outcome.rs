//! Registration outcomes
//!
//! Rejections are data problems in a content package. They are logged where
//! they happen and returned as values so one bad package never aborts the
//! registration of others.

use std::fmt;

/// Why a registration was refused
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RejectReason {
    /// Declared asset name differs from the template's name
    NameMismatch { declared: String, actual: String },
    /// A built-in template already uses the registration key
    ExistsInResources,
    /// Content with the same key is already queued for this kind
    AlreadyRegistered,
    /// No spawn template carries an enemy root marker
    MissingEnemyParent,
    /// The registration phase for this kind has closed
    PhaseClosed,
}

impl fmt::Display for RejectReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NameMismatch { declared, actual } => write!(
                f,
                "asset name \"{}\" does not match the prefab name \"{}\"",
                declared, actual
            ),
            Self::ExistsInResources => f.write_str("prefab already exists in resources with the same name"),
            Self::AlreadyRegistered => f.write_str("already registered"),
            Self::MissingEnemyParent => f.write_str("no enemy prefab found in spawn objects list"),
            Self::PhaseClosed => f.write_str("enemies can only be registered before the enemy phase ends"),
        }
    }
}

/// Result of a registration call that did not fail outright
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Registration {
    Registered,
    Rejected(RejectReason),
}

impl Registration {
    pub fn is_registered(&self) -> bool {
        matches!(self, Self::Registered)
    }

    pub fn rejection(&self) -> Option<&RejectReason> {
        match self {
            Self::Rejected(reason) => Some(reason),
            Self::Registered => None,
        }
    }
}

/// Summary of one flush to a host system
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FlushSummary {
    /// Content the host accepted during this flush
    pub announced: usize,
    /// Content the host refused during this flush
    pub refused: usize,
    /// Content skipped without being offered to the host
    pub skipped: usize,
}
