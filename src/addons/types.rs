//! Add-on type definitions.
//!
//! Core data structures shared by the ingestion pipeline: addon identity,
//! content categories and the error type.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Raw bytes of a downloaded addon archive.
pub type RawArchive = Vec<u8>;

/// Folders inside an archive that never hold addon content.
pub const IGNORED_FOLDERS: [&str; 2] = ["node_modules", ".git"];

/// Identity of one addon: the `owner/repo` pair of its source repository.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AddonSpecifier {
    owner: String,
    repo: String,
}

impl AddonSpecifier {
    /// Creates a specifier from already-validated parts.
    ///
    /// Use [`crate::addons::parse_specifier`] for untrusted input.
    pub(crate) fn new(owner: &str, repo: &str) -> Self {
        debug_assert!(!owner.is_empty() && !owner.contains('/'));
        debug_assert!(!repo.is_empty() && !repo.contains('/'));
        Self {
            owner: owner.to_string(),
            repo: repo.to_string(),
        }
    }

    /// Repository owner (user or organisation).
    #[must_use]
    pub fn owner(&self) -> &str {
        &self.owner
    }

    /// Repository name.
    #[must_use]
    pub fn repo(&self) -> &str {
        &self.repo
    }

    /// Returns the `owner/repo` form used as the extraction namespace.
    #[must_use]
    pub fn namespace(&self) -> String {
        format!("{}/{}", self.owner, self.repo)
    }
}

impl fmt::Display for AddonSpecifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.repo)
    }
}

/// Kind of content an addon document provides.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    /// Playable classes.
    Classes,
    /// Location name parts, descriptions and adjectives.
    Locations,
    /// Monster definitions.
    Monsters,
    /// Character name parts.
    Names,
    /// Playable races.
    Races,
    /// Weapon types and weapons.
    Weapons,
}

impl Category {
    /// Every category, in declaration order.
    pub const ALL: [Category; 6] = [
        Self::Classes,
        Self::Locations,
        Self::Monsters,
        Self::Names,
        Self::Races,
        Self::Weapons,
    ];

    /// Returns the name used in documents and namespaces.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Classes => "classes",
            Self::Locations => "locations",
            Self::Monsters => "monsters",
            Self::Names => "names",
            Self::Races => "races",
            Self::Weapons => "weapons",
        }
    }

    /// Parses a category name.
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.as_str() == value)
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Add-on error types.
///
/// Every variant is fatal to the addon it occurred in and to the batch that
/// addon belongs to.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AddonError {
    /// Malformed `owner/repo` token.
    #[error("Invalid Addon Name: {0}")]
    InvalidSpecifier(String),

    /// Network-level failure (DNS, connection refused, reset).
    #[error("Network error: {0}")]
    Transport(String),

    /// The source host answered with something other than 200.
    #[error("GitHub responded with: {status}")]
    Remote { status: u16 },

    /// Extraction target is not an `owner/repo` namespace.
    #[error("Invalid or unrecognized namespace: {0}")]
    Namespace(String),

    /// The downloaded bytes are not a readable zip archive.
    #[error("Zip Error: {0}")]
    Archive(String),

    /// An archive entry failed schema validation or JSON parsing.
    #[error("Validation Error: {entry_path} - {detail}")]
    Validation { entry_path: String, detail: String },

    /// Two documents of the same type in one category folder.
    #[error("{namespace} has more than one {kind}")]
    DuplicateType { namespace: String, kind: Category },

    /// Two entities resolved to the same namespaced id.
    #[error("Duplicate entity id: {id}")]
    DuplicateEntity { id: String },

    /// A load unit panicked or was cancelled before reporting.
    #[error("Addon task failed: {0}")]
    TaskFailed(String),
}

impl AddonError {
    /// Returns true if this is a remote error with the given HTTP status.
    #[must_use]
    pub fn is_remote_status(&self, status: u16) -> bool {
        matches!(self, Self::Remote { status: s } if *s == status)
    }
}
