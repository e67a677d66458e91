//! Content sources
//!
//! A source is the attribution unit that owns content: a loaded package or a
//! code plugin. Sources are equal iff their identifiers match.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::hash::{Hash, Hasher};

/// Origin of a source
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceKind {
    /// Content package loaded from disk
    Package,
    /// Code plugin registering content directly
    Plugin,
}

/// Descriptive metadata used to create a source
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceMetadata {
    pub name: String,
    pub version: String,
    pub guid: String,
    pub kind: SourceKind,
}

impl SourceMetadata {
    pub fn package(name: impl Into<String>, version: impl Into<String>, guid: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            version: version.into(),
            guid: guid.into(),
            kind: SourceKind::Package,
        }
    }

    pub fn plugin(name: impl Into<String>, version: impl Into<String>, guid: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            version: version.into(),
            guid: guid.into(),
            kind: SourceKind::Plugin,
        }
    }
}

/// Content source
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContentSource {
    name: String,
    version: String,
    guid: String,
    kind: SourceKind,
}

impl ContentSource {
    pub fn new(metadata: SourceMetadata) -> Self {
        Self {
            name: metadata.name,
            version: metadata.version,
            guid: metadata.guid,
            kind: metadata.kind,
        }
    }

    /// Display name
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    /// Globally unique identifier; the source's identity
    pub fn guid(&self) -> &str {
        &self.guid
    }

    pub fn kind(&self) -> SourceKind {
        self.kind
    }
}

impl PartialEq for ContentSource {
    fn eq(&self, other: &Self) -> bool {
        self.guid == other.guid
    }
}

impl Eq for ContentSource {}

impl Hash for ContentSource {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.guid.hash(state);
    }
}

impl fmt::Display for ContentSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} ({})", self.name, self.version, self.guid)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sources_equal_by_guid() {
        let a = ContentSource::new(SourceMetadata::package("Pack", "1.0.0", "author-pack"));
        let b = ContentSource::new(SourceMetadata::plugin("Renamed", "2.0.0", "author-pack"));
        let c = ContentSource::new(SourceMetadata::package("Pack", "1.0.0", "author-other"));

        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn test_source_display() {
        let source = ContentSource::new(SourceMetadata::package("Pack", "1.2.0", "author-pack"));
        assert_eq!(source.to_string(), "Pack 1.2.0 (author-pack)");
    }
}
