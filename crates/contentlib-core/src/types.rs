//! Core type definitions

use serde::{Deserialize, Serialize};
use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;
use ulid::Ulid;

/// Identity of a live game object (template or spawned copy)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct InstanceId(Ulid);

impl InstanceId {
    /// Generate a new InstanceId
    pub fn new() -> Self {
        Self(Ulid::new())
    }

    /// Get the underlying ULID
    pub fn as_ulid(&self) -> &Ulid {
        &self.0
    }
}

impl Default for InstanceId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for InstanceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Difficulty tier an enemy is spawned into
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Difficulty {
    Difficulty1,
    Difficulty2,
    Difficulty3,
}

impl Default for Difficulty {
    fn default() -> Self {
        Self::Difficulty1
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Difficulty1 => write!(f, "Difficulty1"),
            Self::Difficulty2 => write!(f, "Difficulty2"),
            Self::Difficulty3 => write!(f, "Difficulty3"),
        }
    }
}

impl FromStr for Difficulty {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "difficulty1" | "1" => Ok(Self::Difficulty1),
            "difficulty2" | "2" => Ok(Self::Difficulty2),
            "difficulty3" | "3" => Ok(Self::Difficulty3),
            _ => Err(format!("Invalid difficulty: {}", s)),
        }
    }
}

/// Kinds of content a source can supply
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContentKind {
    Item,
    Enemy,
    Valuable,
}

impl ContentKind {
    /// Get the string representation of the kind
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Item => "item",
            Self::Enemy => "enemy",
            Self::Valuable => "valuable",
        }
    }
}

impl fmt::Display for ContentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Case-insensitive identifier
///
/// Keeps the spelling it was created with for display, but compares and
/// hashes on the lowercased form so `"Foo"`, `"foo"` and `"FOO"` are one key.
#[derive(Debug, Clone)]
pub struct TemplateKey {
    original: String,
    folded: String,
}

impl TemplateKey {
    /// Create a key from any identifier spelling
    pub fn new(id: impl Into<String>) -> Self {
        let original = id.into();
        let folded = original.to_lowercase();
        Self { original, folded }
    }

    /// The identifier as it was first spelled
    pub fn as_str(&self) -> &str {
        &self.original
    }

    /// Compare against a raw identifier without allocating a key
    pub fn matches(&self, other: &str) -> bool {
        self.folded == other.to_lowercase()
    }
}

impl PartialEq for TemplateKey {
    fn eq(&self, other: &Self) -> bool {
        self.folded == other.folded
    }
}

impl Eq for TemplateKey {}

impl Hash for TemplateKey {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.folded.hash(state);
    }
}

impl fmt::Display for TemplateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.original)
    }
}

impl From<&str> for TemplateKey {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

/// Case-insensitive comparison used for every content key
pub fn keys_match(a: &str, b: &str) -> bool {
    a == b || a.to_lowercase() == b.to_lowercase()
}
