//! Package manifest

use contentlib_core::{ContentError, Result, SourceMetadata};
use semver::Version;
use serde::{Deserialize, Serialize};

/// Metadata identifying a content package
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PackageManifest {
    /// Package name
    pub name: String,

    /// Package author
    pub author: String,

    /// Semantic version of the package
    pub version: Version,

    /// Optional description
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Optional project page
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub website_url: Option<String>,
}

impl PackageManifest {
    pub fn new(name: impl Into<String>, author: impl Into<String>, version: Version) -> Self {
        Self {
            name: name.into(),
            author: author.into(),
            version,
            description: None,
            website_url: None,
        }
    }

    /// Globally unique identifier, `author-name`
    pub fn identifier(&self) -> String {
        format!("{}-{}", self.author, self.name)
    }

    /// Validate required fields
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(ContentError::InvalidPackage("Manifest name cannot be empty".to_string()));
        }

        if self.author.trim().is_empty() {
            return Err(ContentError::InvalidPackage("Manifest author cannot be empty".to_string()));
        }

        Ok(())
    }

    /// Metadata for the content source this package becomes
    pub fn source_metadata(&self) -> SourceMetadata {
        SourceMetadata::package(self.name.clone(), self.version.to_string(), self.identifier())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identifier() {
        let manifest = PackageManifest::new("MoreCarts", "Zehs", Version::new(1, 2, 0));
        assert_eq!(manifest.identifier(), "Zehs-MoreCarts");

        let metadata = manifest.source_metadata();
        assert_eq!(metadata.guid, "Zehs-MoreCarts");
        assert_eq!(metadata.version, "1.2.0");
    }

    #[test]
    fn test_validate_requires_name_and_author() {
        let manifest = PackageManifest::new(" ", "Zehs", Version::new(1, 0, 0));
        assert!(matches!(manifest.validate(), Err(ContentError::InvalidPackage(_))));

        let manifest = PackageManifest::new("MoreCarts", "", Version::new(1, 0, 0));
        assert!(manifest.validate().is_err());
    }

    #[test]
    fn test_deserialize_manifest() {
        let json = r#"{"name": "MoreCarts", "author": "Zehs", "version": "1.0.0"}"#;
        let manifest: PackageManifest = serde_json::from_str(json).unwrap();
        assert_eq!(manifest.version, Version::new(1, 0, 0));
        assert!(manifest.description.is_none());
    }
}
