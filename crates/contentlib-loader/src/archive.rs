//! Package archives
//!
//! The archive format is pluggable through [`ArchiveReader`]. The bundled
//! [`JsonArchiveReader`] reads packages stored as a JSON asset list.

use contentlib_core::{ContentError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::descriptor::{ContentDescriptor, EnemyContent, ItemContent};
use crate::manifest::PackageManifest;

/// One asset stored in a package
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ArchiveAsset {
    Manifest(PackageManifest),
    Item(ItemContent),
    Enemy(EnemyContent),
}

/// An opened package
pub trait PackageArchive {
    /// Every manifest asset in the package
    fn manifests(&self) -> Vec<PackageManifest>;

    /// Every content descriptor in the package, in archive order
    fn contents(&self) -> Vec<ContentDescriptor>;
}

/// Opens package files
pub trait ArchiveReader: Send + Sync {
    fn open(&self, path: &Path) -> Result<Box<dyn PackageArchive>>;
}

/// Package stored as a JSON document
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct JsonArchive {
    pub assets: Vec<ArchiveAsset>,
}

impl JsonArchive {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn asset(mut self, asset: ArchiveAsset) -> Self {
        self.assets.push(asset);
        self
    }

    pub fn from_slice(bytes: &[u8]) -> Result<Self> {
        Ok(serde_json::from_slice(bytes)?)
    }

    pub fn to_vec(&self) -> Result<Vec<u8>> {
        Ok(serde_json::to_vec_pretty(self)?)
    }
}

impl PackageArchive for JsonArchive {
    fn manifests(&self) -> Vec<PackageManifest> {
        self.assets
            .iter()
            .filter_map(|asset| match asset {
                ArchiveAsset::Manifest(manifest) => Some(manifest.clone()),
                _ => None,
            })
            .collect()
    }

    fn contents(&self) -> Vec<ContentDescriptor> {
        self.assets
            .iter()
            .filter_map(|asset| match asset {
                ArchiveAsset::Manifest(_) => None,
                ArchiveAsset::Item(item) => Some(ContentDescriptor::Item(item.clone())),
                ArchiveAsset::Enemy(enemy) => Some(ContentDescriptor::Enemy(enemy.clone())),
            })
            .collect()
    }
}

/// Reader for [`JsonArchive`] files
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonArchiveReader;

impl ArchiveReader for JsonArchiveReader {
    fn open(&self, path: &Path) -> Result<Box<dyn PackageArchive>> {
        let bytes = std::fs::read(path)
            .map_err(|e| ContentError::Archive(format!("{}: {}", path.display(), e)))?;

        let archive = JsonArchive::from_slice(&bytes)
            .map_err(|e| ContentError::Archive(format!("{}: {}", path.display(), e)))?;

        Ok(Box::new(archive))
    }
}
