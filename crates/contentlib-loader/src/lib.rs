//! Content package loading
//!
//! Packages are archives holding exactly one [`PackageManifest`] and any
//! number of content descriptors. The [`PackageLoader`] walks a directory,
//! opens each package through an [`ArchiveReader`], and initializes every
//! descriptor against the registration services. One bad package or
//! descriptor never stops the rest from loading.

pub mod archive;
pub mod descriptor;
pub mod loader;
pub mod manifest;

pub use archive::{ArchiveAsset, ArchiveReader, JsonArchive, JsonArchiveReader, PackageArchive};
pub use descriptor::{ContentDescriptor, EnemyContent, ItemContent, PrefabSpec};
pub use loader::{LoadReport, PackageFailure, PackageLoad, PackageLoader, DEFAULT_EXTENSION};
pub use manifest::PackageManifest;
