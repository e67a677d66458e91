//! Package discovery and loading

use contentlib_core::{ContentError, Result};
use contentlib_service::{RejectReason, ServiceRegistry};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, error, info, instrument};
use walkdir::WalkDir;

use crate::archive::{ArchiveReader, JsonArchiveReader};
use crate::manifest::PackageManifest;

/// File extension packages are discovered by
pub const DEFAULT_EXTENSION: &str = ".repobundle";

/// Outcome of loading one package
#[derive(Debug)]
pub struct PackageLoad {
    /// Path relative to the scanned root
    pub path: PathBuf,
    pub manifest: PackageManifest,
    /// Content that was accepted
    pub registered: Vec<String>,
    /// Content refused by a registration check
    pub rejected: Vec<(String, RejectReason)>,
    /// Descriptors that failed to initialize
    pub descriptor_failures: Vec<ContentError>,
}

/// A package that could not be loaded at all
#[derive(Debug)]
pub struct PackageFailure {
    pub path: PathBuf,
    pub error: ContentError,
}

/// Summary of a directory scan
#[derive(Debug, Default)]
pub struct LoadReport {
    pub loaded: Vec<PackageLoad>,
    pub failed: Vec<PackageFailure>,
}

impl LoadReport {
    pub fn registered_count(&self) -> usize {
        self.loaded.iter().map(|p| p.registered.len()).sum()
    }

    pub fn rejected_count(&self) -> usize {
        self.loaded.iter().map(|p| p.rejected.len()).sum()
    }

    pub fn descriptor_failure_count(&self) -> usize {
        self.loaded.iter().map(|p| p.descriptor_failures.len()).sum()
    }
}

/// Loads content packages into the registration services
pub struct PackageLoader {
    reader: Arc<dyn ArchiveReader>,
    services: ServiceRegistry,
}

impl PackageLoader {
    /// Create a loader reading JSON archives
    pub fn new(services: ServiceRegistry) -> Self {
        Self::with_reader(services, Arc::new(JsonArchiveReader))
    }

    pub fn with_reader(services: ServiceRegistry, reader: Arc<dyn ArchiveReader>) -> Self {
        Self { reader, services }
    }

    pub fn services(&self) -> &ServiceRegistry {
        &self.services
    }

    /// Load every package under `root` whose file name ends with `extension`
    ///
    /// Files are visited in sorted order. A package that fails is logged and
    /// recorded; scanning continues with the next file. Entries that cannot be
    /// read, including a missing `root`, are recorded as I/O failures.
    #[instrument(skip(self), fields(root = %root.display()))]
    pub fn load_all(&self, root: &Path, extension: &str) -> LoadReport {
        let mut report = LoadReport::default();

        for entry in WalkDir::new(root).sort_by_file_name() {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    let path = e.path().unwrap_or(root);
                    error!("Failed to read {}: {}", path.display(), e);
                    report.failed.push(PackageFailure {
                        path: path.to_path_buf(),
                        error: ContentError::Io(e.to_string()),
                    });
                    continue;
                }
            };

            if !entry.file_type().is_file() {
                continue;
            }

            let matches = entry
                .file_name()
                .to_str()
                .map(|name| name.ends_with(extension))
                .unwrap_or(false);
            if !matches {
                continue;
            }

            let path = entry.path();
            let relative = path.strip_prefix(root).unwrap_or(path);

            match self.load_one(path, relative) {
                Ok(load) => report.loaded.push(load),
                Err(e) => {
                    error!("Failed to load bundle at {}: {}", relative.display(), e);
                    report.failed.push(PackageFailure {
                        path: relative.to_path_buf(),
                        error: e,
                    });
                }
            }
        }

        info!(
            packages = report.loaded.len(),
            failed = report.failed.len(),
            registered = report.registered_count(),
            "Finished loading packages"
        );

        report
    }

    /// Load a single package
    ///
    /// # Errors
    ///
    /// Fails when the archive cannot be opened or does not hold exactly one
    /// valid manifest. Descriptor failures are collected, not returned.
    pub fn load_one(&self, path: &Path, relative: &Path) -> Result<PackageLoad> {
        let archive = self.reader.open(path)?;

        let mut manifests = archive.manifests();
        let manifest = match manifests.len() {
            0 => return Err(ContentError::InvalidPackage("Bundle contains no mods.".to_string())),
            1 => manifests.remove(0),
            _ => {
                return Err(ContentError::InvalidPackage(
                    "Bundle contains more than one mod.".to_string(),
                ))
            }
        };
        manifest.validate()?;

        info!(
            "Loading content from bundle at {} ({})",
            relative.display(),
            manifest.identifier()
        );

        let mut load = PackageLoad {
            path: relative.to_path_buf(),
            manifest,
            registered: Vec::new(),
            rejected: Vec::new(),
            descriptor_failures: Vec::new(),
        };

        for content in archive.contents() {
            match content.initialize(&load.manifest, &self.services) {
                Ok(registration) => match registration.rejection() {
                    None => load.registered.push(content.name().to_string()),
                    Some(reason) => load.rejected.push((content.name().to_string(), reason.clone())),
                },
                Err(e) => {
                    error!("{}", e);
                    load.descriptor_failures.push(e);
                }
            }
        }

        debug!(
            registered = load.registered.len(),
            rejected = load.rejected.len(),
            "Loaded bundle {}",
            load.path.display()
        );

        Ok(load)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::archive::{ArchiveAsset, JsonArchive};
    use crate::descriptor::{EnemyContent, ItemContent, PrefabSpec};
    use contentlib_service::memory::{CloneFactory, MemoryCatalog, MemoryDirector, MemoryResources};
    use contentlib_service::HostServices;
    use semver::Version;

    fn loader() -> PackageLoader {
        PackageLoader::new(ServiceRegistry::new(HostServices {
            resources: Arc::new(MemoryResources::new()),
            catalog: Arc::new(MemoryCatalog::new()),
            director: Arc::new(MemoryDirector::new()),
            factory: Arc::new(CloneFactory::new()),
        }))
    }

    fn item(name: &str, prefab: &str) -> ArchiveAsset {
        ArchiveAsset::Item(ItemContent {
            item_name: name.to_string(),
            asset_name: None,
            prefab: Some(PrefabSpec::new(prefab)),
        })
    }

    fn manifest(name: &str) -> ArchiveAsset {
        ArchiveAsset::Manifest(PackageManifest::new(name, "Zehs", Version::new(1, 0, 0)))
    }

    fn write(dir: &Path, file: &str, archive: &JsonArchive) {
        let path = dir.join(file);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).unwrap();
        }
        std::fs::write(path, archive.to_vec().unwrap()).unwrap();
    }

    #[test]
    fn test_load_all_filters_by_extension() {
        let dir = tempfile::tempdir().unwrap();
        let pack = JsonArchive::new().asset(manifest("Carts")).asset(item("Cart", "Item Cart"));
        write(dir.path(), "nested/carts.repobundle", &pack);
        write(dir.path(), "ignored.json", &pack);

        let report = loader().load_all(dir.path(), DEFAULT_EXTENSION);
        assert_eq!(report.loaded.len(), 1);
        assert_eq!(report.loaded[0].path, Path::new("nested").join("carts.repobundle"));
        assert_eq!(report.registered_count(), 1);
    }

    #[test]
    fn test_missing_root_is_io_failure() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path().join("absent");

        let report = loader().load_all(&root, DEFAULT_EXTENSION);
        assert!(report.loaded.is_empty());
        assert_eq!(report.failed.len(), 1);
        assert_eq!(report.failed[0].path, root);
        assert!(matches!(report.failed[0].error, ContentError::Io(_)));
    }

    #[test]
    fn test_manifest_count_must_be_one() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "a.repobundle", &JsonArchive::new().asset(item("Cart", "Item Cart")));
        write(
            dir.path(),
            "b.repobundle",
            &JsonArchive::new().asset(manifest("One")).asset(manifest("Two")),
        );

        let report = loader().load_all(dir.path(), DEFAULT_EXTENSION);
        assert!(report.loaded.is_empty());
        assert_eq!(report.failed.len(), 2);
        assert!(report
            .failed
            .iter()
            .all(|f| matches!(f.error, ContentError::InvalidPackage(_))));
    }

    #[test]
    fn test_bad_package_does_not_stop_scan() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("a.repobundle"), b"garbage").unwrap();
        write(
            dir.path(),
            "b.repobundle",
            &JsonArchive::new().asset(manifest("Carts")).asset(item("Cart", "Item Cart")),
        );

        let report = loader().load_all(dir.path(), DEFAULT_EXTENSION);
        assert_eq!(report.failed.len(), 1);
        assert_eq!(report.failed[0].path, Path::new("a.repobundle"));
        assert_eq!(report.loaded.len(), 1);
    }

    #[test]
    fn test_descriptor_failure_is_isolated() {
        let dir = tempfile::tempdir().unwrap();
        let pack = JsonArchive::new()
            .asset(manifest("Mixed"))
            .asset(ArchiveAsset::Enemy(EnemyContent {
                name: "Enemy - Empty".to_string(),
                spawn_objects: vec![],
            }))
            .asset(item("Cart", "Item Cart"));
        write(dir.path(), "mixed.repobundle", &pack);

        let report = loader().load_all(dir.path(), DEFAULT_EXTENSION);
        let load = &report.loaded[0];
        assert_eq!(load.descriptor_failures.len(), 1);
        assert_eq!(load.registered, vec!["Cart".to_string()]);
    }

    #[test]
    fn test_rejections_are_recorded() {
        let dir = tempfile::tempdir().unwrap();
        let pack = JsonArchive::new()
            .asset(manifest("Dupes"))
            .asset(item("Cart", "Item Cart"))
            .asset(item("Cart Again", "item cart"));
        write(dir.path(), "dupes.repobundle", &pack);

        let report = loader().load_all(dir.path(), DEFAULT_EXTENSION);
        assert_eq!(report.registered_count(), 1);
        assert_eq!(report.rejected_count(), 1);
    }
}
