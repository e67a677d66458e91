//! Test fixtures
//!
//! Content objects and package assets used across the integration tests.

use contentlib_core::{Component, Difficulty, EnemyParent, EnemySetup, GameObject, Item};
use contentlib_loader::{ArchiveAsset, EnemyContent, ItemContent, JsonArchive, PackageManifest, PrefabSpec};
use std::path::Path;
use std::sync::Arc;

/// Item whose asset name matches its prefab
pub fn create_test_item(name: &str, prefab: &str) -> Arc<Item> {
    Arc::new(Item::new(name, GameObject::new(prefab)))
}

/// Enemy with a single spawn object carrying the parent marker
pub fn create_test_enemy(name: &str, difficulty: Difficulty) -> Arc<EnemySetup> {
    let spawn = GameObject::new(name).with_component(Component::EnemyParent(EnemyParent {
        enemy_name: name.trim_start_matches("Enemy - ").to_string(),
        difficulty,
    }));
    Arc::new(EnemySetup::new(name, vec![spawn]))
}

/// Enemy whose spawn objects carry no parent marker
pub fn create_orphan_enemy(name: &str) -> Arc<EnemySetup> {
    Arc::new(EnemySetup::new(name, vec![GameObject::new(format!("{} Body", name))]))
}

pub fn manifest_asset(name: &str, author: &str) -> ArchiveAsset {
    ArchiveAsset::Manifest(PackageManifest::new(name, author, semver::Version::new(1, 0, 0)))
}

pub fn item_asset(name: &str, prefab: &str) -> ArchiveAsset {
    ArchiveAsset::Item(ItemContent {
        item_name: name.to_string(),
        asset_name: None,
        prefab: Some(PrefabSpec::new(prefab)),
    })
}

pub fn enemy_asset(name: &str, difficulty: Difficulty) -> ArchiveAsset {
    ArchiveAsset::Enemy(EnemyContent {
        name: name.to_string(),
        spawn_objects: vec![Some(PrefabSpec::new(name).component(Component::EnemyParent(EnemyParent {
            enemy_name: name.trim_start_matches("Enemy - ").to_string(),
            difficulty,
        })))],
    })
}

/// Write a JSON package under `dir`, creating parent directories
pub fn write_package(dir: &Path, file: &str, assets: Vec<ArchiveAsset>) {
    let archive = assets
        .into_iter()
        .fold(JsonArchive::new(), |archive, asset| archive.asset(asset));

    let path = dir.join(file);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).expect("Failed to create package directory");
    }
    std::fs::write(path, archive.to_vec().expect("Failed to encode package")).expect("Failed to write package");
}
