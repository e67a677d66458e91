//! Resource path derivation
//!
//! Network identifiers for spawnable templates are derived from the folder
//! the host keeps each content kind's templates in.

use crate::content::Item;
use crate::object::GameObject;

pub const ITEMS_FOLDER: &str = "Items";
pub const ENEMIES_FOLDER: &str = "Enemies";

/// Network identifier of an item's prefab, `None` when it has no prefab
pub fn item_prefab_path(item: &Item) -> Option<String> {
    item.prefab
        .as_ref()
        .map(|prefab| format!("{}/{}", ITEMS_FOLDER, prefab.name()))
}

/// Network identifier of one enemy spawn template
pub fn enemy_prefab_path(spawn_object: &GameObject) -> String {
    format!("{}/{}", ENEMIES_FOLDER, spawn_object.name())
}
