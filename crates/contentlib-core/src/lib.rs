//! Core domain models for contentlib
//!
//! This crate contains the content model (items, enemy setups, valuables),
//! the game-object templates they carry, content sources, resource path
//! derivation, and the source-attributed [`ContentRegistry`].

pub mod content;
pub mod error;
pub mod object;
pub mod paths;
pub mod registry;
pub mod source;
pub mod types;

// Re-exports for convenience
pub use content::{ContentObject, ContentVariant, EnemySetup, Item, Valuable};
pub use error::{ContentError, Result};
pub use object::{Component, EnemyParent, GameObject};
pub use registry::ContentRegistry;
pub use source::{ContentSource, SourceKind, SourceMetadata};
pub use types::{keys_match, ContentKind, Difficulty, InstanceId, TemplateKey};
