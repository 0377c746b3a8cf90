//! Lookup tables used to resolve the model and texture ids embedded in
//! level object records.
//!
//! Catalogs are populated once, before any object decode begins, and are
//! read-only afterwards. They are keyed by the id field *inside* each entry,
//! not by list position, while still preserving the original entry order.

use indexmap::{IndexMap, IndexSet};
use tracing::warn;

/// One entry of a mesh catalog: the embedded id plus the fixed "model size"
/// scalar that placement transforms fold into their authored scale.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ModelEntry {
    pub id: i32,
    pub size: f32,
}

/// An ordered mesh catalog indexed by embedded model id.
///
/// Lookup is O(1); the reference behavior of "first matching entry wins" is
/// kept by ignoring duplicate ids on insertion.
#[derive(Debug, Clone, Default)]
pub struct ModelCatalog {
    entries: IndexMap<i32, ModelEntry>,
}

impl ModelCatalog {
    pub fn new() -> ModelCatalog {
        ModelCatalog::default()
    }

    pub fn from_entries(entries: impl IntoIterator<Item = ModelEntry>) -> ModelCatalog {
        let mut catalog = ModelCatalog::new();
        for entry in entries {
            catalog.insert(entry);
        }
        catalog
    }

    /// Adds an entry, keeping the first one seen for any given id.
    pub fn insert(&mut self, entry: ModelEntry) {
        if self.entries.contains_key(&entry.id) {
            warn!(id = entry.id, "duplicate model id in catalog, keeping first");
            return;
        }
        self.entries.insert(entry.id, entry);
    }

    /// Resolves an embedded model id, or `None` when the catalog has no such
    /// entry. Never fails: unresolved ids degrade the referencing object to a
    /// placeholder, they do not abort decode.
    pub fn get(&self, id: i32) -> Option<ModelEntry> {
        self.entries.get(&id).copied()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ModelEntry> {
        self.entries.values()
    }
}

/// Texture ids known to the level, in catalog order.
#[derive(Debug, Clone, Default)]
pub struct TextureCatalog {
    ids: IndexSet<i32>,
}

impl TextureCatalog {
    pub fn new() -> TextureCatalog {
        TextureCatalog::default()
    }

    pub fn from_ids(ids: impl IntoIterator<Item = i32>) -> TextureCatalog {
        TextureCatalog {
            ids: ids.into_iter().collect(),
        }
    }

    pub fn insert(&mut self, id: i32) {
        self.ids.insert(id);
    }

    pub fn contains(&self, id: i32) -> bool {
        self.ids.contains(&id)
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}

/// The full set of lookup tables a level decode needs.
///
/// Mobies, ties and shrubs each reference their own mesh family, so the
/// catalogs are kept separate.
#[derive(Debug, Clone, Default)]
pub struct Catalogs {
    pub moby_models: ModelCatalog,
    pub tie_models: ModelCatalog,
    pub shrub_models: ModelCatalog,
    pub textures: TextureCatalog,
}

#[cfg(test)]
mod test {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn lookup_is_by_embedded_id_not_position() {
        let catalog = ModelCatalog::from_entries([
            ModelEntry { id: 0x500, size: 1.0 },
            ModelEntry { id: 0x10, size: 0.5 },
        ]);

        assert_eq!(catalog.get(0x10), Some(ModelEntry { id: 0x10, size: 0.5 }));
        assert_eq!(catalog.get(0x11), None);
    }

    #[test]
    fn first_duplicate_wins() {
        let catalog = ModelCatalog::from_entries([
            ModelEntry { id: 7, size: 1.0 },
            ModelEntry { id: 7, size: 2.0 },
        ]);

        assert_eq!(catalog.len(), 1);
        assert_eq!(catalog.get(7).unwrap().size, 1.0);
    }

    #[test]
    fn order_is_preserved() {
        let catalog = ModelCatalog::from_entries([
            ModelEntry { id: 3, size: 1.0 },
            ModelEntry { id: 1, size: 1.0 },
            ModelEntry { id: 2, size: 1.0 },
        ]);

        let ids: Vec<i32> = catalog.iter().map(|e| e.id).collect();
        assert_eq!(ids, vec![3, 1, 2]);
    }
}
