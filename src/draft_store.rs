//! Ephemeral key-value persistence for the last submitted recipe.
//!
//! Models browser-style local storage: string keys, string values, one
//! revision per key. The store is injected into the controller so tests can
//! swap the file-backed implementation for an in-memory one.

use std::collections::BTreeMap;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::app_dirs;
use crate::recipe::{FormField, RecipeForm};

/// Filename of the file-backed store under the `.tastecast` root.
pub const DRAFT_FILE_NAME: &str = "drafts.json";

/// Key the last submitted recipe is stored under.
pub const LAST_RECIPE_KEY: &str = "last_recipe";

/// Errors from the file-backed store.
#[derive(Debug, Error)]
pub enum DraftStoreError {
    #[error("No suitable directory for the draft store")]
    NoAppDir,
    #[error("Failed to write draft store {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Failed to encode draft store contents: {0}")]
    Encode(serde_json::Error),
}

/// String key-value storage with last-write-wins semantics.
pub trait KvStore {
    /// Fetch the stored value for `key`, if any. Unreadable or corrupt
    /// storage reads as absent.
    fn get(&self, key: &str) -> Option<String>;
    /// Store `value` under `key`, replacing any previous revision.
    fn set(&mut self, key: &str, value: &str) -> Result<(), DraftStoreError>;
}

/// Store backed by a single flat JSON object on disk.
pub struct FileKvStore {
    path: PathBuf,
}

impl FileKvStore {
    /// Open the store at its default location under the app root.
    pub fn open_default() -> Result<Self, DraftStoreError> {
        let dir = app_dirs::app_root_dir().map_err(|_| DraftStoreError::NoAppDir)?;
        Ok(Self::new(dir.join(DRAFT_FILE_NAME)))
    }

    /// Open a store at an explicit path.
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    fn load_map(&self) -> BTreeMap<String, String> {
        let Ok(bytes) = std::fs::read(&self.path) else {
            return BTreeMap::new();
        };
        match serde_json::from_slice(&bytes) {
            Ok(map) => map,
            Err(err) => {
                tracing::warn!(
                    "Draft store {} is unreadable, starting fresh: {err}",
                    self.path.display()
                );
                BTreeMap::new()
            }
        }
    }
}

impl KvStore for FileKvStore {
    fn get(&self, key: &str) -> Option<String> {
        self.load_map().remove(key)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), DraftStoreError> {
        let mut map = self.load_map();
        map.insert(key.to_string(), value.to_string());
        let data = serde_json::to_vec_pretty(&map).map_err(DraftStoreError::Encode)?;
        std::fs::write(&self.path, data).map_err(|source| DraftStoreError::Write {
            path: self.path.clone(),
            source,
        })
    }
}

/// In-memory store for tests and storage-less operation.
#[derive(Debug, Default)]
pub struct MemoryKvStore {
    entries: BTreeMap<String, String>,
}

impl KvStore for MemoryKvStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), DraftStoreError> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

#[derive(Serialize, Deserialize)]
struct StoredRecipe {
    calories: String,
    carbohydrate: String,
    sugar: String,
    protein: String,
    category: String,
    servings: String,
}

/// Persist the form's raw values as the single `last_recipe` revision.
pub fn save_last_recipe(
    store: &mut dyn KvStore,
    form: &RecipeForm,
) -> Result<(), DraftStoreError> {
    let stored = StoredRecipe {
        calories: form.calories.clone(),
        carbohydrate: form.carbohydrate.clone(),
        sugar: form.sugar.clone(),
        protein: form.protein.clone(),
        category: form.field(FormField::Category).to_string(),
        servings: form.servings.clone(),
    };
    let value = serde_json::to_string(&stored).map_err(DraftStoreError::Encode)?;
    store.set(LAST_RECIPE_KEY, &value)
}

/// Rehydrate the last submitted recipe verbatim, if one is stored.
///
/// Values flow back through `set_field` without validation; a stored
/// category label no longer in the known set leaves the selection unset.
pub fn load_last_recipe(store: &dyn KvStore) -> Option<RecipeForm> {
    let value = store.get(LAST_RECIPE_KEY)?;
    let stored: StoredRecipe = match serde_json::from_str(&value) {
        Ok(stored) => stored,
        Err(err) => {
            tracing::warn!("Stored recipe draft is unreadable, ignoring it: {err}");
            return None;
        }
    };
    let mut form = RecipeForm::default();
    form.set_field(FormField::Calories, &stored.calories);
    form.set_field(FormField::Carbohydrate, &stored.carbohydrate);
    form.set_field(FormField::Sugar, &stored.sugar);
    form.set_field(FormField::Protein, &stored.protein);
    form.set_field(FormField::Category, &stored.category);
    form.set_field(FormField::Servings, &stored.servings);
    Some(form)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::recipe::RecipeCategory;
    use tempfile::tempdir;

    fn sample_form() -> RecipeForm {
        RecipeForm {
            calories: "150".to_string(),
            carbohydrate: "30.2".to_string(),
            sugar: "8".to_string(),
            protein: "3.5".to_string(),
            category: Some(RecipeCategory::LunchSnacks),
            servings: "6".to_string(),
        }
    }

    #[test]
    fn file_store_round_trips_a_recipe() {
        let dir = tempdir().unwrap();
        let mut store = FileKvStore::new(dir.path().join(DRAFT_FILE_NAME));
        save_last_recipe(&mut store, &sample_form()).unwrap();
        let restored = load_last_recipe(&store).unwrap();
        assert_eq!(restored, sample_form());
    }

    #[test]
    fn file_store_reads_missing_file_as_absent() {
        let dir = tempdir().unwrap();
        let store = FileKvStore::new(dir.path().join(DRAFT_FILE_NAME));
        assert_eq!(store.get(LAST_RECIPE_KEY), None);
        assert!(load_last_recipe(&store).is_none());
    }

    #[test]
    fn second_save_replaces_the_first() {
        let mut store = MemoryKvStore::default();
        save_last_recipe(&mut store, &sample_form()).unwrap();
        let mut updated = sample_form();
        updated.calories = "999".to_string();
        save_last_recipe(&mut store, &updated).unwrap();
        let restored = load_last_recipe(&store).unwrap();
        assert_eq!(restored.calories, "999");
    }

    #[test]
    fn corrupt_value_reads_as_absent() {
        let mut store = MemoryKvStore::default();
        store.set(LAST_RECIPE_KEY, "{not json").unwrap();
        assert!(load_last_recipe(&store).is_none());
    }

    #[test]
    fn corrupt_file_is_replaced_on_next_set() {
        let dir = tempdir().unwrap();
        let path = dir.path().join(DRAFT_FILE_NAME);
        std::fs::write(&path, b"garbage").unwrap();
        let mut store = FileKvStore::new(path);
        save_last_recipe(&mut store, &sample_form()).unwrap();
        assert_eq!(load_last_recipe(&store).unwrap(), sample_form());
    }

    #[test]
    fn raw_values_survive_unvalidated() {
        let mut store = MemoryKvStore::default();
        let mut form = sample_form();
        form.calories = "not-a-number".to_string();
        save_last_recipe(&mut store, &form).unwrap();
        let restored = load_last_recipe(&store).unwrap();
        assert_eq!(restored.calories, "not-a-number");
    }

    #[test]
    fn retired_category_label_leaves_selection_unset() {
        let mut store = MemoryKvStore::default();
        store
            .set(
                LAST_RECIPE_KEY,
                r#"{"calories":"1","carbohydrate":"2","sugar":"3","protein":"4","category":"Casserole","servings":"5"}"#,
            )
            .unwrap();
        let restored = load_last_recipe(&store).unwrap();
        assert_eq!(restored.category, None);
        assert_eq!(restored.servings, "5");
    }
}
