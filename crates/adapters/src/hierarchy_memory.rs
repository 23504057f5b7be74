//! In-memory hierarchy store for testing and offline mode

use async_trait::async_trait;
use phrase_tagger_domain::{Hierarchy, HierarchyError, HierarchyStore, LoadedHierarchy};
use std::sync::RwLock;

/// In-memory hierarchy store implementation
///
/// Every load hands out a copy, so a classification never observes a
/// concurrent save.
pub struct InMemoryHierarchyStore {
    hierarchy: RwLock<Hierarchy>,
}

impl InMemoryHierarchyStore {
    pub fn new() -> Self {
        Self::with_hierarchy(Hierarchy::empty())
    }

    pub fn with_hierarchy(hierarchy: Hierarchy) -> Self {
        Self {
            hierarchy: RwLock::new(hierarchy),
        }
    }
}

impl Default for InMemoryHierarchyStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl HierarchyStore for InMemoryHierarchyStore {
    async fn load(&self) -> Result<LoadedHierarchy, HierarchyError> {
        let hierarchy = self
            .hierarchy
            .read()
            .map_err(|e| HierarchyError::Lock(e.to_string()))?;
        Ok(LoadedHierarchy {
            hierarchy: hierarchy.clone(),
            ignored_paths: Vec::new(),
        })
    }

    async fn save(&self, hierarchy: &Hierarchy) -> Result<(), HierarchyError> {
        let mut stored = self
            .hierarchy
            .write()
            .map_err(|e| HierarchyError::Lock(e.to_string()))?;
        *stored = hierarchy.clone();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use phrase_tagger_domain::Normalizer;
    use phrase_tagger_domain::usecases::{HierarchyEditor, PhraseClassifier};

    #[tokio::test]
    async fn test_starts_empty() {
        let store = InMemoryHierarchyStore::new();
        let loaded = store.load().await.unwrap();
        assert!(loaded.hierarchy.is_empty());
    }

    #[tokio::test]
    async fn test_edit_save_classify() {
        let store = InMemoryHierarchyStore::new();
        let normalizer = Normalizer::new();
        let editor = HierarchyEditor::new(&normalizer);

        let mut hierarchy = store.load_or_empty().await;
        editor.add(&mut hierarchy, "", "Felinos").unwrap();
        editor.add(&mut hierarchy, "felinos", "Tigres").unwrap();
        store.save(&hierarchy).await.unwrap();

        let snapshot = store.load().await.unwrap().hierarchy;
        let tally = PhraseClassifier::new(&normalizer).classify("vi tigres", &snapshot, 2);
        assert_eq!(tally.get("tigres"), Some(1));
    }

    #[tokio::test]
    async fn test_poisoned_lock_is_reported() {
        let store = InMemoryHierarchyStore::new();

        std::thread::scope(|scope| {
            let handle = scope.spawn(|| {
                let _guard = store.hierarchy.write().unwrap();
                panic!("writer panicked while holding the lock");
            });
            assert!(handle.join().is_err());
        });

        assert!(matches!(store.load().await, Err(HierarchyError::Lock(_))));
        assert!(matches!(
            store.save(&Hierarchy::empty()).await,
            Err(HierarchyError::Lock(_))
        ));
    }

    #[tokio::test]
    async fn test_loaded_snapshot_is_independent() {
        let store = InMemoryHierarchyStore::new();
        let normalizer = Normalizer::new();
        let editor = HierarchyEditor::new(&normalizer);

        let snapshot = store.load().await.unwrap().hierarchy;

        let mut edited = store.load_or_empty().await;
        editor.add(&mut edited, "", "tigres").unwrap();
        store.save(&edited).await.unwrap();

        assert!(snapshot.is_empty());
        assert!(!store.load().await.unwrap().hierarchy.is_empty());
    }
}
