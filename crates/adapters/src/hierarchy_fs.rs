//! Filesystem-based hierarchy store (a single JSON document)

use async_trait::async_trait;
use phrase_tagger_domain::{Hierarchy, HierarchyError, HierarchyStore, LoadedHierarchy};
use serde_json::Value;
use std::path::{Path, PathBuf};

/// Hierarchy stored as a JSON object on disk
pub struct FsHierarchyStore {
    path: PathBuf,
}

impl FsHierarchyStore {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn parse_error(&self, message: impl ToString) -> HierarchyError {
        HierarchyError::Parse {
            file: self.path.display().to_string(),
            message: message.to_string(),
        }
    }
}

#[async_trait]
impl HierarchyStore for FsHierarchyStore {
    async fn load(&self) -> Result<LoadedHierarchy, HierarchyError> {
        if !self.path.exists() {
            return Err(HierarchyError::NotFound(self.path.display().to_string()));
        }

        let content = tokio::fs::read_to_string(&self.path).await?;
        let value: Value = serde_json::from_str(&content).map_err(|e| self.parse_error(e))?;
        let loaded = Hierarchy::from_value(value).map_err(|e| self.parse_error(e))?;

        for path in &loaded.ignored_paths {
            tracing::warn!(
                file = %self.path.display(),
                path = %path,
                "Ignoring non-object hierarchy value"
            );
        }

        tracing::debug!(
            file = %self.path.display(),
            categories = loaded.hierarchy.category_count(),
            "Loaded hierarchy"
        );

        Ok(loaded)
    }

    async fn save(&self, hierarchy: &Hierarchy) -> Result<(), HierarchyError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                tokio::fs::create_dir_all(parent).await?;
            }
        }

        let json = hierarchy
            .to_json_pretty()
            .map_err(|e| HierarchyError::Serialization(e.to_string()))?;
        tokio::fs::write(&self.path, json).await?;

        tracing::debug!(file = %self.path.display(), "Saved hierarchy");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn setup_test_dir() -> TempDir {
        TempDir::new().unwrap()
    }

    #[tokio::test]
    async fn test_load_nested_hierarchy() {
        let dir = setup_test_dir();
        let path = dir.path().join("hierarchy.json");
        std::fs::write(
            &path,
            r#"{"Felinos": {"tigres": {}}, "Pássaros": {"papagaios": {}}}"#,
        )
        .unwrap();

        let store = FsHierarchyStore::new(&path);
        let loaded = store.load().await.unwrap();

        assert_eq!(loaded.hierarchy.category_count(), 4);
        assert!(loaded.ignored_paths.is_empty());
        assert!(
            loaded
                .hierarchy
                .root()
                .get("Felinos")
                .and_then(|n| n.get("tigres"))
                .is_some()
        );
    }

    #[tokio::test]
    async fn test_missing_file_is_not_found() {
        let dir = setup_test_dir();
        let store = FsHierarchyStore::new(dir.path().join("absent.json"));

        let result = store.load().await;
        assert!(matches!(result, Err(HierarchyError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_invalid_json_is_parse_error() {
        let dir = setup_test_dir();
        let path = dir.path().join("hierarchy.json");
        std::fs::write(&path, "{ not json").unwrap();

        let result = FsHierarchyStore::new(&path).load().await;
        assert!(matches!(result, Err(HierarchyError::Parse { .. })));
    }

    #[tokio::test]
    async fn test_array_root_is_parse_error() {
        let dir = setup_test_dir();
        let path = dir.path().join("hierarchy.json");
        std::fs::write(&path, r#"["tigres"]"#).unwrap();

        let result = FsHierarchyStore::new(&path).load().await;
        assert!(matches!(result, Err(HierarchyError::Parse { .. })));
    }

    #[tokio::test]
    async fn test_legacy_word_arrays_are_reported() {
        let dir = setup_test_dir();
        let path = dir.path().join("hierarchy.json");
        std::fs::write(&path, r#"{"Felinos": ["tigres", "leoes"]}"#).unwrap();

        let loaded = FsHierarchyStore::new(&path).load().await.unwrap();
        assert_eq!(loaded.ignored_paths, vec!["Felinos"]);
        assert!(loaded.hierarchy.root().get("Felinos").unwrap().is_leaf());
    }

    #[tokio::test]
    async fn test_save_then_load_creates_directories() {
        let dir = setup_test_dir();
        let path = dir.path().join("dicts").join("hierarchy.json");
        let value = serde_json::json!({"Animais": {"Felinos": {"tigres": {}}}, "Plantas": {}});
        let hierarchy = Hierarchy::from_value(value).unwrap().hierarchy;

        let store = FsHierarchyStore::new(&path);
        store.save(&hierarchy).await.unwrap();
        let reloaded = store.load().await.unwrap().hierarchy;

        assert_eq!(reloaded, hierarchy);
        let text = std::fs::read_to_string(&path).unwrap();
        assert!(text.contains("\"Plantas\": {}"));
    }

    #[tokio::test]
    async fn test_load_or_empty_recovers() {
        let dir = setup_test_dir();
        let path = dir.path().join("hierarchy.json");
        std::fs::write(&path, "garbage").unwrap();

        let hierarchy = FsHierarchyStore::new(&path).load_or_empty().await;
        assert!(hierarchy.is_empty());
    }
}
