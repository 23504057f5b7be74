//! Hierarchy editing use case - add, rename and remove categories

use thiserror::Error;

use crate::model::{Hierarchy, HierarchyNode};
use crate::normalize::Normalizer;

/// Error type for hierarchy edits
#[derive(Debug, Error, PartialEq, Eq)]
pub enum EditError {
    #[error("Invalid word: {0:?}")]
    InvalidWord(String),
    #[error("Category not found: {0}")]
    CategoryNotFound(String),
    #[error("'{word}' already exists in {category}")]
    AlreadyExists { word: String, category: String },
    #[error("'{word}' does not exist in {category}")]
    WordNotFound { word: String, category: String },
}

/// Applies edits addressed by dot-separated category paths
///
/// Path segments and words are compared by normalized form, so
/// `"Pássaros.Araras"` reaches the key `"passaros"` then `"araras"`. An empty
/// path addresses the root.
pub struct HierarchyEditor<'a> {
    normalizer: &'a Normalizer,
}

impl<'a> HierarchyEditor<'a> {
    pub fn new(normalizer: &'a Normalizer) -> Self {
        Self { normalizer }
    }

    /// Add `word` as a new leaf under `category`, returning the stored key
    pub fn add(
        &self,
        hierarchy: &mut Hierarchy,
        category: &str,
        word: &str,
    ) -> Result<String, EditError> {
        let key = self.word_key(word)?;
        let target = self.navigate(hierarchy.root_mut(), category)?;

        if self.position(target, &key).is_some() {
            return Err(EditError::AlreadyExists {
                word: key,
                category: category_label(category),
            });
        }

        target.insert_child(key.clone(), HierarchyNode::Leaf);
        tracing::info!(word = %key, category = %category_label(category), "Added word");
        Ok(key)
    }

    /// Rename `old` to `new` under `category`, keeping its subtree
    pub fn rename(
        &self,
        hierarchy: &mut Hierarchy,
        category: &str,
        old: &str,
        new: &str,
    ) -> Result<String, EditError> {
        let old_key = self.word_key(old)?;
        let new_key = self.word_key(new)?;
        let target = self.navigate(hierarchy.root_mut(), category)?;

        let index = self
            .position(target, &old_key)
            .ok_or_else(|| EditError::WordNotFound {
                word: old_key.clone(),
                category: category_label(category),
            })?;

        if let Some(existing) = self.position(target, &new_key) {
            if existing != index {
                return Err(EditError::AlreadyExists {
                    word: new_key,
                    category: category_label(category),
                });
            }
        }

        target.rename_child(index, new_key.clone());
        tracing::info!(
            old = %old_key,
            new = %new_key,
            category = %category_label(category),
            "Renamed word"
        );
        Ok(new_key)
    }

    /// Remove `word` (and everything below it) from `category`
    pub fn remove(
        &self,
        hierarchy: &mut Hierarchy,
        category: &str,
        word: &str,
    ) -> Result<String, EditError> {
        let key = self.normalizer.normalize(word);
        let target = self.navigate(hierarchy.root_mut(), category)?;

        let index = self
            .position(target, &key)
            .ok_or_else(|| EditError::WordNotFound {
                word: key.clone(),
                category: category_label(category),
            })?;

        let (removed, _) = target.remove_child(index).ok_or_else(|| {
            EditError::WordNotFound {
                word: key.clone(),
                category: category_label(category),
            }
        })?;
        tracing::info!(word = %removed, category = %category_label(category), "Removed word");
        Ok(removed)
    }

    fn word_key(&self, word: &str) -> Result<String, EditError> {
        let key = self.normalizer.normalize(word);
        if key.is_empty() {
            return Err(EditError::InvalidWord(word.to_string()));
        }
        Ok(key)
    }

    fn navigate<'h>(
        &self,
        root: &'h mut HierarchyNode,
        category: &str,
    ) -> Result<&'h mut HierarchyNode, EditError> {
        let mut current = root;

        for segment in path_segments(category) {
            let wanted = self.normalizer.normalize(segment);
            let index = self
                .position(current, &wanted)
                .ok_or_else(|| EditError::CategoryNotFound(category.to_string()))?;
            current = current
                .child_mut(index)
                .ok_or_else(|| EditError::CategoryNotFound(category.to_string()))?;
        }

        Ok(current)
    }

    fn position(&self, node: &HierarchyNode, key: &str) -> Option<usize> {
        node.entries()
            .iter()
            .position(|(name, _)| self.normalizer.normalize(name) == key)
    }
}

fn path_segments(category: &str) -> impl Iterator<Item = &str> {
    category
        .split('.')
        .map(str::trim)
        .filter(|segment| !segment.is_empty())
}

/// Human-readable name for a dotted category path; blank paths are the root
pub fn category_label(category: &str) -> String {
    if path_segments(category).next().is_none() {
        "root".to_string()
    } else {
        category.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample() -> Hierarchy {
        Hierarchy::from_value(json!({
            "Animais": {
                "Felinos": {"tigres": {}},
                "Pássaros": {}
            }
        }))
        .unwrap()
        .hierarchy
    }

    #[test]
    fn test_category_label() {
        assert_eq!(category_label(""), "root");
        assert_eq!(category_label(" . "), "root");
        assert_eq!(category_label("animais.felinos"), "animais.felinos");
    }

    #[test]
    fn test_add_at_root() {
        let normalizer = Normalizer::new();
        let editor = HierarchyEditor::new(&normalizer);
        let mut hierarchy = sample();

        let key = editor.add(&mut hierarchy, "", "Plantas").unwrap();

        assert_eq!(key, "plantas");
        assert!(hierarchy.root().get("plantas").unwrap().is_leaf());
    }

    #[test]
    fn test_add_under_leaf_category_by_normalized_path() {
        let normalizer = Normalizer::new();
        let editor = HierarchyEditor::new(&normalizer);
        let mut hierarchy = sample();

        editor
            .add(&mut hierarchy, "animais.PASSAROS", "Papagaios")
            .unwrap();

        let birds = hierarchy
            .root()
            .get("Animais")
            .and_then(|n| n.get("Pássaros"))
            .unwrap();
        assert!(birds.get("papagaios").is_some());
    }

    #[test]
    fn test_add_rejects_duplicates_and_empty_words() {
        let normalizer = Normalizer::new();
        let editor = HierarchyEditor::new(&normalizer);
        let mut hierarchy = sample();

        let err = editor
            .add(&mut hierarchy, "Animais.Felinos", "Tigres!")
            .unwrap_err();
        assert!(matches!(err, EditError::AlreadyExists { .. }));

        let err = editor.add(&mut hierarchy, "", "?!").unwrap_err();
        assert_eq!(err, EditError::InvalidWord("?!".to_string()));
    }

    #[test]
    fn test_unknown_category() {
        let normalizer = Normalizer::new();
        let editor = HierarchyEditor::new(&normalizer);
        let mut hierarchy = sample();

        let err = editor
            .add(&mut hierarchy, "Animais.Peixes", "tubarao")
            .unwrap_err();
        assert_eq!(
            err,
            EditError::CategoryNotFound("Animais.Peixes".to_string())
        );
    }

    #[test]
    fn test_rename_keeps_subtree_and_position() {
        let normalizer = Normalizer::new();
        let editor = HierarchyEditor::new(&normalizer);
        let mut hierarchy = sample();

        editor
            .rename(&mut hierarchy, "Animais", "felinos", "Gatos Grandes")
            .unwrap();

        let animals = hierarchy.root().get("Animais").unwrap();
        let keys: Vec<_> = animals.entries().iter().map(|(k, _)| k.as_str()).collect();
        assert_eq!(keys, vec!["gatos grandes", "Pássaros"]);
        assert!(animals.get("gatos grandes").unwrap().get("tigres").is_some());
    }

    #[test]
    fn test_rename_errors() {
        let normalizer = Normalizer::new();
        let editor = HierarchyEditor::new(&normalizer);
        let mut hierarchy = sample();

        let err = editor
            .rename(&mut hierarchy, "Animais", "peixes", "tubaroes")
            .unwrap_err();
        assert!(matches!(err, EditError::WordNotFound { .. }));

        let err = editor
            .rename(&mut hierarchy, "Animais", "felinos", "passaros")
            .unwrap_err();
        assert!(matches!(err, EditError::AlreadyExists { .. }));

        // Renaming to its own normalized form is allowed
        editor
            .rename(&mut hierarchy, "Animais", "Felinos", "FELINOS")
            .unwrap();
    }

    #[test]
    fn test_remove_subtree() {
        let normalizer = Normalizer::new();
        let editor = HierarchyEditor::new(&normalizer);
        let mut hierarchy = sample();

        let removed = editor
            .remove(&mut hierarchy, "Animais", "Felinos")
            .unwrap();
        assert_eq!(removed, "Felinos");

        editor.remove(&mut hierarchy, "Animais", "passaros").unwrap();
        // Animais lost its last child and is now a word
        assert!(hierarchy.root().get("Animais").unwrap().is_leaf());

        editor.remove(&mut hierarchy, "", "animais").unwrap();
        assert!(hierarchy.is_empty());

        let err = editor.remove(&mut hierarchy, "", "animais").unwrap_err();
        assert_eq!(
            err,
            EditError::WordNotFound {
                word: "animais".to_string(),
                category: "root".to_string(),
            }
        );
    }
}
