//! Domain models and value objects

use serde::ser::{Serialize, SerializeMap, Serializer};
use serde_json::Value;
use sha2::{Digest, Sha256};
use thiserror::Error;

/// A node of the category hierarchy
///
/// Keys are category names, unique within a node and kept in file order.
/// A node without entries is always represented as [`HierarchyNode::Leaf`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum HierarchyNode {
    /// Nested categories
    Internal(Vec<(String, HierarchyNode)>),
    /// A childless category, i.e. a plain word
    #[default]
    Leaf,
}

impl HierarchyNode {
    /// Build a node from its entries, collapsing an empty list into a leaf
    pub fn from_entries(entries: Vec<(String, HierarchyNode)>) -> Self {
        if entries.is_empty() {
            Self::Leaf
        } else {
            Self::Internal(entries)
        }
    }

    pub fn entries(&self) -> &[(String, HierarchyNode)] {
        match self {
            Self::Internal(entries) => entries,
            Self::Leaf => &[],
        }
    }

    pub fn is_leaf(&self) -> bool {
        matches!(self, Self::Leaf)
    }

    /// Get a child by its exact key
    pub fn get(&self, key: &str) -> Option<&HierarchyNode> {
        self.entries()
            .iter()
            .find(|(name, _)| name == key)
            .map(|(_, child)| child)
    }

    pub fn child_mut(&mut self, index: usize) -> Option<&mut HierarchyNode> {
        match self {
            Self::Internal(entries) => entries.get_mut(index).map(|(_, child)| child),
            Self::Leaf => None,
        }
    }

    /// Append a child; a leaf becomes an internal node
    pub fn insert_child(&mut self, key: String, child: HierarchyNode) {
        match self {
            Self::Internal(entries) => entries.push((key, child)),
            Self::Leaf => *self = Self::Internal(vec![(key, child)]),
        }
    }

    /// Rename the child at `index`, keeping its subtree and position
    pub fn rename_child(&mut self, index: usize, key: String) -> Option<String> {
        match self {
            Self::Internal(entries) => entries
                .get_mut(index)
                .map(|(name, _)| std::mem::replace(name, key)),
            Self::Leaf => None,
        }
    }

    /// Remove the child at `index`; an internal node left empty becomes a leaf
    pub fn remove_child(&mut self, index: usize) -> Option<(String, HierarchyNode)> {
        let Self::Internal(entries) = self else {
            return None;
        };
        if index >= entries.len() {
            return None;
        }
        let removed = entries.remove(index);
        if entries.is_empty() {
            *self = Self::Leaf;
        }
        Some(removed)
    }
}

impl Serialize for HierarchyNode {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let entries = self.entries();
        let mut map = serializer.serialize_map(Some(entries.len()))?;
        for (key, child) in entries {
            map.serialize_entry(key, child)?;
        }
        map.end()
    }
}

/// Error raised when a JSON document cannot be used as a hierarchy
#[derive(Debug, Error, PartialEq, Eq)]
#[error("hierarchy root must be a JSON object, found {found}")]
pub struct HierarchyShapeError {
    pub found: &'static str,
}

/// A complete category tree, rooted at an unnamed node (depth 1)
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Hierarchy {
    root: HierarchyNode,
}

/// Result of converting a JSON document into a [`Hierarchy`]
#[derive(Debug, Clone, Default)]
pub struct LoadedHierarchy {
    pub hierarchy: Hierarchy,
    /// Dotted paths of values that were not objects and were loaded as leaves
    pub ignored_paths: Vec<String>,
}

impl Hierarchy {
    pub fn new(root: HierarchyNode) -> Self {
        Self { root }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn root(&self) -> &HierarchyNode {
        &self.root
    }

    pub fn root_mut(&mut self) -> &mut HierarchyNode {
        &mut self.root
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_leaf()
    }

    /// Convert a parsed JSON document
    ///
    /// Objects become nodes. Any other value (array, string, number, bool,
    /// null) is loaded as a leaf and its path is reported in `ignored_paths`.
    pub fn from_value(value: Value) -> Result<LoadedHierarchy, HierarchyShapeError> {
        let Value::Object(_) = value else {
            return Err(HierarchyShapeError {
                found: json_kind(&value),
            });
        };

        let mut ignored_paths = Vec::new();
        let mut path = Vec::new();
        let root = convert_value(value, &mut path, &mut ignored_paths);

        Ok(LoadedHierarchy {
            hierarchy: Self { root },
            ignored_paths,
        })
    }

    /// Serialize to the canonical persistence format (2-space indented JSON)
    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(&self.root)
    }

    /// SHA-256 of the compact canonical serialization
    pub fn fingerprint(&self) -> String {
        let bytes = serde_json::to_vec(&self.root).unwrap_or_default();
        let mut hasher = Sha256::new();
        hasher.update(&bytes);
        format!("{:x}", hasher.finalize())
    }

    /// Every category in pre-order with its depth (root children are depth 1)
    pub fn walk(&self) -> Vec<(usize, &str)> {
        let mut out = Vec::new();
        // Pushed in reverse so siblings pop in file order
        let mut pending: Vec<(&str, &HierarchyNode, usize)> = self
            .root
            .entries()
            .iter()
            .rev()
            .map(|(key, child)| (key.as_str(), child, 1))
            .collect();

        while let Some((key, node, depth)) = pending.pop() {
            out.push((depth, key));
            for (child_key, child) in node.entries().iter().rev() {
                pending.push((child_key.as_str(), child, depth + 1));
            }
        }

        out
    }

    pub fn category_count(&self) -> usize {
        self.walk().len()
    }

    /// Deepest level holding a category; 0 for an empty hierarchy
    pub fn max_depth(&self) -> usize {
        self.walk()
            .into_iter()
            .map(|(depth, _)| depth)
            .max()
            .unwrap_or(0)
    }
}

impl Serialize for Hierarchy {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.root.serialize(serializer)
    }
}

fn convert_value(value: Value, path: &mut Vec<String>, ignored: &mut Vec<String>) -> HierarchyNode {
    match value {
        Value::Object(map) => {
            let mut entries = Vec::with_capacity(map.len());
            for (key, child) in map {
                path.push(key.clone());
                let node = convert_value(child, path, ignored);
                path.pop();
                entries.push((key, node));
            }
            HierarchyNode::from_entries(entries)
        }
        _ => {
            ignored.push(path.join("."));
            HierarchyNode::Leaf
        }
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// Per-call mapping from matched (normalized) category to hit count
///
/// Iteration follows first-match order. Every present key has a count of at
/// least 1.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MatchTally {
    entries: Vec<(String, u32)>,
}

impl MatchTally {
    pub fn new() -> Self {
        Self::default()
    }

    /// Credit one hit to `key`, returning its new count
    pub fn increment(&mut self, key: &str) -> u32 {
        if let Some((_, count)) = self.entries.iter_mut().find(|(k, _)| k == key) {
            *count += 1;
            return *count;
        }
        self.entries.push((key.to_string(), 1));
        1
    }

    pub fn get(&self, key: &str) -> Option<u32> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, count)| *count)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, u32)> {
        self.entries.iter().map(|(k, count)| (k.as_str(), *count))
    }
}

impl Serialize for MatchTally {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (key, count) in &self.entries {
            map.serialize_entry(key, count)?;
        }
        map.end()
    }
}
