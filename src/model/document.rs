//! TOML layout documents
//!
//! A document is a list of root components, each with optional nested
//! children. Attribute keys are qualified (`android:layout-width`,
//! `app:left-to-left-of`) and map onto [`Namespace`] pairs in the tree.

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::attrs::Namespace;
use super::tree::{ComponentId, ComponentTree, Geometry};

/// Errors that can occur when loading or saving layout documents
#[derive(Error, Debug)]
pub enum DocumentError {
    #[error("Failed to read or write layout document: {0}")]
    IoError(#[from] std::io::Error),
    #[error("Failed to parse layout TOML: {0}")]
    ParseError(#[from] toml::de::Error),
    #[error("Failed to serialize layout TOML: {0}")]
    SerializeError(#[from] toml::ser::Error),
    #[error("invalid attribute key '{key}' on component '{component}' (expected android:<name> or app:<name>)")]
    InvalidAttributeKey { component: String, key: String },
}

impl DocumentError {
    pub fn invalid_key(component: impl Into<String>, key: impl Into<String>) -> Self {
        Self::InvalidAttributeKey {
            component: component.into(),
            key: key.into(),
        }
    }
}

/// Pixel bounds as written in a document
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bounds {
    #[serde(default)]
    pub x: i32,
    #[serde(default)]
    pub y: i32,
    #[serde(default)]
    pub width: i32,
    #[serde(default)]
    pub height: i32,
}

/// One component entry
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ComponentEntry {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub tag: String,
    #[serde(default)]
    pub bounds: Bounds,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub baseline: Option<i32>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub attributes: BTreeMap<String, String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<ComponentEntry>,
}

/// A layout document
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Document {
    #[serde(default)]
    pub components: Vec<ComponentEntry>,
}

impl Document {
    /// Load a document from a TOML file
    pub fn from_file(path: &Path) -> Result<Self, DocumentError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_str(&content)
    }

    /// Load a document from a TOML string
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(content: &str) -> Result<Self, DocumentError> {
        Ok(toml::from_str(content)?)
    }

    /// Serialize the document as TOML
    pub fn to_toml(&self) -> Result<String, DocumentError> {
        Ok(toml::to_string(self)?)
    }

    /// Write the document to a TOML file
    pub fn save(&self, path: &Path) -> Result<(), DocumentError> {
        std::fs::write(path, self.to_toml()?)?;
        Ok(())
    }

    /// Build a component tree from this document
    pub fn to_tree(&self) -> Result<ComponentTree, DocumentError> {
        let mut tree = ComponentTree::new();
        for entry in &self.components {
            let root = tree.add_root(&entry.tag, entry.id.as_deref());
            fill_component(&mut tree, root, entry)?;
        }
        Ok(tree)
    }

    /// Capture a component tree as a document
    pub fn from_tree(tree: &ComponentTree) -> Self {
        Self {
            components: tree
                .roots()
                .iter()
                .filter_map(|root| entry_for(tree, *root))
                .collect(),
        }
    }
}

fn fill_component(
    tree: &mut ComponentTree,
    cid: ComponentId,
    entry: &ComponentEntry,
) -> Result<(), DocumentError> {
    let name = entry.id.as_deref().unwrap_or(&entry.tag).to_string();
    if entry.bounds.width < 0 || entry.bounds.height < 0 {
        tracing::warn!(component = %name, "negative size in bounds");
    }

    let mut qualified = Vec::with_capacity(entry.attributes.len());
    for (key, value) in &entry.attributes {
        let (ns, local) =
            Namespace::split_qualified(key).ok_or_else(|| DocumentError::invalid_key(&name, key))?;
        qualified.push((ns, local, value.as_str()));
    }

    if let Some(component) = tree.get_mut(cid) {
        component.geometry = Geometry::new(
            entry.bounds.x,
            entry.bounds.y,
            entry.bounds.width,
            entry.bounds.height,
        )
        .with_baseline(entry.baseline.unwrap_or(-1));
        for (ns, local, value) in qualified {
            component.set_attribute(ns, local, Some(value));
        }
    }

    for child in &entry.children {
        // Parent was created above, so this cannot miss
        if let Some(child_id) = tree.add_child(cid, &child.tag, child.id.as_deref()) {
            fill_component(tree, child_id, child)?;
        }
    }
    Ok(())
}

fn entry_for(tree: &ComponentTree, cid: ComponentId) -> Option<ComponentEntry> {
    let component = tree.get(cid)?;
    let g = component.geometry;
    Some(ComponentEntry {
        id: component.id.clone(),
        tag: component.tag.clone(),
        bounds: Bounds {
            x: g.x,
            y: g.y,
            width: g.width,
            height: g.height,
        },
        baseline: (g.baseline >= 0).then_some(g.baseline),
        attributes: component
            .attributes()
            .map(|(ns, key, value)| (ns.qualify(key), value.to_string()))
            .collect(),
        children: component
            .children()
            .iter()
            .filter_map(|child| entry_for(tree, *child))
            .collect(),
    })
}

/// Load a layout document straight into a component tree
pub fn load(path: &Path) -> Result<ComponentTree, DocumentError> {
    Document::from_file(path)?.to_tree()
}
