//! Component tree holding the attribute model
//!
//! Components live in an arena and refer to each other by [`ComponentId`].
//! The parent link is a plain back-reference; ownership flows from the tree.

use std::collections::BTreeMap;

use super::attrs::Namespace;

/// Stable handle to a component in a [`ComponentTree`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ComponentId(pub u32);

impl ComponentId {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// Pixel-space geometry of a component
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Geometry {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
    /// Baseline offset from the top, or -1 when the component has none
    pub baseline: i32,
}

impl Geometry {
    pub fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width,
            height,
            baseline: -1,
        }
    }

    pub fn with_baseline(mut self, baseline: i32) -> Self {
        self.baseline = baseline;
        self
    }
}

impl Default for Geometry {
    fn default() -> Self {
        Self::new(0, 0, 0, 0)
    }
}

/// A node in the component tree
#[derive(Debug, Clone, PartialEq)]
pub struct Component {
    pub id: Option<String>,
    pub tag: String,
    pub geometry: Geometry,
    parent: Option<ComponentId>,
    children: Vec<ComponentId>,
    attributes: BTreeMap<(Namespace, String), String>,
}

impl Component {
    fn new(tag: &str, id: Option<&str>, parent: Option<ComponentId>) -> Self {
        Self {
            id: id.map(str::to_string),
            tag: tag.to_string(),
            geometry: Geometry::default(),
            parent,
            children: Vec::new(),
            attributes: BTreeMap::new(),
        }
    }

    pub fn parent(&self) -> Option<ComponentId> {
        self.parent
    }

    pub fn children(&self) -> &[ComponentId] {
        &self.children
    }

    /// Get an attribute value; an absent key is distinct from an empty value
    pub fn attribute(&self, namespace: Namespace, key: &str) -> Option<&str> {
        self.attributes
            .get(&(namespace, key.to_string()))
            .map(String::as_str)
    }

    /// Set an attribute value, or remove it when `value` is `None`
    pub fn set_attribute(&mut self, namespace: Namespace, key: &str, value: Option<&str>) {
        match value {
            Some(v) => {
                self.attributes
                    .insert((namespace, key.to_string()), v.to_string());
            }
            None => {
                self.attributes.remove(&(namespace, key.to_string()));
            }
        }
    }

    /// All attributes in (namespace, key) order
    pub fn attributes(&self) -> impl Iterator<Item = (Namespace, &str, &str)> {
        self.attributes
            .iter()
            .map(|((ns, key), value)| (*ns, key.as_str(), value.as_str()))
    }

    /// The id if present, otherwise the tag; used in messages
    pub fn display_name(&self) -> &str {
        self.id.as_deref().unwrap_or(&self.tag)
    }
}

/// Arena of components with an ordered list of roots
#[derive(Debug, Clone, Default)]
pub struct ComponentTree {
    nodes: Vec<Option<Component>>,
    roots: Vec<ComponentId>,
}

impl ComponentTree {
    pub fn new() -> Self {
        Self::default()
    }

    fn alloc(&mut self, component: Component) -> ComponentId {
        let id = ComponentId(self.nodes.len() as u32);
        self.nodes.push(Some(component));
        id
    }

    /// Add a top-level component
    pub fn add_root(&mut self, tag: &str, id: Option<&str>) -> ComponentId {
        let cid = self.alloc(Component::new(tag, id, None));
        self.roots.push(cid);
        cid
    }

    /// Append a child to `parent`; returns `None` if `parent` is not in the tree
    pub fn add_child(
        &mut self,
        parent: ComponentId,
        tag: &str,
        id: Option<&str>,
    ) -> Option<ComponentId> {
        if !self.contains(parent) {
            return None;
        }
        let cid = self.alloc(Component::new(tag, id, Some(parent)));
        if let Some(p) = self.get_mut(parent) {
            p.children.push(cid);
        }
        Some(cid)
    }

    /// Remove a component and its subtree.
    ///
    /// Returns the removed handles in pre-order so callers can release
    /// whatever they keyed on them.
    pub fn remove(&mut self, id: ComponentId) -> Vec<ComponentId> {
        let removed = self.descendants(id);
        if removed.is_empty() {
            return removed;
        }

        match self.parent(id) {
            Some(parent) => {
                if let Some(p) = self.get_mut(parent) {
                    p.children.retain(|c| *c != id);
                }
            }
            None => self.roots.retain(|r| *r != id),
        }

        for cid in &removed {
            if let Some(slot) = self.nodes.get_mut(cid.index()) {
                *slot = None;
            }
        }
        removed
    }

    pub fn get(&self, id: ComponentId) -> Option<&Component> {
        self.nodes.get(id.index()).and_then(Option::as_ref)
    }

    pub fn get_mut(&mut self, id: ComponentId) -> Option<&mut Component> {
        self.nodes.get_mut(id.index()).and_then(Option::as_mut)
    }

    pub fn contains(&self, id: ComponentId) -> bool {
        self.get(id).is_some()
    }

    pub fn roots(&self) -> &[ComponentId] {
        &self.roots
    }

    pub fn parent(&self, id: ComponentId) -> Option<ComponentId> {
        self.get(id).and_then(Component::parent)
    }

    pub fn children(&self, id: ComponentId) -> &[ComponentId] {
        self.get(id).map(Component::children).unwrap_or(&[])
    }

    /// `root` and everything below it, in pre-order
    pub fn descendants(&self, root: ComponentId) -> Vec<ComponentId> {
        let mut out = Vec::new();
        if !self.contains(root) {
            return out;
        }
        let mut stack = vec![root];
        while let Some(cid) = stack.pop() {
            out.push(cid);
            // Reverse so the leftmost child is visited first
            stack.extend(self.children(cid).iter().rev().copied());
        }
        out
    }

    /// Every live component, roots in order, each subtree in pre-order
    pub fn iter(&self) -> Vec<ComponentId> {
        self.roots
            .iter()
            .flat_map(|root| self.descendants(*root))
            .collect()
    }

    /// Number of live components
    pub fn len(&self) -> usize {
        self.nodes.iter().filter(|n| n.is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn attribute(&self, id: ComponentId, namespace: Namespace, key: &str) -> Option<&str> {
        self.get(id)?.attribute(namespace, key)
    }

    /// Set or clear an attribute; returns false when the component is gone
    pub fn set_attribute(
        &mut self,
        id: ComponentId,
        namespace: Namespace,
        key: &str,
        value: Option<&str>,
    ) -> bool {
        match self.get_mut(id) {
            Some(component) => {
                component.set_attribute(namespace, key, value);
                true
            }
            None => false,
        }
    }
}
