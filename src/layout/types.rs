//! Core types for the widget graph

use std::collections::HashMap;
use std::fmt;

use crate::model::ComponentId;

use super::anchor::{is_allowed, AnchorType, DimensionBehaviour, Strength};
use super::error::GraphError;

/// Stable handle to a widget in a [`WidgetGraph`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct WidgetId(pub u32);

impl WidgetId {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for WidgetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// The far end of a connection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AnchorTarget {
    pub widget: WidgetId,
    pub anchor: AnchorType,
}

/// An attachment point on a widget
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Anchor {
    pub kind: AnchorType,
    pub target: Option<AnchorTarget>,
    /// Distance kept from the target, in dp
    pub margin: i32,
    /// `None` leaves the bias to the solver
    pub strength: Option<Strength>,
}

impl Anchor {
    pub fn new(kind: AnchorType) -> Self {
        Self {
            kind,
            target: None,
            margin: 0,
            strength: None,
        }
    }

    pub fn is_connected(&self) -> bool {
        self.target.is_some()
    }

    /// Drop the connection, margin and strength
    pub fn reset(&mut self) {
        self.target = None;
        self.margin = 0;
        self.strength = None;
    }
}

/// A node in the constraint graph, mirroring one component
#[derive(Debug, Clone, PartialEq)]
pub struct Widget {
    pub component: ComponentId,
    /// Origin relative to the parent container, in dp
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
    pub min_width: i32,
    pub min_height: i32,
    pub horizontal: DimensionBehaviour,
    pub vertical: DimensionBehaviour,
    /// Distance from top to baseline, or -1
    pub baseline: i32,
    parent: Option<WidgetId>,
    /// `Some` when the widget can hold children
    children: Option<Vec<WidgetId>>,
    anchors: [Anchor; 7],
}

impl Widget {
    fn new(component: ComponentId, container: bool) -> Self {
        Self {
            component,
            x: 0,
            y: 0,
            width: 0,
            height: 0,
            min_width: 0,
            min_height: 0,
            horizontal: DimensionBehaviour::Fixed,
            vertical: DimensionBehaviour::Fixed,
            baseline: -1,
            parent: None,
            children: container.then(Vec::new),
            anchors: AnchorType::ALL.map(Anchor::new),
        }
    }

    pub fn anchor(&self, kind: AnchorType) -> &Anchor {
        &self.anchors[kind.index()]
    }

    pub fn anchor_mut(&mut self, kind: AnchorType) -> &mut Anchor {
        &mut self.anchors[kind.index()]
    }

    pub fn anchors(&self) -> &[Anchor] {
        &self.anchors
    }

    pub fn reset_anchors(&mut self) {
        for anchor in &mut self.anchors {
            anchor.reset();
        }
    }

    pub fn parent(&self) -> Option<WidgetId> {
        self.parent
    }

    pub fn is_container(&self) -> bool {
        self.children.is_some()
    }

    pub fn children(&self) -> &[WidgetId] {
        self.children.as_deref().unwrap_or(&[])
    }

    pub fn has_baseline(&self) -> bool {
        self.baseline >= 0
    }
}

/// Arena of widgets plus the widget/component mapping
#[derive(Debug, Clone, Default)]
pub struct WidgetGraph {
    widgets: Vec<Option<Widget>>,
    by_component: HashMap<ComponentId, WidgetId>,
}

impl WidgetGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create the widget for `component`, or return the one it already has
    pub fn add_widget(&mut self, component: ComponentId, container: bool) -> WidgetId {
        if let Some(existing) = self.by_component.get(&component) {
            return *existing;
        }
        let id = WidgetId(self.widgets.len() as u32);
        self.widgets.push(Some(Widget::new(component, container)));
        self.by_component.insert(component, id);
        id
    }

    /// Destroy a widget.
    ///
    /// Anchors elsewhere that target it are disconnected, it is detached from
    /// its container, and its own children become parentless.
    pub fn remove_widget(&mut self, id: WidgetId) -> Option<Widget> {
        if !self.contains(id) {
            return None;
        }
        self.detach(id);

        for widget in self.widgets.iter_mut().flatten() {
            for anchor in widget.anchors.iter_mut() {
                if anchor.target.map(|t| t.widget) == Some(id) {
                    anchor.reset();
                }
            }
            if widget.parent == Some(id) {
                widget.parent = None;
            }
        }

        let removed = self.widgets.get_mut(id.index())?.take()?;
        self.by_component.remove(&removed.component);
        Some(removed)
    }

    pub fn get(&self, id: WidgetId) -> Option<&Widget> {
        self.widgets.get(id.index()).and_then(Option::as_ref)
    }

    pub fn get_mut(&mut self, id: WidgetId) -> Option<&mut Widget> {
        self.widgets.get_mut(id.index()).and_then(Option::as_mut)
    }

    pub fn contains(&self, id: WidgetId) -> bool {
        self.get(id).is_some()
    }

    pub fn widget_for(&self, component: ComponentId) -> Option<WidgetId> {
        self.by_component.get(&component).copied()
    }

    pub fn component_of(&self, widget: WidgetId) -> Option<ComponentId> {
        self.get(widget).map(|w| w.component)
    }

    /// Live widgets in handle order
    pub fn iter(&self) -> impl Iterator<Item = (WidgetId, &Widget)> {
        self.widgets
            .iter()
            .enumerate()
            .filter_map(|(i, w)| w.as_ref().map(|w| (WidgetId(i as u32), w)))
    }

    /// Widgets without a container, in handle order
    pub fn roots(&self) -> Vec<WidgetId> {
        self.iter()
            .filter(|(_, w)| w.parent.is_none())
            .map(|(id, _)| id)
            .collect()
    }

    pub fn len(&self) -> usize {
        self.by_component.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_component.is_empty()
    }

    /// Grant or revoke the ability to hold children. Revoking detaches the
    /// current children.
    pub fn set_container(&mut self, id: WidgetId, container: bool) {
        let Some(w) = self.get(id) else {
            return;
        };
        if w.is_container() == container {
            return;
        }
        let orphans = w.children().to_vec();
        for child in orphans {
            self.detach(child);
        }
        if let Some(w) = self.get_mut(id) {
            w.children = container.then(Vec::new);
        }
    }

    /// Place `child` inside `parent`. Attaching to the current parent is a
    /// no-op; attaching elsewhere moves the child.
    pub fn attach(&mut self, child: WidgetId, parent: WidgetId) -> Result<(), GraphError> {
        if !self.contains(child) {
            return Err(GraphError::UnknownWidget(child));
        }
        let container = self.get(parent).ok_or(GraphError::UnknownWidget(parent))?;
        if !container.is_container() || child == parent {
            return Err(GraphError::NotAContainer(parent));
        }
        if self.get(child).and_then(Widget::parent) == Some(parent) {
            return Ok(());
        }

        self.detach(child);
        if let Some(children) = self.get_mut(parent).and_then(|p| p.children.as_mut()) {
            children.push(child);
        }
        if let Some(w) = self.get_mut(child) {
            w.parent = Some(parent);
        }
        Ok(())
    }

    /// Remove `child` from its container, if it has one
    pub fn detach(&mut self, child: WidgetId) {
        let Some(parent) = self.get(child).and_then(Widget::parent) else {
            return;
        };
        if let Some(children) = self.get_mut(parent).and_then(|p| p.children.as_mut()) {
            children.retain(|c| *c != child);
        }
        if let Some(w) = self.get_mut(child) {
            w.parent = None;
        }
    }

    /// Connect `origin` on `widget` to `target_anchor` on `target`.
    ///
    /// A center connection also connects the two sides it dominates to the
    /// matching sides of the target. Margins start at zero.
    pub fn connect(
        &mut self,
        widget: WidgetId,
        origin: AnchorType,
        target: WidgetId,
        target_anchor: AnchorType,
    ) -> Result<(), GraphError> {
        if widget == target {
            return Err(GraphError::SelfConnection { widget });
        }
        if !is_allowed(origin, target_anchor) {
            return Err(GraphError::IncompatibleAnchors {
                origin,
                target: target_anchor,
            });
        }
        if !self.contains(target) {
            return Err(GraphError::UnknownWidget(target));
        }
        let w = self.get_mut(widget).ok_or(GraphError::UnknownWidget(widget))?;

        let mut link = |kind: AnchorType, target_kind: AnchorType| {
            let anchor = w.anchor_mut(kind);
            anchor.target = Some(AnchorTarget {
                widget: target,
                anchor: target_kind,
            });
            anchor.margin = 0;
        };

        if matches!(origin, AnchorType::CenterX | AnchorType::CenterY) {
            for side in origin.dominated() {
                link(*side, *side);
            }
        }
        link(origin, target_anchor);
        Ok(())
    }

    /// Drop a connection; unknown widgets are ignored
    pub fn disconnect(&mut self, widget: WidgetId, anchor: AnchorType) {
        if let Some(w) = self.get_mut(widget) {
            w.anchor_mut(anchor).reset();
        }
    }
}
