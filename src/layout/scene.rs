//! Scene: keeps one widget per component and drives pull, push and solve
//! over a whole component tree

use crate::model::{ComponentId, ComponentTree};

use super::anchor::AnchorType;
use super::config::{DpConverter, SyncConfig};
use super::error::SyncIssue;
use super::pull::pull_from_attributes;
use super::push::push_to_attributes;
use super::solver::{solve, Solution, SolverError};
use super::types::{WidgetGraph, WidgetId};

/// A widget graph mirroring a component tree
#[derive(Debug, Clone, Default)]
pub struct Scene {
    graph: WidgetGraph,
    config: SyncConfig,
}

impl Scene {
    pub fn new(config: SyncConfig) -> Self {
        Self {
            graph: WidgetGraph::new(),
            config,
        }
    }

    /// Create a scene for `tree` and pull every component into it
    pub fn build(tree: &ComponentTree, config: SyncConfig) -> (Self, Vec<SyncIssue>) {
        let mut scene = Self::new(config);
        let issues = scene.sync(tree);
        (scene, issues)
    }

    pub fn graph(&self) -> &WidgetGraph {
        &self.graph
    }

    pub fn graph_mut(&mut self) -> &mut WidgetGraph {
        &mut self.graph
    }

    pub fn config(&self) -> &SyncConfig {
        &self.config
    }

    pub fn widget_for(&self, component: ComponentId) -> Option<WidgetId> {
        self.graph.widget_for(component)
    }

    fn is_container(&self, tree: &ComponentTree, component: ComponentId) -> bool {
        !tree.children(component).is_empty()
            || tree
                .get(component)
                .is_some_and(|c| self.config.is_container_tag(&c.tag))
    }

    /// Bring the graph in line with the tree.
    ///
    /// Widgets whose component is gone are destroyed, every component gets a
    /// widget, and then every component is pulled, parents before children.
    pub fn sync(&mut self, tree: &ComponentTree) -> Vec<SyncIssue> {
        let stale: Vec<WidgetId> = self
            .graph
            .iter()
            .filter(|(_, w)| !tree.contains(w.component))
            .map(|(id, _)| id)
            .collect();
        for id in stale {
            self.graph.remove_widget(id);
        }

        let order = tree.iter();
        for cid in &order {
            let container = self.is_container(tree, *cid);
            let widget = self.graph.add_widget(*cid, container);
            self.graph.set_container(widget, container);
        }

        let mut issues = Vec::new();
        for cid in &order {
            issues.extend(pull_from_attributes(
                tree,
                &mut self.graph,
                *cid,
                &self.config.density,
            ));
        }
        tracing::debug!(
            widgets = self.graph.len(),
            issues = issues.len(),
            "scene synced"
        );
        issues
    }

    /// Remove a component subtree from the tree and destroy its widgets.
    ///
    /// Returns the number of widgets destroyed.
    pub fn remove_component(&mut self, tree: &mut ComponentTree, component: ComponentId) -> usize {
        let widgets: Vec<WidgetId> = tree
            .remove(component)
            .into_iter()
            .filter_map(|cid| self.graph.widget_for(cid))
            .collect();
        widgets
            .into_iter()
            .filter_map(|wid| self.graph.remove_widget(wid))
            .count()
    }

    /// Serialize one anchor of a component's widget back to attributes
    pub fn push_anchor(
        &self,
        tree: &mut ComponentTree,
        component: ComponentId,
        anchor: AnchorType,
    ) -> Vec<SyncIssue> {
        push_to_attributes(tree, &self.graph, component, anchor)
    }

    /// Solve the current graph
    pub fn solve(&self) -> Result<Solution, SolverError> {
        solve(&self.graph)
    }

    /// Copy solved frames into widgets (parent-relative dp) and component
    /// geometry (absolute px)
    pub fn apply_solution(&mut self, tree: &mut ComponentTree, solution: &Solution) {
        let ids: Vec<WidgetId> = self.graph.iter().map(|(id, _)| id).collect();
        let converter = self.config.density;
        for id in ids {
            let frame = solution.frame(id);
            let Some(widget) = self.graph.get(id) else {
                continue;
            };
            let component = widget.component;
            let (px, py) = widget
                .parent()
                .map(|p| {
                    let pf = solution.frame(p);
                    (pf.x, pf.y)
                })
                .unwrap_or((0.0, 0.0));

            if let Some(w) = self.graph.get_mut(id) {
                w.x = (frame.x - px).round() as i32;
                w.y = (frame.y - py).round() as i32;
                w.width = frame.width.round() as i32;
                w.height = frame.height.round() as i32;
            }
            if let Some(c) = tree.get_mut(component) {
                c.geometry.x = converter.dp_to_px(frame.x.round() as i32);
                c.geometry.y = converter.dp_to_px(frame.y.round() as i32);
                c.geometry.width = converter.dp_to_px(frame.width.round() as i32);
                c.geometry.height = converter.dp_to_px(frame.height.round() as i32);
            }
        }
    }
}
