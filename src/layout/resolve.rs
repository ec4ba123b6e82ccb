//! Id resolution: from `@+id/name` text to a component and its widget

use crate::model::{ComponentId, ComponentTree};
use crate::value::extract_id;

use super::types::{WidgetGraph, WidgetId};

/// Why a reference did not resolve
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReferenceError {
    /// The text is not an id reference at all
    NotAReference,
    /// No participating component carries the id
    UnknownId(String),
}

fn same_id(a: &str, b: &str) -> bool {
    a.chars()
        .flat_map(char::to_lowercase)
        .eq(b.chars().flat_map(char::to_lowercase))
}

/// Find the first component under `root` (inclusive) whose id matches,
/// ignoring case.
///
/// The search is pre-order: a component before its children, children left
/// to right.
pub fn find_by_id(tree: &ComponentTree, root: ComponentId, id: &str) -> Option<ComponentId> {
    let mut stack = vec![root];
    while let Some(cid) = stack.pop() {
        let Some(component) = tree.get(cid) else {
            continue;
        };
        if component.id.as_deref().is_some_and(|own| same_id(own, id)) {
            return Some(cid);
        }
        stack.extend(component.children().iter().rev().copied());
    }
    None
}

/// [`find_by_id`] across every root in order
pub fn find_in_tree(tree: &ComponentTree, id: &str) -> Option<ComponentId> {
    tree.roots()
        .iter()
        .find_map(|root| find_by_id(tree, *root, id))
}

/// Resolve connection attribute text to the target component and widget
pub fn resolve_reference(
    tree: &ComponentTree,
    graph: &WidgetGraph,
    value: &str,
) -> Result<(ComponentId, WidgetId), ReferenceError> {
    let id = extract_id(value).ok_or(ReferenceError::NotAReference)?;
    let component = find_in_tree(tree, &id).ok_or_else(|| ReferenceError::UnknownId(id.clone()))?;
    let widget = graph
        .widget_for(component)
        .ok_or(ReferenceError::UnknownId(id))?;
    Ok((component, widget))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_case_insensitive() {
        let mut tree = ComponentTree::new();
        let root = tree.add_root("ConstraintLayout", Some("root"));
        let b = tree.add_child(root, "Button", Some("OkButton")).unwrap();
        assert_eq!(find_by_id(&tree, root, "okbutton"), Some(b));
        assert_eq!(find_by_id(&tree, root, "ROOT"), Some(root));
        assert_eq!(find_by_id(&tree, root, "cancel"), None);
    }

    #[test]
    fn test_preorder_first_match_wins() {
        let mut tree = ComponentTree::new();
        let root = tree.add_root("ConstraintLayout", None);
        let a = tree.add_child(root, "FrameLayout", None).unwrap();
        let deep = tree.add_child(a, "Button", Some("dup")).unwrap();
        let _late = tree.add_child(root, "Button", Some("dup")).unwrap();
        assert_eq!(find_by_id(&tree, root, "dup"), Some(deep));
    }

    #[test]
    fn test_resolve_reference_failures() {
        let mut tree = ComponentTree::new();
        let root = tree.add_root("ConstraintLayout", Some("root"));
        let graph = WidgetGraph::new();
        assert_eq!(
            resolve_reference(&tree, &graph, "8dp"),
            Err(ReferenceError::NotAReference)
        );
        assert_eq!(
            resolve_reference(&tree, &graph, "@+id/missing"),
            Err(ReferenceError::UnknownId("missing".to_string()))
        );
        // Present in the tree but without a widget
        assert_eq!(
            resolve_reference(&tree, &graph, "@+id/root"),
            Err(ReferenceError::UnknownId("root".to_string()))
        );

        let mut graph = WidgetGraph::new();
        let w = graph.add_widget(root, true);
        assert_eq!(resolve_reference(&tree, &graph, "@id/ROOT"), Ok((root, w)));
    }
}
