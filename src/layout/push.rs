//! Push: write widget state back into component attributes, plus the
//! targeted attribute edits the editor performs directly

use crate::model::{attrs, ComponentId, ComponentTree, Namespace};
use crate::value::{format_dp, format_id_reference};

use super::anchor::{
    attributes_written_by, connection_attribute, margin_attribute, strength_attribute,
    AlignmentBias, AnchorType, DimensionBehaviour, Strength, CONNECTIONS,
};
use super::error::SyncIssue;
use super::types::{Widget, WidgetGraph, WidgetId};

fn display_name(tree: &ComponentTree, component: ComponentId) -> String {
    tree.get(component)
        .map(|c| c.display_name().to_string())
        .unwrap_or_else(|| format!("component {}", component.0))
}

/// Serialize one anchor of `component`'s widget.
///
/// Everything the anchor could have written before is cleared first, then
/// the connection, the margins of the sides it covers and its explicit
/// strength are written. A target without an id cannot be referenced and
/// leaves the anchor unserialized.
pub fn push_to_attributes(
    tree: &mut ComponentTree,
    graph: &WidgetGraph,
    component: ComponentId,
    anchor: AnchorType,
) -> Vec<SyncIssue> {
    let issues = push_anchor(tree, graph, component, anchor);
    for issue in &issues {
        tracing::debug!(%issue, "push");
    }
    issues
}

fn push_anchor(
    tree: &mut ComponentTree,
    graph: &WidgetGraph,
    component: ComponentId,
    anchor: AnchorType,
) -> Vec<SyncIssue> {
    let mut issues = Vec::new();
    let name = display_name(tree, component);
    reset_anchor(tree, component, anchor);

    let Some(widget) = graph.widget_for(component).and_then(|w| graph.get(w)) else {
        issues.push(SyncIssue::noop(name, "component has no widget"));
        return issues;
    };
    let state = widget.anchor(anchor);
    let Some(target) = state.target else {
        return issues;
    };

    let Some(attribute) = connection_attribute(anchor, target.anchor) else {
        issues.push(SyncIssue::noop(
            name,
            format!("{} to {} has no attribute", anchor, target.anchor),
        ));
        return issues;
    };
    let target_id = graph
        .component_of(target.widget)
        .and_then(|c| tree.get(c))
        .and_then(|c| c.id.clone());
    let Some(target_id) = target_id else {
        issues.push(SyncIssue::noop(
            name,
            format!("{} target has no id", attribute),
        ));
        return issues;
    };

    let mut writes = vec![(attribute, Some(format_id_reference(&target_id)))];
    let sides = anchor.dominated();
    let is_center = sides.len() > 1;
    // A center writes both sides once either is set, `0dp` included, so an
    // uneven pair reads back without the lone-margin fallback
    let any_margin = sides.iter().any(|side| widget.anchor(*side).margin > 0);
    for side in sides {
        let Some(attr) = margin_attribute(*side) else {
            continue;
        };
        let margin = widget.anchor(*side).margin;
        if margin > 0 || (is_center && any_margin) {
            writes.push((attr, Some(format_dp(margin))));
        } else if is_center {
            writes.push((attr, None));
        }
    }
    if let (Some(attr), Some(strength)) = (strength_attribute(anchor), state.strength) {
        writes.push((attr, Some(strength.as_str().to_string())));
    }

    for (attr, value) in writes {
        tree.set_attribute(component, Namespace::App, attr, value.as_deref());
    }
    issues
}

fn has_side_connection(tree: &ComponentTree, component: ComponentId, side: AnchorType) -> bool {
    CONNECTIONS
        .iter()
        .filter(|c| c.origin == side)
        .any(|c| tree.attribute(component, Namespace::App, c.attribute).is_some())
}

/// Clear every attribute a push of `anchor` may write.
///
/// A center anchor leaves the margin of a side alone while that side still
/// has its own connection attribute.
pub fn reset_anchor(tree: &mut ComponentTree, component: ComponentId, anchor: AnchorType) {
    let sides = anchor.dominated();
    let kept: Vec<&str> = if sides.len() > 1 {
        sides
            .iter()
            .filter(|side| has_side_connection(tree, component, **side))
            .filter_map(|side| margin_attribute(*side))
            .collect()
    } else {
        Vec::new()
    };
    for attr in attributes_written_by(anchor) {
        if !kept.contains(&attr) {
            tree.set_attribute(component, Namespace::App, attr, None);
        }
    }
}

fn write_strengths(
    tree: &mut ComponentTree,
    component: ComponentId,
    lead: &str,
    trail: &str,
    code: i32,
) {
    let Some(bias) = AlignmentBias::from_code(code) else {
        return;
    };
    let (lead_strength, trail_strength) = bias.strengths();
    tree.set_attribute(
        component,
        Namespace::App,
        lead,
        lead_strength.map(Strength::as_str),
    );
    tree.set_attribute(
        component,
        Namespace::App,
        trail,
        trail_strength.map(Strength::as_str),
    );
}

/// Apply an editor alignment code to the left/right strengths.
///
/// `-1` and `1` clear both, `0` favours left, `2` favours right; other codes
/// change nothing.
pub fn reset_horizontal_alignment(tree: &mut ComponentTree, component: ComponentId, code: i32) {
    write_strengths(
        tree,
        component,
        attrs::LEFT_STRENGTH,
        attrs::RIGHT_STRENGTH,
        code,
    );
}

/// Apply an editor alignment code to the top/bottom strengths
pub fn reset_vertical_alignment(tree: &mut ComponentTree, component: ComponentId, code: i32) {
    write_strengths(
        tree,
        component,
        attrs::TOP_STRENGTH,
        attrs::BOTTOM_STRENGTH,
        code,
    );
}

/// Record the editor position of a component, in dp
pub fn set_position(
    tree: &mut ComponentTree,
    component: ComponentId,
    x: i32,
    y: i32,
) -> Result<(), SyncIssue> {
    if tree.parent(component).is_none() {
        return Err(SyncIssue::noop(
            display_name(tree, component),
            "top-level component has no editor position",
        ));
    }
    tree.set_attribute(
        component,
        Namespace::App,
        attrs::EDITOR_ABSOLUTE_X,
        Some(&format_dp(x)),
    );
    tree.set_attribute(
        component,
        Namespace::App,
        attrs::EDITOR_ABSOLUTE_Y,
        Some(&format_dp(y)),
    );
    Ok(())
}

fn dimension_text(behaviour: DimensionBehaviour, size: i32) -> String {
    match behaviour {
        DimensionBehaviour::Any => attrs::VALUE_ZERO_DP.to_string(),
        DimensionBehaviour::WrapContent => attrs::VALUE_WRAP_CONTENT.to_string(),
        DimensionBehaviour::Fixed => format_dp(size),
    }
}

/// Write a widget's dimension behaviour into `layout-width`/`layout-height`
pub fn set_dimension(tree: &mut ComponentTree, component: ComponentId, widget: &Widget) {
    let width = dimension_text(widget.horizontal, widget.width);
    let height = dimension_text(widget.vertical, widget.height);
    tree.set_attribute(
        component,
        Namespace::Android,
        attrs::LAYOUT_WIDTH,
        Some(&width),
    );
    tree.set_attribute(
        component,
        Namespace::Android,
        attrs::LAYOUT_HEIGHT,
        Some(&height),
    );
}

/// Change the margin of a connected anchor.
///
/// For a center anchor the sides it covers get the margin too. Returns false
/// and changes nothing when the anchor is disconnected or the margin is
/// negative.
pub fn set_margin(
    graph: &mut WidgetGraph,
    widget: WidgetId,
    margin: i32,
    anchor: AnchorType,
) -> bool {
    if margin < 0 {
        return false;
    }
    let Some(w) = graph.get_mut(widget) else {
        return false;
    };
    let Some(target) = w.anchor(anchor).target else {
        return false;
    };
    w.anchor_mut(anchor).margin = margin;
    for side in anchor.dominated() {
        if w.anchor(*side).target.map(|t| t.widget) == Some(target.widget) {
            w.anchor_mut(*side).margin = margin;
        }
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Geometry;

    fn fixture() -> (ComponentTree, WidgetGraph, ComponentId, ComponentId) {
        let mut tree = ComponentTree::new();
        let root = tree.add_root("ConstraintLayout", Some("root"));
        let a = tree.add_child(root, "Button", Some("a")).unwrap();
        tree.get_mut(a).unwrap().geometry = Geometry::new(0, 0, 100, 40);
        let mut graph = WidgetGraph::new();
        let wr = graph.add_widget(root, true);
        let wa = graph.add_widget(a, false);
        graph.attach(wa, wr).unwrap();
        (tree, graph, root, a)
    }

    fn app<'a>(tree: &'a ComponentTree, c: ComponentId, key: &str) -> Option<&'a str> {
        tree.attribute(c, Namespace::App, key)
    }

    #[test]
    fn test_push_writes_connection_and_margin() {
        let (mut tree, mut graph, root, a) = fixture();
        let (wr, wa) = (graph.widget_for(root).unwrap(), graph.widget_for(a).unwrap());
        graph
            .connect(wa, AnchorType::Top, wr, AnchorType::Top)
            .unwrap();
        assert!(set_margin(&mut graph, wa, 24, AnchorType::Top));

        let issues = push_to_attributes(&mut tree, &graph, a, AnchorType::Top);
        assert!(issues.is_empty());
        assert_eq!(app(&tree, a, attrs::TOP_TO_TOP_OF), Some("@+id/root"));
        assert_eq!(app(&tree, a, attrs::TOP_MARGIN), Some("24dp"));
        assert_eq!(app(&tree, a, attrs::TOP_STRENGTH), None);
    }

    #[test]
    fn test_push_clears_stale_attributes() {
        let (mut tree, graph, _, a) = fixture();
        tree.set_attribute(a, Namespace::App, attrs::LEFT_TO_RIGHT_OF, Some("@+id/gone"));
        tree.set_attribute(a, Namespace::App, attrs::LEFT_MARGIN, Some("8dp"));
        tree.set_attribute(a, Namespace::App, attrs::LEFT_STRENGTH, Some("weak"));
        tree.set_attribute(a, Namespace::App, attrs::RIGHT_MARGIN, Some("8dp"));

        push_to_attributes(&mut tree, &graph, a, AnchorType::Left);
        assert_eq!(app(&tree, a, attrs::LEFT_TO_RIGHT_OF), None);
        assert_eq!(app(&tree, a, attrs::LEFT_MARGIN), None);
        assert_eq!(app(&tree, a, attrs::LEFT_STRENGTH), None);
        assert_eq!(app(&tree, a, attrs::RIGHT_MARGIN), Some("8dp"));
    }

    #[test]
    fn test_center_push_writes_both_margins() {
        let (mut tree, mut graph, root, a) = fixture();
        let (wr, wa) = (graph.widget_for(root).unwrap(), graph.widget_for(a).unwrap());
        graph
            .connect(wa, AnchorType::CenterX, wr, AnchorType::CenterX)
            .unwrap();
        graph.get_mut(wa).unwrap().anchor_mut(AnchorType::Right).margin = 8;

        push_to_attributes(&mut tree, &graph, a, AnchorType::CenterX);
        assert_eq!(app(&tree, a, attrs::LEFT_MARGIN), Some("0dp"));
        assert_eq!(app(&tree, a, attrs::RIGHT_MARGIN), Some("8dp"));

        graph.get_mut(wa).unwrap().anchor_mut(AnchorType::Right).margin = 0;
        push_to_attributes(&mut tree, &graph, a, AnchorType::CenterX);
        assert_eq!(app(&tree, a, attrs::LEFT_MARGIN), None);
        assert_eq!(app(&tree, a, attrs::RIGHT_MARGIN), None);
    }

    #[test]
    fn test_center_reset_keeps_side_owned_margin() {
        let (mut tree, _, _, a) = fixture();
        tree.set_attribute(a, Namespace::App, attrs::LEFT_TO_LEFT_OF, Some("@+id/root"));
        tree.set_attribute(a, Namespace::App, attrs::LEFT_MARGIN, Some("12dp"));
        tree.set_attribute(a, Namespace::App, attrs::RIGHT_MARGIN, Some("4dp"));
        tree.set_attribute(
            a,
            Namespace::App,
            attrs::CENTER_X_TO_CENTER_X_OF,
            Some("@+id/root"),
        );

        reset_anchor(&mut tree, a, AnchorType::CenterX);
        assert_eq!(app(&tree, a, attrs::CENTER_X_TO_CENTER_X_OF), None);
        assert_eq!(app(&tree, a, attrs::LEFT_MARGIN), Some("12dp"));
        assert_eq!(app(&tree, a, attrs::RIGHT_MARGIN), None);
    }

    #[test]
    fn test_push_target_without_id() {
        let (mut tree, mut graph, root, a) = fixture();
        let anon = tree.add_child(root, "View", None).unwrap();
        let wanon = graph.add_widget(anon, false);
        let wa = graph.widget_for(a).unwrap();
        graph
            .connect(wa, AnchorType::Left, wanon, AnchorType::Right)
            .unwrap();

        let issues = push_to_attributes(&mut tree, &graph, a, AnchorType::Left);
        assert!(matches!(issues[..], [SyncIssue::StructuralNoop { .. }]));
        assert_eq!(app(&tree, a, attrs::LEFT_TO_RIGHT_OF), None);
    }

    #[test]
    fn test_alignment_codes_write_strengths() {
        let (mut tree, _, _, a) = fixture();
        reset_horizontal_alignment(&mut tree, a, 0);
        assert_eq!(app(&tree, a, attrs::LEFT_STRENGTH), Some("strong"));
        assert_eq!(app(&tree, a, attrs::RIGHT_STRENGTH), Some("weak"));

        reset_horizontal_alignment(&mut tree, a, 5);
        assert_eq!(app(&tree, a, attrs::LEFT_STRENGTH), Some("strong"));

        reset_horizontal_alignment(&mut tree, a, 1);
        assert_eq!(app(&tree, a, attrs::LEFT_STRENGTH), None);
        assert_eq!(app(&tree, a, attrs::RIGHT_STRENGTH), None);

        reset_vertical_alignment(&mut tree, a, 2);
        assert_eq!(app(&tree, a, attrs::TOP_STRENGTH), Some("weak"));
        assert_eq!(app(&tree, a, attrs::BOTTOM_STRENGTH), Some("strong"));
    }

    #[test]
    fn test_set_position() {
        let (mut tree, _, root, a) = fixture();
        set_position(&mut tree, a, 12, 40).unwrap();
        assert_eq!(app(&tree, a, attrs::EDITOR_ABSOLUTE_X), Some("12dp"));
        assert_eq!(app(&tree, a, attrs::EDITOR_ABSOLUTE_Y), Some("40dp"));

        assert!(set_position(&mut tree, root, 1, 1).is_err());
        assert_eq!(app(&tree, root, attrs::EDITOR_ABSOLUTE_X), None);
    }

    #[test]
    fn test_set_dimension() {
        let (mut tree, mut graph, _, a) = fixture();
        let wa = graph.widget_for(a).unwrap();
        {
            let w = graph.get_mut(wa).unwrap();
            w.width = 64;
            w.horizontal = DimensionBehaviour::Fixed;
            w.vertical = DimensionBehaviour::Any;
        }
        set_dimension(&mut tree, a, graph.get(wa).unwrap());
        assert_eq!(
            tree.attribute(a, Namespace::Android, attrs::LAYOUT_WIDTH),
            Some("64dp")
        );
        assert_eq!(
            tree.attribute(a, Namespace::Android, attrs::LAYOUT_HEIGHT),
            Some("0dp")
        );
    }

    #[test]
    fn test_set_margin_requires_connection() {
        let (_, mut graph, _, a) = fixture();
        let wa = graph.widget_for(a).unwrap();
        assert!(!set_margin(&mut graph, wa, 8, AnchorType::Left));
        assert_eq!(graph.get(wa).unwrap().anchor(AnchorType::Left).margin, 0);
    }
}
