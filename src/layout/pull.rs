//! Pull: rebuild a widget's state from its component's attributes

use crate::model::{attrs, Component, ComponentId, ComponentTree, Namespace};
use crate::value::{extract_dp, parse_value};

use super::anchor::{AnchorType, DimensionBehaviour, Strength, CONNECTIONS};
use super::anchor::{margin_attribute, strength_attribute};
use super::config::DpConverter;
use super::error::SyncIssue;
use super::resolve::{resolve_reference, ReferenceError};
use super::types::{WidgetGraph, WidgetId};

const SIDES: [AnchorType; 4] = [
    AnchorType::Left,
    AnchorType::Right,
    AnchorType::Top,
    AnchorType::Bottom,
];

/// Size decision for one axis
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct AxisSize {
    behaviour: DimensionBehaviour,
    size: i32,
    min: i32,
}

/// Update the widget of `component` from the component's geometry and
/// attributes.
///
/// Every anchor is reset and rebuilt, so pulling unchanged attributes twice
/// leaves the widget identical. Problems with individual attributes are
/// returned as issues; the rest of the pull still happens.
pub fn pull_from_attributes(
    tree: &ComponentTree,
    graph: &mut WidgetGraph,
    component: ComponentId,
    converter: &dyn DpConverter,
) -> Vec<SyncIssue> {
    let mut issues = Vec::new();
    let Some(comp) = tree.get(component) else {
        return issues;
    };
    let name = comp.display_name();
    let Some(widget) = graph.widget_for(component) else {
        issues.push(SyncIssue::noop(name, "component has no widget"));
        return issues;
    };

    attach_to_parent(tree, graph, component, widget);
    pull_frame(tree, graph, comp, widget, converter, &mut issues);

    if let Some(w) = graph.get_mut(widget) {
        w.reset_anchors();
    }
    pull_connections(tree, graph, comp, widget, &mut issues);
    pull_margins(graph, comp, widget, &mut issues);
    pull_strengths(graph, comp, widget, &mut issues);

    for issue in &issues {
        tracing::debug!(%issue, "pull");
    }
    issues
}

fn attach_to_parent(
    tree: &ComponentTree,
    graph: &mut WidgetGraph,
    component: ComponentId,
    widget: WidgetId,
) {
    let Some(parent_widget) = tree.parent(component).and_then(|p| graph.widget_for(p)) else {
        return;
    };
    let is_container = graph.get(parent_widget).is_some_and(|p| p.is_container());
    if is_container {
        if let Err(err) = graph.attach(widget, parent_widget) {
            tracing::debug!(%err, "attach");
        }
    }
}

fn pull_frame(
    tree: &ComponentTree,
    graph: &mut WidgetGraph,
    comp: &Component,
    widget: WidgetId,
    converter: &dyn DpConverter,
    issues: &mut Vec<SyncIssue>,
) {
    let g = comp.geometry;
    let name = comp.display_name();

    let horizontal = infer_axis(
        comp.attribute(Namespace::Android, attrs::LAYOUT_WIDTH),
        g.width,
        converter,
        name,
        attrs::LAYOUT_WIDTH,
        issues,
    );
    let vertical = infer_axis(
        comp.attribute(Namespace::Android, attrs::LAYOUT_HEIGHT),
        g.height,
        converter,
        name,
        attrs::LAYOUT_HEIGHT,
        issues,
    );

    // Origin is relative to the container the widget is attached to
    let (mut x, mut y) = (converter.px_to_dp(g.x), converter.px_to_dp(g.y));
    let container = graph
        .get(widget)
        .and_then(|w| w.parent())
        .and_then(|p| graph.component_of(p))
        .and_then(|c| tree.get(c));
    if let Some(parent) = container {
        x -= converter.px_to_dp(parent.geometry.x);
        y -= converter.px_to_dp(parent.geometry.y);
    }

    let Some(w) = graph.get_mut(widget) else {
        return;
    };
    w.x = x;
    w.y = y;
    w.width = horizontal.size;
    w.height = vertical.size;
    w.horizontal = horizontal.behaviour;
    w.vertical = vertical.behaviour;
    w.min_width = horizontal.min;
    w.min_height = vertical.min;
    w.baseline = if g.baseline < 0 {
        -1
    } else {
        converter.px_to_dp(g.baseline)
    };
}

/// Decide the behaviour and size of one axis.
///
/// `0`/`0dp` or an empty pixel size means the constraints size the widget;
/// `wrap_content` freezes the current size as the minimum; anything else is
/// a fixed size taken from the attribute when it is a dp length.
fn infer_axis(
    attr: Option<&str>,
    px_size: i32,
    converter: &dyn DpConverter,
    component: &str,
    attr_name: &str,
    issues: &mut Vec<SyncIssue>,
) -> AxisSize {
    let size = converter.px_to_dp(px_size);
    let dp = attr.and_then(extract_dp);

    if px_size == 0 || dp == Some(0) {
        return AxisSize {
            behaviour: DimensionBehaviour::Any,
            size,
            min: 0,
        };
    }
    let parsed = attr.map(parse_value);
    let is_keyword = |keyword: &str| {
        parsed
            .as_ref()
            .is_some_and(|p| p.as_ref().is_ok_and(|v| v.is_keyword(keyword)))
    };
    if is_keyword(attrs::VALUE_WRAP_CONTENT) {
        return AxisSize {
            behaviour: DimensionBehaviour::WrapContent,
            size,
            min: size,
        };
    }

    let size = match (attr, dp) {
        (_, Some(v)) => v,
        (_, None) if is_keyword(attrs::VALUE_MATCH_PARENT) => size,
        (Some(text), None) if parsed.as_ref().is_some_and(|p| p.is_err()) => {
            issues.push(SyncIssue::malformed(component, attr_name, text));
            size
        }
        // Lengths in other units keep the pixel size
        _ => size,
    };
    AxisSize {
        behaviour: DimensionBehaviour::Fixed,
        size,
        min: 0,
    }
}

fn pull_connections(
    tree: &ComponentTree,
    graph: &mut WidgetGraph,
    comp: &Component,
    widget: WidgetId,
    issues: &mut Vec<SyncIssue>,
) {
    let name = comp.display_name();
    for conn in CONNECTIONS.iter() {
        let Some(value) = comp.attribute(Namespace::App, conn.attribute) else {
            continue;
        };
        match resolve_reference(tree, graph, value) {
            Ok((_, target)) => {
                if let Err(err) = graph.connect(widget, conn.origin, target, conn.target) {
                    issues.push(SyncIssue::noop(
                        name,
                        format!("{} not applied: {}", conn.attribute, err),
                    ));
                }
            }
            Err(ReferenceError::UnknownId(id)) => {
                issues.push(SyncIssue::unresolved(name, conn.attribute, id));
            }
            Err(ReferenceError::NotAReference) => {
                issues.push(SyncIssue::malformed(name, conn.attribute, value));
            }
        }
    }
}

/// Margin attribute of `side` in dp, or `None` when absent or unreadable
fn read_margin(comp: &Component, side: AnchorType, issues: &mut Vec<SyncIssue>) -> Option<i32> {
    let attribute = margin_attribute(side)?;
    let text = comp.attribute(Namespace::App, attribute)?;
    match extract_dp(text) {
        Some(m) if m >= 0 => Some(m),
        _ => {
            issues.push(SyncIssue::malformed(comp.display_name(), attribute, text));
            None
        }
    }
}

fn pull_margins(
    graph: &mut WidgetGraph,
    comp: &Component,
    widget: WidgetId,
    issues: &mut Vec<SyncIssue>,
) {
    let Some(w) = graph.get_mut(widget) else {
        return;
    };
    for side in SIDES {
        if !w.anchor(side).is_connected() {
            continue;
        }
        let own = read_margin(comp, side, issues);
        let center = if side.is_horizontal() {
            AnchorType::CenterX
        } else {
            AnchorType::CenterY
        };
        // Under a center connection a lone margin applies to both sides
        let margin = match (own, side.opposite()) {
            (None, Some(opposite)) if w.anchor(center).is_connected() => {
                let mut ignored = Vec::new();
                read_margin(comp, opposite, &mut ignored)
            }
            (own, _) => own,
        };
        w.anchor_mut(side).margin = margin.unwrap_or(0);
    }
}

fn pull_strengths(
    graph: &mut WidgetGraph,
    comp: &Component,
    widget: WidgetId,
    issues: &mut Vec<SyncIssue>,
) {
    let Some(w) = graph.get_mut(widget) else {
        return;
    };
    for side in SIDES {
        let Some(attribute) = strength_attribute(side) else {
            continue;
        };
        let Some(text) = comp.attribute(Namespace::App, attribute) else {
            continue;
        };
        match Strength::parse(text) {
            Some(strength) => w.anchor_mut(side).strength = Some(strength),
            None => issues.push(SyncIssue::malformed(comp.display_name(), attribute, text)),
        }
    }
}
