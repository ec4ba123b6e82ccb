//! Lint checks for layouts whose attributes do not sync cleanly.
//!
//! Pull and push skip what they cannot express instead of failing. These
//! checks report those cases up front: references to unknown ids, values
//! that do not parse, ids that shadow each other, and connections that are
//! dropped or cannot be written back.

use std::collections::HashMap;
use std::fmt;

use crate::model::{attrs, Component, ComponentId, ComponentTree, Namespace};
use crate::value::{extract_dp, extract_id, parse_value};

use super::anchor::{AnchorType, Strength, CONNECTIONS};
use super::resolve::find_in_tree;
use super::types::WidgetGraph;

/// A lint warning about an attribute defect
#[derive(Debug)]
pub struct LintWarning {
    pub category: LintCategory,
    pub message: String,
}

impl fmt::Display for LintWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.category, self.message)
    }
}

/// Category of lint defect
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LintCategory {
    Reference,
    Value,
    Identity,
    Connection,
}

impl fmt::Display for LintCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LintCategory::Reference => write!(f, "reference"),
            LintCategory::Value => write!(f, "value"),
            LintCategory::Identity => write!(f, "identity"),
            LintCategory::Connection => write!(f, "connection"),
        }
    }
}

/// Run all lint checks on a synced tree.
pub fn check(tree: &ComponentTree, graph: &WidgetGraph) -> Vec<LintWarning> {
    let mut warnings = Vec::new();
    check_identity(tree, &mut warnings);
    check_references(tree, &mut warnings);
    check_values(tree, &mut warnings);
    check_overrides(tree, &mut warnings);
    check_serializable(tree, graph, &mut warnings);
    warnings
}

/// Display name for a component: its id if named, or its tag and position
fn display_name(tree: &ComponentTree, cid: ComponentId) -> String {
    match tree.get(cid) {
        Some(Component { id: Some(id), .. }) => format!("\"{}\"", id),
        Some(c) => format!("<{} #{}>", c.tag, cid.0),
        None => format!("<#{}>", cid.0),
    }
}

fn warn(warnings: &mut Vec<LintWarning>, category: LintCategory, message: String) {
    warnings.push(LintWarning { category, message });
}

// ── Identity ──────────────────────────────────────────────────────

fn check_identity(tree: &ComponentTree, warnings: &mut Vec<LintWarning>) {
    let mut seen: HashMap<String, ComponentId> = HashMap::new();
    for cid in tree.iter() {
        let Some(id) = tree.get(cid).and_then(|c| c.id.as_deref()) else {
            continue;
        };
        match seen.get(&id.to_lowercase()) {
            Some(first) => warn(
                warnings,
                LintCategory::Identity,
                format!(
                    "{} reuses the id of {}; references resolve to the first one",
                    display_name(tree, cid),
                    display_name(tree, *first)
                ),
            ),
            None => {
                seen.insert(id.to_lowercase(), cid);
            }
        }
    }
}

// ── References ────────────────────────────────────────────────────

fn check_references(tree: &ComponentTree, warnings: &mut Vec<LintWarning>) {
    let known: Vec<String> = tree
        .iter()
        .into_iter()
        .filter_map(|cid| tree.get(cid).and_then(|c| c.id.clone()))
        .collect();

    for cid in tree.iter() {
        let Some(component) = tree.get(cid) else {
            continue;
        };
        for conn in CONNECTIONS.iter() {
            let Some(value) = component.attribute(Namespace::App, conn.attribute) else {
                continue;
            };
            match extract_id(value) {
                None => warn(
                    warnings,
                    LintCategory::Value,
                    format!(
                        "{}: {} = '{}' is not an id reference",
                        display_name(tree, cid),
                        Namespace::App.qualify(conn.attribute),
                        value
                    ),
                ),
                Some(id) if find_in_tree(tree, &id).is_none() => {
                    let suggestions = find_similar(&known, &id, 2);
                    let hint = if suggestions.is_empty() {
                        String::new()
                    } else {
                        format!(" (did you mean {}?)", suggestions.join(", "))
                    };
                    warn(
                        warnings,
                        LintCategory::Reference,
                        format!(
                            "{}: {} refers to unknown id '{}'{}",
                            display_name(tree, cid),
                            Namespace::App.qualify(conn.attribute),
                            id,
                            hint
                        ),
                    );
                }
                Some(_) => {}
            }
        }
    }
}

// ── Values ────────────────────────────────────────────────────────

fn check_values(tree: &ComponentTree, warnings: &mut Vec<LintWarning>) {
    const MARGINS: [&str; 4] = [
        attrs::LEFT_MARGIN,
        attrs::RIGHT_MARGIN,
        attrs::TOP_MARGIN,
        attrs::BOTTOM_MARGIN,
    ];
    const STRENGTHS: [&str; 4] = [
        attrs::LEFT_STRENGTH,
        attrs::RIGHT_STRENGTH,
        attrs::TOP_STRENGTH,
        attrs::BOTTOM_STRENGTH,
    ];

    for cid in tree.iter() {
        let Some(component) = tree.get(cid) else {
            continue;
        };
        let name = display_name(tree, cid);
        let mut report = |ns: Namespace, key: &str, value: &str, why: String| {
            warn(
                warnings,
                LintCategory::Value,
                format!("{}: {} = '{}' {}", name, ns.qualify(key), value, why),
            );
        };

        for key in MARGINS
            .iter()
            .chain([attrs::EDITOR_ABSOLUTE_X, attrs::EDITOR_ABSOLUTE_Y].iter())
        {
            if let Some(value) = component.attribute(Namespace::App, key) {
                match extract_dp(value) {
                    Some(m) if m < 0 && MARGINS.contains(key) => {
                        report(Namespace::App, key, value, "is negative".to_string())
                    }
                    Some(_) => {}
                    None => report(Namespace::App, key, value, "is not a dp length".to_string()),
                }
            }
        }

        for key in STRENGTHS {
            if let Some(value) = component.attribute(Namespace::App, key) {
                if Strength::parse(value).is_none() {
                    report(
                        Namespace::App,
                        key,
                        value,
                        "is not 'weak' or 'strong'".to_string(),
                    );
                }
            }
        }

        for key in [attrs::LAYOUT_WIDTH, attrs::LAYOUT_HEIGHT] {
            if let Some(value) = component.attribute(Namespace::Android, key) {
                if let Err(errors) = parse_value(value) {
                    let detail = errors
                        .first()
                        .map(|e| e.to_string())
                        .unwrap_or_default();
                    report(Namespace::Android, key, value, format!("does not parse: {}", detail));
                }
            }
        }
    }
}

// ── Connections ───────────────────────────────────────────────────

/// Attributes that are set but lose to another attribute during pull
fn check_overrides(tree: &ComponentTree, warnings: &mut Vec<LintWarning>) {
    for cid in tree.iter() {
        let Some(component) = tree.get(cid) else {
            continue;
        };
        let set: Vec<_> = CONNECTIONS
            .iter()
            .filter(|c| component.attribute(Namespace::App, c.attribute).is_some())
            .collect();

        for (i, earlier) in set.iter().enumerate() {
            // Pull applies the table in order, so a later attribute for the
            // same anchor (or the axis center) replaces an earlier one
            let winner = set[i + 1..].iter().find(|later| {
                later.origin == earlier.origin
                    || (matches!(later.origin, AnchorType::CenterX | AnchorType::CenterY)
                        && later.origin.dominated().contains(&earlier.origin))
            });
            if let Some(later) = winner {
                warn(
                    warnings,
                    LintCategory::Connection,
                    format!(
                        "{}: {} is overridden by {}",
                        display_name(tree, cid),
                        Namespace::App.qualify(earlier.attribute),
                        Namespace::App.qualify(later.attribute)
                    ),
                );
            }
        }

        for conn in &set {
            let refers_to_self = component
                .attribute(Namespace::App, conn.attribute)
                .and_then(extract_id)
                .and_then(|id| find_in_tree(tree, &id))
                == Some(cid);
            if refers_to_self {
                warn(
                    warnings,
                    LintCategory::Connection,
                    format!(
                        "{}: {} refers to the component itself",
                        display_name(tree, cid),
                        Namespace::App.qualify(conn.attribute)
                    ),
                );
            }
        }
    }
}

/// Graph connections whose target has no id, so push cannot write them
fn check_serializable(tree: &ComponentTree, graph: &WidgetGraph, warnings: &mut Vec<LintWarning>) {
    for (_, widget) in graph.iter() {
        for anchor in widget.anchors() {
            let Some(target) = anchor.target else {
                continue;
            };
            let Some(target_component) = graph.component_of(target.widget) else {
                continue;
            };
            let has_id = tree
                .get(target_component)
                .is_some_and(|c| c.id.is_some());
            if !has_id {
                warn(
                    warnings,
                    LintCategory::Connection,
                    format!(
                        "{}: {} anchor targets {} which has no id and cannot be written back",
                        display_name(tree, widget.component),
                        anchor.kind,
                        display_name(tree, target_component)
                    ),
                );
            }
        }
    }
}

// ── Suggestions ───────────────────────────────────────────────────

/// Compute Levenshtein edit distance between two strings
fn levenshtein_distance(a: &str, b: &str) -> usize {
    let a_chars: Vec<char> = a.chars().collect();
    let b_chars: Vec<char> = b.chars().collect();
    let n = b_chars.len();

    let mut prev: Vec<usize> = (0..=n).collect();
    let mut cur = vec![0usize; n + 1];
    for (i, ca) in a_chars.iter().enumerate() {
        cur[0] = i + 1;
        for (j, cb) in b_chars.iter().enumerate() {
            let cost = usize::from(ca != cb);
            cur[j + 1] = (prev[j + 1] + 1).min(cur[j] + 1).min(prev[j] + cost);
        }
        std::mem::swap(&mut prev, &mut cur);
    }
    prev[n]
}

/// Find known ids within a maximum edit distance, closest first
fn find_similar(known: &[String], target: &str, max_distance: usize) -> Vec<String> {
    let mut candidates: Vec<(&String, usize)> = known
        .iter()
        .filter_map(|name| {
            let dist = levenshtein_distance(&name.to_lowercase(), &target.to_lowercase());
            (dist <= max_distance && dist > 0).then_some((name, dist))
        })
        .collect();

    candidates.sort_by_key(|(_, d)| *d);
    candidates
        .into_iter()
        .map(|(name, _)| name.clone())
        .take(3)
        .collect()
}
