//! Behavioural properties of pull, push and the targeted attribute edits

use pretty_assertions::assert_eq;

use constraint_sync::layout::{
    find_by_id, pull_from_attributes, reset_horizontal_alignment, reset_vertical_alignment,
    set_dimension, set_margin, set_position, AnchorTarget, AnchorType, Density,
    DimensionBehaviour, Scene, Strength, SyncConfig, SyncIssue,
};
use constraint_sync::model::{attrs, ComponentId, ComponentTree, Geometry, Namespace};

/// root(400x600) with children a(100x40 at 16,16) and b(100x40 at 16,80)
fn tree() -> (ComponentTree, ComponentId, ComponentId, ComponentId) {
    let mut tree = ComponentTree::new();
    let root = tree.add_root("ConstraintLayout", Some("root"));
    let a = tree.add_child(root, "Button", Some("a")).unwrap();
    let b = tree.add_child(root, "Button", Some("b")).unwrap();
    tree.get_mut(root).unwrap().geometry = Geometry::new(0, 0, 400, 600);
    tree.get_mut(a).unwrap().geometry = Geometry::new(16, 16, 100, 40).with_baseline(28);
    tree.get_mut(b).unwrap().geometry = Geometry::new(16, 80, 100, 40).with_baseline(28);
    (tree, root, a, b)
}

fn set(tree: &mut ComponentTree, c: ComponentId, key: &str, value: &str) {
    tree.set_attribute(c, Namespace::App, key, Some(value));
}

fn attributes(tree: &ComponentTree, c: ComponentId) -> Vec<(Namespace, String, String)> {
    tree.get(c)
        .unwrap()
        .attributes()
        .map(|(ns, k, v)| (ns, k.to_string(), v.to_string()))
        .collect()
}

#[test]
fn test_pull_twice_is_idempotent() {
    let (mut tree, _, a, _) = tree();
    set(&mut tree, a, attrs::LEFT_TO_LEFT_OF, "@+id/root");
    set(&mut tree, a, attrs::RIGHT_TO_LEFT_OF, "@+id/b");
    set(&mut tree, a, attrs::LEFT_MARGIN, "8dp");
    set(&mut tree, a, attrs::LEFT_STRENGTH, "weak");
    set(&mut tree, a, attrs::CENTER_Y_TO_CENTER_Y_OF, "@+id/b");
    set(&mut tree, a, attrs::TOP_MARGIN, "4dp");
    tree.set_attribute(a, Namespace::Android, attrs::LAYOUT_WIDTH, Some("wrap_content"));

    let (mut scene, _) = Scene::build(&tree, SyncConfig::default());
    let wa = scene.widget_for(a).unwrap();
    let first = scene.graph().get(wa).unwrap().clone();

    let issues = pull_from_attributes(&tree, scene.graph_mut(), a, &Density::default());
    assert!(issues.is_empty());
    let second = scene.graph().get(wa).unwrap().clone();
    assert_eq!(first, second);
}

#[test]
fn test_dangling_reference_leaves_anchor_disconnected() {
    let (mut tree, _, a, _) = tree();
    set(&mut tree, a, attrs::LEFT_TO_LEFT_OF, "@+id/nope");
    set(&mut tree, a, attrs::LEFT_MARGIN, "12dp");
    set(&mut tree, a, attrs::TOP_TO_TOP_OF, "@+id/root");
    set(&mut tree, a, attrs::TOP_MARGIN, "8dp");
    let before = attributes(&tree, a);

    let (scene, issues) = Scene::build(&tree, SyncConfig::default());
    assert_eq!(
        issues,
        vec![SyncIssue::unresolved("a", attrs::LEFT_TO_LEFT_OF, "nope")]
    );

    let widget = scene.graph().get(scene.widget_for(a).unwrap()).unwrap();
    assert!(!widget.anchor(AnchorType::Left).is_connected());
    assert_eq!(widget.anchor(AnchorType::Left).margin, 0);
    assert!(widget.anchor(AnchorType::Top).is_connected());
    assert_eq!(widget.anchor(AnchorType::Top).margin, 8);
    assert_eq!(attributes(&tree, a), before);
}

#[test]
fn test_dimension_inference_table() {
    let cases: [(Option<&str>, i32, DimensionBehaviour, i32); 6] = [
        (Some("0"), 80, DimensionBehaviour::Any, 80),
        (Some("0dp"), 80, DimensionBehaviour::Any, 80),
        (Some("wrap_content"), 80, DimensionBehaviour::WrapContent, 80),
        (Some("120dp"), 80, DimensionBehaviour::Fixed, 120),
        (None, 0, DimensionBehaviour::Any, 0),
        (None, 50, DimensionBehaviour::Fixed, 50),
    ];

    for (attr, px_width, behaviour, width) in cases {
        let (mut tree, _, a, _) = tree();
        tree.get_mut(a).unwrap().geometry = Geometry::new(0, 0, px_width, 40);
        tree.set_attribute(a, Namespace::Android, attrs::LAYOUT_WIDTH, attr);

        let (scene, issues) = Scene::build(&tree, SyncConfig::default());
        assert!(issues.is_empty(), "{:?}: {:?}", attr, issues);
        let widget = scene.graph().get(scene.widget_for(a).unwrap()).unwrap();
        assert_eq!(
            (widget.horizontal, widget.width),
            (behaviour, width),
            "layout-width {:?} with {}px",
            attr,
            px_width
        );
        if behaviour == DimensionBehaviour::WrapContent {
            assert_eq!(widget.min_width, px_width);
        }
    }
}

#[test]
fn test_center_connection_expands_to_both_sides() {
    let (mut tree, _, a, b) = tree();
    set(&mut tree, a, attrs::CENTER_X_TO_CENTER_X_OF, "@+id/b");
    set(&mut tree, a, attrs::LEFT_MARGIN, "10dp");

    let (scene, issues) = Scene::build(&tree, SyncConfig::default());
    assert!(issues.is_empty());
    let wb = scene.widget_for(b).unwrap();
    let widget = scene.graph().get(scene.widget_for(a).unwrap()).unwrap();

    for (side, target) in [
        (AnchorType::CenterX, AnchorType::CenterX),
        (AnchorType::Left, AnchorType::Left),
        (AnchorType::Right, AnchorType::Right),
    ] {
        assert_eq!(
            widget.anchor(side).target,
            Some(AnchorTarget {
                widget: wb,
                anchor: target
            })
        );
    }
    assert_eq!(widget.anchor(AnchorType::Left).margin, 10);
    assert_eq!(widget.anchor(AnchorType::Right).margin, 10);
}

#[test]
fn test_center_y_lone_bottom_margin_applies_to_top() {
    let (mut tree, _, a, _) = tree();
    set(&mut tree, a, attrs::CENTER_Y_TO_CENTER_Y_OF, "@+id/root");
    set(&mut tree, a, attrs::BOTTOM_MARGIN, "6dp");

    let (scene, _) = Scene::build(&tree, SyncConfig::default());
    let widget = scene.graph().get(scene.widget_for(a).unwrap()).unwrap();
    assert_eq!(widget.anchor(AnchorType::Top).margin, 6);
    assert_eq!(widget.anchor(AnchorType::Bottom).margin, 6);
}

#[test]
fn test_find_by_id_first_preorder_match() {
    let mut tree = ComponentTree::new();
    let root = tree.add_root("ConstraintLayout", Some("r"));
    let a = tree.add_child(root, "Button", Some("x")).unwrap();
    let _nested = tree.add_child(a, "TextView", Some("y")).unwrap();
    let _b = tree.add_child(root, "Button", Some("x")).unwrap();

    assert_eq!(find_by_id(&tree, root, "x"), Some(a));
    assert_eq!(find_by_id(&tree, root, "X"), Some(a));
    assert_eq!(find_by_id(&tree, root, "R"), Some(root));
    assert_eq!(find_by_id(&tree, root, "z"), None);
}

#[test]
fn test_set_position_on_root_changes_nothing() {
    let (mut tree, root, a, _) = tree();
    set(&mut tree, root, attrs::LEFT_MARGIN, "4dp");
    let before = attributes(&tree, root);

    assert!(matches!(
        set_position(&mut tree, root, 10, 20),
        Err(SyncIssue::StructuralNoop { .. })
    ));
    assert_eq!(attributes(&tree, root), before);

    set_position(&mut tree, a, 10, 20).unwrap();
    assert_eq!(
        tree.attribute(a, Namespace::App, attrs::EDITOR_ABSOLUTE_X),
        Some("10dp")
    );
    assert_eq!(
        tree.attribute(a, Namespace::App, attrs::EDITOR_ABSOLUTE_Y),
        Some("20dp")
    );
}

#[test]
fn test_alignment_codes() {
    let (mut tree, _, a, _) = tree();
    let app = |tree: &ComponentTree, key| tree.attribute(a, Namespace::App, key).map(str::to_string);

    reset_horizontal_alignment(&mut tree, a, 0);
    assert_eq!(app(&tree, attrs::LEFT_STRENGTH).as_deref(), Some("strong"));
    assert_eq!(app(&tree, attrs::RIGHT_STRENGTH).as_deref(), Some("weak"));

    reset_horizontal_alignment(&mut tree, a, 7);
    assert_eq!(app(&tree, attrs::LEFT_STRENGTH).as_deref(), Some("strong"));

    reset_horizontal_alignment(&mut tree, a, 1);
    assert_eq!(app(&tree, attrs::LEFT_STRENGTH), None);
    assert_eq!(app(&tree, attrs::RIGHT_STRENGTH), None);

    reset_vertical_alignment(&mut tree, a, 2);
    assert_eq!(app(&tree, attrs::TOP_STRENGTH).as_deref(), Some("weak"));
    assert_eq!(app(&tree, attrs::BOTTOM_STRENGTH).as_deref(), Some("strong"));
}

#[test]
fn test_set_dimension_then_pull() {
    let (mut tree, _, a, _) = tree();
    let (mut scene, _) = Scene::build(&tree, SyncConfig::default());
    let wa = scene.widget_for(a).unwrap();
    {
        let widget = scene.graph_mut().get_mut(wa).unwrap();
        widget.horizontal = DimensionBehaviour::Any;
        widget.vertical = DimensionBehaviour::WrapContent;
    }
    let widget = scene.graph().get(wa).unwrap().clone();
    set_dimension(&mut tree, a, &widget);
    assert_eq!(
        tree.attribute(a, Namespace::Android, attrs::LAYOUT_WIDTH),
        Some("0dp")
    );
    assert_eq!(
        tree.attribute(a, Namespace::Android, attrs::LAYOUT_HEIGHT),
        Some("wrap_content")
    );

    scene.sync(&tree);
    let widget = scene.graph().get(wa).unwrap();
    assert_eq!(widget.horizontal, DimensionBehaviour::Any);
    assert_eq!(widget.vertical, DimensionBehaviour::WrapContent);
    assert_eq!(widget.min_height, 40);
}

#[test]
fn test_set_margin_rules() {
    let (mut tree, _, a, _) = tree();
    set(&mut tree, a, attrs::CENTER_X_TO_CENTER_X_OF, "@+id/root");
    let (mut scene, _) = Scene::build(&tree, SyncConfig::default());
    let wa = scene.widget_for(a).unwrap();

    assert!(!set_margin(scene.graph_mut(), wa, 5, AnchorType::Top));
    assert!(!set_margin(scene.graph_mut(), wa, -1, AnchorType::CenterX));
    assert!(set_margin(scene.graph_mut(), wa, 14, AnchorType::CenterX));

    let widget = scene.graph().get(wa).unwrap();
    assert_eq!(widget.anchor(AnchorType::Left).margin, 14);
    assert_eq!(widget.anchor(AnchorType::Right).margin, 14);
    assert_eq!(widget.anchor(AnchorType::Top).margin, 0);
}

#[test]
fn test_strength_attribute_is_case_insensitive() {
    let (mut tree, _, a, _) = tree();
    set(&mut tree, a, attrs::LEFT_TO_LEFT_OF, "@+id/root");
    set(&mut tree, a, attrs::LEFT_STRENGTH, "STRONG");
    set(&mut tree, a, attrs::RIGHT_STRENGTH, "firm");

    let (scene, issues) = Scene::build(&tree, SyncConfig::default());
    assert_eq!(
        issues,
        vec![SyncIssue::malformed("a", attrs::RIGHT_STRENGTH, "firm")]
    );
    let widget = scene.graph().get(scene.widget_for(a).unwrap()).unwrap();
    assert_eq!(
        widget.anchor(AnchorType::Left).strength,
        Some(Strength::Strong)
    );
    assert_eq!(widget.anchor(AnchorType::Right).strength, None);
}
