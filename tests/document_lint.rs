//! Integration tests for lint checks over layout documents

use constraint_sync::layout::LintCategory;
use constraint_sync::{sync_document, SyncConfig, SyncIssue};

#[test]
fn test_broken_form_reports_every_category() {
    let source = include_str!("fixtures/broken-form.toml");
    let outcome = sync_document(source, &SyncConfig::default()).expect("Should sync");
    let warnings = outcome.lint();

    let count = |category: LintCategory| warnings.iter().filter(|w| w.category == category).count();
    assert_eq!(count(LintCategory::Identity), 1, "{:#?}", warnings);
    assert_eq!(count(LintCategory::Reference), 1, "{:#?}", warnings);
    assert_eq!(count(LintCategory::Value), 1, "{:#?}", warnings);
    assert_eq!(count(LintCategory::Connection), 2, "{:#?}", warnings);

    let reference = warnings
        .iter()
        .find(|w| w.category == LintCategory::Reference)
        .unwrap();
    assert!(
        reference.message.contains("did you mean root?"),
        "{}",
        reference.message
    );
}

#[test]
fn test_broken_form_still_syncs_with_issues() {
    let source = include_str!("fixtures/broken-form.toml");
    let outcome = sync_document(source, &SyncConfig::default()).expect("Should sync");

    assert_eq!(outcome.issues.len(), 3, "{:#?}", outcome.issues);
    assert!(matches!(
        outcome.issues[..],
        [
            SyncIssue::UnresolvedReference { .. },
            SyncIssue::MalformedValue { .. },
            SyncIssue::StructuralNoop { .. },
        ]
    ));

    // TITLE stacks under the first "title"; its center-x wins over left-to-left-of
    let frames: Vec<_> = outcome.format_frames().lines().map(str::to_string).collect();
    assert_eq!(frames.len(), 4);
    assert!(frames[2].starts_with("  [TITLE] x=140.0 y=40.0"), "{}", frames[2]);
}

#[test]
fn test_clean_document_has_no_warnings() {
    let source = include_str!("fixtures/centered-form.toml");
    let outcome = sync_document(source, &SyncConfig::default()).expect("Should sync");
    assert!(outcome.lint().is_empty());
}

#[test]
fn test_warning_display() {
    let source = r#"
[[components]]
id = "root"
tag = "ConstraintLayout"
bounds = { x = 0, y = 0, width = 400, height = 600 }

[[components.children]]
id = "a"
tag = "Button"
bounds = { x = 0, y = 0, width = 10, height = 10 }

[components.children.attributes]
"app:left-margin" = "-3dp"
"#;
    let outcome = sync_document(source, &SyncConfig::default()).unwrap();
    let rendered: Vec<String> = outcome.lint().iter().map(|w| w.to_string()).collect();
    insta::assert_debug_snapshot!(rendered, @r#"
    [
        "[value] \"a\": app:left-margin = '-3dp' is negative",
    ]
    "#);
}
