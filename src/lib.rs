//! constraint-sync - keeps a component attribute tree and a widget
//! constraint graph in sync
//!
//! Components carry string attributes (`app:left-to-left-of = "@+id/root"`,
//! `app:left-margin = "16dp"`, ...). The sync layer reads them into anchors
//! on a graph of widgets, writes anchors back as attributes, and feeds the
//! graph to a Cassowary solver.
//!
//! # Example
//!
//! ```rust
//! use constraint_sync::{sync_document, SyncConfig};
//!
//! let outcome = sync_document(r#"
//! [[components]]
//! id = "root"
//! tag = "ConstraintLayout"
//! bounds = { x = 0, y = 0, width = 400, height = 600 }
//!
//! [[components.children]]
//! id = "title"
//! tag = "TextView"
//! bounds = { x = 16, y = 16, width = 120, height = 40 }
//!
//! [components.children.attributes]
//! "app:left-to-left-of" = "@+id/root"
//! "app:left-margin" = "24dp"
//! "#, &SyncConfig::default()).unwrap();
//!
//! assert!(outcome.issues.is_empty());
//! assert_eq!(outcome.frame("title").unwrap().x.round(), 24.0);
//! ```

pub mod error;
pub mod layout;
pub mod model;
pub mod value;

use std::fmt::Write as _;
use std::path::Path;

use thiserror::Error;

pub use error::ValueError;
pub use layout::{
    ConfigError, Frame, LintWarning, Scene, Solution, SolverError, SyncConfig, SyncIssue,
};
pub use model::{ComponentId, ComponentTree, Document, DocumentError};

/// Errors that can occur during the sync pipeline
#[derive(Debug, Error)]
pub enum SyncError {
    /// Error loading or saving the layout document
    #[error("document error: {0}")]
    Document(#[from] DocumentError),

    /// Error loading configuration
    #[error("config error: {0}")]
    Config(#[from] ConfigError),

    /// Error solving the constraint graph
    #[error("solver error: {0}")]
    Solver(#[from] SolverError),
}

/// Result of syncing and solving a layout
#[derive(Debug, Clone)]
pub struct SyncOutcome {
    /// The component tree, with solved geometry written back
    pub tree: ComponentTree,
    /// The widget graph pulled from the tree
    pub scene: Scene,
    /// Attributes the pull could not apply
    pub issues: Vec<SyncIssue>,
    /// Solved frames in absolute dp
    pub solution: Solution,
}

impl SyncOutcome {
    /// Solved frame of the component with the given id (case-insensitive)
    pub fn frame(&self, id: &str) -> Option<Frame> {
        let component = layout::find_in_tree(&self.tree, id)?;
        let widget = self.scene.widget_for(component)?;
        Some(self.solution.frame(widget))
    }

    /// Run lint checks over the synced tree
    pub fn lint(&self) -> Vec<LintWarning> {
        layout::check(&self.tree, self.scene.graph())
    }

    /// Capture the tree, including solved geometry, as a document
    pub fn to_document(&self) -> Document {
        Document::from_tree(&self.tree)
    }

    /// Indented listing of every component with its solved frame
    pub fn format_frames(&self) -> String {
        let mut out = String::new();
        for root in self.tree.roots() {
            self.format_component(*root, 0, &mut out);
        }
        out
    }

    fn format_component(&self, cid: ComponentId, depth: usize, out: &mut String) {
        let Some(component) = self.tree.get(cid) else {
            return;
        };
        let frame = self
            .scene
            .widget_for(cid)
            .map(|w| self.solution.frame(w));
        let indent = "  ".repeat(depth);
        match frame {
            Some(f) => {
                let _ = writeln!(
                    out,
                    "{}[{}] x={:.1} y={:.1} w={:.1} h={:.1}",
                    indent,
                    component.display_name(),
                    f.x,
                    f.y,
                    f.width,
                    f.height
                );
            }
            None => {
                let _ = writeln!(out, "{}[{}] <no widget>", indent, component.display_name());
            }
        }
        for child in component.children() {
            self.format_component(*child, depth + 1, out);
        }
    }
}

/// Sync a component tree into a scene, solve it and write the solved
/// geometry back into the tree
pub fn sync_tree(mut tree: ComponentTree, config: &SyncConfig) -> Result<SyncOutcome, SyncError> {
    let (mut scene, issues) = Scene::build(&tree, config.clone());
    let solution = scene.solve()?;
    scene.apply_solution(&mut tree, &solution);

    tracing::debug!(
        components = tree.len(),
        issues = issues.len(),
        "layout synced and solved"
    );

    Ok(SyncOutcome {
        tree,
        scene,
        issues,
        solution,
    })
}

/// Sync a layout document given as TOML source
pub fn sync_document(source: &str, config: &SyncConfig) -> Result<SyncOutcome, SyncError> {
    let tree = Document::from_str(source)?.to_tree()?;
    sync_tree(tree, config)
}

/// Sync a layout document loaded from a file
pub fn sync_file(path: &Path, config: &SyncConfig) -> Result<SyncOutcome, SyncError> {
    let tree = model::document::load(path)?;
    sync_tree(tree, config)
}
