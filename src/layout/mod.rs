//! Sync layer between the component tree and the widget constraint graph
//!
//! Pull reads a component's attributes into its widget's anchors, margins,
//! dimension behaviours and alignment strengths. Push writes one anchor back
//! as attributes. The [`Scene`] runs both over a whole tree and feeds the
//! resulting graph to the constraint solver.

pub mod anchor;
pub mod config;
pub mod error;
pub mod lint;
pub mod pull;
pub mod push;
pub mod resolve;
pub mod scene;
pub mod solver;
pub mod types;

pub use anchor::{AlignmentBias, AnchorType, DimensionBehaviour, Strength, CONNECTIONS};
pub use config::{ConfigError, Density, DpConverter, SyncConfig};
pub use error::{GraphError, SyncIssue};
pub use lint::{check, LintCategory, LintWarning};
pub use pull::pull_from_attributes;
pub use push::{
    push_to_attributes, reset_anchor, reset_horizontal_alignment, reset_vertical_alignment,
    set_dimension, set_margin, set_position,
};
pub use resolve::{find_by_id, find_in_tree, resolve_reference, ReferenceError};
pub use scene::Scene;
pub use solver::{solve, Frame, Solution, SolverError};
pub use types::{Anchor, AnchorTarget, Widget, WidgetGraph, WidgetId};
