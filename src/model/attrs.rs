//! Attribute vocabulary read and written by the sync layer

use std::fmt;
use std::str::FromStr;

/// Attribute namespace
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Namespace {
    /// Framework attributes (`layout-width`, `layout-height`)
    Android,
    /// Constraint attributes and editor positions
    App,
}

impl Namespace {
    pub fn prefix(self) -> &'static str {
        match self {
            Namespace::Android => "android",
            Namespace::App => "app",
        }
    }

    /// Split a qualified key (`app:left-margin`) into namespace and local name
    pub fn split_qualified(key: &str) -> Option<(Namespace, &str)> {
        let (prefix, local) = key.split_once(':')?;
        if local.is_empty() {
            return None;
        }
        Some((prefix.parse().ok()?, local))
    }

    /// Join a namespace and local name into a qualified key
    pub fn qualify(self, local: &str) -> String {
        format!("{}:{}", self.prefix(), local)
    }
}

impl fmt::Display for Namespace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.prefix())
    }
}

impl FromStr for Namespace {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "android" => Ok(Namespace::Android),
            "app" => Ok(Namespace::App),
            other => Err(format!("unknown namespace prefix '{}'", other)),
        }
    }
}

// Strengths
pub const LEFT_STRENGTH: &str = "left-strength";
pub const RIGHT_STRENGTH: &str = "right-strength";
pub const TOP_STRENGTH: &str = "top-strength";
pub const BOTTOM_STRENGTH: &str = "bottom-strength";

// Margins
pub const LEFT_MARGIN: &str = "left-margin";
pub const RIGHT_MARGIN: &str = "right-margin";
pub const TOP_MARGIN: &str = "top-margin";
pub const BOTTOM_MARGIN: &str = "bottom-margin";

// Connections
pub const LEFT_TO_LEFT_OF: &str = "left-to-left-of";
pub const LEFT_TO_RIGHT_OF: &str = "left-to-right-of";
pub const RIGHT_TO_LEFT_OF: &str = "right-to-left-of";
pub const RIGHT_TO_RIGHT_OF: &str = "right-to-right-of";
pub const TOP_TO_TOP_OF: &str = "top-to-top-of";
pub const TOP_TO_BOTTOM_OF: &str = "top-to-bottom-of";
pub const BOTTOM_TO_TOP_OF: &str = "bottom-to-top-of";
pub const BOTTOM_TO_BOTTOM_OF: &str = "bottom-to-bottom-of";
pub const BASELINE_TO_BASELINE_OF: &str = "baseline-to-baseline-of";
pub const CENTER_X_TO_CENTER_X_OF: &str = "center-x-to-center-x-of";
pub const CENTER_Y_TO_CENTER_Y_OF: &str = "center-y-to-center-y-of";

// Dimensions (android namespace)
pub const LAYOUT_WIDTH: &str = "layout-width";
pub const LAYOUT_HEIGHT: &str = "layout-height";

// Editor positions
pub const EDITOR_ABSOLUTE_X: &str = "editor-absolute-x";
pub const EDITOR_ABSOLUTE_Y: &str = "editor-absolute-y";

// Values
pub const VALUE_WRAP_CONTENT: &str = "wrap_content";
pub const VALUE_MATCH_PARENT: &str = "match_parent";
pub const VALUE_ZERO_DP: &str = "0dp";
pub const VALUE_WEAK: &str = "weak";
pub const VALUE_STRONG: &str = "strong";
