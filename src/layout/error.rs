//! Error and issue types for the sync layer

use thiserror::Error;

use super::anchor::AnchorType;
use super::types::WidgetId;

/// Non-fatal outcome of a pull or push.
///
/// The operation that produced the issue still completed; the affected
/// anchor or attribute was left untouched or disconnected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SyncIssue {
    /// A connection attribute names an id no component carries
    #[error("'{component}': {attribute} refers to unknown id '{reference}'")]
    UnresolvedReference {
        component: String,
        attribute: String,
        reference: String,
    },

    /// An attribute value could not be read
    #[error("'{component}': {attribute} has malformed value '{value}'")]
    MalformedValue {
        component: String,
        attribute: String,
        value: String,
    },

    /// The requested change could not be expressed and was skipped
    #[error("'{component}': {reason}")]
    StructuralNoop { component: String, reason: String },
}

impl SyncIssue {
    pub fn unresolved(
        component: impl Into<String>,
        attribute: impl Into<String>,
        reference: impl Into<String>,
    ) -> Self {
        Self::UnresolvedReference {
            component: component.into(),
            attribute: attribute.into(),
            reference: reference.into(),
        }
    }

    pub fn malformed(
        component: impl Into<String>,
        attribute: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        Self::MalformedValue {
            component: component.into(),
            attribute: attribute.into(),
            value: value.into(),
        }
    }

    pub fn noop(component: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::StructuralNoop {
            component: component.into(),
            reason: reason.into(),
        }
    }

    /// Display name of the component the issue is about
    pub fn component(&self) -> &str {
        match self {
            Self::UnresolvedReference { component, .. }
            | Self::MalformedValue { component, .. }
            | Self::StructuralNoop { component, .. } => component,
        }
    }
}

/// Rejected widget graph mutation
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GraphError {
    #[error("widget {widget} cannot connect to itself")]
    SelfConnection { widget: WidgetId },

    #[error("anchor {origin} cannot connect to anchor {target}")]
    IncompatibleAnchors {
        origin: AnchorType,
        target: AnchorType,
    },

    #[error("unknown widget {0}")]
    UnknownWidget(WidgetId),

    #[error("widget {0} is not a container")]
    NotAContainer(WidgetId),
}
