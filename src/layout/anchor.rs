//! Anchor model
//!
//! Anchor kinds, strengths and dimension behaviours, plus the lookup tables
//! that tie anchors to the attribute names pull reads and push writes.
//! Every table is total: pairs that have no attribute map to `None`.

use std::fmt;

use crate::model::attrs;

/// One of the seven attachment points of a widget
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum AnchorType {
    Left,
    Right,
    Top,
    Bottom,
    Baseline,
    CenterX,
    CenterY,
}

impl AnchorType {
    pub const ALL: [AnchorType; 7] = [
        AnchorType::Left,
        AnchorType::Right,
        AnchorType::Top,
        AnchorType::Bottom,
        AnchorType::Baseline,
        AnchorType::CenterX,
        AnchorType::CenterY,
    ];

    /// Position of this anchor in [`AnchorType::ALL`]
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn is_horizontal(self) -> bool {
        matches!(
            self,
            AnchorType::Left | AnchorType::Right | AnchorType::CenterX
        )
    }

    /// The side anchors a center anchor stands for; other anchors stand for
    /// themselves
    pub fn dominated(self) -> &'static [AnchorType] {
        match self {
            AnchorType::CenterX => &[AnchorType::Left, AnchorType::Right],
            AnchorType::CenterY => &[AnchorType::Top, AnchorType::Bottom],
            AnchorType::Left => &[AnchorType::Left],
            AnchorType::Right => &[AnchorType::Right],
            AnchorType::Top => &[AnchorType::Top],
            AnchorType::Bottom => &[AnchorType::Bottom],
            AnchorType::Baseline => &[AnchorType::Baseline],
        }
    }

    /// The opposite side on the same axis
    pub fn opposite(self) -> Option<AnchorType> {
        match self {
            AnchorType::Left => Some(AnchorType::Right),
            AnchorType::Right => Some(AnchorType::Left),
            AnchorType::Top => Some(AnchorType::Bottom),
            AnchorType::Bottom => Some(AnchorType::Top),
            _ => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            AnchorType::Left => "left",
            AnchorType::Right => "right",
            AnchorType::Top => "top",
            AnchorType::Bottom => "bottom",
            AnchorType::Baseline => "baseline",
            AnchorType::CenterX => "center-x",
            AnchorType::CenterY => "center-y",
        }
    }
}

impl fmt::Display for AnchorType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Bias of a connected side when both sides of an axis are connected
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Strength {
    Weak,
    Strong,
}

impl Strength {
    /// Parse `weak` / `strong`, ignoring case
    pub fn parse(text: &str) -> Option<Strength> {
        if text.eq_ignore_ascii_case(attrs::VALUE_WEAK) {
            Some(Strength::Weak)
        } else if text.eq_ignore_ascii_case(attrs::VALUE_STRONG) {
            Some(Strength::Strong)
        } else {
            None
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Strength::Weak => attrs::VALUE_WEAK,
            Strength::Strong => attrs::VALUE_STRONG,
        }
    }
}

impl fmt::Display for Strength {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How a widget's size along one axis is determined
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum DimensionBehaviour {
    #[default]
    Fixed,
    WrapContent,
    /// Sized by its constraints
    Any,
}

/// Alignment request from the editor, as the integer codes it sends
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlignmentBias {
    /// Codes -1 and 1: let the solver center
    Centered,
    /// Code 0: leading side wins
    Leading,
    /// Code 2: trailing side wins
    Trailing,
}

impl AlignmentBias {
    pub fn from_code(code: i32) -> Option<AlignmentBias> {
        match code {
            -1 | 1 => Some(AlignmentBias::Centered),
            0 => Some(AlignmentBias::Leading),
            2 => Some(AlignmentBias::Trailing),
            _ => None,
        }
    }

    /// Strengths to write on the (leading, trailing) sides
    pub fn strengths(self) -> (Option<Strength>, Option<Strength>) {
        match self {
            AlignmentBias::Centered => (None, None),
            AlignmentBias::Leading => (Some(Strength::Strong), Some(Strength::Weak)),
            AlignmentBias::Trailing => (Some(Strength::Weak), Some(Strength::Strong)),
        }
    }
}

/// An allow-listed anchor pair and the attribute that stores it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Connection {
    pub origin: AnchorType,
    pub target: AnchorType,
    pub attribute: &'static str,
}

const fn conn(origin: AnchorType, target: AnchorType, attribute: &'static str) -> Connection {
    Connection {
        origin,
        target,
        attribute,
    }
}

/// Every serializable connection, in the order pull applies them
pub const CONNECTIONS: [Connection; 11] = [
    conn(AnchorType::Left, AnchorType::Left, attrs::LEFT_TO_LEFT_OF),
    conn(AnchorType::Left, AnchorType::Right, attrs::LEFT_TO_RIGHT_OF),
    conn(AnchorType::Right, AnchorType::Left, attrs::RIGHT_TO_LEFT_OF),
    conn(AnchorType::Right, AnchorType::Right, attrs::RIGHT_TO_RIGHT_OF),
    conn(AnchorType::CenterX, AnchorType::CenterX, attrs::CENTER_X_TO_CENTER_X_OF),
    conn(AnchorType::Top, AnchorType::Top, attrs::TOP_TO_TOP_OF),
    conn(AnchorType::Top, AnchorType::Bottom, attrs::TOP_TO_BOTTOM_OF),
    conn(AnchorType::Bottom, AnchorType::Top, attrs::BOTTOM_TO_TOP_OF),
    conn(AnchorType::Bottom, AnchorType::Bottom, attrs::BOTTOM_TO_BOTTOM_OF),
    conn(AnchorType::Baseline, AnchorType::Baseline, attrs::BASELINE_TO_BASELINE_OF),
    conn(AnchorType::CenterY, AnchorType::CenterY, attrs::CENTER_Y_TO_CENTER_Y_OF),
];

/// Attribute storing a connection from `origin` to `target`, if the pair is
/// allowed
pub fn connection_attribute(origin: AnchorType, target: AnchorType) -> Option<&'static str> {
    CONNECTIONS
        .iter()
        .find(|c| c.origin == origin && c.target == target)
        .map(|c| c.attribute)
}

/// Whether the graph accepts a connection between these anchor kinds
pub fn is_allowed(origin: AnchorType, target: AnchorType) -> bool {
    connection_attribute(origin, target).is_some()
}

pub fn margin_attribute(anchor: AnchorType) -> Option<&'static str> {
    match anchor {
        AnchorType::Left => Some(attrs::LEFT_MARGIN),
        AnchorType::Right => Some(attrs::RIGHT_MARGIN),
        AnchorType::Top => Some(attrs::TOP_MARGIN),
        AnchorType::Bottom => Some(attrs::BOTTOM_MARGIN),
        _ => None,
    }
}

pub fn strength_attribute(anchor: AnchorType) -> Option<&'static str> {
    match anchor {
        AnchorType::Left => Some(attrs::LEFT_STRENGTH),
        AnchorType::Right => Some(attrs::RIGHT_STRENGTH),
        AnchorType::Top => Some(attrs::TOP_STRENGTH),
        AnchorType::Bottom => Some(attrs::BOTTOM_STRENGTH),
        _ => None,
    }
}

/// Every attribute a push of `anchor` may write, all in the app namespace.
///
/// Resetting an anchor clears this set, less any side margin a center
/// shares with a live side connection.
pub fn attributes_written_by(anchor: AnchorType) -> Vec<&'static str> {
    let mut out = Vec::new();
    out.extend(strength_attribute(anchor));
    out.extend(anchor.dominated().iter().filter_map(|a| margin_attribute(*a)));
    out.extend(
        CONNECTIONS
            .iter()
            .filter(|c| c.origin == anchor)
            .map(|c| c.attribute),
    );
    out
}
