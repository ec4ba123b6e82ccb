//! Constraint solver integration for the widget graph
//!
//! This module wraps the kasuari Cassowary solver: it translates widgets and
//! their anchor connections into linear constraints and extracts solved
//! frames in absolute dp.

use std::collections::HashMap;

use kasuari::{
    Expression, Solver as KasuariSolver, Strength as SolverStrength,
    Variable as KasuariVariable, WeightedRelation::*,
};
use thiserror::Error;

use super::anchor::{AnchorType, DimensionBehaviour, Strength};
use super::types::{Anchor, AnchorTarget, Widget, WidgetGraph, WidgetId};

/// Properties that can be constrained
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LayoutProperty {
    X,
    Y,
    Width,
    Height,
}

/// A variable in the constraint system
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LayoutVariable {
    pub widget: WidgetId,
    pub property: LayoutProperty,
}

impl LayoutVariable {
    pub fn new(widget: WidgetId, property: LayoutProperty) -> Self {
        Self { widget, property }
    }

    pub fn x(widget: WidgetId) -> Self {
        Self::new(widget, LayoutProperty::X)
    }

    pub fn y(widget: WidgetId) -> Self {
        Self::new(widget, LayoutProperty::Y)
    }

    pub fn width(widget: WidgetId) -> Self {
        Self::new(widget, LayoutProperty::Width)
    }

    pub fn height(widget: WidgetId) -> Self {
        Self::new(widget, LayoutProperty::Height)
    }
}

/// Errors from the constraint solver
#[derive(Debug, Error)]
pub enum SolverError {
    #[error("Unsatisfiable constraints on widget {widget}: {reason}")]
    Unsatisfiable { widget: WidgetId, reason: String },

    #[error("Internal solver error: {0}")]
    Internal(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Axis {
    Horizontal,
    Vertical,
}

impl Axis {
    fn sides(self) -> (AnchorType, AnchorType) {
        match self {
            Axis::Horizontal => (AnchorType::Left, AnchorType::Right),
            Axis::Vertical => (AnchorType::Top, AnchorType::Bottom),
        }
    }

    fn position(self, widget: WidgetId) -> LayoutVariable {
        match self {
            Axis::Horizontal => LayoutVariable::x(widget),
            Axis::Vertical => LayoutVariable::y(widget),
        }
    }

    fn extent(self, widget: WidgetId) -> LayoutVariable {
        match self {
            Axis::Horizontal => LayoutVariable::width(widget),
            Axis::Vertical => LayoutVariable::height(widget),
        }
    }

    fn behaviour(self, w: &Widget) -> DimensionBehaviour {
        match self {
            Axis::Horizontal => w.horizontal,
            Axis::Vertical => w.vertical,
        }
    }

    /// (origin, size, minimum) of the widget along this axis
    fn metrics(self, w: &Widget) -> (i32, i32, i32) {
        match self {
            Axis::Horizontal => (w.x, w.width, w.min_width),
            Axis::Vertical => (w.y, w.height, w.min_height),
        }
    }
}

/// Solver strength for an anchor bias
fn anchor_strength(strength: Option<Strength>) -> SolverStrength {
    match strength {
        Some(Strength::Weak) => SolverStrength::MEDIUM,
        Some(Strength::Strong) | None => SolverStrength::STRONG,
    }
}

/// Wrapper around kasuari solver
pub struct ConstraintSolver {
    solver: KasuariSolver,
    /// Maps our variables to kasuari variables
    variables: HashMap<LayoutVariable, KasuariVariable>,
    /// Reverse map used when reading changes back
    owners: HashMap<KasuariVariable, LayoutVariable>,
}

impl ConstraintSolver {
    pub fn new() -> Self {
        Self {
            solver: KasuariSolver::new(),
            variables: HashMap::new(),
            owners: HashMap::new(),
        }
    }

    /// Get or create the kasuari variable for one of our variables
    fn var(&mut self, var: LayoutVariable) -> KasuariVariable {
        if let Some(&kvar) = self.variables.get(&var) {
            kvar
        } else {
            let kvar = KasuariVariable::new();
            self.variables.insert(var, kvar);
            self.owners.insert(kvar, var);
            kvar
        }
    }

    /// Expression for an anchor's position in absolute coordinates
    fn edge(&mut self, graph: &WidgetGraph, target: AnchorTarget) -> Expression {
        let id = target.widget;
        let x = self.var(LayoutVariable::x(id));
        let y = self.var(LayoutVariable::y(id));
        let width = self.var(LayoutVariable::width(id));
        let height = self.var(LayoutVariable::height(id));
        match target.anchor {
            AnchorType::Left => x.into(),
            AnchorType::Right => x + width,
            AnchorType::Top => y.into(),
            AnchorType::Bottom => y + height,
            AnchorType::CenterX => x + width * 0.5,
            AnchorType::CenterY => y + height * 0.5,
            AnchorType::Baseline => {
                let distance = graph.get(id).map(|w| w.baseline.max(0)).unwrap_or(0);
                y + distance as f64
            }
        }
    }

    /// Convert a kasuari error to a SolverError with context
    fn convert_kasuari_error(
        e: kasuari::AddConstraintError,
        widget: WidgetId,
        desc: &str,
    ) -> SolverError {
        match e {
            kasuari::AddConstraintError::UnsatisfiableConstraint => SolverError::Unsatisfiable {
                widget,
                reason: format!("cannot satisfy {}", desc),
            },
            kasuari::AddConstraintError::DuplicateConstraint => {
                SolverError::Internal(format!("Duplicate constraint: {}", desc))
            }
            kasuari::AddConstraintError::InternalSolverError(msg) => {
                SolverError::Internal(format!("Internal solver error for {}: {}", desc, msg))
            }
        }
    }

    fn add(
        &mut self,
        constraint: kasuari::Constraint,
        widget: WidgetId,
        desc: &str,
    ) -> Result<(), SolverError> {
        self.solver
            .add_constraint(constraint)
            .map_err(|e| Self::convert_kasuari_error(e, widget, desc))
    }

    /// Add the constraints for every widget in the graph
    pub fn add_graph(&mut self, graph: &WidgetGraph) -> Result<(), SolverError> {
        for (id, widget) in graph.iter() {
            for axis in [Axis::Horizontal, Axis::Vertical] {
                self.add_size(id, widget, axis)?;
                self.add_position(graph, id, widget, axis)?;
            }
        }
        Ok(())
    }

    fn add_size(&mut self, id: WidgetId, w: &Widget, axis: Axis) -> Result<(), SolverError> {
        let extent = self.var(axis.extent(id));
        let (_, size, min) = axis.metrics(w);
        let size = size as f64;

        if w.parent().is_none() {
            return self.add(extent | EQ(SolverStrength::REQUIRED) | size, id, "root size");
        }
        match axis.behaviour(w) {
            DimensionBehaviour::Fixed => {
                self.add(extent | EQ(SolverStrength::REQUIRED) | size, id, "fixed size")
            }
            DimensionBehaviour::WrapContent => {
                self.add(
                    extent | GE(SolverStrength::REQUIRED) | min as f64,
                    id,
                    "wrap minimum",
                )?;
                self.add(extent | EQ(SolverStrength::STRONG) | size, id, "wrap size")
            }
            DimensionBehaviour::Any => {
                self.add(extent | GE(SolverStrength::REQUIRED) | 0.0, id, "non-negative size")?;
                self.add(extent | EQ(SolverStrength::WEAK) | size, id, "preferred size")
            }
        }
    }

    fn add_position(
        &mut self,
        graph: &WidgetGraph,
        id: WidgetId,
        w: &Widget,
        axis: Axis,
    ) -> Result<(), SolverError> {
        let pos = self.var(axis.position(id));
        let extent = self.var(axis.extent(id));
        let (origin, _, _) = axis.metrics(w);

        let Some(parent) = w.parent() else {
            return self.add(
                pos | EQ(SolverStrength::REQUIRED) | origin as f64,
                id,
                "root origin",
            );
        };

        let (lead, trail) = axis.sides();
        let (la, ta) = (w.anchor(lead), w.anchor(trail));
        let live = |a: &Anchor| a.target.filter(|t| graph.contains(t.widget));
        let (lm, tm) = (la.margin as f64, ta.margin as f64);

        match (live(la), live(ta)) {
            (Some(lt), Some(tt)) => {
                let lead_edge = self.edge(graph, lt);
                let trail_edge = self.edge(graph, tt);
                if axis.behaviour(w) == DimensionBehaviour::Any {
                    self.add(
                        pos | EQ(anchor_strength(la.strength)) | lead_edge + lm,
                        id,
                        "stretch lead",
                    )?;
                    return self.add(
                        pos + extent | EQ(anchor_strength(ta.strength)) | trail_edge - tm,
                        id,
                        "stretch trail",
                    );
                }
                match (la.strength, ta.strength) {
                    (Some(Strength::Strong), Some(Strength::Weak)) => self.add(
                        pos | EQ(SolverStrength::STRONG) | lead_edge + lm,
                        id,
                        "lead bias",
                    ),
                    (Some(Strength::Weak), Some(Strength::Strong)) => self.add(
                        pos + extent | EQ(SolverStrength::STRONG) | trail_edge - tm,
                        id,
                        "trail bias",
                    ),
                    // Midway between (lead + lm) and (trail - tm)
                    _ => self.add(
                        pos * 2.0 + extent + (tm - lm) | EQ(SolverStrength::STRONG) | lead_edge + trail_edge,
                        id,
                        "centering",
                    ),
                }
            }
            (Some(lt), None) => {
                let lead_edge = self.edge(graph, lt);
                self.add(
                    pos | EQ(anchor_strength(la.strength)) | lead_edge + lm,
                    id,
                    "lead connection",
                )
            }
            (None, Some(tt)) => {
                let trail_edge = self.edge(graph, tt);
                self.add(
                    pos + extent | EQ(anchor_strength(ta.strength)) | trail_edge - tm,
                    id,
                    "trail connection",
                )
            }
            (None, None) => {
                let baseline = w.anchor(AnchorType::Baseline);
                if let (Axis::Vertical, Some(bt)) = (axis, live(baseline)) {
                    let target_edge = self.edge(graph, bt);
                    let distance = w.baseline.max(0) as f64;
                    return self.add(
                        pos + distance | EQ(SolverStrength::STRONG) | target_edge,
                        id,
                        "baseline alignment",
                    );
                }
                let parent_pos = self.var(axis.position(parent));
                self.add(
                    pos | EQ(SolverStrength::WEAK) | parent_pos + origin as f64,
                    id,
                    "keep origin",
                )
            }
        }
    }

    /// Read the current values of every variable
    pub fn solution(&mut self) -> Solution {
        let mut values = HashMap::new();
        for (kvar, value) in self.solver.fetch_changes() {
            if let Some(var) = self.owners.get(kvar) {
                values.insert(*var, *value);
            }
        }
        Solution { values }
    }
}

impl Default for ConstraintSolver {
    fn default() -> Self {
        Self::new()
    }
}

/// A solved rectangle in absolute dp
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Frame {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

/// Solution from the constraint solver
#[derive(Debug, Clone, Default)]
pub struct Solution {
    values: HashMap<LayoutVariable, f64>,
}

impl Solution {
    /// Value of a variable; variables the solver left at zero are absent
    /// from its change list and read as zero
    pub fn get(&self, var: LayoutVariable) -> f64 {
        self.values.get(&var).copied().unwrap_or(0.0)
    }

    pub fn frame(&self, widget: WidgetId) -> Frame {
        Frame {
            x: self.get(LayoutVariable::x(widget)),
            y: self.get(LayoutVariable::y(widget)),
            width: self.get(LayoutVariable::width(widget)),
            height: self.get(LayoutVariable::height(widget)),
        }
    }
}

/// Solve the widget graph
pub fn solve(graph: &WidgetGraph) -> Result<Solution, SolverError> {
    let mut solver = ConstraintSolver::new();
    solver.add_graph(graph)?;
    Ok(solver.solution())
}
