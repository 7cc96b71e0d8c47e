//! Turtle state, operations and the symbol alphabet.

use glam::DVec2;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::f64::consts::TAU;
use std::fmt;

/// Direction of a heading change.
///
/// `Left` is counter-clockwise in a y-up frame: it *increases* the heading.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Turn {
    /// Counter-clockwise (`+`).
    Left,
    /// Clockwise (`-`).
    Right,
}

impl Turn {
    /// The grammar symbol conventionally bound to this turn.
    pub fn symbol(self) -> char {
        match self {
            Turn::Left => '+',
            Turn::Right => '-',
        }
    }

    /// Maps `+`/`-` back to a turn.
    pub fn from_symbol(symbol: char) -> Option<Self> {
        match symbol {
            '+' => Some(Turn::Left),
            '-' => Some(Turn::Right),
            _ => None,
        }
    }

    /// Sign applied to the angle magnitude.
    pub fn sign(self) -> f64 {
        match self {
            Turn::Left => 1.0,
            Turn::Right => -1.0,
        }
    }
}

impl fmt::Display for Turn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let side = match self {
            Turn::Left => "left",
            Turn::Right => "right",
        };
        write!(f, "{side} turn `{}`", self.symbol())
    }
}

/// Position and heading of the turtle.
///
/// Heading is in radians, measured from +X towards +Y, and is always kept
/// in `[0, 2π)`. The forward vector is `(cos h, sin h)`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Pose {
    /// Current position of the pen.
    pub position: DVec2,
    /// Current heading in radians.
    pub heading: f64,
}

impl Pose {
    /// Creates a pose, normalizing `heading` into `[0, 2π)`.
    pub fn new(position: DVec2, heading: f64) -> Self {
        Self {
            position,
            heading: wrap_heading(heading),
        }
    }

    /// Whether both the position and heading are finite numbers.
    pub fn is_finite(&self) -> bool {
        self.position.is_finite() && self.heading.is_finite()
    }

    /// Unit vector pointing along the heading.
    pub fn forward(&self) -> DVec2 {
        DVec2::from_angle(self.heading)
    }

    /// Moves `step` units along the heading and returns the new position.
    pub fn advance(&mut self, step: f64) -> DVec2 {
        self.position += self.forward() * step;
        self.position
    }

    /// Rotates by `radians` (positive is left), wrapping into `[0, 2π)`.
    pub fn turn(&mut self, radians: f64) {
        self.heading = wrap_heading(self.heading + radians);
    }
}

fn wrap_heading(radians: f64) -> f64 {
    let wrapped = radians.rem_euclid(TAU);
    // rem_euclid can round up to exactly TAU for tiny negative inputs
    if wrapped >= TAU { 0.0 } else { wrapped }
}

/// Operations the turtle can perform for a single symbol.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum TurtleOp {
    /// Move forward one step and emit a segment.
    Draw,
    /// Move forward one step without drawing (pen up).
    Move,
    /// Rotate by the magnitude defined for this turn.
    Turn(Turn),
    /// Save the pose onto the branch stack (`[`).
    Push,
    /// Restore the most recently pushed pose (`]`).
    Pop,
    /// No-op. Grammar placeholders such as `X` land here.
    Ignore,
}

/// Maps grammar symbols to turtle operations.
///
/// The classifier is an explicit table, not a character range, so hosts can
/// bind any `char` to any role at runtime. Unmapped symbols are
/// [`TurtleOp::Ignore`].
#[derive(Clone, Debug, Default)]
pub struct SymbolClassifier {
    ops: HashMap<char, TurtleOp>,
}

impl SymbolClassifier {
    /// Letters that draw in the standard alphabet.
    pub const DRAW_LETTERS: [char; 6] = ['A', 'B', 'C', 'D', 'E', 'F'];
    /// Letters that move without drawing in the standard alphabet.
    pub const FORWARD_LETTERS: [char; 6] = ['G', 'H', 'I', 'J', 'K', 'L'];

    /// An empty classifier: every symbol is ignored.
    pub fn new() -> Self {
        Self::default()
    }

    /// The conventional alphabet: `A`–`F` draw, `G`–`L` move, `+`/`-` turn,
    /// `[`/`]` branch.
    pub fn standard() -> Self {
        let mut classifier = Self::new();
        classifier.populate_standard_symbols();
        classifier
    }

    /// Registers the standard mappings, overwriting any existing ones for
    /// those symbols.
    pub fn populate_standard_symbols(&mut self) {
        for sym in Self::DRAW_LETTERS {
            self.set_op(sym, TurtleOp::Draw);
        }
        for sym in Self::FORWARD_LETTERS {
            self.set_op(sym, TurtleOp::Move);
        }
        self.set_op('+', TurtleOp::Turn(Turn::Left));
        self.set_op('-', TurtleOp::Turn(Turn::Right));
        self.set_op('[', TurtleOp::Push);
        self.set_op(']', TurtleOp::Pop);
    }

    /// Assigns `op` to `symbol`.
    pub fn set_op(&mut self, symbol: char, op: TurtleOp) {
        self.ops.insert(symbol, op);
    }

    /// Builder form of [`set_op`](Self::set_op).
    pub fn with_op(mut self, symbol: char, op: TurtleOp) -> Self {
        self.set_op(symbol, op);
        self
    }

    /// Looks up the operation for `symbol`.
    pub fn op(&self, symbol: char) -> TurtleOp {
        self.ops.get(&symbol).copied().unwrap_or(TurtleOp::Ignore)
    }
}
