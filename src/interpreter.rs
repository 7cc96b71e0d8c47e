//! Interpreter that converts an expanded symbol string into a [`Drawing`].
//!
//! The entry point is [`TurtleInterpreter`]. Configure it with an
//! [`InterpreterConfig`], adjust the alphabet through
//! [`TurtleInterpreter::classifier_mut`] if the standard one does not fit,
//! then call [`TurtleInterpreter::interpret`] with the string produced by
//! [`GrammarEngine::expand`](crate::GrammarEngine::expand).

use crate::drawing::{Drawing, LineSegment};
use crate::error::{LSystemError, Result};
use crate::grammar::RuleSet;
use crate::turtle::{Pose, SymbolClassifier, Turn, TurtleOp};
use tracing::debug;

/// Configuration for turtle interpretation.
#[derive(Clone, Debug)]
pub struct InterpreterConfig {
    /// Maximum branch nesting before interpretation fails.
    pub max_stack_depth: usize,
}

impl Default for InterpreterConfig {
    fn default() -> Self {
        Self {
            max_stack_depth: 4096,
        }
    }
}

/// Walks a symbol string and emits line segments.
#[derive(Clone, Debug)]
pub struct TurtleInterpreter {
    classifier: SymbolClassifier,
    config: InterpreterConfig,
}

impl Default for TurtleInterpreter {
    fn default() -> Self {
        Self::new(InterpreterConfig::default())
    }
}

impl TurtleInterpreter {
    /// Creates an interpreter using the standard alphabet
    /// (see [`SymbolClassifier::standard`]).
    pub fn new(config: InterpreterConfig) -> Self {
        Self {
            classifier: SymbolClassifier::standard(),
            config,
        }
    }

    /// Replaces the symbol classifier (builder pattern).
    pub fn with_classifier(mut self, classifier: SymbolClassifier) -> Self {
        self.classifier = classifier;
        self
    }

    pub fn classifier(&self) -> &SymbolClassifier {
        &self.classifier
    }

    pub fn classifier_mut(&mut self) -> &mut SymbolClassifier {
        &mut self.classifier
    }

    pub fn config(&self) -> &InterpreterConfig {
        &self.config
    }

    /// Interprets `symbols` starting from `start`, moving `step` units per
    /// draw or move symbol.
    ///
    /// Turn magnitudes come from `rules`. The call is pure: the same
    /// arguments always give the same drawing.
    ///
    /// # Branches
    ///
    /// `[` saves the pose and `]` restores it. A `]` with nothing to restore
    /// aborts with [`LSystemError::UnbalancedBranch`] rather than carrying on
    /// from a stale pose. Unclosed `[` are allowed and reported in
    /// [`Drawing::open_branches`].
    ///
    /// # Turns
    ///
    /// `+` adds the left angle to the heading and `-` subtracts the right
    /// angle. With heading 0 along +X and y up, `+` turns counter-clockwise.
    pub fn interpret(
        &self,
        symbols: &str,
        rules: &RuleSet,
        start: Pose,
        step: f64,
    ) -> Result<Drawing> {
        if !step.is_finite() {
            return Err(LSystemError::InvalidStep(step));
        }
        if !start.is_finite() {
            return Err(LSystemError::InvalidPose {
                position: start.position,
                heading: start.heading,
            });
        }

        let left = rules.turn_angle(Turn::Left).map(f64::to_radians);
        let right = rules.turn_angle(Turn::Right).map(f64::to_radians);

        let mut drawing = Drawing::new();
        let mut turtle = Pose::new(start.position, start.heading);
        let mut stack: Vec<Pose> = Vec::new();

        for (index, symbol) in symbols.chars().enumerate() {
            match self.classifier.op(symbol) {
                TurtleOp::Draw => {
                    let from = turtle.position;
                    let to = turtle.advance(step);
                    drawing.add_segment(LineSegment::new(from, to));
                }
                TurtleOp::Move => {
                    turtle.advance(step);
                }
                TurtleOp::Turn(turn) => {
                    let magnitude = match turn {
                        Turn::Left => left,
                        Turn::Right => right,
                    }
                    .ok_or(LSystemError::MissingTurnAngle(turn))?;
                    turtle.turn(magnitude * turn.sign());
                }
                TurtleOp::Push => {
                    if stack.len() >= self.config.max_stack_depth {
                        return Err(LSystemError::BranchDepthExceeded {
                            index,
                            limit: self.config.max_stack_depth,
                        });
                    }
                    stack.push(turtle);
                    drawing.max_depth = drawing.max_depth.max(stack.len());
                }
                TurtleOp::Pop => {
                    turtle = stack
                        .pop()
                        .ok_or(LSystemError::UnbalancedBranch { index })?;
                }
                TurtleOp::Ignore => {}
            }
        }

        drawing.final_pose = turtle;
        drawing.open_branches = stack.len();
        if drawing.open_branches > 0 {
            debug!(
                open = drawing.open_branches,
                "symbol string ended with unclosed branches"
            );
        }
        debug!(
            symbols = symbols.len(),
            segments = drawing.len(),
            max_depth = drawing.max_depth,
            "interpreted L-System"
        );

        Ok(drawing)
    }
}
