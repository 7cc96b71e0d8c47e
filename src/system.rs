//! One-object front end that keeps a grammar, an interpreter and the latest
//! drawing together.

use crate::drawing::{Drawing, LineSegment};
use crate::error::Result;
use crate::grammar::{ExpansionConfig, GrammarEngine};
use crate::interpreter::{InterpreterConfig, TurtleInterpreter};
use crate::turtle::{Pose, Turn};
use glam::DVec2;

/// An L-System design: grammar, expansion, and its last interpretation.
///
/// Expansion and interpretation are separate steps. A host that pans or
/// zooms calls [`redraw`](Self::redraw) with a new origin or step length;
/// the grammar is not re-expanded.
///
/// Every instance owns its own rules. Two systems never share state.
#[derive(Clone, Debug, Default)]
pub struct LSystem {
    grammar: GrammarEngine,
    interpreter: TurtleInterpreter,
    drawing: Drawing,
    origin: DVec2,
    heading: f64,
    step: f64,
}

impl LSystem {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(expansion: ExpansionConfig, interpretation: InterpreterConfig) -> Self {
        Self {
            grammar: GrammarEngine::new(expansion),
            interpreter: TurtleInterpreter::new(interpretation),
            ..Default::default()
        }
    }

    /// Replaces the interpreter, e.g. to install a custom alphabet.
    pub fn with_interpreter(mut self, interpreter: TurtleInterpreter) -> Self {
        self.interpreter = interpreter;
        self
    }

    pub fn set_axiom(&mut self, axiom: impl Into<String>) {
        self.grammar.set_axiom(axiom);
    }

    pub fn define_rule(&mut self, symbol: char, replacement: &str) -> Result<()> {
        self.grammar.define_rule(symbol, replacement)
    }

    /// Accepts rules written as `X=F[+X]-X`, or `+=25` for angles.
    pub fn parse_rule(&mut self, rule: &str) -> Result<()> {
        self.grammar.parse_rule(rule)
    }

    pub fn set_turn_angle(&mut self, turn: Turn, degrees: f64) {
        self.grammar.set_turn_angle(turn, degrees);
    }

    /// Expands the axiom `generations` times.
    pub fn generate(&mut self, generations: usize) -> Result<&str> {
        self.grammar.expand(generations)
    }

    /// Interprets the current expansion from `start`, facing `heading`
    /// radians, with `step` units per move.
    ///
    /// The origin, heading and step are remembered for [`redraw`](Self::redraw)
    /// and [`pan`](Self::pan).
    /// On error the previous drawing is kept.
    pub fn generate_lines(&mut self, start: DVec2, heading: f64, step: f64) -> Result<&Drawing> {
        let drawing = self.interpreter.interpret(
            self.grammar.expansion(),
            self.grammar.rules(),
            Pose::new(start, heading),
            step,
        )?;
        self.drawing = drawing;
        self.origin = start;
        self.heading = heading;
        self.step = step;
        Ok(&self.drawing)
    }

    /// Re-interprets with a new origin and step, keeping the stored heading.
    pub fn redraw(&mut self, start: DVec2, step: f64) -> Result<&Drawing> {
        self.generate_lines(start, self.heading, step)
    }

    /// Moves the origin by `offset` and redraws at the current step.
    pub fn pan(&mut self, offset: DVec2) -> Result<&Drawing> {
        self.redraw(self.origin + offset, self.step)
    }

    /// Start point used by the last successful interpretation.
    pub fn origin(&self) -> DVec2 {
        self.origin
    }

    pub fn expansion(&self) -> &str {
        self.grammar.expansion()
    }

    pub fn grammar(&self) -> &GrammarEngine {
        &self.grammar
    }

    pub fn interpreter(&self) -> &TurtleInterpreter {
        &self.interpreter
    }

    pub fn drawing(&self) -> &Drawing {
        &self.drawing
    }

    pub fn segments(&self) -> &[LineSegment] {
        &self.drawing.segments
    }

    pub fn heading(&self) -> f64 {
        self.heading
    }

    pub fn step(&self) -> f64 {
        self.step
    }
}
