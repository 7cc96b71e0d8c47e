//! Ready-made designs.

use crate::error::Result;
use crate::system::LSystem;
use crate::turtle::Turn;
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

/// A complete design: grammar plus suggested drawing parameters.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Preset {
    pub name: String,
    pub axiom: String,
    /// Productions as `(symbol, replacement)`.
    pub rules: Vec<(char, String)>,
    /// Magnitude used for both `+` and `-`, in degrees.
    pub turn_degrees: f64,
    pub generations: usize,
    /// Starting heading in radians.
    pub heading: f64,
    pub step: f64,
}

impl Preset {
    /// Triangle of Koch curves.
    pub fn koch_snowflake() -> Self {
        Self {
            name: "koch_snowflake".into(),
            axiom: "-F++F++F".into(),
            rules: vec![('F', "F-F++F-F".into())],
            turn_degrees: 60.0,
            generations: 5,
            heading: 0.0,
            step: 4.0,
        }
    }

    /// Branching plant. `X` only steers growth and draws nothing.
    pub fn fractal_plant() -> Self {
        Self {
            name: "fractal_plant".into(),
            axiom: "X".into(),
            rules: vec![
                ('X', "F-[[X]+X]+F[+FX]-X".into()),
                ('F', "FF".into()),
            ],
            turn_degrees: 25.0,
            generations: 5,
            heading: 270.0_f64.to_radians(),
            step: 5.0,
        }
    }

    /// Quadratic Koch island with lakes; `L` moves with the pen up.
    pub fn quadratic_koch_island() -> Self {
        Self {
            name: "quadratic_koch_island".into(),
            axiom: "F+F+F+F".into(),
            rules: vec![
                ('F', "F+L-FF+F+FF+FL+FF-L+FF-F-FF-FL-FFF".into()),
                ('L', "LLLLLL".into()),
            ],
            turn_degrees: 90.0,
            generations: 3,
            heading: 3.0 * PI / 2.0,
            step: 4.0,
        }
    }

    pub fn all() -> Vec<Self> {
        vec![
            Self::koch_snowflake(),
            Self::fractal_plant(),
            Self::quadratic_koch_island(),
        ]
    }

    /// Builds an [`LSystem`] with this grammar, expanded to `generations`.
    pub fn build(&self) -> Result<LSystem> {
        let mut system = LSystem::new();
        for (symbol, replacement) in &self.rules {
            system.define_rule(*symbol, replacement)?;
        }
        system.set_turn_angle(Turn::Left, self.turn_degrees);
        system.set_turn_angle(Turn::Right, self.turn_degrees);
        system.set_axiom(self.axiom.as_str());
        system.generate(self.generations)?;
        Ok(system)
    }
}
