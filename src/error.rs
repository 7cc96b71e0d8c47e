//! Error type shared by grammar expansion and turtle interpretation.

use crate::turtle::Turn;
use thiserror::Error;

/// Everything that can go wrong while expanding or interpreting an L-System.
///
/// Errors are local to the call that produced them: a failed `expand` or
/// `interpret` never leaves the engine holding a half-built expansion.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LSystemError {
    /// A `]` was reached with nothing on the branch stack.
    #[error("unbalanced branch: `]` at symbol {index} has no matching `[`")]
    UnbalancedBranch { index: usize },

    /// Branch nesting went past the configured stack depth.
    #[error("branch depth limit of {limit} exceeded at symbol {index}")]
    BranchDepthExceeded { index: usize, limit: usize },

    /// A turn symbol was used but no angle was defined for it.
    #[error("no turn angle defined for {0}")]
    MissingTurnAngle(Turn),

    /// A turn angle could not be read as a finite number of degrees.
    #[error("invalid turn angle {value:?} for `{symbol}`")]
    InvalidAngle { symbol: char, value: String },

    /// A rule string was not of the form `<symbol>=<replacement>`.
    #[error("malformed rule {0:?}, expected `<symbol>=<replacement>`")]
    MalformedRule(String),

    /// The step length was NaN or infinite.
    #[error("step length must be finite, got {0}")]
    InvalidStep(f64),

    /// The start pose had a NaN or infinite coordinate or heading.
    #[error("start pose must be finite, got position {position:?} heading {heading}")]
    InvalidPose { position: glam::DVec2, heading: f64 },

    /// More generations were requested than the engine allows.
    #[error("{requested} generations requested, limit is {limit}")]
    TooManyGenerations { requested: usize, limit: usize },

    /// A generation grew past the hard length ceiling.
    #[error("generation {generation} would reach {length} symbols, limit is {limit}")]
    ExpansionLimit {
        generation: usize,
        length: usize,
        limit: usize,
    },
}

pub type Result<T> = std::result::Result<T, LSystemError>;
