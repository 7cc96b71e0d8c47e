//! # lsys-turtle
//!
//! An engine-agnostic L-System crate: a parallel rewriting engine and a 2D
//! turtle that turns the expanded string into line segments.
//!
//! Expansion ([`GrammarEngine`]) and interpretation ([`TurtleInterpreter`])
//! are separate, so a renderer can pan or zoom by re-interpreting with a new
//! [`Pose`] or step length without rewriting the grammar again. The output
//! is a plain [`Drawing`] that any canvas, window or plotter can consume.
//!
//! ```
//! use glam::DVec2;
//! use lsys_turtle::LSystem;
//!
//! let mut lsys = LSystem::new();
//! lsys.parse_rule("F=F-F++F-F").unwrap();
//! lsys.parse_rule("+=60").unwrap();
//! lsys.parse_rule("-=60").unwrap();
//! lsys.set_axiom("-F++F++F");
//! lsys.generate(1).unwrap();
//!
//! let drawing = lsys.generate_lines(DVec2::ZERO, 0.0, 4.0).unwrap();
//! assert_eq!(drawing.segments.len(), 12);
//! ```

pub mod drawing;
pub mod error;
pub mod grammar;
pub mod interpreter;
pub mod presets;
pub mod system;
pub mod turtle;

pub use drawing::*;
pub use error::*;
pub use grammar::*;
pub use interpreter::*;
pub use presets::*;
pub use system::*;
pub use turtle::*;
