//! Interpreter output: line segments and their bounds.

use crate::turtle::Pose;
use glam::DVec2;
use serde::{Deserialize, Serialize};

/// A straight line from `start` to `end`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct LineSegment {
    pub start: DVec2,
    pub end: DVec2,
}

impl LineSegment {
    pub fn new(start: DVec2, end: DVec2) -> Self {
        Self { start, end }
    }

    pub fn length(&self) -> f64 {
        self.start.distance(self.end)
    }
}

/// Axis-aligned box around a set of segments.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub min: DVec2,
    pub max: DVec2,
}

impl Bounds {
    pub fn size(&self) -> DVec2 {
        self.max - self.min
    }

    pub fn center(&self) -> DVec2 {
        (self.min + self.max) * 0.5
    }

    fn include(&mut self, point: DVec2) {
        self.min = self.min.min(point);
        self.max = self.max.max(point);
    }
}

/// The result of interpreting one symbol string.
///
/// Segments are in emission order, which is a depth-first walk of the
/// branch tree. Renderers that animate the drawing can replay them in order.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Drawing {
    /// Every visible segment, in the order it was drawn.
    pub segments: Vec<LineSegment>,

    /// Where the turtle ended up after the last symbol.
    pub final_pose: Pose,

    /// Deepest branch nesting reached.
    pub max_depth: usize,

    /// `[` symbols still open when the string ran out.
    pub open_branches: usize,
}

impl Drawing {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_segment(&mut self, segment: LineSegment) {
        self.segments.push(segment);
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Bounding box of all segment endpoints, or `None` if nothing was drawn.
    pub fn bounds(&self) -> Option<Bounds> {
        let first = self.segments.first()?;
        let mut bounds = Bounds {
            min: first.start,
            max: first.start,
        };
        for segment in &self.segments {
            bounds.include(segment.start);
            bounds.include(segment.end);
        }
        Some(bounds)
    }

    /// Whether each segment starts where the previous one ended.
    pub fn is_connected(&self, tolerance: f64) -> bool {
        self.segments
            .windows(2)
            .all(|pair| pair[0].end.distance(pair[1].start) <= tolerance)
    }
}
