//! Polyline representation for drawable route geometries.
//!
//! Polylines are plain decoded coordinate sequences; any compact wire
//! encoding happens at the drawing-surface boundary, not here. A
//! polyline resolved through a fallback path (node bridge, stop-to-stop
//! line) is flagged so the surface can style it differently.

use serde::{Deserialize, Serialize};

use crate::traits::Point;

/// An ordered coordinate sequence to draw, with fallback styling info.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Polyline {
    points: Vec<Point>,
    is_fallback: bool,
}

impl Polyline {
    /// Creates a polyline from authoritative link geometry.
    ///
    /// Each point is a (latitude, longitude) tuple.
    pub fn new(points: Vec<Point>) -> Self {
        Self { points, is_fallback: false }
    }

    /// Creates a polyline produced by a fallback path, to be drawn with
    /// distinct styling.
    pub fn fallback(points: Vec<Point>) -> Self {
        Self { points, is_fallback: true }
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    pub fn into_points(self) -> Vec<Point> {
        self.points
    }

    pub fn is_fallback(&self) -> bool {
        self.is_fallback
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn first(&self) -> Option<Point> {
        self.points.first().copied()
    }

    pub fn last(&self) -> Option<Point> {
        self.points.last().copied()
    }

    /// Appends a coordinate sequence, dropping the leading point when it
    /// duplicates the current tail so merged link geometries stay clean.
    pub fn extend_merged(&mut self, points: &[Point]) {
        let mut rest = points;
        if let (Some(last), Some(first)) = (self.last(), points.first()) {
            if last == *first {
                rest = &points[1..];
            }
        }
        self.points.extend_from_slice(rest);
    }
}
