#[cfg(feature = "serialize")]
use serde::{Deserialize, Serialize};

use bevy_math::{Rect, Vec2};

/// A line segment between two viewport points.
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Line {
    start: Vec2,
    end: Vec2,
}

impl Line {
    #[inline]
    pub fn new<P>(start: P, end: P) -> Self
    where
        P: Into<Vec2>,
    {
        Self {
            start: start.into(),
            end: end.into(),
        }
    }

    /// Get the start point.
    #[inline]
    pub fn start(&self) -> Vec2 {
        self.start
    }

    /// Get the end point.
    #[inline]
    pub fn end(&self) -> Vec2 {
        self.end
    }

    /// Get the line's length squared.
    #[inline]
    pub fn length_squared(&self) -> f32 {
        self.start.distance_squared(self.end)
    }

    /// Get the line's length.
    #[inline]
    pub fn length(&self) -> f32 {
        self.start.distance(self.end)
    }

    /// Determine if this line is axis-aligned.
    #[inline]
    pub fn is_axis_aligned(&self) -> bool {
        self.start.x == self.end.x || self.start.y == self.end.y
    }
}

/// Render-ready geometry for a maze path, in viewport pixels: filled marker
/// squares for the endpoints and a polyline along path-cell centers.
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PathRenderConfig {
    /// Start and end markers as filled squares.
    pub points: Vec<Rect>,

    /// Segments between successive path-cell centers.
    pub path: Vec<Line>,
}

impl PathRenderConfig {
    /// Determine if this config carries no geometry.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty() && self.path.is_empty()
    }
}
