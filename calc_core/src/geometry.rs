//! # Geometry
//!
//! Minimal 2D geometry for sizing openings. Coordinates are in millimeters.
//!
//! Only axis-aligned rectangles are produced today (see [`rectangle`]), but
//! [`bounds`] accepts any simple polygon so irregular openings can be
//! approximated by their bounding box.
//!
//! ## Example
//!
//! ```rust
//! use calc_core::geometry::{bounds, rectangle};
//!
//! let shape = rectangle(1500.0, 1200.0);
//! let b = bounds(&shape);
//! assert_eq!((b.width, b.height), (1500.0, 1200.0));
//! ```

use serde::{Deserialize, Serialize};

/// A point in the plane (mm)
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Point { x, y }
    }
}

/// Closed outline given as an ordered list of vertices.
///
/// The last point connects back to the first; the closing vertex is not
/// repeated.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Polygon {
    pub points: Vec<Point>,
}

impl Polygon {
    pub fn new(points: Vec<Point>) -> Self {
        Polygon { points }
    }

    /// A polygon needs at least three vertices to enclose an area
    pub fn is_closed_shape(&self) -> bool {
        self.points.len() >= 3
    }

    /// Axis-aligned bounding box size
    pub fn bounds(&self) -> Bounds {
        bounds(self)
    }
}

impl From<Vec<(f64, f64)>> for Polygon {
    fn from(points: Vec<(f64, f64)>) -> Self {
        Polygon {
            points: points.into_iter().map(|(x, y)| Point::new(x, y)).collect(),
        }
    }
}

/// Width and height of an axis-aligned bounding box (mm)
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Bounds {
    pub width: f64,
    pub height: f64,
}

/// Size of the axis-aligned bounding box of `polygon`.
///
/// An empty polygon yields `{0, 0}` rather than an error so that shapes that
/// have not been drawn yet can still be sized.
pub fn bounds(polygon: &Polygon) -> Bounds {
    let Some(first) = polygon.points.first() else {
        return Bounds::default();
    };

    let (mut min_x, mut max_x) = (first.x, first.x);
    let (mut min_y, mut max_y) = (first.y, first.y);

    for p in &polygon.points[1..] {
        min_x = min_x.min(p.x);
        max_x = max_x.max(p.x);
        min_y = min_y.min(p.y);
        max_y = max_y.max(p.y);
    }

    Bounds {
        width: max_x - min_x,
        height: max_y - min_y,
    }
}

/// Rectangle with its lower-left corner at the origin.
///
/// The sign of `width` and `height` is not checked here.
pub fn rectangle(width: f64, height: f64) -> Polygon {
    Polygon::new(vec![
        Point::new(0.0, 0.0),
        Point::new(width, 0.0),
        Point::new(width, height),
        Point::new(0.0, height),
    ])
}
