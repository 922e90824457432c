//! Geometry helpers for fixture placement
//!
//! Pure functions over pixel-space rectangles: grid layout for ceiling cans,
//! perimeter length for cove runs, and the collision-avoiding slot search
//! used when chat requests add a fixture to an existing layout.

use serde::{Deserialize, Serialize};

/// Minimum distance a new fixture keeps from existing ones (pixels)
pub const MIN_SEPARATION: f64 = 50.0;

/// Initial nudge distance for the open-slot search (pixels)
pub const START_OFFSET: f64 = 50.0;

/// Nudge growth per search round (pixels)
pub const OFFSET_STEP: f64 = 10.0;

/// Nudge distance at which the search gives up (pixels)
pub const MAX_OFFSET: f64 = 200.0;

/// Axis-aligned rectangle in pixel coordinates
///
/// Serialized as the 4-element array `[x1, y1, x2, y2]`, the wire format the
/// room detector produces for room boundaries.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "[f64; 4]", into = "[f64; 4]")]
pub struct Bounds {
    pub x1: f64,
    pub y1: f64,
    pub x2: f64,
    pub y2: f64,
}

impl Bounds {
    pub fn new(x1: f64, y1: f64, x2: f64, y2: f64) -> Self {
        Self { x1, y1, x2, y2 }
    }

    pub fn width(&self) -> f64 {
        self.x2 - self.x1
    }

    pub fn height(&self) -> f64 {
        self.y2 - self.y1
    }

    pub fn center(&self) -> Point {
        Point {
            x: (self.x1 + self.x2) / 2.0,
            y: (self.y1 + self.y2) / 2.0,
        }
    }
}

impl From<[f64; 4]> for Bounds {
    fn from([x1, y1, x2, y2]: [f64; 4]) -> Self {
        Self { x1, y1, x2, y2 }
    }
}

impl From<Bounds> for [f64; 4] {
    fn from(b: Bounds) -> Self {
        [b.x1, b.y1, b.x2, b.y2]
    }
}

/// A point in pixel coordinates
///
/// Fixture positions serialize as `{ "x": …, "y": … }` objects.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Euclidean distance between two points
pub fn distance(a: Point, b: Point) -> f64 {
    ((a.x - b.x).powi(2) + (a.y - b.y).powi(2)).sqrt()
}

/// Room perimeter length in pixels
pub fn perimeter(bounds: &Bounds) -> f64 {
    2.0 * (bounds.width() + bounds.height())
}

/// Centered grid of points inside `bounds` at the given spacing
///
/// `cols = floor(width / spacing)`, `rows = floor(height / spacing)`; the
/// grid is centered by offsetting `(width - (cols - 1) * spacing) / 2` (same
/// for y). Points are returned in row-major order. Bounds smaller than the
/// spacing in either dimension yield an empty grid; that is expected for
/// small rooms, not an error.
pub fn grid_positions(bounds: &Bounds, spacing: f64) -> Vec<Point> {
    let width = bounds.width();
    let height = bounds.height();

    let cols = (width / spacing).floor() as i64;
    let rows = (height / spacing).floor() as i64;

    if cols <= 0 || rows <= 0 {
        return Vec::new();
    }

    let x_offset = (width - (cols - 1) as f64 * spacing) / 2.0;
    let y_offset = (height - (rows - 1) as f64 * spacing) / 2.0;

    let mut positions = Vec::with_capacity((rows * cols) as usize);
    for i in 0..rows {
        for j in 0..cols {
            positions.push(Point {
                x: bounds.x1 + x_offset + j as f64 * spacing,
                y: bounds.y1 + y_offset + i as f64 * spacing,
            });
        }
    }

    positions
}

/// Find a placement slot that keeps clear of existing fixtures
///
/// Starts at the bounds center. While any existing fixture lies within
/// `MIN_SEPARATION` of the candidate, the candidate is nudged right by the
/// current offset, wrapping to the next row (`x` reset to `x1 + 50`, `y`
/// advanced by the offset) once `x > x2 - 50`. The offset grows by
/// `OFFSET_STEP` each round and the search gives up at `MAX_OFFSET`,
/// returning the last candidate even if it still collides.
///
/// Deterministic: the same bounds and fixture set always yield the same slot.
pub fn find_open_slot(bounds: &Bounds, existing: &[Point]) -> Point {
    let mut position = bounds.center();
    let mut offset = START_OFFSET;

    while offset < MAX_OFFSET {
        let collision = existing
            .iter()
            .find(|p| distance(position, **p) < MIN_SEPARATION);

        match collision {
            None => return position,
            Some(_) => {
                position.x += offset;
                if position.x > bounds.x2 - 50.0 {
                    position.x = bounds.x1 + 50.0;
                    position.y += offset;
                }
            }
        }

        offset += OFFSET_STEP;
    }

    position
}
