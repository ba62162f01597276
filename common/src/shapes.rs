use rand::Rng;
use std::fmt::Debug;

pub type EntityId = u32;

#[derive(Debug, Copy, Clone, PartialEq, Default)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn distance_sq(&self, other: Point) -> f32 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        dx * dx + dy * dy
    }

    pub fn distance(&self, other: Point) -> f32 {
        self.distance_sq(other).sqrt()
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

/// A tracked point. The simulation owns the authoritative position; the index
/// keeps a copy that callers refresh through relocation.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Entity {
    pub id: EntityId,
    pub position: Point,
}

impl Entity {
    pub fn new(id: EntityId, x: f32, y: f32) -> Self {
        Self {
            id,
            position: Point::new(x, y),
        }
    }

    pub fn x(&self) -> f32 {
        self.position.x
    }

    pub fn y(&self) -> f32 {
        self.position.y
    }
}

/// Axis-aligned rectangle stored as min/max corners.
///
/// Point containment is half-open (`min <= p < max`) so that the four
/// quadrants of a rectangle claim every point of their parent exactly once.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct RectExtent {
    pub min_x: f32,
    pub min_y: f32,
    pub max_x: f32,
    pub max_y: f32,
}

impl RectExtent {
    pub fn new(min_x: f32, min_y: f32, max_x: f32, max_y: f32) -> Self {
        Self {
            min_x,
            min_y,
            max_x,
            max_y,
        }
    }

    pub fn width(&self) -> f32 {
        self.max_x - self.min_x
    }

    pub fn height(&self) -> f32 {
        self.max_y - self.min_y
    }

    pub fn area(&self) -> f32 {
        self.width() * self.height()
    }

    pub fn center(&self) -> Point {
        Point::new(
            (self.min_x + self.max_x) * 0.5,
            (self.min_y + self.max_y) * 0.5,
        )
    }

    /// Finite, with strictly positive width and height.
    pub fn is_valid(&self) -> bool {
        self.min_x.is_finite()
            && self.min_y.is_finite()
            && self.max_x.is_finite()
            && self.max_y.is_finite()
            && self.min_x < self.max_x
            && self.min_y < self.max_y
    }

    pub fn contains_point(&self, point: Point) -> bool {
        point.x >= self.min_x
            && point.x < self.max_x
            && point.y >= self.min_y
            && point.y < self.max_y
    }

    /// Grows the rectangle by `margin` on every side.
    pub fn expanded(&self, margin: f32) -> Self {
        Self {
            min_x: self.min_x - margin,
            min_y: self.min_y - margin,
            max_x: self.max_x + margin,
            max_y: self.max_y + margin,
        }
    }

    /// Splits at the midpoint of both axes, ordered top-left, top-right,
    /// bottom-left, bottom-right (top is the `min_y` side).
    pub fn quadrants(&self) -> [RectExtent; 4] {
        let mid = self.center();
        [
            RectExtent::new(self.min_x, self.min_y, mid.x, mid.y),
            RectExtent::new(mid.x, self.min_y, self.max_x, mid.y),
            RectExtent::new(self.min_x, mid.y, mid.x, self.max_y),
            RectExtent::new(mid.x, mid.y, self.max_x, self.max_y),
        ]
    }

    /// Index into [`RectExtent::quadrants`] for a point. Agrees with
    /// half-open containment for points inside the rectangle and picks the
    /// nearest quadrant for points outside it.
    pub fn quadrant_of(&self, point: Point) -> usize {
        let mid = self.center();
        let right = (point.x >= mid.x) as usize;
        let bottom = (point.y >= mid.y) as usize;
        bottom * 2 + right
    }

    pub fn overlap_area(&self, other: &RectExtent) -> f32 {
        let w = f32::min(self.max_x, other.max_x) - f32::max(self.min_x, other.min_x);
        let h = f32::min(self.max_y, other.max_y) - f32::max(self.min_y, other.min_y);
        if w <= 0.0 || h <= 0.0 {
            return 0.0;
        }
        w * h
    }

    pub fn get_random_point_inside<R: Rng>(&self, rng: &mut R) -> Point {
        Point::new(
            self._safe_randf32(rng, self.min_x, self.max_x),
            self._safe_randf32(rng, self.min_y, self.max_y),
        )
    }

    fn _safe_randf32<R: Rng>(&self, rng: &mut R, min: f32, max: f32) -> f32 {
        if min >= max {
            return min;
        }
        rng.gen_range(min..max)
    }
}

impl Default for RectExtent {
    fn default() -> Self {
        Self::new(0.0, 0.0, 0.0, 0.0)
    }
}
