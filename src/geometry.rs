//! Plain 2D geometry: points, axis-aligned boxes, circles and containment.

#[cfg(test)]
#[path = "geometry_test.rs"]
mod geometry_test;

/// A point in either screen or world space.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Axis-aligned box given by two opposite corners.
///
/// `width` and `height` are carried alongside the corners; constructors keep
/// `x2 = x1 + width` and `y2 = y1 + height`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    pub x1: f64,
    pub y1: f64,
    pub x2: f64,
    pub y2: f64,
    pub width: f64,
    pub height: f64,
}

impl BoundingBox {
    /// Box with top-left corner `(x, y)` and the given size.
    #[must_use]
    pub fn from_rect(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self { x1: x, y1: y, x2: x + width, y2: y + height, width, height }
    }

    /// Grow the box by `padding` on every side.
    #[must_use]
    pub fn padded(&self, padding: f64) -> Self {
        Self::from_rect(
            self.x1 - padding,
            self.y1 - padding,
            self.width + padding * 2.0,
            self.height + padding * 2.0,
        )
    }

    #[must_use]
    pub fn center(&self) -> Point {
        Point::new(self.x1 + self.width / 2.0, self.y1 + self.height / 2.0)
    }

    /// Inclusive containment test.
    #[must_use]
    pub fn contains(&self, point: Point) -> bool {
        point_in_rect(point, self)
    }
}

/// A circle in world space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Circle {
    pub x: f64,
    pub y: f64,
    pub radius: f64,
}

impl Circle {
    #[must_use]
    pub fn contains(&self, point: Point) -> bool {
        point_in_circle(point, self)
    }
}

/// Whether `point` lies inside `rect`, edges included.
#[must_use]
pub fn point_in_rect(point: Point, rect: &BoundingBox) -> bool {
    point.x >= rect.x1 && point.x <= rect.x2 && point.y >= rect.y1 && point.y <= rect.y2
}

/// Whether `point` lies within `circle.radius` of the circle's center.
#[must_use]
pub fn point_in_circle(point: Point, circle: &Circle) -> bool {
    (point.x - circle.x).hypot(point.y - circle.y) <= circle.radius
}

/// Rotate `point` about `center` by `degrees` (clockwise in screen space).
#[must_use]
pub fn rotate_point(point: Point, center: Point, degrees: f64) -> Point {
    let (sin, cos) = degrees.to_radians().sin_cos();
    let dx = point.x - center.x;
    let dy = point.y - center.y;
    Point::new(
        center.x + dx * cos - dy * sin,
        center.y + dx * sin + dy * cos,
    )
}
