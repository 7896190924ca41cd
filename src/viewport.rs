//! Pan/zoom transform between world space and screen space.

use crate::geometry::Point;

#[cfg(test)]
#[path = "viewport_test.rs"]
mod viewport_test;

/// Pan/zoom transform from world space to screen space.
///
/// `screen = world * scale + translation`, per axis. `x` / `y` are the
/// translation in screen pixels; `scale_x` / `scale_y` are kept at or above
/// the configured floor by [`ViewportTransform::zoom_at`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewportTransform {
    pub x: f64,
    pub y: f64,
    pub scale_x: f64,
    pub scale_y: f64,
}

impl Default for ViewportTransform {
    fn default() -> Self {
        Self { x: 0.0, y: 0.0, scale_x: 1.0, scale_y: 1.0 }
    }
}

impl ViewportTransform {
    /// Convert a screen-space point (surface pixels) to world coordinates.
    #[must_use]
    pub fn screen_to_world(&self, screen: Point) -> Point {
        Point {
            x: (screen.x - self.x) / self.scale_x,
            y: (screen.y - self.y) / self.scale_y,
        }
    }

    /// Convert a world-space point to screen coordinates.
    #[must_use]
    pub fn world_to_screen(&self, world: Point) -> Point {
        Point {
            x: world.x * self.scale_x + self.x,
            y: world.y * self.scale_y + self.y,
        }
    }

    /// Convert a screen-space displacement to a world-space displacement.
    ///
    /// Translation does not apply to deltas.
    #[must_use]
    pub fn screen_delta_to_world(&self, delta: Point) -> Point {
        Point { x: delta.x / self.scale_x, y: delta.y / self.scale_y }
    }

    /// The affine 6-tuple `(a, b, c, d, e, f)` for a canvas `setTransform`.
    #[must_use]
    pub fn matrix(&self) -> [f64; 6] {
        [self.scale_x, 0.0, 0.0, self.scale_y, self.x, self.y]
    }

    /// Zoom by `delta` around the screen point `cursor`.
    ///
    /// Each axis scale becomes `max(scale - delta, min_scale)` and the
    /// translation is adjusted so the world point under `cursor` keeps its
    /// screen position. Returns `false`, leaving the transform untouched, when
    /// neither scale changes (e.g. already at the floor).
    pub fn zoom_at(&mut self, cursor: Point, delta: f64, min_scale: f64) -> bool {
        let old_x = self.scale_x;
        let old_y = self.scale_y;
        let new_x = (old_x - delta).max(min_scale);
        let new_y = (old_y - delta).max(min_scale);
        if (new_x - old_x).abs() < f64::EPSILON && (new_y - old_y).abs() < f64::EPSILON {
            return false;
        }

        self.scale_x = new_x;
        self.scale_y = new_y;
        self.x = cursor.x - (cursor.x - self.x) * ratio(new_x, old_x);
        self.y = cursor.y - (cursor.y - self.y) * ratio(new_y, old_y);
        true
    }
}

fn ratio(new: f64, old: f64) -> f64 {
    if old > 0.0 { new / old } else { 1.0 }
}
