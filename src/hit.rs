//! Hit-testing: which element, if any, is under a screen point.
//!
//! Elements are tested topmost first (reverse draw order), so where elements
//! overlap the one drawn last wins. Rotated elements are tested by rotating
//! the query point back into the element's unrotated frame.

use tracing::warn;

use crate::error::SurfaceError;
use crate::geometry::{Circle, Point, point_in_circle, point_in_rect, rotate_point};
use crate::scene::{Element, ElementKind, Scene};
use crate::surface::FontMetrics;
use crate::viewport::ViewportTransform;

#[cfg(test)]
#[path = "hit_test.rs"]
mod hit_test;

/// Return the topmost hit-testable element under `screen`.
///
/// Non-interactive elements and the pointer marker are never returned. A
/// text element whose measurement fails is skipped rather than failing the
/// whole query.
pub fn hit_test<'a, M: FontMetrics + ?Sized>(
    screen: Point,
    scene: &'a Scene,
    viewport: &ViewportTransform,
    metrics: &mut M,
    default_face: &str,
) -> Option<&'a Element> {
    let world = viewport.screen_to_world(screen);
    scene
        .elements()
        .iter()
        .rev()
        .filter(|el| el.is_hit_testable())
        .find(|el| match element_contains(el, world, metrics, default_face) {
            Ok(hit) => hit,
            Err(err) => {
                warn!(id = %el.id, error = %err, "hit: skipping element with unmeasurable bounds");
                false
            }
        })
}

/// Whether the world point `world` falls inside `element`.
///
/// # Errors
///
/// Returns the surface error if the element is text and measuring it fails.
pub fn element_contains<M: FontMetrics + ?Sized>(
    element: &Element,
    world: Point,
    metrics: &mut M,
    default_face: &str,
) -> Result<bool, SurfaceError> {
    match &element.kind {
        ElementKind::Circle { radius } => {
            Ok(point_in_circle(world, &Circle { x: element.x, y: element.y, radius: *radius }))
        }
        ElementKind::Pointer => Ok(false),
        ElementKind::Rect { .. } | ElementKind::Text { .. } | ElementKind::Image { .. } => {
            let bounds = element.bounding_box(metrics, default_face)?;
            let local = if element.rotation == 0.0 {
                world
            } else {
                rotate_point(world, bounds.center(), -element.rotation)
            };
            Ok(point_in_rect(local, &bounds))
        }
    }
}
