//! Rendering: draws the full scene to a [`Surface`].
//!
//! It receives read-only views of the scene and viewport and produces
//! pixels; it does not mutate any editor state.
//!
//! Layers, bottom to top: background grid, elements in draw order (pointer
//! marker last), hover outlines, selection outlines, debug overlay. Every
//! `save` is paired with a `restore` on both the success and error paths, so
//! a failed pass never leaves a rotation behind for the next one.

use std::f64::consts::TAU;

use tracing::trace;

use crate::config::EditorConfig;
use crate::consts::{
    DEBUG_COLOR, DEBUG_FIRST_LINE_Y, DEBUG_FONT, DEBUG_LINE_HEIGHT, DEBUG_MARGIN_X, GRID_DOT_COLOR, GRID_DOT_RADIUS,
    HOVER_COLOR, HOVER_LINE_PX, POINTER_COLOR, POINTER_FONT, POINTER_HALF_LENGTH, SELECTION_COLOR, SELECTION_LINE_PX,
};
use crate::error::SurfaceError;
use crate::geometry::{BoundingBox, Point};
use crate::scene::{Element, ElementKind, Scene, TextAlign, TextBaseline};
use crate::surface::{IDENTITY, Surface, SurfaceSize};
use crate::viewport::ViewportTransform;

#[cfg(test)]
#[path = "render_test.rs"]
mod render_test;

/// Draw one frame and return how long it took in milliseconds.
///
/// The time covers everything up to the debug overlay, as measured by
/// [`Surface::now_ms`].
///
/// # Errors
///
/// Returns the first [`SurfaceError`] raised by the surface. The surface's
/// save stack is left balanced.
pub fn draw<S: Surface + ?Sized>(
    surface: &mut S,
    scene: &Scene,
    viewport: &ViewportTransform,
    config: &EditorConfig,
) -> Result<f64, SurfaceError> {
    let started = surface.now_ms();
    let size = surface.size();

    // Layer 1: clear in screen space, then switch to world space.
    surface.set_transform(IDENTITY)?;
    surface.clear_rect(BoundingBox::from_rect(0.0, 0.0, size.width, size.height));
    surface.set_line_width(1.0);
    surface.set_transform(viewport.matrix())?;

    // Layer 2: grid.
    if config.show_grid {
        draw_grid(surface, viewport, size, config)?;
    }

    // Layer 3: elements in draw order.
    for element in scene.elements() {
        draw_element(surface, element, viewport, config)?;
    }

    // Layer 4: hover, then selection, outlines.
    for id in scene.hovered_ids() {
        if scene.is_selected(id) {
            continue;
        }
        if let Some(element) = scene.get(id) {
            draw_outline(surface, element, HOVER_COLOR, HOVER_LINE_PX, viewport, config)?;
        }
    }
    for id in scene.selected_ids() {
        if let Some(element) = scene.get(id) {
            draw_outline(surface, element, SELECTION_COLOR, SELECTION_LINE_PX, viewport, config)?;
        }
    }

    let elapsed = surface.now_ms() - started;
    trace!(elapsed_ms = elapsed, elements = scene.len(), "render: frame drawn");

    // Layer 5: debug overlay in screen space.
    if config.show_debug_overlay {
        draw_debug_overlay(surface, &debug_lines(scene, viewport, elapsed))?;
    }

    Ok(elapsed)
}

// =============================================================
// Grid
// =============================================================

/// Grid pitch in world units for the current zoom.
#[must_use]
pub fn grid_pitch(viewport: &ViewportTransform, config: &EditorConfig) -> f64 {
    if viewport.scale_x < config.coarse_grid_below {
        config.coarse_grid_pitch
    } else {
        config.grid_pitch
    }
}

fn draw_grid<S: Surface + ?Sized>(
    surface: &mut S,
    viewport: &ViewportTransform,
    size: SurfaceSize,
    config: &EditorConfig,
) -> Result<(), SurfaceError> {
    let pitch = grid_pitch(viewport, config);
    if !pitch.is_finite() || pitch <= 0.0 {
        return Ok(());
    }

    let top_left = viewport.screen_to_world(Point::new(0.0, 0.0));
    let bottom_right = viewport.screen_to_world(Point::new(size.width, size.height));
    let first_x = (top_left.x / pitch).floor() * pitch;
    let first_y = (top_left.y / pitch).floor() * pitch;

    surface.set_fill_style(GRID_DOT_COLOR);

    let mut col = 0.0;
    loop {
        let x = first_x + col * pitch;
        if x > bottom_right.x {
            break;
        }
        let mut row = 0.0;
        loop {
            let y = first_y + row * pitch;
            if y > bottom_right.y {
                break;
            }
            surface.begin_path();
            surface.arc(x, y, GRID_DOT_RADIUS, 0.0, TAU)?;
            surface.fill();
            row += 1.0;
        }
        col += 1.0;
    }
    Ok(())
}

// =============================================================
// Element dispatch
// =============================================================

fn draw_element<S: Surface + ?Sized>(
    surface: &mut S,
    element: &Element,
    viewport: &ViewportTransform,
    config: &EditorConfig,
) -> Result<(), SurfaceError> {
    match &element.kind {
        ElementKind::Rect { width, height } => {
            let bounds = BoundingBox::from_rect(element.x, element.y, *width, *height);
            apply_paint(surface, element);
            with_rotation(surface, bounds.center(), element.rotation, |s| {
                s.fill_rect(bounds);
                s.stroke_rect(bounds);
                Ok(())
            })
        }
        ElementKind::Circle { radius } => {
            apply_paint(surface, element);
            surface.begin_path();
            surface.arc(element.x, element.y, radius.max(0.0), 0.0, TAU)?;
            surface.fill();
            surface.stroke();
            Ok(())
        }
        ElementKind::Image { width, height, image } => {
            let bounds = BoundingBox::from_rect(element.x, element.y, *width, *height);
            with_rotation(surface, bounds.center(), element.rotation, |s| s.draw_image(image, bounds))
        }
        ElementKind::Text { text, text_align, text_baseline, .. } => {
            // Measuring also sets the element's font on the surface.
            let bounds = element.bounding_box(surface, &config.default_font_face)?;
            surface.set_text_align(*text_align);
            surface.set_text_baseline(*text_baseline);
            apply_paint(surface, element);
            with_rotation(surface, bounds.center(), element.rotation, |s| {
                s.fill_text(text, element.x, element.y)?;
                s.stroke_text(text, element.x, element.y)
            })
        }
        ElementKind::Pointer => draw_pointer(surface, element, viewport),
    }
}

/// Crosshair and coordinate label, drawn at a fixed screen size.
fn draw_pointer<S: Surface + ?Sized>(
    surface: &mut S,
    marker: &Element,
    viewport: &ViewportTransform,
) -> Result<(), SurfaceError> {
    let at = viewport.world_to_screen(marker.position());
    surface.save();
    let drawn = draw_pointer_in_screen_space(surface, marker, at);
    surface.restore();
    drawn
}

fn draw_pointer_in_screen_space<S: Surface + ?Sized>(
    surface: &mut S,
    marker: &Element,
    at: Point,
) -> Result<(), SurfaceError> {
    surface.set_transform(IDENTITY)?;
    surface.set_line_width(1.0);
    surface.set_stroke_style(POINTER_COLOR);
    surface.begin_path();
    surface.move_to(at.x - POINTER_HALF_LENGTH, at.y);
    surface.line_to(at.x + POINTER_HALF_LENGTH, at.y);
    surface.move_to(at.x, at.y - POINTER_HALF_LENGTH);
    surface.line_to(at.x, at.y + POINTER_HALF_LENGTH);
    surface.stroke();

    surface.set_font(POINTER_FONT);
    surface.set_text_align(TextAlign::Left);
    surface.set_text_baseline(TextBaseline::Top);
    surface.set_fill_style(POINTER_COLOR);
    surface.fill_text(
        &format!("{:.0}, {:.0}", marker.x, marker.y),
        at.x + POINTER_HALF_LENGTH,
        at.y + POINTER_HALF_LENGTH,
    )
}

// =============================================================
// Outlines
// =============================================================

/// Stroke the padded bounding box of `element` with a constant screen width.
fn draw_outline<S: Surface + ?Sized>(
    surface: &mut S,
    element: &Element,
    color: &str,
    line_px: f64,
    viewport: &ViewportTransform,
    config: &EditorConfig,
) -> Result<(), SurfaceError> {
    if element.is_pointer() {
        return Ok(());
    }
    let bounds = element.bounding_box(surface, &config.default_font_face)?.padded(config.outline_padding);
    let degrees = outline_rotation(element);

    surface.save();
    surface.set_stroke_style(color);
    surface.set_line_width(line_px / viewport.scale_x);
    let drawn = with_rotation(surface, bounds.center(), degrees, |s| {
        s.stroke_rect(bounds);
        Ok(())
    });
    surface.restore();
    drawn
}

/// Circles are drawn unrotated, so their outline is too.
fn outline_rotation(element: &Element) -> f64 {
    match element.kind {
        ElementKind::Circle { .. } => 0.0,
        _ => element.rotation,
    }
}

// =============================================================
// Debug overlay
// =============================================================

/// Text lines of the debug overlay, top to bottom.
#[must_use]
pub fn debug_lines(scene: &Scene, viewport: &ViewportTransform, elapsed_ms: f64) -> Vec<String> {
    let mut lines = vec![
        format!("Render time: {elapsed_ms:.2}ms"),
        format!(
            "Viewport: {:.2}, {:.2}, {:.2}, {:.2}",
            viewport.x, viewport.y, viewport.scale_x, viewport.scale_y
        ),
    ];
    lines.extend(scene.elements().iter().map(describe));
    lines.extend(
        scene
            .selected_ids()
            .iter()
            .filter_map(|id| scene.get(id))
            .map(|el| format!("Selected: {}", describe(el))),
    );
    lines
}

fn describe(element: &Element) -> String {
    format!("{}: {:.2}, {:.2}", element.kind.tag(), element.x, element.y)
}

fn draw_debug_overlay<S: Surface + ?Sized>(surface: &mut S, lines: &[String]) -> Result<(), SurfaceError> {
    surface.set_transform(IDENTITY)?;
    surface.set_font(DEBUG_FONT);
    surface.set_text_align(TextAlign::Left);
    surface.set_text_baseline(TextBaseline::Alphabetic);
    surface.set_fill_style(DEBUG_COLOR);
    let mut y = DEBUG_FIRST_LINE_Y;
    for line in lines {
        surface.fill_text(line, DEBUG_MARGIN_X, y)?;
        y += DEBUG_LINE_HEIGHT;
    }
    Ok(())
}

// =============================================================
// Helpers
// =============================================================

fn apply_paint<S: Surface + ?Sized>(surface: &mut S, element: &Element) {
    surface.set_fill_style(element.fill());
    surface.set_stroke_style(element.stroke());
}

/// Run `draw` rotated by `degrees` about `center`.
///
/// Unrotated elements skip the save/restore pair entirely.
fn with_rotation<S, F>(surface: &mut S, center: Point, degrees: f64, draw: F) -> Result<(), SurfaceError>
where
    S: Surface + ?Sized,
    F: FnOnce(&mut S) -> Result<(), SurfaceError>,
{
    if degrees == 0.0 {
        return draw(surface);
    }
    surface.save();
    let drawn = rotate_about(surface, center, degrees).and_then(|()| draw(&mut *surface));
    surface.restore();
    drawn
}

fn rotate_about<S: Surface + ?Sized>(surface: &mut S, center: Point, degrees: f64) -> Result<(), SurfaceError> {
    surface.translate(center.x, center.y)?;
    surface.rotate(degrees.to_radians())?;
    surface.translate(-center.x, -center.y)
}
