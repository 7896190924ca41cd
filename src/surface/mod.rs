//! Drawing-surface abstraction.
//!
//! The renderer and hit tester never talk to a concrete canvas. They draw
//! through [`Surface`] and measure text through [`FontMetrics`], which the
//! host implements. Two backends ship with the crate:
//!
//! - [`web::CanvasSurface`] wraps a browser `CanvasRenderingContext2d`.
//! - [`recording::RecordingSurface`] records every call, for headless use
//!   and tests.
//!
//! Fallible primitives mirror the browser API: those that can throw return
//! `Result<(), SurfaceError>`, the rest cannot fail.

pub mod recording;
pub mod web;

use crate::error::SurfaceError;
use crate::geometry::BoundingBox;
use crate::scene::{ImageHandle, TextAlign, TextBaseline};

/// The identity affine transform.
pub const IDENTITY: [f64; 6] = [1.0, 0.0, 0.0, 1.0, 0.0, 0.0];

/// Pixel dimensions of a drawing surface.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SurfaceSize {
    pub width: f64,
    pub height: f64,
}

/// Source of text measurements.
///
/// Kept separate from [`Surface`] so hit-testing can borrow only what it
/// needs. Measurements depend on the font most recently set.
pub trait FontMetrics {
    /// Set the active CSS font string (e.g. `"16px sans-serif"`).
    fn set_font(&mut self, font: &str);

    /// Advance width of `text` under the active font.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the backend cannot measure text.
    fn measure_text(&mut self, text: &str) -> Result<f64, SurfaceError>;
}

/// 2D drawing primitives required by the renderer.
pub trait Surface: FontMetrics {
    /// Current pixel dimensions.
    fn size(&self) -> SurfaceSize;

    /// Monotonic clock in milliseconds, used to time render passes.
    fn now_ms(&self) -> f64;

    /// Replace the current transform with the affine `(a, b, c, d, e, f)`.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the backend rejects the matrix.
    fn set_transform(&mut self, matrix: [f64; 6]) -> Result<(), SurfaceError>;

    /// # Errors
    ///
    /// Returns `Err` if the backend rejects the translation.
    fn translate(&mut self, x: f64, y: f64) -> Result<(), SurfaceError>;

    /// # Errors
    ///
    /// Returns `Err` if the backend rejects the rotation.
    fn rotate(&mut self, radians: f64) -> Result<(), SurfaceError>;

    /// Push transform and paint state.
    fn save(&mut self);

    /// Pop transform and paint state pushed by [`Surface::save`].
    fn restore(&mut self);

    fn clear_rect(&mut self, rect: BoundingBox);
    fn fill_rect(&mut self, rect: BoundingBox);
    fn stroke_rect(&mut self, rect: BoundingBox);

    fn begin_path(&mut self);

    /// Add a circular arc to the current path.
    ///
    /// # Errors
    ///
    /// Returns `Err` for arguments the backend rejects (e.g. negative radius).
    fn arc(&mut self, x: f64, y: f64, radius: f64, start: f64, end: f64) -> Result<(), SurfaceError>;

    fn move_to(&mut self, x: f64, y: f64);
    fn line_to(&mut self, x: f64, y: f64);
    fn fill(&mut self);
    fn stroke(&mut self);

    fn set_fill_style(&mut self, paint: &str);
    fn set_stroke_style(&mut self, paint: &str);
    fn set_line_width(&mut self, width: f64);

    /// Draw the full raster behind `image` scaled into `dest`.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the backend fails to draw the raster.
    fn draw_image(&mut self, image: &ImageHandle, dest: BoundingBox) -> Result<(), SurfaceError>;

    fn set_text_align(&mut self, align: TextAlign);
    fn set_text_baseline(&mut self, baseline: TextBaseline);

    /// # Errors
    ///
    /// Returns `Err` if the backend fails to draw the text.
    fn fill_text(&mut self, text: &str, x: f64, y: f64) -> Result<(), SurfaceError>;

    /// # Errors
    ///
    /// Returns `Err` if the backend fails to draw the text.
    fn stroke_text(&mut self, text: &str, x: f64, y: f64) -> Result<(), SurfaceError>;
}
