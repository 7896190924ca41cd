//! Browser backend over [`web_sys::CanvasRenderingContext2d`].
//!
//! This is the only place that touches `web_sys` drawing calls. Every
//! throwing `Canvas2D` call is mapped to a [`SurfaceError`] naming the
//! primitive, so a failed pass reports which call broke it.

use std::collections::HashMap;

use tracing::debug;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, HtmlImageElement};

use crate::error::{EditorError, SurfaceError};
use crate::geometry::BoundingBox;
use crate::input::Cursor;
use crate::scene::{ImageHandle, TextAlign, TextBaseline};
use crate::surface::{FontMetrics, Surface, SurfaceSize};

/// A canvas element plus its 2D context and the images the host registered.
pub struct CanvasSurface {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
    images: HashMap<ImageHandle, HtmlImageElement>,
}

impl CanvasSurface {
    /// Bind to `canvas`'s 2D context.
    ///
    /// # Errors
    ///
    /// Returns [`EditorError::MissingContext`] when the canvas has no 2D
    /// context and [`EditorError::ContextUnavailable`] when the lookup throws.
    pub fn from_canvas(canvas: HtmlCanvasElement) -> Result<Self, EditorError> {
        let ctx = match canvas.get_context("2d") {
            Ok(Some(obj)) => obj
                .dyn_into::<CanvasRenderingContext2d>()
                .map_err(|_| EditorError::MissingContext)?,
            Ok(None) => return Err(EditorError::MissingContext),
            Err(err) => return Err(EditorError::ContextUnavailable(js_message(&err))),
        };
        Ok(Self { canvas, ctx, images: HashMap::new() })
    }

    /// Make a decoded image drawable under `handle`.
    pub fn register_image(&mut self, handle: ImageHandle, image: HtmlImageElement) {
        self.images.insert(handle, image);
    }

    pub fn unregister_image(&mut self, handle: &ImageHandle) -> Option<HtmlImageElement> {
        self.images.remove(handle)
    }

    /// Show `cursor` over the canvas element.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the style property cannot be set.
    pub fn apply_cursor(&self, cursor: Cursor) -> Result<(), SurfaceError> {
        self.canvas
            .style()
            .set_property("cursor", cursor.as_css())
            .map_err(js_err("set_cursor"))
    }

    #[must_use]
    pub fn canvas(&self) -> &HtmlCanvasElement {
        &self.canvas
    }
}

impl FontMetrics for CanvasSurface {
    fn set_font(&mut self, font: &str) {
        self.ctx.set_font(font);
    }

    fn measure_text(&mut self, text: &str) -> Result<f64, SurfaceError> {
        self.ctx
            .measure_text(text)
            .map(|metrics| metrics.width())
            .map_err(js_err("measure_text"))
    }
}

impl Surface for CanvasSurface {
    fn size(&self) -> SurfaceSize {
        SurfaceSize { width: f64::from(self.canvas.width()), height: f64::from(self.canvas.height()) }
    }

    fn now_ms(&self) -> f64 {
        js_sys::Date::now()
    }

    fn set_transform(&mut self, matrix: [f64; 6]) -> Result<(), SurfaceError> {
        let [a, b, c, d, e, f] = matrix;
        self.ctx.set_transform(a, b, c, d, e, f).map_err(js_err("set_transform"))
    }

    fn translate(&mut self, x: f64, y: f64) -> Result<(), SurfaceError> {
        self.ctx.translate(x, y).map_err(js_err("translate"))
    }

    fn rotate(&mut self, radians: f64) -> Result<(), SurfaceError> {
        self.ctx.rotate(radians).map_err(js_err("rotate"))
    }

    fn save(&mut self) {
        self.ctx.save();
    }

    fn restore(&mut self) {
        self.ctx.restore();
    }

    fn clear_rect(&mut self, rect: BoundingBox) {
        self.ctx.clear_rect(rect.x1, rect.y1, rect.width, rect.height);
    }

    fn fill_rect(&mut self, rect: BoundingBox) {
        self.ctx.fill_rect(rect.x1, rect.y1, rect.width, rect.height);
    }

    fn stroke_rect(&mut self, rect: BoundingBox) {
        self.ctx.stroke_rect(rect.x1, rect.y1, rect.width, rect.height);
    }

    fn begin_path(&mut self) {
        self.ctx.begin_path();
    }

    fn arc(&mut self, x: f64, y: f64, radius: f64, start: f64, end: f64) -> Result<(), SurfaceError> {
        self.ctx.arc(x, y, radius, start, end).map_err(js_err("arc"))
    }

    fn move_to(&mut self, x: f64, y: f64) {
        self.ctx.move_to(x, y);
    }

    fn line_to(&mut self, x: f64, y: f64) {
        self.ctx.line_to(x, y);
    }

    fn fill(&mut self) {
        self.ctx.fill();
    }

    fn stroke(&mut self) {
        self.ctx.stroke();
    }

    fn set_fill_style(&mut self, paint: &str) {
        self.ctx.set_fill_style_str(paint);
    }

    fn set_stroke_style(&mut self, paint: &str) {
        self.ctx.set_stroke_style_str(paint);
    }

    fn set_line_width(&mut self, width: f64) {
        self.ctx.set_line_width(width);
    }

    fn draw_image(&mut self, image: &ImageHandle, dest: BoundingBox) -> Result<(), SurfaceError> {
        let Some(raster) = self.images.get(image) else {
            // Not decoded yet; the host registers it once loading finishes.
            debug!(image = image.key(), "canvas: skipping unregistered image");
            return Ok(());
        };
        self.ctx
            .draw_image_with_html_image_element_and_sw_and_sh_and_dx_and_dy_and_dw_and_dh(
                raster,
                0.0,
                0.0,
                f64::from(raster.natural_width()),
                f64::from(raster.natural_height()),
                dest.x1,
                dest.y1,
                dest.width,
                dest.height,
            )
            .map_err(js_err("draw_image"))
    }

    fn set_text_align(&mut self, align: TextAlign) {
        self.ctx.set_text_align(align.as_str());
    }

    fn set_text_baseline(&mut self, baseline: TextBaseline) {
        self.ctx.set_text_baseline(baseline.as_str());
    }

    fn fill_text(&mut self, text: &str, x: f64, y: f64) -> Result<(), SurfaceError> {
        self.ctx.fill_text(text, x, y).map_err(js_err("fill_text"))
    }

    fn stroke_text(&mut self, text: &str, x: f64, y: f64) -> Result<(), SurfaceError> {
        self.ctx.stroke_text(text, x, y).map_err(js_err("stroke_text"))
    }
}

fn js_err(op: &'static str) -> impl Fn(JsValue) -> SurfaceError {
    move |err| SurfaceError::new(op, js_message(&err))
}

fn js_message(value: &JsValue) -> String {
    value.as_string().unwrap_or_else(|| format!("{value:?}"))
}
