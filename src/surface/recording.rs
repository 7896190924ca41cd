//! Headless surface that records draw calls.
//!
//! Every primitive is appended to a command log. The current transform and
//! the save stack are tracked so callers can check where a pass leaves the
//! surface. Text is measured as fixed-advance glyphs of
//! `font_px * GLYPH_ADVANCE` each, which keeps measurements deterministic.

use crate::error::SurfaceError;
use crate::geometry::BoundingBox;
use crate::scene::{ImageHandle, TextAlign, TextBaseline};
use crate::surface::{FontMetrics, IDENTITY, Surface, SurfaceSize};

#[cfg(test)]
#[path = "recording_test.rs"]
mod recording_test;

/// Advance of one glyph as a fraction of the font size.
pub const GLYPH_ADVANCE: f64 = 0.5;

/// Font size assumed when the active font has no parsable `px` size.
const FALLBACK_FONT_PX: f64 = 10.0;

/// One recorded surface call.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    SetTransform([f64; 6]),
    Translate(f64, f64),
    Rotate(f64),
    Save,
    Restore,
    ClearRect(BoundingBox),
    FillRect(BoundingBox),
    StrokeRect(BoundingBox),
    BeginPath,
    Arc { x: f64, y: f64, radius: f64, start: f64, end: f64 },
    MoveTo(f64, f64),
    LineTo(f64, f64),
    Fill,
    Stroke,
    SetFillStyle(String),
    SetStrokeStyle(String),
    SetLineWidth(f64),
    DrawImage { image: ImageHandle, dest: BoundingBox },
    SetFont(String),
    SetTextAlign(TextAlign),
    SetTextBaseline(TextBaseline),
    FillText { text: String, x: f64, y: f64 },
    StrokeText { text: String, x: f64, y: f64 },
}

/// In-memory [`Surface`] that records what was drawn.
#[derive(Debug, Clone)]
pub struct RecordingSurface {
    size: SurfaceSize,
    clock_ms: f64,
    commands: Vec<Command>,
    transform: [f64; 6],
    stack: Vec<[f64; 6]>,
    font: String,
    fail_on: Option<&'static str>,
}

impl RecordingSurface {
    #[must_use]
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            size: SurfaceSize { width, height },
            clock_ms: 0.0,
            commands: Vec::new(),
            transform: IDENTITY,
            stack: Vec::new(),
            font: String::from("10px sans-serif"),
            fail_on: None,
        }
    }

    /// Make the named fallible primitive (e.g. `"arc"`) return an error.
    #[must_use]
    pub fn failing_on(mut self, op: &'static str) -> Self {
        self.fail_on = Some(op);
        self
    }

    pub fn set_size(&mut self, width: f64, height: f64) {
        self.size = SurfaceSize { width, height };
    }

    /// Value returned by [`Surface::now_ms`] until changed.
    pub fn set_clock(&mut self, ms: f64) {
        self.clock_ms = ms;
    }

    #[must_use]
    pub fn commands(&self) -> &[Command] {
        &self.commands
    }

    /// Return the recorded commands, leaving the log empty.
    pub fn take_commands(&mut self) -> Vec<Command> {
        std::mem::take(&mut self.commands)
    }

    /// The transform in effect after the last recorded call.
    #[must_use]
    pub fn transform(&self) -> [f64; 6] {
        self.transform
    }

    /// Number of outstanding [`Surface::save`] calls.
    #[must_use]
    pub fn save_depth(&self) -> usize {
        self.stack.len()
    }

    /// Texts passed to `fill_text`, in order.
    #[must_use]
    pub fn filled_texts(&self) -> Vec<&str> {
        self.commands
            .iter()
            .filter_map(|cmd| match cmd {
                Command::FillText { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }

    fn check(&self, op: &'static str) -> Result<(), SurfaceError> {
        if self.fail_on == Some(op) {
            return Err(SurfaceError::new(op, "injected failure"));
        }
        Ok(())
    }

    fn font_px(&self) -> f64 {
        let Some((size, _)) = self.font.split_once("px") else {
            return FALLBACK_FONT_PX;
        };
        match size.trim().parse::<f64>() {
            Ok(px) => px,
            Err(_) => FALLBACK_FONT_PX,
        }
    }
}

impl FontMetrics for RecordingSurface {
    fn set_font(&mut self, font: &str) {
        font.clone_into(&mut self.font);
        self.commands.push(Command::SetFont(font.to_owned()));
    }

    fn measure_text(&mut self, text: &str) -> Result<f64, SurfaceError> {
        self.check("measure_text")?;
        Ok(text.chars().count() as f64 * self.font_px() * GLYPH_ADVANCE)
    }
}

impl Surface for RecordingSurface {
    fn size(&self) -> SurfaceSize {
        self.size
    }

    fn now_ms(&self) -> f64 {
        self.clock_ms
    }

    fn set_transform(&mut self, matrix: [f64; 6]) -> Result<(), SurfaceError> {
        self.check("set_transform")?;
        self.transform = matrix;
        self.commands.push(Command::SetTransform(matrix));
        Ok(())
    }

    fn translate(&mut self, x: f64, y: f64) -> Result<(), SurfaceError> {
        self.check("translate")?;
        let [a, b, c, d, e, f] = self.transform;
        self.transform = [a, b, c, d, a * x + c * y + e, b * x + d * y + f];
        self.commands.push(Command::Translate(x, y));
        Ok(())
    }

    fn rotate(&mut self, radians: f64) -> Result<(), SurfaceError> {
        self.check("rotate")?;
        let (sin, cos) = radians.sin_cos();
        let [a, b, c, d, e, f] = self.transform;
        self.transform = [a * cos + c * sin, b * cos + d * sin, c * cos - a * sin, d * cos - b * sin, e, f];
        self.commands.push(Command::Rotate(radians));
        Ok(())
    }

    fn save(&mut self) {
        self.stack.push(self.transform);
        self.commands.push(Command::Save);
    }

    fn restore(&mut self) {
        if let Some(transform) = self.stack.pop() {
            self.transform = transform;
        }
        self.commands.push(Command::Restore);
    }

    fn clear_rect(&mut self, rect: BoundingBox) {
        self.commands.push(Command::ClearRect(rect));
    }

    fn fill_rect(&mut self, rect: BoundingBox) {
        self.commands.push(Command::FillRect(rect));
    }

    fn stroke_rect(&mut self, rect: BoundingBox) {
        self.commands.push(Command::StrokeRect(rect));
    }

    fn begin_path(&mut self) {
        self.commands.push(Command::BeginPath);
    }

    fn arc(&mut self, x: f64, y: f64, radius: f64, start: f64, end: f64) -> Result<(), SurfaceError> {
        self.check("arc")?;
        self.commands.push(Command::Arc { x, y, radius, start, end });
        Ok(())
    }

    fn move_to(&mut self, x: f64, y: f64) {
        self.commands.push(Command::MoveTo(x, y));
    }

    fn line_to(&mut self, x: f64, y: f64) {
        self.commands.push(Command::LineTo(x, y));
    }

    fn fill(&mut self) {
        self.commands.push(Command::Fill);
    }

    fn stroke(&mut self) {
        self.commands.push(Command::Stroke);
    }

    fn set_fill_style(&mut self, paint: &str) {
        self.commands.push(Command::SetFillStyle(paint.to_owned()));
    }

    fn set_stroke_style(&mut self, paint: &str) {
        self.commands.push(Command::SetStrokeStyle(paint.to_owned()));
    }

    fn set_line_width(&mut self, width: f64) {
        self.commands.push(Command::SetLineWidth(width));
    }

    fn draw_image(&mut self, image: &ImageHandle, dest: BoundingBox) -> Result<(), SurfaceError> {
        self.check("draw_image")?;
        self.commands.push(Command::DrawImage { image: image.clone(), dest });
        Ok(())
    }

    fn set_text_align(&mut self, align: TextAlign) {
        self.commands.push(Command::SetTextAlign(align));
    }

    fn set_text_baseline(&mut self, baseline: TextBaseline) {
        self.commands.push(Command::SetTextBaseline(baseline));
    }

    fn fill_text(&mut self, text: &str, x: f64, y: f64) -> Result<(), SurfaceError> {
        self.check("fill_text")?;
        self.commands.push(Command::FillText { text: text.to_owned(), x, y });
        Ok(())
    }

    fn stroke_text(&mut self, text: &str, x: f64, y: f64) -> Result<(), SurfaceError> {
        self.check("stroke_text")?;
        self.commands.push(Command::StrokeText { text: text.to_owned(), x, y });
        Ok(())
    }
}
