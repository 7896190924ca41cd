//! Scene model: elements, their per-kind geometry, and the in-memory scene.
//!
//! Elements are a closed tagged union ([`ElementKind`]) over a shared header
//! ([`Element`]). Every per-kind operation (rendering, hit-testing, bounding
//! boxes) matches on the kind exhaustively.
//!
//! The [`Scene`] owns the ordered element list plus the selection and hover
//! sets. Order is draw order: later elements are drawn on top of earlier
//! ones. The scene always contains exactly one [`ElementKind::Pointer`]
//! marker, kept last so it draws above everything else.

use tracing::debug;
use uuid::Uuid;

use crate::consts::TRANSPARENT;
use crate::error::SurfaceError;
use crate::geometry::{BoundingBox, Point};
use crate::surface::FontMetrics;

#[cfg(test)]
#[path = "scene_test.rs"]
mod scene_test;

/// Unique identifier for an element, stable for the element's lifetime.
pub type ElementId = Uuid;

/// Opaque reference to a decoded raster owned by the host.
///
/// The drawing surface resolves the key to whatever image type it draws.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ImageHandle(String);

impl ImageHandle {
    #[must_use]
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    #[must_use]
    pub fn key(&self) -> &str {
        &self.0
    }
}

/// Horizontal anchor of a text run relative to its `x`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextAlign {
    #[default]
    Left,
    Right,
    Center,
    Start,
    End,
}

impl TextAlign {
    /// The canvas `textAlign` keyword.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Left => "left",
            Self::Right => "right",
            Self::Center => "center",
            Self::Start => "start",
            Self::End => "end",
        }
    }

    /// Horizontal offset of the box's left edge from `x` for a run of `width`.
    fn offset(self, width: f64) -> f64 {
        match self {
            Self::Left | Self::Start => 0.0,
            Self::Center => -width / 2.0,
            Self::Right | Self::End => -width,
        }
    }
}

/// Vertical anchor of a text run relative to its `y`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextBaseline {
    #[default]
    Top,
    Hanging,
    Middle,
    Alphabetic,
    Ideographic,
    Bottom,
}

impl TextBaseline {
    /// The canvas `textBaseline` keyword.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Top => "top",
            Self::Hanging => "hanging",
            Self::Middle => "middle",
            Self::Alphabetic => "alphabetic",
            Self::Ideographic => "ideographic",
            Self::Bottom => "bottom",
        }
    }

    /// Vertical offset of the box's top edge from `y` for a run of `height`.
    fn offset(self, height: f64) -> f64 {
        match self {
            Self::Top | Self::Hanging => 0.0,
            Self::Middle => -height / 2.0,
            Self::Alphabetic | Self::Ideographic | Self::Bottom => -height,
        }
    }
}

/// Kind-specific payload of an element.
#[derive(Debug, Clone, PartialEq)]
pub enum ElementKind {
    /// Axis-aligned rectangle anchored at its top-left corner.
    Rect { width: f64, height: f64 },
    /// Circle anchored at its center.
    Circle { radius: f64 },
    /// Single-line text run anchored at its origin.
    ///
    /// The bounding box is derived from the font on every use.
    Text {
        text: String,
        /// Font family; the editor's default face is used when `None`.
        font_face: Option<String>,
        /// Font size in world units.
        font_size: f64,
        text_align: TextAlign,
        text_baseline: TextBaseline,
    },
    /// Raster image scaled into a box anchored at its top-left corner.
    Image { width: f64, height: f64, image: ImageHandle },
    /// The synthetic cursor marker. Never hit-tested.
    Pointer,
}

impl ElementKind {
    /// Short lowercase name of the kind.
    #[must_use]
    pub fn tag(&self) -> &'static str {
        match self {
            Self::Rect { .. } => "rect",
            Self::Circle { .. } => "circle",
            Self::Text { .. } => "text",
            Self::Image { .. } => "image",
            Self::Pointer => "pointer",
        }
    }
}

/// A drawable element.
#[derive(Debug, Clone, PartialEq)]
pub struct Element {
    pub id: ElementId,
    /// World-space anchor; see [`ElementKind`] for what it anchors.
    pub x: f64,
    pub y: f64,
    pub fill: Option<String>,
    pub stroke: Option<String>,
    /// Clockwise rotation in degrees around the element's geometric center.
    pub rotation: f64,
    /// When false the element is never returned by hit-testing.
    pub interactive: bool,
    pub kind: ElementKind,
}

impl Element {
    fn with_kind(x: f64, y: f64, kind: ElementKind) -> Self {
        Self {
            id: Uuid::new_v4(),
            x,
            y,
            fill: None,
            stroke: None,
            rotation: 0.0,
            interactive: true,
            kind,
        }
    }

    #[must_use]
    pub fn rect(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self::with_kind(x, y, ElementKind::Rect { width, height })
    }

    #[must_use]
    pub fn circle(x: f64, y: f64, radius: f64) -> Self {
        Self::with_kind(x, y, ElementKind::Circle { radius })
    }

    #[must_use]
    pub fn text(x: f64, y: f64, text: impl Into<String>, font_size: f64) -> Self {
        Self::with_kind(
            x,
            y,
            ElementKind::Text {
                text: text.into(),
                font_face: None,
                font_size,
                text_align: TextAlign::default(),
                text_baseline: TextBaseline::default(),
            },
        )
    }

    #[must_use]
    pub fn image(x: f64, y: f64, width: f64, height: f64, image: ImageHandle) -> Self {
        Self::with_kind(x, y, ElementKind::Image { width, height, image })
    }

    #[must_use]
    pub fn pointer() -> Self {
        let mut marker = Self::with_kind(0.0, 0.0, ElementKind::Pointer);
        marker.interactive = false;
        marker
    }

    #[must_use]
    pub fn with_id(mut self, id: ElementId) -> Self {
        self.id = id;
        self
    }

    #[must_use]
    pub fn with_fill(mut self, fill: impl Into<String>) -> Self {
        self.fill = Some(fill.into());
        self
    }

    #[must_use]
    pub fn with_stroke(mut self, stroke: impl Into<String>) -> Self {
        self.stroke = Some(stroke.into());
        self
    }

    #[must_use]
    pub fn with_rotation(mut self, degrees: f64) -> Self {
        self.rotation = degrees;
        self
    }

    #[must_use]
    pub fn with_interactive(mut self, interactive: bool) -> Self {
        self.interactive = interactive;
        self
    }

    /// Set the font family of a text element. No effect on other kinds.
    #[must_use]
    pub fn with_font_face(mut self, face: impl Into<String>) -> Self {
        if let ElementKind::Text { font_face, .. } = &mut self.kind {
            *font_face = Some(face.into());
        }
        self
    }

    /// Set the text anchors of a text element. No effect on other kinds.
    #[must_use]
    pub fn with_text_anchor(mut self, align: TextAlign, baseline: TextBaseline) -> Self {
        if let ElementKind::Text { text_align, text_baseline, .. } = &mut self.kind {
            *text_align = align;
            *text_baseline = baseline;
        }
        self
    }

    /// Fill paint, `"transparent"` when unset.
    #[must_use]
    pub fn fill(&self) -> &str {
        self.fill.as_deref().unwrap_or(TRANSPARENT)
    }

    /// Stroke paint, `"transparent"` when unset.
    #[must_use]
    pub fn stroke(&self) -> &str {
        self.stroke.as_deref().unwrap_or(TRANSPARENT)
    }

    #[must_use]
    pub fn position(&self) -> Point {
        Point::new(self.x, self.y)
    }

    #[must_use]
    pub fn is_pointer(&self) -> bool {
        matches!(self.kind, ElementKind::Pointer)
    }

    /// Whether hit-testing may return this element.
    #[must_use]
    pub fn is_hit_testable(&self) -> bool {
        self.interactive && !self.is_pointer()
    }

    /// The CSS font string used to draw and measure a text element.
    #[must_use]
    pub fn font(&self, default_face: &str) -> Option<String> {
        match &self.kind {
            ElementKind::Text { font_face, font_size, .. } => {
                Some(font_string(*font_size, font_face.as_deref().unwrap_or(default_face)))
            }
            _ => None,
        }
    }

    /// Unrotated world-space bounding box.
    ///
    /// Text is measured through `metrics` under its own font, so the result is
    /// only as current as the metrics source.
    ///
    /// # Errors
    ///
    /// Returns the surface error if text measurement fails.
    pub fn bounding_box<M: FontMetrics + ?Sized>(
        &self,
        metrics: &mut M,
        default_face: &str,
    ) -> Result<BoundingBox, SurfaceError> {
        let bounds = match &self.kind {
            ElementKind::Rect { width, height } | ElementKind::Image { width, height, .. } => {
                BoundingBox::from_rect(self.x, self.y, *width, *height)
            }
            ElementKind::Circle { radius } => {
                BoundingBox::from_rect(self.x - radius, self.y - radius, radius * 2.0, radius * 2.0)
            }
            ElementKind::Text { text, font_face, font_size, text_align, text_baseline } => {
                metrics.set_font(&font_string(*font_size, font_face.as_deref().unwrap_or(default_face)));
                let width = metrics.measure_text(text)?;
                BoundingBox::from_rect(
                    self.x + text_align.offset(width),
                    self.y + text_baseline.offset(*font_size),
                    width,
                    *font_size,
                )
            }
            ElementKind::Pointer => BoundingBox::from_rect(self.x, self.y, 0.0, 0.0),
        };
        Ok(bounds)
    }
}

/// `"{size}px {face}"`.
#[must_use]
pub fn font_string(font_size: f64, face: &str) -> String {
    format!("{font_size}px {face}")
}

/// The editable scene: ordered elements plus selection and hover state.
#[derive(Debug, Clone)]
pub struct Scene {
    elements: Vec<Element>,
    selected: Vec<ElementId>,
    hovered: Vec<ElementId>,
    pointer_id: ElementId,
}

impl Scene {
    /// Create a scene holding only the pointer marker.
    #[must_use]
    pub fn new() -> Self {
        let pointer = Element::pointer();
        let pointer_id = pointer.id;
        Self { elements: vec![pointer], selected: Vec::new(), hovered: Vec::new(), pointer_id }
    }

    /// All elements in draw order, pointer marker included (always last).
    #[must_use]
    pub fn elements(&self) -> &[Element] {
        &self.elements
    }

    /// Elements in draw order, without the pointer marker.
    pub fn user_elements(&self) -> impl Iterator<Item = &Element> {
        self.elements.iter().filter(|el| !el.is_pointer())
    }

    /// Number of elements, not counting the pointer marker.
    #[must_use]
    pub fn len(&self) -> usize {
        self.elements.len().saturating_sub(1)
    }

    /// Returns `true` if the scene has no elements besides the pointer marker.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    #[must_use]
    pub fn get(&self, id: &ElementId) -> Option<&Element> {
        self.elements.iter().find(|el| el.id == *id)
    }

    pub fn get_mut(&mut self, id: &ElementId) -> Option<&mut Element> {
        self.elements.iter_mut().find(|el| el.id == *id)
    }

    /// Add an element on top of the existing ones, or replace the element
    /// with the same id in place.
    ///
    /// Pointer-kind elements are ignored; the scene owns its own marker. An
    /// element that claims the marker's id keeps it, and the marker is
    /// re-issued a fresh one.
    pub fn insert(&mut self, element: Element) {
        if element.is_pointer() {
            debug!(id = %element.id, "scene: ignoring inserted pointer marker");
            return;
        }
        if element.id == self.pointer_id {
            self.reissue_pointer_id();
        }
        if let Some(existing) = self.get_mut(&element.id) {
            *existing = element;
            return;
        }
        let at = self.elements.len().saturating_sub(1);
        self.elements.insert(at, element);
    }

    /// Remove an element, dropping it from the selection and hover sets.
    ///
    /// The pointer marker cannot be removed.
    pub fn remove(&mut self, id: &ElementId) -> Option<Element> {
        if *id == self.pointer_id {
            return None;
        }
        let index = self.elements.iter().position(|el| el.id == *id)?;
        self.selected.retain(|s| s != id);
        self.hovered.retain(|h| h != id);
        Some(self.elements.remove(index))
    }

    /// Replace every element with `elements`.
    ///
    /// The pointer marker survives and stays last. Selection and hover
    /// entries that no longer resolve are dropped.
    pub fn load(&mut self, elements: Vec<Element>) {
        let pointer = self
            .elements
            .iter()
            .position(|el| el.id == self.pointer_id)
            .map_or_else(Element::pointer, |index| self.elements.swap_remove(index));
        self.pointer_id = pointer.id;

        self.elements = elements.into_iter().filter(|el| !el.is_pointer()).collect();
        self.elements.push(pointer);
        if self.user_elements().any(|el| el.id == self.pointer_id) {
            self.reissue_pointer_id();
        }

        let elements = &self.elements;
        self.selected.retain(|id| elements.iter().any(|el| el.id == *id));
        self.hovered.retain(|id| elements.iter().any(|el| el.id == *id));
        debug!(count = self.len(), "scene: loaded");
    }

    // --- Selection / hover ---

    #[must_use]
    pub fn selected_ids(&self) -> &[ElementId] {
        &self.selected
    }

    #[must_use]
    pub fn hovered_ids(&self) -> &[ElementId] {
        &self.hovered
    }

    /// The selected element id, if any.
    #[must_use]
    pub fn selection(&self) -> Option<ElementId> {
        self.selected.first().copied()
    }

    #[must_use]
    pub fn is_selected(&self, id: &ElementId) -> bool {
        self.selected.contains(id)
    }

    #[must_use]
    pub fn is_hovered(&self, id: &ElementId) -> bool {
        self.hovered.contains(id)
    }

    /// Make `id` the only selected element. Unknown ids clear the selection.
    pub fn select(&mut self, id: ElementId) {
        self.selected.clear();
        if self.get(&id).is_some() {
            self.selected.push(id);
        }
    }

    pub fn clear_selection(&mut self) {
        self.selected.clear();
    }

    /// Make `id` the only hovered element. Unknown ids clear the hover set.
    pub fn set_hovered(&mut self, id: ElementId) {
        self.hovered.clear();
        if self.get(&id).is_some() {
            self.hovered.push(id);
        }
    }

    pub fn clear_hovered(&mut self) {
        self.hovered.clear();
    }

    // --- Pointer marker ---

    #[must_use]
    pub fn pointer_id(&self) -> ElementId {
        self.pointer_id
    }

    /// Last known world-space cursor position.
    #[must_use]
    pub fn pointer_position(&self) -> Point {
        self.get(&self.pointer_id).map_or_else(Point::default, Element::position)
    }

    /// Give the marker a new id, freeing its old one for a user element.
    fn reissue_pointer_id(&mut self) {
        let old = self.pointer_id;
        let fresh = Uuid::new_v4();
        if let Some(marker) = self.elements.iter_mut().find(|el| el.is_pointer()) {
            marker.id = fresh;
        }
        self.pointer_id = fresh;
        debug!(%old, %fresh, "scene: pointer marker id taken; re-issued");
    }

    pub fn set_pointer_position(&mut self, world: Point) {
        let id = self.pointer_id;
        if let Some(marker) = self.get_mut(&id) {
            marker.x = world.x;
            marker.y = world.y;
        }
    }
}

impl Default for Scene {
    fn default() -> Self {
        Self::new()
    }
}
