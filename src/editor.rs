//! The editor: interaction state machine plus the host-facing wrapper.
//!
//! [`EditorCore`] holds all logic that doesn't depend on a drawing surface
//! beyond text measurement, so it can be driven directly in tests. Its input
//! handlers return [`Action`]s for the host to process. [`Editor`] wraps a
//! core together with a [`Surface`] and the input queue, and turns
//! `RenderNeeded` into actual render passes.

use std::cmp::Ordering;

use tracing::{debug, trace};
use web_sys::HtmlCanvasElement;

use crate::config::EditorConfig;
use crate::error::EditorError;
use crate::events::{self, InputReceiver, InputSender};
use crate::geometry::Point;
use crate::hit;
use crate::input::{Cursor, DragTarget, InputEvent, InputState};
use crate::render;
use crate::scene::{Element, ElementId, Scene};
use crate::surface::web::CanvasSurface;
use crate::surface::{FontMetrics, Surface};
use crate::viewport::ViewportTransform;

#[cfg(test)]
#[path = "editor_test.rs"]
mod editor_test;

/// Actions returned from input handlers for the host to process.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// The cursor affordance changed.
    SetCursor(Cursor),
    /// The selection changed; `None` means nothing is selected.
    SelectionChanged(Option<ElementId>),
    /// A drag finished with the element at a new position.
    ElementMoved { id: ElementId, x: f64, y: f64 },
    /// Scene or viewport changed and the surface should be redrawn.
    RenderNeeded,
}

/// Core editor state: scene, viewport and the gesture in progress.
///
/// Separated from [`Editor`] so it can be tested without a browser.
#[derive(Debug, Clone, Default)]
pub struct EditorCore {
    pub scene: Scene,
    pub viewport: ViewportTransform,
    pub input: InputState,
    /// Cursor most recently reported through [`Action::SetCursor`].
    pub cursor: Cursor,
    pub config: EditorConfig,
}

impl EditorCore {
    #[must_use]
    pub fn new(config: EditorConfig) -> Self {
        Self { config, ..Self::default() }
    }

    // --- Data inputs ---

    /// Replace the scene's elements.
    pub fn load_scene(&mut self, elements: Vec<Element>) {
        self.scene.load(elements);
        self.drop_stale_drag();
    }

    /// Add an element on top, or replace the element with the same id.
    pub fn insert_element(&mut self, element: Element) {
        self.scene.insert(element);
    }

    /// Remove an element. A drag of that element is abandoned.
    pub fn remove_element(&mut self, id: &ElementId) -> Option<Element> {
        let removed = self.scene.remove(id);
        self.drop_stale_drag();
        removed
    }

    fn drop_stale_drag(&mut self) {
        if let InputState::Dragging { target: DragTarget::Element(id), .. } = self.input {
            if self.scene.get(&id).is_none() {
                debug!(%id, "editor: dragged element went away; drag abandoned");
                self.input = InputState::Idle;
            }
        }
    }

    // --- Input events ---

    /// Dispatch one input event to its handler.
    pub fn handle_event<M: FontMetrics + ?Sized>(&mut self, event: InputEvent, metrics: &mut M) -> Vec<Action> {
        match event {
            InputEvent::PointerMove { screen } => self.on_pointer_move(screen, metrics),
            InputEvent::PointerDown { screen } => self.on_pointer_down(screen, metrics),
            InputEvent::PointerUp => self.on_pointer_up(),
            InputEvent::Wheel { delta_y, screen } => self.on_wheel(delta_y, screen),
            InputEvent::PointerLeave => self.on_pointer_leave(),
        }
    }

    /// Track the pointer. While dragging, move the drag target; otherwise
    /// update hover and the cursor.
    pub fn on_pointer_move<M: FontMetrics + ?Sized>(&mut self, screen: Point, metrics: &mut M) -> Vec<Action> {
        let mut actions = Vec::new();

        match self.input {
            InputState::Dragging { target, origin, element_origin } => {
                self.apply_drag(target, origin, element_origin, screen);
            }
            InputState::Idle => {
                let cursor = match self.hit(screen, metrics) {
                    Some(id) => {
                        self.scene.set_hovered(id);
                        Cursor::Pointer
                    }
                    None => {
                        self.scene.clear_hovered();
                        Cursor::Default
                    }
                };
                self.update_cursor(cursor, &mut actions);
            }
        }

        // After the drag, so a pan maps through the updated viewport.
        self.scene.set_pointer_position(self.viewport.screen_to_world(screen));
        actions.push(Action::RenderNeeded);
        actions
    }

    /// Select the element under the pointer and start dragging it, or clear
    /// the selection and start panning. Hover follows the hit as well.
    pub fn on_pointer_down<M: FontMetrics + ?Sized>(&mut self, screen: Point, metrics: &mut M) -> Vec<Action> {
        let mut actions = Vec::new();
        let previous = self.scene.selection();
        self.scene.set_pointer_position(self.viewport.screen_to_world(screen));

        let hit = self.hit(screen, metrics).and_then(|id| self.scene.get(&id)).map(|el| (el.id, el.position()));
        match hit {
            Some((id, position)) => {
                self.scene.select(id);
                self.scene.set_hovered(id);
                self.input = InputState::Dragging {
                    target: DragTarget::Element(id),
                    origin: screen,
                    element_origin: position,
                };
                debug!(%id, x = position.x, y = position.y, "editor: element drag started");
            }
            None => {
                self.scene.clear_selection();
                self.scene.clear_hovered();
                self.input = InputState::Dragging {
                    target: DragTarget::Viewport,
                    origin: screen,
                    element_origin: Point::new(self.viewport.x, self.viewport.y),
                };
                debug!(x = self.viewport.x, y = self.viewport.y, "editor: viewport pan started");
            }
        }

        let selection = self.scene.selection();
        if selection != previous {
            debug!(?selection, "editor: selection changed");
            actions.push(Action::SelectionChanged(selection));
        }
        actions.push(Action::RenderNeeded);
        actions
    }

    /// End the current drag. Without one this does nothing.
    pub fn on_pointer_up(&mut self) -> Vec<Action> {
        let state = std::mem::take(&mut self.input);
        let InputState::Dragging { target, element_origin, .. } = state else {
            return Vec::new();
        };

        let mut actions = Vec::new();
        match target {
            DragTarget::Element(id) => {
                if let Some(element) = self.scene.get(&id) {
                    if element.position() != element_origin {
                        debug!(%id, x = element.x, y = element.y, "editor: element moved");
                        actions.push(Action::ElementMoved { id, x: element.x, y: element.y });
                    }
                }
            }
            DragTarget::Viewport => {
                debug!(x = self.viewport.x, y = self.viewport.y, "editor: viewport pan ended");
            }
        }
        actions.push(Action::RenderNeeded);
        actions
    }

    /// Zoom one step around `screen`. Positive `delta_y` zooms out.
    ///
    /// Zero and NaN deltas, and zooming out past the floor, change nothing.
    pub fn on_wheel(&mut self, delta_y: f64, screen: Point) -> Vec<Action> {
        let direction = match delta_y.partial_cmp(&0.0) {
            Some(Ordering::Greater) => 1.0,
            Some(Ordering::Less) => -1.0,
            Some(Ordering::Equal) | None => return Vec::new(),
        };

        if !self.viewport.zoom_at(screen, direction * self.config.zoom_step, self.config.min_scale) {
            return Vec::new();
        }
        self.scene.set_pointer_position(self.viewport.screen_to_world(screen));
        trace!(
            scale_x = self.viewport.scale_x,
            scale_y = self.viewport.scale_y,
            x = self.viewport.x,
            y = self.viewport.y,
            "editor: zoomed"
        );
        vec![Action::RenderNeeded]
    }

    /// The pointer left the surface: drop hover. An active drag continues.
    pub fn on_pointer_leave(&mut self) -> Vec<Action> {
        let mut actions = Vec::new();
        self.scene.clear_hovered();
        self.update_cursor(Cursor::Default, &mut actions);
        actions.push(Action::RenderNeeded);
        actions
    }

    // --- Queries ---

    /// The currently selected element, if any.
    #[must_use]
    pub fn selection(&self) -> Option<ElementId> {
        self.scene.selection()
    }

    #[must_use]
    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    /// The current viewport transform.
    #[must_use]
    pub fn viewport(&self) -> ViewportTransform {
        self.viewport
    }

    // --- Helpers ---

    fn hit<M: FontMetrics + ?Sized>(&self, screen: Point, metrics: &mut M) -> Option<ElementId> {
        hit::hit_test(screen, &self.scene, &self.viewport, metrics, &self.config.default_font_face).map(|el| el.id)
    }

    /// Recompute the dragged position from the gesture's start.
    fn apply_drag(&mut self, target: DragTarget, origin: Point, element_origin: Point, screen: Point) {
        let diff = Point::new(origin.x - screen.x, origin.y - screen.y);
        match target {
            DragTarget::Element(id) => {
                let world = self.viewport.screen_delta_to_world(diff);
                if let Some(element) = self.scene.get_mut(&id) {
                    element.x = element_origin.x - world.x;
                    element.y = element_origin.y - world.y;
                }
            }
            DragTarget::Viewport => {
                self.viewport.x = element_origin.x - diff.x;
                self.viewport.y = element_origin.y - diff.y;
            }
        }
    }

    fn update_cursor(&mut self, cursor: Cursor, actions: &mut Vec<Action>) {
        if self.cursor != cursor {
            self.cursor = cursor;
            actions.push(Action::SetCursor(cursor));
        }
    }
}

/// The full editor. Wraps [`EditorCore`] and owns the drawing surface and
/// the input queue.
///
/// `RenderNeeded` is consumed here: [`Editor::handle`] and [`Editor::pump`]
/// render as needed and return only the actions meant for the host.
pub struct Editor<S: Surface> {
    surface: S,
    pub core: EditorCore,
    sender: InputSender,
    receiver: InputReceiver,
    last_frame_ms: f64,
}

impl<S: Surface> Editor<S> {
    /// Create an editor drawing to `surface`.
    #[must_use]
    pub fn new(surface: S, config: EditorConfig) -> Self {
        let (sender, receiver) = events::channel();
        Self { surface, core: EditorCore::new(config), sender, receiver, last_frame_ms: 0.0 }
    }

    /// A handle the host can feed events through. Cheap to clone.
    #[must_use]
    pub fn sender(&self) -> InputSender {
        self.sender.clone()
    }

    // --- Input ---

    /// Process one event now, rendering if it changed anything visible.
    ///
    /// # Errors
    ///
    /// Returns [`EditorError::Surface`] if the render pass fails. The event
    /// itself has been applied either way.
    pub fn handle(&mut self, event: InputEvent) -> Result<Vec<Action>, EditorError> {
        let actions = self.core.handle_event(event, &mut self.surface);
        self.finish(actions)
    }

    /// Process every queued event in arrival order, then render at most once.
    ///
    /// Meant to be called once per animation frame.
    ///
    /// # Errors
    ///
    /// Returns [`EditorError::Surface`] if the render pass fails.
    pub fn pump(&mut self) -> Result<Vec<Action>, EditorError> {
        let events = self.receiver.drain();
        if events.is_empty() {
            return Ok(Vec::new());
        }
        trace!(count = events.len(), "editor: pumping queued events");
        let mut actions = Vec::new();
        for event in events {
            actions.extend(self.core.handle_event(event, &mut self.surface));
        }
        self.finish(actions)
    }

    fn finish(&mut self, actions: Vec<Action>) -> Result<Vec<Action>, EditorError> {
        let (render, host): (Vec<Action>, Vec<Action>) =
            actions.into_iter().partition(|action| *action == Action::RenderNeeded);
        if !render.is_empty() {
            self.render()?;
        }
        Ok(host)
    }

    // --- Render ---

    /// Draw the current state and return the frame time in milliseconds.
    ///
    /// # Errors
    ///
    /// Returns [`EditorError::Surface`] if a drawing primitive fails.
    pub fn render(&mut self) -> Result<f64, EditorError> {
        let elapsed = render::draw(&mut self.surface, &self.core.scene, &self.core.viewport, &self.core.config)?;
        self.last_frame_ms = elapsed;
        Ok(elapsed)
    }

    // --- Delegated data inputs ---

    pub fn load_scene(&mut self, elements: Vec<Element>) {
        self.core.load_scene(elements);
    }

    pub fn insert_element(&mut self, element: Element) {
        self.core.insert_element(element);
    }

    pub fn remove_element(&mut self, id: &ElementId) -> Option<Element> {
        self.core.remove_element(id)
    }

    // --- Delegated queries ---

    #[must_use]
    pub fn scene(&self) -> &Scene {
        self.core.scene()
    }

    #[must_use]
    pub fn viewport(&self) -> ViewportTransform {
        self.core.viewport()
    }

    #[must_use]
    pub fn selection(&self) -> Option<ElementId> {
        self.core.selection()
    }

    #[must_use]
    pub fn config(&self) -> &EditorConfig {
        &self.core.config
    }

    #[must_use]
    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    /// Duration of the last completed render pass, in milliseconds.
    #[must_use]
    pub fn last_frame_ms(&self) -> f64 {
        self.last_frame_ms
    }

    // --- Teardown ---

    /// Stop accepting input and hand the surface back.
    ///
    /// Every outstanding [`InputSender`] starts failing.
    pub fn destroy(mut self) -> S {
        self.receiver.close();
        debug!(elements = self.core.scene.len(), "editor: destroyed");
        self.surface
    }
}

impl Editor<CanvasSurface> {
    /// Create an editor bound to a browser canvas element.
    ///
    /// # Errors
    ///
    /// Returns [`EditorError::MissingContext`] or
    /// [`EditorError::ContextUnavailable`] if the canvas has no usable 2D
    /// context.
    pub fn from_canvas(canvas: HtmlCanvasElement, config: EditorConfig) -> Result<Self, EditorError> {
        let surface = CanvasSurface::from_canvas(canvas)?;
        Ok(Self::new(surface, config))
    }

    /// Apply the editor's current cursor to the canvas element.
    ///
    /// # Errors
    ///
    /// Returns [`EditorError::Surface`] if the style cannot be set.
    pub fn sync_cursor(&self) -> Result<(), EditorError> {
        self.surface.apply_cursor(self.core.cursor)?;
        Ok(())
    }
}
