#![allow(clippy::float_cmp)]

use super::*;
use crate::error::SendError;
use crate::surface::recording::{Command, RecordingSurface};

const EPSILON: f64 = 1e-9;

fn approx_eq(a: f64, b: f64) -> bool {
    (a - b).abs() < EPSILON
}

fn pt(x: f64, y: f64) -> Point {
    Point::new(x, y)
}

fn metrics() -> RecordingSurface {
    RecordingSurface::new(800.0, 600.0)
}

/// Core with a single 100x100 rect at world (10, 10).
fn core_with_rect() -> (EditorCore, ElementId) {
    let rect = Element::rect(10.0, 10.0, 100.0, 100.0);
    let id = rect.id;
    let mut core = EditorCore::new(EditorConfig::default());
    core.load_scene(vec![rect]);
    (core, id)
}

fn quiet_config() -> EditorConfig {
    EditorConfig { show_grid: false, show_debug_overlay: false, ..EditorConfig::default() }
}

fn clear_count(surface: &RecordingSurface) -> usize {
    surface.commands().iter().filter(|c| matches!(c, Command::ClearRect(_))).count()
}

// --- Dragging elements ---

#[test]
fn drag_moves_element_by_world_delta() {
    let (mut core, id) = core_with_rect();
    core.viewport.scale_x = 2.0;
    core.viewport.scale_y = 2.0;
    let mut m = metrics();

    core.on_pointer_down(pt(100.0, 100.0), &mut m);
    core.on_pointer_move(pt(150.0, 130.0), &mut m);

    let el = core.scene.get(&id).unwrap();
    assert!(approx_eq(el.x, 35.0));
    assert!(approx_eq(el.y, 25.0));

    let actions = core.on_pointer_up();
    assert_eq!(actions, vec![Action::ElementMoved { id, x: 35.0, y: 25.0 }, Action::RenderNeeded]);
    assert_eq!(core.input, InputState::Idle);
}

#[test]
fn drag_is_recomputed_from_gesture_start() {
    let (mut core, id) = core_with_rect();
    let mut m = metrics();
    core.on_pointer_down(pt(20.0, 20.0), &mut m);
    core.on_pointer_move(pt(60.0, 20.0), &mut m);
    core.on_pointer_move(pt(30.0, 25.0), &mut m);
    let el = core.scene.get(&id).unwrap();
    assert_eq!((el.x, el.y), (20.0, 15.0));
}

#[test]
fn zero_length_drag_reports_no_move() {
    let (mut core, _) = core_with_rect();
    let mut m = metrics();
    core.on_pointer_down(pt(50.0, 50.0), &mut m);
    core.on_pointer_move(pt(50.0, 50.0), &mut m);
    assert_eq!(core.on_pointer_up(), vec![Action::RenderNeeded]);
}

#[test]
fn drag_does_not_change_hover() {
    let (mut core, id) = core_with_rect();
    let mut m = metrics();
    core.on_pointer_down(pt(50.0, 50.0), &mut m);
    let actions = core.on_pointer_move(pt(500.0, 500.0), &mut m);
    assert_eq!(actions, vec![Action::RenderNeeded]);
    assert_eq!(core.scene.hovered_ids(), [id]);
}

#[test]
fn removing_dragged_element_abandons_drag() {
    let (mut core, id) = core_with_rect();
    let mut m = metrics();
    core.on_pointer_down(pt(50.0, 50.0), &mut m);
    assert!(core.remove_element(&id).is_some());
    assert_eq!(core.input, InputState::Idle);
    assert_eq!(core.on_pointer_up(), Vec::new());
}

#[test]
fn reloading_without_dragged_element_abandons_drag() {
    let (mut core, _) = core_with_rect();
    let mut m = metrics();
    core.on_pointer_down(pt(50.0, 50.0), &mut m);
    core.load_scene(vec![Element::circle(0.0, 0.0, 5.0)]);
    assert_eq!(core.input, InputState::Idle);
}

// --- Panning ---

#[test]
fn drag_on_empty_space_pans_viewport() {
    let mut core = EditorCore::default();
    let mut m = metrics();
    core.viewport.x = 5.0;

    core.on_pointer_down(pt(10.0, 10.0), &mut m);
    core.on_pointer_move(pt(40.0, -5.0), &mut m);
    assert_eq!(core.viewport.x, 35.0);
    assert_eq!(core.viewport.y, -15.0);

    assert_eq!(core.on_pointer_up(), vec![Action::RenderNeeded]);
    assert_eq!(core.viewport.x, 35.0);
}

#[test]
fn pointer_marker_follows_cursor_while_panning() {
    let mut core = EditorCore::default();
    let mut m = metrics();
    core.on_pointer_down(pt(100.0, 100.0), &mut m);
    core.on_pointer_move(pt(150.0, 130.0), &mut m);
    assert_eq!((core.viewport.x, core.viewport.y), (50.0, 30.0));
    assert_eq!(core.scene.pointer_position(), core.viewport.screen_to_world(pt(150.0, 130.0)));
    assert_eq!(core.scene.pointer_position(), pt(100.0, 100.0));
}

#[test]
fn pointer_marker_follows_cursor_while_panning_zoomed() {
    let mut core = EditorCore::default();
    core.viewport = ViewportTransform { x: 0.0, y: 0.0, scale_x: 2.0, scale_y: 2.0 };
    let mut m = metrics();
    core.on_pointer_down(pt(10.0, 10.0), &mut m);
    core.on_pointer_move(pt(30.0, 50.0), &mut m);
    core.on_pointer_move(pt(70.0, 20.0), &mut m);
    assert_eq!(core.scene.pointer_position(), core.viewport.screen_to_world(pt(70.0, 20.0)));
}

#[test]
fn pan_ignores_scale() {
    let mut core = EditorCore::default();
    core.viewport.scale_x = 3.0;
    core.viewport.scale_y = 3.0;
    let mut m = metrics();
    core.on_pointer_down(pt(0.0, 0.0), &mut m);
    core.on_pointer_move(pt(10.0, 20.0), &mut m);
    assert_eq!((core.viewport.x, core.viewport.y), (10.0, 20.0));
}

// --- Selection ---

#[test]
fn pointer_down_selects_hit_element() {
    let (mut core, id) = core_with_rect();
    let mut m = metrics();
    let actions = core.on_pointer_down(pt(50.0, 50.0), &mut m);
    assert_eq!(actions, vec![Action::SelectionChanged(Some(id)), Action::RenderNeeded]);
    assert_eq!(core.selection(), Some(id));
    assert!(matches!(core.input, InputState::Dragging { target: DragTarget::Element(t), .. } if t == id));
}

#[test]
fn pointer_down_hovers_hit_element() {
    let (mut core, id) = core_with_rect();
    core.on_pointer_down(pt(50.0, 50.0), &mut metrics());
    assert_eq!(core.scene.hovered_ids(), [id]);
}

#[test]
fn pointer_down_on_empty_space_clears_stale_hover() {
    let (mut core, id) = core_with_rect();
    let mut m = metrics();
    core.on_pointer_move(pt(50.0, 50.0), &mut m);
    assert!(core.scene.is_hovered(&id));
    // No move in between, so only pointer-down can refresh hover.
    core.on_pointer_down(pt(500.0, 500.0), &mut m);
    assert!(core.scene.hovered_ids().is_empty());
}

#[test]
fn reselecting_same_element_is_not_a_change() {
    let (mut core, _) = core_with_rect();
    let mut m = metrics();
    core.on_pointer_down(pt(50.0, 50.0), &mut m);
    core.on_pointer_up();
    let actions = core.on_pointer_down(pt(60.0, 60.0), &mut m);
    assert_eq!(actions, vec![Action::RenderNeeded]);
}

#[test]
fn pointer_down_on_empty_space_clears_selection() {
    let (mut core, _) = core_with_rect();
    let mut m = metrics();
    core.on_pointer_down(pt(50.0, 50.0), &mut m);
    core.on_pointer_up();
    let actions = core.on_pointer_down(pt(500.0, 500.0), &mut m);
    assert_eq!(actions, vec![Action::SelectionChanged(None), Action::RenderNeeded]);
    assert_eq!(core.selection(), None);
}

#[test]
fn topmost_element_is_selected() {
    let a = Element::rect(0.0, 0.0, 100.0, 100.0);
    let b = Element::rect(50.0, 50.0, 100.0, 100.0);
    let b_id = b.id;
    let mut core = EditorCore::default();
    core.load_scene(vec![a, b]);
    core.on_pointer_down(pt(75.0, 75.0), &mut metrics());
    assert_eq!(core.selection(), Some(b_id));
}

#[test]
fn non_interactive_element_cannot_be_selected() {
    let mut core = EditorCore::default();
    core.load_scene(vec![Element::rect(0.0, 0.0, 100.0, 100.0).with_interactive(false)]);
    core.on_pointer_down(pt(50.0, 50.0), &mut metrics());
    assert_eq!(core.selection(), None);
    assert!(matches!(core.input, InputState::Dragging { target: DragTarget::Viewport, .. }));
}

#[test]
fn load_scene_prunes_missing_selection() {
    let (mut core, _) = core_with_rect();
    core.on_pointer_down(pt(50.0, 50.0), &mut metrics());
    core.on_pointer_up();
    core.load_scene(vec![Element::rect(0.0, 0.0, 1.0, 1.0)]);
    assert_eq!(core.selection(), None);
}

// --- Pointer up ---

#[test]
fn pointer_up_without_down_is_noop() {
    let (mut core, id) = core_with_rect();
    assert_eq!(core.on_pointer_up(), Vec::new());
    assert_eq!(core.input, InputState::Idle);
    assert_eq!(core.scene.get(&id).unwrap().position(), pt(10.0, 10.0));
}

// --- Hover / cursor ---

#[test]
fn hover_sets_pointer_cursor_once() {
    let (mut core, id) = core_with_rect();
    let mut m = metrics();

    let actions = core.on_pointer_move(pt(50.0, 50.0), &mut m);
    assert_eq!(actions, vec![Action::SetCursor(Cursor::Pointer), Action::RenderNeeded]);
    assert!(core.scene.is_hovered(&id));

    let actions = core.on_pointer_move(pt(55.0, 55.0), &mut m);
    assert_eq!(actions, vec![Action::RenderNeeded]);

    let actions = core.on_pointer_move(pt(500.0, 500.0), &mut m);
    assert_eq!(actions, vec![Action::SetCursor(Cursor::Default), Action::RenderNeeded]);
    assert!(!core.scene.is_hovered(&id));
}

#[test]
fn pointer_move_tracks_world_position() {
    let mut core = EditorCore::default();
    core.viewport = ViewportTransform { x: 10.0, y: 20.0, scale_x: 2.0, scale_y: 2.0 };
    core.on_pointer_move(pt(30.0, 60.0), &mut metrics());
    assert_eq!(core.scene.pointer_position(), pt(10.0, 20.0));
}

#[test]
fn pointer_leave_clears_hover() {
    let (mut core, _) = core_with_rect();
    let mut m = metrics();
    core.on_pointer_move(pt(50.0, 50.0), &mut m);
    let actions = core.on_pointer_leave();
    assert_eq!(actions, vec![Action::SetCursor(Cursor::Default), Action::RenderNeeded]);
    assert!(core.scene.hovered_ids().is_empty());
    assert_eq!(core.cursor, Cursor::Default);
}

#[test]
fn pointer_leave_keeps_drag() {
    let (mut core, _) = core_with_rect();
    let mut m = metrics();
    core.on_pointer_down(pt(50.0, 50.0), &mut m);
    core.on_pointer_leave();
    assert!(core.input.is_dragging());
}

// --- Wheel zoom ---

#[test]
fn wheel_down_zooms_out_one_step() {
    let mut core = EditorCore::default();
    let actions = core.on_wheel(120.0, pt(0.0, 0.0));
    assert_eq!(actions, vec![Action::RenderNeeded]);
    assert!(approx_eq(core.viewport.scale_x, 0.99));
    assert!(approx_eq(core.viewport.scale_y, 0.99));
}

#[test]
fn wheel_up_zooms_in() {
    let mut core = EditorCore::default();
    core.on_wheel(-3.0, pt(0.0, 0.0));
    assert!(approx_eq(core.viewport.scale_x, 1.01));
}

#[test]
fn zoom_never_goes_below_floor() {
    let mut core = EditorCore::default();
    for _ in 0..500 {
        core.on_wheel(1.0, pt(400.0, 300.0));
    }
    assert_eq!(core.viewport.scale_x, 0.1);
    assert_eq!(core.viewport.scale_y, 0.1);
    assert_eq!(core.on_wheel(1.0, pt(400.0, 300.0)), Vec::new());
}

#[test]
fn zoom_keeps_point_under_cursor() {
    let mut core = EditorCore::default();
    core.viewport = ViewportTransform { x: 37.0, y: -12.0, scale_x: 1.3, scale_y: 1.3 };
    let cursor = pt(200.0, 150.0);
    let before = core.viewport.screen_to_world(cursor);
    core.on_wheel(1.0, cursor);
    core.on_wheel(-1.0, cursor);
    core.on_wheel(-1.0, cursor);
    let after = core.viewport.screen_to_world(cursor);
    assert!(approx_eq(before.x, after.x));
    assert!(approx_eq(before.y, after.y));
}

#[test]
fn zero_or_nan_wheel_is_noop() {
    let mut core = EditorCore::default();
    assert_eq!(core.on_wheel(0.0, pt(1.0, 1.0)), Vec::new());
    assert_eq!(core.on_wheel(f64::NAN, pt(1.0, 1.0)), Vec::new());
    assert_eq!(core.viewport, ViewportTransform::default());
}

#[test]
fn zoom_step_comes_from_config() {
    let config = EditorConfig { zoom_step: 0.5, ..EditorConfig::default() };
    let mut core = EditorCore::new(config);
    core.on_wheel(1.0, pt(0.0, 0.0));
    assert_eq!(core.viewport.scale_x, 0.5);
}

// --- Dispatch ---

#[test]
fn handle_event_dispatches() {
    let (mut core, id) = core_with_rect();
    let mut m = metrics();
    core.handle_event(InputEvent::PointerDown { screen: pt(50.0, 50.0) }, &mut m);
    core.handle_event(InputEvent::PointerMove { screen: pt(60.0, 50.0) }, &mut m);
    let actions = core.handle_event(InputEvent::PointerUp, &mut m);
    assert_eq!(actions[0], Action::ElementMoved { id, x: 20.0, y: 10.0 });
}

// --- Editor wrapper ---

#[test]
fn handle_renders_and_returns_host_actions() {
    let mut editor = Editor::new(RecordingSurface::new(200.0, 200.0), quiet_config());
    let rect = Element::rect(0.0, 0.0, 50.0, 50.0);
    editor.load_scene(vec![rect]);

    let actions = editor.handle(InputEvent::PointerMove { screen: pt(10.0, 10.0) }).unwrap();
    assert_eq!(actions, vec![Action::SetCursor(Cursor::Pointer)]);
    assert_eq!(clear_count(editor.surface()), 1);
}

#[test]
fn handle_without_render_needed_does_not_draw() {
    let mut editor = Editor::new(RecordingSurface::new(200.0, 200.0), quiet_config());
    let actions = editor.handle(InputEvent::PointerUp).unwrap();
    assert!(actions.is_empty());
    assert!(editor.surface().commands().is_empty());
}

#[test]
fn pump_processes_queue_and_renders_once() {
    let mut editor = Editor::new(RecordingSurface::new(200.0, 200.0), quiet_config());
    let rect = Element::rect(0.0, 0.0, 50.0, 50.0);
    let id = rect.id;
    editor.load_scene(vec![rect]);

    let tx = editor.sender();
    tx.send(InputEvent::PointerDown { screen: pt(10.0, 10.0) }).unwrap();
    tx.send(InputEvent::PointerMove { screen: pt(20.0, 30.0) }).unwrap();
    tx.send(InputEvent::PointerUp).unwrap();

    let actions = editor.pump().unwrap();
    assert_eq!(
        actions,
        vec![Action::SelectionChanged(Some(id)), Action::ElementMoved { id, x: 10.0, y: 20.0 }]
    );
    assert_eq!(clear_count(editor.surface()), 1);
    assert_eq!(editor.selection(), Some(id));
}

#[test]
fn pump_with_empty_queue_does_nothing() {
    let mut editor = Editor::new(RecordingSurface::new(200.0, 200.0), quiet_config());
    assert!(editor.pump().unwrap().is_empty());
    assert!(editor.surface().commands().is_empty());
}

#[test]
fn render_error_surfaces_as_editor_error() {
    let mut editor = Editor::new(RecordingSurface::new(200.0, 200.0).failing_on("arc"), quiet_config());
    editor.load_scene(vec![Element::circle(0.0, 0.0, 10.0)]);
    let err = editor.render().unwrap_err();
    assert_eq!(err.error_code(), "E_SURFACE");
    assert!(matches!(err, EditorError::Surface(ref e) if e.op == "arc"));
}

#[test]
fn render_records_frame_time() {
    let mut editor = Editor::new(RecordingSurface::new(200.0, 200.0), quiet_config());
    editor.surface_mut().set_clock(10.0);
    assert_eq!(editor.render().unwrap(), 0.0);
    assert_eq!(editor.last_frame_ms(), 0.0);
}

#[test]
fn insert_and_remove_delegate_to_scene() {
    let mut editor = Editor::new(RecordingSurface::new(200.0, 200.0), quiet_config());
    let rect = Element::rect(0.0, 0.0, 5.0, 5.0);
    let id = rect.id;
    editor.insert_element(rect);
    assert_eq!(editor.scene().len(), 1);
    assert!(editor.remove_element(&id).is_some());
    assert!(editor.scene().is_empty());
}

#[test]
fn config_and_viewport_are_exposed() {
    let editor = Editor::new(RecordingSurface::new(200.0, 200.0), quiet_config());
    assert!(!editor.config().show_grid);
    assert_eq!(editor.viewport(), ViewportTransform::default());
}

#[test]
fn destroy_closes_input_and_returns_surface() {
    let mut editor = Editor::new(RecordingSurface::new(200.0, 200.0), quiet_config());
    let tx = editor.sender();
    editor.render().unwrap();
    let surface = editor.destroy();
    assert_eq!(tx.send(InputEvent::PointerUp), Err(SendError));
    assert!(tx.is_closed());
    assert_eq!(clear_count(&surface), 1);
}
