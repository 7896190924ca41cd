//! Shared numeric and color constants for the editor crate.

// ── Zoom ────────────────────────────────────────────────────────

/// Lowest allowed viewport scale on either axis.
pub const MIN_SCALE: f64 = 0.1;

/// Scale change applied per wheel notch.
pub const ZOOM_STEP: f64 = 0.01;

// ── Grid ────────────────────────────────────────────────────────

/// World-space distance between background grid dots.
pub const GRID_PITCH: f64 = 60.0;

/// Grid pitch used once the view is zoomed out past [`COARSE_GRID_BELOW`].
pub const COARSE_GRID_PITCH: f64 = 120.0;

/// `scale_x` below which the coarse grid pitch is used.
pub const COARSE_GRID_BELOW: f64 = 0.5;

/// Radius of a grid dot in world units.
pub const GRID_DOT_RADIUS: f64 = 1.5;

pub const GRID_DOT_COLOR: &str = "#ababab";

// ── Outlines ────────────────────────────────────────────────────

/// Padding between an element's bounding box and its hover/selection outline.
pub const OUTLINE_PADDING: f64 = 10.0;

pub const HOVER_COLOR: &str = "#d3d3d3";

/// Hover outline width in screen pixels.
pub const HOVER_LINE_PX: f64 = 1.0;

pub const SELECTION_COLOR: &str = "#1E90FF";

/// Selection outline width in screen pixels.
pub const SELECTION_LINE_PX: f64 = 2.0;

// ── Pointer marker ──────────────────────────────────────────────

/// Half-length of the pointer crosshair arms, in screen pixels.
pub const POINTER_HALF_LENGTH: f64 = 10.0;

pub const POINTER_COLOR: &str = "#ff0000";

pub const POINTER_FONT: &str = "12px monospace";

// ── Paint / text defaults ───────────────────────────────────────

/// Paint used when an element has no fill or stroke.
pub const TRANSPARENT: &str = "transparent";

pub const DEFAULT_FONT_FACE: &str = "sans-serif";

// ── Debug overlay ───────────────────────────────────────────────

pub const DEBUG_FONT: &str = "16px arial";

pub const DEBUG_COLOR: &str = "black";

/// Left margin of the debug overlay text, in screen pixels.
pub const DEBUG_MARGIN_X: f64 = 10.0;

/// Baseline of the first debug overlay line, in screen pixels.
pub const DEBUG_FIRST_LINE_Y: f64 = 40.0;

pub const DEBUG_LINE_HEIGHT: f64 = 20.0;
