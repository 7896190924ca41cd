//! Interactive 2D scene editor core.
//!
//! This crate owns the scene / viewport / render / hit-test / interaction loop
//! of a small canvas editor. The host is responsible only for providing a
//! drawing surface (see [`surface::Surface`]) and for forwarding raw pointer
//! and wheel input as [`input::InputEvent`]s; everything else, from mapping
//! screen points into world space to deciding which element is under the
//! cursor, happens here.
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`editor`] | Top-level [`editor::Editor`] and testable [`editor::EditorCore`] |
//! | [`scene`] | Element types and the in-memory scene |
//! | [`viewport`] | Pan/zoom transform and coordinate conversions |
//! | [`geometry`] | Points, boxes, circles and containment tests |
//! | [`hit`] | Hit-testing against scene elements |
//! | [`render`] | Per-frame scene rendering |
//! | [`surface`] | Drawing surface traits plus browser and recording backends |
//! | [`input`] | Input events, cursor affordances and the drag state |
//! | [`events`] | Ordered input queue between host and editor |
//! | [`config`] | Editor configuration |
//! | [`error`] | Error types |
//! | [`consts`] | Shared numeric and color constants |

pub mod config;
pub mod consts;
pub mod editor;
pub mod error;
pub mod events;
pub mod geometry;
pub mod hit;
pub mod input;
pub mod render;
pub mod scene;
pub mod surface;
pub mod viewport;
