//! Input-to-geometry logic for the **prism** graphics exercises.
//!
//! This crate holds everything the exercises compute on the CPU: pointer
//! mapping, the circle/segment intersection solver and its two-stage drag
//! session, the incremental rotation accumulator and zoom, the rectangle
//! controller, the quadrant layout, and the static meshes. It depends on
//! `glam` and `log` only, so it is tested without a GPU.
//!
//! # Structure
//!
//! | Module | Contents |
//! |--------|----------|
//! | [`ndc`] | pixel → normalized device coordinate mapping |
//! | [`intersect`] | `Circle`, `Segment`, `IntersectionSet`, `intersect` |
//! | [`sketch`] | `SketchSession`: press / drag / release state machine |
//! | [`arcball`] | `RotationAccumulator`, `DragLatch`, `Zoom` |
//! | [`camera`] | fixed look-at rig and perspective projection |
//! | [`rect`] | `RectController` (reject-not-clamp stepping) |
//! | [`layout`] | `PixelRect`, square region and quadrant layout |
//! | [`mesh`] | circle outline, square pyramid, axis lines |
//!
//! # Quick start
//!
//! ```rust
//! use glam::DVec2;
//! use prism_geom::intersect::{intersect, Circle, Segment};
//!
//! let circle = Circle::new(DVec2::ZERO, 1.0);
//! let segment = Segment::new(DVec2::new(-2.0, 0.0), DVec2::new(2.0, 0.0));
//!
//! let hits = intersect(&circle, &segment);
//! assert_eq!(hits.len(), 2);
//! assert_eq!(hits.points().next(), Some(DVec2::new(-1.0, 0.0)));
//! ```

pub mod arcball;
pub mod camera;
pub mod intersect;
pub mod layout;
pub mod mesh;
pub mod ndc;
pub mod rect;
pub mod sketch;

pub use arcball::{DragLatch, RotationAccumulator, Zoom};
pub use intersect::{intersect, Circle, Hit, IntersectionSet, Segment};
pub use layout::{Corner, PixelRect, Quadrant};
pub use rect::{Direction, RectController};
pub use sketch::{ReleaseOutcome, SketchSession, Stage};
