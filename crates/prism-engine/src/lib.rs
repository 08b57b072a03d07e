//! Prism engine crate.
//!
//! Platform + GPU runtime used by the exercise binary: logging, the wgpu
//! device and surface, the winit loop, platform-agnostic input, the per-frame
//! context, and the small set of renderers the exercises draw with.

pub mod device;
pub mod window;
pub mod input;
pub mod core;

pub mod logging;
pub mod coords;
pub mod render;
pub mod paint;
pub mod scene;

mod error;

pub use error::StartupError;
