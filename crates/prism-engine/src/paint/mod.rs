//! Color model shared between exercises and renderers.

pub mod color;

pub use color::Color;
