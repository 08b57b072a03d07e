//! One module per exercise.
//!
//! Each exercise keeps its state in a session struct that is updated from the
//! frame's input events and then turned into draw calls. Sessions have no GPU
//! dependency so they are tested directly.

pub mod intersect;
pub mod pyramid;
pub mod quadrants;
pub mod rect;
