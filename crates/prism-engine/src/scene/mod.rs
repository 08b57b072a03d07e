//! Scene (draw stream) types.
//!
//! Exercises derive a fresh [`DrawList`] from their session state every frame;
//! renderers consume it in insertion order. All 2D geometry is in NDC.

mod cmd;
mod list;

pub use cmd::DrawCmd;
pub use list::DrawList;
