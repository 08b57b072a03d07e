//! Window input, independent of the windowing backend.
//!
//! [`platform`] turns winit events into [`InputEvent`]s. The runtime folds
//! each one into [`InputState`] and queues it on the [`InputFrame`] handed to
//! the exercise for the next frame.

mod frame;
mod state;
mod types;

pub mod platform;

pub use frame::InputFrame;
pub use state::InputState;
pub use types::{
    InputEvent, Key, KeyState, Modifiers, MouseButton, MouseButtonState, MouseWheelDelta,
    PointerButtonEvent, PointerMoveEvent, LINE_DELTA_PX,
};
