/// Keyboard key identifier.
///
/// Only the keys the exercises react to are named. Everything else maps to
/// `Key::Unknown(u32)` with the platform code.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Key {
    Escape,
    Enter,
    Space,

    ArrowUp,
    ArrowDown,
    ArrowLeft,
    ArrowRight,

    Shift,
    Control,
    Alt,
    Meta,

    /// Platform-dependent key not represented here.
    Unknown(u32),
}

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum KeyState {
    Pressed,
    Released,
}

/// Mouse button identifier.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum MouseButton {
    Left,
    Right,
    Middle,
    Back,
    Forward,
    Other(u16),
}

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum MouseButtonState {
    Pressed,
    Released,
}

/// Held modifier keys.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq)]
pub struct Modifiers {
    pub shift: bool,
    pub ctrl: bool,
    pub alt: bool,
    pub meta: bool,
}

impl Modifiers {
    pub fn any(&self) -> bool {
        self.shift || self.ctrl || self.alt || self.meta
    }
}

/// Pixels per wheel "line", matching what browsers report for one notch.
pub const LINE_DELTA_PX: f32 = 100.0;

/// Mouse wheel delta.
///
/// `Line` corresponds to "scroll lines" style input; `Pixel` is high precision.
/// Signs follow winit: positive `y` scrolls content up (wheel pushed away).
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum MouseWheelDelta {
    Line { x: f32, y: f32 },
    Pixel { x: f32, y: f32 },
}

impl MouseWheelDelta {
    /// Vertical delta in pixels using the page-scroll sign convention
    /// (positive = wheel pulled toward the user).
    pub fn page_delta_y(&self) -> f32 {
        match *self {
            MouseWheelDelta::Line { y, .. } => -y * LINE_DELTA_PX,
            MouseWheelDelta::Pixel { y, .. } => -y,
        }
    }
}

/// Pointer move event in logical pixels.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct PointerMoveEvent {
    pub x: f32,
    pub y: f32,
}

/// Pointer button press or release at a position in logical pixels.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct PointerButtonEvent {
    pub button: MouseButton,
    pub state: MouseButtonState,
    pub x: f32,
    pub y: f32,
    pub modifiers: Modifiers,
}

/// Platform-agnostic input events emitted by the runtime.
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    ModifiersChanged(Modifiers),

    Key {
        key: Key,
        state: KeyState,
        modifiers: Modifiers,
        /// Stable platform code when available.
        code: u32,
        /// True when event is a key-repeat.
        repeat: bool,
    },

    PointerMoved(PointerMoveEvent),
    PointerButton(PointerButtonEvent),

    MouseWheel {
        delta: MouseWheelDelta,
        modifiers: Modifiers,
    },

    /// Pointer left the window surface.
    PointerLeft,

    /// Window focus change.
    Focused(bool),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn line_delta_converts_to_page_pixels() {
        // winit: one notch toward the user reports y = -1.0
        let d = MouseWheelDelta::Line { x: 0.0, y: -1.0 };
        assert_eq!(d.page_delta_y(), 100.0);
    }

    #[test]
    fn pixel_delta_flips_sign_only() {
        let d = MouseWheelDelta::Pixel { x: 3.0, y: 12.5 };
        assert_eq!(d.page_delta_y(), -12.5);
    }

    #[test]
    fn modifiers_any() {
        assert!(!Modifiers::default().any());
        assert!(Modifiers { alt: true, ..Default::default() }.any());
    }
}
