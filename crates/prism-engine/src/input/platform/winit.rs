use winit::dpi::PhysicalPosition;
use winit::event::{ElementState, KeyEvent, MouseButton as WinitButton, MouseScrollDelta, WindowEvent};
use winit::keyboard::{KeyCode, ModifiersState, PhysicalKey};
use winit::window::Window;

use crate::input::{
    InputEvent, InputState, Key, KeyState, Modifiers, MouseButton, MouseButtonState,
    MouseWheelDelta, PointerButtonEvent, PointerMoveEvent,
};

/// Converts a winit window event into an [`InputEvent`].
///
/// Pointer positions are converted to logical pixels. Button events carry the
/// last position seen in `state` and are dropped when there is none. Events
/// with no input meaning yield `None`.
pub fn translate_window_event(
    window: &Window,
    state: &InputState,
    event: &WindowEvent,
) -> Option<InputEvent> {
    let ev = match event {
        WindowEvent::ModifiersChanged(m) => InputEvent::ModifiersChanged(modifiers(m.state())),
        WindowEvent::Focused(focused) => InputEvent::Focused(*focused),
        WindowEvent::CursorLeft { .. } => InputEvent::PointerLeft,

        WindowEvent::CursorMoved { position, .. } => {
            let (x, y) = logical(window, *position);
            InputEvent::PointerMoved(PointerMoveEvent { x, y })
        }

        WindowEvent::MouseInput { state: pressed, button, .. } => {
            pointer_button(state, *pressed, *button)?
        }

        WindowEvent::MouseWheel { delta, .. } => InputEvent::MouseWheel {
            delta: match *delta {
                MouseScrollDelta::LineDelta(x, y) => MouseWheelDelta::Line { x, y },
                MouseScrollDelta::PixelDelta(p) => {
                    let (x, y) = logical(window, p);
                    MouseWheelDelta::Pixel { x, y }
                }
            },
            modifiers: state.modifiers,
        },

        WindowEvent::KeyboardInput { event, .. } => key_event(event, state.modifiers),

        _ => return None,
    };

    Some(ev)
}

/// `None` while the cursor position is unknown (before the first move or
/// after it left the window).
fn pointer_button(state: &InputState, pressed: ElementState, button: WinitButton) -> Option<InputEvent> {
    let Some((x, y)) = state.pointer_pos else {
        log::trace!("dropping {button:?} {pressed:?}: pointer position unknown");
        return None;
    };

    Some(InputEvent::PointerButton(PointerButtonEvent {
        button: mouse_button(button),
        state: match pressed {
            ElementState::Pressed => MouseButtonState::Pressed,
            ElementState::Released => MouseButtonState::Released,
        },
        x,
        y,
        modifiers: state.modifiers,
    }))
}

fn key_event(event: &KeyEvent, modifiers: Modifiers) -> InputEvent {
    let (key, code) = match event.physical_key {
        PhysicalKey::Code(code) => (key_from_code(code), code as u32),
        PhysicalKey::Unidentified(_) => (Key::Unknown(0), 0),
    };

    InputEvent::Key {
        key,
        state: match event.state {
            ElementState::Pressed => KeyState::Pressed,
            ElementState::Released => KeyState::Released,
        },
        modifiers,
        code,
        repeat: event.repeat,
    }
}

fn logical(window: &Window, pos: PhysicalPosition<f64>) -> (f32, f32) {
    let p = pos.to_logical::<f64>(window.scale_factor());
    (p.x as f32, p.y as f32)
}

fn modifiers(m: ModifiersState) -> Modifiers {
    Modifiers {
        shift: m.shift_key(),
        ctrl: m.control_key(),
        alt: m.alt_key(),
        meta: m.super_key(),
    }
}

fn mouse_button(b: WinitButton) -> MouseButton {
    match b {
        WinitButton::Left => MouseButton::Left,
        WinitButton::Right => MouseButton::Right,
        WinitButton::Middle => MouseButton::Middle,
        WinitButton::Back => MouseButton::Back,
        WinitButton::Forward => MouseButton::Forward,
        WinitButton::Other(v) => MouseButton::Other(v),
    }
}

fn key_from_code(code: KeyCode) -> Key {
    match code {
        KeyCode::Escape => Key::Escape,
        KeyCode::Enter | KeyCode::NumpadEnter => Key::Enter,
        KeyCode::Space => Key::Space,
        KeyCode::ArrowUp => Key::ArrowUp,
        KeyCode::ArrowDown => Key::ArrowDown,
        KeyCode::ArrowLeft => Key::ArrowLeft,
        KeyCode::ArrowRight => Key::ArrowRight,
        KeyCode::ShiftLeft | KeyCode::ShiftRight => Key::Shift,
        KeyCode::ControlLeft | KeyCode::ControlRight => Key::Control,
        KeyCode::AltLeft | KeyCode::AltRight => Key::Alt,
        KeyCode::SuperLeft | KeyCode::SuperRight => Key::Meta,
        other => Key::Unknown(other as u32),
    }
}
