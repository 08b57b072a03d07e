use std::collections::HashSet;

use super::frame::InputFrame;
use super::types::{InputEvent, Key, KeyState, Modifiers, MouseButton, MouseButtonState};

/// Input state that persists across frames.
///
/// The platform layer reads `pointer_pos` and `modifiers` back when it builds
/// button events, since winit does not attach them.
#[derive(Debug, Default)]
pub struct InputState {
    pub modifiers: Modifiers,
    pub focused: bool,

    /// Last known pointer position in logical pixels, `None` outside the window.
    pub pointer_pos: Option<(f32, f32)>,

    pub keys_down: HashSet<Key>,
    pub buttons_down: HashSet<MouseButton>,
}

impl InputState {
    /// Folds `ev` into the held state, then queues it on `frame`.
    pub fn apply_event(&mut self, frame: &mut InputFrame, ev: InputEvent) {
        match &ev {
            InputEvent::ModifiersChanged(m) => self.modifiers = *m,

            InputEvent::Focused(focused) => {
                self.focused = *focused;
                if !focused {
                    self.keys_down.clear();
                    self.buttons_down.clear();
                }
            }

            InputEvent::PointerMoved(p) => self.pointer_pos = Some((p.x, p.y)),
            InputEvent::PointerLeft => self.pointer_pos = None,

            InputEvent::Key { key, state, modifiers, .. } => {
                self.modifiers = *modifiers;
                match state {
                    KeyState::Pressed => self.keys_down.insert(*key),
                    KeyState::Released => self.keys_down.remove(key),
                };
            }

            InputEvent::PointerButton(b) => {
                self.pointer_pos = Some((b.x, b.y));
                self.modifiers = b.modifiers;
                match b.state {
                    MouseButtonState::Pressed => self.buttons_down.insert(b.button),
                    MouseButtonState::Released => self.buttons_down.remove(&b.button),
                };
            }

            InputEvent::MouseWheel { modifiers, .. } => self.modifiers = *modifiers,
        }

        frame.push_event(ev);
    }

    pub fn key_down(&self, key: Key) -> bool {
        self.keys_down.contains(&key)
    }

    pub fn button_down(&self, btn: MouseButton) -> bool {
        self.buttons_down.contains(&btn)
    }
}
