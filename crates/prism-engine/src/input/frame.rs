use super::types::{InputEvent, Key, KeyState};

/// Events received since the previous frame, in arrival order.
///
/// Exercises replay these through their own state machines, so ordering
/// matters more than aggregate "pressed this frame" sets.
#[derive(Debug, Default)]
pub struct InputFrame {
    pub events: Vec<InputEvent>,
}

impl InputFrame {
    pub fn clear(&mut self) {
        self.events.clear();
    }

    pub fn push_event(&mut self, ev: InputEvent) {
        self.events.push(ev);
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Key presses in order, auto-repeats included.
    pub fn key_presses(&self) -> impl Iterator<Item = Key> + '_ {
        self.events.iter().filter_map(|ev| match ev {
            InputEvent::Key {
                key,
                state: KeyState::Pressed,
                ..
            } => Some(*key),
            _ => None,
        })
    }
}
