use std::collections::BTreeMap;

/// Numbered status lines shown in the window title.
///
/// Slots are composed in ascending slot order after the base title. Each
/// change is logged at `info` so the text is also visible on the console.
#[derive(Debug, Clone, Default)]
pub struct StatusOverlay {
    base_title: String,
    slots: BTreeMap<u8, String>,
    dirty: bool,
}

impl StatusOverlay {
    pub fn new(base_title: impl Into<String>) -> Self {
        Self {
            base_title: base_title.into(),
            slots: BTreeMap::new(),
            dirty: false,
        }
    }

    /// Sets the text of `slot`. Returns `true` if the text changed.
    pub fn set(&mut self, slot: u8, text: impl Into<String>) -> bool {
        let text = text.into();
        if self.slots.get(&slot) == Some(&text) {
            return false;
        }

        log::info!("[{slot}] {text}");
        self.slots.insert(slot, text);
        self.dirty = true;
        true
    }

    /// Base title followed by every non-empty slot, separated by `" | "`.
    pub fn compose(&self) -> String {
        std::iter::once(self.base_title.as_str())
            .chain(self.slots.values().map(String::as_str))
            .filter(|s| !s.is_empty())
            .collect::<Vec<_>>()
            .join(" | ")
    }

    /// Returns the composed text once after any change.
    pub fn take_changed(&mut self) -> Option<String> {
        if !std::mem::take(&mut self.dirty) {
            return None;
        }
        Some(self.compose())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn composes_in_slot_order_regardless_of_insertion() {
        let mut o = StatusOverlay::new("prism");
        o.set(3, "third");
        o.set(1, "first");
        o.set(2, "second");
        assert_eq!(o.compose(), "prism | first | second | third");
    }

    #[test]
    fn empty_base_title_is_skipped() {
        let mut o = StatusOverlay::new("");
        o.set(1, "only");
        assert_eq!(o.compose(), "only");
    }

    #[test]
    fn take_changed_reports_once() {
        let mut o = StatusOverlay::new("t");
        assert_eq!(o.take_changed(), None);

        o.set(1, "a");
        assert_eq!(o.take_changed().as_deref(), Some("t | a"));
        assert_eq!(o.take_changed(), None);
    }

    #[test]
    fn setting_same_text_is_not_a_change() {
        let mut o = StatusOverlay::new("t");
        assert!(o.set(1, "a"));
        o.take_changed();
        assert!(!o.set(1, "a"));
        assert_eq!(o.take_changed(), None);
    }
}
