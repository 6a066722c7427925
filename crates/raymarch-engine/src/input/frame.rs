use std::collections::HashSet;

use super::types::{InputEvent, Key, KeyState};

/// Per-frame input deltas.
///
/// `InputState` holds what is currently down; `InputFrame` holds the
/// transitions that happened since the last redraw callback.
#[derive(Debug, Default)]
pub struct InputFrame {
    /// Raw events in arrival order.
    pub events: Vec<InputEvent>,

    /// Keys that went down this frame. Auto-repeat does not re-insert.
    pub keys_pressed: HashSet<Key>,
}

impl InputFrame {
    pub fn clear(&mut self) {
        self.events.clear();
        self.keys_pressed.clear();
    }

    pub fn push_event(&mut self, ev: InputEvent) {
        self.events.push(ev);
    }

    pub fn key_pressed(&self, key: Key) -> bool {
        self.keys_pressed.contains(&key)
    }

    /// Number of distinct presses of `key` this frame, ignoring auto-repeat.
    ///
    /// Unlike [`key_pressed`](Self::key_pressed) this sees press/release/press
    /// sequences that land between two redraws.
    pub fn press_count(&self, key: Key) -> usize {
        self.events
            .iter()
            .filter(|ev| {
                matches!(
                    ev,
                    InputEvent::Key { key: k, state: KeyState::Pressed, repeat: false, .. } if *k == key
                )
            })
            .count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::Modifiers;

    fn key_event(key: Key, state: KeyState, repeat: bool) -> InputEvent {
        InputEvent::Key {
            key,
            state,
            modifiers: Modifiers::default(),
            code: 0,
            repeat,
        }
    }

    #[test]
    fn press_count_ignores_repeats_and_other_keys() {
        let mut frame = InputFrame::default();
        frame.push_event(key_event(Key::Space, KeyState::Pressed, false));
        frame.push_event(key_event(Key::Space, KeyState::Pressed, true));
        frame.push_event(key_event(Key::Enter, KeyState::Pressed, false));
        frame.push_event(key_event(Key::Space, KeyState::Released, false));
        assert_eq!(frame.press_count(Key::Space), 1);
    }

    #[test]
    fn press_count_sees_two_presses_in_one_frame() {
        let mut frame = InputFrame::default();
        frame.push_event(key_event(Key::Space, KeyState::Pressed, false));
        frame.push_event(key_event(Key::Space, KeyState::Released, false));
        frame.push_event(key_event(Key::Space, KeyState::Pressed, false));
        assert_eq!(frame.press_count(Key::Space), 2);
    }

    #[test]
    fn clear_drops_everything() {
        let mut frame = InputFrame::default();
        frame.push_event(key_event(Key::Space, KeyState::Pressed, false));
        frame.keys_pressed.insert(Key::Space);
        frame.clear();
        assert!(frame.events.is_empty());
        assert!(!frame.key_pressed(Key::Space));
    }
}
