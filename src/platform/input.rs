//! Keyboard input
//!
//! Raw key-down/key-up events are folded into held state plus one-shot
//! edges, which are consumed once per tick.

use crate::sim::TickInput;

/// Logical game actions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Left,
    Right,
    Jump,
}

impl Action {
    /// Map a DOM `KeyboardEvent` (`code`, `key`) to an action
    pub fn from_key(code: &str, key: &str) -> Option<Self> {
        match code {
            "ArrowLeft" => Some(Action::Left),
            "ArrowRight" => Some(Action::Right),
            "Space" => Some(Action::Jump),
            _ if key == " " => Some(Action::Jump),
            _ => None,
        }
    }

    #[inline]
    pub fn is_horizontal(&self) -> bool {
        matches!(self, Action::Left | Action::Right)
    }
}

/// Keys whose browser default (page scrolling) must be suppressed
pub fn suppresses_default(code: &str) -> bool {
    matches!(code, "Space" | "ArrowUp" | "ArrowDown")
}

/// Held keys plus edges since the last tick
#[derive(Debug, Clone, Default)]
pub struct KeyState {
    left: bool,
    right: bool,
    jump_pressed: bool,
    horizontal_pressed: bool,
}

impl KeyState {
    pub fn press(&mut self, action: Action) {
        match action {
            Action::Left => self.left = true,
            Action::Right => self.right = true,
            Action::Jump => self.jump_pressed = true,
        }
        if action.is_horizontal() {
            self.horizontal_pressed = true;
        }
    }

    pub fn release(&mut self, action: Action) {
        match action {
            Action::Left => self.left = false,
            Action::Right => self.right = false,
            Action::Jump => {}
        }
    }

    /// Build this tick's input and clear the one-shot edges
    ///
    /// `allow_start` gates the start edge (e.g. while assets are loading).
    pub fn take_tick_input(&mut self, allow_start: bool) -> TickInput {
        let input = TickInput {
            left: self.left,
            right: self.right,
            jump: self.jump_pressed,
            start: self.horizontal_pressed && allow_start,
        };
        self.jump_pressed = false;
        self.horizontal_pressed = false;
        input
    }

    /// Forget everything (session reset)
    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_mapping() {
        assert_eq!(Action::from_key("ArrowLeft", "ArrowLeft"), Some(Action::Left));
        assert_eq!(Action::from_key("Space", " "), Some(Action::Jump));
        // Some layouts report an odd code but the space key
        assert_eq!(Action::from_key("Unidentified", " "), Some(Action::Jump));
        assert_eq!(Action::from_key("KeyA", "a"), None);
        assert!(suppresses_default("ArrowDown"));
        assert!(!suppresses_default("ArrowLeft"));
    }

    #[test]
    fn test_edges_are_one_shot() {
        let mut keys = KeyState::default();
        keys.press(Action::Right);
        keys.press(Action::Jump);

        let first = keys.take_tick_input(true);
        assert!(first.right && first.jump && first.start);

        let second = keys.take_tick_input(true);
        assert!(second.right, "still held");
        assert!(!second.jump && !second.start);

        keys.release(Action::Right);
        assert!(!keys.take_tick_input(true).right);
    }

    #[test]
    fn test_start_gated() {
        let mut keys = KeyState::default();
        keys.press(Action::Left);
        let input = keys.take_tick_input(false);
        assert!(input.left);
        assert!(!input.start);
    }
}
