//! Terminal key handling
//!
//! Maps crossterm key events onto the core [`InputState`] latches plus a
//! handful of session-level control actions. Most terminals never report
//! key releases, so held directions are auto-released after a short
//! quiet period; key repeat from the terminal keeps re-arming the hold.

use std::time::{Duration, Instant};

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind};

use crate::core::InputState;

/// Milliseconds without a repeat before a held direction is dropped.
const AUTO_RELEASE_MS: u64 = 150;

/// Session-level actions the mapper hands back to the main loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlAction {
    Quit,
    StartOrPause,
    Restart,
    TogglePreview,
    ToggleAutoplay,
}

#[derive(Debug)]
pub struct KeyMapper {
    last_left: Option<Instant>,
    last_right: Option<Instant>,
    last_down: Option<Instant>,
}

impl Default for KeyMapper {
    fn default() -> Self {
        Self::new()
    }
}

impl KeyMapper {
    pub fn new() -> Self {
        Self {
            last_left: None,
            last_right: None,
            last_down: None,
        }
    }

    /// Feed one key event. Direction keys latch into `input`; session
    /// keys come back as a [`ControlAction`].
    pub fn handle_key(&mut self, key: KeyEvent, input: &mut InputState) -> Option<ControlAction> {
        match key.kind {
            KeyEventKind::Press | KeyEventKind::Repeat => self.handle_press(key.code, input),
            KeyEventKind::Release => {
                self.handle_release(key.code, input);
                None
            }
        }
    }

    fn handle_press(&mut self, code: KeyCode, input: &mut InputState) -> Option<ControlAction> {
        let now = Instant::now();
        match code {
            KeyCode::Left | KeyCode::Char('a') => {
                input.press_left();
                self.last_left = Some(now);
            }
            KeyCode::Right | KeyCode::Char('d') => {
                input.press_right();
                self.last_right = Some(now);
            }
            KeyCode::Down | KeyCode::Char('s') => {
                input.press_down();
                self.last_down = Some(now);
            }
            KeyCode::Up | KeyCode::Char('x') | KeyCode::Char('k') => input.press_rotate_cw(),
            KeyCode::Char('z') | KeyCode::Char('j') => input.press_rotate_ccw(),
            KeyCode::Enter | KeyCode::Char('p') => return Some(ControlAction::StartOrPause),
            KeyCode::Char('r') => return Some(ControlAction::Restart),
            KeyCode::Char('n') => return Some(ControlAction::TogglePreview),
            KeyCode::Char('b') => return Some(ControlAction::ToggleAutoplay),
            KeyCode::Esc | KeyCode::Char('q') => return Some(ControlAction::Quit),
            _ => {}
        }
        None
    }

    fn handle_release(&mut self, code: KeyCode, input: &mut InputState) {
        match code {
            KeyCode::Left | KeyCode::Char('a') => {
                input.release_left();
                self.last_left = None;
            }
            KeyCode::Right | KeyCode::Char('d') => {
                input.release_right();
                self.last_right = None;
            }
            KeyCode::Down | KeyCode::Char('s') => {
                input.release_down();
                self.last_down = None;
            }
            _ => {}
        }
    }

    /// Release directions whose key repeat went quiet. Call once per
    /// frame on terminals without release events.
    pub fn expire_holds(&mut self, input: &mut InputState) {
        let timeout = Duration::from_millis(AUTO_RELEASE_MS);
        if self.last_left.is_some_and(|t| t.elapsed() > timeout) {
            input.release_left();
            self.last_left = None;
        }
        if self.last_right.is_some_and(|t| t.elapsed() > timeout) {
            input.release_right();
            self.last_right = None;
        }
        if self.last_down.is_some_and(|t| t.elapsed() > timeout) {
            input.release_down();
            self.last_down = None;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn arrows_latch_directions() {
        let mut mapper = KeyMapper::new();
        let mut input = InputState::new();
        assert_eq!(mapper.handle_key(press(KeyCode::Left), &mut input), None);
        assert!(input.left);
        assert_eq!(mapper.handle_key(press(KeyCode::Down), &mut input), None);
        assert!(input.down);
    }

    #[test]
    fn session_keys_map_to_control_actions() {
        let mut mapper = KeyMapper::new();
        let mut input = InputState::new();
        assert_eq!(
            mapper.handle_key(press(KeyCode::Char('q')), &mut input),
            Some(ControlAction::Quit)
        );
        assert_eq!(
            mapper.handle_key(press(KeyCode::Enter), &mut input),
            Some(ControlAction::StartOrPause)
        );
        assert_eq!(
            mapper.handle_key(press(KeyCode::Char('r')), &mut input),
            Some(ControlAction::Restart)
        );
    }

    #[test]
    fn rotation_keys_latch_without_control_actions() {
        let mut mapper = KeyMapper::new();
        let mut input = InputState::new();
        assert_eq!(mapper.handle_key(press(KeyCode::Up), &mut input), None);
        assert!(input.take_rotate_cw());
        assert_eq!(mapper.handle_key(press(KeyCode::Char('z')), &mut input), None);
        assert!(input.take_rotate_ccw());
    }

    #[test]
    fn quiet_hold_expires() {
        let mut mapper = KeyMapper::new();
        let mut input = InputState::new();
        mapper.handle_key(press(KeyCode::Left), &mut input);
        // Backdate the press past the timeout.
        mapper.last_left = Some(Instant::now() - Duration::from_millis(AUTO_RELEASE_MS * 2));
        mapper.expire_holds(&mut input);
        assert!(!input.left);
    }
}
