use crossterm::event::{KeyCode, KeyEvent};

/// Held-keys snapshot consumed once per tick.
///
/// Terminals report presses (with autorepeat) but no releases, so the
/// snapshot is rebuilt from the key events that arrived since the previous
/// tick and cleared after the simulation samples it. Last writer wins; no
/// queueing, no debouncing.
#[derive(Clone, Copy, Debug, Default)]
pub struct InputState {
    pub rotate_left: bool,
    pub rotate_right: bool,
    pub thrust: bool,
    pub fire: bool,
}

impl InputState {
    /// Record a key event into the snapshot. Returns false if the key is
    /// not a gameplay key, so the caller can route it elsewhere.
    pub fn record(&mut self, key: KeyEvent) -> bool {
        match key.code {
            KeyCode::Left => self.rotate_left = true,
            KeyCode::Right => self.rotate_right = true,
            KeyCode::Up => self.thrust = true,
            KeyCode::Char(' ') => self.fire = true,
            _ => return false,
        }
        true
    }

    pub fn clear(&mut self) {
        *self = InputState::default();
    }
}
