use std::collections::HashSet;

use winit::keyboard::KeyCode;

/// Snapshot of held keys and the cursor position.
///
/// The cursor is virtual: absolute positions overwrite it and raw relative
/// motion accumulates into it, so it keeps moving while the pointer is locked.
#[derive(Debug, Default, Clone)]
pub struct InputState {
    keys_down: HashSet<KeyCode>,
    cursor: (f64, f64),
    scroll: f32,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_key(&mut self, key: KeyCode, pressed: bool) {
        if pressed {
            self.keys_down.insert(key);
        } else {
            self.keys_down.remove(&key);
        }
    }

    pub fn is_key_down(&self, key: KeyCode) -> bool {
        self.keys_down.contains(&key)
    }

    /// Forget all held keys, e.g. when the window loses focus.
    pub fn release_all(&mut self) {
        self.keys_down.clear();
    }

    pub fn set_cursor_position(&mut self, x: f64, y: f64) {
        self.cursor = (x, y);
    }

    pub fn add_cursor_motion(&mut self, dx: f64, dy: f64) {
        self.cursor.0 += dx;
        self.cursor.1 += dy;
    }

    pub fn cursor_position(&self) -> (f64, f64) {
        self.cursor
    }

    pub fn add_scroll(&mut self, lines: f32) {
        self.scroll += lines;
    }

    /// Scroll accumulated since the last call.
    pub fn take_scroll(&mut self) -> f32 {
        std::mem::take(&mut self.scroll)
    }
}

/// Turns successive cursor positions into look deltas.
///
/// The first sample only primes the tracker. Y is flipped so that moving the
/// cursor up yields a positive delta.
#[derive(Debug, Default, Clone)]
pub struct CursorTracker {
    last: Option<(f64, f64)>,
}

impl CursorTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn delta(&mut self, (x, y): (f64, f64)) -> (f32, f32) {
        let (last_x, last_y) = self.last.replace((x, y)).unwrap_or((x, y));
        ((x - last_x) as f32, (last_y - y) as f32)
    }

    /// Treat the next sample as the first again.
    pub fn reset(&mut self) {
        self.last = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keys_are_polled() {
        let mut input = InputState::new();
        input.set_key(KeyCode::KeyW, true);
        assert!(input.is_key_down(KeyCode::KeyW));
        input.set_key(KeyCode::KeyW, false);
        assert!(!input.is_key_down(KeyCode::KeyW));
        input.set_key(KeyCode::KeyA, true);
        input.release_all();
        assert!(!input.is_key_down(KeyCode::KeyA));
    }

    #[test]
    fn first_sample_yields_no_delta() {
        let mut tracker = CursorTracker::new();
        assert_eq!(tracker.delta((400.0, 300.0)), (0.0, 0.0));
        assert_eq!(tracker.delta((410.0, 290.0)), (10.0, 10.0));
        assert_eq!(tracker.delta((410.0, 320.0)), (0.0, -30.0));
        tracker.reset();
        assert_eq!(tracker.delta((0.0, 0.0)), (0.0, 0.0));
    }

    #[test]
    fn relative_motion_moves_virtual_cursor() {
        let mut input = InputState::new();
        input.set_cursor_position(100.0, 100.0);
        input.add_cursor_motion(-5.0, 2.5);
        input.add_cursor_motion(-5.0, 2.5);
        assert_eq!(input.cursor_position(), (90.0, 105.0));

        input.add_scroll(1.0);
        input.add_scroll(0.5);
        assert_eq!(input.take_scroll(), 1.5);
        assert_eq!(input.take_scroll(), 0.0);
    }
}
