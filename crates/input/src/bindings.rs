use glowfield_camera::MoveDirection;
use winit::keyboard::KeyCode;

use crate::InputState;

const BINDINGS: [(KeyCode, MoveDirection); 8] = [
    (KeyCode::KeyW, MoveDirection::FORWARD),
    (KeyCode::ArrowUp, MoveDirection::FORWARD),
    (KeyCode::KeyS, MoveDirection::BACKWARD),
    (KeyCode::ArrowDown, MoveDirection::BACKWARD),
    (KeyCode::KeyA, MoveDirection::LEFT),
    (KeyCode::ArrowLeft, MoveDirection::LEFT),
    (KeyCode::KeyD, MoveDirection::RIGHT),
    (KeyCode::ArrowRight, MoveDirection::RIGHT),
];

/// Directions held this frame: WASD or the arrow keys.
pub fn movement_direction(input: &InputState) -> MoveDirection {
    BINDINGS
        .iter()
        .filter(|(key, _)| input.is_key_down(*key))
        .fold(MoveDirection::empty(), |acc, (_, dir)| acc | *dir)
}

pub fn quit_requested(input: &InputState) -> bool {
    input.is_key_down(KeyCode::Escape)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wasd_maps_to_directions() {
        let mut input = InputState::new();
        assert!(movement_direction(&input).is_empty());

        input.set_key(KeyCode::KeyW, true);
        input.set_key(KeyCode::KeyD, true);
        assert_eq!(
            movement_direction(&input),
            MoveDirection::FORWARD | MoveDirection::RIGHT
        );

        input.set_key(KeyCode::KeyW, false);
        input.set_key(KeyCode::ArrowLeft, true);
        assert_eq!(
            movement_direction(&input),
            MoveDirection::LEFT | MoveDirection::RIGHT
        );
    }

    #[test]
    fn escape_requests_quit() {
        let mut input = InputState::new();
        assert!(!quit_requested(&input));
        input.set_key(KeyCode::Escape, true);
        assert!(quit_requested(&input));
    }
}
