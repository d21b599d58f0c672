use bitflags::bitflags;

bitflags! {
    /// Set of movement directions held during a frame.
    ///
    /// Opposing directions may be held together; they cancel out.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct MoveDirection: u8 {
        const FORWARD = 0b0001;
        const BACKWARD = 0b0010;
        const LEFT = 0b0100;
        const RIGHT = 0b1000;
    }
}

impl MoveDirection {
    /// Signed (forward, strafe) axes: +1 forward/right, -1 backward/left.
    pub fn axes(self) -> (f32, f32) {
        let mut forward = 0.0;
        let mut strafe = 0.0;
        if self.contains(Self::FORWARD) {
            forward += 1.0;
        }
        if self.contains(Self::BACKWARD) {
            forward -= 1.0;
        }
        if self.contains(Self::RIGHT) {
            strafe += 1.0;
        }
        if self.contains(Self::LEFT) {
            strafe -= 1.0;
        }
        (forward, strafe)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_set_has_no_axes() {
        assert_eq!(MoveDirection::empty().axes(), (0.0, 0.0));
    }

    #[test]
    fn opposing_directions_cancel() {
        let dir = MoveDirection::FORWARD | MoveDirection::BACKWARD | MoveDirection::LEFT;
        assert_eq!(dir.axes(), (0.0, -1.0));
    }
}
