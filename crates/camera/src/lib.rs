//! First-person camera: smoothed velocity movement, mouse look, and
//! view/projection matrices.
//!
//! # Invariants
//! - `front`, `right` and `up` are unit length and mutually orthogonal.
//! - The basis is recomputed on every yaw/pitch change, never stored stale.
//! - Pitch stays within ±89° when constrained; zoom stays within [1°, 90°].
//! - Callers clamp `dt` to a small positive cap before stepping the camera.

mod camera;
mod direction;

pub use camera::{
    Camera, DEFAULT_ACCELERATION, DEFAULT_FRICTION, DEFAULT_PITCH, DEFAULT_SENSITIVITY,
    DEFAULT_SPEED, DEFAULT_YAW, DEFAULT_ZOOM, FAR_PLANE, NEAR_PLANE,
};
pub use direction::MoveDirection;

pub fn crate_info() -> &'static str {
    concat!(env!("CARGO_PKG_NAME"), " v", env!("CARGO_PKG_VERSION"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn crate_info_names_crate_and_version() {
        assert_eq!(crate_info(), concat!("glowfield-camera v", env!("CARGO_PKG_VERSION")));
    }
}
