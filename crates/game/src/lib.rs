//! Pickup-collecting game loop pieces: configuration, the pickup field,
//! frame pacing and scene submission.
//!
//! # Invariants
//! - The field always holds `max_pickups` live pickups after an update.
//! - A pickup is collected at most once and scores exactly once.
//! - Collected pickups are removed before replacements spawn.
//! - All pickups share one sphere model; dropping the last owner frees it.
//! - Game time only advances through [`Session::update`].

mod clock;
mod config;
mod pickup;
mod scene;
mod session;

pub use clock::{FrameClock, MAX_FRAME_DELTA, clamp_frame_delta};
pub use config::{CameraConfig, ConfigError, GameConfig, WindowConfig, WorldConfig};
pub use pickup::{BOB_HEIGHT, BOB_SPEED, Pickup, ROTATION_SPEED};
pub use scene::{GROUND_SHININESS, PICKUP_SHININESS, SceneAssets};
pub use session::{FrameOutcome, Session, StatusReport, WorldBounds};

pub fn crate_info() -> &'static str {
    concat!(env!("CARGO_PKG_NAME"), " v", env!("CARGO_PKG_VERSION"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn crate_info_names_crate_and_version() {
        assert_eq!(crate_info(), concat!("glowfield-game v", env!("CARGO_PKG_VERSION")));
    }
}
