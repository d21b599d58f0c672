//! Polled input: which keys are held, where the cursor is, and how those map
//! onto camera movement.
//!
//! # Invariants
//! - Consumers poll state once per frame; there is no event queue.
//! - Cursor deltas are computed here across frames, never taken from events.

mod bindings;
mod state;

pub use bindings::{movement_direction, quit_requested};
pub use state::{CursorTracker, InputState};
pub use winit::keyboard::KeyCode;

pub fn crate_info() -> &'static str {
    concat!(env!("CARGO_PKG_NAME"), " v", env!("CARGO_PKG_VERSION"))
}
