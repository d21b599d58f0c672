//! OpenGL backend for the glowfield renderer.
//!
//! [`RenderWindow`] opens a winit window with a current OpenGL 3.3 core
//! context; [`GlBackend`] implements the render core's backend trait on the
//! resulting `glow` context.
//!
//! # Invariants
//! - The context stays current on the creating thread for the window's lifetime.
//! - GPU wrappers must be dropped before the window that owns the context.

mod backend;
mod window;

pub use backend::GlBackend;
pub use glow;
pub use window::{RenderWindow, SurfaceError, WindowOptions};

pub fn crate_info() -> &'static str {
    concat!(env!("CARGO_PKG_NAME"), " v", env!("CARGO_PKG_VERSION"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn crate_info_names_crate_and_version() {
        assert_eq!(crate_info(), concat!("glowfield-render-gl v", env!("CARGO_PKG_VERSION")));
    }
}
