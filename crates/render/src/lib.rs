//! Rendering core: procedural geometry, GPU meshes, models, shader programs
//! and a draw façade, all generic over a [`GpuBackend`].
//!
//! # Invariants
//! - Every mesh index addresses an existing vertex; indices form whole triangles.
//! - GPU handles are owned by exactly one wrapper and released on drop.
//! - Uniforms missing from a program are skipped, never reported as errors.
//! - Each draw re-sends every uniform it needs; no uniform state is cached.
//!
//! [`HeadlessBackend`] runs the whole stack without a GPU.

mod backend;
mod error;
pub mod geometry;
pub mod headless;
mod mesh;
mod model;
mod renderer;
mod shader;
pub mod shaders;
mod vertex;

pub use backend::{GpuBackend, ShaderStage, UniformValue};
pub use error::{RenderError, Result};
pub use geometry::{DEFAULT_SPHERE_SEGMENTS, MeshData};
pub use headless::HeadlessBackend;
pub use mesh::Mesh;
pub use model::Model;
pub use renderer::{CLEAR_COLOR, DrawParams, FrameStats, LIGHT_COLOR, LIGHT_POSITION, Renderer};
pub use shader::ShaderProgram;
pub use vertex::{Vertex, VertexAttribute};

pub fn crate_info() -> &'static str {
    concat!(env!("CARGO_PKG_NAME"), " v", env!("CARGO_PKG_VERSION"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn crate_info_names_crate_and_version() {
        assert_eq!(crate_info(), concat!("glowfield-render v", env!("CARGO_PKG_VERSION")));
    }
}
