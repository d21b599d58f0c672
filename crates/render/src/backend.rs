use std::fmt;

use glam::{Mat2, Mat3, Mat4, Vec2, Vec3, Vec4};

use crate::error::Result;
use crate::vertex::VertexAttribute;

/// Programmable pipeline stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShaderStage {
    Vertex,
    Fragment,
}

impl fmt::Display for ShaderStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShaderStage::Vertex => f.write_str("vertex"),
            ShaderStage::Fragment => f.write_str("fragment"),
        }
    }
}

/// A typed value for a named shader uniform.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum UniformValue {
    Bool(bool),
    Int(i32),
    Float(f32),
    Vec2(Vec2),
    Vec3(Vec3),
    Vec4(Vec4),
    Mat2(Mat2),
    Mat3(Mat3),
    Mat4(Mat4),
}

/// Primitives the meshes, shader programs and renderer need from a GPU API.
///
/// Handles are plain values; ownership lives in the wrappers
/// ([`Mesh`](crate::Mesh), [`ShaderProgram`](crate::ShaderProgram)), which
/// release them on drop. Methods take `&self` because a single context is
/// shared by every wrapper on the render thread.
pub trait GpuBackend {
    type Buffer: Copy + fmt::Debug;
    type VertexArray: Copy + fmt::Debug;
    type Shader: Copy + fmt::Debug;
    type Program: Copy + fmt::Debug;
    type UniformLocation: fmt::Debug;

    fn create_vertex_array(&self) -> Result<Self::VertexArray>;
    fn create_buffer(&self) -> Result<Self::Buffer>;
    fn delete_vertex_array(&self, vertex_array: Self::VertexArray);
    fn delete_buffer(&self, buffer: Self::Buffer);

    /// Upload static interleaved vertex data and record its attribute layout
    /// in `vertex_array`.
    fn upload_vertices(
        &self,
        vertex_array: Self::VertexArray,
        buffer: Self::Buffer,
        data: &[u8],
        stride: i32,
        attributes: &[VertexAttribute],
    );

    /// Upload static triangle indices and attach them to `vertex_array`.
    fn upload_indices(&self, vertex_array: Self::VertexArray, buffer: Self::Buffer, indices: &[u32]);

    fn create_shader(&self, stage: ShaderStage) -> Result<Self::Shader>;
    /// Compile `source` into `shader`; on failure returns the diagnostic log.
    fn compile_shader(&self, shader: Self::Shader, source: &str) -> std::result::Result<(), String>;
    fn delete_shader(&self, shader: Self::Shader);

    fn create_program(&self) -> Result<Self::Program>;
    fn attach_shader(&self, program: Self::Program, shader: Self::Shader);
    fn detach_shader(&self, program: Self::Program, shader: Self::Shader);
    /// Link attached stages; on failure returns the diagnostic log.
    fn link_program(&self, program: Self::Program) -> std::result::Result<(), String>;
    fn delete_program(&self, program: Self::Program);
    /// Bind `program`, or unbind with `None`.
    fn use_program(&self, program: Option<Self::Program>);

    /// `None` when the linked program has no active uniform called `name`.
    fn uniform_location(&self, program: Self::Program, name: &str) -> Option<Self::UniformLocation>;
    /// Set a uniform of the currently bound program.
    fn set_uniform(&self, location: &Self::UniformLocation, value: &UniformValue);

    /// Draw `index_count` indices from `vertex_array` as a triangle list.
    fn draw_indexed_triangles(&self, vertex_array: Self::VertexArray, index_count: u32);

    fn set_viewport(&self, width: u32, height: u32);
    fn set_clear_color(&self, color: [f32; 4]);
    /// Clear color and depth.
    fn clear(&self);
    fn set_depth_test(&self, enabled: bool);
    fn set_blending(&self, enabled: bool);
}
