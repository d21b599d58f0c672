use std::fmt;
use std::rc::Rc;

use glam::{Mat2, Mat3, Mat4, Vec2, Vec3, Vec4};

use crate::backend::{GpuBackend, ShaderStage, UniformValue};
use crate::error::{RenderError, Result};

/// A linked GPU program that owns its handle.
///
/// Uniform locations are resolved by name on every set. Setting a uniform the
/// program does not use is a no-op, so callers may send a superset of what a
/// particular shader declares.
pub struct ShaderProgram<B: GpuBackend> {
    gpu: Rc<B>,
    program: Option<B::Program>,
}

impl<B: GpuBackend> ShaderProgram<B> {
    /// Unlinked program; [`use_program`](Self::use_program) unbinds until a
    /// successful load.
    pub fn new(gpu: Rc<B>) -> Self {
        Self { gpu, program: None }
    }

    pub fn from_source(gpu: Rc<B>, vertex_source: &str, fragment_source: &str) -> Result<Self> {
        let mut shader = Self::new(gpu);
        shader.load_from_source(vertex_source, fragment_source)?;
        Ok(shader)
    }

    /// Compile both stages and link them, replacing any previous program.
    ///
    /// On failure the program is left unlinked and no stage objects survive.
    pub fn load_from_source(&mut self, vertex_source: &str, fragment_source: &str) -> Result<()> {
        self.release();
        let gpu = &*self.gpu;

        let vertex = compile_stage(gpu, ShaderStage::Vertex, vertex_source)?;
        let fragment = match compile_stage(gpu, ShaderStage::Fragment, fragment_source) {
            Ok(shader) => shader,
            Err(e) => {
                gpu.delete_shader(vertex);
                return Err(e);
            }
        };
        let program = match gpu.create_program() {
            Ok(program) => program,
            Err(e) => {
                gpu.delete_shader(vertex);
                gpu.delete_shader(fragment);
                return Err(e);
            }
        };

        gpu.attach_shader(program, vertex);
        gpu.attach_shader(program, fragment);
        let linked = gpu.link_program(program);
        gpu.detach_shader(program, vertex);
        gpu.detach_shader(program, fragment);
        gpu.delete_shader(vertex);
        gpu.delete_shader(fragment);

        if let Err(log) = linked {
            gpu.delete_program(program);
            return Err(RenderError::ProgramLink { log });
        }

        tracing::debug!(?program, "linked shader program");
        self.program = Some(program);
        Ok(())
    }

    pub fn is_linked(&self) -> bool {
        self.program.is_some()
    }

    /// Backend handle of the linked program, if any.
    pub fn handle(&self) -> Option<B::Program> {
        self.program
    }

    /// Bind this program for subsequent draws.
    pub fn use_program(&self) {
        self.gpu.use_program(self.program);
    }

    /// `None` when unlinked or when the program has no such active uniform.
    pub fn uniform_location(&self, name: &str) -> Option<B::UniformLocation> {
        self.program
            .and_then(|program| self.gpu.uniform_location(program, name))
    }

    /// Set a uniform of this program, which must be bound.
    pub fn set_uniform(&self, name: &str, value: UniformValue) {
        match self.uniform_location(name) {
            Some(location) => self.gpu.set_uniform(&location, &value),
            None => tracing::trace!(uniform = name, "uniform not active, skipped"),
        }
    }

    pub fn set_bool(&self, name: &str, value: bool) {
        self.set_uniform(name, UniformValue::Bool(value));
    }

    pub fn set_int(&self, name: &str, value: i32) {
        self.set_uniform(name, UniformValue::Int(value));
    }

    pub fn set_float(&self, name: &str, value: f32) {
        self.set_uniform(name, UniformValue::Float(value));
    }

    pub fn set_vec2(&self, name: &str, value: Vec2) {
        self.set_uniform(name, UniformValue::Vec2(value));
    }

    pub fn set_vec3(&self, name: &str, value: Vec3) {
        self.set_uniform(name, UniformValue::Vec3(value));
    }

    pub fn set_vec4(&self, name: &str, value: Vec4) {
        self.set_uniform(name, UniformValue::Vec4(value));
    }

    pub fn set_mat2(&self, name: &str, value: Mat2) {
        self.set_uniform(name, UniformValue::Mat2(value));
    }

    pub fn set_mat3(&self, name: &str, value: Mat3) {
        self.set_uniform(name, UniformValue::Mat3(value));
    }

    pub fn set_mat4(&self, name: &str, value: Mat4) {
        self.set_uniform(name, UniformValue::Mat4(value));
    }

    fn release(&mut self) {
        if let Some(program) = self.program.take() {
            self.gpu.delete_program(program);
        }
    }
}

fn compile_stage<B: GpuBackend>(gpu: &B, stage: ShaderStage, source: &str) -> Result<B::Shader> {
    let shader = gpu.create_shader(stage)?;
    if let Err(log) = gpu.compile_shader(shader, source) {
        gpu.delete_shader(shader);
        return Err(RenderError::ShaderCompile { stage, log });
    }
    Ok(shader)
}

impl<B: GpuBackend> Drop for ShaderProgram<B> {
    fn drop(&mut self) {
        self.release();
    }
}

impl<B: GpuBackend> fmt::Debug for ShaderProgram<B> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ShaderProgram")
            .field("program", &self.program)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::headless::{Command, HeadlessBackend};

    const MINIMAL_VERTEX: &str = r#"
#version 330 core
layout (location = 0) in vec3 aPos;
uniform mat4 model;
void main() {
    gl_Position = model * vec4(aPos, 1.0);
}
"#;

    const MINIMAL_FRAGMENT: &str = r#"
#version 330 core
out vec4 FragColor;
uniform vec3 tint;
void main() {
    FragColor = vec4(tint, 1.0);
}
"#;

    #[test]
    fn valid_sources_link_to_nonzero_handle() {
        let gpu = Rc::new(HeadlessBackend::new());
        let shader = ShaderProgram::from_source(gpu.clone(), MINIMAL_VERTEX, MINIMAL_FRAGMENT).unwrap();
        assert!(shader.is_linked());
        assert!(shader.handle().is_some_and(|h| h.get() != 0));
        // Stage objects are released once linked.
        assert_eq!(gpu.live_shaders(), 0);
        assert!(shader.uniform_location("model").is_some());
        assert!(shader.uniform_location("tint").is_some());
    }

    #[test]
    fn missing_uniform_is_silently_skipped() {
        let gpu = Rc::new(HeadlessBackend::new());
        let shader = ShaderProgram::from_source(gpu.clone(), MINIMAL_VERTEX, MINIMAL_FRAGMENT).unwrap();
        shader.use_program();
        gpu.take_commands();

        assert!(shader.uniform_location("lightPos").is_none());
        shader.set_vec3("lightPos", Vec3::ONE);
        shader.set_float("shininess", 32.0);
        assert!(gpu.take_commands().is_empty());

        shader.set_vec3("tint", Vec3::X);
        assert_eq!(
            gpu.take_commands(),
            vec![Command::SetUniform {
                program: shader.handle().unwrap(),
                name: "tint".into(),
                value: UniformValue::Vec3(Vec3::X),
            }]
        );
    }

    #[test]
    fn fragment_failure_releases_vertex_stage() {
        let gpu = Rc::new(HeadlessBackend::new());
        let err = ShaderProgram::from_source(gpu.clone(), MINIMAL_VERTEX, "#version 330 core\n")
            .unwrap_err();
        match err {
            RenderError::ShaderCompile { stage, log } => {
                assert_eq!(stage, ShaderStage::Fragment);
                assert!(log.contains("main"));
            }
            other => panic!("unexpected error: {other}"),
        }
        assert_eq!(gpu.live_resources(), 0);
    }

    #[test]
    fn vertex_failure_reports_vertex_stage() {
        let gpu = Rc::new(HeadlessBackend::new());
        let err = ShaderProgram::from_source(gpu.clone(), "void main() {", MINIMAL_FRAGMENT)
            .unwrap_err();
        assert!(matches!(
            err,
            RenderError::ShaderCompile {
                stage: ShaderStage::Vertex,
                ..
            }
        ));
        assert_eq!(gpu.live_resources(), 0);
    }

    #[test]
    fn failed_reload_leaves_program_unlinked() {
        let gpu = Rc::new(HeadlessBackend::new());
        let mut shader = ShaderProgram::from_source(gpu.clone(), MINIMAL_VERTEX, MINIMAL_FRAGMENT).unwrap();
        assert_eq!(gpu.live_programs(), 1);

        assert!(shader.load_from_source(MINIMAL_VERTEX, "").is_err());
        assert!(!shader.is_linked());
        assert_eq!(gpu.live_programs(), 0);
        assert!(shader.uniform_location("model").is_none());

        // Binding an unlinked program unbinds.
        gpu.take_commands();
        shader.use_program();
        assert_eq!(gpu.take_commands(), vec![Command::UseProgram(None)]);
    }

    #[test]
    fn drop_releases_program() {
        let gpu = Rc::new(HeadlessBackend::new());
        let shader = ShaderProgram::from_source(gpu.clone(), MINIMAL_VERTEX, MINIMAL_FRAGMENT).unwrap();
        let moved = shader;
        drop(moved);
        assert_eq!(gpu.live_resources(), 0);
        assert_eq!(gpu.invalid_releases(), 0);
    }
}
