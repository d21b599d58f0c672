use std::rc::Rc;

use glam::{Mat4, Vec3};

use crate::backend::GpuBackend;
use crate::error::Result;
use crate::mesh::Mesh;
use crate::model::Model;
use crate::shader::ShaderProgram;
use crate::shaders;

pub const LIGHT_POSITION: Vec3 = Vec3::new(5.0, 10.0, 5.0);
pub const LIGHT_COLOR: Vec3 = Vec3::ONE;
pub const CLEAR_COLOR: [f32; 4] = [0.1, 0.1, 0.15, 1.0];

/// Per-draw material inputs sent next to the camera and light uniforms.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DrawParams {
    pub object_color: Vec3,
    pub shininess: f32,
    /// Seconds of game time, for animated shaders.
    pub time: f32,
}

impl Default for DrawParams {
    fn default() -> Self {
        Self {
            object_color: Vec3::splat(0.8),
            shininess: 32.0,
            time: 0.0,
        }
    }
}

/// Work submitted between [`Renderer::begin_frame`] and [`Renderer::end_frame`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameStats {
    pub draw_calls: u32,
    pub triangles: u32,
}

/// Draw façade over a [`GpuBackend`].
///
/// The caller sets view, projection and eye position once per frame. Every
/// draw then binds its program and re-sends all uniforms it needs; nothing is
/// cached between draws.
pub struct Renderer<B: GpuBackend> {
    gpu: Rc<B>,
    default_shader: ShaderProgram<B>,
    view: Mat4,
    projection: Mat4,
    view_position: Vec3,
    stats: FrameStats,
}

impl<B: GpuBackend> Renderer<B> {
    /// Build the default lit program, enable depth testing and set the clear
    /// color.
    pub fn new(gpu: Rc<B>) -> Result<Self> {
        let default_shader =
            ShaderProgram::from_source(Rc::clone(&gpu), shaders::LIT_VERTEX, shaders::DEFAULT_FRAGMENT)?;
        gpu.set_depth_test(true);
        gpu.set_clear_color(CLEAR_COLOR);

        Ok(Self {
            gpu,
            default_shader,
            view: Mat4::IDENTITY,
            projection: Mat4::IDENTITY,
            view_position: Vec3::ZERO,
            stats: FrameStats::default(),
        })
    }

    pub fn gpu(&self) -> &Rc<B> {
        &self.gpu
    }

    pub fn default_shader(&self) -> &ShaderProgram<B> {
        &self.default_shader
    }

    /// Set the viewport, clear color and depth, and reset frame statistics.
    pub fn begin_frame(&mut self, width: u32, height: u32) {
        self.gpu.set_viewport(width, height);
        self.gpu.clear();
        self.stats = FrameStats::default();
    }

    pub fn end_frame(&mut self) -> FrameStats {
        self.stats
    }

    pub fn set_view_matrix(&mut self, view: Mat4) {
        self.view = view;
    }

    pub fn set_projection_matrix(&mut self, projection: Mat4) {
        self.projection = projection;
    }

    pub fn set_view_position(&mut self, position: Vec3) {
        self.view_position = position;
    }

    /// Draw one mesh with the default program.
    pub fn draw_mesh(&mut self, mesh: &Mesh<B>, model: Mat4) {
        self.bind(&self.default_shader, model, &DrawParams::default());
        mesh.draw();
        self.stats.draw_calls += 1;
        self.stats.triangles += mesh.triangle_count();
    }

    /// Draw every mesh of `model` with the default program.
    pub fn draw_model(&mut self, model: &Model<B>, matrix: Mat4) {
        self.bind(&self.default_shader, matrix, &DrawParams::default());
        model.draw();
        self.count(model);
    }

    /// Draw `model` with a caller-supplied program and material inputs.
    pub fn draw_model_with(
        &mut self,
        model: &Model<B>,
        shader: &ShaderProgram<B>,
        matrix: Mat4,
        params: &DrawParams,
    ) {
        self.bind(shader, matrix, params);
        model.draw();
        self.count(model);
    }

    pub fn enable_depth_test(&self, enabled: bool) {
        self.gpu.set_depth_test(enabled);
    }

    pub fn enable_blending(&self, enabled: bool) {
        self.gpu.set_blending(enabled);
    }

    pub fn set_clear_color(&self, color: [f32; 4]) {
        self.gpu.set_clear_color(color);
    }

    fn bind(&self, shader: &ShaderProgram<B>, model: Mat4, params: &DrawParams) {
        shader.use_program();
        shader.set_mat4("model", model);
        shader.set_mat4("view", self.view);
        shader.set_mat4("projection", self.projection);
        shader.set_vec3("viewPos", self.view_position);
        shader.set_vec3("lightPos", LIGHT_POSITION);
        shader.set_vec3("lightColor", LIGHT_COLOR);
        shader.set_float("shininess", params.shininess);
        shader.set_vec3("objectColor", params.object_color);
        shader.set_float("time", params.time);
    }

    fn count(&mut self, model: &Model<B>) {
        self.stats.draw_calls += model.mesh_count() as u32;
        self.stats.triangles += model.triangle_count();
    }
}
