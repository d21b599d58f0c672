use glow::HasContext;
use glowfield_render::{GpuBackend, RenderError, Result, ShaderStage, UniformValue, VertexAttribute};

/// [`GpuBackend`] over a `glow` OpenGL context.
///
/// All calls assume the context is current on this thread, which
/// [`RenderWindow`](crate::RenderWindow) guarantees for its lifetime.
pub struct GlBackend {
    gl: glow::Context,
}

impl GlBackend {
    pub fn new(gl: glow::Context) -> Self {
        // SAFETY: the context is current; querying strings has no side effects.
        let (version, renderer) = unsafe {
            (
                gl.get_parameter_string(glow::VERSION),
                gl.get_parameter_string(glow::RENDERER),
            )
        };
        tracing::info!(%version, %renderer, "OpenGL backend ready");
        Self { gl }
    }

    pub fn context(&self) -> &glow::Context {
        &self.gl
    }
}

fn stage_kind(stage: ShaderStage) -> u32 {
    match stage {
        ShaderStage::Vertex => glow::VERTEX_SHADER,
        ShaderStage::Fragment => glow::FRAGMENT_SHADER,
    }
}

// SAFETY (all blocks below): the context is current on this thread and every
// handle passed in was created by this context.
impl GpuBackend for GlBackend {
    type Buffer = glow::Buffer;
    type VertexArray = glow::VertexArray;
    type Shader = glow::Shader;
    type Program = glow::Program;
    type UniformLocation = glow::UniformLocation;

    fn create_vertex_array(&self) -> Result<glow::VertexArray> {
        unsafe { self.gl.create_vertex_array() }.map_err(RenderError::Backend)
    }

    fn create_buffer(&self) -> Result<glow::Buffer> {
        unsafe { self.gl.create_buffer() }.map_err(RenderError::Backend)
    }

    fn delete_vertex_array(&self, vertex_array: glow::VertexArray) {
        unsafe { self.gl.delete_vertex_array(vertex_array) }
    }

    fn delete_buffer(&self, buffer: glow::Buffer) {
        unsafe { self.gl.delete_buffer(buffer) }
    }

    fn upload_vertices(
        &self,
        vertex_array: glow::VertexArray,
        buffer: glow::Buffer,
        data: &[u8],
        stride: i32,
        attributes: &[VertexAttribute],
    ) {
        let gl = &self.gl;
        unsafe {
            gl.bind_vertex_array(Some(vertex_array));
            gl.bind_buffer(glow::ARRAY_BUFFER, Some(buffer));
            gl.buffer_data_u8_slice(glow::ARRAY_BUFFER, data, glow::STATIC_DRAW);
            for attribute in attributes {
                gl.enable_vertex_attrib_array(attribute.location);
                gl.vertex_attrib_pointer_f32(
                    attribute.location,
                    attribute.components,
                    glow::FLOAT,
                    false,
                    stride,
                    attribute.offset,
                );
            }
            gl.bind_vertex_array(None);
            gl.bind_buffer(glow::ARRAY_BUFFER, None);
        }
    }

    fn upload_indices(&self, vertex_array: glow::VertexArray, buffer: glow::Buffer, indices: &[u32]) {
        let gl = &self.gl;
        unsafe {
            // Element binding is vertex-array state: leave the buffer bound.
            gl.bind_vertex_array(Some(vertex_array));
            gl.bind_buffer(glow::ELEMENT_ARRAY_BUFFER, Some(buffer));
            gl.buffer_data_u8_slice(
                glow::ELEMENT_ARRAY_BUFFER,
                bytemuck::cast_slice(indices),
                glow::STATIC_DRAW,
            );
            gl.bind_vertex_array(None);
        }
    }

    fn create_shader(&self, stage: ShaderStage) -> Result<glow::Shader> {
        unsafe { self.gl.create_shader(stage_kind(stage)) }.map_err(RenderError::Backend)
    }

    fn compile_shader(&self, shader: glow::Shader, source: &str) -> std::result::Result<(), String> {
        let gl = &self.gl;
        unsafe {
            gl.shader_source(shader, source);
            gl.compile_shader(shader);
            if gl.get_shader_compile_status(shader) {
                Ok(())
            } else {
                Err(gl.get_shader_info_log(shader))
            }
        }
    }

    fn delete_shader(&self, shader: glow::Shader) {
        unsafe { self.gl.delete_shader(shader) }
    }

    fn create_program(&self) -> Result<glow::Program> {
        unsafe { self.gl.create_program() }.map_err(RenderError::Backend)
    }

    fn attach_shader(&self, program: glow::Program, shader: glow::Shader) {
        unsafe { self.gl.attach_shader(program, shader) }
    }

    fn detach_shader(&self, program: glow::Program, shader: glow::Shader) {
        unsafe { self.gl.detach_shader(program, shader) }
    }

    fn link_program(&self, program: glow::Program) -> std::result::Result<(), String> {
        let gl = &self.gl;
        unsafe {
            gl.link_program(program);
            if gl.get_program_link_status(program) {
                Ok(())
            } else {
                Err(gl.get_program_info_log(program))
            }
        }
    }

    fn delete_program(&self, program: glow::Program) {
        unsafe { self.gl.delete_program(program) }
    }

    fn use_program(&self, program: Option<glow::Program>) {
        unsafe { self.gl.use_program(program) }
    }

    fn uniform_location(&self, program: glow::Program, name: &str) -> Option<glow::UniformLocation> {
        unsafe { self.gl.get_uniform_location(program, name) }
    }

    fn set_uniform(&self, location: &glow::UniformLocation, value: &UniformValue) {
        let gl = &self.gl;
        let location = Some(location);
        unsafe {
            match *value {
                UniformValue::Bool(v) => gl.uniform_1_i32(location, v as i32),
                UniformValue::Int(v) => gl.uniform_1_i32(location, v),
                UniformValue::Float(v) => gl.uniform_1_f32(location, v),
                UniformValue::Vec2(v) => gl.uniform_2_f32(location, v.x, v.y),
                UniformValue::Vec3(v) => gl.uniform_3_f32(location, v.x, v.y, v.z),
                UniformValue::Vec4(v) => gl.uniform_4_f32(location, v.x, v.y, v.z, v.w),
                UniformValue::Mat2(m) => gl.uniform_matrix_2_f32_slice(location, false, &m.to_cols_array()),
                UniformValue::Mat3(m) => gl.uniform_matrix_3_f32_slice(location, false, &m.to_cols_array()),
                UniformValue::Mat4(m) => gl.uniform_matrix_4_f32_slice(location, false, &m.to_cols_array()),
            }
        }
    }

    fn draw_indexed_triangles(&self, vertex_array: glow::VertexArray, index_count: u32) {
        let gl = &self.gl;
        unsafe {
            gl.bind_vertex_array(Some(vertex_array));
            gl.draw_elements(glow::TRIANGLES, index_count as i32, glow::UNSIGNED_INT, 0);
            gl.bind_vertex_array(None);
        }
    }

    fn set_viewport(&self, width: u32, height: u32) {
        unsafe { self.gl.viewport(0, 0, width as i32, height as i32) }
    }

    fn set_clear_color(&self, [r, g, b, a]: [f32; 4]) {
        unsafe { self.gl.clear_color(r, g, b, a) }
    }

    fn clear(&self) {
        unsafe { self.gl.clear(glow::COLOR_BUFFER_BIT | glow::DEPTH_BUFFER_BIT) }
    }

    fn set_depth_test(&self, enabled: bool) {
        unsafe {
            if enabled {
                self.gl.enable(glow::DEPTH_TEST);
            } else {
                self.gl.disable(glow::DEPTH_TEST);
            }
        }
    }

    fn set_blending(&self, enabled: bool) {
        unsafe {
            if enabled {
                self.gl.enable(glow::BLEND);
                self.gl.blend_func(glow::SRC_ALPHA, glow::ONE_MINUS_SRC_ALPHA);
            } else {
                self.gl.disable(glow::BLEND);
            }
        }
    }
}
