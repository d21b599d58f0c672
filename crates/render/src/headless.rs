//! GPU-less backend that records every call.
//!
//! Used by tests and the command-line simulator. Shader sources get a light
//! GLSL check (non-empty, balanced braces, a `main` entry point) and their
//! `uniform` declarations are scanned so that uniform lookups behave like a
//! real driver: declared names resolve, everything else is `None`.

use std::cell::RefCell;
use std::collections::{BTreeMap, BTreeSet};
use std::num::NonZeroU32;

use crate::backend::{GpuBackend, ShaderStage, UniformValue};
use crate::error::Result;
use crate::vertex::VertexAttribute;

/// Non-zero handle issued by [`HeadlessBackend`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Handle(NonZeroU32);

impl Handle {
    pub fn get(self) -> u32 {
        self.0.get()
    }
}

/// Uniform location: the program it belongs to plus the uniform name.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct UniformSlot {
    program: Handle,
    name: String,
}

/// One recorded backend call that affects rendering output.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    UploadVertices {
        bytes: usize,
        stride: i32,
        attributes: usize,
    },
    UploadIndices {
        count: usize,
    },
    UseProgram(Option<Handle>),
    SetUniform {
        program: Handle,
        name: String,
        value: UniformValue,
    },
    DrawIndexed {
        program: Option<Handle>,
        index_count: u32,
    },
    Viewport {
        width: u32,
        height: u32,
    },
    ClearColor([f32; 4]),
    Clear,
    DepthTest(bool),
    Blending(bool),
}

#[derive(Debug)]
struct ShaderRecord {
    stage: ShaderStage,
    compiled: bool,
    uniforms: BTreeSet<String>,
}

#[derive(Debug, Default)]
struct ProgramRecord {
    attached: BTreeSet<Handle>,
    linked: bool,
    uniforms: BTreeSet<String>,
}

#[derive(Debug, Default)]
struct State {
    last_handle: u32,
    buffers: BTreeSet<Handle>,
    vertex_arrays: BTreeSet<Handle>,
    shaders: BTreeMap<Handle, ShaderRecord>,
    programs: BTreeMap<Handle, ProgramRecord>,
    bound_program: Option<Handle>,
    invalid_releases: usize,
    commands: Vec<Command>,
}

/// Recording backend with no GPU behind it.
#[derive(Debug, Default)]
pub struct HeadlessBackend {
    state: RefCell<State>,
}

impl HeadlessBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the recorded commands.
    pub fn commands(&self) -> Vec<Command> {
        self.state.borrow().commands.clone()
    }

    /// Drain the recorded commands.
    pub fn take_commands(&self) -> Vec<Command> {
        std::mem::take(&mut self.state.borrow_mut().commands)
    }

    /// Draw calls recorded since the last drain.
    pub fn draw_count(&self) -> usize {
        self.state
            .borrow()
            .commands
            .iter()
            .filter(|c| matches!(c, Command::DrawIndexed { .. }))
            .count()
    }

    pub fn bound_program(&self) -> Option<Handle> {
        self.state.borrow().bound_program
    }

    pub fn live_buffers(&self) -> usize {
        self.state.borrow().buffers.len()
    }

    pub fn live_vertex_arrays(&self) -> usize {
        self.state.borrow().vertex_arrays.len()
    }

    pub fn live_shaders(&self) -> usize {
        self.state.borrow().shaders.len()
    }

    pub fn live_programs(&self) -> usize {
        self.state.borrow().programs.len()
    }

    /// Every handle not yet deleted.
    pub fn live_resources(&self) -> usize {
        let state = self.state.borrow();
        state.buffers.len() + state.vertex_arrays.len() + state.shaders.len() + state.programs.len()
    }

    /// Deletions of handles that were never issued or already deleted.
    pub fn invalid_releases(&self) -> usize {
        self.state.borrow().invalid_releases
    }

    fn issue(&self) -> Handle {
        let mut state = self.state.borrow_mut();
        state.last_handle = state.last_handle.saturating_add(1);
        Handle(NonZeroU32::new(state.last_handle).unwrap_or(NonZeroU32::MAX))
    }

    fn record(&self, command: Command) {
        self.state.borrow_mut().commands.push(command);
    }
}

impl GpuBackend for HeadlessBackend {
    type Buffer = Handle;
    type VertexArray = Handle;
    type Shader = Handle;
    type Program = Handle;
    type UniformLocation = UniformSlot;

    fn create_vertex_array(&self) -> Result<Handle> {
        let handle = self.issue();
        self.state.borrow_mut().vertex_arrays.insert(handle);
        Ok(handle)
    }

    fn create_buffer(&self) -> Result<Handle> {
        let handle = self.issue();
        self.state.borrow_mut().buffers.insert(handle);
        Ok(handle)
    }

    fn delete_vertex_array(&self, vertex_array: Handle) {
        let mut state = self.state.borrow_mut();
        if !state.vertex_arrays.remove(&vertex_array) {
            state.invalid_releases += 1;
        }
    }

    fn delete_buffer(&self, buffer: Handle) {
        let mut state = self.state.borrow_mut();
        if !state.buffers.remove(&buffer) {
            state.invalid_releases += 1;
        }
    }

    fn upload_vertices(
        &self,
        _vertex_array: Handle,
        _buffer: Handle,
        data: &[u8],
        stride: i32,
        attributes: &[VertexAttribute],
    ) {
        self.record(Command::UploadVertices {
            bytes: data.len(),
            stride,
            attributes: attributes.len(),
        });
    }

    fn upload_indices(&self, _vertex_array: Handle, _buffer: Handle, indices: &[u32]) {
        self.record(Command::UploadIndices {
            count: indices.len(),
        });
    }

    fn create_shader(&self, stage: ShaderStage) -> Result<Handle> {
        let handle = self.issue();
        self.state.borrow_mut().shaders.insert(
            handle,
            ShaderRecord {
                stage,
                compiled: false,
                uniforms: BTreeSet::new(),
            },
        );
        Ok(handle)
    }

    fn compile_shader(&self, shader: Handle, source: &str) -> std::result::Result<(), String> {
        let checked = check_glsl(source);
        let mut state = self.state.borrow_mut();
        let record = state
            .shaders
            .get_mut(&shader)
            .ok_or_else(|| format!("ERROR: invalid shader handle {}", shader.get()))?;
        let uniforms = checked?;
        record.compiled = true;
        record.uniforms = uniforms;
        Ok(())
    }

    fn delete_shader(&self, shader: Handle) {
        let mut state = self.state.borrow_mut();
        if state.shaders.remove(&shader).is_none() {
            state.invalid_releases += 1;
        }
    }

    fn create_program(&self) -> Result<Handle> {
        let handle = self.issue();
        self.state
            .borrow_mut()
            .programs
            .insert(handle, ProgramRecord::default());
        Ok(handle)
    }

    fn attach_shader(&self, program: Handle, shader: Handle) {
        if let Some(record) = self.state.borrow_mut().programs.get_mut(&program) {
            record.attached.insert(shader);
        }
    }

    fn detach_shader(&self, program: Handle, shader: Handle) {
        if let Some(record) = self.state.borrow_mut().programs.get_mut(&program) {
            record.attached.remove(&shader);
        }
    }

    fn link_program(&self, program: Handle) -> std::result::Result<(), String> {
        let mut state = self.state.borrow_mut();
        let State {
            shaders, programs, ..
        } = &mut *state;
        let record = programs
            .get_mut(&program)
            .ok_or_else(|| format!("error: invalid program handle {}", program.get()))?;

        let mut stages = BTreeSet::new();
        let mut uniforms = BTreeSet::new();
        for handle in &record.attached {
            let shader = shaders
                .get(handle)
                .ok_or_else(|| format!("error: attached shader {} was deleted", handle.get()))?;
            if !shader.compiled {
                return Err(format!("error: {} shader {} is not compiled", shader.stage, handle.get()));
            }
            stages.insert(shader.stage == ShaderStage::Vertex);
            uniforms.extend(shader.uniforms.iter().cloned());
        }
        if stages.len() != 2 {
            return Err("error: program needs both a vertex and a fragment stage".to_owned());
        }

        record.linked = true;
        record.uniforms = uniforms;
        Ok(())
    }

    fn delete_program(&self, program: Handle) {
        let mut state = self.state.borrow_mut();
        if state.programs.remove(&program).is_none() {
            state.invalid_releases += 1;
        }
        if state.bound_program == Some(program) {
            state.bound_program = None;
        }
    }

    fn use_program(&self, program: Option<Handle>) {
        let mut state = self.state.borrow_mut();
        state.bound_program = program;
        state.commands.push(Command::UseProgram(program));
    }

    fn uniform_location(&self, program: Handle, name: &str) -> Option<UniformSlot> {
        let state = self.state.borrow();
        let record = state.programs.get(&program)?;
        (record.linked && record.uniforms.contains(name)).then(|| UniformSlot {
            program,
            name: name.to_owned(),
        })
    }

    fn set_uniform(&self, location: &UniformSlot, value: &UniformValue) {
        let mut state = self.state.borrow_mut();
        if state.bound_program != Some(location.program) {
            tracing::warn!(uniform = %location.name, "uniform set on a program that is not bound");
        }
        state.commands.push(Command::SetUniform {
            program: location.program,
            name: location.name.clone(),
            value: *value,
        });
    }

    fn draw_indexed_triangles(&self, _vertex_array: Handle, index_count: u32) {
        let mut state = self.state.borrow_mut();
        let program = state.bound_program;
        state.commands.push(Command::DrawIndexed {
            program,
            index_count,
        });
    }

    fn set_viewport(&self, width: u32, height: u32) {
        self.record(Command::Viewport { width, height });
    }

    fn set_clear_color(&self, color: [f32; 4]) {
        self.record(Command::ClearColor(color));
    }

    fn clear(&self) {
        self.record(Command::Clear);
    }

    fn set_depth_test(&self, enabled: bool) {
        self.record(Command::DepthTest(enabled));
    }

    fn set_blending(&self, enabled: bool) {
        self.record(Command::Blending(enabled));
    }
}

/// Validate a GLSL source well enough to catch broken programs and return the
/// uniform names it declares.
fn check_glsl(source: &str) -> std::result::Result<BTreeSet<String>, String> {
    if source.trim().is_empty() {
        return Err("ERROR: 0:1: '' : empty shader source".to_owned());
    }

    let mut depth = 0i32;
    let mut uniforms = BTreeSet::new();
    for (number, raw) in source.lines().enumerate() {
        let line = raw.split("//").next().unwrap_or_default().trim();
        for ch in line.chars() {
            match ch {
                '{' => depth += 1,
                '}' => depth -= 1,
                _ => {}
            }
            if depth < 0 {
                return Err(format!("ERROR: 0:{}: '}}' : syntax error", number + 1));
            }
        }
        if let Some(declaration) = line.strip_prefix("uniform ") {
            let declaration = declaration
                .strip_suffix(';')
                .ok_or_else(|| format!("ERROR: 0:{}: syntax error, expected ';'", number + 1))?;
            uniforms.extend(uniform_names(declaration));
        }
    }
    if depth != 0 {
        return Err("ERROR: 0:0: '' : syntax error, unexpected end of file".to_owned());
    }
    if !source.contains("void main") {
        return Err("ERROR: 0:0: 'main' : function not defined".to_owned());
    }
    Ok(uniforms)
}

/// Names in `[precision] <type> a, b[4], c = 1.0`.
fn uniform_names(declaration: &str) -> Vec<String> {
    let mut tokens = declaration.trim().splitn(2, char::is_whitespace);
    let mut ty = tokens.next().unwrap_or_default();
    let mut rest = tokens.next().unwrap_or_default().trim();
    if matches!(ty, "lowp" | "mediump" | "highp") {
        let mut inner = rest.splitn(2, char::is_whitespace);
        ty = inner.next().unwrap_or_default();
        rest = inner.next().unwrap_or_default().trim();
    }
    if ty.is_empty() {
        return Vec::new();
    }
    rest.split(',')
        .filter_map(|part| {
            let name = part.split(['[', '=']).next().unwrap_or_default().trim();
            (!name.is_empty()).then(|| name.to_owned())
        })
        .collect()
}
