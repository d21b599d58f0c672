use std::fmt;
use std::rc::Rc;

use crate::backend::GpuBackend;
use crate::error::Result;
use crate::geometry::MeshData;
use crate::mesh::Mesh;
use crate::shader::ShaderProgram;

/// Ordered collection of shared meshes drawn together.
///
/// A model carries no transform; the caller supplies the model matrix when
/// drawing through the [`Renderer`](crate::Renderer).
pub struct Model<B: GpuBackend> {
    meshes: Vec<Rc<Mesh<B>>>,
}

impl<B: GpuBackend> Model<B> {
    pub fn new() -> Self {
        Self { meshes: Vec::new() }
    }

    /// Model holding a single mesh uploaded from `data`.
    pub fn from_data(gpu: &Rc<B>, data: MeshData) -> Result<Self> {
        let mut model = Self::new();
        model.add_mesh(Rc::new(Mesh::new(Rc::clone(gpu), data)?));
        Ok(model)
    }

    pub fn plane(gpu: &Rc<B>, size: f32) -> Result<Self> {
        Self::from_data(gpu, MeshData::plane(size))
    }

    pub fn cube(gpu: &Rc<B>) -> Result<Self> {
        Self::from_data(gpu, MeshData::cube())
    }

    pub fn sphere(gpu: &Rc<B>, segments: u32) -> Result<Self> {
        Self::from_data(gpu, MeshData::sphere(segments))
    }

    pub fn add_mesh(&mut self, mesh: Rc<Mesh<B>>) {
        self.meshes.push(mesh);
    }

    pub fn meshes(&self) -> &[Rc<Mesh<B>>] {
        &self.meshes
    }

    pub fn mesh_count(&self) -> usize {
        self.meshes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.meshes.is_empty()
    }

    pub fn triangle_count(&self) -> u32 {
        self.meshes.iter().map(|m| m.triangle_count()).sum()
    }

    /// Draw every mesh in order with the currently bound program.
    pub fn draw(&self) {
        for mesh in &self.meshes {
            mesh.draw();
        }
    }

    /// Bind `shader`, then draw every mesh with it.
    pub fn draw_with(&self, shader: &ShaderProgram<B>) {
        shader.use_program();
        self.draw();
    }
}

impl<B: GpuBackend> Default for Model<B> {
    fn default() -> Self {
        Self::new()
    }
}

impl<B: GpuBackend> fmt::Debug for Model<B> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Model").field("meshes", &self.meshes).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::headless::{Command, HeadlessBackend};
    use crate::shaders;

    #[test]
    fn factories_wrap_one_mesh() {
        let gpu = Rc::new(HeadlessBackend::new());
        assert_eq!(Model::plane(&gpu, 20.0).unwrap().triangle_count(), 2);
        assert_eq!(Model::cube(&gpu).unwrap().triangle_count(), 12);
        let sphere = Model::sphere(&gpu, 16).unwrap();
        assert_eq!(sphere.mesh_count(), 1);
        assert_eq!(sphere.triangle_count(), 16 * 16 * 2);
    }

    #[test]
    fn shared_mesh_is_released_once() {
        let gpu = Rc::new(HeadlessBackend::new());
        let mesh = Rc::new(Mesh::new(gpu.clone(), MeshData::cube()).unwrap());
        let mut a = Model::new();
        let mut b = Model::new();
        a.add_mesh(Rc::clone(&mesh));
        b.add_mesh(Rc::clone(&mesh));
        b.add_mesh(mesh);

        drop(a);
        assert_eq!(gpu.live_resources(), 3);
        drop(b);
        assert_eq!(gpu.live_resources(), 0);
        assert_eq!(gpu.invalid_releases(), 0);
    }

    #[test]
    fn draw_with_binds_given_program() {
        let gpu = Rc::new(HeadlessBackend::new());
        let model = Model::cube(&gpu).unwrap();
        let shader =
            ShaderProgram::from_source(gpu.clone(), shaders::LIT_VERTEX, shaders::GROUND_FRAGMENT)
                .unwrap();
        gpu.take_commands();

        model.draw_with(&shader);
        assert_eq!(
            gpu.take_commands(),
            vec![
                Command::UseProgram(shader.handle()),
                Command::DrawIndexed {
                    program: shader.handle(),
                    index_count: 36,
                },
            ]
        );
    }
}
