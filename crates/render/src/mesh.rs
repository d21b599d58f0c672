use std::fmt;
use std::rc::Rc;

use crate::backend::GpuBackend;
use crate::error::Result;
use crate::geometry::MeshData;
use crate::vertex::Vertex;

/// GPU-resident triangle list that exclusively owns its vertex array and
/// vertex/index buffers.
///
/// Handles are released when the mesh is dropped. The type is move-only, so a
/// handle can never be released twice; share a mesh through `Rc<Mesh<B>>`.
pub struct Mesh<B: GpuBackend> {
    gpu: Rc<B>,
    data: MeshData,
    vertex_array: B::VertexArray,
    vertex_buffer: B::Buffer,
    index_buffer: B::Buffer,
}

impl<B: GpuBackend> Mesh<B> {
    /// Upload `data` as static buffers with the fixed [`Vertex`] layout.
    ///
    /// Indices must address existing vertices in whole triangles; the
    /// procedural generators guarantee this.
    pub fn new(gpu: Rc<B>, data: MeshData) -> Result<Self> {
        debug_assert!(
            data.is_well_formed(),
            "mesh indices must form whole triangles over {} vertices",
            data.vertices.len()
        );

        let vertex_array = gpu.create_vertex_array()?;
        let vertex_buffer = match gpu.create_buffer() {
            Ok(buffer) => buffer,
            Err(e) => {
                gpu.delete_vertex_array(vertex_array);
                return Err(e);
            }
        };
        let index_buffer = match gpu.create_buffer() {
            Ok(buffer) => buffer,
            Err(e) => {
                gpu.delete_buffer(vertex_buffer);
                gpu.delete_vertex_array(vertex_array);
                return Err(e);
            }
        };

        gpu.upload_vertices(
            vertex_array,
            vertex_buffer,
            bytemuck::cast_slice(&data.vertices),
            Vertex::STRIDE,
            &Vertex::ATTRIBUTES,
        );
        gpu.upload_indices(vertex_array, index_buffer, &data.indices);

        tracing::debug!(
            vertices = data.vertices.len(),
            indices = data.indices.len(),
            "uploaded mesh"
        );

        Ok(Self {
            gpu,
            data,
            vertex_array,
            vertex_buffer,
            index_buffer,
        })
    }

    /// Issue one indexed triangle-list draw over the whole index buffer with
    /// whatever program is currently bound.
    pub fn draw(&self) {
        self.gpu
            .draw_indexed_triangles(self.vertex_array, self.index_count());
    }

    pub fn vertices(&self) -> &[Vertex] {
        &self.data.vertices
    }

    pub fn indices(&self) -> &[u32] {
        &self.data.indices
    }

    pub fn vertex_count(&self) -> usize {
        self.data.vertices.len()
    }

    pub fn index_count(&self) -> u32 {
        self.data.indices.len() as u32
    }

    pub fn triangle_count(&self) -> u32 {
        self.index_count() / 3
    }
}

impl<B: GpuBackend> Drop for Mesh<B> {
    fn drop(&mut self) {
        self.gpu.delete_buffer(self.index_buffer);
        self.gpu.delete_buffer(self.vertex_buffer);
        self.gpu.delete_vertex_array(self.vertex_array);
    }
}

impl<B: GpuBackend> fmt::Debug for Mesh<B> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Mesh")
            .field("vertex_array", &self.vertex_array)
            .field("vertices", &self.data.vertices.len())
            .field("indices", &self.data.indices.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::headless::{Command, HeadlessBackend};

    #[test]
    fn upload_records_static_layout() {
        let gpu = Rc::new(HeadlessBackend::new());
        let mesh = Mesh::new(gpu.clone(), MeshData::cube()).unwrap();
        assert_eq!(mesh.vertex_count(), 24);
        assert_eq!(mesh.index_count(), 36);

        let commands = gpu.take_commands();
        assert!(commands.contains(&Command::UploadVertices {
            bytes: 24 * 32,
            stride: 32,
            attributes: 3,
        }));
        assert!(commands.contains(&Command::UploadIndices { count: 36 }));
    }

    #[test]
    fn draw_covers_full_index_buffer() {
        let gpu = Rc::new(HeadlessBackend::new());
        let mesh = Mesh::new(gpu.clone(), MeshData::sphere(8)).unwrap();
        gpu.take_commands();
        mesh.draw();
        assert_eq!(
            gpu.take_commands(),
            vec![Command::DrawIndexed {
                program: None,
                index_count: 8 * 8 * 6,
            }]
        );
    }

    #[test]
    fn drop_releases_every_handle() {
        let gpu = Rc::new(HeadlessBackend::new());
        let mesh = Mesh::new(gpu.clone(), MeshData::plane(2.0)).unwrap();
        assert_eq!(gpu.live_buffers(), 2);
        assert_eq!(gpu.live_vertex_arrays(), 1);

        // Moving transfers ownership; only the final owner releases.
        let moved = mesh;
        assert_eq!(gpu.live_resources(), 3);
        drop(moved);
        assert_eq!(gpu.live_resources(), 0);
    }
}
