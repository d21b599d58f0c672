use bytemuck::{Pod, Zeroable};
use glam::{Vec2, Vec3};

/// One float attribute inside an interleaved vertex.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VertexAttribute {
    /// Shader input location.
    pub location: u32,
    /// Number of `f32` components.
    pub components: i32,
    /// Byte offset from the start of the vertex.
    pub offset: i32,
}

/// Interleaved vertex: position, normal, texture coordinate.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
    pub tex_coords: [f32; 2],
}

impl Vertex {
    pub const STRIDE: i32 = std::mem::size_of::<Vertex>() as i32;

    /// Fixed layout: location 0 position, 1 normal, 2 texture coordinate.
    pub const ATTRIBUTES: [VertexAttribute; 3] = [
        VertexAttribute {
            location: 0,
            components: 3,
            offset: 0,
        },
        VertexAttribute {
            location: 1,
            components: 3,
            offset: 12,
        },
        VertexAttribute {
            location: 2,
            components: 2,
            offset: 24,
        },
    ];

    pub fn new(position: Vec3, normal: Vec3, tex_coords: Vec2) -> Self {
        Self {
            position: position.to_array(),
            normal: normal.to_array(),
            tex_coords: tex_coords.to_array(),
        }
    }

    pub fn position(&self) -> Vec3 {
        Vec3::from_array(self.position)
    }

    pub fn normal(&self) -> Vec3 {
        Vec3::from_array(self.normal)
    }

    pub fn tex_coords(&self) -> Vec2 {
        Vec2::from_array(self.tex_coords)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn layout_is_tightly_packed() {
        assert_eq!(Vertex::STRIDE, 32);
        assert_eq!(std::mem::offset_of!(Vertex, normal) as i32, Vertex::ATTRIBUTES[1].offset);
        assert_eq!(
            std::mem::offset_of!(Vertex, tex_coords) as i32,
            Vertex::ATTRIBUTES[2].offset
        );
        let floats: i32 = Vertex::ATTRIBUTES.iter().map(|a| a.components).sum();
        assert_eq!(floats * 4, Vertex::STRIDE);
    }
}
