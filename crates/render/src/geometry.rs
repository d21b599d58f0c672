//! Procedural primitives built on the CPU before upload.
//!
//! All generators wind front faces counter-clockwise when seen from outside
//! and are centred on the origin.

use std::f32::consts::PI;

use glam::{Vec2, Vec3};

use crate::vertex::Vertex;

pub const DEFAULT_SPHERE_SEGMENTS: u32 = 32;

/// CPU-side triangle list: vertices plus `u32` indices, three per triangle.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MeshData {
    pub vertices: Vec<Vertex>,
    pub indices: Vec<u32>,
}

impl MeshData {
    pub fn new(vertices: Vec<Vertex>, indices: Vec<u32>) -> Self {
        Self { vertices, indices }
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Whether every index addresses a vertex and indices form whole triangles.
    pub fn is_well_formed(&self) -> bool {
        let count = self.vertices.len();
        self.indices.len() % 3 == 0 && self.indices.iter().all(|&i| (i as usize) < count)
    }

    /// Flat square on the XZ plane facing +Y, spanning `±size / 2`.
    pub fn plane(size: f32) -> Self {
        let h = size / 2.0;
        let v = |x: f32, z: f32, u: f32, w: f32| Vertex::new(Vec3::new(x, 0.0, z), Vec3::Y, Vec2::new(u, w));

        let vertices = vec![
            v(-h, -h, 0.0, 0.0),
            v(h, -h, 1.0, 0.0),
            v(h, h, 1.0, 1.0),
            v(-h, h, 0.0, 1.0),
        ];
        let indices = vec![0, 3, 2, 2, 1, 0];

        Self { vertices, indices }
    }

    /// Unit cube with four unshared vertices per face so every face keeps a
    /// flat normal.
    pub fn cube() -> Self {
        // (normal, corners counter-clockwise from outside, texture coordinates)
        #[rustfmt::skip]
        let faces: [(Vec3, [[f32; 3]; 4], [[f32; 2]; 4]); 6] = [
            // front (+Z)
            (Vec3::Z,
             [[-0.5, -0.5,  0.5], [ 0.5, -0.5,  0.5], [ 0.5,  0.5,  0.5], [-0.5,  0.5,  0.5]],
             [[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 1.0]]),
            // back (-Z)
            (Vec3::NEG_Z,
             [[ 0.5, -0.5, -0.5], [-0.5, -0.5, -0.5], [-0.5,  0.5, -0.5], [ 0.5,  0.5, -0.5]],
             [[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 1.0]]),
            // top (+Y)
            (Vec3::Y,
             [[-0.5,  0.5,  0.5], [ 0.5,  0.5,  0.5], [ 0.5,  0.5, -0.5], [-0.5,  0.5, -0.5]],
             [[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 1.0]]),
            // bottom (-Y)
            (Vec3::NEG_Y,
             [[-0.5, -0.5, -0.5], [ 0.5, -0.5, -0.5], [ 0.5, -0.5,  0.5], [-0.5, -0.5,  0.5]],
             [[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 1.0]]),
            // right (+X)
            (Vec3::X,
             [[ 0.5, -0.5,  0.5], [ 0.5, -0.5, -0.5], [ 0.5,  0.5, -0.5], [ 0.5,  0.5,  0.5]],
             [[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 1.0]]),
            // left (-X)
            (Vec3::NEG_X,
             [[-0.5, -0.5, -0.5], [-0.5, -0.5,  0.5], [-0.5,  0.5,  0.5], [-0.5,  0.5, -0.5]],
             [[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 1.0]]),
        ];

        let mut vertices = Vec::with_capacity(24);
        let mut indices = Vec::with_capacity(36);
        for (normal, corners, uvs) in faces {
            let base = vertices.len() as u32;
            for (corner, uv) in corners.iter().zip(uvs.iter()) {
                vertices.push(Vertex::new(Vec3::from_array(*corner), normal, Vec2::from_array(*uv)));
            }
            indices.extend_from_slice(&[base, base + 1, base + 2, base + 2, base + 3, base]);
        }

        Self { vertices, indices }
    }

    /// UV sphere of radius 0.5 with `(segments + 1)²` vertices and
    /// `segments² · 6` indices.
    ///
    /// `segments` is clamped to at least 1, so `sphere(0)` equals `sphere(1)`.
    /// The first and last rows collapse onto the poles, so the cap triangles
    /// are degenerate.
    pub fn sphere(segments: u32) -> Self {
        let segments = segments.max(1);
        let row = segments + 1;

        let mut vertices = Vec::with_capacity((row * row) as usize);
        for y in 0..=segments {
            for x in 0..=segments {
                let xs = x as f32 / segments as f32;
                let ys = y as f32 / segments as f32;
                let (lon, colat) = (xs * 2.0 * PI, ys * PI);
                let position = Vec3::new(lon.cos() * colat.sin(), colat.cos(), lon.sin() * colat.sin()) * 0.5;
                vertices.push(Vertex::new(position, position.normalize(), Vec2::new(xs, ys)));
            }
        }

        let mut indices = Vec::with_capacity((segments * segments * 6) as usize);
        for y in 0..segments {
            for x in 0..segments {
                let first = y * row + x;
                let second = first + row;
                indices.extend_from_slice(&[first, first + 1, second, second, first + 1, second + 1]);
            }
        }

        Self { vertices, indices }
    }
}
