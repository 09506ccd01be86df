//! Mesh geometry and GPU upload.
//!
//! Geometry is generated on the CPU as plain vertex/index vectors and only
//! then uploaded into GPU buffers, so the generators stay testable without a
//! device. Two shapes cover the whole scene: UV spheres for every celestial
//! body and a box for the spacecraft.
//!
//! # Vertex layout
//!
//! [`Vertex3d`] occupies 32 bytes per vertex:
//!
//! | Attribute | Format    | Offset | Shader location |
//! |-----------|-----------|--------|-----------------|
//! | position  | Float32x3 | 0      | 0               |
//! | normal    | Float32x3 | 12     | 1               |
//! | uv        | Float32x2 | 24     | 2               |

use crate::bodies::{Planet, Satellite};
use crate::gpu::GpuContext;
use crate::scene::BodyMesh;

/// Longitudinal divisions of every body sphere.
pub const SPHERE_SLICES: u32 = 20;
/// Latitudinal divisions of every body sphere.
pub const SPHERE_STACKS: u32 = 20;
/// Edge length of the spacecraft box, in scene units.
pub const SPACECRAFT_EXTENT: f32 = 3.0;

/// A vertex with position, surface normal, and texture coordinates.
///
/// `#[repr(C)]` keeps the memory layout predictable for GPU upload, and the
/// bytemuck derives allow casting vertex slices straight to bytes.
#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Vertex3d {
    pub position: [f32; 3],
    pub normal: [f32; 3],
    pub uv: [f32; 2],
}

impl Vertex3d {
    /// The wgpu vertex buffer layout for this vertex type.
    pub const LAYOUT: wgpu::VertexBufferLayout<'static> = wgpu::VertexBufferLayout {
        array_stride: std::mem::size_of::<Vertex3d>() as u64,
        step_mode: wgpu::VertexStepMode::Vertex,
        attributes: &[
            wgpu::VertexAttribute {
                offset: 0,
                shader_location: 0,
                format: wgpu::VertexFormat::Float32x3,
            },
            wgpu::VertexAttribute {
                offset: 12,
                shader_location: 1,
                format: wgpu::VertexFormat::Float32x3,
            },
            wgpu::VertexAttribute {
                offset: 24,
                shader_location: 2,
                format: wgpu::VertexFormat::Float32x2,
            },
        ],
    };

    pub fn new(position: [f32; 3], normal: [f32; 3], uv: [f32; 2]) -> Self {
        Self {
            position,
            normal,
            uv,
        }
    }
}

/// Generate a UV sphere of the given radius.
///
/// Latitude/longitude subdivision with `slices` segments around the equator
/// and `stacks` rings pole to pole. Produces `(slices + 1) * (stacks + 1)`
/// vertices and `slices * stacks * 2` triangles with equirectangular UVs.
pub fn sphere_geometry(radius: f32, slices: u32, stacks: u32) -> (Vec<Vertex3d>, Vec<u32>) {
    let mut vertices = Vec::with_capacity(((slices + 1) * (stacks + 1)) as usize);
    let mut indices = Vec::with_capacity((slices * stacks * 6) as usize);

    for ring in 0..=stacks {
        let phi = std::f32::consts::PI * ring as f32 / stacks as f32;
        let y = phi.cos();
        let ring_radius = phi.sin();

        for seg in 0..=slices {
            let theta = std::f32::consts::TAU * seg as f32 / slices as f32;
            let x = ring_radius * theta.cos();
            let z = ring_radius * theta.sin();

            vertices.push(Vertex3d::new(
                [x * radius, y * radius, z * radius],
                [x, y, z],
                [seg as f32 / slices as f32, ring as f32 / stacks as f32],
            ));
        }
    }

    for ring in 0..stacks {
        for seg in 0..slices {
            let current = ring * (slices + 1) + seg;
            let next = current + slices + 1;

            indices.push(current);
            indices.push(next);
            indices.push(current + 1);

            indices.push(current + 1);
            indices.push(next);
            indices.push(next + 1);
        }
    }

    (vertices, indices)
}

/// Generate an axis-aligned box centered at the origin.
///
/// Each face carries its own four vertices so normals stay flat: 24
/// vertices, 12 triangles, full [0, 1] UVs per face.
pub fn box_geometry(width: f32, height: f32, depth: f32) -> (Vec<Vertex3d>, Vec<u32>) {
    let (hw, hh, hd) = (width * 0.5, height * 0.5, depth * 0.5);

    #[rustfmt::skip]
    let vertices = vec![
        // Front face (Z+)
        Vertex3d::new([-hw, -hh,  hd], [ 0.0,  0.0,  1.0], [0.0, 0.0]),
        Vertex3d::new([ hw, -hh,  hd], [ 0.0,  0.0,  1.0], [1.0, 0.0]),
        Vertex3d::new([ hw,  hh,  hd], [ 0.0,  0.0,  1.0], [1.0, 1.0]),
        Vertex3d::new([-hw,  hh,  hd], [ 0.0,  0.0,  1.0], [0.0, 1.0]),
        // Back face (Z-)
        Vertex3d::new([ hw, -hh, -hd], [ 0.0,  0.0, -1.0], [0.0, 0.0]),
        Vertex3d::new([-hw, -hh, -hd], [ 0.0,  0.0, -1.0], [1.0, 0.0]),
        Vertex3d::new([-hw,  hh, -hd], [ 0.0,  0.0, -1.0], [1.0, 1.0]),
        Vertex3d::new([ hw,  hh, -hd], [ 0.0,  0.0, -1.0], [0.0, 1.0]),
        // Top face (Y+)
        Vertex3d::new([-hw,  hh,  hd], [ 0.0,  1.0,  0.0], [0.0, 0.0]),
        Vertex3d::new([ hw,  hh,  hd], [ 0.0,  1.0,  0.0], [1.0, 0.0]),
        Vertex3d::new([ hw,  hh, -hd], [ 0.0,  1.0,  0.0], [1.0, 1.0]),
        Vertex3d::new([-hw,  hh, -hd], [ 0.0,  1.0,  0.0], [0.0, 1.0]),
        // Bottom face (Y-)
        Vertex3d::new([-hw, -hh, -hd], [ 0.0, -1.0,  0.0], [0.0, 0.0]),
        Vertex3d::new([ hw, -hh, -hd], [ 0.0, -1.0,  0.0], [1.0, 0.0]),
        Vertex3d::new([ hw, -hh,  hd], [ 0.0, -1.0,  0.0], [1.0, 1.0]),
        Vertex3d::new([-hw, -hh,  hd], [ 0.0, -1.0,  0.0], [0.0, 1.0]),
        // Right face (X+)
        Vertex3d::new([ hw, -hh,  hd], [ 1.0,  0.0,  0.0], [0.0, 0.0]),
        Vertex3d::new([ hw, -hh, -hd], [ 1.0,  0.0,  0.0], [1.0, 0.0]),
        Vertex3d::new([ hw,  hh, -hd], [ 1.0,  0.0,  0.0], [1.0, 1.0]),
        Vertex3d::new([ hw,  hh,  hd], [ 1.0,  0.0,  0.0], [0.0, 1.0]),
        // Left face (X-)
        Vertex3d::new([-hw, -hh, -hd], [-1.0,  0.0,  0.0], [0.0, 0.0]),
        Vertex3d::new([-hw, -hh,  hd], [-1.0,  0.0,  0.0], [1.0, 0.0]),
        Vertex3d::new([-hw,  hh,  hd], [-1.0,  0.0,  0.0], [1.0, 1.0]),
        Vertex3d::new([-hw,  hh, -hd], [-1.0,  0.0,  0.0], [0.0, 1.0]),
    ];

    #[rustfmt::skip]
    let indices: Vec<u32> = vec![
        0,  1,  2,  2,  3,  0,  // front
        4,  5,  6,  6,  7,  4,  // back
        8,  9,  10, 10, 11, 8,  // top
        12, 13, 14, 14, 15, 12, // bottom
        16, 17, 18, 18, 19, 16, // right
        20, 21, 22, 22, 23, 20, // left
    ];

    (vertices, indices)
}

/// GPU-resident geometry: vertex and index buffers plus the index count.
///
/// Immutable after creation. Buffers are released when the mesh drops,
/// independently of the device they came from.
#[derive(Debug)]
pub struct Mesh {
    pub(crate) vertex_buffer: wgpu::Buffer,
    pub(crate) index_buffer: wgpu::Buffer,
    pub(crate) index_count: u32,
}

impl Mesh {
    /// Upload raw vertex and index data to GPU buffers.
    pub fn new(gpu: &GpuContext, vertices: &[Vertex3d], indices: &[u32]) -> Self {
        use wgpu::util::DeviceExt;

        let vertex_buffer = gpu
            .device
            .create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some("Mesh Vertex Buffer"),
                contents: bytemuck::cast_slice(vertices),
                usage: wgpu::BufferUsages::VERTEX,
            });

        let index_buffer = gpu
            .device
            .create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some("Mesh Index Buffer"),
                contents: bytemuck::cast_slice(indices),
                usage: wgpu::BufferUsages::INDEX,
            });

        Self {
            vertex_buffer,
            index_buffer,
            index_count: indices.len() as u32,
        }
    }

    /// Create a UV sphere mesh with the given radius and tessellation.
    pub fn sphere(gpu: &GpuContext, radius: f32, slices: u32, stacks: u32) -> Self {
        let (vertices, indices) = sphere_geometry(radius, slices, stacks);
        Self::new(gpu, &vertices, &indices)
    }

    /// Create an axis-aligned box mesh with the given dimensions.
    pub fn cuboid(gpu: &GpuContext, width: f32, height: f32, depth: f32) -> Self {
        let (vertices, indices) = box_geometry(width, height, depth);
        Self::new(gpu, &vertices, &indices)
    }
}

/// Every mesh the scene draws, created once at startup.
///
/// One sphere per planet sized from the catalog, one per satellite, and the
/// spacecraft box. Draw commands address these by [`BodyMesh`] key.
pub struct SceneMeshes {
    planets: [Mesh; 9],
    satellites: [Mesh; 3],
    spacecraft: Mesh,
}

impl SceneMeshes {
    /// Build all 13 meshes.
    pub fn create(gpu: &GpuContext) -> Self {
        Self {
            planets: Planet::ALL.map(|p| {
                Mesh::sphere(gpu, p.record().mesh_radius, SPHERE_SLICES, SPHERE_STACKS)
            }),
            satellites: Satellite::ALL.map(|s| {
                Mesh::sphere(gpu, s.record().mesh_radius, SPHERE_SLICES, SPHERE_STACKS)
            }),
            spacecraft: Mesh::cuboid(
                gpu,
                SPACECRAFT_EXTENT,
                SPACECRAFT_EXTENT,
                SPACECRAFT_EXTENT,
            ),
        }
    }

    /// Resolve a draw command's mesh key.
    pub fn get(&self, key: BodyMesh) -> &Mesh {
        match key {
            BodyMesh::Planet(planet) => &self.planets[planet as usize],
            BodyMesh::Satellite(satellite) => &self.satellites[satellite as usize],
            BodyMesh::Spacecraft => &self.spacecraft,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sphere_counts_match_tessellation() {
        let (vertices, indices) = sphere_geometry(1.0, 20, 20);
        assert_eq!(vertices.len(), 21 * 21);
        assert_eq!(indices.len(), 20 * 20 * 6);
    }

    #[test]
    fn sphere_vertices_sit_on_the_radius() {
        let radius = 2.5;
        let (vertices, _) = sphere_geometry(radius, 8, 6);
        for v in &vertices {
            let [x, y, z] = v.position;
            let r = (x * x + y * y + z * z).sqrt();
            assert!((r - radius).abs() < 1e-4, "vertex at radius {r}");

            let [nx, ny, nz] = v.normal;
            let n = (nx * nx + ny * ny + nz * nz).sqrt();
            assert!((n - 1.0).abs() < 1e-4, "normal of length {n}");
        }
    }

    #[test]
    fn box_counts_and_extents() {
        let (vertices, indices) = box_geometry(3.0, 3.0, 3.0);
        assert_eq!(vertices.len(), 24);
        assert_eq!(indices.len(), 36);

        for v in &vertices {
            for c in v.position {
                assert!(c.abs() <= 1.5 + 1e-6);
            }
        }
        assert!(
            vertices
                .iter()
                .any(|v| (v.position[0] - 1.5).abs() < 1e-6)
        );
    }

    #[test]
    fn box_indices_stay_in_bounds() {
        let (vertices, indices) = box_geometry(1.0, 2.0, 3.0);
        assert!(indices.iter().all(|&i| (i as usize) < vertices.len()));
    }
}
