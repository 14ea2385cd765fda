//! Procedural geometry for the primitive shapes the scene is built from.
//!
//! Every generator returns plain vertex and index data, ready for a mesh
//! provider to upload. All shapes share the same conventions:
//!
//! - unit-sized and centered on the origin (the plane spans 1x1 on XZ, the
//!   box is a unit cube, sphere/cylinder/cone have diameter 1 and height 1),
//!   so instance dimensions come entirely from the per-draw scale
//! - counter-clockwise winding viewed from outside, matching a backend that
//!   culls back faces with `FrontFace::Ccw`
//! - outward unit normals, with per-face vertices where smooth shading would
//!   bleed across a hard edge (24 vertices for the box, not 8)
//! - UVs covering [0,1] per face or wrap

use glam::Vec3;

/// A mesh vertex: position, outward normal, texture coordinates.
///
/// `#[repr(C)]` plus the bytemuck derives make the vertex safe to hand to a
/// GPU backend as raw bytes. 32 bytes per vertex.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Vertex3d {
    pub position: [f32; 3],
    pub normal: [f32; 3],
    pub uv: [f32; 2],
}

impl Vertex3d {
    /// Vertex buffer layout for backends that render this geometry with wgpu.
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

/// A unit square on the XZ plane at y = 0, normal pointing up.
pub fn plane() -> (Vec<Vertex3d>, Vec<u32>) {
    let vertices = vec![
        Vertex3d::new([-0.5, 0.0, -0.5], [0.0, 1.0, 0.0], [0.0, 0.0]),
        Vertex3d::new([0.5, 0.0, -0.5], [0.0, 1.0, 0.0], [1.0, 0.0]),
        Vertex3d::new([0.5, 0.0, 0.5], [0.0, 1.0, 0.0], [1.0, 1.0]),
        Vertex3d::new([-0.5, 0.0, 0.5], [0.0, 1.0, 0.0], [0.0, 1.0]),
    ];
    let indices = vec![0, 1, 2, 2, 3, 0];
    (vertices, indices)
}

/// A unit cube centered at the origin.
///
/// Four vertices per face so every face gets its own flat normal; 24
/// vertices, 36 indices.
pub fn cube() -> (Vec<Vertex3d>, Vec<u32>) {
    // (normal, tangent u, tangent v) per face; each frame is right-handed so
    // the shared corner ordering below winds CCW from outside.
    let faces: [([f32; 3], [f32; 3], [f32; 3]); 6] = [
        ([1.0, 0.0, 0.0], [0.0, 0.0, -1.0], [0.0, 1.0, 0.0]),
        ([-1.0, 0.0, 0.0], [0.0, 0.0, 1.0], [0.0, 1.0, 0.0]),
        ([0.0, 1.0, 0.0], [1.0, 0.0, 0.0], [0.0, 0.0, -1.0]),
        ([0.0, -1.0, 0.0], [1.0, 0.0, 0.0], [0.0, 0.0, 1.0]),
        ([0.0, 0.0, 1.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]),
        ([0.0, 0.0, -1.0], [-1.0, 0.0, 0.0], [0.0, 1.0, 0.0]),
    ];

    let mut vertices = Vec::with_capacity(24);
    let mut indices = Vec::with_capacity(36);

    for (normal, tangent_u, tangent_v) in faces {
        let n = Vec3::from(normal);
        let u = Vec3::from(tangent_u);
        let v = Vec3::from(tangent_v);
        let base = vertices.len() as u32;

        let corners = [
            (-0.5, -0.5, [0.0, 1.0]),
            (0.5, -0.5, [1.0, 1.0]),
            (0.5, 0.5, [1.0, 0.0]),
            (-0.5, 0.5, [0.0, 0.0]),
        ];
        for (cu, cv, uv) in corners {
            let position = n * 0.5 + u * cu + v * cv;
            vertices.push(Vertex3d::new(position.to_array(), normal, uv));
        }
        indices.extend_from_slice(&[base, base + 1, base + 2, base + 2, base + 3, base]);
    }

    (vertices, indices)
}

/// A UV sphere of diameter 1 centered at the origin.
///
/// `segments` divides the equator, `rings` runs pole to pole. UVs use an
/// equirectangular mapping.
pub fn sphere(segments: u32, rings: u32) -> (Vec<Vertex3d>, Vec<u32>) {
    let segments = segments.max(3);
    let rings = rings.max(2);

    let mut vertices = Vec::with_capacity(((segments + 1) * (rings + 1)) as usize);
    let mut indices = Vec::with_capacity((segments * rings * 6) as usize);

    for ring in 0..=rings {
        let phi = std::f32::consts::PI * ring as f32 / rings as f32;
        let y = phi.cos();
        let ring_radius = phi.sin();

        for seg in 0..=segments {
            let theta = 2.0 * std::f32::consts::PI * seg as f32 / segments as f32;
            let x = ring_radius * theta.cos();
            let z = ring_radius * theta.sin();

            vertices.push(Vertex3d::new(
                [x * 0.5, y * 0.5, z * 0.5],
                [x, y, z],
                [seg as f32 / segments as f32, ring as f32 / rings as f32],
            ));
        }
    }

    for ring in 0..rings {
        for seg in 0..segments {
            let current = ring * (segments + 1) + seg;
            let next = current + segments + 1;

            indices.extend_from_slice(&[current, next, current + 1]);
            indices.extend_from_slice(&[current + 1, next, next + 1]);
        }
    }

    (vertices, indices)
}

/// A capped cylinder along Y, diameter 1, height 1, centered at the origin.
pub fn cylinder(segments: u32) -> (Vec<Vertex3d>, Vec<u32>) {
    let seg = segments.max(3);
    let tau = std::f32::consts::TAU;

    let mut vertices = Vec::new();
    let mut indices = Vec::new();

    // Side: two rings with a duplicated seam column for clean UV wrap.
    for i in 0..=seg {
        let u = i as f32 / seg as f32;
        let theta = u * tau;
        let (sin, cos) = theta.sin_cos();

        vertices.push(Vertex3d::new(
            [cos * 0.5, 0.5, sin * 0.5],
            [cos, 0.0, sin],
            [u, 0.0],
        ));
        vertices.push(Vertex3d::new(
            [cos * 0.5, -0.5, sin * 0.5],
            [cos, 0.0, sin],
            [u, 1.0],
        ));
    }
    for i in 0..seg {
        let top0 = i * 2;
        let bot0 = top0 + 1;
        let top1 = top0 + 2;
        let bot1 = top0 + 3;
        indices.extend_from_slice(&[top0, bot0, bot1, top0, bot1, top1]);
    }

    cap(&mut vertices, &mut indices, seg, 0.5, true);
    cap(&mut vertices, &mut indices, seg, -0.5, false);

    (vertices, indices)
}

/// A cone along Y, base diameter 1 at y = -0.5, apex at y = +0.5.
pub fn cone(segments: u32) -> (Vec<Vertex3d>, Vec<u32>) {
    let seg = segments.max(3);
    let tau = std::f32::consts::TAU;

    let mut vertices = Vec::new();
    let mut indices = Vec::new();

    // Slant normal: for radius r and height h the side tilts outward by
    // (cos, r/h, sin) before normalization; here r = 0.5, h = 1.
    let slant = |theta: f32| -> [f32; 3] {
        let (sin, cos) = theta.sin_cos();
        let n = Vec3::new(cos, 0.5, sin).normalize();
        n.to_array()
    };

    // One apex vertex per segment column so each triangle keeps a sensible
    // normal at the tip.
    for i in 0..seg {
        let u0 = i as f32 / seg as f32;
        let u1 = (i + 1) as f32 / seg as f32;
        let theta0 = u0 * tau;
        let theta1 = u1 * tau;
        let mid = (theta0 + theta1) * 0.5;

        let base = vertices.len() as u32;
        vertices.push(Vertex3d::new([0.0, 0.5, 0.0], slant(mid), [(u0 + u1) * 0.5, 0.0]));

        let (sin0, cos0) = theta0.sin_cos();
        let (sin1, cos1) = theta1.sin_cos();
        vertices.push(Vertex3d::new(
            [cos0 * 0.5, -0.5, sin0 * 0.5],
            slant(theta0),
            [u0, 1.0],
        ));
        vertices.push(Vertex3d::new(
            [cos1 * 0.5, -0.5, sin1 * 0.5],
            slant(theta1),
            [u1, 1.0],
        ));
        indices.extend_from_slice(&[base, base + 1, base + 2]);
    }

    cap(&mut vertices, &mut indices, seg, -0.5, false);

    (vertices, indices)
}

/// Fan cap at the given height; `up` selects the facing and winding.
fn cap(vertices: &mut Vec<Vertex3d>, indices: &mut Vec<u32>, seg: u32, y: f32, up: bool) {
    let tau = std::f32::consts::TAU;
    let normal = [0.0, if up { 1.0 } else { -1.0 }, 0.0];

    let center = vertices.len() as u32;
    vertices.push(Vertex3d::new([0.0, y, 0.0], normal, [0.5, 0.5]));
    for i in 0..seg {
        let theta = i as f32 / seg as f32 * tau;
        let (sin, cos) = theta.sin_cos();
        vertices.push(Vertex3d::new(
            [cos * 0.5, y, sin * 0.5],
            normal,
            [0.5 + cos * 0.5, 0.5 + sin * 0.5],
        ));
    }
    for i in 0..seg {
        let curr = center + 1 + i;
        let next = center + 1 + (i + 1) % seg;
        if up {
            indices.extend_from_slice(&[center, curr, next]);
        } else {
            indices.extend_from_slice(&[center, next, curr]);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_unit_normals(vertices: &[Vertex3d]) {
        for v in vertices {
            let len = (v.normal[0].powi(2) + v.normal[1].powi(2) + v.normal[2].powi(2)).sqrt();
            assert!((len - 1.0).abs() < 1e-5, "normal should be unit length, got {len}");
        }
    }

    fn assert_indices_in_range(vertices: &[Vertex3d], indices: &[u32]) {
        for &idx in indices {
            assert!((idx as usize) < vertices.len(), "index {idx} out of range");
        }
    }

    #[test]
    fn plane_is_a_quad_facing_up() {
        let (verts, idxs) = plane();
        assert_eq!(verts.len(), 4);
        assert_eq!(idxs.len(), 6);
        for v in &verts {
            assert_eq!(v.normal, [0.0, 1.0, 0.0]);
            assert_eq!(v.position[1], 0.0);
        }
    }

    #[test]
    fn cube_has_per_face_vertices() {
        let (verts, idxs) = cube();
        assert_eq!(verts.len(), 24, "cube should have 4 vertices per face");
        assert_eq!(idxs.len(), 36);
        assert_indices_in_range(&verts, &idxs);
        assert_unit_normals(&verts);
    }

    #[test]
    fn cube_spans_the_unit_box() {
        let (verts, _) = cube();
        for v in &verts {
            for c in v.position {
                assert!(c.abs() <= 0.5 + 1e-6);
            }
        }
    }

    #[test]
    fn sphere_counts_match_tessellation() {
        let (verts, idxs) = sphere(32, 16);
        assert_eq!(verts.len(), 33 * 17);
        assert_eq!(idxs.len(), 32 * 16 * 6);
        assert_indices_in_range(&verts, &idxs);
    }

    #[test]
    fn sphere_normals_are_unit_length() {
        let (verts, _) = sphere(8, 4);
        assert_unit_normals(&verts);
    }

    #[test]
    fn sphere_has_unit_diameter() {
        let (verts, _) = sphere(16, 8);
        for v in &verts {
            let r = Vec3::from(v.position).length();
            assert!((r - 0.5).abs() < 1e-5, "sphere vertex at radius {r}");
        }
    }

    #[test]
    fn cylinder_is_well_formed() {
        let (verts, idxs) = cylinder(16);
        assert_indices_in_range(&verts, &idxs);
        assert_unit_normals(&verts);
        for v in &verts {
            assert!(v.position[1].abs() <= 0.5 + 1e-6);
        }
    }

    #[test]
    fn cone_runs_base_to_apex() {
        let (verts, idxs) = cone(16);
        assert_indices_in_range(&verts, &idxs);
        assert_unit_normals(&verts);
        let max_y = verts.iter().map(|v| v.position[1]).fold(f32::MIN, f32::max);
        let min_y = verts.iter().map(|v| v.position[1]).fold(f32::MAX, f32::min);
        assert_eq!(max_y, 0.5);
        assert_eq!(min_y, -0.5);
    }

    #[test]
    fn degenerate_tessellation_is_clamped() {
        let (_, idxs) = sphere(1, 1);
        assert!(!idxs.is_empty());
        let (_, idxs) = cylinder(0);
        assert!(!idxs.is_empty());
    }
}
