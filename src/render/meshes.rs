// Procedural meshes for the particle classes.
//
// Pure geometry with no GPU types, so host tests can include this file.
// Every mesh is centred on its own origin; faceted shapes carry per-face
// normals, spheres carry smooth normals.

use glam::{Vec2, Vec3};
use std::f32::consts::{PI, TAU};

#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Vertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
}

#[derive(Clone, Debug, Default)]
pub struct MeshData {
    pub vertices: Vec<Vertex>,
    pub indices: Vec<u16>,
}

impl MeshData {
    #[inline]
    fn push(&mut self, position: Vec3, normal: Vec3) -> u16 {
        let i = self.vertices.len() as u16;
        self.vertices.push(Vertex {
            position: position.to_array(),
            normal: normal.to_array(),
        });
        i
    }

    /// Flat triangle; normal from the winding (counter-clockwise front).
    fn tri(&mut self, a: Vec3, b: Vec3, c: Vec3) {
        let n = (b - a).cross(c - a).normalize_or_zero();
        let i0 = self.push(a, n);
        let i1 = self.push(b, n);
        let i2 = self.push(c, n);
        self.indices.extend_from_slice(&[i0, i1, i2]);
    }

    fn quad(&mut self, a: Vec3, b: Vec3, c: Vec3, d: Vec3) {
        let n = (b - a).cross(c - a).normalize_or_zero();
        let i0 = self.push(a, n);
        let i1 = self.push(b, n);
        let i2 = self.push(c, n);
        let i3 = self.push(d, n);
        self.indices.extend_from_slice(&[i0, i1, i2, i0, i2, i3]);
    }

    pub fn index_count(&self) -> u32 {
        self.indices.len() as u32
    }
}

/// Closed cone along +Y, base at `-height/2`, apex at `+height/2`.
pub fn cone(radius: f32, height: f32, segments: u32) -> MeshData {
    let segments = segments.max(3);
    let mut mesh = MeshData::default();
    let apex = Vec3::new(0.0, height / 2.0, 0.0);
    let base_center = Vec3::new(0.0, -height / 2.0, 0.0);
    let rim = |k: u32| {
        let a = k as f32 / segments as f32 * TAU;
        Vec3::new(radius * a.sin(), -height / 2.0, radius * a.cos())
    };
    for k in 0..segments {
        let (p0, p1) = (rim(k), rim(k + 1));
        mesh.tri(apex, p0, p1);
        mesh.tri(base_center, p1, p0);
    }
    mesh
}

/// UV sphere with `width_segments` around and `height_segments` pole to pole.
pub fn uv_sphere(radius: f32, width_segments: u32, height_segments: u32) -> MeshData {
    let ws = width_segments.max(3);
    let hs = height_segments.max(2);
    let mut mesh = MeshData::default();
    for y in 0..=hs {
        let v = y as f32 / hs as f32;
        let polar = v * PI;
        for x in 0..=ws {
            let u = x as f32 / ws as f32;
            let azimuth = u * TAU;
            let n = Vec3::new(
                -azimuth.cos() * polar.sin(),
                polar.cos(),
                azimuth.sin() * polar.sin(),
            );
            mesh.push(n * radius, n);
        }
    }
    let row = ws + 1;
    for y in 0..hs {
        for x in 0..ws {
            let a = (y * row + x + 1) as u16;
            let b = (y * row + x) as u16;
            let c = ((y + 1) * row + x) as u16;
            let d = ((y + 1) * row + x + 1) as u16;
            if y != 0 {
                mesh.indices.extend_from_slice(&[a, b, d]);
            }
            if y != hs - 1 {
                mesh.indices.extend_from_slice(&[b, c, d]);
            }
        }
    }
    mesh
}

/// Regular octahedron with its vertices on the axes at `radius`.
pub fn octahedron(radius: f32) -> MeshData {
    let mut mesh = MeshData::default();
    let (px, nx) = (Vec3::X * radius, Vec3::NEG_X * radius);
    let (py, ny) = (Vec3::Y * radius, Vec3::NEG_Y * radius);
    let (pz, nz) = (Vec3::Z * radius, Vec3::NEG_Z * radius);
    let ring = [px, pz, nx, nz];
    for k in 0..4 {
        let (a, b) = (ring[k], ring[(k + 1) % 4]);
        mesh.tri(py, b, a);
        mesh.tri(ny, a, b);
    }
    mesh
}

/// Axis-aligned box with edge lengths `size`.
pub fn cuboid(size: Vec3) -> MeshData {
    let h = size / 2.0;
    let c = |x: f32, y: f32, z: f32| Vec3::new(x * h.x, y * h.y, z * h.z);
    let mut mesh = MeshData::default();
    // +X, -X, +Y, -Y, +Z, -Z
    mesh.quad(c(1., -1., 1.), c(1., -1., -1.), c(1., 1., -1.), c(1., 1., 1.));
    mesh.quad(c(-1., -1., -1.), c(-1., -1., 1.), c(-1., 1., 1.), c(-1., 1., -1.));
    mesh.quad(c(-1., 1., 1.), c(1., 1., 1.), c(1., 1., -1.), c(-1., 1., -1.));
    mesh.quad(c(-1., -1., -1.), c(1., -1., -1.), c(1., -1., 1.), c(-1., -1., 1.));
    mesh.quad(c(-1., -1., 1.), c(1., -1., 1.), c(1., 1., 1.), c(-1., 1., 1.));
    mesh.quad(c(1., -1., -1.), c(-1., -1., -1.), c(-1., 1., -1.), c(1., 1., -1.));
    mesh
}

/// Star outline in the XY plane: `points` tips alternating between the two
/// radii, first tip on +X.
pub fn star_outline(points: u32, outer: f32, inner: f32) -> Vec<Vec2> {
    (0..points * 2)
        .map(|i| {
            let angle = i as f32 * PI / points as f32;
            let r = if i % 2 == 0 { outer } else { inner };
            Vec2::new(angle.cos() * r, angle.sin() * r)
        })
        .collect()
}

/// Star prism extruded along +Z from 0 to `depth`.
pub fn star_prism(points: u32, outer: f32, inner: f32, depth: f32) -> MeshData {
    let outline = star_outline(points, outer, inner);
    let mut mesh = MeshData::default();
    let front = |p: Vec2| p.extend(depth);
    let back = |p: Vec2| p.extend(0.0);
    // caps fan from the centre; the star is star-shaped about it
    let n = outline.len();
    for k in 0..n {
        let (a, b) = (outline[k], outline[(k + 1) % n]);
        mesh.tri(Vec3::new(0.0, 0.0, depth), front(a), front(b));
        mesh.tri(Vec3::ZERO, back(b), back(a));
        mesh.quad(back(a), back(b), front(b), front(a));
    }
    mesh
}
