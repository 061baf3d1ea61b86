//! Triangle geometry of the object a decal is applied to.

use bevy::math::{Mat3, Mat4, Vec3};
use bevy::mesh::{Indices, Mesh, VertexAttributeValues};

/// Host-local triangle soup plus the host's local-to-world matrix.
#[derive(Debug, Clone, PartialEq)]
pub struct TargetMesh {
    pub positions: Vec<Vec3>,
    pub normals: Vec<Vec3>,
    pub indices: Vec<u32>,
    /// Local-to-world transform of the host object.
    pub world: Mat4,
}

impl TargetMesh {
    /// Axis-aligned box centred on the origin with per-face normals.
    pub fn cuboid(size: Vec3) -> Self {
        let h = size * 0.5;
        let (x, y, z) = (h.x, h.y, h.z);
        let faces: [([f32; 3], [[f32; 3]; 4]); 6] = [
            // Front
            ([0.0, 0.0, 1.0], [[-x, -y, z], [x, -y, z], [x, y, z], [-x, y, z]]),
            // Back
            ([0.0, 0.0, -1.0], [[x, -y, -z], [-x, -y, -z], [-x, y, -z], [x, y, -z]]),
            // Right
            ([1.0, 0.0, 0.0], [[x, -y, z], [x, -y, -z], [x, y, -z], [x, y, z]]),
            // Left
            ([-1.0, 0.0, 0.0], [[-x, -y, -z], [-x, -y, z], [-x, y, z], [-x, y, -z]]),
            // Top
            ([0.0, 1.0, 0.0], [[-x, y, z], [x, y, z], [x, y, -z], [-x, y, -z]]),
            // Bottom
            ([0.0, -1.0, 0.0], [[-x, -y, -z], [x, -y, -z], [x, -y, z], [-x, -y, z]]),
        ];

        let mut positions = Vec::with_capacity(24);
        let mut normals = Vec::with_capacity(24);
        let mut indices = Vec::with_capacity(36);
        for (normal, corners) in faces {
            let base = positions.len() as u32;
            for corner in corners {
                positions.push(Vec3::from_array(corner));
                normals.push(Vec3::from_array(normal));
            }
            indices.extend_from_slice(&[base, base + 1, base + 2, base, base + 2, base + 3]);
        }

        Self {
            positions,
            normals,
            indices,
            world: Mat4::IDENTITY,
        }
    }

    /// Extract triangle data from a Bevy mesh.
    ///
    /// Returns `None` when the mesh has no positions. Missing normals fall back
    /// to flat per-triangle normals; missing indices are treated as a plain
    /// triangle list.
    pub fn from_mesh(mesh: &Mesh) -> Option<Self> {
        let Some(VertexAttributeValues::Float32x3(raw_positions)) =
            mesh.attribute(Mesh::ATTRIBUTE_POSITION)
        else {
            return None;
        };
        let positions: Vec<Vec3> = raw_positions.iter().copied().map(Vec3::from_array).collect();

        let indices: Vec<u32> = match mesh.indices() {
            Some(Indices::U16(values)) => values.iter().map(|&i| u32::from(i)).collect(),
            Some(Indices::U32(values)) => values.clone(),
            None => (0..positions.len() as u32).collect(),
        };

        let normals = match mesh.attribute(Mesh::ATTRIBUTE_NORMAL) {
            Some(VertexAttributeValues::Float32x3(values)) if values.len() == positions.len() => {
                values.iter().copied().map(Vec3::from_array).collect()
            }
            _ => flat_normals(&positions, &indices),
        };

        Some(Self {
            positions,
            normals,
            indices,
            world: Mat4::IDENTITY,
        })
    }

    pub fn with_world(mut self, world: Mat4) -> Self {
        self.world = world;
        self
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Vertex indices of triangle `face`, or `None` if any index is out of range.
    pub fn triangle(&self, face: usize) -> Option<[usize; 3]> {
        let tri = self.indices.get(face * 3..face * 3 + 3)?;
        let tri = [tri[0] as usize, tri[1] as usize, tri[2] as usize];
        if tri.iter().any(|&i| i >= self.positions.len()) {
            return None;
        }
        Some(tri)
    }

    /// Matrix that carries local normals to world space.
    pub fn normal_matrix(&self) -> Mat3 {
        Mat3::from_mat4(self.world).inverse().transpose()
    }
}

fn flat_normals(positions: &[Vec3], indices: &[u32]) -> Vec<Vec3> {
    let mut normals = vec![Vec3::ZERO; positions.len()];
    for tri in indices.chunks_exact(3) {
        let [a, b, c] = [tri[0] as usize, tri[1] as usize, tri[2] as usize];
        let (Some(pa), Some(pb), Some(pc)) = (positions.get(a), positions.get(b), positions.get(c))
        else {
            continue;
        };
        let n = (*pb - *pa).cross(*pc - *pa);
        for i in [a, b, c] {
            normals[i] += n;
        }
    }
    normals
        .into_iter()
        .map(|n| n.try_normalize().unwrap_or(Vec3::Z))
        .collect()
}
