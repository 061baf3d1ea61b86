//! Ray vs. target mesh hit testing.
//!
//! Only used at the moment of placement. Drags integrate 2D pointer deltas and
//! never re-raycast.

use bevy::math::{Mat4, Vec3};

use crate::mesh::TargetMesh;

const EPSILON: f32 = 1e-8;

/// World-space ray. `direction` is kept normalized so hit distances are in world units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    pub origin: Vec3,
    pub direction: Vec3,
}

impl Ray {
    /// Build a ray, normalizing `direction`. `None` for a zero or non-finite direction.
    pub fn new(origin: Vec3, direction: Vec3) -> Option<Self> {
        let direction = direction.try_normalize()?;
        if !origin.is_finite() {
            return None;
        }
        Some(Self { origin, direction })
    }

    pub fn at(&self, t: f32) -> Vec3 {
        self.origin + self.direction * t
    }
}

/// Nearest surface contact, in both local and world space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HitResult {
    pub point_local: Vec3,
    pub normal_local: Vec3,
    pub point_world: Vec3,
    pub normal_world: Vec3,
    /// Distance along the ray in world units.
    pub distance: f32,
    /// Index of the hit triangle.
    pub face_index: usize,
}

/// Determinant below this fraction of the axis-length product counts as singular.
const RELATIVE_SINGULARITY: f32 = 1e-6;

/// Inverse of an affine world matrix, or `None` when it collapses an axis.
///
/// Singularity is judged relative to the axis lengths, not as an absolute determinant.
pub(crate) fn invert_affine(world: Mat4) -> Option<Mat4> {
    let axes = world.x_axis.truncate().length()
        * world.y_axis.truncate().length()
        * world.z_axis.truncate().length();
    let det = world.determinant();
    if !det.is_finite() || det.abs() <= axes * RELATIVE_SINGULARITY {
        return None;
    }
    let inverse = world.inverse();
    inverse.is_finite().then_some(inverse)
}

/// Cast `ray` against `mesh` and return the nearest hit.
///
/// Returns `None` when the ray misses every triangle, or when the mesh's world
/// matrix cannot be inverted.
pub fn resolve(ray: &Ray, mesh: &TargetMesh) -> Option<HitResult> {
    let to_local = invert_affine(mesh.world)?;

    let mut nearest: Option<(f32, usize, [usize; 3], f32, f32)> = None;
    for face in 0..mesh.triangle_count() {
        let Some(tri) = mesh.triangle(face) else {
            continue;
        };
        let [v0, v1, v2] = tri.map(|i| mesh.world.transform_point3(mesh.positions[i]));
        let Some((t, u, v)) = ray_triangle_intersection(ray.origin, ray.direction, v0, v1, v2) else {
            continue;
        };
        if nearest.is_none_or(|(best, ..)| t < best) {
            nearest = Some((t, face, tri, u, v));
        }
    }

    let (distance, face_index, [i0, i1, i2], u, v) = nearest?;
    let w = 1.0 - u - v;
    let point_world = ray.at(distance);
    let point_local = to_local.transform_point3(point_world);

    let interpolated = mesh.normals.get(i0).copied().unwrap_or(Vec3::ZERO) * w
        + mesh.normals.get(i1).copied().unwrap_or(Vec3::ZERO) * u
        + mesh.normals.get(i2).copied().unwrap_or(Vec3::ZERO) * v;
    let normal_local = interpolated.try_normalize().unwrap_or_else(|| {
        let (p0, p1, p2) = (mesh.positions[i0], mesh.positions[i1], mesh.positions[i2]);
        (p1 - p0).cross(p2 - p0).normalize_or(Vec3::Z)
    });
    let normal_world = (mesh.normal_matrix() * normal_local).normalize_or(Vec3::Z);

    Some(HitResult {
        point_local,
        normal_local,
        point_world,
        normal_world,
        distance,
        face_index,
    })
}

/// Möller–Trumbore ray-triangle intersection. Returns `(t, u, v)` for hits in front of the origin.
fn ray_triangle_intersection(
    ray_origin: Vec3,
    ray_dir: Vec3,
    v0: Vec3,
    v1: Vec3,
    v2: Vec3,
) -> Option<(f32, f32, f32)> {
    let edge1 = v1 - v0;
    let edge2 = v2 - v0;

    let h = ray_dir.cross(edge2);
    let a = edge1.dot(h);
    if a.abs() < EPSILON {
        return None;
    }

    let f = 1.0 / a;
    let s = ray_origin - v0;
    let u = f * s.dot(h);
    if !(0.0..=1.0).contains(&u) {
        return None;
    }

    let q = s.cross(edge1);
    let v = f * ray_dir.dot(q);
    if v < 0.0 || u + v > 1.0 {
        return None;
    }

    let t = f * edge2.dot(q);
    (t > EPSILON).then_some((t, u, v))
}

#[cfg(test)]
mod tests {
    use bevy::math::{Mat4, Quat};

    use super::*;

    fn unit_cube() -> TargetMesh {
        TargetMesh::cuboid(Vec3::ONE)
    }

    fn assert_vec_eq(actual: Vec3, expected: Vec3) {
        assert!(
            actual.abs_diff_eq(expected, 1e-5),
            "expected {expected:?}, got {actual:?}"
        );
    }

    #[test]
    fn test_local_space_hit_conversion() {
        let ray = Ray::new(Vec3::new(0.2, 0.3, 5.0), Vec3::NEG_Z).unwrap();
        let hit = resolve(&ray, &unit_cube()).unwrap();

        assert_vec_eq(hit.point_local, Vec3::new(0.2, 0.3, 0.5));
        assert_vec_eq(hit.normal_local, Vec3::Z);
        assert!((hit.distance - 4.5).abs() < 1e-5);
    }

    #[test]
    fn test_nearest_face_wins() {
        // Enters through +Z and would exit through -Z; only the entry face counts.
        let ray = Ray::new(Vec3::new(0.0, 0.0, 3.0), Vec3::NEG_Z).unwrap();
        let hit = resolve(&ray, &unit_cube()).unwrap();
        assert_vec_eq(hit.point_world, Vec3::new(0.0, 0.0, 0.5));
    }

    #[test]
    fn test_miss_returns_none() {
        let ray = Ray::new(Vec3::new(2.0, 2.0, 5.0), Vec3::NEG_Z).unwrap();
        assert!(resolve(&ray, &unit_cube()).is_none());

        // Pointing away from the cube.
        let ray = Ray::new(Vec3::new(0.0, 0.0, 5.0), Vec3::Z).unwrap();
        assert!(resolve(&ray, &unit_cube()).is_none());
    }

    #[test]
    fn test_translated_host_reports_local_point() {
        let mesh = unit_cube().with_world(Mat4::from_translation(Vec3::new(1.0, 0.0, 0.0)));
        let ray = Ray::new(Vec3::new(1.2, 0.3, 5.0), Vec3::NEG_Z).unwrap();
        let hit = resolve(&ray, &mesh).unwrap();

        assert_vec_eq(hit.point_world, Vec3::new(1.2, 0.3, 0.5));
        assert_vec_eq(hit.point_local, Vec3::new(0.2, 0.3, 0.5));
    }

    #[test]
    fn test_rotated_host_maps_normal_to_world() {
        let world = Mat4::from_quat(Quat::from_rotation_y(std::f32::consts::FRAC_PI_2));
        let mesh = unit_cube().with_world(world);
        // The local +Z face now faces world +X.
        let ray = Ray::new(Vec3::new(5.0, 0.1, 0.0), Vec3::NEG_X).unwrap();
        let hit = resolve(&ray, &mesh).unwrap();

        assert_vec_eq(hit.normal_world, Vec3::X);
        assert_vec_eq(hit.normal_local, Vec3::Z);
    }

    #[test]
    fn test_non_uniform_scale_keeps_unit_normal() {
        let world = Mat4::from_scale(Vec3::new(3.0, 1.0, 0.5));
        let mesh = unit_cube().with_world(world);
        let ray = Ray::new(Vec3::new(0.4, 0.2, 5.0), Vec3::NEG_Z).unwrap();
        let hit = resolve(&ray, &mesh).unwrap();

        assert!((hit.normal_world.length() - 1.0).abs() < 1e-5);
        assert_vec_eq(hit.normal_world, Vec3::Z);
        assert_vec_eq(hit.point_local, Vec3::new(0.4 / 3.0, 0.2, 0.5));
    }

    #[test]
    fn test_degenerate_world_matrix_is_ignored() {
        let mesh = unit_cube().with_world(Mat4::from_scale(Vec3::new(1.0, 0.0, 1.0)));
        let ray = Ray::new(Vec3::new(0.0, 0.0, 5.0), Vec3::NEG_Z).unwrap();
        assert!(resolve(&ray, &mesh).is_none());
    }

    #[test]
    fn test_tiny_uniform_scale_still_hits() {
        let mesh = unit_cube().with_world(Mat4::from_scale(Vec3::splat(0.001)));
        let ray = Ray::new(Vec3::new(0.0001, 0.0, 0.01), Vec3::NEG_Z).unwrap();
        let hit = resolve(&ray, &mesh).unwrap();

        assert_vec_eq(hit.normal_world, Vec3::Z);
        assert_vec_eq(hit.point_local, Vec3::new(0.1, 0.0, 0.5));
    }

    #[test]
    fn test_invalid_ray_is_rejected() {
        assert!(Ray::new(Vec3::ZERO, Vec3::ZERO).is_none());
        assert!(Ray::new(Vec3::splat(f32::NAN), Vec3::Z).is_none());
    }
}
