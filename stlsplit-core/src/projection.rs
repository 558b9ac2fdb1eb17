/// Spherical texture projection from vertex normals
use nalgebra::{Vector2, Vector3};
use std::f32::consts::PI;

use crate::geometry::Mesh;

/// Map a normal direction onto equirectangular texture coordinates.
///
/// `u` follows the longitude around the Y axis, `v` the latitude with +Y at
/// the top (v = 0). A zero normal maps to the texture centre.
pub fn spherical_uv(normal: &Vector3<f32>) -> Vector2<f32> {
    let Some(n) = normal.try_normalize(f32::EPSILON) else {
        return Vector2::new(0.5, 0.5);
    };

    let u = 0.5 + n.z.atan2(n.x) / (2.0 * PI);
    let v = 0.5 - n.y.clamp(-1.0, 1.0).asin() / PI;
    Vector2::new(u, v)
}

impl Mesh {
    /// Fill every texture coordinate from its vertex normal.
    pub fn apply_spherical_uvs(&mut self) {
        for vertex in &mut self.vertices {
            vertex.tex_coord = spherical_uv(&vertex.normal);
        }
    }
}
