//! City-light speckles scattered over segment faces.

use rand::Rng;

use crate::geometry::Face;
use crate::math::{Color, Vec3};

const HIGHLIGHT_CHANCE: f64 = 0.1;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Light {
    pub position: Vec3,
    pub radius: f32,
    pub color: Color,
}

/// Bilinear point on the quad `indices`, `u` running a→b and `v` running a→d.
pub fn bilinear(vertices: &[Vec3], indices: [usize; 4], u: f32, v: f32) -> Vec3 {
    let [a, b, c, d] = indices.map(|idx| vertices[idx]);
    a * ((1.0 - u) * (1.0 - v)) + b * (u * (1.0 - v)) + c * (u * v) + d * ((1.0 - u) * v)
}

/// Picks a uniformly random point on a face. Anything that is not a quad
/// yields its first vertex.
pub fn sample_point_on_face<R: Rng + ?Sized>(
    vertices: &[Vec3],
    indices: &[usize],
    rng: &mut R,
) -> Vec3 {
    match *indices {
        [a, b, c, d] => {
            let u = rng.gen::<f32>();
            let v = rng.gen::<f32>();
            bilinear(vertices, [a, b, c, d], u, v)
        }
        _ => vertices[indices[0]],
    }
}

fn random_light<R: Rng + ?Sized>(position: Vec3, rng: &mut R) -> Light {
    let radius = if rng.gen_bool(HIGHLIGHT_CHANCE) {
        rng.gen_range(3.0..8.0)
    } else {
        rng.gen_range(0.15..2.5)
    };
    let color = Color::from_rgb8(
        rng.gen_range(100..=200),
        rng.gen_range(0..=30),
        rng.gen_range(0..=30),
    );
    Light {
        position,
        radius,
        color,
    }
}

/// Scatters `count` lights over randomly chosen faces. The result has one
/// list per face, indexed like `faces`.
pub fn scatter_lights<R: Rng + ?Sized>(
    vertices: &[Vec3],
    faces: &[Face],
    count: usize,
    rng: &mut R,
) -> Vec<Vec<Light>> {
    let mut per_face = vec![Vec::new(); faces.len()];
    if faces.is_empty() {
        return per_face;
    }
    for _ in 0..count {
        let face_index = rng.gen_range(0..faces.len());
        let position = sample_point_on_face(vertices, &faces[face_index].indices, rng);
        per_face[face_index].push(random_light(position, rng));
    }
    per_face
}
