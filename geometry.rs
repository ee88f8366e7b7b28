//! Procedural ring geometry.
//!
//! A segment is swept along an arc as `subdivisions + 1` rings of four
//! cross-section corners. Neighbouring rings are stitched with four side quads
//! and both ends are closed with a cap.

use rand::Rng;

use crate::config::RingConfig;
use crate::error::GeometryError;
use crate::lights::{scatter_lights, Light};
use crate::math::Vec3;

/// Cross-section corners per ring: inner-bottom, outer-bottom, outer-top, inner-top.
pub const CORNERS: usize = 4;

/// A quad given by four vertex indices. `edge_flags[k]` decides whether the
/// edge from corner `k` to corner `(k + 1) % 4` is stroked.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Face {
    pub indices: [usize; 4],
    pub edge_flags: [bool; 4],
}

#[derive(Clone, Copy, Debug)]
pub struct SegmentParams {
    pub angle_center: f32,
    pub angle_span: f32,
    pub r_inner: f32,
    pub r_outer: f32,
    pub height: f32,
    pub subdivisions: usize,
    /// Reserved for chamfered cross-sections. The current cross-section is a
    /// plain rectangle and this value has no effect.
    pub bevel: f32,
}

impl SegmentParams {
    pub fn validate(&self) -> Result<(), GeometryError> {
        if self.subdivisions < 1 {
            return Err(GeometryError::NoSubdivisions(self.subdivisions));
        }
        for (name, value) in [
            ("inner radius", self.r_inner),
            ("outer radius", self.r_outer),
            ("height", self.height),
        ] {
            if !(value.is_finite() && value > 0.0) {
                return Err(GeometryError::NonPositive { name, value });
            }
        }
        if self.r_inner >= self.r_outer {
            return Err(GeometryError::InvertedRadii {
                inner: self.r_inner,
                outer: self.r_outer,
            });
        }
        for (name, value) in [
            ("angle center", self.angle_center),
            ("angle span", self.angle_span),
        ] {
            if !value.is_finite() {
                return Err(GeometryError::NonFinite { name, value });
            }
        }
        Ok(())
    }
}

#[derive(Clone, Debug)]
pub struct Segment {
    pub vertices: Vec<Vec3>,
    pub faces: Vec<Face>,
    /// Lights grouped by the index of the face they sit on.
    pub lights: Vec<Vec<Light>>,
}

impl Segment {
    pub fn light_count(&self) -> usize {
        self.lights.iter().map(Vec::len).sum()
    }
}

pub fn build_segment(params: &SegmentParams) -> Result<(Vec<Vec3>, Vec<Face>), GeometryError> {
    params.validate()?;

    let radii = [params.r_inner, params.r_outer, params.r_outer, params.r_inner];
    let half_height = params.height * 0.5;
    let zs = [-half_height, -half_height, half_height, half_height];

    let n_rings = params.subdivisions + 1;
    let start = params.angle_center - params.angle_span * 0.5;
    let step = params.angle_span / params.subdivisions as f32;

    let mut vertices = Vec::with_capacity(n_rings * CORNERS);
    let mut faces = Vec::with_capacity(params.subdivisions * CORNERS + 2);

    for ring in 0..n_rings {
        let theta = start + step * ring as f32;
        let (sin, cos) = theta.sin_cos();
        for corner in 0..CORNERS {
            vertices.push(Vec3::new(radii[corner] * cos, radii[corner] * sin, zs[corner]));
        }

        if ring == 0 {
            continue;
        }
        let base = ring * CORNERS;
        let prev_base = (ring - 1) * CORNERS;
        // Long edges always draw; the ring-wise edges only on the first and
        // last step so interior seams stay clean.
        let edge_flags = [true, ring == n_rings - 1, true, ring == 1];
        for corner in 0..CORNERS {
            let next = (corner + 1) % CORNERS;
            faces.push(Face {
                indices: [prev_base + corner, base + corner, base + next, prev_base + next],
                edge_flags,
            });
        }
    }

    let last = (n_rings - 1) * CORNERS;
    faces.push(Face {
        indices: [0, 1, 2, 3],
        edge_flags: [true; 4],
    });
    faces.push(Face {
        indices: [last + 3, last + 2, last + 1, last],
        edge_flags: [true; 4],
    });

    Ok((vertices, faces))
}

pub fn build_ring<R: Rng + ?Sized>(
    config: &RingConfig,
    rng: &mut R,
) -> Result<Vec<Segment>, GeometryError> {
    (0..config.n_segments)
        .map(|index| {
            let (vertices, faces) = build_segment(&config.segment_params(index))?;
            let lights = scatter_lights(&vertices, &faces, config.lights_per_segment, rng);
            Ok(Segment {
                vertices,
                faces,
                lights,
            })
        })
        .collect()
}
