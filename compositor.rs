use std::ops::Range;

use crate::config::FaceStyle;
use crate::geometry::Segment;
use crate::math::{Color, Mat3, Vec2};
use crate::raster::FrameBuffer;
use crate::transform::{rotate_points, Projection};

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ProjectedLight {
    pub position: Vec2,
    pub radius: f32,
    pub color: Color,
}

#[derive(Clone, Debug, PartialEq)]
pub struct RenderItem {
    pub depth: f32,
    pub polygon: [Vec2; 4],
    pub edge_color: Color,
    pub edge_flags: [bool; 4],
    /// Range into [`RenderList::lights`] holding this face's lights. Front
    /// and back copies share the same range.
    pub lights: Range<usize>,
    pub is_back: bool,
}

/// Re-maps edge flags after the winding of a polygon is reversed.
///
/// With corners `p0..pn` reversed, the edge list runs backwards except for the
/// closing edge, which connects the same two corners in both windings.
pub fn reverse_edge_flags<const N: usize>(flags: [bool; N]) -> [bool; N] {
    let mut out = flags;
    if N > 1 {
        out[..N - 1].reverse();
    }
    out
}

#[derive(Debug, Default)]
pub struct RenderList {
    items: Vec<RenderItem>,
    lights: Vec<ProjectedLight>,
}

impl RenderList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.items.clear();
        self.lights.clear();
    }

    pub fn items(&self) -> &[RenderItem] {
        &self.items
    }

    pub fn lights(&self) -> &[ProjectedLight] {
        &self.lights
    }

    pub fn lights_of(&self, item: &RenderItem) -> &[ProjectedLight] {
        &self.lights[item.lights.clone()]
    }

    /// Rebuilds the list for one frame and sorts it far to near.
    pub fn rebuild(
        &mut self,
        segments: &[Segment],
        rotation: &Mat3,
        projection: &Projection,
        style: &FaceStyle,
    ) {
        self.clear();
        for segment in segments {
            self.push_segment(segment, rotation, projection, style);
        }
        // Stable, so equal keys keep their emission order.
        self.items.sort_by(|a, b| a.depth.total_cmp(&b.depth));
        log::trace!(
            "render list: {} items, {} lights",
            self.items.len(),
            self.lights.len()
        );
    }

    fn push_segment(
        &mut self,
        segment: &Segment,
        rotation: &Mat3,
        projection: &Projection,
        style: &FaceStyle,
    ) {
        let world = rotate_points(&segment.vertices, rotation);
        let screen = projection.project_points(&world);

        for (face, face_lights) in segment.faces.iter().zip(&segment.lights) {
            if !face.indices.iter().all(|&idx| screen[idx].visible) {
                continue;
            }
            let polygon = face.indices.map(|idx| screen[idx].position);
            let depth = face.indices.iter().map(|&idx| world[idx].z).sum::<f32>()
                / face.indices.len() as f32;

            let start = self.lights.len();
            self.lights.extend(face_lights.iter().map(|light| ProjectedLight {
                position: projection.project(*rotation * light.position),
                radius: light.radius,
                color: light.color,
            }));
            let lights = start..self.lights.len();

            self.items.push(RenderItem {
                depth,
                polygon,
                edge_color: style.front_edge,
                edge_flags: face.edge_flags,
                lights: lights.clone(),
                is_back: false,
            });

            let mut back_polygon = polygon;
            back_polygon.reverse();
            self.items.push(RenderItem {
                depth: depth - style.depth_epsilon,
                polygon: back_polygon,
                edge_color: style.back_edge,
                edge_flags: reverse_edge_flags(face.edge_flags),
                lights,
                is_back: true,
            });
        }
    }

    pub fn paint(&self, frame: &mut FrameBuffer, style: &FaceStyle) {
        for item in &self.items {
            let fill = if item.is_back {
                style.back_fill
            } else {
                style.front_fill
            };
            frame.draw_translucent_polygon(&item.polygon, fill);

            let corners = item.polygon.len();
            for (k, &draw) in item.edge_flags.iter().enumerate().take(corners) {
                if draw {
                    frame.draw_line(item.polygon[k], item.polygon[(k + 1) % corners], item.edge_color);
                }
            }
        }

        for light in &self.lights {
            let radius = light.radius.trunc().max(1.0);
            frame.fill_circle(light.position, radius, light.color);
        }
    }
}
