use crate::math::{Mat3, Vec2, Vec3};

/// Builds `Yaw · Pitch · Spin`: spin about the ring axis is applied first,
/// then the tilt, then the camera orbit.
pub fn compose_rotation(yaw: f32, pitch: f32, spin: f32) -> Mat3 {
    Mat3::rotation_y(yaw) * Mat3::rotation_x(pitch) * Mat3::rotation_z(spin)
}

pub fn rotate_points(points: &[Vec3], rotation: &Mat3) -> Vec<Vec3> {
    points.iter().map(|&point| *rotation * point).collect()
}

/// Orthographic projection onto a screen of fixed size. Z only matters for
/// depth ordering and never reaches the screen position.
#[derive(Clone, Copy, Debug)]
pub struct Projection {
    pub width: usize,
    pub height: usize,
    pub scale: f32,
    /// When set, points projecting further than this many pixels outside the
    /// screen are reported invisible. `None` keeps everything visible.
    pub cull_margin: Option<f32>,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScreenPoint {
    pub position: Vec2,
    pub visible: bool,
}

impl Projection {
    pub fn new(width: usize, height: usize, scale: f32) -> Self {
        Self {
            width,
            height,
            scale,
            cull_margin: None,
        }
    }

    pub fn with_cull_margin(mut self, margin: Option<f32>) -> Self {
        self.cull_margin = margin;
        self
    }

    pub fn project(&self, point: Vec3) -> Vec2 {
        Vec2::new(
            self.width as f32 * 0.5 + point.x * self.scale,
            self.height as f32 * 0.5 - point.y * self.scale,
        )
    }

    pub fn is_visible(&self, screen: Vec2) -> bool {
        match self.cull_margin {
            None => true,
            Some(margin) => {
                screen.x >= -margin
                    && screen.y >= -margin
                    && screen.x <= self.width as f32 + margin
                    && screen.y <= self.height as f32 + margin
            }
        }
    }

    pub fn project_points(&self, points: &[Vec3]) -> Vec<ScreenPoint> {
        points
            .iter()
            .map(|&point| {
                let position = self.project(point);
                ScreenPoint {
                    position,
                    visible: self.is_visible(position),
                }
            })
            .collect()
    }
}
