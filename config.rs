use std::f32::consts::TAU;

use crate::error::ConfigError;
use crate::geometry::SegmentParams;
use crate::math::{Color, Rgba};

#[derive(Clone, Debug)]
pub struct SceneConfig {
    pub window: WindowConfig,
    pub ring: RingConfig,
    pub camera: CameraConfig,
    pub style: FaceStyle,
    pub background: BackgroundConfig,
    pub seed: u64,
}

#[derive(Clone, Debug)]
pub struct WindowConfig {
    pub title: &'static str,
    pub width: usize,
    pub height: usize,
    pub fps: u32,
}

#[derive(Clone, Debug)]
pub struct RingConfig {
    pub n_segments: usize,
    /// Total angle covered by all segments, radians.
    pub arc_span: f32,
    pub arc_start: f32,
    /// Fraction of each segment's angular slot that is filled; the rest is gap.
    pub segment_fill: f32,
    pub r_inner: f32,
    pub r_outer: f32,
    pub height: f32,
    pub subdivisions: usize,
    pub bevel: f32,
    pub lights_per_segment: usize,
}

#[derive(Clone, Debug)]
pub struct CameraConfig {
    pub scale: f32,
    pub initial_pitch: f32,
    pub initial_yaw: f32,
    pub base_spin: f32,
    pub spin_per_frame: f32,
    pub drag_sensitivity: f32,
    /// Off-screen culling margin in pixels; `None` keeps every point visible.
    pub cull_margin: Option<f32>,
}

#[derive(Clone, Copy, Debug)]
pub struct FaceStyle {
    pub front_edge: Color,
    pub back_edge: Color,
    pub front_fill: Rgba,
    pub back_fill: Rgba,
    pub depth_epsilon: f32,
}

#[derive(Clone, Debug)]
pub struct BackgroundConfig {
    pub clear: Color,
    pub star_count: usize,
    pub star_radius: f32,
    pub glow_radius: f32,
    pub glow_step: f32,
    pub glow_alpha: f32,
    /// Per-frame probability that a star re-rolls its brightness.
    pub twinkle_chance: f64,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            window: WindowConfig::default(),
            ring: RingConfig::default(),
            camera: CameraConfig::default(),
            style: FaceStyle::default(),
            background: BackgroundConfig::default(),
            seed: 0x5EED_D150,
        }
    }
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "Dyson Ring - 3/4 Orbital View",
            width: 1200,
            height: 900,
            fps: 60,
        }
    }
}

impl Default for RingConfig {
    fn default() -> Self {
        Self {
            n_segments: 12,
            arc_span: TAU,
            arc_start: (-85.0f32).to_radians(),
            segment_fill: 0.90,
            r_inner: 4.5,
            r_outer: 7.5,
            height: 2.5,
            subdivisions: 6,
            bevel: 0.15,
            lights_per_segment: 200,
        }
    }
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            scale: 52.5,
            initial_pitch: 38.0f32.to_radians(),
            initial_yaw: 42.0f32.to_radians(),
            base_spin: 45.0f32.to_radians(),
            spin_per_frame: TAU / 600.0,
            drag_sensitivity: 0.005,
            cull_margin: None,
        }
    }
}

impl Default for FaceStyle {
    fn default() -> Self {
        Self {
            front_edge: Color::from_rgb8(0, 255, 0),
            back_edge: Color::from_rgb8(0, 200, 255),
            front_fill: Rgba::from_rgba8(0, 255, 0, 80),
            back_fill: Rgba::from_rgba8(0, 200, 255, 45),
            depth_epsilon: 1e-4,
        }
    }
}

impl Default for BackgroundConfig {
    fn default() -> Self {
        Self {
            clear: Color::BLACK,
            star_count: 600,
            star_radius: 8.0,
            glow_radius: 30.0,
            glow_step: 5.0,
            glow_alpha: 15.0 / 255.0,
            twinkle_chance: 0.02,
        }
    }
}

impl RingConfig {
    pub fn slot_span(&self) -> f32 {
        self.arc_span / self.n_segments as f32
    }

    pub fn segment_params(&self, index: usize) -> SegmentParams {
        let step = self.slot_span();
        SegmentParams {
            angle_center: self.arc_start + step * (index as f32 + 0.5),
            angle_span: step * self.segment_fill,
            r_inner: self.r_inner,
            r_outer: self.r_outer,
            height: self.height,
            subdivisions: self.subdivisions,
            bevel: self.bevel,
        }
    }
}

impl SceneConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        let window = &self.window;
        if window.width == 0 || window.height == 0 {
            return Err(ConfigError::EmptyWindow {
                width: window.width,
                height: window.height,
            });
        }
        if window.fps == 0 {
            return Err(ConfigError::Invalid("fps must be at least 1".into()));
        }

        let ring = &self.ring;
        if ring.n_segments == 0 {
            return Err(ConfigError::Invalid("ring needs at least one segment".into()));
        }
        if !(ring.arc_span.is_finite() && ring.arc_span > 0.0) {
            return Err(ConfigError::Invalid(format!(
                "arc span must be positive, got {}",
                ring.arc_span
            )));
        }
        if !(ring.segment_fill > 0.0 && ring.segment_fill <= 1.0) {
            return Err(ConfigError::Invalid(format!(
                "segment fill must be in (0, 1], got {}",
                ring.segment_fill
            )));
        }
        ring.segment_params(0).validate()?;

        let camera = &self.camera;
        if !(camera.scale.is_finite() && camera.scale > 0.0) {
            return Err(ConfigError::Invalid(format!(
                "projection scale must be positive, got {}",
                camera.scale
            )));
        }
        if matches!(camera.cull_margin, Some(margin) if !margin.is_finite()) {
            return Err(ConfigError::Invalid("cull margin must be finite".into()));
        }

        // Back twins must sort strictly before their front faces.
        if !(self.style.depth_epsilon > 0.0 && self.style.depth_epsilon.is_finite()) {
            return Err(ConfigError::Invalid(format!(
                "depth epsilon must be positive, got {}",
                self.style.depth_epsilon
            )));
        }

        let background = &self.background;
        if !(0.0..=1.0).contains(&background.twinkle_chance) {
            return Err(ConfigError::Invalid(format!(
                "twinkle chance must be a probability, got {}",
                background.twinkle_chance
            )));
        }
        if background.glow_step <= 0.0 {
            return Err(ConfigError::Invalid("glow step must be positive".into()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::GeometryError;

    #[test]
    fn defaults_are_valid() {
        SceneConfig::default().validate().expect("default config");
    }

    #[test]
    fn default_segment_span_leaves_gaps() {
        let ring = RingConfig::default();
        let params = ring.segment_params(0);
        assert!((params.angle_span - 27.0f32.to_radians()).abs() < 1e-5);
        assert!((params.angle_center - (-85.0f32 + 15.0).to_radians()).abs() < 1e-5);
    }

    #[test]
    fn segments_are_spread_over_the_arc() {
        let ring = RingConfig::default();
        let first = ring.segment_params(0).angle_center;
        let last = ring.segment_params(ring.n_segments - 1).angle_center;
        assert!((last - first - ring.slot_span() * 11.0).abs() < 1e-4);
    }

    #[test]
    fn zero_window_is_rejected() {
        let mut config = SceneConfig::default();
        config.window.height = 0;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::EmptyWindow { width: 1200, height: 0 })
        ));
    }

    #[test]
    fn bad_ring_geometry_surfaces_geometry_error() {
        let mut config = SceneConfig::default();
        config.ring.subdivisions = 0;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::Geometry(GeometryError::NoSubdivisions(0)))
        ));
    }

    #[test]
    fn segment_fill_outside_unit_interval_is_rejected() {
        let mut config = SceneConfig::default();
        config.ring.segment_fill = 1.5;
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn zero_depth_epsilon_is_rejected() {
        let mut config = SceneConfig::default();
        config.style.depth_epsilon = 0.0;
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));
    }
}
