use rand::{rngs::StdRng, SeedableRng};

use crate::background::{paint_central_star, Starfield};
use crate::compositor::RenderList;
use crate::config::SceneConfig;
use crate::error::ConfigError;
use crate::geometry::{build_ring, Segment};
use crate::input::{OrbitControl, OrbitView};
use crate::math::Mat3;
use crate::overlay::diagnostic_lines;
use crate::raster::FrameBuffer;
use crate::transform::{compose_rotation, Projection};

/// Everything drawn each frame. Geometry is built once in [`Scene::new`];
/// afterwards only the view angles, star brightness and frame counter change.
pub struct Scene {
    config: SceneConfig,
    segments: Vec<Segment>,
    starfield: Starfield,
    twinkle_rng: StdRng,
    control: OrbitControl,
    projection: Projection,
    render_list: RenderList,
    frame: FrameBuffer,
    frame_index: u64,
}

impl Scene {
    pub fn new(config: SceneConfig) -> Result<Self, ConfigError> {
        config.validate()?;

        let mut rng = StdRng::seed_from_u64(config.seed);
        let segments = build_ring(&config.ring, &mut rng)?;
        let (width, height) = (config.window.width, config.window.height);
        let starfield = Starfield::new(width, height, &config.background, &mut rng);

        let camera = &config.camera;
        let control = OrbitControl::new(
            OrbitView {
                yaw: camera.initial_yaw,
                pitch: camera.initial_pitch,
            },
            camera.drag_sensitivity,
        );
        let projection =
            Projection::new(width, height, camera.scale).with_cull_margin(camera.cull_margin);

        Ok(Self {
            segments,
            starfield,
            twinkle_rng: StdRng::from_entropy(),
            control,
            projection,
            render_list: RenderList::new(),
            frame: FrameBuffer::new(width, height),
            frame_index: 0,
            config,
        })
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub fn control_mut(&mut self) -> &mut OrbitControl {
        &mut self.control
    }

    pub fn frame(&self) -> &FrameBuffer {
        &self.frame
    }

    pub fn frame_index(&self) -> u64 {
        self.frame_index
    }

    pub fn render_list(&self) -> &RenderList {
        &self.render_list
    }

    pub fn spin(&self) -> f32 {
        let camera = &self.config.camera;
        camera.base_spin + self.frame_index as f32 * camera.spin_per_frame
    }

    pub fn rotation(&self) -> Mat3 {
        let view = self.control.view();
        compose_rotation(view.yaw, view.pitch, self.spin())
    }

    pub fn render(&mut self) {
        self.frame.clear(self.config.background.clear);

        self.starfield.twinkle(&mut self.twinkle_rng);
        self.starfield.paint(&mut self.frame);
        paint_central_star(&mut self.frame, &self.config.background);

        let rotation = self.rotation();
        self.render_list
            .rebuild(&self.segments, &rotation, &self.projection, &self.config.style);
        self.render_list.paint(&mut self.frame, &self.config.style);
    }

    pub fn advance(&mut self) {
        self.frame_index += 1;
    }

    pub fn overlay_lines(&self) -> [String; 3] {
        let view = self.control.view();
        diagnostic_lines(view.pitch, view.yaw, self.spin())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn small_config() -> SceneConfig {
        let mut config = SceneConfig::default();
        config.window.width = 240;
        config.window.height = 180;
        config.camera.scale = 10.0;
        config.background.star_count = 20;
        config
    }

    #[test]
    fn invalid_config_is_rejected_before_rendering() {
        let mut config = small_config();
        config.ring.r_inner = -1.0;
        assert!(matches!(Scene::new(config), Err(ConfigError::Geometry(_))));
    }

    #[test]
    fn same_seed_builds_the_same_ring() {
        let a = Scene::new(small_config()).unwrap();
        let b = Scene::new(small_config()).unwrap();
        for (left, right) in a.segments().iter().zip(b.segments()) {
            assert_eq!(left.lights, right.lights);
        }
    }

    #[test]
    fn initial_rotation_uses_configured_angles() {
        let config = small_config();
        let scene = Scene::new(config.clone()).unwrap();
        let camera = &config.camera;
        let expected = compose_rotation(camera.initial_yaw, camera.initial_pitch, camera.base_spin);
        assert_eq!(scene.rotation(), expected);
    }

    #[test]
    fn spin_advances_one_step_per_frame() {
        let mut scene = Scene::new(small_config()).unwrap();
        let start = scene.spin();
        for _ in 0..600 {
            scene.advance();
        }
        assert_eq!(scene.frame_index(), 600);
        assert!((scene.spin() - start - std::f32::consts::TAU).abs() < 1e-4);
    }

    #[test]
    fn drag_changes_the_rendered_view() {
        let mut scene = Scene::new(small_config()).unwrap();
        let before = scene.rotation();
        scene.control_mut().press((0.0, 0.0));
        scene.control_mut().motion((100.0, 0.0));
        assert_ne!(scene.rotation(), before);
        assert!(scene.overlay_lines()[1].starts_with("Rot Y (Yaw):   70.6"));
    }

    #[test]
    fn rendered_frame_holds_every_face_twice_and_some_ring_pixels() {
        let mut scene = Scene::new(small_config()).unwrap();
        scene.render();
        let faces: usize = scene.segments().iter().map(|s| s.faces.len()).sum();
        assert_eq!(scene.render_list().items().len(), 2 * faces);

        let frame = scene.frame();
        assert_eq!(frame.color_buffer().len(), 240 * 180);
        // The central star is drawn under the ring.
        let lit = frame.color_buffer().iter().filter(|&&p| p != 0).count();
        assert!(lit > 1000);
    }
}
