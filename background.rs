//! Backdrop painted under the ring: a twinkling starfield and the glowing
//! star the ring is built around.

use rand::Rng;

use crate::config::BackgroundConfig;
use crate::math::{Color, Rgba, Vec2};
use crate::raster::FrameBuffer;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BackgroundStar {
    pub x: u32,
    pub y: u32,
    pub size: f32,
    /// 100..=255, re-rolled now and then to twinkle.
    pub brightness: u8,
    pub color: Color,
}

pub struct Starfield {
    stars: Vec<BackgroundStar>,
    twinkle_chance: f64,
}

impl Starfield {
    pub fn new<R: Rng + ?Sized>(
        width: usize,
        height: usize,
        config: &BackgroundConfig,
        rng: &mut R,
    ) -> Self {
        let stars = (0..config.star_count)
            .map(|_| {
                let color = Color::from_hsv(rng.gen::<f32>(), 1.0, 1.0);
                BackgroundStar {
                    x: rng.gen_range(0..=width as u32),
                    y: rng.gen_range(0..=height as u32),
                    size: rng.gen_range(0.5..2.0),
                    brightness: rng.gen_range(100..=255),
                    color,
                }
            })
            .collect();
        Self {
            stars,
            twinkle_chance: config.twinkle_chance,
        }
    }

    pub fn stars(&self) -> &[BackgroundStar] {
        &self.stars
    }

    pub fn twinkle<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        for star in &mut self.stars {
            if rng.gen_bool(self.twinkle_chance) {
                star.brightness = rng.gen_range(100..=255);
            }
        }
    }

    pub fn paint(&self, frame: &mut FrameBuffer) {
        for star in &self.stars {
            let dim = star.color * (star.brightness as f32 / 255.0);
            frame.fill_circle(Vec2::new(star.x as f32, star.y as f32), star.size, dim);
        }
    }
}

/// The star at the ring's center: stacked translucent glow discs under a
/// solid core.
pub fn paint_central_star(frame: &mut FrameBuffer, config: &BackgroundConfig) {
    let center = Vec2::new((frame.width() / 2) as f32, (frame.height() / 2) as f32);
    let glow = Rgba {
        color: Color::WHITE,
        alpha: config.glow_alpha,
    };
    let mut radius = config.glow_radius;
    while radius > 0.0 {
        frame.blend_circle(center, radius, glow);
        radius -= config.glow_step;
    }
    frame.fill_circle(center, config.star_radius, Color::WHITE);
}
