//! CPU rasterization into a `0RGB` pixel buffer.

use crate::math::{Color, Rgba, Vec2};

const LAYER_PADDING: i32 = 2;

pub struct FrameBuffer {
    width: usize,
    height: usize,
    color: Vec<u32>,
}

impl FrameBuffer {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            color: vec![0; width * height],
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn color_buffer(&self) -> &[u32] {
        &self.color
    }

    pub fn clear(&mut self, color: Color) {
        self.color.fill(color.to_u32());
    }

    pub fn pixel(&self, x: usize, y: usize) -> Option<Color> {
        (x < self.width && y < self.height).then(|| Color::from_u32(self.color[y * self.width + x]))
    }

    fn index(&self, x: i32, y: i32) -> Option<usize> {
        (x >= 0 && y >= 0 && (x as usize) < self.width && (y as usize) < self.height)
            .then(|| y as usize * self.width + x as usize)
    }

    fn put(&mut self, x: i32, y: i32, color: u32) {
        if let Some(idx) = self.index(x, y) {
            self.color[idx] = color;
        }
    }

    fn blend(&mut self, x: i32, y: i32, src: Rgba) {
        if src.alpha <= 0.0 {
            return;
        }
        if let Some(idx) = self.index(x, y) {
            let base = Color::from_u32(self.color[idx]);
            self.color[idx] = Color::lerp(base, src.color, src.alpha.min(1.0)).to_u32();
        }
    }

    pub fn draw_line(&mut self, start: Vec2, end: Vec2, color: Color) {
        let packed = color.to_u32();
        let mut x0 = start.x.round() as i32;
        let mut y0 = start.y.round() as i32;
        let x1 = end.x.round() as i32;
        let y1 = end.y.round() as i32;
        let dx = (x1 - x0).abs();
        let sx = if x0 < x1 { 1 } else { -1 };
        let dy = -(y1 - y0).abs();
        let sy = if y0 < y1 { 1 } else { -1 };
        let mut err = dx + dy;
        loop {
            self.put(x0, y0, packed);
            if x0 == x1 && y0 == y1 {
                break;
            }
            let e2 = 2 * err;
            if e2 >= dy {
                err += dy;
                x0 += sx;
            }
            if e2 <= dx {
                err += dx;
                y0 += sy;
            }
        }
    }

    /// Opaque disc. Radii below one still cover the center pixel.
    pub fn fill_circle(&mut self, center: Vec2, radius: f32, color: Color) {
        let packed = color.to_u32();
        for_each_disc_pixel(center, radius, |x, y| self.put(x, y, packed));
    }

    pub fn blend_circle(&mut self, center: Vec2, radius: f32, color: Rgba) {
        for_each_disc_pixel(center, radius, |x, y| self.blend(x, y, color));
    }

    pub fn composite(&mut self, layer: &Layer, offset_x: i32, offset_y: i32) {
        for ly in 0..layer.height {
            for lx in 0..layer.width {
                let src = layer.pixels[ly * layer.width + lx];
                self.blend(offset_x + lx as i32, offset_y + ly as i32, src);
            }
        }
    }

    /// Fills a polygon with a translucent color by rasterizing it into a
    /// bounding-box sized layer and compositing that layer onto the frame.
    pub fn draw_translucent_polygon(&mut self, points: &[Vec2], color: Rgba) {
        if points.len() < 3 {
            return;
        }
        let (mut min_x, mut min_y) = (f32::INFINITY, f32::INFINITY);
        let (mut max_x, mut max_y) = (f32::NEG_INFINITY, f32::NEG_INFINITY);
        for p in points {
            min_x = min_x.min(p.x);
            min_y = min_y.min(p.y);
            max_x = max_x.max(p.x);
            max_y = max_y.max(p.y);
        }
        if !(min_x.is_finite() && min_y.is_finite() && max_x.is_finite() && max_y.is_finite()) {
            return;
        }
        // Only the part of the bounding box that lands on the frame is rasterized.
        let pad = LAYER_PADDING as f32;
        let left = (min_x.floor() - pad).max(0.0);
        let top = (min_y.floor() - pad).max(0.0);
        let right = (max_x.ceil() + pad).min(self.width as f32);
        let bottom = (max_y.ceil() + pad).min(self.height as f32);
        if left >= right || top >= bottom {
            return;
        }
        let (offset_x, offset_y) = (left as i32, top as i32);
        let width = (right - left) as usize;
        let height = (bottom - top) as usize;

        let local: Vec<Vec2> = points
            .iter()
            .map(|p| Vec2::new(p.x - offset_x as f32, p.y - offset_y as f32))
            .collect();
        let mut layer = Layer::new(width, height);
        layer.fill_polygon(&local, color);
        self.composite(&layer, offset_x, offset_y);
    }
}

fn for_each_disc_pixel(center: Vec2, radius: f32, mut plot: impl FnMut(i32, i32)) {
    let cx = center.x as i32;
    let cy = center.y as i32;
    let r = radius.max(0.0);
    let reach = r.ceil() as i32;
    let r2 = r * r;
    for dy in -reach..=reach {
        for dx in -reach..=reach {
            if (dx == 0 && dy == 0) || (dx * dx + dy * dy) as f32 <= r2 {
                plot(cx + dx, cy + dy);
            }
        }
    }
}

/// Transparent scratch surface covering the on-frame part of one polygon's bounding box.
pub struct Layer {
    width: usize,
    height: usize,
    pixels: Vec<Rgba>,
}

impl Layer {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            pixels: vec![Rgba::TRANSPARENT; width * height],
        }
    }

    pub fn pixel(&self, x: usize, y: usize) -> Rgba {
        self.pixels[y * self.width + x]
    }

    /// Even-odd scanline fill sampled at pixel centers.
    pub fn fill_polygon(&mut self, points: &[Vec2], color: Rgba) {
        if points.len() < 3 {
            return;
        }
        let mut crossings = Vec::with_capacity(points.len());
        for y in 0..self.height {
            let py = y as f32 + 0.5;
            crossings.clear();
            for (i, a) in points.iter().enumerate() {
                let b = points[(i + 1) % points.len()];
                // Half-open so a vertex on the scanline is counted once.
                if (a.y <= py) != (b.y <= py) {
                    let t = (py - a.y) / (b.y - a.y);
                    crossings.push(a.x + t * (b.x - a.x));
                }
            }
            crossings.sort_by(f32::total_cmp);
            for span in crossings.chunks_exact(2) {
                let start = (span[0] - 0.5).ceil().max(0.0);
                let end = (span[1] - 0.5).floor().min(self.width as f32 - 1.0);
                if end < start {
                    continue;
                }
                let row = y * self.width;
                self.pixels[row + start as usize..=row + end as usize].fill(color);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square(x0: f32, y0: f32, size: f32) -> Vec<Vec2> {
        vec![
            Vec2::new(x0, y0),
            Vec2::new(x0 + size, y0),
            Vec2::new(x0 + size, y0 + size),
            Vec2::new(x0, y0 + size),
        ]
    }

    #[test]
    fn clear_fills_every_pixel() {
        let mut frame = FrameBuffer::new(4, 3);
        frame.clear(Color::from_rgb8(1, 2, 3));
        assert!(frame.color_buffer().iter().all(|&p| p == 0x0001_0203));
    }

    #[test]
    fn line_hits_both_endpoints_and_clips() {
        let mut frame = FrameBuffer::new(10, 10);
        frame.draw_line(Vec2::new(-5.0, 2.0), Vec2::new(7.0, 2.0), Color::WHITE);
        assert_eq!(frame.pixel(0, 2), Some(Color::WHITE));
        assert_eq!(frame.pixel(7, 2), Some(Color::WHITE));
        assert_eq!(frame.pixel(8, 2), Some(Color::BLACK));
    }

    #[test]
    fn layer_fill_covers_interior_only() {
        let mut layer = Layer::new(10, 10);
        let red = Rgba::from_rgba8(255, 0, 0, 255);
        layer.fill_polygon(&square(2.0, 2.0, 4.0), red);
        assert_eq!(layer.pixel(2, 2), red);
        assert_eq!(layer.pixel(5, 5), red);
        assert_eq!(layer.pixel(6, 6), Rgba::TRANSPARENT);
        assert_eq!(layer.pixel(1, 3), Rgba::TRANSPARENT);
    }

    #[test]
    fn winding_does_not_change_coverage() {
        let color = Rgba::from_rgba8(0, 255, 0, 80);
        let points = square(1.0, 1.0, 5.0);
        let mut reversed = points.clone();
        reversed.reverse();
        let mut a = Layer::new(8, 8);
        let mut b = Layer::new(8, 8);
        a.fill_polygon(&points, color);
        b.fill_polygon(&reversed, color);
        assert_eq!(a.pixels, b.pixels);
    }

    #[test]
    fn translucent_fill_blends_with_the_frame() {
        let mut frame = FrameBuffer::new(20, 20);
        frame.clear(Color::BLACK);
        let half_white = Rgba {
            color: Color::WHITE,
            alpha: 0.5,
        };
        frame.draw_translucent_polygon(&square(5.0, 5.0, 6.0), half_white);
        let inside = frame.pixel(8, 8).unwrap();
        assert!((inside.r - 0.5).abs() < 0.01);
        assert_eq!(frame.pixel(1, 1), Some(Color::BLACK));

        // Overlapping fills accumulate.
        frame.draw_translucent_polygon(&square(5.0, 5.0, 6.0), half_white);
        let twice = frame.pixel(8, 8).unwrap();
        assert!((twice.r - 0.75).abs() < 0.01);
    }

    #[test]
    fn polygon_partly_offscreen_is_clipped() {
        let mut frame = FrameBuffer::new(10, 10);
        let opaque = Rgba::from_rgba8(255, 255, 255, 255);
        frame.draw_translucent_polygon(&square(-5.0, -5.0, 8.0), opaque);
        assert_eq!(frame.pixel(0, 0), Some(Color::WHITE));
        assert_eq!(frame.pixel(5, 5), Some(Color::BLACK));
    }

    #[test]
    fn huge_polygon_only_touches_the_frame() {
        let mut frame = FrameBuffer::new(100, 100);
        let half_white = Rgba {
            color: Color::WHITE,
            alpha: 0.5,
        };
        frame.draw_translucent_polygon(&square(-60000.0, -60000.0, 120000.0), half_white);
        let expected = Color::lerp(Color::BLACK, Color::WHITE, 0.5).to_u32();
        assert!(frame.color_buffer().iter().all(|&p| p == expected));

        let mut untouched = FrameBuffer::new(100, 100);
        untouched.draw_translucent_polygon(&square(5000.0, 5000.0, 60000.0), half_white);
        assert!(untouched.color_buffer().iter().all(|&p| p == 0));
    }

    #[test]
    fn degenerate_polygons_draw_nothing() {
        let mut frame = FrameBuffer::new(10, 10);
        let opaque = Rgba::from_rgba8(255, 255, 255, 255);
        frame.draw_translucent_polygon(&[Vec2::new(1.0, 1.0), Vec2::new(5.0, 5.0)], opaque);
        assert!(frame.color_buffer().iter().all(|&p| p == 0));
    }

    #[test]
    fn tiny_circles_still_show_a_pixel() {
        let mut frame = FrameBuffer::new(10, 10);
        frame.fill_circle(Vec2::new(4.0, 4.0), 0.3, Color::WHITE);
        assert_eq!(frame.pixel(4, 4), Some(Color::WHITE));
        assert_eq!(frame.pixel(5, 4), Some(Color::BLACK));
    }

    #[test]
    fn circle_center_is_truncated_to_its_pixel() {
        let mut frame = FrameBuffer::new(10, 10);
        frame.fill_circle(Vec2::new(4.7, 4.9), 0.3, Color::WHITE);
        assert_eq!(frame.pixel(4, 4), Some(Color::WHITE));
        assert_eq!(frame.pixel(5, 5), Some(Color::BLACK));
    }

    #[test]
    fn circle_radius_bounds_the_disc() {
        let mut frame = FrameBuffer::new(20, 20);
        frame.fill_circle(Vec2::new(10.0, 10.0), 3.0, Color::WHITE);
        assert_eq!(frame.pixel(13, 10), Some(Color::WHITE));
        assert_eq!(frame.pixel(14, 10), Some(Color::BLACK));
        assert_eq!(frame.pixel(13, 13), Some(Color::BLACK));
    }
}
