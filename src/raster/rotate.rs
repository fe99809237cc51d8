//! Rigid rotation of a canvas about a pivot
//!
//! Follows the usual image-space convention: y grows downward and a positive
//! angle turns the picture counter-clockwise as displayed. Resampling is
//! bilinear, and samples that land outside the source take the source
//! background color.

use glam::Vec2;
use image::Rgb;

use super::canvas::Canvas;

/// Rotation by a fixed angle about a fixed pivot
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rotation {
    /// Angle in degrees, normalized to [0, 360)
    degrees: f64,
    cos: f32,
    sin: f32,
    pivot: Vec2,
}

impl Rotation {
    pub fn new(degrees: f64, pivot: Vec2) -> Self {
        let degrees = if degrees.is_finite() {
            degrees.rem_euclid(360.0)
        } else {
            0.0
        };
        let radians = crate::degrees_to_radians(degrees);
        Self {
            degrees,
            cos: radians.cos() as f32,
            sin: radians.sin() as f32,
            pivot,
        }
    }

    /// Rotation about the canvas center (integer halving of each dimension)
    pub fn about_center(degrees: f64, width: u32, height: u32) -> Self {
        Self::new(degrees, Vec2::new((width / 2) as f32, (height / 2) as f32))
    }

    /// Angle for a frame: `frame_index * step_degrees`
    pub fn for_frame(frame_index: u64, step_degrees: f32, width: u32, height: u32) -> Self {
        Self::about_center(frame_index as f64 * step_degrees as f64, width, height)
    }

    #[inline]
    pub fn degrees(&self) -> f64 {
        self.degrees
    }

    #[inline]
    pub fn pivot(&self) -> Vec2 {
        self.pivot
    }

    /// Whole turns (including zero) leave pixels untouched
    #[inline]
    pub fn is_identity(&self) -> bool {
        self.degrees == 0.0
    }

    /// Where a source point lands in the rotated view
    pub fn apply(&self, p: Vec2) -> Vec2 {
        let d = p - self.pivot;
        self.pivot + Vec2::new(self.cos * d.x + self.sin * d.y, -self.sin * d.x + self.cos * d.y)
    }

    /// Where a rotated-view point came from in the source
    pub fn invert(&self, p: Vec2) -> Vec2 {
        let d = p - self.pivot;
        self.pivot + Vec2::new(self.cos * d.x - self.sin * d.y, self.sin * d.x + self.cos * d.y)
    }

    /// Forward warp: `dst` becomes `src` rotated by this angle
    pub fn rotate_into(&self, src: &Canvas, dst: &mut Canvas) {
        if self.is_identity() {
            dst.clone_from(src);
            return;
        }
        warp(src, dst, |p| self.invert(p));
    }

    /// Inverse warp: `dst` becomes `src` rotated back by this angle
    pub fn unrotate_into(&self, src: &Canvas, dst: &mut Canvas) {
        if self.is_identity() {
            dst.clone_from(src);
            return;
        }
        warp(src, dst, |p| self.apply(p));
    }

    pub fn rotate(&self, src: &Canvas) -> Canvas {
        let mut dst = src.clone();
        self.rotate_into(src, &mut dst);
        dst
    }

    pub fn unrotate(&self, src: &Canvas) -> Canvas {
        let mut dst = src.clone();
        self.unrotate_into(src, &mut dst);
        dst
    }
}

/// Fill every `dst` pixel by sampling `src` at `sample_at(pixel)`
fn warp<F>(src: &Canvas, dst: &mut Canvas, sample_at: F)
where
    F: Fn(Vec2) -> Vec2,
{
    let (width, height) = (dst.width(), dst.height());
    let border = src.background().map(f32::from);
    let pixels = dst.image_mut();
    for y in 0..height {
        for x in 0..width {
            let s = sample_at(Vec2::new(x as f32, y as f32));
            let c = sample_bilinear(src, s, border);
            pixels.put_pixel(x, y, Rgb(c.map(|v| v.round().clamp(0.0, 255.0) as u8)));
        }
    }
}

/// Bilinear sample with a constant border
fn sample_bilinear(src: &Canvas, p: Vec2, border: [f32; 3]) -> [f32; 3] {
    if !p.is_finite() {
        return border;
    }
    let x0 = p.x.floor();
    let y0 = p.y.floor();
    let fx = p.x - x0;
    let fy = p.y - y0;
    let (ix, iy) = (x0 as i64, y0 as i64);

    let fetch = |x: i64, y: i64| -> [f32; 3] {
        if x < 0 || y < 0 || x >= src.width() as i64 || y >= src.height() as i64 {
            border
        } else {
            src.image().get_pixel(x as u32, y as u32).0.map(f32::from)
        }
    };

    let p00 = fetch(ix, iy);
    let p10 = fetch(ix + 1, iy);
    let p01 = fetch(ix, iy + 1);
    let p11 = fetch(ix + 1, iy + 1);

    let mut out = [0.0; 3];
    for c in 0..3 {
        let top = p00[c] + (p10[c] - p00[c]) * fx;
        let bottom = p01[c] + (p11[c] - p01[c]) * fx;
        out[c] = top + (bottom - top) * fy;
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const WHITE: [u8; 3] = [255, 255, 255];

    fn gradient(width: u32, height: u32) -> Canvas {
        let mut canvas = Canvas::new(width, height, WHITE).unwrap();
        for y in 0..height {
            for x in 0..width {
                let v = (x + y) as u8;
                canvas.put_pixel(x, y, [v, 255 - v, 128]);
            }
        }
        canvas
    }

    #[test]
    fn test_angle_normalization() {
        assert_eq!(Rotation::new(360.0, Vec2::ZERO).degrees(), 0.0);
        assert_eq!(Rotation::new(-90.0, Vec2::ZERO).degrees(), 270.0);
        assert!(Rotation::new(720.0, Vec2::ZERO).is_identity());
        assert!(Rotation::new(f64::NAN, Vec2::ZERO).is_identity());
    }

    #[test]
    fn test_for_frame_zero_is_identity() {
        assert!(Rotation::for_frame(0, 7.2, 100, 100).is_identity());
        assert!(Rotation::for_frame(2, 180.0, 100, 100).is_identity());
        assert!(!Rotation::for_frame(1, 7.2, 100, 100).is_identity());
    }

    #[test]
    fn test_point_maps_are_inverse() {
        let rot = Rotation::about_center(33.0, 100, 80);
        let p = Vec2::new(12.5, 70.0);
        assert!((rot.invert(rot.apply(p)) - p).length() < 1e-3);
        assert!((rot.apply(rot.invert(p)) - p).length() < 1e-3);
    }

    #[test]
    fn test_quarter_turn_is_counter_clockwise_on_screen() {
        // Pixel to the right of the pivot moves up (smaller y) on screen
        let rot = Rotation::new(90.0, Vec2::new(50.0, 50.0));
        let moved = rot.apply(Vec2::new(60.0, 50.0));
        assert!((moved - Vec2::new(50.0, 40.0)).length() < 1e-4);
    }

    #[test]
    fn test_identity_round_trip_is_exact() {
        let canvas = gradient(40, 30);
        let rot = Rotation::for_frame(0, 7.2, 40, 30);
        let back = rot.unrotate(&rot.rotate(&canvas));
        assert_eq!(back, canvas);
    }

    #[test]
    fn test_quarter_turn_moves_marked_pixel() {
        let mut canvas = Canvas::new(21, 21, WHITE).unwrap();
        canvas.put_pixel(15, 10, [0, 0, 0]);
        let rotated = Rotation::about_center(90.0, 21, 21).rotate(&canvas);
        assert_eq!(rotated.pixel(10, 5), Some([0, 0, 0]));
        assert_eq!(rotated.pixel(15, 10), Some(WHITE));
    }

    #[test]
    fn test_blank_canvas_stays_blank_under_rotation() {
        let canvas = Canvas::new(50, 30, WHITE).unwrap();
        let rot = Rotation::about_center(17.0, 50, 30);
        assert!(rot.rotate(&canvas).is_blank());
        assert!(rot.unrotate(&rot.rotate(&canvas)).is_blank());
    }

    #[test]
    fn test_zero_sized_canvas_is_noop() {
        let canvas = Canvas::new(0, 0, WHITE).unwrap();
        let rot = Rotation::about_center(45.0, 0, 0);
        assert_eq!(rot.rotate(&canvas), canvas);
    }

    proptest! {
        #[test]
        fn prop_round_trip_error_is_bounded(degrees in 0.0f64..360.0) {
            let (w, h) = (64, 64);
            let canvas = gradient(w, h);
            let rot = Rotation::about_center(degrees, w, h);
            let back = rot.unrotate(&rot.rotate(&canvas));
            let pivot = rot.pivot();
            // Pixels whose samples stay inside the source on both passes
            let safe = (w.min(h) / 2) as f32 - 3.0;
            for y in 0..h {
                for x in 0..w {
                    if (Vec2::new(x as f32, y as f32) - pivot).length() > safe {
                        continue;
                    }
                    let a = canvas.pixel(x, y).unwrap();
                    let b = back.pixel(x, y).unwrap();
                    for c in 0..3 {
                        prop_assert!((a[c] as i32 - b[c] as i32).abs() <= 2);
                    }
                }
            }
        }
    }
}
