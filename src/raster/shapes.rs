//! Shape rasterization for brush marks

use glam::Vec2;

use super::canvas::Canvas;

/// Draw a filled disc centered at the pixel nearest `center`.
///
/// A pixel is covered when its offset from the center satisfies
/// `dx² + dy² <= r²` with `r = round(radius)`; radius 0 marks a single pixel.
/// Parts outside the canvas are clipped.
pub fn fill_disc(canvas: &mut Canvas, center: Vec2, radius: f32, color: [u8; 3]) {
    if canvas.is_empty() || !center.is_finite() || !radius.is_finite() {
        return;
    }
    // A disc wider than the canvas covers it entirely, and a center further
    // than twice that never touches it; clamping keeps the math in range.
    let extent = canvas.width() as i64 + canvas.height() as i64;
    let cx = (center.x.round() as i64).clamp(-2 * extent, 2 * extent);
    let cy = (center.y.round() as i64).clamp(-2 * extent, 2 * extent);
    let r = (radius.max(0.0).round() as i64).min(extent);
    let r_sq = r * r;

    let x_min = (cx - r).max(0);
    let x_max = (cx + r).min(canvas.width() as i64 - 1);
    let y_min = (cy - r).max(0);
    let y_max = (cy + r).min(canvas.height() as i64 - 1);

    for y in y_min..=y_max {
        let dy = y - cy;
        for x in x_min..=x_max {
            let dx = x - cx;
            if dx * dx + dy * dy <= r_sq {
                canvas.put_pixel(x as u32, y as u32, color);
            }
        }
    }
}
