//! Primary ray generation.

use orb_core::Camera;
use orb_math::{Ray, Vec3, XorShiftRng};

/// Map a uniform draw in [0, 2) to a tent distribution on [-1, 1).
///
/// Samples cluster near the center of the sub-pixel cell, which filters
/// better than a box.
#[inline]
pub fn tent(r: f64) -> f64 {
    if r < 1.0 {
        r.sqrt() - 1.0
    } else {
        1.0 - (2.0 - r).sqrt()
    }
}

/// Camera frame sized for a specific image resolution.
#[derive(Debug, Clone)]
pub struct CameraBasis {
    origin: Vec3,
    direction: Vec3,
    /// Image-plane right axis, scaled by aspect ratio and field of view
    cx: Vec3,
    /// Image-plane up axis, scaled by field of view
    cy: Vec3,
    near_clip: f64,
    width: f64,
    height: f64,
}

impl CameraBasis {
    /// Build the frame for a `width` x `height` image.
    pub fn new(camera: &Camera, width: u32, height: u32) -> Self {
        let w = f64::from(width);
        let h = f64::from(height);

        let cx = Vec3::new(w * camera.fov_scale / h, 0.0, 0.0);
        let cy = cx.cross(camera.direction).normalize() * camera.fov_scale;

        Self {
            origin: camera.position,
            direction: camera.direction,
            cx,
            cy,
            near_clip: camera.near_clip,
            width: w,
            height: h,
        }
    }

    /// Ray through sub-pixel cell `(sx, sy)` of pixel `(x, y)`.
    ///
    /// `y` counts up from the bottom of the image. `dx` and `dy` are tent
    /// offsets in [-1, 1].
    pub fn ray(&self, x: u32, y: u32, sx: u32, sy: u32, dx: f64, dy: f64) -> Ray {
        let u = ((f64::from(sx) + 0.5 + dx) / 2.0 + f64::from(x)) / self.width - 0.5;
        let v = ((f64::from(sy) + 0.5 + dy) / 2.0 + f64::from(y)) / self.height - 0.5;

        let d = (self.cx * u + self.cy * v + self.direction).normalize();
        Ray::new(self.origin + d * self.near_clip, d)
    }

    /// Jittered ray through sub-pixel cell `(sx, sy)`.
    ///
    /// Consumes two uniform draws: x offset, then y offset.
    pub fn sample(&self, x: u32, y: u32, sx: u32, sy: u32, rng: &mut XorShiftRng) -> Ray {
        let dx = tent(2.0 * rng.next_f64());
        let dy = tent(2.0 * rng.next_f64());
        self.ray(x, y, sx, sy, dx, dy)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn camera() -> Camera {
        Camera::new(Vec3::ZERO, Vec3::new(0.0, 0.0, -1.0), 0.5, 10.0)
    }

    #[test]
    fn test_tent_boundaries() {
        assert_eq!(tent(0.0), -1.0);
        assert_eq!(tent(1.0), 0.0);
        assert!((tent(2.0 - 1e-12) - 1.0).abs() < 1e-5);
        assert_eq!(tent(2.0), 1.0);
    }

    #[test]
    fn test_tent_is_monotonic_and_continuous() {
        let mut prev = tent(0.0);
        for i in 1..=2000 {
            let value = tent(i as f64 / 1000.0);
            assert!(value >= prev);
            assert!(value - prev < 0.05);
            prev = value;
        }
    }

    #[test]
    fn test_center_ray_follows_view_direction() {
        let basis = CameraBasis::new(&camera(), 2, 2);
        // Bottom-left pixel, upper-right cell edge = image center
        let ray = basis.ray(0, 0, 1, 1, 0.5, 0.5);

        assert!((ray.direction - Vec3::new(0.0, 0.0, -1.0)).length() < 1e-12);
        assert!((ray.origin - Vec3::new(0.0, 0.0, -10.0)).length() < 1e-12);
    }

    #[test]
    fn test_image_axes() {
        let basis = CameraBasis::new(&camera(), 4, 4);

        let left = basis.ray(0, 2, 0, 0, 0.0, 0.0);
        let right = basis.ray(3, 2, 1, 1, 0.0, 0.0);
        assert!(left.direction.x < right.direction.x);

        let bottom = basis.ray(2, 0, 0, 0, 0.0, 0.0);
        let top = basis.ray(2, 3, 1, 1, 0.0, 0.0);
        assert!(bottom.direction.y < top.direction.y);
    }

    #[test]
    fn test_aspect_ratio_widens_horizontal_axis() {
        let wide = CameraBasis::new(&camera(), 200, 100);
        assert!((wide.cx.x - 1.0).abs() < 1e-12);
        assert!((wide.cy.length() - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_sample_directions_are_unit() {
        let basis = CameraBasis::new(&camera(), 16, 9);
        let mut rng = XorShiftRng::new(4);

        for _ in 0..100 {
            let ray = basis.sample(7, 3, 1, 0, &mut rng);
            assert!((ray.direction.length() - 1.0).abs() < 1e-12);
        }
    }
}
