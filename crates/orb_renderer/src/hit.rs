//! Ray-sphere intersection.

use orb_core::Sphere;
use orb_math::{Interval, Ray};

/// Minimum hit distance. Keeps secondary rays from hitting the surface they
/// start on.
pub const EPSILON: f64 = 1e-4;

/// Valid range for hit distances.
const HIT_RANGE: Interval = Interval::new(EPSILON, f64::INFINITY);

/// Nearest intersection of a ray with a scene.
#[derive(Debug, Clone, Copy)]
pub struct Hit<'a> {
    /// The sphere that was hit
    pub sphere: &'a Sphere,
    /// Index of the sphere in the scene
    pub index: usize,
    /// Distance along the ray
    pub t: f64,
}

/// Distance along `ray` to `sphere`, if it is hit beyond [`EPSILON`].
///
/// Solves `t^2 - 2bt + (op.op - r^2) = 0` with `op = center - origin` and
/// `b = op.d`, which assumes a unit-length direction. The near root wins;
/// the far root is used when the origin is inside the sphere.
pub fn hit_sphere(sphere: &Sphere, ray: &Ray) -> Option<f64> {
    let op = sphere.position - ray.origin;
    let b = op.dot(ray.direction);
    let det = b * b - op.dot(op) + sphere.radius * sphere.radius;
    if det < 0.0 {
        return None;
    }

    let det = det.sqrt();
    let near = b - det;
    if HIT_RANGE.surrounds(near) {
        return Some(near);
    }
    let far = b + det;
    if HIT_RANGE.surrounds(far) {
        return Some(far);
    }
    None
}

/// Find the nearest sphere hit by `ray`.
///
/// Spheres are scanned last to first and only a strictly closer hit
/// replaces the current one, so exact ties go to the highest index.
pub fn intersect<'a>(spheres: &'a [Sphere], ray: &Ray) -> Option<Hit<'a>> {
    let mut nearest: Option<Hit<'a>> = None;

    for (index, sphere) in spheres.iter().enumerate().rev() {
        let Some(t) = hit_sphere(sphere, ray) else {
            continue;
        };
        if nearest.map_or(true, |hit| t < hit.t) {
            nearest = Some(Hit { sphere, index, t });
        }
    }

    nearest
}
