//! Recursive Monte Carlo radiance estimation.

use orb_core::{Reflectance, Sphere};
use orb_math::{Color, Ray, XorShiftRng};

use crate::hit::intersect;
use crate::material::{cosine_hemisphere, reflect, Refraction};

/// Past this depth a path returns emission only, whatever roulette says.
pub const MAX_DEPTH: u32 = 100;

/// Russian roulette starts once a path is deeper than this.
pub const ROULETTE_DEPTH: u32 = 5;

/// Dielectrics trace both branches up to this depth, then pick one.
pub const SPLIT_DEPTH: u32 = 2;

/// Estimate the radiance arriving along `ray`.
///
/// `depth` is the number of bounces already taken; camera rays start at 0.
/// The generator is advanced in a fixed order, so the same seed always gives
/// the same estimate.
pub fn radiance(spheres: &[Sphere], ray: &Ray, depth: u32, rng: &mut XorShiftRng) -> Color {
    let Some(hit) = intersect(spheres, ray) else {
        return Color::ZERO;
    };
    let obj = hit.sphere;

    let x = ray.at(hit.t);
    let n = (x - obj.position).normalize();
    let nl = if n.dot(ray.direction) < 0.0 { n } else { -n };
    let mut f = obj.color;
    let p = f.max_element();

    if depth > MAX_DEPTH {
        return obj.emission;
    }

    let depth = depth + 1;
    if depth > ROULETTE_DEPTH {
        if rng.next_f64() < p {
            f = f * (1.0 / p);
        } else {
            return obj.emission;
        }
    }

    match obj.reflectance {
        Reflectance::Diffuse => {
            let d = cosine_hemisphere(nl, rng);
            obj.emission + f * radiance(spheres, &Ray::new(x, d), depth, rng)
        }
        Reflectance::Specular => {
            let reflected = Ray::new(x, reflect(ray.direction, n));
            obj.emission + f * radiance(spheres, &reflected, depth, rng)
        }
        Reflectance::Dielectric => {
            let reflected = Ray::new(x, reflect(ray.direction, n));

            let (direction, re) = match Refraction::through(ray.direction, n, nl) {
                Refraction::TotalInternal => {
                    return obj.emission + f * radiance(spheres, &reflected, depth, rng);
                }
                Refraction::Transmitted {
                    direction,
                    reflectance,
                } => (direction, reflectance),
            };
            let transmitted = Ray::new(x, direction);
            let tr = 1.0 - re;

            let incoming = if depth > SPLIT_DEPTH {
                let p_reflect = 0.25 + 0.5 * re;
                if rng.next_f64() < p_reflect {
                    radiance(spheres, &reflected, depth, rng) * (re / p_reflect)
                } else {
                    radiance(spheres, &transmitted, depth, rng) * (tr / (1.0 - p_reflect))
                }
            } else {
                let r = radiance(spheres, &reflected, depth, rng) * re;
                let t = radiance(spheres, &transmitted, depth, rng) * tr;
                r + t
            };

            obj.emission + f * incoming
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use orb_core::Scene;
    use orb_math::Vec3;

    fn lamp(color: Color, reflectance: Reflectance) -> Sphere {
        Sphere::new(1.0, Vec3::new(0.0, 0.0, -5.0), Color::ONE, color, reflectance)
    }

    fn toward_lamp() -> Ray {
        Ray::new(Vec3::ZERO, Vec3::new(0.0, 0.0, -1.0))
    }

    #[test]
    fn test_miss_is_black() {
        let spheres = vec![lamp(Color::ZERO, Reflectance::Diffuse)];
        let ray = Ray::new(Vec3::ZERO, Vec3::Y);
        let mut rng = XorShiftRng::new(1);

        assert_eq!(radiance(&spheres, &ray, 0, &mut rng), Color::ZERO);
        assert_eq!(radiance(&[], &toward_lamp(), 0, &mut rng), Color::ZERO);
    }

    #[test]
    fn test_zero_albedo_emitter_returns_emission() {
        let spheres = vec![lamp(Color::ZERO, Reflectance::Diffuse)];
        let mut rng = XorShiftRng::new(7);

        for _ in 0..100 {
            assert_eq!(radiance(&spheres, &toward_lamp(), 0, &mut rng), Color::ONE);
        }
    }

    #[test]
    fn test_depth_cutoff_returns_emission_without_sampling() {
        let spheres = vec![lamp(Color::splat(0.9), Reflectance::Diffuse)];
        let mut rng = XorShiftRng::new(3);
        let before = rng.clone();

        let color = radiance(&spheres, &toward_lamp(), MAX_DEPTH + 1, &mut rng);
        assert_eq!(color, Color::ONE);
        assert_eq!(rng, before);
    }

    #[test]
    fn test_roulette_terminates_black_surfaces() {
        // p = 0: past the roulette depth the path always stops at emission
        let spheres = vec![lamp(Color::ZERO, Reflectance::Specular)];
        let mut rng = XorShiftRng::new(11);

        let color = radiance(&spheres, &toward_lamp(), ROULETTE_DEPTH, &mut rng);
        assert_eq!(color, Color::ONE);
    }

    #[test]
    fn test_mirror_facing_away_sees_nothing() {
        let spheres = vec![lamp(Color::splat(0.5), Reflectance::Specular)];
        let mut rng = XorShiftRng::new(5);

        // The mirrored ray heads back to the origin and leaves the scene
        let color = radiance(&spheres, &toward_lamp(), 0, &mut rng);
        assert_eq!(color, Color::ONE);
    }

    #[test]
    fn test_glass_inside_emitter_is_bounded() {
        let spheres = vec![lamp(Color::splat(0.999), Reflectance::Dielectric)];
        let mut rng = XorShiftRng::new(8);

        for _ in 0..50 {
            let c = radiance(&spheres, &toward_lamp(), 0, &mut rng);
            assert!(c.is_finite());
            assert!(c.min_element() >= 1.0);
        }
    }

    #[test]
    fn test_cornell_radiance_non_negative() {
        let scene = Scene::cornell_box();
        let camera = &scene.camera;
        let mut rng = XorShiftRng::new(12345);

        for i in 0..200 {
            let jitter = Vec3::new((i % 20) as f64 * 0.01 - 0.1, (i / 20) as f64 * 0.01 - 0.05, 0.0);
            let d = (camera.direction + jitter).normalize();
            let ray = Ray::new(camera.position + d * camera.near_clip, d);

            let c = radiance(&scene.spheres, &ray, 0, &mut rng);
            assert!(c.is_finite());
            assert!(c.min_element() >= 0.0, "negative radiance {c:?}");
        }
    }

    #[test]
    fn test_same_seed_same_estimate() {
        let scene = Scene::cornell_box();
        let d = scene.camera.direction;
        let ray = Ray::new(scene.camera.position + d * scene.camera.near_clip, d);

        let a = radiance(&scene.spheres, &ray, 0, &mut XorShiftRng::new(99));
        let b = radiance(&scene.spheres, &ray, 0, &mut XorShiftRng::new(99));
        assert_eq!(a, b);
    }
}
