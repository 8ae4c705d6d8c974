//! Built-in scenes.

use orb_math::{Color, Vec3};

use crate::error::{SceneError, SceneResult};
use crate::scene::{Camera, Reflectance, Scene, Sphere};

/// Names accepted by [`Scene::preset`].
pub const PRESET_NAMES: &[&str] = &["cornell", "wada"];

/// Image-plane scale shared by the built-in cameras.
const FOV_SCALE: f64 = 0.5135;

/// Distance primary rays start in front of the camera.
const NEAR_CLIP: f64 = 140.0;

fn default_camera() -> Camera {
    Camera::new(
        Vec3::new(50.0, 52.0, 295.6),
        Vec3::new(0.0, -0.042612, -1.0),
        FOV_SCALE,
        NEAR_CLIP,
    )
}

impl Scene {
    /// Look up a built-in scene by name.
    pub fn preset(name: &str) -> SceneResult<Scene> {
        match name {
            "cornell" => Ok(Scene::cornell_box()),
            "wada" => Ok(Scene::wada()),
            other => Err(SceneError::UnknownPreset(other.to_string())),
        }
    }

    /// Cornell box: five diffuse walls, a mirrored front wall, a mirror ball,
    /// a glass ball and a large spherical ceiling light.
    pub fn cornell_box() -> Scene {
        use Reflectance::*;

        let black = Color::ZERO;
        let spheres = vec![
            // Left
            Sphere::new(1e5, Vec3::new(1e5 + 1.0, 40.8, 81.6), black, Color::new(0.75, 0.75, 0.25), Diffuse),
            // Right
            Sphere::new(1e5, Vec3::new(-1e5 + 99.0, 40.8, 81.6), black, Color::new(0.25, 0.25, 0.75), Diffuse),
            // Back
            Sphere::new(1e5, Vec3::new(50.0, 40.8, 1e5), black, Color::splat(0.75), Diffuse),
            // Front
            Sphere::new(1e5, Vec3::new(50.0, 40.8, -1e5 + 170.0), black, Color::splat(0.75), Specular),
            // Bottom
            Sphere::new(1e5, Vec3::new(50.0, 1e5, 81.6), black, Color::splat(0.75), Diffuse),
            // Top
            Sphere::new(1e5, Vec3::new(50.0, -1e5 + 81.6, 81.6), black, Color::splat(0.75), Diffuse),
            // Mirror
            Sphere::new(16.5, Vec3::new(27.0, 16.5, 47.0), black, Color::ONE * 0.999, Specular),
            // Glass
            Sphere::new(16.5, Vec3::new(73.0, 16.5, 78.0), black, Color::ONE * 0.999, Dielectric),
            // Light
            Sphere::new(600.0, Vec3::new(50.0, 681.6 - 0.27, 81.6), Color::splat(12.0), black, Diffuse),
        ];

        Scene::new("cornell", default_camera(), spheres)
    }

    /// Four mirror balls and a glass ball arranged around a center point,
    /// lit by a bright sky dome over a dark ground.
    pub fn wada() -> Scene {
        use Reflectance::*;

        let r = 60.0;
        let t = 30.0_f64.to_radians();
        let d = r / t.cos();
        let center = Vec3::new(50.0, 40.8, 62.0);
        let black = Color::ZERO;

        let spheres = vec![
            // Sky
            Sphere::new(1e5, Vec3::new(50.0, 100.0, 0.0), Color::splat(3.0), black, Diffuse),
            // Ground
            Sphere::new(1e5, Vec3::new(50.0, -1e5 - d - r, 0.0), black, Color::splat(0.1), Diffuse),
            // Red
            Sphere::new(r, center + Vec3::new(t.cos(), t.sin(), 0.0) * d, black, Color::new(1.0, 0.3, 0.3) * 0.999, Specular),
            // Green
            Sphere::new(r, center + Vec3::new(-t.cos(), t.sin(), 0.0) * d, black, Color::new(0.3, 1.0, 0.3) * 0.999, Specular),
            // Blue
            Sphere::new(r, center + Vec3::new(0.0, -1.0, 0.0) * d, black, Color::new(0.3, 0.3, 1.0) * 0.999, Specular),
            // Back
            Sphere::new(r, center + Vec3::new(0.0, 0.0, -1.0) * d, black, Color::splat(0.53) * 0.999, Specular),
            // Front
            Sphere::new(r, center + Vec3::new(0.0, 0.0, 1.0) * d, black, Color::ONE * 0.999, Dielectric),
        ];

        Scene::new("wada", default_camera(), spheres)
    }
}
