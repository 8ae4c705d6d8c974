//! Scene description types for Orb.
//!
//! A scene is a camera plus an ordered list of spheres. It is built once,
//! validated, and then shared read-only by every render worker.

use std::path::Path;

use orb_math::{Color, Interval, Vec3};
use serde::{Deserialize, Serialize};

use crate::error::{SceneError, SceneResult};

/// How a surface scatters incoming light.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Reflectance {
    /// Ideal Lambertian reflection.
    Diffuse,
    /// Perfect mirror.
    Specular,
    /// Glass-like refraction with Fresnel-weighted reflection.
    Dielectric,
}

/// A sphere with material properties.
///
/// Very large radii are used to approximate planes (walls, floors).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sphere {
    pub radius: f64,
    /// Center of the sphere
    pub position: Vec3,
    /// Radiance emitted regardless of incoming light
    pub emission: Color,
    /// Per-channel albedo, each in [0, 1]
    pub color: Color,
    pub reflectance: Reflectance,
}

impl Sphere {
    /// Create a new sphere.
    pub fn new(
        radius: f64,
        position: Vec3,
        emission: Color,
        color: Color,
        reflectance: Reflectance,
    ) -> Self {
        Self {
            radius,
            position,
            emission,
            color,
            reflectance,
        }
    }

    /// Check if this sphere emits light.
    pub fn is_emissive(&self) -> bool {
        self.emission.max_element() > 0.0
    }

    fn validate(&self, index: usize) -> SceneResult<()> {
        let invalid = |reason: &str| SceneError::InvalidSphere {
            index,
            reason: reason.to_string(),
        };

        if !self.radius.is_finite() || self.radius <= 0.0 {
            return Err(invalid("radius must be positive and finite"));
        }
        if !self.position.is_finite() {
            return Err(invalid("position must be finite"));
        }
        if !self.emission.is_finite() || self.emission.min_element() < 0.0 {
            return Err(invalid("emission must be finite and non-negative"));
        }
        if !self.color.to_array().iter().all(|&c| Interval::UNIT.contains(c)) {
            return Err(invalid("color channels must lie in [0, 1]"));
        }
        Ok(())
    }
}

/// A fixed pinhole camera.
///
/// `fov_scale` sizes the image plane relative to the view direction and
/// `near_clip` pushes each primary ray's origin forward along its direction
/// so rays never start inside geometry close to the camera.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Camera {
    pub position: Vec3,
    /// Unit view direction
    pub direction: Vec3,
    pub fov_scale: f64,
    pub near_clip: f64,
}

impl Camera {
    /// Create a camera looking along `direction` (normalized here).
    pub fn new(position: Vec3, direction: Vec3, fov_scale: f64, near_clip: f64) -> Self {
        Self {
            position,
            direction: direction.normalize(),
            fov_scale,
            near_clip,
        }
    }

    fn validate(&self) -> SceneResult<()> {
        if !self.position.is_finite() {
            return Err(SceneError::InvalidCamera("position must be finite".into()));
        }
        if !self.direction.is_finite() || self.direction.length_squared() == 0.0 {
            return Err(SceneError::InvalidCamera(
                "direction must be finite and non-zero".into(),
            ));
        }
        // The image plane's horizontal axis is fixed to +X, so the vertical
        // axis is undefined when the view direction lies along X.
        if Vec3::X.cross(self.direction).length_squared()
            <= 1e-12 * self.direction.length_squared()
        {
            return Err(SceneError::InvalidCamera(
                "direction must not be parallel to the x axis".into(),
            ));
        }
        if !self.fov_scale.is_finite() || self.fov_scale <= 0.0 {
            return Err(SceneError::InvalidCamera("fov_scale must be positive".into()));
        }
        if !self.near_clip.is_finite() || self.near_clip < 0.0 {
            return Err(SceneError::InvalidCamera(
                "near_clip must be non-negative".into(),
            ));
        }
        Ok(())
    }

    /// Normalize a direction read from a file.
    ///
    /// Directions already at unit length are left bit-for-bit untouched so a
    /// saved scene renders identically after reloading.
    fn with_unit_direction(mut self) -> Self {
        if (self.direction.length_squared() - 1.0).abs() > 1e-12 {
            self.direction = self.direction.normalize();
        }
        self
    }
}

/// A complete scene: camera plus spheres.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scene {
    pub name: String,
    pub camera: Camera,
    pub spheres: Vec<Sphere>,
}

impl Scene {
    /// Create a new scene.
    pub fn new(name: impl Into<String>, camera: Camera, spheres: Vec<Sphere>) -> Self {
        Self {
            name: name.into(),
            camera,
            spheres,
        }
    }

    /// Get the number of spheres.
    pub fn len(&self) -> usize {
        self.spheres.len()
    }

    /// Check if the scene has no spheres.
    pub fn is_empty(&self) -> bool {
        self.spheres.is_empty()
    }

    /// Count the spheres that emit light.
    pub fn emitter_count(&self) -> usize {
        self.spheres.iter().filter(|s| s.is_emissive()).count()
    }

    /// Check every sphere and the camera.
    ///
    /// Rendering assumes a validated scene: degenerate geometry would
    /// otherwise turn into NaN colors silently.
    pub fn validate(&self) -> SceneResult<()> {
        self.camera.validate()?;
        for (index, sphere) in self.spheres.iter().enumerate() {
            sphere.validate(index)?;
        }

        if self.is_empty() {
            log::warn!("Scene '{}' has no spheres; the image will be black", self.name);
        } else if self.emitter_count() == 0 {
            log::warn!("Scene '{}' has no emissive spheres; the image will be black", self.name);
        }
        Ok(())
    }

    /// Parse and validate a scene from JSON text.
    pub fn from_json_str(json: &str) -> SceneResult<Self> {
        let mut scene: Scene = serde_json::from_str(json)?;
        scene.camera = scene.camera.with_unit_direction();
        scene.validate()?;
        log::debug!(
            "Parsed scene '{}': {} spheres, {} emitters",
            scene.name,
            scene.len(),
            scene.emitter_count()
        );
        Ok(scene)
    }

    /// Load and validate a scene from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> SceneResult<Self> {
        let path = path.as_ref();
        log::info!("Loading scene from: {:?}", path);

        let json = std::fs::read_to_string(path).map_err(|source| SceneError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&json)
    }

    /// Serialize the scene as pretty-printed JSON.
    pub fn to_json(&self) -> SceneResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
