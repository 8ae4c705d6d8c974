//! Orb Renderer - CPU path tracing for sphere scenes.
//!
//! A Monte Carlo path tracer with:
//! - Recursive radiance estimation with Russian-roulette termination
//! - Diffuse, mirror and glass surfaces
//! - 2x2 sub-pixel tent-filtered anti-aliasing
//! - Sequential or bucketed parallel rendering, both seed-reproducible
//! - Plain-text PPM output

mod bucket;
mod camera;
mod error;
mod hit;
mod material;
mod ppm;
mod radiance;
mod renderer;

pub use bucket::{generate_buckets, render_bucket, Bucket, BucketResult, DEFAULT_BUCKET_SIZE};
pub use camera::{tent, CameraBasis};
pub use error::{RenderError, RenderResult};
pub use hit::{hit_sphere, intersect, Hit, EPSILON};
pub use material::{cosine_hemisphere, reflect, schlick, Refraction, IOR_GLASS, IOR_OUTSIDE};
pub use ppm::{save_ppm, write_ppm};
pub use radiance::{radiance, MAX_DEPTH, ROULETTE_DEPTH, SPLIT_DEPTH};
pub use renderer::{
    clamp_color, color_to_rgb, render_pixel, CancelToken, ImageBuffer, RenderMode,
    RenderProgress, Renderer,
};

/// Re-export the scene and math types renderers are driven with.
pub use orb_core::{Camera, Reflectance, RenderSettings, Scene, Sphere};
pub use orb_math::{Color, Ray, Vec3, XorShiftRng};
