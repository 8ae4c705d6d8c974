//! Orb math primitives.
//!
//! Everything is double precision: the renderer relies on f64 to stay
//! bit-reproducible across runs with the same seed.

/// Re-export glam so downstream crates share one vector implementation.
pub use glam;

mod interval;
mod ray;
mod rng;

pub use interval::Interval;
pub use ray::Ray;
pub use rng::XorShiftRng;

/// 3D vector used for points, directions and colors.
pub type Vec3 = glam::DVec3;

/// RGB color. Channels may exceed [0, 1] until they are clamped at output.
pub type Color = glam::DVec3;
