//! Scattering helpers for the three surface behaviors.

use std::f64::consts::PI;

use orb_math::{Vec3, XorShiftRng};

/// Index of refraction outside every dielectric (air).
pub const IOR_OUTSIDE: f64 = 1.0;

/// Index of refraction inside a dielectric sphere (glass).
pub const IOR_GLASS: f64 = 1.5;

/// Reflect a direction about a normal.
#[inline]
pub fn reflect(d: Vec3, n: Vec3) -> Vec3 {
    d - n * 2.0 * n.dot(d)
}

/// Schlick's approximation of Fresnel reflectance.
///
/// `c` is `1 - cos(theta)` on the less dense side of the boundary.
#[inline]
pub fn schlick(r0: f64, c: f64) -> f64 {
    r0 + (1.0 - r0) * c * c * c * c * c
}

/// Normal-incidence reflectance between two media.
#[inline]
pub fn normal_reflectance(n1: f64, n2: f64) -> f64 {
    let a = n2 - n1;
    let b = n2 + n1;
    a * a / (b * b)
}

/// Outcome of a ray meeting a dielectric boundary.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Refraction {
    /// No transmitted direction exists; everything reflects.
    TotalInternal,
    /// Light splits between the mirror direction and `direction`.
    Transmitted {
        direction: Vec3,
        /// Fresnel reflectance
        reflectance: f64,
    },
}

impl Refraction {
    /// Refract `d` through a glass surface with outward normal `n`.
    ///
    /// `nl` is the normal flipped to face against `d`; the two agree when
    /// the ray enters from outside.
    pub fn through(d: Vec3, n: Vec3, nl: Vec3) -> Self {
        let into = n.dot(nl) > 0.0;
        let nnt = if into {
            IOR_OUTSIDE / IOR_GLASS
        } else {
            IOR_GLASS / IOR_OUTSIDE
        };
        let ddn = d.dot(nl);

        let cos2t = 1.0 - nnt * nnt * (1.0 - ddn * ddn);
        if cos2t < 0.0 {
            return Refraction::TotalInternal;
        }

        let sign = if into { 1.0 } else { -1.0 };
        let direction = (d * nnt - n * (sign * (ddn * nnt + cos2t.sqrt()))).normalize();

        let r0 = normal_reflectance(IOR_OUTSIDE, IOR_GLASS);
        let c = 1.0 - if into { -ddn } else { direction.dot(n) };

        Refraction::Transmitted {
            direction,
            reflectance: schlick(r0, c),
        }
    }
}

/// Cosine-weighted direction on the hemisphere around `w`.
///
/// Consumes two uniform draws: azimuth first, then radius.
pub fn cosine_hemisphere(w: Vec3, rng: &mut XorShiftRng) -> Vec3 {
    let r1 = 2.0 * PI * rng.next_f64();
    let r2 = rng.next_f64();
    let r2s = r2.sqrt();

    let axis = if w.x.abs() > 0.1 { Vec3::Y } else { Vec3::X };
    let u = axis.cross(w).normalize();
    let v = w.cross(u);

    (u * r1.cos() * r2s + v * r1.sin() * r2s + w * (1.0 - r2).sqrt()).normalize()
}
